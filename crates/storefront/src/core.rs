pub mod admin;
pub mod cart;
pub mod catalog;
pub mod custom_orders;
pub mod errors;
pub mod forms;
pub mod gold_vault;
pub mod notifications;
pub mod orders;
pub mod payments;
pub mod rates;
pub mod schemes;
pub mod user;
pub mod wallet;
pub mod wishlist;
