#![forbid(unsafe_code)]
#![doc = include_str!(concat!(env!("CARGO_MANIFEST_DIR" ), "/", "README.md"))]

pub mod admin;
pub mod cart;
pub mod catalog;
pub mod custom_orders;
pub mod enums;
pub mod gold_vault;
pub mod notifications;
pub mod orders;
pub mod rates;
pub mod scheme_payments;
pub mod schemes;
pub mod types;
pub mod user;
pub mod wallet;
pub mod wishlist;
