pub mod api;
pub mod authentication;

pub use self::api::{call_backend, call_backend_raw, AuthRequirement, BackendCall};
