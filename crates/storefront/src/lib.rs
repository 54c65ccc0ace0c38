#![forbid(unsafe_code)]
#![doc = include_str!(concat!(env!("CARGO_MANIFEST_DIR" ), "/", "README.md"))]

pub mod configs;
pub mod core;
pub mod routes;
pub mod services;

pub use router_env::logger;

pub use self::routes::AppState;
