pub mod app;

pub use self::app::AppState;
