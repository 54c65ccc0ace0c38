#![allow(clippy::unwrap_used)]

use std::io::Write;

use serial_test::serial;
use storefront::configs::settings::{CheckoutMode, RedirectTarget, SessionLookup, Settings};

fn config_file(contents: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file
}

#[test]
#[serial]
fn file_values_are_loaded_and_validated() {
    let file = config_file(
        r#"
[backend]
base_url = "https://api.jewels.example.com/api"
request_timeout_secs = 15

[checkout]
mode = "production"
redirect_target = "_modal"
return_url = "https://jewels.example.com/payment-status"
session_lookup = "strict"

[verification]
max_attempts = 5
initial_backoff_ms = 250
"#,
    );

    let settings = Settings::with_config_path(Some(file.path().to_path_buf())).unwrap();
    settings.validate().unwrap();

    assert_eq!(settings.backend.base_url, "https://api.jewels.example.com/api");
    assert_eq!(settings.backend.request_timeout_secs, 15);
    assert_eq!(settings.checkout.mode, CheckoutMode::Production);
    assert_eq!(settings.checkout.redirect_target, RedirectTarget::Modal);
    assert_eq!(settings.checkout.session_lookup, SessionLookup::Strict);
    assert_eq!(settings.verification.max_attempts, 5);
}

#[test]
#[serial]
fn environment_overrides_the_file() {
    let file = config_file(
        r#"
[backend]
base_url = "https://api.jewels.example.com/api"
"#,
    );

    std::env::set_var("STOREFRONT__BACKEND__BASE_URL", "http://127.0.0.1:5050/api");
    std::env::set_var("STOREFRONT__VERIFICATION__MAX_ATTEMPTS", "0");
    let settings = Settings::with_config_path(Some(file.path().to_path_buf()));
    std::env::remove_var("STOREFRONT__BACKEND__BASE_URL");
    std::env::remove_var("STOREFRONT__VERIFICATION__MAX_ATTEMPTS");

    let settings = settings.unwrap();
    assert_eq!(settings.backend.base_url, "http://127.0.0.1:5050/api");
    assert_eq!(settings.checkout.session_lookup, SessionLookup::Compatible);
    assert!(settings.validate().is_err());
}
