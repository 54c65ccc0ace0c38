//! Custom validations for form fields and shared types.

#![deny(clippy::invalid_regex)]

use std::sync::LazyLock;

use error_stack::report;
use regex::Regex;
#[cfg(feature = "logs")]
use router_env::logger;
use rust_decimal::Decimal;
use time::Date;

use crate::{
    consts,
    errors::{CustomResult, ValidationError},
};

fn compile(pattern: &str) -> Option<Regex> {
    match Regex::new(pattern) {
        Ok(regex) => Some(regex),
        Err(_error) => {
            #[cfg(feature = "logs")]
            logger::error!(?_error);
            None
        }
    }
}

fn invalid(message: impl Into<String>) -> error_stack::Report<ValidationError> {
    report!(ValidationError::InvalidValue {
        message: message.into()
    })
}

/// Validates an Indian mobile number, accepting an optional `+91` or `0` prefix and
/// separating spaces or dashes.
///
/// Returns the bare ten digit number.
pub fn validate_phone_number(phone_number: &str) -> CustomResult<String, ValidationError> {
    static MOBILE_REGEX: LazyLock<Option<Regex>> = LazyLock::new(|| compile(r"^[6-9][0-9]{9}$"));

    let digits: String = phone_number
        .chars()
        .filter(|c| !matches!(c, ' ' | '-' | '(' | ')'))
        .collect();
    let digits = digits
        .strip_prefix("+91")
        .or_else(|| (digits.len() == 11).then(|| digits.strip_prefix('0')).flatten())
        .unwrap_or(&digits);

    let mobile_regex = MOBILE_REGEX
        .as_ref()
        .ok_or_else(|| invalid("Invalid regex expression"))?;

    if !mobile_regex.is_match(digits) {
        return Err(invalid(format!(
            "Could not parse phone number: {phone_number}"
        )));
    }

    Ok(digits.to_string())
}

/// Performs a simple validation against a provided email address.
pub fn validate_email(email: &str) -> CustomResult<(), ValidationError> {
    static EMAIL_REGEX: LazyLock<Option<Regex>> = LazyLock::new(|| {
        compile(
            r"^(?i)[a-z0-9.!#$%&'*+/=?^_`{|}~-]+@[a-z0-9](?:[a-z0-9-]{0,61}[a-z0-9])?(?:\.[a-z0-9](?:[a-z0-9-]{0,61}[a-z0-9])?)+$",
        )
    });
    let email_regex = EMAIL_REGEX
        .as_ref()
        .ok_or_else(|| invalid("Invalid regex expression"))?;

    let email = email.trim();
    if email.is_empty() || email.chars().count() > consts::EMAIL_MAX_LENGTH {
        return Err(invalid(
            "Email address is either empty or exceeds maximum allowed length",
        ));
    }

    if !email_regex.is_match(email) {
        return Err(invalid("Invalid email address format"));
    }

    Ok(())
}

/// Validates a six digit Indian postal code.
pub fn validate_pincode(pincode: &str) -> CustomResult<(), ValidationError> {
    let pincode = pincode.trim();
    if pincode.len() != 6
        || !pincode.chars().all(|c| c.is_ascii_digit())
        || pincode.starts_with('0')
    {
        return Err(invalid(format!("Invalid pincode: {pincode}")));
    }
    Ok(())
}

/// Fails with [`ValidationError::MissingRequiredField`] when `value` is absent or blank.
pub fn require_text<'a>(
    field_name: &str,
    value: Option<&'a str>,
) -> CustomResult<&'a str, ValidationError> {
    match value.map(str::trim) {
        Some(text) if !text.is_empty() => Ok(text),
        _ => Err(report!(ValidationError::MissingRequiredField {
            field_name: field_name.to_string(),
        })),
    }
}

/// Checks that `value` lies within `min..=max`.
pub fn validate_range(
    field_name: &str,
    value: Decimal,
    min: Option<Decimal>,
    max: Option<Decimal>,
) -> CustomResult<(), ValidationError> {
    if let Some(min) = min.filter(|min| value < *min) {
        return Err(invalid(format!("{field_name} must be at least {min}")));
    }
    if let Some(max) = max.filter(|max| value > *max) {
        return Err(invalid(format!("{field_name} must be at most {max}")));
    }
    Ok(())
}

/// Checks that `date` is not earlier than `earliest`.
pub fn validate_not_before(
    field_name: &str,
    date: Date,
    earliest: Date,
) -> CustomResult<(), ValidationError> {
    if date < earliest {
        return Err(invalid(format!(
            "{field_name} cannot be earlier than {earliest}"
        )));
    }
    Ok(())
}
