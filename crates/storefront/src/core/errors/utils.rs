use router_env::logger;

use crate::core::errors::{self, CustomResult, StorefrontResult};

pub trait ApiClientErrorExt {
    fn to_storefront_error(self) -> error_stack::Report<errors::StorefrontError>;
}

impl ApiClientErrorExt for error_stack::Report<errors::ApiClientError> {
    fn to_storefront_error(self) -> error_stack::Report<errors::StorefrontError> {
        let context = self.current_context().clone();
        logger::error!(error = ?self, "Request to the storefront backend failed");
        if context.is_network_failure() {
            self.change_context(errors::StorefrontError::Network {
                message: context.to_string(),
            })
        } else {
            self.change_context(errors::StorefrontError::Configuration(
                context.to_string(),
            ))
        }
    }
}

pub trait ValidationErrorExt<T> {
    /// Turns a rejected form field into [`errors::StorefrontError::Validation`], keeping the
    /// field's message for the customer.
    fn to_validation_failed(self) -> StorefrontResult<T>;
}

impl<T> ValidationErrorExt<T> for CustomResult<T, errors::ValidationError> {
    fn to_validation_failed(self) -> StorefrontResult<T> {
        self.map_err(|report| {
            let message = match report.current_context() {
                errors::ValidationError::MissingRequiredField { field_name } => {
                    format!("{} is required", humanize(field_name))
                }
                errors::ValidationError::InvalidValue { message } => message.clone(),
            };
            logger::warn!(%message, "Form validation failed");
            report.change_context(errors::StorefrontError::Validation { message })
        })
    }
}

impl<T> ValidationErrorExt<T> for CustomResult<T, errors::ParsingError> {
    fn to_validation_failed(self) -> StorefrontResult<T> {
        self.map_err(|report| {
            let message = match report.current_context() {
                errors::ParsingError::EmailParsingError => "Please enter a valid email address",
                errors::ParsingError::PhoneNumberParsingError => {
                    "Please enter a valid 10 digit mobile number"
                }
                errors::ParsingError::AmountParsingError => "Please enter a valid amount",
                errors::ParsingError::StructParseFailure(_)
                | errors::ParsingError::EncodeError(_) => "Please check the entered values",
            }
            .to_string();
            logger::warn!(%message, error = ?report, "Form value could not be parsed");
            report.change_context(errors::StorefrontError::Validation { message })
        })
    }
}

/// `line1` -> `Line1`, `monthly_amount` -> `Monthly amount`
fn humanize(field_name: &str) -> String {
    let spaced = field_name.replace('_', " ");
    let mut chars = spaced.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => spaced,
    }
}
