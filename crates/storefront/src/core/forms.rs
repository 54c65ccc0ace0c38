//! Client side validation of the storefront's forms.
//!
//! Each validator turns a form as typed by the customer into the request body the backend
//! expects. A missing or malformed field fails with [`StorefrontError::Validation`] and the
//! form is never submitted.

use std::str::FromStr;

use api_models::{
    admin::{BannerRequest, CouponRequest},
    custom_orders::{CustomOrderForm, CustomOrderRequest},
    enums::{DiscountType, PaymentMethod},
    orders::{CheckoutForm, PlaceOrderRequest, ShippingAddress},
    user::{SigninRequest, SignupForm, SignupRequest},
};
use common_utils::{
    custom_serde,
    fp_utils::when,
    pii,
    types::MajorUnit,
    validation::{self, require_text},
};
use error_stack::report;
use masking::{PeekInterface, Secret};
use rust_decimal::Decimal;
use time::Date;

use crate::core::errors::{StorefrontError, StorefrontResult, ValidationErrorExt};

const PASSWORD_MIN_LENGTH: usize = 6;

fn invalid(message: impl Into<String>) -> error_stack::Report<StorefrontError> {
    report!(StorefrontError::Validation {
        message: message.into()
    })
}

fn optional_text(value: Option<&String>) -> Option<String> {
    value
        .map(|text| text.trim())
        .filter(|text| !text.is_empty())
        .map(str::to_string)
}

fn required_secret<'a>(
    field_name: &str,
    value: Option<&'a Secret<String>>,
) -> StorefrontResult<&'a str> {
    require_text(field_name, value.map(|secret| secret.peek().as_str())).to_validation_failed()
}

fn phone_number(mobile: &str) -> StorefrontResult<pii::PhoneNumber> {
    pii::PhoneNumber::try_from(mobile.to_string()).to_validation_failed()
}

/// `identifier` is an email address when it contains `@`, a mobile number otherwise
pub fn validate_signin(
    identifier: Option<&str>,
    password: Option<&Secret<String>>,
) -> StorefrontResult<SigninRequest> {
    let identifier = require_text("email_or_mobile", identifier).to_validation_failed()?;
    let password = required_secret("password", password)?;

    let (email, mobile) = if identifier.contains('@') {
        (
            Some(pii::Email::try_from(identifier.to_string()).to_validation_failed()?),
            None,
        )
    } else {
        (None, Some(phone_number(identifier)?))
    };

    Ok(SigninRequest {
        email,
        mobile,
        password: Secret::new(password.to_string()),
    })
}

pub fn validate_signup(form: &SignupForm) -> StorefrontResult<SignupRequest> {
    let name = require_text("name", form.name.as_deref()).to_validation_failed()?;
    let email = require_text("email", form.email.as_deref()).to_validation_failed()?;
    let mobile = require_text("mobile", form.mobile.as_deref()).to_validation_failed()?;
    let password = required_secret("password", form.password.as_ref())?;
    let confirm_password = required_secret("confirm_password", form.confirm_password.as_ref())?;

    when(password.chars().count() < PASSWORD_MIN_LENGTH, || {
        Err(invalid(format!(
            "Password must be at least {PASSWORD_MIN_LENGTH} characters"
        )))
    })?;
    when(password != confirm_password, || {
        Err(invalid("Passwords do not match"))
    })?;

    Ok(SignupRequest {
        name: name.to_string(),
        email: pii::Email::try_from(email.to_string()).to_validation_failed()?,
        mobile: phone_number(mobile)?,
        password: Secret::new(password.to_string()),
    })
}

pub fn validate_checkout(form: &CheckoutForm) -> StorefrontResult<PlaceOrderRequest> {
    let name = require_text("name", form.name.as_deref()).to_validation_failed()?;
    let mobile = require_text("mobile", form.mobile.as_deref()).to_validation_failed()?;
    let line1 = require_text("address", form.line1.as_deref()).to_validation_failed()?;
    let city = require_text("city", form.city.as_deref()).to_validation_failed()?;
    let state = require_text("state", form.state.as_deref()).to_validation_failed()?;
    let pincode = require_text("pincode", form.pincode.as_deref()).to_validation_failed()?;
    let payment_method =
        require_text("payment_method", form.payment_method.as_deref()).to_validation_failed()?;

    validation::validate_pincode(pincode).to_validation_failed()?;
    let payment_method = PaymentMethod::from_str(payment_method)
        .map_err(|_| invalid("Please choose a valid payment method"))?;

    Ok(PlaceOrderRequest {
        shipping_address: ShippingAddress {
            name: name.to_string(),
            mobile: phone_number(mobile)?,
            line1: line1.to_string(),
            line2: optional_text(form.line2.as_ref()),
            city: city.to_string(),
            state: state.to_string(),
            pincode: pincode.to_string(),
        },
        payment_method,
        coupon_code: optional_text(form.coupon_code.as_ref()),
    })
}

/// `today` bounds the expected date; it cannot lie in the past
pub fn validate_custom_order(
    form: &CustomOrderForm,
    today: Date,
) -> StorefrontResult<CustomOrderRequest> {
    let name = require_text("name", form.name.as_deref()).to_validation_failed()?;
    let mobile = require_text("mobile", form.mobile.as_deref()).to_validation_failed()?;
    let jewelry_type =
        require_text("jewelry_type", form.jewelry_type.as_deref()).to_validation_failed()?;
    let description =
        require_text("description", form.description.as_deref()).to_validation_failed()?;

    let email = optional_text(form.email.as_ref())
        .map(|email| pii::Email::try_from(email).to_validation_failed())
        .transpose()?;

    let budget = optional_text(form.budget.as_ref())
        .map(|budget| MajorUnit::from_user_input(&budget).to_validation_failed())
        .transpose()?;
    if let Some(budget) = budget {
        validation::validate_range("Budget", budget.get_amount_as_decimal(), Some(Decimal::ONE), None)
            .to_validation_failed()?;
    }

    let expected_date = optional_text(form.expected_date.as_ref())
        .map(|text| {
            custom_serde::date::parse(&text).map_err(|_| invalid("Please enter a valid expected date"))
        })
        .transpose()?;
    if let Some(expected_date) = expected_date {
        validation::validate_not_before("Expected date", expected_date, today)
            .to_validation_failed()?;
    }

    Ok(CustomOrderRequest {
        name: name.to_string(),
        mobile: phone_number(mobile)?,
        email,
        jewelry_type: jewelry_type.to_string(),
        description: description.to_string(),
        budget,
        expected_date,
        reference_images: form
            .reference_images
            .iter()
            .filter_map(|image| optional_text(Some(image)))
            .collect(),
    })
}

pub fn validate_coupon(coupon: &CouponRequest) -> StorefrontResult<()> {
    require_text("code", Some(coupon.code.as_str())).to_validation_failed()?;

    let value = coupon.discount_value.get_amount_as_decimal();
    when(!coupon.discount_value.is_positive(), || {
        Err(invalid("Discount value must be greater than zero"))
    })?;
    if coupon.discount_type == DiscountType::Percentage {
        validation::validate_range("Discount percentage", value, None, Some(Decimal::ONE_HUNDRED))
            .to_validation_failed()?;
    }
    if let Some(min_order_amount) = coupon.min_order_amount {
        validation::validate_range(
            "Minimum order amount",
            min_order_amount.get_amount_as_decimal(),
            Some(Decimal::ZERO),
            None,
        )
        .to_validation_failed()?;
    }
    if let (Some(valid_from), Some(valid_until)) = (coupon.valid_from, coupon.valid_until) {
        validation::validate_not_before("Valid until", valid_until, valid_from)
            .to_validation_failed()?;
    }
    Ok(())
}

pub fn validate_banner(banner: &BannerRequest) -> StorefrontResult<()> {
    require_text("title", Some(banner.title.as_str())).to_validation_failed()?;
    let image_url = require_text("image_url", Some(banner.image_url.as_str())).to_validation_failed()?;
    when(url::Url::parse(image_url).is_err(), || {
        Err(invalid("Please enter a valid image URL"))
    })
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use masking::ExposeInterface;
    use time::macros::date;

    use super::*;

    fn message(error: &error_stack::Report<StorefrontError>) -> String {
        match error.current_context() {
            StorefrontError::Validation { message } => message.clone(),
            other => format!("unexpected error: {other:?}"),
        }
    }

    fn checkout_form() -> CheckoutForm {
        CheckoutForm {
            name: Some("Meera Iyer".to_string()),
            mobile: Some("+91 98765 43210".to_string()),
            line1: Some("12 Temple Street".to_string()),
            line2: None,
            city: Some("Madurai".to_string()),
            state: Some("Tamil Nadu".to_string()),
            pincode: Some("625001".to_string()),
            payment_method: Some("COD".to_string()),
            coupon_code: Some("  ".to_string()),
        }
    }

    #[test]
    fn signin_accepts_email_or_mobile() {
        let password = Secret::new("hunter22".to_string());
        let by_email = validate_signin(Some("meera@example.com"), Some(&password)).unwrap();
        assert!(by_email.email.is_some() && by_email.mobile.is_none());

        let by_mobile = validate_signin(Some("098765 43210"), Some(&password)).unwrap();
        assert_eq!(by_mobile.mobile.unwrap().peek(), "9876543210");

        let error = validate_signin(Some(" "), Some(&password)).unwrap_err();
        assert_eq!(message(&error), "Email or mobile is required");
        let error = validate_signin(Some("meera@example.com"), None).unwrap_err();
        assert_eq!(message(&error), "Password is required");
    }

    #[test]
    fn signup_requires_every_field_and_matching_passwords() {
        let form = SignupForm {
            name: Some("Meera".to_string()),
            email: Some("meera@example.com".to_string()),
            mobile: Some("9876543210".to_string()),
            password: Some(Secret::new("secret123".to_string())),
            confirm_password: Some(Secret::new("secret123".to_string())),
        };
        let request = validate_signup(&form).unwrap();
        assert_eq!(request.password.expose(), "secret123");

        let error = validate_signup(&SignupForm {
            mobile: None,
            ..form.clone()
        })
        .unwrap_err();
        assert_eq!(message(&error), "Mobile is required");

        let error = validate_signup(&SignupForm {
            confirm_password: Some(Secret::new("secret124".to_string())),
            ..form.clone()
        })
        .unwrap_err();
        assert_eq!(message(&error), "Passwords do not match");

        let error = validate_signup(&SignupForm {
            email: Some("meera.example.com".to_string()),
            ..form
        })
        .unwrap_err();
        assert_eq!(message(&error), "Please enter a valid email address");
    }

    #[test]
    fn checkout_form_is_blocked_on_any_missing_field() {
        let request = validate_checkout(&checkout_form()).unwrap();
        assert_eq!(request.payment_method, PaymentMethod::Cod);
        assert_eq!(request.coupon_code, None);
        assert_eq!(request.shipping_address.mobile.peek(), "9876543210");

        let blank_city = CheckoutForm {
            city: Some(String::new()),
            ..checkout_form()
        };
        assert_eq!(
            message(&validate_checkout(&blank_city).unwrap_err()),
            "City is required"
        );

        let bad_pincode = CheckoutForm {
            pincode: Some("62500".to_string()),
            ..checkout_form()
        };
        assert!(validate_checkout(&bad_pincode).is_err());

        let bad_mobile = CheckoutForm {
            mobile: Some("12345".to_string()),
            ..checkout_form()
        };
        assert_eq!(
            message(&validate_checkout(&bad_mobile).unwrap_err()),
            "Please enter a valid 10 digit mobile number"
        );
    }

    #[test]
    fn custom_order_dates_cannot_be_in_the_past() {
        let today = date!(2024 - 05 - 10);
        let form = CustomOrderForm {
            name: Some("Meera".to_string()),
            mobile: Some("9876543210".to_string()),
            jewelry_type: Some("Necklace".to_string()),
            description: Some("Temple design, 22K".to_string()),
            budget: Some("1,50,000".to_string()),
            expected_date: Some("2024-06-01".to_string()),
            ..CustomOrderForm::default()
        };
        let request = validate_custom_order(&form, today).unwrap();
        assert_eq!(request.budget, Some(MajorUnit::from(150_000_i64)));
        assert_eq!(request.expected_date, Some(date!(2024 - 06 - 01)));

        let past = CustomOrderForm {
            expected_date: Some("2024-05-09".to_string()),
            ..form.clone()
        };
        assert_eq!(
            message(&validate_custom_order(&past, today).unwrap_err()),
            "Expected date cannot be earlier than 2024-05-10"
        );

        let missing = CustomOrderForm {
            description: None,
            ..form
        };
        assert_eq!(
            message(&validate_custom_order(&missing, today).unwrap_err()),
            "Description is required"
        );
    }

    #[test]
    fn coupon_bounds() {
        let coupon = CouponRequest {
            code: "AKSHAYA10".to_string(),
            discount_type: DiscountType::Percentage,
            discount_value: MajorUnit::from(10_i64),
            min_order_amount: None,
            valid_from: Some(date!(2024 - 05 - 01)),
            valid_until: Some(date!(2024 - 05 - 12)),
            active: true,
        };
        assert!(validate_coupon(&coupon).is_ok());

        let too_generous = CouponRequest {
            discount_value: MajorUnit::from(120_i64),
            ..coupon.clone()
        };
        assert!(validate_coupon(&too_generous).is_err());

        let flat = CouponRequest {
            discount_type: DiscountType::Flat,
            ..too_generous
        };
        assert!(validate_coupon(&flat).is_ok());

        let reversed = CouponRequest {
            valid_from: Some(date!(2024 - 05 - 20)),
            ..coupon
        };
        assert!(validate_coupon(&reversed).is_err());
    }
}
