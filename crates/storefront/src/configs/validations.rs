use common_utils::{ext_traits::ConfigExt, fp_utils::when};

use crate::core::errors::ApplicationError;

impl super::settings::Backend {
    pub fn validate(&self) -> Result<(), ApplicationError> {
        when(self.base_url.is_default_or_empty(), || {
            Err(ApplicationError::InvalidConfigurationValueError(
                "backend base URL must not be empty".into(),
            ))
        })?;

        when(url::Url::parse(&self.base_url).is_err(), || {
            Err(ApplicationError::InvalidConfigurationValueError(format!(
                "backend base URL {:?} is not a valid URL",
                self.base_url
            )))
        })?;

        when(self.request_timeout_secs.is_default(), || {
            Err(ApplicationError::InvalidConfigurationValueError(
                "backend request timeout must be greater than zero".into(),
            ))
        })
    }
}

impl super::settings::SessionSettings {
    pub fn validate(&self) -> Result<(), ApplicationError> {
        when(self.token_store_path.as_os_str().is_empty(), || {
            Err(ApplicationError::InvalidConfigurationValueError(
                "session token store path must not be empty".into(),
            ))
        })
    }
}

impl super::settings::CheckoutSettings {
    pub fn validate(&self) -> Result<(), ApplicationError> {
        when(url::Url::parse(&self.return_url).is_err(), || {
            Err(ApplicationError::InvalidConfigurationValueError(format!(
                "checkout return URL {:?} is not a valid URL",
                self.return_url
            )))
        })?;

        when(
            self.hosted_page_url
                .as_deref()
                .is_some_and(|hosted_page_url| url::Url::parse(hosted_page_url).is_err()),
            || {
                Err(ApplicationError::InvalidConfigurationValueError(
                    "hosted checkout page URL is not a valid URL".into(),
                ))
            },
        )
    }
}

impl super::settings::VerificationSettings {
    pub fn validate(&self) -> Result<(), ApplicationError> {
        when(self.max_attempts.is_default(), || {
            Err(ApplicationError::InvalidConfigurationValueError(
                "verification max attempts must be at least 1".into(),
            ))
        })
    }
}

#[cfg(test)]
mod tests {
    use crate::configs::settings::{Backend, CheckoutSettings, Settings, VerificationSettings};

    #[test]
    fn defaults_are_valid() {
        assert!(Settings::default().validate().is_ok());
    }

    #[test]
    fn rejects_empty_base_url_and_zero_timeout() {
        let empty = Backend {
            base_url: "  ".to_string(),
            ..Backend::default()
        };
        assert!(empty.validate().is_err());

        let zero_timeout = Backend {
            request_timeout_secs: 0,
            ..Backend::default()
        };
        assert!(zero_timeout.validate().is_err());
    }

    #[test]
    fn rejects_zero_attempts_and_bad_return_url() {
        let verification = VerificationSettings {
            max_attempts: 0,
            ..VerificationSettings::default()
        };
        assert!(verification.validate().is_err());

        let checkout = CheckoutSettings {
            return_url: "not a url".to_string(),
            ..CheckoutSettings::default()
        };
        assert!(checkout.validate().is_err());
    }
}
