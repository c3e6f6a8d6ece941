//! Business-layer configuration.

use thiserror::Error;

use clientbook_products::Currency;

/// Environment variable holding the currency used for empty product sums.
pub const DEFAULT_CURRENCY_ENV: &str = "CLIENTBOOK_DEFAULT_CURRENCY";

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid value for {key}: {reason}")]
    InvalidValue { key: &'static str, reason: String },
}

/// Settings for [`crate::ClientBusinessService`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BusinessConfig {
    /// Currency of the zero amount returned when a client holds no products.
    pub default_currency: Currency,
}

impl Default for BusinessConfig {
    fn default() -> Self {
        Self {
            default_currency: Currency::Euro,
        }
    }
}

impl BusinessConfig {
    /// Load from the process environment; unset variables keep their defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load from an arbitrary key lookup (the environment, a map in tests, ...).
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        match lookup(DEFAULT_CURRENCY_ENV) {
            Some(raw) if !raw.trim().is_empty() => {
                config.default_currency =
                    raw.parse().map_err(|e: clientbook_core::DomainError| {
                        ConfigError::InvalidValue {
                            key: DEFAULT_CURRENCY_ENV,
                            reason: e.to_string(),
                        }
                    })?;
            }
            _ => {
                tracing::debug!(
                    "{DEFAULT_CURRENCY_ENV} not set; using {}",
                    config.default_currency
                );
            }
        }

        Ok(config)
    }

    pub fn with_default_currency(mut self, currency: Currency) -> Self {
        self.default_currency = currency;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unset_variable_keeps_euro_default() {
        let config = BusinessConfig::from_lookup(|_| None).unwrap();
        assert_eq!(config, BusinessConfig::default());
        assert_eq!(config.default_currency, Currency::Euro);
    }

    #[test]
    fn reads_default_currency() {
        let config = BusinessConfig::from_lookup(|key| {
            (key == DEFAULT_CURRENCY_ENV).then(|| "usd".to_string())
        })
        .unwrap();
        assert_eq!(config.default_currency, Currency::UsDollar);
    }

    #[test]
    fn from_env_reads_process_environment() {
        // SAFETY: no other test in this crate touches this variable.
        unsafe { std::env::set_var(DEFAULT_CURRENCY_ENV, "inr") };
        let config = BusinessConfig::from_env();
        unsafe { std::env::remove_var(DEFAULT_CURRENCY_ENV) };

        assert_eq!(config.unwrap().default_currency, Currency::IndianRupee);
    }

    #[test]
    fn rejects_unknown_currency() {
        let err = BusinessConfig::from_lookup(|_| Some("XYZ".to_string())).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidValue { key: DEFAULT_CURRENCY_ENV, .. }
        ));
    }
}
