//! Configuration error types for the restcord client.
//!
//! All configuration constructors return `Result<T, ConfigError>` so that
//! invalid settings are rejected before any request is attempted.
//!
//! # Example
//!
//! ```rust
//! use restcord::{BotToken, ConfigError};
//!
//! let result = BotToken::new("");
//! assert!(matches!(result, Err(ConfigError::EmptyToken)));
//! ```

use thiserror::Error;

/// Errors that can occur while building a client configuration.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// The bot token cannot be empty.
    #[error("Bot token cannot be empty. Please provide the token from the Discord developer portal.")]
    EmptyToken,

    /// A URL setting could not be parsed.
    #[error("Invalid URL '{url}'. Please provide an absolute http(s) URL (e.g., 'https://discord.com/api').")]
    InvalidUrl {
        /// The invalid URL that was provided.
        url: String,
    },

    /// The retry policy is unusable.
    #[error("Invalid retry policy: {reason}")]
    InvalidRetryPolicy {
        /// Why the policy was rejected.
        reason: String,
    },

    /// A required field is missing.
    #[error("Missing required field: '{field}'. This field must be set before building the configuration.")]
    MissingRequiredField {
        /// The name of the missing field.
        field: &'static str,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_token_error_message() {
        let message = ConfigError::EmptyToken.to_string();
        assert!(message.contains("Bot token cannot be empty"));
    }

    #[test]
    fn test_invalid_url_error_includes_url() {
        let error = ConfigError::InvalidUrl {
            url: "not a url".to_string(),
        };
        assert!(error.to_string().contains("not a url"));
    }

    #[test]
    fn test_missing_required_field_error_message() {
        let error = ConfigError::MissingRequiredField { field: "token" };
        let message = error.to_string();
        assert!(message.contains("token"));
        assert!(message.contains("must be set"));
    }

    #[test]
    fn test_error_implements_std_error() {
        let error = ConfigError::EmptyToken;
        let _: &dyn std::error::Error = &error;
    }
}
