//! Environment configuration for the showroom services.
//!
//! Binds and cosmetic values fall back to defaults; credentials for the
//! managed store, the email provider, and the back-office login are hard
//! errors when missing so a misconfigured deployment fails at startup
//! instead of at the first request.

use tracing::{info, warn};

/// Result type for configuration loading
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("environment variable {0} is not set")]
    MissingVar(&'static str),
}

/// Connection details for the managed store.
#[derive(Debug, Clone)]
pub struct SupabaseConfig {
    /// Project base URL, e.g. `https://abc.supabase.co`.
    pub url: String,
    /// The publishable API key sent as `apikey` and bearer token.
    pub key: String,
}

impl SupabaseConfig {
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            url: required("SHOWROOM_SUPABASE_URL")?,
            key: required("SHOWROOM_SUPABASE_KEY")?,
        })
    }
}

/// Email provider credentials for the notification service.
#[derive(Debug, Clone)]
pub struct ResendConfig {
    pub api_key: String,
    /// Sender identity on outgoing mail.
    pub from: String,
}

impl ResendConfig {
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            api_key: required("SHOWROOM_RESEND_KEY")?,
            from: with_default(
                "SHOWROOM_EMAIL_FROM",
                "Auto Dealership <onboarding@resend.dev>",
            ),
        })
    }
}

/// Back-office login credentials.
#[derive(Debug, Clone)]
pub struct AdminConfig {
    pub username: String,
    pub password: String,
    /// Session lifetime in hours.
    pub session_hours: i64,
}

impl AdminConfig {
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            username: with_default("SHOWROOM_ADMIN_USER", "admin"),
            password: required("SHOWROOM_ADMIN_PASSWORD")?,
            session_hours: parse_with_default("SHOWROOM_SESSION_HOURS", 24),
        })
    }
}

/// Settings for the public site process.
#[derive(Debug, Clone)]
pub struct WebConfig {
    pub bind: String,
    /// Base URL of the notification service; confirmation emails are
    /// skipped when unset.
    pub notify_url: Option<String>,
}

impl WebConfig {
    pub fn from_env() -> Self {
        Self {
            bind: with_default("SHOWROOM_WEB_BIND", "127.0.0.1:8080"),
            notify_url: optional("SHOWROOM_NOTIFY_URL"),
        }
    }
}

/// Settings for the notification service process.
#[derive(Debug, Clone)]
pub struct NotifyConfig {
    pub bind: String,
}

impl NotifyConfig {
    pub fn from_env() -> Self {
        Self {
            bind: with_default("SHOWROOM_NOTIFY_BIND", "127.0.0.1:8090"),
        }
    }
}

fn optional(key: &'static str) -> Option<String> {
    std::env::var(key).ok().filter(|value| !value.is_empty())
}

fn required(key: &'static str) -> Result<String> {
    optional(key).ok_or(Error::MissingVar(key))
}

fn with_default(key: &'static str, default: &str) -> String {
    optional(key).unwrap_or_else(|| {
        info!("{key} not set, using default: {default}");
        default.to_string()
    })
}

fn parse_with_default(key: &'static str, default: i64) -> i64 {
    match optional(key) {
        Some(raw) => raw.parse().unwrap_or_else(|e| {
            warn!("invalid {key} value {raw:?}: {e}, using default {default}");
            default
        }),
        None => default,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_required_missing_is_an_error() {
        std::env::remove_var("SHOWROOM_TEST_REQUIRED");
        assert!(matches!(
            required("SHOWROOM_TEST_REQUIRED"),
            Err(Error::MissingVar("SHOWROOM_TEST_REQUIRED"))
        ));
    }

    #[test]
    fn test_empty_value_counts_as_missing() {
        std::env::set_var("SHOWROOM_TEST_EMPTY", "");
        assert!(optional("SHOWROOM_TEST_EMPTY").is_none());
        std::env::remove_var("SHOWROOM_TEST_EMPTY");
    }

    #[test]
    fn test_with_default_prefers_env() {
        std::env::set_var("SHOWROOM_TEST_BIND", "0.0.0.0:9999");
        assert_eq!(with_default("SHOWROOM_TEST_BIND", "127.0.0.1:8080"), "0.0.0.0:9999");
        std::env::remove_var("SHOWROOM_TEST_BIND");

        assert_eq!(with_default("SHOWROOM_TEST_BIND", "127.0.0.1:8080"), "127.0.0.1:8080");
    }

    #[test]
    fn test_parse_with_default_survives_garbage() {
        std::env::set_var("SHOWROOM_TEST_HOURS", "not-a-number");
        assert_eq!(parse_with_default("SHOWROOM_TEST_HOURS", 24), 24);
        std::env::set_var("SHOWROOM_TEST_HOURS", "8");
        assert_eq!(parse_with_default("SHOWROOM_TEST_HOURS", 24), 8);
        std::env::remove_var("SHOWROOM_TEST_HOURS");
    }
}
