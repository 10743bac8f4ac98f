use once_cell::sync::Lazy;
use std::time::Duration;

/// Seconds the resend action stays disabled after a successful OTP request.
pub const RESEND_COOLDOWN_SECS: u32 = 30;

const DEFAULT_BASE_URL: &str = "http://localhost:8000";
const DEFAULT_TIMEOUT_SECS: u64 = 15;

pub static CONFIG: Lazy<Config> = Lazy::new(Config::from_env);

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Backend base address, without a trailing slash.
    pub base_url: String,
    pub request_timeout: Duration,
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let base_url = lookup("OTP_LOGIN_BASE_URL")
            .map(|v| v.trim().trim_end_matches('/').to_owned())
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_owned());

        let timeout_secs = match lookup("OTP_LOGIN_TIMEOUT_SECS") {
            Some(raw) => raw.trim().parse::<u64>().unwrap_or_else(|_| {
                log::warn!(
                    "Ignoring invalid OTP_LOGIN_TIMEOUT_SECS {:?}, using {}s",
                    raw,
                    DEFAULT_TIMEOUT_SECS
                );
                DEFAULT_TIMEOUT_SECS
            }),
            None => DEFAULT_TIMEOUT_SECS,
        };

        Self {
            base_url,
            request_timeout: Duration::from_secs(timeout_secs),
        }
    }
}
