use std::env;
use std::str::FromStr;
use std::time::Duration;

use crate::error::AppError;

/// Runtime settings for the backend, read once at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    /// Presentation delay stored in each pending pair's `resolve_after`.
    pub resolve_delay: Duration,
    /// Planner thinking time before its first flip.
    pub ai_first_flip_delay: Duration,
    /// Planner thinking time before its second flip.
    pub ai_second_flip_delay: Duration,
    /// Whether the server resolves pending pairs itself once they are due.
    pub auto_resolve: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3001,
            resolve_delay: Duration::from_millis(1000),
            ai_first_flip_delay: Duration::from_millis(560),
            ai_second_flip_delay: Duration::from_millis(520),
            auto_resolve: true,
        }
    }
}

impl AppConfig {
    /// Build from process environment, falling back to defaults.
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from an arbitrary key lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, AppError> {
        let defaults = Self::default();
        Ok(Self {
            host: lookup("BACKEND_HOST").unwrap_or(defaults.host),
            port: parse_or(&lookup, "BACKEND_PORT", defaults.port)?,
            resolve_delay: millis_or(&lookup, "BACKEND_RESOLVE_DELAY_MS", defaults.resolve_delay)?,
            ai_first_flip_delay: millis_or(
                &lookup,
                "BACKEND_AI_FIRST_FLIP_MS",
                defaults.ai_first_flip_delay,
            )?,
            ai_second_flip_delay: millis_or(
                &lookup,
                "BACKEND_AI_SECOND_FLIP_MS",
                defaults.ai_second_flip_delay,
            )?,
            auto_resolve: parse_or(&lookup, "BACKEND_AUTO_RESOLVE", defaults.auto_resolve)?,
        })
    }

    /// Zero delays and manual resolution, for deterministic tests.
    pub fn for_tests() -> Self {
        Self {
            resolve_delay: Duration::ZERO,
            ai_first_flip_delay: Duration::ZERO,
            ai_second_flip_delay: Duration::ZERO,
            auto_resolve: false,
            ..Self::default()
        }
    }

    pub fn bind_addr(&self) -> (String, u16) {
        (self.host.clone(), self.port)
    }
}

fn parse_or<T: FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
    default: T,
) -> Result<T, AppError>
where
    T::Err: std::fmt::Display,
{
    match lookup(key) {
        None => Ok(default),
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|e| AppError::config(format!("{key}={raw:?} is invalid: {e}"))),
    }
}

fn millis_or(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
    default: Duration,
) -> Result<Duration, AppError> {
    let ms: u64 = parse_or(lookup, key, default.as_millis() as u64)?;
    Ok(Duration::from_millis(ms))
}
