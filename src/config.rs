use crate::domain::error::DomainError;
use crate::infrastructure::apmc::table::ColumnLayout;
use std::net::SocketAddr;
use std::str::FromStr;
use std::time::Duration;

pub const DEFAULT_RATES_URL: &str = "http://www.puneapmc.org/rates.aspx";
pub const DEFAULT_HISTORY_URL: &str = "http://www.puneapmc.org/history.aspx?id=Rates4315";

/// Which remote translator fills dictionary misses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TranslatorKind {
    Google,
    None,
}

impl FromStr for TranslatorKind {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "google" => Ok(TranslatorKind::Google),
            "none" | "noop" | "off" => Ok(TranslatorKind::None),
            _ => Err(format!("Unknown translator: {s}")),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Settings {
    pub db_path: String,
    pub bind_addr: SocketAddr,
    pub rates_url: String,
    pub history_url: String,
    pub layout: ColumnLayout,
    pub cache_hours: u32,
    pub http_timeout: Duration,
    pub translator: TranslatorKind,
    pub translate_url: Option<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            db_path: "./krushi.db".into(),
            bind_addr: SocketAddr::from(([0, 0, 0, 0], 3000)),
            rates_url: DEFAULT_RATES_URL.into(),
            history_url: DEFAULT_HISTORY_URL.into(),
            layout: ColumnLayout::SERIAL,
            cache_hours: 3,
            http_timeout: Duration::from_secs(15),
            translator: TranslatorKind::Google,
            translate_url: None,
        }
    }
}

impl Settings {
    /// Read settings from the process environment, after loading `.env` if present.
    pub fn from_env() -> Result<Self, DomainError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build settings from any key lookup; unset keys keep their defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, DomainError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Settings::default();
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        Ok(Self {
            db_path: get("KRUSHI_DB").unwrap_or(defaults.db_path),
            bind_addr: parse_or(get("KRUSHI_BIND"), "KRUSHI_BIND", defaults.bind_addr)?,
            rates_url: get("APMC_RATES_URL").unwrap_or(defaults.rates_url),
            history_url: get("APMC_HISTORY_URL").unwrap_or(defaults.history_url),
            layout: parse_or(get("APMC_COLUMN_LAYOUT"), "APMC_COLUMN_LAYOUT", defaults.layout)?,
            cache_hours: parse_or(get("KRUSHI_CACHE_HOURS"), "KRUSHI_CACHE_HOURS", defaults.cache_hours)?,
            http_timeout: Duration::from_secs(parse_or(
                get("KRUSHI_HTTP_TIMEOUT_SECS"),
                "KRUSHI_HTTP_TIMEOUT_SECS",
                defaults.http_timeout.as_secs(),
            )?),
            translator: parse_or(get("KRUSHI_TRANSLATOR"), "KRUSHI_TRANSLATOR", defaults.translator)?,
            translate_url: get("KRUSHI_TRANSLATE_URL"),
        })
    }
}

fn parse_or<T>(value: Option<String>, key: &str, default: T) -> Result<T, DomainError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match value {
        None => Ok(default),
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|e| DomainError::Config(format!("{key}={raw}: {e}"))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn settings(pairs: &[(&str, &str)]) -> Result<Settings, DomainError> {
        let env: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Settings::from_lookup(|key| env.get(key).cloned())
    }

    #[test]
    fn test_defaults_when_unset() {
        let s = settings(&[]).unwrap();
        assert_eq!(s.db_path, "./krushi.db");
        assert_eq!(s.bind_addr.port(), 3000);
        assert_eq!(s.rates_url, DEFAULT_RATES_URL);
        assert_eq!(s.layout, ColumnLayout::SERIAL);
        assert_eq!(s.cache_hours, 3);
        assert_eq!(s.http_timeout, Duration::from_secs(15));
        assert_eq!(s.translator, TranslatorKind::Google);
        assert!(s.translate_url.is_none());
    }

    #[test]
    fn test_overrides() {
        let s = settings(&[
            ("KRUSHI_BIND", "127.0.0.1:8080"),
            ("APMC_COLUMN_LAYOUT", "plain"),
            ("KRUSHI_CACHE_HOURS", "0"),
            ("KRUSHI_TRANSLATOR", "none"),
            ("KRUSHI_HTTP_TIMEOUT_SECS", "5"),
        ])
        .unwrap();
        assert_eq!(s.bind_addr.port(), 8080);
        assert_eq!(s.layout, ColumnLayout::PLAIN);
        assert_eq!(s.cache_hours, 0);
        assert_eq!(s.translator, TranslatorKind::None);
        assert_eq!(s.http_timeout, Duration::from_secs(5));
    }

    #[test]
    fn test_blank_value_keeps_default() {
        let s = settings(&[("KRUSHI_DB", "  ")]).unwrap();
        assert_eq!(s.db_path, "./krushi.db");
    }

    #[test]
    fn test_invalid_value_is_config_error() {
        let err = settings(&[("KRUSHI_CACHE_HOURS", "three")]).unwrap_err();
        assert!(matches!(err, DomainError::Config(_)));
        assert!(err.to_string().contains("KRUSHI_CACHE_HOURS"));
        assert!(settings(&[("APMC_COLUMN_LAYOUT", "wide")]).is_err());
    }
}
