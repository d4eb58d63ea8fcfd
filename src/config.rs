use std::{env, path::PathBuf, time::Duration};

pub const DEFAULT_API_BASE: &str = "http://127.0.0.1:5000/api";
pub const DEFAULT_DATA_PATH: &str = "data/storage.json";

#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub data_path: PathBuf,
    pub api_base: String,
    pub remote_enabled: bool,
    pub api_timeout: Duration,
    pub classify_delay: Duration,
    pub mock_delay: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 8080,
            data_path: PathBuf::from(DEFAULT_DATA_PATH),
            api_base: DEFAULT_API_BASE.to_string(),
            remote_enabled: true,
            api_timeout: Duration::from_millis(10_000),
            classify_delay: Duration::from_millis(2_000),
            mock_delay: Duration::from_millis(2_000),
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let millis = |key: &str, fallback: Duration| {
            lookup(key)
                .and_then(|value| value.trim().parse::<u64>().ok())
                .map(Duration::from_millis)
                .unwrap_or(fallback)
        };

        Self {
            port: lookup("PORT")
                .and_then(|value| value.trim().parse::<u16>().ok())
                .unwrap_or(defaults.port),
            data_path: lookup("APP_DATA_PATH")
                .map(PathBuf::from)
                .unwrap_or(defaults.data_path),
            api_base: lookup("MOOD_API_BASE")
                .map(|value| value.trim().trim_end_matches('/').to_string())
                .filter(|value| !value.is_empty())
                .unwrap_or(defaults.api_base),
            remote_enabled: lookup("MOOD_REMOTE")
                .map(|value| {
                    !matches!(
                        value.trim().to_lowercase().as_str(),
                        "0" | "false" | "off" | "no"
                    )
                })
                .unwrap_or(defaults.remote_enabled),
            api_timeout: millis("MOOD_API_TIMEOUT_MS", defaults.api_timeout),
            classify_delay: millis("MOOD_CLASSIFY_DELAY_MS", defaults.classify_delay),
            mock_delay: millis("MOOD_MOCK_DELAY_MS", defaults.mock_delay),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_when_unset() {
        let config = Config::from_lookup(lookup(&[]));
        assert_eq!(config.port, 8080);
        assert_eq!(config.api_base, DEFAULT_API_BASE);
        assert_eq!(config.data_path, PathBuf::from(DEFAULT_DATA_PATH));
        assert!(config.remote_enabled);
        assert_eq!(config.classify_delay, Duration::from_secs(2));
    }

    #[test]
    fn overrides_and_bad_values() {
        let config = Config::from_lookup(lookup(&[
            ("PORT", "9000"),
            ("MOOD_API_BASE", "http://localhost:7000/api/"),
            ("MOOD_REMOTE", "off"),
            ("MOOD_CLASSIFY_DELAY_MS", "0"),
            ("MOOD_MOCK_DELAY_MS", "soon"),
        ]));
        assert_eq!(config.port, 9000);
        assert_eq!(config.api_base, "http://localhost:7000/api");
        assert!(!config.remote_enabled);
        assert_eq!(config.classify_delay, Duration::ZERO);
        assert_eq!(config.mock_delay, Duration::from_secs(2));
    }
}
