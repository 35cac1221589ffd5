use std::env;
use std::fmt;

/// Environment-backed settings for the CLI.
#[derive(Debug, Clone)]
pub(crate) struct AppConfig {
    pub(crate) log_level: String,
    /// Default recommendation cap when a command passes no `--limit`.
    pub(crate) default_limit: Option<usize>,
}

impl AppConfig {
    pub(crate) fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let log_level = env::var("STOREPULSE_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        let default_limit = match env::var("STOREPULSE_LIMIT") {
            Ok(raw) => Some(raw.parse::<usize>().map_err(|_| ConfigError::InvalidLimit {
                value: raw.clone(),
            })?),
            Err(_) => None,
        };

        Ok(Self {
            log_level,
            default_limit,
        })
    }
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidLimit { value: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidLimit { value } => {
                write!(f, "STOREPULSE_LIMIT must be a non-negative integer, found '{value}'")
            }
        }
    }
}

impl std::error::Error for ConfigError {}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::sync::{Mutex, OnceLock};

    fn env_guard() -> &'static Mutex<()> {
        static GUARD: OnceLock<Mutex<()>> = OnceLock::new();
        GUARD.get_or_init(|| Mutex::new(()))
    }

    fn reset_env() {
        env::remove_var("STOREPULSE_LOG_LEVEL");
        env::remove_var("STOREPULSE_LIMIT");
    }

    #[test]
    fn load_uses_defaults_when_env_missing() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        let config = AppConfig::load().expect("config loads with defaults");
        assert_eq!(config.log_level, "info");
        assert_eq!(config.default_limit, None);
    }

    #[test]
    fn load_reads_limit_from_env() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("STOREPULSE_LIMIT", "5");
        let config = AppConfig::load().expect("config loads");
        assert_eq!(config.default_limit, Some(5));
        reset_env();
    }

    #[test]
    fn load_rejects_a_garbage_limit() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("STOREPULSE_LIMIT", "lots");
        assert!(matches!(
            AppConfig::load(),
            Err(ConfigError::InvalidLimit { .. })
        ));
        reset_env();
    }
}
