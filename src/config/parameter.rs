use dotenv;
use std::collections::HashMap;
use std::sync::OnceLock;
use tracing::{info, warn};

static CONFIG: OnceLock<HashMap<String, String>> = OnceLock::new();

/// Default configuration values. Secrets deliberately have no default; see
/// `TokenService::from_parameters` for how their absence is handled.
const DEFAULTS: &[(&str, &str)] = &[
    ("SERVER_ADDRESS", "127.0.0.1"),
    ("SERVER_PORT", "8080"),
    ("ACCESS_TOKEN_TTL_MINUTES", "60"),
    ("REFRESH_TOKEN_TTL_DAYS", "7"),
    ("BCRYPT_COST", "12"),
    ("LOG_LEVEL", "info"),
];

pub fn init() {
    match dotenv::dotenv() {
        Ok(path) => info!("Loaded environment file: {:?}", path),
        Err(_) => warn!("No .env file found, using system environment variables"),
    }

    let mut config = HashMap::new();

    for (key, value) in DEFAULTS {
        config.insert(key.to_string(), value.to_string());
    }

    for (key, _) in DEFAULTS {
        if let Ok(value) = std::env::var(key) {
            config.insert(key.to_string(), value);
        }
    }

    if CONFIG.set(config).is_err() {
        tracing::debug!("Configuration already initialized, keeping existing values");
    } else {
        info!("Configuration initialized successfully");
    }
}

/// Looks up a parameter in the initialized map, falling back to the process
/// environment for keys that carry no default (DATABASE_URL, signing secrets).
pub fn get_optional(parameter: &str) -> Option<String> {
    CONFIG
        .get()
        .and_then(|config| config.get(parameter))
        .cloned()
        .or_else(|| std::env::var(parameter).ok())
}

pub fn get(parameter: &str) -> String {
    get_optional(parameter).unwrap_or_else(|| {
        tracing::error!("Configuration parameter '{}' not found", parameter);
        panic!("Required configuration parameter '{}' is missing", parameter);
    })
}

pub fn get_i64(parameter: &str) -> i64 {
    let value = get(parameter);
    value.parse::<i64>().unwrap_or_else(|_| {
        tracing::error!(
            "Configuration parameter '{}' is not a valid i64: {}",
            parameter,
            value
        );
        panic!("Configuration parameter '{}' is not a valid i64", parameter);
    })
}

pub fn get_u64(parameter: &str) -> u64 {
    let value = get(parameter);
    value.parse::<u64>().unwrap_or_else(|_| {
        tracing::error!(
            "Configuration parameter '{}' is not a valid u64: {}",
            parameter,
            value
        );
        panic!("Configuration parameter '{}' is not a valid u64", parameter);
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_applied() {
        init();
        assert_eq!(get("SERVER_PORT"), "8080");
        assert_eq!(get_i64("ACCESS_TOKEN_TTL_MINUTES"), 60);
        assert_eq!(get_i64("REFRESH_TOKEN_TTL_DAYS"), 7);
        assert_eq!(get_u64("BCRYPT_COST"), 12);
    }

    #[test]
    fn missing_parameter_is_none() {
        init();
        assert!(get_optional("NO_SUCH_PARAMETER_EXISTS").is_none());
    }
}
