use std::{collections::HashMap, env};
use thiserror::Error;

type EnvHashMap = HashMap<String, String>;

const DEFAULT_HOST: &str = "127.0.0.1";
const DEFAULT_PORT: u16 = 8899;
const DEFAULT_DATABASE: &str = "airline_system.db";
const DEFAULT_LOGS: &str = ".";

#[derive(Debug, Error)]
enum EnvError {
    #[error("invalid env: '{0}'")]
    Invalid(String),
}

#[derive(Debug, Clone)]
pub struct AppEnv {
    pub api_host: String,
    pub api_port: u16,
    pub location_database: String,
    pub location_logs: String,
    pub log_level: tracing::Level,
}

impl AppEnv {
    /// Parse "true" or "false" to bool, else false
    fn parse_boolean(key: &str, map: &EnvHashMap) -> bool {
        map.get(key).is_some_and(|value| value == "true")
    }

    /// Parse debug and/or trace into tracing level
    fn parse_log(map: &EnvHashMap) -> tracing::Level {
        if Self::parse_boolean("LOG_TRACE", map) {
            tracing::Level::TRACE
        } else if Self::parse_boolean("LOG_DEBUG", map) {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        }
    }

    /// Parse string to u16, use default if missing, error if present but not a u16
    fn parse_number(key: &str, default: u16, map: &EnvHashMap) -> Result<u16, EnvError> {
        map.get(key).map_or(Ok(default), |data| {
            data.parse::<u16>()
                .map_err(|_| EnvError::Invalid(key.into()))
        })
    }

    /// Empty strings are treated as missing
    fn parse_string(key: &str, default: &str, map: &EnvHashMap) -> String {
        map.get(key)
            .filter(|value| !value.trim().is_empty())
            .map_or_else(|| default.into(), |value| value.into())
    }

    /// Load, and parse .env file, return AppEnv
    fn generate() -> Result<Self, EnvError> {
        let env_map = env::vars()
            .map(|i| (i.0, i.1))
            .collect::<HashMap<String, String>>();

        Ok(Self {
            api_host: Self::parse_string("API_HOST", DEFAULT_HOST, &env_map),
            api_port: Self::parse_number("API_PORT", DEFAULT_PORT, &env_map)?,
            location_database: Self::parse_string(
                "LOCATION_DATABASE",
                DEFAULT_DATABASE,
                &env_map,
            ),
            location_logs: Self::parse_string("LOCATION_LOGS", DEFAULT_LOGS, &env_map),
            log_level: Self::parse_log(&env_map),
        })
    }

    /// An env file is optional, every key has a default
    pub fn get_env() -> Self {
        let local_env = ".env";
        let app_env = "/app_env/.api.env";

        if std::fs::metadata(app_env).is_ok() {
            dotenvy::from_path(app_env).ok();
        } else if std::fs::metadata(local_env).is_ok() {
            dotenvy::from_path(local_env).ok();
        }

        match Self::generate() {
            Ok(s) => s,
            Err(e) => {
                println!("\n\x1b[31m{e}\x1b[0m\n");
                std::process::exit(1);
            }
        }
    }
}
