//! Process configuration.
//!
//! Every setting comes from the environment, read once at startup. A missing
//! engine configuration is fatal before the server binds its socket.

use std::net::SocketAddr;

use thiserror::Error;

/// Required engine configuration (a JSON document).
pub const ENV_ENGINE_CONFIG: &str = "SENZING_ENGINE_CONFIGURATION_JSON";
/// Worker thread count; 0 or unset selects the host parallelism.
pub const ENV_WORKER_THREADS: &str = "SENZING_THREADS_PER_PROCESS";
/// Listen address for the HTTP server.
pub const ENV_BIND: &str = "SZ_SEARCH_BIND";
/// Wrap successful responses in a `{request, response}` envelope.
pub const ENV_ECHO_REQUEST: &str = "SZ_SEARCH_ECHO_REQUEST";
/// Map engine failures through the status table; disabled means every failure
/// reports 500.
pub const ENV_ERROR_STATUS: &str = "SZ_SEARCH_ERROR_STATUS";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error(
        "the environment variable {ENV_ENGINE_CONFIG} must be set with a proper JSON configuration.\n\
         Please see https://senzing.zendesk.com/hc/en-us/articles/360038774134-G2Module-Configuration-and-the-Senzing-API"
    )]
    MissingEngineConfig,
    #[error("invalid value for {name}: {value:?} ({reason})")]
    InvalidValue {
        name: &'static str,
        value: String,
        reason: String,
    },
}

/// Settings assembled from the process environment at startup.
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    pub engine_config_json: String,
    pub worker_threads: usize,
    pub bind: SocketAddr,
    pub echo_request: bool,
    pub map_error_status: bool,
}

impl ServiceConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Builds the configuration from an arbitrary variable source.
    pub fn from_lookup(get: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let engine_config_json = match get(ENV_ENGINE_CONFIG) {
            Some(value) if !value.trim().is_empty() => value,
            _ => return Err(ConfigError::MissingEngineConfig),
        };

        let worker_threads = match trimmed(get(ENV_WORKER_THREADS)) {
            Some(raw) => raw.parse().map_err(|err| ConfigError::InvalidValue {
                name: ENV_WORKER_THREADS,
                value: raw.clone(),
                reason: format!("{err}"),
            })?,
            None => 0,
        };

        let bind = match trimmed(get(ENV_BIND)) {
            Some(raw) => raw.parse().map_err(|err| ConfigError::InvalidValue {
                name: ENV_BIND,
                value: raw.clone(),
                reason: format!("{err}"),
            })?,
            None => SocketAddr::from(([0, 0, 0, 0], 5000)),
        };

        let echo_request = parse_bool(ENV_ECHO_REQUEST, get(ENV_ECHO_REQUEST), false)?;
        let map_error_status = parse_bool(ENV_ERROR_STATUS, get(ENV_ERROR_STATUS), true)?;

        Ok(Self {
            engine_config_json,
            worker_threads,
            bind,
            echo_request,
            map_error_status,
        })
    }
}

fn trimmed(value: Option<String>) -> Option<String> {
    let value = value?;
    let value = value.trim();
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

fn parse_bool(
    name: &'static str,
    value: Option<String>,
    default: bool,
) -> Result<bool, ConfigError> {
    let Some(raw) = trimmed(value) else {
        return Ok(default);
    };
    match raw.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" => Ok(true),
        "0" | "false" | "no" => Ok(false),
        _ => Err(ConfigError::InvalidValue {
            name,
            value: raw,
            reason: "expected a boolean".to_string(),
        }),
    }
}
