use std::collections::HashMap;
use std::path::PathBuf;
use std::time::Duration;

use crm_core_postgres::ServiceConfig;
use thiserror::Error;
use uuid::Uuid;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
const DEFAULT_MAX_CONNECTIONS: u32 = 10;
const DEFAULT_UPLOAD_DIR: &str = "uploads";
const DEFAULT_TX_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("{name} has an invalid value '{value}': {reason}")]
    Invalid {
        name: &'static str,
        value: String,
        reason: String,
    },
}

/// Server settings, read from the environment.
///
/// | variable | default |
/// |---|---|
/// | `DATABASE_URL` | required |
/// | `CRM_BIND_ADDR` | `0.0.0.0:8080` |
/// | `CRM_MAX_CONNECTIONS` | `10` |
/// | `CRM_UPLOAD_DIR` | `uploads` |
/// | `CRM_TX_TIMEOUT_SECS` | `30` |
/// | `CRM_API_TOKENS` | empty, `token=user-uuid,...` |
/// | `CRM_INIT_DB` | `false` |
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub database_url: String,
    pub bind_addr: String,
    pub max_connections: u32,
    pub upload_dir: PathBuf,
    pub tx_timeout: Duration,
    pub api_tokens: HashMap<String, Uuid>,
    pub init_db: bool,
}

impl ServerConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let var = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let database_url = var("DATABASE_URL").ok_or(ConfigError::Missing("DATABASE_URL"))?;
        let max_connections = match var("CRM_MAX_CONNECTIONS") {
            Some(raw) => parse_number("CRM_MAX_CONNECTIONS", &raw)?,
            None => DEFAULT_MAX_CONNECTIONS,
        };
        let tx_timeout_secs = match var("CRM_TX_TIMEOUT_SECS") {
            Some(raw) => parse_number("CRM_TX_TIMEOUT_SECS", &raw)?,
            None => DEFAULT_TX_TIMEOUT_SECS,
        };
        let api_tokens = match var("CRM_API_TOKENS") {
            Some(raw) => parse_api_tokens(&raw)?,
            None => HashMap::new(),
        };
        let init_db = match var("CRM_INIT_DB") {
            Some(raw) => parse_flag("CRM_INIT_DB", &raw)?,
            None => false,
        };

        Ok(Self {
            database_url,
            bind_addr: var("CRM_BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string()),
            max_connections,
            upload_dir: var("CRM_UPLOAD_DIR")
                .unwrap_or_else(|| DEFAULT_UPLOAD_DIR.to_string())
                .into(),
            tx_timeout: Duration::from_secs(tx_timeout_secs),
            api_tokens,
            init_db,
        })
    }

    pub fn service_config(&self) -> ServiceConfig {
        ServiceConfig {
            tx_timeout: self.tx_timeout,
        }
    }
}

fn parse_number<T>(name: &'static str, raw: &str) -> Result<T, ConfigError>
where
    T: std::str::FromStr + PartialOrd + Default,
    T::Err: std::fmt::Display,
{
    let value: T = raw.trim().parse().map_err(|e: T::Err| ConfigError::Invalid {
        name,
        value: raw.to_string(),
        reason: e.to_string(),
    })?;
    if value <= T::default() {
        return Err(ConfigError::Invalid {
            name,
            value: raw.to_string(),
            reason: "must be greater than zero".to_string(),
        });
    }
    Ok(value)
}

fn parse_flag(name: &'static str, raw: &str) -> Result<bool, ConfigError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" => Ok(true),
        "0" | "false" | "no" => Ok(false),
        _ => Err(ConfigError::Invalid {
            name,
            value: raw.to_string(),
            reason: "expected true or false".to_string(),
        }),
    }
}

/// Parses `token=user-uuid` pairs separated by commas.
pub fn parse_api_tokens(raw: &str) -> Result<HashMap<String, Uuid>, ConfigError> {
    let invalid = |reason: &str| ConfigError::Invalid {
        name: "CRM_API_TOKENS",
        value: "<redacted>".to_string(),
        reason: reason.to_string(),
    };

    let mut tokens = HashMap::new();
    for pair in raw.split(',').map(str::trim).filter(|p| !p.is_empty()) {
        let (token, user) = pair
            .split_once('=')
            .ok_or_else(|| invalid("expected token=user-uuid"))?;
        let token = token.trim();
        if token.is_empty() {
            return Err(invalid("empty token"));
        }
        let user = Uuid::parse_str(user.trim()).map_err(|_| invalid("user is not a uuid"))?;
        tokens.insert(token.to_string(), user);
    }
    Ok(tokens)
}

#[cfg(test)]
mod tests {
    use super::*;

    const USER: &str = "0190f3a4-7b2c-7d4e-8f00-000000000001";

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| vars.get(name).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = ServerConfig::from_lookup(lookup(&[("DATABASE_URL", "postgres://db")])).unwrap();
        assert_eq!(config.bind_addr, "0.0.0.0:8080");
        assert_eq!(config.max_connections, 10);
        assert_eq!(config.upload_dir, PathBuf::from("uploads"));
        assert_eq!(config.tx_timeout, Duration::from_secs(30));
        assert!(config.api_tokens.is_empty());
        assert!(!config.init_db);
    }

    #[test]
    fn test_database_url_is_required() {
        let err = ServerConfig::from_lookup(lookup(&[])).unwrap_err();
        assert_eq!(err, ConfigError::Missing("DATABASE_URL"));
    }

    #[test]
    fn test_overrides() {
        let tokens = format!("alpha={USER}, beta = {USER}");
        let config = ServerConfig::from_lookup(lookup(&[
            ("DATABASE_URL", "postgres://db"),
            ("CRM_MAX_CONNECTIONS", "3"),
            ("CRM_TX_TIMEOUT_SECS", "5"),
            ("CRM_API_TOKENS", tokens.as_str()),
            ("CRM_INIT_DB", "TRUE"),
        ]))
        .unwrap();
        assert_eq!(config.max_connections, 3);
        assert_eq!(config.service_config().tx_timeout, Duration::from_secs(5));
        assert_eq!(config.api_tokens.len(), 2);
        assert_eq!(config.api_tokens["beta"].to_string(), USER);
        assert!(config.init_db);
    }

    #[test]
    fn test_invalid_values() {
        for (name, value) in [
            ("CRM_MAX_CONNECTIONS", "0"),
            ("CRM_TX_TIMEOUT_SECS", "soon"),
            ("CRM_INIT_DB", "maybe"),
            ("CRM_API_TOKENS", "alpha"),
        ] {
            let result = ServerConfig::from_lookup(lookup(&[("DATABASE_URL", "postgres://db"), (name, value)]));
            assert!(matches!(result, Err(ConfigError::Invalid { .. })), "{name}={value}");
        }
    }

    #[test]
    fn test_token_values_are_not_echoed() {
        let err = parse_api_tokens("secret=not-a-uuid").unwrap_err();
        assert!(!err.to_string().contains("secret"));
    }
}
