use std::net::SocketAddr;
use std::path::PathBuf;

use crate::error::AppError;

/// Server configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Path to the JSON model artifact.
    pub model_path: PathBuf,
    /// Path to the JSON account map (category id -> name).
    pub account_map_path: PathBuf,
    pub host: String,
    pub port: u16,
}

impl Config {
    /// All variables are optional:
    /// - `MODEL_PATH` (default: "model.json")
    /// - `ACCOUNT_MAP_PATH` (default: "account_map.json")
    /// - `HOST` (default: "0.0.0.0")
    /// - `PORT` (default: 5000)
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(var: impl Fn(&str) -> Option<String>) -> Result<Self, AppError> {
        let model_path = var("MODEL_PATH").unwrap_or_else(|| "model.json".to_string());
        let account_map_path =
            var("ACCOUNT_MAP_PATH").unwrap_or_else(|| "account_map.json".to_string());
        let host = var("HOST").unwrap_or_else(|| "0.0.0.0".to_string());

        let port = match var("PORT") {
            Some(raw) => raw
                .trim()
                .parse::<u16>()
                .map_err(|e| AppError::Config(format!("invalid PORT {raw:?}: {e}")))?,
            None => 5000,
        };

        Ok(Self {
            model_path: PathBuf::from(model_path),
            account_map_path: PathBuf::from(account_map_path),
            host,
            port,
        })
    }

    pub fn bind_addr(&self) -> Result<SocketAddr, AppError> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .map_err(|e| AppError::Config(format!("invalid HOST {:?}: {e}", self.host)))
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn defaults() {
        let config = Config::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config.model_path, PathBuf::from("model.json"));
        assert_eq!(config.account_map_path, PathBuf::from("account_map.json"));
        assert_eq!(config.bind_addr().unwrap().to_string(), "0.0.0.0:5000");
    }

    #[test]
    fn overrides() {
        let config = Config::from_lookup(lookup(&[
            ("MODEL_PATH", "/srv/models/model.json"),
            ("ACCOUNT_MAP_PATH", "/srv/models/accounts.json"),
            ("HOST", "127.0.0.1"),
            ("PORT", "8080"),
        ]))
        .unwrap();
        assert_eq!(config.model_path, PathBuf::from("/srv/models/model.json"));
        assert_eq!(config.bind_addr().unwrap().to_string(), "127.0.0.1:8080");
    }

    #[test]
    fn invalid_port_is_config_error() {
        let err = Config::from_lookup(lookup(&[("PORT", "http")])).unwrap_err();
        assert!(matches!(err, AppError::Config(_)));
    }

    #[test]
    fn invalid_host_is_config_error() {
        let config = Config::from_lookup(lookup(&[("HOST", "not a host")])).unwrap();
        assert!(matches!(config.bind_addr(), Err(AppError::Config(_))));
    }
}
