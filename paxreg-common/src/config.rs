//! Configuration loading and resolution
//!
//! Settings resolve in priority order:
//! 1. Command-line argument (highest priority)
//! 2. Environment variable
//! 3. TOML config file
//! 4. Compiled default (fallback)

use crate::{Error, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Environment variable naming the config file
pub const CONFIG_ENV: &str = "PAXREG_CONFIG";
/// Environment variable overriding the database path
pub const DATABASE_ENV: &str = "PAXREG_DATABASE";
/// Environment variable overriding the bind address
pub const BIND_ENV: &str = "PAXREG_BIND";
/// Environment variable overriding the verification endpoint URL
pub const EXTERNAL_URL_ENV: &str = "PAXREG_EXTERNAL_URL";
/// Environment variable overriding the verification access token
pub const EXTERNAL_TOKEN_ENV: &str = "PAXREG_EXTERNAL_TOKEN";

const DEFAULT_BIND: &str = "127.0.0.1:5600";
const DEFAULT_DATABASE: &str = "paxreg.db";
const DEFAULT_EXTERNAL_URL: &str =
    "https://api.infosimples.com/api/v2/consultas/receita-federal/cpf";
const DEFAULT_EXTERNAL_TIMEOUT_SECS: u64 = 5;

/// Outbound verification endpoint settings
///
/// The access token is a pre-shared secret injected here; there is no
/// compiled-in default for it.
#[derive(Debug, Clone, Deserialize)]
pub struct ExternalApiConfig {
    #[serde(default = "default_external_url")]
    pub url: String,
    pub token: Option<String>,
    #[serde(default = "default_external_timeout")]
    pub timeout_secs: u64,
}

fn default_external_url() -> String {
    DEFAULT_EXTERNAL_URL.to_string()
}

fn default_external_timeout() -> u64 {
    DEFAULT_EXTERNAL_TIMEOUT_SECS
}

impl Default for ExternalApiConfig {
    fn default() -> Self {
        Self {
            url: default_external_url(),
            token: None,
            timeout_secs: default_external_timeout(),
        }
    }
}

/// TOML config file contents (`paxreg.toml`)
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TomlConfig {
    pub database: Option<String>,
    pub bind: Option<String>,
    #[serde(default)]
    pub external: ExternalApiConfig,
}

/// Resolved application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database: PathBuf,
    pub bind: String,
    pub external: ExternalApiConfig,
}

impl AppConfig {
    /// Resolve configuration from CLI arguments, environment, and TOML file
    pub fn resolve(
        cli_config: Option<&Path>,
        cli_database: Option<&str>,
        cli_bind: Option<&str>,
    ) -> Result<Self> {
        let toml_config = load_toml_config(cli_config)?;

        let database = cli_database
            .map(str::to_string)
            .or_else(|| std::env::var(DATABASE_ENV).ok())
            .or_else(|| toml_config.database.clone())
            .unwrap_or_else(|| DEFAULT_DATABASE.to_string());

        let bind = cli_bind
            .map(str::to_string)
            .or_else(|| std::env::var(BIND_ENV).ok())
            .or_else(|| toml_config.bind.clone())
            .unwrap_or_else(|| DEFAULT_BIND.to_string());

        let mut external = toml_config.external;
        if let Ok(url) = std::env::var(EXTERNAL_URL_ENV) {
            external.url = url;
        }
        if let Ok(token) = std::env::var(EXTERNAL_TOKEN_ENV) {
            external.token = Some(token);
        }

        Ok(Self {
            database: PathBuf::from(database),
            bind,
            external,
        })
    }
}

/// Load the TOML config file, if one exists
///
/// An explicitly named file (CLI or env) must exist and parse; the implicit
/// `./paxreg.toml` is optional.
fn load_toml_config(cli_config: Option<&Path>) -> Result<TomlConfig> {
    let explicit = cli_config
        .map(Path::to_path_buf)
        .or_else(|| std::env::var(CONFIG_ENV).ok().map(PathBuf::from));

    let (path, required) = match explicit {
        Some(path) => (path, true),
        None => (PathBuf::from("paxreg.toml"), false),
    };

    if !path.exists() {
        if required {
            return Err(Error::Config(format!(
                "Config file not found: {}",
                path.display()
            )));
        }
        return Ok(TomlConfig::default());
    }

    let content = std::fs::read_to_string(&path)
        .map_err(|e| Error::Config(format!("Failed to read {}: {}", path.display(), e)))?;
    toml::from_str(&content)
        .map_err(|e| Error::Config(format!("Failed to parse {}: {}", path.display(), e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_external_defaults() {
        let external = ExternalApiConfig::default();
        assert_eq!(external.timeout_secs, 5);
        assert!(external.token.is_none());
        assert!(external.url.contains("receita-federal"));
    }

    #[test]
    fn test_toml_config_parsing() {
        let parsed: TomlConfig = toml::from_str(
            r#"
            database = "/tmp/pax.db"
            bind = "0.0.0.0:8080"

            [external]
            url = "https://verify.example/cpf"
            token = "secret-token"
            timeout_secs = 10
            "#,
        )
        .expect("Should parse config");

        assert_eq!(parsed.database.as_deref(), Some("/tmp/pax.db"));
        assert_eq!(parsed.bind.as_deref(), Some("0.0.0.0:8080"));
        assert_eq!(parsed.external.url, "https://verify.example/cpf");
        assert_eq!(parsed.external.token.as_deref(), Some("secret-token"));
        assert_eq!(parsed.external.timeout_secs, 10);
    }

    #[test]
    fn test_toml_config_external_defaults() {
        let parsed: TomlConfig = toml::from_str(r#"bind = "127.0.0.1:7000""#)
            .expect("Should parse config");
        assert_eq!(parsed.external.timeout_secs, 5);
        assert!(parsed.external.token.is_none());
    }
}
