//! Configuration module
//!
//! Loads the server configuration from an optional `config.toml` plus
//! `SERVER_*` environment overrides, with built-in defaults that reproduce
//! the GitHub-backed setup (fetch `answer.toml` / `firstboot.sh` from the
//! raw-content endpoint on every request).

pub mod prompt;

use serde::Deserialize;
use std::collections::HashMap;
use std::net::SocketAddr;

/// Main configuration structure, read-only after startup
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub logging: LoggingConfig,
    pub upstream: UpstreamConfig,
    #[serde(default)]
    pub routes: RoutesConfig,
}

/// Listener configuration
#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub workers: Option<usize>,
}

/// Logging configuration
#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    pub access_log: bool,
}

/// Remote-fetch configuration
#[derive(Debug, Deserialize, Clone)]
pub struct UpstreamConfig {
    /// Bound on every raw-content fetch, in seconds
    pub timeout_secs: u64,
}

/// Route table configuration: URL path -> file source
#[derive(Debug, Deserialize, Clone)]
pub struct RoutesConfig {
    /// Route key substituted when the normalized request path is empty
    #[serde(default = "default_route_key")]
    pub default: String,
    #[serde(default = "default_route_table")]
    pub table: HashMap<String, FileSource>,
}

/// Where a route's bytes come from
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum FileSource {
    /// Fetched from a raw-content endpoint on every request
    Remote { base_url: String, filename: String },
    /// Read from disk on every request; must exist when the listener starts
    Local { path: String },
    /// Resolved to `Local` by asking the operator on stdin before startup
    Prompt,
}

const GITHUB_RAW_BASE: &str =
    "https://raw.githubusercontent.com/buddy9880/pve-unattended-install/main";

fn default_route_key() -> String {
    "/answer".to_string()
}

fn default_route_table() -> HashMap<String, FileSource> {
    let mut table = HashMap::new();
    table.insert(
        "/answer".to_string(),
        FileSource::Remote {
            base_url: GITHUB_RAW_BASE.to_string(),
            filename: "answer.toml".to_string(),
        },
    );
    table.insert(
        "/firstboot".to_string(),
        FileSource::Remote {
            base_url: GITHUB_RAW_BASE.to_string(),
            filename: "firstboot.sh".to_string(),
        },
    );
    table
}

impl Default for RoutesConfig {
    fn default() -> Self {
        Self {
            default: default_route_key(),
            table: default_route_table(),
        }
    }
}

impl RoutesConfig {
    /// Route keys in sorted order, for 404 bodies and the startup banner
    pub fn sorted_keys(&self) -> Vec<&str> {
        let mut keys: Vec<&str> = self.table.keys().map(String::as_str).collect();
        keys.sort_unstable();
        keys
    }
}

impl Config {
    pub fn load() -> Result<Self, config::ConfigError> {
        let settings = config::Config::builder()
            .add_source(config::File::with_name("config").required(false))
            .add_source(config::Environment::with_prefix("SERVER"))
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 8080)?
            .set_default("logging.access_log", true)?
            .set_default("upstream.timeout_secs", 10)?
            .build()?;

        settings.try_deserialize()
    }

    pub fn socket_addr(&self) -> Result<SocketAddr, String> {
        format!("{}:{}", self.server.host, self.server.port)
            .parse()
            .map_err(|e| format!("Invalid listen address: {e}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_routes() {
        let routes = RoutesConfig::default();
        assert_eq!(routes.default, "/answer");
        assert_eq!(routes.sorted_keys(), vec!["/answer", "/firstboot"]);
        assert_eq!(
            routes.table.get("/answer"),
            Some(&FileSource::Remote {
                base_url: GITHUB_RAW_BASE.to_string(),
                filename: "answer.toml".to_string(),
            })
        );
    }

    #[test]
    fn test_file_source_tagged_parse() {
        let toml = r#"
            default = "/answers"

            [table."/answers"]
            type = "local"
            path = "answer.toml"

            [table."/firstboot.sh"]
            type = "prompt"
        "#;
        let routes: RoutesConfig = config::Config::builder()
            .add_source(config::File::from_str(toml, config::FileFormat::Toml))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();

        assert_eq!(routes.default, "/answers");
        assert_eq!(
            routes.table.get("/answers"),
            Some(&FileSource::Local {
                path: "answer.toml".to_string()
            })
        );
        assert_eq!(routes.table.get("/firstboot.sh"), Some(&FileSource::Prompt));
    }

    #[test]
    fn test_socket_addr() {
        let cfg = Config {
            server: ServerConfig {
                host: "0.0.0.0".to_string(),
                port: 8080,
                workers: None,
            },
            logging: LoggingConfig { access_log: true },
            upstream: UpstreamConfig { timeout_secs: 10 },
            routes: RoutesConfig::default(),
        };
        assert_eq!(cfg.socket_addr().unwrap().port(), 8080);
    }
}
