use std::path::PathBuf;

use anyhow::{Context, Result};

#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Host to bind the HTTP server to, e.g. "0.0.0.0"
    pub host: String,

    /// Port to listen on
    pub port: u16,

    /// Public base URL used when building `shortenedUrl`, e.g. "https://go.example.com".
    /// Must NOT have a trailing slash.
    pub base_url: String,

    /// Directory holding the links file. Created on first use.
    pub storage_dir: PathBuf,

    /// File name of the links file inside `storage_dir`.
    pub storage_file: String,

    /// Directory the front-end assets (index.html, style.css, script.js) are read from.
    pub static_dir: PathBuf,
}

impl AppConfig {
    /// Load configuration from environment variables (populated by dotenvy before this is called).
    pub fn from_env() -> Result<Self> {
        Self::from_vars(|key| std::env::var(key).ok())
    }

    /// Build a configuration from an arbitrary variable lookup.
    pub fn from_vars(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let port = lookup("PORT")
            .unwrap_or_else(|| "3000".into())
            .parse::<u16>()
            .context("PORT must be a valid port number (1–65535)")?;

        let base_url = lookup("BASE_URL")
            .unwrap_or_else(|| format!("http://localhost:{port}"))
            .trim_end_matches('/')
            .to_owned();

        let storage_file = lookup("STORAGE_FILE").unwrap_or_else(|| "links.json".into());
        if storage_file.trim().is_empty() {
            anyhow::bail!("STORAGE_FILE must not be empty");
        }

        Ok(Self {
            host: lookup("HOST").unwrap_or_else(|| "0.0.0.0".into()),
            port,
            base_url,
            storage_dir: lookup("STORAGE_DIR")
                .unwrap_or_else(|| "./data".into())
                .into(),
            storage_file,
            static_dir: lookup("STATIC_DIR")
                .unwrap_or_else(|| "./public".into())
                .into(),
        })
    }

    /// Full path of the links file.
    pub fn storage_path(&self) -> PathBuf {
        self.storage_dir.join(&self.storage_file)
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".into(),
            port: 3000,
            base_url: "http://localhost:3000".into(),
            storage_dir: "./data".into(),
            storage_file: "links.json".into(),
            static_dir: "./public".into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn vars(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_when_nothing_is_set() {
        let config = AppConfig::from_vars(vars(&[])).unwrap();
        let default = AppConfig::default();

        assert_eq!(config.port, 3000);
        assert_eq!(config.host, default.host);
        assert_eq!(config.base_url, "http://localhost:3000");
        assert_eq!(config.storage_path(), PathBuf::from("./data/links.json"));
        assert_eq!(config.static_dir, default.static_dir);
    }

    #[test]
    fn base_url_follows_port_and_drops_trailing_slash() {
        let config = AppConfig::from_vars(vars(&[("PORT", "8080")])).unwrap();
        assert_eq!(config.base_url, "http://localhost:8080");

        let config =
            AppConfig::from_vars(vars(&[("BASE_URL", "https://go.example.com/")])).unwrap();
        assert_eq!(config.base_url, "https://go.example.com");
    }

    #[test]
    fn storage_location_is_configurable() {
        let config = AppConfig::from_vars(vars(&[
            ("STORAGE_DIR", "/var/lib/linkjar"),
            ("STORAGE_FILE", "map.json"),
        ]))
        .unwrap();

        assert_eq!(
            config.storage_path(),
            PathBuf::from("/var/lib/linkjar/map.json")
        );
    }

    #[test]
    fn invalid_port_is_rejected() {
        assert!(AppConfig::from_vars(vars(&[("PORT", "not-a-port")])).is_err());
        assert!(AppConfig::from_vars(vars(&[("PORT", "70000")])).is_err());
    }

    #[test]
    fn empty_storage_file_is_rejected() {
        assert!(AppConfig::from_vars(vars(&[("STORAGE_FILE", " ")])).is_err());
    }
}
