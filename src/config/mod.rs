//! Dev server configuration

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default = "default_port")]
    pub port: u16,

    /// Where `/api/*` requests are forwarded, e.g. `http://127.0.0.1:5000`
    #[serde(default = "default_backend_url")]
    pub backend_url: String,

    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

fn default_port() -> u16 {
    8080
}

fn default_backend_url() -> String {
    "http://127.0.0.1:5000".to_string()
}

fn default_request_timeout_secs() -> u64 {
    30
}

impl Config {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Backend base URL with a trailing slash so relative joins keep any
    /// path prefix (`http://host/api-v1/` + `trip` → `.../api-v1/trip`).
    pub fn backend_base(&self) -> Result<url::Url> {
        let mut raw = self.backend_url.trim().to_string();
        if !raw.ends_with('/') {
            raw.push('/');
        }
        url::Url::parse(&raw).with_context(|| format!("invalid backend_url: {}", self.backend_url))
    }
}

/// Get config directory (ECHOCHECK_CONFIG_DIR, XDG_CONFIG_HOME or platform default)
pub fn get_config_dir() -> PathBuf {
    if let Ok(dir) = std::env::var("ECHOCHECK_CONFIG_DIR") {
        return PathBuf::from(dir);
    }

    #[cfg(target_os = "macos")]
    {
        if let Ok(home) = std::env::var("HOME") {
            return PathBuf::from(home).join("Library/Application Support/echocheck");
        }
    }

    #[cfg(target_os = "linux")]
    {
        if let Ok(xdg) = std::env::var("XDG_CONFIG_HOME") {
            return PathBuf::from(xdg).join("echocheck");
        }
        if let Ok(home) = std::env::var("HOME") {
            return PathBuf::from(home).join(".config/echocheck");
        }
    }

    #[cfg(target_os = "windows")]
    {
        if let Ok(appdata) = std::env::var("APPDATA") {
            return PathBuf::from(appdata).join("echocheck");
        }
    }

    PathBuf::from(".")
}

pub fn load_config() -> Result<Config> {
    let config_dir = get_config_dir();

    let mut builder = ::config::Config::builder()
        .set_default("port", default_port() as i64)?
        .set_default("backend_url", default_backend_url())?
        .set_default("request_timeout_secs", default_request_timeout_secs() as i64)?
        // config.toml (or .json/.yaml) in the config dir, if present
        .add_source(
            ::config::File::with_name(&config_dir.join("config").to_string_lossy()).required(false),
        )
        // ECHOCHECK_BACKEND_URL, ECHOCHECK_REQUEST_TIMEOUT_SECS, ...
        .add_source(
            ::config::Environment::with_prefix("ECHOCHECK")
                .try_parsing(true)
                .source(Some(env_without_port())),
        );

    // Port precedence: ECHOCHECK_PORT > PORT > config file > default.
    // Unparseable values are skipped, not fatal.
    let port = ["ECHOCHECK_PORT", "PORT"].into_iter().find_map(|key| {
        let raw = std::env::var(key).ok()?;
        match raw.parse::<u16>() {
            Ok(port) => Some(port),
            Err(_) => {
                tracing::warn!("Ignoring invalid {}={:?}", key, raw);
                None
            }
        }
    });
    if let Some(port) = port {
        builder = builder.set_override("port", port as i64)?;
    }

    let config = builder.build()?;

    Ok(config.try_deserialize()?)
}

/// Process environment minus `ECHOCHECK_PORT`, which is validated separately.
fn env_without_port() -> ::config::Map<String, String> {
    std::env::vars()
        .filter(|(key, _)| key != "ECHOCHECK_PORT")
        .collect()
}
