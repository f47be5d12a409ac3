use std::{env, fs, path::Path, time::Duration};

use anyhow::{Context, Result};
use client_core::ServiceEndpoint;
use shared::protocol::SUMMARIZE_ROUTE;
use toml::{Table, Value};

pub const DEFAULT_CONFIG_FILE: &str = "summarizer.toml";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientSettings {
    pub service_url: String,
    pub endpoint_path: String,
    pub request_timeout_secs: Option<u64>,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            service_url: "http://127.0.0.1:8000".into(),
            endpoint_path: SUMMARIZE_ROUTE.into(),
            request_timeout_secs: None,
        }
    }
}

impl ClientSettings {
    pub fn endpoint(&self) -> ServiceEndpoint {
        ServiceEndpoint {
            service_url: self.service_url.clone(),
            endpoint_path: self.endpoint_path.clone(),
            request_timeout: self
                .request_timeout_secs
                .filter(|secs| *secs > 0)
                .map(Duration::from_secs),
        }
    }
}

/// Flag values that take precedence over file and environment settings.
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub service_url: Option<String>,
    pub endpoint_path: Option<String>,
    pub request_timeout_secs: Option<u64>,
}

pub fn load_settings(config_path: Option<&Path>, overrides: &CliOverrides) -> Result<ClientSettings> {
    let file = match config_path {
        Some(path) => Some(
            fs::read_to_string(path)
                .with_context(|| format!("failed to read config file '{}'", path.display()))?,
        ),
        None => fs::read_to_string(DEFAULT_CONFIG_FILE).ok(),
    };
    let mut settings = load_settings_from(file.as_deref(), |key| env::var(key).ok())?;
    apply_overrides(&mut settings, overrides);
    Ok(settings)
}

/// Defaults, then file contents, then environment overrides.
pub fn load_settings_from(
    file: Option<&str>,
    env_var: impl Fn(&str) -> Option<String>,
) -> Result<ClientSettings> {
    let mut settings = ClientSettings::default();

    if let Some(raw) = file {
        let file_cfg: Table = raw.parse().context("config file is not valid TOML")?;
        if let Some(v) = file_cfg.get("service_url").and_then(Value::as_str) {
            settings.service_url = v.to_string();
        }
        if let Some(v) = file_cfg.get("endpoint_path").and_then(Value::as_str) {
            settings.endpoint_path = v.to_string();
        }
        if let Some(v) = file_cfg
            .get("request_timeout_secs")
            .and_then(Value::as_integer)
            .and_then(|v| u64::try_from(v).ok())
        {
            settings.request_timeout_secs = Some(v);
        }
    }

    if let Some(v) = env_var("SUMMARIZER_URL") {
        settings.service_url = v;
    }
    if let Some(v) = env_var("APP__SERVICE_URL") {
        settings.service_url = v;
    }
    if let Some(v) = env_var("APP__ENDPOINT_PATH") {
        settings.endpoint_path = v;
    }
    if let Some(v) = env_var("APP__REQUEST_TIMEOUT_SECS") {
        let secs = v
            .trim()
            .parse::<u64>()
            .with_context(|| format!("APP__REQUEST_TIMEOUT_SECS must be a whole number, got '{v}'"))?;
        settings.request_timeout_secs = Some(secs);
    }

    Ok(settings)
}

pub fn apply_overrides(settings: &mut ClientSettings, overrides: &CliOverrides) {
    if let Some(v) = &overrides.service_url {
        settings.service_url = v.clone();
    }
    if let Some(v) = &overrides.endpoint_path {
        settings.endpoint_path = v.clone();
    }
    if let Some(v) = overrides.request_timeout_secs {
        settings.request_timeout_secs = Some(v);
    }
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
