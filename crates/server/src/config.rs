use std::{env, fs};

use toml::{Table, Value};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub server_bind: String,
    pub max_summary_words: usize,
    pub max_input_chars: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            server_bind: "127.0.0.1:8000".into(),
            max_summary_words: 128,
            max_input_chars: 2048,
        }
    }
}

pub fn load_settings() -> Settings {
    let file = fs::read_to_string("server.toml").ok();
    load_settings_from(file.as_deref(), |key| env::var(key).ok())
}

/// Defaults, then `server.toml` contents, then environment overrides.
pub fn load_settings_from(file: Option<&str>, env_var: impl Fn(&str) -> Option<String>) -> Settings {
    let mut settings = Settings::default();

    if let Some(raw) = file {
        match raw.parse::<Table>() {
            Ok(file_cfg) => {
                if let Some(v) = file_cfg.get("bind_addr").and_then(Value::as_str) {
                    settings.server_bind = v.to_string();
                }
                if let Some(v) = table_usize(&file_cfg, "max_summary_words") {
                    settings.max_summary_words = v;
                }
                if let Some(v) = table_usize(&file_cfg, "max_input_chars") {
                    settings.max_input_chars = v;
                }
            }
            Err(error) => tracing::warn!(%error, "ignoring unreadable server.toml"),
        }
    }

    if let Some(v) = env_var("SERVER_BIND") {
        settings.server_bind = v;
    }
    if let Some(v) = env_var("APP__BIND_ADDR") {
        settings.server_bind = v;
    }

    if let Some(v) = env_var("APP__MAX_SUMMARY_WORDS").and_then(|v| v.parse().ok()) {
        settings.max_summary_words = v;
    }
    if let Some(v) = env_var("APP__MAX_INPUT_CHARS").and_then(|v| v.parse().ok()) {
        settings.max_input_chars = v;
    }

    settings.max_summary_words = settings.max_summary_words.max(1);
    settings.max_input_chars = settings.max_input_chars.max(1);
    settings
}

fn table_usize(table: &Table, key: &str) -> Option<usize> {
    table
        .get(key)
        .and_then(Value::as_integer)
        .and_then(|v| usize::try_from(v).ok())
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
