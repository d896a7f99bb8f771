use std::{fs, path::Path, time::Duration};

use anyhow::Context;
use toml::{Table, Value};

pub const DEFAULT_CONFIG_FILE: &str = "signup.toml";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TerminalSettings {
    pub server_url: String,
    pub status_display_ms: u64,
    pub log_filter: String,
}

impl Default for TerminalSettings {
    fn default() -> Self {
        Self {
            server_url: "http://127.0.0.1:8000".into(),
            status_display_ms: 4_000,
            log_filter: "info".into(),
        }
    }
}

/// Defaults, then the config file, then the environment.
pub fn load_settings(config_path: Option<&Path>) -> anyhow::Result<TerminalSettings> {
    let mut settings = TerminalSettings::default();

    match config_path {
        Some(path) => {
            let raw = fs::read_to_string(path)
                .with_context(|| format!("failed to read config file '{}'", path.display()))?;
            settings
                .apply_file(&raw)
                .with_context(|| format!("invalid config file '{}'", path.display()))?;
        }
        None => {
            if let Ok(raw) = fs::read_to_string(DEFAULT_CONFIG_FILE) {
                settings
                    .apply_file(&raw)
                    .with_context(|| format!("invalid config file '{DEFAULT_CONFIG_FILE}'"))?;
            }
        }
    }

    settings.apply_env(|key| std::env::var(key).ok());
    Ok(settings)
}

fn parse_millis(value: &Value) -> Option<u64> {
    match value {
        Value::Integer(v) => u64::try_from(*v).ok(),
        Value::String(v) => v.trim().parse().ok(),
        _ => None,
    }
}

impl TerminalSettings {
    /// Only TOML syntax errors fail; keys with unusable values are skipped.
    pub fn apply_file(&mut self, raw: &str) -> Result<(), toml::de::Error> {
        let file_cfg: Table = toml::from_str(raw)?;
        if let Some(v) = file_cfg.get("server_url").and_then(Value::as_str) {
            self.server_url = v.to_string();
        }
        if let Some(v) = file_cfg.get("status_display_ms").and_then(parse_millis) {
            self.status_display_ms = v;
        }
        if let Some(v) = file_cfg.get("log_filter").and_then(Value::as_str) {
            self.log_filter = v.to_string();
        }
        Ok(())
    }

    pub fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(v) = lookup("SIGNUP_SERVER_URL") {
            self.server_url = v;
        }
        if let Some(v) = lookup("APP__SERVER_URL") {
            self.server_url = v;
        }

        if let Some(v) = lookup("APP__STATUS_DISPLAY_MS") {
            if let Ok(parsed) = v.trim().parse::<u64>() {
                self.status_display_ms = parsed;
            }
        }

        if let Some(v) = lookup("APP__LOG_FILTER") {
            self.log_filter = v;
        }
    }

    pub fn apply_overrides(&mut self, server_url: Option<String>, status_display_ms: Option<u64>) {
        if let Some(v) = server_url {
            self.server_url = v;
        }
        if let Some(v) = status_display_ms {
            self.status_display_ms = v;
        }
    }

    pub fn status_display(&self) -> Duration {
        Duration::from_millis(self.status_display_ms)
    }
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
