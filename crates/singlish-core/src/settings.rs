//! Global settings loaded from TOML, following the same OnceLock pattern as the rule table.
//!
//! - `init_custom(toml_content)` sets a custom TOML before first `settings()` call
//! - `settings()` returns `&'static Settings` (lazy-init singleton)
//! - Default values are embedded via `include_str!("default_settings.toml")`

use std::sync::OnceLock;
use std::time::Duration;

use serde::Deserialize;

pub const DEFAULT_SETTINGS_TOML: &str = include_str!("default_settings.toml");

/// Upper bound for `controller.debounce_ms`.
const MAX_DEBOUNCE_MS: u64 = 5_000;

static CUSTOM_TOML: OnceLock<String> = OnceLock::new();

/// Set custom TOML before first `settings()` call.
pub fn init_custom(toml_content: String) -> Result<(), SettingsError> {
    parse_settings_toml(&toml_content)?;
    CUSTOM_TOML
        .set(toml_content)
        .map_err(|_| SettingsError::AlreadyInitialized)
}

/// Get or initialize the global settings singleton.
pub fn settings() -> &'static Settings {
    static INSTANCE: OnceLock<Settings> = OnceLock::new();
    INSTANCE.get_or_init(|| {
        let toml_str = CUSTOM_TOML
            .get()
            .map(|s| s.as_str())
            .unwrap_or(DEFAULT_SETTINGS_TOML);
        parse_settings_toml(toml_str).expect("settings TOML must be valid")
    })
}

/// Returns the embedded default settings TOML content.
pub fn default_toml() -> &'static str {
    DEFAULT_SETTINGS_TOML
}

#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("TOML parse error: {0}")]
    Parse(String),
    #[error("invalid value for {field}: {reason}")]
    InvalidValue { field: String, reason: String },
    #[error("settings already initialized")]
    AlreadyInitialized,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub classifier: ClassifierSettings,
    pub composition: CompositionSettings,
    pub controller: ControllerSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ClassifierSettings {
    pub min_acronym_len: usize,
    pub sentence_initial_transliteration: bool,
}

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct CompositionSettings {
    pub rakaransaya: bool,
    pub yansaya: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ControllerSettings {
    pub debounce_ms: u64,
}

impl ControllerSettings {
    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }
}

pub fn parse_settings_toml(toml_str: &str) -> Result<Settings, SettingsError> {
    let s: Settings =
        toml::from_str(toml_str).map_err(|e| SettingsError::Parse(e.to_string()))?;
    validate(&s)?;
    Ok(s)
}

fn validate(s: &Settings) -> Result<(), SettingsError> {
    if s.classifier.min_acronym_len == 0 {
        return Err(SettingsError::InvalidValue {
            field: "classifier.min_acronym_len".to_string(),
            reason: "must be positive".to_string(),
        });
    }
    if s.controller.debounce_ms > MAX_DEBOUNCE_MS {
        return Err(SettingsError::InvalidValue {
            field: "controller.debounce_ms".to_string(),
            reason: format!("must be at most {MAX_DEBOUNCE_MS}"),
        });
    }
    Ok(())
}
