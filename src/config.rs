//! TOML configuration for the slot catalog.
//!
//! Versioned schema; every field is optional and falls back to the
//! reference configuration (see [`CatalogSettings::default`]).
//!
//! ```toml
//! config_version = 1
//! max_retries = 100
//! days = ["mon", "tue", "wed", "thu", "fri"]
//! fixed_break = { start = "10:30", end = "11:00" }
//! slots = [
//!     { start = "09:00", end = "10:00" },
//!     { start = "10:30", end = "11:00" },
//! ]
//!
//! [lunch]
//! default = { start = "13:00", end = "14:00" }
//!
//! [lunch.days.friday]
//! start = "12:30"
//! end = "13:30"
//! ```
//!
//! Time strings are not checked here. A malformed slot time only surfaces
//! as a warning when the allocator scans it.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use thiserror::Error;

use crate::catalog::{CatalogError, CatalogSettings, SlotCatalog};
use crate::models::{Day, Slot};

/// Current supported config version
pub const CURRENT_CONFIG_VERSION: u32 = 1;

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Validation failed: {errors:?}")]
    ValidationFailed { errors: Vec<ValidationError> },

    #[error("Unsupported config version: {0}")]
    UnsupportedVersion(u32),
}

pub type ConfigResult<T> = Result<T, ConfigError>;

/// Validation error
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("Unknown day '{0}'")]
    UnknownDay(String),

    #[error("Lunch override for '{0}', which is not a configured day")]
    LunchDayNotConfigured(String),

    #[error(transparent)]
    Catalog(#[from] CatalogError),
}

/// Raw configuration as read from TOML
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RawConfig {
    /// Config format version
    pub config_version: u32,

    #[serde(default)]
    pub max_retries: Option<u32>,

    /// Day names, `mon` or `monday` forms
    #[serde(default)]
    pub days: Option<Vec<String>>,

    #[serde(default)]
    pub fixed_break: Option<Slot>,

    #[serde(default)]
    pub slots: Option<Vec<Slot>>,

    #[serde(default)]
    pub lunch: Option<RawLunch>,
}

/// Lunch section: one default interval plus per-day overrides
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RawLunch {
    #[serde(default)]
    pub default: Option<Slot>,

    #[serde(default)]
    pub days: BTreeMap<String, Slot>,
}

/// Load and validate configuration from a TOML file
pub fn load_config(path: impl AsRef<Path>) -> ConfigResult<SlotCatalog> {
    let content = std::fs::read_to_string(path)?;
    parse_config(&content)
}

/// Parse and validate configuration from a TOML string
pub fn parse_config(content: &str) -> ConfigResult<SlotCatalog> {
    let raw: RawConfig = toml::from_str(content)?;

    if raw.config_version != CURRENT_CONFIG_VERSION {
        return Err(ConfigError::UnsupportedVersion(raw.config_version));
    }

    let settings =
        settings_from_raw(raw).map_err(|errors| ConfigError::ValidationFailed { errors })?;

    settings.build().map_err(|errors| ConfigError::ValidationFailed {
        errors: errors.into_iter().map(ValidationError::from).collect(),
    })
}

/// Resolves a raw config against the reference defaults.
///
/// Day names are parsed here; structural checks happen when the
/// resulting settings are built.
pub fn settings_from_raw(raw: RawConfig) -> Result<CatalogSettings, Vec<ValidationError>> {
    let mut errors = Vec::new();
    let mut settings = CatalogSettings::default();

    if let Some(max_retries) = raw.max_retries {
        settings = settings.with_max_retries(max_retries);
    }

    if let Some(names) = raw.days {
        let mut days = Vec::with_capacity(names.len());
        for name in names {
            match name.parse::<Day>() {
                Ok(day) => days.push(day),
                Err(_) => errors.push(ValidationError::UnknownDay(name)),
            }
        }
        settings = settings.with_days(days);
    }

    if let Some(slots) = raw.slots {
        settings = settings.with_slots(slots);
    }

    if let Some(fixed_break) = raw.fixed_break {
        settings = settings.with_fixed_break(fixed_break);
    }

    let lunch = raw.lunch.unwrap_or_default();
    let default_lunch = lunch
        .default
        .unwrap_or_else(|| Slot::new("13:00", "14:00"));
    settings = settings.with_lunch_all(default_lunch);

    for (name, slot) in lunch.days {
        match name.parse::<Day>() {
            Ok(day) if settings.days.contains(&day) => {
                settings = settings.with_lunch(day, slot);
            }
            Ok(_) => errors.push(ValidationError::LunchDayNotConfigured(name)),
            Err(_) => errors.push(ValidationError::UnknownDay(name)),
        }
    }

    if errors.is_empty() {
        Ok(settings)
    } else {
        Err(errors)
    }
}
