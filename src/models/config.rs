//! Configuration model loaded from external sources.

use std::time::Duration;

use chrono::FixedOffset;
use serde::Deserialize;
use thiserror::Error;
use validator::{Validate, ValidationError};

use crate::domain::format::{DEFAULT_REFERENCE_OFFSET_MINUTES, reference_offset};
use crate::{DEFAULT_GROUP_SIZE, DEFAULT_ITEMS_PER_PAGE};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[cfg(feature = "cli")]
    #[error("failed to load settings: {0}")]
    Load(#[from] config::ConfigError),

    #[error("invalid settings: {0}")]
    Invalid(#[from] validator::ValidationErrors),
}

fn default_page_size() -> usize {
    DEFAULT_ITEMS_PER_PAGE
}

fn default_group_size() -> usize {
    DEFAULT_GROUP_SIZE
}

fn default_offset_minutes() -> i32 {
    DEFAULT_REFERENCE_OFFSET_MINUTES
}

fn default_debounce_ms() -> u64 {
    300
}

/// UTC offsets range from -12:00 to +14:00.
fn validate_offset_minutes(minutes: i32) -> Result<(), ValidationError> {
    if (-720..=840).contains(&minutes) {
        Ok(())
    } else {
        Err(ValidationError::new("utc_offset"))
    }
}

#[derive(Clone, Debug, Deserialize, Validate)]
/// Settings shared by the listing tabs.
pub struct DashboardConfig {
    #[validate(length(min = 1))]
    pub database_url: String,
    #[serde(default = "default_page_size")]
    #[validate(range(min = 1, max = 500))]
    pub page_size: usize,
    /// Number of page buttons visible at once.
    #[serde(default = "default_group_size")]
    #[validate(range(min = 1, max = 20))]
    pub group_size: usize,
    /// Offset used to resolve date filters and display timestamps.
    #[serde(default = "default_offset_minutes")]
    #[validate(custom(function = "validate_offset_minutes"))]
    pub reference_utc_offset_minutes: i32,
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,
}

impl DashboardConfig {
    pub fn reference_offset(&self) -> FixedOffset {
        reference_offset(self.reference_utc_offset_minutes)
    }

    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }

    /// Loads `default.yaml`, the optional `{app_env}.yaml` override and
    /// `APP_*` environment variables from `config_dir`, then validates.
    #[cfg(feature = "cli")]
    pub fn load(config_dir: &std::path::Path, app_env: &str) -> Result<Self, ConfigError> {
        let settings = config::Config::builder()
            .add_source(config::File::with_name(
                &config_dir.join("default").to_string_lossy(),
            ))
            .add_source(
                config::File::with_name(&config_dir.join(app_env).to_string_lossy())
                    .required(false),
            )
            .add_source(config::Environment::with_prefix("APP"))
            .build()?;

        let dashboard_config = settings.try_deserialize::<DashboardConfig>()?;
        dashboard_config.validate()?;
        Ok(dashboard_config)
    }
}
