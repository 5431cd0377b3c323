use serde::Deserialize;
use std::fs;
use std::path::Path;
use std::time::Duration;

use crate::error::{CatalogError, Result};
use crate::iterator::profile::CONTACT_KINDS;
use crate::state::Phase;

/// Driver configuration, read from a TOML file.
///
/// ```toml
/// latency_ms = 0
/// initial_phase = "delivered"
/// contact_kind = "coworkers"
/// subject = "anna.smith@bing.com"
/// channels = ["open", "save"]
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CatalogConfig {
    pub latency_ms: u64,
    pub initial_phase: String,
    pub contact_kind: String,
    pub subject: String,
    pub channels: Vec<String>,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            latency_ms: 2500,
            initial_phase: "ordered".to_string(),
            contact_kind: "friends".to_string(),
            subject: "anna.smith@bing.com".to_string(),
            channels: vec!["open".to_string(), "save".to_string()],
        }
    }
}

impl CatalogConfig {
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: CatalogConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Loads `path` when given, otherwise falls back to the defaults.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }

    /// Rejects unknown variant identifiers up front so drivers fail at the
    /// point of misconfiguration.
    pub fn validate(&self) -> Result<()> {
        self.initial_phase()?;
        self.contact_kind()?;
        if self.channels.is_empty() {
            return Err(CatalogError::config("at least one event channel is required"));
        }
        Ok(())
    }

    pub fn initial_phase(&self) -> Result<Phase> {
        self.initial_phase.parse()
    }

    pub fn contact_kind(&self) -> Result<&str> {
        let kind = self.contact_kind.as_str();
        if CONTACT_KINDS.contains(&kind) {
            Ok(kind)
        } else {
            Err(CatalogError::unknown_variant("contact kind", kind, CONTACT_KINDS))
        }
    }

    pub fn latency(&self) -> Duration {
        Duration::from_millis(self.latency_ms)
    }
}
