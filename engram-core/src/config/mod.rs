pub mod consolidation_config;
pub mod maintenance_config;

pub use consolidation_config::ConsolidationConfig;
pub use maintenance_config::MaintenanceConfig;

use serde::{Deserialize, Serialize};

use crate::errors::{EngramError, EngramResult};

/// Top-level engine configuration, loadable from TOML.
///
/// Every section and field has a default, so a partial (or empty) document
/// is valid.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EngramConfig {
    pub consolidation: ConsolidationConfig,
    pub maintenance: MaintenanceConfig,
}

impl EngramConfig {
    /// Parse a TOML document, filling missing fields from defaults.
    pub fn from_toml_str(content: &str) -> EngramResult<Self> {
        toml::from_str(content).map_err(|e| EngramError::Config(e.to_string()))
    }
}
