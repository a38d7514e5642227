// Configuration management

use crate::error::{Result, UnitsError};
use crate::systemd::UnitType;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Timeout for each systemctl invocation
    pub timeout_ms: u64,
    /// Unit type passed to `systemctl --type=`
    pub unit_type: UnitType,
    /// Seconds between collection passes
    pub interval_secs: u64,
    pub systemctl_path: String,
    /// Query the user manager (`systemctl --user`) instead of the system one
    pub user_scope: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            timeout_ms: 1000,
            unit_type: UnitType::Service,
            interval_secs: 10,
            systemctl_path: "systemctl".to_string(),
            user_scope: false,
        }
    }
}

impl Config {
    /// Get default config path: ~/.config/unitstat/config.yaml
    pub fn default_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;
        Ok(config_dir.join("unitstat").join("config.yaml"))
    }

    /// Load config from path, falling back to defaults if not found
    pub fn load(path: Option<PathBuf>) -> Result<Self> {
        let config_path = path.unwrap_or_else(|| Self::default_path().unwrap_or_default());

        if config_path.exists() {
            let contents = std::fs::read_to_string(&config_path)?;
            let config: Config = serde_yaml::from_str(&contents)?;
            config.validate()?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    /// Save config to path
    pub fn save(&self, path: PathBuf) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let yaml = serde_yaml::to_string(self)?;
        std::fs::write(path, yaml)?;
        Ok(())
    }

    pub fn validate(&self) -> std::result::Result<(), UnitsError> {
        if self.timeout_ms == 0 {
            return Err(UnitsError::Config("timeout_ms must be greater than 0".to_string()));
        }
        if self.interval_secs == 0 {
            return Err(UnitsError::Config("interval_secs must be greater than 0".to_string()));
        }
        if self.systemctl_path.trim().is_empty() {
            return Err(UnitsError::Config("systemctl_path cannot be empty".to_string()));
        }
        Ok(())
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    pub fn interval(&self) -> Duration {
        Duration::from_secs(self.interval_secs)
    }
}
