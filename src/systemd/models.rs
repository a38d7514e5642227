// Systemd unit data models

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Sentinel used for any absent or blank state column
pub const NULL_STATE: &str = "null";

/// UnitType selects which units `systemctl --type=` lists
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum UnitType {
    #[default]
    Service,
    Socket,
    Target,
    Device,
    Mount,
    Automount,
    Swap,
    Timer,
    Path,
    Slice,
    Scope,
}

impl UnitType {
    /// Get the name systemctl expects for this unit type
    pub fn as_str(&self) -> &'static str {
        match self {
            UnitType::Service => "service",
            UnitType::Socket => "socket",
            UnitType::Target => "target",
            UnitType::Device => "device",
            UnitType::Mount => "mount",
            UnitType::Automount => "automount",
            UnitType::Swap => "swap",
            UnitType::Timer => "timer",
            UnitType::Path => "path",
            UnitType::Slice => "slice",
            UnitType::Scope => "scope",
        }
    }

    /// Get the `--type=` flag for systemctl
    pub fn systemctl_flag(&self) -> String {
        format!("--type={}", self.as_str())
    }
}

impl std::fmt::Display for UnitType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One line of `systemctl list-unit-files`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnitFileState {
    pub name: String,
    pub enablement_state: String,
}

/// One line of `systemctl list-units`, with its codes already resolved
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnitStatus {
    pub name: String,
    pub load: String,
    pub active: String,
    pub sub: String,
    pub load_code: u16,
    pub active_code: u16,
    pub sub_code: u16,
}

/// A unit's status joined with its unit-file enablement state
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnitRecord {
    pub name: String,
    pub enablement_state: String,
    pub load: String,
    pub active: String,
    pub sub: String,
    pub load_code: u16,
    pub active_code: u16,
    pub sub_code: u16,
    pub enablement_code: u16,
}

impl UnitRecord {
    /// Tag set emitted with the metric
    pub fn tags(&self) -> BTreeMap<String, String> {
        BTreeMap::from([
            ("name".to_string(), self.name.clone()),
            ("state".to_string(), self.enablement_state.clone()),
            ("load".to_string(), self.load.clone()),
            ("sub".to_string(), self.sub.clone()),
        ])
    }

    /// Field set emitted with the metric
    pub fn fields(&self) -> BTreeMap<String, i64> {
        BTreeMap::from([
            ("load_code".to_string(), i64::from(self.load_code)),
            ("active_code".to_string(), i64::from(self.active_code)),
            ("sub_code".to_string(), i64::from(self.sub_code)),
            ("state_code".to_string(), i64::from(self.enablement_code)),
        ])
    }
}

/// Normalize a blank state column to the sentinel
pub fn or_null(value: &str) -> &str {
    if value.is_empty() {
        NULL_STATE
    } else {
        value
    }
}
