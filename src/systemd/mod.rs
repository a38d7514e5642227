// Systemd unit state collection

pub mod collector;
pub mod models;
pub mod parser;
pub mod reconcile;
pub mod runner;
pub mod tables;


pub use collector::{PassSummary, UnitsCollector, MEASUREMENT};
pub use models::{UnitFileState, UnitRecord, UnitStatus, UnitType, NULL_STATE};
pub use parser::{parse_unit_file_line, parse_unit_status_line, parse_unit_statuses, UnitFileIndex};
pub use reconcile::Reconciler;
pub use runner::{CommandRunner, SystemctlRunner};
pub use tables::{CodeTable, ACTIVE_STATES, LOAD_STATES, SUB_STATES, UNIT_FILE_STATES};
