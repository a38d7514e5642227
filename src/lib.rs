// Unitstat - systemd unit state collector
// Library root

pub mod config;
pub mod error;
pub mod output;
pub mod systemd;
pub mod version;
