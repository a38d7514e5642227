// systemctl invocation with timeout

use crate::error::UnitsError;
use crate::systemd::models::UnitType;
use std::process::Stdio;
use std::time::Duration;
use tokio::process::Command;

/// Runs a systemctl subcommand and returns its standard output.
///
/// Implementations must suppress systemctl's legend and footer, and must
/// terminate the subprocess and fail once `timeout` elapses.
#[allow(async_fn_in_trait)]
pub trait CommandRunner {
    async fn run(
        &self,
        subcommand: &str,
        unit_type: UnitType,
        timeout: Duration,
    ) -> Result<String, UnitsError>;
}

/// Runs the real systemctl binary
#[derive(Debug, Clone)]
pub struct SystemctlRunner {
    program: String,
    user_scope: bool,
}

impl Default for SystemctlRunner {
    fn default() -> Self {
        Self {
            program: "systemctl".to_string(),
            user_scope: false,
        }
    }
}

impl SystemctlRunner {
    pub fn new(program: impl Into<String>, user_scope: bool) -> Self {
        Self {
            program: program.into(),
            user_scope,
        }
    }

    /// Arguments passed to systemctl for a subcommand
    pub fn args(&self, subcommand: &str, unit_type: UnitType) -> Vec<String> {
        let mut args = Vec::with_capacity(7);
        if self.user_scope {
            args.push("--user".to_string());
        }
        args.push(subcommand.to_string());
        args.push("--all".to_string());
        args.push(unit_type.systemctl_flag());
        args.push("--no-legend".to_string());
        args.push("--no-pager".to_string());
        args.push("--plain".to_string());
        args
    }

    fn describe(&self, args: &[String]) -> String {
        format!("{} {}", self.program, args.join(" "))
    }
}

impl CommandRunner for SystemctlRunner {
    async fn run(
        &self,
        subcommand: &str,
        unit_type: UnitType,
        timeout: Duration,
    ) -> Result<String, UnitsError> {
        let args = self.args(subcommand, unit_type);
        let command = self.describe(&args);
        tracing::debug!("Running {}", command);

        let child = Command::new(&self.program)
            .args(&args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|source| UnitsError::Spawn {
                command: command.clone(),
                source,
            })?;

        // Dropping the wait future on timeout kills the child
        let output = tokio::time::timeout(timeout, child.wait_with_output())
            .await
            .map_err(|_| UnitsError::Timeout {
                command: command.clone(),
                timeout,
            })?
            .map_err(|source| UnitsError::Spawn {
                command: command.clone(),
                source,
            })?;

        if !output.status.success() {
            return Err(UnitsError::NonZeroExit {
                command,
                status: output.status.to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}
