// Collection pass driver

use crate::error::UnitsError;
use crate::output::Accumulator;
use crate::systemd::models::UnitType;
use crate::systemd::parser::UnitFileIndex;
use crate::systemd::reconcile::Reconciler;
use crate::systemd::runner::CommandRunner;
use std::time::Duration;

/// Measurement name every unit metric is emitted under
pub const MEASUREMENT: &str = "systemd_units";

pub const LIST_UNIT_FILES: &str = "list-unit-files";
pub const LIST_UNITS: &str = "list-units";

/// Counts from one collection pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PassSummary {
    pub emitted: usize,
    pub errors: usize,
    pub unit_files: usize,
}

/// Collects unit states through a command runner
pub struct UnitsCollector<R: CommandRunner> {
    runner: R,
    unit_type: UnitType,
    timeout: Duration,
}

impl<R: CommandRunner> UnitsCollector<R> {
    pub fn new(runner: R, unit_type: UnitType, timeout: Duration) -> Self {
        Self {
            runner,
            unit_type,
            timeout,
        }
    }

    pub fn unit_type(&self) -> UnitType {
        self.unit_type
    }

    pub fn runner(&self) -> &R {
        &self.runner
    }

    /// Run one collection pass.
    ///
    /// A failed systemctl invocation aborts the pass before anything is
    /// emitted. Malformed or unrecognized lines go to `acc.add_error` and the
    /// pass carries on.
    pub async fn gather<A: Accumulator + ?Sized>(&self, acc: &mut A) -> Result<PassSummary, UnitsError> {
        let unit_files = self
            .runner
            .run(LIST_UNIT_FILES, self.unit_type, self.timeout)
            .await?;
        let units = self
            .runner
            .run(LIST_UNITS, self.unit_type, self.timeout)
            .await?;

        let mut summary = PassSummary::default();

        let (index, file_errors) = UnitFileIndex::parse(&unit_files);
        summary.unit_files = index.len();
        for error in file_errors {
            summary.errors += 1;
            acc.add_error(error.into());
        }

        let reconciler = Reconciler::new(&index);
        for line in units.lines() {
            match reconciler.reconcile_line(line) {
                Some(Ok(record)) => {
                    summary.emitted += 1;
                    acc.add_fields(MEASUREMENT, record.fields(), record.tags(), chrono::Utc::now());
                }
                Some(Err(error)) => {
                    summary.errors += 1;
                    acc.add_error(error.into());
                }
                None => {}
            }
        }

        tracing::debug!(
            "Pass over {} units: {} emitted, {} errors, {} unit files",
            self.unit_type,
            summary.emitted,
            summary.errors,
            summary.unit_files
        );

        Ok(summary)
    }
}
