// Join unit statuses onto unit-file enablement states

use crate::error::LineResult;
use crate::systemd::models::{UnitRecord, UnitStatus, NULL_STATE};
use crate::systemd::parser::{parse_unit_status_line, resolve, UnitFileIndex};
use crate::systemd::tables::{NULL_CODE, UNIT_FILE_STATES};

/// Left-joins `list-units` records onto a `list-unit-files` index
pub struct Reconciler<'a> {
    index: &'a UnitFileIndex,
}

impl<'a> Reconciler<'a> {
    pub fn new(index: &'a UnitFileIndex) -> Self {
        Self { index }
    }

    /// Attach the enablement state to a parsed status.
    ///
    /// Units without a unit file (transient, generated) get the "null"
    /// sentinel. A unit file state outside the known vocabulary fails the unit.
    pub fn resolve(&self, status: UnitStatus) -> LineResult<UnitRecord> {
        let (enablement_state, enablement_code) = match self.index.get(&status.name) {
            Some(state) => (
                state.to_string(),
                resolve(&UNIT_FILE_STATES, state, &status.name)?,
            ),
            None => (NULL_STATE.to_string(), NULL_CODE),
        };

        Ok(UnitRecord {
            name: status.name,
            enablement_state,
            load: status.load,
            active: status.active,
            sub: status.sub,
            load_code: status.load_code,
            active_code: status.active_code,
            sub_code: status.sub_code,
            enablement_code,
        })
    }

    /// Parse and resolve one `list-units` line. Blank lines yield None.
    pub fn reconcile_line(&self, line: &str) -> Option<LineResult<UnitRecord>> {
        parse_unit_status_line(line).map(|parsed| parsed.and_then(|status| self.resolve(status)))
    }

    /// Resolve every line of `list-units` output, one outcome per non-blank line
    pub fn reconcile(&self, output: &str) -> Vec<LineResult<UnitRecord>> {
        output
            .lines()
            .filter_map(|line| self.reconcile_line(line))
            .collect()
    }
}
