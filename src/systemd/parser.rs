// Parsers for `systemctl list-unit-files` and `systemctl list-units` output

use crate::error::{LineResult, UnitsError};
use crate::systemd::models::{or_null, UnitFileState, UnitStatus};
use crate::systemd::tables::{CodeTable, ACTIVE_STATES, LOAD_STATES, SUB_STATES};
use std::collections::HashMap;

/// Markers systemctl prints in front of failed or missing units unless --plain is given
const STATUS_MARKERS: [&str; 3] = ["●", "*", "×"];

/// Split a line into columns, dropping a leading status marker if present
fn columns(line: &str) -> Vec<&str> {
    let mut fields: Vec<&str> = line.split_whitespace().collect();
    if fields
        .first()
        .is_some_and(|first| STATUS_MARKERS.contains(first))
    {
        fields.remove(0);
    }
    fields
}

/// Resolve a state string through a code table, failing the line on a miss
pub(crate) fn resolve(table: &CodeTable, value: &str, unit: &str) -> LineResult<u16> {
    table.lookup(value).ok_or_else(|| UnitsError::UnknownState {
        field: table.name(),
        value: value.to_string(),
        unit: unit.to_string(),
    })
}

/// Parse one line of `list-unit-files`. Blank lines yield None.
pub fn parse_unit_file_line(line: &str) -> Option<LineResult<UnitFileState>> {
    if line.trim().is_empty() {
        return None;
    }

    let fields = columns(line);
    if fields.len() < 2 {
        return Some(Err(UnitsError::MalformedLine {
            expected: 2,
            line: line.to_string(),
        }));
    }

    Some(Ok(UnitFileState {
        name: fields[0].to_string(),
        enablement_state: fields[1].to_string(),
    }))
}

/// Parse one line of `list-units`, resolving its load, active and sub codes.
/// Blank lines yield None.
pub fn parse_unit_status_line(line: &str) -> Option<LineResult<UnitStatus>> {
    if line.trim().is_empty() {
        return None;
    }

    let fields = columns(line);
    if fields.len() < 4 {
        return Some(Err(UnitsError::MalformedLine {
            expected: 4,
            line: line.to_string(),
        }));
    }

    let name = fields[0];
    let load = or_null(fields[1]);
    let active = or_null(fields[2]);
    let sub = or_null(fields[3]);

    let status = resolve(&LOAD_STATES, load, name).and_then(|load_code| {
        let active_code = resolve(&ACTIVE_STATES, active, name)?;
        let sub_code = resolve(&SUB_STATES, sub, name)?;
        Ok(UnitStatus {
            name: name.to_string(),
            load: load.to_string(),
            active: active.to_string(),
            sub: sub.to_string(),
            load_code,
            active_code,
            sub_code,
        })
    });

    Some(status)
}

/// Parse all `list-units` output into per-line outcomes
pub fn parse_unit_statuses(output: &str) -> Vec<LineResult<UnitStatus>> {
    output.lines().filter_map(parse_unit_status_line).collect()
}

/// Immutable index of unit name -> enablement state built from `list-unit-files`
#[derive(Debug, Clone, Default)]
pub struct UnitFileIndex {
    states: HashMap<String, String>,
}

impl UnitFileIndex {
    /// Build the index from `list-unit-files` output, returning the lines that failed
    pub fn parse(output: &str) -> (Self, Vec<UnitsError>) {
        let mut states = HashMap::new();
        let mut errors = Vec::new();

        for outcome in output.lines().filter_map(parse_unit_file_line) {
            match outcome {
                Ok(UnitFileState {
                    name,
                    enablement_state,
                }) => {
                    states.insert(name, enablement_state);
                }
                Err(e) => errors.push(e),
            }
        }

        (Self { states }, errors)
    }

    /// Enablement state recorded for a unit, if it has a unit file
    pub fn get(&self, name: &str) -> Option<&str> {
        self.states.get(name).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }
}

