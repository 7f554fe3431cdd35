//! Typed schema for batch process logs.

use chrono::NaiveDateTime;
use core::fmt;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Header of the timestamp column in the source table.
pub const TIMESTAMP_COLUMN: &str = "Timestamp";

/// Header of the batch identifier column in the source table.
pub const BATCH_ID_COLUMN: &str = "batch_id";

/// The process variables tracked for every reading.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProcessVariable {
    ProcessTemp,
    ProcessTempSetpoint,
    PressureSetpoint,
    InletSteamPressure,
    OutletSteamPressure,
    SteamFlowRate,
    ValveOpening,
}

impl ProcessVariable {
    pub const COUNT: usize = 7;

    pub const ALL: [ProcessVariable; Self::COUNT] = [
        ProcessVariable::ProcessTemp,
        ProcessVariable::ProcessTempSetpoint,
        ProcessVariable::PressureSetpoint,
        ProcessVariable::InletSteamPressure,
        ProcessVariable::OutletSteamPressure,
        ProcessVariable::SteamFlowRate,
        ProcessVariable::ValveOpening,
    ];

    /// Column header in the source table.
    pub fn column_name(self) -> &'static str {
        match self {
            ProcessVariable::ProcessTemp => "Process Temp",
            ProcessVariable::ProcessTempSetpoint => "Process Temp SP",
            ProcessVariable::PressureSetpoint => "Pressure SP",
            ProcessVariable::InletSteamPressure => "Inlet Steam Pressure",
            ProcessVariable::OutletSteamPressure => "Outlet Steam Pressure",
            ProcessVariable::SteamFlowRate => "Steam Flow Rate",
            ProcessVariable::ValveOpening => "QualSteam Valve Opening",
        }
    }

    /// Display label with engineering unit.
    pub fn label(self) -> &'static str {
        match self {
            ProcessVariable::ProcessTemp => "Process Temp (°C)",
            ProcessVariable::ProcessTempSetpoint => "Process Temp SP (°C)",
            ProcessVariable::PressureSetpoint => "Pressure SP (bar)",
            ProcessVariable::InletSteamPressure => "Inlet Pressure P1 (bar)",
            ProcessVariable::OutletSteamPressure => "Outlet Pressure P2 (bar)",
            ProcessVariable::SteamFlowRate => "Steam Flow (kg/hr)",
            ProcessVariable::ValveOpening => "Valve Opening (%)",
        }
    }

    /// Resolve a variable from its column header or snake_case alias.
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim() {
            "Process Temp" | "process_temp" => Some(ProcessVariable::ProcessTemp),
            "Process Temp SP" | "process_temp_sp" => Some(ProcessVariable::ProcessTempSetpoint),
            "Pressure SP" | "pressure_sp" => Some(ProcessVariable::PressureSetpoint),
            "Inlet Steam Pressure" | "inlet_steam_pressure" => {
                Some(ProcessVariable::InletSteamPressure)
            }
            "Outlet Steam Pressure" | "outlet_steam_pressure" => {
                Some(ProcessVariable::OutletSteamPressure)
            }
            "Steam Flow Rate" | "steam_flow_rate" => Some(ProcessVariable::SteamFlowRate),
            "QualSteam Valve Opening" | "valve_opening" => Some(ProcessVariable::ValveOpening),
            _ => None,
        }
    }

    /// Position in [`ProcessVariable::ALL`], usable as a dense array index.
    pub fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for ProcessVariable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.column_name())
    }
}

/// Batch identifier as it appears in the source table.
///
/// Ordering is natural: identifiers that parse as integers compare
/// numerically (batch 10 sorts after batch 2) and come before
/// non-numeric identifiers, which compare lexically.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BatchId(String);

impl BatchId {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into().trim().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    fn numeric(&self) -> Option<i64> {
        self.0.parse().ok()
    }
}

impl Ord for BatchId {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self.numeric(), other.numeric()) {
            // Tie-break on the raw text so "007" and "7" stay distinct.
            (Some(a), Some(b)) => a.cmp(&b).then_with(|| self.0.cmp(&other.0)),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => self.0.cmp(&other.0),
        }
    }
}

impl PartialOrd for BatchId {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for BatchId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One timestamped row of process-variable readings for a batch.
///
/// A `None` value means the sample is missing in the source, not zero.
#[derive(Debug, Clone, PartialEq)]
pub struct Reading {
    timestamp: NaiveDateTime,
    batch_id: BatchId,
    values: [Option<f64>; ProcessVariable::COUNT],
}

impl Reading {
    pub fn new(
        timestamp: NaiveDateTime,
        batch_id: BatchId,
        values: [Option<f64>; ProcessVariable::COUNT],
    ) -> Self {
        Self {
            timestamp,
            batch_id,
            values,
        }
    }

    pub fn timestamp(&self) -> NaiveDateTime {
        self.timestamp
    }

    pub fn batch_id(&self) -> &BatchId {
        &self.batch_id
    }

    pub fn value(&self, variable: ProcessVariable) -> Option<f64> {
        self.values[variable.index()]
    }
}

/// Validated, immutable table of readings for one session.
///
/// Reading order is whatever the source had; nothing downstream may
/// assume it is sorted by timestamp.
#[derive(Debug, Clone, PartialEq)]
pub struct BatchTable {
    readings: Vec<Reading>,
}

impl BatchTable {
    pub fn new(readings: Vec<Reading>) -> Self {
        Self { readings }
    }

    pub fn readings(&self) -> &[Reading] {
        &self.readings
    }

    pub fn len(&self) -> usize {
        self.readings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.readings.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn variable_index_round_trip() {
        for variable in ProcessVariable::ALL {
            assert_eq!(ProcessVariable::ALL[variable.index()], variable);
        }
    }

    #[test]
    fn variable_resolves_from_header_and_alias() {
        assert_eq!(
            ProcessVariable::from_name("Steam Flow Rate"),
            Some(ProcessVariable::SteamFlowRate)
        );
        assert_eq!(
            ProcessVariable::from_name("steam_flow_rate"),
            Some(ProcessVariable::SteamFlowRate)
        );
        assert_eq!(ProcessVariable::from_name("enthalpy"), None);
    }

    #[test]
    fn numeric_batch_ids_sort_numerically() {
        let mut ids = vec![BatchId::new("10"), BatchId::new("2"), BatchId::new("1")];
        ids.sort();
        let order: Vec<&str> = ids.iter().map(|id| id.as_str()).collect();
        assert_eq!(order, ["1", "2", "10"]);
    }

    #[test]
    fn numeric_ids_sort_before_text_ids() {
        let mut ids = vec![BatchId::new("trial-a"), BatchId::new("12")];
        ids.sort();
        assert_eq!(ids[0].as_str(), "12");
        assert_eq!(ids[1].as_str(), "trial-a");
    }

    #[test]
    fn batch_id_trims_surrounding_whitespace() {
        assert_eq!(BatchId::new(" 7 "), BatchId::new("7"));
    }
}
