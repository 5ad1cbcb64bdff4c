//! Canonical maintenance records.

use serde::Serialize;
use std::fmt;

/// Placeholder stored in optional fields that have no value.
pub const NOT_AVAILABLE: &str = "N/A";

/// One normalized maintenance task.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct MaintenanceTask {
    #[serde(rename = "Equipment")]
    pub equipment: String,
    #[serde(rename = "FailureMode")]
    pub failure_mode: String,
    #[serde(rename = "Task")]
    pub task: String,
    #[serde(rename = "Criticality")]
    pub criticality: String,
    #[serde(rename = "Specialist")]
    pub specialist: String,
    #[serde(rename = "Periodicity")]
    pub periodicity: String,
    #[serde(rename = "RequiresTraining")]
    pub requires_training: String,
}

/// The columns of the unified table, in output order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Column {
    Equipment,
    FailureMode,
    Task,
    Criticality,
    Specialist,
    Periodicity,
    RequiresTraining,
}

impl Column {
    pub const ALL: [Column; 7] = [
        Column::Equipment,
        Column::FailureMode,
        Column::Task,
        Column::Criticality,
        Column::Specialist,
        Column::Periodicity,
        Column::RequiresTraining,
    ];

    /// Header label used in exports and table output.
    pub fn label(self) -> &'static str {
        match self {
            Column::Equipment => "Equipment",
            Column::FailureMode => "FailureMode",
            Column::Task => "Task",
            Column::Criticality => "Criticality",
            Column::Specialist => "Specialist",
            Column::Periodicity => "Periodicity",
            Column::RequiresTraining => "RequiresTraining",
        }
    }
}

impl fmt::Display for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl MaintenanceTask {
    /// Borrow the value of one column.
    pub fn get(&self, column: Column) -> &str {
        match column {
            Column::Equipment => &self.equipment,
            Column::FailureMode => &self.failure_mode,
            Column::Task => &self.task,
            Column::Criticality => &self.criticality,
            Column::Specialist => &self.specialist,
            Column::Periodicity => &self.periodicity,
            Column::RequiresTraining => &self.requires_training,
        }
    }

    /// All values in [`Column::ALL`] order.
    pub fn values(&self) -> [&str; 7] {
        Column::ALL.map(|column| self.get(column))
    }
}
