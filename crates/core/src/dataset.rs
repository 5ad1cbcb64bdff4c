//! The unified maintenance table.

use crate::error::SheetSkipped;
use crate::filter::TaskFilter;
use crate::record::{Column, MaintenanceTask};
use indexmap::IndexSet;
use std::collections::BTreeSet;

/// All records of a workbook, in sheet order then row order, plus the sheets
/// that contributed nothing.
///
/// Built once per load and never mutated; filtering borrows.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Dataset {
    records: Vec<MaintenanceTask>,
    skipped: Vec<SheetSkipped>,
}

impl Dataset {
    pub fn new(records: Vec<MaintenanceTask>, skipped: Vec<SheetSkipped>) -> Self {
        Self { records, skipped }
    }

    pub fn records(&self) -> &[MaintenanceTask] {
        &self.records
    }

    pub fn skipped(&self) -> &[SheetSkipped] {
        &self.skipped
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Records accepted by `filter`, in dataset order.
    pub fn filter(&self, filter: &TaskFilter) -> Vec<&MaintenanceTask> {
        filter.apply(&self.records)
    }

    /// Sorted distinct values of a column, for building facet choices.
    pub fn distinct(&self, column: Column) -> Vec<&str> {
        self.records
            .iter()
            .map(|record| record.get(column))
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Distinct equipment names in the order they first appear.
    pub fn equipment(&self) -> Vec<&str> {
        self.records
            .iter()
            .map(|record| record.equipment.as_str())
            .collect::<IndexSet<_>>()
            .into_iter()
            .collect()
    }
}
