//! Search and facet filters over the unified table.

use crate::record::MaintenanceTask;
use indexmap::IndexSet;

/// Tri-state filter on the training column.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TrainingFilter {
    #[default]
    All,
    /// Only tasks marked "S".
    Required,
    /// Only tasks marked "N".
    NotRequired,
}

impl TrainingFilter {
    fn accepts(self, value: &str) -> bool {
        match self {
            TrainingFilter::All => true,
            TrainingFilter::Required => value == "S",
            TrainingFilter::NotRequired => value == "N",
        }
    }
}

/// A combination of predicates; a record must satisfy all of them.
///
/// `None` for a facet means every value is accepted. An empty set accepts
/// nothing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskFilter {
    /// Case-insensitive substring matched against task and failure mode.
    pub search: Option<String>,
    pub specialists: Option<IndexSet<String>>,
    pub periodicities: Option<IndexSet<String>>,
    pub criticalities: Option<IndexSet<String>>,
    pub training: TrainingFilter,
}

impl TaskFilter {
    /// A filter that accepts every record.
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_search(mut self, text: impl Into<String>) -> Self {
        self.search = Some(text.into());
        self
    }

    #[must_use]
    pub fn with_specialists<I, S>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.specialists = Some(values.into_iter().map(Into::into).collect());
        self
    }

    #[must_use]
    pub fn with_periodicities<I, S>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.periodicities = Some(values.into_iter().map(Into::into).collect());
        self
    }

    #[must_use]
    pub fn with_criticalities<I, S>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.criticalities = Some(values.into_iter().map(Into::into).collect());
        self
    }

    #[must_use]
    pub fn with_training(mut self, training: TrainingFilter) -> Self {
        self.training = training;
        self
    }

    /// Test a single record.
    pub fn matches(&self, record: &MaintenanceTask) -> bool {
        let needle = self.search.as_deref().map(str::to_lowercase);
        self.matches_with(record, needle.as_deref())
    }

    /// Apply the filter to a sequence of records, keeping their order.
    pub fn apply<'a, I>(&self, records: I) -> Vec<&'a MaintenanceTask>
    where
        I: IntoIterator<Item = &'a MaintenanceTask>,
    {
        let needle = self.search.as_deref().map(str::to_lowercase);
        records
            .into_iter()
            .filter(|record| self.matches_with(record, needle.as_deref()))
            .collect()
    }

    fn matches_with(&self, record: &MaintenanceTask, needle: Option<&str>) -> bool {
        let text_ok = needle.map_or(true, |needle| {
            record.task.to_lowercase().contains(needle)
                || record.failure_mode.to_lowercase().contains(needle)
        });

        text_ok
            && in_set(self.specialists.as_ref(), &record.specialist)
            && in_set(self.periodicities.as_ref(), &record.periodicity)
            && in_set(self.criticalities.as_ref(), &record.criticality)
            && self.training.accepts(&record.requires_training)
    }
}

fn in_set(set: Option<&IndexSet<String>>, value: &str) -> bool {
    set.map_or(true, |set| set.contains(value))
}
