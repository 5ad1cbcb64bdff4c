//! Mapping of loosely-named header labels onto canonical fields.
//!
//! Sheets name their columns inconsistently ("Especialista", "E pecialista",
//! "F", "Periodicidad", ...), so each field carries an ordered list of label
//! rules. For every field the leftmost column matching any of its rules is
//! chosen. Fields are resolved independently, so one column may serve more
//! than one field.

use fichas_sheet::CellValue;

/// A source field that is looked up in the header row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    FailureMode,
    Task,
    Criticality,
    Specialist,
    Periodicity,
    RequiresTraining,
}

/// A predicate on a normalized header label.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LabelRule {
    /// Label contains the text.
    Contains(&'static str),
    /// Label equals the text exactly.
    Exact(&'static str),
}

impl LabelRule {
    pub fn matches(self, label: &str) -> bool {
        match self {
            LabelRule::Contains(needle) => label.contains(needle),
            LabelRule::Exact(expected) => label == expected,
        }
    }
}

impl Field {
    /// All fields, in resolution order.
    pub const ALL: [Field; 6] = [
        Field::FailureMode,
        Field::Task,
        Field::Criticality,
        Field::Specialist,
        Field::Periodicity,
        Field::RequiresTraining,
    ];

    /// Fields whose blanks inherit the value above them (merged cells).
    pub const FORWARD_FILLED: [Field; 5] = [
        Field::FailureMode,
        Field::Criticality,
        Field::Specialist,
        Field::Periodicity,
        Field::RequiresTraining,
    ];

    /// The label rules for this field.
    pub fn rules(self) -> &'static [LabelRule] {
        use LabelRule::{Contains, Exact};
        match self {
            Field::FailureMode => &[Contains("Modos"), Contains("Fallo")],
            Field::Task => &[Contains("Medidas")],
            Field::Criticality => &[Contains("Crit"), Contains("idad")],
            // "E p" catches labels with a stray space ("E pecialista").
            Field::Specialist => &[Contains("Esp"), Contains("E p")],
            Field::Periodicity => &[Exact("F"), Contains("Periodicidad")],
            Field::RequiresTraining => &[Contains("Form"), Contains("F o r m")],
        }
    }

    pub fn matches(self, label: &str) -> bool {
        self.rules().iter().any(|rule| rule.matches(label))
    }
}

/// Normalize a header cell: line breaks become spaces, then trim.
pub fn normalize_label(cell: &CellValue) -> String {
    cell.as_str()
        .replace("\r\n", " ")
        .replace(['\n', '\r'], " ")
        .trim()
        .to_string()
}

/// Column index chosen for each field, if any.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ColumnMap {
    pub failure_mode: Option<usize>,
    pub task: Option<usize>,
    pub criticality: Option<usize>,
    pub specialist: Option<usize>,
    pub periodicity: Option<usize>,
    pub requires_training: Option<usize>,
}

impl ColumnMap {
    /// Resolve every field against a row of normalized labels.
    pub fn resolve<S: AsRef<str>>(labels: &[S]) -> Self {
        let mut map = ColumnMap::default();
        for field in Field::ALL {
            let found = labels.iter().position(|label| field.matches(label.as_ref()));
            *map.slot_mut(field) = found;
        }
        map
    }

    /// The column chosen for `field`.
    pub fn get(&self, field: Field) -> Option<usize> {
        match field {
            Field::FailureMode => self.failure_mode,
            Field::Task => self.task,
            Field::Criticality => self.criticality,
            Field::Specialist => self.specialist,
            Field::Periodicity => self.periodicity,
            Field::RequiresTraining => self.requires_training,
        }
    }

    fn slot_mut(&mut self, field: Field) -> &mut Option<usize> {
        match field {
            Field::FailureMode => &mut self.failure_mode,
            Field::Task => &mut self.task,
            Field::Criticality => &mut self.criticality,
            Field::Specialist => &mut self.specialist,
            Field::Periodicity => &mut self.periodicity,
            Field::RequiresTraining => &mut self.requires_training,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_label() {
        assert_eq!(
            normalize_label(&CellValue::from("  Medidas\npreventivas \r\n")),
            "Medidas preventivas"
        );
        assert_eq!(normalize_label(&CellValue::from("Modos\r\nde Fallo")), "Modos de Fallo");
        assert_eq!(normalize_label(&CellValue::Null), "");
    }

    #[test]
    fn test_resolve_canonical_header() {
        let labels = [
            "Modos de Fallo",
            "Medidas preventivas",
            "Criticidad",
            "Especialista",
            "F",
            "Formación",
        ];
        let map = ColumnMap::resolve(&labels);
        assert_eq!(map.failure_mode, Some(0));
        assert_eq!(map.task, Some(1));
        assert_eq!(map.criticality, Some(2));
        assert_eq!(map.specialist, Some(3));
        assert_eq!(map.periodicity, Some(4));
        assert_eq!(map.requires_training, Some(5));
    }

    #[test]
    fn test_spaced_variants() {
        let labels = ["Medidas", "E pecialista", "F o r m a c i ó n"];
        let map = ColumnMap::resolve(&labels);
        assert_eq!(map.specialist, Some(1));
        assert_eq!(map.requires_training, Some(2));
        assert_eq!(map.failure_mode, None);
    }

    #[test]
    fn test_periodicity_exact_or_named() {
        assert!(Field::Periodicity.matches("F"));
        assert!(Field::Periodicity.matches("Periodicidad (meses)"));
        assert!(!Field::Periodicity.matches("Fecha"));
        assert!(!Field::Periodicity.matches("F."));
    }

    #[test]
    fn test_leftmost_match_wins_per_field() {
        // "Periodicidad" also satisfies the criticality rule ("idad"), and
        // sits to the left of "Criticidad".
        let labels = ["Medidas preventivas", "Periodicidad", "Criticidad"];
        let map = ColumnMap::resolve(&labels);
        assert_eq!(map.criticality, Some(1));
        assert_eq!(map.periodicity, Some(1));
    }

    #[test]
    fn test_unresolved_task() {
        let map = ColumnMap::resolve(&["Modos de Fallo", "Acciones"]);
        assert_eq!(map.get(Field::Task), None);
        assert_eq!(map.get(Field::FailureMode), Some(0));
    }
}
