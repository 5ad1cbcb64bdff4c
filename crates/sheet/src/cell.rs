use serde::{Deserialize, Serialize};
use std::fmt;

/// A single cell as stored in a worksheet
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CellValue {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    String(String),
}

impl CellValue {
    /// Check if the value is null
    #[must_use]
    pub fn is_null(&self) -> bool {
        matches!(self, CellValue::Null)
    }

    /// Check if the cell carries no value at all.
    ///
    /// Empty strings count as missing: some writers emit them for cells that
    /// only hold formatting.
    #[must_use]
    pub fn is_missing(&self) -> bool {
        match self {
            CellValue::Null => true,
            CellValue::String(s) => s.is_empty(),
            _ => false,
        }
    }

    /// Check if the cell is missing or holds only whitespace
    #[must_use]
    pub fn is_blank(&self) -> bool {
        match self {
            CellValue::String(s) => s.trim().is_empty(),
            other => other.is_missing(),
        }
    }

    /// Get the value as a string
    #[must_use]
    pub fn as_str(&self) -> String {
        match self {
            CellValue::Null => String::new(),
            CellValue::Bool(b) => b.to_string(),
            CellValue::Int(i) => i.to_string(),
            CellValue::Float(f) => f.to_string(),
            CellValue::String(s) => s.clone(),
        }
    }

    /// Check whether the text form of the cell contains `needle`
    #[must_use]
    pub fn contains(&self, needle: &str) -> bool {
        match self {
            CellValue::String(s) => s.contains(needle),
            CellValue::Null => needle.is_empty(),
            other => other.as_str().contains(needle),
        }
    }
}

impl Default for CellValue {
    fn default() -> Self {
        CellValue::Null
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Null => write!(f, ""),
            CellValue::Bool(b) => write!(f, "{b}"),
            CellValue::Int(i) => write!(f, "{i}"),
            CellValue::Float(fl) => write!(f, "{fl}"),
            CellValue::String(s) => write!(f, "{s}"),
        }
    }
}

impl From<bool> for CellValue {
    fn from(b: bool) -> Self {
        CellValue::Bool(b)
    }
}

impl From<i64> for CellValue {
    fn from(i: i64) -> Self {
        CellValue::Int(i)
    }
}

impl From<i32> for CellValue {
    fn from(i: i32) -> Self {
        CellValue::Int(i64::from(i))
    }
}

impl From<f64> for CellValue {
    fn from(f: f64) -> Self {
        CellValue::Float(f)
    }
}

impl From<String> for CellValue {
    fn from(s: String) -> Self {
        CellValue::String(s)
    }
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        CellValue::String(s.to_string())
    }
}

impl<T: Into<CellValue>> From<Option<T>> for CellValue {
    fn from(opt: Option<T>) -> Self {
        match opt {
            Some(v) => v.into(),
            None => CellValue::Null,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_and_blank() {
        assert!(CellValue::Null.is_missing());
        assert!(CellValue::from("").is_missing());
        assert!(!CellValue::from("  ").is_missing());
        assert!(CellValue::from("  ").is_blank());
        assert!(!CellValue::Int(0).is_missing());
        assert!(!CellValue::Bool(false).is_blank());
    }

    #[test]
    fn test_text_coercion() {
        assert_eq!(CellValue::Float(2.0).as_str(), "2");
        assert_eq!(CellValue::Float(2.5).as_str(), "2.5");
        assert_eq!(CellValue::Int(-7).as_str(), "-7");
        assert_eq!(CellValue::Null.as_str(), "");
        assert_eq!(CellValue::from(Some("x")), CellValue::String("x".to_string()));
        assert_eq!(CellValue::from(None::<&str>), CellValue::Null);
    }

    #[test]
    fn test_contains() {
        assert!(CellValue::from("Medidas preventivas\n(acciones)").contains("Medidas preventivas"));
        assert!(CellValue::Int(1234).contains("23"));
        assert!(!CellValue::Null.contains("a"));
    }
}
