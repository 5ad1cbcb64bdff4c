use crate::error::{Result, SheetError};
use crate::sheet::Sheet;
use indexmap::IndexMap;

/// A book containing multiple sheets (preserves insertion order)
#[derive(Debug, Clone, Default)]
pub struct Book {
    sheets: IndexMap<String, Sheet>,
}

impl Book {
    /// Create a new empty book
    #[must_use]
    pub fn new() -> Self {
        Book {
            sheets: IndexMap::new(),
        }
    }

    /// Get the number of sheets
    #[must_use]
    pub fn sheet_count(&self) -> usize {
        self.sheets.len()
    }

    /// Check if the book is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sheets.is_empty()
    }

    /// Get all sheet names in order
    #[must_use]
    pub fn sheet_names(&self) -> Vec<&str> {
        self.sheets.keys().map(String::as_str).collect()
    }

    /// Get a sheet by name
    pub fn get_sheet(&self, name: &str) -> Result<&Sheet> {
        self.sheets
            .get(name)
            .ok_or_else(|| SheetError::SheetNotFound {
                name: name.to_string(),
            })
    }

    /// Add a sheet to the book. The sheet takes the book-level name.
    pub fn add_sheet(&mut self, name: &str, mut sheet: Sheet) -> Result<()> {
        if self.sheets.contains_key(name) {
            return Err(SheetError::SheetAlreadyExists {
                name: name.to_string(),
            });
        }
        sheet.set_name(name);
        self.sheets.insert(name.to_string(), sheet);
        Ok(())
    }

    /// Iterate over `(name, sheet)` pairs in workbook order
    pub fn sheets(&self) -> impl Iterator<Item = (&str, &Sheet)> {
        self.sheets.iter().map(|(name, sheet)| (name.as_str(), sheet))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_order_is_insertion_order() {
        let mut book = Book::new();
        book.add_sheet("Zeta", Sheet::new()).unwrap();
        book.add_sheet("Alpha", Sheet::new()).unwrap();
        book.add_sheet("Mid", Sheet::new()).unwrap();

        assert_eq!(book.sheet_names(), vec!["Zeta", "Alpha", "Mid"]);
        let order: Vec<_> = book.sheets().map(|(name, _)| name).collect();
        assert_eq!(order, vec!["Zeta", "Alpha", "Mid"]);
    }

    #[test]
    fn test_duplicate_and_missing_sheets() {
        let mut book = Book::new();
        book.add_sheet("Data", Sheet::new()).unwrap();

        assert!(matches!(
            book.add_sheet("Data", Sheet::new()),
            Err(SheetError::SheetAlreadyExists { .. })
        ));
        assert!(matches!(
            book.get_sheet("Nope"),
            Err(SheetError::SheetNotFound { .. })
        ));
        assert_eq!(book.get_sheet("Data").unwrap().name(), "Data");
    }
}
