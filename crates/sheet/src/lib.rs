//! Raw worksheet grids for fichas
//!
//! A [`Book`] is an ordered set of named [`Sheet`]s, each a headerless grid of
//! [`CellValue`]s exactly as stored in the workbook, decorative title rows
//! included. Interpreting the grid is left to `fichas-core`.
//!
//! # Examples
//!
//! ```
//! use fichas_sheet::{Book, CellValue, Sheet};
//!
//! let mut book = Book::new();
//! book.add_sheet(
//!     "Conveyor",
//!     Sheet::from_data(vec![vec!["PLAN DE MANTENIMIENTO"], vec!["Medidas preventivas"]]),
//! )
//! .unwrap();
//!
//! let sheet = book.get_sheet("Conveyor").unwrap();
//! assert_eq!(sheet.row_count(), 2);
//! assert!(sheet.cell(5, 5).is_null());
//! assert_eq!(sheet.cell(1, 0), &CellValue::from("Medidas preventivas"));
//! ```
//!
//! ## Loading a workbook
//!
//! ```no_run
//! use fichas_sheet::Book;
//!
//! let book = Book::from_workbook("FichasMantenimiento.xlsx").unwrap();
//! for (name, sheet) in book.sheets() {
//!     println!("{name}: {} rows", sheet.row_count());
//! }
//! ```

mod book;
mod cell;
mod error;
mod sheet;
mod workbook;

/// Re-export book type.
pub use book::Book;
/// Re-export cell value type.
pub use cell::CellValue;
/// Re-export sheet error types.
pub use error::{Result, SheetError};
/// Re-export sheet type.
pub use sheet::Sheet;
