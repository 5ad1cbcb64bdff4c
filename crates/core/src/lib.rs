//! # fichas-core
//!
//! Normalization of maintenance-plan workbooks into one flat table.
//!
//! Each sheet of the workbook holds a maintenance table under a few title
//! rows. The pipeline:
//! - finds the header row ([`locate_header`])
//! - maps its loosely-named labels onto canonical fields ([`ColumnMap`])
//! - forward-fills merged cells and drops rows without a task
//!   ([`normalize_sheet`])
//! - concatenates all sheets in order ([`normalize_and_aggregate`])
//!
//! The resulting [`Dataset`] can be filtered with a [`TaskFilter`] and
//! exported with [`export_csv`].
//!
//! ```
//! use fichas_core::{normalize_and_aggregate, TaskFilter};
//! use fichas_sheet::{Book, Sheet};
//!
//! let mut book = Book::new();
//! book.add_sheet(
//!     "Cinta",
//!     Sheet::from_data(vec![
//!         vec!["PLAN DE MANTENIMIENTO", ""],
//!         vec!["Modos de Fallo", "Medidas preventivas"],
//!         vec!["Atasco", "Limpiar rodillos"],
//!         vec!["", "Tensar banda"],
//!     ]),
//! )
//! .unwrap();
//!
//! let dataset = normalize_and_aggregate(&book);
//! assert_eq!(dataset.len(), 2);
//! assert_eq!(dataset.records()[1].failure_mode, "Atasco");
//!
//! let view = dataset.filter(&TaskFilter::new().with_search("banda"));
//! assert_eq!(view.len(), 1);
//! ```

/// Workbook loading and the dataset cache.
pub mod cache;
/// Header label rules.
pub mod columns;
/// The unified table.
pub mod dataset;
/// Error types and result aliases.
pub mod error;
/// Delimited export.
pub mod export;
/// Search and facet filters.
pub mod filter;
/// Header row detection.
pub mod header;
/// Sheet normalization and aggregation.
pub mod normalize;
/// Canonical records.
pub mod record;
/// Workbook discovery.
pub mod source;

pub use cache::{load_dataset, DatasetCache};
pub use columns::{ColumnMap, Field, LabelRule};
pub use dataset::Dataset;
pub use error::{FichasError, FichasResult, SheetSkipped, SkipReason};
pub use export::{export_csv, export_csv_bytes, export_csv_file, ExportOptions};
pub use filter::{TaskFilter, TrainingFilter};
pub use header::{locate_header, HEADER_MARKER, HEADER_SCAN_ROWS};
pub use normalize::{normalize_and_aggregate, normalize_sheet};
pub use record::{Column, MaintenanceTask, NOT_AVAILABLE};
pub use source::{SourceLocator, DEFAULT_MARKER};
