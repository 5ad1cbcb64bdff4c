//! Turning raw sheet grids into canonical records.

use crate::columns::{normalize_label, ColumnMap, Field};
use crate::dataset::Dataset;
use crate::error::{SheetSkipped, SkipReason};
use crate::header::locate_header;
use crate::record::{MaintenanceTask, NOT_AVAILABLE};
use fichas_sheet::{Book, CellValue, Sheet};

/// Normalize one sheet into maintenance records.
///
/// Rows after the header become records. Blank cells in the forward-filled
/// fields take the last value seen above them in the same column, including
/// values on rows that are later dropped. Rows with no task are dropped.
pub fn normalize_sheet(name: &str, grid: &Sheet) -> Result<Vec<MaintenanceTask>, SheetSkipped> {
    let header = locate_header(grid)
        .ok_or_else(|| SheetSkipped::new(name, SkipReason::HeaderNotFound))?;

    let labels: Vec<String> = grid
        .row(header)
        .unwrap_or_default()
        .iter()
        .map(normalize_label)
        .collect();
    let columns = ColumnMap::resolve(&labels);
    let task_col = columns
        .task
        .ok_or_else(|| SheetSkipped::new(name, SkipReason::TaskColumnNotFound))?;

    tracing::debug!(sheet = name, header, ?columns, "resolved columns");

    let equipment = name.to_uppercase();
    let mut carried: [Option<&CellValue>; 5] = [None; 5];
    let mut records = Vec::new();

    for row in header + 1..grid.row_count() {
        for (slot, field) in carried.iter_mut().zip(Field::FORWARD_FILLED) {
            let cell = columns
                .get(field)
                .map(|col| grid.cell(row, col))
                .filter(|cell| !cell.is_missing());
            if cell.is_some() {
                *slot = cell;
            }
        }

        let task = grid.cell(row, task_col);
        if task.is_blank() {
            continue;
        }

        let [failure_mode, criticality, specialist, periodicity, requires_training] =
            carried.map(fill_text);
        records.push(MaintenanceTask {
            equipment: equipment.clone(),
            failure_mode,
            task: task.as_str(),
            criticality,
            specialist,
            periodicity,
            requires_training,
        });
    }

    Ok(records)
}

fn fill_text(cell: Option<&CellValue>) -> String {
    cell.map_or_else(
        || NOT_AVAILABLE.to_string(),
        |cell| cell.as_str().trim().to_string(),
    )
}

/// Normalize every sheet of a book and concatenate the results in sheet order.
///
/// Sheets without a header or a task column are recorded on the dataset as
/// skipped and contribute nothing; they never fail the whole load.
pub fn normalize_and_aggregate(book: &Book) -> Dataset {
    let mut records = Vec::new();
    let mut skipped = Vec::new();

    for (name, grid) in book.sheets() {
        match normalize_sheet(name, grid) {
            Ok(rows) => {
                tracing::debug!(sheet = name, records = rows.len(), "normalized sheet");
                records.extend(rows);
            }
            Err(skip) => {
                tracing::warn!("{skip}");
                skipped.push(skip);
            }
        }
    }

    tracing::info!(
        records = records.len(),
        sheets = book.sheet_count(),
        skipped = skipped.len(),
        "aggregated maintenance plan"
    );

    Dataset::new(records, skipped)
}
