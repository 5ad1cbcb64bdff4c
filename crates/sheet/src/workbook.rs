use crate::book::Book;
use crate::cell::CellValue;
use crate::error::Result;
use crate::sheet::Sheet;
use calamine::{open_workbook_auto, Data, Range, Reader};
use chrono::{NaiveDate, TimeDelta, Timelike};
use rust_xlsxwriter::Workbook;
use std::path::Path;

const MILLIS_PER_DAY: f64 = 86_400_000.0;

/// Render an Excel date serial as `YYYY-MM-DD`, adding the time when it is
/// not midnight.
fn excel_date_to_text(serial: f64) -> Option<String> {
    if !serial.is_finite() || serial < 0.0 {
        return None;
    }
    // Excel stores dates as days since 1899-12-30
    let epoch = NaiveDate::from_ymd_opt(1899, 12, 30)?.and_hms_opt(0, 0, 0)?;
    let delta = TimeDelta::try_milliseconds((serial * MILLIS_PER_DAY).round() as i64)?;
    let datetime = epoch.checked_add_signed(delta)?;

    let text = if datetime.num_seconds_from_midnight() == 0 {
        datetime.format("%Y-%m-%d").to_string()
    } else {
        datetime.format("%Y-%m-%d %H:%M:%S").to_string()
    };
    Some(text)
}

/// Convert calamine Data to CellValue
fn data_to_cell_value(data: &Data) -> CellValue {
    match data {
        Data::Empty => CellValue::Null,
        Data::Bool(b) => CellValue::Bool(*b),
        Data::Int(i) => CellValue::Int(*i),
        Data::Float(f) => CellValue::Float(*f),
        Data::String(s) => CellValue::String(s.clone()),
        Data::DateTime(dt) if dt.is_datetime() => excel_date_to_text(dt.as_f64())
            .map_or(CellValue::Float(dt.as_f64()), CellValue::String),
        Data::DateTime(dt) => CellValue::Float(dt.as_f64()),
        Data::DateTimeIso(s) | Data::DurationIso(s) => CellValue::String(s.clone()),
        Data::Error(e) => CellValue::String(format!("#ERROR: {e:?}")),
    }
}

/// Build a grid whose (0, 0) is cell A1.
///
/// calamine trims leading empty rows and columns from the used range, so the
/// range offset is added back as null padding.
fn range_to_sheet(name: &str, range: &Range<Data>) -> Sheet {
    let (row_offset, col_offset) = range
        .start()
        .map_or((0, 0), |(r, c)| (r as usize, c as usize));

    let mut sheet = Sheet::with_name(name);
    let data = sheet.data_mut();
    data.extend(std::iter::repeat_with(Vec::new).take(row_offset));

    for row in range.rows() {
        let mut cells = vec![CellValue::Null; col_offset];
        cells.extend(row.iter().map(data_to_cell_value));
        data.push(cells);
    }

    sheet
}

impl Book {
    /// Load every sheet of a workbook, in workbook order.
    ///
    /// The format (xlsx, xlsm, xlsb, xls, ods) is picked from the extension.
    ///
    /// # Errors
    ///
    /// Returns error if the file cannot be opened or any sheet fails to parse.
    pub fn from_workbook<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut workbook = open_workbook_auto(path.as_ref())?;

        let sheet_names = workbook.sheet_names();
        let mut book = Book::new();

        for sheet_name in sheet_names {
            let range = workbook.worksheet_range(&sheet_name)?;
            tracing::debug!(
                sheet = %sheet_name,
                rows = range.height(),
                cols = range.width(),
                "read worksheet"
            );
            book.add_sheet(&sheet_name, range_to_sheet(&sheet_name, &range))?;
        }

        Ok(book)
    }

    /// Save the book to an Excel file
    ///
    /// # Errors
    ///
    /// Returns error if file cannot be created or written.
    pub fn save_as_xlsx<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let mut workbook = Workbook::new();

        for (name, sheet) in self.sheets() {
            let worksheet = workbook.add_worksheet();
            worksheet.set_name(name)?;

            for (row_idx, row) in sheet.data().iter().enumerate() {
                let row_num = u32::try_from(row_idx)
                    .map_err(|_| crate::SheetError::Write("Row index overflow".to_string()))?;
                for (col_idx, cell) in row.iter().enumerate() {
                    let col_num = u16::try_from(col_idx).map_err(|_| {
                        crate::SheetError::Write("Column index overflow".to_string())
                    })?;

                    match cell {
                        CellValue::Null => {}
                        CellValue::Bool(b) => {
                            worksheet.write_boolean(row_num, col_num, *b)?;
                        }
                        CellValue::Int(i) => {
                            // Excel stores all numbers as f64
                            worksheet.write_number(row_num, col_num, *i as f64)?;
                        }
                        CellValue::Float(f) => {
                            worksheet.write_number(row_num, col_num, *f)?;
                        }
                        CellValue::String(s) => {
                            worksheet.write_string(row_num, col_num, s)?;
                        }
                    }
                }
            }
        }

        workbook.save(path.as_ref())?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_book_xlsx_roundtrip_keeps_order() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("book.xlsx");

        let mut book = Book::new();
        book.add_sheet("Numbers", Sheet::from_data(vec![vec![1, 2, 3]]))
            .unwrap();
        book.add_sheet("Letters", Sheet::from_data(vec![vec!["a", "b", "c"]]))
            .unwrap();
        book.save_as_xlsx(&path).unwrap();

        let loaded = Book::from_workbook(&path).unwrap();
        assert_eq!(loaded.sheet_names(), vec!["Numbers", "Letters"]);

        let numbers = loaded.get_sheet("Numbers").unwrap();
        // Int becomes Float in Excel
        assert!(matches!(numbers.cell(0, 1), CellValue::Float(f) if (*f - 2.0).abs() < 1e-9));
        assert_eq!(
            loaded.get_sheet("Letters").unwrap().cell(0, 2),
            &CellValue::from("c")
        );
    }

    #[test]
    fn test_leading_empty_rows_and_columns_are_padded() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("offset.xlsx");

        let mut sheet = Sheet::new();
        sheet.push_row(Vec::<CellValue>::new());
        sheet.push_row(Vec::<CellValue>::new());
        sheet.push_row(vec![CellValue::Null, CellValue::from("title")]);

        let mut book = Book::new();
        book.add_sheet("Offset", sheet).unwrap();
        book.save_as_xlsx(&path).unwrap();

        let loaded = Book::from_workbook(&path).unwrap();
        let grid = loaded.get_sheet("Offset").unwrap();
        assert_eq!(grid.row_count(), 3);
        assert!(grid.cell(2, 0).is_null());
        assert_eq!(grid.cell(2, 1), &CellValue::from("title"));
    }

    #[test]
    fn test_excel_dates_render_as_iso_text() {
        assert_eq!(excel_date_to_text(45292.0).as_deref(), Some("2024-01-01"));
        assert_eq!(
            excel_date_to_text(45292.5).as_deref(),
            Some("2024-01-01 12:00:00")
        );
        assert_eq!(excel_date_to_text(-1.0), None);
        assert_eq!(excel_date_to_text(f64::NAN), None);
    }

    #[test]
    fn test_date_cells_read_back_as_text() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("dates.xlsx");

        let mut workbook = Workbook::new();
        let worksheet = workbook.add_worksheet();
        worksheet.set_name("Revisiones").unwrap();
        let format = rust_xlsxwriter::Format::new().set_num_format("yyyy-mm-dd");
        worksheet
            .write_number_with_format(0, 0, 45292.0, &format)
            .unwrap();
        worksheet.write_number(0, 1, 45292.0).unwrap();
        workbook.save(&path).unwrap();

        let loaded = Book::from_workbook(&path).unwrap();
        let sheet = loaded.get_sheet("Revisiones").unwrap();
        assert_eq!(sheet.cell(0, 0), &CellValue::from("2024-01-01"));
        assert!(matches!(sheet.cell(0, 1), CellValue::Float(_)));
    }

    #[test]
    fn test_unreadable_file_is_an_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("broken.xlsx");
        std::fs::write(&path, b"this is not a zip archive").unwrap();

        assert!(Book::from_workbook(&path).is_err());
    }
}
