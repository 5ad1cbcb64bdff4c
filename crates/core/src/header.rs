//! Header row detection.

use fichas_sheet::Sheet;

/// Text that identifies the header row. It labels the preventive-actions
/// column, which every maintenance sheet spells the same way.
pub const HEADER_MARKER: &str = "Medidas preventivas";

/// Only this many leading rows are searched for the header.
pub const HEADER_SCAN_ROWS: usize = 40;

/// Find the index of the header row in a raw grid.
///
/// Returns the first row among the first [`HEADER_SCAN_ROWS`] whose cells,
/// read as text, contain [`HEADER_MARKER`].
pub fn locate_header(grid: &Sheet) -> Option<usize> {
    grid.rows()
        .take(HEADER_SCAN_ROWS)
        .position(|row| row.iter().any(|cell| cell.contains(HEADER_MARKER)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use fichas_sheet::CellValue;

    fn grid_with_marker_at(k: usize, rows: usize) -> Sheet {
        let mut sheet = Sheet::with_name("Test");
        for i in 0..rows {
            if i == k {
                sheet.push_row(vec!["Modos de Fallo", "Medidas preventivas (acciones)"]);
            } else {
                sheet.push_row(vec![format!("fila {i}"), String::new()]);
            }
        }
        sheet
    }

    #[test]
    fn test_finds_marker_at_each_offset_in_window() {
        for k in [0, 1, 3, 17, HEADER_SCAN_ROWS - 1] {
            assert_eq!(locate_header(&grid_with_marker_at(k, 60)), Some(k));
        }
    }

    #[test]
    fn test_marker_beyond_window_is_ignored() {
        assert_eq!(locate_header(&grid_with_marker_at(HEADER_SCAN_ROWS, 60)), None);
    }

    #[test]
    fn test_no_marker() {
        assert_eq!(locate_header(&grid_with_marker_at(100, 10)), None);
        assert_eq!(locate_header(&Sheet::new()), None);
    }

    #[test]
    fn test_first_match_wins_and_case_matters() {
        let sheet = Sheet::from_data(vec![
            vec![CellValue::from("medidas preventivas")],
            vec![CellValue::Int(1), CellValue::from("Medidas preventivas")],
            vec![CellValue::from("Medidas preventivas")],
        ]);
        assert_eq!(locate_header(&sheet), Some(1));
    }
}
