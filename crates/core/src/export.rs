//! Delimited-text export of a (filtered) view.

use crate::error::FichasResult;
use crate::record::{Column, MaintenanceTask};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// UTF-8 byte-order mark. Spreadsheet programs in comma-decimal locales use it
/// to detect the encoding of a CSV file.
pub const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Default file name for exported selections.
pub const DEFAULT_EXPORT_FILE: &str = "plan_mantenimiento.csv";

/// Export options
#[derive(Debug, Clone)]
pub struct ExportOptions {
    /// Field delimiter (default: ',')
    pub delimiter: u8,
    /// Prefix the output with a UTF-8 byte-order mark (default: true)
    pub bom: bool,
}

impl Default for ExportOptions {
    fn default() -> Self {
        ExportOptions {
            delimiter: b',',
            bom: true,
        }
    }
}

impl ExportOptions {
    /// Set the delimiter
    #[must_use]
    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Set whether to write the byte-order mark
    #[must_use]
    pub fn with_bom(mut self, bom: bool) -> Self {
        self.bom = bom;
        self
    }
}

/// Write records with a header row of canonical column labels.
pub fn export_csv<'a, I, W>(records: I, mut writer: W, options: &ExportOptions) -> FichasResult<()>
where
    I: IntoIterator<Item = &'a MaintenanceTask>,
    W: Write,
{
    if options.bom {
        writer.write_all(UTF8_BOM)?;
    }

    let mut csv_writer = csv::WriterBuilder::new()
        .delimiter(options.delimiter)
        .has_headers(false)
        .from_writer(writer);

    csv_writer.write_record(Column::ALL.map(Column::label))?;
    for record in records {
        csv_writer.write_record(record.values())?;
    }

    csv_writer.flush()?;
    Ok(())
}

/// Export records to a file, creating or truncating it.
pub fn export_csv_file<'a, I, P>(records: I, path: P, options: &ExportOptions) -> FichasResult<()>
where
    I: IntoIterator<Item = &'a MaintenanceTask>,
    P: AsRef<Path>,
{
    let file = File::create(path)?;
    export_csv(records, BufWriter::new(file), options)
}

/// Render records to bytes, as offered for download.
pub fn export_csv_bytes<'a, I>(records: I, options: &ExportOptions) -> FichasResult<Vec<u8>>
where
    I: IntoIterator<Item = &'a MaintenanceTask>,
{
    let mut buffer = Vec::new();
    export_csv(records, &mut buffer, options)?;
    Ok(buffer)
}
