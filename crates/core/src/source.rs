//! Discovery of the maintenance-plan workbook on disk.

use crate::error::{FichasError, FichasResult};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Substring that identifies the workbook by file name (case-insensitive).
pub const DEFAULT_MARKER: &str = "fichasmantenimiento";

/// Finds the workbook in a directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceLocator {
    dir: PathBuf,
    marker: String,
    extensions: Vec<String>,
}

impl Default for SourceLocator {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("."),
            marker: DEFAULT_MARKER.to_string(),
            extensions: vec!["xlsx".to_string()],
        }
    }
}

impl SourceLocator {
    /// Look for the default marker in `dir`.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_marker(mut self, marker: impl Into<String>) -> Self {
        self.marker = marker.into().to_lowercase();
        self
    }

    /// Accept additional file extensions (without the dot).
    #[must_use]
    pub fn with_extension(mut self, extension: impl Into<String>) -> Self {
        self.extensions.push(extension.into().to_lowercase());
        self
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn marker(&self) -> &str {
        &self.marker
    }

    /// All matching files, sorted by file name.
    pub fn candidates(&self) -> FichasResult<Vec<PathBuf>> {
        let mut found = Vec::new();

        let entries = match std::fs::read_dir(&self.dir) {
            Ok(entries) => entries,
            Err(err) if err.kind() == ErrorKind::NotFound => {
                tracing::debug!(dir = %self.dir.display(), "source directory does not exist");
                return Ok(found);
            }
            Err(err) => return Err(err.into()),
        };

        for entry in entries {
            let path = entry?.path();
            // Follows symlinks
            if !path.is_file() {
                continue;
            }

            let Some(file_name) = path.file_name().and_then(|s| s.to_str()) else {
                continue;
            };
            let extension_ok = path
                .extension()
                .and_then(|s| s.to_str())
                .is_some_and(|ext| self.extensions.iter().any(|e| e.eq_ignore_ascii_case(ext)));

            if extension_ok && file_name.to_lowercase().contains(&self.marker) {
                found.push(path);
            }
        }

        found.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
        Ok(found)
    }

    /// The first matching workbook.
    pub fn locate(&self) -> FichasResult<PathBuf> {
        let candidates = self.candidates()?;
        if candidates.len() > 1 {
            tracing::debug!(count = candidates.len(), "several workbooks match, using the first");
        }
        candidates
            .into_iter()
            .next()
            .ok_or_else(|| FichasError::SourceNotFound {
                dir: self.dir.clone(),
                marker: self.marker.clone(),
            })
    }
}
