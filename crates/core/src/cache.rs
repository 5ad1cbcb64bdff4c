//! Loading the workbook and keeping the result between queries.

use crate::dataset::Dataset;
use crate::error::{FichasError, FichasResult};
use crate::normalize::normalize_and_aggregate;
use crate::source::SourceLocator;
use fichas_sheet::Book;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::SystemTime;

/// Read a workbook and normalize all of its sheets.
///
/// Fails only when the file itself cannot be read; sheets that do not hold a
/// maintenance table are listed in [`Dataset::skipped`].
pub fn load_dataset(path: impl AsRef<Path>) -> FichasResult<Dataset> {
    let path = path.as_ref();
    tracing::info!(path = %path.display(), "loading workbook");
    let book = Book::from_workbook(path).map_err(|e| FichasError::load(path, e))?;
    Ok(normalize_and_aggregate(&book))
}

#[derive(Debug)]
struct Entry {
    path: PathBuf,
    modified: Option<SystemTime>,
    dataset: Arc<Dataset>,
}

/// Process-scoped cache of the loaded dataset.
///
/// The entry stays valid while the discovered path and its modification time
/// are unchanged. [`DatasetCache::refresh`] drops it unconditionally.
#[derive(Debug)]
pub struct DatasetCache {
    source: Source,
    entry: Option<Entry>,
    loads: usize,
}

#[derive(Debug)]
enum Source {
    Discover(SourceLocator),
    Fixed(PathBuf),
}

impl DatasetCache {
    /// Cache a workbook found by `locator`; discovery runs on every `get`.
    pub fn new(locator: SourceLocator) -> Self {
        Self {
            source: Source::Discover(locator),
            entry: None,
            loads: 0,
        }
    }

    /// Cache a workbook at a known path.
    pub fn for_path(path: impl Into<PathBuf>) -> Self {
        Self {
            source: Source::Fixed(path.into()),
            entry: None,
            loads: 0,
        }
    }

    /// The dataset, loading or reloading it when the source changed.
    pub fn get(&mut self) -> FichasResult<Arc<Dataset>> {
        let path = match &self.source {
            Source::Discover(locator) => locator.locate()?,
            Source::Fixed(path) => path.clone(),
        };
        let modified = modified_time(&path);

        if let Some(entry) = &self.entry {
            if entry.path == path && entry.modified == modified && modified.is_some() {
                tracing::debug!(path = %path.display(), "using cached dataset");
                return Ok(Arc::clone(&entry.dataset));
            }
        }

        // A failed load leaves nothing behind, not the previous dataset.
        self.entry = None;
        let dataset = Arc::new(load_dataset(&path)?);
        self.loads += 1;
        self.entry = Some(Entry {
            path,
            modified,
            dataset: Arc::clone(&dataset),
        });
        Ok(dataset)
    }

    /// Drop the cached dataset; the next `get` reads the file again.
    pub fn refresh(&mut self) {
        self.entry = None;
    }

    /// The cached dataset, without touching the disk.
    pub fn cached(&self) -> Option<Arc<Dataset>> {
        self.entry.as_ref().map(|entry| Arc::clone(&entry.dataset))
    }

    /// Path of the cached workbook, if any.
    pub fn cached_path(&self) -> Option<&Path> {
        self.entry.as_ref().map(|entry| entry.path.as_path())
    }

    /// How many times the workbook has been read.
    pub fn load_count(&self) -> usize {
        self.loads
    }
}

fn modified_time(path: &Path) -> Option<SystemTime> {
    std::fs::metadata(path).and_then(|m| m.modified()).ok()
}
