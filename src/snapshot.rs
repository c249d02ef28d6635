use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use log::{debug, info, warn};

use crate::error::{Error, Result};

// ---------------------------------------------------------------------------
// SnapshotStore
// ---------------------------------------------------------------------------

/// Locates, adopts and finalizes roster snapshot files.
///
/// Snapshots live in one data directory and share a stem prefix:
/// `{stem}.csv` is a freshly imported, not-yet-dated export and
/// `{stem}_{YYYY_MM_DD}.csv` is a finalized snapshot. The date suffix makes
/// lexicographic order chronological, so "latest" is a plain sort.
#[derive(Debug, Clone)]
pub struct SnapshotStore {
    data_dir: PathBuf,
    stem: String,
    downloads_dir: Option<PathBuf>,
}

impl SnapshotStore {
    pub fn new(data_dir: impl Into<PathBuf>, stem: impl Into<String>) -> Self {
        SnapshotStore {
            data_dir: data_dir.into(),
            stem: stem.into(),
            downloads_dir: None,
        }
    }

    /// Watch a downloads directory for fresh exports to adopt.
    pub fn with_downloads_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.downloads_dir = Some(dir.into());
        self
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn stem(&self) -> &str {
        &self.stem
    }

    /// Path of the undated default snapshot, `{data_dir}/{stem}.csv`.
    pub fn default_path(&self) -> PathBuf {
        self.data_dir.join(format!("{}.csv", self.stem))
    }

    /// Sorted file names of every snapshot in the data directory
    /// (`{stem}*.csv`). A missing data directory counts as empty.
    fn snapshot_names(&self) -> Result<Vec<String>> {
        let entries = match fs::read_dir(&self.data_dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        let mut names = Vec::new();
        for entry in entries {
            let entry = entry?;
            if !entry.file_type()?.is_file() {
                continue;
            }
            let name = entry.file_name();
            let Some(name) = name.to_str() else { continue };
            if name.starts_with(&self.stem) && name.ends_with(".csv") {
                names.push(name.to_string());
            }
        }
        names.sort();
        Ok(names)
    }

    /// The lexicographically-last snapshot, which the date suffix makes the
    /// chronologically newest. An undated default sorts before every dated
    /// file (`.` < `_`), so it is only returned when nothing dated exists.
    pub fn latest(&self) -> Result<PathBuf> {
        match self.snapshot_names()?.last() {
            Some(name) => Ok(self.data_dir.join(name)),
            None => Err(Error::NoSnapshot {
                prefix: self.stem.clone(),
                dir: self.data_dir.clone(),
            }),
        }
    }

    /// Sorted stems of every snapshot (file names without the `.csv`
    /// extension), the list a snapshot picker presents.
    pub fn data_files(&self) -> Result<Vec<String>> {
        Ok(self
            .snapshot_names()?
            .iter()
            .filter_map(|n| n.strip_suffix(".csv"))
            .map(str::to_string)
            .collect())
    }

    /// Date-stamp the default snapshot if one exists.
    ///
    /// The file's modification date (UTC) becomes a `_YYYY_MM_DD` suffix and
    /// the file is renamed in place, freeing the default slot for the next
    /// export. Returns the dated path, or `Ok(None)` when there is nothing
    /// to finalize, so a second call is a no-op. A dated file from the same
    /// day is replaced.
    pub fn finalize_default(&self) -> Result<Option<PathBuf>> {
        let default = self.default_path();
        if !default.is_file() {
            debug!("no default snapshot at {}", default.display());
            return Ok(None);
        }

        let modified: DateTime<Utc> = fs::metadata(&default)?.modified()?.into();
        let dated = self
            .data_dir
            .join(format!("{}_{}.csv", self.stem, modified.format("%Y_%m_%d")));

        fs::rename(&default, &dated)?;
        info!("finalized {} -> {}", default.display(), dated.display());
        Ok(Some(dated))
    }

    /// Adopt a fresh export from the downloads directory.
    ///
    /// Moves `{downloads}/{stem}.csv` into the default slot when the slot is
    /// free and the candidate passes [`is_valid_export`]. The move is a
    /// single rename, so a failure leaves no partial file at the
    /// destination; this requires the downloads directory to sit on the
    /// same filesystem as the data directory. Returns whether a file was
    /// adopted; invalid candidates are reported through the log and left
    /// untouched.
    pub fn import_downloaded(&self) -> Result<bool> {
        let Some(downloads_dir) = &self.downloads_dir else {
            debug!("no downloads directory configured");
            return Ok(false);
        };

        let candidate = downloads_dir.join(format!("{}.csv", self.stem));
        if !candidate.is_file() {
            debug!("no export candidate at {}", candidate.display());
            return Ok(false);
        }

        let default = self.default_path();
        if default.exists() {
            debug!("default slot {} already taken", default.display());
            return Ok(false);
        }

        if !is_valid_export(&candidate) {
            warn!("rejecting export candidate {}", candidate.display());
            return Ok(false);
        }

        fs::create_dir_all(&self.data_dir)?;
        fs::rename(&candidate, &default)?;
        info!("imported {} -> {}", candidate.display(), default.display());
        Ok(true)
    }

    /// Adopt a downloaded export if one is waiting, then date-stamp the
    /// default snapshot. This is the whole pre-load housekeeping pass;
    /// callers reload from [`latest`](Self::latest) afterwards.
    pub fn refresh(&self) -> Result<Option<PathBuf>> {
        self.import_downloaded()?;
        self.finalize_default()
    }
}

// ---------------------------------------------------------------------------
// Export validation
// ---------------------------------------------------------------------------

/// Whether a candidate file is worth adopting: it must parse as CSV end to
/// end and carry strictly more than one data row. Header-only and
/// single-row exports are rejected.
pub fn is_valid_export(path: &Path) -> bool {
    let mut reader = match csv::Reader::from_path(path) {
        Ok(reader) => reader,
        Err(_) => return false,
    };

    let mut rows = 0usize;
    for record in reader.records() {
        match record {
            Ok(_) => rows += 1,
            Err(_) => return false,
        }
    }
    rows > 1
}
