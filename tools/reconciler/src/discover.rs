//! Input discovery
//!
//! The return desk drops dated request exports into one directory; a run
//! always works from the newest one, by file modification time.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::SystemTime;
use types::errors::SourceError;

/// True for a CSV file whose name carries the configured marker
fn is_request_file(path: &Path, marker: &str) -> bool {
    let is_csv = path
        .extension()
        .map(|ext| ext.eq_ignore_ascii_case("csv"))
        .unwrap_or(false);
    let has_marker = path
        .file_stem()
        .and_then(|stem| stem.to_str())
        .map(|stem| stem.contains(marker))
        .unwrap_or(false);
    is_csv && has_marker
}

/// Find the newest return-request export in the input directory
///
/// Fatal when nothing matches: a run without a request file has nothing
/// to reconcile.
pub fn newest_request_file(dir: &Path, marker: &str) -> Result<PathBuf, SourceError> {
    let mut newest: Option<(SystemTime, PathBuf)> = None;

    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let path = entry.path();
        if !path.is_file() || !is_request_file(&path, marker) {
            continue;
        }
        let modified = entry.metadata()?.modified()?;
        if newest.as_ref().map_or(true, |(ts, _)| modified > *ts) {
            newest = Some((modified, path));
        }
    }

    newest
        .map(|(_, path)| path)
        .ok_or_else(|| SourceError::NoInputFile {
            marker: marker.to_string(),
            dir: dir.display().to_string(),
        })
}
