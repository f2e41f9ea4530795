//! Downloaded report discovery.

use std::path::{Path, PathBuf};
use std::time::SystemTime;

use crate::ReportResult;

/// Extensions the portal export can produce.
pub const REPORT_EXTENSIONS: &[&str] = &["xls", "xlsx"];

/// In-progress download artifacts that must never be picked up.
const PARTIAL_EXTENSIONS: &[&str] = &["crdownload", "tmp"];

/// Newest file by modification time in `dir` carrying one of `extensions`.
///
/// Returns `Ok(None)` when nothing matches; an empty directory is not an
/// error here, the caller decides whether that stops the run.
pub fn latest_report(dir: &Path, extensions: &[&str]) -> ReportResult<Option<PathBuf>> {
    let mut newest: Option<(SystemTime, PathBuf)> = None;

    for entry in std::fs::read_dir(dir)? {
        let entry = entry?;
        if !entry.file_type()?.is_file() {
            continue;
        }
        let path = entry.path();
        let Some(ext) = path.extension().and_then(|e| e.to_str()) else {
            continue;
        };
        let ext = ext.to_ascii_lowercase();
        if PARTIAL_EXTENSIONS.contains(&ext.as_str()) {
            continue;
        }
        if !extensions.iter().any(|e| e.eq_ignore_ascii_case(&ext)) {
            continue;
        }

        let modified = entry.metadata()?.modified()?;
        match &newest {
            Some((best, _)) if *best >= modified => {}
            _ => newest = Some((modified, path)),
        }
    }

    Ok(newest.map(|(_, path)| path))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::{File, FileTimes, OpenOptions};
    use std::time::Duration;

    fn touch(dir: &Path, name: &str, mtime_secs: u64) -> PathBuf {
        let path = dir.join(name);
        File::create(&path).unwrap();
        let times = FileTimes::new()
            .set_modified(SystemTime::UNIX_EPOCH + Duration::from_secs(mtime_secs));
        OpenOptions::new()
            .write(true)
            .open(&path)
            .unwrap()
            .set_times(times)
            .unwrap();
        path
    }

    #[test]
    fn picks_the_newest_matching_file() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), "a.xlsx", 1_000);
        let newest = touch(dir.path(), "b.xlsx", 3_000);
        touch(dir.path(), "c.xlsx", 2_000);

        let found = latest_report(dir.path(), &["xlsx"]).unwrap();
        assert_eq!(found, Some(newest));
    }

    #[test]
    fn empty_directory_yields_none() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(latest_report(dir.path(), &["xlsx"]).unwrap(), None);
    }

    #[test]
    fn partial_downloads_and_foreign_extensions_are_ignored() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), "report.xlsx.crdownload", 5_000);
        touch(dir.path(), "notes.txt", 4_000);
        let real = touch(dir.path(), "report.xls", 1_000);

        let found = latest_report(dir.path(), REPORT_EXTENSIONS).unwrap();
        assert_eq!(found, Some(real));
    }

    #[test]
    fn extension_match_is_case_insensitive() {
        let dir = tempfile::tempdir().unwrap();
        let file = touch(dir.path(), "REPORT.XLSX", 1_000);
        assert_eq!(latest_report(dir.path(), &["xlsx"]).unwrap(), Some(file));
    }
}
