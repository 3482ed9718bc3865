// src/file.rs

use std::{
    collections::HashMap,
    fs,
    path::{Path, PathBuf},
};

use crate::config::consts::FILE_PREFIX;
use crate::config::options::{ExportFormat, FoldOrder};
use crate::csv::write_table_to_path;
use crate::data::CategoryDataset;
use crate::error::{Result, ScrapeError};

/// `stats_<category>_<suffix>.<ext>`, e.g. `stats_shooting_players.csv`.
pub fn category_file_name(category: &str, suffix: &str, format: ExportFormat) -> String {
    join!(FILE_PREFIX, category, "_", suffix, ".", format.ext())
}

/// Spreadsheet writer: columns are the union of record keys, blanks where a
/// record lacks a key. Any existing file at `path` is replaced.
pub fn write_dataset(path: &Path, dataset: &CategoryDataset, format: ExportFormat) -> Result<PathBuf> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            ensure_directory(parent)?;
        }
    }
    write_table_to_path(path, &dataset.to_table(), format.delim())?;
    logf!("Wrote {} ({} rows)", path.display(), dataset.len());
    Ok(path.to_path_buf())
}

pub fn ensure_directory(dir: &Path) -> Result<()> {
    if dir.exists() && !dir.is_dir() {
        return Err(ScrapeError::Config(format!(
            "Path exists but is not a directory: {}",
            dir.display()
        )));
    }
    if !dir.exists() { fs::create_dir_all(dir)?; }
    Ok(())
}

/// Delete every regular file directly inside `dir`. Subdirectories are left
/// alone. Failures are logged, never returned. Returns how many were removed.
pub fn clear_directory(dir: &Path) -> usize {
    let entries = match fs::read_dir(dir) {
        Ok(e) => e,
        Err(e) => {
            loge!("Error deleting files in {}: {e}", dir.display());
            return 0;
        }
    };

    let mut removed = 0;
    for entry in entries.flatten() {
        let path = entry.path();
        if !path.is_file() { continue; }
        match fs::remove_file(&path) {
            Ok(()) => {
                logf!("Deleted {}", path.display());
                removed += 1;
            }
            Err(e) => loge!("Error deleting {}: {e}", path.display()),
        }
    }
    removed
}

/// Remove a previous output so it is neither read back as input nor left stale.
pub fn remove_stale(path: &Path) -> Result<()> {
    if path.is_file() {
        fs::remove_file(path)?;
        logd!("Removed stale {}", path.display());
    }
    Ok(())
}

/// Files in `dir` with extension `ext`, minus `exclude`.
/// Empty result is `NoInputFiles`.
pub fn list_tabular_files(
    dir: &Path,
    ext: &str,
    exclude: Option<&Path>,
    order: FoldOrder,
) -> Result<Vec<PathBuf>> {
    let excluded_name = exclude.and_then(|p| p.file_name());

    let mut files = Vec::new();
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if !path.is_file() { continue; }
        if path.extension().and_then(|s| s.to_str()) != Some(ext) { continue; }
        if excluded_name.is_some() && path.file_name() == excluded_name { continue; }
        files.push(path);
    }

    if files.is_empty() {
        return Err(ScrapeError::NoInputFiles { dir: dir.to_path_buf(), ext: s!(ext) });
    }
    if order == FoldOrder::Sorted {
        files.sort();
    }
    Ok(files)
}

/// Suffix repeats within one run: `name`, `name (2)`, `name (3)`, ...
/// The result never exceeds `max` characters.
pub fn resolve_unique_name(base: &str, seen: &mut HashMap<String, usize>, max: usize) -> String {
    let count = seen.entry(s!(base)).or_insert(0);
    *count += 1;
    if *count == 1 {
        return s!(base);
    }
    let suffix = format!(" ({count})");
    let keep = max.saturating_sub(suffix.chars().count());
    let stem: String = base.chars().take(keep).collect();
    join!(stem, &suffix)
}
