// src/merge.rs
//
// Consolidation of per-category files into one table.
//
// Every non-empty file in a directory is read, then the tables are folded
// left to right with a full outer join on a fixed key tuple. A non-key column
// present on both sides keeps the left value and falls back to the right one
// only where the left is blank; the right-hand duplicate never reaches the
// output. The fold order therefore decides which file wins a conflict, and it
// comes from `FoldOrder` (sorted by file name unless asked otherwise).

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::config::options::{ExportFormat, FoldOrder};
use crate::csv::{read_table_from_path, write_table_to_path};
use crate::data::{Row, Table, Value};
use crate::error::{Result, ScrapeError};
use crate::file::{list_tabular_files, remove_stale};

/// A table and the file it came from (for error messages).
#[derive(Debug)]
pub struct Source {
    pub path: PathBuf,
    pub table: Table,
}

#[derive(Debug)]
pub struct MergeSummary {
    pub output: PathBuf,
    pub inputs: Vec<PathBuf>,
    pub rows: usize,
    pub columns: usize,
}

/// Merge every `format` file in `dir` into `output` (which is excluded from
/// the inputs and replaced).
pub fn merge_directory(
    dir: &Path,
    output: &Path,
    keys: &[String],
    format: ExportFormat,
    order: FoldOrder,
) -> Result<MergeSummary> {
    let files = list_tabular_files(dir, format.ext(), Some(output), order)?;
    remove_stale(output)?;

    let sources = read_sources(&files, format);
    if sources.is_empty() {
        return Err(ScrapeError::NothingToMerge { dir: dir.to_path_buf(), ext: s!(format.ext()) });
    }
    let inputs: Vec<PathBuf> = sources.iter().map(|s| s.path.clone()).collect();

    let merged = fold(sources, keys)?;
    write_table_to_path(output, &merged, format.delim())?;
    logf!(
        "Merged {} files into {} ({} rows, {} columns)",
        inputs.len(),
        output.display(),
        merged.len(),
        merged.headers.len()
    );

    Ok(MergeSummary {
        output: output.to_path_buf(),
        inputs,
        rows: merged.len(),
        columns: merged.headers.len(),
    })
}

/// Read each file; empty ones are skipped with a warning, unreadable ones
/// with an error log.
pub fn read_sources(files: &[PathBuf], format: ExportFormat) -> Vec<Source> {
    let mut out = Vec::with_capacity(files.len());
    for path in files {
        match read_table_from_path(path, format.delim()) {
            Ok(table) if table.is_empty() => {
                logw!("{} is empty. Skipping.", path.display());
            }
            Ok(table) => {
                logd!("Read {} ({} rows)", path.display(), table.len());
                out.push(Source { path: path.clone(), table });
            }
            Err(e) => loge!("Error reading {}: {e}", path.display()),
        }
    }
    out
}

/// Left fold of `outer_join` over `sources` in the given order.
pub fn fold(sources: Vec<Source>, keys: &[String]) -> Result<Table> {
    let mut iter = sources.into_iter();
    let Some(first) = iter.next() else {
        return Ok(Table::default());
    };
    let first_name = first.path.display().to_string();
    key_positions(&first.table, keys, &first_name)?;

    iter.try_fold(first.table, |acc, next| {
        outer_join(&acc, &next.table, keys, &next.path.display().to_string())
    })
}

/// Full outer join of `left` and `right` on `keys`.
///
/// Output columns: all of `left`, then `right`'s non-key columns that `left`
/// lacks. Rows: each left row (once per matching right row, or once with
/// blanks), then right rows that matched nothing. `right_name` labels errors.
pub fn outer_join(left: &Table, right: &Table, keys: &[String], right_name: &str) -> Result<Table> {
    let lk = key_positions(left, keys, "merged table")?;
    let rk = key_positions(right, keys, right_name)?;

    // right column → output column; shared names land on the left's column
    let mut headers = left.headers.clone();
    let mut plan: Vec<(usize, usize)> = Vec::new();
    for (ri, name) in right.headers.iter().enumerate() {
        if rk.contains(&ri) { continue; }
        let oi = match headers.iter().position(|h| h == name) {
            Some(oi) => oi,
            None => {
                headers.push(name.clone());
                headers.len() - 1
            }
        };
        plan.push((ri, oi));
    }
    let width = headers.len();

    let mut index: HashMap<Vec<Option<String>>, Vec<usize>> = HashMap::new();
    for (i, row) in right.rows.iter().enumerate() {
        index.entry(key_of(row, &rk)).or_default().push(i);
    }

    let mut matched = vec![false; right.rows.len()];
    let mut rows: Vec<Row> = Vec::with_capacity(left.rows.len().max(right.rows.len()));

    for lrow in &left.rows {
        let mut base = lrow.clone();
        base.resize(width, None);

        match index.get(&key_of(lrow, &lk)) {
            Some(hits) => {
                for &ri in hits {
                    matched[ri] = true;
                    let mut row = base.clone();
                    coalesce(&mut row, &right.rows[ri], &plan);
                    rows.push(row);
                }
            }
            None => rows.push(base),
        }
    }

    for (ri, rrow) in right.rows.iter().enumerate() {
        if matched[ri] { continue; }
        let mut row: Row = vec![None; width];
        for (&l, &r) in lk.iter().zip(&rk) {
            row[l] = rrow.get(r).cloned().flatten();
        }
        coalesce(&mut row, rrow, &plan);
        rows.push(row);
    }

    Ok(Table::new(headers, rows))
}

fn key_positions(table: &Table, keys: &[String], name: &str) -> Result<Vec<usize>> {
    keys.iter()
        .map(|k| {
            table.column_index(k).ok_or_else(|| ScrapeError::MissingKeyColumn {
                column: k.clone(),
                table: s!(name),
            })
        })
        .collect()
}

// Blank keys compare equal to each other.
fn key_of(row: &[Option<Value>], positions: &[usize]) -> Vec<Option<String>> {
    positions
        .iter()
        .map(|&i| {
            row.get(i)
                .and_then(|c| c.as_ref())
                .filter(|v| !v.is_blank())
                .map(|v| v.to_string())
        })
        .collect()
}

// Fill blanks in `row` from `right`; never overwrite a present value.
fn coalesce(row: &mut Row, right: &[Option<Value>], plan: &[(usize, usize)]) {
    for &(ri, oi) in plan {
        let present = row[oi].as_ref().is_some_and(|v| !v.is_blank());
        if present { continue; }
        if let Some(Some(v)) = right.get(ri) {
            if !v.is_blank() {
                row[oi] = Some(v.clone());
            }
        }
    }
}
