// src/workbook.rs
//
// Concatenation mode: instead of joining rows, copy every category file into
// its own sheet of one `.xlsx` workbook.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use rust_xlsxwriter::{Workbook, Worksheet};

use crate::config::consts::SHEET_NAME_MAX;
use crate::config::options::{ExportFormat, FoldOrder};
use crate::core::sanitize::sheet_name_for;
use crate::data::{Table, Value};
use crate::error::Result;
use crate::file::{list_tabular_files, remove_stale, resolve_unique_name};
use crate::merge::read_sources;

#[derive(Debug)]
pub struct SheetPlan {
    pub name: String,
    pub source: PathBuf,
    pub table: Table,
}

/// One sheet per non-empty, readable `format` file in `dir`.
/// Sheet names come from file stems and are made unique within the workbook.
pub fn plan_sheets(
    dir: &Path,
    output: Option<&Path>,
    format: ExportFormat,
    order: FoldOrder,
) -> Result<Vec<SheetPlan>> {
    let files = list_tabular_files(dir, format.ext(), output, order)?;

    let mut seen: HashMap<String, usize> = HashMap::new();
    let plans = read_sources(&files, format)
        .into_iter()
        .map(|src| {
            let stem = src.path.file_stem().map(|s| s.to_string_lossy().into_owned()).unwrap_or_default();
            let name = resolve_unique_name(&sheet_name_for(&stem), &mut seen, SHEET_NAME_MAX);
            SheetPlan { name, source: src.path, table: src.table }
        })
        .collect();
    Ok(plans)
}

/// Write the planned sheets to `path`, replacing any existing workbook.
pub fn write_workbook(path: &Path, sheets: &[SheetPlan]) -> Result<()> {
    let mut workbook = Workbook::new();
    for plan in sheets {
        let sheet = workbook.add_worksheet();
        sheet.set_name(&plan.name)?;
        fill_sheet(sheet, &plan.table)?;
        logf!("Added sheet {} from {}", plan.name, plan.source.display());
    }
    remove_stale(path)?;
    workbook.save(path)?;
    Ok(())
}

/// `plan_sheets` + `write_workbook`. Returns the sheet names written.
/// With no non-empty input there is no workbook: a stale one is removed and
/// nothing is written.
pub fn concatenate_directory(
    dir: &Path,
    output: &Path,
    format: ExportFormat,
    order: FoldOrder,
) -> Result<Vec<String>> {
    let plans = plan_sheets(dir, Some(output), format, order)?;
    if plans.is_empty() {
        remove_stale(output)?;
        logw!("Every {} file in {} is empty. No workbook written.", format.ext(), dir.display());
        return Ok(Vec::new());
    }
    write_workbook(output, &plans)?;
    logf!("Wrote {} ({} sheets)", output.display(), plans.len());
    Ok(plans.into_iter().map(|p| p.name).collect())
}

fn fill_sheet(sheet: &mut Worksheet, table: &Table) -> Result<()> {
    for (col, header) in table.headers.iter().enumerate() {
        sheet.write_string(0, col as u16, header)?;
    }
    for (r, row) in table.rows.iter().enumerate() {
        let xr = (r + 1) as u32;
        for (col, cell) in row.iter().enumerate() {
            match cell {
                Some(Value::Number(n)) => { sheet.write_number(xr, col as u16, *n)?; }
                Some(Value::Text(t)) => { sheet.write_string(xr, col as u16, t)?; }
                None => {}
            }
        }
    }
    Ok(())
}
