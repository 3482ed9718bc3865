// src/runner.rs
use std::path::PathBuf;

use crate::{
    config::options::{AppOptions, Category},
    core::browser::{ChromeSession, PageSource},
    error::{Result, ScrapeError},
    file::{self, category_file_name, ensure_directory, write_dataset},
    merge::{self, MergeSummary},
    progress::{Progress, reborrow},
    specs::{players, teams},
    workbook,
};

const PLAYERS_SUFFIX: &str = "players";

/// What a run produced.
#[derive(Debug, Default)]
pub struct RunSummary {
    pub files_written: Vec<PathBuf>,
    pub merged: Option<PathBuf>,
    pub workbook: Option<PathBuf>,
}

/// Full run with a real browser. The browser is only launched when there is
/// something to scrape, and it is closed (on success and on error alike)
/// before any merging or concatenation starts.
pub fn run_with_browser(
    opts: &AppOptions,
    mut progress: Option<&mut dyn Progress>,
) -> Result<RunSummary> {
    let mut summary = RunSummary::default();

    if opts.scrape.enabled && !opts.scrape.categories.is_empty() {
        let mut session = ChromeSession::launch(&opts.browser)?;
        let scraped = scrape_all(opts, &mut session, reborrow(&mut progress));
        let closed = session.close();
        summary.files_written = scraped?;
        closed?;
    }

    post_process(opts, summary, progress)
}

/// Pipeline over any page source. `source` may be `None` only when scraping
/// is disabled.
pub fn run(
    opts: &AppOptions,
    source: Option<&mut dyn PageSource>,
    mut progress: Option<&mut dyn Progress>,
) -> Result<RunSummary> {
    let mut summary = RunSummary::default();

    if opts.scrape.enabled {
        if let Some(source) = source {
            summary.files_written = scrape_all(opts, source, reborrow(&mut progress))?;
        } else if !opts.scrape.categories.is_empty() {
            return Err(ScrapeError::Config(s!(
                "scraping enabled but no page source available"
            )));
        }
    }

    post_process(opts, summary, progress)
}

// Merge players and/or concatenate teams from whatever is on disk.
fn post_process(
    opts: &AppOptions,
    mut summary: RunSummary,
    mut progress: Option<&mut dyn Progress>,
) -> Result<RunSummary> {
    if opts.merge.merge_players && opts.scrape.mode.players() {
        let out = merge_players(opts)?;
        if let Some(p) = reborrow(&mut progress) {
            p.log(&format!("Merged {} files → {}", out.inputs.len(), out.output.display()));
        }
        summary.merged = Some(out.output);
    }

    if opts.merge.concat_teams && opts.scrape.mode.teams() {
        let path = opts.export.teams_workbook_path();
        let sheets = workbook::concatenate_directory(
            &opts.export.teams_dir(),
            &path,
            opts.export.format,
            opts.merge.fold_order,
        )?;
        if let Some(p) = reborrow(&mut progress) {
            p.log(&format!("Workbook {} ({} sheets)", path.display(), sheets.len()));
        }
        if !sheets.is_empty() {
            summary.workbook = Some(path);
        }
    }

    if let Some(p) = progress {
        p.finish();
    }
    Ok(summary)
}

/// Visit every category once, in order, writing its files as it goes.
/// The first failure stops the run; files already written stay.
pub fn scrape_all(
    opts: &AppOptions,
    source: &mut dyn PageSource,
    mut progress: Option<&mut dyn Progress>,
) -> Result<Vec<PathBuf>> {
    let mode = opts.scrape.mode;
    let players_dir = opts.export.players_dir();
    let teams_dir = opts.export.teams_dir();

    if mode.players() { ensure_directory(&players_dir)?; }
    if mode.teams() { ensure_directory(&teams_dir)?; }

    if opts.scrape.clear_output {
        if mode.players() { file::clear_directory(&players_dir); }
        if mode.teams() { file::clear_directory(&teams_dir); }
    }

    let per_page = usize::from(mode.players()) + 2 * usize::from(mode.teams());
    if let Some(p) = reborrow(&mut progress) {
        p.begin(opts.scrape.categories.len() * per_page);
    }

    let mut written = Vec::new();
    for cat in &opts.scrape.categories {
        let html = source.fetch(&cat.url)?;
        written.extend(scrape_page(opts, cat, &html, reborrow(&mut progress))?);
    }
    Ok(written)
}

/// Extract and write one already-rendered page according to the stat mode.
pub fn scrape_page(
    opts: &AppOptions,
    cat: &Category,
    html: &str,
    mut progress: Option<&mut dyn Progress>,
) -> Result<Vec<PathBuf>> {
    let format = opts.export.format;
    let mut written = Vec::new();

    if opts.scrape.mode.teams() {
        let tables = teams::extract(html, &cat.name, opts.scrape.versus_naming)?;
        let dir = opts.export.teams_dir();
        for (suffix, ds) in [(teams::TEAMS_SUFFIX, &tables.teams), (teams::VERSUS_SUFFIX, &tables.versus)] {
            let path = write_dataset(&dir.join(category_file_name(&cat.name, suffix, format)), ds, format)?;
            if let Some(p) = reborrow(&mut progress) { p.item_done(&cat.name, &path); }
            written.push(path);
        }
    }

    if opts.scrape.mode.players() {
        let ds = players::extract(html, &cat.name)?;
        let dir = opts.export.players_dir();
        let path = write_dataset(&dir.join(category_file_name(&cat.name, PLAYERS_SUFFIX, format)), &ds, format)?;
        if let Some(p) = reborrow(&mut progress) { p.item_done(&cat.name, &path); }
        written.push(path);
    }

    Ok(written)
}

/// Merge the players directory into the consolidated players file.
pub fn merge_players(opts: &AppOptions) -> Result<MergeSummary> {
    merge::merge_directory(
        &opts.export.players_dir(),
        &opts.export.merged_players_path(),
        &opts.merge.keys,
        opts.export.format,
        opts.merge.fold_order,
    )
}
