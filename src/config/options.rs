// src/config/options.rs
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;

use super::consts::*;
use crate::error::{Result, ScrapeError};

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AppOptions {
    pub scrape: ScrapeOptions,
    pub browser: BrowserOptions,
    pub export: ExportOptions,
    pub merge: MergeOptions,
}

/// Which tables each category page is read for.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StatMode {
    Players,
    Teams,
    Both,
}

impl StatMode {
    pub fn players(self) -> bool { matches!(self, StatMode::Players | StatMode::Both) }
    pub fn teams(self) -> bool { matches!(self, StatMode::Teams | StatMode::Both) }
}

/// How names are read from the teams-vs-opponents table.
///
/// `StaleFallback` keeps the long-standing output: the anchor-or-text
/// decision for every vs row is taken from the *last row of the primary teams
/// table*, not from the vs row itself. When that cell had no link, every vs
/// row is named with the primary cell's text. `PerRow` decides per vs row.
/// On pages where all team cells are links, both produce the same records.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum VersusNaming {
    #[default]
    StaleFallback,
    PerRow,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct Category {
    pub name: String,
    pub url: String,
}

impl Category {
    pub fn new(name: &str, url: &str) -> Self {
        Self { name: s!(name), url: s!(url) }
    }
}

pub fn default_categories() -> Vec<Category> {
    DEFAULT_CATEGORIES
        .iter()
        .map(|(name, segment)| Category::new(name, &category_url(segment)))
        .collect()
}

/// Read a `[{"name": "...", "url": "..."}, ...]` file. Order is scrape order.
pub fn load_categories(path: &Path) -> Result<Vec<Category>> {
    let text = std::fs::read_to_string(path)?;
    let cats: Vec<Category> = serde_json::from_str(&text)?;
    if cats.is_empty() {
        return Err(ScrapeError::Config(format!("{} lists no categories", path.display())));
    }
    Ok(cats)
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScrapeOptions {
    /// false: skip the browser entirely and only post-process existing files.
    pub enabled: bool,
    pub mode: StatMode,
    pub categories: Vec<Category>,
    /// Delete files in the output directories before scraping.
    pub clear_output: bool,
    pub versus_naming: VersusNaming,
}

impl Default for ScrapeOptions {
    fn default() -> Self {
        Self {
            enabled: true,
            mode: StatMode::Players,
            categories: default_categories(),
            clear_output: true,
            versus_naming: VersusNaming::default(),
        }
    }
}

impl ScrapeOptions {
    /// Keep only the named categories, in their configured order.
    pub fn retain_categories(&mut self, names: &[String]) -> Result<()> {
        for n in names {
            if !self.categories.iter().any(|c| &c.name == n) {
                return Err(ScrapeError::Config(format!("unknown category: {n}")));
            }
        }
        self.categories.retain(|c| names.contains(&c.name));
        Ok(())
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BrowserOptions {
    pub headless: bool,
    pub no_sandbox: bool,
    pub chrome_path: Option<PathBuf>,
    /// Wait after navigation for client-side rendering.
    pub settle: Duration,
}

impl Default for BrowserOptions {
    fn default() -> Self {
        Self {
            headless: true,
            no_sandbox: false,
            chrome_path: None,
            settle: Duration::from_millis(SETTLE_MS),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ExportFormat {
    Csv,
    Tsv,
}

impl ExportFormat {
    pub fn ext(&self) -> &'static str {
        match self { ExportFormat::Csv => "csv", ExportFormat::Tsv => "tsv" }
    }
    pub fn delim(&self) -> u8 {
        match self { ExportFormat::Csv => b',', ExportFormat::Tsv => b'\t' }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExportOptions {
    pub format: ExportFormat,
    pub out_dir: PathBuf,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            format: ExportFormat::Csv,
            out_dir: PathBuf::from(DEFAULT_OUT_DIR),
        }
    }
}

impl ExportOptions {
    pub fn players_dir(&self) -> PathBuf { self.out_dir.join(PLAYERS_SUBDIR) }
    pub fn teams_dir(&self) -> PathBuf { self.out_dir.join(TEAMS_SUBDIR) }

    pub fn merged_players_path(&self) -> PathBuf {
        self.players_dir().join(join!(MERGED_PLAYERS_STEM, ".", self.format.ext()))
    }

    pub fn teams_workbook_path(&self) -> PathBuf {
        self.teams_dir().join(TEAMS_WORKBOOK)
    }
}

/// Order in which directory files are fed to the merge fold and the workbook.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum FoldOrder {
    /// By file name; identical on every platform.
    #[default]
    Sorted,
    /// Whatever the OS directory listing returns.
    Listing,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MergeOptions {
    pub merge_players: bool,
    pub concat_teams: bool,
    pub keys: Vec<String>,
    pub fold_order: FoldOrder,
}

impl Default for MergeOptions {
    fn default() -> Self {
        Self {
            merge_players: true,
            concat_teams: false,
            keys: MERGE_KEYS.iter().map(|k| s!(*k)).collect(),
            fold_order: FoldOrder::default(),
        }
    }
}
