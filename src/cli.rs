// src/cli.rs
use std::path::PathBuf;
use std::time::Duration;

use clap::{Parser, ValueEnum};
use color_eyre::eyre::{Result, WrapErr};

use crate::config::options::{
    AppOptions, ExportFormat, FoldOrder, StatMode, VersusNaming, load_categories,
};
use crate::progress::LogProgress;

#[derive(Parser, Debug)]
#[command(name = "stats_scrape", version)]
#[command(about = "Scrape stat tables with a headless browser, write one file per category, merge them")]
pub struct Cli {
    /// Output root; files go to <out>/players and <out>/teams
    #[arg(short, long, default_value = crate::config::consts::DEFAULT_OUT_DIR)]
    pub out: PathBuf,

    /// Category file format
    #[arg(long, value_enum, default_value_t = FormatArg::Csv)]
    pub format: FormatArg,

    /// Which tables to read from each page
    #[arg(long, value_enum, default_value_t = ModeArg::Players)]
    pub mode: ModeArg,

    /// Only these categories (comma separated), in configured order
    #[arg(long, value_delimiter = ',')]
    pub only: Vec<String>,

    /// JSON file with [{"name": .., "url": ..}] replacing the built-in list
    #[arg(long)]
    pub categories: Option<PathBuf>,

    /// Milliseconds to wait after navigation for rendering
    #[arg(long, default_value_t = crate::config::consts::SETTLE_MS)]
    pub settle_ms: u64,

    /// Show the browser window
    #[arg(long)]
    pub headed: bool,

    /// Launch Chromium with --no-sandbox (containers)
    #[arg(long)]
    pub no_sandbox: bool,

    /// Chromium/Chrome executable
    #[arg(long)]
    pub chrome: Option<PathBuf>,

    /// Do not delete existing files in the output directories first
    #[arg(long)]
    pub keep_existing: bool,

    /// Skip the browser; only merge/concatenate files already on disk
    #[arg(long)]
    pub skip_scrape: bool,

    /// Do not build the consolidated players file
    #[arg(long)]
    pub no_merge: bool,

    /// Also copy each team file into a sheet of one .xlsx workbook
    #[arg(long)]
    pub concat_teams: bool,

    /// Order files are folded in
    #[arg(long, value_enum, default_value_t = FoldArg::Sorted)]
    pub fold_order: FoldArg,

    /// Name vs-table rows from their own cell instead of the historic fallback
    #[arg(long)]
    pub fix_versus_names: bool,

    /// Print the configured categories and exit
    #[arg(long)]
    pub list_categories: bool,

    /// Debug logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Append logs to this file instead of stderr
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum FormatArg { Csv, Tsv }

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ModeArg { Players, Teams, Both }

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum FoldArg { Sorted, Listing }

impl Cli {
    /// Translate flags into run options (reads the categories file if given).
    pub fn to_options(&self) -> crate::error::Result<AppOptions> {
        let mut opts = AppOptions::default();

        if let Some(path) = &self.categories {
            opts.scrape.categories = load_categories(path)?;
        }
        if !self.only.is_empty() {
            opts.scrape.retain_categories(&self.only)?;
        }
        opts.scrape.enabled = !self.skip_scrape;
        opts.scrape.clear_output = !self.keep_existing;
        opts.scrape.mode = match self.mode {
            ModeArg::Players => StatMode::Players,
            ModeArg::Teams => StatMode::Teams,
            ModeArg::Both => StatMode::Both,
        };
        if self.fix_versus_names {
            opts.scrape.versus_naming = VersusNaming::PerRow;
        }

        opts.browser.headless = !self.headed;
        opts.browser.no_sandbox = self.no_sandbox;
        opts.browser.chrome_path = self.chrome.clone();
        opts.browser.settle = Duration::from_millis(self.settle_ms);

        opts.export.out_dir = self.out.clone();
        opts.export.format = match self.format {
            FormatArg::Csv => ExportFormat::Csv,
            FormatArg::Tsv => ExportFormat::Tsv,
        };

        opts.merge.merge_players = !self.no_merge;
        opts.merge.concat_teams = self.concat_teams;
        opts.merge.fold_order = match self.fold_order {
            FoldArg::Sorted => FoldOrder::Sorted,
            FoldArg::Listing => FoldOrder::Listing,
        };

        Ok(opts)
    }
}

pub fn run() -> Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();

    crate::log::init(cli.verbose, cli.log_file.as_deref()).wrap_err("initializing logging")?;
    let opts = cli.to_options().wrap_err("building options")?;

    if cli.list_categories {
        for cat in &opts.scrape.categories {
            println!("{},{}", cat.name, cat.url);
        }
        return Ok(());
    }

    let mut progress = LogProgress::default();
    let summary = crate::runner::run_with_browser(&opts, Some(&mut progress))
        .inspect_err(|e| loge!("Run failed: {e}"))?;

    if let Some(p) = &summary.merged {
        println!("Wrote {}", p.display());
    }
    if let Some(p) = &summary.workbook {
        println!("Wrote {}", p.display());
    }
    Ok(())
}
