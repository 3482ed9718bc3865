// tests/pipeline.rs
//
// Whole run against an in-memory page source: scrape → per-category files
// → consolidated players file.
use std::collections::HashMap;
use std::fs;

use stats_scrape::config::options::{AppOptions, Category, StatMode};
use stats_scrape::core::browser::PageSource;
use stats_scrape::csv::read_table_from_path;
use stats_scrape::data::Value;
use stats_scrape::error::{Result, ScrapeError};
use stats_scrape::progress::Progress;
use stats_scrape::runner;

struct MemorySource {
    pages: HashMap<String, String>,
    visited: Vec<String>,
}

impl PageSource for MemorySource {
    fn fetch(&mut self, url: &str) -> Result<String> {
        self.visited.push(url.to_string());
        self.pages
            .get(url)
            .cloned()
            .ok_or_else(|| ScrapeError::BrowserLaunch(format!("navigation failed: {url}")))
    }
}

#[derive(Default)]
struct Recorder {
    total: usize,
    done: Vec<String>,
    finished: bool,
}

impl Progress for Recorder {
    fn begin(&mut self, total: usize) { self.total = total; }
    fn item_done(&mut self, category: &str, _path: &std::path::Path) { self.done.push(category.to_string()); }
    fn finish(&mut self) { self.finished = true; }
}

fn player_row(i: usize, name: &str, team: &str, stat: &str, value: &str) -> String {
    format!(
        "<tr data-row=\"{i}\"><th data-stat=\"ranker\">{i}</th>\
         <td data-stat=\"player\"><a href=\"/p/{i}\">{name}</a></td>\
         <td data-stat=\"team\"><a href=\"/t\">{team}</a></td>\
         <td data-stat=\"{stat}\">{value}</td></tr>"
    )
}

fn page(first: &str, second: &str) -> String {
    format!(
        "<html><body><table><tbody>{first}</tbody></table>\
         <table><tbody>{second}</tbody></table></body></html>"
    )
}

fn options(out: &std::path::Path) -> AppOptions {
    let mut opts = AppOptions::default();
    opts.export.out_dir = out.to_path_buf();
    opts.scrape.categories = vec![
        Category::new("shooting", "mem://shooting"),
        Category::new("playing_time", "mem://playing_time"),
    ];
    opts.merge.keys = vec!["player".into(), "team".into()];
    opts
}

fn source() -> MemorySource {
    let shooting_rows = [
        player_row(0, "A", "X", "goals", "3"),
        player_row(1, "B", "Y", "goals", "1"),
    ]
    .concat();
    let minutes_rows = [
        player_row(0, "A", "X", "minutes", "1.234"),
        player_row(1, "C", "Z", "minutes", "90"),
    ]
    .concat();

    let mut pages = HashMap::new();
    pages.insert("mem://shooting".to_string(), page("<tr data-row=\"0\"><td>squads</td></tr>", &shooting_rows));
    pages.insert("mem://playing_time".to_string(), page(&minutes_rows, ""));
    MemorySource { pages, visited: Vec::new() }
}

#[test]
fn scrape_then_merge_players() {
    let dir = tempfile::tempdir().unwrap();
    let opts = options(dir.path());
    let players_dir = opts.export.players_dir();
    fs::create_dir_all(&players_dir).unwrap();
    fs::write(players_dir.join("stale.csv"), "player,team\nOld,Q\n").unwrap();

    let mut src = source();
    let mut rec = Recorder::default();
    let summary = runner::run(&opts, Some(&mut src), Some(&mut rec)).unwrap();

    assert_eq!(src.visited, vec!["mem://shooting", "mem://playing_time"]);
    assert_eq!(rec.total, 2);
    assert_eq!(rec.done, vec!["shooting", "playing_time"]);
    assert!(rec.finished);

    assert_eq!(summary.files_written.len(), 2);
    assert!(players_dir.join("stats_shooting_players.csv").is_file());
    assert!(players_dir.join("stats_playing_time_players.csv").is_file());
    assert!(!players_dir.join("stale.csv").exists());

    let merged_path = summary.merged.unwrap();
    assert_eq!(merged_path, opts.export.merged_players_path());
    let merged = read_table_from_path(&merged_path, b',').unwrap();
    assert_eq!(merged.headers, vec!["player", "team", "minutes", "goals"]);
    assert_eq!(merged.len(), 3);

    // playing_time sorts before shooting, so its rows lead
    assert_eq!(merged.cell(0, "player"), Some(&Value::from("A")));
    assert_eq!(merged.cell(0, "minutes"), Some(&Value::from(1.234)));
    assert_eq!(merged.cell(0, "goals"), Some(&Value::from(3.0)));
    assert_eq!(merged.cell(1, "player"), Some(&Value::from("C")));
    assert_eq!(merged.cell(1, "goals"), None);
    assert_eq!(merged.cell(2, "player"), Some(&Value::from("B")));
    assert_eq!(merged.cell(2, "minutes"), None);
}

#[test]
fn navigation_failure_stops_run_but_keeps_written_files() {
    let dir = tempfile::tempdir().unwrap();
    let mut opts = options(dir.path());
    opts.scrape.categories.push(Category::new("misc", "mem://missing"));

    let mut src = source();
    let err = runner::run(&opts, Some(&mut src), None).unwrap_err();
    assert!(err.to_string().contains("mem://missing"));

    let players_dir = opts.export.players_dir();
    assert!(players_dir.join("stats_shooting_players.csv").is_file());
    assert!(!opts.export.merged_players_path().exists());
}

#[test]
fn teams_mode_writes_two_files_per_page() {
    let dir = tempfile::tempdir().unwrap();
    let mut opts = options(dir.path());
    opts.scrape.mode = StatMode::Teams;
    opts.scrape.categories = vec![Category::new("standard", "mem://squads")];
    opts.merge.concat_teams = true;

    let teams = "<tr data-row=\"0\"><th data-stat=\"team\"><a href=\"/a\">Alpha</a></th><td data-stat=\"poss\">55,5</td></tr>";
    let versus = "<tr data-row=\"0\"><th data-stat=\"team\"><a href=\"/a\">vs Alpha</a></th><td data-stat=\"poss\">44,5</td></tr>";
    let mut pages = HashMap::new();
    pages.insert("mem://squads".to_string(), page(teams, versus));
    let mut src = MemorySource { pages, visited: Vec::new() };

    let summary = runner::run(&opts, Some(&mut src), None).unwrap();
    let teams_dir = opts.export.teams_dir();
    assert_eq!(summary.files_written, vec![
        teams_dir.join("stats_standard_teams.csv"),
        teams_dir.join("stats_standard_teams_vs.csv"),
    ]);
    assert!(summary.merged.is_none());
    assert_eq!(summary.workbook, Some(opts.export.teams_workbook_path()));
    assert!(opts.export.teams_workbook_path().is_file());

    let vs = read_table_from_path(&teams_dir.join("stats_standard_teams_vs.csv"), b',').unwrap();
    assert_eq!(vs.cell(0, "team"), Some(&Value::from("vs Alpha")));
    assert_eq!(vs.cell(0, "poss"), Some(&Value::from(44.5)));
}

#[test]
fn skip_scrape_merges_existing_files() {
    let dir = tempfile::tempdir().unwrap();
    let mut opts = options(dir.path());
    opts.scrape.enabled = false;

    let players_dir = opts.export.players_dir();
    fs::create_dir_all(&players_dir).unwrap();
    fs::write(players_dir.join("stats_shooting_players.csv"), "player,team,goals\nA,X,3\n").unwrap();
    fs::write(players_dir.join("stats_passing_players.csv"), "player,team,assists\nA,X,1\n").unwrap();

    let summary = runner::run(&opts, None, None).unwrap();
    assert!(summary.files_written.is_empty());
    let merged = read_table_from_path(&summary.merged.unwrap(), b',').unwrap();
    assert_eq!(merged.len(), 1);
    assert_eq!(merged.cell(0, "goals"), Some(&Value::from(3.0)));
    assert_eq!(merged.cell(0, "assists"), Some(&Value::from(1.0)));
}

#[test]
fn post_processing_runs_without_a_browser_when_scrape_is_off() {
    let dir = tempfile::tempdir().unwrap();
    let mut opts = options(dir.path());
    opts.scrape.enabled = false;
    opts.scrape.mode = StatMode::Both;
    opts.merge.concat_teams = true;

    let players_dir = opts.export.players_dir();
    let teams_dir = opts.export.teams_dir();
    fs::create_dir_all(&players_dir).unwrap();
    fs::create_dir_all(&teams_dir).unwrap();
    fs::write(players_dir.join("stats_shooting_players.csv"), "player,team,goals\nA,X,3\n").unwrap();
    fs::write(teams_dir.join("stats_misc_teams.csv"), "team,fouls\n").unwrap();

    let mut rec = Recorder::default();
    let summary = runner::run_with_browser(&opts, Some(&mut rec)).unwrap();
    assert!(summary.files_written.is_empty());
    assert_eq!(summary.merged, Some(opts.export.merged_players_path()));
    assert_eq!(summary.workbook, None);
    assert!(!opts.export.teams_workbook_path().exists());
    assert!(rec.finished);
}
