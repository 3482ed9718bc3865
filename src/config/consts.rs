// src/config/consts.rs

// Stat pages (Big 5 European leagues, player tables)
const BASE_URL: &str = "https://fbref.com/pt/comps/Big5";
const URL_SUFFIX: &str = "players/Big-5-European-Leagues-Stats";

/// (category, path segment) in scrape order.
pub const DEFAULT_CATEGORIES: &[(&str, &str)] = &[
    ("standard", "stats"),
    ("keeper", "keepers"),
    ("keeper_adv", "keepersadv"),
    ("shooting", "shooting"),
    ("passing", "passing"),
    ("passing_types", "passing_types"),
    ("gca", "gca"),
    ("defense", "defense"),
    ("possession", "possession"),
    ("misc", "misc"),
    ("playing_time", "playingtime"),
];

pub fn category_url(segment: &str) -> String {
    format!("{BASE_URL}/{segment}/{URL_SUFFIX}")
}

// Page layout
/// The one player category whose stats table is the first `<tbody>` on the page.
pub const FIRST_BODY_CATEGORY: &str = "playing_time";
pub const ROW_MARKER_ATTR: &str = "data-row";
pub const STAT_ATTR: &str = "data-stat";
pub const PLAYER_KEY: &str = "player";
pub const TEAM_KEY: &str = "team";

// Browser
pub const SETTLE_MS: u64 = 3_000;

// Export
pub const DEFAULT_OUT_DIR: &str = "out";
pub const PLAYERS_SUBDIR: &str = "players";
pub const TEAMS_SUBDIR: &str = "teams";
pub const FILE_PREFIX: &str = "stats_";
pub const MERGED_PLAYERS_STEM: &str = "all_stats_players";
pub const TEAMS_WORKBOOK: &str = "all_stats_teams.xlsx";

// Merge
pub const MERGE_KEYS: &[&str] = &[
    "player",
    "nationality",
    "position",
    "team",
    "comp_level",
    "age",
    "birth_year",
    "minutes_90s",
];

// Workbook
pub const SHEET_NAME_MAX: usize = 31;
