// src/specs/teams.rs
//! Scraping *spec* for squad stat pages.
//!
//! Layout:
//! - 1st `<tbody>`: squads ("teams"), 2nd `<tbody>`: squads vs opponents.
//! - Entity cell is `th[data-stat=team]`, preferably its link text.
//! - Every `td` contributes `data-stat → value`.
//!
//! A marked data row without a team cell means the page layout changed; that
//! is a parse error, not a skipped row.
//!
//! Vs-table naming: see `VersusNaming`. The default reproduces the historic
//! output, which decides "link or text" from the last primary-table cell
//! rather than from the vs row. Its real-world effect is unverified, so it
//! is kept as the default and the per-row reading is opt-in.

use scraper::{ElementRef, Html};

use crate::config::consts::TEAM_KEY;
use crate::config::options::VersusNaming;
use crate::core::html::{self, CellTag};
use crate::data::{CategoryDataset, Record, Value};
use crate::error::{Result, ScrapeError};

pub const TEAMS_SUFFIX: &str = "teams";
pub const VERSUS_SUFFIX: &str = "teams_vs";

#[derive(Debug)]
pub struct TeamTables {
    pub teams: CategoryDataset,
    pub versus: CategoryDataset,
}

/// What the primary loop leaves behind for the vs loop to (mis)use.
struct LastTeamCell {
    had_link: bool,
    text: String,
}

pub fn extract(doc: &str, category: &str, naming: VersusNaming) -> Result<TeamTables> {
    let document = Html::parse_document(doc);

    let teams_ctx = format!("{category} team stats");
    let versus_ctx = format!("{category} team vs stats");

    let (teams, last) = read_primary(&document, &teams_ctx).inspect_err(|e| {
        loge!("Error parsing team stats: {e}");
    })?;
    logf!("Found {} teams in {category} stats.", teams.len());

    let versus = read_versus(&document, &versus_ctx, naming, last.as_ref()).inspect_err(|e| {
        loge!("Error parsing team vs stats: {e}");
    })?;
    logf!("Found {} teams in {category} vs stats.", versus.len());

    Ok(TeamTables {
        teams: CategoryDataset::new(category, teams),
        versus: CategoryDataset::new(category, versus),
    })
}

fn read_primary(doc: &Html, context: &str) -> Result<(Vec<Record>, Option<LastTeamCell>)> {
    let body = html::body_at(doc, 0, context)?;

    let mut records = Vec::new();
    let mut last = None;
    for row in html::data_rows(body) {
        let cell = team_cell(row, context)?;
        let mut rec = Record::new();
        rec.insert(TEAM_KEY, Value::Text(html::link_or_text(cell)));
        push_stats(&mut rec, row);
        records.push(rec);

        last = Some(LastTeamCell { had_link: html::has_anchor(cell), text: html::text_of(cell) });
    }
    Ok((records, last))
}

fn read_versus(
    doc: &Html,
    context: &str,
    naming: VersusNaming,
    last: Option<&LastTeamCell>,
) -> Result<Vec<Record>> {
    let body = html::body_at(doc, 1, context)?;

    let mut records = Vec::new();
    for row in html::data_rows(body) {
        let cell = team_cell(row, context)?;
        let name = match naming {
            VersusNaming::PerRow => html::link_or_text(cell),
            VersusNaming::StaleFallback => stale_name(cell, last, context)?,
        };

        let mut rec = Record::new();
        rec.insert(TEAM_KEY, Value::Text(name));
        push_stats(&mut rec, row);
        records.push(rec);
    }
    Ok(records)
}

// If the last primary cell had a link, read this row's link (and fail if it
// has none); otherwise every vs row gets the last primary cell's text.
fn stale_name(cell: ElementRef<'_>, last: Option<&LastTeamCell>, context: &str) -> Result<String> {
    let last = last.ok_or_else(|| {
        ScrapeError::parse(context, "teams table has no rows to take the name fallback from")
    })?;
    if last.had_link {
        html::anchor_text(cell)
            .ok_or_else(|| ScrapeError::parse(context, "team cell has no link"))
    } else {
        Ok(last.text.clone())
    }
}

fn team_cell<'a>(row: ElementRef<'a>, context: &str) -> Result<ElementRef<'a>> {
    html::find_cell(row, CellTag::Th, TEAM_KEY)
        .ok_or_else(|| ScrapeError::parse(context, "data row without a team cell"))
}

fn push_stats(rec: &mut Record, row: ElementRef<'_>) {
    for cell in html::data_cells(row) {
        if let Some(key) = html::stat_of(cell) {
            rec.insert(key, Value::from_cell(&html::text_of(cell)));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page(teams: &str, versus: &str) -> String {
        format!(
            "<html><body>\
             <table><tbody>{teams}</tbody></table>\
             <table><tbody>{versus}</tbody></table>\
             </body></html>"
        )
    }

    fn row(i: usize, team_cell: &str, poss: &str) -> String {
        format!(
            "<tr data-row=\"{i}\"><th data-stat=\"team\">{team_cell}</th>\
             <td data-stat=\"players_used\">25</td><td data-stat=\"possession\">{poss}</td></tr>"
        )
    }

    fn names(ds: &CategoryDataset) -> Vec<String> {
        ds.records.iter().map(|r| r.get(TEAM_KEY).unwrap().to_string()).collect()
    }

    #[test]
    fn linked_pages_read_the_same_either_way() {
        let teams = [row(0, "<a href=\"/a\">Arsenal</a>", "55,2"), row(1, "<a href=\"/b\">Brentford</a>", "44")].concat();
        let versus = [row(0, "<a href=\"/a\">vs Arsenal</a>", "44,8"), row(1, "<a href=\"/b\">vs Brentford</a>", "56")].concat();
        let doc = page(&teams, &versus);

        for naming in [VersusNaming::StaleFallback, VersusNaming::PerRow] {
            let t = extract(&doc, "standard", naming).unwrap();
            assert_eq!(names(&t.teams), vec!["Arsenal", "Brentford"]);
            assert_eq!(names(&t.versus), vec!["vs Arsenal", "vs Brentford"]);
            assert_eq!(t.teams.records[0].get("possession"), Some(&Value::from(55.2)));
            assert_eq!(t.versus.records[0].get("possession"), Some(&Value::from(44.8)));
            assert_eq!(t.versus.records[1].get("players_used"), Some(&Value::from(25.0)));
        }
    }

    #[test]
    fn unlinked_name_falls_back_to_cell_text() {
        let doc = page(&row(0, " Team B ", "50"), &row(0, "vs Team B", "50"));
        let t = extract(&doc, "standard", VersusNaming::PerRow).unwrap();
        assert_eq!(names(&t.teams), vec!["Team B"]);
        assert_eq!(names(&t.versus), vec!["vs Team B"]);
    }

    #[test]
    fn stale_fallback_repeats_last_primary_text() {
        let teams = [row(0, "<a href=\"/a\">Alpha</a>", "50"), row(1, "Omega", "50")].concat();
        let versus = [row(0, "<a href=\"/a\">vs Alpha</a>", "50"), row(1, "vs Omega", "50")].concat();
        let doc = page(&teams, &versus);

        let stale = extract(&doc, "standard", VersusNaming::StaleFallback).unwrap();
        assert_eq!(names(&stale.versus), vec!["Omega", "Omega"]);

        let fixed = extract(&doc, "standard", VersusNaming::PerRow).unwrap();
        assert_eq!(names(&fixed.versus), vec!["vs Alpha", "vs Omega"]);
    }

    #[test]
    fn stale_fallback_fails_on_unlinked_vs_row() {
        let doc = page(&row(0, "<a href=\"/a\">Alpha</a>", "50"), &row(0, "vs Alpha", "50"));
        let err = extract(&doc, "standard", VersusNaming::StaleFallback).unwrap_err();
        assert!(err.to_string().contains("no link"));
    }

    #[test]
    fn stale_fallback_needs_a_primary_row() {
        let doc = page("", &row(0, "<a href=\"/a\">vs Alpha</a>", "50"));
        assert!(extract(&doc, "standard", VersusNaming::StaleFallback).is_err());
        let t = extract(&doc, "standard", VersusNaming::PerRow).unwrap();
        assert!(t.teams.is_empty());
        assert_eq!(names(&t.versus), vec!["vs Alpha"]);
    }

    #[test]
    fn data_row_without_team_cell_is_fatal() {
        let bad = "<tr data-row=\"0\"><td data-stat=\"possession\">50</td></tr>";
        let doc = page(bad, "");
        let err = extract(&doc, "standard", VersusNaming::PerRow).unwrap_err();
        assert!(matches!(err, ScrapeError::Parse { .. }));
    }
}
