// src/specs/players.rs
//! Scraping *spec* for player stat pages.
//!
//! Layout:
//! - The player table is the **2nd** `<tbody>` on the page, except for
//!   `playing_time`, where it is the 1st.
//! - Data rows carry `data-row`; repeated header rows inside the body do not.
//! - `td[data-stat=player]` is the entity cell. Rows without one are skipped.
//! - Every other `td` contributes `data-stat → value`.
//!
//! Output: one `Record` per player row, `player` first.

use scraper::Html;

use crate::config::consts::{FIRST_BODY_CATEGORY, PLAYER_KEY};
use crate::core::html::{self, CellTag};
use crate::data::{CategoryDataset, Record, Value};
use crate::error::Result;

/// Which `<tbody>` (0-based) holds the player table for `category`.
pub fn body_index(category: &str) -> usize {
    if category == FIRST_BODY_CATEGORY { 0 } else { 1 }
}

pub fn extract(doc: &str, category: &str) -> Result<CategoryDataset> {
    let document = Html::parse_document(doc);
    logd!("Found {} tbody elements in the page.", html::table_bodies(&document).len());

    let context = format!("{category} player stats");
    let body = html::body_at(&document, body_index(category), &context).inspect_err(|e| {
        loge!("Error parsing player stats: {e}");
    })?;

    let mut records = Vec::new();
    for row in html::data_rows(body) {
        let Some(player_cell) = html::find_cell(row, CellTag::Td, PLAYER_KEY) else {
            continue;
        };

        let mut rec = Record::new();
        rec.insert(PLAYER_KEY, Value::Text(html::link_or_text(player_cell)));

        for cell in html::data_cells(row) {
            if cell.id() == player_cell.id() {
                continue;
            }
            match html::stat_of(cell) {
                Some(key) => rec.insert(key, Value::from_cell(&html::text_of(cell))),
                None => logd!("{category}: cell without stat id skipped"),
            }
        }
        records.push(rec);
    }

    logf!("Found {} players in {category} stats.", records.len());
    Ok(CategoryDataset::new(category, records))
}
