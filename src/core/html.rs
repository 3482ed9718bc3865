// src/core/html.rs
//
// Thin query layer over `scraper` for stat tables:
// table bodies in document order, marked data rows, cells by stat id,
// trimmed text and first-link text.

use std::sync::LazyLock;

use scraper::{ElementRef, Html, Selector};

use crate::config::consts::{ROW_MARKER_ATTR, STAT_ATTR};
use crate::error::{Result, ScrapeError};

fn selector(css: &'static str) -> Selector {
    Selector::parse(css).expect("static selector")
}

static TBODY: LazyLock<Selector> = LazyLock::new(|| selector("tbody"));
static TR: LazyLock<Selector> = LazyLock::new(|| selector("tr"));
static TD: LazyLock<Selector> = LazyLock::new(|| selector("td"));
static TH: LazyLock<Selector> = LazyLock::new(|| selector("th"));
static ANCHOR: LazyLock<Selector> = LazyLock::new(|| selector("a"));

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CellTag {
    Td,
    Th,
}

impl CellTag {
    fn selector(self) -> &'static Selector {
        match self { CellTag::Td => &TD, CellTag::Th => &TH }
    }
}

/// All `<tbody>` elements, document order, nested ones included.
pub fn table_bodies(doc: &Html) -> Vec<ElementRef<'_>> {
    doc.select(&TBODY).collect()
}

/// The `index`-th table body (0-based), or a parse error naming `context`.
pub fn body_at<'a>(doc: &'a Html, index: usize, context: &str) -> Result<ElementRef<'a>> {
    let bodies = table_bodies(doc);
    let found = bodies.len();
    bodies.into_iter().nth(index).ok_or_else(|| {
        ScrapeError::parse(
            context,
            format!("table body #{} not found ({found} on page)", index + 1),
        )
    })
}

/// Rows carrying the data-row marker; header/separator rows repeated
/// inside the body do not.
pub fn data_rows<'a>(body: ElementRef<'a>) -> impl Iterator<Item = ElementRef<'a>> + 'a {
    body.select(&TR).filter(|tr| tr.value().attr(ROW_MARKER_ATTR).is_some())
}

/// All `<td>` cells of a row.
pub fn data_cells<'a>(row: ElementRef<'a>) -> impl Iterator<Item = ElementRef<'a>> + 'a {
    row.select(&TD)
}

pub fn stat_of<'a>(cell: ElementRef<'a>) -> Option<&'a str> {
    cell.value().attr(STAT_ATTR)
}

/// First `<td>`/`<th>` in the row whose stat id equals `stat`.
pub fn find_cell<'a>(row: ElementRef<'a>, tag: CellTag, stat: &str) -> Option<ElementRef<'a>> {
    row.select(tag.selector()).find(|c| stat_of(*c) == Some(stat))
}

/// Concatenated descendant text, trimmed.
pub fn text_of(el: ElementRef<'_>) -> String {
    el.text().collect::<String>().trim().to_string()
}

/// Trimmed text of the first link inside `el`, if it has one.
pub fn anchor_text(el: ElementRef<'_>) -> Option<String> {
    el.select(&ANCHOR).next().map(text_of)
}

pub fn has_anchor(el: ElementRef<'_>) -> bool {
    el.select(&ANCHOR).next().is_some()
}

/// Link text when the cell holds a link, else the cell's own text.
pub fn link_or_text(el: ElementRef<'_>) -> String {
    anchor_text(el).unwrap_or_else(|| text_of(el))
}
