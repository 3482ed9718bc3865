// src/specs/mod.rs
//! # Scraping "specs" module
//!
//! Page-specific extraction: each spec knows which `<tbody>` holds its table,
//! which rows are data, which cell names the entity, and turns every other
//! cell into `data-stat → value`.
//!
//! ## What lives here
//! - **Pure HTML parsing** of an already rendered document (`&str` in,
//!   `CategoryDataset` out). No browser, no files.
//! - **Table-body choice by position.** The stat tables have no stable ids
//!   across pages, so they are picked by document order.
//! - **Cell normalization** through `Value::from_cell` (decimal comma, number
//!   or text).
//!
//! ## What does **not** live here
//! - Navigation and render waits (`core::browser`).
//! - File naming and writing (`file`), merging (`merge`), sheets (`workbook`).
//!
//! ## Typical call chain
//! ```text
//! runner → PageSource::fetch(url) → specs::<page>::extract(html, category)
//!                                 ↘ CategoryDataset → file::write_dataset
//! ```
//!
//! ## Testing notes
//! Specs are tested offline against small inline documents that keep the
//! real pages' attributes (`data-row`, `data-stat`).
pub mod players;
pub mod teams;
