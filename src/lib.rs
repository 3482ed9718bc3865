// src/lib.rs

#[macro_use]
pub mod macros;
#[macro_use]
pub mod log;

#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod core;
pub mod csv;
pub mod data;
pub mod error;
pub mod file;
pub mod merge;
pub mod progress;
pub mod runner;
pub mod specs;
pub mod workbook;

pub use error::{Result, ScrapeError};
