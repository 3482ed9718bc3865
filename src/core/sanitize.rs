// src/core/sanitize.rs
use crate::config::consts::{FILE_PREFIX, SHEET_NAME_MAX};

/// Locale decimal separator → `.` (`"1,5"` → `"1.5"`).
pub fn decimal_point(s: &str) -> String {
    s.replace(',', ".")
}

/// Word-initial capitals where a "word" is any run of cased letters:
/// `"keeper-adv"` → `"Keeper-Adv"`, `"90s"` → `"90S"`.
pub fn title_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut prev_cased = false;
    for ch in s.chars() {
        let cased = ch.is_lowercase() || ch.is_uppercase();
        if cased && !prev_cased {
            out.extend(ch.to_uppercase());
        } else if cased {
            out.extend(ch.to_lowercase());
        } else {
            out.push(ch);
        }
        prev_cased = cased;
    }
    out
}

/// First `max` characters (not bytes).
pub fn clip_chars(s: &str, max: usize) -> String {
    s.chars().take(max).collect()
}

/// `stats_passing_types_players` → `Passing-Types-Players`, clipped to the
/// workbook sheet-name limit.
pub fn sheet_name_for(file_stem: &str) -> String {
    let name = title_case(&file_stem.replace(FILE_PREFIX, "").replace('_', "-"));
    clip_chars(&name, SHEET_NAME_MAX)
}
