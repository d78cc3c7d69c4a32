//! Display-name formatting and manager normalization
//!
//! `format_name` is the privacy transform applied wherever a participant
//! name is surfaced (tiles, tables, exports). It never alters the stored
//! name, only its presentation.

/// Format a participant name for display: "Jane Smith" becomes "Jane S.".
///
/// Empty names and the "Anonymous" / "N/A" placeholders pass through
/// unchanged, as do single-token names.
pub fn format_name(full_name: &str) -> String {
    if full_name.is_empty() || full_name == "Anonymous" || full_name == "N/A" {
        return full_name.to_string();
    }

    let parts: Vec<&str> = full_name.split_whitespace().collect();
    match parts.as_slice() {
        [] => full_name.to_string(),
        [single] => (*single).to_string(),
        [first, .., last] => {
            let initial: String = last
                .chars()
                .next()
                .map(|c| c.to_uppercase().collect())
                .unwrap_or_default();
            format!("{} {}.", first, initial)
        }
    }
}

/// Normalize a manager name to its stored form: trimmed, each
/// whitespace-separated token capitalized, single spaces between tokens.
pub fn normalize_manager(raw: &str) -> String {
    raw.split_whitespace()
        .map(capitalize)
        .collect::<Vec<_>>()
        .join(" ")
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => {
            first.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase()
        }
        None => String::new(),
    }
}
