use crate::events::model::DayInfo;

/// Placeholder used when a day has no known start timestamp.
pub const UNKNOWN_DATE: &str = "UNKNOWN_DATE";

/// Output file name for a day: `{YYYY-MM-DD}_#{day}_{theme}.mp4`.
pub fn output_file_name(info: &DayInfo) -> String {
    format!(
        "{}_#{}_{}.mp4",
        date_label(info.started_at),
        info.day,
        sanitize_theme(&info.theme)
    )
}

/// UTC calendar date of a unix timestamp, or [`UNKNOWN_DATE`].
pub fn date_label(started_at: Option<i64>) -> String {
    started_at
        .and_then(|secs| chrono::DateTime::from_timestamp(secs, 0))
        .map(|dt| dt.format("%Y-%m-%d").to_string())
        .unwrap_or_else(|| UNKNOWN_DATE.to_owned())
}

// Themes are free text; only characters that would break the path are replaced.
fn sanitize_theme(theme: &str) -> String {
    let cleaned: String = theme
        .trim()
        .chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            c if c.is_control() => '_',
            c => c,
        })
        .collect();
    if cleaned.is_empty() {
        "untitled".to_owned()
    } else {
        cleaned
    }
}

#[cfg(test)]
#[path = "../../tests/unit/session/naming.rs"]
mod tests;
