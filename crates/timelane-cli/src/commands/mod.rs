pub mod config;
pub mod gesture;
pub mod lanes;
pub mod view;

use std::path::Path;

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use timelane_core::{TimelineConfig, TimelineItem, ViewWindow};

/// Parse an instant from RFC 3339 or a bare `YYYY-MM-DD` date (UTC midnight).
pub(crate) fn parse_instant(s: &str) -> Result<DateTime<Utc>, Box<dyn std::error::Error>> {
    if let Ok(t) = DateTime::parse_from_rfc3339(s) {
        return Ok(t.with_timezone(&Utc));
    }
    let date = NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .map_err(|_| format!("cannot parse '{s}' as a date or RFC 3339 timestamp"))?;
    Ok(date.and_time(NaiveTime::MIN).and_utc())
}

/// Load items from a JSON file, validating every span.
pub(crate) fn load_items(path: &Path) -> Result<Vec<TimelineItem>, Box<dyn std::error::Error>> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| format!("cannot read {}: {e}", path.display()))?;
    let items: Vec<TimelineItem> = serde_json::from_str(&content)?;
    for item in &items {
        item.span
            .validate()
            .map_err(|e| format!("item '{}': {e}", item.id))?;
    }
    Ok(items)
}

/// Load configuration from an explicit path or the default location.
pub(crate) fn load_config(path: Option<&Path>) -> Result<TimelineConfig, Box<dyn std::error::Error>> {
    match path {
        Some(path) => Ok(TimelineConfig::load_from(path)?),
        None => Ok(TimelineConfig::load_or_default()),
    }
}

/// Build a view window from CLI arguments.
pub(crate) fn build_window(
    from: &str,
    to: &str,
    px_per_day: f64,
) -> Result<ViewWindow, Box<dyn std::error::Error>> {
    Ok(ViewWindow::new(
        parse_instant(from)?,
        parse_instant(to)?,
        px_per_day,
    )?)
}
