//! Timeline item types and utilities.
//!
//! Items are owned by the host application. The core reads an item's id and
//! time span per computation and never keeps a copy beyond one gesture.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// A half-open time range `[start, end)`.
///
/// Invariant: `start < end`. A zero or negative duration is rejected at
/// construction, never clamped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeSpan {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl TimeSpan {
    /// Create a new span
    ///
    /// # Errors
    /// Returns an error if `end <= start`
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Result<Self, ValidationError> {
        if end <= start {
            return Err(ValidationError::InvalidTimeSpan { start, end });
        }
        Ok(Self { start, end })
    }

    /// Re-check the span invariant, e.g. after deserializing host input
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.end <= self.start {
            return Err(ValidationError::InvalidTimeSpan {
                start: self.start,
                end: self.end,
            });
        }
        Ok(())
    }

    /// Get the span duration
    pub fn duration(&self) -> Duration {
        self.end - self.start
    }

    /// Check if this span overlaps with another.
    ///
    /// Half-open semantics: spans that merely touch at a boundary
    /// (`a.end == b.start`) do not overlap.
    pub fn overlaps(&self, other: &Self) -> bool {
        self.start < other.end && self.end > other.start
    }

    /// Check if an instant falls inside the span
    pub fn contains(&self, t: DateTime<Utc>) -> bool {
        self.start <= t && t < self.end
    }

    /// Both endpoints shifted by `delta`; the duration is preserved exactly.
    ///
    /// Returns `None` when the shift would leave the representable time
    /// range.
    pub fn shifted(&self, delta: Duration) -> Option<Self> {
        Some(Self {
            start: self.start.checked_add_signed(delta)?,
            end: self.end.checked_add_signed(delta)?,
        })
    }

    /// New span with the start moved
    ///
    /// # Errors
    /// Returns an error if the new start is not before the current end
    pub fn with_start(&self, start: DateTime<Utc>) -> Result<Self, ValidationError> {
        Self::new(start, self.end)
    }

    /// New span with the end moved
    ///
    /// # Errors
    /// Returns an error if the new end is not after the current start
    pub fn with_end(&self, end: DateTime<Utc>) -> Result<Self, ValidationError> {
        Self::new(self.start, end)
    }
}

/// A single item on the timeline
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimelineItem {
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(flatten)]
    pub span: TimeSpan,
    /// Display color, carried opaquely for the host
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

impl TimelineItem {
    /// Create a new timeline item
    ///
    /// # Errors
    /// Returns an error if `end <= start`
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Self, ValidationError> {
        Ok(Self {
            id: id.into(),
            title: title.into(),
            span: TimeSpan::new(start, end)?,
            color: None,
        })
    }

    /// Set the display color
    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    /// Check if this item overlaps with another
    pub fn overlaps(&self, other: &Self) -> bool {
        self.span.overlaps(&other.span)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn utc(y: i32, mo: u32, d: u32, h: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, mo, d, h, 0, 0).unwrap()
    }

    #[test]
    fn test_span_rejects_inverted_range() {
        let result = TimeSpan::new(utc(2025, 3, 3, 0), utc(2025, 3, 1, 0));
        assert!(result.is_err());
    }

    #[test]
    fn test_span_rejects_zero_duration() {
        let t = utc(2025, 3, 1, 0);
        assert!(TimeSpan::new(t, t).is_err());
    }

    #[test]
    fn test_overlapping_spans() {
        let a = TimeSpan::new(utc(2025, 3, 1, 0), utc(2025, 3, 3, 0)).unwrap();
        let b = TimeSpan::new(utc(2025, 3, 2, 0), utc(2025, 3, 4, 0)).unwrap();
        assert!(a.overlaps(&b));
        assert!(b.overlaps(&a));
    }

    #[test]
    fn test_touching_spans_do_not_overlap() {
        let a = TimeSpan::new(utc(2025, 3, 1, 0), utc(2025, 3, 3, 0)).unwrap();
        let b = TimeSpan::new(utc(2025, 3, 3, 0), utc(2025, 3, 5, 0)).unwrap();
        assert!(!a.overlaps(&b));
        assert!(!b.overlaps(&a));
    }

    #[test]
    fn test_contained_span_overlaps() {
        let outer = TimeSpan::new(utc(2025, 3, 1, 0), utc(2025, 3, 10, 0)).unwrap();
        let inner = TimeSpan::new(utc(2025, 3, 4, 0), utc(2025, 3, 5, 0)).unwrap();
        assert!(outer.overlaps(&inner));
        assert!(inner.overlaps(&outer));
    }

    #[test]
    fn test_contains_is_half_open() {
        let span = TimeSpan::new(utc(2025, 3, 1, 0), utc(2025, 3, 3, 0)).unwrap();
        assert!(span.contains(span.start));
        assert!(span.contains(utc(2025, 3, 2, 0)));
        assert!(!span.contains(span.end));
    }

    #[test]
    fn test_shifted_preserves_duration() {
        let span = TimeSpan::new(utc(2025, 3, 1, 0), utc(2025, 3, 2, 12)).unwrap();
        let moved = span.shifted(Duration::days(2)).unwrap();
        assert_eq!(moved.start, utc(2025, 3, 3, 0));
        assert_eq!(moved.end, utc(2025, 3, 4, 12));
        assert_eq!(moved.duration(), span.duration());
    }

    #[test]
    fn test_shifted_rejects_out_of_range_shifts() {
        let span = TimeSpan::new(utc(2025, 3, 1, 0), utc(2025, 3, 3, 0)).unwrap();
        assert!(span.shifted(Duration::MAX).is_none());
        assert!(span.shifted(Duration::MIN).is_none());
    }

    #[test]
    fn test_with_start_rejects_inversion() {
        let span = TimeSpan::new(utc(2025, 3, 1, 0), utc(2025, 3, 3, 0)).unwrap();
        assert!(span.with_start(utc(2025, 3, 3, 0)).is_err());
        assert!(span.with_start(utc(2025, 3, 4, 0)).is_err());
        let narrowed = span.with_start(utc(2025, 3, 2, 0)).unwrap();
        assert_eq!(narrowed.end, span.end);
    }

    #[test]
    fn test_with_end_rejects_inversion() {
        let span = TimeSpan::new(utc(2025, 3, 2, 0), utc(2025, 3, 4, 0)).unwrap();
        assert!(span.with_end(utc(2025, 3, 2, 0)).is_err());
        assert!(span.with_end(utc(2025, 3, 1, 0)).is_err());
        let widened = span.with_end(utc(2025, 3, 6, 0)).unwrap();
        assert_eq!(widened.start, span.start);
    }

    #[test]
    fn test_item_serde_uses_flat_endpoints() {
        let item = TimelineItem::new("a", "Kickoff", utc(2025, 3, 1, 0), utc(2025, 3, 3, 0))
            .unwrap()
            .with_color("#4f46e5");
        let json = serde_json::to_string(&item).unwrap();
        assert!(json.contains("\"start\":\"2025-03-01T00:00:00Z\""));
        assert!(json.contains("\"end\":\"2025-03-03T00:00:00Z\""));

        let parsed: TimelineItem = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, item);
    }

    #[test]
    fn test_item_title_defaults_to_empty() {
        let json = r#"{"id":"a","start":"2025-03-01T00:00:00Z","end":"2025-03-03T00:00:00Z"}"#;
        let parsed: TimelineItem = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.title, "");
        assert!(parsed.color.is_none());
    }
}
