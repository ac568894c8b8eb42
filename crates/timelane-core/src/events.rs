use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::item::TimeSpan;
use crate::session::GestureState;

/// Every host-visible effect of a gesture produces an Event.
/// Hosts redraw on previews and merge committed spans into their item list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Event {
    /// A gesture began on an item.
    GestureStarted {
        item_id: String,
        mode: GestureState,
        origin: TimeSpan,
        at: DateTime<Utc>,
    },
    /// A valid candidate span was produced during an active gesture.
    /// Nothing is committed yet; hosts use it for live feedback.
    SpanPreviewed {
        item_id: String,
        span: TimeSpan,
        at: DateTime<Utc>,
    },
    /// A gesture ended with a valid candidate: the final span for the item.
    SpanCommitted {
        item_id: String,
        span: TimeSpan,
        at: DateTime<Utc>,
    },
    /// A gesture ended without committing; the item is unchanged.
    GestureCancelled {
        item_id: String,
        at: DateTime<Utc>,
    },
}

impl Event {
    /// Id of the item the event concerns
    pub fn item_id(&self) -> &str {
        match self {
            Event::GestureStarted { item_id, .. }
            | Event::SpanPreviewed { item_id, .. }
            | Event::SpanCommitted { item_id, .. }
            | Event::GestureCancelled { item_id, .. } => item_id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_events_tag_by_variant_name() {
        let at = Utc.with_ymd_and_hms(2025, 3, 1, 12, 0, 0).unwrap();
        let span = TimeSpan::new(
            Utc.with_ymd_and_hms(2025, 3, 3, 0, 0, 0).unwrap(),
            Utc.with_ymd_and_hms(2025, 3, 5, 0, 0, 0).unwrap(),
        )
        .unwrap();
        let event = Event::SpanCommitted {
            item_id: "a".into(),
            span,
            at,
        };

        let json = serde_json::to_string(&event).unwrap();
        assert!(json.contains("\"type\":\"SpanCommitted\""));
        assert!(json.contains("\"item_id\":\"a\""));

        let parsed: Event = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, event);
        assert_eq!(parsed.item_id(), "a");
    }
}
