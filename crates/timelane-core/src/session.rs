//! Pointer gesture session: the drag/resize state machine.
//!
//! The session is a caller-driven state machine. It owns no threads and
//! never touches a rendering surface; the host feeds it pointer samples as
//! plain data and applies the events it returns.
//!
//! ## State Transitions
//!
//! ```text
//! Idle -> (Dragging | ResizingStart | ResizingEnd) -> Idle
//! ```
//!
//! ## Usage
//!
//! ```ignore
//! let mut session = GestureSession::new();
//! session.pointer_down(&items, "a", x, HitZone::Body);
//! // For each pointer sample:
//! session.pointer_move(&view, x); // Returns Some(Event) on a new preview
//! session.pointer_up();           // Returns Some(Event) on commit
//! ```
//!
//! At most one gesture is active at a time; a pointer-down during an
//! active gesture is ignored, not queued. Invalid input never raises: it
//! degrades to "no change" and the previous valid candidate is retained.

use chrono::{Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::config::TimelineConfig;
use crate::events::Event;
use crate::geometry::{HitZone, ViewWindow};
use crate::item::{TimeSpan, TimelineItem};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GestureState {
    Idle,
    Dragging,
    ResizingStart,
    ResizingEnd,
}

/// Snapshot taken at pointer-down; lives for exactly one gesture.
#[derive(Debug, Clone)]
struct ActiveGesture {
    item_id: String,
    /// Span of the item when the gesture began. Every candidate is derived
    /// from this, never from a previous candidate.
    origin: TimeSpan,
    /// Pointer offset at pointer-down; deltas accumulate against it.
    origin_x: f64,
    /// Last valid candidate computed this gesture.
    candidate: Option<TimeSpan>,
    /// Last span surfaced to the host, for preview deduplication.
    last_emitted: TimeSpan,
}

/// Core gesture session.
///
/// Holds the transient state of one pointer interaction; between gestures
/// it is empty. Dropping a session mid-gesture simply discards the
/// candidate, exactly like [`cancel`](Self::cancel).
#[derive(Debug, Clone)]
pub struct GestureSession {
    /// Snap granularity applied to pointer deltas.
    snap: Duration,
    state: GestureState,
    gesture: Option<ActiveGesture>,
}

impl GestureSession {
    /// Create a session snapping to whole days.
    pub fn new() -> Self {
        Self::with_snap(Duration::days(1))
    }

    /// Create a session with an explicit snap granularity.
    pub fn with_snap(snap: Duration) -> Self {
        Self {
            snap,
            state: GestureState::Idle,
            gesture: None,
        }
    }

    /// Create a session from a [`TimelineConfig`].
    pub fn from_config(config: &TimelineConfig) -> Self {
        Self::with_snap(config.snap())
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn state(&self) -> GestureState {
        self.state
    }

    pub fn is_active(&self) -> bool {
        self.state != GestureState::Idle
    }

    /// Id of the item under the active gesture.
    pub fn target_id(&self) -> Option<&str> {
        self.gesture.as_ref().map(|g| g.item_id.as_str())
    }

    /// Last valid candidate span of the active gesture.
    pub fn candidate(&self) -> Option<TimeSpan> {
        self.gesture.as_ref().and_then(|g| g.candidate)
    }

    // ── Pointer input ────────────────────────────────────────────────

    /// Begin a gesture on item `id` at pointer offset `x`.
    ///
    /// `items` is the host's current item list; an id not present in it
    /// aborts silently. A pointer-down while a gesture is already active
    /// is ignored. Returns the start event, or `None` when the input was
    /// discarded.
    pub fn pointer_down(
        &mut self,
        items: &[TimelineItem],
        id: &str,
        x: f64,
        zone: HitZone,
    ) -> Option<Event> {
        if self.state != GestureState::Idle {
            tracing::debug!(id, "pointer-down ignored: a gesture is already active");
            return None;
        }
        let item = match items.iter().find(|item| item.id == id) {
            Some(item) => item,
            None => {
                tracing::debug!(id, "pointer-down aborted: unknown item id");
                return None;
            }
        };

        let mode = match zone {
            HitZone::Body => GestureState::Dragging,
            HitZone::LeadingEdge => GestureState::ResizingStart,
            HitZone::TrailingEdge => GestureState::ResizingEnd,
        };
        self.state = mode;
        self.gesture = Some(ActiveGesture {
            item_id: item.id.clone(),
            origin: item.span,
            origin_x: x,
            candidate: None,
            last_emitted: item.span,
        });
        Some(Event::GestureStarted {
            item_id: item.id.clone(),
            mode,
            origin: item.span,
            at: Utc::now(),
        })
    }

    /// Feed a pointer-move sample at offset `x`.
    ///
    /// The pixel delta is measured from the pointer-down offset and applied
    /// to the origin span, so repeated snapping cannot drift. Returns a
    /// preview event when a new valid candidate differs from the last span
    /// the host saw; `None` otherwise. An invalid candidate (a resize past
    /// the opposite endpoint, or a delta leaving the representable time
    /// range) is discarded and the previous one retained.
    pub fn pointer_move(&mut self, view: &ViewWindow, x: f64) -> Option<Event> {
        let mode = self.state;
        let gesture = self.gesture.as_mut()?;

        let delta = view.snap_delta(x - gesture.origin_x, self.snap);
        let candidate = match apply_delta(&gesture.origin, mode, delta) {
            Some(span) => span,
            None => {
                tracing::trace!(
                    item_id = %gesture.item_id,
                    "candidate rejected: span would invert or overflow"
                );
                return None;
            }
        };

        gesture.candidate = Some(candidate);
        if gesture.last_emitted == candidate {
            return None;
        }
        gesture.last_emitted = candidate;
        Some(Event::SpanPreviewed {
            item_id: gesture.item_id.clone(),
            span: candidate,
            at: Utc::now(),
        })
    }

    /// End the gesture with a clean pointer-up.
    ///
    /// Commits the last valid candidate and resets to idle. A gesture that
    /// never produced a valid candidate leaves the item unchanged and
    /// returns `None`.
    pub fn pointer_up(&mut self) -> Option<Event> {
        let gesture = self.gesture.take()?;
        self.state = GestureState::Idle;
        let span = gesture.candidate?;
        Some(Event::SpanCommitted {
            item_id: gesture.item_id,
            span,
            at: Utc::now(),
        })
    }

    /// Cancel the gesture, e.g. on lost pointer capture.
    ///
    /// Discards every candidate; a cancelled gesture never commits.
    /// Returns the cancellation event, or `None` when no gesture was
    /// active.
    pub fn cancel(&mut self) -> Option<Event> {
        let gesture = self.gesture.take()?;
        self.state = GestureState::Idle;
        tracing::debug!(item_id = %gesture.item_id, "gesture cancelled");
        Some(Event::GestureCancelled {
            item_id: gesture.item_id,
            at: Utc::now(),
        })
    }
}

impl Default for GestureSession {
    fn default() -> Self {
        Self::new()
    }
}

/// Apply a snapped time delta to the origin span for the given mode.
///
/// Dragging shifts both endpoints and preserves the duration exactly;
/// resizing moves one endpoint and must keep `start < end`. `None` means
/// the proposal was rejected, as inverted or as out of the representable
/// time range.
fn apply_delta(origin: &TimeSpan, mode: GestureState, delta: Duration) -> Option<TimeSpan> {
    match mode {
        GestureState::Dragging => origin.shifted(delta),
        GestureState::ResizingStart => {
            let start = origin.start.checked_add_signed(delta)?;
            origin.with_start(start).ok()
        }
        GestureState::ResizingEnd => {
            let end = origin.end.checked_add_signed(delta)?;
            origin.with_end(end).ok()
        }
        GestureState::Idle => None,
    }
}
