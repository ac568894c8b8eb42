//! Timeline geometry: the affine mapping between instants and pixels.
//!
//! A [`ViewWindow`] maps instants to horizontal pixel offsets and back:
//! `x = days_from_start * px_per_day`. Pointer deltas become time deltas
//! through the inverse mapping and snap to a configured granularity by
//! rounding to the nearest multiple, so jitter below half a unit produces
//! no movement.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::config::{LaneConfig, ZoomConfig};
use crate::error::ValidationError;
use crate::item::TimeSpan;

/// Milliseconds per day, as f64 for pixel math.
const MS_PER_DAY: f64 = 86_400_000.0;

/// The visible time range and pixel density of a timeline view.
///
/// The core treats a window as an immutable parameter per call; zooming
/// and panning produce new windows.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ViewWindow {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    /// Horizontal pixel density, in pixels per day.
    pub px_per_day: f64,
}

impl ViewWindow {
    /// Create a view window
    ///
    /// # Errors
    /// Returns an error if `end <= start` or the density is not a
    /// positive finite number
    pub fn new(
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        px_per_day: f64,
    ) -> Result<Self, ValidationError> {
        if end <= start {
            return Err(ValidationError::InvalidWindow { start, end });
        }
        if !px_per_day.is_finite() || px_per_day <= 0.0 {
            return Err(ValidationError::InvalidDensity { px_per_day });
        }
        Ok(Self {
            start,
            end,
            px_per_day,
        })
    }

    /// Pixel offset of an instant relative to the window start.
    ///
    /// Negative for instants before the window; never clamped.
    pub fn x_at(&self, t: DateTime<Utc>) -> f64 {
        let ms = (t - self.start).num_milliseconds() as f64;
        ms / MS_PER_DAY * self.px_per_day
    }

    /// Inverse of [`x_at`](Self::x_at): the instant at a pixel offset,
    /// at millisecond precision. Saturates at the bounds of the
    /// representable time range.
    pub fn time_at(&self, x: f64) -> DateTime<Utc> {
        let delta = self.delta_to_duration(x);
        match self.start.checked_add_signed(delta) {
            Some(t) => t,
            None if delta < Duration::zero() => DateTime::<Utc>::MIN_UTC,
            None => DateTime::<Utc>::MAX_UTC,
        }
    }

    /// Exact (unsnapped) time delta for a pixel delta, at millisecond
    /// precision. Clamped to the representable duration range; a NaN
    /// delta maps to zero.
    pub fn delta_to_duration(&self, dx: f64) -> Duration {
        let ms = (dx / self.px_per_day * MS_PER_DAY).round() as i64;
        // The saturating float cast can yield i64::MIN, one millisecond
        // below what a Duration can hold.
        Duration::try_milliseconds(ms).unwrap_or(Duration::MIN)
    }

    /// Pixel delta converted to a time delta and snapped to the nearest
    /// multiple of `step`.
    ///
    /// Rounds rather than truncates, symmetrically for negative deltas.
    /// A non-positive `step` disables snapping.
    pub fn snap_delta(&self, dx: f64, step: Duration) -> Duration {
        let step_ms = step.num_milliseconds();
        if step_ms <= 0 {
            return self.delta_to_duration(dx);
        }
        let exact_ms = dx / self.px_per_day * MS_PER_DAY;
        let steps = (exact_ms / step_ms as f64).round() as i64;
        Duration::try_milliseconds(steps.saturating_mul(step_ms)).unwrap_or(Duration::MIN)
    }

    /// Total width of the window in pixels
    pub fn width_px(&self) -> f64 {
        self.x_at(self.end)
    }

    /// Check if an instant falls inside the half-open window range
    pub fn contains(&self, t: DateTime<Utc>) -> bool {
        self.start <= t && t < self.end
    }

    /// Pixel rectangle for a span.
    ///
    /// Never clamped to the window: spans reaching past either edge keep
    /// their true offset and width, and the host clips at render time.
    pub fn span_rect(&self, span: &TimeSpan) -> SpanRect {
        let left = self.x_at(span.start);
        let width = self.x_at(span.end) - left;
        SpanRect { left, width }
    }

    /// Window zoomed in by the configured step factor, clamped to the
    /// density bounds. The time range is unchanged.
    pub fn zoomed_in(&self, zoom: &ZoomConfig) -> Self {
        self.with_density(self.px_per_day * zoom.step_factor, zoom)
    }

    /// Window zoomed out by the configured step factor, clamped to the
    /// density bounds. The time range is unchanged.
    pub fn zoomed_out(&self, zoom: &ZoomConfig) -> Self {
        self.with_density(self.px_per_day / zoom.step_factor, zoom)
    }

    fn with_density(&self, px_per_day: f64, zoom: &ZoomConfig) -> Self {
        Self {
            px_per_day: px_per_day.clamp(zoom.min_px_per_day, zoom.max_px_per_day),
            ..*self
        }
    }

    /// Window shifted by `delta`, e.g. a week for prev/next paging.
    ///
    /// A pan that would leave the representable time range returns the
    /// window unchanged.
    pub fn panned(&self, delta: Duration) -> Self {
        match (
            self.start.checked_add_signed(delta),
            self.end.checked_add_signed(delta),
        ) {
            (Some(start), Some(end)) => Self {
                start,
                end,
                ..*self
            },
            _ => *self,
        }
    }
}

/// Pixel rectangle of a rendered span: horizontal offset and width in the
/// window's coordinate space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpanRect {
    pub left: f64,
    pub width: f64,
}

/// Where inside an item's rectangle a pointer-down landed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HitZone {
    /// The resize handle at the start edge
    LeadingEdge,
    /// The draggable interior
    Body,
    /// The resize handle at the end edge
    TrailingEdge,
}

impl SpanRect {
    /// Right edge of the rect
    pub fn right(&self) -> f64 {
        self.left + self.width
    }

    /// Classify a pointer offset against this rect.
    ///
    /// `margin_px` is the handle width at each edge. Returns `None` for a
    /// pointer outside the rect. When the rect is narrower than two
    /// margins the leading handle wins.
    pub fn hit_test(&self, x: f64, margin_px: f64) -> Option<HitZone> {
        if x < self.left || x > self.right() {
            return None;
        }
        if x <= self.left + margin_px {
            Some(HitZone::LeadingEdge)
        } else if x >= self.right() - margin_px {
            Some(HitZone::TrailingEdge)
        } else {
            Some(HitZone::Body)
        }
    }
}

/// Vertical offset of a lane's top edge, header included
pub fn lane_top(lane: usize, lanes: &LaneConfig) -> f64 {
    lanes.header_height_px + lane as f64 * lanes.lane_height_px
}

/// Total content height for a lane count, header included
pub fn content_height(lane_count: usize, lanes: &LaneConfig) -> f64 {
    lanes.header_height_px + lane_count as f64 * lanes.lane_height_px
}
