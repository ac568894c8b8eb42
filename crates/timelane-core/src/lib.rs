//! # Timelane Core Library
//!
//! This library provides the layout and interaction core for calendar and
//! timeline views: it packs overlapping time intervals into lanes, maps
//! instants to pixel offsets and back, and turns raw pointer gestures into
//! validated start/end updates. Rendering, persistence, and input-device
//! wiring stay in the host application, which feeds the core plain data
//! and applies the events it returns.
//!
//! ## Architecture
//!
//! - **Lane Assignment**: A pure, deterministic first-fit partition of
//!   items into horizontal lanes, recomputed per render pass
//! - **Geometry**: An affine instant-to-pixel mapping per view window,
//!   with snap quantization for pointer deltas
//! - **Gesture Session**: A caller-driven state machine fed pointer
//!   samples; every host-visible effect surfaces as an [`Event`]
//! - **Scale Marks**: Day and month ruler positions for header rendering
//!
//! ## Key Components
//!
//! - [`assign_lanes`]: Item-to-lane partition
//! - [`ViewWindow`]: Visible time range and pixel density
//! - [`GestureSession`]: Drag/resize state machine
//! - [`TimelineConfig`]: TOML-backed tunables

pub mod config;
pub mod error;
pub mod events;
pub mod geometry;
pub mod item;
pub mod lane;
pub mod scale;
pub mod session;

pub use config::{LaneConfig, TimelineConfig, ZoomConfig};
pub use error::{ConfigError, CoreError, ValidationError};
pub use events::Event;
pub use geometry::{content_height, lane_top, HitZone, SpanRect, ViewWindow};
pub use item::{TimeSpan, TimelineItem};
pub use lane::{assign_lanes, LaneLayout};
pub use scale::{day_marks, month_marks, DayMark, MonthMark};
pub use session::{GestureSession, GestureState};
