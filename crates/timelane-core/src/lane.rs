//! Lane assignment for overlapping timeline items.
//!
//! Partitions items into horizontal lanes so that no two items sharing a
//! lane overlap in time. The partition is greedy first-fit: items are
//! visited in ascending start order and each takes the lowest-index lane
//! that can hold it.

use std::collections::HashMap;

use crate::item::{TimeSpan, TimelineItem};

/// A computed item-to-lane mapping.
///
/// The layout is ephemeral: it is recomputed from scratch on every call
/// and never updated incrementally.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LaneLayout {
    index: HashMap<String, usize>,
    lane_count: usize,
}

impl LaneLayout {
    /// Lane index for an item id, if the item was part of the input
    pub fn lane_of(&self, id: &str) -> Option<usize> {
        self.index.get(id).copied()
    }

    /// Number of lanes in use. Every index in `0..lane_count()` is occupied
    /// by at least one item.
    pub fn lane_count(&self) -> usize {
        self.lane_count
    }

    /// Number of items in the layout
    pub fn len(&self) -> usize {
        self.index.len()
    }

    /// Check if the layout holds no items
    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// Iterate over `(item id, lane index)` pairs in arbitrary order
    pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> {
        self.index.iter().map(|(id, lane)| (id.as_str(), *lane))
    }
}

/// Assign every item to the first lane whose current members it does not
/// overlap, appending a new lane when none fits.
///
/// Items are processed in ascending `span.start` order; ties keep their
/// input order, so the mapping is deterministic for a fixed input. Overlap
/// uses the half-open test: items that touch at a boundary may share a
/// lane.
pub fn assign_lanes(items: &[TimelineItem]) -> LaneLayout {
    // Visit items by start time; the sort is stable so equal starts keep
    // input order.
    let mut order: Vec<usize> = (0..items.len()).collect();
    order.sort_by_key(|&i| items[i].span.start);

    let mut lanes: Vec<Vec<TimeSpan>> = Vec::new();
    let mut index = HashMap::with_capacity(items.len());

    for i in order {
        let item = &items[i];
        let lane = lanes
            .iter()
            .position(|members| members.iter().all(|m| !m.overlaps(&item.span)));
        let lane = match lane {
            Some(lane) => lane,
            None => {
                lanes.push(Vec::new());
                lanes.len() - 1
            }
        };
        lanes[lane].push(item.span);
        index.insert(item.id.clone(), lane);
    }

    tracing::trace!(items = items.len(), lanes = lanes.len(), "assigned lanes");
    LaneLayout {
        index,
        lane_count: lanes.len(),
    }
}
