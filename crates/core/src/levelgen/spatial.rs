//! Append-only registry of placed platforms with the distance and bounds
//! queries both generation passes filter candidates through.
//! Queries are pure reads; positions are never mutated after acceptance.

use slotmap::SlotMap;

use super::config::GenerationConfig;
use super::model::{IslandRegion, PlacedPlatform};
use crate::types::{PlatformId, Size2, Vec2};

/// Candidates may rise this many maximum drops above the start height before
/// the bounds filter rejects them (towers and cluster tops).
const UPPER_SLACK_DROPS: f32 = 4.0;

pub struct SpatialIndex {
    platforms: SlotMap<PlatformId, PlacedPlatform>,
    insertion_order: Vec<PlatformId>,
}

impl SpatialIndex {
    pub fn new() -> Self {
        Self { platforms: SlotMap::with_key(), insertion_order: Vec::new() }
    }

    pub fn platform_count(&self) -> usize {
        self.insertion_order.len()
    }

    pub fn insert_platform(&mut self, pos: Vec2, footprint: Size2) -> PlatformId {
        let id = self.platforms.insert_with_key(|key| PlacedPlatform {
            id: key,
            pos,
            footprint,
        });
        self.insertion_order.push(id);
        id
    }

    /// True iff the candidate keeps at least `min_distance` to every
    /// previously accepted platform. Naive O(n) scan; n stays small.
    pub fn is_far_enough(&self, candidate: Vec2, min_distance: f32) -> bool {
        let min_distance_squared = min_distance * min_distance;
        self.insertion_order.iter().all(|&id| {
            self.platforms[id].pos.distance_squared(candidate) >= min_distance_squared
        })
    }

    pub fn is_within_bounds(&self, candidate: Vec2, config: &GenerationConfig) -> bool {
        let half_width = config.half_level_width();
        let upper_limit = config.platform_start_y + UPPER_SLACK_DROPS * config.max_vertical_drop;
        candidate.x >= -half_width
            && candidate.x <= half_width
            && candidate.y >= config.platform_end_y
            && candidate.y <= upper_limit
    }

    /// Distance check against accepted islands: safe distance is the sum of
    /// both half-widths plus a constant margin.
    pub fn is_far_from_islands<'i>(
        candidate: Vec2,
        candidate_half_width: f32,
        islands: impl IntoIterator<Item = &'i IslandRegion>,
        margin: f32,
    ) -> bool {
        islands.into_iter().all(|island| {
            let safe = island.size.width / 2.0 + candidate_half_width + margin;
            island.center.distance_squared(candidate) >= safe * safe
        })
    }

    pub fn nearest_platform_distance(&self, candidate: Vec2) -> Option<f32> {
        self.insertion_order
            .iter()
            .map(|&id| self.platforms[id].pos.distance_squared(candidate))
            .min_by(|left, right| left.total_cmp(right))
            .map(f32::sqrt)
    }

    /// Platforms in acceptance order, for assembling the final output.
    pub fn ordered_platforms(&self) -> impl Iterator<Item = &PlacedPlatform> {
        self.insertion_order.iter().map(|&id| &self.platforms[id])
    }
}

impl Default for SpatialIndex {
    fn default() -> Self {
        Self::new()
    }
}
