//! Second-pass island filler: scans for empty regions far enough from the
//! platform graph and synthesizes organic tile blobs to fill them. Islands
//! are subordinate decoration; they can never displace a platform.

use std::collections::{BTreeSet, HashSet};

use slotmap::SlotMap;

use super::config::GenerationConfig;
use super::model::IslandRegion;
use super::progression::{
    ISLAND_ATTEMPT_FACTOR, ISLAND_CELL_CLEARANCE_FACTOR, ISLAND_VIABILITY_THRESHOLD,
};
use super::rng::LevelRng;
use super::spatial::SpatialIndex;
use crate::types::{Aabb, CellPos, IslandId, Size2, Vec2};

pub(super) struct IslandFiller<'a> {
    config: &'a GenerationConfig,
}

impl<'a> IslandFiller<'a> {
    pub(super) fn new(config: &'a GenerationConfig) -> Self {
        Self { config }
    }

    /// Draws island candidates until the target count or the attempt budget
    /// runs out. Returns accepted islands in acceptance order plus the
    /// combined occupancy set consumers query through the level.
    pub(super) fn fill(
        &self,
        index: &SpatialIndex,
        rng: &mut LevelRng,
    ) -> (Vec<IslandRegion>, HashSet<CellPos>) {
        let config = self.config;
        let mut islands: SlotMap<IslandId, IslandRegion> = SlotMap::with_key();
        let mut acceptance_order: Vec<IslandId> = Vec::new();
        let mut occupied = HashSet::new();

        let target = config.island_count;
        let max_attempts = target.saturating_mul(ISLAND_ATTEMPT_FACTOR);
        let mut attempts = 0_u32;

        while (acceptance_order.len() as u32) < target && attempts < max_attempts {
            attempts += 1;

            let width_tiles = rng.next_i32(config.min_island_width, config.max_island_width + 1);
            let height_tiles =
                rng.next_i32(config.min_island_height, config.max_island_height + 1);
            let size = Size2::new(
                width_tiles as f32 * config.tile_size,
                height_tiles as f32 * config.tile_size,
            );
            let center = Vec2::new(
                rng.next_f32(config.island_min_x, config.island_max_x),
                rng.next_f32(config.island_min_y, config.island_max_y),
            );

            if !index.is_far_enough(center, config.min_distance_from_platforms) {
                continue;
            }
            if !SpatialIndex::is_far_from_islands(
                center,
                size.width / 2.0,
                islands.values(),
                config.island_margin,
            ) {
                continue;
            }

            let Some(cells) =
                synthesize_shape(center, width_tiles, height_tiles, config, index, rng)
            else {
                continue;
            };

            occupied.extend(cells.iter().copied());
            let id = islands.insert_with_key(|key| IslandRegion {
                id: key,
                center,
                size,
                bounds: Aabb::from_center_size(center, size),
                cells,
            });
            acceptance_order.push(id);
        }

        let ordered = acceptance_order
            .into_iter()
            .map(|id| islands.remove(id).expect("island ids are minted by insertion"))
            .collect();
        (ordered, occupied)
    }
}

/// Organic blob synthesis: interpolate per-column top/bottom boundaries
/// between jittered edge values, roughen them with bumpiness, punch column
/// holes, and keep only cells clear of the platform graph. Returns `None`
/// when the surviving cells cover too little of the nominal bounding box.
fn synthesize_shape(
    center: Vec2,
    width_tiles: i32,
    height_tiles: i32,
    config: &GenerationConfig,
    index: &SpatialIndex,
    rng: &mut LevelRng,
) -> Option<BTreeSet<CellPos>> {
    let side_range = (height_tiles / 2).max(1);
    let band_top = height_tiles - 1 + side_range;
    let top_base = height_tiles - 1;

    let left_top = (top_base + rng.next_i32(-side_range, side_range + 1)).clamp(1, band_top);
    let left_bottom =
        (left_top - height_tiles + 1 + rng.next_i32(-side_range, side_range + 1))
            .clamp(0, left_top - 1);
    let right_top = (top_base + rng.next_i32(-side_range, side_range + 1)).clamp(1, band_top);
    let right_bottom =
        (right_top - height_tiles + 1 + rng.next_i32(-side_range, side_range + 1))
            .clamp(0, right_top - 1);

    let mut top_boundary = vec![0_i32; width_tiles as usize];
    let mut bottom_boundary = vec![0_i32; width_tiles as usize];
    for column in 0..width_tiles {
        let t = if width_tiles > 1 { column as f32 / (width_tiles - 1) as f32 } else { 0.0 };
        let mut top = lerp(left_top as f32, right_top as f32, t).round() as i32;
        let mut bottom = lerp(left_bottom as f32, right_bottom as f32, t).round() as i32;
        if bottom >= top {
            bottom = top - 1;
        }

        let interior = column != 0 && column != width_tiles - 1;
        if interior && rng.chance(config.top_bumpiness) {
            top = (top + rng.next_i32(-1, 2)).clamp(bottom + 1, band_top);
        }
        if interior && rng.chance(config.bottom_bumpiness) {
            bottom = (bottom + rng.next_i32(-1, 2)).clamp(0, top - 1);
        }

        top_boundary[column as usize] = top;
        bottom_boundary[column as usize] = bottom;
    }

    let anchor = anchor_cell(center, width_tiles, height_tiles, config.tile_size);
    let cell_clearance = config.min_distance_from_platforms * ISLAND_CELL_CLEARANCE_FACTOR;

    let mut cells = BTreeSet::new();
    for column in 0..width_tiles {
        if rng.chance(config.hole_chance) {
            continue;
        }
        for row in bottom_boundary[column as usize]..=top_boundary[column as usize] {
            let cell = CellPos::new(anchor.x + column, anchor.y + row);
            let world = cell_world_center(cell, config.tile_size);
            if index.is_far_enough(world, cell_clearance) {
                cells.insert(cell);
            }
        }
    }

    let nominal_area = (width_tiles * height_tiles) as f32;
    if cells.len() as f32 > ISLAND_VIABILITY_THRESHOLD * nominal_area { Some(cells) } else { None }
}

fn lerp(from: f32, to: f32, t: f32) -> f32 {
    from + (to - from) * t
}

fn anchor_cell(center: Vec2, width_tiles: i32, height_tiles: i32, tile_size: f32) -> CellPos {
    let min_x = center.x - width_tiles as f32 * tile_size / 2.0;
    let min_y = center.y - height_tiles as f32 * tile_size / 2.0;
    CellPos::new((min_x / tile_size).floor() as i32, (min_y / tile_size).floor() as i32)
}

pub(super) fn cell_world_center(cell: CellPos, tile_size: f32) -> Vec2 {
    Vec2::new((cell.x as f32 + 0.5) * tile_size, (cell.y as f32 + 0.5) * tile_size)
}
