//! Public data models for generated levels, platforms, and islands.

use std::collections::{BTreeSet, HashSet};

use xxhash_rust::xxh3::xxh3_64;

use crate::types::{Aabb, CellPos, IslandId, PlatformId, Size2, Vec2};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlacedPlatform {
    pub id: PlatformId,
    pub pos: Vec2,
    pub footprint: Size2,
}

/// An organically-shaped tile region. The cell set is computed once by shape
/// synthesis and never mutated afterward.
#[derive(Clone, Debug, PartialEq)]
pub struct IslandRegion {
    pub id: IslandId,
    pub center: Vec2,
    pub size: Size2,
    pub bounds: Aabb,
    pub cells: BTreeSet<CellPos>,
}

/// The complete output of one generation run. Read-only to consumers;
/// regeneration discards and recreates the whole value.
#[derive(Clone, Debug, PartialEq)]
pub struct GeneratedLevel {
    pub seed: u64,
    pub tile_size: f32,
    pub platforms: Vec<PlacedPlatform>,
    pub islands: Vec<IslandRegion>,
    pub occupied_cells: HashSet<CellPos>,
    pub platform_target: u32,
    pub island_target: u32,
}

impl GeneratedLevel {
    /// How far the platform pass fell short of its requested target. A
    /// nonzero value is the only trace placement exhaustion leaves.
    pub fn platform_shortfall(&self) -> u32 {
        self.platform_target.saturating_sub(self.platforms.len() as u32)
    }

    pub fn island_shortfall(&self) -> u32 {
        self.island_target.saturating_sub(self.islands.len() as u32)
    }

    pub fn cell_of(&self, world: Vec2) -> CellPos {
        CellPos::new(
            (world.x / self.tile_size).floor() as i32,
            (world.y / self.tile_size).floor() as i32,
        )
    }

    /// Cell-membership lookup over every accepted island.
    pub fn is_position_on_island(&self, world: Vec2) -> bool {
        self.occupied_cells.contains(&self.cell_of(world))
    }

    /// Canonical little-endian encoding of the full output, stable across
    /// runs with equal config and seed.
    pub fn canonical_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::new();
        bytes.extend(self.seed.to_le_bytes());
        bytes.extend(self.tile_size.to_le_bytes());
        bytes.extend(self.platform_target.to_le_bytes());
        bytes.extend(self.island_target.to_le_bytes());

        bytes.extend((self.platforms.len() as u32).to_le_bytes());
        for platform in &self.platforms {
            bytes.extend(platform.pos.x.to_le_bytes());
            bytes.extend(platform.pos.y.to_le_bytes());
            bytes.extend(platform.footprint.width.to_le_bytes());
            bytes.extend(platform.footprint.height.to_le_bytes());
        }

        bytes.extend((self.islands.len() as u32).to_le_bytes());
        for island in &self.islands {
            bytes.extend(island.center.x.to_le_bytes());
            bytes.extend(island.center.y.to_le_bytes());
            bytes.extend(island.size.width.to_le_bytes());
            bytes.extend(island.size.height.to_le_bytes());
            bytes.extend((island.cells.len() as u32).to_le_bytes());
            for cell in &island.cells {
                bytes.extend(cell.x.to_le_bytes());
                bytes.extend(cell.y.to_le_bytes());
            }
        }

        bytes
    }

    pub fn fingerprint(&self) -> u64 {
        xxh3_64(&self.canonical_bytes())
    }
}
