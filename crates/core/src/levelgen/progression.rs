//! Difficulty progression and attempt-budget rules used by level generation.

/// Bounded random cursor relocations tried after a pattern batch places
/// nothing, before the engine forces a plain downward drop.
pub(super) const FALLBACK_CURSOR_ATTEMPTS: u32 = 25;

/// The engine gives up after this many pattern iterations per requested
/// platform; reaching the cap is normal completion, not an error.
pub(super) const ENGINE_ATTEMPT_FACTOR: u32 = 3;

/// Island candidate draws allowed per requested island.
pub(super) const ISLAND_ATTEMPT_FACTOR: u32 = 10;

/// An island is discarded when its surviving cells cover less than this
/// share of its nominal width x height bounding box.
pub(super) const ISLAND_VIABILITY_THRESHOLD: f32 = 0.3;

/// Per-cell platform clearance is this fraction of the center-placement
/// margin, producing the gapped organic outline.
pub(super) const ISLAND_CELL_CLEARANCE_FACTOR: f32 = 0.5;

/// Difficulty scalar derived from generation progress, used to widen jump
/// and drop ranges over the course of a level.
pub(super) fn difficulty_for_progress(platforms_created: u32, total_platforms: u32) -> f32 {
    if total_platforms == 0 {
        return 0.0;
    }
    (platforms_created as f32 / total_platforms as f32).clamp(0.0, 1.0)
}
