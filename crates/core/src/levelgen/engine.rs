//! Platform layout engine: walks downward from the start height, placing
//! weighted-random pattern batches until the target count or the attempt
//! budget is exhausted. Falling short of the target is normal completion.

use super::config::GenerationConfig;
use super::patterns;
use super::progression::{
    ENGINE_ATTEMPT_FACTOR, FALLBACK_CURSOR_ATTEMPTS, difficulty_for_progress,
};
use super::rng::LevelRng;
use super::spatial::SpatialIndex;
use crate::types::{Size2, Vec2};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EnginePhase {
    Idle,
    Generating,
    Complete,
}

/// Snapshot handed to the progress callback between iterations.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GenerationProgress {
    pub platforms_created: u32,
    pub platform_target: u32,
    pub iterations: u32,
}

pub(super) struct PlatformLayoutEngine<'a> {
    config: &'a GenerationConfig,
    phase: EnginePhase,
    cursor: Vec2,
    platforms_created: u32,
}

impl<'a> PlatformLayoutEngine<'a> {
    pub(super) fn new(config: &'a GenerationConfig) -> Self {
        Self {
            config,
            phase: EnginePhase::Idle,
            cursor: Vec2::new(0.0, config.platform_start_y),
            platforms_created: 0,
        }
    }

    pub(super) fn phase(&self) -> EnginePhase {
        self.phase
    }

    /// Runs the full placement loop. The callback is invoked between
    /// top-level iterations; returning `false` aborts cleanly with every
    /// platform accepted so far still valid.
    pub(super) fn run(
        &mut self,
        index: &mut SpatialIndex,
        rng: &mut LevelRng,
        mut on_progress: impl FnMut(GenerationProgress) -> bool,
    ) -> u32 {
        self.phase = EnginePhase::Generating;
        let config = self.config;
        let footprint = Size2::new(config.platform_width, config.platform_height);

        // The entry platform is always placed at the level origin.
        index.insert_platform(self.cursor, footprint);
        self.platforms_created = 1;

        let target = config.total_platforms;
        let max_iterations = target.saturating_mul(ENGINE_ATTEMPT_FACTOR);
        let mut iterations = 0_u32;

        while self.platforms_created < target && iterations < max_iterations {
            iterations += 1;

            let difficulty = difficulty_for_progress(self.platforms_created, target);
            let kind = patterns::select_pattern(&config.pattern_weights, rng);
            let batch = patterns::generate(kind, self.cursor, difficulty, config, rng);

            let mut accepted = 0_u32;
            for &candidate in &batch.positions {
                if self.platforms_created >= target {
                    break;
                }
                if index.is_within_bounds(candidate, config)
                    && index.is_far_enough(candidate, config.platform_safety_radius)
                {
                    index.insert_platform(candidate, footprint);
                    self.platforms_created += 1;
                    accepted += 1;
                }
            }

            self.cursor = batch.next_cursor;
            if accepted == 0 {
                self.relocate_cursor(index, rng);
            }
            if self.cursor.y < config.platform_end_y {
                self.reset_cursor_above_floor(rng);
            }

            let keep_going = on_progress(GenerationProgress {
                platforms_created: self.platforms_created,
                platform_target: target,
                iterations,
            });
            if !keep_going {
                break;
            }
        }

        self.phase = EnginePhase::Complete;
        self.platforms_created
    }

    /// A batch that placed nothing strands the cursor in saturated space.
    /// Try bounded random relocations; failing all of them, force a plain
    /// downward drop so the walk cannot stall in place.
    fn relocate_cursor(&mut self, index: &SpatialIndex, rng: &mut LevelRng) {
        let config = self.config;
        for _ in 0..FALLBACK_CURSOR_ATTEMPTS {
            let candidate = Vec2::new(
                self.cursor.x
                    + rng.next_f32(-config.max_jump_distance, config.max_jump_distance),
                self.cursor.y - rng.next_f32(config.min_vertical_drop, config.max_vertical_drop),
            );
            if index.is_within_bounds(candidate, config)
                && index.is_far_enough(candidate, config.platform_safety_radius)
            {
                self.cursor = candidate;
                return;
            }
        }
        self.cursor = Vec2::new(self.cursor.x, self.cursor.y - config.max_vertical_drop);
    }

    /// Crossing the floor resets the walk to a fresh column at an upward
    /// offset, so a narrow column cannot drag the run past the level bounds.
    fn reset_cursor_above_floor(&mut self, rng: &mut LevelRng) {
        let config = self.config;
        let half_width = config.half_level_width();
        let lift = (config.platform_start_y - config.platform_end_y) * 0.2;
        self.cursor = Vec2::new(
            rng.next_f32(-half_width, half_width),
            (config.platform_end_y + lift).min(config.platform_start_y),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run_engine(config: &GenerationConfig, seed: u64) -> (SpatialIndex, u32, EnginePhase) {
        let mut index = SpatialIndex::new();
        let mut rng = LevelRng::from_seed(seed);
        let mut engine = PlatformLayoutEngine::new(config);
        let created = engine.run(&mut index, &mut rng, |_| true);
        (index, created, engine.phase())
    }

    #[test]
    fn target_of_one_yields_exactly_the_entry_platform() {
        let config = GenerationConfig { total_platforms: 1, ..GenerationConfig::default() };
        let (index, created, phase) = run_engine(&config, 42);

        assert_eq!(created, 1);
        assert_eq!(phase, EnginePhase::Complete);
        let platforms: Vec<Vec2> = index.ordered_platforms().map(|platform| platform.pos).collect();
        assert_eq!(platforms, vec![Vec2::new(0.0, config.platform_start_y)]);
    }

    #[test]
    fn engine_starts_idle_and_finishes_complete() {
        let config = GenerationConfig::default();
        let engine = PlatformLayoutEngine::new(&config);
        assert_eq!(engine.phase(), EnginePhase::Idle);
        let (_, _, phase) = run_engine(&config, 7);
        assert_eq!(phase, EnginePhase::Complete);
    }

    #[test]
    fn accepted_platforms_respect_the_safety_radius() {
        let config = GenerationConfig { total_platforms: 40, ..GenerationConfig::default() };
        let (index, _, _) = run_engine(&config, 1234);

        let positions: Vec<Vec2> = index.ordered_platforms().map(|platform| platform.pos).collect();
        for left_index in 0..positions.len() {
            for right_index in (left_index + 1)..positions.len() {
                let distance = positions[left_index].distance(positions[right_index]);
                assert!(
                    distance >= config.platform_safety_radius - 1e-4,
                    "platforms {left_index} and {right_index} are {distance} apart"
                );
            }
        }
    }

    #[test]
    fn accepted_platforms_stay_inside_the_level_bounds() {
        let config = GenerationConfig { total_platforms: 40, ..GenerationConfig::default() };
        let (index, _, _) = run_engine(&config, 99);

        for platform in index.ordered_platforms() {
            assert!(index.is_within_bounds(platform.pos, &config));
        }
    }

    #[test]
    fn equal_seeds_replay_the_same_platform_sequence() {
        let config = GenerationConfig { total_platforms: 30, ..GenerationConfig::default() };
        let (left, created_left, _) = run_engine(&config, 7);
        let (right, created_right, _) = run_engine(&config, 7);

        assert_eq!(created_left, created_right);
        let left_positions: Vec<Vec2> = left.ordered_platforms().map(|p| p.pos).collect();
        let right_positions: Vec<Vec2> = right.ordered_platforms().map(|p| p.pos).collect();
        assert_eq!(left_positions, right_positions);
    }

    #[test]
    fn impossible_spacing_terminates_with_a_shortfall_not_a_hang() {
        let config = GenerationConfig {
            total_platforms: 20,
            platform_safety_radius: 10_000.0,
            ..GenerationConfig::default()
        };
        let (index, created, phase) = run_engine(&config, 5);

        assert_eq!(phase, EnginePhase::Complete);
        assert_eq!(created, 1, "only the entry platform fits");
        assert_eq!(index.platform_count(), 1);
    }

    #[test]
    fn progress_callback_returning_false_aborts_between_iterations() {
        let config = GenerationConfig { total_platforms: 200, ..GenerationConfig::default() };
        let mut index = SpatialIndex::new();
        let mut rng = LevelRng::from_seed(42);
        let mut engine = PlatformLayoutEngine::new(&config);

        let mut seen_iterations = 0_u32;
        let created = engine.run(&mut index, &mut rng, |progress| {
            seen_iterations = progress.iterations;
            progress.iterations < 3
        });

        assert_eq!(seen_iterations, 3);
        assert_eq!(engine.phase(), EnginePhase::Complete);
        assert!(created < 200, "aborted run should fall short of the target");
        assert_eq!(created as usize, index.platform_count());
    }

    #[test]
    fn progress_reports_monotonically_increasing_counts() {
        let config = GenerationConfig { total_platforms: 25, ..GenerationConfig::default() };
        let mut index = SpatialIndex::new();
        let mut rng = LevelRng::from_seed(8);
        let mut engine = PlatformLayoutEngine::new(&config);

        let mut last_count = 0_u32;
        engine.run(&mut index, &mut rng, |progress| {
            assert!(progress.platforms_created >= last_count);
            last_count = progress.platforms_created;
            true
        });
    }
}
