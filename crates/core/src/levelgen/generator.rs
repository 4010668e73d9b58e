//! High-level orchestration composing the platform engine and island filler.
//! Generators are plain values handed to whatever needs them; there is no
//! process-wide instance.

use std::collections::HashSet;

use super::config::{ConfigAdjustment, ConfigError, GenerationConfig};
use super::engine::{GenerationProgress, PlatformLayoutEngine};
use super::islands::IslandFiller;
use super::model::GeneratedLevel;
use super::rng::LevelRng;
use super::spatial::SpatialIndex;

pub struct LevelGenerator {
    config: GenerationConfig,
}

impl LevelGenerator {
    /// Strict construction: the configuration is validated up front and an
    /// invalid one is rejected untouched.
    pub fn new(config: GenerationConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Clamp construction for hosts that prefer repair over rejection; every
    /// repair is reported alongside the generator.
    pub fn new_clamped(config: GenerationConfig) -> (Self, Vec<ConfigAdjustment>) {
        let (repaired, adjustments) = config.clamped();
        (Self { config: repaired }, adjustments)
    }

    pub fn config(&self) -> &GenerationConfig {
        &self.config
    }

    /// Runs both phases to completion in one synchronous call.
    pub fn generate(&self) -> GeneratedLevel {
        self.generate_with_progress(|_| true)
    }

    /// As [`LevelGenerator::generate`], with a callback invoked between
    /// platform iterations. Returning `false` aborts: platforms accepted so
    /// far are returned and the island pass is skipped entirely.
    pub fn generate_with_progress(
        &self,
        mut on_progress: impl FnMut(GenerationProgress) -> bool,
    ) -> GeneratedLevel {
        let mut rng = LevelRng::from_seed(self.config.seed);
        let mut index = SpatialIndex::new();

        let mut aborted = false;
        let mut engine = PlatformLayoutEngine::new(&self.config);
        engine.run(&mut index, &mut rng, |progress| {
            let keep_going = on_progress(progress);
            if !keep_going {
                aborted = true;
            }
            keep_going
        });

        let (islands, occupied_cells) = if aborted {
            (Vec::new(), HashSet::new())
        } else {
            IslandFiller::new(&self.config).fill(&index, &mut rng)
        };

        GeneratedLevel {
            seed: rng.seed(),
            tile_size: self.config.tile_size,
            platforms: index.ordered_platforms().copied().collect(),
            islands,
            occupied_cells,
            platform_target: self.config.total_platforms,
            island_target: self.config.island_count,
        }
    }

    /// Swaps in a new configuration, discarding all prior state, and reruns
    /// both phases. Reruns with equal config and an explicit seed reproduce
    /// the same level bit for bit.
    pub fn regenerate(&mut self, config: GenerationConfig) -> Result<GeneratedLevel, ConfigError> {
        config.validate()?;
        self.config = config;
        Ok(self.generate())
    }
}
