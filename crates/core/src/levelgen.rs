//! Procedural level generation domain split into coherent submodules.

pub mod config;
pub mod config_file;
pub mod model;

mod engine;
mod generator;
mod islands;
mod patterns;
mod progression;
mod rng;
mod spatial;

pub use config::{ConfigAdjustment, ConfigError, GenerationConfig, PatternWeights};
pub use config_file::{ConfigFileError, load_config_from_file, save_config_to_file};
pub use engine::{EnginePhase, GenerationProgress};
pub use generator::LevelGenerator;
pub use model::{GeneratedLevel, IslandRegion, PlacedPlatform};
pub use patterns::{PatternBatch, PatternKind};
pub use rng::{FRESH_SEED, LevelRng};
pub use spatial::SpatialIndex;

pub fn generate_level(config: &GenerationConfig) -> Result<GeneratedLevel, ConfigError> {
    Ok(LevelGenerator::new(config.clone())?.generate())
}

#[cfg(test)]
mod tests {
    use super::{GenerationConfig, LevelGenerator};

    #[test]
    fn generate_level_matches_level_generator_output() {
        let config = GenerationConfig { seed: 123, ..GenerationConfig::default() };

        let from_helper = super::generate_level(&config).expect("config is valid");
        let from_generator =
            LevelGenerator::new(config).expect("config is valid").generate();

        assert_eq!(from_helper, from_generator);
    }
}
