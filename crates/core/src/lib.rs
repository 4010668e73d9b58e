pub mod levelgen;
pub mod types;

pub use levelgen::{
    ConfigAdjustment, ConfigError, GeneratedLevel, GenerationConfig, GenerationProgress,
    IslandRegion, LevelGenerator, PatternKind, PatternWeights, PlacedPlatform, generate_level,
};
pub use types::{Aabb, CellPos, IslandId, PlatformId, Size2, Vec2};
