//! Generation configuration with named, validated ranges.
//! Strict validation rejects bad configs before generation starts; the clamp
//! mode repairs them in place and reports every repair as a value.

use std::error::Error;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Selection weights for the pattern library. Weights are treated as direct
/// probability mass and need not sum to 1; the residual mass falls through
/// to the single-jump pattern.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct PatternWeights {
    pub single_jump: f32,
    pub straight_path: f32,
    pub zigzag_path: f32,
    pub spiral: f32,
    pub floating_bridge: f32,
    pub skyscraper_tower: f32,
    pub diamond_formation: f32,
    pub sine_wave: f32,
    pub mega_cluster: f32,
}

impl Default for PatternWeights {
    fn default() -> Self {
        Self {
            single_jump: 0.25,
            straight_path: 0.12,
            zigzag_path: 0.12,
            spiral: 0.08,
            floating_bridge: 0.10,
            skyscraper_tower: 0.08,
            diamond_formation: 0.05,
            sine_wave: 0.10,
            mega_cluster: 0.05,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GenerationConfig {
    /// 0 requests a freshly drawn seed; the resolved value is recorded on
    /// the generated level.
    pub seed: u64,

    // Platform pass.
    pub total_platforms: u32,
    pub level_width: f32,
    pub platform_start_y: f32,
    pub platform_end_y: f32,
    pub min_jump_distance: f32,
    pub max_jump_distance: f32,
    pub min_vertical_drop: f32,
    pub max_vertical_drop: f32,
    pub platform_safety_radius: f32,
    pub platform_width: f32,
    pub platform_height: f32,
    pub extreme_shift_chance: f32,
    pub pattern_weights: PatternWeights,

    // Island pass.
    pub island_count: u32,
    pub min_island_width: i32,
    pub max_island_width: i32,
    pub min_island_height: i32,
    pub max_island_height: i32,
    pub island_min_x: f32,
    pub island_max_x: f32,
    pub island_min_y: f32,
    pub island_max_y: f32,
    pub top_bumpiness: f32,
    pub bottom_bumpiness: f32,
    pub hole_chance: f32,
    pub min_distance_from_platforms: f32,
    pub island_margin: f32,
    pub tile_size: f32,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            seed: 0,
            total_platforms: 60,
            level_width: 80.0,
            platform_start_y: 100.0,
            platform_end_y: -100.0,
            min_jump_distance: 2.0,
            max_jump_distance: 6.0,
            min_vertical_drop: 1.5,
            max_vertical_drop: 3.0,
            platform_safety_radius: 2.0,
            platform_width: 3.0,
            platform_height: 0.5,
            extreme_shift_chance: 0.15,
            pattern_weights: PatternWeights::default(),
            island_count: 10,
            min_island_width: 3,
            max_island_width: 10,
            min_island_height: 2,
            max_island_height: 6,
            island_min_x: -40.0,
            island_max_x: 40.0,
            island_min_y: -90.0,
            island_max_y: 90.0,
            top_bumpiness: 0.5,
            bottom_bumpiness: 0.5,
            hole_chance: 0.12,
            min_distance_from_platforms: 6.0,
            island_margin: 2.0,
            tile_size: 1.0,
        }
    }
}

impl GenerationConfig {
    pub fn half_level_width(&self) -> f32 {
        self.level_width / 2.0
    }

    /// Strict validation: the first offending field is reported and the
    /// config is rejected untouched.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (field, value) in self.positive_fields() {
            if value <= 0.0 {
                return Err(ConfigError::NonPositive { field, value });
            }
        }
        if self.total_platforms == 0 {
            return Err(ConfigError::NonPositive { field: "total_platforms", value: 0.0 });
        }
        if self.min_island_width < 1 {
            return Err(ConfigError::NonPositive {
                field: "min_island_width",
                value: self.min_island_width as f32,
            });
        }
        if self.min_island_height < 1 {
            return Err(ConfigError::NonPositive {
                field: "min_island_height",
                value: self.min_island_height as f32,
            });
        }
        for (field, min, max) in self.ordered_pairs() {
            if min > max {
                return Err(ConfigError::MinAboveMax { field, min, max });
            }
        }
        for (field, lo, hi) in self.spans() {
            if lo >= hi {
                return Err(ConfigError::EmptySpan { field, lo, hi });
            }
        }
        for (field, value) in self.probability_fields() {
            if !(0.0..=1.0).contains(&value) {
                return Err(ConfigError::ProbabilityOutOfRange { field, value });
            }
        }
        if self.platform_safety_radius < 0.0 {
            return Err(ConfigError::NonPositive {
                field: "platform_safety_radius",
                value: self.platform_safety_radius,
            });
        }
        Ok(())
    }

    /// Clamp mode: repairs every offending field and reports each repair.
    /// The returned config always passes [`GenerationConfig::validate`].
    pub fn clamped(&self) -> (Self, Vec<ConfigAdjustment>) {
        let mut repaired = self.clone();
        let mut adjustments = Vec::new();

        if repaired.level_width <= 0.0 {
            repair(&mut adjustments, "level_width", &mut repaired.level_width, 1.0);
        }
        if repaired.tile_size <= 0.0 {
            repair(&mut adjustments, "tile_size", &mut repaired.tile_size, 1.0);
        }
        if repaired.platform_width <= 0.0 {
            repair(&mut adjustments, "platform_width", &mut repaired.platform_width, 1.0);
        }
        if repaired.platform_height <= 0.0 {
            repair(&mut adjustments, "platform_height", &mut repaired.platform_height, 0.5);
        }
        if repaired.min_jump_distance <= 0.0 {
            repair(&mut adjustments, "min_jump_distance", &mut repaired.min_jump_distance, 0.5);
        }
        if repaired.min_vertical_drop <= 0.0 {
            repair(&mut adjustments, "min_vertical_drop", &mut repaired.min_vertical_drop, 0.5);
        }
        if repaired.min_distance_from_platforms <= 0.0 {
            let floor = repaired.platform_safety_radius.max(1.0);
            repair(
                &mut adjustments,
                "min_distance_from_platforms",
                &mut repaired.min_distance_from_platforms,
                floor,
            );
        }
        if repaired.island_margin <= 0.0 {
            repair(&mut adjustments, "island_margin", &mut repaired.island_margin, 1.0);
        }
        if repaired.platform_safety_radius < 0.0 {
            repair(
                &mut adjustments,
                "platform_safety_radius",
                &mut repaired.platform_safety_radius,
                0.0,
            );
        }
        if repaired.total_platforms == 0 {
            adjustments.push(ConfigAdjustment { field: "total_platforms", from: 0.0, to: 1.0 });
            repaired.total_platforms = 1;
        }

        if repaired.max_jump_distance < repaired.min_jump_distance {
            let floor = repaired.min_jump_distance;
            repair(&mut adjustments, "max_jump_distance", &mut repaired.max_jump_distance, floor);
        }
        if repaired.max_vertical_drop < repaired.min_vertical_drop {
            let floor = repaired.min_vertical_drop;
            repair(&mut adjustments, "max_vertical_drop", &mut repaired.max_vertical_drop, floor);
        }
        if repaired.max_island_width < repaired.min_island_width {
            let floor = repaired.min_island_width;
            adjustments.push(ConfigAdjustment {
                field: "max_island_width",
                from: repaired.max_island_width as f32,
                to: floor as f32,
            });
            repaired.max_island_width = floor;
        }
        if repaired.max_island_height < repaired.min_island_height {
            let floor = repaired.min_island_height;
            adjustments.push(ConfigAdjustment {
                field: "max_island_height",
                from: repaired.max_island_height as f32,
                to: floor as f32,
            });
            repaired.max_island_height = floor;
        }
        if repaired.min_island_width < 1 {
            adjustments.push(ConfigAdjustment {
                field: "min_island_width",
                from: repaired.min_island_width as f32,
                to: 1.0,
            });
            repaired.min_island_width = 1;
            repaired.max_island_width = repaired.max_island_width.max(1);
        }
        if repaired.min_island_height < 1 {
            adjustments.push(ConfigAdjustment {
                field: "min_island_height",
                from: repaired.min_island_height as f32,
                to: 1.0,
            });
            repaired.min_island_height = 1;
            repaired.max_island_height = repaired.max_island_height.max(1);
        }

        if repaired.platform_start_y <= repaired.platform_end_y {
            let raised = repaired.platform_end_y + 1.0;
            repair(&mut adjustments, "platform_start_y", &mut repaired.platform_start_y, raised);
        }
        if repaired.island_min_x >= repaired.island_max_x {
            let widened = repaired.island_min_x + 1.0;
            repair(&mut adjustments, "island_max_x", &mut repaired.island_max_x, widened);
        }
        if repaired.island_min_y >= repaired.island_max_y {
            let widened = repaired.island_min_y + 1.0;
            repair(&mut adjustments, "island_max_y", &mut repaired.island_max_y, widened);
        }

        let probability_slots: [(&'static str, fn(&mut Self) -> &mut f32); 13] = [
            ("extreme_shift_chance", |config| &mut config.extreme_shift_chance),
            ("top_bumpiness", |config| &mut config.top_bumpiness),
            ("bottom_bumpiness", |config| &mut config.bottom_bumpiness),
            ("hole_chance", |config| &mut config.hole_chance),
            ("pattern_weights.single_jump", |config| &mut config.pattern_weights.single_jump),
            ("pattern_weights.straight_path", |config| &mut config.pattern_weights.straight_path),
            ("pattern_weights.zigzag_path", |config| &mut config.pattern_weights.zigzag_path),
            ("pattern_weights.spiral", |config| &mut config.pattern_weights.spiral),
            ("pattern_weights.floating_bridge", |config| {
                &mut config.pattern_weights.floating_bridge
            }),
            ("pattern_weights.skyscraper_tower", |config| {
                &mut config.pattern_weights.skyscraper_tower
            }),
            ("pattern_weights.diamond_formation", |config| {
                &mut config.pattern_weights.diamond_formation
            }),
            ("pattern_weights.sine_wave", |config| &mut config.pattern_weights.sine_wave),
            ("pattern_weights.mega_cluster", |config| &mut config.pattern_weights.mega_cluster),
        ];
        for (field, slot_of) in probability_slots {
            let slot = slot_of(&mut repaired);
            let bounded = slot.clamp(0.0, 1.0);
            if bounded != *slot {
                adjustments.push(ConfigAdjustment { field, from: *slot, to: bounded });
                *slot = bounded;
            }
        }

        (repaired, adjustments)
    }

    fn positive_fields(&self) -> [(&'static str, f32); 8] {
        [
            ("level_width", self.level_width),
            ("tile_size", self.tile_size),
            ("platform_width", self.platform_width),
            ("platform_height", self.platform_height),
            ("min_jump_distance", self.min_jump_distance),
            ("min_vertical_drop", self.min_vertical_drop),
            ("min_distance_from_platforms", self.min_distance_from_platforms),
            ("island_margin", self.island_margin),
        ]
    }

    fn ordered_pairs(&self) -> [(&'static str, f32, f32); 4] {
        [
            ("jump_distance", self.min_jump_distance, self.max_jump_distance),
            ("vertical_drop", self.min_vertical_drop, self.max_vertical_drop),
            ("island_width", self.min_island_width as f32, self.max_island_width as f32),
            ("island_height", self.min_island_height as f32, self.max_island_height as f32),
        ]
    }

    fn spans(&self) -> [(&'static str, f32, f32); 3] {
        [
            ("platform_y", self.platform_end_y, self.platform_start_y),
            ("island_x", self.island_min_x, self.island_max_x),
            ("island_y", self.island_min_y, self.island_max_y),
        ]
    }

    fn probability_fields(&self) -> [(&'static str, f32); 13] {
        let weights = &self.pattern_weights;
        [
            ("extreme_shift_chance", self.extreme_shift_chance),
            ("top_bumpiness", self.top_bumpiness),
            ("bottom_bumpiness", self.bottom_bumpiness),
            ("hole_chance", self.hole_chance),
            ("pattern_weights.single_jump", weights.single_jump),
            ("pattern_weights.straight_path", weights.straight_path),
            ("pattern_weights.zigzag_path", weights.zigzag_path),
            ("pattern_weights.spiral", weights.spiral),
            ("pattern_weights.floating_bridge", weights.floating_bridge),
            ("pattern_weights.skyscraper_tower", weights.skyscraper_tower),
            ("pattern_weights.diamond_formation", weights.diamond_formation),
            ("pattern_weights.sine_wave", weights.sine_wave),
            ("pattern_weights.mega_cluster", weights.mega_cluster),
        ]
    }
}

/// A single repair applied by [`GenerationConfig::clamped`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ConfigAdjustment {
    pub field: &'static str,
    pub from: f32,
    pub to: f32,
}

fn repair(
    adjustments: &mut Vec<ConfigAdjustment>,
    field: &'static str,
    slot: &mut f32,
    target: f32,
) {
    if *slot != target {
        adjustments.push(ConfigAdjustment { field, from: *slot, to: target });
        *slot = target;
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum ConfigError {
    MinAboveMax { field: &'static str, min: f32, max: f32 },
    ProbabilityOutOfRange { field: &'static str, value: f32 },
    NonPositive { field: &'static str, value: f32 },
    EmptySpan { field: &'static str, lo: f32, hi: f32 },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MinAboveMax { field, min, max } => {
                write!(formatter, "{field}: min {min} exceeds max {max}")
            }
            Self::ProbabilityOutOfRange { field, value } => {
                write!(formatter, "{field}: probability {value} outside [0, 1]")
            }
            Self::NonPositive { field, value } => {
                write!(formatter, "{field}: value {value} must be positive")
            }
            Self::EmptySpan { field, lo, hi } => {
                write!(formatter, "{field}: span [{lo}, {hi}] is empty")
            }
        }
    }
}

impl Error for ConfigError {}
