use anyhow::Result;
use clap::Parser;
use skyfall_core::levelgen::SpatialIndex;
use skyfall_core::{GenerationConfig, Vec2, generate_level};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[arg(long, default_value_t = 1)]
    start_seed: u64,
    #[arg(short, long, default_value_t = 100)]
    count: u64,
    #[arg(short, long, default_value_t = 40)]
    platforms: u32,
}

fn main() -> Result<()> {
    let args = Args::parse();
    println!("Sweeping {} seeds starting at {}...", args.count, args.start_seed);

    let mut platform_shortfalls = 0_u64;
    let mut island_shortfalls = 0_u64;

    for seed in args.start_seed..args.start_seed.saturating_add(args.count) {
        let config = GenerationConfig {
            seed,
            total_platforms: args.platforms,
            ..GenerationConfig::default()
        };
        let level = generate_level(&config)?;

        // Assert invariants
        let index = SpatialIndex::new();
        for platform in &level.platforms {
            assert!(
                index.is_within_bounds(platform.pos, &config),
                "Invariant failed: platform outside bounds on seed {seed}"
            );
        }
        for left_index in 0..level.platforms.len() {
            for right_index in (left_index + 1)..level.platforms.len() {
                let distance =
                    level.platforms[left_index].pos.distance(level.platforms[right_index].pos);
                assert!(
                    distance >= config.platform_safety_radius - 1e-4,
                    "Invariant failed: platform spacing {distance} on seed {seed}"
                );
            }
        }
        for island in &level.islands {
            for &cell in &island.cells {
                let world = Vec2::new(
                    (cell.x as f32 + 0.5) * config.tile_size,
                    (cell.y as f32 + 0.5) * config.tile_size,
                );
                for platform in &level.platforms {
                    let clearance = config.min_distance_from_platforms * 0.5;
                    assert!(
                        world.distance(platform.pos) >= clearance,
                        "Invariant failed: island cell near platform on seed {seed}"
                    );
                }
            }
        }

        platform_shortfalls += u64::from(level.platform_shortfall());
        island_shortfalls += u64::from(level.island_shortfall());
    }

    println!("Sweep completed successfully.");
    println!("Total platform shortfall across seeds: {platform_shortfalls}");
    println!("Total island shortfall across seeds: {island_shortfalls}");
    Ok(())
}
