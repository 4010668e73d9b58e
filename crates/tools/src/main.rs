use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use skyfall_core::GenerationConfig;
use skyfall_core::levelgen::{LevelGenerator, load_config_from_file};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to a JSON config preset; built-in defaults are used when absent
    #[arg(short, long)]
    config: Option<PathBuf>,
    /// Seed override; 0 draws a fresh seed
    #[arg(short, long, default_value_t = 0)]
    seed: u64,
    /// Print the effective configuration as JSON before generating
    #[arg(long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => load_config_from_file(path)
            .with_context(|| format!("Failed to load config preset: {}", path.display()))?,
        None => GenerationConfig::default(),
    };
    if args.seed != 0 {
        config.seed = args.seed;
    }

    let generator = LevelGenerator::new(config)?;
    if args.verbose {
        println!("{}", serde_json::to_string_pretty(generator.config())?);
    }

    let level = generator.generate();

    println!("Generation complete.");
    println!("Seed: {}", level.seed);
    println!("Platforms: {}/{}", level.platforms.len(), level.platform_target);
    println!(
        "Islands: {}/{} ({} occupied cells)",
        level.islands.len(),
        level.island_target,
        level.occupied_cells.len()
    );
    println!("Fingerprint: {:016x}", level.fingerprint());

    Ok(())
}
