//! Cubeworld CLI - seamless cube-sphere terrain generator.
//!
//! Generates six face grids from a seed and reports what came out.

use clap::{Parser, Subcommand};
use rand::Rng;
use std::path::PathBuf;
use std::time::Instant;

use cubeworld::biomes::Biome;
use cubeworld::config::GenerationConfig;
use cubeworld::geometry::{adjacency, Edge, Face};
use cubeworld::hydrology::{find_water_bodies, HydrologyConfig};
use cubeworld::pipeline::{Pipeline, MAX_FACE_SIZE};
use cubeworld::terrain::Planet;

/// Seamless cube-sphere terrain generator.
#[derive(Parser)]
#[command(name = "cubeworld")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a planet and print a summary.
    Generate {
        /// Seed text; a random one is drawn when omitted.
        #[arg(short, long)]
        seed: Option<String>,

        /// Pixels along each face edge.
        #[arg(long, default_value = "100")]
        size: u32,

        /// TOML file with terrain and hydrology settings.
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Keep per-layer noise fields on each face.
        #[arg(long)]
        keep_layers: bool,
    },
    /// Print the face seam table.
    Adjacency,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Generate {
            seed,
            size,
            config,
            keep_layers,
        } => run_generate(seed, size, config, keep_layers),
        Commands::Adjacency => print_adjacency(),
    }
}

/// Nine lowercase base-36 characters.
fn random_seed() -> String {
    const ALPHABET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";
    let mut rng = rand::thread_rng();
    (0..9)
        .map(|_| ALPHABET[rng.gen_range(0..ALPHABET.len())] as char)
        .collect()
}

fn run_generate(seed: Option<String>, size: u32, config_path: Option<PathBuf>, keep_layers: bool) {
    let mut config = match config_path {
        Some(path) => GenerationConfig::load_from_file(&path).unwrap_or_else(|e| {
            log::error!("{}", e);
            std::process::exit(1);
        }),
        None => GenerationConfig::default(),
    };
    config.terrain.keep_layers |= keep_layers;

    let seed = seed.unwrap_or_else(random_seed);

    println!("Cubeworld - Cube-Sphere Terrain Generator");
    println!("=========================================");
    println!("Seed: {}", seed);
    println!("Face size: {}x{} (max {})", size, size, MAX_FACE_SIZE);

    let start = Instant::now();
    let mut planet = Planet::new(&seed, size);
    let pipeline = Pipeline::standard(config);

    pipeline
        .run_with_callbacks(
            &mut planet,
            |name, i, total| {
                log::info!("[{}/{}] Starting: {}", i + 1, total, name);
            },
            |name, i, total| {
                log::info!("[{}/{}] Completed: {}", i + 1, total, name);
            },
        )
        .unwrap_or_else(|e| {
            log::error!("Error during generation: {}", e);
            std::process::exit(1);
        });

    println!("Generation completed in {:.2?}", start.elapsed());
    print_summary(&planet, &pipeline.config().hydrology);
}

fn print_summary(planet: &Planet, hydrology: &HydrologyConfig) {
    println!("\nLand fraction: {:.1}%", planet.land_fraction() * 100.0);

    let max_lake = hydrology.max_lake_cells(planet.size);
    let bodies = find_water_bodies(planet);
    let lakes = bodies.iter().filter(|b| b.len() <= max_lake).count();
    println!("Water bodies: {} ({} lakes, {} seas)", bodies.len(), lakes, bodies.len() - lakes);

    let mut histogram = [0usize; 10];
    for grid in &planet.faces {
        for i in 0..grid.pixel_count() {
            histogram[grid.biome_at(i).level() as usize - 1] += 1;
        }
    }

    println!("\nBiome histogram:");
    let total = planet.pixel_count().max(1);
    for biome in Biome::all() {
        let count = histogram[biome.level() as usize - 1];
        println!(
            "  {:>2} {:<15} {:>9} ({:>5.1}%)",
            biome.level(),
            biome.name(),
            count,
            count as f64 / total as f64 * 100.0
        );
    }
}

fn print_adjacency() {
    for face in Face::all() {
        for edge in Edge::all() {
            let link = adjacency(face, edge);
            println!(
                "{:<6} {:<6} -> {:<6} {:<6}{}",
                face.short_name(),
                format!("{:?}", edge).to_lowercase(),
                link.face.short_name(),
                format!("{:?}", link.edge).to_lowercase(),
                if link.reversed { "  (reversed)" } else { "" }
            );
        }
    }
}
