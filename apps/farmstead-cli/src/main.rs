use clap::{Parser, Subcommand};
use farmstead_input::Action;
use farmstead_kernel::{AppState, BuildingType, OrbitCamera, Scene, SceneConfig, clock_seed};
use farmstead_render::{DebugTextRenderer, Renderer, render_scene};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "farmstead-cli", about = "Headless farmstead scene tool")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print version and crate info
    Info,
    /// Generate a scene and list its buildings
    Scene {
        /// Scene seed; defaults to the wall clock
        #[arg(short, long)]
        seed: Option<u64>,
        /// Number of buildings to place
        #[arg(short, long, default_value = "6")]
        buildings: usize,
        /// Print the scene as JSON
        #[arg(long)]
        json: bool,
    },
    /// Replay ticks and camera moves, then dump the resulting frame
    Frame {
        /// Scene seed; defaults to the wall clock
        #[arg(short, long)]
        seed: Option<u64>,
        /// Number of animator ticks to run
        #[arg(short, long, default_value = "0")]
        ticks: u64,
        /// Camera moves, e.g. "LLUR"
        #[arg(short, long, default_value = "")]
        moves: String,
    },
}

fn resolve_seed(seed: Option<u64>) -> u64 {
    let seed = seed.unwrap_or_else(clock_seed);
    tracing::info!(seed, "using seed");
    seed
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .init();

    match cli.command {
        Commands::Info => {
            let config = SceneConfig::default();
            let camera = OrbitCamera::default();
            println!("farmstead-cli v{}", env!("CARGO_PKG_VERSION"));
            println!("common: {}", farmstead_common::crate_info());
            println!("render: {}", farmstead_render::crate_info());
            println!("input: {}", farmstead_input::crate_info());
            println!(
                "scene: buildings={} placement=[-{p}, {p}) ground={}x{}",
                config.building_count,
                config.ground_half_extent * 2,
                config.ground_half_extent * 2,
                p = config.placement_half_extent,
            );
            println!(
                "camera: azimuth={} height={} step={}",
                camera.azimuth(),
                camera.height(),
                camera.height_step()
            );
        }
        Commands::Scene {
            seed,
            buildings,
            json,
        } => {
            let config = SceneConfig {
                building_count: buildings,
                ..SceneConfig::default()
            };
            let scene = Scene::from_seed(&config, resolve_seed(seed))?;

            if json {
                println!("{}", serde_json::to_string_pretty(&scene)?);
            } else {
                println!(
                    "Scene: {} buildings ({} houses, {} barns, {} silos)",
                    scene.buildings().len(),
                    scene.count_of(BuildingType::House),
                    scene.count_of(BuildingType::Barn),
                    scene.count_of(BuildingType::Silo)
                );
                let state = AppState::new(scene);
                print!("{}", DebugTextRenderer::new().render(&render_scene(&state)));
            }
        }
        Commands::Frame { seed, ticks, moves } => {
            let scene = Scene::from_seed(&SceneConfig::default(), resolve_seed(seed))?;
            let mut state = AppState::new(scene);

            for _ in 0..ticks {
                state.tick();
            }
            let actions = Action::parse_moves(&moves);
            for action in &actions {
                action.apply(&mut state);
            }
            tracing::debug!(ticks, moves = actions.len(), "replay finished");

            let camera = state.camera();
            println!(
                "After {} ticks and {} moves: azimuth={:.2} height={:.1}",
                state.ticks(),
                actions.len(),
                camera.azimuth(),
                camera.height()
            );
            print!("{}", DebugTextRenderer::verbose().render(&render_scene(&state)));
        }
    }

    Ok(())
}
