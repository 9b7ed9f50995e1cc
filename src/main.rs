//! SunnyLand main entry point.
//!
//! Opens a raylib window, builds the title screen from the configuration
//! file and drives the [`Engine`] until the window is closed.
//!
//! # Running
//!
//! ```sh
//! cargo run --release -- --config ./config.ini
//! ```

// Do not create console on Windows
#![cfg_attr(target_os = "windows", windows_subsystem = "windows")]

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use log::{error, info, warn};

use sunnyland::engine::Engine;
use sunnyland::game::build_title;
use sunnyland::platform::frame_budget_ms;
use sunnyland::platform::raylib_backend::{RaylibGfx, RaylibInput, open_window};
use sunnyland::platform::system::{SystemTime, ThreadSleeper};
use sunnyland::resources::gameconfig::GameConfig;

/// SunnyLand 2D platformer
#[derive(Parser)]
#[command(version, about = "A small side-scrolling platformer")]
struct Cli {
    /// Configuration file.
    #[arg(long, value_name = "PATH", default_value = "./config.ini")]
    config: PathBuf,

    /// Level to load instead of the one named in the configuration.
    #[arg(long, value_name = "PATH")]
    map: Option<String>,

    /// Write the effective configuration to the config file and exit.
    #[arg(long)]
    save_config: bool,
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    let mut config = GameConfig::with_path(&cli.config);
    if let Err(e) = config.load_from_file() {
        warn!("{}; using defaults", e);
    }
    if let Some(map) = cli.map {
        config.map_path = map;
    }

    if cli.save_config {
        return match config.save_to_file() {
            Ok(()) => ExitCode::SUCCESS,
            Err(e) => {
                error!("{}", e);
                ExitCode::FAILURE
            }
        };
    }

    let (rl, thread) = open_window(&config);
    let gfx = RaylibGfx::new(rl.clone(), thread, config.scale);
    let input = RaylibInput::new(rl);
    let sleeper = ThreadSleeper::new(frame_budget_ms(config.target_fps));
    let mut engine = Engine::new(gfx, input, SystemTime::new(), sleeper);

    let title = match build_title(engine.gfx_mut(), &config) {
        Ok(title) => title,
        Err(e) => {
            error!("{}", e);
            return ExitCode::FAILURE;
        }
    };
    engine.display_scene(Box::new(title));
    engine.reset_time();

    // --------------- Main loop ---------------
    loop {
        match engine.update() {
            Ok(true) => {}
            Ok(false) => break,
            Err(e) => {
                error!("{}", e);
                return ExitCode::FAILURE;
            }
        }
    }

    info!("Bye");
    ExitCode::SUCCESS
}
