#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that runs a twenty48 session in the terminal.

mod config;

use std::fs::File;

use anyhow::Result;
use clap::Parser;
use log::{debug, info, LevelFilter};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use simplelog::{ConfigBuilder, WriteLogger};
use twenty48_rendering::{Presentation, RenderingBackend, Scene};
use twenty48_rendering_terminal::TerminalBackend;
use twenty48_system_turn::TurnController;
use twenty48_world::{query, World};

use crate::config::{Args, FileConfig, ResolvedConfig};

/// Entry point for the twenty48 command-line interface.
fn main() -> Result<()> {
    let args = Args::parse();
    let file = FileConfig::load(args.config.as_deref())?;
    let config = ResolvedConfig::resolve(file, &args)?;
    init_logging(&config);

    let seed = config.seed.unwrap_or_else(rand::random);
    let controller = TurnController::new(config.spawn_policy);
    info!(
        "twenty48 starting: seed={seed:#018x}, spawn policy={:?}",
        controller.policy()
    );

    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut world = World::new();
    let mut events = Vec::new();
    let scene = Scene::new(*query::grid(&world), query::outcome(&world));
    let presentation = Presentation::new(config.bindings, config.colored);

    TerminalBackend::new().run(presentation, scene, move |direction, scene| {
        events.clear();
        let outcome = controller.play_turn(&mut world, direction, &mut rng, &mut events);
        debug!(
            "turn {} ({direction}) -> {outcome:?}: {events:?}",
            query::turn_index(&world)
        );

        scene.grid = *query::grid(&world);
        scene.outcome = outcome;
        Ok(())
    })?;

    info!("session finished");
    Ok(())
}

// Logs go to a file: stdout belongs to the raw-mode board.
fn init_logging(config: &ResolvedConfig) {
    if config.log_level == LevelFilter::Off {
        return;
    }

    let log_config = ConfigBuilder::new().set_time_format_rfc3339().build();
    match File::create(&config.log_file) {
        Ok(log_file) => {
            let _ = WriteLogger::init(config.log_level, log_config, log_file);
        }
        Err(error) => eprintln!(
            "logging disabled: cannot create {}: {error}",
            config.log_file.display()
        ),
    }
}
