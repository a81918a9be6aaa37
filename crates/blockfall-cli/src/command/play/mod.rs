use std::path::PathBuf;

use blockfall_engine::PieceSeed;
use rand::Rng as _;

use crate::{command::play::app::PlayApp, config::HostConfig, tui::Tui, util};

mod app;
mod keyboard;
mod terminal_renderer;

#[derive(Default, Debug, Clone, clap::Args)]
pub(crate) struct PlayArg {
    /// Piece seed as 32 hex digits (random if omitted)
    #[clap(long)]
    seed: Option<PieceSeed>,
    /// JSON config file; only its `game` section applies to keyboard play
    #[clap(long)]
    config: Option<PathBuf>,
    /// Write log records to this file
    #[clap(long)]
    log_file: Option<PathBuf>,
}

pub(crate) fn run(arg: &PlayArg) -> anyhow::Result<()> {
    let PlayArg {
        seed,
        config,
        log_file,
    } = arg;

    util::init_logger(log_file.as_deref(), false)?;
    let config = HostConfig::load(config.as_deref())?;
    if config.has_custom_stick() {
        log::warn!("stick settings have no effect with keyboard input");
    }
    let seed = seed.unwrap_or_else(|| rand::rng().random());
    log::info!("starting game with seed {seed}");

    let mut app = PlayApp::new(config.game, seed);
    Tui::new().run(&mut app)?;

    log::info!("quit with score {}", app.score());
    Ok(())
}
