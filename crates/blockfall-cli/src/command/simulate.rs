use std::{path::PathBuf, time::Duration};

use blockfall_engine::{Game, ManualClock, PieceSeed, RenderPort, Snapshot};
use blockfall_input::{AnalogInput, AnalogSource, StickConfig};
use rand::{Rng as _, SeedableRng as _};
use rand_pcg::Pcg32;
use serde::Serialize;

use crate::{config::HostConfig, util};

#[derive(Default, Debug, Clone, clap::Args)]
pub(crate) struct SimulateArg {
    /// Piece seed as 32 hex digits (random if omitted)
    #[clap(long)]
    seed: Option<PieceSeed>,
    /// Seed of the random stick
    #[clap(long, default_value_t = 0)]
    bot_seed: u64,
    /// Number of ticks to run
    #[clap(long, default_value_t = 20_000)]
    ticks: u64,
    /// Simulated time between ticks in milliseconds
    #[clap(long, default_value_t = 16)]
    tick_ms: u64,
    /// JSON config file with `game` and `stick` sections
    #[clap(long)]
    config: Option<PathBuf>,
    /// Log to stderr (filtered by `RUST_LOG`)
    #[clap(long)]
    verbose: bool,
}

/// Summary printed after a simulation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub(crate) struct SimulationReport {
    seed: PieceSeed,
    ticks: u64,
    /// Games started, including the one still running at the end.
    games: usize,
    final_score: usize,
    best_score: usize,
    /// Pieces locked over all games.
    pieces: usize,
    /// Lines cleared over all games.
    lines: usize,
}

pub(crate) fn run(arg: &SimulateArg) -> anyhow::Result<()> {
    let SimulateArg {
        seed,
        bot_seed,
        ticks,
        tick_ms,
        config,
        verbose,
    } = arg;

    util::init_logger(None, *verbose)?;
    let config = HostConfig::load(config.as_deref())?;
    let seed = seed.unwrap_or_else(|| rand::rng().random());
    log::info!("simulating {ticks} ticks of {tick_ms} ms with seed {seed}");

    let report = simulate(&config, seed, *bot_seed, *ticks, Duration::from_millis(*tick_ms));
    util::print_json(&report)?;
    Ok(())
}

fn simulate(
    config: &HostConfig,
    seed: PieceSeed,
    bot_seed: u64,
    ticks: u64,
    tick: Duration,
) -> SimulationReport {
    let clock = ManualClock::new();
    let input = AnalogInput::new(RandomStick::new(bot_seed, &config.stick), config.stick.clone());
    let mut game = Game::new(config.game.clone(), seed, input, ScoreTally::default(), &clock);

    let mut pieces = 0;
    let mut lines = 0;
    for _ in 0..ticks {
        clock.advance(tick);
        let game_over = game.state().phase().is_game_over();
        game.input_mut().source_mut().hold_button(game_over);

        let outcome = game.tick();
        if let Some(cleared) = outcome.cleared_lines() {
            pieces += 1;
            lines += cleared;
        }
        if outcome.is_reset() {
            log::debug!("game {} started", game.renderer().finished.len() + 1);
        }
    }

    let final_score = game.state().score();
    let tally = game.renderer();
    SimulationReport {
        seed,
        ticks,
        games: tally.finished.len() + usize::from(game.state().phase().is_playing()),
        final_score,
        best_score: tally.finished.iter().copied().fold(final_score, usize::max),
        pieces,
        lines,
    }
}

/// Stick pushed to random positions, with the button under external control.
#[derive(Debug, Clone)]
struct RandomStick {
    rng: Pcg32,
    max_raw: u16,
    button: bool,
}

impl RandomStick {
    fn new(seed: u64, config: &StickConfig) -> Self {
        Self {
            rng: Pcg32::seed_from_u64(seed),
            max_raw: config.max_raw,
            button: false,
        }
    }

    fn hold_button(&mut self, pressed: bool) {
        self.button = pressed;
    }
}

impl AnalogSource for RandomStick {
    fn read_horizontal(&mut self) -> u16 {
        self.rng.random_range(0..=self.max_raw)
    }

    fn read_vertical(&mut self) -> u16 {
        self.rng.random_range(0..=self.max_raw)
    }

    fn button_pressed(&mut self) -> bool {
        self.button
    }
}

/// Render port recording the final score of every finished game.
#[derive(Debug, Default)]
struct ScoreTally {
    finished: Vec<usize>,
}

impl RenderPort for ScoreTally {
    fn render(&mut self, _snapshot: &Snapshot) {}

    fn game_over(&mut self, snapshot: &Snapshot) {
        self.finished.push(snapshot.score);
        log::info!(
            "game {} over: score {}, level {}",
            self.finished.len(),
            snapshot.score,
            snapshot.level
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run_default(ticks: u64) -> SimulationReport {
        simulate(
            &HostConfig::default(),
            PieceSeed::from_u128(0x5eed),
            7,
            ticks,
            Duration::from_millis(16),
        )
    }

    #[test]
    fn test_simulation_is_deterministic() {
        assert_eq!(run_default(3000), run_default(3000));
    }

    #[test]
    fn test_random_stick_plays_and_restarts() {
        let report = run_default(40_000);
        assert!(report.pieces > 0);
        assert!(report.games >= 1);
        assert!(report.best_score >= report.final_score);
        assert_eq!(report.best_score % 100, 0);
        assert!(report.lines * 100 >= report.best_score);
    }

    #[test]
    fn test_zero_ticks() {
        let report = run_default(0);
        assert_eq!(report.games, 1);
        assert_eq!(report.pieces, 0);
        assert_eq!(report.final_score, 0);
    }

    #[test]
    fn test_report_fields() {
        let report = run_default(10);
        let json = serde_json::to_value(&report).unwrap();
        let keys: Vec<_> = json.as_object().unwrap().keys().cloned().collect();
        assert_eq!(keys.len(), 7, "unexpected report shape: {keys:?}");
        assert_eq!(json["seed"], "00000000000000000000000000005eed");
    }
}
