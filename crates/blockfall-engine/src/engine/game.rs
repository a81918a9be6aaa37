use super::{
    clock::Clock,
    config::GameConfig,
    game_state::{GameState, TickOutcome},
    piece_generator::PieceSeed,
    ports::{InputPort, RenderPort},
};

/// A running game wired to its input, renderer and clock.
///
/// Each [`Game::tick`] reads `now` from the clock, polls the input once,
/// advances the [`GameState`] and hands a fresh snapshot to the renderer.
/// The renderer sees every tick, including stalled ones and ticks after
/// game over.
///
/// # Example
///
/// ```
/// use std::time::Duration;
///
/// use blockfall_engine::{Game, GameConfig, ManualClock, NoInput, NoRender, PieceSeed};
///
/// let clock = ManualClock::new();
/// let mut game = Game::new(GameConfig::default(), PieceSeed::from_u128(3), NoInput, NoRender, &clock);
///
/// clock.advance(Duration::from_millis(501));
/// let outcome = game.tick();
/// assert!(outcome.gravity().is_some());
/// ```
#[derive(Debug)]
pub struct Game<I, R, C> {
    state: GameState,
    input: I,
    renderer: R,
    clock: C,
}

impl<I, R, C> Game<I, R, C>
where
    I: InputPort,
    R: RenderPort,
    C: Clock,
{
    pub fn new(config: GameConfig, seed: PieceSeed, input: I, renderer: R, clock: C) -> Self {
        let state = GameState::with_seed(config, seed, clock.now());
        Self {
            state,
            input,
            renderer,
            clock,
        }
    }

    /// Runs one tick and renders the resulting snapshot.
    pub fn tick(&mut self) -> TickOutcome {
        let now = self.clock.now();
        let commands = self.input.poll(now);
        let outcome = self.state.tick(now, &commands);

        let snapshot = self.state.snapshot();
        if outcome.entered_game_over() {
            self.renderer.game_over(&snapshot);
        }
        self.renderer.render(&snapshot);
        outcome
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }

    pub fn input(&self) -> &I {
        &self.input
    }

    pub fn input_mut(&mut self) -> &mut I {
        &mut self.input
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn renderer_mut(&mut self) -> &mut R {
        &mut self.renderer
    }

    pub fn into_parts(self) -> (GameState, I, R, C) {
        (self.state, self.input, self.renderer, self.clock)
    }
}
