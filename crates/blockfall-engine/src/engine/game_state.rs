use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::{
    MoveError, PieceCollisionError,
    core::{Board, Piece},
};

use super::{
    config::GameConfig,
    game_stats::GameStats,
    piece_generator::{PieceGenerator, PieceSeed},
    ports::Command,
    snapshot::{PieceSnapshot, Snapshot},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, derive_more::IsVariant)]
pub enum GamePhase {
    Playing,
    GameOver,
}

/// Result of one gravity step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GravityOutcome {
    /// The piece moved down one row.
    Fell,
    /// The piece could not descend and was locked onto the board.
    Locked { cleared_lines: usize },
}

/// Something that happened during a tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickEvent {
    Applied(Command),
    Rejected(Command),
    /// The tick fell inside an input stall and was skipped.
    Stalled,
    Gravity(GravityOutcome),
    GameOver,
    Reset,
}

/// Everything a single [`GameState::tick`] did, in order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TickOutcome {
    events: Vec<TickEvent>,
}

impl TickOutcome {
    fn push(&mut self, event: TickEvent) {
        self.events.push(event);
    }

    #[must_use]
    pub fn events(&self) -> &[TickEvent] {
        &self.events
    }

    #[must_use]
    pub fn gravity(&self) -> Option<GravityOutcome> {
        self.events.iter().find_map(|event| match event {
            TickEvent::Gravity(outcome) => Some(*outcome),
            _ => None,
        })
    }

    /// Number of lines cleared by a lock during this tick, if a lock happened.
    #[must_use]
    pub fn cleared_lines(&self) -> Option<usize> {
        match self.gravity()? {
            GravityOutcome::Locked { cleared_lines } => Some(cleared_lines),
            GravityOutcome::Fell => None,
        }
    }

    #[must_use]
    pub fn entered_game_over(&self) -> bool {
        self.events.contains(&TickEvent::GameOver)
    }

    #[must_use]
    pub fn is_reset(&self) -> bool {
        self.events.contains(&TickEvent::Reset)
    }

    #[must_use]
    pub fn is_stalled(&self) -> bool {
        self.events.contains(&TickEvent::Stalled)
    }
}

/// The game state machine: board, falling piece, score and lifecycle.
///
/// All time values are monotonic durations from an arbitrary origin, supplied
/// by the caller; the state never reads a clock itself.
///
/// While [`GamePhase::Playing`], the active piece never overlaps a locked cell
/// or leaves the board. Every move is checked against the board before it is
/// committed; rejected moves leave the state untouched.
#[derive(Debug, Clone)]
pub struct GameState {
    config: GameConfig,
    board: Board,
    active_piece: Piece,
    generator: PieceGenerator,
    stats: GameStats,
    phase: GamePhase,
    last_fall: Duration,
    stalled_until: Option<Duration>,
}

impl GameState {
    /// Starts a game with a random piece seed.
    #[must_use]
    pub fn new(config: GameConfig, now: Duration) -> Self {
        Self::with_generator(config, PieceGenerator::new(), now)
    }

    /// Like [`Self::new`], but with a specific seed for deterministic piece generation.
    #[must_use]
    pub fn with_seed(config: GameConfig, seed: PieceSeed, now: Duration) -> Self {
        Self::with_generator(config, PieceGenerator::with_seed(seed), now)
    }

    #[must_use]
    pub fn with_generator(config: GameConfig, generator: PieceGenerator, now: Duration) -> Self {
        Self::start(config, generator, Board::EMPTY, now)
    }

    /// Starts a game on a prepared board.
    ///
    /// The first piece spawns as usual and ends the game at once if it
    /// collides with `board`.
    #[doc(hidden)]
    #[must_use]
    pub fn with_board(config: GameConfig, seed: PieceSeed, board: Board, now: Duration) -> Self {
        Self::start(config, PieceGenerator::with_seed(seed), board, now)
    }

    fn start(config: GameConfig, mut generator: PieceGenerator, board: Board, now: Duration) -> Self {
        let active_piece = generator.next_piece();
        let mut this = Self {
            config,
            board,
            active_piece,
            generator,
            stats: GameStats::new(),
            phase: GamePhase::Playing,
            last_fall: now,
            stalled_until: None,
        };
        this.check_spawn();
        this
    }

    #[must_use]
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    #[must_use]
    pub fn board(&self) -> &Board {
        &self.board
    }

    #[must_use]
    pub fn active_piece(&self) -> &Piece {
        &self.active_piece
    }

    #[must_use]
    pub fn stats(&self) -> &GameStats {
        &self.stats
    }

    #[must_use]
    pub fn score(&self) -> usize {
        self.stats.score()
    }

    #[must_use]
    pub fn level(&self) -> usize {
        self.stats.level()
    }

    #[must_use]
    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    /// Current time between gravity steps, derived from the score.
    #[must_use]
    pub fn fall_interval(&self) -> Duration {
        self.config.fall_interval(self.level())
    }

    /// End of the current input stall, if one is active.
    #[must_use]
    pub fn stalled_until(&self) -> Option<Duration> {
        self.stalled_until
    }

    /// Replaces the active piece if it fits on the board.
    pub fn set_active_piece(&mut self, piece: Piece) -> Result<(), MoveError> {
        if self.phase.is_game_over() {
            return Err(MoveError::GameOver);
        }
        if piece.collides(&self.board) {
            return Err(PieceCollisionError.into());
        }
        self.active_piece = piece;
        Ok(())
    }

    pub fn try_move_left(&mut self) -> Result<(), MoveError> {
        self.set_active_piece(self.active_piece.left())
    }

    pub fn try_move_right(&mut self) -> Result<(), MoveError> {
        self.set_active_piece(self.active_piece.right())
    }

    pub fn try_soft_drop(&mut self) -> Result<(), MoveError> {
        self.set_active_piece(self.active_piece.down())
    }

    /// Rotates the active piece clockwise; on collision the orientation is kept.
    pub fn try_rotate(&mut self) -> Result<(), MoveError> {
        self.set_active_piece(self.active_piece.rotated_cw())
    }

    /// Runs one tick at time `now` with the commands read from the input.
    pub fn tick(&mut self, now: Duration, commands: &[Command]) -> TickOutcome {
        let mut outcome = TickOutcome::default();

        if self.phase.is_game_over() {
            if commands.contains(&Command::Reset) {
                self.reset(now);
                outcome.push(TickEvent::Reset);
            }
            return outcome;
        }

        if self.stalled_until.is_some_and(|until| now < until) {
            outcome.push(TickEvent::Stalled);
            return outcome;
        }
        self.stalled_until = None;

        for &command in commands {
            if let Some(event) = self.apply_command(now, command) {
                outcome.push(event);
            }
        }

        if let Some(gravity) = self.apply_gravity(now) {
            outcome.push(TickEvent::Gravity(gravity));
            if self.phase.is_game_over() {
                outcome.push(TickEvent::GameOver);
            }
        }

        outcome
    }

    fn apply_command(&mut self, now: Duration, command: Command) -> Option<TickEvent> {
        let result = match command {
            Command::MoveLeft => self.try_move_left(),
            Command::MoveRight => self.try_move_right(),
            Command::RotateCw => self.try_rotate(),
            Command::SoftDrop => self.try_soft_drop(),
            Command::Reset => {
                log::debug!("ignoring reset request while playing");
                return None;
            }
        };

        match command {
            Command::MoveLeft | Command::MoveRight if result.is_ok() => {
                self.stall(now, self.config.move_stall());
            }
            Command::RotateCw => self.stall(now, self.config.rotate_stall()),
            _ => {}
        }

        Some(match result {
            Ok(()) => TickEvent::Applied(command),
            Err(_) => TickEvent::Rejected(command),
        })
    }

    fn stall(&mut self, now: Duration, duration: Duration) {
        if !self.config.couple_input_stall || duration.is_zero() {
            return;
        }
        // Stalls raised in the same tick run back to back.
        let start = self.stalled_until.map_or(now, |prev| prev.max(now));
        self.stalled_until = Some(start + duration);
    }

    /// Runs gravity if more than the fall interval has passed since the last fall.
    ///
    /// Returns `None` when gravity was not due (or the game is over). When due,
    /// the piece either descends one row or is locked, in which case full rows
    /// are cleared, the score is updated and the next piece spawns. The fall
    /// timer restarts at `now` in both cases.
    pub fn apply_gravity(&mut self, now: Duration) -> Option<GravityOutcome> {
        if self.phase.is_game_over() {
            return None;
        }
        if now.saturating_sub(self.last_fall) <= self.fall_interval() {
            return None;
        }
        self.last_fall = now;

        if self.try_soft_drop().is_ok() {
            return Some(GravityOutcome::Fell);
        }
        let cleared_lines = self.lock_active_piece();
        self.spawn_next();
        Some(GravityOutcome::Locked { cleared_lines })
    }

    fn lock_active_piece(&mut self) -> usize {
        let level_before = self.level();
        self.active_piece.lock_into(&mut self.board);
        let cleared_lines = self.board.clear_full_rows();
        self.stats.complete_piece_lock(cleared_lines);
        log::debug!(
            "locked {} at {}, cleared {cleared_lines} lines, score {}",
            self.active_piece.kind().as_char(),
            self.active_piece.position(),
            self.score(),
        );
        if self.level() > level_before {
            log::info!(
                "level {} reached, fall interval {} ms",
                self.level(),
                self.fall_interval().as_millis()
            );
        }
        cleared_lines
    }

    fn spawn_next(&mut self) {
        self.active_piece = self.generator.next_piece();
        self.check_spawn();
    }

    /// Enters game over if the freshly spawned piece overlaps the board. The board is not modified.
    fn check_spawn(&mut self) {
        if self.active_piece.collides(&self.board) {
            self.phase = GamePhase::GameOver;
            self.stalled_until = None;
            log::info!(
                "game over: {} blocked at spawn, final score {}",
                self.active_piece.kind().as_char(),
                self.score()
            );
        } else {
            log::debug!(
                "spawned {} ({:?}) at {}",
                self.active_piece.kind().as_char(),
                self.active_piece.color(),
                self.active_piece.position()
            );
        }
    }

    /// Starts a new game: empty board, zero score and a fresh piece.
    ///
    /// The piece generator continues its sequence.
    pub fn reset(&mut self, now: Duration) {
        log::info!("resetting game after score {}", self.score());
        self.board = Board::EMPTY;
        self.stats = GameStats::new();
        self.phase = GamePhase::Playing;
        self.last_fall = now;
        self.stalled_until = None;
        self.spawn_next();
    }

    /// Captures the current state for rendering.
    #[must_use]
    pub fn snapshot(&self) -> Snapshot {
        let piece = self
            .phase
            .is_playing()
            .then(|| PieceSnapshot::from_piece(&self.active_piece));
        Snapshot {
            board: *self.board.as_rows(),
            piece,
            score: self.score(),
            level: self.level(),
            phase: self.phase,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{BOARD_HEIGHT, BOARD_WIDTH, Cell, Color, PiecePosition, ShapeKind};

    fn ms(millis: u64) -> Duration {
        Duration::from_millis(millis)
    }

    fn state() -> GameState {
        GameState::with_seed(GameConfig::default(), PieceSeed::from_u128(11), Duration::ZERO)
    }

    fn uncoupled_state() -> GameState {
        let config = GameConfig {
            couple_input_stall: false,
            ..GameConfig::default()
        };
        GameState::with_seed(config, PieceSeed::from_u128(11), Duration::ZERO)
    }

    fn place(state: &mut GameState, kind: ShapeKind, x: i32, y: i32) {
        let piece = Piece::spawn(kind, Color::Red).at(PiecePosition::new(x, y));
        state.set_active_piece(piece).unwrap();
    }

    #[test]
    fn test_initial_state() {
        let state = state();
        assert!(state.phase().is_playing());
        assert!(state.board().is_empty());
        assert_eq!(state.score(), 0);
        assert_eq!(state.active_piece().position().y(), 0);
        assert_eq!(state.fall_interval(), ms(500));
    }

    #[test]
    fn test_move_left_until_wall() {
        let mut state = uncoupled_state();
        place(&mut state, ShapeKind::O, 4, 0);
        for expected in (0..4).rev() {
            state.try_move_left().unwrap();
            assert_eq!(state.active_piece().position().x(), expected);
        }
        let before = *state.active_piece();
        assert!(matches!(
            state.try_move_left(),
            Err(MoveError::PieceCollision(_))
        ));
        assert_eq!(*state.active_piece(), before);
    }

    #[test]
    fn test_move_right_until_wall() {
        let mut state = uncoupled_state();
        place(&mut state, ShapeKind::I, 3, 0);
        for _ in 0..3 {
            state.try_move_right().unwrap();
        }
        assert_eq!(state.active_piece().position().x(), 6);
        assert!(state.try_move_right().is_err());
        assert_eq!(state.active_piece().position().x(), 6);
    }

    #[test]
    fn test_soft_drop_stops_at_floor_without_locking() {
        let mut state = uncoupled_state();
        place(&mut state, ShapeKind::O, 4, 0);
        for _ in 0..16 {
            state.try_soft_drop().unwrap();
        }
        assert!(state.try_soft_drop().is_err());
        assert_eq!(state.active_piece().position().y(), 16);
        assert!(state.board().is_empty());
    }

    #[test]
    fn test_rotate_rejected_keeps_orientation() {
        let mut state = uncoupled_state();
        // Upright T with its stem pointing right, flush against the right wall.
        let t = Piece::spawn(ShapeKind::T, Color::Blue)
            .rotated_cw()
            .at(PiecePosition::new(8, 0));
        state.set_active_piece(t).unwrap();
        assert!(state.try_rotate().is_err());
        assert_eq!(*state.active_piece(), t);
    }

    #[test]
    fn test_gravity_waits_for_interval() {
        let mut state = state();
        let y = state.active_piece().position().y();
        assert_eq!(state.apply_gravity(ms(500)), None);
        assert_eq!(state.active_piece().position().y(), y);
        assert_eq!(state.apply_gravity(ms(501)), Some(GravityOutcome::Fell));
        assert_eq!(state.active_piece().position().y(), y + 1);
        // Timer restarted at 501.
        assert_eq!(state.apply_gravity(ms(1000)), None);
        assert_eq!(state.apply_gravity(ms(1002)), Some(GravityOutcome::Fell));
    }

    #[test]
    fn test_gravity_locks_at_floor_and_spawns() {
        let mut state = state();
        place(&mut state, ShapeKind::O, 0, 16);
        let outcome = state.apply_gravity(ms(600));
        assert_eq!(outcome, Some(GravityOutcome::Locked { cleared_lines: 0 }));
        assert_eq!(state.board().occupied_count(), 4);
        assert_eq!(state.board().cell(0, 17), Some(Cell::Filled(Color::Red)));
        assert_eq!(state.stats().completed_pieces(), 1);
        assert_eq!(state.active_piece().position().y(), 0);
        assert!(state.phase().is_playing());
    }

    #[test]
    fn test_lock_clears_line_and_scores() {
        let mut state = state();
        let mut rows = [[Cell::Empty; BOARD_WIDTH]; BOARD_HEIGHT];
        for x in 0..BOARD_WIDTH {
            if x != 5 {
                rows[17][x] = Cell::Filled(Color::Gray);
            }
        }
        state.board = Board::from_rows(rows);
        // Upright bar filling the gap at column 5, rows 14..=17.
        let bar = Piece::spawn(ShapeKind::I, Color::Cyan)
            .rotated_cw()
            .at(PiecePosition::new(5, 14));
        state.set_active_piece(bar).unwrap();

        let outcome = state.apply_gravity(ms(501));
        assert_eq!(outcome, Some(GravityOutcome::Locked { cleared_lines: 1 }));
        assert_eq!(state.score(), 100);
        // Remaining bar cells shifted down by one.
        for y in 15..BOARD_HEIGHT {
            let y = i32::try_from(y).unwrap();
            assert_eq!(state.board().cell(5, y), Some(Cell::Filled(Color::Cyan)));
        }
        assert_eq!(state.board().occupied_count(), 3);
    }

    #[test]
    fn test_level_speeds_up_gravity() {
        let mut state = state();
        state.stats = {
            let mut stats = GameStats::new();
            stats.complete_piece_lock(4);
            stats.complete_piece_lock(4);
            stats.complete_piece_lock(4);
            stats
        };
        assert_eq!(state.level(), 1);
        assert_eq!(state.fall_interval(), ms(450));
        assert_eq!(state.apply_gravity(ms(451)), Some(GravityOutcome::Fell));
    }

    #[test]
    fn test_spawn_collision_enters_game_over_without_touching_board() {
        let mut state = state();
        let mut rows = [[Cell::Empty; BOARD_WIDTH]; BOARD_HEIGHT];
        for x in 2..8 {
            rows[0][x] = Cell::Filled(Color::Green);
        }
        // Active piece parked in the bottom-left corner, away from the blocked spawn area.
        place(&mut state, ShapeKind::O, 0, 16);
        state.board = Board::from_rows(rows);

        let outcome = state.tick(ms(501), &[]);
        assert_eq!(outcome.cleared_lines(), Some(0));
        assert!(outcome.entered_game_over());
        assert!(state.phase().is_game_over());

        let mut expected = rows;
        expected[16][0] = Cell::Filled(Color::Red);
        expected[16][1] = Cell::Filled(Color::Red);
        expected[17][0] = Cell::Filled(Color::Red);
        expected[17][1] = Cell::Filled(Color::Red);
        assert_eq!(state.board(), &Board::from_rows(expected));
        assert!(state.snapshot().piece.is_none());
    }

    #[test]
    fn test_game_over_ignores_moves_and_gravity() {
        let mut state = state();
        state.phase = GamePhase::GameOver;
        let board = state.board().clone();
        let outcome = state.tick(ms(10_000), &[Command::MoveLeft, Command::SoftDrop]);
        assert!(outcome.events().is_empty());
        assert_eq!(state.board(), &board);
        assert!(matches!(state.try_move_left(), Err(MoveError::GameOver)));
    }

    #[test]
    fn test_reset_after_game_over() {
        let mut state = state();
        place(&mut state, ShapeKind::O, 0, 16);
        state.stats.complete_piece_lock(3);
        state.phase = GamePhase::GameOver;

        let outcome = state.tick(ms(2000), &[Command::Reset]);
        assert!(outcome.is_reset());
        assert!(state.phase().is_playing());
        assert_eq!(state.score(), 0);
        assert!(state.board().is_empty());
        assert_eq!(state.active_piece().position().y(), 0);
        // Fall timer restarted at reset time.
        assert_eq!(state.apply_gravity(ms(2500)), None);
        assert!(state.apply_gravity(ms(2501)).is_some());
    }

    #[test]
    fn test_reset_ignored_while_playing() {
        let mut state = uncoupled_state();
        state.stats.complete_piece_lock(2);
        let outcome = state.tick(ms(1), &[Command::Reset]);
        assert!(outcome.events().is_empty());
        assert_eq!(state.score(), 200);
    }

    #[test]
    fn test_tick_applies_horizontal_then_vertical() {
        let mut state = uncoupled_state();
        place(&mut state, ShapeKind::I, 6, 0);
        // Moving right is blocked by the wall; rotation then happens at column 6.
        let outcome = state.tick(ms(1), &[Command::MoveRight, Command::RotateCw]);
        assert_eq!(
            outcome.events(),
            [
                TickEvent::Rejected(Command::MoveRight),
                TickEvent::Applied(Command::RotateCw),
            ]
        );
        assert_eq!(state.active_piece().position(), PiecePosition::new(6, 0));
        assert_eq!(state.active_piece().shape().height(), 4);
    }

    #[test]
    fn test_move_stall_blocks_following_ticks() {
        let mut state = state();
        place(&mut state, ShapeKind::O, 4, 0);
        let outcome = state.tick(ms(10), &[Command::MoveLeft]);
        assert_eq!(outcome.events(), [TickEvent::Applied(Command::MoveLeft)]);
        assert_eq!(state.stalled_until(), Some(ms(110)));

        let outcome = state.tick(ms(60), &[Command::MoveLeft]);
        assert!(outcome.is_stalled());
        assert_eq!(state.active_piece().position().x(), 3);

        let outcome = state.tick(ms(110), &[Command::MoveLeft]);
        assert_eq!(outcome.events(), [TickEvent::Applied(Command::MoveLeft)]);
        assert_eq!(state.active_piece().position().x(), 2);
    }

    #[test]
    fn test_rejected_move_does_not_stall() {
        let mut state = state();
        place(&mut state, ShapeKind::O, 0, 0);
        state.tick(ms(10), &[Command::MoveLeft]);
        assert_eq!(state.stalled_until(), None);
    }

    #[test]
    fn test_rotate_attempt_stalls_even_when_rejected() {
        let mut state = state();
        let t = Piece::spawn(ShapeKind::T, Color::Blue)
            .rotated_cw()
            .at(PiecePosition::new(8, 0));
        state.set_active_piece(t).unwrap();
        let outcome = state.tick(ms(10), &[Command::RotateCw]);
        assert_eq!(outcome.events(), [TickEvent::Rejected(Command::RotateCw)]);
        assert_eq!(state.stalled_until(), Some(ms(160)));
    }

    #[test]
    fn test_move_and_rotate_stalls_add_up() {
        let mut state = state();
        place(&mut state, ShapeKind::T, 4, 5);
        let outcome = state.tick(ms(10), &[Command::MoveLeft, Command::RotateCw]);
        assert_eq!(
            outcome.events(),
            [
                TickEvent::Applied(Command::MoveLeft),
                TickEvent::Applied(Command::RotateCw),
            ]
        );
        assert_eq!(state.stalled_until(), Some(ms(260)));

        assert!(state.tick(ms(200), &[Command::MoveLeft]).is_stalled());
        assert_eq!(state.active_piece().position().x(), 3);
        assert!(state.tick(ms(259), &[Command::MoveLeft]).is_stalled());

        let outcome = state.tick(ms(260), &[Command::MoveLeft]);
        assert_eq!(outcome.events()[0], TickEvent::Applied(Command::MoveLeft));
        assert_eq!(state.active_piece().position().x(), 2);
    }

    #[test]
    fn test_stall_delays_gravity() {
        let mut state = state();
        place(&mut state, ShapeKind::O, 4, 0);
        state.tick(ms(450), &[Command::MoveLeft]);
        // Gravity is due at 501 but the stall runs until 550.
        assert!(state.tick(ms(520), &[]).is_stalled());
        assert_eq!(state.active_piece().position().y(), 0);
        let outcome = state.tick(ms(550), &[]);
        assert_eq!(outcome.gravity(), Some(GravityOutcome::Fell));
    }

    #[test]
    fn test_soft_drop_does_not_stall() {
        let mut state = state();
        state.tick(ms(10), &[Command::SoftDrop]);
        assert_eq!(state.stalled_until(), None);
        assert_eq!(state.active_piece().position().y(), 1);
    }

    #[test]
    fn test_uncoupled_stall_is_disabled() {
        let mut state = uncoupled_state();
        place(&mut state, ShapeKind::O, 4, 0);
        state.tick(ms(10), &[Command::MoveLeft]);
        state.tick(ms(20), &[Command::MoveLeft]);
        assert_eq!(state.active_piece().position().x(), 2);
    }

    #[test]
    fn test_snapshot_contents() {
        let state = state();
        let snapshot = state.snapshot();
        assert_eq!(snapshot.score, 0);
        assert_eq!(snapshot.level, 0);
        assert_eq!(snapshot.phase, GamePhase::Playing);
        let piece = snapshot.piece.as_ref().unwrap();
        assert_eq!(piece.cells.len(), 4);
        assert_eq!(piece.color, state.active_piece().color());
        assert_eq!(piece.kind, state.active_piece().kind());
        let displayed = snapshot
            .display_rows()
            .flatten()
            .filter(|cell| !cell.is_empty())
            .count();
        assert_eq!(displayed, 4);
    }

    #[test]
    fn test_snapshot_serialization() {
        let snapshot = state().snapshot();
        let json = serde_json::to_string(&snapshot).unwrap();
        let back: Snapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(back, snapshot);
    }
}
