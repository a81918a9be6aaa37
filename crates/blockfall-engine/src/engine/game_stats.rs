use serde::{Deserialize, Serialize};

/// Points awarded per cleared line.
pub const LINE_CLEAR_SCORE: usize = 100;

/// Points needed per level.
pub const LEVEL_SCORE: usize = 1000;

/// Game statistics tracking score, lines cleared, and piece count.
///
/// - **Score**: `100 × lines` for each lock, no multi-line bonus
/// - **Level**: `score / 1000`
/// - **Completed pieces**: Total number of pieces locked
/// - **Line clear distribution**: Count of locks that cleared 0, 1, 2, 3 or 4 lines
///
/// # Example
///
/// ```
/// use blockfall_engine::GameStats;
///
/// let mut stats = GameStats::new();
/// stats.complete_piece_lock(4);
/// stats.complete_piece_lock(0);
///
/// assert_eq!(stats.score(), 400);
/// assert_eq!(stats.completed_pieces(), 2);
/// assert_eq!(stats.line_cleared_counter(), &[1, 0, 0, 0, 1]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize, Serialize)]
pub struct GameStats {
    score: usize,
    completed_pieces: usize,
    total_cleared_lines: usize,
    line_cleared_counter: [usize; 5],
}

impl GameStats {
    /// Creates a new game statistics tracker with all counters at zero.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            score: 0,
            completed_pieces: 0,
            total_cleared_lines: 0,
            line_cleared_counter: [0; 5],
        }
    }

    #[must_use]
    pub const fn score(&self) -> usize {
        self.score
    }

    /// Returns the current level (integer division of the score by 1000).
    #[must_use]
    pub const fn level(&self) -> usize {
        self.score / LEVEL_SCORE
    }

    #[must_use]
    pub const fn completed_pieces(&self) -> usize {
        self.completed_pieces
    }

    #[must_use]
    pub const fn total_cleared_lines(&self) -> usize {
        self.total_cleared_lines
    }

    /// Returns a histogram of locks by the number of lines they cleared.
    #[must_use]
    pub const fn line_cleared_counter(&self) -> &[usize; 5] {
        &self.line_cleared_counter
    }

    /// Updates statistics after a piece lock that cleared `cleared_lines` rows.
    pub const fn complete_piece_lock(&mut self, cleared_lines: usize) {
        self.completed_pieces += 1;
        self.total_cleared_lines += cleared_lines;
        if cleared_lines < self.line_cleared_counter.len() {
            self.line_cleared_counter[cleared_lines] += 1;
        }
        self.score += LINE_CLEAR_SCORE * cleared_lines;
    }
}
