//! Game loop: the agent plays one board to completion.
//!
//! Each step the session asks the knowledge base for a safe move, falls back
//! to a random one, reveals it on the board, and feeds the count back to
//! `observe`. Every mine the knowledge base proves is flagged on the board.

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::board::{Board, MineOracle};
use crate::core::{BoardConfig, Cell, CheckpointError, ConfigError, GameRng, GameRngState, KnowledgeError};
use crate::logic::{Deduction, KnowledgeBase, Sentence};

/// Configuration for a game session.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Board dimensions and mine total.
    pub board: BoardConfig,

    /// Seed for both mine placement and random moves.
    pub seed: u64,

    /// Maximum reveals before the session gives up.
    pub max_moves: usize,

    /// Before guessing, combine "the remaining mines are among the unknown
    /// cells" with the stored sentences.
    pub use_mine_total: bool,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            board: BoardConfig::default(),
            seed: 0,
            max_moves: 10_000,
            use_mine_total: true,
        }
    }
}

impl SessionConfig {
    /// Create a session config with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the board configuration.
    pub fn with_board(mut self, board: BoardConfig) -> Self {
        self.board = board;
        self
    }

    /// Set the seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Set maximum reveals per game.
    pub fn with_max_moves(mut self, max: usize) -> Self {
        self.max_moves = max;
        self
    }

    /// Enable or disable the mine-total sentence.
    pub fn with_mine_total(mut self, enabled: bool) -> Self {
        self.use_mine_total = enabled;
        self
    }
}

/// How a move was chosen.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum MoveKind {
    /// Proven safe by the knowledge base.
    Safe,
    /// Picked at random among cells not known to be mines.
    Random,
}

/// Final result of a session.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameOutcome {
    /// Every mine was flagged.
    Won { moves: usize },
    /// A mine was revealed.
    Lost { cell: Cell, moves: usize },
    /// No cell is left to reveal but the game is not won.
    Exhausted { moves: usize },
    /// `max_moves` reveals were made.
    MoveLimit { moves: usize },
}

impl GameOutcome {
    #[must_use]
    pub fn is_win(&self) -> bool {
        matches!(self, GameOutcome::Won { .. })
    }

    /// Number of reveals made.
    #[must_use]
    pub fn moves(&self) -> usize {
        match *self {
            GameOutcome::Won { moves }
            | GameOutcome::Lost { moves, .. }
            | GameOutcome::Exhausted { moves }
            | GameOutcome::MoveLimit { moves } => moves,
        }
    }
}

/// Result of one step.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StepOutcome {
    /// A safe cell was revealed and observed.
    Revealed {
        cell: Cell,
        count: usize,
        kind: MoveKind,
        deduction: Deduction,
    },
    /// The revealed cell was a mine.
    Exploded { cell: Cell, kind: MoveKind },
    /// The game is over; further steps return the same outcome.
    Finished(GameOutcome),
}

/// One game between the knowledge-base agent and a board.
#[derive(Clone, Debug)]
pub struct GameSession {
    config: SessionConfig,
    board: Board,
    knowledge: KnowledgeBase,
    rng: GameRng,
    moves: usize,
    exploded: Option<Cell>,
    exhausted: bool,
}

impl GameSession {
    /// Create a session with a freshly placed board.
    ///
    /// Mines and random moves draw from separate streams of the same seed.
    pub fn new(config: SessionConfig) -> Result<Self, ConfigError> {
        let root = GameRng::new(config.seed);
        let mut placement = root.for_context("mines");
        let board = Board::new(&config.board, &mut placement)?;
        Ok(Self::from_parts(config, board, root.for_context("moves")))
    }

    /// Create a session on a prepared board.
    ///
    /// The board config in `config` is replaced by the board's own extent
    /// and mine total.
    pub fn with_board(board: Board, config: SessionConfig) -> Self {
        let grid = board.grid();
        let config = config.with_board(
            BoardConfig::new(grid.height, grid.width).with_mines(board.mine_count()),
        );
        let rng = GameRng::new(config.seed).for_context("moves");
        Self::from_parts(config, board, rng)
    }

    fn from_parts(config: SessionConfig, board: Board, rng: GameRng) -> Self {
        Self {
            knowledge: KnowledgeBase::new(board.grid()),
            config,
            board,
            rng,
            moves: 0,
            exploded: None,
            exhausted: false,
        }
    }

    #[must_use]
    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    #[must_use]
    pub fn board(&self) -> &Board {
        &self.board
    }

    #[must_use]
    pub fn knowledge(&self) -> &KnowledgeBase {
        &self.knowledge
    }

    /// Reveals made so far.
    #[must_use]
    pub fn moves(&self) -> usize {
        self.moves
    }

    /// The outcome, if the game is over.
    #[must_use]
    pub fn outcome(&self) -> Option<GameOutcome> {
        let moves = self.moves;
        if let Some(cell) = self.exploded {
            Some(GameOutcome::Lost { cell, moves })
        } else if self.board.won() {
            Some(GameOutcome::Won { moves })
        } else if self.exhausted {
            Some(GameOutcome::Exhausted { moves })
        } else if moves >= self.config.max_moves {
            Some(GameOutcome::MoveLimit { moves })
        } else {
            None
        }
    }

    /// Make one move.
    pub fn step(&mut self) -> Result<StepOutcome, KnowledgeError> {
        if let Some(outcome) = self.outcome() {
            return Ok(StepOutcome::Finished(outcome));
        }

        let Some((cell, kind)) = self.choose_move()? else {
            self.exhausted = true;
            let outcome = self
                .outcome()
                .unwrap_or(GameOutcome::Exhausted { moves: self.moves });
            return Ok(StepOutcome::Finished(outcome));
        };
        self.moves += 1;

        if self.board.is_mine(cell) {
            warn!(%cell, moves = self.moves, "revealed a mine");
            self.exploded = Some(cell);
            return Ok(StepOutcome::Exploded { cell, kind });
        }

        let count = self.board.nearby_mines(cell);
        let deduction = self.knowledge.observe(cell, count)?;
        self.flag_mines(&deduction);
        debug!(%cell, count, ?kind, "revealed");

        Ok(StepOutcome::Revealed {
            cell,
            count,
            kind,
            deduction,
        })
    }

    /// Play until the game is over.
    pub fn run(&mut self) -> Result<GameOutcome, KnowledgeError> {
        loop {
            if let StepOutcome::Finished(outcome) = self.step()? {
                info!(?outcome, seed = self.config.seed, "game over");
                return Ok(outcome);
            }
        }
    }

    fn choose_move(&mut self) -> Result<Option<(Cell, MoveKind)>, KnowledgeError> {
        if let Some(cell) = self.knowledge.make_safe_move() {
            return Ok(Some((cell, MoveKind::Safe)));
        }

        if self.config.use_mine_total {
            let deduction = self.apply_mine_total()?;
            self.flag_mines(&deduction);
            if let Some(cell) = self.knowledge.make_safe_move() {
                return Ok(Some((cell, MoveKind::Safe)));
            }
        }

        Ok(self
            .knowledge
            .make_random_move(&mut self.rng)
            .map(|cell| (cell, MoveKind::Random)))
    }

    /// Combine the mine total with each sentence once.
    ///
    /// Only fully determined results are added to the knowledge base; the
    /// total itself is never stored.
    fn apply_mine_total(&mut self) -> Result<Deduction, KnowledgeError> {
        let total = self.mine_total_sentence();
        let determined = |s: &Sentence| s.known_mines().is_some() || s.known_safes().is_some();

        let mut conclusions: Vec<Sentence> = self
            .knowledge
            .sentences()
            .iter()
            .filter_map(|sentence| total.difference(sentence))
            .filter(determined)
            .collect();
        if determined(&total) {
            conclusions.push(total);
        }

        let mut deduction = Deduction::default();
        for sentence in conclusions {
            let step = self.knowledge.add_sentence(sentence)?;
            deduction.mines.extend(step.mines);
            deduction.safes.extend(step.safes);
            deduction.passes += step.passes;
        }
        if !deduction.is_empty() {
            debug!(
                mines = deduction.mines.len(),
                safes = deduction.safes.len(),
                "mine total"
            );
        }
        Ok(deduction)
    }

    /// "The mines not yet found lie among the unknown cells."
    fn mine_total_sentence(&self) -> Sentence {
        let unknown = self
            .knowledge
            .grid()
            .cells()
            .filter(|&cell| !self.knowledge.is_known(cell));
        let remaining = self
            .board
            .mine_count()
            .saturating_sub(self.knowledge.mines().len());
        Sentence::new(unknown, remaining)
    }

    fn flag_mines(&mut self, deduction: &Deduction) {
        for &cell in &deduction.mines {
            self.board.flag(cell);
        }
    }

    // === Checkpointing ===

    /// Capture the full session state.
    #[must_use]
    pub fn checkpoint(&self) -> SessionCheckpoint {
        SessionCheckpoint {
            config: self.config,
            board: self.board.clone(),
            knowledge: self.knowledge.clone(),
            rng: self.rng.state(),
            moves: self.moves,
            exploded: self.exploded,
            exhausted: self.exhausted,
        }
    }

    /// Resume a session from a checkpoint.
    #[must_use]
    pub fn restore(checkpoint: SessionCheckpoint) -> Self {
        Self {
            config: checkpoint.config,
            board: checkpoint.board,
            knowledge: checkpoint.knowledge,
            rng: GameRng::from_state(&checkpoint.rng),
            moves: checkpoint.moves,
            exploded: checkpoint.exploded,
            exhausted: checkpoint.exhausted,
        }
    }
}

/// Serializable snapshot of a `GameSession`.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SessionCheckpoint {
    pub config: SessionConfig,
    pub board: Board,
    pub knowledge: KnowledgeBase,
    pub rng: GameRngState,
    pub moves: usize,
    pub exploded: Option<Cell>,
    pub exhausted: bool,
}

impl SessionCheckpoint {
    /// Encode with bincode.
    pub fn to_bytes(&self) -> Result<Vec<u8>, CheckpointError> {
        Ok(bincode::serialize(self)?)
    }

    /// Decode from bincode.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, CheckpointError> {
        Ok(bincode::deserialize(bytes)?)
    }
}
