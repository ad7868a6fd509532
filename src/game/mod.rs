//! Driving a full game with the knowledge-base agent.

mod session;

pub use session::{GameOutcome, GameSession, MoveKind, SessionCheckpoint, SessionConfig, StepOutcome};
