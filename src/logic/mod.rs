//! Propositional knowledge and inference.
//!
//! - `Sentence`: "exactly N of these cells are mines"
//! - `inference`: one scan producing a batch of conclusions
//! - `KnowledgeBase`: status sets, sentences, and the saturation loop
//! - move selection on top of the knowledge base

pub mod sentence;
pub mod inference;
pub mod knowledge;
mod moves;

pub use sentence::Sentence;
pub use inference::InferenceBatch;
pub use knowledge::{Deduction, KnowledgeBase};
