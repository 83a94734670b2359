//! # Octordle Solver
//!
//! A multithreaded Wordle and Octordle solver.
//!
//! Every guessable word is scored by how it partitions the remaining
//! candidate answers into feedback groups: more groups is better, and among
//! guesses with the same number of groups the one with the smallest worst-case
//! group wins. A multi-board aggregator combines the per-board rankings into a
//! single guess that serves several boards at once.

pub mod board;
pub mod config;
pub mod constraints;
pub mod error;
pub mod feedback;
pub mod multi_board;
pub mod opening;
pub mod partition;
pub mod ranker;
pub mod simulate;
pub mod word;

pub use board::{Board, BoardState};
pub use config::SolverConfig;
pub use constraints::ConstraintSet;
pub use error::{Error, InputError, Result};
pub use feedback::{Feedback, FeedbackPattern, FeedbackTable};
pub use multi_board::{joint_recommendation, CancelFlag, MultiBoard};
pub use opening::OpeningBook;
pub use partition::{group_by_feedback, partition, Group, Partition};
pub use ranker::{GuessEvaluation, Ranker};
pub use word::{Word, WordStore};

/// Word length for Wordle
pub const WORD_LENGTH: usize = 5;
