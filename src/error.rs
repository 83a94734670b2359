//! Error types shared across the solver.

use thiserror::Error;

use crate::{FeedbackPattern, Word, WORD_LENGTH};

/// Malformed input supplied by a caller. Never retried.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InputError {
    #[error("expected a word of length {}, found \"{word}\" of length {}", WORD_LENGTH, .word.chars().count())]
    WordLength { word: String },

    #[error("word \"{word}\" contains '{letter}', only letters A-Z are allowed")]
    WordLetter { word: String, letter: char },

    #[error("'{letter}' is not a letter A-Z")]
    Letter { letter: char },

    #[error("position {position} is outside a word of length {}", WORD_LENGTH)]
    Position { position: usize },

    #[error("guess has length {guess} but answer has length {answer}")]
    LengthMismatch { guess: usize, answer: usize },

    #[error("expected feedback of length {}, found \"{feedback}\"", WORD_LENGTH)]
    FeedbackLength { feedback: String },

    #[error("feedback \"{feedback}\" contains '{symbol}', expected one of Y/M/N or 0/1/2")]
    FeedbackSymbol { feedback: String, symbol: char },

    #[error("expected feedback for {expected} boards, found {found}")]
    BoardCount { expected: usize, found: usize },

    #[error("board is already solved")]
    BoardSolved,
}

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Input(#[from] InputError),

    /// The feedback history rules out every answer.
    #[error("no answer is consistent with {guess} scored as {}", .feedback.key())]
    ImpossibleState { guess: Word, feedback: FeedbackPattern },

    #[error("computation was cancelled")]
    Cancelled,

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("unable to start ranking workers: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),

    #[error("malformed JSON: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    pub fn is_input_error(&self) -> bool {
        matches!(self, Error::Input(_))
    }

    pub fn is_impossible_state(&self) -> bool {
        matches!(self, Error::ImpossibleState { .. })
    }
}

pub type Result<T> = std::result::Result<T, Error>;
