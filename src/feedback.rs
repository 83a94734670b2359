//! Feedback calculation for Wordle guesses.
//!
//! This module handles computing the feedback pattern (correct/misplaced/incorrect)
//! for a guess against a target word, parsing feedback typed in by a player, and
//! caching feedback for every (guess, answer) pair of a word store.

use std::fmt;

use log::debug;
use rayon::prelude::*;

use crate::error::InputError;
use crate::word::{Word, WordStore};
use crate::WORD_LENGTH;

/// Represents the feedback for a single letter position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Feedback {
    /// Correct letter in correct position
    Correct,
    /// Correct letter in wrong position
    Misplaced,
    /// Letter not in word (or all instances accounted for)
    Incorrect,
}

impl Feedback {
    /// Status code used in persisted pattern keys
    pub fn code(self) -> u8 {
        match self {
            Feedback::Correct => 0,
            Feedback::Misplaced => 1,
            Feedback::Incorrect => 2,
        }
    }

    /// Parse from a character (Y=correct, M=misplaced, N=incorrect, or the 0/1/2 codes)
    pub fn from_char(c: char) -> Option<Self> {
        match c.to_ascii_uppercase() {
            'Y' | '0' => Some(Feedback::Correct),
            'M' | '1' => Some(Feedback::Misplaced),
            'N' | '2' => Some(Feedback::Incorrect),
            _ => None,
        }
    }

    pub fn to_char(self) -> char {
        match self {
            Feedback::Correct => 'Y',
            Feedback::Misplaced => 'M',
            Feedback::Incorrect => 'N',
        }
    }

    fn digit(self) -> u8 {
        match self {
            Feedback::Incorrect => 0,
            Feedback::Misplaced => 1,
            Feedback::Correct => 2,
        }
    }
}

/// A complete feedback pattern for a 5-letter guess.
/// Encoded as a single u8 value (0-242) for efficiency.
/// Each position can be 0 (incorrect), 1 (misplaced), or 2 (correct).
/// Pattern = p0 + 3*p1 + 9*p2 + 27*p3 + 81*p4
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FeedbackPattern(pub u8);

impl FeedbackPattern {
    /// The pattern indicating all correct (winning)
    pub const ALL_CORRECT: Self = Self(2 + 2 * 3 + 2 * 9 + 2 * 27 + 2 * 81); // 242

    /// Total number of possible patterns (3^5)
    pub const NUM_PATTERNS: usize = 243;

    /// Create a new pattern from individual feedback values
    pub fn new(feedbacks: [Feedback; WORD_LENGTH]) -> Self {
        let mut pattern: u8 = 0;
        let mut multiplier: u8 = 1;
        for fb in feedbacks {
            pattern += fb.digit() * multiplier;
            multiplier *= 3;
        }
        Self(pattern)
    }

    /// Calculate the feedback pattern for a guess against a target word.
    ///
    /// Exact matches are scored first and removed from the pool of target
    /// letters; the remaining guess letters are then marked misplaced while
    /// unmatched copies of that letter are left, so a doubled guess letter is
    /// only credited as often as it occurs in the target.
    pub fn calculate(guess: &Word, target: &Word) -> Self {
        let guess_bytes = guess.letters();
        let target_bytes = target.letters();

        let mut feedback = [Feedback::Incorrect; WORD_LENGTH];
        let mut target_remaining = [0u8; 26];

        for i in 0..WORD_LENGTH {
            if guess_bytes[i] == target_bytes[i] {
                feedback[i] = Feedback::Correct;
            } else {
                let idx = (target_bytes[i] - b'A') as usize;
                target_remaining[idx] += 1;
            }
        }

        for i in 0..WORD_LENGTH {
            if feedback[i] != Feedback::Correct {
                let idx = (guess_bytes[i] - b'A') as usize;
                if target_remaining[idx] > 0 {
                    feedback[i] = Feedback::Misplaced;
                    target_remaining[idx] -= 1;
                }
            }
        }

        Self::new(feedback)
    }

    /// Calculate feedback for raw strings, validating them first.
    pub fn calculate_str(guess: &str, target: &str) -> Result<Self, InputError> {
        let (guess_len, target_len) = (guess.chars().count(), target.chars().count());
        if guess_len != target_len {
            return Err(InputError::LengthMismatch {
                guess: guess_len,
                answer: target_len,
            });
        }
        Ok(Self::calculate(&Word::parse(guess)?, &Word::parse(target)?))
    }

    /// Convert pattern to array of feedbacks
    pub fn to_feedbacks(self) -> [Feedback; WORD_LENGTH] {
        let mut pattern = self.0;
        let mut feedbacks = [Feedback::Incorrect; WORD_LENGTH];
        for feedback in feedbacks.iter_mut() {
            *feedback = match pattern % 3 {
                0 => Feedback::Incorrect,
                1 => Feedback::Misplaced,
                _ => Feedback::Correct,
            };
            pattern /= 3;
        }
        feedbacks
    }

    /// Check if this pattern represents a win (all correct)
    pub fn is_win(self) -> bool {
        self == Self::ALL_CORRECT
    }

    /// Parse a pattern from a string like "YMNNN" or "01222"
    pub fn parse(s: &str) -> Result<Self, InputError> {
        let s = s.trim();
        if s.chars().count() != WORD_LENGTH {
            return Err(InputError::FeedbackLength {
                feedback: s.to_string(),
            });
        }

        let mut feedbacks = [Feedback::Incorrect; WORD_LENGTH];
        for (slot, c) in feedbacks.iter_mut().zip(s.chars()) {
            *slot = Feedback::from_char(c).ok_or_else(|| InputError::FeedbackSymbol {
                feedback: s.to_string(),
                symbol: c,
            })?;
        }

        Ok(Self::new(feedbacks))
    }

    /// Key used by the opening book, e.g. "20110"
    pub fn key(self) -> String {
        self.to_feedbacks()
            .iter()
            .map(|f| char::from(b'0' + f.code()))
            .collect()
    }

    /// Every possible pattern, in encoding order
    pub fn all() -> impl Iterator<Item = Self> {
        (0..Self::NUM_PATTERNS as u8).map(Self)
    }
}

impl fmt::Display for FeedbackPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for fb in self.to_feedbacks() {
            write!(f, "{}", fb.to_char())?;
        }
        Ok(())
    }
}

/// Feedback for every (guess, answer) pair of a [`WordStore`].
///
/// Row-major by guess index; each row holds one byte per answer.
#[derive(Debug, Clone)]
pub struct FeedbackTable {
    answers: usize,
    patterns: Vec<u8>,
}

impl FeedbackTable {
    pub fn build(store: &WordStore) -> Self {
        let answers = store.answers();
        let start = std::time::Instant::now();

        let patterns: Vec<u8> = store
            .guesses()
            .par_iter()
            .flat_map_iter(|guess| {
                answers
                    .iter()
                    .map(move |answer| FeedbackPattern::calculate(guess, answer).0)
            })
            .collect();

        debug!(
            "Feedback table for {}x{} words built in {:.2?}",
            store.guesses().len(),
            answers.len(),
            start.elapsed()
        );

        Self {
            answers: answers.len(),
            patterns,
        }
    }

    #[inline]
    pub fn get(&self, guess: usize, answer: usize) -> FeedbackPattern {
        FeedbackPattern(self.patterns[guess * self.answers + answer])
    }

    pub fn row(&self, guess: usize) -> &[u8] {
        &self.patterns[guess * self.answers..(guess + 1) * self.answers]
    }
}
