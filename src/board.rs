//! A single puzzle.
//!
//! A board starts with every answer as a candidate and no constraints. Each
//! scored guess tightens the constraints, shrinks the candidates and refreshes
//! the ranking. Once every position is known the answer is known, but the
//! board is only solved when that answer has actually been played.

use std::sync::Arc;

use log::{info, warn};

use crate::constraints::ConstraintSet;
use crate::error::{Error, InputError, Result};
use crate::feedback::FeedbackPattern;
use crate::opening::OpeningBook;
use crate::partition::Partition;
use crate::ranker::{GuessEvaluation, Ranker};
use crate::word::Word;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoardState {
    Unsolved,
    /// Every position is locked but the answer has not been guessed yet.
    AnswerKnown,
    /// The answer was guessed.
    Solved,
}

/// Keep the candidates allowed by `constraints` that would also have produced
/// exactly `pattern` for `guess`, preserving order.
pub(crate) fn narrow(
    ranker: &Ranker,
    candidates: &[usize],
    constraints: &ConstraintSet,
    guess: &Word,
    pattern: FeedbackPattern,
) -> Vec<usize> {
    let answers = ranker.store().answers();
    candidates
        .iter()
        .copied()
        .filter(|&a| constraints.allows(&answers[a]))
        .filter(|&a| FeedbackPattern::calculate(guess, &answers[a]) == pattern)
        .collect()
}

#[derive(Clone)]
pub struct Board {
    ranker: Arc<Ranker>,
    book: Option<Arc<OpeningBook>>,
    constraints: ConstraintSet,
    candidates: Vec<usize>,
    evaluations: Vec<GuessEvaluation>,
    ranked: bool,
    preferred: Option<Word>,
    history: Vec<(Word, FeedbackPattern)>,
    state: BoardState,
}

impl Board {
    pub fn new(ranker: Arc<Ranker>) -> Self {
        let candidates = ranker.all_answers();
        Self {
            ranker,
            book: None,
            constraints: ConstraintSet::new(),
            candidates,
            evaluations: Vec::new(),
            ranked: false,
            preferred: None,
            history: Vec::new(),
            state: BoardState::Unsolved,
        }
    }

    /// Use precomputed second guesses after a known opening.
    pub fn with_opening_book(mut self, book: Arc<OpeningBook>) -> Self {
        self.book = Some(book);
        self
    }

    pub fn state(&self) -> BoardState {
        self.state
    }

    /// The answer has been played.
    pub fn is_solved(&self) -> bool {
        self.state == BoardState::Solved
    }

    pub fn is_answer_known(&self) -> bool {
        self.state != BoardState::Unsolved
    }

    pub fn constraints(&self) -> &ConstraintSet {
        &self.constraints
    }

    pub fn candidate_indices(&self) -> &[usize] {
        &self.candidates
    }

    pub fn candidates(&self) -> Vec<Word> {
        self.ranker.words(&self.candidates)
    }

    pub fn remaining_count(&self) -> usize {
        self.candidates.len()
    }

    pub fn history(&self) -> &[(Word, FeedbackPattern)] {
        &self.history
    }

    pub fn ranker(&self) -> &Arc<Ranker> {
        &self.ranker
    }

    /// The current ranking, best first. Empty until [`Board::rank`] has run
    /// or a guess has been applied. Holds only the opening book's guess until
    /// the full ranking is requested.
    pub fn evaluations(&self) -> &[GuessEvaluation] {
        &self.evaluations
    }

    pub fn best(&self) -> Option<&GuessEvaluation> {
        self.evaluations.first()
    }

    /// Rank the vocabulary if that has not happened for the current state.
    /// A guess from the opening book stays in front.
    pub fn rank(&mut self) -> &[GuessEvaluation] {
        if !self.ranked {
            let mut evaluations = self.ranker.rank(&self.candidates);
            if let Some(word) = self.preferred {
                let preferred = match evaluations.iter().position(|e| e.word == word) {
                    Some(i) => evaluations.remove(i),
                    None => self.ranker.evaluate(&word, &self.candidates),
                };
                evaluations.insert(0, preferred);
            }
            self.evaluations = evaluations;
            self.ranked = true;
        }
        &self.evaluations
    }

    pub fn partition(&self, word: &Word) -> Partition {
        self.ranker.partition(word, &self.candidates)
    }

    pub fn fitness(&self, evaluation: &GuessEvaluation) -> f64 {
        evaluation.fitness(self.ranker.config())
    }

    /// Parse and apply a guess with feedback such as `"YMNNN"`.
    pub fn apply_str(&mut self, guess: &str, feedback: &str) -> Result<BoardState> {
        let guess = Word::parse(guess)?;
        let feedback = FeedbackPattern::parse(feedback)?;
        self.apply_guess(&guess, feedback)
    }

    /// Merge a scored guess, shrink the candidates and re-rank.
    ///
    /// Guesses are still accepted once the answer is known; only a solved
    /// board rejects them.
    ///
    /// Fails with [`Error::ImpossibleState`] when no candidate is consistent
    /// with the feedback; the board is left unchanged in that case.
    pub fn apply_guess(&mut self, guess: &Word, feedback: FeedbackPattern) -> Result<BoardState> {
        if self.is_solved() {
            return Err(InputError::BoardSolved.into());
        }

        let mut constraints = self.constraints.clone();
        constraints.apply(guess, feedback);

        let candidates = narrow(&self.ranker, &self.candidates, &constraints, guess, feedback);
        if candidates.is_empty() {
            warn!(
                "{guess} scored {feedback} leaves none of {} candidates",
                self.candidates.len()
            );
            return Err(Error::ImpossibleState {
                guess: *guess,
                feedback,
            });
        }

        self.constraints = constraints;
        self.candidates = candidates;
        self.history.push((*guess, feedback));

        if feedback.is_win() {
            self.state = BoardState::Solved;
            info!("Solved in {} guesses", self.history.len());
        } else if self.constraints.is_solved() {
            self.state = BoardState::AnswerKnown;
        }

        self.preferred = self
            .book_guess()
            .filter(|_| !self.is_answer_known() && self.candidates.len() > 1);

        match self.preferred {
            Some(cached) => {
                self.evaluations = vec![self.ranker.evaluate(&cached, &self.candidates)];
                self.ranked = false;
            }
            None => {
                self.evaluations = self.ranker.rank(&self.candidates);
                self.ranked = true;
            }
        }

        Ok(self.state)
    }

    /// The stored second guess, when only the opening has been played.
    fn book_guess(&self) -> Option<Word> {
        match (&self.book, self.history.as_slice()) {
            (Some(book), [(opening, pattern)]) => book.get(opening, *pattern),
            _ => None,
        }
    }

    /// Back to every answer and no constraints.
    pub fn reset(&mut self) {
        self.constraints = ConstraintSet::new();
        self.candidates = self.ranker.all_answers();
        self.evaluations.clear();
        self.ranked = false;
        self.preferred = None;
        self.history.clear();
        self.state = BoardState::Unsolved;
    }
}
