//! Several boards answered with one shared guess (Octordle).

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use fxhash::FxHashMap;
use log::debug;

use crate::board::Board;
use crate::config::SolverConfig;
use crate::error::{Error, InputError, Result};
use crate::feedback::FeedbackPattern;
use crate::opening::OpeningBook;
use crate::ranker::Ranker;
use crate::word::Word;

/// Shared flag for abandoning a recommendation.
///
/// Rankings already in progress run to completion; the flag is checked
/// before their result is used.
#[derive(Debug, Clone, Default)]
pub struct CancelFlag(Arc<AtomicBool>);

impl CancelFlag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn reset(&self) {
        self.0.store(false, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// Pick one guess for all unsolved boards. Boards are expected to be ranked.
///
/// A board whose answer is known but not yet played is still unsolved.
///
/// In order of preference:
/// 1. the best guess of the only unsolved board
/// 2. the answer of a board with a single candidate left
/// 3. a board's best guess when it leaves only singleton groups
/// 4. the word with the highest fitness summed over boards, each board
///    weighted by the share of all remaining candidates held by the others
///
/// Ties go to the word seen first, walking boards and their rankings in order.
pub fn joint_recommendation(boards: &[Board], config: &SolverConfig) -> Option<Word> {
    let unsolved: Vec<&Board> = boards.iter().filter(|b| !b.is_solved()).collect();

    match unsolved.as_slice() {
        [] => return None,
        [only] => return only.best().map(|e| e.word),
        _ => (),
    }

    if let Some(board) = unsolved.iter().find(|b| b.remaining_count() == 1) {
        return board.candidates().first().copied();
    }

    if let Some(best) = unsolved
        .iter()
        .filter_map(|b| b.best())
        .find(|e| e.guarantees_solve())
    {
        return Some(best.word);
    }

    let total_remaining: usize = unsolved.iter().map(|b| b.remaining_count()).sum();
    let mut order: Vec<Word> = Vec::new();
    let mut scores: Vec<f64> = Vec::new();
    let mut index: FxHashMap<Word, usize> = FxHashMap::default();

    for board in &unsolved {
        let weight =
            (total_remaining - board.remaining_count()) as f64 / total_remaining as f64;

        for evaluation in board.evaluations() {
            let slot = *index.entry(evaluation.word).or_insert_with(|| {
                order.push(evaluation.word);
                scores.push(0.0);
                order.len() - 1
            });
            scores[slot] += evaluation.fitness(config) * weight;
        }
    }

    let mut best: Option<(Word, f64)> = None;
    for (word, score) in order.into_iter().zip(scores) {
        if best.map_or(true, |(_, top)| score > top) {
            best = Some((word, score));
        }
    }

    if let Some((word, score)) = best {
        debug!("Joint recommendation {word} scored {score:.3}");
    }

    best.map(|(word, _)| word)
}

/// Boards played together, every guess going to all unsolved boards.
#[derive(Clone)]
pub struct MultiBoard {
    boards: Vec<Board>,
}

impl MultiBoard {
    pub fn new(ranker: Arc<Ranker>, count: usize) -> Self {
        Self {
            boards: (0..count).map(|_| Board::new(ranker.clone())).collect(),
        }
    }

    pub fn with_opening_book(mut self, book: Arc<OpeningBook>) -> Self {
        self.boards = self
            .boards
            .into_iter()
            .map(|b| b.with_opening_book(book.clone()))
            .collect();
        self
    }

    pub fn boards(&self) -> &[Board] {
        &self.boards
    }

    pub fn board(&self, index: usize) -> Option<&Board> {
        self.boards.get(index)
    }

    pub fn len(&self) -> usize {
        self.boards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.boards.is_empty()
    }

    pub fn is_solved(&self) -> bool {
        self.boards.iter().all(Board::is_solved)
    }

    pub fn unsolved_count(&self) -> usize {
        self.boards.iter().filter(|b| !b.is_solved()).count()
    }

    /// Apply one guess with a feedback per board, in board order.
    ///
    /// Feedback for boards that are already solved is ignored. If any board
    /// rejects its feedback no board is changed.
    pub fn apply_guess(&mut self, guess: &Word, feedbacks: &[FeedbackPattern]) -> Result<()> {
        if feedbacks.len() != self.boards.len() {
            return Err(InputError::BoardCount {
                expected: self.boards.len(),
                found: feedbacks.len(),
            }
            .into());
        }

        let mut boards = self.boards.clone();
        for (board, feedback) in boards.iter_mut().zip(feedbacks) {
            if !board.is_solved() {
                board.apply_guess(guess, *feedback)?;
            }
        }
        self.boards = boards;

        Ok(())
    }

    pub fn recommend(&mut self) -> Option<Word> {
        for board in self.boards.iter_mut().filter(|b| !b.is_solved()) {
            board.rank();
        }
        let config = self.boards.first()?.ranker().config().clone();
        joint_recommendation(&self.boards, &config)
    }

    /// Like [`MultiBoard::recommend`], discarding the result if `cancel` was set.
    pub fn recommend_with_cancel(&mut self, cancel: &CancelFlag) -> Result<Option<Word>> {
        let recommendation = self.recommend();
        if cancel.is_cancelled() {
            return Err(Error::Cancelled);
        }
        Ok(recommendation)
    }

    pub fn reset(&mut self) {
        for board in &mut self.boards {
            board.reset();
        }
    }
}
