//! Playing out games against known answers.
//!
//! Used for benchmarking strategies: the solver's own recommendation is played
//! every turn and scored against the target.

use std::collections::BTreeMap;
use std::sync::Arc;

use log::info;
use rayon::prelude::*;

use crate::board::Board;
use crate::error::Result;
use crate::feedback::FeedbackPattern;
use crate::multi_board::MultiBoard;
use crate::opening::OpeningBook;
use crate::ranker::Ranker;
use crate::word::Word;

/// Guesses played in one game and the feedback each received.
pub type Transcript = Vec<(Word, FeedbackPattern)>;

/// Play a single board until `target` is found or the turn limit is reached.
pub fn solve_for_target(
    ranker: &Arc<Ranker>,
    book: Option<&Arc<OpeningBook>>,
    target: &Word,
    opening: Option<Word>,
) -> Result<Transcript> {
    let mut board = Board::new(ranker.clone());
    if let Some(book) = book {
        board = board.with_opening_book(book.clone());
    }

    let mut transcript = Vec::new();

    for turn in 0..ranker.config().max_turns {
        let guess = match opening {
            Some(opening) if turn == 0 => opening,
            _ => match board.rank().first() {
                Some(best) => best.word,
                None => break,
            },
        };

        let pattern = FeedbackPattern::calculate(&guess, target);
        transcript.push((guess, pattern));

        if pattern.is_win() {
            break;
        }

        board.apply_guess(&guess, pattern)?;
    }

    Ok(transcript)
}

/// Solve every answer and count how many games took each number of guesses.
///
/// Games that hit the turn limit without winning are counted under
/// `max_turns + 1`.
pub fn guess_distribution(
    ranker: &Arc<Ranker>,
    book: Option<&Arc<OpeningBook>>,
    opening: Option<Word>,
) -> Result<Vec<(usize, usize)>> {
    let max_turns = ranker.config().max_turns;
    let answers = ranker.store().answers();

    let counts = answers
        .par_iter()
        .map(|target| -> Result<usize> {
            let transcript = solve_for_target(ranker, book, target, opening)?;
            let won = transcript.last().is_some_and(|(_, p)| p.is_win());
            Ok(if won { transcript.len() } else { max_turns + 1 })
        })
        .collect::<Result<Vec<usize>>>()?;

    let mut distribution = BTreeMap::new();
    for count in counts {
        *distribution.entry(count).or_insert(0usize) += 1;
    }

    info!("Played {} games", answers.len());

    Ok(distribution.into_iter().collect())
}

/// Average number of guesses, from a distribution.
pub fn average_guesses(distribution: &[(usize, usize)]) -> f64 {
    let games: usize = distribution.iter().map(|(_, c)| c).sum();
    let guesses: usize = distribution.iter().map(|(g, c)| g * c).sum();
    if games == 0 {
        0.0
    } else {
        guesses as f64 / games as f64
    }
}

/// Play several boards at once until every target is found or the turn limit
/// is reached. Returns the shared guesses in order.
pub fn solve_for_targets(
    ranker: &Arc<Ranker>,
    book: Option<&Arc<OpeningBook>>,
    targets: &[Word],
    opening: Option<Word>,
) -> Result<Vec<Word>> {
    let mut boards = MultiBoard::new(ranker.clone(), targets.len());
    if let Some(book) = book {
        boards = boards.with_opening_book(book.clone());
    }

    let mut guesses = Vec::new();

    for turn in 0..ranker.config().max_turns {
        if boards.is_solved() {
            break;
        }

        let guess = match opening {
            Some(opening) if turn == 0 => opening,
            _ => match boards.recommend() {
                Some(guess) => guess,
                None => break,
            },
        };

        let feedbacks: Vec<FeedbackPattern> = targets
            .iter()
            .map(|target| FeedbackPattern::calculate(&guess, target))
            .collect();

        guesses.push(guess);
        boards.apply_guess(&guess, &feedbacks)?;
    }

    Ok(guesses)
}
