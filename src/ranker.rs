//! Ranking every guessable word against the remaining candidates.
//!
//! A guess is better the more groups it splits the candidates into, since
//! each group is what remains to be solved after playing it. Between guesses
//! with the same number of groups, the one whose largest group is smallest
//! wins: it bounds the worst case. The evaluation of each guess is independent
//! of the others, so the vocabulary is scored in parallel chunks and the
//! results are sorted afterwards by a total order, which keeps the ranking
//! identical however the workers are scheduled.

use std::cmp::{Ordering, Reverse};
use std::sync::Arc;
use std::time::Instant;

use log::debug;
use rayon::prelude::*;

use crate::config::SolverConfig;
use crate::error::Result;
use crate::feedback::{FeedbackPattern, FeedbackTable};
use crate::partition::{group_by_feedback, Partition};
use crate::word::{Word, WordStore};

/// Result of analyzing a potential guess
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GuessEvaluation {
    pub word: Word,
    pub group_count: usize,
    pub largest_group: usize,
    pub is_candidate: bool,
}

impl GuessEvaluation {
    /// `groups - λ·largest + bonus` where the bonus applies to possible answers.
    pub fn fitness(&self, config: &SolverConfig) -> f64 {
        let bonus = if self.is_candidate {
            config.remaining_word_bonus
        } else {
            0.0
        };
        self.group_count as f64 - config.penalty_weight * self.largest_group as f64 + bonus
    }

    /// Every group is a single word, so the next guess solves the board.
    pub fn guarantees_solve(&self) -> bool {
        self.largest_group == 1
    }

    /// More groups first, then smaller largest group, then possible answers,
    /// then alphabetical order.
    pub fn rank_key(&self) -> (Reverse<usize>, usize, Reverse<bool>, Word) {
        (
            Reverse(self.group_count),
            self.largest_group,
            Reverse(self.is_candidate),
            self.word,
        )
    }
}

/// Best-first ordering of guess evaluations.
pub fn compare(a: &GuessEvaluation, b: &GuessEvaluation) -> Ordering {
    a.rank_key().cmp(&b.rank_key())
}

/// Scores guesses against candidate sets drawn from one [`WordStore`].
///
/// Candidate sets are slices of answer indices into the store.
pub struct Ranker {
    store: Arc<WordStore>,
    table: Option<FeedbackTable>,
    pool: Option<rayon::ThreadPool>,
    config: SolverConfig,
}

impl Ranker {
    pub fn new(store: Arc<WordStore>, config: SolverConfig) -> Result<Self> {
        let pool = match config.threads {
            Some(threads) => Some(
                rayon::ThreadPoolBuilder::new()
                    .num_threads(threads)
                    .thread_name(|i| format!("ranker-{i}"))
                    .build()?,
            ),
            None => None,
        };

        let table = if config.precompute_feedback {
            let build = || FeedbackTable::build(&store);
            Some(match &pool {
                Some(pool) => pool.install(build),
                None => build(),
            })
        } else {
            None
        };

        Ok(Self {
            store,
            table,
            pool,
            config,
        })
    }

    pub fn store(&self) -> &Arc<WordStore> {
        &self.store
    }

    pub fn config(&self) -> &SolverConfig {
        &self.config
    }

    /// Every answer index, the starting candidate set.
    pub fn all_answers(&self) -> Vec<usize> {
        (0..self.store.answers().len()).collect()
    }

    #[inline]
    pub fn feedback(&self, guess: usize, answer: usize) -> FeedbackPattern {
        match &self.table {
            Some(table) => table.get(guess, answer),
            None => FeedbackPattern::calculate(
                &self.store.guesses()[guess],
                &self.store.answers()[answer],
            ),
        }
    }

    /// Score a vocabulary word by counting the candidates per feedback pattern.
    fn evaluate_index(
        &self,
        guess: usize,
        candidates: &[usize],
        is_candidate: bool,
    ) -> GuessEvaluation {
        let mut counts = [0u32; FeedbackPattern::NUM_PATTERNS];

        match &self.table {
            Some(table) => {
                let row = table.row(guess);
                for &answer in candidates {
                    counts[row[answer] as usize] += 1;
                }
            }
            None => {
                for &answer in candidates {
                    counts[self.feedback(guess, answer).0 as usize] += 1;
                }
            }
        }

        GuessEvaluation {
            word: self.store.guesses()[guess],
            group_count: counts.iter().filter(|&&c| c > 0).count(),
            largest_group: counts.iter().copied().max().unwrap_or(0) as usize,
            is_candidate,
        }
    }

    /// Score any word, including one outside the vocabulary.
    pub fn evaluate(&self, word: &Word, candidates: &[usize]) -> GuessEvaluation {
        let is_candidate = candidates
            .iter()
            .any(|&a| self.store.answers()[a] == *word);

        match self.store.guess_index(word) {
            Some(guess) => self.evaluate_index(guess, candidates, is_candidate),
            None => {
                let partition = self.partition(word, candidates);
                GuessEvaluation {
                    word: *word,
                    group_count: partition.group_count(),
                    largest_group: partition.largest_group(),
                    is_candidate,
                }
            }
        }
    }

    /// The groups `word` splits the candidates into.
    pub fn partition(&self, word: &Word, candidates: &[usize]) -> Partition {
        let answers = self.store.answers();
        match self.store.guess_index(word) {
            Some(guess) => group_by_feedback(
                word,
                candidates
                    .iter()
                    .map(|&a| (answers[a], self.feedback(guess, a))),
            ),
            None => group_by_feedback(
                word,
                candidates
                    .iter()
                    .map(|&a| (answers[a], FeedbackPattern::calculate(word, &answers[a]))),
            ),
        }
    }

    /// Rank the whole vocabulary, best first.
    pub fn rank(&self, candidates: &[usize]) -> Vec<GuessEvaluation> {
        match candidates {
            [] => vec![],
            [only] => vec![GuessEvaluation {
                word: self.store.answers()[*only],
                group_count: 1,
                largest_group: 1,
                is_candidate: true,
            }],
            _ => self.rank_all(candidates),
        }
    }

    pub fn best(&self, candidates: &[usize]) -> Option<GuessEvaluation> {
        self.rank(candidates).into_iter().next()
    }

    fn rank_all(&self, candidates: &[usize]) -> Vec<GuessEvaluation> {
        let start = Instant::now();
        let guess_count = self.store.guesses().len();

        let mut is_candidate = vec![false; guess_count];
        for &answer in candidates {
            is_candidate[self.store.answer_guess_index(answer)] = true;
        }

        let chunk_size = self.config.chunk_size.max(1);
        let chunks: Vec<(usize, usize)> = (0..guess_count)
            .step_by(chunk_size)
            .map(|from| (from, (from + chunk_size).min(guess_count)))
            .collect();

        let work = || {
            chunks
                .par_iter()
                .flat_map_iter(|&(from, to)| {
                    (from..to).map(|guess| {
                        self.evaluate_index(guess, candidates, is_candidate[guess])
                    })
                })
                .collect::<Vec<_>>()
        };

        let mut evaluations = match &self.pool {
            Some(pool) => pool.install(work),
            None => work(),
        };

        evaluations.sort_by(compare);

        if let Some(best) = evaluations.first() {
            debug!(
                "Ranked {} guesses against {} candidates in {:.2?}, best {} ({} groups, largest {})",
                evaluations.len(),
                candidates.len(),
                start.elapsed(),
                best.word,
                best.group_count,
                best.largest_group
            );
        }

        evaluations
    }

    pub fn words(&self, candidates: &[usize]) -> Vec<Word> {
        candidates
            .iter()
            .map(|&a| self.store.answers()[a])
            .collect()
    }
}
