//! Precomputed second guesses.
//!
//! After a fixed opening word, the feedback pattern alone decides which
//! answers remain, so the best second guess can be computed ahead of time for
//! every pattern. The book is keyed by opening word and then by the pattern
//! key (one status code per position, e.g. `"20110"`), and is persisted as JSON:
//!
//! ```json
//! { "CRANE": { "20110": "SOUTH", "22222": "BLIMP" } }
//! ```

use std::collections::BTreeMap;
use std::io::{Read, Write};
use std::time::Instant;

use log::{debug, info};
use serde::{Deserialize, Serialize};

use crate::board::narrow;
use crate::constraints::ConstraintSet;
use crate::error::Result;
use crate::feedback::FeedbackPattern;
use crate::ranker::Ranker;
use crate::word::Word;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OpeningBook {
    openings: BTreeMap<Word, BTreeMap<String, Word>>,
}

impl OpeningBook {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, opening: &Word, pattern: FeedbackPattern) -> Option<Word> {
        self.openings.get(opening)?.get(&pattern.key()).copied()
    }

    pub fn put(&mut self, opening: Word, pattern: FeedbackPattern, guess: Word) {
        self.openings
            .entry(opening)
            .or_default()
            .insert(pattern.key(), guess);
    }

    pub fn openings(&self) -> impl Iterator<Item = &Word> {
        self.openings.keys()
    }

    /// Number of stored (opening, pattern) entries.
    pub fn len(&self) -> usize {
        self.openings.values().map(BTreeMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        Ok(serde_json::from_reader(reader)?)
    }

    pub fn to_writer<W: Write>(&self, writer: W) -> Result<()> {
        serde_json::to_writer_pretty(writer, self)?;
        Ok(())
    }

    /// Rank the second guess for every feedback pattern `opening` can receive.
    ///
    /// Patterns that no answer can produce are skipped. Returns the number of
    /// entries added.
    pub fn compute(&mut self, opening: Word, ranker: &Ranker) -> usize {
        let start = Instant::now();
        let all_answers = ranker.all_answers();
        let mut added = 0;

        for pattern in FeedbackPattern::all() {
            let constraints = ConstraintSet::from_feedback(&opening, pattern);
            let candidates = narrow(ranker, &all_answers, &constraints, &opening, pattern);

            if candidates.is_empty() {
                continue;
            }

            if let Some(best) = ranker.best(&candidates) {
                debug!(
                    "{opening} {}: {} candidates, second guess {}",
                    pattern.key(),
                    candidates.len(),
                    best.word
                );
                self.put(opening, pattern, best.word);
                added += 1;
            }
        }

        info!(
            "Opening book for {opening}: {added} patterns computed in {:.2?}",
            start.elapsed()
        );

        added
    }
}
