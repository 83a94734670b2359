//! Splitting candidate answers into feedback groups.
//!
//! For a prospective guess every candidate answer produces some feedback
//! pattern. Candidates sharing a pattern cannot be told apart by that guess,
//! so the groups are what is left to solve after playing it.

use std::fmt;

use crate::feedback::FeedbackPattern;
use crate::word::Word;

/// Candidates that produce the same feedback for a guess.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Group {
    pub pattern: FeedbackPattern,
    pub words: Vec<Word>,
}

impl Group {
    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

impl fmt::Display for Group {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.pattern)?;
        for word in &self.words {
            write!(f, "\n\t{word}")?;
        }
        Ok(())
    }
}

/// The groups a guess induces over a candidate set.
///
/// Groups are ordered by the first candidate that fell into them and words
/// within a group keep the candidate order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Partition {
    pub guess: Word,
    pub groups: Vec<Group>,
}

impl Partition {
    pub fn group_count(&self) -> usize {
        self.groups.len()
    }

    pub fn largest_group(&self) -> usize {
        self.groups.iter().map(Group::len).max().unwrap_or(0)
    }

    pub fn group(&self, pattern: FeedbackPattern) -> Option<&Group> {
        self.groups.iter().find(|g| g.pattern == pattern)
    }

    /// Groups sorted largest first, for display.
    pub fn by_size(&self) -> Vec<&Group> {
        let mut groups: Vec<&Group> = self.groups.iter().collect();
        groups.sort_by(|a, b| b.len().cmp(&a.len()));
        groups
    }
}

/// Partition `candidates` by the feedback each would give for `guess`.
pub fn partition(guess: &Word, candidates: &[Word]) -> Partition {
    group_by_feedback(
        guess,
        candidates
            .iter()
            .map(|answer| (*answer, FeedbackPattern::calculate(guess, answer))),
    )
}

/// Group already-scored candidates, keeping their order.
pub fn group_by_feedback<I>(guess: &Word, scored: I) -> Partition
where
    I: IntoIterator<Item = (Word, FeedbackPattern)>,
{
    let mut slots = [usize::MAX; FeedbackPattern::NUM_PATTERNS];
    let mut groups: Vec<Group> = Vec::new();

    for (candidate, pattern) in scored {
        let slot = &mut slots[pattern.0 as usize];
        if *slot == usize::MAX {
            *slot = groups.len();
            groups.push(Group {
                pattern,
                words: Vec::new(),
            });
        }
        groups[*slot].words.push(candidate);
    }

    Partition {
        guess: *guess,
        groups,
    }
}
