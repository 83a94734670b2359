//! Accumulated knowledge about the hidden answer.

use std::fmt;

use crate::error::InputError;
use crate::feedback::{Feedback, FeedbackPattern};
use crate::word::Word;
use crate::WORD_LENGTH;

/// What the feedback so far says about the answer.
///
/// * `locked` - letters known to sit at a position
/// * `misplaced` - letters known to be present, each paired with a position
///   they are known not to occupy
/// * `absent` - letters known not to occur at all
///
/// A letter that is locked or misplaced is never recorded as absent; the
/// mutators below keep that invariant when feedback marks one copy of a
/// doubled letter incorrect and another copy correct or misplaced.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConstraintSet {
    locked: [Option<u8>; WORD_LENGTH],
    misplaced: Vec<(u8, usize)>,
    absent: [bool; 26],
}

impl ConstraintSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Constraints implied by a single scored guess.
    pub fn from_feedback(guess: &Word, pattern: FeedbackPattern) -> Self {
        let mut constraints = Self::new();
        constraints.apply(guess, pattern);
        constraints
    }

    /// Record an uppercase `letter` as sitting at `position`.
    pub fn lock(&mut self, position: usize, letter: u8) -> Result<(), InputError> {
        let index = letter_index(letter)?;
        check_position(position)?;
        self.locked[position] = Some(letter);
        self.absent[index] = false;
        Ok(())
    }

    /// Record an uppercase `letter` as present but not at `position`.
    pub fn exclude(&mut self, letter: u8, position: usize) -> Result<(), InputError> {
        let index = letter_index(letter)?;
        check_position(position)?;
        if !self.misplaced.contains(&(letter, position)) {
            self.misplaced.push((letter, position));
        }
        self.absent[index] = false;
        Ok(())
    }

    /// Record a letter as absent unless it is already known to be present.
    /// Returns whether the letter was recorded.
    pub fn mark_absent(&mut self, letter: u8) -> Result<bool, InputError> {
        let index = letter_index(letter)?;
        if self.is_present(letter) {
            return Ok(false);
        }
        self.absent[index] = true;
        Ok(true)
    }

    /// Whether there is positive evidence (locked or misplaced) for a letter.
    pub fn is_present(&self, letter: u8) -> bool {
        self.locked.contains(&Some(letter)) || self.misplaced.iter().any(|&(l, _)| l == letter)
    }

    pub fn is_absent(&self, letter: u8) -> bool {
        letter_index(letter).is_ok_and(|i| self.absent[i]) && !self.is_present(letter)
    }

    /// Merge the feedback for one guess.
    pub fn apply(&mut self, guess: &Word, pattern: FeedbackPattern) {
        // Word letters are always uppercase
        let letters = guess.letters();
        let feedbacks = pattern.to_feedbacks();

        for (i, (&letter, fb)) in letters.iter().zip(feedbacks).enumerate() {
            match fb {
                Feedback::Correct => {
                    self.locked[i] = Some(letter);
                    self.absent[word_letter_index(letter)] = false;
                }
                Feedback::Misplaced => self.record_misplaced(letter, i),
                Feedback::Incorrect => (),
            }
        }

        // Incorrect only means "absent" when no copy of the letter scored
        for (i, (&letter, fb)) in letters.iter().zip(feedbacks).enumerate() {
            if fb != Feedback::Incorrect {
                continue;
            }
            if self.is_present(letter) {
                self.record_misplaced(letter, i);
            } else {
                self.absent[word_letter_index(letter)] = true;
            }
        }
    }

    fn record_misplaced(&mut self, letter: u8, position: usize) {
        if !self.misplaced.contains(&(letter, position)) {
            self.misplaced.push((letter, position));
        }
        self.absent[word_letter_index(letter)] = false;
    }

    /// Check if a word satisfies every constraint.
    pub fn allows(&self, word: &Word) -> bool {
        let letters = word.letters();

        for (i, locked) in self.locked.iter().enumerate() {
            if let Some(c) = locked {
                if letters[i] != *c {
                    return false;
                }
            }
        }

        for &(letter, position) in &self.misplaced {
            if letters[position] == letter || !word.contains(letter) {
                return false;
            }
        }

        letters.iter().all(|&c| !self.is_absent(c))
    }

    /// Keep the words that satisfy every constraint, preserving order.
    pub fn filter(&self, words: &[Word]) -> Vec<Word> {
        words.iter().filter(|w| self.allows(w)).copied().collect()
    }

    pub fn is_solved(&self) -> bool {
        self.locked.iter().all(Option::is_some)
    }

    pub fn is_empty(&self) -> bool {
        self.locked.iter().all(Option::is_none)
            && self.misplaced.is_empty()
            && !self.absent.iter().any(|&a| a)
    }

    pub fn locked(&self) -> &[Option<u8>; WORD_LENGTH] {
        &self.locked
    }

    pub fn misplaced(&self) -> &[(u8, usize)] {
        &self.misplaced
    }

    pub fn absent_letters(&self) -> impl Iterator<Item = char> + '_ {
        (b'A'..=b'Z')
            .filter(|&c| self.is_absent(c))
            .map(char::from)
    }
}

fn letter_index(letter: u8) -> Result<usize, InputError> {
    if letter.is_ascii_uppercase() {
        Ok(word_letter_index(letter))
    } else {
        Err(InputError::Letter {
            letter: char::from(letter),
        })
    }
}

fn word_letter_index(letter: u8) -> usize {
    (letter - b'A') as usize
}

fn check_position(position: usize) -> Result<(), InputError> {
    if position < WORD_LENGTH {
        Ok(())
    } else {
        Err(InputError::Position { position })
    }
}

impl fmt::Display for ConstraintSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let locked: String = self
            .locked
            .iter()
            .map(|c| c.map_or('_', char::from))
            .collect();
        write!(f, "Correct: {locked}  Misplaced:")?;
        for &(letter, position) in &self.misplaced {
            write!(f, " {}@{}", char::from(letter), position + 1)?;
        }
        write!(f, "  Incorrect: ")?;
        for c in self.absent_letters() {
            write!(f, "{c}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn w(s: &str) -> Word {
        Word::parse(s).unwrap()
    }

    #[test]
    fn doubled_letter_is_not_marked_absent() {
        // SPEED against CREEP: both E correct, P misplaced, S and D absent
        let pattern = FeedbackPattern::calculate(&w("speed"), &w("creep"));
        let constraints = ConstraintSet::from_feedback(&w("speed"), pattern);

        assert!(!constraints.is_absent(b'E'));
        assert!(constraints.is_absent(b'S'));
        assert!(constraints.is_absent(b'D'));
        assert!(constraints.allows(&w("creep")));
    }

    #[test]
    fn incorrect_copy_excludes_its_position() {
        // GEESE against CREEP: the last E is incorrect but E is present
        let pattern = FeedbackPattern::calculate(&w("geese"), &w("creep"));
        let constraints = ConstraintSet::from_feedback(&w("geese"), pattern);

        assert!(!constraints.is_absent(b'E'));
        assert!(constraints.misplaced().contains(&(b'E', 4)));
        assert!(constraints.allows(&w("creep")));
        assert!(!constraints.allows(&w("crepe")));
    }

    #[test]
    fn mark_absent_respects_positive_evidence() {
        let mut constraints = ConstraintSet::new();
        constraints.lock(0, b'A').unwrap();
        assert!(!constraints.mark_absent(b'A').unwrap());
        assert!(!constraints.is_absent(b'A'));
        assert!(constraints.mark_absent(b'B').unwrap());
    }

    #[test]
    fn later_evidence_clears_absent() {
        let mut constraints = ConstraintSet::new();
        assert!(constraints.mark_absent(b'A').unwrap());
        constraints.exclude(b'A', 2).unwrap();
        assert!(!constraints.is_absent(b'A'));
    }

    #[test]
    fn bad_letter_or_position_is_rejected() {
        let mut constraints = ConstraintSet::new();
        assert_eq!(
            constraints.mark_absent(b'a'),
            Err(InputError::Letter { letter: 'a' })
        );
        assert_eq!(
            constraints.exclude(b'A', 7),
            Err(InputError::Position { position: 7 })
        );
        assert_eq!(
            constraints.lock(5, b'C'),
            Err(InputError::Position { position: 5 })
        );
        assert_eq!(
            constraints.lock(0, b'#'),
            Err(InputError::Letter { letter: '#' })
        );

        // Rejected input leaves nothing behind
        assert!(constraints.is_empty());
        assert!(!constraints.is_absent(b'a'));
        assert!(constraints.allows(&w("crane")));
    }

    #[test]
    fn display() {
        let mut constraints = ConstraintSet::new();
        constraints.lock(0, b'C').unwrap();
        constraints.exclude(b'R', 1).unwrap();
        constraints.mark_absent(b'N').unwrap();
        assert_eq!(
            constraints.to_string(),
            "Correct: C____  Misplaced: R@2  Incorrect: N"
        );
    }
}
