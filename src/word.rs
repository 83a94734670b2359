//! Words and the word store.
//!
//! A [`Word`] is five uppercase ASCII letters. The [`WordStore`] holds the
//! guessable vocabulary and the possible answers; both are loaded once and
//! shared read-only between boards and ranking workers.

use std::fmt;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use std::str::FromStr;

use fxhash::{FxHashMap, FxHashSet};
use log::debug;
use serde_with::{DeserializeFromStr, SerializeDisplay};

use crate::error::{InputError, Result};
use crate::WORD_LENGTH;

/// Five uppercase letters.
#[derive(
    Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, SerializeDisplay, DeserializeFromStr,
)]
pub struct Word(pub(crate) [u8; WORD_LENGTH]);

impl Word {
    /// Parse a word, accepting either case.
    pub fn parse(s: &str) -> std::result::Result<Self, InputError> {
        let trimmed = s.trim();
        if trimmed.chars().count() != WORD_LENGTH {
            return Err(InputError::WordLength {
                word: trimmed.to_string(),
            });
        }

        let mut letters = [0u8; WORD_LENGTH];
        for (slot, c) in letters.iter_mut().zip(trimmed.chars()) {
            if !c.is_ascii_alphabetic() {
                return Err(InputError::WordLetter {
                    word: trimmed.to_string(),
                    letter: c,
                });
            }
            *slot = c.to_ascii_uppercase() as u8;
        }

        Ok(Self(letters))
    }

    pub fn letters(&self) -> &[u8; WORD_LENGTH] {
        &self.0
    }

    pub fn contains(&self, letter: u8) -> bool {
        self.0.contains(&letter)
    }

    pub fn as_str(&self) -> &str {
        // Only ASCII letters are ever stored
        std::str::from_utf8(&self.0).unwrap_or_default()
    }
}

impl FromStr for Word {
    type Err = InputError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<&str> for Word {
    type Error = InputError;

    fn try_from(value: &str) -> std::result::Result<Self, Self::Error> {
        Self::parse(value)
    }
}

impl fmt::Display for Word {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Debug for Word {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Word({})", self.as_str())
    }
}

/// The guessable vocabulary and the possible answers.
///
/// Every answer is also a guess: answers missing from the vocabulary are
/// appended to it, so `guesses()[answer_guess_index(i)] == answers()[i]`.
#[derive(Debug, Clone)]
pub struct WordStore {
    guesses: Vec<Word>,
    answers: Vec<Word>,
    answer_to_guess: Vec<usize>,
    guess_index: FxHashMap<Word, usize>,
}

impl WordStore {
    pub fn new(guesses: Vec<Word>, answers: Vec<Word>) -> Self {
        let mut vocabulary = Vec::with_capacity(guesses.len() + answers.len());
        let mut guess_index = FxHashMap::default();

        for word in guesses.into_iter().chain(answers.iter().copied()) {
            guess_index.entry(word).or_insert_with(|| {
                vocabulary.push(word);
                vocabulary.len() - 1
            });
        }

        let mut seen = FxHashSet::default();
        let answers: Vec<Word> = answers.into_iter().filter(|w| seen.insert(*w)).collect();

        let answer_to_guess = answers.iter().map(|a| guess_index[a]).collect();

        Self {
            guesses: vocabulary,
            answers,
            answer_to_guess,
            guess_index,
        }
    }

    /// Use one list as both vocabulary and answers.
    pub fn from_words(words: Vec<Word>) -> Self {
        Self::new(words.clone(), words)
    }

    /// Parse a list of words, failing on the first malformed one.
    pub fn parse_words<'a, I>(words: I) -> Result<Vec<Word>>
    where
        I: IntoIterator<Item = &'a str>,
    {
        words
            .into_iter()
            .map(|w| Word::parse(w).map_err(Into::into))
            .collect()
    }

    /// Read newline-delimited words, skipping blank lines.
    pub fn read_words<R: BufRead>(reader: R) -> Result<Vec<Word>> {
        let mut words = Vec::new();
        for line in reader.lines() {
            let line = line?;
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            words.push(Word::parse(line)?);
        }
        Ok(words)
    }

    pub fn from_files<P: AsRef<Path>, Q: AsRef<Path>>(guesses: P, answers: Q) -> Result<Self> {
        let guesses = Self::read_words(BufReader::new(File::open(guesses)?))?;
        let answers = Self::read_words(BufReader::new(File::open(answers)?))?;
        debug!(
            "Loaded {} guess words and {} answer words",
            guesses.len(),
            answers.len()
        );
        Ok(Self::new(guesses, answers))
    }

    pub fn guesses(&self) -> &[Word] {
        &self.guesses
    }

    pub fn answers(&self) -> &[Word] {
        &self.answers
    }

    pub fn guess_index(&self, word: &Word) -> Option<usize> {
        self.guess_index.get(word).copied()
    }

    pub fn answer_guess_index(&self, answer: usize) -> usize {
        self.answer_to_guess[answer]
    }

    pub fn is_guessable(&self, word: &Word) -> bool {
        self.guess_index.contains_key(word)
    }
}
