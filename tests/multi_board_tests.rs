use std::sync::Arc;

use octordle_solver::{
    joint_recommendation, BoardState, CancelFlag, Error, FeedbackPattern, InputError, MultiBoard,
    OpeningBook, Ranker, SolverConfig, Word, WordStore,
};

fn w(s: &str) -> Word {
    Word::parse(s).unwrap()
}

fn words(list: &[&str]) -> Vec<Word> {
    list.iter().map(|s| w(s)).collect()
}

fn get_test_words() -> Vec<Word> {
    words(&[
        "crane", "slate", "trace", "crate", "raise", "arise", "stare", "roast", "toast", "beast",
    ])
}

fn ater_words() -> Vec<Word> {
    words(&[
        "dater", "eater", "hater", "rated", "rater", "water", "crane", "slate", "toast", "beast",
    ])
}

fn ranker(store: WordStore) -> Arc<Ranker> {
    Arc::new(Ranker::new(Arc::new(store), SolverConfig::default()).unwrap())
}

fn feedbacks(guess: &str, targets: &[&str]) -> Vec<FeedbackPattern> {
    targets
        .iter()
        .map(|t| FeedbackPattern::calculate(&w(guess), &w(t)))
        .collect()
}

#[test]
fn test_creation() {
    let boards = MultiBoard::new(ranker(WordStore::from_words(get_test_words())), 8);
    assert_eq!(boards.len(), 8);
    assert_eq!(boards.unsolved_count(), 8);
    assert!(!boards.is_solved());
}

#[test]
fn test_single_unsolved_board_uses_its_best_guess() {
    let mut boards = MultiBoard::new(ranker(WordStore::from_words(ater_words())), 2);
    boards
        .apply_guess(&w("crane"), &feedbacks("crane", &["crane", "water"]))
        .unwrap();

    assert!(boards.board(0).unwrap().is_solved());
    assert_eq!(boards.unsolved_count(), 1);
    assert_eq!(boards.recommend(), Some(w("rated")));
}

#[test]
fn test_board_with_one_candidate_is_finished_first() {
    let mut boards = MultiBoard::new(ranker(WordStore::from_words(ater_words())), 2);
    boards
        .apply_guess(&w("crane"), &feedbacks("crane", &["water", "slate"]))
        .unwrap();

    assert_eq!(boards.board(0).unwrap().remaining_count(), 6);
    assert_eq!(boards.board(1).unwrap().remaining_count(), 1);
    assert_eq!(boards.recommend(), Some(w("slate")));
}

#[test]
fn test_one_candidate_found_without_ranking() {
    let vocabulary = words(&["crane", "slate", "toast"]);
    let answers = words(&["slate"]);
    let boards = MultiBoard::new(ranker(WordStore::new(vocabulary, answers)), 2);

    assert!(boards.boards().iter().all(|b| b.evaluations().is_empty()));
    assert_eq!(
        joint_recommendation(boards.boards(), &SolverConfig::default()),
        Some(w("slate"))
    );
}

#[test]
fn test_locked_board_still_needs_its_word() {
    let list = words(&["brine", "brick", "stone", "crane", "slate"]);
    let mut boards = MultiBoard::new(ranker(WordStore::from_words(list)), 2);
    let targets = ["brine", "stone"];

    boards
        .apply_guess(&w("brick"), &feedbacks("brick", &targets))
        .unwrap();
    boards
        .apply_guess(&w("stone"), &feedbacks("stone", &targets))
        .unwrap();

    // BRICK and STONE lock every letter of BRINE between them
    assert_eq!(boards.board(0).unwrap().state(), BoardState::AnswerKnown);
    assert!(boards.board(1).unwrap().is_solved());
    assert!(!boards.is_solved());
    assert_eq!(boards.unsolved_count(), 1);
    assert_eq!(boards.recommend(), Some(w("brine")));

    boards
        .apply_guess(&w("brine"), &feedbacks("brine", &targets))
        .unwrap();
    assert!(boards.is_solved());
    assert_eq!(boards.recommend(), None);
}

#[test]
fn test_opening_book_boards_rank_in_full() {
    let opening = w("crane");
    let targets = ["water", "rater"];
    let patterns = feedbacks("crane", &targets);
    // Both targets score the same against CRANE
    assert_eq!(patterns[0], patterns[1]);

    let mut book = OpeningBook::new();
    book.put(opening, patterns[0], w("hater"));

    let mut boards = MultiBoard::new(ranker(WordStore::from_words(ater_words())), 2)
        .with_opening_book(Arc::new(book));
    boards.apply_guess(&opening, &patterns).unwrap();
    assert!(boards.boards().iter().all(|b| b.best().map(|e| e.word) == Some(w("hater"))));

    // Weighted fitness over the full rankings prefers RATED to the book word
    assert_eq!(boards.recommend(), Some(w("rated")));
    for board in boards.boards() {
        assert_eq!(board.evaluations().len(), 10);
        assert_eq!(board.evaluations()[0].word, w("hater"));
    }
}

#[test]
fn test_guaranteed_solve_is_taken() {
    // CRANE leaves every word of this list in its own group
    let mut boards = MultiBoard::new(ranker(WordStore::from_words(get_test_words())), 3);
    assert_eq!(boards.recommend(), Some(w("crane")));
}

#[test]
fn test_weighted_fitness_decides_otherwise() {
    let mut vocabulary = words(&["dater", "eater", "hater", "rated", "rater", "water"]);
    vocabulary.push(w("crane"));
    let answers = vocabulary[..6].to_vec();
    let mut boards = MultiBoard::new(ranker(WordStore::new(vocabulary, answers)), 2);

    let guess = boards.recommend();
    assert_eq!(guess, Some(w("rated")));

    // Same answer as summing weighted fitness by hand
    let config = SolverConfig::default();
    let total: usize = boards.boards().iter().map(|b| b.remaining_count()).sum();
    let mut best: Option<(Word, f64)> = None;
    for evaluation in boards.board(0).unwrap().evaluations() {
        let score: f64 = boards
            .boards()
            .iter()
            .map(|b| {
                let weight = (total - b.remaining_count()) as f64 / total as f64;
                let e = b.evaluations().iter().find(|e| e.word == evaluation.word).unwrap();
                e.fitness(&config) * weight
            })
            .sum();
        if best.map_or(true, |(_, top)| score > top) {
            best = Some((evaluation.word, score));
        }
    }
    assert_eq!(guess, best.map(|(word, _)| word));
    assert_eq!(joint_recommendation(boards.boards(), &config), guess);
}

#[test]
fn test_solved_boards_recommend_nothing() {
    let mut boards = MultiBoard::new(ranker(WordStore::from_words(get_test_words())), 2);
    boards
        .apply_guess(&w("crane"), &feedbacks("crane", &["crane", "crane"]))
        .unwrap();

    assert!(boards.is_solved());
    assert_eq!(boards.recommend(), None);
}

#[test]
fn test_feedback_count_must_match_boards() {
    let mut boards = MultiBoard::new(ranker(WordStore::from_words(get_test_words())), 2);
    let err = boards
        .apply_guess(&w("crane"), &feedbacks("crane", &["slate"]))
        .unwrap_err();

    assert!(matches!(
        err,
        Error::Input(InputError::BoardCount {
            expected: 2,
            found: 1
        })
    ));
}

#[test]
fn test_rejected_feedback_changes_no_board() {
    let mut boards = MultiBoard::new(ranker(WordStore::from_words(get_test_words())), 2);
    let mut patterns = feedbacks("crane", &["slate"]);
    // Every word in the list has an A
    patterns.push(FeedbackPattern::parse("NNNNN").unwrap());

    let err = boards.apply_guess(&w("crane"), &patterns).unwrap_err();
    assert!(err.is_impossible_state());
    assert_eq!(boards.board(0).unwrap().remaining_count(), 10);
    assert!(boards.board(0).unwrap().history().is_empty());
}

#[test]
fn test_solved_boards_ignore_feedback() {
    let mut boards = MultiBoard::new(ranker(WordStore::from_words(get_test_words())), 2);
    boards
        .apply_guess(&w("crane"), &feedbacks("crane", &["crane", "toast"]))
        .unwrap();

    // Board 0 is solved, so its feedback is not checked
    let mut patterns = vec![FeedbackPattern::parse("NNNNN").unwrap()];
    patterns.extend(feedbacks("toast", &["toast"]));
    boards.apply_guess(&w("toast"), &patterns).unwrap();

    assert!(boards.is_solved());
    assert_eq!(boards.board(0).unwrap().history().len(), 1);
}

#[test]
fn test_cancelled_recommendation() {
    let mut boards = MultiBoard::new(ranker(WordStore::from_words(get_test_words())), 2);
    let cancel = CancelFlag::new();

    assert_eq!(boards.recommend_with_cancel(&cancel).unwrap(), Some(w("crane")));

    cancel.cancel();
    assert!(matches!(
        boards.recommend_with_cancel(&cancel),
        Err(Error::Cancelled)
    ));

    cancel.reset();
    assert!(boards.recommend_with_cancel(&cancel).is_ok());
}

#[test]
fn test_reset() {
    let mut boards = MultiBoard::new(ranker(WordStore::from_words(get_test_words())), 2);
    boards
        .apply_guess(&w("crane"), &feedbacks("crane", &["crane", "toast"]))
        .unwrap();
    boards.reset();

    assert_eq!(boards.unsolved_count(), 2);
    assert!(boards.boards().iter().all(|b| b.remaining_count() == 10));
}
