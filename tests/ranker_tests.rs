use std::sync::Arc;

use octordle_solver::{partition, FeedbackPattern, Ranker, SolverConfig, Word, WordStore};

fn w(s: &str) -> Word {
    Word::parse(s).unwrap()
}

fn words(list: &[&str]) -> Vec<Word> {
    list.iter().map(|s| w(s)).collect()
}

const ATER: [&str; 6] = ["DATER", "EATER", "HATER", "RATED", "RATER", "WATER"];

fn get_test_words() -> Vec<Word> {
    words(&[
        "crane", "slate", "trace", "crate", "raise", "arise", "stare", "roast", "toast", "beast",
    ])
}

fn ranker(store: WordStore, config: SolverConfig) -> Ranker {
    Ranker::new(Arc::new(store), config).unwrap()
}

#[test]
fn test_single_word_vocabulary() {
    let ranker = ranker(WordStore::from_words(words(&["crane"])), SolverConfig::default());
    let candidates = ranker.all_answers();

    let ranking = ranker.rank(&candidates);
    assert_eq!(ranking.len(), 1);
    assert_eq!(ranking[0].word, w("crane"));
    assert_eq!(ranking[0].group_count, 1);
    assert_eq!(ranking[0].largest_group, 1);

    let partition = ranker.partition(&w("crane"), &candidates);
    assert_eq!(partition.group_count(), 1);
    assert_eq!(partition.groups[0].words, words(&["crane"]));
    assert!(partition.groups[0].pattern.is_win());
}

#[test]
fn test_empty_candidates() {
    let ranker = ranker(WordStore::from_words(get_test_words()), SolverConfig::default());
    assert!(ranker.rank(&[]).is_empty());
    assert!(ranker.best(&[]).is_none());
}

#[test]
fn test_singleton_groups_beat_one_large_group() {
    let mut vocabulary = words(&ATER);
    vocabulary.extend(words(&["crane", "hewed", "dehwr"]));
    let ranker = ranker(WordStore::new(vocabulary, words(&ATER)), SolverConfig::default());
    let candidates = ranker.all_answers();

    // CRANE scores every one of these identically
    let crane = ranker.partition(&w("crane"), &candidates);
    assert_eq!(crane.group_count(), 1);
    assert_eq!(crane.largest_group(), 6);

    let ranking = ranker.rank(&candidates);
    let order: Vec<Word> = ranking.iter().map(|e| e.word).collect();
    assert_eq!(
        order,
        words(&["hewed", "dehwr", "rated", "dater", "eater", "hater", "rater", "water", "crane"])
    );

    assert_eq!(ranking[0].group_count, 6);
    assert_eq!(ranking[0].largest_group, 1);
    assert!(ranking[0].guarantees_solve());
    assert!(!ranking[0].is_candidate);
    assert!(ranking[2].is_candidate);
}

#[test]
fn test_hewed_patterns() {
    let partition = partition(&w("hewed"), &words(&ATER));
    let expected = [
        ("22201", "DATER"),
        ("21202", "EATER"),
        ("02202", "HATER"),
        ("22200", "RATED"),
        ("22202", "RATER"),
        ("22102", "WATER"),
    ];
    assert_eq!(partition.group_count(), 6);
    for (key, word) in expected {
        let group = partition.group(FeedbackPattern::parse(key).unwrap()).unwrap();
        assert_eq!(group.words, words(&[word]));
    }
}

#[test]
fn test_partition_is_complete() {
    let ranker = ranker(WordStore::from_words(get_test_words()), SolverConfig::default());
    let candidates = ranker.all_answers();

    for guess in ranker.store().guesses() {
        let partition = ranker.partition(guess, &candidates);
        let total: usize = partition.groups.iter().map(|g| g.len()).sum();
        assert_eq!(total, candidates.len());

        for group in &partition.groups {
            for answer in &group.words {
                assert_eq!(FeedbackPattern::calculate(guess, answer), group.pattern);
            }
        }

        let evaluation = ranker.evaluate(guess, &candidates);
        assert_eq!(evaluation.group_count, partition.group_count());
        assert_eq!(evaluation.largest_group, partition.largest_group());
    }
}

#[test]
fn test_partition_keeps_candidate_order() {
    let partition = partition(&w("trace"), &words(&["slate", "trace", "crate", "stare"]));
    let firsts: Vec<Word> = partition.groups.iter().map(|g| g.words[0]).collect();
    assert_eq!(firsts, words(&["slate", "trace", "crate", "stare"]));
    assert_eq!(partition.by_size().len(), 4);
}

#[test]
fn test_evaluate_word_outside_vocabulary() {
    let ranker = ranker(WordStore::from_words(words(&ATER)), SolverConfig::default());
    let evaluation = ranker.evaluate(&w("hewed"), &ranker.all_answers());
    assert_eq!(evaluation.group_count, 6);
    assert_eq!(evaluation.largest_group, 1);
    assert!(!evaluation.is_candidate);
}

#[test]
fn test_ranking_is_deterministic() {
    let mut vocabulary = get_test_words();
    vocabulary.extend(words(&ATER));
    vocabulary.extend(words(&["hewed", "dehwr", "beget", "south"]));
    let answers = vocabulary.clone();

    let configs = [
        SolverConfig::default(),
        SolverConfig {
            threads: Some(1),
            chunk_size: 1,
            ..SolverConfig::default()
        },
        SolverConfig {
            threads: Some(4),
            precompute_feedback: false,
            chunk_size: 3,
            ..SolverConfig::default()
        },
    ];

    let rankings: Vec<_> = configs
        .into_iter()
        .map(|config| {
            let ranker = ranker(WordStore::new(vocabulary.clone(), answers.clone()), config);
            let candidates = ranker.all_answers();
            ranker.rank(&candidates)
        })
        .collect();

    assert_eq!(rankings[0].len(), vocabulary.len());
    assert_eq!(rankings[0], rankings[1]);
    assert_eq!(rankings[0], rankings[2]);

    for pair in rankings[0].windows(2) {
        assert!(pair[0].rank_key() < pair[1].rank_key());
    }
}

#[test]
fn test_fitness_prefers_possible_answers() {
    let ranker = ranker(WordStore::from_words(get_test_words()), SolverConfig::default());
    let candidates = ranker.all_answers();
    let ranking = ranker.rank(&candidates);

    // CRANE, CRATE and TRACE all split the list into singletons
    let best: Vec<Word> = ranking.iter().take(3).map(|e| e.word).collect();
    assert_eq!(best, words(&["crane", "crate", "trace"]));
    for evaluation in &ranking[..3] {
        assert!((evaluation.fitness(ranker.config()) - (10.0 - 0.1 + 2.0)).abs() < 1e-9);
    }
}
