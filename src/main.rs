//! Octordle Solver CLI
//!
//! Interactive command-line interface for the Wordle and Octordle solvers.

use std::error::Error;
use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use clap::{Parser, Subcommand};
use log::LevelFilter;
use octordle_solver::simulate::{
    average_guesses, guess_distribution, solve_for_target, solve_for_targets,
};
use octordle_solver::{
    Board, BoardState, FeedbackPattern, MultiBoard, OpeningBook, Ranker, SolverConfig, Word,
    WordStore,
};

/// Wordle and Octordle solver
#[derive(Parser)]
#[command(author, version, about)]
struct Args {
    /// Guessable words, one per line
    #[arg(short, long)]
    guesses: PathBuf,

    /// Possible answers, one per line
    #[arg(short, long)]
    answers: PathBuf,

    /// Opening book (JSON) with precomputed second guesses
    #[arg(short, long)]
    book: Option<PathBuf>,

    /// Solver settings (JSON)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Number of ranking threads
    #[arg(short = 'j', long)]
    threads: Option<usize>,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Interactive single board (default)
    Wordle,
    /// Interactive multiple boards
    Octordle {
        /// Number of boards
        #[arg(short = 'n', long, default_value_t = 8)]
        boards: usize,
    },
    /// Play a game against a known answer
    Solve {
        /// Answers to find, one per board
        #[arg(required = true)]
        targets: Vec<String>,
        /// First guess to play
        #[arg(short, long)]
        opening: Option<String>,
    },
    /// Play every answer and report the guess distribution
    Bench {
        /// First guess to play
        #[arg(short, long)]
        opening: Option<String>,
    },
    /// Compute second guesses for opening words
    Book {
        /// Opening word, may be repeated
        #[arg(short = 'w', long = "opening", required = true)]
        openings: Vec<String>,
        /// Output file
        #[arg(short, long)]
        out: PathBuf,
    },
}

struct Spinner {
    running: Arc<AtomicBool>,
    handle: Option<JoinHandle<()>>,
}

impl Spinner {
    fn new(message: &'static str) -> Self {
        let running = Arc::new(AtomicBool::new(true));
        let running_clone = running.clone();
        let handle = thread::spawn(move || {
            let frames = ['⠋', '⠙', '⠹', '⠸', '⠼', '⠴', '⠦', '⠧', '⠇', '⠏'];
            let mut i = 0;
            while running_clone.load(Ordering::Relaxed) {
                eprint!("\r{} {}", frames[i % frames.len()], message);
                io::stderr().flush().ok();
                thread::sleep(Duration::from_millis(80));
                i += 1;
            }
            eprint!("\r{}\r", " ".repeat(message.len() + 3));
            io::stderr().flush().ok();
        });
        Self {
            running,
            handle: Some(handle),
        }
    }

    fn stop(mut self) {
        self.running.store(false, Ordering::Relaxed);
        if let Some(handle) = self.handle.take() {
            handle.join().ok();
        }
    }
}

impl Drop for Spinner {
    fn drop(&mut self) {
        self.running.store(false, Ordering::Relaxed);
    }
}

fn prompt(line: &mut String) -> io::Result<bool> {
    print!("> ");
    io::stdout().flush()?;
    line.clear();
    Ok(io::stdin().lock().read_line(line)? != 0)
}

fn print_words(words: &[Word]) {
    for (i, word) in words.iter().enumerate() {
        if i > 0 && i % 10 == 0 {
            println!();
        }
        print!("{:>8}", word);
    }
    println!();
}

fn print_top(board: &Board, n: usize) {
    let top = &board.evaluations()[..n.min(board.evaluations().len())];
    println!();
    println!("{:>4} {:>8} {:>8} {:>8} {:>8} Possible?", "#", "Word", "Groups", "Largest", "Fitness");
    println!("{}", "-".repeat(52));
    for (i, evaluation) in top.iter().enumerate() {
        println!(
            "{:>4} {:>8} {:>8} {:>8} {:>8.1} {}",
            i + 1,
            evaluation.word,
            evaluation.group_count,
            evaluation.largest_group,
            board.fitness(evaluation),
            if evaluation.is_candidate { "✓" } else { "" }
        );
    }
    println!();
}

fn rank_with_spinner(board: &mut Board) {
    let spinner = Spinner::new("Ranking guesses...");
    board.rank();
    spinner.stop();
}

fn run_wordle(ranker: Arc<Ranker>, book: Option<Arc<OpeningBook>>) -> Result<(), Box<dyn Error>> {
    let mut board = Board::new(ranker);
    if let Some(book) = book {
        board = board.with_opening_book(book);
    }

    println!("{} possible answers.", board.remaining_count());
    println!("Commands: suggest, top [n], feedback <word> <YMN>, remaining, groups <word>, constraints, reset, quit");
    println!();

    let mut line = String::new();
    while prompt(&mut line)? {
        let parts: Vec<&str> = line.split_whitespace().collect();
        if parts.is_empty() {
            continue;
        }

        match parts[0].to_lowercase().as_str() {
            "quit" | "exit" | "q" => break,
            "suggest" | "s" | "best" => {
                rank_with_spinner(&mut board);
                match board.best() {
                    Some(best) => {
                        println!();
                        println!("Best guess: {}", best.word);
                        println!("  Groups: {}", best.group_count);
                        println!("  Largest group: {}", best.largest_group);
                        if best.is_candidate {
                            println!("  ✓ This word is a possible answer");
                        }
                        println!();
                        println!("Remaining possibilities: {}", board.remaining_count());
                        println!();
                    }
                    None => println!("Nothing to suggest."),
                }
            }
            "top" | "t" => {
                let n: usize = parts.get(1).and_then(|s| s.parse().ok()).unwrap_or(5);
                rank_with_spinner(&mut board);
                print_top(&board, n);
            }
            "feedback" | "f" | "fb" => {
                if parts.len() < 3 {
                    println!("Usage: feedback <word> <pattern>");
                    println!("Example: feedback crane YMNNN");
                    continue;
                }

                let prev_count = board.remaining_count();
                let spinner = Spinner::new("Ranking guesses...");
                let result = board.apply_str(parts[1], parts[2]);
                spinner.stop();

                match result {
                    Ok(_) if board.is_solved() => {
                        println!();
                        println!("Solved in {} guesses!", board.history().len());
                        println!();
                    }
                    Ok(BoardState::AnswerKnown) => {
                        if let Some(answer) = board.candidates().first() {
                            println!("Every letter is known, play {answer} to finish.");
                        }
                    }
                    Ok(_) => {
                        let new_count = board.remaining_count();
                        println!(
                            "Eliminated {} words ({} → {})",
                            prev_count - new_count,
                            prev_count,
                            new_count
                        );
                        if new_count <= 10 {
                            print_words(&board.candidates());
                        }
                    }
                    Err(e) if e.is_impossible_state() => {
                        println!("⚠️  {e}");
                        println!("Check the feedback and try again; nothing was changed.");
                    }
                    Err(e) => println!("{e}"),
                }
            }
            "remaining" | "r" | "left" => {
                println!("Remaining possibilities: {}", board.remaining_count());
                if board.remaining_count() <= 50 {
                    print_words(&board.candidates());
                }
            }
            "groups" | "g" => match parts.get(1).map(|w| Word::parse(w)) {
                Some(Ok(word)) => {
                    let partition = board.partition(&word);
                    for group in partition.by_size() {
                        println!("{group}");
                    }
                    println!("Num groups: {}", partition.group_count());
                    println!("Largest group: {}", partition.largest_group());
                }
                Some(Err(e)) => println!("{e}"),
                None => println!("Usage: groups <word>"),
            },
            "constraints" | "c" => println!("{}", board.constraints()),
            "reset" => {
                board.reset();
                println!("Reset. {} words available.", board.remaining_count());
            }
            _ => println!("Unknown command: {}", parts[0]),
        }
    }

    Ok(())
}

fn run_octordle(
    ranker: Arc<Ranker>,
    book: Option<Arc<OpeningBook>>,
    count: usize,
) -> Result<(), Box<dyn Error>> {
    let mut boards = MultiBoard::new(ranker, count);
    if let Some(book) = book {
        boards = boards.with_opening_book(book);
    }

    println!("{count} boards.");
    println!("Commands: suggest, guess <word> <YMN per board, '-' for solved>, status, reset, quit");
    println!();

    let mut line = String::new();
    while prompt(&mut line)? {
        let parts: Vec<&str> = line.split_whitespace().collect();
        if parts.is_empty() {
            continue;
        }

        match parts[0].to_lowercase().as_str() {
            "quit" | "exit" | "q" => break,
            "suggest" | "s" => {
                let spinner = Spinner::new("Ranking guesses...");
                let guess = boards.recommend();
                spinner.stop();
                match guess {
                    Some(guess) => println!("Best guess: {guess}"),
                    None => println!("All boards solved."),
                }
            }
            "guess" | "g" => {
                if parts.len() != count + 2 {
                    println!("Usage: guess <word> followed by {count} feedback patterns");
                    continue;
                }
                let guess = match Word::parse(parts[1]) {
                    Ok(guess) => guess,
                    Err(e) => {
                        println!("{e}");
                        continue;
                    }
                };
                let feedbacks = parts[2..]
                    .iter()
                    .map(|p| match *p {
                        "-" => Ok(FeedbackPattern::ALL_CORRECT),
                        p => FeedbackPattern::parse(p),
                    })
                    .collect::<Result<Vec<_>, _>>();
                let feedbacks = match feedbacks {
                    Ok(feedbacks) => feedbacks,
                    Err(e) => {
                        println!("{e}");
                        continue;
                    }
                };

                let spinner = Spinner::new("Ranking guesses...");
                let result = boards.apply_guess(&guess, &feedbacks);
                spinner.stop();

                match result {
                    Ok(()) => print_status(&boards),
                    Err(e) => {
                        println!("⚠️  {e}");
                        println!("Nothing was changed.");
                    }
                }
            }
            "status" => print_status(&boards),
            "reset" => {
                boards.reset();
                println!("Reset.");
            }
            _ => println!("Unknown command: {}", parts[0]),
        }
    }

    Ok(())
}

fn print_status(boards: &MultiBoard) {
    for (i, board) in boards.boards().iter().enumerate() {
        if board.is_solved() {
            println!("Board {}: solved", i + 1);
        } else if board.remaining_count() <= 5 {
            let words: Vec<String> = board.candidates().iter().map(Word::to_string).collect();
            println!("Board {}: {}", i + 1, words.join(" "));
        } else {
            println!("Board {}: {} remaining", i + 1, board.remaining_count());
        }
    }
}

fn parse_opening(opening: Option<&str>) -> Result<Option<Word>, Box<dyn Error>> {
    Ok(opening.map(Word::parse).transpose()?)
}

fn load_book(path: &Path) -> Result<OpeningBook, Box<dyn Error>> {
    Ok(OpeningBook::from_reader(BufReader::new(File::open(path)?))?)
}

fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();

    env_logger::Builder::new()
        .filter_level(if args.verbose {
            LevelFilter::Debug
        } else {
            LevelFilter::Warn
        })
        .parse_default_env()
        .init();

    let mut config = match &args.config {
        Some(path) => SolverConfig::from_file(path)?,
        None => SolverConfig::default(),
    };
    if args.threads.is_some() {
        config.threads = args.threads;
    }

    let store = Arc::new(WordStore::from_files(&args.guesses, &args.answers)?);
    println!(
        "Loaded {} guesses and {} answers.",
        store.guesses().len(),
        store.answers().len()
    );

    let spinner = Spinner::new("Precomputing feedback...");
    let ranker = Arc::new(Ranker::new(store, config)?);
    spinner.stop();

    let book = match &args.book {
        Some(path) => Some(Arc::new(load_book(path)?)),
        None => None,
    };

    match args.command.unwrap_or(Command::Wordle) {
        Command::Wordle => run_wordle(ranker, book)?,
        Command::Octordle { boards } => run_octordle(ranker, book, boards)?,
        Command::Solve { targets, opening } => {
            let opening = parse_opening(opening.as_deref())?;
            let targets = WordStore::parse_words(targets.iter().map(String::as_str))?;

            if let [target] = targets.as_slice() {
                let transcript = solve_for_target(&ranker, book.as_ref(), target, opening)?;
                for (i, (guess, pattern)) in transcript.iter().enumerate() {
                    println!("Guess {}: {} → {}", i + 1, guess, pattern);
                }
            } else {
                let guesses = solve_for_targets(&ranker, book.as_ref(), &targets, opening)?;
                for (i, guess) in guesses.iter().enumerate() {
                    println!("Guess {}: {}", i + 1, guess);
                }
                println!("{} guesses for {} boards.", guesses.len(), targets.len());
            }
        }
        Command::Bench { opening } => {
            let opening = parse_opening(opening.as_deref())?;

            let spinner = Spinner::new("Running benchmark...");
            let start = Instant::now();
            let distribution = guess_distribution(&ranker, book.as_ref(), opening)?;
            let elapsed = start.elapsed();
            spinner.stop();

            let total: usize = distribution.iter().map(|(_, c)| c).sum();
            println!("Guess distribution:");
            for (guesses, count) in &distribution {
                let pct = *count as f64 / total as f64 * 100.0;
                let bar = "█".repeat((*count * 40 / total).max(1));
                println!("  {} guesses: {:>5} ({:>5.1}%) {}", guesses, count, pct, bar);
            }
            println!();
            println!("Average guesses: {:.3}", average_guesses(&distribution));
            println!("Total words: {}", total);
            println!("Time elapsed: {:.2?}", elapsed);
        }
        Command::Book { openings, out } => {
            let openings = WordStore::parse_words(openings.iter().map(String::as_str))?;
            let mut book = match &args.book {
                Some(path) if path.exists() => load_book(path)?,
                _ => OpeningBook::new(),
            };

            let spinner = Spinner::new("Computing opening book...");
            for opening in openings {
                book.compute(opening, &ranker);
            }
            spinner.stop();

            book.to_writer(BufWriter::new(File::create(&out)?))?;
            println!("Wrote {} entries to {}", book.len(), out.display());
        }
    }

    Ok(())
}
