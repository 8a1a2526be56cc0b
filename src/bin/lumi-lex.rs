use clap::{Parser, Subcommand};
use lumi_lex::{Error, LexBuilder, Options, Token};
use std::collections::VecDeque;
use std::fmt::Write;
use std::fs;
use std::process::ExitCode;
use std::sync::{Arc, Mutex};

const VERSION: &str = env!("CARGO_PKG_VERSION");

#[derive(Debug, Parser)]
#[command(
    name = "lumi-lex",
    about = "Tokenizes text-based ledger files.",
    version = VERSION,
)]
struct Cli {
    /// Abandon string literals spanning more lines than this.
    #[arg(long)]
    long_string_maxlines: Option<usize>,
    /// Input file; repeat to lex several files.
    #[arg(short, long = "input", required = true)]
    inputs: Vec<String>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Clone, Copy, Subcommand)]
enum Commands {
    /// Prints every token as `line KIND lexeme value`.
    Tokens,
    /// Prints the errors as `file:line: message`.
    Check,
}

/// Output of one input file and the number of errors found in it.
type Outcome = (String, usize);

fn lex_file(path: &str, options: Options, command: Commands) -> Outcome {
    let src = match fs::read_to_string(path) {
        Ok(src) => src,
        Err(e) => {
            log::error!("Couldn't read {}: {}", path, e);
            return (String::new(), 1);
        }
    };
    let mut lexer = LexBuilder::with_options(options).lex(&src);
    let mut output = String::new();
    match command {
        Commands::Tokens => {
            for token in lexer.by_ref() {
                print_token(&mut output, path, &token);
            }
        }
        Commands::Check => lexer.by_ref().for_each(drop),
    }
    let errors = lexer.into_errors();
    print_errors(&mut output, path, &errors);
    (output, errors.len())
}

fn print_token(output: &mut String, path: &str, token: &Token) {
    let _ = writeln!(output, "{}:{}", path, token);
}

fn print_errors(output: &mut String, path: &str, errors: &[Error]) {
    for error in errors {
        let _ = writeln!(output, "{}", error.report(path));
    }
}

type Queue = Mutex<VecDeque<(usize, String)>>;

/// Pops the next input. A panic in another worker does not strand the files
/// still queued.
fn next_task(queue: &Queue) -> Option<(usize, String)> {
    match queue.lock() {
        Ok(mut queue) => queue.pop_front(),
        Err(poisoned) => {
            log::warn!("Input queue poisoned by a panicked thread.");
            poisoned.into_inner().pop_front()
        }
    }
}

/// Replaces the outcome of every file no worker finished with one error.
fn fill_missing(outcomes: Vec<Option<Outcome>>, inputs: Vec<String>) -> Vec<Outcome> {
    outcomes
        .into_iter()
        .zip(inputs)
        .map(|(outcome, path)| {
            outcome.unwrap_or_else(|| {
                log::error!("{} was not lexed.", path);
                (String::new(), 1)
            })
        })
        .collect()
}

/// Lexes every input on a pool of worker threads, one session per file, and
/// returns the outcomes in input order. A file that no worker finished counts
/// as one error.
fn lex_files(inputs: Vec<String>, options: Options, command: Commands) -> Vec<Outcome> {
    let num_files = inputs.len();
    let queue: Arc<Queue> = Arc::new(Mutex::new(inputs.iter().cloned().enumerate().collect()));
    let num_threads = std::env::var("LUMI_LEXER_THREADS")
        .ok()
        .and_then(|num| num.parse::<usize>().ok())
        .unwrap_or_else(num_cpus::get)
        .clamp(1, num_files.max(1));
    log::debug!("lexing {} files with {} threads", num_files, num_threads);
    let handlers = (0..num_threads)
        .map(|_| {
            let queue = queue.clone();
            std::thread::spawn(move || {
                let mut results = vec![];
                loop {
                    match next_task(&queue) {
                        Some((index, path)) => {
                            results.push((index, lex_file(&path, options, command)))
                        }
                        None => return results,
                    }
                }
            })
        })
        .collect::<Vec<_>>();
    let mut outcomes: Vec<Option<Outcome>> = vec![None; num_files];
    for handler in handlers {
        match handler.join() {
            Ok(results) => {
                for (index, outcome) in results {
                    outcomes[index] = Some(outcome);
                }
            }
            Err(_) => log::error!("A lexing thread panicked."),
        }
    }
    fill_missing(outcomes, inputs)
}

fn main() -> ExitCode {
    pretty_env_logger::init();
    let args = Cli::parse();
    let mut options = Options::from_env();
    if let Some(maxlines) = args.long_string_maxlines {
        options.long_string_maxlines = maxlines.max(1);
    }
    let mut num_errors = 0;
    for (output, errors) in lex_files(args.inputs, options, args.command) {
        print!("{}", output);
        num_errors += errors;
    }
    if num_errors > 0 {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}
