use std::fmt;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use geoquiz_core::model::{Category, QuizSettings, QuizSummary, DEFAULT_TOTAL_QUESTIONS};
use geoquiz_core::generator::DEFAULT_ATTEMPTS_PER_COUNTRY;
use geoquiz_core::{CountryPool, RandomSource};
use services::{Clock, QuizError, QuizSession, SelectionOutcome, load_countries};
use tracing_subscriber::EnvFilter;

#[derive(Debug)]
enum ArgsError {
    MissingValue { flag: &'static str },
    UnknownArg(String),
    MissingDataset,
    InvalidSeed { raw: String },
    InvalidQuestionCount { raw: String },
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
            ArgsError::MissingDataset => write!(f, "no dataset given (--dataset or GEOQUIZ_DATASET)"),
            ArgsError::InvalidSeed { raw } => write!(f, "invalid --seed value: {raw}"),
            ArgsError::InvalidQuestionCount { raw } => {
                write!(f, "invalid --questions value: {raw}")
            }
        }
    }
}

impl std::error::Error for ArgsError {}

fn require_value(
    args: &mut impl Iterator<Item = String>,
    flag: &'static str,
) -> Result<String, ArgsError> {
    args.next().ok_or(ArgsError::MissingValue { flag })
}

fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  cargo run -p app -- --dataset <countries.json> [options]");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --dataset <path>          REST Countries v3.1 JSON array");
    eprintln!("  --seed <u64>              replay a fixed question sequence");
    eprintln!("  --questions <n>           questions per quiz (default {DEFAULT_TOTAL_QUESTIONS})");
    eprintln!("  --categories <a,b,...>    capital,flag,population,currency,language,region");
    eprintln!("  --strict                  reject answers that are not an option");
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  GEOQUIZ_DATASET, GEOQUIZ_SEED, GEOQUIZ_QUESTIONS, GEOQUIZ_CATEGORIES, RUST_LOG");
}

struct Args {
    dataset: PathBuf,
    seed: Option<u64>,
    questions: u32,
    categories: Option<String>,
    strict: bool,
}

impl Args {
    fn parse(args: &mut impl Iterator<Item = String>) -> Result<Self, ArgsError> {
        let mut dataset = std::env::var("GEOQUIZ_DATASET").ok().map(PathBuf::from);
        let mut seed = std::env::var("GEOQUIZ_SEED")
            .ok()
            .map(|raw| parse_seed(&raw))
            .transpose()?;
        let mut questions = std::env::var("GEOQUIZ_QUESTIONS")
            .ok()
            .map(|raw| parse_question_count(&raw))
            .transpose()?
            .unwrap_or(DEFAULT_TOTAL_QUESTIONS);
        let mut categories = std::env::var("GEOQUIZ_CATEGORIES").ok();
        let mut strict = false;

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--dataset" => dataset = Some(PathBuf::from(require_value(args, "--dataset")?)),
                "--seed" => seed = Some(parse_seed(&require_value(args, "--seed")?)?),
                "--questions" => {
                    questions = parse_question_count(&require_value(args, "--questions")?)?;
                }
                "--categories" => categories = Some(require_value(args, "--categories")?),
                "--strict" => strict = true,
                "--help" | "-h" => {
                    print_usage();
                    std::process::exit(0);
                }
                _ => return Err(ArgsError::UnknownArg(arg)),
            }
        }

        Ok(Self {
            dataset: dataset.ok_or(ArgsError::MissingDataset)?,
            seed,
            questions,
            categories,
            strict,
        })
    }

    fn settings(&self) -> Result<QuizSettings, geoquiz_core::Error> {
        let categories = match &self.categories {
            Some(list) => list
                .split(',')
                .filter(|s| !s.trim().is_empty())
                .map(str::parse::<Category>)
                .collect::<Result<Vec<_>, _>>()?,
            None => Category::ALL.to_vec(),
        };
        Ok(QuizSettings::new(
            self.questions,
            DEFAULT_ATTEMPTS_PER_COUNTRY,
            categories,
            self.strict,
        )?)
    }

    fn random(&self) -> RandomSource {
        self.seed.map_or(RandomSource::Entropy, RandomSource::seeded)
    }
}

fn parse_seed(raw: &str) -> Result<u64, ArgsError> {
    raw.trim().parse().map_err(|_| ArgsError::InvalidSeed {
        raw: raw.to_string(),
    })
}

fn parse_question_count(raw: &str) -> Result<u32, ArgsError> {
    raw.trim()
        .parse()
        .map_err(|_| ArgsError::InvalidQuestionCount {
            raw: raw.to_string(),
        })
}

fn init_logging() {
    // Logs go to stderr so they never interleave with the quiz on stdout.
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

/// Maps a typed answer to an option: a 1-based number or the option text itself.
fn resolve_answer<'a>(input: &'a str, options: &'a [String]) -> &'a str {
    input
        .parse::<usize>()
        .ok()
        .and_then(|n| n.checked_sub(1))
        .and_then(|i| options.get(i))
        .map_or(input, String::as_str)
}

fn print_summary(out: &mut impl Write, summary: &QuizSummary) -> io::Result<()> {
    writeln!(out)?;
    writeln!(
        out,
        "Final score: {}/{} ({:.0}%)",
        summary.score(),
        summary.total_questions(),
        summary.percent()
    )?;
    for (category, score) in summary.by_category() {
        writeln!(out, "  {category:<10} {}/{}", score.correct, score.asked)?;
    }
    let elapsed = summary.completed_at() - summary.started_at();
    writeln!(out, "Time: {}s", elapsed.num_seconds())
}

fn play(session: &mut QuizSession) -> Result<(), Box<dyn std::error::Error>> {
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    let mut out = io::stdout().lock();

    while let Some(question) = session.current_question().cloned() {
        let progress = session.progress();
        writeln!(out)?;
        writeln!(
            out,
            "Question {}/{} [{}]  score {}",
            progress.issued,
            progress.total,
            question.category(),
            progress.score
        )?;
        writeln!(out, "{}", question.prompt())?;
        if let Some(url) = question.image_url() {
            writeln!(out, "  (flag: {url})")?;
        }
        for (i, option) in question.options().iter().enumerate() {
            writeln!(out, "  {}. {option}", i + 1)?;
        }

        loop {
            write!(out, "> ")?;
            out.flush()?;
            let Some(line) = lines.next().transpose()? else {
                return Ok(());
            };
            let input = line.trim();
            if input.eq_ignore_ascii_case("q") {
                return Ok(());
            }
            if input.is_empty() {
                writeln!(out, "Skipped. Answer: {}", question.correct_answer())?;
                break;
            }

            let outcome = match session.select_option(resolve_answer(input, question.options())) {
                Ok(outcome) => outcome,
                Err(QuizError::InvalidSelection { option }) => {
                    writeln!(out, "{option:?} is not an option.")?;
                    continue;
                }
                Err(err) => return Err(err.into()),
            };
            match outcome {
                SelectionOutcome::Recorded {
                    correct: true, ..
                } => {
                    writeln!(out, "Correct!")?;
                    break;
                }
                SelectionOutcome::Recorded { correct_answer, .. } => {
                    writeln!(out, "Wrong. Answer: {correct_answer}")?;
                    break;
                }
                SelectionOutcome::Ignored(_) => {
                    writeln!(out, "Pick 1-{}, or press enter to skip.", question.options().len())?;
                }
            }
        }

        session.advance()?;
    }

    print_summary(&mut out, &session.summary()?)?;
    Ok(())
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let mut argv = std::env::args().skip(1);
    let args = Args::parse(&mut argv).map_err(|e| {
        eprintln!("{e}");
        print_usage();
        e
    })?;

    init_logging();

    let settings = args.settings()?;
    let pool = CountryPool::new(load_countries(&args.dataset)?)?;
    tracing::info!(
        countries = pool.len(),
        supported = ?pool.supported_categories(),
        "pool loaded"
    );

    let mut session = QuizSession::start(pool, settings, Clock::default(), args.random())?;
    play(&mut session)
}

fn main() {
    if let Err(err) = run() {
        // At this layer (binary glue), printing once is fine.
        eprintln!("{err}");
        std::process::exit(2);
    }
}
