use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use tracing_subscriber::EnvFilter;
use trivia_quiz::{
    DEFAULT_CATEGORY_ID, DEFAULT_QUESTION_COUNT, DEFAULT_TIME_LIMIT_SECONDS, Difficulty,
    FallbackProvider, FileProvider, OpenTdbProvider, QuestionProvider, Quiz, QuizConfig,
    QuizError, category_for_subject,
};

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Number of questions to ask
    #[arg(short = 'n', long, default_value_t = DEFAULT_QUESTION_COUNT)]
    count: u32,

    /// Seconds allowed per question
    #[arg(short, long, default_value_t = DEFAULT_TIME_LIMIT_SECONDS)]
    time_limit: u32,

    /// easy, medium or hard
    #[arg(short, long, default_value = "medium")]
    difficulty: Difficulty,

    /// Open Trivia DB category id (0 for any)
    #[arg(short, long, default_value_t = DEFAULT_CATEGORY_ID, conflicts_with = "subject")]
    category: u32,

    /// School subject to pick the category from, e.g. maths or history
    #[arg(short, long)]
    subject: Option<String>,

    /// JSON file to load the questions from instead of the trivia API
    #[arg(short, long, conflicts_with = "offline")]
    questions: Option<PathBuf>,

    /// Use the built-in question set without touching the network
    #[arg(long)]
    offline: bool,

    /// Trivia API endpoint
    #[arg(long, default_value = trivia_quiz::provider::DEFAULT_ENDPOINT)]
    endpoint: String,

    /// Give up on the trivia API after this many seconds
    #[arg(long, default_value_t = 10)]
    timeout_secs: u64,

    /// Write logs to this file (filter with TRIVIA_QUIZ_LOG)
    #[arg(long)]
    log_file: Option<PathBuf>,
}

/// Logs go to `log_file` when given. Otherwise only errors reach stderr,
/// which the terminal UI would otherwise draw over.
fn init_tracing(log_file: Option<&Path>) -> Result<(), QuizError> {
    let default_level = if log_file.is_some() { "info" } else { "error" };
    let filter = EnvFilter::try_from_env("TRIVIA_QUIZ_LOG")
        .unwrap_or_else(|_| EnvFilter::new(default_level));

    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    match log_file {
        Some(path) => {
            let file = File::create(path)?;
            let _ = builder
                .with_ansi(false)
                .with_writer(Arc::new(file))
                .try_init();
        }
        None => {
            let _ = builder.with_writer(std::io::stderr).try_init();
        }
    }
    Ok(())
}

fn build_config(args: &Args) -> Result<QuizConfig, QuizError> {
    let category = match &args.subject {
        Some(subject) => category_for_subject(subject)?,
        None => args.category,
    };
    Ok(QuizConfig::new(
        args.count,
        args.time_limit,
        args.difficulty,
        category,
    )?)
}

fn build_provider(args: &Args) -> Result<Box<dyn QuestionProvider>, QuizError> {
    if args.offline {
        return Ok(Box::new(FallbackProvider));
    }
    if let Some(path) = &args.questions {
        return Ok(Box::new(FileProvider::new(path)));
    }

    let provider =
        OpenTdbProvider::with_endpoint(&args.endpoint, Duration::from_secs(args.timeout_secs))?;
    Ok(Box::new(provider))
}

async fn run(args: Args) -> Result<(), QuizError> {
    init_tracing(args.log_file.as_deref())?;
    let config = build_config(&args)?;
    let provider = build_provider(&args)?;
    Quiz::new(config, provider).run().await
}

#[tokio::main]
async fn main() {
    let args = Args::parse();

    if let Err(e) = run(args).await {
        eprintln!("Error running quiz: {}", e);
        std::process::exit(1);
    }
}
