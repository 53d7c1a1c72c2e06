//! Command-line front end.

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::info;

use crate::config::Config;
use crate::errors::QuizError;
use crate::observability::telemetry::{init_tracing, init_tracing_verbose};
use crate::quiz::game::Game;
use crate::quiz::{ModeSelector, QuestionBank};
use crate::source::build_source;
use crate::stats::{Statistics, StatsStore};
use crate::ui::style::{disable_color, set_ascii_mode, QuizStyle};
use crate::ui::TerminalPresenter;

#[derive(Parser, Debug)]
#[command(name = "langquiz")]
#[command(about = "Terminal programming-language quiz with optional AI-generated questions")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Config file path
    #[arg(short, long, value_name = "FILE", global = true)]
    pub config: Option<PathBuf>,

    /// Where statistics are kept
    #[arg(long, value_name = "FILE", global = true)]
    pub stats_file: Option<PathBuf>,

    /// Generation endpoint URL
    #[arg(long, value_name = "URL", global = true)]
    pub endpoint: Option<String>,

    /// Model used for generated questions
    #[arg(long, value_name = "NAME", global = true)]
    pub model: Option<String>,

    /// Skip the generation service and play from the built-in bank
    #[arg(long, global = true)]
    pub no_ai: bool,

    /// Log progress and diagnostics to stderr
    #[arg(short = 'v', long, global = true)]
    pub verbose: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Plain ASCII markers instead of emoji
    #[arg(long, global = true)]
    pub ascii: bool,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Play the quiz (default)
    Play,

    /// Print saved statistics and exit
    Stats {
        #[arg(long, value_enum, default_value = "text")]
        format: OutputFormat,
    },
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text (default)
    #[default]
    Text,
    /// JSON, same shape as the statistics file
    Json,
}

impl Cli {
    /// Fold command-line overrides into the loaded configuration.
    pub fn apply(&self, config: &mut Config) {
        if let Some(ref path) = self.stats_file {
            config.stats_file = path.clone();
        }
        if let Some(ref endpoint) = self.endpoint {
            config.generation.endpoint = endpoint.clone();
        }
        if let Some(ref model) = self.model {
            config.generation.model = model.clone();
        }
        if self.no_ai {
            config.generation.enabled = false;
        }
    }
}

pub async fn run() -> Result<()> {
    let cli = Cli::parse();

    if cli.verbose {
        init_tracing_verbose();
    } else {
        init_tracing();
    }

    if cli.no_color || std::env::var("NO_COLOR").is_ok() {
        disable_color();
    }
    if cli.ascii {
        set_ascii_mode(true);
    }

    let mut config = Config::load(cli.config.as_deref())
        .map_err(|e| QuizError::Config(format!("{:#}", e)))?;
    cli.apply(&mut config);

    match cli.command.clone().unwrap_or(Commands::Play) {
        Commands::Play => play(config).await,
        Commands::Stats { format } => print_stats(&config, format),
    }
}

async fn play(config: Config) -> Result<()> {
    info!(stats_file = %config.stats_file.display(), "starting quiz");
    let mut presenter = TerminalPresenter::stdio(config.generation.language.clone());

    let source = build_source(&config.generation, QuestionBank::seed()).await;
    let mut game = Game::new(
        source,
        ModeSelector::default(),
        StatsStore::new(&config.stats_file),
    );
    game.run(&mut presenter).await;
    Ok(())
}

fn print_stats(config: &Config, format: OutputFormat) -> Result<()> {
    let store = StatsStore::new(&config.stats_file);
    let stats = store
        .try_load()
        .map_err(QuizError::from)?
        .unwrap_or_default();

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&stats)?),
        OutputFormat::Text => print!("{}", render_stats_text(&stats)),
    }
    Ok(())
}

/// Plain report used by `stats --format text`.
pub fn render_stats_text(stats: &Statistics) -> String {
    if !stats.has_history() {
        return format!("{}\n", "No statistics yet.".muted());
    }

    let mut out = format!("{}\n", "Quiz statistics".title());
    out.push_str(&format!("  Quizzes played:  {}\n", stats.total_quizzes));
    out.push_str(&format!(
        "  Correct answers: {} of {}\n",
        stats.total_correct, stats.total_questions
    ));
    out.push_str(&format!("  Best score:      {}\n", stats.best_score));
    out.push_str(&format!("  Average:         {:.1}%\n", stats.average_percentage));
    if !stats.last_quiz_timestamp.is_empty() {
        out.push_str(&format!("  Last quiz:       {}\n", stats.last_quiz_timestamp));
    }
    out
}
