//! langquiz - a terminal quiz about a programming language
//!
//! Questions come from a built-in bank or, when a local Ollama-style model
//! answers the startup probe, are generated on the fly and validated before
//! they are asked. Every session is scored and folded into statistics kept
//! on disk between runs.
//!
//! # Quick Start
//!
//! ```ignore
//! use langquiz::config::Config;
//! use langquiz::quiz::{game::Game, ModeSelector, QuestionBank};
//! use langquiz::source::build_source;
//! use langquiz::stats::StatsStore;
//! use langquiz::ui::TerminalPresenter;
//!
//! let config = Config::load(None)?;
//! let source = build_source(&config.generation, QuestionBank::seed()).await;
//! let mut game = Game::new(source, ModeSelector::default(), StatsStore::new(&config.stats_file));
//! game.run(&mut TerminalPresenter::stdio("Rust")).await;
//! ```

pub mod api;
pub mod cli;
pub mod config;
pub mod errors;
pub mod observability;
pub mod quiz;
pub mod source;
pub mod stats;
pub mod testing;
pub mod ui;
