//! The presentation seam.
//!
//! Core components never print. They hand questions, notices and results to
//! a [`Presenter`] and get answers and yes/no decisions back.

use crate::errors::InputError;
use crate::quiz::{Difficulty, MenuChoice, Question, SessionResult};
use crate::stats::Statistics;

/// Status messages emitted by the core while a round is prepared or played.
#[derive(Debug, Clone, PartialEq)]
pub enum Notice {
    Info(String),
    Warning(String),
    Error(String),
    /// Batch generation is about to start
    GenerationStarted { count: usize },
    /// Item `index` (1-based) of `total` is being requested
    GenerationProgress {
        index: usize,
        total: usize,
        category: String,
        difficulty: Difficulty,
    },
    /// Item `index` (1-based) failed; a bank question may stand in
    GenerationFailed {
        index: usize,
        cause: String,
        substituted: bool,
    },
    GenerationFinished { produced: usize, requested: usize },
    /// Feedback after a scored question
    Answer {
        correct: bool,
        expected: String,
        explanation: String,
    },
    /// The presenter failed to collect an answer; the question counts as wrong
    Skipped { position: usize, cause: String },
    /// Shown before each continue prompt
    Progress {
        answered: usize,
        total: usize,
        score: u32,
    },
    Interrupted,
}

pub trait Presenter: Send {
    /// Show `question` (1-based `position` of `total`) and return the selected option text.
    fn ask(
        &mut self,
        question: &Question,
        position: usize,
        total: usize,
    ) -> Result<String, InputError>;

    fn confirm(&mut self, prompt: &str, default: bool) -> Result<bool, InputError>;

    fn notify(&mut self, notice: Notice);

    fn show_result(&mut self, result: &SessionResult);

    fn show_statistics(&mut self, stats: &Statistics, generator: Option<&str>);

    fn choose(&mut self, choices: &[MenuChoice]) -> Result<MenuChoice, InputError>;

    fn welcome(&mut self, _generator: Option<&str>) {}

    fn farewell(&mut self) {}
}
