//! Session loop
//!
//! Drives one run over a fixed sequence of questions:
//!
//! `NotStarted -> (Presenting -> Scoring)* -> Finished | Aborted`
//!
//! An input failure skips the question (scored as wrong) instead of ending
//! the run. Declining the continue prompt aborts, and the result then covers
//! only the questions answered so far.

use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

use super::Question;
use crate::ui::presenter::{Notice, Presenter};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    NotStarted,
    /// Question at this index is on screen
    Presenting(usize),
    /// Answer for this index is being scored
    Scoring(usize),
    Finished,
    Aborted,
}

impl SessionState {
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Finished | Self::Aborted)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Completion {
    Finished,
    Aborted,
}

/// Closing-message bucket for a result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PerformanceTier {
    Perfect,
    Excellent,
    Good,
    Fair,
    NeedsStudy,
}

/// Outcome of one session. Produced once, never mutated.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionResult {
    /// Correctness per attempted question, in order
    pub outcomes: Vec<bool>,
    pub score: u32,
    pub attempted: u32,
    /// Attempted questions whose answer could not be collected
    pub skipped: u32,
    pub elapsed: Duration,
    pub completion: Completion,
}

impl SessionResult {
    pub fn percentage(&self) -> f64 {
        if self.attempted == 0 {
            return 0.0;
        }
        f64::from(self.score) / f64::from(self.attempted) * 100.0
    }

    pub fn average_secs(&self) -> f64 {
        if self.attempted == 0 {
            return 0.0;
        }
        self.elapsed.as_secs_f64() / f64::from(self.attempted)
    }

    pub fn tier(&self) -> PerformanceTier {
        let pct = self.percentage();
        if self.attempted > 0 && self.score == self.attempted {
            PerformanceTier::Perfect
        } else if pct >= 80.0 {
            PerformanceTier::Excellent
        } else if pct >= 60.0 {
            PerformanceTier::Good
        } else if pct >= 40.0 {
            PerformanceTier::Fair
        } else {
            PerformanceTier::NeedsStudy
        }
    }
}

/// Runs a single session over a borrowed question sequence.
pub struct SessionRunner<'q> {
    questions: &'q [Question],
    state: SessionState,
    outcomes: Vec<bool>,
    score: u32,
    skipped: u32,
}

impl<'q> SessionRunner<'q> {
    pub fn new(questions: &'q [Question]) -> Self {
        Self {
            questions,
            state: SessionState::NotStarted,
            outcomes: Vec::with_capacity(questions.len()),
            score: 0,
            skipped: 0,
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    fn transition(&mut self, next: SessionState) {
        debug!(from = ?self.state, to = ?next, "session transition");
        self.state = next;
    }

    /// Play every question through `presenter` and return the result.
    ///
    /// The result is also handed to `presenter.show_result`; folding it into
    /// statistics is the caller's job.
    pub fn run(mut self, presenter: &mut dyn Presenter) -> SessionResult {
        let started = Instant::now();
        let questions = self.questions;
        let total = questions.len();
        info!(questions = total, "session started");

        for (index, question) in questions.iter().enumerate() {
            self.transition(SessionState::Presenting(index));
            let selection = presenter.ask(question, index + 1, total);

            self.transition(SessionState::Scoring(index));
            match selection {
                Ok(selected) => {
                    let correct = question.is_correct(&selected);
                    if correct {
                        self.score += 1;
                    }
                    self.outcomes.push(correct);
                    presenter.notify(Notice::Answer {
                        correct,
                        expected: question.answer.clone(),
                        explanation: question.explanation.clone(),
                    });
                }
                Err(e) => {
                    warn!(question = question.id, error = %e, "answer not collected, skipping");
                    self.skipped += 1;
                    self.outcomes.push(false);
                    presenter.notify(Notice::Skipped {
                        position: index + 1,
                        cause: e.to_string(),
                    });
                }
            }

            if index + 1 < total && !self.offer_continue(presenter, index + 1, total) {
                self.transition(SessionState::Aborted);
                presenter.notify(Notice::Interrupted);
                break;
            }
        }

        if !self.state.is_terminal() {
            self.transition(SessionState::Finished);
        }

        let result = SessionResult {
            attempted: self.outcomes.len() as u32,
            outcomes: self.outcomes,
            score: self.score,
            skipped: self.skipped,
            elapsed: started.elapsed(),
            completion: if self.state == SessionState::Aborted {
                Completion::Aborted
            } else {
                Completion::Finished
            },
        };

        info!(
            score = result.score,
            attempted = result.attempted,
            completion = ?result.completion,
            "session ended"
        );
        presenter.show_result(&result);
        result
    }

    fn offer_continue(
        &mut self,
        presenter: &mut dyn Presenter,
        answered: usize,
        total: usize,
    ) -> bool {
        presenter.notify(Notice::Progress {
            answered,
            total,
            score: self.score,
        });
        match presenter.confirm("Continue to the next question?", true) {
            Ok(answer) => answer,
            Err(e) => {
                warn!(error = %e, "continue prompt failed, stopping session");
                false
            }
        }
    }
}
