//! Line-oriented terminal presenter.
//!
//! Reads answers from any `BufRead` and writes to any `Write`, so the same
//! code drives stdin/stdout in the binary and in-memory buffers in tests.

use colored::Colorize;
use std::io::{self, BufRead, Write};

use super::banners::{
    divider_with_text, farewell_banner, step_indicator, welcome_banner, wrap_text,
};
use super::presenter::{Notice, Presenter};
use super::style::{Glyphs, QuizStyle};
use crate::errors::InputError;
use crate::quiz::{Difficulty, MenuChoice, PerformanceTier, Question, SessionResult};
use crate::stats::Statistics;

/// Invalid entries tolerated before a prompt gives up.
pub const MAX_ATTEMPTS: usize = 3;

const RULE_WIDTH: usize = 60;

pub struct TerminalPresenter<R, W> {
    input: R,
    output: W,
    language: String,
}

impl TerminalPresenter<io::BufReader<io::Stdin>, io::Stdout> {
    /// Presenter bound to the process's stdin and stdout.
    pub fn stdio(language: impl Into<String>) -> Self {
        Self::new(io::BufReader::new(io::stdin()), io::stdout(), language)
    }
}

impl<R: BufRead, W: Write> TerminalPresenter<R, W> {
    pub fn new(input: R, output: W, language: impl Into<String>) -> Self {
        Self {
            input,
            output,
            language: language.into(),
        }
    }

    /// Consume the presenter and return the output sink.
    pub fn into_output(self) -> W {
        self.output
    }

    fn say(&mut self, text: impl std::fmt::Display) {
        // Nothing useful can be done if the terminal itself is gone.
        let _ = writeln!(self.output, "{}", text);
    }

    fn read_line(&mut self, prompt: &str) -> Result<String, InputError> {
        write!(self.output, "{}", prompt)?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(InputError::Closed);
        }
        Ok(line.trim().to_string())
    }

    fn difficulty_badge(difficulty: Difficulty) -> String {
        match difficulty {
            Difficulty::Easy => "● easy".correct().to_string(),
            Difficulty::Medium => "● medium".caution().to_string(),
            Difficulty::Hard => "● hard".wrong().to_string(),
        }
    }

    fn closing_message(&mut self, tier: PerformanceTier) {
        let language = self.language.clone();
        let lines = match tier {
            PerformanceTier::Perfect => vec![
                "PERFECT! You got every question right!".correct(),
                format!("You really know your {}.", language).as_str().correct(),
            ],
            PerformanceTier::Excellent => vec![
                "Excellent! Your knowledge is solid.".correct(),
                "Next step: try the hard questions.".title(),
            ],
            PerformanceTier::Good => vec![
                "Well done, you are on the right track!".caution(),
                "Tip: review the concepts you missed.".title(),
            ],
            PerformanceTier::Fair => vec![
                "A good start. Keep studying and you will get there!".caution(),
                "Focus on the fundamentals first.".title(),
            ],
            PerformanceTier::NeedsStudy => vec![
                format!("You need to study more {}.", language).as_str().wrong(),
                "The official documentation is a great place to start.".wrong(),
            ],
        };
        for line in lines {
            self.say(line);
        }
    }
}

impl<R: BufRead + Send, W: Write + Send> Presenter for TerminalPresenter<R, W> {
    fn ask(
        &mut self,
        question: &Question,
        position: usize,
        total: usize,
    ) -> Result<String, InputError> {
        let header = format!(
            "Question {} of {} | {} | {}",
            position,
            total,
            question.category,
            Self::difficulty_badge(question.difficulty)
        );
        self.say("");
        self.say(divider_with_text(&header, RULE_WIDTH).as_str().title());
        self.say(question.prompt.as_str().emphasis());
        for (i, option) in question.options.iter().enumerate() {
            self.say(format!("  {}) {}", i + 1, option));
        }

        let count = question.options.len();
        let mut last = String::new();
        for _ in 0..MAX_ATTEMPTS {
            let entry = self.read_line(&format!("Your answer [1-{}]: ", count))?;
            if let Ok(n) = entry.parse::<usize>() {
                if (1..=count).contains(&n) {
                    return Ok(question.options[n - 1].clone());
                }
            }
            if let Some(option) = question.options.iter().find(|o| o.trim() == entry) {
                return Ok(option.clone());
            }
            let hint = format!("Please pick a number between 1 and {}.", count);
            self.say(hint.as_str().caution());
            last = entry;
        }
        Err(InputError::Invalid(last))
    }

    fn confirm(&mut self, prompt: &str, default: bool) -> Result<bool, InputError> {
        let hint = if default { "[Y/n]" } else { "[y/N]" };
        let entry = self.read_line(&format!("{} {} ", prompt, hint))?;
        Ok(match entry.to_lowercase().as_str() {
            "y" | "yes" => true,
            "n" | "no" => false,
            _ => default,
        })
    }

    fn notify(&mut self, notice: Notice) {
        match notice {
            Notice::Info(text) => self.say(format!("{} {}", Glyphs::books(), text)),
            Notice::Warning(text) => {
                self.say(format!("{} {}", Glyphs::warning(), text).as_str().caution())
            }
            Notice::Error(text) => {
                self.say(format!("{} {}", Glyphs::cross(), text).as_str().wrong())
            }
            Notice::GenerationStarted { count } => self.say(
                format!("{} Generating {} questions...", Glyphs::robot(), count)
                    .as_str()
                    .title(),
            ),
            Notice::GenerationProgress {
                index,
                total,
                category,
                difficulty,
            } => self.say(
                format!(
                    "   generating question {}/{} - {} ({})",
                    index, total, category, difficulty
                )
                .as_str()
                .muted(),
            ),
            Notice::GenerationFailed {
                index,
                cause,
                substituted,
            } => {
                let tail = if substituted {
                    "using a bank question"
                } else {
                    "no bank question left, skipping"
                };
                self.say(
                    format!("   question {} failed: {} - {}", index, cause, tail)
                        .as_str()
                        .caution(),
                );
            }
            Notice::GenerationFinished {
                produced,
                requested,
            } => self.say(
                format!("{} {} of {} questions ready", Glyphs::check(), produced, requested)
                    .as_str()
                    .correct(),
            ),
            Notice::Answer {
                correct,
                expected,
                explanation,
            } => {
                if correct {
                    self.say(format!("{} Correct!", Glyphs::check()).as_str().correct());
                } else {
                    self.say(
                        format!("{} Wrong! The correct answer is: {}", Glyphs::cross(), expected)
                            .as_str()
                            .wrong(),
                    );
                }
                let mut lines = wrap_text(&explanation, RULE_WIDTH).into_iter();
                if let Some(first) = lines.next() {
                    self.say(format!("{} {}", Glyphs::bulb(), first));
                    for line in lines {
                        self.say(format!("   {}", line));
                    }
                }
            }
            Notice::Skipped { position, cause } => self.say(
                format!("{} Question {} skipped: {}", Glyphs::warning(), position, cause)
                    .as_str()
                    .caution(),
            ),
            Notice::Progress {
                answered,
                total,
                score,
            } => self.say(
                format!(
                    "{} {} {}/{} answered | {} correct",
                    Glyphs::chart(),
                    step_indicator(answered, total),
                    answered,
                    total,
                    score
                )
                .as_str()
                .muted(),
            ),
            Notice::Interrupted => self.say("Quiz stopped by the player.".caution()),
        }
    }

    fn show_result(&mut self, result: &SessionResult) {
        self.say("");
        let title = format!("{} FINAL RESULTS", Glyphs::trophy());
        self.say(divider_with_text(&title, RULE_WIDTH));
        self.say(format!(
            "You got {} of {} questions right",
            result.score.to_string().as_str().correct().bold(),
            result.attempted.to_string().as_str().emphasis()
        ));
        self.say(format!("Score: {:.1}%", result.percentage()));
        self.say(format!(
            "Total time: {:.1} seconds (average {:.1} per question)",
            result.elapsed.as_secs_f64(),
            result.average_secs()
        ));
        if result.skipped > 0 {
            self.say(format!("Skipped: {}", result.skipped).as_str().caution());
        }

        self.say("Your answers:".title());
        for (i, correct) in result.outcomes.iter().enumerate() {
            let mark = if *correct {
                Glyphs::check()
            } else {
                Glyphs::cross()
            };
            self.say(format!("   Question {}: {}", i + 1, mark));
        }
        self.say("");
        self.closing_message(result.tier());
    }

    fn show_statistics(&mut self, stats: &Statistics, generator: Option<&str>) {
        if !stats.has_history() {
            self.say(format!("{} No statistics yet.", Glyphs::chart()).as_str().caution());
            return;
        }

        let title = format!("{} YOUR STATISTICS", Glyphs::chart());
        self.say(divider_with_text(&title, RULE_WIDTH));
        self.say(format!("Quizzes played:  {}", stats.total_quizzes));
        self.say(format!(
            "Correct answers: {} of {}",
            stats.total_correct, stats.total_questions
        ));
        self.say(format!("Best score:      {}", stats.best_score));
        self.say(format!("Average:         {:.1}%", stats.average_percentage));
        if !stats.last_quiz_timestamp.is_empty() {
            self.say(format!("Last quiz:       {}", stats.last_quiz_timestamp));
        }
        if let Some(model) = generator {
            let line = format!("{} AI mode: active (model {})", Glyphs::robot(), model);
            self.say(line.as_str().muted());
        }
        self.say("");
    }

    fn choose(&mut self, choices: &[MenuChoice]) -> Result<MenuChoice, InputError> {
        self.say("Choose a game mode:".title());
        for (i, choice) in choices.iter().enumerate() {
            self.say(format!("  {}) {}", i + 1, choice.label()));
        }

        let mut last = String::new();
        for _ in 0..MAX_ATTEMPTS {
            let entry = self.read_line(&format!("Mode [1-{}]: ", choices.len()))?;
            if let Ok(n) = entry.parse::<usize>() {
                if (1..=choices.len()).contains(&n) {
                    return Ok(choices[n - 1]);
                }
            }
            if let Ok(choice) = entry.parse::<MenuChoice>() {
                if choices.contains(&choice) {
                    return Ok(choice);
                }
            }
            self.say("Unknown choice, try again.".caution());
            last = entry;
        }
        Err(InputError::Invalid(last))
    }

    fn welcome(&mut self, generator: Option<&str>) {
        let banner = welcome_banner(&self.language, generator);
        self.say("");
        for line in banner.lines() {
            self.say(line.as_str().title());
        }
    }

    fn farewell(&mut self) {
        let banner = farewell_banner(&self.language);
        self.say("");
        for line in banner.lines() {
            self.say(line.as_str().title());
        }
    }
}
