//! Quiz domain: questions, the seed bank, mode selection, and the session loop.

pub mod bank;
pub mod game;
pub mod mode;
pub mod session;

use serde::{Deserialize, Serialize};
use std::fmt;

pub use bank::QuestionBank;
pub use mode::{MenuChoice, Mode, ModeSelector};
pub use session::{Completion, PerformanceTier, SessionResult, SessionRunner, SessionState};

/// Difficulty tier of a question.
///
/// Serialized with the generation protocol's names (`facil`, `medio`,
/// `dificil`); English names are accepted on input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Difficulty {
    #[serde(rename = "facil", alias = "easy")]
    Easy,
    #[serde(rename = "medio", alias = "medium")]
    Medium,
    #[serde(rename = "dificil", alias = "hard")]
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

    /// Name used on the wire when talking to the generation service.
    pub fn wire_name(&self) -> &'static str {
        match self {
            Self::Easy => "facil",
            Self::Medium => "medio",
            Self::Hard => "dificil",
        }
    }

    /// Lenient parse of a model-supplied tier label.
    pub fn from_label(label: &str) -> Option<Self> {
        match label.trim().to_lowercase().as_str() {
            "facil" | "fácil" | "easy" => Some(Self::Easy),
            "medio" | "médio" | "medium" => Some(Self::Medium),
            "dificil" | "difícil" | "hard" => Some(Self::Hard),
            _ => None,
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Easy => write!(f, "easy"),
            Self::Medium => write!(f, "medium"),
            Self::Hard => write!(f, "hard"),
        }
    }
}

/// One multiple-choice item. Immutable once built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Question {
    pub id: u32,
    pub prompt: String,
    pub options: Vec<String>,
    pub answer: String,
    pub explanation: String,
    pub difficulty: Difficulty,
    pub category: String,
}

impl Question {
    /// Compares trimmed selection against the trimmed correct answer.
    pub fn is_correct(&self, selected: &str) -> bool {
        selected.trim() == self.answer.trim()
    }
}
