//! Game modes and the mapping from a mode to a concrete question list.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use std::fmt;
use std::str::FromStr;
use tracing::{debug, warn};

use super::{Difficulty, Question};
use crate::source::QuestionSource;
use crate::ui::presenter::{Notice, Presenter};

/// Size of the quick round and of the default generated batch.
pub const QUICK_ROUND: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mode {
    All,
    Quick,
    HardOnly,
    AiCustom,
    AiAdvanced,
    AiExtreme,
}

impl Mode {
    pub const ALL: [Mode; 6] = [
        Mode::AiCustom,
        Mode::AiAdvanced,
        Mode::AiExtreme,
        Mode::All,
        Mode::Quick,
        Mode::HardOnly,
    ];

    /// Stable key used on the command line and in logs.
    pub fn key(&self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Quick => "quick",
            Self::HardOnly => "hard",
            Self::AiCustom => "ai-custom",
            Self::AiAdvanced => "ai-advanced",
            Self::AiExtreme => "ai-extreme",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::All => "All questions",
            Self::Quick => "Quick quiz (5 random questions)",
            Self::HardOnly => "Hard questions only",
            Self::AiCustom => "AI: custom quiz (5 generated questions)",
            Self::AiAdvanced => "AI: advanced questions (3 hard questions)",
            Self::AiExtreme => "AI: extreme challenge (10 mixed questions)",
        }
    }

    /// Modes that only make sense with a generator behind them.
    pub fn is_ai(&self) -> bool {
        matches!(self, Self::AiCustom | Self::AiAdvanced | Self::AiExtreme)
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.key())
    }
}

impl FromStr for Mode {
    type Err = String;

    /// Accepts a key or a menu label, ignoring case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim();
        Self::ALL
            .into_iter()
            .find(|m| {
                m.key().eq_ignore_ascii_case(needle) || m.label().eq_ignore_ascii_case(needle)
            })
            .ok_or_else(|| format!("unknown mode '{}'", needle))
    }
}

/// One entry of the main menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    Play(Mode),
    Statistics,
    Exit,
}

impl MenuChoice {
    /// Entries in display order. AI modes come first and only when a
    /// generator is available.
    pub fn menu(ai_enabled: bool) -> Vec<MenuChoice> {
        Mode::ALL
            .into_iter()
            .filter(|m| ai_enabled || !m.is_ai())
            .map(MenuChoice::Play)
            .chain([MenuChoice::Statistics, MenuChoice::Exit])
            .collect()
    }

    pub fn key(&self) -> &'static str {
        match self {
            Self::Play(mode) => mode.key(),
            Self::Statistics => "stats",
            Self::Exit => "exit",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Play(mode) => mode.label(),
            Self::Statistics => "View statistics",
            Self::Exit => "Exit",
        }
    }
}

impl FromStr for MenuChoice {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim();
        [MenuChoice::Statistics, MenuChoice::Exit]
            .into_iter()
            .find(|c| {
                c.key().eq_ignore_ascii_case(needle) || c.label().eq_ignore_ascii_case(needle)
            })
            .map(Ok)
            .unwrap_or_else(|| needle.parse::<Mode>().map(MenuChoice::Play))
    }
}

/// Turns a mode into the ordered list of questions for one session.
pub struct ModeSelector {
    rng: StdRng,
}

impl Default for ModeSelector {
    fn default() -> Self {
        Self::new(StdRng::from_os_rng())
    }
}

impl ModeSelector {
    pub fn new(rng: StdRng) -> Self {
        Self { rng }
    }

    /// Questions for `mode`. An empty list is a valid answer; the caller must
    /// not start a session with it.
    pub async fn select(
        &mut self,
        mode: Mode,
        source: &mut dyn QuestionSource,
        presenter: &mut dyn Presenter,
    ) -> Vec<Question> {
        let generative = source.is_generative();
        debug!(mode = %mode, generative, "selecting questions");

        match mode {
            Mode::AiCustom if generative => source.generate_batch(5, None, presenter).await,
            Mode::AiAdvanced if generative => {
                source
                    .generate_batch(3, Some(Difficulty::Hard), presenter)
                    .await
            }
            Mode::AiExtreme if generative => source.generate_batch(10, None, presenter).await,
            Mode::AiCustom | Mode::AiAdvanced | Mode::AiExtreme => {
                warn!(mode = %mode, "generation unavailable, playing the full bank");
                presenter.notify(Notice::Warning(
                    "AI modes need the generation service; playing the question bank instead"
                        .to_string(),
                ));
                source.bank().questions().to_vec()
            }
            Mode::All if generative => {
                let size = source.bank().len();
                source.generate_batch(size, None, presenter).await
            }
            Mode::All => source.bank().questions().to_vec(),
            Mode::Quick if generative => source.generate_batch(QUICK_ROUND, None, presenter).await,
            Mode::Quick => {
                let mut shuffled = source.bank().questions().to_vec();
                shuffled.shuffle(&mut self.rng);
                shuffled.truncate(QUICK_ROUND);
                shuffled
            }
            Mode::HardOnly if generative => {
                source
                    .generate_batch(QUICK_ROUND, Some(Difficulty::Hard), presenter)
                    .await
            }
            Mode::HardOnly => {
                let size = source.bank().len();
                source
                    .generate_batch(size, Some(Difficulty::Hard), presenter)
                    .await
            }
        }
    }

    /// Like [`select`](Self::select) for a free-form mode name. Unrecognized
    /// names play the full bank.
    pub async fn select_named(
        &mut self,
        name: &str,
        source: &mut dyn QuestionSource,
        presenter: &mut dyn Presenter,
    ) -> Vec<Question> {
        match name.parse::<Mode>() {
            Ok(mode) => self.select(mode, source, presenter).await,
            Err(e) => {
                debug!("{}, using the full bank", e);
                source.bank().questions().to_vec()
            }
        }
    }
}
