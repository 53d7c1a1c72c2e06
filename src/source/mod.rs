//! Question sources
//!
//! A [`QuestionSource`] owns the seed bank and, when the generation service
//! answered the startup probe, a generator that fills batches on demand.
//! The choice is made once in [`build_source`]; a source never switches
//! between static and generative while the process runs.

use async_trait::async_trait;
use tracing::{info, warn};

pub mod generative;
pub mod parse;
pub mod prompt;

pub use generative::GenerativeSource;

use crate::api::{GenerationClient, OllamaClient};
use crate::config::GenerationConfig;
use crate::quiz::{Difficulty, Question, QuestionBank};
use crate::ui::presenter::Presenter;

#[async_trait]
pub trait QuestionSource: Send {
    /// Whether batches come from the generation service.
    fn is_generative(&self) -> bool;

    /// The static bank, always available.
    fn bank(&self) -> &QuestionBank;

    /// Model name when generating, for display.
    fn generator(&self) -> Option<&str>;

    /// Produce up to `count` questions, optionally pinned to one tier.
    async fn generate_batch(
        &mut self,
        count: usize,
        difficulty: Option<Difficulty>,
        presenter: &mut dyn Presenter,
    ) -> Vec<Question>;
}

/// Serves questions straight from the bank.
#[derive(Debug, Clone)]
pub struct StaticSource {
    bank: QuestionBank,
}

impl StaticSource {
    pub fn new(bank: QuestionBank) -> Self {
        Self { bank }
    }
}

#[async_trait]
impl QuestionSource for StaticSource {
    fn is_generative(&self) -> bool {
        false
    }

    fn bank(&self) -> &QuestionBank {
        &self.bank
    }

    fn generator(&self) -> Option<&str> {
        None
    }

    async fn generate_batch(
        &mut self,
        count: usize,
        difficulty: Option<Difficulty>,
        _presenter: &mut dyn Presenter,
    ) -> Vec<Question> {
        self.bank
            .filter(move |q| difficulty.map_or(true, |d| q.difficulty == d))
            .take(count)
            .cloned()
            .collect()
    }
}

/// Wrap `client` around the bank if it answers the probe, else fall back to
/// the bank alone.
pub async fn select_source(
    client: Box<dyn GenerationClient>,
    bank: QuestionBank,
    config: &GenerationConfig,
) -> Box<dyn QuestionSource> {
    let generative = GenerativeSource::new(client, StaticSource::new(bank.clone()), config);
    if generative.probe_availability().await {
        info!(endpoint = %config.endpoint, model = %config.model, "generation enabled");
        Box::new(generative)
    } else {
        warn!(
            endpoint = %config.endpoint,
            "generation service unreachable, using the static bank"
        );
        Box::new(StaticSource::new(bank))
    }
}

/// Pick the source for this process from configuration.
pub async fn build_source(
    config: &GenerationConfig,
    bank: QuestionBank,
) -> Box<dyn QuestionSource> {
    if !config.enabled {
        info!("generation disabled by configuration");
        return Box::new(StaticSource::new(bank));
    }

    match OllamaClient::from_config(config) {
        Ok(client) => select_source(Box::new(client), bank, config).await,
        Err(e) => {
            warn!("could not build generation client: {:#}", e);
            Box::new(StaticSource::new(bank))
        }
    }
}
