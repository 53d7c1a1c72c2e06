//! Questions synthesized by the external generation service.
//!
//! Every slot in a batch is requested individually. A failed slot is filled
//! with the next unused bank question, or dropped once the bank runs out, so
//! a batch can come back shorter than requested but never errors.

use async_trait::async_trait;
use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use rand::{Rng, SeedableRng};
use std::collections::HashSet;
use std::time::Duration;
use tracing::{debug, info, warn};

use super::parse::parse_generated;
use super::prompt::{build_prompt, DEFAULT_CATEGORIES};
use super::{QuestionSource, StaticSource};
use crate::api::GenerationClient;
use crate::config::GenerationConfig;
use crate::errors::GenerationError;
use crate::observability::telemetry::log_preview;
use crate::quiz::bank::STATIC_ID_LIMIT;
use crate::quiz::{Difficulty, Question, QuestionBank};
use crate::ui::presenter::{Notice, Presenter};

/// Width of the identifier range handed to generated questions.
const GENERATED_ID_SPAN: u32 = 10_000;

pub struct GenerativeSource {
    client: Box<dyn GenerationClient>,
    fallback: StaticSource,
    language: String,
    categories: Vec<String>,
    pause: Duration,
    rng: StdRng,
}

impl GenerativeSource {
    pub fn new(
        client: Box<dyn GenerationClient>,
        fallback: StaticSource,
        config: &GenerationConfig,
    ) -> Self {
        let categories = if config.categories.is_empty() {
            DEFAULT_CATEGORIES.iter().map(|c| c.to_string()).collect()
        } else {
            config.categories.clone()
        };

        Self {
            client,
            fallback,
            language: config.language.clone(),
            categories,
            pause: config.request_pause(),
            rng: StdRng::from_os_rng(),
        }
    }

    /// Replace the random source, e.g. with a seeded one in tests.
    pub fn with_rng(mut self, rng: StdRng) -> Self {
        self.rng = rng;
        self
    }

    pub fn with_pause(mut self, pause: Duration) -> Self {
        self.pause = pause;
        self
    }

    /// Short reachability check. Never fails; any error means unavailable.
    pub async fn probe_availability(&self) -> bool {
        match self.client.probe().await {
            Ok(()) => true,
            Err(e) => {
                info!(kind = e.kind(), "generation service unavailable: {}", e);
                false
            }
        }
    }

    /// Request, extract, and validate a single question.
    pub async fn generate_one(
        &mut self,
        difficulty: Difficulty,
        category: &str,
    ) -> Result<Question, GenerationError> {
        let prompt = build_prompt(&self.language, difficulty, category);
        let raw = self.client.generate(&prompt).await?;
        debug!(
            chars = raw.len(),
            preview = %log_preview(&raw, 120),
            "raw generation output received"
        );

        let candidate = parse_generated(&raw)?;
        let id = self.fresh_id();
        Ok(candidate.into_question(id, difficulty, category))
    }

    fn fresh_id(&mut self) -> u32 {
        self.rng
            .random_range(STATIC_ID_LIMIT..STATIC_ID_LIMIT + GENERATED_ID_SPAN)
    }

    fn pick_category(&mut self) -> String {
        self.categories
            .choose(&mut self.rng)
            .cloned()
            .unwrap_or_else(|| "general".to_string())
    }

    fn pick_difficulty(&mut self) -> Difficulty {
        Difficulty::ALL[self.rng.random_range(0..Difficulty::ALL.len())]
    }
}

#[async_trait]
impl QuestionSource for GenerativeSource {
    fn is_generative(&self) -> bool {
        true
    }

    fn bank(&self) -> &QuestionBank {
        self.fallback.bank()
    }

    fn generator(&self) -> Option<&str> {
        Some(self.client.model())
    }

    async fn generate_batch(
        &mut self,
        count: usize,
        difficulty: Option<Difficulty>,
        presenter: &mut dyn Presenter,
    ) -> Vec<Question> {
        info!(count, pinned = ?difficulty, "generating question batch");
        presenter.notify(Notice::GenerationStarted { count });

        let mut batch = Vec::with_capacity(count);
        let mut used_ids = HashSet::new();
        let mut next_fallback = 0usize;

        for index in 0..count {
            let category = self.pick_category();
            let tier = match difficulty {
                Some(pinned) => pinned,
                None => self.pick_difficulty(),
            };
            presenter.notify(Notice::GenerationProgress {
                index: index + 1,
                total: count,
                category: category.clone(),
                difficulty: tier,
            });

            match self.generate_one(tier, &category).await {
                Ok(mut question) => {
                    while !used_ids.insert(question.id) {
                        question.id = self.fresh_id();
                    }
                    batch.push(question);
                    if !self.pause.is_zero() {
                        tokio::time::sleep(self.pause).await;
                    }
                }
                Err(e) => {
                    let substitute = self.fallback.bank().get(next_fallback).cloned();
                    let substituted = substitute.is_some();
                    warn!(
                        slot = index + 1,
                        kind = e.kind(),
                        substituted,
                        "question generation failed: {}",
                        e
                    );
                    if let Some(question) = substitute {
                        next_fallback += 1;
                        used_ids.insert(question.id);
                        batch.push(question);
                    }
                    presenter.notify(Notice::GenerationFailed {
                        index: index + 1,
                        cause: e.to_string(),
                        substituted,
                    });
                }
            }
        }

        presenter.notify(Notice::GenerationFinished {
            produced: batch.len(),
            requested: count,
        });
        batch
    }
}
