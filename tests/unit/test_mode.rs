//! Unit tests for mode selection
//!
//! Tests cover:
//! - Static selection per mode
//! - Generated selection sizes against the mock server
//! - Menu contents

use langquiz::config::GenerationConfig;
use langquiz::quiz::{Difficulty, MenuChoice, Mode, ModeSelector, QuestionBank};
use langquiz::source::{select_source, StaticSource};
use langquiz::testing::mock_api::MockGenerationServer;
use langquiz::testing::scripted::ScriptedPresenter;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::collections::HashSet;

fn selector(seed: u64) -> ModeSelector {
    ModeSelector::new(StdRng::seed_from_u64(seed))
}

// ============================================================================
// Static Selection Tests
// ============================================================================

mod static_tests {
    use super::*;

    #[tokio::test]
    async fn test_quick_is_five_distinct_for_many_seeds() {
        let mut source = StaticSource::new(QuestionBank::seed());
        let mut presenter = ScriptedPresenter::new();

        for seed in 0..20 {
            let picked = selector(seed)
                .select(Mode::Quick, &mut source, &mut presenter)
                .await;
            let ids: HashSet<u32> = picked.iter().map(|q| q.id).collect();
            assert_eq!(picked.len(), 5);
            assert_eq!(ids.len(), 5);
        }
    }

    #[tokio::test]
    async fn test_quick_on_small_bank_returns_all() {
        let bank = QuestionBank::new(QuestionBank::seed().questions()[..3].to_vec());
        let mut source = StaticSource::new(bank);
        let mut presenter = ScriptedPresenter::new();

        let picked = selector(1)
            .select(Mode::Quick, &mut source, &mut presenter)
            .await;
        assert_eq!(picked.len(), 3);
    }

    #[tokio::test]
    async fn test_all_is_bank_in_order() {
        let bank = QuestionBank::seed();
        let mut source = StaticSource::new(bank.clone());
        let mut presenter = ScriptedPresenter::new();

        let picked = selector(1)
            .select(Mode::All, &mut source, &mut presenter)
            .await;
        assert_eq!(picked, bank.questions().to_vec());
    }

    #[tokio::test]
    async fn test_hard_only_matches_bank_filter() {
        let bank = QuestionBank::seed();
        let expected: Vec<u32> = bank
            .filter(|q| q.difficulty == Difficulty::Hard)
            .map(|q| q.id)
            .collect();
        let mut source = StaticSource::new(bank);
        let mut presenter = ScriptedPresenter::new();

        let picked = selector(1)
            .select(Mode::HardOnly, &mut source, &mut presenter)
            .await;
        assert_eq!(picked.iter().map(|q| q.id).collect::<Vec<_>>(), expected);
    }
}

// ============================================================================
// Generated Selection Tests
// ============================================================================

mod generated_tests {
    use super::*;

    fn quiet_config(endpoint: String) -> GenerationConfig {
        GenerationConfig {
            endpoint,
            request_pause_ms: 0,
            probe_timeout_secs: 2,
            request_timeout_secs: 2,
            ..Default::default()
        }
    }

    async fn generated_count(mode: Mode) -> (usize, usize) {
        // Every request (including the probe) succeeds at the HTTP level but
        // carries no question, so each slot falls back to the bank.
        let server = MockGenerationServer::builder()
            .with_default_response_text("sorry, no JSON today")
            .build()
            .await;
        let config = quiet_config(server.endpoint());
        let client = langquiz::api::OllamaClient::from_config(&config).unwrap();
        let mut source = select_source(Box::new(client), QuestionBank::seed(), &config).await;
        assert!(source.is_generative());

        let mut presenter = ScriptedPresenter::new();
        let picked = selector(3)
            .select(mode, source.as_mut(), &mut presenter)
            .await;
        let requests = server.request_count();
        server.stop().await;
        (picked.len(), requests)
    }

    #[tokio::test]
    async fn test_ai_mode_sizes() {
        // One probe request plus one per slot.
        assert_eq!(generated_count(Mode::AiCustom).await, (5, 6));
        assert_eq!(generated_count(Mode::AiAdvanced).await, (3, 4));
        assert_eq!(generated_count(Mode::AiExtreme).await, (10, 11));
    }

    #[tokio::test]
    async fn test_all_regenerates_bank_sized_batch() {
        assert_eq!(generated_count(Mode::All).await, (10, 11));
        assert_eq!(generated_count(Mode::Quick).await, (5, 6));
        assert_eq!(generated_count(Mode::HardOnly).await, (5, 6));
    }
}

// ============================================================================
// Menu Tests
// ============================================================================

mod menu_tests {
    use super::*;

    #[test]
    fn test_menu_order_with_ai() {
        let keys: Vec<&str> = MenuChoice::menu(true).iter().map(|c| c.key()).collect();
        assert_eq!(
            keys,
            vec![
                "ai-custom",
                "ai-advanced",
                "ai-extreme",
                "all",
                "quick",
                "hard",
                "stats",
                "exit"
            ]
        );
    }

    #[test]
    fn test_labels_round_trip_through_parse() {
        for choice in MenuChoice::menu(true) {
            assert_eq!(choice.label().parse::<MenuChoice>(), Ok(choice));
            assert_eq!(choice.key().to_uppercase().parse::<MenuChoice>(), Ok(choice));
        }
    }
}
