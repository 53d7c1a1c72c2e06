//! Unit tests for the generative source over HTTP
//!
//! Tests cover:
//! - Probe-driven source selection
//! - Valid, invalid, and failed generations against the mock server
//! - Fallback to bank questions

use langquiz::api::OllamaClient;
use langquiz::config::GenerationConfig;
use langquiz::quiz::bank::STATIC_ID_LIMIT;
use langquiz::quiz::{Difficulty, QuestionBank};
use langquiz::source::{build_source, select_source, GenerativeSource, QuestionSource, StaticSource};
use langquiz::testing::mock_api::MockGenerationServer;
use langquiz::testing::scripted::ScriptedPresenter;
use langquiz::ui::Notice;
use std::time::Duration;

const VALID: &str = r#"{"questao": "Which trait enables `{:?}`?", "opcoes": ["Display", "Debug", "Clone", "Copy"], "resposta": "Debug", "explicacao": "Debug backs the {:?} formatter.", "dificuldade": "medio", "categoria": "traits"}"#;

fn config(endpoint: String) -> GenerationConfig {
    GenerationConfig {
        endpoint,
        model: "mock-model".to_string(),
        probe_timeout_secs: 2,
        request_timeout_secs: 2,
        request_pause_ms: 0,
        ..Default::default()
    }
}

fn generative(server: &MockGenerationServer, bank: QuestionBank) -> GenerativeSource {
    let cfg = config(server.endpoint());
    let client = OllamaClient::new(
        server.endpoint(),
        "mock-model",
        Duration::from_secs(2),
        Duration::from_secs(2),
    )
    .unwrap();
    GenerativeSource::new(Box::new(client), StaticSource::new(bank), &cfg)
        .with_pause(Duration::ZERO)
}

// ============================================================================
// Selection Tests
// ============================================================================

mod selection_tests {
    use super::*;

    #[tokio::test]
    async fn test_reachable_service_selects_generative() {
        let server = MockGenerationServer::builder()
            .with_response("ok")
            .build()
            .await;
        let cfg = config(server.endpoint());
        let client = OllamaClient::from_config(&cfg).unwrap();

        let source = select_source(Box::new(client), QuestionBank::seed(), &cfg).await;
        assert!(source.is_generative());
        assert_eq!(source.generator(), Some("mock-model"));
        server.stop().await;
    }

    #[tokio::test]
    async fn test_probe_error_status_selects_static() {
        // The default response is a 500.
        let server = MockGenerationServer::builder().build().await;
        let cfg = config(server.endpoint());

        let source = build_source(&cfg, QuestionBank::seed()).await;
        assert!(!source.is_generative());
        assert_eq!(source.bank().len(), 10);
        server.stop().await;
    }

    #[tokio::test]
    async fn test_unreachable_endpoint_selects_static() {
        // Port 9 on loopback is not listening.
        let cfg = GenerationConfig {
            probe_timeout_secs: 1,
            ..config("http://127.0.0.1:9/api/generate".to_string())
        };
        let source = build_source(&cfg, QuestionBank::seed()).await;
        assert!(!source.is_generative());
    }

    #[tokio::test]
    async fn test_disabled_never_probes() {
        let server = MockGenerationServer::builder()
            .with_default_response_text("ok")
            .build()
            .await;
        let cfg = GenerationConfig {
            enabled: false,
            ..config(server.endpoint())
        };

        let source = build_source(&cfg, QuestionBank::seed()).await;
        assert!(!source.is_generative());
        assert_eq!(server.request_count(), 0);
        server.stop().await;
    }
}

// ============================================================================
// Batch Tests
// ============================================================================

mod batch_tests {
    use super::*;

    #[tokio::test]
    async fn test_valid_response_becomes_question() {
        let server = MockGenerationServer::builder()
            .with_response(format!("Here you go:\n{}\nEnjoy!", VALID))
            .build()
            .await;
        let mut source = generative(&server, QuestionBank::seed());
        let mut presenter = ScriptedPresenter::new();

        let batch = source.generate_batch(1, None, &mut presenter).await;
        assert_eq!(batch.len(), 1);
        assert_eq!(batch[0].answer, "Debug");
        assert_eq!(batch[0].difficulty, Difficulty::Medium);
        assert!(batch[0].id >= STATIC_ID_LIMIT);
        assert!(presenter.notices.contains(&Notice::GenerationFinished {
            produced: 1,
            requested: 1
        }));
        server.stop().await;
    }

    #[tokio::test]
    async fn test_all_failures_fall_back_to_bank() {
        let server = MockGenerationServer::builder().build().await;
        let bank = QuestionBank::seed();
        let mut source = generative(&server, bank.clone());
        let mut presenter = ScriptedPresenter::new();

        let batch = source.generate_batch(5, None, &mut presenter).await;
        assert_eq!(batch, bank.questions()[..5].to_vec());
        assert_eq!(server.request_count(), 5);

        let failed = presenter
            .notices
            .iter()
            .filter(|n| matches!(n, Notice::GenerationFailed { substituted: true, .. }))
            .count();
        assert_eq!(failed, 5);
        server.stop().await;
    }

    #[tokio::test]
    async fn test_small_bank_shortens_batch() {
        let server = MockGenerationServer::builder().build().await;
        let bank = QuestionBank::new(QuestionBank::seed().questions()[..2].to_vec());
        let mut source = generative(&server, bank);
        let mut presenter = ScriptedPresenter::new();

        let batch = source.generate_batch(5, None, &mut presenter).await;
        assert_eq!(batch.len(), 2);
        assert!(presenter.notices.contains(&Notice::GenerationFinished {
            produced: 2,
            requested: 5
        }));
        server.stop().await;
    }

    #[tokio::test]
    async fn test_mixed_outcomes_keep_order() {
        let server = MockGenerationServer::builder()
            .with_response(VALID)
            .with_response(r#"{"questao": "Q", "opcoes": ["a"], "resposta": "a"}"#)
            .with_raw_body("not an envelope")
            .with_response(VALID)
            .build()
            .await;
        let bank = QuestionBank::seed();
        let mut source = generative(&server, bank.clone());
        let mut presenter = ScriptedPresenter::new();

        let batch = source
            .generate_batch(4, Some(Difficulty::Hard), &mut presenter)
            .await;
        assert_eq!(batch.len(), 4);
        assert_eq!(batch[0].answer, "Debug");
        assert_eq!(batch[1], bank.questions()[0]);
        assert_eq!(batch[2], bank.questions()[1]);
        assert_eq!(batch[3].answer, "Debug");
        assert_ne!(batch[0].id, batch[3].id);
        server.stop().await;
    }

    #[tokio::test]
    async fn test_pinned_difficulty_in_progress_notices() {
        let server = MockGenerationServer::builder()
            .with_default_response_text(VALID)
            .build()
            .await;
        let mut source = generative(&server, QuestionBank::seed());
        let mut presenter = ScriptedPresenter::new();

        source
            .generate_batch(3, Some(Difficulty::Hard), &mut presenter)
            .await;

        let tiers: Vec<Difficulty> = presenter
            .notices
            .iter()
            .filter_map(|n| match n {
                Notice::GenerationProgress { difficulty, .. } => Some(*difficulty),
                _ => None,
            })
            .collect();
        assert_eq!(tiers, vec![Difficulty::Hard; 3]);
        server.stop().await;
    }
}
