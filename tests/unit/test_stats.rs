//! Unit tests for the statistics store
//!
//! Tests cover:
//! - Folding session results
//! - Persistence round trip and file shape
//! - Degradation on missing or corrupted files

use chrono::{TimeZone, Utc};
use langquiz::quiz::{Completion, SessionResult};
use langquiz::stats::{Statistics, StatsStore};
use std::time::Duration;
use tempfile::TempDir;

fn session(outcomes: &[bool], completion: Completion) -> SessionResult {
    SessionResult {
        outcomes: outcomes.to_vec(),
        score: outcomes.iter().filter(|c| **c).count() as u32,
        attempted: outcomes.len() as u32,
        skipped: 0,
        elapsed: Duration::from_secs(30),
        completion,
    }
}

// ============================================================================
// Folding Tests
// ============================================================================

mod fold_tests {
    use super::*;

    #[test]
    fn test_fold_two_sessions() {
        let at = Utc.with_ymd_and_hms(2026, 10, 15, 9, 5, 0).unwrap();
        let mut stats = Statistics::default();

        stats.fold(&session(&[true, true, false, true, true], Completion::Finished), &at);
        stats.fold(&session(&[false, true], Completion::Aborted), &at);

        assert_eq!(stats.total_quizzes, 2);
        assert_eq!(stats.total_correct, 5);
        assert_eq!(stats.total_questions, 7);
        assert_eq!(stats.best_score, 4);
        assert!((stats.average_percentage - 5.0 / 7.0 * 100.0).abs() < 1e-9);
        assert_eq!(stats.last_quiz_timestamp, "15/10/2026 09:05");
    }

    #[test]
    fn test_fold_empty_session_keeps_percentage_zero() {
        let at = Utc.with_ymd_and_hms(2026, 1, 2, 3, 4, 0).unwrap();
        let mut stats = Statistics::default();
        stats.fold(&session(&[], Completion::Finished), &at);
        assert_eq!(stats.total_quizzes, 1);
        assert_eq!(stats.average_percentage, 0.0);
        assert!(stats.has_history());
    }
}

// ============================================================================
// Store Tests
// ============================================================================

mod store_tests {
    use super::*;

    #[test]
    fn test_missing_file_is_default() {
        let dir = TempDir::new().unwrap();
        let store = StatsStore::new(dir.path().join("absent.json"));
        assert_eq!(store.load(), Statistics::default());
        assert!(store.try_load().unwrap().is_none());
    }

    #[test]
    fn test_corrupted_file_degrades() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("stats.json");
        std::fs::write(&path, "{ not json").unwrap();

        let store = StatsStore::new(&path);
        assert_eq!(store.load(), Statistics::default());
        assert!(store.try_load().is_err());
    }

    #[test]
    fn test_save_then_load_is_equal() {
        let dir = TempDir::new().unwrap();
        let store = StatsStore::new(dir.path().join("nested").join("stats.json"));
        let stats = Statistics {
            total_quizzes: 3,
            total_correct: 11,
            total_questions: 15,
            best_score: 5,
            average_percentage: 11.0 / 15.0 * 100.0,
            last_quiz_timestamp: "01/02/2026 10:00".to_string(),
        };

        store.save(&stats).unwrap();
        assert_eq!(store.load(), stats);
    }

    #[test]
    fn test_uneven_percentage_survives_reload() {
        let dir = TempDir::new().unwrap();
        let store = StatsStore::new(dir.path().join("stats.json"));
        let at = Utc.with_ymd_and_hms(2026, 10, 15, 9, 5, 0).unwrap();
        let mut stats = Statistics::default();
        // 2 of 13 is 15.384615384615385%, which the default float parser misreads.
        let mut outcomes = vec![false; 13];
        outcomes[0] = true;
        outcomes[1] = true;
        stats.fold(&session(&outcomes, Completion::Finished), &at);

        store.save(&stats).unwrap();
        let loaded = store.load();
        assert_eq!(loaded.average_percentage.to_bits(), stats.average_percentage.to_bits());
        assert_eq!(loaded, stats);
    }

    #[test]
    fn test_file_uses_camel_case_keys() {
        let dir = TempDir::new().unwrap();
        let store = StatsStore::new(dir.path().join("stats.json"));
        store.save(&Statistics::default()).unwrap();

        let raw = std::fs::read_to_string(store.path()).unwrap();
        for key in [
            "totalQuizzes",
            "totalCorrect",
            "totalQuestions",
            "bestScore",
            "averagePercentage",
            "lastQuizTimestamp",
        ] {
            assert!(raw.contains(key), "missing {}", key);
        }
        // Pretty-printed: one field per line.
        assert!(raw.lines().count() > 6);
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("stats.json");
        std::fs::write(&path, r#"{"totalQuizzes": 4, "bestScore": 9}"#).unwrap();

        let stats = StatsStore::new(&path).load();
        assert_eq!(stats.total_quizzes, 4);
        assert_eq!(stats.best_score, 9);
        assert_eq!(stats.total_questions, 0);
    }
}
