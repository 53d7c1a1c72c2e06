//! Unit tests for the session loop
//!
//! Tests cover:
//! - Scoring over a full run
//! - Aborting from the continue prompt
//! - Skipped answers

use langquiz::errors::InputError;
use langquiz::quiz::{Completion, PerformanceTier, QuestionBank, SessionRunner};
use langquiz::stats::Statistics;
use langquiz::testing::scripted::ScriptedPresenter;
use langquiz::ui::Notice;

#[test]
fn test_full_run_with_one_miss() {
    let bank = QuestionBank::seed();
    let questions = &bank.questions()[..5];
    let mut answers: Vec<Result<String, InputError>> =
        questions.iter().map(|q| Ok(q.answer.clone())).collect();
    answers[3] = Ok("definitely wrong".to_string());

    let mut presenter = ScriptedPresenter::new()
        .with_answers(answers)
        .with_confirms([true; 4]);
    let result = SessionRunner::new(questions).run(&mut presenter);

    assert_eq!(result.completion, Completion::Finished);
    assert_eq!(result.score, 4);
    assert_eq!(result.attempted, 5);
    assert_eq!(result.percentage(), 80.0);
    assert_eq!(result.tier(), PerformanceTier::Excellent);
    assert_eq!(presenter.asked.len(), 5);
    assert_eq!(presenter.results, vec![result]);
}

#[test]
fn test_decline_after_two_counts_two() {
    let bank = QuestionBank::seed();
    let questions = &bank.questions()[..5];
    let mut presenter = ScriptedPresenter::new()
        .answering_correctly(questions)
        .with_confirms([true, false]);

    let result = SessionRunner::new(questions).run(&mut presenter);
    assert_eq!(result.completion, Completion::Aborted);
    assert_eq!(result.attempted, 2);
    assert_eq!(result.score, 2);

    let mut stats = Statistics::default();
    stats.fold(&result, &chrono::Local::now());
    assert_eq!(stats.total_questions, 2);
    assert_eq!(stats.total_quizzes, 1);
}

#[test]
fn test_progress_shown_before_each_continue() {
    let bank = QuestionBank::seed();
    let questions = &bank.questions()[..3];
    let mut presenter = ScriptedPresenter::new()
        .answering_correctly(questions)
        .with_confirms([true, true]);

    SessionRunner::new(questions).run(&mut presenter);

    let progress: Vec<usize> = presenter
        .notices
        .iter()
        .filter_map(|n| match n {
            Notice::Progress { answered, .. } => Some(*answered),
            _ => None,
        })
        .collect();
    assert_eq!(progress, vec![1, 2]);
}

#[test]
fn test_closed_input_skips_every_question() {
    let bank = QuestionBank::seed();
    let questions = &bank.questions()[..3];
    // Answers run dry immediately; continue prompts still say yes.
    let mut presenter = ScriptedPresenter::new().with_confirms([true, true]);

    let result = SessionRunner::new(questions).run(&mut presenter);
    assert_eq!(result.completion, Completion::Finished);
    assert_eq!(result.attempted, 3);
    assert_eq!(result.skipped, 3);
    assert_eq!(result.score, 0);
    assert_eq!(result.tier(), PerformanceTier::NeedsStudy);
}
