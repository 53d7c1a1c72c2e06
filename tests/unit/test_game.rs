//! Unit tests for the game loop
//!
//! Tests cover:
//! - Menu flow through play, statistics, and exit
//! - Statistics persisted across games

use langquiz::quiz::game::Game;
use langquiz::quiz::{MenuChoice, Mode, ModeSelector, QuestionBank};
use langquiz::source::StaticSource;
use langquiz::stats::StatsStore;
use langquiz::testing::scripted::ScriptedPresenter;
use langquiz::ui::Notice;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tempfile::TempDir;

fn game(dir: &TempDir) -> Game {
    Game::new(
        Box::new(StaticSource::new(QuestionBank::seed())),
        ModeSelector::new(StdRng::seed_from_u64(11)),
        StatsStore::new(dir.path().join("quiz_stats.json")),
    )
}

#[tokio::test]
async fn test_hard_round_then_exit() {
    let dir = TempDir::new().unwrap();
    let bank = QuestionBank::seed();
    let hard: Vec<_> = bank
        .filter(|q| q.difficulty == langquiz::quiz::Difficulty::Hard)
        .cloned()
        .collect();

    let mut presenter = ScriptedPresenter::new()
        .with_choices([MenuChoice::Play(Mode::HardOnly)])
        .answering_correctly(&hard)
        // Two continue prompts, then decline "Play again?".
        .with_confirms([true, true, false]);

    let mut game = game(&dir);
    game.run(&mut presenter).await;

    assert_eq!(game.statistics().total_quizzes, 1);
    assert_eq!(game.statistics().best_score, 3);
    assert_eq!(presenter.results.len(), 1);
    assert_eq!(presenter.confirm_prompts.last().unwrap(), "Play again?");

    let saved = StatsStore::new(dir.path().join("quiz_stats.json")).load();
    assert_eq!(&saved, game.statistics());
}

#[tokio::test]
async fn test_static_menu_hides_ai_modes() {
    let dir = TempDir::new().unwrap();
    let mut presenter = ScriptedPresenter::new().with_choices([MenuChoice::Exit]);

    game(&dir).run(&mut presenter).await;

    let menu = &presenter.menus[0];
    assert!(!menu.iter().any(|c| matches!(c, MenuChoice::Play(m) if m.is_ai())));
    assert!(menu.contains(&MenuChoice::Statistics));
    assert!(presenter.results.is_empty());
}

#[tokio::test]
async fn test_statistics_then_play_now() {
    let dir = TempDir::new().unwrap();
    let bank = QuestionBank::seed();
    let mut presenter = ScriptedPresenter::new()
        .with_choices([MenuChoice::Statistics, MenuChoice::Play(Mode::All)])
        // "Play now?" yes, nine continue prompts, then "Play again?" no.
        .with_confirms(std::iter::once(true).chain([true; 9]).chain([false]))
        .answering_correctly(bank.questions());

    let mut game = game(&dir);
    game.run(&mut presenter).await;

    assert_eq!(presenter.statistics_shown.len(), 1);
    assert_eq!(presenter.confirm_prompts[0], "Play now?");
    assert_eq!(game.statistics().total_questions, 10);
    assert_eq!(game.statistics().total_correct, 10);
}

#[tokio::test]
async fn test_stats_accumulate_across_games() {
    let dir = TempDir::new().unwrap();

    for _ in 0..2 {
        let mut presenter = ScriptedPresenter::new()
            .with_choices([MenuChoice::Play(Mode::Quick)])
            // Decline after the first question.
            .with_confirms([false, false]);
        game(&dir).run(&mut presenter).await;
        assert!(presenter.notices.contains(&Notice::Interrupted));
    }

    let stats = game(&dir).statistics().clone();
    assert_eq!(stats.total_quizzes, 2);
    assert_eq!(stats.total_questions, 2);
    assert!(!stats.last_quiz_timestamp.is_empty());
}

#[tokio::test]
async fn test_closed_menu_says_farewell() {
    let dir = TempDir::new().unwrap();
    let mut presenter = ScriptedPresenter::new();

    let mut game = game(&dir);
    game.run(&mut presenter).await;

    assert_eq!(presenter.menus.len(), 1);
    assert_eq!(game.statistics().total_quizzes, 0);
    assert!(!dir.path().join("quiz_stats.json").exists());
}
