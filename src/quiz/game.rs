//! The interactive game loop: menu, selection, session, statistics.

use chrono::Local;
use tracing::{info, warn};

use super::{MenuChoice, Mode, ModeSelector, SessionResult, SessionRunner};
use crate::source::QuestionSource;
use crate::stats::{Statistics, StatsStore};
use crate::ui::presenter::{Notice, Presenter};

pub struct Game {
    source: Box<dyn QuestionSource>,
    selector: ModeSelector,
    store: StatsStore,
    stats: Statistics,
}

impl Game {
    /// Statistics are loaded from `store` once, up front.
    pub fn new(source: Box<dyn QuestionSource>, selector: ModeSelector, store: StatsStore) -> Self {
        let stats = store.load();
        Self {
            source,
            selector,
            store,
            stats,
        }
    }

    pub fn statistics(&self) -> &Statistics {
        &self.stats
    }

    /// Run menus and sessions until the player leaves or input closes.
    pub async fn run(&mut self, presenter: &mut dyn Presenter) {
        let menu = MenuChoice::menu(self.source.is_generative());

        loop {
            presenter.welcome(self.source.generator());

            let mut choice = match presenter.choose(&menu) {
                Ok(choice) => choice,
                Err(e) => {
                    info!("menu closed: {}", e);
                    break;
                }
            };

            if choice == MenuChoice::Statistics {
                presenter.show_statistics(&self.stats, self.source.generator());
                if !matches!(presenter.confirm("Play now?", true), Ok(true)) {
                    continue;
                }
                choice = match presenter.choose(&menu) {
                    Ok(choice) => choice,
                    Err(e) => {
                        info!("menu closed: {}", e);
                        break;
                    }
                };
            }

            let mode = match choice {
                MenuChoice::Play(mode) => mode,
                MenuChoice::Statistics => continue,
                MenuChoice::Exit => break,
            };

            if self.play(mode, presenter).await.is_none() {
                continue;
            }

            if !matches!(presenter.confirm("Play again?", false), Ok(true)) {
                break;
            }
        }

        presenter.farewell();
    }

    /// Select questions for `mode`, run one session, and record it.
    ///
    /// `None` when the mode produced no questions; nothing is recorded then.
    pub async fn play(
        &mut self,
        mode: Mode,
        presenter: &mut dyn Presenter,
    ) -> Option<SessionResult> {
        let questions = self
            .selector
            .select(mode, self.source.as_mut(), presenter)
            .await;

        if questions.is_empty() {
            warn!(mode = %mode, "no questions available for mode");
            presenter.notify(Notice::Error(format!(
                "No questions found for mode '{}'",
                mode.label()
            )));
            return None;
        }

        presenter.notify(Notice::Info(format!(
            "You have {} questions to answer",
            questions.len()
        )));
        let result = SessionRunner::new(&questions).run(presenter);
        self.record(&result, presenter);
        Some(result)
    }

    /// Fold `result` into the running statistics and persist them.
    ///
    /// A failed save is reported but does not end the game.
    pub fn record(&mut self, result: &SessionResult, presenter: &mut dyn Presenter) {
        self.stats.fold(result, &Local::now());
        info!(
            total_quizzes = self.stats.total_quizzes,
            average = self.stats.average_percentage,
            "statistics updated"
        );

        if let Err(e) = self.store.save(&self.stats) {
            warn!("could not save statistics: {}", e);
            presenter.notify(Notice::Warning(format!("Statistics were not saved: {}", e)));
        }
    }
}
