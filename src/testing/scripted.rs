//! A [`Presenter`] driven by pre-recorded input, for tests.
//!
//! Every prompt pops the next scripted value; an exhausted script behaves
//! like a closed terminal (`InputError::Closed`). Everything shown is
//! recorded for later assertions.

use std::collections::VecDeque;

use crate::errors::InputError;
use crate::quiz::{MenuChoice, Question, SessionResult};
use crate::stats::Statistics;
use crate::ui::presenter::{Notice, Presenter};

#[derive(Debug, Default)]
pub struct ScriptedPresenter {
    answers: VecDeque<Result<String, InputError>>,
    confirms: VecDeque<bool>,
    choices: VecDeque<MenuChoice>,

    pub asked: Vec<u32>,
    pub confirm_prompts: Vec<String>,
    pub notices: Vec<Notice>,
    pub results: Vec<SessionResult>,
    pub statistics_shown: Vec<Statistics>,
    pub menus: Vec<Vec<MenuChoice>>,
}

impl ScriptedPresenter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_answers(
        mut self,
        answers: impl IntoIterator<Item = Result<String, InputError>>,
    ) -> Self {
        self.answers.extend(answers);
        self
    }

    pub fn with_confirms(mut self, confirms: impl IntoIterator<Item = bool>) -> Self {
        self.confirms.extend(confirms);
        self
    }

    pub fn with_choices(mut self, choices: impl IntoIterator<Item = MenuChoice>) -> Self {
        self.choices.extend(choices);
        self
    }

    /// Queue the correct answer for each of `questions`, in order.
    pub fn answering_correctly(mut self, questions: &[Question]) -> Self {
        self.answers
            .extend(questions.iter().map(|q| Ok(q.answer.clone())));
        self
    }
}

impl Presenter for ScriptedPresenter {
    fn ask(
        &mut self,
        question: &Question,
        _position: usize,
        _total: usize,
    ) -> Result<String, InputError> {
        self.asked.push(question.id);
        self.answers.pop_front().unwrap_or(Err(InputError::Closed))
    }

    fn confirm(&mut self, prompt: &str, _default: bool) -> Result<bool, InputError> {
        self.confirm_prompts.push(prompt.to_string());
        self.confirms.pop_front().ok_or(InputError::Closed)
    }

    fn notify(&mut self, notice: Notice) {
        self.notices.push(notice);
    }

    fn show_result(&mut self, result: &SessionResult) {
        self.results.push(result.clone());
    }

    fn show_statistics(&mut self, stats: &Statistics, _generator: Option<&str>) {
        self.statistics_shown.push(stats.clone());
    }

    fn choose(&mut self, choices: &[MenuChoice]) -> Result<MenuChoice, InputError> {
        self.menus.push(choices.to_vec());
        self.choices.pop_front().ok_or(InputError::Closed)
    }
}
