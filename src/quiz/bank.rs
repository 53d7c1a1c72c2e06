//! Static seed questions.
//!
//! The bank is the fallback for everything: it backs the non-generative
//! modes and fills any slot the generation service fails to produce.

use super::{Difficulty, Question};

/// Identifiers below this value belong to the static bank; generated
/// questions are always allocated above it.
pub const STATIC_ID_LIMIT: u32 = 1000;

#[derive(Debug, Clone, Default)]
pub struct QuestionBank {
    questions: Vec<Question>,
}

impl QuestionBank {
    pub fn new(questions: Vec<Question>) -> Self {
        Self { questions }
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Question> {
        self.questions.get(index)
    }

    /// Questions matching `predicate`, in bank order.
    pub fn filter<'a, P>(&'a self, predicate: P) -> impl Iterator<Item = &'a Question> + 'a
    where
        P: Fn(&Question) -> bool + 'a,
    {
        self.questions.iter().filter(move |q| predicate(q))
    }

    /// The built-in bank shipped with the binary.
    pub fn seed() -> Self {
        let q = |id: u32,
                 prompt: &str,
                 options: [&str; 4],
                 answer: &str,
                 explanation: &str,
                 difficulty: Difficulty,
                 category: &str| Question {
            id,
            prompt: prompt.to_string(),
            options: options.iter().map(|o| o.to_string()).collect(),
            answer: answer.to_string(),
            explanation: explanation.to_string(),
            difficulty,
            category: category.to_string(),
        };

        Self::new(vec![
            q(
                1,
                "Which keyword declares a function in Rust?",
                ["fn", "func", "def", "function"],
                "fn",
                "Functions are introduced with `fn`, e.g. `fn main() {}`.",
                Difficulty::Easy,
                "syntax",
            ),
            q(
                2,
                "How do you declare a mutable binding?",
                ["var x = 10;", "let mut x = 10;", "mut x = 10;", "let x: mut = 10;"],
                "let mut x = 10;",
                "Bindings are immutable by default; `mut` opts in to mutation.",
                Difficulty::Easy,
                "types",
            ),
            q(
                3,
                "Which macro prints a line to standard output?",
                ["print!", "echo!", "println!", "write!"],
                "println!",
                "`println!` formats its arguments and appends a newline.",
                Difficulty::Easy,
                "syntax",
            ),
            q(
                4,
                "Which of these creates an empty Vec<i32>?",
                [
                    "Vec::new()",
                    "vec![]",
                    "Vec::with_capacity(0)",
                    "All of the above",
                ],
                "All of the above",
                "All three produce an empty vector; they differ only in how capacity is reserved.",
                Difficulty::Medium,
                "collections",
            ),
            q(
                5,
                "What type represents an optional value?",
                ["Maybe<T>", "Option<T>", "Nullable<T>", "T?"],
                "Option<T>",
                "`Option<T>` is either `Some(T)` or `None`; there is no null.",
                Difficulty::Medium,
                "types",
            ),
            q(
                6,
                "How do you spawn an OS thread?",
                [
                    "std::thread::spawn(|| {})",
                    "go func()",
                    "Thread::new().start()",
                    "async spawn {}",
                ],
                "std::thread::spawn(|| {})",
                "`std::thread::spawn` runs the closure on a new thread and returns a JoinHandle.",
                Difficulty::Medium,
                "concurrency",
            ),
            q(
                7,
                "Which operator propagates an error from a function returning Result?",
                ["!", "?", "try", "&&"],
                "?",
                "`?` returns early with the error, converting it through `From`.",
                Difficulty::Medium,
                "errors",
            ),
            q(
                8,
                "What happens to a String after `let b = a;` where `a: String`?",
                [
                    "It is copied",
                    "It is moved and `a` can no longer be used",
                    "Both share ownership",
                    "It is cloned lazily",
                ],
                "It is moved and `a` can no longer be used",
                "String is not Copy, so assignment moves ownership to `b`.",
                Difficulty::Hard,
                "ownership",
            ),
            q(
                9,
                "Which trait must a type implement to be sent to another thread?",
                ["Sync", "Copy", "Send", "Clone"],
                "Send",
                "`Send` marks types whose ownership can be transferred across threads.",
                Difficulty::Medium,
                "traits",
            ),
            q(
                10,
                "What is the difference between &str and String?",
                [
                    "There is no difference",
                    "&str is a borrowed slice, String is an owned growable buffer",
                    "String is stack allocated",
                    "&str is deprecated",
                ],
                "&str is a borrowed slice, String is an owned growable buffer",
                "`String` owns heap data and can grow; `&str` borrows UTF-8 bytes from somewhere else.",
                Difficulty::Hard,
                "types",
            ),
        ])
    }
}
