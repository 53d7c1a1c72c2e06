//! Terminal UI
//!
//! The core talks to the player only through [`presenter::Presenter`].
//! [`terminal::TerminalPresenter`] is the stdin/stdout implementation.

pub mod banners;
pub mod presenter;
pub mod style;
pub mod terminal;

pub use presenter::{Notice, Presenter};
pub use terminal::TerminalPresenter;
