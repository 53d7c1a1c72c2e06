//! Integration tests for langquiz
//!
//! These drive the compiled binary. None of them need a running model:
//! generation is either disabled or pointed at a port nobody listens on.

mod helpers;

pub use helpers::*;
