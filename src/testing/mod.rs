//! Test support shared by unit and integration tests.
//!
//! - A loopback server speaking the generation protocol
//! - A scripted presenter that replays canned input

pub mod mock_api;
pub mod scripted;
