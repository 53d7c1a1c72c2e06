//! Observability
//!
//! Structured logging through `tracing`, written to stderr so it never
//! interleaves with the quiz on stdout.

pub mod telemetry;
