//! Telemetry
//!
//! Structured logging for the quiz. Quiet unless `RUST_LOG` is set or the
//! player passes `--verbose`; output always goes to stderr.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Filter used by `--verbose` when `RUST_LOG` is not set.
pub const VERBOSE_FILTER: &str = "langquiz=debug,info";

/// Initialize tracing from `RUST_LOG`, or not at all when it is unset.
pub fn init_tracing() {
    if let Ok(filter) = std::env::var("RUST_LOG") {
        init_tracing_with_filter(&filter);
    }
}

/// Initialize tracing for `--verbose`. An explicit `RUST_LOG` still wins.
pub fn init_tracing_verbose() {
    let filter = std::env::var("RUST_LOG").unwrap_or_else(|_| VERBOSE_FILTER.to_string());
    init_tracing_with_filter(&filter)
}

/// Initialize with custom filter string
pub fn init_tracing_with_filter(filter: &str) {
    use std::sync::Once;
    static INIT: Once = Once::new();

    INIT.call_once(|| {
        let fmt_layer = tracing_subscriber::fmt::layer()
            .with_target(false)
            .with_thread_ids(false)
            .with_thread_names(false)
            .with_file(false)
            .with_line_number(false)
            .with_level(true)
            .compact()
            .with_writer(std::io::stderr);

        let filter_layer = EnvFilter::try_new(filter).unwrap_or_else(|_| EnvFilter::new("warn"));

        let _ = tracing_subscriber::registry()
            .with(filter_layer)
            .with(fmt_layer)
            .try_init();
    });
}

/// Escape control characters so untrusted text (model output) cannot forge
/// log lines.
pub fn sanitize_for_log(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            '\x1b' => out.push_str("\\e"),
            '\x00' => out.push_str("\\0"),
            c if c.is_control() => out.push_str(&format!("\\u{:04x}", c as u32)),
            _ => out.push(c),
        }
    }
    out
}

/// First `max_chars` characters of `s`, sanitized, for log previews.
pub fn log_preview(s: &str, max_chars: usize) -> String {
    let head: String = s.chars().take(max_chars).collect();
    if s.chars().count() > max_chars {
        format!("{}...", sanitize_for_log(&head))
    } else {
        sanitize_for_log(&head)
    }
}
