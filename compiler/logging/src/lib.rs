#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![deny(clippy::unwrap_used)]

//! Logging utilities for the generator.
//!
//! Events go to stderr, or to a log file when one is configured. Stdout is
//! never written: when running as a protoc plugin it carries the response.

use std::fs::OpenOptions;
use std::path::Path;
use std::sync::{Mutex, Once};

use tracing_subscriber::fmt::writer::BoxMakeWriter;
use tracing_subscriber::EnvFilter;

static INIT: Once = Once::new();

/// Install the global `tracing` subscriber.
///
/// `RUST_LOG` wins when set; otherwise `level` (e.g. `"info"`, `"debug"`) is
/// used. Calling this more than once is a no-op.
pub fn init(level: &str) { init_with_file(level, None) }

/// Like [`init`], appending to `file` instead of stderr when it can be opened.
pub fn init_with_file(level: &str, file: Option<&Path>) {
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_default_env()
            .or_else(|_| EnvFilter::try_new(level))
            .unwrap_or_else(|_| EnvFilter::new("info"));
        let log_file = file.and_then(|path| {
            OpenOptions::new().create(true).append(true).open(path).ok()
        });
        let writer = match log_file {
            Some(log_file) => BoxMakeWriter::new(Mutex::new(log_file)),
            None => BoxMakeWriter::new(std::io::stderr),
        };
        // Another subscriber may already be installed by an embedding binary.
        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(writer)
            .with_target(false)
            .try_init();
    });
}

/// Emits a trace event with module prefix.
pub fn trace(module: &str, msg: &str) {
    tracing::trace!(module = module, "{}", msg);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_is_idempotent() {
        init("debug");
        init("not a valid filter [[");
        trace("logging", "still usable after repeated init");
    }
}
