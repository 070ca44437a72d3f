//! `tracing` subscriber setup for the binaries.
//!
//! | Variable | Default | Meaning |
//! |----------|---------|---------|
//! | `ASCII_FIELD_LOG` | `info` | Level or `EnvFilter` directives |
//! | `ASCII_FIELD_LOG_PATH` | unset | Log file; required for the terminal preview to log at all |

use std::env;
use std::fs::File;
use std::sync::Mutex;

use anyhow::{Context, Result};
use tracing::level_filters::LevelFilter;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

pub const LOG_LEVEL_ENV: &str = "ASCII_FIELD_LOG";
pub const LOG_PATH_ENV: &str = "ASCII_FIELD_LOG_PATH";

/// Where log lines go.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogSink {
    /// Standard error, for headless tools.
    Stderr,
    /// Only the file named by `ASCII_FIELD_LOG_PATH`; nothing without it. The terminal
    /// preview uses this so log lines never land on the alternate screen.
    FileOnly,
}

fn filter() -> Result<EnvFilter> {
    let directives = env::var(LOG_LEVEL_ENV).unwrap_or_default();
    EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .parse(directives.trim())
        .with_context(|| format!("invalid {LOG_LEVEL_ENV} directives"))
}

/// Install the global subscriber.
pub fn init(sink: LogSink) -> Result<()> {
    let path = env::var(LOG_PATH_ENV).ok().filter(|p| !p.is_empty());

    let file_layer = match &path {
        Some(path) => {
            let file = File::create(path).with_context(|| format!("failed to create log file {path}"))?;
            Some(
                tracing_subscriber::fmt::layer()
                    .with_writer(Mutex::new(file))
                    .with_ansi(false)
                    .with_target(false)
                    .with_filter(filter()?),
            )
        }
        None => None,
    };
    let stderr_layer = (sink == LogSink::Stderr).then(|| {
        tracing_subscriber::fmt::layer()
            .with_writer(std::io::stderr)
            .with_ansi(true)
    });
    let stderr_layer = match stderr_layer {
        Some(layer) => Some(layer.with_filter(filter()?)),
        None => None,
    };

    tracing_subscriber::registry()
        .with(file_layer)
        .with(stderr_layer)
        .try_init()
        .context("failed to install tracing subscriber")?;

    if let Some(path) = path {
        tracing::debug!(%path, "logging to file");
    }
    Ok(())
}
