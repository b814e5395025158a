//! Tracing subscriber setup.
//!
//! Console output is compact text or JSON; an optional log file always gets
//! JSON through a non-blocking writer. Settings come from `BLOG_LOG_LEVEL`,
//! `BLOG_LOG_JSON` and `BLOG_LOG_FILE`.

use crate::config::{EnvError, EnvParser, EnvSource, ProcessEnv};
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{InitError, RollingFileAppender, Rotation};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::writer::BoxMakeWriter;
use tracing_subscriber::prelude::*;

/// Errors raised while installing the subscriber.
#[derive(Debug, Error)]
pub enum LoggingError {
    #[error("Invalid log filter '{filter}': {source}")]
    Filter {
        filter: String,
        source: tracing_subscriber::filter::ParseError,
    },

    #[error("Failed to open log file {}: {source}", .path.display())]
    File { path: PathBuf, source: InitError },

    #[error("Failed to install tracing subscriber: {0}")]
    Init(#[from] tracing_subscriber::util::TryInitError),
}

/// Logging settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogConfig {
    /// Filter directive, e.g. `info` or `blogdata=debug`.
    pub level: String,
    /// JSON console output instead of compact text.
    pub json: bool,
    /// Console output goes to stderr instead of stdout.
    pub stderr: bool,
    /// Additional JSON log file.
    pub file: Option<PathBuf>,
    /// Problems found while reading the logging variables. Reported once
    /// the subscriber is up.
    pub env_errors: Vec<EnvError>,
}

impl LogConfig {
    pub fn new(level: impl Into<String>) -> Self {
        Self {
            level: level.into(),
            json: false,
            stderr: false,
            file: None,
            env_errors: Vec::new(),
        }
    }

    /// Read settings from the process environment.
    pub fn from_env(default_level: &str) -> Self {
        Self::from_source(&ProcessEnv, default_level)
    }

    /// Read settings from the given environment. Invalid values fall back
    /// to defaults and are kept in `env_errors`.
    pub fn from_source<E: EnvSource + ?Sized>(env: &E, default_level: &str) -> Self {
        let mut parser = EnvParser::new(env);
        let level = parser.get_log_level("LOG_LEVEL", default_level).into_value();
        let json = parser.get_bool("LOG_JSON", false).into_value();
        let file = parser.get_optional_path("LOG_FILE").into_value();
        Self {
            level,
            json,
            stderr: false,
            file,
            env_errors: parser.take_errors(),
        }
    }

    pub fn with_level(mut self, level: impl Into<String>) -> Self {
        self.level = level.into();
        self
    }

    pub fn with_stderr(mut self) -> Self {
        self.stderr = true;
        self
    }

    pub fn with_json(mut self, json: bool) -> Self {
        self.json = json;
        self
    }

    fn console_writer(&self) -> BoxMakeWriter {
        if self.stderr {
            BoxMakeWriter::new(io::stderr)
        } else {
            BoxMakeWriter::new(io::stdout)
        }
    }
}

/// Keeps background writers alive. Drop it only at shutdown.
#[must_use = "dropping the guards stops the file writer"]
pub struct LoggingGuards {
    _file: Option<WorkerGuard>,
}

/// Install the global tracing subscriber.
pub fn init_logging(config: &LogConfig) -> Result<LoggingGuards, LoggingError> {
    let filter = EnvFilter::try_new(&config.level).map_err(|source| LoggingError::Filter {
        filter: config.level.clone(),
        source,
    })?;

    let json_layer = config.json.then(|| {
        tracing_subscriber::fmt::layer()
            .json()
            .with_writer(config.console_writer())
    });
    let text_layer = (!config.json).then(|| {
        tracing_subscriber::fmt::layer()
            .compact()
            .with_target(false)
            .with_writer(config.console_writer())
    });

    let (file_layer, file_guard) = match &config.file {
        Some(path) => {
            let appender = file_appender(path)?;
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = tracing_subscriber::fmt::layer()
                .json()
                .with_ansi(false)
                .with_writer(writer);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(json_layer)
        .with(text_layer)
        .with(file_layer)
        .try_init()?;

    for err in &config.env_errors {
        tracing::warn!(var = err.var(), error = %err, "ignoring invalid logging variable");
    }
    tracing::debug!(
        level = %config.level,
        json = config.json,
        file = ?config.file,
        "logging initialized"
    );

    Ok(LoggingGuards { _file: file_guard })
}

fn file_appender(path: &Path) -> Result<RollingFileAppender, LoggingError> {
    let dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "blogdata.log".to_string());

    RollingFileAppender::builder()
        .rotation(Rotation::NEVER)
        .filename_prefix(name)
        .build(dir)
        .map_err(|source| LoggingError::File {
            path: path.to_path_buf(),
            source,
        })
}
