//! Shared library for blogdata.
//!
//! Resolves the blog's global data (name, title, footer text) from
//! environment variables, plus the config and logging plumbing around it.

pub mod config;
pub mod global_data;
pub mod logging;

pub use config::{
    ConfigSource, DecodeError, EnvError, EnvParser, EnvSource, MapEnv, ProcessEnv, Sourced,
};
pub use global_data::{
    DEFAULT_BLOG_TITLE, DEFAULT_FOOTER_TEXT, DEFAULT_NAME, GlobalData, GlobalDataReport,
};
pub use logging::{LogConfig, LoggingError, LoggingGuards, init_logging};
