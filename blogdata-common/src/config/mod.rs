//! Configuration system for blogdata.
//!
//! This module provides:
//! - An injectable environment source (process or in-memory)
//! - Environment variable parsing with type safety
//! - Strict percent-decoding of values
//! - Source tracking for debugging

pub mod decode;
pub mod env;
pub mod source;

pub use decode::{DecodeError, decode_component, encode_component};
pub use env::{EnvError, EnvParser, EnvSource, MapEnv, ProcessEnv};
pub use source::{ConfigSource, Sourced};

#[cfg(test)]
pub(crate) fn env_test_lock() -> std::sync::MutexGuard<'static, ()> {
    use std::sync::{Mutex, OnceLock};

    static ENV_LOCK: OnceLock<Mutex<()>> = OnceLock::new();
    ENV_LOCK
        .get_or_init(|| Mutex::new(()))
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner())
}
