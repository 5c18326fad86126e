//! Crate-level error types.
//!
//! Camera and trajectory math never fails; errors only come from loading
//! and validating presets, key bindings and the window event loop.

use thiserror::Error;

use crate::bindings::KeyAction;

/// Errors produced by the trailcam crate.
#[derive(Debug, Error)]
pub enum Error {
    /// Reading or writing an options file failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// An options file was not valid TOML for [`Options`](crate::Options).
    #[error("options parse error: {0}")]
    ConfigParse(#[from] toml::de::Error),
    /// Options could not be written as TOML.
    #[error("options serialize error: {0}")]
    ConfigSerialize(#[from] toml::ser::Error),
    /// Two actions were bound to the same key.
    #[error("key '{key}' is bound to both {first:?} and {second:?}")]
    DuplicateBinding {
        key: String,
        first: KeyAction,
        second: KeyAction,
    },
    /// An option value is outside the range the crate can run with.
    #[error("invalid option {name} = {value}: {reason}")]
    InvalidOption {
        name: &'static str,
        value: f32,
        reason: &'static str,
    },
    /// The window event loop could not be created or exited abnormally.
    #[error("event loop error: {0}")]
    EventLoop(#[from] winit::error::EventLoopError),
}

pub type Result<T> = std::result::Result<T, Error>;
