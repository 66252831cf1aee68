//! Binding and configuration error types.

use thiserror::Error;

/// Why a host object cannot carry a sound.
///
/// Both reasons are the same failure kind; they only differ in how the
/// rejection is worded for the player.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvalidTargetReason {
    /// Nothing in the slot.
    EmptyHand,
    /// An item that no category accepts.
    Unsupported,
}

#[derive(Error, Debug)]
pub enum BindError {
    #[error("invalid target: {0:?}")]
    InvalidTarget(InvalidTargetReason),

    #[error("range too high: {range} exceeds the maximum of {max}")]
    RangeTooHigh { range: f32, max: f32 },

    #[error("item does not have custom audio")]
    NoBinding,

    #[error("invalid sound: {0}")]
    InvalidSound(String),

    #[error("permission denied: {0}")]
    PermissionDenied(String),
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("invalid config: {0}")]
    Invalid(String),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
