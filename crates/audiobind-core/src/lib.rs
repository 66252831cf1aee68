//! audiobind-core: binding custom sounds to items.
//!
//! Models the sound reference stored on an item, classifies items into
//! the categories that may carry one, and applies, replaces or mutates
//! bindings under per-category range limits. Resolution of a sound id into
//! a downloadable file lives in `audiobind-filebin`.

pub mod command;
pub mod config;
pub mod engine;
pub mod error;
pub mod host;
pub mod item;
pub mod sound;
pub mod store;

pub use command::{
    apply_command, failure_message, set_static_command, ApplyArgs, CommandSource,
    NotificationSink, PermissionOracle, APPLY_PERMISSION, SET_STATIC_PERMISSION,
};
pub use config::Config;
pub use engine::{ApplyOutcome, BindingEngine};
pub use error::{BindError, ConfigError, InvalidTargetReason};
pub use host::{Category, PlayerType};
pub use item::{ItemKind, ItemStack, CONTAINER_SIZE};
pub use sound::SoundReference;
pub use store::{AttributeStore, LoreLine};
