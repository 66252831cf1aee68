//! audiobind-filebin: resolving sound ids against a filebin host.
//!
//! Sounds are uploaded to a bin named after their UUID. Resolution reads
//! the bin's manifest and returns the URL of the first WAV file in it.
//! Nothing is cached; every call goes to the network.

pub mod client;
pub mod error;

pub use client::{bin_url, FilebinClient, ResolvedAsset, SoundResolver, WAV_CONTENT_TYPE};
pub use error::ResolveError;
