//! # Sfxkit Audio
//!
//! Named sound effects grouped into tracks, resolved by name and played
//! through a pluggable audio backend.
//!
//! ## Features
//! - Sounds with per-play parameters (priority, volume, pitch, pan, loop)
//! - Tracks owning exactly one lazily created voice
//! - Registry with lazily built name indexes, safe to share across threads
//! - Combined `Track_Sound` keys
//! - JSON manifests for declaring a registry
//!
//! ## Example
//! ```
//! use std::sync::Arc;
//! use sfxkit_audio::{NullBackend, Registry, RegistryConfig, Sound, Track, ClipHandle};
//!
//! let ui = Track::new("UI", Some("SFX".into()))?
//!     .with_sound(Sound::new("Click", ClipHandle::new("ui/click.wav")).with_volume(0.8))?;
//!
//! let registry = Registry::with_tracks(
//!     RegistryConfig::default(),
//!     Arc::new(NullBackend::new()),
//!     vec![ui],
//! )?;
//!
//! registry.play_key("UI_Click")?;
//! # Ok::<(), sfxkit_audio::SfxError>(())
//! ```

pub mod backend;
pub mod key;
pub mod manifest;
pub mod registry;
pub mod sound;
pub mod track;

#[cfg(test)]
pub(crate) mod testing;

pub use backend::{AudioBackend, NullBackend, Voice, VoiceSettings};
pub use key::{KEY_DELIMITER, join_key, split_key};
pub use manifest::{Manifest, SoundDef, TrackDef};
pub use registry::{ObserverId, Registry, RegistryConfig, RegistryEvent};
pub use sound::{ClipHandle, Sound};
pub use track::Track;

use thiserror::Error;

/// Sound registry errors
#[derive(Error, Debug)]
pub enum SfxError {
    #[error("No track named '{0}'")]
    TrackNotFound(String),

    #[error("No sound named '{sound}' on track '{track}'")]
    SoundNotFound { track: String, sound: String },

    #[error("Invalid combined key '{0}': expected <track>_<sound>")]
    InvalidKeyFormat(String),

    #[error("Invalid name: {0}")]
    InvalidName(String),

    #[error("Track '{0}' already exists")]
    DuplicateTrack(String),

    #[error("Sound '{sound}' already exists on track '{track}'")]
    DuplicateSound { track: String, sound: String },

    #[error("Audio backend error: {0}")]
    Backend(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Manifest error: {0}")]
    Manifest(#[from] serde_json::Error),
}

/// Result type for registry operations
pub type SfxResult<T> = Result<T, SfxError>;
