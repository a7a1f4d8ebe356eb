//! Sounds
//!
//! A sound is a named clip plus the parameters applied to a voice each time
//! it plays. Sounds are configured at load time and treated as immutable
//! afterwards.

use serde::{Deserialize, Serialize};

/// Lowest accepted priority
pub const MIN_PRIORITY: u16 = 0;
/// Highest accepted priority
pub const MAX_PRIORITY: u16 = 256;
/// Priority given to sounds that do not set one
pub const DEFAULT_PRIORITY: u16 = 128;

/// Opaque reference to clip data owned by the audio backend
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ClipHandle(String);

impl ClipHandle {
    /// Create a clip handle from a backend key (asset path, id, ...)
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    /// Get the backend key
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Check if this handle points nowhere
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl std::fmt::Display for ClipHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// A playable clip and its per-play parameters.
///
/// Setters clamp into the accepted ranges: priority `0..=256`, volume
/// `0..=1`, pitch `-3..=3`, pan `-1..=1`. Non-finite values reset the
/// parameter to its default.
#[derive(Debug, Clone, PartialEq)]
pub struct Sound {
    name: String,
    clip: ClipHandle,
    priority: u16,
    volume: f32,
    pitch: f32,
    pan: f32,
    looping: bool,
}

impl Sound {
    /// Create a sound with default parameters
    pub fn new(name: impl Into<String>, clip: ClipHandle) -> Self {
        Self {
            name: name.into(),
            clip,
            ..Default::default()
        }
    }

    /// Set the priority (0 is highest)
    pub fn with_priority(mut self, priority: u16) -> Self {
        self.priority = priority.clamp(MIN_PRIORITY, MAX_PRIORITY);
        self
    }

    /// Set the volume
    pub fn with_volume(mut self, volume: f32) -> Self {
        self.volume = clamp_finite(volume, 0.0, 1.0, 1.0);
        self
    }

    /// Set the pitch multiplier
    pub fn with_pitch(mut self, pitch: f32) -> Self {
        self.pitch = clamp_finite(pitch, -3.0, 3.0, 1.0);
        self
    }

    /// Set the stereo pan (-1 left, 1 right)
    pub fn with_pan(mut self, pan: f32) -> Self {
        self.pan = clamp_finite(pan, -1.0, 1.0, 0.0);
        self
    }

    /// Set whether the sound loops
    pub fn with_looping(mut self, looping: bool) -> Self {
        self.looping = looping;
        self
    }

    /// Get the sound name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get the clip handle
    pub fn clip(&self) -> &ClipHandle {
        &self.clip
    }

    /// Get the priority
    pub fn priority(&self) -> u16 {
        self.priority
    }

    /// Get the volume
    pub fn volume(&self) -> f32 {
        self.volume
    }

    /// Get the pitch multiplier
    pub fn pitch(&self) -> f32 {
        self.pitch
    }

    /// Get the stereo pan
    pub fn pan(&self) -> f32 {
        self.pan
    }

    /// Check if the sound loops
    pub fn looping(&self) -> bool {
        self.looping
    }
}

impl Default for Sound {
    fn default() -> Self {
        Self {
            name: String::new(),
            clip: ClipHandle::default(),
            priority: DEFAULT_PRIORITY,
            volume: 1.0,
            pitch: 1.0,
            pan: 0.0,
            looping: false,
        }
    }
}

fn clamp_finite(value: f32, min: f32, max: f32, fallback: f32) -> f32 {
    if value.is_finite() {
        value.clamp(min, max)
    } else {
        fallback
    }
}
