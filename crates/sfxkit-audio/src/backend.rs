//! Audio Backend
//!
//! The narrow seam between the registry and whatever actually produces
//! sound. A backend hands out voices; a voice is configured from
//! [`VoiceSettings`] and started.

use std::sync::atomic::{AtomicUsize, Ordering};

use crate::SfxResult;
use crate::sound::{ClipHandle, Sound};

/// Everything a track applies to its voice before starting playback
#[derive(Debug, Clone, PartialEq)]
pub struct VoiceSettings {
    /// Output bus (mixer group) the voice routes to
    pub output_bus: Option<String>,
    /// Clip to play
    pub clip: ClipHandle,
    /// Priority (0 is highest)
    pub priority: u16,
    /// Volume (0.0 to 1.0)
    pub volume: f32,
    /// Pitch multiplier
    pub pitch: f32,
    /// Whether the voice loops
    pub looping: bool,
    /// Stereo pan (-1.0 to 1.0)
    pub pan: f32,
}

impl VoiceSettings {
    /// Build the settings for playing `sound` on a track routed to `output_bus`
    pub fn from_sound(sound: &Sound, output_bus: Option<&str>) -> Self {
        Self {
            output_bus: output_bus.map(str::to_owned),
            clip: sound.clip().clone(),
            priority: sound.priority(),
            volume: sound.volume(),
            pitch: sound.pitch(),
            looping: sound.looping(),
            pan: sound.pan(),
        }
    }
}

/// A single playback resource.
///
/// Starting a voice that is already playing replaces whatever it was
/// playing.
pub trait Voice: Send {
    /// Apply routing, clip and per-play parameters
    fn apply(&mut self, settings: &VoiceSettings);

    /// Start playback with the last applied settings
    fn start(&mut self) -> SfxResult<()>;
}

/// Source of voices
pub trait AudioBackend: Send + Sync {
    /// Create the voice a track will own for the rest of its life
    fn create_voice(&self, track_name: &str) -> SfxResult<Box<dyn Voice>>;
}

/// Backend that produces no output and only logs voice activity
#[derive(Debug, Default)]
pub struct NullBackend {
    voices_created: AtomicUsize,
}

impl NullBackend {
    /// Create a new null backend
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of voices handed out so far
    pub fn voices_created(&self) -> usize {
        self.voices_created.load(Ordering::Relaxed)
    }
}

impl AudioBackend for NullBackend {
    fn create_voice(&self, track_name: &str) -> SfxResult<Box<dyn Voice>> {
        self.voices_created.fetch_add(1, Ordering::Relaxed);
        Ok(Box::new(NullVoice {
            label: format!("[sfx] {track_name} track"),
            settings: None,
        }))
    }
}

/// Voice created by [`NullBackend`]
#[derive(Debug)]
struct NullVoice {
    label: String,
    settings: Option<VoiceSettings>,
}

impl Voice for NullVoice {
    fn apply(&mut self, settings: &VoiceSettings) {
        self.settings = Some(settings.clone());
    }

    fn start(&mut self) -> SfxResult<()> {
        match &self.settings {
            Some(settings) => log::trace!(
                "{}: playing '{}' (bus {:?}, volume {}, pitch {}, pan {}, loop {})",
                self.label,
                settings.clip,
                settings.output_bus,
                settings.volume,
                settings.pitch,
                settings.pan,
                settings.looping,
            ),
            None => log::trace!("{}: started with no clip", self.label),
        }
        Ok(())
    }
}
