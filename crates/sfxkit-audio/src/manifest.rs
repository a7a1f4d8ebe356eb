//! Registry Manifests
//!
//! JSON description of a registry: its name, logging flag, and tracks with
//! their sounds. Loading a manifest runs the same validation as building the
//! registry by hand.

use std::path::Path;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::SfxResult;
use crate::backend::AudioBackend;
use crate::registry::{Registry, RegistryConfig};
use crate::sound::{ClipHandle, DEFAULT_PRIORITY, Sound};
use crate::track::Track;

/// Top-level manifest
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Manifest {
    /// Registry name
    #[serde(default = "default_name")]
    pub name: String,
    /// Report index builds at info level
    #[serde(default)]
    pub enable_logs: bool,
    /// Tracks in declaration order
    #[serde(default)]
    pub tracks: Vec<TrackDef>,
}

/// Track entry in a manifest
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrackDef {
    /// Track name, without `_`
    pub name: String,
    /// Output bus the track routes to
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output_bus: Option<String>,
    /// Sounds in declaration order
    #[serde(default)]
    pub sounds: Vec<SoundDef>,
}

/// Sound entry in a manifest
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SoundDef {
    /// Sound name, unique within its track
    pub name: String,
    /// Backend key of the clip
    pub clip: ClipHandle,
    /// Priority (0 is highest, up to 256)
    #[serde(default = "default_priority")]
    pub priority: u16,
    /// Volume (0.0 to 1.0)
    #[serde(default = "one")]
    pub volume: f32,
    /// Pitch multiplier (-3.0 to 3.0)
    #[serde(default = "one")]
    pub pitch: f32,
    /// Stereo pan (-1.0 to 1.0)
    #[serde(default)]
    pub pan: f32,
    /// Whether the sound loops
    #[serde(default)]
    pub looping: bool,
}

fn default_name() -> String {
    RegistryConfig::default().name
}

fn default_priority() -> u16 {
    DEFAULT_PRIORITY
}

fn one() -> f32 {
    1.0
}

impl Manifest {
    /// Parse a manifest from JSON text
    pub fn from_json(json: &str) -> SfxResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load a manifest from a JSON file
    pub fn load(path: impl AsRef<Path>) -> SfxResult<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Serialize to pretty-printed JSON
    pub fn to_json_pretty(&self) -> SfxResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Registry configuration described by this manifest
    pub fn config(&self) -> RegistryConfig {
        RegistryConfig {
            name: self.name.clone(),
            enable_logs: self.enable_logs,
        }
    }

    /// Build a registry playing through `backend`
    pub fn into_registry(self, backend: Arc<dyn AudioBackend>) -> SfxResult<Registry> {
        let config = self.config();
        let tracks = self
            .tracks
            .into_iter()
            .map(TrackDef::into_track)
            .collect::<SfxResult<Vec<_>>>()?;

        log::debug!(
            "[sfx] loaded manifest '{}' with {} tracks",
            config.name,
            tracks.len()
        );
        Registry::with_tracks(config, backend, tracks)
    }

    /// Starter manifest
    pub fn sample() -> Self {
        Self {
            name: String::from("Game SFX"),
            enable_logs: true,
            tracks: vec![
                TrackDef {
                    name: String::from("UI"),
                    output_bus: Some(String::from("SFX")),
                    sounds: vec![
                        SoundDef::new("Click", "ui/click.wav").volume(0.8),
                        SoundDef::new("Hover", "ui/hover.wav").volume(0.4).pitch(1.2),
                    ],
                },
                TrackDef {
                    name: String::from("Music"),
                    output_bus: Some(String::from("Music")),
                    sounds: vec![SoundDef::new("MainTheme", "music/main_theme.ogg").looping()],
                },
            ],
        }
    }
}

impl TrackDef {
    /// Validate and convert into a track
    pub fn into_track(self) -> SfxResult<Track> {
        let mut track = Track::new(self.name, self.output_bus)?;
        for sound in self.sounds {
            track = track.with_sound(sound.into_sound())?;
        }
        Ok(track)
    }
}

impl SoundDef {
    fn new(name: &str, clip: &str) -> Self {
        Self {
            name: name.to_owned(),
            clip: ClipHandle::new(clip),
            priority: DEFAULT_PRIORITY,
            volume: 1.0,
            pitch: 1.0,
            pan: 0.0,
            looping: false,
        }
    }

    fn volume(mut self, volume: f32) -> Self {
        self.volume = volume;
        self
    }

    fn pitch(mut self, pitch: f32) -> Self {
        self.pitch = pitch;
        self
    }

    fn looping(mut self) -> Self {
        self.looping = true;
        self
    }

    /// Convert into a sound, clamping parameters into range
    pub fn into_sound(self) -> Sound {
        Sound::new(self.name, self.clip)
            .with_priority(self.priority)
            .with_volume(self.volume)
            .with_pitch(self.pitch)
            .with_pan(self.pan)
            .with_looping(self.looping)
    }
}
