//! Tracks
//!
//! A track groups sounds that share one output route and one voice. The
//! voice is created on the first play and reused for every play after it,
//! so a track never plays more than one sound at a time.

use parking_lot::{Mutex, RwLock};

use crate::backend::{AudioBackend, Voice, VoiceSettings};
use crate::key::KEY_DELIMITER;
use crate::sound::Sound;
use crate::{SfxError, SfxResult};

/// Named group of sounds sharing one voice
pub struct Track {
    name: String,
    output_bus: Option<String>,
    sounds: RwLock<Vec<Sound>>,
    voice: Mutex<Option<Box<dyn Voice>>>,
}

impl Track {
    /// Create an empty track.
    ///
    /// Names must be non-empty and may not contain the key delimiter `_`.
    pub fn new(name: impl Into<String>, output_bus: Option<String>) -> SfxResult<Self> {
        let name = name.into();
        if name.is_empty() {
            return Err(SfxError::InvalidName(String::from("track name is empty")));
        }
        if name.contains(KEY_DELIMITER) {
            return Err(SfxError::InvalidName(format!(
                "track name '{name}' contains '{KEY_DELIMITER}'"
            )));
        }

        Ok(Self {
            name,
            output_bus,
            sounds: RwLock::new(Vec::new()),
            voice: Mutex::new(None),
        })
    }

    /// Add a sound while building the track
    pub fn with_sound(self, sound: Sound) -> SfxResult<Self> {
        self.insert_sound(sound)?;
        Ok(self)
    }

    /// Get the track name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get the output bus this track routes to
    pub fn output_bus(&self) -> Option<&str> {
        self.output_bus.as_deref()
    }

    /// Snapshot of the sounds in declaration order
    pub fn sounds(&self) -> Vec<Sound> {
        self.sounds.read().clone()
    }

    /// Get a sound by name
    pub fn sound(&self, name: &str) -> Option<Sound> {
        self.sounds.read().iter().find(|s| s.name() == name).cloned()
    }

    /// Number of sounds on this track
    pub fn sound_count(&self) -> usize {
        self.sounds.read().len()
    }

    /// Check if the voice has been created yet
    pub fn has_voice(&self) -> bool {
        self.voice.lock().is_some()
    }

    /// Play a sound on this track's voice, creating the voice on first use.
    ///
    /// Whatever the voice was playing is replaced.
    pub fn play_sound(&self, sound: &Sound, backend: &dyn AudioBackend) -> SfxResult<()> {
        let settings = VoiceSettings::from_sound(sound, self.output_bus());

        let mut slot = self.voice.lock();
        let voice = match slot.take() {
            Some(voice) => voice,
            None => {
                log::debug!("[sfx] creating voice for track '{}'", self.name);
                backend.create_voice(&self.name)?
            }
        };
        let voice = slot.insert(voice);

        voice.apply(&settings);
        voice.start()
    }

    /// Append a sound, rejecting empty and duplicate names
    pub(crate) fn insert_sound(&self, sound: Sound) -> SfxResult<()> {
        if sound.name().is_empty() {
            return Err(SfxError::InvalidName(format!(
                "sound name on track '{}' is empty",
                self.name
            )));
        }

        let mut sounds = self.sounds.write();
        if sounds.iter().any(|s| s.name() == sound.name()) {
            return Err(SfxError::DuplicateSound {
                track: self.name.clone(),
                sound: sound.name().to_owned(),
            });
        }
        sounds.push(sound);
        Ok(())
    }
}

impl std::fmt::Debug for Track {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Track")
            .field("name", &self.name)
            .field("output_bus", &self.output_bus)
            .field("sounds", &*self.sounds.read())
            .field("has_voice", &self.has_voice())
            .finish()
    }
}
