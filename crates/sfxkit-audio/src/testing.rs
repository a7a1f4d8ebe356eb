//! Recording backend used by the unit tests

use std::sync::Arc;

use ahash::AHashMap;
use parking_lot::Mutex;

use crate::backend::{AudioBackend, Voice, VoiceSettings};
use crate::{SfxError, SfxResult};

#[derive(Debug, Default)]
struct VoiceLog {
    settings: Option<VoiceSettings>,
    starts: usize,
}

#[derive(Debug, Default)]
struct Journal {
    voices_created: usize,
    voices: AHashMap<String, VoiceLog>,
}

/// Backend that records every voice it creates and everything applied to it
#[derive(Debug, Clone, Default)]
pub(crate) struct RecordingBackend {
    journal: Arc<Mutex<Journal>>,
    fail: bool,
}

impl RecordingBackend {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Backend whose voice creation always fails
    pub(crate) fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub(crate) fn voices_created(&self) -> usize {
        self.journal.lock().voices_created
    }

    pub(crate) fn starts(&self, track: &str) -> usize {
        self.journal
            .lock()
            .voices
            .get(track)
            .map_or(0, |log| log.starts)
    }

    pub(crate) fn last_settings(&self, track: &str) -> Option<VoiceSettings> {
        self.journal
            .lock()
            .voices
            .get(track)
            .and_then(|log| log.settings.clone())
    }
}

impl AudioBackend for RecordingBackend {
    fn create_voice(&self, track_name: &str) -> SfxResult<Box<dyn Voice>> {
        if self.fail {
            return Err(SfxError::Backend(String::from("no audio device")));
        }

        let mut journal = self.journal.lock();
        journal.voices_created += 1;
        journal.voices.entry(track_name.to_owned()).or_default();

        Ok(Box::new(RecordingVoice {
            track: track_name.to_owned(),
            journal: Arc::clone(&self.journal),
        }))
    }
}

struct RecordingVoice {
    track: String,
    journal: Arc<Mutex<Journal>>,
}

impl Voice for RecordingVoice {
    fn apply(&mut self, settings: &VoiceSettings) {
        let mut journal = self.journal.lock();
        journal.voices.entry(self.track.clone()).or_default().settings = Some(settings.clone());
    }

    fn start(&mut self) -> SfxResult<()> {
        let mut journal = self.journal.lock();
        journal.voices.entry(self.track.clone()).or_default().starts += 1;
        Ok(())
    }
}
