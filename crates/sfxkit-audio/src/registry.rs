//! Sound Registry
//!
//! Owns every track and resolves name-based play requests.
//!
//! Two indexes back the lookups: track name to track, and track name to
//! sound name to sound. Each is built on the first lookup that needs it and
//! kept until a mutation invalidates it. The track list and both indexes sit
//! behind one lock, so a mutation and the invalidation it causes are never
//! observed separately.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use ahash::{AHashMap, AHashSet};
use parking_lot::{Mutex, RwLock};

use crate::backend::AudioBackend;
use crate::key::{join_key, split_key};
use crate::sound::Sound;
use crate::track::Track;
use crate::{SfxError, SfxResult};

type TrackIndex = AHashMap<String, Arc<Track>>;
type SoundIndex = AHashMap<String, AHashMap<String, Sound>>;
type Observer = Arc<dyn Fn(&RegistryEvent) + Send + Sync>;

/// Registry configuration
#[derive(Debug, Clone)]
pub struct RegistryConfig {
    /// Name used to tag diagnostics
    pub name: String,
    /// Report index builds at info level instead of debug
    pub enable_logs: bool,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            name: String::from("SFX Manager"),
            enable_logs: false,
        }
    }
}

/// Change notification delivered to observers
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegistryEvent {
    /// A track was added
    TrackAdded { track: String },
    /// A sound was added to an existing track
    SoundAdded { track: String, sound: String },
}

/// Handle returned by [`Registry::on_change`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ObserverId(u64);

struct RegistryState {
    tracks: Vec<Arc<Track>>,
    track_index: Option<TrackIndex>,
    sound_index: Option<SoundIndex>,
}

impl RegistryState {
    fn invalidate(&mut self) {
        self.track_index = None;
        self.sound_index = None;
    }

    fn contains_track(&self, name: &str) -> bool {
        self.tracks.iter().any(|t| t.name() == name)
    }
}

/// Named tracks of named sounds, played through one audio backend
pub struct Registry {
    config: RegistryConfig,
    backend: Arc<dyn AudioBackend>,
    state: RwLock<RegistryState>,
    observers: Mutex<Vec<(ObserverId, Observer)>>,
    next_observer: AtomicU64,
}

impl Registry {
    /// Create an empty registry
    pub fn new(config: RegistryConfig, backend: Arc<dyn AudioBackend>) -> Self {
        Self {
            config,
            backend,
            state: RwLock::new(RegistryState {
                tracks: Vec::new(),
                track_index: None,
                sound_index: None,
            }),
            observers: Mutex::new(Vec::new()),
            next_observer: AtomicU64::new(1),
        }
    }

    /// Create a registry from a set of tracks, rejecting duplicate track names
    pub fn with_tracks(
        config: RegistryConfig,
        backend: Arc<dyn AudioBackend>,
        tracks: Vec<Track>,
    ) -> SfxResult<Self> {
        let mut seen = AHashSet::with_capacity(tracks.len());
        for track in &tracks {
            if !seen.insert(track.name().to_owned()) {
                return Err(SfxError::DuplicateTrack(track.name().to_owned()));
            }
        }

        let registry = Self::new(config, backend);
        registry.state.write().tracks = tracks.into_iter().map(Arc::new).collect();
        Ok(registry)
    }

    /// Get the registry name
    pub fn name(&self) -> &str {
        &self.config.name
    }

    /// Get the registry configuration
    pub fn config(&self) -> &RegistryConfig {
        &self.config
    }

    /// Get the audio backend
    pub fn backend(&self) -> &Arc<dyn AudioBackend> {
        &self.backend
    }

    /// Copy of the track list.
    ///
    /// Every call returns a fresh `Vec`; changing it does not affect the
    /// registry.
    pub fn tracks(&self) -> Vec<Arc<Track>> {
        self.state.read().tracks.clone()
    }

    /// Number of tracks
    pub fn track_count(&self) -> usize {
        self.state.read().tracks.len()
    }

    /// Every combined key, in track then sound declaration order
    pub fn keys(&self) -> Vec<String> {
        let state = self.state.read();
        state
            .tracks
            .iter()
            .flat_map(|track| {
                track
                    .sounds()
                    .into_iter()
                    .map(|sound| join_key(track.name(), sound.name()))
                    .collect::<Vec<_>>()
            })
            .collect()
    }

    /// Play a sound from a track.
    ///
    /// A lookup miss is logged and returned as `TrackNotFound` or
    /// `SoundNotFound`; nothing is played.
    pub fn play(&self, track_name: &str, sound_name: &str) -> SfxResult<()> {
        let sound = self
            .find_sound(track_name, sound_name)
            .inspect_err(|err| self.report_miss(err))?;
        let track = self
            .find_track(track_name)
            .inspect_err(|err| self.report_miss(err))?;

        track.play_sound(&sound, self.backend.as_ref())
    }

    /// Play a sound addressed by a combined `Track_Sound` key
    pub fn play_key(&self, key: &str) -> SfxResult<()> {
        let (track_name, sound_name) = split_key(key)?;
        self.play(track_name, sound_name)
    }

    /// Play a sound, reporting failure through the return value only
    pub fn try_play(&self, track_name: &str, sound_name: &str) -> bool {
        match self.play(track_name, sound_name) {
            Ok(()) => true,
            Err(SfxError::TrackNotFound(_) | SfxError::SoundNotFound { .. }) => false,
            Err(err) => {
                self.report_miss(&err);
                false
            }
        }
    }

    /// Play a sound by combined key, reporting failure through the return value only
    pub fn try_play_key(&self, key: &str) -> bool {
        match split_key(key) {
            Ok((track_name, sound_name)) => self.try_play(track_name, sound_name),
            Err(err) => {
                self.report_miss(&err);
                false
            }
        }
    }

    /// Get a sound from a track
    pub fn get_sound_by_name(&self, track_name: &str, sound_name: &str) -> SfxResult<Sound> {
        self.find_sound(track_name, sound_name)
    }

    /// Get a sound from a track, logging a diagnostic when it is missing
    pub fn try_get_sound_by_name(&self, track_name: &str, sound_name: &str) -> Option<Sound> {
        self.find_sound(track_name, sound_name)
            .inspect_err(|err| self.report_miss(err))
            .ok()
    }

    /// Get a track
    pub fn get_track(&self, track_name: &str) -> SfxResult<Arc<Track>> {
        self.find_track(track_name)
    }

    /// Get a track, logging a diagnostic when it is missing
    pub fn try_get_track(&self, track_name: &str) -> Option<Arc<Track>> {
        self.find_track(track_name)
            .inspect_err(|err| self.report_miss(err))
            .ok()
    }

    /// Add a track. A track with the same name already registered is an error.
    pub fn add_track(&self, track: Track) -> SfxResult<Arc<Track>> {
        let track = Arc::new(track);
        {
            let mut state = self.state.write();
            if state.contains_track(track.name()) {
                return Err(SfxError::DuplicateTrack(track.name().to_owned()));
            }
            state.tracks.push(Arc::clone(&track));
            state.invalidate();
        }

        self.notify(&RegistryEvent::TrackAdded {
            track: track.name().to_owned(),
        });
        Ok(track)
    }

    /// Add a sound to an existing track
    pub fn add_sound(&self, sound: Sound, track_name: &str) -> SfxResult<()> {
        let sound_name = sound.name().to_owned();
        {
            let mut state = self.state.write();
            let track = state
                .tracks
                .iter()
                .find(|t| t.name() == track_name)
                .cloned()
                .ok_or_else(|| SfxError::TrackNotFound(track_name.to_owned()))?;
            track.insert_sound(sound)?;
            state.sound_index = None;
        }

        self.notify(&RegistryEvent::SoundAdded {
            track: track_name.to_owned(),
            sound: sound_name,
        });
        Ok(())
    }

    /// Add a new track holding `sound`.
    ///
    /// Either both are added or, on error, the registry is left untouched.
    pub fn add_sound_to_new_track(&self, sound: Sound, track: Track) -> SfxResult<Arc<Track>> {
        let sound_name = sound.name().to_owned();
        let track = self.add_track(track.with_sound(sound)?)?;

        self.notify(&RegistryEvent::SoundAdded {
            track: track.name().to_owned(),
            sound: sound_name,
        });
        Ok(track)
    }

    /// Build both indexes now instead of on first lookup
    pub fn build_indexes(&self) {
        self.with_track_index(|_| ());
        self.with_sound_index(|_| ());
    }

    /// Drop both indexes; they are rebuilt on the next lookup
    pub fn invalidate_indexes(&self) {
        self.state.write().invalidate();
    }

    /// Check if the track index is built
    pub fn is_track_index_built(&self) -> bool {
        self.state.read().track_index.is_some()
    }

    /// Check if the sound index is built
    pub fn is_sound_index_built(&self) -> bool {
        self.state.read().sound_index.is_some()
    }

    /// Register a callback invoked after every change to the registry.
    ///
    /// Callbacks run on the mutating thread with no registry lock held.
    pub fn on_change<F>(&self, callback: F) -> ObserverId
    where
        F: Fn(&RegistryEvent) + Send + Sync + 'static,
    {
        let id = ObserverId(self.next_observer.fetch_add(1, Ordering::Relaxed));
        self.observers.lock().push((id, Arc::new(callback)));
        id
    }

    /// Remove a change callback. Returns false if it was not registered.
    pub fn remove_observer(&self, id: ObserverId) -> bool {
        let mut observers = self.observers.lock();
        let before = observers.len();
        observers.retain(|(observer_id, _)| *observer_id != id);
        observers.len() != before
    }

    fn find_sound(&self, track_name: &str, sound_name: &str) -> SfxResult<Sound> {
        self.with_sound_index(|index| {
            let sounds = index
                .get(track_name)
                .ok_or_else(|| SfxError::TrackNotFound(track_name.to_owned()))?;
            sounds
                .get(sound_name)
                .cloned()
                .ok_or_else(|| SfxError::SoundNotFound {
                    track: track_name.to_owned(),
                    sound: sound_name.to_owned(),
                })
        })
    }

    fn find_track(&self, track_name: &str) -> SfxResult<Arc<Track>> {
        self.with_track_index(|index| {
            index
                .get(track_name)
                .cloned()
                .ok_or_else(|| SfxError::TrackNotFound(track_name.to_owned()))
        })
    }

    fn with_track_index<R>(&self, f: impl FnOnce(&TrackIndex) -> R) -> R {
        {
            let state = self.state.read();
            if let Some(index) = &state.track_index {
                return f(index);
            }
        }

        // Another thread may have built it between the two locks
        let mut guard = self.state.write();
        let state = &mut *guard;
        let index = state
            .track_index
            .get_or_insert_with(|| self.build_track_index(&state.tracks));
        f(index)
    }

    fn with_sound_index<R>(&self, f: impl FnOnce(&SoundIndex) -> R) -> R {
        {
            let state = self.state.read();
            if let Some(index) = &state.sound_index {
                return f(index);
            }
        }

        let mut guard = self.state.write();
        let state = &mut *guard;
        let index = state
            .sound_index
            .get_or_insert_with(|| self.build_sound_index(&state.tracks));
        f(index)
    }

    fn build_track_index(&self, tracks: &[Arc<Track>]) -> TrackIndex {
        let index: TrackIndex = tracks
            .iter()
            .map(|track| (track.name().to_owned(), Arc::clone(track)))
            .collect();
        self.log_index_built("track", index.len());
        index
    }

    fn build_sound_index(&self, tracks: &[Arc<Track>]) -> SoundIndex {
        let index: SoundIndex = tracks
            .iter()
            .map(|track| {
                let sounds = track
                    .sounds()
                    .into_iter()
                    .map(|sound| (sound.name().to_owned(), sound))
                    .collect();
                (track.name().to_owned(), sounds)
            })
            .collect();
        self.log_index_built("sound", index.values().map(|sounds| sounds.len()).sum());
        index
    }

    fn log_index_built(&self, kind: &str, entries: usize) {
        let level = if self.config.enable_logs {
            log::Level::Info
        } else {
            log::Level::Debug
        };
        log::log!(
            level,
            "[sfx] {}'s {} index generated ({} entries)",
            self.config.name,
            kind,
            entries
        );
    }

    fn report_miss(&self, err: &SfxError) {
        log::warn!("[sfx] {} on '{}'", err, self.config.name);
    }

    fn notify(&self, event: &RegistryEvent) {
        let observers: Vec<Observer> = self
            .observers
            .lock()
            .iter()
            .map(|(_, observer)| Arc::clone(observer))
            .collect();

        for observer in observers {
            observer(event);
        }
    }
}

impl std::fmt::Debug for Registry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.state.read();
        f.debug_struct("Registry")
            .field("config", &self.config)
            .field("tracks", &state.tracks)
            .field("track_index_built", &state.track_index.is_some())
            .field("sound_index_built", &state.sound_index.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sound::ClipHandle;
    use crate::testing::RecordingBackend;

    fn ui_registry() -> (Registry, RecordingBackend) {
        let backend = RecordingBackend::new();
        let ui = Track::new("UI", Some(String::from("SFX")))
            .unwrap()
            .with_sound(
                Sound::new("Click", ClipHandle::new("ui/click.wav"))
                    .with_volume(0.8)
                    .with_pitch(1.0),
            )
            .unwrap()
            .with_sound(Sound::new("Hover", ClipHandle::new("ui/hover.wav")).with_volume(0.4))
            .unwrap();
        let music = Track::new("Music", Some(String::from("Music")))
            .unwrap()
            .with_sound(
                Sound::new("Boss_Theme", ClipHandle::new("music/boss.ogg")).with_looping(true),
            )
            .unwrap();

        let registry = Registry::with_tracks(
            RegistryConfig::default(),
            Arc::new(backend.clone()),
            vec![ui, music],
        )
        .unwrap();
        (registry, backend)
    }

    #[test]
    fn test_play_key_configures_voice() {
        let (registry, backend) = ui_registry();

        registry.play_key("UI_Click").unwrap();

        let settings = backend.last_settings("UI").unwrap();
        assert_eq!(settings.volume, 0.8);
        assert_eq!(settings.pitch, 1.0);
        assert_eq!(settings.clip, ClipHandle::new("ui/click.wav"));
        assert_eq!(settings.output_bus.as_deref(), Some("SFX"));
        assert_eq!(backend.starts("UI"), 1);
    }

    #[test]
    fn test_play_key_matches_play() {
        let (by_key, key_backend) = ui_registry();
        let (by_pair, pair_backend) = ui_registry();

        for (track, sound) in [("UI", "Click"), ("UI", "Hover"), ("Music", "Boss_Theme")] {
            by_key.play_key(&join_key(track, sound)).unwrap();
            by_pair.play(track, sound).unwrap();

            assert_eq!(
                key_backend.last_settings(track),
                pair_backend.last_settings(track)
            );
        }
        assert_eq!(key_backend.voices_created(), pair_backend.voices_created());
    }

    #[test]
    fn test_play_missing_sound() {
        let (registry, backend) = ui_registry();

        let result = registry.play("UI", "Missing");
        assert!(matches!(result, Err(SfxError::SoundNotFound { .. })));
        assert!(!registry.try_play("UI", "Missing"));
        assert_eq!(backend.voices_created(), 0);
    }

    #[test]
    fn test_play_missing_track() {
        let (registry, backend) = ui_registry();

        assert!(matches!(
            registry.play_key("NoTrack_Click"),
            Err(SfxError::TrackNotFound(name)) if name == "NoTrack"
        ));
        assert!(!registry.try_play_key("NoTrack_Click"));
        assert_eq!(backend.voices_created(), 0);
    }

    #[test]
    fn test_play_malformed_key() {
        let (registry, _) = ui_registry();

        assert!(matches!(
            registry.play_key("malformed"),
            Err(SfxError::InvalidKeyFormat(_))
        ));
        assert!(!registry.try_play_key("malformed"));
    }

    #[test]
    fn test_voice_reused_across_plays() {
        let (registry, backend) = ui_registry();

        registry.play("UI", "Click").unwrap();
        registry.play("UI", "Hover").unwrap();

        assert_eq!(backend.voices_created(), 1);
        assert_eq!(backend.starts("UI"), 2);
        let settings = backend.last_settings("UI").unwrap();
        assert_eq!(settings.volume, 0.4);
        assert_eq!(settings.clip, ClipHandle::new("ui/hover.wav"));

        registry.play_key("Music_Boss_Theme").unwrap();
        assert_eq!(backend.voices_created(), 2);
        assert!(backend.last_settings("Music").unwrap().looping);
    }

    #[test]
    fn test_try_get_never_errors() {
        let (registry, _) = ui_registry();

        assert!(registry.try_get_sound_by_name("", "").is_none());
        assert!(registry.try_get_sound_by_name("UI", "").is_none());
        assert!(registry.try_get_sound_by_name("Nope", "Click").is_none());
        assert!(registry.try_get_track("").is_none());

        let sound = registry.try_get_sound_by_name("UI", "Click").unwrap();
        assert_eq!(sound.volume(), 0.8);
        assert_eq!(registry.try_get_track("UI").unwrap().name(), "UI");
    }

    #[test]
    fn test_get_signals_not_found() {
        let (registry, _) = ui_registry();

        assert!(matches!(
            registry.get_sound_by_name("Nope", "Click"),
            Err(SfxError::TrackNotFound(_))
        ));
        match registry.get_sound_by_name("UI", "Nope") {
            Err(SfxError::SoundNotFound { track, sound }) => {
                assert_eq!(track, "UI");
                assert_eq!(sound, "Nope");
            }
            other => panic!("Expected SoundNotFound, got {other:?}"),
        }
        assert!(matches!(
            registry.get_track("Nope"),
            Err(SfxError::TrackNotFound(_))
        ));
        assert_eq!(registry.get_track("Music").unwrap().sound_count(), 1);
    }

    #[test]
    fn test_tracks_returns_independent_copies() {
        let (registry, _) = ui_registry();

        let mut first = registry.tracks();
        let second = registry.tracks();
        first.clear();

        assert_eq!(second.len(), 2);
        assert_eq!(registry.track_count(), 2);
        assert!(registry.get_track("UI").is_ok());
    }

    #[test]
    fn test_indexes_built_lazily() {
        let (registry, _) = ui_registry();
        assert!(!registry.is_track_index_built());
        assert!(!registry.is_sound_index_built());

        registry.get_sound_by_name("UI", "Click").unwrap();
        assert!(registry.is_sound_index_built());
        assert!(!registry.is_track_index_built());

        registry.get_track("UI").unwrap();
        assert!(registry.is_track_index_built());
    }

    #[test]
    fn test_build_indexes_idempotent() {
        let (registry, _) = ui_registry();

        registry.build_indexes();
        let first_len = registry.state.read().sound_index.as_ref().unwrap().len();
        let first = registry.get_sound_by_name("UI", "Click").unwrap();

        registry.build_indexes();
        let state = registry.state.read();
        let index = state.sound_index.as_ref().unwrap();
        assert_eq!(index.len(), first_len);
        assert_eq!(index["UI"].len(), 2);
        assert_eq!(index["UI"]["Click"], first);
        assert_eq!(state.track_index.as_ref().unwrap().len(), 2);
    }

    #[test]
    fn test_duplicate_tracks_rejected() {
        let tracks = vec![
            Track::new("UI", None).unwrap(),
            Track::new("UI", None).unwrap(),
        ];
        let result = Registry::with_tracks(
            RegistryConfig::default(),
            Arc::new(RecordingBackend::new()),
            tracks,
        );
        assert!(matches!(result, Err(SfxError::DuplicateTrack(_))));

        let (registry, _) = ui_registry();
        assert!(matches!(
            registry.add_track(Track::new("UI", None).unwrap()),
            Err(SfxError::DuplicateTrack(name)) if name == "UI"
        ));
        assert_eq!(registry.track_count(), 2);
    }

    #[test]
    fn test_add_track_invalidates_indexes() {
        let (registry, backend) = ui_registry();
        registry.build_indexes();

        let ambience = Track::new("Ambience", None)
            .unwrap()
            .with_sound(Sound::new("Wind", ClipHandle::new("amb/wind.ogg")))
            .unwrap();
        registry.add_track(ambience).unwrap();

        assert!(!registry.is_sound_index_built());
        assert!(!registry.is_track_index_built());
        assert_eq!(registry.track_count(), 3);

        registry.play_key("Ambience_Wind").unwrap();
        assert_eq!(backend.starts("Ambience"), 1);
    }

    #[test]
    fn test_add_sound_to_existing_track() {
        let (registry, backend) = ui_registry();
        registry.build_indexes();

        registry
            .add_sound(Sound::new("Back", ClipHandle::new("ui/back.wav")), "UI")
            .unwrap();

        assert!(!registry.is_sound_index_built());
        assert_eq!(registry.get_track("UI").unwrap().sound_count(), 3);
        registry.play("UI", "Back").unwrap();
        assert_eq!(
            backend.last_settings("UI").unwrap().clip,
            ClipHandle::new("ui/back.wav")
        );
        assert!(registry.keys().contains(&String::from("UI_Back")));
    }

    #[test]
    fn test_add_sound_errors() {
        let (registry, _) = ui_registry();

        assert!(matches!(
            registry.add_sound(Sound::new("Back", ClipHandle::new("ui/back.wav")), "Nope"),
            Err(SfxError::TrackNotFound(_))
        ));
        assert!(matches!(
            registry.add_sound(Sound::new("Click", ClipHandle::new("other.wav")), "UI"),
            Err(SfxError::DuplicateSound { .. })
        ));
        assert_eq!(registry.get_track("UI").unwrap().sound_count(), 2);
    }

    #[test]
    fn test_add_sound_to_new_track() {
        let (registry, _) = ui_registry();

        let track = registry
            .add_sound_to_new_track(
                Sound::new("Shout", ClipHandle::new("vo/shout.wav")),
                Track::new("Voice", None).unwrap(),
            )
            .unwrap();
        assert_eq!(track.sound_count(), 1);
        assert!(registry.get_sound_by_name("Voice", "Shout").is_ok());

        let result = registry.add_sound_to_new_track(
            Sound::new("Tap", ClipHandle::new("ui/tap.wav")),
            Track::new("UI", None).unwrap(),
        );
        assert!(matches!(result, Err(SfxError::DuplicateTrack(_))));
        assert!(registry.get_sound_by_name("UI", "Tap").is_err());
        assert_eq!(registry.track_count(), 3);
    }

    #[test]
    fn test_keys() {
        let (registry, _) = ui_registry();
        assert_eq!(
            registry.keys(),
            vec!["UI_Click", "UI_Hover", "Music_Boss_Theme"]
        );
    }

    #[test]
    fn test_observers() {
        let (registry, _) = ui_registry();
        let events = Arc::new(Mutex::new(Vec::new()));

        let sink = Arc::clone(&events);
        let id = registry.on_change(move |event| sink.lock().push(event.clone()));

        registry.add_track(Track::new("Voice", None).unwrap()).unwrap();
        registry
            .add_sound(Sound::new("Shout", ClipHandle::new("vo/shout.wav")), "Voice")
            .unwrap();

        assert_eq!(
            *events.lock(),
            vec![
                RegistryEvent::TrackAdded { track: String::from("Voice") },
                RegistryEvent::SoundAdded {
                    track: String::from("Voice"),
                    sound: String::from("Shout"),
                },
            ]
        );

        assert!(registry.remove_observer(id));
        assert!(!registry.remove_observer(id));
        registry.add_track(Track::new("Ambience", None).unwrap()).unwrap();
        assert_eq!(events.lock().len(), 2);
    }

    #[test]
    fn test_backend_error_propagates() {
        let track = Track::new("UI", None)
            .unwrap()
            .with_sound(Sound::new("Click", ClipHandle::new("ui/click.wav")))
            .unwrap();
        let registry = Registry::with_tracks(
            RegistryConfig::default(),
            Arc::new(RecordingBackend::failing()),
            vec![track],
        )
        .unwrap();

        assert!(matches!(
            registry.play("UI", "Click"),
            Err(SfxError::Backend(_))
        ));
        assert!(!registry.try_play("UI", "Click"));
    }

    #[test]
    fn test_concurrent_plays_share_one_voice() {
        let (registry, backend) = ui_registry();
        let registry = Arc::new(registry);

        let handles: Vec<_> = (0..8)
            .map(|i| {
                let registry = Arc::clone(&registry);
                std::thread::spawn(move || {
                    let sound = if i % 2 == 0 { "Click" } else { "Hover" };
                    for _ in 0..50 {
                        registry.play("UI", sound).unwrap();
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(backend.voices_created(), 1);
        assert_eq!(backend.starts("UI"), 400);
    }
}
