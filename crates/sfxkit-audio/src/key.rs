//! Combined `Track_Sound` keys

use crate::{SfxError, SfxResult};

/// Separator between the track and sound parts of a combined key
pub const KEY_DELIMITER: char = '_';

/// Split a combined key at its first delimiter into `(track, sound)`.
///
/// Track names never contain the delimiter, so everything after the first
/// one belongs to the sound name.
pub fn split_key(key: &str) -> SfxResult<(&str, &str)> {
    key.split_once(KEY_DELIMITER)
        .ok_or_else(|| SfxError::InvalidKeyFormat(key.to_owned()))
}

/// Build the combined key for a track/sound pair
pub fn join_key(track: &str, sound: &str) -> String {
    let mut key = String::with_capacity(track.len() + sound.len() + 1);
    key.push_str(track);
    key.push(KEY_DELIMITER);
    key.push_str(sound);
    key
}
