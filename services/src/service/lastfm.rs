use lfm_import_core::ListenData;
use serde_json::{
    Map,
    Value,
};

use crate::de::{
    text_of,
    timestamp_of,
};

/// One entry of a Last.fm track list, kept as raw JSON until converted
pub type TrackRecord = Map<String, Value>;

const RECENT_TRACKS: &str = "recenttracks";
const TRACK: &str = "track";

const ATTR: &str = "@attr";
const NOW_PLAYING: &str = "nowplaying";
const DATE: &str = "date";
const UTS: &str = "uts";
const NAME: &str = "name";
const ARTIST: &str = "artist";
const ALBUM: &str = "album";


/// Flattens the known Last.fm export shapes into a single list of track objects
///
/// - a list: one level of nested lists is flattened
/// - an object: `recenttracks.track`, else `track`, else the object itself
/// - anything else: nothing
///
/// Entries that aren't objects are dropped.
pub fn flatten_tracks(payload: Value) -> Vec<TrackRecord> {
    let items: Vec<Value> = match payload {
        Value::Array(items) => items
            .into_iter()
            .flat_map(|item| match item {
                Value::Array(nested) => nested,
                other => vec![other],
            })
            .collect(),
        Value::Object(mut obj) => {
            if let Some(Value::Object(recent)) = obj.get_mut(RECENT_TRACKS) {
                ensure_vec(recent.remove(TRACK))
            } else if obj.contains_key(TRACK) {
                ensure_vec(obj.remove(TRACK))
            } else {
                vec![Value::Object(obj)]
            }
        },
        Value::Null | Value::Bool(_) | Value::Number(_) | Value::String(_) => Vec::new(),
    };

    items
        .into_iter()
        .filter_map(|item| match item {
            Value::Object(track) => Some(track),
            _ => None,
        })
        .collect()
}

/// A single track object is the same as a list of one
fn ensure_vec(value: Option<Value>) -> Vec<Value> {
    match value {
        None | Some(Value::Null) => Vec::new(),
        Some(Value::Array(items)) => items,
        Some(other) => vec![other],
    }
}


/// Why a track entry was left out of the import
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum Skip {
    #[error("track is currently playing")]
    NowPlaying,
    #[error("no date.uts")]
    MissingTimestamp,
    #[error("date.uts is not an integer timestamp")]
    InvalidTimestamp,
    #[error("missing track name")]
    MissingTrack,
    #[error("missing artist name")]
    MissingArtist,
}


/// A completed scrobble from a Last.fm export
#[cfg_attr(test, derive(PartialEq, Eq))]
#[derive(Debug)]
pub struct LastfmListen {
    listened_at: i64,
    pub track: String,
    pub artist: String,
    pub album: Option<String>,
}

impl TryFrom<&TrackRecord> for LastfmListen {
    type Error = Skip;

    fn try_from(track: &TrackRecord) -> Result<Self, Self::Error> {
        let now_playing = track
            .get(ATTR)
            .and_then(Value::as_object)
            .and_then(|attr| attr.get(NOW_PLAYING))
            .and_then(Value::as_str)
            .is_some_and(|np| np == "true");
        if now_playing {
            return Err(Skip::NowPlaying);
        }

        let uts = track
            .get(DATE)
            .and_then(Value::as_object)
            .and_then(|date| date.get(UTS))
            .ok_or(Skip::MissingTimestamp)?;
        let listened_at = timestamp_of(uts).ok_or(Skip::InvalidTimestamp)?;

        Ok(Self {
            listened_at,
            track: non_empty_text(track.get(NAME)).ok_or(Skip::MissingTrack)?,
            artist: non_empty_text(track.get(ARTIST)).ok_or(Skip::MissingArtist)?,
            album: non_empty_text(track.get(ALBUM)),
        })
    }
}

fn non_empty_text(value: Option<&Value>) -> Option<String> { text_of(value).filter(|s| !s.is_empty()) }

impl ListenData for LastfmListen {
    #[inline]
    fn listened_at(&self) -> i64 { self.listened_at }

    #[inline]
    fn track_name(&self) -> &str { self.track.as_str() }

    #[inline]
    fn artist_name(&self) -> &str { self.artist.as_str() }

    #[inline]
    fn release_name(&self) -> Option<&str> { self.album.as_deref() }
}
