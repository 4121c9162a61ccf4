use std::{
    fs::File,
    io::{
        BufReader,
        Read,
    },
    path::Path,
};

use anyhow::Result;
pub use lfm_import_core::*;
use log::{
    debug,
    info,
};
use serde_json::Value;

use crate::service::{
    flatten_tracks,
    LastfmListen,
};

mod de;
pub mod export;
pub mod service;


/// Reads a Last.fm scrobble export and converts every eligible track into a listen
///
/// Tracks that can't be imported are skipped and logged at debug level.
///
/// # Errors
///
/// This function will return an error if `rdr` fails or does not contain valid JSON.
pub fn read_scrobbles<R: Read>(rdr: R) -> Result<Vec<LastfmListen>> {
    let payload: Value = serde_json::from_reader(rdr)?;
    let tracks = flatten_tracks(payload);

    let listens: Vec<_> = tracks
        .iter()
        .enumerate()
        .filter_map(|(i, track)| {
            LastfmListen::try_from(track)
                .map_err(|skip| debug!("Skipping track #{i}: {skip}"))
                .ok()
        })
        .collect();

    info!("Converted {} of {} tracks; {} skipped", listens.len(), tracks.len(), tracks.len() - listens.len());
    Ok(listens)
}

/// Attempts to load the scrobble export at `path`
///
/// # Errors
///
/// This function will return an error if the file can't be opened or isn't valid JSON.
pub fn load_scrobbles(path: &Path) -> Result<Vec<LastfmListen>> {
    let rdr = File::open(path).map(BufReader::new)?;
    read_scrobbles(rdr)
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip_count() {
        let sample = r##"{"recenttracks": {"track": [
            {"name":"Song A","artist":"Artist A","album":{"#text":"Album A"},"date":{"uts":"1000"}},
            {"name":"Song B","artist":"Artist B","date":{"uts":"2000"},"@attr":{"nowplaying":"true"}}
        ]}}"##;
        let listens = read_scrobbles(sample.as_bytes()).expect("Failed to read scrobbles");

        assert_eq!(listens.len(), 1);
        assert_eq!(listens[0].listened_at(), 1000);
        assert_eq!(listens[0].track_name(), "Song A");
        assert_eq!(listens[0].artist_name(), "Artist A");
        assert_eq!(listens[0].release_name(), Some("Album A"));
    }

    #[test]
    fn test_unrecognized_shape_is_empty() {
        let listens = read_scrobbles(r#""just a string""#.as_bytes()).expect("Valid JSON should load");
        assert!(listens.is_empty());
    }

    #[test]
    fn test_invalid_json() {
        assert!(read_scrobbles(r#"{"recenttracks": {"track": ["#.as_bytes()).is_err());
        assert!(read_scrobbles("".as_bytes()).is_err());
    }

    #[test]
    fn test_missing_file() {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        assert!(load_scrobbles(&dir.path().join("scrobbles.json")).is_err());
    }
}
