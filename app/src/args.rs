use std::path::PathBuf;

use clap::{
    ArgAction,
    Parser,
};
use log::LevelFilter;

/// Convert a Last.fm scrobble export into a `ListenBrainz` import archive
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub(crate) struct Args {
    /// JSON file exported from Last.fm
    #[arg(default_value = "scrobbles.json")]
    pub input: PathBuf,

    /// Where to write the converted listens, one JSON object per line
    #[arg(short, long, default_value = "listenbrainz_listens.jsonl")]
    pub output: PathBuf,

    /// Where to create the zip archive to upload to ListenBrainz
    #[arg(short = 'z', long, default_value = "listenbrainz_import.zip")]
    pub archive: PathBuf,

    /// Log more details to stderr; repeat for more
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

impl Args {
    pub fn log_level(&self) -> LevelFilter {
        match self.verbose {
            0 => LevelFilter::Warn,
            1 => LevelFilter::Info,
            2 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        }
    }
}
