mod lastfm;
pub use lastfm::*;
