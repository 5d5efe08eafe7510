//! Rejected playback transitions.

use std::fmt;

/// Why a playback transition was rejected. State is left untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
#[allow(clippy::module_name_repetitions)]
pub enum PlaybackError {
    /// No provider with this ID is registered.
    UnknownProvider(String),
    /// Season or episode selection on a movie.
    NotASeries,
    /// Season outside `1..=season_count`.
    SeasonOutOfRange {
        /// Requested season.
        season: u32,
        /// Number of seasons the series has.
        season_count: u32,
    },
    /// Episode absent from the loaded list of the current season.
    EpisodeNotListed {
        /// Current season.
        season: u32,
        /// Requested episode.
        episode: u32,
    },
    /// Episode number zero.
    ZeroEpisode,
}

impl fmt::Display for PlaybackError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownProvider(id) => write!(f, "unknown provider: {id}"),
            Self::NotASeries => write!(f, "seasons and episodes only apply to series"),
            Self::SeasonOutOfRange {
                season,
                season_count,
            } => write!(f, "season {season} is out of range (1..={season_count})"),
            Self::EpisodeNotListed { season, episode } => {
                write!(f, "episode {episode} is not listed for season {season}")
            }
            Self::ZeroEpisode => write!(f, "episode numbers start at 1"),
        }
    }
}

impl std::error::Error for PlaybackError {}
