//! Season picker of the details view.

use std::ops::RangeInclusive;

use cinehub_api::catalog::Episode;

use super::episodes::{EpisodeListing, EpisodeRefresh, EpisodeShelf};
use super::error::PlaybackError;
use super::target::PlaybackTarget;

/// Where playback starts when entered from the season browser.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EntryPoint {
    /// Season number.
    pub season: u32,
    /// Episode number.
    pub episode: u32,
}

impl Default for EntryPoint {
    fn default() -> Self {
        Self {
            season: 1,
            episode: 1,
        }
    }
}

/// Browses the seasons of one series independently of the player.
#[derive(Debug)]
pub struct SeasonBrowser {
    target: PlaybackTarget,
    shelf: EpisodeShelf,
}

impl SeasonBrowser {
    /// Opens the browser on season 1 and requests its episodes.
    ///
    /// # Errors
    ///
    /// Returns [`PlaybackError::NotASeries`] for movies.
    pub fn open(target: PlaybackTarget) -> Result<(Self, EpisodeRefresh), PlaybackError> {
        target.check_season(1)?;
        let mut shelf = EpisodeShelf::new(target.content_id);
        let refresh = shelf.request(1);
        Ok((Self { target, shelf }, refresh))
    }

    /// Switches season; the previous episode list is dropped.
    ///
    /// # Errors
    ///
    /// Returns an error if `season` is outside the series' range.
    pub fn select_season(&mut self, season: u32) -> Result<EpisodeRefresh, PlaybackError> {
        self.target.check_season(season)?;
        Ok(self.shelf.request(season))
    }

    /// Applies a completed listing. Returns `false` if it is stale.
    pub fn apply(&mut self, listing: EpisodeListing) -> bool {
        self.shelf.apply(listing)
    }

    /// Selectable seasons.
    ///
    /// `None` when the season count is unknown; any season from 1 up is
    /// then accepted by [`Self::select_season`].
    #[must_use]
    pub fn seasons(&self) -> Option<RangeInclusive<u32>> {
        self.target.season_count.map(|count| 1..=count)
    }

    /// Season currently shown.
    #[must_use]
    pub const fn season(&self) -> u32 {
        self.shelf.season()
    }

    /// Episodes of the current season.
    #[must_use]
    pub fn episodes(&self) -> &[Episode] {
        self.shelf.episodes()
    }

    /// Whether the episode list is still loading.
    #[must_use]
    pub const fn is_loading(&self) -> bool {
        self.shelf.is_loading()
    }

    /// The series being browsed.
    #[must_use]
    pub const fn target(&self) -> &PlaybackTarget {
        &self.target
    }

    /// Entry point for playing `episode` of the current season.
    ///
    /// # Errors
    ///
    /// Returns [`PlaybackError::EpisodeNotListed`] if the episode is not in
    /// the loaded list.
    pub fn play(&self, episode: u32) -> Result<EntryPoint, PlaybackError> {
        if !self.shelf.contains(episode) {
            return Err(PlaybackError::EpisodeNotListed {
                season: self.season(),
                episode,
            });
        }
        Ok(EntryPoint {
            season: self.season(),
            episode,
        })
    }
}
