//! Provider/season/episode selection of the active player.

use cinehub_api::catalog::{Episode, MediaKind};
use tracing::debug;

use super::browser::EntryPoint;
use super::episodes::{EpisodeListing, EpisodeRefresh, EpisodeShelf};
use super::error::PlaybackError;
use super::target::PlaybackTarget;
use crate::providers::{PlaybackRequest, Provider, Registry, Resolution};

/// Snapshot of the player selection.
#[derive(Debug, Clone, PartialEq, Eq)]
#[allow(clippy::module_name_repetitions)]
pub struct PlaybackState {
    /// Active provider ID.
    pub provider_id: String,
    /// Current season (1 for movies).
    pub season: u32,
    /// Current episode (1 for movies).
    pub episode: u32,
    /// Incremented on every transition; the only reload trigger.
    pub generation: u64,
}

/// Owns the player selection and exposes explicit transitions.
///
/// Every transition either succeeds and increments the generation exactly
/// once, or fails and leaves the state untouched. Reads never change the
/// generation.
#[derive(Debug)]
pub struct PlaybackStateController {
    registry: Registry,
    target: PlaybackTarget,
    provider: Provider,
    season: u32,
    episode: u32,
    generation: u64,
    episodes: Option<EpisodeShelf>,
}

impl PlaybackStateController {
    /// Enters playback with the first registered provider.
    ///
    /// `entry` defaults to season 1, episode 1. For series the episode list
    /// of the entry season is requested.
    ///
    /// # Errors
    ///
    /// Returns an error if the entry point is invalid for the target.
    pub fn enter(
        registry: Registry,
        target: PlaybackTarget,
        entry: Option<EntryPoint>,
    ) -> Result<(Self, Option<EpisodeRefresh>), PlaybackError> {
        let entry = entry.unwrap_or_default();
        let (episodes, refresh) = match target.kind {
            MediaKind::Series => {
                target.check_season(entry.season)?;
                if entry.episode == 0 {
                    return Err(PlaybackError::ZeroEpisode);
                }
                let mut shelf = EpisodeShelf::new(target.content_id);
                let refresh = shelf.request(entry.season);
                (Some(shelf), Some(refresh))
            }
            MediaKind::Movie if entry != EntryPoint::default() => {
                return Err(PlaybackError::NotASeries);
            }
            MediaKind::Movie => (None, None),
        };

        let provider = registry.default_provider().clone();
        debug!(
            content_id = target.content_id,
            provider = %provider.id,
            season = entry.season,
            episode = entry.episode,
            "entering playback"
        );
        let controller = Self {
            registry,
            target,
            provider,
            season: entry.season,
            episode: entry.episode,
            generation: 0,
            episodes,
        };
        Ok((controller, refresh))
    }

    /// Switches provider. Season and episode are left unchanged.
    ///
    /// # Errors
    ///
    /// Returns [`PlaybackError::UnknownProvider`] if `id` is not registered.
    pub fn select_provider(&mut self, id: &str) -> Result<(), PlaybackError> {
        let provider = self
            .registry
            .get(id)
            .ok_or_else(|| PlaybackError::UnknownProvider(id.to_owned()))?
            .clone();
        self.provider = provider;
        self.bump("provider");
        Ok(())
    }

    /// Switches season, resets the episode to 1 and requests the new list.
    ///
    /// # Errors
    ///
    /// Returns an error for movies or a season outside the series' range.
    pub fn select_season(&mut self, season: u32) -> Result<EpisodeRefresh, PlaybackError> {
        self.target.check_season(season)?;
        let shelf = self.episodes.as_mut().ok_or(PlaybackError::NotASeries)?;
        let refresh = shelf.request(season);
        self.season = season;
        self.episode = 1;
        self.bump("season");
        Ok(refresh)
    }

    /// Switches episode within the loaded list of the current season.
    ///
    /// # Errors
    ///
    /// Returns an error for movies or an episode missing from the list.
    pub fn select_episode(&mut self, episode: u32) -> Result<(), PlaybackError> {
        let shelf = self.episodes.as_ref().ok_or(PlaybackError::NotASeries)?;
        if episode == 0 {
            return Err(PlaybackError::ZeroEpisode);
        }
        if !shelf.contains(episode) {
            return Err(PlaybackError::EpisodeNotListed {
                season: self.season,
                episode,
            });
        }
        self.episode = episode;
        self.bump("episode");
        Ok(())
    }

    /// Sets season and episode in one transition.
    ///
    /// A refresh is returned only when the season changes.
    ///
    /// # Errors
    ///
    /// Returns an error for movies or an invalid entry point.
    pub fn initialize_from(
        &mut self,
        entry: EntryPoint,
    ) -> Result<Option<EpisodeRefresh>, PlaybackError> {
        self.target.check_season(entry.season)?;
        if entry.episode == 0 {
            return Err(PlaybackError::ZeroEpisode);
        }
        let shelf = self.episodes.as_mut().ok_or(PlaybackError::NotASeries)?;
        let refresh = (shelf.season() != entry.season).then(|| shelf.request(entry.season));
        self.season = entry.season;
        self.episode = entry.episode;
        self.bump("entry point");
        Ok(refresh)
    }

    /// Applies a completed episode listing. Does not touch the generation.
    ///
    /// Returns `false` if the listing is stale or the target is a movie.
    pub fn apply_episodes(&mut self, listing: EpisodeListing) -> bool {
        self.episodes
            .as_mut()
            .is_some_and(|shelf| shelf.apply(listing))
    }

    /// Current selection.
    #[must_use]
    pub fn state(&self) -> PlaybackState {
        PlaybackState {
            provider_id: self.provider.id.clone(),
            season: self.season,
            episode: self.episode,
            generation: self.generation,
        }
    }

    /// Current generation.
    #[must_use]
    pub const fn generation(&self) -> u64 {
        self.generation
    }

    /// Active provider.
    #[must_use]
    pub const fn provider(&self) -> &Provider {
        &self.provider
    }

    /// Registered providers.
    #[must_use]
    pub const fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Title being played.
    #[must_use]
    pub const fn target(&self) -> &PlaybackTarget {
        &self.target
    }

    /// Episodes of the current season; empty for movies or while loading.
    #[must_use]
    pub fn episodes(&self) -> &[Episode] {
        self.episodes
            .as_ref()
            .map(EpisodeShelf::episodes)
            .unwrap_or_default()
    }

    /// Request built from the current selection.
    #[must_use]
    pub fn request(&self) -> PlaybackRequest {
        PlaybackRequest::new(
            self.target.content_id,
            self.target.external_id.clone(),
            self.target.kind,
            self.season,
            self.episode,
        )
    }

    /// Link for the current selection.
    #[must_use]
    pub fn link(&self) -> Resolution {
        self.provider.resolve(&self.request())
    }

    fn bump(&mut self, cause: &str) {
        self.generation = self.generation.wrapping_add(1);
        debug!(
            cause,
            provider = %self.provider.id,
            season = self.season,
            episode = self.episode,
            generation = self.generation,
            "playback state changed"
        );
    }
}
