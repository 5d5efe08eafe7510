//! Resolver input.

use cinehub_api::catalog::MediaKind;

/// What to play. A pure value rebuilt on every state change.
#[derive(Debug, Clone, PartialEq, Eq)]
#[allow(clippy::module_name_repetitions)]
pub struct PlaybackRequest {
    /// Catalog ID.
    pub content_id: u64,
    /// External (IMDb) ID, never an empty string.
    external_id: Option<String>,
    /// Media kind.
    pub kind: MediaKind,
    /// Season number (series only).
    pub season: u32,
    /// Episode number (series only).
    pub episode: u32,
}

impl PlaybackRequest {
    /// Request for a movie.
    #[must_use]
    pub fn movie(content_id: u64, external_id: Option<String>) -> Self {
        Self::new(content_id, external_id, MediaKind::Movie, 1, 1)
    }

    /// Request for one episode of a series.
    #[must_use]
    pub fn series(content_id: u64, external_id: Option<String>, season: u32, episode: u32) -> Self {
        Self::new(content_id, external_id, MediaKind::Series, season, episode)
    }

    /// Builds a request; a blank external ID is treated as absent.
    #[must_use]
    pub fn new(
        content_id: u64,
        external_id: Option<String>,
        kind: MediaKind,
        season: u32,
        episode: u32,
    ) -> Self {
        Self {
            content_id,
            external_id: external_id.filter(|id| !id.trim().is_empty()),
            kind,
            season,
            episode,
        }
    }

    /// External ID, if known.
    #[must_use]
    pub fn external_id(&self) -> Option<&str> {
        self.external_id.as_deref()
    }
}
