//! Season-scoped episode lists with stale-result protection.
#![allow(clippy::future_not_send)]

use cinehub_api::catalog::{Episode, LocalCatalogApi, Ticket, TicketCounter, isolate};
use tracing::debug;

/// Episode list of the season currently browsed.
///
/// The list is replaced wholesale on every season change; a listing is
/// applied only if it belongs to the most recent request.
#[derive(Debug)]
pub struct EpisodeShelf {
    series_id: u64,
    season: u32,
    episodes: Vec<Episode>,
    loading: bool,
    tickets: TicketCounter,
}

impl EpisodeShelf {
    /// Empty shelf for `series_id`; nothing requested yet.
    #[must_use]
    pub fn new(series_id: u64) -> Self {
        Self {
            series_id,
            season: 0,
            episodes: Vec::new(),
            loading: false,
            tickets: TicketCounter::new(),
        }
    }

    /// Switches to `season`: clears the list and starts a new request.
    pub fn request(&mut self, season: u32) -> EpisodeRefresh {
        self.season = season;
        self.episodes.clear();
        self.loading = true;
        EpisodeRefresh {
            ticket: self.tickets.issue(),
            series_id: self.series_id,
            season,
        }
    }

    /// Applies a completed listing. Returns `false` if it is stale.
    pub fn apply(&mut self, listing: EpisodeListing) -> bool {
        if listing.series_id != self.series_id {
            debug!(
                series_id = listing.series_id,
                current = self.series_id,
                "discarding episode listing of another series"
            );
            return false;
        }
        if !self.tickets.is_latest(listing.ticket) || listing.season != self.season {
            debug!(
                season = listing.season,
                current = self.season,
                "discarding stale episode listing"
            );
            return false;
        }
        self.episodes = listing.episodes;
        self.loading = false;
        true
    }

    /// Season the shelf belongs to (0 before the first request).
    #[must_use]
    pub const fn season(&self) -> u32 {
        self.season
    }

    /// Loaded episodes; empty while loading.
    #[must_use]
    pub fn episodes(&self) -> &[Episode] {
        &self.episodes
    }

    /// Whether a request is still pending.
    #[must_use]
    pub const fn is_loading(&self) -> bool {
        self.loading
    }

    /// Whether episode number `episode` is in the loaded list.
    #[must_use]
    pub fn contains(&self, episode: u32) -> bool {
        self.episodes.iter().any(|e| e.episode_number == episode)
    }
}

/// Pending episode-list fetch for one season.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[must_use = "an episode refresh does nothing until fetched"]
pub struct EpisodeRefresh {
    ticket: Ticket,
    series_id: u64,
    season: u32,
}

impl EpisodeRefresh {
    /// Series being listed.
    #[must_use]
    pub const fn series_id(&self) -> u64 {
        self.series_id
    }

    /// Season being listed.
    #[must_use]
    pub const fn season(&self) -> u32 {
        self.season
    }

    /// Fetches the list. Failures yield an empty listing.
    pub async fn fetch(self, api: &(impl LocalCatalogApi + Sync)) -> EpisodeListing {
        let label = format!("season {}", self.season);
        let episodes = isolate(&label, api.season_episodes(self.series_id, self.season)).await;
        self.complete(episodes)
    }

    /// Wraps episodes obtained elsewhere into a listing for this request.
    pub const fn complete(self, episodes: Vec<Episode>) -> EpisodeListing {
        EpisodeListing {
            ticket: self.ticket,
            series_id: self.series_id,
            season: self.season,
            episodes,
        }
    }
}

/// Result of an [`EpisodeRefresh`], ready to apply.
#[derive(Debug, Clone, PartialEq)]
pub struct EpisodeListing {
    ticket: Ticket,
    series_id: u64,
    season: u32,
    episodes: Vec<Episode>,
}

impl EpisodeListing {
    /// Series the listing belongs to.
    #[must_use]
    pub const fn series_id(&self) -> u64 {
        self.series_id
    }

    /// Season the listing belongs to.
    #[must_use]
    pub const fn season(&self) -> u32 {
        self.season
    }

    /// Fetched episodes.
    #[must_use]
    pub fn episodes(&self) -> &[Episode] {
        &self.episodes
    }
}
