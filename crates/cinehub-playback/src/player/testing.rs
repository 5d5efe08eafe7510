//! Test doubles shared by the player tests.
#![allow(clippy::future_not_send)]

use std::collections::HashMap;

use anyhow::{Result, bail};
use cinehub_api::catalog::{
    CastMember, CatalogDetail, CatalogItem, Episode, LocalCatalogApi, MediaKind,
};

use super::target::PlaybackTarget;

/// `count` episodes of `season`, numbered from 1.
pub fn episodes(season: u32, count: u32) -> Vec<Episode> {
    (1..=count)
        .map(|n| Episode {
            id: u64::from(season * 100 + n),
            name: format!("S{season}E{n}"),
            overview: String::new(),
            episode_number: n,
            season_number: season,
            still_path: None,
            air_date: None,
            vote_average: None,
        })
        .collect()
}

/// Series target with `season_count` seasons and a known external ID.
pub fn series_target(season_count: u32) -> PlaybackTarget {
    PlaybackTarget {
        content_id: 1399,
        external_id: Some(String::from("tt0944947")),
        kind: MediaKind::Series,
        title: String::from("Game of Thrones"),
        season_count: Some(season_count),
    }
}

/// Movie target without an external ID.
pub fn movie_target() -> PlaybackTarget {
    PlaybackTarget {
        content_id: 27205,
        external_id: None,
        kind: MediaKind::Movie,
        title: String::from("Inception"),
        season_count: None,
    }
}

/// Catalog that only knows episode lists; unknown seasons fail.
pub struct MockEpisodes {
    seasons: HashMap<u32, u32>,
}

impl MockEpisodes {
    pub fn with_seasons(seasons: &[(u32, u32)]) -> Self {
        Self {
            seasons: seasons.iter().copied().collect(),
        }
    }
}

impl LocalCatalogApi for MockEpisodes {
    async fn trending(&self, _kind: MediaKind) -> Result<Vec<CatalogItem>> {
        Ok(vec![])
    }

    async fn now_showing(&self, _kind: MediaKind) -> Result<Vec<CatalogItem>> {
        Ok(vec![])
    }

    async fn discover_by_genre(
        &self,
        _kind: MediaKind,
        _genre_id: u32,
    ) -> Result<Vec<CatalogItem>> {
        Ok(vec![])
    }

    async fn search(&self, _query: &str) -> Result<Vec<CatalogItem>> {
        Ok(vec![])
    }

    async fn details(&self, _id: u64, _kind: MediaKind) -> Result<CatalogDetail> {
        bail!("not used")
    }

    async fn season_episodes(&self, _series_id: u64, season: u32) -> Result<Vec<Episode>> {
        match self.seasons.get(&season) {
            Some(&count) => Ok(episodes(season, count)),
            None => bail!("HTTP 404 for season {season}"),
        }
    }

    async fn credits(&self, _id: u64, _kind: MediaKind) -> Result<Vec<CastMember>> {
        Ok(vec![])
    }
}
