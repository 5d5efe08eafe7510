//! `CatalogApi` trait definition.
#![allow(clippy::future_not_send)]

use anyhow::Result;

use super::types::{CastMember, CatalogDetail, CatalogItem, Episode, MediaKind};

/// Catalog source trait.
///
/// Abstracts API operations for mock substitution in tests.
/// Uses `trait_variant::make` to generate a `Send`-bound async trait.
/// Every returned item is already normalized and tagged with its media kind.
#[allow(clippy::module_name_repetitions)]
#[trait_variant::make(CatalogApi: Send)]
pub trait LocalCatalogApi {
    /// Fetches this week's trending titles of `kind`.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP request or JSON parsing fails.
    async fn trending(&self, kind: MediaKind) -> Result<Vec<CatalogItem>>;

    /// Fetches titles now in theaters (movies) or currently on the air (series).
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP request or JSON parsing fails.
    async fn now_showing(&self, kind: MediaKind) -> Result<Vec<CatalogItem>>;

    /// Discovers popular titles of `kind` in the given genre.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP request or JSON parsing fails.
    async fn discover_by_genre(&self, kind: MediaKind, genre_id: u32)
    -> Result<Vec<CatalogItem>>;

    /// Multi-type search; only movies and series are returned.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP request or JSON parsing fails.
    async fn search(&self, query: &str) -> Result<Vec<CatalogItem>>;

    /// Fetches details including the external ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP request fails or the payload has no ID.
    async fn details(&self, id: u64, kind: MediaKind) -> Result<CatalogDetail>;

    /// Fetches the episode list of one season.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP request or JSON parsing fails.
    async fn season_episodes(&self, series_id: u64, season: u32) -> Result<Vec<Episode>>;

    /// Fetches the leading cast members.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP request or JSON parsing fails.
    async fn credits(&self, id: u64, kind: MediaKind) -> Result<Vec<CastMember>>;
}
