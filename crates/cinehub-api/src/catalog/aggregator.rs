//! Category fan-out for the browse page.
//!
//! [`load_categories`] issues the five category queries of a content kind
//! concurrently and always returns exactly one (possibly empty) list per
//! category. A failing category never affects the other four.

use std::collections::BTreeMap;
use std::future::Future;

use anyhow::Result;
use futures::future::join_all;
use tracing::instrument;

use super::api::LocalCatalogApi;
use super::types::{CatalogItem, MediaKind};

/// Movie genre: Action.
const MOVIE_ACTION: u32 = 28;
/// Movie genre: Comedy.
const MOVIE_COMEDY: u32 = 35;
/// Movie genre: Horror.
const MOVIE_HORROR: u32 = 27;
/// Series genre: Action & Adventure.
const SERIES_ACTION: u32 = 10_759;
/// Series genre: Comedy.
const SERIES_COMEDY: u32 = 35;
/// Series genre: Mystery.
const SERIES_MYSTERY: u32 = 9_648;

/// One browse category. Declaration order is display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Category {
    /// Trending this week.
    Trending,
    /// Now playing in theaters (movies) or currently on the air (series).
    NowShowing,
    /// Action (movies) or Action & Adventure (series).
    Action,
    /// Comedy.
    Comedy,
    /// Horror (movies) or Mystery (series).
    Suspense,
}

/// Where a category's items come from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CategorySource {
    /// Weekly trending list.
    Trending,
    /// Now playing / on the air list.
    NowShowing,
    /// Genre discovery sorted by popularity.
    Genre(u32),
}

impl Category {
    /// All categories in display order.
    pub const ALL: [Self; 5] = [
        Self::Trending,
        Self::NowShowing,
        Self::Action,
        Self::Comedy,
        Self::Suspense,
    ];

    /// Display label for `kind`.
    #[must_use]
    pub const fn label(self, kind: MediaKind) -> &'static str {
        match (self, kind) {
            (Self::Trending, _) => "Trending",
            (Self::NowShowing, MediaKind::Movie) => "Now Playing",
            (Self::NowShowing, MediaKind::Series) => "On the Air",
            (Self::Action, MediaKind::Movie) => "Action",
            (Self::Action, MediaKind::Series) => "Action & Adventure",
            (Self::Comedy, _) => "Comedy",
            (Self::Suspense, MediaKind::Movie) => "Horror",
            (Self::Suspense, MediaKind::Series) => "Mystery",
        }
    }

    /// Query backing this category for `kind`.
    #[must_use]
    pub const fn source(self, kind: MediaKind) -> CategorySource {
        match (self, kind) {
            (Self::Trending, _) => CategorySource::Trending,
            (Self::NowShowing, _) => CategorySource::NowShowing,
            (Self::Action, MediaKind::Movie) => CategorySource::Genre(MOVIE_ACTION),
            (Self::Action, MediaKind::Series) => CategorySource::Genre(SERIES_ACTION),
            (Self::Comedy, MediaKind::Movie) => CategorySource::Genre(MOVIE_COMEDY),
            (Self::Comedy, MediaKind::Series) => CategorySource::Genre(SERIES_COMEDY),
            (Self::Suspense, MediaKind::Movie) => CategorySource::Genre(MOVIE_HORROR),
            (Self::Suspense, MediaKind::Series) => CategorySource::Genre(SERIES_MYSTERY),
        }
    }
}

/// Result of one [`load_categories`] round.
///
/// Holds exactly one list per [`Category`]. All lists empty means
/// "no content", not an error.
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryShelves {
    kind: MediaKind,
    shelves: BTreeMap<Category, Vec<CatalogItem>>,
}

impl CategoryShelves {
    /// Builds shelves from per-category results; missing categories are empty.
    #[must_use]
    pub fn new(
        kind: MediaKind,
        results: impl IntoIterator<Item = (Category, Vec<CatalogItem>)>,
    ) -> Self {
        let mut shelves: BTreeMap<Category, Vec<CatalogItem>> =
            Category::ALL.into_iter().map(|c| (c, Vec::new())).collect();
        shelves.extend(results);
        Self { kind, shelves }
    }

    /// Kind these shelves were loaded for.
    #[must_use]
    pub const fn kind(&self) -> MediaKind {
        self.kind
    }

    /// Items of one category.
    #[must_use]
    pub fn get(&self, category: Category) -> &[CatalogItem] {
        self.shelves
            .get(&category)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Categories and their items in display order.
    pub fn iter(&self) -> impl Iterator<Item = (Category, &[CatalogItem])> {
        self.shelves.iter().map(|(c, items)| (*c, items.as_slice()))
    }

    /// Number of categories (always five).
    #[must_use]
    pub fn len(&self) -> usize {
        self.shelves.len()
    }

    /// Whether every category came back empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.shelves.values().all(Vec::is_empty)
    }
}

/// Settles one list fetch: failures become an empty list and a warning.
pub fn absorb<T>(label: &str, result: Result<Vec<T>>) -> Vec<T> {
    match result {
        Ok(items) => items,
        Err(e) => {
            tracing::warn!(
                category = label,
                error = %format!("{e:#}"),
                "fetch failed, using empty list"
            );
            Vec::new()
        }
    }
}

/// Awaits `fetch` and settles it with [`absorb`]. Never fails.
pub async fn isolate<T, F>(label: &str, fetch: F) -> Vec<T>
where
    F: Future<Output = Result<Vec<T>>>,
{
    absorb(label, fetch.await)
}

/// Drops items whose tag differs from the requested kind.
fn keep_kind(label: &str, kind: MediaKind, items: Vec<CatalogItem>) -> Vec<CatalogItem> {
    let before = items.len();
    let kept: Vec<CatalogItem> = items.into_iter().filter(|i| i.kind == kind).collect();
    let dropped = before.saturating_sub(kept.len());
    if dropped > 0 {
        tracing::warn!(category = label, dropped, "dropped items tagged with another kind");
    }
    kept
}

/// Fetches and settles one category.
async fn fetch_category(
    api: &(impl LocalCatalogApi + Sync),
    kind: MediaKind,
    category: Category,
) -> Vec<CatalogItem> {
    let label = category.label(kind);
    let items = isolate(label, async {
        match category.source(kind) {
            CategorySource::Trending => api.trending(kind).await,
            CategorySource::NowShowing => api.now_showing(kind).await,
            CategorySource::Genre(genre_id) => api.discover_by_genre(kind, genre_id).await,
        }
    })
    .await;
    tracing::debug!(category = label, count = items.len(), "category loaded");
    keep_kind(label, kind, items)
}

/// Loads the five browse categories of `kind` concurrently.
///
/// Every call performs a fresh fetch round; nothing is cached. Waits for
/// all five queries, each bounded by the client's request timeout.
#[instrument(skip_all, fields(kind = %kind))]
pub async fn load_categories(
    api: &(impl LocalCatalogApi + Sync),
    kind: MediaKind,
) -> CategoryShelves {
    let fetches = Category::ALL.map(|category| fetch_category(api, kind, category));
    let results = join_all(fetches).await;
    let shelves = CategoryShelves::new(kind, Category::ALL.into_iter().zip(results));
    if shelves.is_empty() {
        tracing::warn!("all categories came back empty");
    }
    shelves
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::indexing_slicing)]

    use std::sync::atomic::{AtomicU32, Ordering};
    use std::time::Duration;

    use anyhow::bail;
    use tracing::subscriber::with_default;
    use tracing_mock::{expect, subscriber};
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;
    use crate::catalog::client::CatalogClient;
    use crate::catalog::types::{CastMember, CatalogDetail, Episode};

    fn item(id: u64, kind: MediaKind) -> CatalogItem {
        CatalogItem {
            id,
            title: format!("Title {id}"),
            poster_path: None,
            backdrop_path: None,
            overview: String::new(),
            release_date: None,
            vote_average: 0.0,
            kind,
        }
    }

    /// Catalog mock: genre queries listed in `failing_genres` fail,
    /// everything else returns two items tagged with `tag`.
    struct MockCatalogApi {
        failing_genres: Vec<u32>,
        trending_fails: bool,
        tag: Option<MediaKind>,
        calls: AtomicU32,
    }

    impl MockCatalogApi {
        fn healthy() -> Self {
            Self {
                failing_genres: Vec::new(),
                trending_fails: false,
                tag: None,
                calls: AtomicU32::new(0),
            }
        }

        fn list(&self, kind: MediaKind) -> Vec<CatalogItem> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            let tag = self.tag.unwrap_or(kind);
            vec![item(1, tag), item(2, tag)]
        }
    }

    impl LocalCatalogApi for MockCatalogApi {
        async fn trending(&self, kind: MediaKind) -> Result<Vec<CatalogItem>> {
            if self.trending_fails {
                self.calls.fetch_add(1, Ordering::SeqCst);
                bail!("connection reset");
            }
            Ok(self.list(kind))
        }

        async fn now_showing(&self, kind: MediaKind) -> Result<Vec<CatalogItem>> {
            Ok(self.list(kind))
        }

        async fn discover_by_genre(
            &self,
            kind: MediaKind,
            genre_id: u32,
        ) -> Result<Vec<CatalogItem>> {
            if self.failing_genres.contains(&genre_id) {
                self.calls.fetch_add(1, Ordering::SeqCst);
                bail!("HTTP 500 for genre {genre_id}");
            }
            Ok(self.list(kind))
        }

        async fn search(&self, _query: &str) -> Result<Vec<CatalogItem>> {
            Ok(vec![])
        }

        async fn details(&self, _id: u64, _kind: MediaKind) -> Result<CatalogDetail> {
            bail!("not used")
        }

        async fn season_episodes(&self, _series_id: u64, _season: u32) -> Result<Vec<Episode>> {
            Ok(vec![])
        }

        async fn credits(&self, _id: u64, _kind: MediaKind) -> Result<Vec<CastMember>> {
            Ok(vec![])
        }
    }

    #[test]
    fn test_category_sources_for_movies() {
        // Arrange & Act & Assert
        assert_eq!(
            Category::Action.source(MediaKind::Movie),
            CategorySource::Genre(28)
        );
        assert_eq!(
            Category::Suspense.source(MediaKind::Movie),
            CategorySource::Genre(27)
        );
        assert_eq!(Category::Suspense.label(MediaKind::Movie), "Horror");
    }

    #[test]
    fn test_category_sources_for_series() {
        // Arrange & Act & Assert
        assert_eq!(
            Category::Action.source(MediaKind::Series),
            CategorySource::Genre(10_759)
        );
        assert_eq!(
            Category::Suspense.source(MediaKind::Series),
            CategorySource::Genre(9_648)
        );
        assert_eq!(Category::NowShowing.label(MediaKind::Series), "On the Air");
    }

    #[test]
    fn test_shelves_fill_missing_categories() {
        // Arrange & Act
        let shelves = CategoryShelves::new(
            MediaKind::Movie,
            [(Category::Comedy, vec![item(5, MediaKind::Movie)])],
        );

        // Assert
        assert_eq!(shelves.len(), 5);
        assert_eq!(shelves.get(Category::Comedy).len(), 1);
        assert!(shelves.get(Category::Trending).is_empty());
        assert!(!shelves.is_empty());
    }

    #[test]
    fn test_absorb_logs_warning_and_yields_empty() {
        // Arrange
        let (subscriber, handle) = subscriber::mock()
            .event(expect::event().at_level(tracing::Level::WARN))
            .only()
            .run_with_handle();

        // Act
        let items: Vec<CatalogItem> = with_default(subscriber, || {
            absorb("Comedy", Err(anyhow::anyhow!("HTTP 500")))
        });

        // Assert
        assert!(items.is_empty());
        handle.assert_finished();
    }

    #[test]
    fn test_absorb_passes_success_through_silently() {
        // Arrange
        let (subscriber, handle) = subscriber::mock().only().run_with_handle();

        // Act
        let items = with_default(subscriber, || {
            absorb("Comedy", Ok(vec![item(1, MediaKind::Movie)]))
        });

        // Assert
        assert_eq!(items.len(), 1);
        handle.assert_finished();
    }

    #[tokio::test]
    async fn test_load_categories_all_healthy() {
        // Arrange
        let api = MockCatalogApi::healthy();

        // Act
        let shelves = load_categories(&api, MediaKind::Movie).await;

        // Assert
        assert_eq!(shelves.len(), 5);
        assert_eq!(shelves.kind(), MediaKind::Movie);
        for (_, items) in shelves.iter() {
            assert_eq!(items.len(), 2);
            assert!(items.iter().all(|i| i.kind == MediaKind::Movie));
        }
    }

    #[tokio::test]
    async fn test_load_categories_isolates_failures() {
        // Arrange
        let api = MockCatalogApi {
            failing_genres: vec![10_759, 9_648],
            trending_fails: true,
            ..MockCatalogApi::healthy()
        };

        // Act
        let shelves = load_categories(&api, MediaKind::Series).await;

        // Assert
        assert_eq!(shelves.len(), 5);
        assert!(shelves.get(Category::Trending).is_empty());
        assert!(shelves.get(Category::Action).is_empty());
        assert!(shelves.get(Category::Suspense).is_empty());
        assert_eq!(shelves.get(Category::NowShowing).len(), 2);
        assert_eq!(shelves.get(Category::Comedy).len(), 2);
    }

    #[tokio::test]
    async fn test_load_categories_drops_mistagged_items() {
        // Arrange
        let api = MockCatalogApi {
            tag: Some(MediaKind::Series),
            ..MockCatalogApi::healthy()
        };

        // Act
        let shelves = load_categories(&api, MediaKind::Movie).await;

        // Assert
        assert!(shelves.is_empty());
    }

    #[tokio::test]
    async fn test_load_categories_is_not_cached() {
        // Arrange
        let api = MockCatalogApi::healthy();

        // Act
        let first = load_categories(&api, MediaKind::Movie).await;
        let second = load_categories(&api, MediaKind::Movie).await;

        // Assert
        assert_eq!(api.calls.load(Ordering::SeqCst), 10);
        assert_eq!(first, second);
    }

    fn http_client(server: &MockServer, timeout: Duration) -> CatalogClient {
        CatalogClient::builder()
            .base_url(format!("{}/3/", server.uri()).parse().unwrap())
            .api_key("test-key")
            .user_agent("test/0.0.0")
            .min_interval(Duration::from_millis(0))
            .timeout(timeout)
            .build()
            .unwrap()
    }

    #[tokio::test]
    async fn test_load_categories_over_http_with_injected_failures() {
        // Arrange
        let mock_server = MockServer::start().await;
        let movies = include_str!("../../../../fixtures/catalog/trending_movie_week.json");

        Mock::given(method("GET"))
            .and(path("/3/trending/movie/week"))
            .respond_with(ResponseTemplate::new(200).set_body_string(movies))
            .mount(&mock_server)
            .await;
        Mock::given(method("GET"))
            .and(path("/3/movie/now_playing"))
            .respond_with(ResponseTemplate::new(200).set_body_string(movies))
            .mount(&mock_server)
            .await;
        // Action: upstream error
        Mock::given(method("GET"))
            .and(path("/3/discover/movie"))
            .and(query_param("with_genres", "28"))
            .respond_with(ResponseTemplate::new(500).set_body_string("internal error"))
            .mount(&mock_server)
            .await;
        // Comedy: malformed JSON
        Mock::given(method("GET"))
            .and(path("/3/discover/movie"))
            .and(query_param("with_genres", "35"))
            .respond_with(ResponseTemplate::new(200).set_body_string("{\"results\": [tru"))
            .mount(&mock_server)
            .await;
        // Horror: slower than the client timeout
        Mock::given(method("GET"))
            .and(path("/3/discover/movie"))
            .and(query_param("with_genres", "27"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_string(movies)
                    .set_delay(Duration::from_secs(3)),
            )
            .mount(&mock_server)
            .await;

        let client = http_client(&mock_server, Duration::from_millis(300));

        // Act
        let shelves = load_categories(&client, MediaKind::Movie).await;

        // Assert
        assert_eq!(shelves.len(), 5);
        assert_eq!(shelves.get(Category::Trending).len(), 3);
        assert_eq!(shelves.get(Category::NowShowing).len(), 3);
        assert!(shelves.get(Category::Action).is_empty());
        assert!(shelves.get(Category::Comedy).is_empty());
        assert!(shelves.get(Category::Suspense).is_empty());
        for (_, items) in shelves.iter() {
            assert!(items.iter().all(|i| i.kind == MediaKind::Movie));
        }
    }

    #[tokio::test]
    async fn test_load_categories_total_outage_is_five_empty_lists() {
        // Arrange: nothing mounted, every request gets 404
        let mock_server = MockServer::start().await;
        let client = http_client(&mock_server, Duration::from_secs(5));

        // Act
        let shelves = load_categories(&client, MediaKind::Series).await;

        // Assert
        assert_eq!(shelves.len(), 5);
        assert!(shelves.is_empty());
    }

    #[tokio::test]
    async fn test_load_series_tags_items_without_media_type() {
        // Arrange
        let mock_server = MockServer::start().await;
        let shows = include_str!("../../../../fixtures/catalog/trending_tv_week.json");
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string(shows))
            .mount(&mock_server)
            .await;
        let client = http_client(&mock_server, Duration::from_secs(5));

        // Act
        let shelves = load_categories(&client, MediaKind::Series).await;

        // Assert
        for (_, items) in shelves.iter() {
            assert_eq!(items.len(), 2);
            assert!(items.iter().all(|i| i.kind == MediaKind::Series));
        }
    }
}
