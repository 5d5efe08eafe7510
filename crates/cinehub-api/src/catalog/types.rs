//! Catalog response types and their normalized forms.
//!
//! Wire types (`Raw*`) are deliberately lenient: every field is optional so
//! that a single odd entry never fails a whole list. Normalization into the
//! public types happens once, at ingestion, and assigns the media kind.

use std::fmt;
use std::str::FromStr;

use anyhow::bail;
use chrono::{Datelike, NaiveDate};
use serde::Deserialize;

/// Base URL for poster and still images.
pub const POSTER_BASE_URL: &str = "https://image.tmdb.org/t/p/w500";

/// Base URL for full-size backdrop images.
pub const BACKDROP_BASE_URL: &str = "https://image.tmdb.org/t/p/original";

/// Kind of catalog content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum MediaKind {
    /// A feature film.
    Movie,
    /// A TV series.
    Series,
}

impl MediaKind {
    /// Path segment used by the catalog source (`movie` or `tv`).
    #[must_use]
    pub const fn path_segment(self) -> &'static str {
        match self {
            Self::Movie => "movie",
            Self::Series => "tv",
        }
    }

    /// Parses the `media_type` tag used by the catalog source.
    ///
    /// Returns `None` for other tags such as `person`.
    #[must_use]
    pub fn from_wire(tag: &str) -> Option<Self> {
        match tag {
            "movie" => Some(Self::Movie),
            "tv" => Some(Self::Series),
            _ => None,
        }
    }
}

impl fmt::Display for MediaKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Movie => write!(f, "movie"),
            Self::Series => write!(f, "series"),
        }
    }
}

impl FromStr for MediaKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "movie" => Ok(Self::Movie),
            "series" | "tv" => Ok(Self::Series),
            other => bail!("unknown media kind: {other}"),
        }
    }
}

/// Genre entry.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Genre {
    /// Genre ID.
    pub id: u32,
    /// Genre name.
    #[serde(default)]
    pub name: String,
}

/// A catalog entry, normalized at ingestion.
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogItem {
    /// Catalog ID.
    pub id: u64,
    /// Display title (movie title or series name).
    pub title: String,
    /// Poster image path.
    pub poster_path: Option<String>,
    /// Backdrop image path.
    pub backdrop_path: Option<String>,
    /// Synopsis.
    pub overview: String,
    /// Release date (movies) or first air date (series), `YYYY-MM-DD`.
    pub release_date: Option<String>,
    /// Average rating.
    pub vote_average: f64,
    /// Media kind assigned during normalization. Never re-derived.
    pub kind: MediaKind,
}

impl CatalogItem {
    /// Year of the release (or first air) date, if parseable.
    #[must_use]
    pub fn release_year(&self) -> Option<i32> {
        let date = self.release_date.as_deref()?;
        NaiveDate::parse_from_str(date, "%Y-%m-%d")
            .ok()
            .map(|d| d.year())
    }

    /// Full poster URL.
    #[must_use]
    pub fn poster_url(&self) -> Option<String> {
        image_url(POSTER_BASE_URL, self.poster_path.as_deref())
    }

    /// Full backdrop URL.
    #[must_use]
    pub fn backdrop_url(&self) -> Option<String> {
        image_url(BACKDROP_BASE_URL, self.backdrop_path.as_deref())
    }
}

/// Detail view of a catalog entry.
///
/// A new detail replaces the old one on every navigation; it is never
/// mutated in place.
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogDetail {
    /// Base item fields.
    pub item: CatalogItem,
    /// Genres.
    pub genres: Vec<Genre>,
    /// Runtime in minutes (movies).
    pub runtime: Option<u32>,
    /// Number of seasons (series).
    pub season_count: Option<u32>,
    /// Tagline (may be empty).
    pub tagline: String,
    /// Identifier in the external (IMDb) namespace.
    pub external_id: Option<String>,
}

/// A single episode within a season.
#[derive(Debug, Clone, PartialEq)]
pub struct Episode {
    /// Episode ID.
    pub id: u64,
    /// Episode name (may be empty).
    pub name: String,
    /// Episode synopsis.
    pub overview: String,
    /// Episode number within the season.
    pub episode_number: u32,
    /// Season number.
    pub season_number: u32,
    /// Still image path.
    pub still_path: Option<String>,
    /// Air date.
    pub air_date: Option<String>,
    /// Average rating.
    pub vote_average: Option<f64>,
}

impl Episode {
    /// Name for display, falling back to `Episode N`.
    #[must_use]
    pub fn display_name(&self) -> String {
        if self.name.is_empty() {
            format!("Episode {}", self.episode_number)
        } else {
            self.name.clone()
        }
    }

    /// Full still image URL.
    #[must_use]
    pub fn still_url(&self) -> Option<String> {
        image_url(POSTER_BASE_URL, self.still_path.as_deref())
    }
}

/// Cast member from the credits endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CastMember {
    /// Person ID.
    pub id: u64,
    /// Person name.
    pub name: String,
    /// Character played.
    pub character: String,
    /// Profile image path.
    pub profile_path: Option<String>,
}

/// Joins an image base URL with a relative path.
fn image_url(base: &str, path: Option<&str>) -> Option<String> {
    path.filter(|p| !p.is_empty()).map(|p| format!("{base}{p}"))
}

/// Drops empty strings.
pub(crate) fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.trim().is_empty())
}

// --- Wire types ---

/// Lenient list entry as sent by trending, discover and search endpoints.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(crate) struct RawItem {
    pub id: Option<u64>,
    pub title: Option<String>,
    pub name: Option<String>,
    pub poster_path: Option<String>,
    pub backdrop_path: Option<String>,
    pub overview: Option<String>,
    pub release_date: Option<String>,
    pub first_air_date: Option<String>,
    pub vote_average: Option<f64>,
    pub media_type: Option<String>,
}

impl RawItem {
    /// Normalizes into a `CatalogItem` tagged with `kind`.
    ///
    /// Returns `None` when the entry has no ID.
    pub(crate) fn into_item(self, kind: MediaKind) -> Option<CatalogItem> {
        let id = self.id?;
        let (title, release_date) = match kind {
            MediaKind::Movie => (
                non_empty(self.title).or_else(|| non_empty(self.name)),
                non_empty(self.release_date).or_else(|| non_empty(self.first_air_date)),
            ),
            MediaKind::Series => (
                non_empty(self.name).or_else(|| non_empty(self.title)),
                non_empty(self.first_air_date).or_else(|| non_empty(self.release_date)),
            ),
        };
        Some(CatalogItem {
            id,
            title: title.unwrap_or_default(),
            poster_path: non_empty(self.poster_path),
            backdrop_path: non_empty(self.backdrop_path),
            overview: self.overview.unwrap_or_default(),
            release_date,
            vote_average: self.vote_average.unwrap_or_default(),
            kind,
        })
    }
}

/// External ID block appended via `append_to_response=external_ids`.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(crate) struct RawExternalIds {
    pub imdb_id: Option<String>,
}

/// Detail payload from `{movie|tv}/{id}`.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(crate) struct RawDetail {
    #[serde(flatten)]
    pub item: RawItem,
    pub genres: Vec<Genre>,
    pub runtime: Option<u32>,
    pub number_of_seasons: Option<u32>,
    pub tagline: Option<String>,
    pub imdb_id: Option<String>,
    pub external_ids: Option<RawExternalIds>,
}

impl RawDetail {
    /// Normalizes into a `CatalogDetail` tagged with `kind`.
    pub(crate) fn into_detail(self, kind: MediaKind) -> Option<CatalogDetail> {
        let external_id = non_empty(self.external_ids.and_then(|ids| ids.imdb_id))
            .or_else(|| non_empty(self.imdb_id));
        let item = self.item.into_item(kind)?;
        Some(CatalogDetail {
            item,
            genres: self.genres,
            runtime: self.runtime,
            season_count: self.number_of_seasons,
            tagline: self.tagline.unwrap_or_default(),
            external_id,
        })
    }
}

/// Episode entry from `tv/{id}/season/{n}`.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(crate) struct RawEpisode {
    pub id: Option<u64>,
    pub name: Option<String>,
    pub overview: Option<String>,
    pub episode_number: Option<u32>,
    pub season_number: Option<u32>,
    pub still_path: Option<String>,
    pub air_date: Option<String>,
    pub vote_average: Option<f64>,
}

impl RawEpisode {
    /// Normalizes into an `Episode`; entries without ID or number are dropped.
    pub(crate) fn into_episode(self, season: u32) -> Option<Episode> {
        Some(Episode {
            id: self.id?,
            name: self.name.unwrap_or_default(),
            overview: self.overview.unwrap_or_default(),
            episode_number: self.episode_number?,
            season_number: self.season_number.unwrap_or(season),
            still_path: non_empty(self.still_path),
            air_date: non_empty(self.air_date),
            vote_average: self.vote_average,
        })
    }
}

/// Cast entry from `{movie|tv}/{id}/credits`.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(crate) struct RawCastMember {
    pub id: Option<u64>,
    pub name: Option<String>,
    pub character: Option<String>,
    pub profile_path: Option<String>,
}

impl RawCastMember {
    /// Normalizes into a `CastMember`.
    pub(crate) fn into_member(self) -> Option<CastMember> {
        Some(CastMember {
            id: self.id?,
            name: self.name.unwrap_or_default(),
            character: self.character.unwrap_or_default(),
            profile_path: non_empty(self.profile_path),
        })
    }
}

// --- Error Response ---

/// Catalog API error response body.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct CatalogErrorResponse {
    /// Catalog error code.
    pub status_code: u32,
    /// Error message.
    pub status_message: String,
    /// Success flag (always false for errors).
    #[allow(dead_code)]
    #[serde(default)]
    pub success: bool,
}
