//! What the player is playing.

use cinehub_api::catalog::{CatalogDetail, MediaKind};

use super::error::PlaybackError;

/// Title selected for playback, taken from the details view.
#[derive(Debug, Clone, PartialEq, Eq)]
#[allow(clippy::module_name_repetitions)]
pub struct PlaybackTarget {
    /// Catalog ID.
    pub content_id: u64,
    /// External (IMDb) ID.
    pub external_id: Option<String>,
    /// Media kind.
    pub kind: MediaKind,
    /// Display title.
    pub title: String,
    /// Number of seasons; `None` when unknown (no upper bound is enforced).
    pub season_count: Option<u32>,
}

impl PlaybackTarget {
    /// Checks `season` against the known season count.
    pub(crate) fn check_season(&self, season: u32) -> Result<(), PlaybackError> {
        if self.kind != MediaKind::Series {
            return Err(PlaybackError::NotASeries);
        }
        let season_count = self.season_count.unwrap_or(u32::MAX);
        if season == 0 || season > season_count {
            return Err(PlaybackError::SeasonOutOfRange {
                season,
                season_count: self.season_count.unwrap_or(0),
            });
        }
        Ok(())
    }
}

impl From<&CatalogDetail> for PlaybackTarget {
    fn from(detail: &CatalogDetail) -> Self {
        Self {
            content_id: detail.item.id,
            external_id: detail.external_id.clone(),
            kind: detail.item.kind,
            title: detail.item.title.clone(),
            season_count: detail.season_count.filter(|&n| n > 0),
        }
    }
}

#[cfg(test)]
mod tests {
    use cinehub_api::catalog::CatalogItem;

    use super::*;

    fn detail(kind: MediaKind, season_count: Option<u32>) -> CatalogDetail {
        CatalogDetail {
            item: CatalogItem {
                id: 1399,
                title: String::from("Game of Thrones"),
                poster_path: None,
                backdrop_path: None,
                overview: String::new(),
                release_date: None,
                vote_average: 8.4,
                kind,
            },
            genres: Vec::new(),
            runtime: None,
            season_count,
            tagline: String::new(),
            external_id: Some(String::from("tt0944947")),
        }
    }

    #[test]
    fn test_from_detail() {
        // Act
        let target = PlaybackTarget::from(&detail(MediaKind::Series, Some(8)));

        // Assert
        assert_eq!(target.content_id, 1399);
        assert_eq!(target.external_id.as_deref(), Some("tt0944947"));
        assert_eq!(target.season_count, Some(8));
    }

    #[test]
    fn test_check_season_bounds() {
        // Arrange
        let target = PlaybackTarget::from(&detail(MediaKind::Series, Some(8)));

        // Act & Assert
        assert_eq!(target.check_season(1), Ok(()));
        assert_eq!(target.check_season(8), Ok(()));
        assert_eq!(
            target.check_season(9),
            Err(PlaybackError::SeasonOutOfRange {
                season: 9,
                season_count: 8
            })
        );
        assert!(target.check_season(0).is_err());
    }

    #[test]
    fn test_check_season_unknown_count_is_unbounded() {
        // Arrange
        let target = PlaybackTarget::from(&detail(MediaKind::Series, None));

        // Act & Assert
        assert_eq!(target.check_season(42), Ok(()));
    }

    #[test]
    fn test_zero_season_count_is_unknown() {
        // Act
        let target = PlaybackTarget::from(&detail(MediaKind::Series, Some(0)));

        // Assert
        assert_eq!(target.season_count, None);
    }

    #[test]
    fn test_check_season_on_movie() {
        // Arrange
        let target = PlaybackTarget::from(&detail(MediaKind::Movie, None));

        // Act & Assert
        assert_eq!(target.check_season(1), Err(PlaybackError::NotASeries));
    }
}
