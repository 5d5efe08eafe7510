//! Browse session: which content kind is on screen and which load is current.

use super::aggregator::{CategoryShelves, load_categories};
use super::api::LocalCatalogApi;
use super::ticket::{Ticket, TicketCounter};
use super::types::MediaKind;

/// Ticket for one `load_categories` round.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadTicket {
    ticket: Ticket,
    kind: MediaKind,
}

impl LoadTicket {
    /// Kind the load was started for.
    #[must_use]
    pub const fn kind(&self) -> MediaKind {
        self.kind
    }
}

/// Tracks the active browse tab and discards stale category loads.
///
/// Loads are not cancelled when the tab changes; instead a result is only
/// accepted when its ticket is the latest issued and its kind is still the
/// active one.
#[derive(Debug)]
pub struct BrowseSession {
    active: MediaKind,
    tickets: TicketCounter,
    shelves: Option<CategoryShelves>,
}

impl BrowseSession {
    /// Creates a session showing `kind`, with nothing loaded yet.
    #[must_use]
    pub fn new(kind: MediaKind) -> Self {
        Self {
            active: kind,
            tickets: TicketCounter::new(),
            shelves: None,
        }
    }

    /// Currently active kind.
    #[must_use]
    pub const fn active_kind(&self) -> MediaKind {
        self.active
    }

    /// Shelves of the last accepted load, if any.
    #[must_use]
    pub const fn shelves(&self) -> Option<&CategoryShelves> {
        self.shelves.as_ref()
    }

    /// Activates `kind` and starts a new load, invalidating older ones.
    ///
    /// Shelves of a different kind are cleared right away.
    pub fn switch_to(&mut self, kind: MediaKind) -> LoadTicket {
        if self.active != kind {
            self.shelves = None;
        }
        self.active = kind;
        LoadTicket {
            ticket: self.tickets.issue(),
            kind,
        }
    }

    /// Applies `shelves` if `ticket` is still current. Returns whether it was applied.
    pub fn accept(&mut self, ticket: LoadTicket, shelves: CategoryShelves) -> bool {
        let current = self.tickets.is_latest(ticket.ticket)
            && ticket.kind == self.active
            && shelves.kind() == ticket.kind;
        if current {
            self.shelves = Some(shelves);
        } else {
            tracing::debug!(
                kind = %ticket.kind,
                active = %self.active,
                "discarding stale category load"
            );
        }
        current
    }

    /// Reloads the active kind and applies the result.
    pub async fn refresh(&mut self, api: &(impl LocalCatalogApi + Sync)) -> bool {
        let ticket = self.switch_to(self.active);
        let shelves = load_categories(api, ticket.kind).await;
        self.accept(ticket, shelves)
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::indexing_slicing)]

    use super::*;
    use crate::catalog::aggregator::Category;
    use crate::catalog::types::CatalogItem;

    fn shelves(kind: MediaKind, id: u64) -> CategoryShelves {
        let item = CatalogItem {
            id,
            title: String::from("x"),
            poster_path: None,
            backdrop_path: None,
            overview: String::new(),
            release_date: None,
            vote_average: 0.0,
            kind,
        };
        CategoryShelves::new(kind, [(Category::Trending, vec![item])])
    }

    #[test]
    fn test_accepts_current_load() {
        // Arrange
        let mut session = BrowseSession::new(MediaKind::Movie);
        let ticket = session.switch_to(MediaKind::Movie);

        // Act
        let applied = session.accept(ticket, shelves(MediaKind::Movie, 1));

        // Assert
        assert!(applied);
        assert_eq!(session.shelves().unwrap().kind(), MediaKind::Movie);
    }

    #[test]
    fn test_discards_load_from_previous_tab() {
        // Arrange
        let mut session = BrowseSession::new(MediaKind::Movie);
        let movie_ticket = session.switch_to(MediaKind::Movie);
        let series_ticket = session.switch_to(MediaKind::Series);

        // Act: series result lands first, then the stale movie result
        let series_applied = session.accept(series_ticket, shelves(MediaKind::Series, 2));
        let movie_applied = session.accept(movie_ticket, shelves(MediaKind::Movie, 1));

        // Assert
        assert!(series_applied);
        assert!(!movie_applied);
        assert_eq!(session.shelves().unwrap().kind(), MediaKind::Series);
    }

    #[test]
    fn test_discards_superseded_load_of_same_kind() {
        // Arrange
        let mut session = BrowseSession::new(MediaKind::Movie);
        let first = session.switch_to(MediaKind::Movie);
        let second = session.switch_to(MediaKind::Movie);

        // Act
        let second_applied = session.accept(second, shelves(MediaKind::Movie, 2));
        let first_applied = session.accept(first, shelves(MediaKind::Movie, 1));

        // Assert
        assert!(second_applied);
        assert!(!first_applied);
        assert_eq!(
            session.shelves().unwrap().get(Category::Trending)[0].id,
            2
        );
    }

    #[test]
    fn test_switching_tab_clears_shelves() {
        // Arrange
        let mut session = BrowseSession::new(MediaKind::Movie);
        let ticket = session.switch_to(MediaKind::Movie);
        session.accept(ticket, shelves(MediaKind::Movie, 1));

        // Act
        let _ticket = session.switch_to(MediaKind::Series);

        // Assert
        assert!(session.shelves().is_none());
        assert_eq!(session.active_kind(), MediaKind::Series);
    }
}
