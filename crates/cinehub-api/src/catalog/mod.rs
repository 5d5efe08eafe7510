//! Catalog API client module.
//!
//! Handles HTTP requests to the catalog API v3 endpoints, normalizes the
//! payloads, and aggregates the browse categories.

mod aggregator;
mod api;
mod client;
mod normalize;
mod rate_limiter;
mod session;
mod ticket;
mod types;

pub use aggregator::{
    Category, CategoryShelves, CategorySource, absorb, isolate, load_categories,
};
#[allow(clippy::module_name_repetitions)]
pub use api::{CatalogApi, LocalCatalogApi};
#[allow(clippy::module_name_repetitions)]
pub use client::{CatalogClient, CatalogClientBuilder};
pub use session::{BrowseSession, LoadTicket};
pub use ticket::{Ticket, TicketCounter};
#[allow(clippy::module_name_repetitions)]
pub use types::{
    BACKDROP_BASE_URL, CastMember, CatalogDetail, CatalogItem, Episode, Genre, MediaKind,
    POSTER_BASE_URL,
};
