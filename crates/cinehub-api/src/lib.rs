//! Catalog API client library for cinehub.
//!
//! Fetches movie and series metadata from the catalog source and gathers
//! the browse categories for each content kind.

/// Catalog API client and category aggregation.
pub mod catalog;
