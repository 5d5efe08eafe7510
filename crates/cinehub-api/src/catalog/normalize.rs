//! Defensive shape-checking of catalog payloads.
//!
//! List payloads are walked entry by entry. A missing or non-array list
//! field yields an empty list; an entry that does not deserialize is skipped.

use serde::Deserialize;
use serde_json::Value;

use super::types::{
    CastMember, CatalogItem, Episode, MediaKind, RawCastMember, RawEpisode, RawItem,
};

/// Returns the array stored under `field`, or an empty slice.
fn entries<'a>(body: &'a Value, field: &str) -> &'a [Value] {
    body.get(field)
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or_default()
}

/// Deserializes one entry, logging and skipping it on failure.
fn decode<'a, T: Deserialize<'a>>(entry: &'a Value, what: &str) -> Option<T> {
    match T::deserialize(entry) {
        Ok(raw) => Some(raw),
        Err(e) => {
            tracing::debug!(what, error = %e, "skipping malformed entry");
            None
        }
    }
}

/// Normalizes a `results` list, tagging every item with `kind`.
pub(crate) fn items(body: &Value, kind: MediaKind) -> Vec<CatalogItem> {
    entries(body, "results")
        .iter()
        .filter_map(|entry| decode::<RawItem>(entry, "item"))
        .filter_map(|raw| raw.into_item(kind))
        .collect()
}

/// Normalizes a multi-type search list, keeping only movies and series.
///
/// The kind comes from each entry's `media_type` tag.
pub(crate) fn search_items(body: &Value) -> Vec<CatalogItem> {
    entries(body, "results")
        .iter()
        .filter_map(|entry| decode::<RawItem>(entry, "search result"))
        .filter_map(|raw| {
            let kind = raw.media_type.as_deref().and_then(MediaKind::from_wire)?;
            raw.into_item(kind)
        })
        .collect()
}

/// Normalizes the `episodes` list of a season payload.
pub(crate) fn episodes(body: &Value, season: u32) -> Vec<Episode> {
    entries(body, "episodes")
        .iter()
        .filter_map(|entry| decode::<RawEpisode>(entry, "episode"))
        .filter_map(|raw| raw.into_episode(season))
        .collect()
}

/// Normalizes the `cast` list of a credits payload, keeping at most `limit`.
pub(crate) fn cast(body: &Value, limit: usize) -> Vec<CastMember> {
    entries(body, "cast")
        .iter()
        .filter_map(|entry| decode::<RawCastMember>(entry, "cast member"))
        .filter_map(RawCastMember::into_member)
        .take(limit)
        .collect()
}
