//! Playback link resolution for cinehub.
//!
//! Maps a playback request to a provider-specific embed URL and keeps the
//! player's provider, season and episode selection consistent.

/// Player state, season browser and episode lists.
pub mod player;
/// Streaming provider registry and URL resolution.
pub mod providers;
