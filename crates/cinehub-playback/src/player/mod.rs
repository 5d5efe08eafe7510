//! Player state, season browser and episode lists.
//!
//! Network work is never started here: transitions that need an episode
//! list return an [`EpisodeRefresh`] the caller fetches and hands back via
//! `apply`. Listings that lost the race against a newer request are dropped.

mod browser;
mod episodes;
mod error;
mod state;
mod surface;
mod target;
#[cfg(test)]
mod testing;

pub use browser::{EntryPoint, SeasonBrowser};
pub use episodes::{EpisodeListing, EpisodeRefresh, EpisodeShelf};
pub use error::PlaybackError;
pub use state::{PlaybackState, PlaybackStateController};
pub use surface::{SurfaceLoad, SurfaceTracker};
pub use target::PlaybackTarget;
