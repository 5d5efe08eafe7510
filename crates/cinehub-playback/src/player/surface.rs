//! Embed surface bookkeeping.

use super::state::PlaybackStateController;
use crate::providers::{ReferrerPolicy, Resolution};

/// What the embedding layer loads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SurfaceLoad {
    /// Generation the load belongs to.
    pub generation: u64,
    /// Link to embed, or the reason there is none.
    pub resolution: Resolution,
    /// Referrer policy of the embed.
    pub referrer_policy: ReferrerPolicy,
}

/// Reloads the playback surface only when the generation moved.
#[derive(Debug, Default)]
pub struct SurfaceTracker {
    loaded: Option<u64>,
}

impl SurfaceTracker {
    /// Tracker that has loaded nothing yet.
    #[must_use]
    pub const fn new() -> Self {
        Self { loaded: None }
    }

    /// Returns a load when `controller` has a generation not yet loaded.
    pub fn poll(&mut self, controller: &PlaybackStateController) -> Option<SurfaceLoad> {
        let generation = controller.generation();
        if self.loaded == Some(generation) {
            return None;
        }
        self.loaded = Some(generation);
        Some(SurfaceLoad {
            generation,
            resolution: controller.link(),
            referrer_policy: controller.provider().referrer_policy,
        })
    }
}
