//! Streaming provider registry and URL resolution.
//!
//! Providers are data: each carries a movie and a series URL template and
//! decides for itself what happens when the external ID is missing. The
//! resolver performs no retries and no network calls.

mod guidance;
mod provider;
mod registry;
mod request;
mod template;

pub use guidance::{Guidance, Tone};
pub use provider::{
    FALLBACK_MOVIE_TEMPLATE, FALLBACK_SERIES_TEMPLATE, MissingExternalId, Provider,
    ReferrerPolicy, Resolution, Unavailable,
};
pub use registry::Registry;
pub use request::PlaybackRequest;
pub use template::UrlTemplate;
