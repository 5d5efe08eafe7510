//! Streaming provider definition and per-provider URL resolution.

use std::fmt;
use std::sync::LazyLock;

use cinehub_api::catalog::MediaKind;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use url::Url;

use super::guidance::Guidance;
use super::request::PlaybackRequest;
use super::template::UrlTemplate;

/// Shared movie template used when a provider lacks the external ID.
pub const FALLBACK_MOVIE_TEMPLATE: &str = "https://vidsrc.to/embed/movie/{id}";

/// Shared series template used when a provider lacks the external ID.
pub const FALLBACK_SERIES_TEMPLATE: &str = "https://vidsrc.to/embed/tv/{id}/{season}/{episode}";

struct SharedFallback {
    movie: UrlTemplate,
    series: UrlTemplate,
}

#[allow(clippy::expect_used)]
static SHARED_FALLBACK: LazyLock<SharedFallback> = LazyLock::new(|| SharedFallback {
    movie: UrlTemplate::parse(FALLBACK_MOVIE_TEMPLATE).expect("valid movie fallback template"),
    series: UrlTemplate::parse(FALLBACK_SERIES_TEMPLATE).expect("valid series fallback template"),
});

/// Referrer policy for the embedding surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ReferrerPolicy {
    /// `no-referrer`
    #[default]
    NoReferrer,
    /// `no-referrer-when-downgrade`
    NoReferrerWhenDowngrade,
    /// `origin`
    Origin,
    /// `origin-when-cross-origin`
    OriginWhenCrossOrigin,
    /// `same-origin`
    SameOrigin,
    /// `strict-origin`
    StrictOrigin,
    /// `strict-origin-when-cross-origin`
    StrictOriginWhenCrossOrigin,
    /// `unsafe-url`
    UnsafeUrl,
}

impl ReferrerPolicy {
    /// HTML attribute value.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::NoReferrer => "no-referrer",
            Self::NoReferrerWhenDowngrade => "no-referrer-when-downgrade",
            Self::Origin => "origin",
            Self::OriginWhenCrossOrigin => "origin-when-cross-origin",
            Self::SameOrigin => "same-origin",
            Self::StrictOrigin => "strict-origin",
            Self::StrictOriginWhenCrossOrigin => "strict-origin-when-cross-origin",
            Self::UnsafeUrl => "unsafe-url",
        }
    }
}

impl fmt::Display for ReferrerPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What a provider does when its template needs an absent external ID.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MissingExternalId {
    /// Delegate to the shared fallback template.
    #[default]
    Fallback,
    /// Report the link as unavailable.
    Unavailable,
}

/// Embed-based streaming provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Provider {
    /// Stable identifier, e.g. `vidsrc`.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Referrer policy of the embed.
    #[serde(default)]
    pub referrer_policy: ReferrerPolicy,
    /// Viewing guidance shown next to the player.
    #[serde(default)]
    pub guidance: Option<Guidance>,
    /// Short free-form note.
    #[serde(default)]
    pub note: Option<String>,
    /// Template for movies.
    pub movie: UrlTemplate,
    /// Template for series episodes.
    pub series: UrlTemplate,
    /// Behavior when the external ID is missing.
    #[serde(default)]
    pub missing_external_id: MissingExternalId,
}

/// Reason a link could not be produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Unavailable {
    /// No provider with this ID is registered.
    UnknownProvider(String),
    /// The provider needs an external ID and declares no fallback.
    MissingExternalId,
    /// The rendered template is not a valid URL.
    InvalidUrl(String),
}

impl fmt::Display for Unavailable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownProvider(id) => write!(f, "unknown provider: {id}"),
            Self::MissingExternalId => write!(f, "external ID required but not available"),
            Self::InvalidUrl(raw) => write!(f, "invalid URL: {raw}"),
        }
    }
}

/// Outcome of resolving a playback request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// Provider's own URL.
    Primary(Url),
    /// Shared fallback URL.
    Fallback(Url),
    /// No usable link; render a "link unavailable" affordance.
    Unavailable(Unavailable),
}

impl Resolution {
    /// The URL to embed, if any.
    #[must_use]
    pub const fn url(&self) -> Option<&Url> {
        match self {
            Self::Primary(url) | Self::Fallback(url) => Some(url),
            Self::Unavailable(_) => None,
        }
    }

    /// Whether the primary scheme could not be used.
    #[must_use]
    pub const fn is_degraded(&self) -> bool {
        !matches!(self, Self::Primary(_))
    }
}

impl Provider {
    /// Template used for `kind`.
    #[must_use]
    pub const fn template(&self, kind: MediaKind) -> &UrlTemplate {
        match kind {
            MediaKind::Movie => &self.movie,
            MediaKind::Series => &self.series,
        }
    }

    /// Maps a request to a link. Pure; no network access.
    #[must_use]
    pub fn resolve(&self, request: &PlaybackRequest) -> Resolution {
        let template = self.template(request.kind);
        if template.needs_external_id() && request.external_id().is_none() {
            return match self.missing_external_id {
                MissingExternalId::Fallback => {
                    debug!(provider = %self.id, "external ID missing, using shared fallback");
                    let fallback = match request.kind {
                        MediaKind::Movie => &SHARED_FALLBACK.movie,
                        MediaKind::Series => &SHARED_FALLBACK.series,
                    };
                    to_url(&self.id, fallback, request)
                        .map_or_else(Resolution::Unavailable, Resolution::Fallback)
                }
                MissingExternalId::Unavailable => {
                    Resolution::Unavailable(Unavailable::MissingExternalId)
                }
            };
        }
        to_url(&self.id, template, request)
            .map_or_else(Resolution::Unavailable, Resolution::Primary)
    }
}

fn to_url(
    provider: &str,
    template: &UrlTemplate,
    request: &PlaybackRequest,
) -> Result<Url, Unavailable> {
    let rendered = template
        .render(request)
        .ok_or(Unavailable::MissingExternalId)?;
    Url::parse(&rendered).map_err(|e| {
        warn!(provider, url = %rendered, "rendered link is not a valid URL: {e}");
        Unavailable::InvalidUrl(rendered)
    })
}
