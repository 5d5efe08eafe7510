//! Ordered provider registry.

use std::collections::HashSet;
use std::sync::LazyLock;

use anyhow::{Result, bail, ensure};
use tracing::debug;

use super::guidance::Guidance;
use super::provider::{MissingExternalId, Provider, ReferrerPolicy, Resolution, Unavailable};
use super::request::PlaybackRequest;
use super::template::UrlTemplate;

/// Display name of the language the built-in dubbed provider focuses on.
const FOCUS_LANGUAGE: &str = "Portuguese";

#[allow(clippy::expect_used)]
static BUILTIN: LazyLock<Registry> =
    LazyLock::new(|| builtin_registry().expect("built-in providers are valid"));

/// Compiled-in provider row.
struct Builtin<'a> {
    id: &'a str,
    name: &'a str,
    guidance: Guidance,
    note: &'a str,
    movie: &'a str,
    series: &'a str,
}

impl Builtin<'_> {
    fn into_provider(self) -> Result<Provider> {
        Ok(Provider {
            id: self.id.to_owned(),
            name: self.name.to_owned(),
            referrer_policy: ReferrerPolicy::NoReferrer,
            guidance: Some(self.guidance),
            note: Some(self.note.to_owned()),
            movie: UrlTemplate::parse(self.movie)?,
            series: UrlTemplate::parse(self.series)?,
            missing_external_id: MissingExternalId::Fallback,
        })
    }
}

// Only vocesabia is dubbed by default; the others ship several audio tracks.
fn builtin_registry() -> Result<Registry> {
    Registry::new(vec![
        Builtin {
            id: "supertv",
            name: "Opção 1 (PT-BR)",
            guidance: Guidance::MultiOption,
            note: "Fonte recomendada para conteúdo DUBLADO e LEGENDADO em português.",
            movie: "https://supertv.store/player/filme.php?tmdb={id}",
            series: "https://supertv.store/player/serie.php?tmdb={id}&temp={season}&ep={episode}",
        }
        .into_provider()?,
        Builtin {
            id: "vidsrc",
            name: "Opção 2 (Multi)",
            guidance: Guidance::MultiOption,
            note: "Player multi-servidor. Use o botão \"Fontes\" ou \"Sources\" para trocar \
                   de servidor se um falhar.",
            movie: "https://vidsrc.to/embed/movie/{id}",
            series: "https://vidsrc.to/embed/tv/{id}/{season}/{episode}",
        }
        .into_provider()?,
        Builtin {
            id: "vocesabia",
            name: "Opção 3 (Dublado)",
            guidance: Guidance::LanguageFocus {
                language: FOCUS_LANGUAGE.to_owned(),
            },
            note: "Ótima fonte para conteúdo DUBLADO. Requer ID externo (IMDB).",
            movie: "https://vocesabia.video/imdb/{external_id}",
            series: "https://vocesabia.video/imdb/{external_id}/{season}/{episode}",
        }
        .into_provider()?,
        Builtin {
            id: "upstream",
            name: "Opção 4 (Alternativa)",
            guidance: Guidance::MultiOption,
            note: "Servidor alternativo confiável. Requer ID externo (IMDB).",
            movie: "https://upstream.to/embed-movie/{external_id}",
            series: "https://upstream.to/embed-tv/{external_id}/{season}/{episode}",
        }
        .into_provider()?,
    ])
}

/// Immutable, ordered, non-empty sequence of providers.
///
/// Order defines the default and display priority; the first provider is
/// the one playback starts with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Registry {
    default: Provider,
    rest: Vec<Provider>,
}

impl Registry {
    /// Builds a registry from an ordered list.
    ///
    /// # Errors
    ///
    /// Returns an error if the list is empty or contains duplicate IDs.
    pub fn new(providers: Vec<Provider>) -> Result<Self> {
        {
            let mut seen = HashSet::new();
            for provider in &providers {
                ensure!(
                    !provider.id.trim().is_empty(),
                    "provider ID must not be empty"
                );
                if !seen.insert(provider.id.as_str()) {
                    bail!("duplicate provider ID: {}", provider.id);
                }
            }
        }

        let mut iter = providers.into_iter();
        let Some(default) = iter.next() else {
            bail!("provider registry must not be empty");
        };
        Ok(Self {
            default,
            rest: iter.collect(),
        })
    }

    /// The built-in registry: `supertv`, `vidsrc`, `vocesabia`, `upstream`.
    #[must_use]
    pub fn builtin() -> Self {
        BUILTIN.clone()
    }

    /// Appends `extra` after the existing providers.
    ///
    /// # Errors
    ///
    /// Returns an error if an extra provider reuses an existing ID.
    pub fn with_extra(&self, extra: Vec<Provider>) -> Result<Self> {
        debug!(count = extra.len(), "appending configured providers");
        Self::new(self.iter().cloned().chain(extra).collect())
    }

    /// Provider playback starts with.
    #[must_use]
    pub const fn default_provider(&self) -> &Provider {
        &self.default
    }

    /// Looks a provider up by ID.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&Provider> {
        self.iter().find(|p| p.id == id)
    }

    /// Providers in registry order.
    pub fn iter(&self) -> impl Iterator<Item = &Provider> {
        std::iter::once(&self.default).chain(self.rest.iter())
    }

    /// Number of providers. Never zero.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.rest.len().saturating_add(1)
    }

    /// Always `false`; present for API symmetry with `len`.
    #[must_use]
    #[allow(clippy::unused_self)]
    pub const fn is_empty(&self) -> bool {
        false
    }

    /// Resolves `request` through the provider named `selection`.
    #[must_use]
    pub fn resolve(&self, selection: &str, request: &PlaybackRequest) -> Resolution {
        self.get(selection).map_or_else(
            || Resolution::Unavailable(Unavailable::UnknownProvider(selection.to_owned())),
            |provider| provider.resolve(request),
        )
    }
}
