//! Embed URL templates.
//!
//! A template is a literal URL with placeholders in braces:
//! `{id}`, `{external_id}`, `{season}`, `{episode}`, and the zero-padded
//! `{season:02}` / `{episode:02}`.

use std::fmt;

use anyhow::{Context, Result, bail, ensure};
use serde::{Deserialize, Serialize};

use super::request::PlaybackRequest;

/// Request field referenced by a placeholder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    Id,
    ExternalId,
    Season { padded: bool },
    Episode { padded: bool },
}

impl Field {
    fn parse(name: &str) -> Result<Self> {
        Ok(match name {
            "id" => Self::Id,
            "external_id" => Self::ExternalId,
            "season" => Self::Season { padded: false },
            "season:02" => Self::Season { padded: true },
            "episode" => Self::Episode { padded: false },
            "episode:02" => Self::Episode { padded: true },
            other => bail!("unknown placeholder {{{other}}}"),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    Field(Field),
}

/// Parsed URL template.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
#[allow(clippy::module_name_repetitions)]
pub struct UrlTemplate {
    source: String,
    segments: Vec<Segment>,
}

impl UrlTemplate {
    /// Parses a template string.
    ///
    /// # Errors
    ///
    /// Returns an error on an empty template, an unclosed brace, or an
    /// unknown placeholder name.
    pub fn parse(source: &str) -> Result<Self> {
        ensure!(!source.trim().is_empty(), "URL template is empty");

        let mut segments = Vec::new();
        let mut rest = source;
        while let Some(open) = rest.find('{') {
            let (literal, tail) = rest.split_at(open);
            if !literal.is_empty() {
                segments.push(Segment::Literal(literal.to_owned()));
            }
            let close = tail
                .find('}')
                .with_context(|| format!("unclosed placeholder in template: {source}"))?;
            let name = tail.get(1..close).unwrap_or_default();
            let field =
                Field::parse(name).with_context(|| format!("invalid template: {source}"))?;
            segments.push(Segment::Field(field));
            rest = tail.get(close.saturating_add(1)..).unwrap_or_default();
        }
        if !rest.is_empty() {
            segments.push(Segment::Literal(rest.to_owned()));
        }

        Ok(Self {
            source: source.to_owned(),
            segments,
        })
    }

    /// Original template text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// Whether rendering requires an external ID.
    #[must_use]
    pub fn needs_external_id(&self) -> bool {
        self.segments
            .iter()
            .any(|s| matches!(s, Segment::Field(Field::ExternalId)))
    }

    /// Substitutes request fields into the template.
    ///
    /// Returns `None` when the template needs an external ID the request
    /// does not carry.
    #[must_use]
    pub fn render(&self, request: &PlaybackRequest) -> Option<String> {
        let mut out = String::with_capacity(self.source.len());
        for segment in &self.segments {
            match segment {
                Segment::Literal(text) => out.push_str(text),
                Segment::Field(Field::Id) => out.push_str(&request.content_id.to_string()),
                Segment::Field(Field::ExternalId) => out.push_str(request.external_id()?),
                Segment::Field(Field::Season { padded }) => {
                    out.push_str(&number(request.season, *padded));
                }
                Segment::Field(Field::Episode { padded }) => {
                    out.push_str(&number(request.episode, *padded));
                }
            }
        }
        Some(out)
    }
}

fn number(value: u32, padded: bool) -> String {
    if padded {
        format!("{value:02}")
    } else {
        value.to_string()
    }
}

impl fmt::Display for UrlTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

impl TryFrom<String> for UrlTemplate {
    type Error = anyhow::Error;

    fn try_from(value: String) -> Result<Self> {
        Self::parse(&value)
    }
}

impl From<UrlTemplate> for String {
    fn from(value: UrlTemplate) -> Self {
        value.source
    }
}
