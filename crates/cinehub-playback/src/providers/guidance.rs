//! Per-provider viewing guidance shown next to the player.

use serde::{Deserialize, Serialize};

/// Closed set of guidance variants a provider may carry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Guidance {
    /// Player serves the given language automatically.
    LanguageFocus {
        /// Display name of the language, e.g. `Portuguese`.
        language: String,
    },
    /// Dual-audio player where the viewer must switch the track by hand.
    ManualAudioStep {
        /// Display name of the track to pick.
        language: String,
    },
    /// Player offering several audio, subtitle or server options.
    MultiOption,
}

/// Visual weight of a guidance badge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    /// Works without viewer action.
    Positive,
    /// Viewer action required.
    Caution,
    /// Informational.
    Neutral,
}

impl Guidance {
    /// Short headline.
    #[must_use]
    pub fn headline(&self) -> String {
        match self {
            Self::LanguageFocus { language } => format!("Focused on {language} audio"),
            Self::ManualAudioStep { .. } => String::from("Manual step required"),
            Self::MultiOption => String::from("Check the available options"),
        }
    }

    /// One-paragraph tip.
    #[must_use]
    pub fn tip(&self) -> String {
        match self {
            Self::LanguageFocus { language } => format!(
                "This player serves dubbed or {language}-subtitled content automatically."
            ),
            Self::ManualAudioStep { language } => format!(
                "This player has dual audio. If it starts in another language, open the \
                 gear menu inside the video, choose Audio and select {language}."
            ),
            Self::MultiOption => String::from(
                "This player may offer several audio, subtitle and server options. \
                 Use the gear, CC or Sources controls inside the video to switch.",
            ),
        }
    }

    /// Badge label.
    #[must_use]
    pub const fn badge(&self) -> &'static str {
        match self {
            Self::LanguageFocus { .. } => "Dubbed/Auto",
            Self::ManualAudioStep { .. } => "Dual Audio",
            Self::MultiOption => "Multi Option",
        }
    }

    /// Badge tone.
    #[must_use]
    pub const fn tone(&self) -> Tone {
        match self {
            Self::LanguageFocus { .. } => Tone::Positive,
            Self::ManualAudioStep { .. } => Tone::Caution,
            Self::MultiOption => Tone::Neutral,
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    #[derive(Debug, Deserialize)]
    struct Wrapper {
        guidance: Guidance,
    }

    #[test]
    fn test_deserialize_tagged_variant() {
        // Arrange
        let input = "[guidance]\nkind = \"manual_audio_step\"\nlanguage = \"Portuguese\"\n";

        // Act
        let wrapper: Wrapper = toml::from_str(input).unwrap();

        // Assert
        assert_eq!(
            wrapper.guidance,
            Guidance::ManualAudioStep {
                language: String::from("Portuguese")
            }
        );
        assert_eq!(wrapper.guidance.badge(), "Dual Audio");
        assert_eq!(wrapper.guidance.tone(), Tone::Caution);
        assert!(wrapper.guidance.tip().contains("select Portuguese"));
    }

    #[test]
    fn test_deserialize_unit_variant() {
        // Act
        let wrapper: Wrapper = toml::from_str("[guidance]\nkind = \"multi_option\"\n").unwrap();

        // Assert
        assert_eq!(wrapper.guidance, Guidance::MultiOption);
    }

    #[test]
    fn test_deserialize_unknown_kind_fails() {
        let result: Result<Wrapper, _> = toml::from_str("[guidance]\nkind = \"karaoke\"\n");
        assert!(result.is_err());
    }

    #[test]
    fn test_language_focus_texts() {
        // Arrange
        let guidance = Guidance::LanguageFocus {
            language: String::from("Portuguese"),
        };

        // Act & Assert
        assert_eq!(guidance.headline(), "Focused on Portuguese audio");
        assert_eq!(guidance.badge(), "Dubbed/Auto");
        assert_eq!(guidance.tone(), Tone::Positive);
    }
}
