//! Style catalog for review rewriting
//!
//! Each style names a rewriting objective and maps to an embedded
//! long-form rubric that is passed through to the completion provider
//! unchanged. The set is closed; unknown labels fail at lookup time.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Embedded rubric text for each style
const AUTO_IMPROVE_RUBRIC: &str = include_str!("style/rubrics/auto_improve.md");
const SHORTEN_RUBRIC: &str = include_str!("style/rubrics/shorten.md");
const EXPAND_RUBRIC: &str = include_str!("style/rubrics/expand.md");
const PROFESSIONAL_TONE_RUBRIC: &str = include_str!("style/rubrics/professional_tone.md");
const PERSUASIVE_TONE_RUBRIC: &str = include_str!("style/rubrics/persuasive_tone.md");
const FIX_MISTAKES_ONLY_RUBRIC: &str = include_str!("style/rubrics/fix_mistakes_only.md");

/// A named rewriting objective
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum Style {
    /// General quality pass over grammar, style, and coherence
    #[default]
    AutoImprove,
    /// Condense the review while preserving key points
    Shorten,
    /// Add depth and detail to the review
    Expand,
    /// Rewrite with a formal, professional register
    ProfessionalTone,
    /// Rewrite to be compelling and action-oriented
    PersuasiveTone,
    /// Correct errors without changing tone or meaning
    FixMistakesOnly,
}

impl Style {
    /// Get all styles in the catalog, in form display order
    pub fn all() -> &'static [Style] {
        &[
            Style::AutoImprove,
            Style::Shorten,
            Style::Expand,
            Style::ProfessionalTone,
            Style::PersuasiveTone,
            Style::FixMistakesOnly,
        ]
    }

    /// Get the human-facing label used in the submission form
    pub fn label(&self) -> &'static str {
        match self {
            Style::AutoImprove => "Auto-Improve",
            Style::Shorten => "Shorten",
            Style::Expand => "Expand",
            Style::ProfessionalTone => "Professional Tone",
            Style::PersuasiveTone => "Persuasive Tone",
            Style::FixMistakesOnly => "Fix Mistakes Only",
        }
    }

    /// Resolve a form label to a catalog entry
    ///
    /// Labels match exactly; there is no fuzzy fallback. An unknown
    /// label is a client error, not a silent default.
    pub fn from_label(label: &str) -> Result<Style> {
        Style::all()
            .iter()
            .copied()
            .find(|style| style.label() == label)
            .ok_or_else(|| Error::UnknownStyle(label.to_string()))
    }

    /// Get the rewriting rubric sent to the completion provider
    pub fn instructions(&self) -> &'static str {
        match self {
            Style::AutoImprove => AUTO_IMPROVE_RUBRIC,
            Style::Shorten => SHORTEN_RUBRIC,
            Style::Expand => EXPAND_RUBRIC,
            Style::ProfessionalTone => PROFESSIONAL_TONE_RUBRIC,
            Style::PersuasiveTone => PERSUASIVE_TONE_RUBRIC,
            Style::FixMistakesOnly => FIX_MISTAKES_ONLY_RUBRIC,
        }
    }
}

impl fmt::Display for Style {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}
