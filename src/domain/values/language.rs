use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Which rendering of a commodity name a label is written in.
///
/// `Primary` is the common display language (English); `Secondary` is the
/// local language the APMC pages publish in (Marathi).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LanguageForm {
    Primary,
    Secondary,
}

impl fmt::Display for LanguageForm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LanguageForm::Primary => write!(f, "english"),
            LanguageForm::Secondary => write!(f, "marathi"),
        }
    }
}

impl FromStr for LanguageForm {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "english" | "en" | "primary" => Ok(LanguageForm::Primary),
            "marathi" | "mr" | "secondary" => Ok(LanguageForm::Secondary),
            _ => Err(format!("Unknown language: {s}")),
        }
    }
}

/// Both renderings of one commodity name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommodityName {
    pub primary: String,
    pub secondary: String,
}

impl CommodityName {
    pub fn new(primary: impl Into<String>, secondary: impl Into<String>) -> Self {
        Self {
            primary: primary.into(),
            secondary: secondary.into(),
        }
    }

    /// Label echoed unchanged into both forms.
    pub fn passthrough(label: &str) -> Self {
        Self::new(label, label)
    }

    pub fn matches(&self, label: &str) -> bool {
        self.primary == label || self.secondary == label
    }
}
