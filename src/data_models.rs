use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

pub const MIN_RESULT_COUNT: u32 = 1;
pub const MAX_RESULT_COUNT: u32 = 10;

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    En,
    Ru,
    Uk,
}

impl Language {
    pub fn code(&self) -> &'static str {
        match self {
            Language::En => "en",
            Language::Ru => "ru",
            Language::Uk => "uk",
        }
    }

    /// Parses a query-string value, falling back to English for anything unknown.
    pub fn from_param(value: Option<&str>) -> Language {
        value
            .and_then(|v| v.parse().ok())
            .unwrap_or(Language::En)
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
#[error("unsupported language: {0}")]
pub struct UnknownLanguage(pub String);

impl FromStr for Language {
    type Err = UnknownLanguage;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "en" => Ok(Language::En),
            "ru" => Ok(Language::Ru),
            // "ua" is the country code people reach for first
            "uk" | "ua" => Ok(Language::Uk),
            other => Err(UnknownLanguage(other.to_string())),
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct SearchResultItem {
    pub title: String,
    pub snippet: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    pub text: String,
    pub language: Language,
    pub country: Option<String>,
    pub country_restrict: Option<String>,
    result_count: u32,
    start_index: u32,
}

impl SearchQuery {
    pub fn new(text: impl Into<String>, language: Language) -> SearchQuery {
        SearchQuery {
            text: text.into(),
            language,
            country: None,
            country_restrict: None,
            result_count: MAX_RESULT_COUNT,
            start_index: 1,
        }
    }

    pub fn with_country(mut self, country: impl Into<String>) -> Self {
        self.country = Some(country.into());
        self
    }

    pub fn with_country_restrict(mut self, restrict: impl Into<String>) -> Self {
        self.country_restrict = Some(restrict.into());
        self
    }

    pub fn with_result_count(mut self, count: u32) -> Self {
        self.result_count = clamp_result_count(count);
        self
    }

    pub fn with_start_index(mut self, start: u32) -> Self {
        self.start_index = start.max(1);
        self
    }

    pub fn result_count(&self) -> u32 {
        self.result_count
    }

    pub fn start_index(&self) -> u32 {
        self.start_index
    }
}

pub fn clamp_result_count(count: u32) -> u32 {
    count.clamp(MIN_RESULT_COUNT, MAX_RESULT_COUNT)
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeadingLevel {
    H1,
    H2,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct OutlineNode {
    pub level: HeadingLevel,
    pub text: String,
}

impl OutlineNode {
    pub fn h1(text: impl Into<String>) -> OutlineNode {
        OutlineNode {
            level: HeadingLevel::H1,
            text: text.into(),
        }
    }

    pub fn h2(text: impl Into<String>) -> OutlineNode {
        OutlineNode {
            level: HeadingLevel::H2,
            text: text.into(),
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ScoreKind {
    Wateriness,
    Uniqueness,
}

/// A percentage in [0, 100], already rounded to two decimals.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct ScoreResult {
    pub kind: ScoreKind,
    pub value: f64,
}
