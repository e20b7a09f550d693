//! Data models and structures
//!
//! Defines the analysis inputs (tone, length tier, jewelry attributes), the
//! derived word budget, the service result and the runtime configuration.

use clap::ValueEnum;
use std::fmt;
use std::time::Duration;

/// Stylistic directive injected verbatim into the generation prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum Tone {
    /// No specific tone
    #[default]
    Original,
    /// Business-like and competent
    Professional,
    /// Celebratory and culturally rich
    Festive,
    /// Elaborate and ornate language
    Flowery,
}

impl Tone {
    pub fn label(self) -> &'static str {
        match self {
            Tone::Original => "Original",
            Tone::Professional => "Professional",
            Tone::Festive => "Festive",
            Tone::Flowery => "Flowery",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Tone::Original => "No specific tone",
            Tone::Professional => "Business-like and competent",
            Tone::Festive => "Celebratory and culturally rich",
            Tone::Flowery => "Elaborate and ornate language",
        }
    }
}

impl fmt::Display for Tone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Coarse description length, mapped to a base word range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum LengthTier {
    /// 20-30 words
    #[default]
    Short,
    /// 40-50 words
    Medium,
    /// 60-70 words
    Long,
}

impl LengthTier {
    pub fn label(self) -> &'static str {
        match self {
            LengthTier::Short => "20-30 words",
            LengthTier::Medium => "40-50 words",
            LengthTier::Long => "60-70 words",
        }
    }
}

/// One of the optional structured facts a user may supply about the piece.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum JewelryAttribute {
    Carat,
    Weight,
    Color,
    Metal,
    DiamondType,
    Size,
}

impl JewelryAttribute {
    /// All attributes, in the order they are listed in the prompt.
    pub const ALL: [JewelryAttribute; 6] = [
        JewelryAttribute::Carat,
        JewelryAttribute::Weight,
        JewelryAttribute::Color,
        JewelryAttribute::Metal,
        JewelryAttribute::DiamondType,
        JewelryAttribute::Size,
    ];

    pub fn label(self) -> &'static str {
        match self {
            JewelryAttribute::Carat => "Carat",
            JewelryAttribute::Weight => "Weight in grams",
            JewelryAttribute::Color => "Color",
            JewelryAttribute::Metal => "Metal",
            JewelryAttribute::DiamondType => "Diamond type",
            JewelryAttribute::Size => "Size in cm",
        }
    }

    fn index(self) -> usize {
        self as usize
    }
}

/// User-supplied attribute values, kept verbatim. Only the empty string
/// counts as absent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct JewelryAttributes {
    values: [Option<String>; 6],
}

impl JewelryAttributes {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, attribute: JewelryAttribute, value: impl Into<String>) {
        let value = value.into();
        self.values[attribute.index()] = if value.is_empty() {
            None
        } else {
            Some(value)
        };
    }

    pub fn with(mut self, attribute: JewelryAttribute, value: impl Into<String>) -> Self {
        self.set(attribute, value);
        self
    }

    pub fn get(&self, attribute: JewelryAttribute) -> Option<&str> {
        self.values[attribute.index()].as_deref()
    }

    /// True when at least one attribute has a value.
    pub fn has_any(&self) -> bool {
        self.values.iter().any(Option::is_some)
    }

    /// Filled attributes in prompt order.
    pub fn filled(&self) -> impl Iterator<Item = (JewelryAttribute, &str)> + '_ {
        JewelryAttribute::ALL
            .into_iter()
            .filter_map(|attribute| self.get(attribute).map(|value| (attribute, value)))
    }
}

/// Everything needed for one analysis.
#[derive(Debug, Clone)]
pub struct AnalysisRequest {
    pub image: Vec<u8>,
    pub tone: Tone,
    pub length: LengthTier,
    pub additional_context: Option<String>,
    pub attributes: JewelryAttributes,
}

impl AnalysisRequest {
    pub fn has_context(&self) -> bool {
        self.additional_context
            .as_deref()
            .is_some_and(|context| !context.trim().is_empty())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WordBudget {
    pub min: u32,
    pub max: u32,
}

/// Raw text returned by the generation service.
///
/// Expected to hold "Image Analysis:", "Product Description:" and "Caption:"
/// sections, but nothing here checks that.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalysisResult(pub String);

impl AnalysisResult {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AnalysisResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

pub const DEFAULT_BASE_URL: &str = "https://api.openai.com";
pub const DEFAULT_MODEL: &str = "gpt-4o";
pub const DEFAULT_MAX_TOKENS: u32 = 1000;

// Configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub api_key: Option<String>,
    pub base_url: String,
    pub model: String,
    pub max_tokens: u32,
    pub timeout: Option<Duration>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: DEFAULT_BASE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            max_tokens: DEFAULT_MAX_TOKENS,
            timeout: None,
        }
    }
}

impl Config {
    pub fn from_env() -> crate::Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a config from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> crate::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let max_tokens = match lookup("ANALYZER_MAX_TOKENS") {
            Some(raw) => raw.trim().parse::<u32>().map_err(|_| {
                crate::Error::Config(format!("ANALYZER_MAX_TOKENS must be a number, got '{}'", raw))
            })?,
            None => defaults.max_tokens,
        };

        let timeout = match lookup("ANALYZER_TIMEOUT_SECS") {
            Some(raw) => match raw.trim().parse::<u64>() {
                Ok(secs) if secs > 0 => Some(Duration::from_secs(secs)),
                _ => {
                    return Err(crate::Error::Config(format!(
                        "ANALYZER_TIMEOUT_SECS must be a positive number of seconds, got '{}'",
                        raw
                    )))
                }
            },
            None => None,
        };

        Ok(Self {
            api_key: lookup("OPENAI_API_KEY").filter(|key| !key.trim().is_empty()),
            base_url: lookup("OPENAI_BASE_URL").unwrap_or(defaults.base_url),
            model: lookup("ANALYZER_MODEL").unwrap_or(defaults.model),
            max_tokens,
            timeout,
        })
    }

    /// The API key, or [`crate::Error::MissingApiKey`] when none is configured.
    pub fn require_api_key(&self) -> crate::Result<&str> {
        self.api_key
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty())
            .ok_or(crate::Error::MissingApiKey)
    }
}
