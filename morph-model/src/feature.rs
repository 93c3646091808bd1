//! Grammatical features: the categories a feature can belong to and the feature values themselves.

use std::hash::{Hash, Hasher};

use enumap::EnuMap;
use parse_display::{Display, FromStr};

use crate::error::{Result, ValidationError, require_non_empty};

/// A grammatical category. Displays as, and parses from, the tag used in morphology data.
#[derive(
    Clone,
    Copy,
    Debug,
    Hash,
    Eq,
    PartialEq,
    Ord,
    PartialOrd,
    Display,
    FromStr,
    EnuMap,
    serde::Serialize,
    serde::Deserialize,
)]
#[display(style = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum FeatureKind {
    #[display("part of speech")]
    #[serde(rename = "part of speech")]
    PartOfSpeech,
    Number,
    Case,
    Declension,
    Gender,
    /// Regular or irregular verb.
    #[display("type")]
    #[serde(rename = "type")]
    VerbType,
    Conjugation,
    /// Degree of comparison
    Comparison,
    Tense,
    Voice,
    Mood,
    Person,
    /// How frequent this word is
    Frequency,
    Meaning,
    /// Source of a word definition
    Source,
    /// A footnote for a word's ending
    Footnote,
    Dialect,
    /// An explicit sort feature supplied by some analyzers
    Sort,
}

impl FeatureKind {
    /// Parses a category tag such as `"case"` or `"part of speech"`.
    pub fn from_tag(tag: &str) -> Result<Self, ValidationError> {
        require_non_empty(tag, "feature type")?;
        tag.parse()
            .map_err(|_| ValidationError::UnsupportedFeatureType(tag.to_string()))
    }
}

/// The value of a feature. Some features carry several values at once, such as masculine and feminine.
#[derive(Clone, Debug, Hash, Eq, PartialEq, Ord, PartialOrd, serde::Serialize, serde::Deserialize)]
#[serde(untagged)]
pub enum FeatureValue {
    Single(String),
    Multiple(Vec<String>),
}

impl FeatureValue {
    pub fn values(&self) -> &[String] {
        match self {
            FeatureValue::Single(value) => std::slice::from_ref(value),
            FeatureValue::Multiple(values) => values,
        }
    }

    /// True when there is no value at all, or one of the values is an empty string.
    pub fn is_empty(&self) -> bool {
        let values = self.values();
        values.is_empty() || values.iter().any(|v| v.is_empty())
    }

    pub fn contains(&self, value: &str) -> bool {
        self.values().iter().any(|v| v == value)
    }

    /// An unambiguous rendering: values are quoted and escaped, and a multi value is
    /// bracketed, so `["a" "b"]` cannot be confused with `"a b"`.
    pub fn to_canonical_string(&self) -> String {
        match self {
            FeatureValue::Single(value) => format!("{value:?}"),
            FeatureValue::Multiple(values) => {
                let quoted: Vec<String> = values.iter().map(|v| format!("{v:?}")).collect();
                format!("[{}]", quoted.join(" "))
            }
        }
    }
}

impl std::fmt::Display for FeatureValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FeatureValue::Single(value) => write!(f, "{value}"),
            FeatureValue::Multiple(values) => write!(f, "{}", values.join(" ")),
        }
    }
}

impl From<&str> for FeatureValue {
    fn from(value: &str) -> Self {
        FeatureValue::Single(value.to_string())
    }
}

impl From<String> for FeatureValue {
    fn from(value: String) -> Self {
        FeatureValue::Single(value)
    }
}

impl From<Vec<String>> for FeatureValue {
    fn from(values: Vec<String>) -> Self {
        FeatureValue::Multiple(values)
    }
}

impl From<Vec<&str>> for FeatureValue {
    fn from(values: Vec<&str>) -> Self {
        FeatureValue::Multiple(values.into_iter().map(str::to_string).collect())
    }
}

/// A single grammatical feature, e.g. the nominative case of a Latin word.
///
/// Features are immutable once built. Equality compares value, kind and language;
/// the sort order is a display hint and is not part of a feature's identity.
#[derive(Clone, Debug)]
pub struct Feature {
    value: FeatureValue,
    kind: FeatureKind,
    language: String,
    sort_order: Option<u32>,
}

impl Feature {
    pub fn new(
        value: impl Into<FeatureValue>,
        kind: FeatureKind,
        language: impl Into<String>,
    ) -> Result<Self> {
        let value = value.into();
        let language = language.into();
        if value.is_empty() {
            return Err(ValidationError::Empty { field: "value" }.into());
        }
        require_non_empty(&language, "language")?;
        Ok(Self {
            value,
            kind,
            language,
            sort_order: None,
        })
    }

    /// Like [`Feature::new`], with the category given as a tag string.
    pub fn from_tag(
        value: impl Into<FeatureValue>,
        tag: &str,
        language: impl Into<String>,
    ) -> Result<Self> {
        let kind = FeatureKind::from_tag(tag)?;
        Self::new(value, kind, language)
    }

    pub fn with_sort_order(mut self, sort_order: u32) -> Self {
        self.sort_order = Some(sort_order);
        self
    }

    pub fn value(&self) -> &FeatureValue {
        &self.value
    }

    pub fn kind(&self) -> FeatureKind {
        self.kind
    }

    pub fn language(&self) -> &str {
        &self.language
    }

    pub fn sort_order(&self) -> Option<u32> {
        self.sort_order
    }

    /// True if `value` is this feature's value, or one of its values.
    pub fn has_value(&self, value: &str) -> bool {
        self.value.contains(value)
    }
}

impl PartialEq for Feature {
    fn eq(&self, other: &Self) -> bool {
        self.kind == other.kind && self.language == other.language && self.value == other.value
    }
}

impl Eq for Feature {}

impl Hash for Feature {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.kind.hash(state);
        self.language.hash(state);
        self.value.hash(state);
    }
}

impl std::fmt::Display for Feature {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.value)
    }
}
