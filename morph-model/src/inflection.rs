//! Hierarchical structure of the result of a morphological analysis:
//!
//! - a homonym: every lexeme written the same way
//!   - a lexeme: a unit of lexical meaning, one lemma and one or more inflections
//!     - the lemma (headword), the canonical form of the word
//!     - an inflection: stem, optional prefix and suffix, grammatical features
//!
//! This module holds the inflection.

use crate::error::{ConsistencyError, Result, ValidationError, require_non_empty};
use crate::feature::{Feature, FeatureKind, FeatureKindMap};
use crate::language::LanguageSupport;

/// One attested form of a word: a stem with its affixes, tagged with grammatical features.
///
/// Features are kept in one slot per [`FeatureKind`]; a slot holds a list so that a
/// form can be, say, both masculine and feminine. An unset slot reads as empty.
#[derive(Clone, Debug, PartialEq)]
pub struct Inflection {
    stem: String,
    language: String,
    suffix: Option<String>,
    prefix: Option<String>,
    example: Option<String>,
    features: FeatureKindMap<Vec<Feature>>,
}

fn non_empty(value: impl Into<String>) -> Option<String> {
    Some(value.into()).filter(|v| !v.is_empty())
}

impl Inflection {
    pub fn new(
        stem: impl Into<String>,
        language: impl Into<String>,
        languages: &impl LanguageSupport,
    ) -> Result<Self> {
        let stem = stem.into();
        let language = language.into();
        require_non_empty(&stem, "stem")?;
        require_non_empty(&language, "language")?;
        if !languages.supports_language(&language) {
            return Err(ValidationError::UnsupportedLanguage(language).into());
        }

        Ok(Self {
            stem,
            language,
            suffix: None,
            prefix: None,
            example: None,
            features: FeatureKindMap::default(),
        })
    }

    pub fn with_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.suffix = non_empty(suffix);
        self
    }

    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = non_empty(prefix);
        self
    }

    pub fn with_example(mut self, example: impl Into<String>) -> Self {
        self.example = non_empty(example);
        self
    }

    pub fn stem(&self) -> &str {
        &self.stem
    }

    pub fn language(&self) -> &str {
        &self.language
    }

    pub fn suffix(&self) -> Option<&str> {
        self.suffix.as_deref()
    }

    pub fn prefix(&self) -> Option<&str> {
        self.prefix.as_deref()
    }

    pub fn example(&self) -> Option<&str> {
        self.example.as_deref()
    }

    /// Attaches a single feature, replacing whatever was stored for its kind.
    pub fn add_feature(&mut self, feature: Feature) -> Result<()> {
        self.add_features(vec![feature])
    }

    /// Attaches several values of one feature kind at once, e.g. masculine and feminine.
    /// The slot for that kind is replaced, not extended. Nothing changes if any feature is rejected.
    pub fn add_features(&mut self, features: Vec<Feature>) -> Result<()> {
        let Some(first) = features.first() else {
            return Err(ValidationError::Empty {
                field: "feature list",
            }
            .into());
        };
        let kind = first.kind();

        for feature in &features {
            if feature.language() != self.language {
                return Err(ConsistencyError::LanguageMismatch {
                    feature_language: feature.language().to_string(),
                    inflection_language: self.language.clone(),
                }
                .into());
            }
            if feature.kind() != kind {
                return Err(ConsistencyError::MixedFeatureKinds {
                    expected: kind,
                    found: feature.kind(),
                }
                .into());
            }
        }

        self.features.insert(&kind, features);
        Ok(())
    }

    /// The features stored for `kind`; empty if none were attached.
    pub fn feature(&self, kind: FeatureKind) -> &[Feature] {
        self.features.get(&kind)
    }

    pub fn has_feature(&self, kind: FeatureKind) -> bool {
        !self.feature(kind).is_empty()
    }

    /// Every non-empty feature slot, in [`FeatureKind`] declaration order.
    pub fn features(&self) -> impl Iterator<Item = (FeatureKind, &[Feature])> + '_ {
        self.features
            .iter()
            .filter(|(_, features)| !features.is_empty())
            .map(|(kind, features)| (kind, features.as_slice()))
    }

    /// Whether this inflection and `other` share at least one value of `kind`,
    /// i.e. whether they agree in that feature.
    pub fn feature_match(&self, kind: FeatureKind, other: &Inflection) -> bool {
        let theirs = other.feature(kind);
        self.feature(kind).iter().any(|f| theirs.contains(f))
    }
}

impl std::fmt::Display for Inflection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if let Some(prefix) = &self.prefix {
            write!(f, "{prefix}-")?;
        }
        write!(f, "{}", self.stem)?;
        if let Some(suffix) = &self.suffix {
            write!(f, "-{suffix}")?;
        }
        Ok(())
    }
}
