use serde::{Deserialize, Serialize};

use crate::error::{Result, require_non_empty};

/// Translations of a lemma into a destination language.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Translation {
    input: String,
    map: String,
    translations: Vec<String>,
}

impl Translation {
    /// `input` is the translated lemma and `map` names the language pair it was
    /// translated through, e.g. `lat-eng`.
    pub fn new(
        input: impl Into<String>,
        map: impl Into<String>,
        translations: Vec<String>,
    ) -> Result<Self> {
        let input = input.into();
        require_non_empty(&input, "translation input")?;
        Ok(Self {
            input,
            map: map.into(),
            translations,
        })
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn map(&self) -> &str {
        &self.map
    }

    pub fn translations(&self) -> &[String] {
        &self.translations
    }
}

/// A translation as it appears in analysis data: `{"in": ..., "map": ..., "translations": [...]}`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranslationRecord {
    #[serde(rename = "in")]
    pub input: String,
    #[serde(default)]
    pub map: String,
    #[serde(default)]
    pub translations: Vec<String>,
}

impl TranslationRecord {
    pub fn into_translation(self) -> Result<Translation> {
        Translation::new(self.input, self.map, self.translations)
    }
}

impl From<&Translation> for TranslationRecord {
    fn from(translation: &Translation) -> Self {
        Self {
            input: translation.input.clone(),
            map: translation.map.clone(),
            translations: translation.translations.clone(),
        }
    }
}
