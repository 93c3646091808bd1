//! Plain serde records for reading analyses from JSON. Each record converts into its
//! model type through the usual validating constructor.

use serde::{Deserialize, Serialize};

use crate::error::{Result, ValidationError};
use crate::inflection::Inflection;
use crate::language::LanguageSupport;
use crate::lexeme::{Homonym, Lemma, Lexeme};
use crate::translation::TranslationRecord;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct InflectionRecord {
    pub stem: String,
    pub language: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suffix: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prefix: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub example: Option<String>,
}

impl InflectionRecord {
    pub fn into_inflection(self, languages: &impl LanguageSupport) -> Result<Inflection> {
        let mut inflection = Inflection::new(self.stem, self.language, languages)?;
        if let Some(suffix) = self.suffix {
            inflection = inflection.with_suffix(suffix);
        }
        if let Some(prefix) = self.prefix {
            inflection = inflection.with_prefix(prefix);
        }
        if let Some(example) = self.example {
            inflection = inflection.with_example(example);
        }
        Ok(inflection)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LemmaRecord {
    pub word: String,
    pub language: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub translation: Option<TranslationRecord>,
}

impl LemmaRecord {
    pub fn into_lemma(self) -> Result<Lemma> {
        let lemma = Lemma::new(self.word, self.language)?;
        Ok(match self.translation {
            Some(translation) => lemma.with_translation(translation.into_translation()?),
            None => lemma,
        })
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LexemeRecord {
    pub lemma: LemmaRecord,
    #[serde(default)]
    pub inflections: Vec<InflectionRecord>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meaning: Option<String>,
}

impl LexemeRecord {
    pub fn into_lexeme(self, languages: &impl LanguageSupport) -> Result<Lexeme> {
        let lemma = self.lemma.into_lemma()?;
        let inflections = self
            .inflections
            .into_iter()
            .map(|record| record.into_inflection(languages))
            .collect::<Result<Vec<_>>>()?;
        let lexeme = Lexeme::new(lemma, inflections);
        Ok(match self.meaning {
            Some(meaning) => lexeme.with_meaning(meaning),
            None => lexeme,
        })
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HomonymRecord {
    #[serde(default)]
    pub lexemes: Vec<LexemeRecord>,
    #[serde(default, alias = "targetWord", skip_serializing_if = "Option::is_none")]
    pub target_word: Option<String>,
}

impl HomonymRecord {
    pub fn into_homonym(self, languages: &impl LanguageSupport) -> Result<Homonym> {
        let lexemes = self
            .lexemes
            .into_iter()
            .map(|record| record.into_lexeme(languages))
            .collect::<Result<Vec<_>>>()?;
        Ok(Homonym::new(lexemes, self.target_word))
    }
}

/// Parses a homonym record and builds the homonym from it.
pub fn homonym_from_json(json: &str, languages: &impl LanguageSupport) -> Result<Homonym> {
    let record: HomonymRecord =
        serde_json::from_str(json).map_err(|e| ValidationError::InvalidRecord(e.to_string()))?;
    record.into_homonym(languages)
}
