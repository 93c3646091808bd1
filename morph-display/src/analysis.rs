//! The analysis file format: a homonym record whose inflections also carry features.

use indexmap::IndexMap;
use morph_model::{
    Feature, FeatureKind, Homonym, Inflection, InflectionRecord, LanguageRegistry, LemmaRecord,
    Lexeme,
};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct AnalysisFile {
    #[serde(default)]
    pub lexemes: Vec<LexemeInput>,
    #[serde(default, alias = "targetWord")]
    pub target_word: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct LexemeInput {
    pub lemma: LemmaRecord,
    #[serde(default)]
    pub inflections: Vec<InflectionInput>,
    #[serde(default)]
    pub meaning: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct InflectionInput {
    #[serde(flatten)]
    pub record: InflectionRecord,
    /// Feature values keyed by category tag, e.g. `"case": ["genitive"]`.
    #[serde(default)]
    pub features: IndexMap<String, Vec<FeatureInput>>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum FeatureInput {
    Plain(String),
    Sorted {
        value: String,
        #[serde(default)]
        sort_order: Option<u32>,
    },
}

impl AnalysisFile {
    pub fn into_homonym(self, languages: &LanguageRegistry) -> morph_model::Result<Homonym> {
        let mut lexemes = Vec::with_capacity(self.lexemes.len());
        for lexeme in self.lexemes {
            lexemes.push(lexeme.into_lexeme(languages)?);
        }
        Ok(Homonym::new(lexemes, self.target_word))
    }
}

impl LexemeInput {
    fn into_lexeme(self, languages: &LanguageRegistry) -> morph_model::Result<Lexeme> {
        let lemma = self.lemma.into_lemma()?;
        let inflections = self
            .inflections
            .into_iter()
            .map(|inflection| inflection.into_inflection(languages))
            .collect::<morph_model::Result<Vec<_>>>()?;
        let lexeme = Lexeme::new(lemma, inflections);
        Ok(match self.meaning {
            Some(meaning) => lexeme.with_meaning(meaning),
            None => lexeme,
        })
    }
}

impl InflectionInput {
    fn into_inflection(self, languages: &LanguageRegistry) -> morph_model::Result<Inflection> {
        let mut inflection = self.record.into_inflection(languages)?;
        for (tag, values) in self.features {
            let kind = FeatureKind::from_tag(&tag)?;
            let features = values
                .into_iter()
                .map(|value| feature(&inflection, kind, value, languages))
                .collect::<morph_model::Result<Vec<_>>>()?;
            inflection.add_features(features)?;
        }
        Ok(inflection)
    }
}

/// Builds a feature in the inflection's own language code. Values missing from a
/// configured feature type are accepted with a warning.
fn feature(
    inflection: &Inflection,
    kind: FeatureKind,
    input: FeatureInput,
    languages: &LanguageRegistry,
) -> morph_model::Result<Feature> {
    let (value, sort_order) = match input {
        FeatureInput::Plain(value) => (value, None),
        FeatureInput::Sorted { value, sort_order } => (value, sort_order),
    };

    let feature = match languages.model_for_code(inflection.language()) {
        Some(model) => {
            if let Some(feature_type) = model.feature_type(kind) {
                if !feature_type.has_value(&value) {
                    log::warn!(
                        "{inflection}: {kind} value \"{value}\" is not configured for {}",
                        feature_type.language()
                    );
                }
            }
            model.feature(kind, value, inflection.language())?
        }
        None => Feature::new(value, kind, inflection.language())?,
    };
    Ok(match sort_order {
        Some(sort_order) => feature.with_sort_order(sort_order),
        None => feature,
    })
}
