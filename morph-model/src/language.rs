use rustc_hash::FxHashMap;

use crate::error::{Result, ValidationError, require_non_empty};
use crate::feature::{Feature, FeatureKind, FeatureKindMap, FeatureValue};
use crate::feature_type::{FeatureType, Ranked};

pub const STR_LANG_CODE_LAT: &str = "lat";
pub const STR_LANG_CODE_LA: &str = "la";
pub const STR_LANG_CODE_GRC: &str = "grc";
pub const STR_LANG_CODE_ARA: &str = "ara";
pub const STR_LANG_CODE_AR: &str = "ar";
pub const STR_LANG_CODE_PER: &str = "per";
pub const STR_LANG_CODE_FAR: &str = "far";

/// Punctuation shared by the classical languages.
pub const DEFAULT_PUNCTUATION: &str = ".,;:!?'\"(){}[]<>/\\\u{00A0}\u{2010}\u{2011}\u{2012}\u{2013}\u{2014}\u{2015}\u{2018}\u{2019}\u{201C}\u{201D}\u{0387}\u{00B7}\n\r";

/// Answers whether a language code is one the caller knows how to handle.
pub trait LanguageSupport {
    fn supports_language(&self, code: &str) -> bool;
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextDirection {
    #[default]
    Ltr,
    Rtl,
}

/// The unit text is split into when selecting a word.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BaseUnit {
    #[default]
    Word,
    Char,
}

#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct FeatureTypeConfig {
    pub kind: FeatureKind,
    #[serde(default)]
    pub values: Vec<Ranked<String>>,
}

/// Configuration for one language. The first code is the canonical one.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct LanguageConfig {
    pub name: String,
    pub codes: Vec<String>,
    #[serde(default)]
    pub direction: TextDirection,
    #[serde(default)]
    pub base_unit: BaseUnit,
    #[serde(default = "default_punctuation")]
    pub punctuation: String,
    #[serde(default)]
    pub context_forward: u32,
    #[serde(default)]
    pub context_backward: u32,
    #[serde(default)]
    pub can_inflect: bool,
    #[serde(default)]
    pub feature_types: Vec<FeatureTypeConfig>,
}

fn default_punctuation() -> String {
    DEFAULT_PUNCTUATION.to_string()
}

impl LanguageConfig {
    fn classical(name: &str, codes: &[&str], direction: TextDirection, can_inflect: bool) -> Self {
        Self {
            name: name.to_string(),
            codes: codes.iter().map(|c| c.to_string()).collect(),
            direction,
            base_unit: BaseUnit::Word,
            punctuation: default_punctuation(),
            context_forward: 0,
            context_backward: 0,
            can_inflect,
            feature_types: Vec::new(),
        }
    }

    pub fn latin() -> Self {
        Self::classical(
            "latin",
            &[STR_LANG_CODE_LAT, STR_LANG_CODE_LA],
            TextDirection::Ltr,
            true,
        )
    }

    pub fn greek() -> Self {
        Self::classical("greek", &[STR_LANG_CODE_GRC], TextDirection::Ltr, true)
    }

    pub fn arabic() -> Self {
        Self::classical(
            "arabic",
            &[STR_LANG_CODE_ARA, STR_LANG_CODE_AR],
            TextDirection::Rtl,
            false,
        )
    }

    pub fn persian() -> Self {
        Self::classical(
            "persian",
            &[STR_LANG_CODE_PER, STR_LANG_CODE_FAR],
            TextDirection::Rtl,
            false,
        )
    }

    /// Parses a JSON array of language configurations.
    pub fn list_from_json(json: &str) -> Result<Vec<Self>> {
        serde_json::from_str(json)
            .map_err(|e| ValidationError::InvalidConfig(e.to_string()).into())
    }
}

/// Language-specific behavior: codes, text direction, punctuation and the
/// grammatical feature types configured for the language.
#[derive(Clone, Debug)]
pub struct LanguageModel {
    name: String,
    codes: Vec<String>,
    direction: TextDirection,
    base_unit: BaseUnit,
    punctuation: String,
    context_forward: u32,
    context_backward: u32,
    can_inflect: bool,
    features: FeatureKindMap<Option<FeatureType>>,
}

impl LanguageModel {
    pub fn from_config(config: LanguageConfig) -> Result<Self> {
        require_non_empty(&config.name, "language name")?;
        if config.codes.is_empty() {
            return Err(ValidationError::Empty {
                field: "language codes",
            }
            .into());
        }
        for code in &config.codes {
            require_non_empty(code, "language code")?;
        }

        let code = config.codes[0].clone();
        let mut features: FeatureKindMap<Option<FeatureType>> = FeatureKindMap::default();
        for feature_type in config.feature_types {
            let built = FeatureType::new(feature_type.kind, feature_type.values, code.as_str())?;
            features.insert(&feature_type.kind, Some(built));
        }

        Ok(Self {
            name: config.name,
            codes: config.codes,
            direction: config.direction,
            base_unit: config.base_unit,
            punctuation: config.punctuation,
            context_forward: config.context_forward,
            context_backward: config.context_backward,
            can_inflect: config.can_inflect,
            features,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// The canonical code of this language.
    pub fn to_code(&self) -> &str {
        &self.codes[0]
    }

    pub fn codes(&self) -> &[String] {
        &self.codes
    }

    pub fn supports_code(&self, code: &str) -> bool {
        self.codes.iter().any(|c| c == code)
    }

    pub fn direction(&self) -> TextDirection {
        self.direction
    }

    pub fn base_unit(&self) -> BaseUnit {
        self.base_unit
    }

    pub fn punctuation(&self) -> &str {
        &self.punctuation
    }

    pub fn is_punctuation(&self, ch: char) -> bool {
        self.punctuation.contains(ch)
    }

    /// A form of `word` that can be compared for equality. No language normalizes yet.
    pub fn normalize_word(&self, word: &str) -> String {
        word.to_string()
    }

    /// Whether an inflection table can be produced for this language.
    pub fn can_inflect(&self) -> bool {
        self.can_inflect
    }

    pub fn context_forward(&self) -> u32 {
        self.context_forward
    }

    pub fn context_backward(&self) -> u32 {
        self.context_backward
    }

    pub fn feature_type(&self, kind: FeatureKind) -> Option<&FeatureType> {
        self.features.get(&kind).as_ref()
    }

    pub fn feature_type_mut(&mut self, kind: FeatureKind) -> Option<&mut FeatureType> {
        self.features.get_mut(&kind).as_mut()
    }

    pub fn feature_types(&self) -> impl Iterator<Item = &FeatureType> + '_ {
        self.features.iter().filter_map(|(_, ft)| ft.as_ref())
    }

    /// A feature of `kind` stamped with `code`, which must be one of this language's codes.
    /// Inflections keep the code they were created with, so a feature for an inflection
    /// tagged `la` has to carry `la` rather than the canonical `lat`.
    pub fn feature(
        &self,
        kind: FeatureKind,
        value: impl Into<FeatureValue>,
        code: &str,
    ) -> Result<Feature> {
        if !self.supports_code(code) {
            return Err(ValidationError::UnsupportedLanguage(code.to_string()).into());
        }
        Feature::new(value, kind, code)
    }
}

/// All language models known to a caller, looked up by any of their codes.
#[derive(Clone, Debug)]
pub struct LanguageRegistry {
    models: Vec<LanguageModel>,
    by_code: FxHashMap<String, usize>,
}

impl LanguageRegistry {
    pub fn empty() -> Self {
        Self {
            models: Vec::new(),
            by_code: FxHashMap::default(),
        }
    }

    pub fn from_configs(configs: impl IntoIterator<Item = LanguageConfig>) -> Result<Self> {
        let mut registry = Self::empty();
        for config in configs {
            registry.register_config(config)?;
        }
        Ok(registry)
    }

    /// The classical languages with codes only; feature types come from configuration.
    pub fn classical() -> Result<Self> {
        Self::from_configs([
            LanguageConfig::latin(),
            LanguageConfig::greek(),
            LanguageConfig::arabic(),
            LanguageConfig::persian(),
        ])
    }

    /// Registers a model. A code already claimed by another model now resolves to this one.
    pub fn register(&mut self, model: LanguageModel) {
        let index = self.models.len();
        for code in model.codes() {
            if let Some(previous) = self.by_code.insert(code.clone(), index) {
                log::warn!(
                    "Language code {code} moved from {} to {}",
                    self.models[previous].name(),
                    model.name()
                );
            }
        }
        log::debug!("Registered language {} ({})", model.name(), model.codes().join(", "));
        self.models.push(model);
    }

    pub fn register_config(&mut self, config: LanguageConfig) -> Result<()> {
        self.register(LanguageModel::from_config(config)?);
        Ok(())
    }

    /// Registers every configuration in a JSON array on top of what is already registered.
    pub fn load_json(&mut self, json: &str) -> Result<()> {
        for config in LanguageConfig::list_from_json(json)? {
            self.register_config(config)?;
        }
        Ok(())
    }

    pub fn model_for_code(&self, code: &str) -> Option<&LanguageModel> {
        self.by_code.get(code).map(|&index| &self.models[index])
    }

    pub fn model_for_code_mut(&mut self, code: &str) -> Option<&mut LanguageModel> {
        let index = *self.by_code.get(code)?;
        self.models.get_mut(index)
    }

    pub fn models(&self) -> impl Iterator<Item = &LanguageModel> + '_ {
        self.models.iter()
    }
}

impl LanguageSupport for LanguageRegistry {
    fn supports_language(&self, code: &str) -> bool {
        self.by_code.contains_key(code)
    }
}
