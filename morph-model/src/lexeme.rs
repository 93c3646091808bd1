use crate::error::{LookupError, Result, require_non_empty};
use crate::inflection::Inflection;
use crate::translation::Translation;

/// The canonical form of a word, i.e. its headword.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Lemma {
    word: String,
    language: String,
    translation: Option<Translation>,
}

impl Lemma {
    pub fn new(word: impl Into<String>, language: impl Into<String>) -> Result<Self> {
        let word = word.into();
        let language = language.into();
        require_non_empty(&word, "word")?;
        require_non_empty(&language, "language")?;
        Ok(Self {
            word,
            language,
            translation: None,
        })
    }

    pub fn with_translation(mut self, translation: Translation) -> Self {
        self.translation = Some(translation);
        self
    }

    pub fn word(&self) -> &str {
        &self.word
    }

    pub fn language(&self) -> &str {
        &self.language
    }

    pub fn translation(&self) -> Option<&Translation> {
        self.translation.as_ref()
    }
}

impl std::fmt::Display for Lemma {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.word)
    }
}

/// A unit of lexical meaning: a lemma and the inflections found for it.
#[derive(Clone, Debug, PartialEq)]
pub struct Lexeme {
    lemma: Lemma,
    inflections: Vec<Inflection>,
    meaning: Option<String>,
}

impl Lexeme {
    pub fn new(lemma: Lemma, inflections: Vec<Inflection>) -> Self {
        Self {
            lemma,
            inflections,
            meaning: None,
        }
    }

    /// A short definition.
    pub fn with_meaning(mut self, meaning: impl Into<String>) -> Self {
        self.meaning = Some(meaning.into()).filter(|m| !m.is_empty());
        self
    }

    pub fn lemma(&self) -> &Lemma {
        &self.lemma
    }

    pub fn inflections(&self) -> &[Inflection] {
        &self.inflections
    }

    pub fn into_inflections(self) -> Vec<Inflection> {
        self.inflections
    }

    pub fn meaning(&self) -> Option<&str> {
        self.meaning.as_deref()
    }
}

/// Every lexeme written the same way as the word that was looked up.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Homonym {
    lexemes: Vec<Lexeme>,
    target_word: Option<String>,
}

impl Homonym {
    pub fn new(lexemes: Vec<Lexeme>, target_word: Option<String>) -> Self {
        Self {
            lexemes,
            target_word,
        }
    }

    pub fn lexemes(&self) -> &[Lexeme] {
        &self.lexemes
    }

    pub fn target_word(&self) -> Option<&str> {
        self.target_word.as_deref()
    }

    /// The language of the first lexeme's lemma. Lexemes of one homonym are assumed
    /// to share a language.
    pub fn language(&self) -> Result<&str> {
        self.lexemes
            .first()
            .map(|lexeme| lexeme.lemma().language())
            .ok_or_else(|| LookupError::NoLexemes.into())
    }

    /// All inflections of all lexemes, in order.
    pub fn inflections(&self) -> impl Iterator<Item = &Inflection> + '_ {
        self.lexemes.iter().flat_map(|lexeme| lexeme.inflections())
    }

    /// Consumes the homonym, yielding its inflections for grouping.
    pub fn into_inflections(self) -> impl Iterator<Item = Inflection> {
        self.lexemes.into_iter().flat_map(Lexeme::into_inflections)
    }
}
