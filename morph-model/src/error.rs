use crate::feature::FeatureKind;

/// Raised when a value is constructed from missing or unrecognized data.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("{field} should not be empty")]
    Empty { field: &'static str },

    #[error("features of \"{0}\" type are not supported")]
    UnsupportedFeatureType(String),

    #[error("language {0} not supported")]
    UnsupportedLanguage(String),

    #[error("invalid language configuration: {0}")]
    InvalidConfig(String),

    #[error("invalid morphology record: {0}")]
    InvalidRecord(String),

    #[error("value \"{value}\" is listed more than once in a \"{kind}\" order")]
    DuplicateValue { value: String, kind: FeatureKind },
}

/// Raised when otherwise valid values disagree with each other.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConsistencyError {
    #[error(
        "language \"{feature_language}\" of a feature does not match language \"{inflection_language}\" of the inflection"
    )]
    LanguageMismatch {
        feature_language: String,
        inflection_language: String,
    },

    #[error("cannot attach a \"{found}\" feature together with \"{expected}\" features")]
    MixedFeatureKinds {
        expected: FeatureKind,
        found: FeatureKind,
    },

    #[error("trying to order an element with \"{value}\" value that is not stored in a \"{kind}\" type")]
    UnregisteredValue { value: String, kind: FeatureKind },

    #[error("trying to order an element with type \"{found}\" that is different from \"{expected}\"")]
    KindMismatch {
        expected: FeatureKind,
        found: FeatureKind,
    },

    #[error("trying to order an element with language \"{found}\" that is different from \"{expected}\"")]
    OrderLanguageMismatch { expected: String, found: String },

    #[error("an inflection group cannot mix inflections and nested groups")]
    MixedGroupMembers,
}

/// Raised when a lookup finds nothing.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LookupError {
    #[error("a value \"{value}\" is not found in the importer")]
    NotMapped { value: String },

    #[error("no importer named \"{name}\"")]
    NoImporter { name: String },

    #[error("homonym has no lexemes, unable to obtain language information")]
    NoLexemes,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Consistency(#[from] ConsistencyError),

    #[error(transparent)]
    Lookup(#[from] LookupError),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Rejects an empty string for the named field.
pub(crate) fn require_non_empty(value: &str, field: &'static str) -> Result<(), ValidationError> {
    if value.is_empty() {
        Err(ValidationError::Empty { field })
    } else {
        Ok(())
    }
}
