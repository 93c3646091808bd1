pub mod error;
pub mod feature;
pub mod feature_list;
pub mod feature_type;
pub mod grouping;
pub mod grouping_key;
pub mod importer;
pub mod inflection;
pub mod inflection_group;
pub mod language;
pub mod lexeme;
pub mod record;
pub mod translation;

pub use error::{ConsistencyError, Error, LookupError, Result, ValidationError};
pub use feature::{Feature, FeatureKind, FeatureKindMap, FeatureValue};
pub use feature_list::FeatureList;
pub use feature_type::{FeatureType, Ranked};
pub use grouping::group_for_display;
pub use grouping_key::{InflectionGroupingKey, KeyExtra};
pub use importer::FeatureImporter;
pub use inflection::Inflection;
pub use inflection_group::{GroupMember, InflectionGroup, sort_siblings};
pub use language::{LanguageConfig, LanguageModel, LanguageRegistry, LanguageSupport};
pub use lexeme::{Homonym, Lemma, Lexeme};
pub use record::{HomonymRecord, InflectionRecord, LemmaRecord, LexemeRecord, homonym_from_json};
pub use translation::{Translation, TranslationRecord};
