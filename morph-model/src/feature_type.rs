use indexmap::IndexMap;
use rustc_hash::FxHashMap;

use crate::error::{ConsistencyError, LookupError, Result, ValidationError, require_non_empty};
use crate::feature::{Feature, FeatureKind, FeatureValue};
use crate::importer::FeatureImporter;

/// One position in a sort order: a single item, or several items sharing the same rank.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(untagged)]
pub enum Ranked<T> {
    One(T),
    Tied(Vec<T>),
}

impl<T> Ranked<T> {
    pub fn tied(items: impl IntoIterator<Item = impl Into<T>>) -> Self {
        Ranked::Tied(items.into_iter().map(Into::into).collect())
    }

    pub fn items(&self) -> &[T] {
        match self {
            Ranked::One(item) => std::slice::from_ref(item),
            Ranked::Tied(items) => items,
        }
    }
}

impl From<&str> for Ranked<String> {
    fn from(value: &str) -> Self {
        Ranked::One(value.to_string())
    }
}

impl From<String> for Ranked<String> {
    fn from(value: String) -> Self {
        Ranked::One(value)
    }
}

impl From<Feature> for Ranked<Feature> {
    fn from(feature: Feature) -> Self {
        Ranked::One(feature)
    }
}

impl From<Vec<Feature>> for Ranked<Feature> {
    fn from(features: Vec<Feature>) -> Self {
        Ranked::Tied(features)
    }
}

/// The definition of a grammatical category for one language: its known values
/// and the order in which those values are sorted and grouped.
///
/// The order of `values` given at construction is the default order. Values that
/// should share a rank are given together as [`Ranked::Tied`], e.g. masculine and
/// feminine sorted into one bucket ahead of neuter.
#[derive(Clone, Debug)]
pub struct FeatureType {
    kind: FeatureKind,
    language: String,
    registered: IndexMap<String, Feature>,
    order_index: Vec<Ranked<String>>,
    order_lookup: FxHashMap<String, usize>,
    importers: IndexMap<String, FeatureImporter>,
}

impl FeatureType {
    /// An empty `values` list is allowed, for open-ended categories such as footnotes.
    /// An empty tie, or a value listed twice, is rejected.
    pub fn new<R>(
        kind: FeatureKind,
        values: impl IntoIterator<Item = R>,
        language: impl Into<String>,
    ) -> Result<Self>
    where
        R: Into<Ranked<String>>,
    {
        let language = language.into();
        require_non_empty(&language, "language")?;

        let mut registered = IndexMap::new();
        let mut order_index = Vec::new();
        let mut order_lookup = FxHashMap::default();
        for (index, entry) in values.into_iter().map(Into::into).enumerate() {
            if entry.items().is_empty() {
                return Err(ValidationError::Empty { field: "order list" }.into());
            }
            for value in entry.items() {
                if order_lookup.contains_key(value) {
                    return Err(ValidationError::DuplicateValue {
                        value: value.clone(),
                        kind,
                    }
                    .into());
                }
                let feature = Feature::new(value.as_str(), kind, language.as_str())?;
                registered.insert(value.clone(), feature);
                order_lookup.insert(value.clone(), index);
            }
            order_index.push(entry);
        }

        Ok(Self {
            kind,
            language,
            registered,
            order_index,
            order_lookup,
            importers: IndexMap::new(),
        })
    }

    /// Like [`FeatureType::new`], with the category given as a tag string.
    pub fn from_tag<R>(
        tag: &str,
        values: impl IntoIterator<Item = R>,
        language: impl Into<String>,
    ) -> Result<Self>
    where
        R: Into<Ranked<String>>,
    {
        let kind = FeatureKind::from_tag(tag)?;
        Self::new(kind, values, language)
    }

    pub fn kind(&self) -> FeatureKind {
        self.kind
    }

    pub fn language(&self) -> &str {
        &self.language
    }

    /// A feature of this type with an arbitrary value. The value does not have to be
    /// one of the registered values.
    pub fn get(&self, value: impl Into<FeatureValue>) -> Result<Feature> {
        let value = value.into();
        if value.is_empty() {
            return Err(ValidationError::Empty { field: "value" }.into());
        }
        Feature::new(value, self.kind, self.language.as_str())
    }

    /// The registered feature for `value`, if this type was built with it.
    pub fn value(&self, value: &str) -> Option<&Feature> {
        self.registered.get(value)
    }

    pub fn has_value(&self, value: &str) -> bool {
        self.registered.contains_key(value)
    }

    /// Values in sort order. Tied values are returned together.
    pub fn ordered_values(&self) -> &[Ranked<String>] {
        &self.order_index
    }

    /// Features in sort order. Tied values come back as one multi-valued feature.
    pub fn ordered_features(&self) -> Result<Vec<Feature>> {
        self.order_index
            .iter()
            .map(|entry| match entry {
                Ranked::One(value) => {
                    Feature::new(value.as_str(), self.kind, self.language.as_str())
                }
                Ranked::Tied(values) => {
                    Feature::new(values.clone(), self.kind, self.language.as_str())
                }
            })
            .collect()
    }

    /// Value to rank. Tied values share a rank.
    pub fn order_lookup(&self) -> &FxHashMap<String, usize> {
        &self.order_lookup
    }

    pub fn rank_of(&self, value: &str) -> Option<usize> {
        self.order_lookup.get(value).copied()
    }

    /// Replaces the sort order. Every feature must be one of this type's registered
    /// values, of this type's kind and language; re-ordering never introduces new values.
    /// Empty ties and repeated values are rejected, and a rejected order leaves the
    /// current one in place.
    pub fn set_order(&mut self, values: Vec<Ranked<Feature>>) -> Result<()> {
        if values.is_empty() {
            return Err(ValidationError::Empty { field: "order list" }.into());
        }

        for feature in values.iter().flat_map(|entry| entry.items()) {
            self.check_orderable(feature)?;
        }

        let mut order_index = Vec::with_capacity(values.len());
        let mut order_lookup = FxHashMap::default();
        for (index, entry) in values.iter().enumerate() {
            let names: Vec<String> = entry
                .items()
                .iter()
                .flat_map(|feature| feature.value().values().iter().cloned())
                .collect();
            if names.is_empty() {
                return Err(ValidationError::Empty { field: "order list" }.into());
            }
            for name in &names {
                if order_lookup.insert(name.clone(), index).is_some() {
                    return Err(ValidationError::DuplicateValue {
                        value: name.clone(),
                        kind: self.kind,
                    }
                    .into());
                }
            }
            order_index.push(match (entry, names.len()) {
                (Ranked::One(_), 1) => Ranked::One(names[0].clone()),
                _ => Ranked::Tied(names),
            });
        }

        log::debug!(
            "Replacing {} sort order for {} with {} ranks",
            self.kind,
            self.language,
            order_index.len()
        );
        self.order_index = order_index;
        self.order_lookup = order_lookup;
        Ok(())
    }

    fn check_orderable(&self, feature: &Feature) -> Result<(), ConsistencyError> {
        for value in feature.value().values() {
            if !self.registered.contains_key(value) {
                return Err(ConsistencyError::UnregisteredValue {
                    value: value.clone(),
                    kind: self.kind,
                });
            }
        }
        if feature.kind() != self.kind {
            return Err(ConsistencyError::KindMismatch {
                expected: self.kind,
                found: feature.kind(),
            });
        }
        if feature.language() != self.language {
            return Err(ConsistencyError::OrderLanguageMismatch {
                expected: self.language.clone(),
                found: feature.language().to_string(),
            });
        }
        Ok(())
    }

    /// Returns the importer called `name`, creating it first if needed.
    pub fn add_importer(&mut self, name: impl Into<String>) -> Result<&mut FeatureImporter> {
        let name = name.into();
        require_non_empty(&name, "importer name")?;
        Ok(self.importers.entry(name).or_default())
    }

    pub fn importer(&self, name: &str) -> Option<&FeatureImporter> {
        self.importers.get(name)
    }

    /// Translates an external value through the named importer into a feature of this type.
    pub fn import(&self, importer: &str, imported_value: &str) -> Result<Feature> {
        let mapped = self
            .importers
            .get(importer)
            .ok_or_else(|| LookupError::NoImporter {
                name: importer.to_string(),
            })?
            .get(imported_value)?;
        self.get(mapped.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    fn genders() -> FeatureType {
        FeatureType::new(FeatureKind::Gender, ["masculine", "feminine", "neuter"], "lat").unwrap()
    }

    #[test]
    fn test_construction_builds_order() {
        let genders = genders();
        assert_eq!(genders.kind(), FeatureKind::Gender);
        assert_eq!(genders.rank_of("masculine"), Some(0));
        assert_eq!(genders.rank_of("neuter"), Some(2));
        assert_eq!(genders.rank_of("common"), None);
        assert_eq!(genders.ordered_values().len(), 3);
        assert!(genders.has_value("feminine"));
    }

    #[test]
    fn test_tied_values_share_rank() {
        let genders = FeatureType::new(
            FeatureKind::Gender,
            vec![Ranked::<String>::tied(["masculine", "feminine"]), Ranked::from("neuter")],
            "lat",
        )
        .unwrap();
        assert_eq!(genders.rank_of("masculine"), Some(0));
        assert_eq!(genders.rank_of("feminine"), Some(0));
        assert_eq!(genders.rank_of("neuter"), Some(1));

        let features = genders.ordered_features().unwrap();
        assert_eq!(features.len(), 2);
        assert!(features[0].has_value("masculine"));
        assert!(features[0].has_value("feminine"));
    }

    #[test]
    fn test_empty_values_allowed() {
        let footnotes = FeatureType::from_tag("footnote", Vec::<String>::new(), "lat").unwrap();
        assert!(footnotes.ordered_values().is_empty());
        let note = footnotes.get("1").unwrap();
        assert_eq!(note.kind(), FeatureKind::Footnote);
    }

    #[test]
    fn test_construction_errors() {
        assert_eq!(
            FeatureType::from_tag("invalidtype", ["a"], "lat").unwrap_err(),
            Error::Validation(ValidationError::UnsupportedFeatureType(
                "invalidtype".to_string()
            ))
        );
        assert_eq!(
            FeatureType::new(FeatureKind::Case, ["nominative"], "").unwrap_err(),
            Error::Validation(ValidationError::Empty { field: "language" })
        );
    }

    #[test]
    fn test_construction_rejects_empty_tie_and_repeats() {
        assert_eq!(
            FeatureType::new(
                FeatureKind::Gender,
                vec![Ranked::<String>::from("masculine"), Ranked::Tied(vec![])],
                "lat"
            )
            .unwrap_err(),
            Error::Validation(ValidationError::Empty { field: "order list" })
        );

        let err = FeatureType::new(FeatureKind::Gender, ["masculine", "masculine"], "lat")
            .unwrap_err();
        assert_eq!(
            err,
            Error::Validation(ValidationError::DuplicateValue {
                value: "masculine".to_string(),
                kind: FeatureKind::Gender,
            })
        );
        assert!(err.to_string().contains("more than once"));

        assert!(
            FeatureType::new(
                FeatureKind::Gender,
                vec![Ranked::<String>::tied(["masculine", "feminine"]), Ranked::from("feminine")],
                "lat",
            )
            .is_err()
        );
    }

    #[test]
    fn test_get_arbitrary_value() {
        let genders = genders();
        let common = genders.get("common").unwrap();
        assert_eq!(common.language(), "lat");
        assert!(!genders.has_value("common"));
        assert_eq!(
            genders.get("").unwrap_err(),
            Error::Validation(ValidationError::Empty { field: "value" })
        );
    }

    #[test]
    fn test_set_order() {
        let mut genders = genders();
        let neuter = genders.value("neuter").unwrap().clone();
        let masculine = genders.value("masculine").unwrap().clone();
        let feminine = genders.value("feminine").unwrap().clone();

        genders
            .set_order(vec![neuter.into(), vec![masculine, feminine].into()])
            .unwrap();

        assert_eq!(
            genders.ordered_values(),
            &[
                Ranked::One("neuter".to_string()),
                Ranked::Tied(vec!["masculine".to_string(), "feminine".to_string()]),
            ]
        );
        assert_eq!(genders.rank_of("neuter"), Some(0));
        assert_eq!(genders.rank_of("feminine"), Some(1));
    }

    #[test]
    fn test_set_order_rejects_unregistered_value() {
        let mut genders = genders();
        let before = genders.ordered_values().to_vec();
        let common = genders.get("common").unwrap();

        let err = genders.set_order(vec![common.into()]).unwrap_err();
        assert_eq!(
            err,
            Error::Consistency(ConsistencyError::UnregisteredValue {
                value: "common".to_string(),
                kind: FeatureKind::Gender,
            })
        );
        assert_eq!(genders.ordered_values(), before.as_slice());
    }

    #[test]
    fn test_set_order_rejects_foreign_kind_and_language() {
        let mut persons =
            FeatureType::new(FeatureKind::Person, ["first", "second", "third"], "lat").unwrap();

        let declension = Feature::new("first", FeatureKind::Declension, "lat").unwrap();
        assert_eq!(
            persons.set_order(vec![declension.into()]).unwrap_err(),
            Error::Consistency(ConsistencyError::KindMismatch {
                expected: FeatureKind::Person,
                found: FeatureKind::Declension,
            })
        );

        let greek = Feature::new("first", FeatureKind::Person, "grc").unwrap();
        assert_eq!(
            persons.set_order(vec![greek.into()]).unwrap_err(),
            Error::Consistency(ConsistencyError::OrderLanguageMismatch {
                expected: "lat".to_string(),
                found: "grc".to_string(),
            })
        );

        assert_eq!(
            persons.set_order(Vec::new()).unwrap_err(),
            Error::Validation(ValidationError::Empty { field: "order list" })
        );
    }

    #[test]
    fn test_set_order_rejects_empty_tie_and_repeats() {
        let mut genders = genders();
        let before = genders.ordered_values().to_vec();
        let masculine = genders.value("masculine").unwrap().clone();
        let neuter = genders.value("neuter").unwrap().clone();

        assert_eq!(
            genders
                .set_order(vec![masculine.clone().into(), Ranked::Tied(vec![])])
                .unwrap_err(),
            Error::Validation(ValidationError::Empty { field: "order list" })
        );
        assert_eq!(
            genders
                .set_order(vec![
                    masculine.clone().into(),
                    neuter.into(),
                    masculine.clone().into(),
                ])
                .unwrap_err(),
            Error::Validation(ValidationError::DuplicateValue {
                value: "masculine".to_string(),
                kind: FeatureKind::Gender,
            })
        );
        assert_eq!(genders.ordered_values(), before.as_slice());
        assert_eq!(genders.rank_of("masculine"), Some(0));
        assert_eq!(genders.rank_of("neuter"), Some(2));
    }

    #[test]
    fn test_import_through_named_importer() {
        let mut genders = genders();
        genders
            .add_importer("whitakers")
            .unwrap()
            .map("M", "masculine")
            .unwrap()
            .map("C", vec!["masculine", "feminine"])
            .unwrap();

        let masculine = genders.import("whitakers", "M").unwrap();
        assert_eq!(&masculine, genders.value("masculine").unwrap());
        assert!(genders.import("whitakers", "C").unwrap().has_value("feminine"));

        assert_eq!(
            genders.import("whitakers", "X").unwrap_err(),
            Error::Lookup(LookupError::NotMapped {
                value: "X".to_string()
            })
        );
        assert_eq!(
            genders.import("perseus", "M").unwrap_err(),
            Error::Lookup(LookupError::NoImporter {
                name: "perseus".to_string()
            })
        );

        // asking again returns the existing importer
        assert_eq!(genders.add_importer("whitakers").unwrap().len(), 2);
        assert!(genders.add_importer("").is_err());
    }
}
