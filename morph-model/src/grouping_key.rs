use std::collections::BTreeMap;

use crate::feature::{Feature, FeatureKind};
use crate::inflection::Inflection;

/// Extra name recording whether a pass-two group was keyed on number because the
/// inflections carry a case.
pub const IS_CASE_INFLECTION_SET: &str = "is_case_inflection_set";
pub const PREFIX: &str = "prefix";
pub const STEM: &str = "stem";
pub const SUFFIX: &str = "suffix";

/// A scalar stored in a grouping key next to the feature slots. Text displays quoted,
/// so `"true"` stays apart from the flag `true`.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum KeyExtra {
    Flag(bool),
    Text(String),
}

impl std::fmt::Display for KeyExtra {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            KeyExtra::Flag(flag) => write!(f, "{flag}"),
            KeyExtra::Text(text) => write!(f, "{text:?}"),
        }
    }
}

impl From<bool> for KeyExtra {
    fn from(flag: bool) -> Self {
        KeyExtra::Flag(flag)
    }
}

impl From<&str> for KeyExtra {
    fn from(text: &str) -> Self {
        KeyExtra::Text(text.to_string())
    }
}

impl From<Option<&str>> for KeyExtra {
    fn from(text: Option<&str>) -> Self {
        KeyExtra::Text(text.unwrap_or_default().to_string())
    }
}

/// The identity of an inflection at one grouping level: a chosen subset of its
/// feature slots plus extra scalars. Inflections with equal keys land in the same group.
///
/// Equality and hashing are structural, so values containing separators cannot collide.
/// A slot the inflection does not have is kept as an empty list. The display form is
/// canonical: values are quoted, so distinct keys never render alike.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct InflectionGroupingKey {
    slots: Vec<(FeatureKind, Vec<Feature>)>,
    extras: BTreeMap<String, KeyExtra>,
}

impl InflectionGroupingKey {
    pub fn new<N, E>(
        inflection: &Inflection,
        kinds: &[FeatureKind],
        extras: impl IntoIterator<Item = (N, E)>,
    ) -> Self
    where
        N: Into<String>,
        E: Into<KeyExtra>,
    {
        let slots = kinds
            .iter()
            .map(|&kind| (kind, inflection.feature(kind).to_vec()))
            .collect();
        let extras = extras
            .into_iter()
            .map(|(name, extra)| (name.into(), extra.into()))
            .collect();
        Self { slots, extras }
    }

    /// A key built from feature slots only.
    pub fn from_features(inflection: &Inflection, kinds: &[FeatureKind]) -> Self {
        Self::new(inflection, kinds, std::iter::empty::<(String, KeyExtra)>())
    }

    /// The features the key holds for `kind`; empty when the slot is absent or not part of the key.
    pub fn features(&self, kind: FeatureKind) -> &[Feature] {
        self.slots
            .iter()
            .find(|(k, _)| *k == kind)
            .map(|(_, features)| features.as_slice())
            .unwrap_or_default()
    }

    /// The feature kinds this key was built from, in the order given.
    pub fn kinds(&self) -> impl Iterator<Item = FeatureKind> + '_ {
        self.slots.iter().map(|(kind, _)| *kind)
    }

    pub fn extra(&self, name: &str) -> Option<&KeyExtra> {
        self.extras.get(name)
    }

    pub fn flag(&self, name: &str) -> Option<bool> {
        match self.extra(name)? {
            KeyExtra::Flag(flag) => Some(*flag),
            KeyExtra::Text(_) => None,
        }
    }

    /// Whether the inflections of a pass-two group were split by number because they carry a case.
    pub fn is_case_inflection_set(&self) -> bool {
        self.flag(IS_CASE_INFLECTION_SET).unwrap_or(false)
    }

    /// True iff the key's slot for `kind` holds a feature with `value`. An absent slot is not an error.
    pub fn has_feature_value(&self, kind: FeatureKind, value: &str) -> bool {
        self.features(kind).iter().any(|f| f.has_value(value))
    }
}

impl std::fmt::Display for InflectionGroupingKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let slots = self.slots.iter().map(|(kind, features)| {
            let values: Vec<String> = features
                .iter()
                .map(|f| f.value().to_canonical_string())
                .collect();
            format!("{kind}={}", values.join(","))
        });
        let extras = self
            .extras
            .iter()
            .map(|(name, extra)| format!("{name}={extra}"));
        let parts: Vec<String> = slots.chain(extras).collect();
        write!(f, "{}", parts.join("; "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::language::LanguageRegistry;

    fn noun(case: &str) -> Inflection {
        let registry = LanguageRegistry::classical().unwrap();
        let mut inflection = Inflection::new("natur", "lat", &registry)
            .unwrap()
            .with_suffix("ae");
        inflection
            .add_feature(Feature::new("noun", FeatureKind::PartOfSpeech, "lat").unwrap())
            .unwrap();
        inflection
            .add_feature(Feature::new(case, FeatureKind::Case, "lat").unwrap())
            .unwrap();
        inflection
            .add_features(vec![
                Feature::new("feminine", FeatureKind::Gender, "lat").unwrap(),
                Feature::new("masculine", FeatureKind::Gender, "lat").unwrap(),
            ])
            .unwrap();
        inflection
    }

    #[test]
    fn test_same_features_same_key() {
        let kinds = [FeatureKind::PartOfSpeech, FeatureKind::Gender];
        let a = InflectionGroupingKey::from_features(&noun("nominative"), &kinds);
        let b = InflectionGroupingKey::from_features(&noun("genitive"), &kinds);
        assert_eq!(a, b);
        assert_eq!(a.to_string(), b.to_string());
        assert_eq!(a.to_string(), r#"part of speech="noun"; gender="feminine","masculine""#);
    }

    #[test]
    fn test_differing_features_differ() {
        let kinds = [FeatureKind::Case];
        let a = InflectionGroupingKey::from_features(&noun("nominative"), &kinds);
        let b = InflectionGroupingKey::from_features(&noun("genitive"), &kinds);
        assert_ne!(a, b);
        assert_ne!(a.to_string(), b.to_string());
    }

    #[test]
    fn test_extras_are_part_of_key() {
        let inflection = noun("nominative");
        let kinds = [FeatureKind::PartOfSpeech];
        let a = InflectionGroupingKey::new(&inflection, &kinds, [(IS_CASE_INFLECTION_SET, true)]);
        let b = InflectionGroupingKey::new(&inflection, &kinds, [(IS_CASE_INFLECTION_SET, false)]);
        assert_ne!(a, b);
        assert!(a.is_case_inflection_set());
        assert!(!b.is_case_inflection_set());
        assert_eq!(
            a.to_string(),
            r#"part of speech="noun"; is_case_inflection_set=true"#
        );
    }

    #[test]
    fn test_separators_in_values_do_not_collide() {
        let inflection = noun("nominative");
        let a = InflectionGroupingKey::new(
            &inflection,
            &[],
            [(PREFIX, KeyExtra::from("a b")), (STEM, KeyExtra::from("c"))],
        );
        let b = InflectionGroupingKey::new(
            &inflection,
            &[],
            [(PREFIX, KeyExtra::from("a")), (STEM, KeyExtra::from("b c"))],
        );
        assert_ne!(a, b);
        assert_ne!(a.to_string(), b.to_string());
    }

    #[test]
    fn test_distinct_keys_render_differently() {
        let registry = LanguageRegistry::classical().unwrap();
        let gender = |values: &[&str]| {
            let mut inflection = Inflection::new("sic", "lat", &registry).unwrap();
            inflection
                .add_features(
                    values
                        .iter()
                        .map(|&v| Feature::new(v, FeatureKind::Gender, "lat").unwrap())
                        .collect(),
                )
                .unwrap();
            InflectionGroupingKey::from_features(&inflection, &[FeatureKind::Gender])
        };
        let two_features = gender(&["a", "b"]);
        let one_with_comma = gender(&["a,b"]);
        assert_ne!(two_features, one_with_comma);
        assert_ne!(two_features.to_string(), one_with_comma.to_string());
        assert_eq!(two_features.to_string(), r#"gender="a","b""#);

        let mut multi_valued = Inflection::new("sic", "lat", &registry).unwrap();
        multi_valued
            .add_feature(Feature::new(vec!["a", "b"], FeatureKind::Gender, "lat").unwrap())
            .unwrap();
        let multi_valued =
            InflectionGroupingKey::from_features(&multi_valued, &[FeatureKind::Gender]);
        let spaced = gender(&["a b"]);
        assert_ne!(multi_valued.to_string(), spaced.to_string());

        let inflection = Inflection::new("sic", "lat", &registry).unwrap();
        let text = InflectionGroupingKey::new(&inflection, &[], [(STEM, KeyExtra::from("true"))]);
        let flag = InflectionGroupingKey::new(&inflection, &[], [(STEM, KeyExtra::from(true))]);
        assert_ne!(text, flag);
        assert_eq!(text.to_string(), r#"stem="true""#);
        assert_eq!(flag.to_string(), "stem=true");
    }

    #[test]
    fn test_has_feature_value() {
        let inflection = noun("nominative");
        let key = InflectionGroupingKey::from_features(
            &inflection,
            &[FeatureKind::Gender, FeatureKind::Tense],
        );
        assert!(key.has_feature_value(FeatureKind::Gender, "masculine"));
        assert!(key.has_feature_value(FeatureKind::Gender, "feminine"));
        assert!(!key.has_feature_value(FeatureKind::Gender, "neuter"));
        // in the key but absent on the inflection
        assert!(!key.has_feature_value(FeatureKind::Tense, "present"));
        // not in the key at all
        assert!(!key.has_feature_value(FeatureKind::Case, "nominative"));
        assert_eq!(
            key.kinds().collect::<Vec<_>>(),
            vec![FeatureKind::Gender, FeatureKind::Tense]
        );
    }

    #[test]
    fn test_missing_slot_equals_empty_slot() {
        let registry = LanguageRegistry::classical().unwrap();
        let bare = Inflection::new("sic", "lat", &registry).unwrap();
        let also_bare = Inflection::new("sic", "lat", &registry).unwrap();
        let kinds = [FeatureKind::Case, FeatureKind::Number];
        let a = InflectionGroupingKey::from_features(&bare, &kinds);
        let b = InflectionGroupingKey::from_features(&also_bare, &kinds);
        assert_eq!(a, b);
        assert_eq!(a.to_string(), "case=; number=");
    }
}
