use crate::feature::FeatureKind;
use crate::feature_type::FeatureType;

/// An ordered selection of feature types, e.g. the columns of an inflection table.
#[derive(Clone, Debug, Default)]
pub struct FeatureList {
    items: Vec<FeatureType>,
}

impl FeatureList {
    pub fn new(items: impl IntoIterator<Item = FeatureType>) -> Self {
        Self {
            items: items.into_iter().collect(),
        }
    }

    pub fn add(&mut self, feature_type: FeatureType) -> &mut Self {
        self.items.push(feature_type);
        self
    }

    pub fn items(&self) -> &[FeatureType] {
        &self.items
    }

    pub fn iter(&self) -> std::slice::Iter<'_, FeatureType> {
        self.items.iter()
    }

    /// The type of `kind`. If several were added, the last one wins.
    pub fn of_type(&self, kind: FeatureKind) -> Option<&FeatureType> {
        self.items.iter().rev().find(|t| t.kind() == kind)
    }

    pub fn has_type(&self, kind: FeatureKind) -> bool {
        self.of_type(kind).is_some()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl<'a> IntoIterator for &'a FeatureList {
    type Item = &'a FeatureType;
    type IntoIter = std::slice::Iter<'a, FeatureType>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_by_kind() {
        let gender = FeatureType::new(FeatureKind::Gender, ["masculine", "feminine"], "lat").unwrap();
        let case = FeatureType::new(FeatureKind::Case, ["nominative"], "lat").unwrap();
        let mut list = FeatureList::new([gender]);
        list.add(case);

        assert_eq!(list.len(), 2);
        assert!(list.has_type(FeatureKind::Case));
        assert!(!list.has_type(FeatureKind::Tense));
        let kinds: Vec<FeatureKind> = list.iter().map(FeatureType::kind).collect();
        assert_eq!(kinds, vec![FeatureKind::Gender, FeatureKind::Case]);
    }

    #[test]
    fn test_last_added_wins() {
        let mut list = FeatureList::default();
        assert!(list.is_empty());
        list.add(FeatureType::new(FeatureKind::Gender, ["masculine"], "lat").unwrap())
            .add(FeatureType::new(FeatureKind::Gender, ["neuter"], "lat").unwrap());
        let gender = list.of_type(FeatureKind::Gender).unwrap();
        assert!(gender.has_value("neuter"));
        assert!(!gender.has_value("masculine"));
    }
}
