use rustc_hash::FxHashMap;

use crate::error::{LookupError, Result, ValidationError, require_non_empty};
use crate::feature::FeatureValue;

/// Maps values found in external morphology data (an analyzer's own vocabulary)
/// to this library's standard feature values.
#[derive(Clone, Debug, Default)]
pub struct FeatureImporter {
    hash: FxHashMap<String, FeatureValue>,
}

impl FeatureImporter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Maps an external value to one or more library values.
    /// Mapping the same external value twice replaces the earlier mapping.
    pub fn map(
        &mut self,
        imported_value: impl Into<String>,
        library_value: impl Into<FeatureValue>,
    ) -> Result<&mut Self> {
        let imported_value = imported_value.into();
        let library_value = library_value.into();
        require_non_empty(&imported_value, "imported value")?;
        if library_value.is_empty() {
            return Err(ValidationError::Empty {
                field: "library value",
            }
            .into());
        }
        self.hash.insert(imported_value, library_value);
        Ok(self)
    }

    pub fn has(&self, imported_value: &str) -> bool {
        self.hash.contains_key(imported_value)
    }

    pub fn get(&self, imported_value: &str) -> Result<&FeatureValue> {
        self.hash.get(imported_value).ok_or_else(|| {
            LookupError::NotMapped {
                value: imported_value.to_string(),
            }
            .into()
        })
    }

    pub fn len(&self) -> usize {
        self.hash.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hash.is_empty()
    }
}
