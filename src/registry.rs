//! Uncrossing-aware registry over a [`FeatureSystem`].
//!
//! Uncrossing a family of separations keeps adding corners to the system, so
//! after a search the system is a mix of the caller's *original* separations
//! and derived ones. The registry remembers which ids are original and
//! proxies everything else to the wrapped system; the interpreter uses it to
//! express derived features in terms of the original, labeled ones.

use crate::error::Result;
use crate::metadata::{Metadata, MetadataKind};
use crate::system::FeatureSystem;
use crate::types::{Feature, FeatureId};

#[derive(Debug, Clone)]
pub struct UncrossingFeatureSystem {
    system: FeatureSystem,
    original_ids: Vec<FeatureId>,
}

impl UncrossingFeatureSystem {
    /// Builds a fresh system from signed columns; every resulting id is
    /// original.
    pub fn with_array(columns: Vec<Vec<i8>>, labels: Option<Vec<String>>) -> Result<Self> {
        let system = FeatureSystem::with_array(columns, labels)?;
        let original_ids = (0..system.len()).collect();
        Ok(Self { system, original_ids })
    }

    /// Wraps an existing system, recovering the original ids from metadata:
    /// an id is original iff no record in its chain is a corner record.
    pub fn from_feature_system(system: FeatureSystem) -> Self {
        let original_ids = (0..system.len())
            .filter(|&id| {
                system
                    .feature_metadata(id)
                    .iter()
                    .all(|record| record.kind != MetadataKind::Corner)
            })
            .collect();
        Self { system, original_ids }
    }

    /// The ids the registry considers original, in order.
    pub fn original_ids(&self) -> &[FeatureId] {
        &self.original_ids
    }

    pub fn get_number_of_original_features(&self) -> usize {
        self.original_ids.len()
    }

    /// The signed columns of the original features, in `original_ids` order.
    pub fn get_original_features(&self) -> Vec<Vec<i8>> {
        self.original_ids
            .iter()
            .map(|&id| self.system.column(id).to_vec())
            .collect()
    }

    /// The signed characteristic vector of an oriented feature.
    pub fn get_feature(&self, feature: Feature) -> Vec<i8> {
        self.system.feature(feature)
    }

    /// A label per original feature: the primary metadata label if the
    /// system has one, else the placeholder `s{id}`.
    pub fn get_metadata_of_original_features(&self) -> Vec<String> {
        self.original_ids
            .iter()
            .map(|&id| match self.system.feature_metadata(id).first() {
                Some(Metadata { info: Some(info), .. }) => info.clone(),
                _ => format!("s{}", id),
            })
            .collect()
    }

    /// Adds separations and treats every one of them as original.
    ///
    /// The returned ids are appended to `original_ids` unconditionally, even
    /// when a column folded into a previously derived separation.
    pub fn add_features(
        &mut self,
        columns: Vec<Vec<i8>>,
        labels: Option<Vec<String>>,
    ) -> Result<Vec<FeatureId>> {
        let ids = self.system.add_features(columns, labels)?;
        self.original_ids.extend_from_slice(&ids);
        Ok(ids)
    }

    // Pass-throughs to the wrapped system.

    pub fn len(&self) -> usize {
        self.system.len()
    }

    pub fn is_empty(&self) -> bool {
        self.system.is_empty()
    }

    pub fn ground_set_size(&self) -> usize {
        self.system.ground_set_size()
    }

    pub fn add_corner(&mut self, a: Feature, b: Feature) -> Feature {
        self.system.add_corner(a, b)
    }

    pub fn get_corners(&self, id_a: FeatureId, id_b: FeatureId) -> Vec<Feature> {
        self.system.get_corners(id_a, id_b)
    }

    pub fn compute_infimum(&self, features: &[Feature]) -> Vec<i8> {
        self.system.compute_infimum(features)
    }

    pub fn is_le(&self, a: Feature, b: Feature) -> bool {
        self.system.is_le(a, b)
    }

    pub fn is_nested(&self, id_a: FeatureId, id_b: FeatureId) -> bool {
        self.system.is_nested(id_a, id_b)
    }

    pub fn side_counts(&self, id: FeatureId) -> (usize, usize) {
        self.system.side_counts(id)
    }

    pub fn feature_metadata(&self, id: FeatureId) -> &[Metadata] {
        self.system.feature_metadata(id)
    }

    pub fn system(&self) -> &FeatureSystem {
        &self.system
    }
}

impl From<FeatureSystem> for UncrossingFeatureSystem {
    fn from(system: FeatureSystem) -> Self {
        Self::from_feature_system(system)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Specification;

    // Small deterministic xorshift; content does not matter, only that the
    // columns are unlikely to collide up to inversion.
    fn random_columns(count: usize, length: usize, mut state: u64) -> Vec<Vec<i8>> {
        (0..count)
            .map(|_| {
                (0..length)
                    .map(|_| {
                        state ^= state << 13;
                        state ^= state >> 7;
                        state ^= state << 17;
                        if state & 1 == 0 {
                            1
                        } else {
                            -1
                        }
                    })
                    .collect()
            })
            .collect()
    }

    fn add_corners_everywhere(registry: &mut UncrossingFeatureSystem) {
        use Specification::{Default, Inverse};
        let len = registry.len();
        for i in 0..len {
            for j in (i + 1)..len {
                registry.add_corner(Feature::new(i, Default), Feature::new(j, Inverse));
            }
        }
    }

    #[test]
    fn test_with_array_marks_all_original() {
        let columns = random_columns(10, 100, 0xdead_beef);
        let registry = UncrossingFeatureSystem::with_array(columns, None).unwrap();
        assert_eq!(registry.len(), 10);
        assert_eq!(registry.original_ids(), (0..10).collect::<Vec<_>>());
    }

    #[test]
    fn test_corners_do_not_become_original() {
        let columns = random_columns(6, 64, 42);
        let mut registry = UncrossingFeatureSystem::with_array(columns, None).unwrap();
        add_corners_everywhere(&mut registry);
        assert!(registry.len() > 6);
        assert_eq!(registry.get_number_of_original_features(), 6);
        assert_eq!(registry.original_ids(), (0..6).collect::<Vec<_>>());
    }

    #[test]
    fn test_from_feature_system_recovers_originals() {
        let columns = random_columns(6, 64, 7);
        let mut system = FeatureSystem::with_array(columns, None).unwrap();
        for i in 0..5 {
            system.add_corner(
                Feature::new(i, Specification::Default),
                Feature::new(i + 1, Specification::Default),
            );
        }
        let registry = UncrossingFeatureSystem::from_feature_system(system);
        assert_eq!(registry.get_number_of_original_features(), 6);
        assert_eq!(registry.original_ids(), (0..6).collect::<Vec<_>>());
    }

    #[test]
    fn test_get_original_features_restricts_columns() {
        let columns = random_columns(4, 32, 99);
        let mut registry = UncrossingFeatureSystem::with_array(columns.clone(), None).unwrap();
        add_corners_everywhere(&mut registry);
        assert_eq!(registry.get_original_features(), columns);
    }

    #[test]
    fn test_metadata_placeholder_labels() {
        let columns = random_columns(3, 16, 5);
        let registry = UncrossingFeatureSystem::with_array(columns, None).unwrap();
        assert_eq!(
            registry.get_metadata_of_original_features(),
            vec!["s0", "s1", "s2"]
        );
    }

    #[test]
    fn test_metadata_labels_preserved() {
        let columns = random_columns(3, 16, 5);
        let labels = vec!["a".to_string(), "b".to_string(), "c".to_string()];
        let mut registry = UncrossingFeatureSystem::with_array(columns, Some(labels)).unwrap();
        add_corners_everywhere(&mut registry);
        assert_eq!(registry.get_metadata_of_original_features(), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_add_features_extends_original_ids() {
        // Pins the observed behavior: freshly added separations are always
        // treated as original, even when a column folds into a derived id.
        let columns = vec![vec![1, 1, -1, -1], vec![1, -1, 1, -1]];
        let mut registry = UncrossingFeatureSystem::with_array(columns, None).unwrap();
        let corner = registry.add_corner(
            Feature::new(0, Specification::Default),
            Feature::new(1, Specification::Default),
        );
        assert_eq!(registry.get_number_of_original_features(), 2);

        // Re-adding the corner's column folds into the derived id, which
        // nevertheless lands in original_ids.
        let corner_column = registry.get_feature(corner);
        let ids = registry.add_features(vec![corner_column], None).unwrap();
        assert_eq!(ids, vec![corner.id]);
        assert_eq!(registry.original_ids(), vec![0, 1, corner.id]);
    }
}
