//! The feature system: storage for set separations of a ground set.
//!
//! A separation is stored as a signed characteristic column over the ground
//! set: `+1` means the element lies on the default side, `-1` on the inverse
//! side. The system is the single owner of all columns; everything else in
//! the crate addresses separations through [`FeatureId`] handles.
//!
//! Columns are unique up to inversion: adding a column that equals an
//! existing column, or its pointwise negation, does not create a new
//! separation but folds into the existing id, appending a [`Metadata`]
//! record with the matching orientation to that id's chain.

use std::collections::HashMap;

use log::debug;

use crate::error::{Result, TotError};
use crate::metadata::{Metadata, MetadataKind};
use crate::types::{Feature, FeatureId, Specification};

#[derive(Debug, Clone)]
pub struct FeatureSystem {
    ground_set_size: usize,
    columns: Vec<Vec<i8>>,
    metadata: Vec<Vec<Metadata>>,
    corners: HashMap<(FeatureId, FeatureId), Vec<Feature>>,
}

impl FeatureSystem {
    /// Creates an empty system over a ground set of the given size.
    pub fn new(ground_set_size: usize) -> Self {
        Self {
            ground_set_size,
            columns: Vec::new(),
            metadata: Vec::new(),
            corners: HashMap::new(),
        }
    }

    /// Builds a system from signed characteristic columns, one separation
    /// per column, with an optional label per column.
    ///
    /// Duplicate columns (up to inversion) fold into one id.
    pub fn with_array(columns: Vec<Vec<i8>>, labels: Option<Vec<String>>) -> Result<Self> {
        let ground_set_size = columns.first().map_or(0, |c| c.len());
        let mut system = Self::new(ground_set_size);
        system.add_features(columns, labels)?;
        Ok(system)
    }

    /// The number of separations in the system.
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    pub fn ground_set_size(&self) -> usize {
        self.ground_set_size
    }

    /// The signed characteristic vector of an oriented feature:
    /// the id's raw column multiplied by the orientation's sign.
    pub fn feature(&self, feature: Feature) -> Vec<i8> {
        let sign = feature.specification.sign();
        self.columns[feature.id].iter().map(|&v| v * sign).collect()
    }

    /// The raw (default-oriented) column of a separation.
    pub fn column(&self, id: FeatureId) -> &[i8] {
        &self.columns[id]
    }

    /// Sizes of the two sides of a separation: (default side, inverse side).
    pub fn side_counts(&self, id: FeatureId) -> (usize, usize) {
        let positive = self.columns[id].iter().filter(|&&v| v == 1).count();
        (positive, self.ground_set_size - positive)
    }

    /// Whether feature `a` is order-dominated by feature `b`, i.e. the side
    /// selected by `a` is a subset of the side selected by `b`.
    pub fn is_le(&self, a: Feature, b: Feature) -> bool {
        let sign_a = a.specification.sign();
        let sign_b = b.specification.sign();
        self.columns[a.id]
            .iter()
            .zip(self.columns[b.id].iter())
            .all(|(&va, &vb)| va * sign_a <= vb * sign_b)
    }

    /// Whether two separations are nested: some orientation of one is
    /// order-dominated by some orientation of the other.
    pub fn is_nested(&self, id_a: FeatureId, id_b: FeatureId) -> bool {
        use Specification::{Default, Inverse};
        [Default, Inverse].into_iter().any(|spec_a| {
            [Default, Inverse]
                .into_iter()
                .any(|spec_b| self.is_le(Feature::new(id_a, spec_a), Feature::new(id_b, spec_b)))
        })
    }

    /// Adds the corner of two oriented features: the separation whose
    /// default side is the intersection of the two selected sides.
    ///
    /// The corner is remembered for [`get_corners`][Self::get_corners]
    /// lookups on the (unordered) id pair.
    pub fn add_corner(&mut self, a: Feature, b: Feature) -> Feature {
        let column: Vec<i8> = self
            .feature(a)
            .iter()
            .zip(self.feature(b).iter())
            .map(|(&va, &vb)| va.min(vb))
            .collect();
        let corner = self
            .insert(column, MetadataKind::Corner, None)
            .expect("corner column has ground-set length by construction");
        debug!("add_corner({}, {}) -> {}", a, b, corner);
        let key = pair_key(a.id, b.id);
        self.corners.entry(key).or_default().push(corner);
        corner
    }

    /// Corners previously generated for the (unordered) pair of ids.
    pub fn get_corners(&self, id_a: FeatureId, id_b: FeatureId) -> Vec<Feature> {
        self.corners
            .get(&pair_key(id_a, id_b))
            .cloned()
            .unwrap_or_default()
    }

    /// The infimum (pointwise minimum) of the signed columns of the given
    /// features. Empty input yields the all-ones vector.
    pub fn compute_infimum(&self, features: &[Feature]) -> Vec<i8> {
        let mut infimum = vec![1i8; self.ground_set_size];
        for &feature in features {
            for (value, signed) in infimum.iter_mut().zip(self.feature(feature)) {
                *value = (*value).min(signed);
            }
        }
        infimum
    }

    /// The metadata chain of a separation; the first record is primary.
    /// An empty slice means no metadata was ever attached.
    pub fn feature_metadata(&self, id: FeatureId) -> &[Metadata] {
        &self.metadata[id]
    }

    /// Adds separations from signed columns, folding duplicates, and
    /// returns the id each input column ended up under.
    pub fn add_features(
        &mut self,
        columns: Vec<Vec<i8>>,
        labels: Option<Vec<String>>,
    ) -> Result<Vec<FeatureId>> {
        let mut ids = Vec::with_capacity(columns.len());
        for (i, column) in columns.into_iter().enumerate() {
            let label = labels.as_ref().and_then(|l| l.get(i).cloned());
            let feature = self.insert(column, MetadataKind::Custom, label)?;
            ids.push(feature.id);
        }
        Ok(ids)
    }

    /// Inserts a column, folding it into an existing separation if it equals
    /// one (up to inversion). Returns the column as an oriented feature of
    /// the id it ended up under.
    fn insert(&mut self, column: Vec<i8>, kind: MetadataKind, info: Option<String>) -> Result<Feature> {
        if self.ground_set_size != 0 && column.len() != self.ground_set_size {
            return Err(TotError::ColumnLength {
                expected: self.ground_set_size,
                got: column.len(),
            });
        }
        if self.ground_set_size == 0 {
            self.ground_set_size = column.len();
        }
        debug_assert!(column.iter().all(|&v| v == 1 || v == -1));

        for (id, existing) in self.columns.iter().enumerate() {
            let orientation = if existing == &column {
                Specification::Default
            } else if existing.iter().zip(column.iter()).all(|(&e, &c)| e == -c) {
                Specification::Inverse
            } else {
                continue;
            };
            debug!("folding duplicate column into feature {} ({})", id, orientation);
            self.metadata[id].push(record(kind, info, orientation));
            return Ok(Feature::new(id, orientation));
        }

        let id = self.columns.len();
        self.columns.push(column);
        self.metadata
            .push(vec![record(kind, info, Specification::Default)]);
        Ok(Feature::new(id, Specification::Default))
    }
}

fn record(kind: MetadataKind, info: Option<String>, orientation: Specification) -> Metadata {
    match kind {
        MetadataKind::Custom => Metadata::custom(info, orientation),
        MetadataKind::Corner => Metadata::corner(info, orientation),
    }
}

fn pair_key(id_a: FeatureId, id_b: FeatureId) -> (FeatureId, FeatureId) {
    (id_a.min(id_b), id_a.max(id_b))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pos(id: FeatureId) -> Feature {
        Feature::new(id, Specification::Default)
    }

    fn neg(id: FeatureId) -> Feature {
        Feature::new(id, Specification::Inverse)
    }

    #[test]
    fn test_with_array_folds_inverse_columns() {
        let columns = vec![
            vec![1, 1, -1],
            vec![-1, 1, -1],
            vec![-1, -1, 1], // inversion of column 0
        ];
        let system = FeatureSystem::with_array(columns, None).unwrap();
        assert_eq!(system.len(), 2);
        let chain = system.feature_metadata(0);
        assert_eq!(chain.len(), 2);
        assert_eq!(chain[1].orientation, Specification::Inverse);
    }

    #[test]
    fn test_column_length_mismatch() {
        let columns = vec![vec![1, 1, -1], vec![-1, 1]];
        let result = FeatureSystem::with_array(columns, None);
        assert!(matches!(result, Err(TotError::ColumnLength { expected: 3, got: 2 })));
    }

    #[test]
    fn test_feature_is_signed_column() {
        let system = FeatureSystem::with_array(vec![vec![1, -1, 1]], None).unwrap();
        assert_eq!(system.feature(pos(0)), vec![1, -1, 1]);
        assert_eq!(system.feature(neg(0)), vec![-1, 1, -1]);
    }

    #[test]
    fn test_side_counts() {
        let system = FeatureSystem::with_array(vec![vec![1, -1, 1, 1]], None).unwrap();
        assert_eq!(system.side_counts(0), (3, 1));
    }

    #[test]
    fn test_is_le_and_nested() {
        // Side of 0 = {0}, side of 1 = {0, 1}: 0 <= 1.
        let columns = vec![vec![1, -1, -1, -1], vec![1, 1, -1, -1]];
        let system = FeatureSystem::with_array(columns, None).unwrap();
        assert!(system.is_le(pos(0), pos(1)));
        assert!(!system.is_le(pos(1), pos(0)));
        assert!(system.is_le(neg(1), neg(0)));
        assert!(system.is_nested(0, 1));
    }

    #[test]
    fn test_crossing_separations_are_not_nested() {
        let columns = vec![vec![1, 1, -1, -1], vec![1, -1, 1, -1]];
        let system = FeatureSystem::with_array(columns, None).unwrap();
        assert!(!system.is_nested(0, 1));
    }

    #[test]
    fn test_add_corner_is_infimum() {
        let columns = vec![vec![1, 1, -1, -1], vec![1, -1, 1, -1]];
        let mut system = FeatureSystem::with_array(columns, None).unwrap();
        let corner = system.add_corner(pos(0), pos(1));
        assert_eq!(system.len(), 3);
        assert_eq!(system.feature(corner), vec![1, -1, -1, -1]);
        assert_eq!(system.feature_metadata(corner.id)[0].kind, MetadataKind::Corner);
        assert_eq!(system.get_corners(0, 1), vec![corner]);
        assert_eq!(system.get_corners(1, 0), vec![corner]);
    }

    #[test]
    fn test_corner_folds_into_existing_column() {
        // inf(+0, +1) equals column 0 itself.
        let columns = vec![vec![1, -1, -1, -1], vec![1, 1, -1, -1]];
        let mut system = FeatureSystem::with_array(columns, None).unwrap();
        let corner = system.add_corner(pos(0), pos(1));
        assert_eq!(system.len(), 2);
        assert_eq!(corner, pos(0));
        assert_eq!(system.feature_metadata(0).len(), 2);
        assert_eq!(system.feature_metadata(0)[1].kind, MetadataKind::Corner);
    }

    #[test]
    fn test_compute_infimum() {
        let columns = vec![vec![1, 1, -1, -1], vec![1, -1, 1, -1]];
        let system = FeatureSystem::with_array(columns, None).unwrap();
        assert_eq!(system.compute_infimum(&[pos(0), pos(1)]), vec![1, -1, -1, -1]);
        assert_eq!(system.compute_infimum(&[pos(0), neg(1)]), vec![-1, 1, -1, -1]);
        assert_eq!(system.compute_infimum(&[]), vec![1, 1, 1, 1]);
    }

    #[test]
    fn test_add_features_returns_folded_ids() {
        let mut system =
            FeatureSystem::with_array(vec![vec![1, 1, -1]], Some(vec!["a".to_string()])).unwrap();
        let ids = system
            .add_features(
                vec![vec![-1, -1, 1], vec![1, -1, 1]],
                Some(vec!["not a".to_string(), "b".to_string()]),
            )
            .unwrap();
        assert_eq!(ids, vec![0, 1]);
        assert_eq!(system.len(), 2);
        assert_eq!(system.feature_metadata(0)[1].info.as_deref(), Some("not a"));
    }

    #[test]
    fn test_clone_is_deep() {
        let mut system = FeatureSystem::with_array(vec![vec![1, -1], vec![1, 1]], None).unwrap();
        let snapshot = system.clone();
        system.add_corner(pos(0), neg(1));
        assert_eq!(snapshot.len(), 2);
        assert!(snapshot.get_corners(0, 1).is_empty());
    }
}
