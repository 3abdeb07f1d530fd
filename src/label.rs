//! Labeling a tree of tangles with synthesized logic terms.
//!
//! The edges of a built tree are usually corners produced by uncrossing, so
//! their ids carry no meaningful label of their own. These helpers run the
//! interpreter over every edge orientation (or every location) of a tree and
//! collect the resulting terms, ready for a renderer to display.

use std::collections::HashMap;

use crate::error::Result;
use crate::interpret::{interpret_feature, interpret_feature_array};
use crate::logic::TextTerm;
use crate::registry::UncrossingFeatureSystem;
use crate::tree::TreeOfTangles;
use crate::types::{Feature, Specification};

/// A term per oriented feature of a tree.
pub type FeatureLabels = HashMap<Feature, TextTerm>;

/// A term per location (keyed by node index) of a tree.
pub type LocationLabels = HashMap<usize, TextTerm>;

/// Interprets both orientations of every edge of the tree in terms of the
/// registry's original separations.
pub fn label_corners(
    tree_of_tangles: &TreeOfTangles,
    feat_sys: &UncrossingFeatureSystem,
) -> FeatureLabels {
    let mut feature_labels = FeatureLabels::new();
    for feature_id in tree_of_tangles.feature_ids() {
        for specification in [Specification::Default, Specification::Inverse] {
            let feature = Feature::new(feature_id, specification);
            feature_labels.insert(feature, interpret_feature(feature, feat_sys, None));
        }
    }
    feature_labels
}

/// Like [`label_corners`], but interprets each orientation under the
/// condition of the features it shares a location with.
///
/// The conditions of an orientation are the other features of the location
/// containing its inverse: standing in that location, those features are
/// already known to hold, which typically shortens the term.
pub fn label_conditioned_corners(
    tree_of_tangles: &TreeOfTangles,
    feat_sys: &UncrossingFeatureSystem,
) -> Result<FeatureLabels> {
    let mut feature_labels = FeatureLabels::new();
    for feature_id in tree_of_tangles.feature_ids() {
        for specification in [Specification::Default, Specification::Inverse] {
            let feature = Feature::new(feature_id, specification);
            let location = tree_of_tangles
                .feature_tree
                .get_location_containing(-feature)?;
            let conditions: Vec<Feature> = location
                .features
                .iter()
                .copied()
                .filter(|&other| other != -feature)
                .collect();
            debug_assert_eq!(conditions.len(), location.features.len() - 1);
            feature_labels.insert(
                feature,
                interpret_feature(feature, feat_sys, Some(&conditions)),
            );
        }
    }
    Ok(feature_labels)
}

/// Interprets the infimum of every location's features, keyed by node index.
pub fn label_locations(
    tree_of_tangles: &TreeOfTangles,
    feat_sys: &UncrossingFeatureSystem,
) -> LocationLabels {
    let mut location_labels = LocationLabels::new();
    for location in tree_of_tangles.locations() {
        let infimum = feat_sys.compute_infimum(&location.features);
        location_labels.insert(
            location.node_idx,
            interpret_feature_array(
                &infimum,
                &feat_sys.get_original_features(),
                &feat_sys.get_metadata_of_original_features(),
                None,
            ),
        );
    }
    location_labels
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::fixtures::three_star;

    /// Separations realizing the three-star fixture: the inverse side of
    /// separation `i` is the singleton `{i}`.
    fn star_registry() -> UncrossingFeatureSystem {
        let columns = vec![vec![-1, 1, 1], vec![1, -1, 1], vec![1, 1, -1]];
        let labels = vec!["a".to_string(), "b".to_string(), "c".to_string()];
        UncrossingFeatureSystem::with_array(columns, Some(labels)).unwrap()
    }

    #[test]
    fn test_label_corners() {
        let tot = TreeOfTangles::new(three_star(false));
        let labels = label_corners(&tot, &star_registry());
        assert_eq!(labels.len(), 6);
        assert_eq!(
            labels[&Feature::new(0, Specification::Default)].to_string(),
            "a"
        );
        assert_eq!(
            labels[&Feature::new(0, Specification::Inverse)].to_string(),
            "¬a"
        );
        assert_eq!(
            labels[&Feature::new(2, Specification::Inverse)].to_string(),
            "¬c"
        );
    }

    #[test]
    fn test_label_conditioned_corners() {
        let tot = TreeOfTangles::new(three_star(false));
        let labels = label_conditioned_corners(&tot, &star_registry()).unwrap();
        assert_eq!(labels.len(), 6);

        // The location containing the inverse of (0, Default) is a leaf
        // with no other features, so the label is unconditioned.
        assert_eq!(
            labels[&Feature::new(0, Specification::Default)].to_string(),
            "a"
        );

        // The inverse of (0, Inverse) sits in the central location, and on
        // the elements where its co-residents hold, the feature is trivial.
        assert_eq!(
            labels[&Feature::new(0, Specification::Inverse)].to_string(),
            "true"
        );
    }

    #[test]
    fn test_label_locations() {
        let tot = TreeOfTangles::new(three_star(false));
        let labels = label_locations(&tot, &star_registry());
        assert_eq!(labels.len(), 4);
        assert_eq!(labels[&0].to_string(), "¬a");
        assert_eq!(labels[&1].to_string(), "¬b");
        assert_eq!(labels[&2].to_string(), "¬c");
        // No element lies on the default side of all three separations.
        assert_eq!(labels[&3].to_string(), "false");
    }
}
