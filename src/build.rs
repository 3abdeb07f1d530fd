//! Building a tree of tangles from the result of a tangle search.
//!
//! The search itself is an external collaborator; the builder only needs the
//! explored agreement limit, the efficient distinguishers at an agreement
//! value, and the order predicate over oriented features. The predicate is
//! injected as a plain function so the builder can run against mock orders
//! in tests.

use std::collections::HashMap;

use log::debug;

use crate::error::{Result, TotError};
use crate::tree::{FeatureEdge, FeatureTree, Location, TreeOfTangles};
use crate::types::{Feature, FeatureId, Specification};

/// The part of a tangle search result the builder consumes.
pub trait SweepResult {
    /// The lowest agreement value the search has fully explored down to.
    fn limit(&self) -> u32;

    /// The ids of the efficient distinguishers of all maximal tangles of at
    /// least the given agreement.
    fn efficient_distinguishers(&self, agreement: u32) -> Vec<FeatureId>;

    /// Whether feature `a` is order-dominated by feature `b`.
    fn is_le(&self, a: Feature, b: Feature) -> bool;
}

/// Builds the tree of tangles of the efficient distinguishers at the given
/// agreement value (defaults to one above the sweep's explored limit).
///
/// Fails before any location is created if the agreement value does not
/// exceed the explored limit, or if the distinguishers have not been
/// uncrossed. The edges of the resulting tree are unoriented.
pub fn build_tree_of_tangles(
    sweep: &impl SweepResult,
    agreement_value: Option<u32>,
) -> Result<TreeOfTangles> {
    let limit = sweep.limit();
    let agreement = agreement_value.unwrap_or(limit + 1);
    if agreement <= limit {
        return Err(TotError::AgreementTooLow { agreement, limit });
    }
    let mut ids = sweep.efficient_distinguishers(agreement);
    ids.sort_unstable();
    ids.dedup();
    debug!("building tree of tangles over {} distinguishers at agreement {}", ids.len(), agreement);
    ensure_uncrossed(&ids, |a, b| sweep.is_le(a, b))?;
    let feature_tree = build_feature_tree(&ids, |a, b| sweep.is_le(a, b));
    Ok(TreeOfTangles::new(feature_tree))
}

/// Checks that every pair of distinct ids is nested: at least one of the
/// four cross-orientation order relations must hold.
fn ensure_uncrossed(ids: &[FeatureId], is_le: impl Fn(Feature, Feature) -> bool) -> Result<()> {
    use Specification::{Default, Inverse};
    for (i, &a) in ids.iter().enumerate() {
        for &b in &ids[i + 1..] {
            let nested = [Default, Inverse].into_iter().any(|spec_a| {
                [Default, Inverse]
                    .into_iter()
                    .any(|spec_b| is_le(Feature::new(a, spec_a), Feature::new(b, spec_b)))
            });
            if !nested {
                return Err(TotError::NotUncrossed { a, b });
            }
        }
    }
    Ok(())
}

/// Builds the feature tree of a family of pairwise-nested separations under
/// the given order predicate.
///
/// Processes the oriented features deterministically: every id in its
/// default orientation first, in the given order, then every id in its
/// inverse orientation. Each not-yet-placed oriented feature spawns the
/// location consisting of the feature itself together with the inverses of
/// the maximal features strictly below it.
pub fn build_feature_tree(
    ids: &[FeatureId],
    is_le: impl Fn(Feature, Feature) -> bool,
) -> FeatureTree {
    let edges = ids
        .iter()
        .map(|&feature_id| FeatureEdge {
            feature_id,
            specification: None,
            label: format!("feature {}", feature_id),
        })
        .collect();

    let all_features: Vec<Feature> = ids
        .iter()
        .map(|&id| Feature::new(id, Specification::Default))
        .chain(ids.iter().map(|&id| Feature::new(id, Specification::Inverse)))
        .collect();

    let mut locations: Vec<Location> = Vec::new();
    let mut locations_of_edge: HashMap<FeatureId, (Option<usize>, Option<usize>)> = HashMap::new();

    for &feature in &all_features {
        if is_placed(feature, &locations_of_edge) {
            continue;
        }
        let below = maximal_features_below(feature, &all_features, &is_le);
        let mut features = vec![feature];
        features.extend(below.into_iter().map(|dominated| -dominated));

        let node_idx = locations.len();
        debug!("location {} = {:?}", node_idx, features);
        locations.push(Location {
            features: features.clone(),
            associated_tangle: None,
            node_idx,
            label: format!("tangle {}", node_idx),
        });
        for placed in features {
            let endpoints = locations_of_edge.entry(placed.id).or_insert((None, None));
            match placed.specification {
                Specification::Default => endpoints.0 = Some(node_idx),
                Specification::Inverse => endpoints.1 = Some(node_idx),
            }
        }
    }

    debug_assert!(
        ids.iter().all(|id| matches!(locations_of_edge.get(id), Some((Some(_), Some(_))))),
        "every separation must have both sides resolved to a location"
    );

    FeatureTree::new(edges, locations, locations_of_edge)
}

fn is_placed(feature: Feature, locations_of_edge: &HashMap<FeatureId, (Option<usize>, Option<usize>)>) -> bool {
    match locations_of_edge.get(&feature.id) {
        None => false,
        Some(&(default_side, inverse_side)) => match feature.specification {
            Specification::Default => default_side.is_some(),
            Specification::Inverse => inverse_side.is_some(),
        },
    }
}

/// The maximal elements of the set of oriented features strictly below
/// `feature`.
///
/// Incremental scan: a candidate dominated by an already-kept element is
/// dropped, and a newly admitted candidate evicts the kept elements it
/// dominates, so the kept set stays pairwise order-incomparable.
fn maximal_features_below(
    feature: Feature,
    all_features: &[Feature],
    is_le: &impl Fn(Feature, Feature) -> bool,
) -> Vec<Feature> {
    let mut maximal: Vec<Feature> = Vec::new();
    for &candidate in all_features {
        if candidate == feature {
            continue;
        }
        if !is_le(candidate, feature) {
            continue;
        }
        if maximal.iter().any(|&kept| is_le(candidate, kept)) {
            continue;
        }
        maximal.retain(|&kept| !is_le(kept, candidate));
        maximal.push(candidate);
    }
    maximal
}
