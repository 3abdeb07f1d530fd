//! The feature tree: the tree structure of a nested family of separations.
//!
//! Nodes are [`Location`]s, edges are [`FeatureEdge`]s, one per separation.
//! Locations live in one owned sequence addressed by node index, and a side
//! table maps each separation id to the node indices of the locations on its
//! two sides, so there are no cyclic back-references between nodes and
//! edges.

use std::collections::HashMap;

use crate::error::{Result, TotError};
use crate::types::{Feature, FeatureId, Specification, TangleId};

/// An edge of a [`FeatureTree`]: a separation, either unoriented
/// (`specification == None`) or oriented towards one of its sides.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct FeatureEdge {
    pub feature_id: FeatureId,
    pub specification: Option<Specification>,
    pub label: String,
}

/// A node of a [`FeatureTree`]: a location, the minimal features contained
/// in the pre-tangles of the separations of the tree.
///
/// The features of one location are pairwise order-incomparable.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Location {
    pub features: Vec<Feature>,
    /// The tangle id of the (unique) maximal tangle containing the features
    /// of this location, if one is associated.
    pub associated_tangle: Option<TangleId>,
    /// Index of this node in the owning tree's location sequence.
    pub node_idx: usize,
    pub label: String,
}

/// Endpoints of an edge in the side table: node indices of the locations on
/// the default and the inverse side. A side may be unresolved only while a
/// tree is under construction.
type EdgeEndpoints = (Option<usize>, Option<usize>);

#[derive(Debug, Clone)]
pub struct FeatureTree {
    edges: Vec<FeatureEdge>,
    edge_index: HashMap<FeatureId, usize>,
    locations: Vec<Location>,
    locations_of_edge: HashMap<FeatureId, EdgeEndpoints>,
}

impl FeatureTree {
    pub(crate) fn new(
        edges: Vec<FeatureEdge>,
        locations: Vec<Location>,
        locations_of_edge: HashMap<FeatureId, EdgeEndpoints>,
    ) -> Self {
        let edge_index = edges
            .iter()
            .enumerate()
            .map(|(i, edge)| (edge.feature_id, i))
            .collect();
        debug_assert!(locations
            .iter()
            .enumerate()
            .all(|(i, location)| location.node_idx == i));
        Self {
            edges,
            edge_index,
            locations,
            locations_of_edge,
        }
    }

    /// The feature ids of the nested separations, in construction order.
    pub fn feature_ids(&self) -> Vec<FeatureId> {
        self.edges.iter().map(|edge| edge.feature_id).collect()
    }

    /// The edge of a separation, or `None` if the id is not in the tree.
    pub fn get_edge(&self, feature_id: FeatureId) -> Option<&FeatureEdge> {
        self.edge_index.get(&feature_id).map(|&i| &self.edges[i])
    }

    /// All edges, in construction order.
    pub fn edges(&self) -> &[FeatureEdge] {
        &self.edges
    }

    /// All locations, in node-index order.
    pub fn locations(&self) -> &[Location] {
        &self.locations
    }

    /// Gets a location either by node index or by associated tangle id.
    ///
    /// Exactly one selector must be given; supplying both or neither is a
    /// [`TotError::LocationSelector`] error. Lookup by tangle id scans the
    /// locations and returns the first match, or `None`.
    pub fn get_location(
        &self,
        node_idx: Option<usize>,
        tangle_id: Option<&TangleId>,
    ) -> Result<Option<&Location>> {
        match (node_idx, tangle_id) {
            (Some(_), Some(_)) | (None, None) => Err(TotError::LocationSelector),
            (Some(idx), None) => Ok(self.locations.get(idx)),
            (None, Some(tangle_id)) => Ok(self
                .locations
                .iter()
                .find(|location| location.associated_tangle.as_ref() == Some(tangle_id))),
        }
    }

    /// The location on the side of the separation selected by the feature's
    /// specification.
    pub fn get_location_containing(&self, feature: Feature) -> Result<&Location> {
        let &(default_side, inverse_side) = self
            .locations_of_edge
            .get(&feature.id)
            .ok_or(TotError::UnknownFeature(feature.id))?;
        let node_idx = match feature.specification {
            Specification::Default => default_side,
            Specification::Inverse => inverse_side,
        };
        let node_idx = node_idx.ok_or(TotError::UnknownFeature(feature.id))?;
        Ok(&self.locations[node_idx])
    }

    pub fn get_node_idx_of_location_containing(&self, feature: Feature) -> Result<usize> {
        Ok(self.get_location_containing(feature)?.node_idx)
    }

    /// Returns a new tree whose edges carry the given per-id specification.
    ///
    /// Ids absent from the mapping become unoriented; a `None` mapping
    /// yields an all-unoriented tree. The original tree is unmodified.
    pub fn with_specification(
        &self,
        specification: Option<&HashMap<FeatureId, Specification>>,
    ) -> FeatureTree {
        let edges = self
            .edges
            .iter()
            .map(|edge| FeatureEdge {
                feature_id: edge.feature_id,
                specification: specification.and_then(|map| map.get(&edge.feature_id).copied()),
                label: edge.label.clone(),
            })
            .collect();
        FeatureTree::new(edges, self.locations.clone(), self.locations_of_edge.clone())
    }
}

/// A tree of tangles: a thin convenience wrapper around one [`FeatureTree`]
/// whose edges are unoriented.
#[derive(Debug, Clone)]
pub struct TreeOfTangles {
    pub feature_tree: FeatureTree,
}

impl TreeOfTangles {
    pub fn new(feature_tree: FeatureTree) -> Self {
        Self { feature_tree }
    }

    pub fn feature_ids(&self) -> Vec<FeatureId> {
        self.feature_tree.feature_ids()
    }

    pub fn locations(&self) -> &[Location] {
        self.feature_tree.locations()
    }

    /// A copy of the feature tree with every edge oriented by its default
    /// specification.
    pub fn default_specification(&self) -> FeatureTree {
        let specification = self
            .feature_tree
            .feature_ids()
            .into_iter()
            .map(|feature_id| (feature_id, Specification::Default))
            .collect();
        self.feature_tree.with_specification(Some(&specification))
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;

    /// A star with three leaves: the inverse side of every separation is a
    /// leaf location of its own, and all three default sides share the
    /// central location.
    pub fn three_star(oriented: bool) -> FeatureTree {
        let edges = (0..3)
            .map(|feature_id| FeatureEdge {
                feature_id,
                specification: oriented.then_some(Specification::Default),
                label: format!("feature {}", feature_id),
            })
            .collect();

        let mut locations: Vec<Location> = (0..3)
            .map(|i| Location {
                features: vec![Feature::new(i, Specification::Inverse)],
                associated_tangle: Some(TangleId::Num(i as u64)),
                node_idx: i,
                label: format!("tangle {}", i),
            })
            .collect();
        locations.push(Location {
            features: (0..3)
                .map(|i| Feature::new(i, Specification::Default))
                .collect(),
            associated_tangle: Some(TangleId::Num(3)),
            node_idx: 3,
            label: "tangle 3".to_string(),
        });

        let locations_of_edge = (0..3).map(|i| (i, (Some(3), Some(i)))).collect();

        FeatureTree::new(edges, locations, locations_of_edge)
    }
}
