//! # tangles-tot: Trees of Tangles in Rust
//!
//! **`tangles-tot`** turns a family of pairwise-nested set separations into an
//! explicit tree, and reconstructs boolean descriptions of derived separations
//! in terms of the originally labeled ones.
//!
//! ## What is a tree of tangles?
//!
//! A *separation* splits a ground set into two sides; an oriented side is a
//! *feature*. When every pair of separations in a family is **nested** (one
//! orientation of one lies inside an orientation of the other), the family has
//! the structure of a tree: the separations are the edges, and the *locations*
//! (minimal consistent sets of features) are the nodes. Tangle search engines
//! produce such nested families by *uncrossing* — replacing crossing
//! separations with their corners.
//!
//! ## Key Features
//!
//! - **Tree builder**: [`build::build_tree_of_tangles`] converts the efficient
//!   distinguishers of a search result into a [`tree::FeatureTree`], driven by
//!   an injected order predicate.
//! - **Uncrossing-aware registry**: [`registry::UncrossingFeatureSystem`]
//!   tracks which separations are original and which were derived by
//!   uncrossing.
//! - **Feature interpretation**: [`interpret::interpret_feature`] synthesizes
//!   a minimal [`logic::TextTerm`] equivalent to any derived feature, over the
//!   labels of the original separations, optionally conditioned on features
//!   assumed to hold.
//! - **Tree labeling**: [`label`] runs the interpreter over every edge and
//!   location of a built tree.
//!
//! ## Basic Usage
//!
//! ```rust
//! use tangles_tot::registry::UncrossingFeatureSystem;
//! use tangles_tot::interpret::interpret_feature;
//! use tangles_tot::types::{Feature, Specification};
//!
//! // Two labeled separations of a four-element ground set.
//! let columns = vec![vec![1, 1, -1, -1], vec![1, -1, 1, -1]];
//! let labels = vec!["left".to_string(), "top".to_string()];
//! let mut feat_sys = UncrossingFeatureSystem::with_array(columns, Some(labels)).unwrap();
//!
//! // Uncrossing adds the corner of their default orientations.
//! let corner = feat_sys.add_corner(
//!     Feature::new(0, Specification::Default),
//!     Feature::new(1, Specification::Default),
//! );
//!
//! // The corner is exactly "left ∧ top".
//! let term = interpret_feature(corner, &feat_sys, None);
//! assert_eq!(term.to_string(), "left ∧ top");
//! ```
//!
//! The core algorithms are single-threaded and synchronous; every failure is
//! surfaced as a [`error::TotError`] before any state is committed.

pub mod build;
pub mod error;
pub mod interpret;
pub mod label;
pub mod logic;
pub mod metadata;
pub mod registry;
pub mod system;
pub mod tree;
pub mod types;

pub use crate::build::{build_feature_tree, build_tree_of_tangles, SweepResult};
pub use crate::error::TotError;
pub use crate::interpret::{interpret_feature, interpret_feature_array};
pub use crate::label::{label_conditioned_corners, label_corners, label_locations};
pub use crate::logic::{TermSource, TextTerm};
pub use crate::metadata::{Metadata, MetadataKind};
pub use crate::registry::UncrossingFeatureSystem;
pub use crate::system::FeatureSystem;
pub use crate::tree::{FeatureEdge, FeatureTree, Location, TreeOfTangles};
pub use crate::types::{Feature, FeatureId, Specification, TangleId};
