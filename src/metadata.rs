//! Metadata attached to separations in a feature system.
//!
//! A separation can be known under several descriptions at once: a column
//! added twice under different labels, or a corner that happens to coincide
//! with an earlier column, all fold into one id. Every description becomes a
//! [`Metadata`] record in the id's *chain*, an ordered sequence whose first
//! element is the primary record.

use crate::types::Specification;

/// How a separation came to be in the system.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum MetadataKind {
    /// Supplied by the caller (`with_array` / `add_features`).
    Custom,
    /// Produced by an uncrossing step (`add_corner`).
    Corner,
}

/// One description of a separation.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Metadata {
    pub kind: MetadataKind,
    /// Human-readable label, if one was supplied.
    pub info: Option<String>,
    /// Orientation of the described side relative to the stored column.
    ///
    /// A column added as the inversion of an existing one folds into the
    /// existing id with `orientation == Inverse`.
    pub orientation: Specification,
}

impl Metadata {
    pub fn custom(info: Option<String>, orientation: Specification) -> Self {
        Self {
            kind: MetadataKind::Custom,
            info,
            orientation,
        }
    }

    pub fn corner(info: Option<String>, orientation: Specification) -> Self {
        Self {
            kind: MetadataKind::Corner,
            info,
            orientation,
        }
    }
}
