//! Core identifiers for features and tangles.
//!
//! A *feature* is one side of a set separation: the pair of a separation id
//! and an orientation ("specification"). Keeping the orientation as an enum
//! makes invalid orientations unrepresentable, so code downstream never has
//! to re-validate a raw `+1`/`-1` value.

use std::fmt;
use std::ops::Neg;

/// Identifier of a separation: the index of its column in the backing
/// feature system.
pub type FeatureId = usize;

/// Orientation of a feature.
///
/// `Default` selects the side whose characteristic values are `+1`,
/// `Inverse` the side whose values are `-1`.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Specification {
    Default,
    Inverse,
}

impl Specification {
    /// Returns the signed value of the orientation (`+1` or `-1`).
    pub const fn sign(self) -> i8 {
        match self {
            Specification::Default => 1,
            Specification::Inverse => -1,
        }
    }

    pub const fn flip(self) -> Self {
        match self {
            Specification::Default => Specification::Inverse,
            Specification::Inverse => Specification::Default,
        }
    }
}

impl Neg for Specification {
    type Output = Self;

    fn neg(self) -> Self::Output {
        self.flip()
    }
}

impl From<Specification> for i8 {
    fn from(spec: Specification) -> Self {
        spec.sign()
    }
}

impl fmt::Display for Specification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Specification::Default => write!(f, "+"),
            Specification::Inverse => write!(f, "-"),
        }
    }
}

/// One oriented side of a separation.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct Feature {
    pub id: FeatureId,
    pub specification: Specification,
}

impl Feature {
    pub const fn new(id: FeatureId, specification: Specification) -> Self {
        Self { id, specification }
    }

    /// The feature with the same id and the opposite orientation.
    pub const fn inverse(self) -> Self {
        Self {
            id: self.id,
            specification: self.specification.flip(),
        }
    }
}

impl Neg for Feature {
    type Output = Self;

    fn neg(self) -> Self::Output {
        self.inverse()
    }
}

impl fmt::Display for Feature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}", self.specification, self.id)
    }
}

/// Identifier of a tangle, as assigned by the external search.
#[derive(Debug, Clone, Eq, PartialEq, Hash)]
pub enum TangleId {
    Num(u64),
    Name(String),
}

impl fmt::Display for TangleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TangleId::Num(n) => write!(f, "{}", n),
            TangleId::Name(s) => write!(f, "{}", s),
        }
    }
}

impl From<u64> for TangleId {
    fn from(n: u64) -> Self {
        TangleId::Num(n)
    }
}

impl From<&str> for TangleId {
    fn from(s: &str) -> Self {
        TangleId::Name(s.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_specification_sign() {
        assert_eq!(Specification::Default.sign(), 1);
        assert_eq!(Specification::Inverse.sign(), -1);
    }

    #[test]
    fn test_specification_flip() {
        assert_eq!(-Specification::Default, Specification::Inverse);
        assert_eq!(-Specification::Inverse, Specification::Default);
        assert_eq!(-(-Specification::Default), Specification::Default);
    }

    #[test]
    fn test_feature_inverse() {
        let f = Feature::new(3, Specification::Default);
        assert_eq!((-f).id, 3);
        assert_eq!((-f).specification, Specification::Inverse);
        assert_eq!(-(-f), f);
    }

    #[test]
    fn test_display() {
        assert_eq!(Feature::new(5, Specification::Default).to_string(), "+@5");
        assert_eq!(Feature::new(5, Specification::Inverse).to_string(), "-@5");
        assert_eq!(TangleId::from(7).to_string(), "7");
        assert_eq!(TangleId::from("left").to_string(), "left");
    }
}
