//! Error type for tree construction, lookups, and term synthesis.

use thiserror::Error;

use crate::types::FeatureId;

/// Errors surfaced by the library.
///
/// All failures are synchronous and fail-fast: no operation commits partial
/// state before returning one of these.
#[derive(Debug, Error)]
pub enum TotError {
    /// The requested agreement value does not exceed the explored limit of
    /// the search, so completeness of the distinguisher set is not
    /// guaranteed. Continue sweeping to a lower limit to fix this.
    #[error(
        "agreement value {agreement} is not greater than the limit {limit} of the search tree; \
         the tree of tangles would not be guaranteed to contain the efficient distinguishers \
         of all maximal tangles above that agreement"
    )]
    AgreementTooLow { agreement: u32, limit: u32 },

    /// Two efficient distinguishers are not nested in any of the four
    /// cross-orientations. Uncross the distinguishers before building.
    #[error("efficient distinguishers {a} and {b} have not been uncrossed")]
    NotUncrossed { a: FeatureId, b: FeatureId },

    /// A feature id that is not an edge of the tree.
    #[error("feature id {0} is not contained in the feature tree")]
    UnknownFeature(FeatureId),

    /// `get_location` needs exactly one of its two selectors.
    #[error("to get a location, set either the node index or the tangle id, and not both")]
    LocationSelector,

    /// A column passed to the feature system does not match the ground-set
    /// size.
    #[error("feature column has length {got}, expected {expected}")]
    ColumnLength { expected: usize, got: usize },

    /// A metadata chain without a usable label cannot become a text term.
    #[error("cannot build a text term from a metadata chain without a label")]
    UnlabeledMetadata,
}

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, TotError>;
