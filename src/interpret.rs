//! Interpreting features as logic terms over the original separations.
//!
//! A feature built from the original separations by intersections, unions
//! and complements can be described by a boolean term over their labels.
//! The synthesizer reconstructs such a term greedily: starting from the
//! approximation `true`, it repeatedly picks the original separation that
//! best splits the error set of the current approximation, recurses into the
//! candidate and its complement, and prunes OR/AND combinations that the
//! semantics prove redundant.

use log::debug;

use crate::logic::{zip_with, SemanticTerm, TextTerm};
use crate::registry::UncrossingFeatureSystem;
use crate::types::Feature;

/// Reconstructs a logic term over the labeled original separations that is
/// equivalent to `target` on the ground set.
///
/// `original_columns` holds the signed column of every labeled separation;
/// `labels` names them, index-aligned. If `under_condition` is given, the
/// term only needs to agree with `target` on the elements where the
/// condition holds, which usually makes it shorter.
pub fn interpret_feature_array(
    target: &[i8],
    original_columns: &[Vec<i8>],
    labels: &[String],
    under_condition: Option<&[i8]>,
) -> TextTerm {
    assert_eq!(labels.len(), original_columns.len(), "one label per original column");

    let keep: Vec<usize> = match under_condition {
        None => (0..target.len()).collect(),
        Some(condition) => {
            assert_eq!(condition.len(), target.len());
            (0..target.len()).filter(|&row| condition[row] == 1).collect()
        }
    };
    let restrict = |column: &[i8]| -> Vec<i8> { keep.iter().map(|&row| column[row]).collect() };

    let restricted_target = restrict(target);
    let terms: Vec<SemanticTerm> = original_columns
        .iter()
        .zip(labels.iter())
        .map(|(column, label)| SemanticTerm::new(TextTerm::atom(label.clone()), restrict(column)))
        .collect();

    let ctx = Synthesis {
        terms,
        goal: restricted_target.clone(),
    };
    let all_true = vec![1i8; keep.len()];
    ctx.synthesize(&restricted_target, &all_true, SemanticTerm::true_(keep.len()))
        .term
}

/// Reconstructs a logic term for a feature of an uncrossing-aware system,
/// in terms of the system's original labeled separations.
///
/// A plain [`FeatureSystem`][crate::system::FeatureSystem] promotes into a
/// registry via `UncrossingFeatureSystem::from(system)`. A non-empty
/// condition list restricts the reconstruction to the elements on which
/// every listed feature holds (their infimum).
pub fn interpret_feature(
    feature: Feature,
    feat_sys: &UncrossingFeatureSystem,
    under_condition: Option<&[Feature]>,
) -> TextTerm {
    let condition = match under_condition {
        None => None,
        Some(features) if features.is_empty() => None,
        Some(features) => Some(feat_sys.compute_infimum(features)),
    };
    interpret_feature_array(
        &feat_sys.get_feature(feature),
        &feat_sys.get_original_features(),
        &feat_sys.get_metadata_of_original_features(),
        condition.as_deref(),
    )
}

/// State of one synthesis run: the candidate terms and the restricted
/// target the whole reconstruction must reach.
struct Synthesis {
    terms: Vec<SemanticTerm>,
    goal: Vec<i8>,
}

impl Synthesis {
    /// One step of the recursion: refine `next_term` until it matches the
    /// target on the elements where the approximation still holds.
    fn synthesize(&self, target: &[i8], approximation: &[i8], next_term: SemanticTerm) -> SemanticTerm {
        let next_target = zip_with(target, &next_term.values, i8::min);
        let next_approx = zip_with(approximation, &next_term.values, i8::min);

        if next_approx == next_target {
            return next_term;
        }
        if next_target.iter().all(|&v| v == -1) {
            return SemanticTerm::false_(target.len());
        }

        let extension = self.find_best_term_extension(&next_target, &next_approx);
        debug!("extending approximation with {}", extension.term);

        let with_extension = self.synthesize(&next_target, &next_approx, extension.clone());
        let with_complement = self.synthesize(&next_target, &next_approx, extension.not_());
        let joined = self.or_term(with_extension, with_complement, &next_term);
        self.and_term(next_term, joined, approximation)
    }

    /// Picks the candidate that best separates the two error sets of the
    /// current approximation: AB (approximation true, target false) and CD
    /// (approximation true, target true).
    ///
    /// A perfect discriminator (one side of the candidate covers part of AB
    /// and none of CD, or vice versa) wins outright, the largest covered
    /// part first; otherwise the candidate with the best covered-to-spoiled
    /// ratio wins. Ties break towards the first index.
    fn find_best_term_extension(&self, target: &[i8], approximation: &[i8]) -> SemanticTerm {
        let rows_ab: Vec<usize> = (0..target.len())
            .filter(|&row| approximation[row] == 1 && target[row] == -1)
            .collect();
        let rows_cd: Vec<usize> = (0..target.len())
            .filter(|&row| approximation[row] == 1 && target[row] == 1)
            .collect();

        let count = |rows: &[usize], term: &SemanticTerm, sign: i8| -> usize {
            rows.iter().filter(|&&row| term.values[row] == sign).count()
        };

        let mut best_discriminator: Option<(usize, usize)> = None; // (bias, index)
        let mut best_ratio = (0.0f64, 0usize);
        for (index, term) in self.terms.iter().enumerate() {
            let a = count(&rows_ab, term, 1);
            let b = count(&rows_ab, term, -1);
            let c = count(&rows_cd, term, 1);
            let d = count(&rows_cd, term, -1);

            let bias = usize::max(if c == 0 { a } else { 0 }, if d == 0 { b } else { 0 });
            if bias > 0 && best_discriminator.map_or(true, |(best, _)| bias > best) {
                best_discriminator = Some((bias, index));
            }

            let ratio_a = if c != 0 { a as f64 / c as f64 } else { 0.0 };
            let ratio_b = if d != 0 { b as f64 / d as f64 } else { 0.0 };
            let ratio = ratio_a.max(ratio_b);
            if ratio > best_ratio.0 {
                best_ratio = (ratio, index);
            }
        }

        let index = match best_discriminator {
            Some((_, index)) => index,
            None => best_ratio.1,
        };
        self.terms[index].clone()
    }

    /// Joins the two recursive results with OR, unless one of them already
    /// dominates the other within the current term, in which case the
    /// dominating result stands alone. Operands of a real OR are ordered by
    /// their true-count, largest first, for determinism.
    fn or_term(&self, first: SemanticTerm, second: SemanticTerm, within: &SemanticTerm) -> SemanticTerm {
        let first_meet = zip_with(&first.values, &within.values, i8::min);
        let second_meet = zip_with(&second.values, &within.values, i8::min);
        if dominates(&second_meet, &first_meet) {
            return second;
        }
        if dominates(&first_meet, &second_meet) {
            return first;
        }
        if second.count_true() <= first.count_true() {
            first.or_(&second)
        } else {
            second.or_(&first)
        }
    }

    /// Conjoins the current term with the joined recursive result, unless
    /// the result meeting the approximation already lies within the goal,
    /// in which case the AND is redundant.
    fn and_term(&self, term: SemanticTerm, joined: SemanticTerm, approximation: &[i8]) -> SemanticTerm {
        let meet = zip_with(&joined.values, approximation, i8::min);
        if dominates(&self.goal, &meet) {
            return joined;
        }
        term.and_(&joined)
    }
}

/// Whether `lower` is pointwise below `upper`.
fn dominates(upper: &[i8], lower: &[i8]) -> bool {
    lower.iter().zip(upper.iter()).all(|(&lo, &up)| lo <= up)
}
