//! Text-based logic terms.
//!
//! A [`TextTerm`] is an immutable boolean expression over named atoms. The
//! combinators simplify on construction (identity and absorption with the
//! constants, double-negation stripping) and remember the outermost operator
//! so that printing parenthesizes exactly where precedence requires it:
//! same-operator chains print flat, an OR operand inside an AND (and vice
//! versa) is wrapped.
//!
//! [`SemanticTerm`] pairs a term with its ±1 valuation over the ground set;
//! the interpreter uses it to verify and steer synthesis.

use std::fmt;

use log::warn;

use crate::error::{Result, TotError};
use crate::metadata::Metadata;
use crate::types::Specification;

const TRUE: &str = "true";
const FALSE: &str = "false";
const NOT: char = '¬';

/// The outermost operator of a term, if it has one.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
enum Op {
    And,
    Or,
}

/// An immutable text-level boolean term.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct TextTerm {
    text: String,
    outer: Option<Op>,
}

/// A source a [`TextTerm`] can be normalized from.
#[derive(Debug, Copy, Clone)]
pub enum TermSource<'a> {
    /// A plain atom label.
    Text(&'a str),
    /// An existing term, passed through unchanged.
    Term(&'a TextTerm),
    /// A metadata chain; the primary (first) record's label and orientation
    /// describe the default orientation of a feature.
    Metadata(&'a [Metadata]),
}

impl TextTerm {
    /// The constant `true` term.
    pub fn true_() -> Self {
        Self::atom(TRUE)
    }

    /// The constant `false` term.
    pub fn false_() -> Self {
        Self::atom(FALSE)
    }

    /// An atomic term with the given label.
    pub fn atom(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            outer: None,
        }
    }

    /// Normalizes a source into a term.
    ///
    /// A metadata chain yields the term for the default orientation of the
    /// described feature: the primary record's label, wrapped in a negation
    /// if the record's orientation is inverse. A chain with further records
    /// logs a warning, since only the primary one is used.
    pub fn build_from(source: TermSource<'_>) -> Result<TextTerm> {
        match source {
            TermSource::Text(text) => Ok(Self::atom(text)),
            TermSource::Term(term) => Ok(term.clone()),
            TermSource::Metadata(chain) => {
                let primary = chain.first().ok_or(TotError::UnlabeledMetadata)?;
                if chain.len() > 1 {
                    warn!(
                        "metadata chain has {} more record(s) for the same feature; \
                         using {:?} for the logic terms",
                        chain.len() - 1,
                        primary.info
                    );
                }
                let info = primary.info.as_deref().ok_or(TotError::UnlabeledMetadata)?;
                let term = Self::atom(info);
                Ok(match primary.orientation {
                    Specification::Default => term,
                    Specification::Inverse => term.not_(),
                })
            }
        }
    }

    fn is_true(&self) -> bool {
        self.text == TRUE
    }

    fn is_false(&self) -> bool {
        self.text == FALSE
    }

    /// The conjunction of two terms.
    pub fn and_(&self, other: &TextTerm) -> TextTerm {
        if self.is_true() {
            return other.clone();
        }
        if other.is_true() {
            return self.clone();
        }
        if self.is_false() {
            return self.clone();
        }
        if other.is_false() {
            return other.clone();
        }
        TextTerm {
            text: format!("{} ∧ {}", self.operand(Op::Or), other.operand(Op::Or)),
            outer: Some(Op::And),
        }
    }

    /// The disjunction of two terms.
    pub fn or_(&self, other: &TextTerm) -> TextTerm {
        if self.is_false() {
            return other.clone();
        }
        if other.is_false() {
            return self.clone();
        }
        if self.is_true() {
            return self.clone();
        }
        if other.is_true() {
            return other.clone();
        }
        TextTerm {
            text: format!("{} ∨ {}", self.operand(Op::And), other.operand(Op::And)),
            outer: Some(Op::Or),
        }
    }

    /// The negation of the term.
    ///
    /// An enclosing negation symbol cancels, together with its matching
    /// outer parentheses.
    pub fn not_(&self) -> TextTerm {
        if self.is_true() {
            return Self::false_();
        }
        if self.is_false() {
            return Self::true_();
        }
        if let Some(stripped) = self.text.strip_prefix(NOT) {
            let text = stripped
                .strip_prefix('(')
                .and_then(|inner| inner.strip_suffix(')'))
                .unwrap_or(stripped);
            return TextTerm {
                text: text.to_string(),
                outer: self.outer,
            };
        }
        match self.outer {
            None => TextTerm {
                text: format!("{}{}", NOT, self.text),
                outer: None,
            },
            Some(_) => TextTerm {
                text: format!("{}({})", NOT, self.text),
                outer: self.outer,
            },
        }
    }

    /// The term's text, parenthesized if its outermost operator is the one
    /// that would bind wrongly inside the given context.
    fn operand(&self, parenthesize_if: Op) -> String {
        if self.outer == Some(parenthesize_if) {
            format!("({})", self.text)
        } else {
            self.text.clone()
        }
    }
}

impl fmt::Display for TextTerm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.text)
    }
}

/// A text term together with its ±1 valuation per ground-set element.
#[derive(Debug, Clone)]
pub(crate) struct SemanticTerm {
    pub(crate) term: TextTerm,
    pub(crate) values: Vec<i8>,
}

impl SemanticTerm {
    pub(crate) fn new(term: TextTerm, values: Vec<i8>) -> Self {
        Self { term, values }
    }

    pub(crate) fn true_(n: usize) -> Self {
        Self::new(TextTerm::true_(), vec![1; n])
    }

    pub(crate) fn false_(n: usize) -> Self {
        Self::new(TextTerm::false_(), vec![-1; n])
    }

    pub(crate) fn and_(&self, other: &SemanticTerm) -> SemanticTerm {
        Self::new(
            self.term.and_(&other.term),
            zip_with(&self.values, &other.values, i8::min),
        )
    }

    pub(crate) fn or_(&self, other: &SemanticTerm) -> SemanticTerm {
        Self::new(
            self.term.or_(&other.term),
            zip_with(&self.values, &other.values, i8::max),
        )
    }

    pub(crate) fn not_(&self) -> SemanticTerm {
        Self::new(self.term.not_(), self.values.iter().map(|&v| -v).collect())
    }

    pub(crate) fn count_true(&self) -> usize {
        self.values.iter().filter(|&&v| v == 1).count()
    }
}

pub(crate) fn zip_with(a: &[i8], b: &[i8], f: impl Fn(i8, i8) -> i8) -> Vec<i8> {
    debug_assert_eq!(a.len(), b.len());
    a.iter().zip(b.iter()).map(|(&x, &y)| f(x, y)).collect()
}
