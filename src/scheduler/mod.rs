//! Section selection by backtracking search.
//!
//! Picks one section per course so that no two picked sections, and no
//! picked section and block-out window, meet at the same time.
//!
//! # Algorithm
//!
//! `SectionPicker::build` is a depth-first search over course index. At each
//! course the candidate sections are shuffled, filtered by seat status,
//! checked against every block-out and every section already picked, and
//! the first survivor is tried recursively. A failed subtree is undone and
//! the next candidate tried. Every collision met on the way is collected
//! into a [`Diagnosis`] so that total failure comes with an explanation.
//!
//! `SectionPicker::build_ignoring_conflicts` is the best-effort mode: one
//! random eligible section per course, no conflict checks, no backtracking.
//!
//! # Complexity
//! Worst case O(s^n) for n courses with s sections each; recursion depth n.
//!
//! # Reference
//! Russell & Norvig (2020), "Artificial Intelligence: A Modern Approach", Ch. 6.3

mod diagnosis;
mod picker;

pub use diagnosis::Diagnosis;
pub use picker::SectionPicker;

use std::fmt::Debug;

use crate::models::ClassStatus;

/// A schedulable section as seen by the search.
///
/// # Contract
/// `conflicts_with` must be pure and symmetric.
pub trait Candidate: Clone + Debug {
    /// Unique section identifier.
    fn id(&self) -> &str;

    /// Seat status, used for the open-only eligibility filter.
    fn status(&self) -> ClassStatus;

    /// Whether the two sections are ever in session at the same time.
    fn conflicts_with(&self, other: &Self) -> bool;

    /// Human-readable summary for diagnostics.
    fn description(&self) -> String;
}

/// A course as seen by the search: an ordered list of candidates.
pub trait Offering {
    /// Section type offered by this course.
    type Section: Candidate;

    /// Candidate sections in catalog order.
    fn sections(&self) -> &[Self::Section];

    /// Human-readable summary for diagnostics.
    fn description(&self) -> String;
}

/// Why a search produced no schedule.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SearchError {
    /// No combination of sections satisfies the constraints.
    #[error("no schedule possible:\n{0}")]
    Infeasible(Diagnosis),
    /// The step budget ran out before the search finished.
    #[error("search abandoned after {limit} candidate evaluations")]
    BudgetExhausted {
        /// Configured budget.
        limit: usize,
    },
}

impl SearchError {
    /// The failure explanation, if the search ran to completion.
    pub fn diagnosis(&self) -> Option<&Diagnosis> {
        match self {
            Self::Infeasible(d) => Some(d),
            Self::BudgetExhausted { .. } => None,
        }
    }
}
