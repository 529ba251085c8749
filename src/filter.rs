//! Constraint filters consumed by the constrained draws
//!
//! A filter vetoes candidate values before a draw accepts them. Filters are
//! supplied per call and hold no state inside the engine. The engine passes
//! itself to [`Filter::reject`], so a filter may make (and record) auxiliary
//! decisions while it evaluates a candidate. In `choose_uniform` a rejected
//! candidate's recordings are rolled back with it; in `weighted_boolean` they
//! stay in the sequence.

use crate::engine::Decisions;

/// Predicate deciding whether a candidate value is disallowed
pub trait Filter {
    /// Return `true` if `candidate` must not be chosen
    fn reject(&self, candidate: u32, decisions: &mut dyn Decisions) -> bool;
}

/// Plain predicates over the candidate
impl<F> Filter for F
where
    F: Fn(u32) -> bool,
{
    fn reject(&self, candidate: u32, _decisions: &mut dyn Decisions) -> bool {
        self(candidate)
    }
}

/// Filter whose evaluation draws from the engine itself
///
/// ```ignore
/// let pick_depth = Nested(|candidate, decisions: &mut dyn Decisions| {
///     candidate > 0 && decisions.weighted_boolean(50, None)
/// });
/// ```
pub struct Nested<F>(pub F);

impl<F> Filter for Nested<F>
where
    F: Fn(u32, &mut dyn Decisions) -> bool,
{
    fn reject(&self, candidate: u32, decisions: &mut dyn Decisions) -> bool {
        (self.0)(candidate, decisions)
    }
}

/// Rejects every value in a fixed list
#[derive(Debug, Clone, Default)]
pub struct Disallow(pub Vec<u32>);

impl Filter for Disallow {
    fn reject(&self, candidate: u32, _decisions: &mut dyn Decisions) -> bool {
        self.0.contains(&candidate)
    }
}

/// Resolve a boolean decision from a filter alone, if the filter allows it
///
/// A filter that does not reject `0` forces `true`; otherwise one that does
/// not reject `1` forces `false`. When both candidates are rejected the
/// filter cannot settle the coin and `None` is returned.
pub(crate) fn forced_boolean(filter: &dyn Filter, decisions: &mut dyn Decisions) -> Option<bool> {
    if !filter.reject(0, decisions) {
        Some(true)
    } else if !filter.reject(1, decisions) {
        Some(false)
    } else {
        None
    }
}
