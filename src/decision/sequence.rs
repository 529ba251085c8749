//! Ordered, serializable record of the decisions made during one run

use super::Decision;
use crate::error::{EngineError, EngineResult};
use std::cell::RefCell;
use std::collections::BTreeMap;
use std::fmt::{self, Write};
use std::rc::Rc;

/// Identifier handed out by the registry, unique for the registry's lifetime
pub type SequenceId = u64;

/// Shared handle on a registered sequence
///
/// The registry keeps one clone and the owning engine keeps the other; the
/// engine is the only writer.
pub type SequenceHandle = Rc<RefCell<DecisionSequence>>;

/// Decisions keyed by their trace index
///
/// Recording at an index that already holds a decision replaces it. This is
/// how a constrained draw whose filter rejected earlier candidates ends up
/// with only its accepted value in the trace.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DecisionSequence {
    id: SequenceId,
    decisions: BTreeMap<u64, Decision>,
}

impl DecisionSequence {
    pub fn new(id: SequenceId) -> Self {
        Self {
            id,
            decisions: BTreeMap::new(),
        }
    }

    pub fn id(&self) -> SequenceId {
        self.id
    }

    /// Record `value` drawn below `bound` at trace position `index`
    pub fn add_number(&mut self, value: u32, bound: u32, index: u64) {
        self.record(Decision::new(index, value, bound));
    }

    pub fn record(&mut self, decision: Decision) {
        if let Some(previous) = self.decisions.insert(decision.index, decision) {
            log::trace!(
                "sequence {}: decision {} superseded ({} -> {})",
                self.id,
                decision.index,
                previous.value,
                decision.value
            );
        }
    }

    /// Drop every decision recorded past `index`
    ///
    /// Used when a filter rejects a candidate: anything its evaluation recorded
    /// belongs to a branch that will never be taken.
    pub fn discard_after(&mut self, index: u64) {
        let stale = self.decisions.split_off(&(index + 1));
        if !stale.is_empty() {
            log::trace!(
                "sequence {}: discarded {} decisions past {}",
                self.id,
                stale.len(),
                index
            );
        }
    }

    pub fn get(&self, index: u64) -> Option<&Decision> {
        self.decisions.get(&index)
    }

    pub fn len(&self) -> usize {
        self.decisions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.decisions.is_empty()
    }

    pub fn clear(&mut self) {
        self.decisions.clear();
    }

    /// Decisions in trace order
    pub fn decisions(&self) -> impl Iterator<Item = &Decision> {
        self.decisions.values()
    }

    /// Drawn values in trace order
    pub fn values(&self) -> Vec<u32> {
        self.decisions().map(|d| d.value).collect()
    }

    /// True when indices run `0, 1, 2, ...` without gaps
    pub fn is_contiguous(&self) -> bool {
        self.decisions
            .keys()
            .enumerate()
            .all(|(position, &index)| position as u64 == index)
    }

    /// Write the values joined by `separator` into `out`
    pub fn write_to<W: Write>(&self, out: &mut W, separator: char) -> fmt::Result {
        for (position, decision) in self.decisions().enumerate() {
            if position > 0 {
                out.write_char(separator)?;
            }
            write!(out, "{}", decision.value)?;
        }
        Ok(())
    }

    /// The values joined by `separator`, no leading or trailing separator
    pub fn serialize_with(&self, separator: char) -> String {
        let mut out = String::new();
        // Writing into a String cannot fail
        let _ = self.write_to(&mut out, separator);
        out
    }

    /// Parse a serialized sequence back into its values
    ///
    /// The empty string is the empty sequence.
    pub fn parse(text: &str, separator: char) -> EngineResult<Vec<u32>> {
        if text.is_empty() {
            return Ok(Vec::new());
        }
        text.split(separator)
            .enumerate()
            .map(|(position, token)| {
                token
                    .parse::<u32>()
                    .map_err(|_| EngineError::MalformedSequence {
                        token: token.to_string(),
                        position,
                    })
            })
            .collect()
    }
}
