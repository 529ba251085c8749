//! Registry owning every decision sequence created during a run
//!
//! This corresponds to the set of live sequences the generator keeps for the
//! whole process: sequences are registered when created and released together
//! at shutdown.

use super::{DecisionSequence, SequenceHandle, SequenceId, DEFAULT_SEPARATOR};
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

/// Shared handle on the registry, held by the selector and by each engine
pub type RegistryHandle = Rc<RefCell<SequenceRegistry>>;

/// Set of all live decision sequences
#[derive(Debug)]
pub struct SequenceRegistry {
    sequences: HashMap<SequenceId, SequenceHandle>,

    /// Character placed between values when serializing
    separator: char,

    /// Id for the next sequence; never reused, even across `destroy_all`
    next_id: SequenceId,
}

impl SequenceRegistry {
    pub fn new() -> Self {
        Self::with_separator(DEFAULT_SEPARATOR)
    }

    pub fn with_separator(separator: char) -> Self {
        Self {
            sequences: HashMap::new(),
            separator,
            next_id: 0,
        }
    }

    /// Wrap a fresh registry in a shareable handle
    pub fn shared(separator: char) -> RegistryHandle {
        Rc::new(RefCell::new(Self::with_separator(separator)))
    }

    /// Allocate a new empty sequence and register it
    pub fn create_sequence(&mut self) -> SequenceHandle {
        let id = self.next_id;
        self.next_id += 1;

        let handle = Rc::new(RefCell::new(DecisionSequence::new(id)));
        self.sequences.insert(id, Rc::clone(&handle));
        log::debug!("registered decision sequence {}", id);
        handle
    }

    /// Release every registered sequence
    ///
    /// Calling this again on an empty registry is a no-op.
    pub fn destroy_all(&mut self) {
        if !self.sequences.is_empty() {
            log::debug!("destroying {} decision sequences", self.sequences.len());
        }
        self.sequences.clear();
    }

    /// The values of `sequence` joined by this registry's separator
    pub fn serialize(&self, sequence: &DecisionSequence) -> String {
        sequence.serialize_with(self.separator)
    }

    pub fn separator(&self) -> char {
        self.separator
    }

    pub fn get(&self, id: SequenceId) -> Option<SequenceHandle> {
        self.sequences.get(&id).cloned()
    }

    pub fn contains(&self, id: SequenceId) -> bool {
        self.sequences.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.sequences.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sequences.is_empty()
    }
}

impl Default for SequenceRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_registers_empty_sequence() {
        let mut registry = SequenceRegistry::new();
        let seq = registry.create_sequence();

        assert_eq!(registry.len(), 1);
        assert!(seq.borrow().is_empty());
        assert!(registry.contains(seq.borrow().id()));
    }

    #[test]
    fn test_sequences_coexist() {
        let mut registry = SequenceRegistry::new();
        let a = registry.create_sequence();
        let b = registry.create_sequence();

        a.borrow_mut().add_number(1, 2, 0);
        assert_ne!(a.borrow().id(), b.borrow().id());
        assert_eq!(registry.len(), 2);
        assert!(b.borrow().is_empty());
    }

    #[test]
    fn test_destroy_all_is_idempotent() {
        let mut registry = SequenceRegistry::new();
        registry.create_sequence();
        registry.create_sequence();

        registry.destroy_all();
        assert!(registry.is_empty());
        registry.destroy_all();
        assert_eq!(registry.len(), 0);
    }

    #[test]
    fn test_create_after_destroy_gives_fresh_sequence() {
        let mut registry = SequenceRegistry::new();
        let old = registry.create_sequence();
        old.borrow_mut().add_number(3, 4, 0);
        registry.destroy_all();

        let fresh = registry.create_sequence();
        assert_eq!(registry.len(), 1);
        assert!(fresh.borrow().is_empty());
        assert_ne!(fresh.borrow().id(), old.borrow().id());
        assert!(registry.get(old.borrow().id()).is_none());
    }

    #[test]
    fn test_serialize_uses_registry_separator() {
        let mut registry = SequenceRegistry::new();
        let seq = registry.create_sequence();
        {
            let mut seq = seq.borrow_mut();
            seq.add_number(1, 10, 0);
            seq.add_number(2, 10, 1);
            seq.add_number(3, 10, 2);
        }
        assert_eq!(registry.serialize(&seq.borrow()), "1_2_3");

        let dashed = SequenceRegistry::with_separator('-');
        assert_eq!(dashed.serialize(&seq.borrow()), "1-2-3");
    }
}
