//! State every engine variant carries

use crate::config::GenerationMode;
use crate::decision::{Decision, RegistryHandle, SequenceHandle};
use crate::raw_stream::RawStream;
use std::rc::Rc;

/// Depth counter, trace, owned sequence and raw stream of one engine
#[derive(Debug)]
pub(crate) struct EngineCore {
    pub(crate) raw: RawStream,

    /// Index the next decision is recorded at
    pub(crate) rand_depth: u64,

    /// Diagnostic labels joined by `->`; not part of the replay contract
    pub(crate) trace: String,

    pub(crate) sequence: SequenceHandle,
    registry: RegistryHandle,
    pub(crate) mode: GenerationMode,
}

impl EngineCore {
    /// Register a fresh sequence and take ownership of the seeded stream
    pub(crate) fn new(raw: RawStream, registry: RegistryHandle, mode: GenerationMode) -> Self {
        let sequence = registry.borrow_mut().create_sequence();
        Self {
            raw,
            rand_depth: 0,
            trace: String::new(),
            sequence,
            registry,
            mode,
        }
    }

    /// Claim the next decision slot, returning its index
    pub(crate) fn claim_slot(&mut self) -> u64 {
        let index = self.rand_depth;
        self.rand_depth += 1;
        index
    }

    /// Undo whatever a rejected filter evaluation did past `local_depth`
    pub(crate) fn roll_back_to(&mut self, local_depth: u64) {
        self.rand_depth = local_depth + 1;
        self.sequence.borrow_mut().discard_after(local_depth);
    }

    pub(crate) fn push_label(&mut self, label: Option<&str>) {
        if let Some(label) = label {
            self.trace.push_str(label);
            self.trace.push_str("->");
        }
    }

    pub(crate) fn record(&mut self, decision: Decision) {
        self.sequence.borrow_mut().record(decision);
    }

    pub(crate) fn serialize(&self) -> String {
        self.registry.borrow().serialize(&self.sequence.borrow())
    }

    /// Start a new program: depth back to zero, trace and sequence emptied
    pub(crate) fn restart(&mut self) {
        self.rand_depth = 0;
        self.trace.clear();
        self.sequence.borrow_mut().clear();
    }

    pub(crate) fn sequence(&self) -> SequenceHandle {
        Rc::clone(&self.sequence)
    }
}

impl Drop for EngineCore {
    fn drop(&mut self) {
        match self.registry.try_borrow_mut() {
            Ok(mut registry) => {
                log::debug!("engine torn down, releasing decision sequences");
                registry.destroy_all();
            }
            Err(_) => log::warn!("sequence registry busy during engine teardown"),
        }
    }
}
