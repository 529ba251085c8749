//! Default constrained-draw engine
//!
//! Uniform draws come straight off the raw stream, reduced modulo the bound.
//! Filtered draws use rejection sampling: a rejected candidate is replaced by
//! a fresh draw until the filter accepts one. Whatever the number of retries,
//! a draw consumes exactly one slot of the decision trace, and only the
//! accepted value is recorded there.

use super::{Decisions, EngineCore};
use crate::config::GenerationMode;
use crate::decision::{Decision, RegistryHandle, SequenceHandle};
use crate::filter::{forced_boolean, Filter};
use crate::raw_stream::{RawStream, DECIMAL_DIGITS, HEX_DIGITS};

#[derive(Debug)]
pub struct DefaultEngine {
    core: EngineCore,
}

impl DefaultEngine {
    pub fn new(raw: RawStream, registry: RegistryHandle, mode: GenerationMode) -> Self {
        Self {
            core: EngineCore::new(raw, registry, mode),
        }
    }

    pub fn sequence(&self) -> SequenceHandle {
        self.core.sequence()
    }

    pub fn mode(&self) -> GenerationMode {
        self.core.mode
    }

    /// Draw `count` digits through the trace, one decision per character
    fn recorded_digits(&mut self, alphabet: &[u8], count: usize) -> String {
        let radix = alphabet.len() as u32;
        (0..count)
            .map(|_| {
                let digit = self.core.raw.draw_raw() % radix;
                let index = self.core.claim_slot();
                self.core.record(Decision::new(index, digit, radix));
                alphabet[digit as usize] as char
            })
            .collect()
    }
}

impl Decisions for DefaultEngine {
    fn choose_uniform(&mut self, bound: u32, filter: Option<&dyn Filter>, label: Option<&str>) -> u32 {
        assert!(bound > 0, "choose_uniform called with an empty range");

        let mut value = self.core.raw.draw_raw() % bound;
        let local_depth = self.core.claim_slot();

        if let Some(filter) = filter {
            let mut retries = 0u64;
            while filter.reject(value, self) {
                // The filter may have recorded decisions of its own while
                // judging this candidate; they go with it.
                self.core.roll_back_to(local_depth);
                value = self.core.raw.draw_raw() % bound;
                retries += 1;
            }
            if retries > 0 {
                log::trace!(
                    "decision {}: accepted {} below {} after {} rejections",
                    local_depth,
                    value,
                    bound,
                    retries
                );
            }
        }

        self.core.push_label(label);
        self.core.record(Decision::new(local_depth, value, bound));
        value
    }

    fn weighted_boolean(&mut self, percent: u32, filter: Option<&dyn Filter>) -> bool {
        assert!(percent <= 100, "weighted_boolean called with {}%", percent);

        let local_depth = self.core.claim_slot();

        if let Some(filter) = filter {
            if let Some(forced) = forced_boolean(filter, self) {
                self.core.record(Decision::boolean(local_depth, forced));
                return forced;
            }
        }

        let result = self.core.raw.draw_raw() % 100 < percent;
        self.core.record(Decision::boolean(local_depth, result));
        result
    }

    fn random_hex_digits(&mut self, count: usize) -> String {
        match self.core.mode {
            GenerationMode::Random => self.core.raw.random_hex_digits(count),
            GenerationMode::Replay => self.recorded_digits(HEX_DIGITS, count),
        }
    }

    fn random_decimal_digits(&mut self, count: usize) -> String {
        match self.core.mode {
            GenerationMode::Random => self.core.raw.random_decimal_digits(count),
            GenerationMode::Replay => self.recorded_digits(DECIMAL_DIGITS, count),
        }
    }

    fn rand_depth(&self) -> u64 {
        self.core.rand_depth
    }

    fn trace(&self) -> &str {
        &self.core.trace
    }

    fn serialize_current_sequence(&self) -> String {
        self.core.serialize()
    }
}
