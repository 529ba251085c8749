//! Depth-first exploration of the decision tree
//!
//! Instead of drawing at random, this engine walks the tree of possible
//! decisions systematically. The current path holds one step per decision;
//! a run replays the path where it exists and takes the smallest value where
//! it does not. [`DfsEngine::advance`] then moves to the next unexplored path,
//! so repeated runs enumerate every program the decisions can describe.
//!
//! Loading a parsed decision sequence as the path turns the engine into a
//! partial replayer: the recorded prefix is followed as long as it stays
//! within each draw's bound, after which exploration takes over.

use super::{Decisions, EngineCore};
use crate::config::GenerationMode;
use crate::decision::{Decision, RegistryHandle, SequenceHandle};
use crate::filter::{forced_boolean, Filter};
use crate::raw_stream::{RawStream, DECIMAL_DIGITS, HEX_DIGITS};

/// One decision on the exploration path
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PathStep {
    pub value: u32,

    /// Bound of the draw that produced the step; `None` for loaded prefixes
    /// that have not been replayed yet
    pub bound: Option<u32>,

    /// No sibling of this step is left to explore
    pub exhausted: bool,

    /// The filter scan wrapped below the replayed start, into a subtree an
    /// earlier run already covered
    pub revisit: bool,
}

impl PathStep {
    fn explored(value: u32, bound: u32) -> Self {
        Self {
            value,
            bound: Some(bound),
            exhausted: false,
            revisit: false,
        }
    }

    fn has_next_sibling(&self) -> bool {
        match self.bound {
            Some(bound) => !self.exhausted && self.value + 1 < bound,
            None => false,
        }
    }
}

#[derive(Debug)]
pub struct DfsEngine {
    core: EngineCore,
    path: Vec<PathStep>,

    /// Number of paths completed through `advance`
    explored: u64,

    /// The current run wandered back into an explored subtree
    revisit: bool,
}

impl DfsEngine {
    pub fn new(raw: RawStream, registry: RegistryHandle, mode: GenerationMode) -> Self {
        Self {
            core: EngineCore::new(raw, registry, mode),
            path: Vec::new(),
            explored: 0,
            revisit: false,
        }
    }

    /// Start exploring from a recorded sequence of values
    pub fn load_prefix(&mut self, values: &[u32]) {
        self.path = values
            .iter()
            .map(|&value| PathStep {
                value,
                bound: None,
                exhausted: false,
                revisit: false,
            })
            .collect();
        self.revisit = false;
        log::debug!("dfs: loaded prefix of {} decisions", self.path.len());
    }

    pub fn path(&self) -> &[PathStep] {
        &self.path
    }

    pub fn explored(&self) -> u64 {
        self.explored
    }

    /// Whether the current run repeats a program an earlier run produced
    ///
    /// Set when a filtered choice had to wrap around to a value below the one
    /// the path asked for. The driver should discard such a run's output.
    pub fn is_revisit(&self) -> bool {
        self.revisit
    }

    pub fn sequence(&self) -> SequenceHandle {
        self.core.sequence()
    }

    /// Move to the next unexplored path and reset for a new run
    ///
    /// Returns `false` once every path has been explored.
    pub fn advance(&mut self) -> bool {
        // Steps past the end of the last run were never reached by it
        self.path.truncate(self.core.rand_depth as usize);
        self.revisit = false;

        // Everything under a wrapped step was covered by earlier runs
        if let Some(first) = self.path.iter().position(|step| step.revisit) {
            log::trace!("dfs: skipping revisited subtree at decision {}", first);
            self.path.truncate(first);
        }

        while let Some(last) = self.path.last_mut() {
            if last.has_next_sibling() {
                last.value += 1;
                break;
            }
            self.path.pop();
        }

        if self.path.is_empty() {
            log::debug!("dfs: decision tree exhausted after {} paths", self.explored + 1);
            return false;
        }

        self.explored += 1;
        self.core.restart();
        true
    }

    /// Value to try first at `depth`, truncating the path if it diverged
    fn starting_value(&mut self, depth: usize, bound: u32) -> u32 {
        match self.path.get(depth).copied() {
            Some(step) if step.value < bound && step.bound.map_or(true, |b| b == bound) => step.value,
            Some(_) => {
                log::trace!("dfs: path diverged at decision {}", depth);
                self.path.truncate(depth);
                0
            }
            None => 0,
        }
    }

    fn set_step(&mut self, depth: usize, step: PathStep) {
        if depth < self.path.len() {
            self.path[depth] = step;
        } else {
            debug_assert_eq!(depth, self.path.len(), "dfs path has a gap");
            self.path.push(step);
        }
    }

    /// Take the path's value for `count` digits, one decision per character
    fn path_digits(&mut self, alphabet: &[u8], count: usize) -> String {
        let radix = alphabet.len() as u32;
        (0..count)
            .map(|_| {
                let depth = self.core.claim_slot();
                let digit = self.starting_value(depth as usize, radix);
                self.set_step(depth as usize, PathStep::explored(digit, radix));
                self.core.record(Decision::new(depth, digit, radix));
                alphabet[digit as usize] as char
            })
            .collect()
    }
}

impl Decisions for DfsEngine {
    fn choose_uniform(&mut self, bound: u32, filter: Option<&dyn Filter>, label: Option<&str>) -> u32 {
        assert!(bound > 0, "choose_uniform called with an empty range");

        let local_depth = self.core.claim_slot();
        let slot = local_depth as usize;
        let mut value = self.starting_value(slot, bound);
        let mut step = PathStep::explored(value, bound);
        self.set_step(slot, step);

        if let Some(filter) = filter {
            while filter.reject(value, self) {
                self.core.roll_back_to(local_depth);
                self.path.truncate(slot + 1);
                value += 1;
                if value == bound {
                    log::debug!("dfs: decision {} wrapped into explored values", local_depth);
                    value = 0;
                    step.revisit = true;
                    self.revisit = true;
                }
                step.value = value;
                self.set_step(slot, step);
            }
        }

        self.core.push_label(label);
        self.core.record(Decision::new(local_depth, value, bound));
        value
    }

    fn weighted_boolean(&mut self, percent: u32, filter: Option<&dyn Filter>) -> bool {
        assert!(percent <= 100, "weighted_boolean called with {}%", percent);

        let local_depth = self.core.claim_slot();
        let slot = local_depth as usize;
        // Held before the filter runs so its own decisions land after it
        let value = self.starting_value(slot, 2);
        self.set_step(slot, PathStep::explored(value, 2));

        if let Some(filter) = filter {
            if let Some(forced) = forced_boolean(filter, self) {
                let step = PathStep {
                    value: u32::from(forced),
                    bound: Some(2),
                    exhausted: true,
                    revisit: false,
                };
                self.set_step(slot, step);
                self.core.record(Decision::boolean(local_depth, forced));
                return forced;
            }
        }

        let result = value == 1;
        self.core.record(Decision::boolean(local_depth, result));
        result
    }

    fn random_hex_digits(&mut self, count: usize) -> String {
        match self.core.mode {
            GenerationMode::Random => self.core.raw.random_hex_digits(count),
            GenerationMode::Replay => self.path_digits(HEX_DIGITS, count),
        }
    }

    fn random_decimal_digits(&mut self, count: usize) -> String {
        match self.core.mode {
            GenerationMode::Random => self.core.raw.random_decimal_digits(count),
            GenerationMode::Replay => self.path_digits(DECIMAL_DIGITS, count),
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

    fn prefixed_name(&self, name: &str) -> String {
        format!("p{}_{}", self.explored, name)
    }
}
