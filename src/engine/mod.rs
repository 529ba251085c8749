//! Random choice engines
//!
//! Every engine variant implements [`Decisions`]: uniform draws below a bound,
//! weighted coin flips, and digit strings, each optionally vetoed by a
//! [`Filter`] and numbered by its position in the decision trace. The set of
//! variants is closed and lives in [`Engine`]; the
//! [`GeneratorSelector`](crate::selector::GeneratorSelector) picks one at
//! startup.

mod shared;
mod default;
mod dfs;

pub use self::default::DefaultEngine;
pub use self::dfs::{DfsEngine, PathStep};

pub(crate) use self::shared::EngineCore;

use crate::decision::SequenceHandle;
use crate::filter::Filter;
use crate::selector::StrategyTag;

/// Contract shared by every engine variant
pub trait Decisions {
    /// Draw a value in `[0, bound)` that `filter` does not reject
    ///
    /// `label` is appended to the diagnostic trace and has no effect on the
    /// value drawn. Panics if `bound` is zero. A filter that rejects every
    /// candidate makes this loop forever.
    fn choose_uniform(&mut self, bound: u32, filter: Option<&dyn Filter>, label: Option<&str>) -> u32;

    /// Return `true` roughly `percent`% of the time
    ///
    /// With a filter, a non-rejected `0` forces `true` and otherwise a
    /// non-rejected `1` forces `false`; only when the filter rejects both is
    /// the coin actually flipped. Panics if `percent` exceeds 100.
    ///
    /// Decisions the filter makes while judging a rejected `0` are kept when
    /// it goes on to judge `1`. Unlike [`Decisions::choose_uniform`], nothing
    /// is rolled back here.
    fn weighted_boolean(&mut self, percent: u32, filter: Option<&dyn Filter>) -> bool;

    fn random_hex_digits(&mut self, count: usize) -> String;

    fn random_decimal_digits(&mut self, count: usize) -> String;

    /// Index the next decision will be recorded at
    fn rand_depth(&self) -> u64;

    /// Labels of the draws made so far, each followed by `->`
    fn trace(&self) -> &str;

    /// The current decision sequence in its serialized `1_2_3` form
    fn serialize_current_sequence(&self) -> String;

    /// Name for a generated entity, made unique per explored program when needed
    fn prefixed_name(&self, name: &str) -> String {
        name.to_string()
    }

    /// Unfiltered, unlabeled draw in `[0, bound)`
    fn choose(&mut self, bound: u32) -> u32 {
        self.choose_uniform(bound, None, None)
    }
}

/// The closed set of engine variants
#[derive(Debug)]
pub enum Engine {
    Default(DefaultEngine),
    Dfs(DfsEngine),
}

impl Engine {
    pub fn strategy(&self) -> StrategyTag {
        match self {
            Engine::Default(_) => StrategyTag::Default,
            Engine::Dfs(_) => StrategyTag::Dfs,
        }
    }

    /// Handle on the sequence this engine records into
    pub fn sequence(&self) -> SequenceHandle {
        match self {
            Engine::Default(engine) => engine.sequence(),
            Engine::Dfs(engine) => engine.sequence(),
        }
    }

    pub fn as_dfs_mut(&mut self) -> Option<&mut DfsEngine> {
        match self {
            Engine::Dfs(engine) => Some(engine),
            Engine::Default(_) => None,
        }
    }
}

impl Decisions for Engine {
    fn choose_uniform(&mut self, bound: u32, filter: Option<&dyn Filter>, label: Option<&str>) -> u32 {
        match self {
            Engine::Default(engine) => engine.choose_uniform(bound, filter, label),
            Engine::Dfs(engine) => engine.choose_uniform(bound, filter, label),
        }
    }

    fn weighted_boolean(&mut self, percent: u32, filter: Option<&dyn Filter>) -> bool {
        match self {
            Engine::Default(engine) => engine.weighted_boolean(percent, filter),
            Engine::Dfs(engine) => engine.weighted_boolean(percent, filter),
        }
    }

    fn random_hex_digits(&mut self, count: usize) -> String {
        match self {
            Engine::Default(engine) => engine.random_hex_digits(count),
            Engine::Dfs(engine) => engine.random_hex_digits(count),
        }
    }

    fn random_decimal_digits(&mut self, count: usize) -> String {
        match self {
            Engine::Default(engine) => engine.random_decimal_digits(count),
            Engine::Dfs(engine) => engine.random_decimal_digits(count),
        }
    }

    fn rand_depth(&self) -> u64 {
        match self {
            Engine::Default(engine) => engine.rand_depth(),
            Engine::Dfs(engine) => engine.rand_depth(),
        }
    }

    fn trace(&self) -> &str {
        match self {
            Engine::Default(engine) => engine.trace(),
            Engine::Dfs(engine) => engine.trace(),
        }
    }

    fn serialize_current_sequence(&self) -> String {
        match self {
            Engine::Default(engine) => engine.serialize_current_sequence(),
            Engine::Dfs(engine) => engine.serialize_current_sequence(),
        }
    }

    fn prefixed_name(&self, name: &str) -> String {
        match self {
            Engine::Default(engine) => engine.prefixed_name(name),
            Engine::Dfs(engine) => engine.prefixed_name(name),
        }
    }
}
