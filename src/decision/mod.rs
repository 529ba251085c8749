//! Decision recording for deterministic replay
//!
//! Every accepted draw becomes a [`Decision`] numbered by its position in the
//! global trace. Decisions live in a [`DecisionSequence`], and every sequence
//! created during a run is owned by the [`SequenceRegistry`], which serializes
//! them into the compact `1_2_3` form embedded in generated programs.

mod record;
mod registry;
mod sequence;

pub use self::record::*;
pub use self::registry::*;
pub use self::sequence::*;

/// Separator used between values in a serialized sequence
pub const DEFAULT_SEPARATOR: char = '_';
