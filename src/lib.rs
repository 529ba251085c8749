//! # choice-engine
//!
//! The decision engine of a random C program generator.
//!
//! Every structural choice a generator makes (which type to pick, which
//! expression form, whether to flip a branch) goes through this crate instead
//! of a raw coin flip. Each draw is uniform, can be vetoed by a caller-supplied
//! [`Filter`], and is numbered and recorded, so the exact sequence of decisions
//! behind a generated program can be serialized into its header and later
//! replayed, fully or partially, while the program is being reduced.
//!
//! ```ignore
//! let mut selector = GeneratorSelector::new();
//! let engine = selector.make_engine(StrategyTag::Default, 42);
//! let kind = engine.choose_uniform(6, None, Some("type"));
//! let signed = engine.weighted_boolean(50, None);
//! let header = engine.serialize_current_sequence(); // "1_..."
//! selector.teardown();
//! ```

pub mod config;
pub mod decision;
pub mod engine;
pub mod error;
pub mod filter;
pub mod raw_stream;
pub mod selector;

pub use config::{EngineConfig, GenerationMode};
pub use decision::{Decision, DecisionSequence, SequenceHandle, SequenceRegistry, DEFAULT_SEPARATOR};
pub use engine::{Decisions, DefaultEngine, DfsEngine, Engine};
pub use error::{EngineError, EngineResult};
pub use filter::{Disallow, Filter, Nested};
pub use raw_stream::RawStream;
pub use selector::{GeneratorSelector, StrategyTag};
