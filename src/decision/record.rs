//! A single recorded decision

use serde::{Deserialize, Serialize};

/// One accepted draw, identified by its position in the global trace
///
/// `value` is always strictly below `bound`. Booleans are recorded with a
/// bound of 2, digits with the radix of their alphabet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Decision {
    pub index: u64,
    pub value: u32,
    pub bound: u32,
}

impl Decision {
    pub fn new(index: u64, value: u32, bound: u32) -> Self {
        debug_assert!(value < bound, "decision value {} outside bound {}", value, bound);
        Self { index, value, bound }
    }

    /// Record for a boolean outcome
    pub fn boolean(index: u64, value: bool) -> Self {
        Self::new(index, u32::from(value), 2)
    }
}
