//! Engine configuration
//!
//! The program driver decides these once at startup, usually from its command
//! line; the engine only reads them.

use crate::decision::DEFAULT_SEPARATOR;
use crate::error::{EngineError, EngineResult};
use crate::selector::StrategyTag;
use serde::{Deserialize, Serialize};

/// How literal digit strings are produced
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GenerationMode {
    /// Ordinary unconstrained generation; digit strings are filler and are
    /// not recorded
    #[default]
    Random,

    /// Output must be reproducible by reduction tooling, so every digit is a
    /// recorded decision
    Replay,
}

/// Configuration for one generation run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Which engine variant to build
    pub strategy: StrategyTag,

    /// Seed for the raw stream; only the low 32 bits are significant
    pub seed: u64,

    pub mode: GenerationMode,

    /// Character between values in a serialized sequence
    pub separator: char,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            strategy: StrategyTag::Default,
            seed: 0,
            mode: GenerationMode::Random,
            separator: DEFAULT_SEPARATOR,
        }
    }
}

impl EngineConfig {
    /// Parse and validate a JSON configuration
    ///
    /// Missing fields take their defaults; an unknown strategy is an error.
    pub fn from_json(text: &str) -> EngineResult<Self> {
        let config: EngineConfig = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json(&self) -> EngineResult<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// The separator must not be confusable with the values it separates
    pub fn validate(&self) -> EngineResult<()> {
        if self.separator.is_ascii_digit() {
            return Err(EngineError::Config(format!(
                "separator {:?} cannot delimit decimal values",
                self.separator
            )));
        }
        Ok(())
    }
}
