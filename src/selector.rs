//! Generator strategy selection
//!
//! The selector is the run's decision context. It seeds the raw stream,
//! builds exactly one engine variant, and hands the same engine back on every
//! later request. It also owns the sequence registry, so tearing the selector
//! down releases every recorded sequence after the engine is gone.

use crate::config::{EngineConfig, GenerationMode};
use crate::decision::{RegistryHandle, SequenceRegistry, DEFAULT_SEPARATOR};
use crate::engine::{DefaultEngine, DfsEngine, Engine};
use crate::error::{EngineError, EngineResult};
use crate::raw_stream::RawStream;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::rc::Rc;
use std::str::FromStr;

/// Engine variants the selector can build
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StrategyTag {
    /// Constrained uniform draws from the raw stream
    Default,
    /// Depth-first exploration of the decision tree
    Dfs,
}

impl StrategyTag {
    pub fn as_str(&self) -> &'static str {
        match self {
            StrategyTag::Default => "default",
            StrategyTag::Dfs => "dfs",
        }
    }
}

impl fmt::Display for StrategyTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StrategyTag {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "default" => Ok(StrategyTag::Default),
            "dfs" => Ok(StrategyTag::Dfs),
            other => Err(EngineError::UnknownStrategy(other.to_string())),
        }
    }
}

/// Factory and owner of the run's single engine
#[derive(Debug)]
pub struct GeneratorSelector {
    registry: RegistryHandle,
    mode: GenerationMode,
    engine: Option<Engine>,
}

impl GeneratorSelector {
    pub fn new() -> Self {
        Self::with_settings(GenerationMode::Random, DEFAULT_SEPARATOR)
    }

    pub fn with_settings(mode: GenerationMode, separator: char) -> Self {
        Self {
            registry: SequenceRegistry::shared(separator),
            mode,
            engine: None,
        }
    }

    pub fn from_config(config: &EngineConfig) -> EngineResult<Self> {
        config.validate()?;
        Ok(Self::with_settings(config.mode, config.separator))
    }

    /// Seed the raw stream and build the engine, or return the existing one
    ///
    /// Only the first call has any effect: later calls neither re-seed nor
    /// switch strategy, whatever their arguments.
    pub fn make_engine(&mut self, strategy: StrategyTag, seed: u64) -> &mut Engine {
        if let Some(existing) = &self.engine {
            log::debug!(
                "engine already built ({}); ignoring request for {} with seed {}",
                existing.strategy(),
                strategy,
                seed
            );
        }

        let registry = Rc::clone(&self.registry);
        let mode = self.mode;
        self.engine.get_or_insert_with(|| build_engine(strategy, seed, registry, mode))
    }

    /// Like [`make_engine`](Self::make_engine), from a textual strategy tag
    pub fn make_engine_from_tag(&mut self, tag: &str, seed: u64) -> EngineResult<&mut Engine> {
        let strategy = tag.parse::<StrategyTag>()?;
        Ok(self.make_engine(strategy, seed))
    }

    pub fn engine(&self) -> Option<&Engine> {
        self.engine.as_ref()
    }

    pub fn engine_mut(&mut self) -> Option<&mut Engine> {
        self.engine.as_mut()
    }

    pub fn registry(&self) -> RegistryHandle {
        Rc::clone(&self.registry)
    }

    pub fn mode(&self) -> GenerationMode {
        self.mode
    }

    /// Destroy the engine, then release every registered sequence
    pub fn teardown(&mut self) {
        if let Some(engine) = self.engine.take() {
            log::debug!("tearing down {} engine", engine.strategy());
            drop(engine);
        }
        self.registry.borrow_mut().destroy_all();
    }
}

impl Default for GeneratorSelector {
    fn default() -> Self {
        Self::new()
    }
}

fn build_engine(strategy: StrategyTag, seed: u64, registry: RegistryHandle, mode: GenerationMode) -> Engine {
    let raw = RawStream::seed(seed);
    log::debug!("building {} engine with seed {} in {:?} mode", strategy, seed, mode);
    match strategy {
        StrategyTag::Default => Engine::Default(DefaultEngine::new(raw, registry, mode)),
        StrategyTag::Dfs => Engine::Dfs(DfsEngine::new(raw, registry, mode)),
    }
}
