//! Interactive command session over one bridged-T filter.
//!
//! [`AnalogSession`] holds the active domain, the filter being tuned, an
//! analyzer and the primitive factory. Each input line is one command; see
//! [`Command`] for the vocabulary. The session never prints: every command
//! returns its report as a string, so the same session drives the CLI, the
//! WASM bindings and the tests.

mod commands;
mod value;

pub use commands::Command;
pub use value::parse_value;

use tracing::debug;

use crate::analog::AnalogDomain;
use crate::analysis::{
    FrequencyResponseAnalyzer, DEFAULT_END_FREQUENCY, DEFAULT_POINTS, DEFAULT_START_FREQUENCY,
};
use crate::compose::CircuitFactory;
use crate::error::Result;
use crate::primitives::{BridgedTFilter, CircuitPrimitive, PrimitiveDefinition};

/// Points evaluated by `simd_test`.
pub const DEFAULT_SIMD_POINTS: usize = 8000;

/// Sweep points echoed by `analyze`.
pub const DEFAULT_PREVIEW_POINTS: usize = 5;

/// Configuration for a session.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SessionConfig {
    /// Domain the session starts in.
    pub domain: AnalogDomain,
    /// Sweep start in Hz.
    pub start_frequency: f32,
    /// Sweep end in Hz.
    pub end_frequency: f32,
    /// Points for `analyze`.
    pub analyze_points: usize,
    /// Points for `simd_test`.
    pub simd_points: usize,
    /// Points printed by `analyze`.
    pub preview_points: usize,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            domain: AnalogDomain::default(),
            start_frequency: DEFAULT_START_FREQUENCY,
            end_frequency: DEFAULT_END_FREQUENCY,
            analyze_points: DEFAULT_POINTS,
            simd_points: DEFAULT_SIMD_POINTS,
            preview_points: DEFAULT_PREVIEW_POINTS,
        }
    }
}

impl SessionConfig {
    /// Create a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_domain(mut self, domain: AnalogDomain) -> Self {
        self.domain = domain;
        self
    }

    /// Set the sweep range in Hz.
    pub fn with_sweep(mut self, start_frequency: f32, end_frequency: f32) -> Self {
        self.start_frequency = start_frequency;
        self.end_frequency = end_frequency;
        self
    }

    pub fn with_analyze_points(mut self, points: usize) -> Self {
        self.analyze_points = points;
        self
    }

    pub fn with_simd_points(mut self, points: usize) -> Self {
        self.simd_points = points;
        self
    }

    pub fn with_preview_points(mut self, points: usize) -> Self {
        self.preview_points = points;
        self
    }
}

/// What the caller should do after a command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandOutcome {
    /// Show the report (possibly empty) and read the next line.
    Continue(String),
    /// Leave the loop.
    Exit,
}

/// Command interpreter state.
#[derive(Debug)]
pub struct AnalogSession {
    config: SessionConfig,
    domain: AnalogDomain,
    filter: BridgedTFilter,
    analyzer: FrequencyResponseAnalyzer,
    factory: CircuitFactory,
}

impl Default for AnalogSession {
    fn default() -> Self {
        Self::new(SessionConfig::default())
    }
}

impl AnalogSession {
    pub fn new(config: SessionConfig) -> Self {
        let domain = config.domain;
        Self {
            config,
            domain,
            filter: BridgedTFilter::new(domain),
            analyzer: FrequencyResponseAnalyzer::new(),
            factory: CircuitFactory::new(domain),
        }
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn domain(&self) -> AnalogDomain {
        self.domain
    }

    /// Move the filter and the factory into `domain`.
    pub fn set_domain(&mut self, domain: AnalogDomain) {
        self.domain = domain;
        self.filter.set_domain(domain);
        self.factory.set_domain(domain);
    }

    pub fn filter(&self) -> &BridgedTFilter {
        &self.filter
    }

    pub fn filter_mut(&mut self) -> &mut BridgedTFilter {
        &mut self.filter
    }

    pub fn analyzer(&self) -> &FrequencyResponseAnalyzer {
        &self.analyzer
    }

    pub fn factory(&self) -> &CircuitFactory {
        &self.factory
    }

    /// Register a transpiled model; returns its factory key.
    pub fn register_definition(&mut self, definition: PrimitiveDefinition) -> String {
        self.factory.register_definition(definition)
    }

    /// Greeting printed before the first prompt.
    pub fn banner(&self) -> String {
        format!(
            "Bridget analog circuit session\nCommands: {}",
            Command::ALL
                .iter()
                .map(|c| c.usage())
                .collect::<Vec<_>>()
                .join(", ")
        )
    }

    /// Execute one input line.
    ///
    /// Blank lines produce an empty report. Unknown commands are not errors;
    /// malformed arguments are.
    pub fn execute(&mut self, line: &str) -> Result<CommandOutcome> {
        let mut words = line.split_whitespace();
        let Some(keyword) = words.next() else {
            return Ok(CommandOutcome::Continue(String::new()));
        };
        let args: Vec<&str> = words.collect();

        match Command::from_keyword(keyword) {
            Some(command) => {
                debug!(command = keyword, args = args.len(), "executing");
                command.run(self, &args)
            }
            None => {
                debug!(command = keyword, "unknown command");
                Ok(CommandOutcome::Continue(format!(
                    "Unknown command '{}'. Available: {}",
                    keyword,
                    Command::ALL
                        .iter()
                        .map(|c| c.keyword())
                        .collect::<Vec<_>>()
                        .join(", ")
                )))
            }
        }
    }
}
