//! Composition of primitives: construction by name, cascades, and batched
//! sweeps.
//!
//! - [`CircuitFactory`] - name → constructor registry
//! - [`CircuitChain`] - stages multiplied in signal order
//! - [`BatchAnalyzer`] - many primitives on one frequency grid

mod batch;
mod chain;
mod factory;

pub use batch::{BatchAnalyzer, BatchResult};
pub use chain::CircuitChain;
pub use factory::{CircuitFactory, Constructor};
