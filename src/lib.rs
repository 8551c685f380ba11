//! # Bridget Core
//!
//! Frequency-domain analog circuit computing for bridged-T drum voices.
//!
//! This library provides:
//! - A saturating numeric domain that every computation is clamped into
//! - Scalar and 8-lane SIMD math kernels and complex arithmetic over it
//! - Circuit primitives (knob networks, bridged-T filter and resonator)
//! - Composition into cascades, a name-keyed factory and batched sweeps
//! - Logarithmic frequency sweeps and Bode data
//! - A transpiler from simple Modelica electrical models to primitives
//!
//! ## Architecture
//!
//! The library is organized into several modules:
//!
//! - [`analog`] - Analog domain, math kernel, SIMD lanes and complex numbers
//! - [`primitives`] - Parameters, traits and the built-in circuit primitives
//! - [`compose`] - Factory, chains and the batch analyzer
//! - [`analysis`] - Sweeps and the frequency response analyzer
//! - [`modelica`] - Model parser, primitive generator and source emitter
//! - [`session`] - Text command interpreter
//! - `repl` - Console loop (CLI only)
//!
//! ## Usage
//!
//! ### Native CLI
//!
//! ```bash
//! bridget --mode float_custom --min -1e9 --max 1e9
//! analog> tom 0.3
//! analog> analyze
//! ```
//!
//! ### Library
//!
//! ```
//! use bridget_core::analog::AnalogDomain;
//! use bridget_core::analysis::FrequencyResponseAnalyzer;
//! use bridget_core::primitives::{BridgedTFilter, CircuitPrimitive};
//!
//! let domain = AnalogDomain::default();
//! let mut filter = BridgedTFilter::new(domain);
//! filter.set_tom_position(0.3);
//!
//! let mut analyzer = FrequencyResponseAnalyzer::new();
//! analyzer.analyze_simd(&filter, 10.0, 10_000.0, 1000);
//! let bode = analyzer.bode_data();
//! assert_eq!(bode.len(), 1000);
//! assert!(filter.center_frequency() > 0.0);
//! ```
//!
//! ### WASM
//!
//! ```javascript
//! import { WasmAnalogSession } from 'bridget_core';
//!
//! const session = new WasmAnalogSession();
//! console.log(session.execute("params"));
//! ```
//!
//! ## Saturation
//!
//! There is no global numeric state. An [`AnalogDomain`] is a small `Copy`
//! value carried by every parameter set, analyzer and factory; arithmetic
//! never fails and never leaves the domain. Division by zero yields the
//! clamped zero, inverse trigonometry clamps its argument to `[-1, 1]`, and
//! NaN saturates to the domain maximum.

pub mod analog;
pub mod analysis;
pub mod compose;
pub mod error;
pub mod modelica;
pub mod primitives;
pub mod session;

#[cfg(feature = "cli")]
pub mod repl;

// Re-export main types for convenience
pub use analog::{AnalogDomain, AnalogMode};
pub use error::{BridgetError, Result};
pub use primitives::{CircuitPrimitive, Primitive, TransferFunction};
pub use session::AnalogSession;

// WASM bindings
#[cfg(feature = "wasm")]
mod wasm;

#[cfg(feature = "wasm")]
pub use wasm::WasmAnalogSession;
