//! Transpiler for a small subset of Modelica electrical models.
//!
//! A model file is read line by line into a [`ModelicaComponent`], turned
//! into a [`PrimitiveDefinition`] that the
//! [`CircuitFactory`](crate::compose::CircuitFactory) can register, and can
//! optionally be rendered as Rust source.
//!
//! # Grammar Overview
//!
//! ```text
//! model       = [within] header { line } end
//! within      = "within" qualified_name ';'
//! header      = ["partial"] "model" identifier [string]
//! line        = comment | extends | parameter | variable | "equation" | equation
//! comment     = "//" { any_char }
//! extends     = "extends" qualified_name [modifiers] ';'
//! parameter   = "parameter" type identifier [modifiers] ['=' number] [string] ';'
//! variable    = [prefix] si_type identifier [string] ';'
//! equation    = assert | expression '=' expression ';'
//! assert      = "assert" '(' condition ',' string ')' ';'
//! end         = "end" identifier ';'
//!
//! prefix      = "input" | "output" | "flow" | "discrete"
//! si_type     = ("SI." | "Modelica.SIunits." | "Modelica.Units.SI.") identifier
//! modifiers   = '(' [ "start" '=' number ] { ',' any } ')'
//! ```
//!
//! # Recognized Models
//!
//! | Model | Element | Transfer function |
//! |-------|---------|-------------------|
//! | Resistor | `R` | `Z = R` |
//! | Capacitor | `C` | `Z = 1 / (jωC)` |
//! | Conductor | `G` | `Z = 1 / G` |
//! | anything else | - | `H = 1` |
//!
//! # Parameter Ranges
//!
//! | Unit | Range |
//! |------|-------|
//! | Resistance | `[1e-3, 1e6]` |
//! | Conductance | `[1e-6, 1e3]` |
//! | Capacitance | `[1e-12, 1e-3]` |
//! | Inductance | `[1e-9, 1]` |
//! | Temperature | `[200, 500]` |
//! | other | `[-1, 1]` |
//!
//! Equations are classified (algebraic, differential, conditional, assert)
//! and kept on the component, but the generated transfer function comes
//! from the element kind alone.

mod ast;
mod emit;
mod generate;
mod parser;

pub use ast::*;
pub use emit::emit_rust_source;
pub use generate::generate_circuit_primitive;
pub use parser::parse_component;

use crate::error::{BridgetError, Result};
use crate::primitives::PrimitiveDefinition;

/// Parse model source and generate its primitive definition.
pub fn transpile(source: &str) -> Result<PrimitiveDefinition> {
    generate_circuit_primitive(&parse_component(source))
}

/// Parse a model file.
pub fn parse_file(path: &std::path::Path) -> Result<ModelicaComponent> {
    let content = std::fs::read_to_string(path).map_err(|e| BridgetError::FileReadError {
        path: path.display().to_string(),
        source: e,
    })?;
    Ok(parse_component(&content))
}
