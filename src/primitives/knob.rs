//! Knob-controlled variable resistance.
//!
//! The tom/conga networks of the bridged-T voice map a knob position
//! `x ∈ [0, 1]` to a resistance:
//!
//! ```text
//! R(x) = ((−x² + x + 2) / (x + 2)) · 500 Ω
//! ```
//!
//! giving 500 Ω at `x = 0`, 450 Ω at `x = 0.5` and 333.3 Ω at `x = 1`.

use wide::f32x8;

use super::{CircuitPrimitive, ParameterSet, TransferFunction};
use crate::analog::{AnalogComplex, AnalogDomain};

/// Scale of the network's normalized response, in ohms.
pub const NETWORK_SCALE: f32 = 500.0;

/// One knob network.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KnobNetwork {
    position: f32,
    domain: AnalogDomain,
}

impl KnobNetwork {
    pub fn new(position: f32, domain: AnalogDomain) -> Self {
        let mut knob = Self {
            position: 0.0,
            domain,
        };
        knob.set_position(position);
        knob
    }

    /// Clamp to `[0, 1]`, then into the domain. NaN maps to `0`.
    pub fn set_position(&mut self, position: f32) {
        let position = if position.is_nan() {
            0.0
        } else {
            position.clamp(0.0, 1.0)
        };
        self.position = self.domain.clamp(position);
    }

    pub fn position(&self) -> f32 {
        self.position
    }

    /// Resistance at the current position.
    pub fn resistance(&self) -> f32 {
        resistance_at(&self.domain, self.position)
    }

    /// Resistances for eight positions at once.
    ///
    /// Positions are clamped the same way [`set_position`](Self::set_position)
    /// does, so lane `i` equals `KnobNetwork::new(positions[i], domain).resistance()`.
    pub fn resistance_x8(domain: &AnalogDomain, positions: f32x8) -> f32x8 {
        let d = domain;
        let positions = positions.is_nan().blend(f32x8::ZERO, positions);
        let x = d.clamp_x8(positions.max(f32x8::ZERO).min(f32x8::ONE));
        let two = f32x8::splat(2.0);
        let numerator = d.add_x8(d.add_x8(d.negate_x8(d.mul_x8(x, x)), x), two);
        let denominator = d.add_x8(x, two);
        d.mul_x8(d.div_x8(numerator, denominator), f32x8::splat(NETWORK_SCALE))
    }
}

fn resistance_at(d: &AnalogDomain, x: f32) -> f32 {
    let numerator = d.add(d.add(d.negate(d.mul(x, x)), x), 2.0);
    let denominator = d.add(x, 2.0);
    d.mul(d.div(numerator, denominator), NETWORK_SCALE)
}

/// A knob network exposed as a primitive: `H = R + 0j`.
#[derive(Debug, Clone)]
pub struct VariableResistanceNetwork {
    params: ParameterSet,
}

impl VariableResistanceNetwork {
    pub fn new(position: f32, domain: AnalogDomain) -> Self {
        let mut params = ParameterSet::new(domain);
        params.add("position", position, 0.0, 1.0, true);
        Self { params }
    }

    pub fn knob(&self) -> KnobNetwork {
        KnobNetwork::new(self.params.value_or_zero("position"), self.params.domain())
    }

    pub fn resistance(&self) -> f32 {
        self.knob().resistance()
    }
}

impl TransferFunction for VariableResistanceNetwork {
    fn domain(&self) -> AnalogDomain {
        self.params.domain()
    }

    fn transfer_function(&self, _frequency: f32) -> AnalogComplex {
        AnalogComplex::new(self.resistance(), 0.0, &self.domain())
    }
}

impl CircuitPrimitive for VariableResistanceNetwork {
    fn name(&self) -> &str {
        "VariableResistanceNetwork"
    }

    fn parameters(&self) -> &ParameterSet {
        &self.params
    }

    fn parameters_mut(&mut self) -> &mut ParameterSet {
        &mut self.params
    }
}
