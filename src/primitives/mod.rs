//! Circuit primitives.
//!
//! A primitive is a small frequency-domain model with named, bounded
//! parameters and a complex transfer function `H(jω)`:
//! - [`VariableResistanceNetwork`] - one knob network seen as an impedance
//! - [`BridgedTFilter`] - bridged-T notch with a load resistor
//! - [`BridgedTResonator`] - bridged-T resonant peak
//! - [`ModelPrimitive`] - a primitive generated from a parsed model
//!
//! The set is closed; [`Primitive`] is the tagged union the factory, chains
//! and batch analyzer work with.

mod bridged_t;
mod knob;
mod model;
mod params;

pub use bridged_t::{BridgedTFilter, BridgedTResonator};
pub use knob::{KnobNetwork, VariableResistanceNetwork};
pub use model::{ElementKind, ModelPrimitive, ParameterSpec, PrimitiveDefinition};
pub use params::{CircuitParameter, ParameterSet};

use wide::f32x8;

use crate::analog::{AnalogComplex, AnalogDomain, LANES};

/// Anything with a frequency response.
pub trait TransferFunction {
    /// Domain every computation of this object saturates into.
    fn domain(&self) -> AnalogDomain;

    /// `H(j·2πf)` at one frequency in Hz.
    fn transfer_function(&self, frequency: f32) -> AnalogComplex;

    /// Magnitude and phase (radians) at eight frequencies.
    fn transfer_function_x8(&self, frequencies: f32x8) -> (f32x8, f32x8) {
        scalar_fallback_x8(self, frequencies)
    }
}

/// Evaluate eight frequencies with eight scalar calls.
pub fn scalar_fallback_x8<T: TransferFunction + ?Sized>(
    tf: &T,
    frequencies: f32x8,
) -> (f32x8, f32x8) {
    let d = tf.domain();
    let freqs = frequencies.to_array();
    let mut magnitude = [0.0f32; LANES];
    let mut phase = [0.0f32; LANES];
    for i in 0..LANES {
        let h = tf.transfer_function(freqs[i]);
        magnitude[i] = h.magnitude(&d);
        phase[i] = h.phase(&d);
    }
    (f32x8::from(magnitude), f32x8::from(phase))
}

/// A parameterized frequency-domain building block.
pub trait CircuitPrimitive: TransferFunction {
    /// Stable display name.
    fn name(&self) -> &str;

    fn parameters(&self) -> &ParameterSet;

    fn parameters_mut(&mut self) -> &mut ParameterSet;

    /// Re-home the primitive into another domain.
    fn set_domain(&mut self, domain: AnalogDomain) {
        self.parameters_mut().set_domain(domain);
    }

    fn center_frequency(&self) -> f32 {
        1000.0
    }

    fn quality_factor(&self) -> f32 {
        1.0
    }

    fn peak_gain(&self) -> f32 {
        1.0
    }

    /// `f0 / Q`.
    fn bandwidth(&self) -> f32 {
        self.domain()
            .div(self.center_frequency(), self.quality_factor())
    }

    /// Returns `false` if the parameter does not exist.
    fn set_parameter(&mut self, name: &str, value: f32) -> bool {
        self.parameters_mut().set(name, value)
    }

    fn parameter(&self, name: &str) -> Option<f32> {
        self.parameters().value(name)
    }

    fn set_parameter_normalized(&mut self, name: &str, normalized: f32) -> bool {
        self.parameters_mut().set_normalized(name, normalized)
    }

    fn parameter_normalized(&self, name: &str) -> Option<f32> {
        self.parameters().normalized(name)
    }

    fn knob_parameters(&self) -> Vec<&str> {
        self.parameters().knob_names()
    }
}

/// The closed set of primitive kinds.
#[derive(Debug, Clone)]
pub enum Primitive {
    VariableResistance(VariableResistanceNetwork),
    BridgedTFilter(BridgedTFilter),
    BridgedTResonator(BridgedTResonator),
    Model(ModelPrimitive),
}

impl Primitive {
    fn inner(&self) -> &dyn CircuitPrimitive {
        match self {
            Primitive::VariableResistance(p) => p,
            Primitive::BridgedTFilter(p) => p,
            Primitive::BridgedTResonator(p) => p,
            Primitive::Model(p) => p,
        }
    }

    fn inner_mut(&mut self) -> &mut dyn CircuitPrimitive {
        match self {
            Primitive::VariableResistance(p) => p,
            Primitive::BridgedTFilter(p) => p,
            Primitive::BridgedTResonator(p) => p,
            Primitive::Model(p) => p,
        }
    }
}

impl TransferFunction for Primitive {
    fn domain(&self) -> AnalogDomain {
        self.inner().domain()
    }

    fn transfer_function(&self, frequency: f32) -> AnalogComplex {
        self.inner().transfer_function(frequency)
    }

    fn transfer_function_x8(&self, frequencies: f32x8) -> (f32x8, f32x8) {
        self.inner().transfer_function_x8(frequencies)
    }
}

impl CircuitPrimitive for Primitive {
    fn name(&self) -> &str {
        self.inner().name()
    }

    fn parameters(&self) -> &ParameterSet {
        self.inner().parameters()
    }

    fn parameters_mut(&mut self) -> &mut ParameterSet {
        self.inner_mut().parameters_mut()
    }

    fn set_domain(&mut self, domain: AnalogDomain) {
        self.inner_mut().set_domain(domain)
    }

    fn center_frequency(&self) -> f32 {
        self.inner().center_frequency()
    }

    fn quality_factor(&self) -> f32 {
        self.inner().quality_factor()
    }

    fn peak_gain(&self) -> f32 {
        self.inner().peak_gain()
    }

    fn bandwidth(&self) -> f32 {
        self.inner().bandwidth()
    }
}

impl From<VariableResistanceNetwork> for Primitive {
    fn from(p: VariableResistanceNetwork) -> Self {
        Primitive::VariableResistance(p)
    }
}

impl From<BridgedTFilter> for Primitive {
    fn from(p: BridgedTFilter) -> Self {
        Primitive::BridgedTFilter(p)
    }
}

impl From<BridgedTResonator> for Primitive {
    fn from(p: BridgedTResonator) -> Self {
        Primitive::BridgedTResonator(p)
    }
}

impl From<ModelPrimitive> for Primitive {
    fn from(p: ModelPrimitive) -> Self {
        Primitive::Model(p)
    }
}
