//! Primitives cascaded in signal order.

use wide::f32x8;

use crate::analog::{AnalogComplex, AnalogDomain};
use crate::primitives::{CircuitPrimitive, Primitive, TransferFunction};

/// A cascade of stages. The response is the product of the stage responses,
/// assuming ideal buffering between stages.
#[derive(Debug, Clone)]
pub struct CircuitChain {
    name: String,
    stages: Vec<Primitive>,
    domain: AnalogDomain,
}

impl CircuitChain {
    pub fn new(name: impl Into<String>, domain: AnalogDomain) -> Self {
        Self {
            name: name.into(),
            stages: Vec::new(),
            domain,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Append a stage at the output end, moving it into the chain's domain.
    pub fn add_stage(&mut self, stage: impl Into<Primitive>) {
        let mut stage = stage.into();
        stage.set_domain(self.domain);
        self.stages.push(stage);
    }

    pub fn stage(&self, index: usize) -> Option<&Primitive> {
        self.stages.get(index)
    }

    pub fn stage_mut(&mut self, index: usize) -> Option<&mut Primitive> {
        self.stages.get_mut(index)
    }

    pub fn stages(&self) -> &[Primitive] {
        &self.stages
    }

    pub fn len(&self) -> usize {
        self.stages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }

    /// Set a parameter on stage `index`. Returns `false`, and changes
    /// nothing, if either the stage or the parameter does not exist.
    pub fn set_stage_parameter(&mut self, index: usize, name: &str, value: f32) -> bool {
        self.stages
            .get_mut(index)
            .map(|stage| stage.set_parameter(name, value))
            .unwrap_or(false)
    }

    pub fn stage_parameter(&self, index: usize, name: &str) -> Option<f32> {
        self.stages.get(index)?.parameter(name)
    }
}

impl TransferFunction for CircuitChain {
    fn domain(&self) -> AnalogDomain {
        self.domain
    }

    /// Product of stage responses, starting from unity.
    fn transfer_function(&self, frequency: f32) -> AnalogComplex {
        let d = self.domain;
        self.stages
            .iter()
            .fold(AnalogComplex::one(&d), |acc, stage| {
                acc.mul(stage.transfer_function(frequency), &d)
            })
    }

    /// Product of stage magnitudes and sum of stage phases.
    fn transfer_function_x8(&self, frequencies: f32x8) -> (f32x8, f32x8) {
        let d = self.domain;
        self.stages.iter().fold(
            (f32x8::ONE, f32x8::ZERO),
            |(magnitude, phase), stage| {
                let (m, p) = stage.transfer_function_x8(frequencies);
                (d.mul_x8(magnitude, m), d.add_x8(phase, p))
            },
        )
    }
}
