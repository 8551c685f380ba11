//! Primitives described by data rather than code.
//!
//! The model transpiler produces a [`PrimitiveDefinition`]; the factory
//! turns it into a [`ModelPrimitive`] on demand. The element kind decides
//! the transfer function, which for the passive two-terminal elements is
//! their impedance.

use std::f32::consts::TAU;

use super::{CircuitPrimitive, ParameterSet, TransferFunction};
use crate::analog::{AnalogComplex, AnalogDomain};

/// Heat-port temperature assumed by temperature-dependent resistors, in K.
pub const DEFAULT_HEAT_PORT_TEMPERATURE: f32 = 300.15;

/// Which impedance law a generated primitive follows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElementKind {
    /// `Z = R`
    Resistor,
    /// `Z = 1 / (jωC)`
    Capacitor,
    /// `Z = 1 / G`
    Conductor,
    /// `H = 1`
    Identity,
}

impl ElementKind {
    /// Recognize the built-in element models by name.
    pub fn from_model_name(name: &str) -> Self {
        match name {
            "Resistor" => ElementKind::Resistor,
            "Capacitor" => ElementKind::Capacitor,
            "Conductor" => ElementKind::Conductor,
            _ => ElementKind::Identity,
        }
    }

    /// Parameter holding the element value, if the law has one.
    pub fn value_parameter(&self) -> Option<&'static str> {
        match self {
            ElementKind::Resistor => Some("R"),
            ElementKind::Capacitor => Some("C"),
            ElementKind::Conductor => Some("G"),
            ElementKind::Identity => None,
        }
    }
}

/// One parameter of a generated primitive.
#[derive(Debug, Clone, PartialEq)]
pub struct ParameterSpec {
    pub name: String,
    pub default: f32,
    pub min: f32,
    pub max: f32,
    pub is_knob: bool,
    /// Physical quantity, e.g. `Resistance`.
    pub unit: String,
    pub description: String,
}

/// Everything needed to build a [`ModelPrimitive`].
#[derive(Debug, Clone, PartialEq)]
pub struct PrimitiveDefinition {
    /// Model name, e.g. `Resistor`.
    pub name: String,
    /// Registry key, e.g. `resistor`.
    pub key: String,
    /// Enclosing package from the `within` clause.
    pub path: String,
    pub description: String,
    pub kind: ElementKind,
    pub parameters: Vec<ParameterSpec>,
}

impl PrimitiveDefinition {
    pub fn new(name: impl Into<String>, kind: ElementKind) -> Self {
        let name = name.into();
        Self {
            key: factory_key(&name),
            name,
            path: String::new(),
            description: String::new(),
            kind,
            parameters: Vec::new(),
        }
    }

    pub fn instantiate(&self, domain: AnalogDomain) -> ModelPrimitive {
        let mut params = ParameterSet::new(domain);
        for spec in &self.parameters {
            params.add(&spec.name, spec.default, spec.min, spec.max, spec.is_knob);
        }
        ModelPrimitive {
            name: self.name.clone(),
            kind: self.kind,
            params,
        }
    }
}

/// `HeatingResistor` -> `heating_resistor`.
pub fn factory_key(name: &str) -> String {
    let mut key = String::with_capacity(name.len() + 4);
    for (i, c) in name.chars().enumerate() {
        if c.is_uppercase() {
            if i > 0 {
                key.push('_');
            }
            key.extend(c.to_lowercase());
        } else {
            key.push(c);
        }
    }
    key
}

/// A primitive built from a [`PrimitiveDefinition`].
#[derive(Debug, Clone)]
pub struct ModelPrimitive {
    name: String,
    kind: ElementKind,
    params: ParameterSet,
}

impl ModelPrimitive {
    pub fn kind(&self) -> ElementKind {
        self.kind
    }

    /// Resistance including the linear temperature coefficient
    /// `R·(1 + alpha·(T_heat − T_ref))` when `alpha` and `T_ref` exist.
    pub fn resistance(&self) -> f32 {
        let d = self.domain();
        let r = self.params.value_or_zero("R");
        match (self.params.value("alpha"), self.params.value("T_ref")) {
            (Some(alpha), Some(t_ref)) if alpha != 0.0 => {
                let delta_t = d.sub(DEFAULT_HEAT_PORT_TEMPERATURE, t_ref);
                d.mul(r, d.add(1.0, d.mul(alpha, delta_t)))
            }
            _ => r,
        }
    }

    pub fn capacitance(&self) -> f32 {
        self.params.value_or_zero("C")
    }

    /// `|Z|` of a capacitor at `frequency`, `1 / (2πfC)`.
    pub fn impedance_magnitude(&self, frequency: f32) -> f32 {
        self.transfer_function(frequency).magnitude(&self.domain())
    }
}

impl TransferFunction for ModelPrimitive {
    fn domain(&self) -> AnalogDomain {
        self.params.domain()
    }

    fn transfer_function(&self, frequency: f32) -> AnalogComplex {
        let d = self.domain();
        match self.kind {
            ElementKind::Resistor => AnalogComplex::new(self.params.value_or_zero("R"), 0.0, &d),
            ElementKind::Capacitor => {
                let omega_c = d.mul(d.mul(TAU, frequency), self.capacitance());
                AnalogComplex::one(&d).div(AnalogComplex::new(0.0, omega_c, &d), &d)
            }
            ElementKind::Conductor => {
                AnalogComplex::new(d.div(1.0, self.params.value_or_zero("G")), 0.0, &d)
            }
            ElementKind::Identity => AnalogComplex::one(&d),
        }
    }
}

impl CircuitPrimitive for ModelPrimitive {
    fn name(&self) -> &str {
        &self.name
    }

    fn parameters(&self) -> &ParameterSet {
        &self.params
    }

    fn parameters_mut(&mut self) -> &mut ParameterSet {
        &mut self.params
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn spec(name: &str, default: f32, min: f32, max: f32) -> ParameterSpec {
        ParameterSpec {
            name: name.to_string(),
            default,
            min,
            max,
            is_knob: false,
            unit: String::new(),
            description: String::new(),
        }
    }

    #[test]
    fn test_factory_key() {
        assert_eq!(factory_key("Resistor"), "resistor");
        assert_eq!(factory_key("HeatingResistor"), "heating_resistor");
        assert_eq!(factory_key("lowercase"), "lowercase");
    }

    #[test]
    fn test_element_kind_from_name() {
        assert_eq!(ElementKind::from_model_name("Capacitor"), ElementKind::Capacitor);
        assert_eq!(ElementKind::from_model_name("Inductor"), ElementKind::Identity);
        assert_eq!(ElementKind::Conductor.value_parameter(), Some("G"));
    }

    #[test]
    fn test_resistor_impedance() {
        let mut def = PrimitiveDefinition::new("Resistor", ElementKind::Resistor);
        def.parameters.push(spec("R", 220.0, 1e-3, 1e6));
        let r = def.instantiate(AnalogDomain::default());

        assert_eq!(r.name(), "Resistor");
        let z = r.transfer_function(1000.0);
        assert_eq!(z.re, 220.0);
        assert_eq!(z.im, 0.0);
        assert_eq!(r.resistance(), 220.0);
    }

    #[test]
    fn test_temperature_dependent_resistance() {
        let mut def = PrimitiveDefinition::new("Resistor", ElementKind::Resistor);
        def.parameters.push(spec("R", 100.0, 1e-3, 1e6));
        def.parameters.push(spec("alpha", 0.01, -1.0, 1.0));
        def.parameters.push(spec("T_ref", 290.15, 200.0, 500.0));
        let r = def.instantiate(AnalogDomain::default());
        // 100 · (1 + 0.01 · 10)
        assert_relative_eq!(r.resistance(), 110.0, max_relative = 1e-4);
    }

    #[test]
    fn test_capacitor_impedance() {
        let mut def = PrimitiveDefinition::new("Capacitor", ElementKind::Capacitor);
        def.parameters.push(spec("C", 1e-6, 1e-12, 1e-3));
        let c = def.instantiate(AnalogDomain::default());

        let z = c.transfer_function(1000.0);
        let expected = 1.0 / (TAU * 1000.0 * 1e-6);
        assert_relative_eq!(z.re, 0.0, epsilon = 1e-3);
        assert_relative_eq!(z.im, -expected, max_relative = 1e-4);
        assert_relative_eq!(c.impedance_magnitude(1000.0), expected, max_relative = 1e-4);

        // DC: zero-magnitude denominator
        let dc = c.transfer_function(0.0);
        assert_eq!((dc.re, dc.im), (0.0, 0.0));
    }

    #[test]
    fn test_conductor_and_identity() {
        let mut def = PrimitiveDefinition::new("Conductor", ElementKind::Conductor);
        def.parameters.push(spec("G", 0.5, 1e-6, 1e3));
        let g = def.instantiate(AnalogDomain::default());
        assert_eq!(g.transfer_function(50.0).re, 2.0);

        let id = PrimitiveDefinition::new("Diode", ElementKind::Identity)
            .instantiate(AnalogDomain::default());
        let h = id.transfer_function(50.0);
        assert_eq!((h.re, h.im), (1.0, 0.0));
    }
}
