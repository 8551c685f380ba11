//! Syntax tree for the supported model subset.

use std::collections::HashMap;

/// Physical quantity of a parameter, from its `SI.*` type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ModelicaUnit {
    Resistance,
    Conductance,
    Capacitance,
    Inductance,
    Voltage,
    Current,
    Temperature,
    Frequency,
    Dimensionless,
}

impl ModelicaUnit {
    /// Map a type name such as `SI.Resistance` or
    /// `Modelica.Units.SI.Capacitance`. Anything unrecognized is
    /// dimensionless.
    pub fn from_type_name(type_name: &str) -> Self {
        let base = ["Modelica.Units.SI.", "Modelica.SIunits.", "SI."]
            .iter()
            .find_map(|prefix| type_name.strip_prefix(prefix))
            .unwrap_or(type_name);

        match base {
            "Resistance" => ModelicaUnit::Resistance,
            "Conductance" => ModelicaUnit::Conductance,
            "Capacitance" => ModelicaUnit::Capacitance,
            "Inductance" => ModelicaUnit::Inductance,
            "Voltage" => ModelicaUnit::Voltage,
            "Current" => ModelicaUnit::Current,
            "Temperature" => ModelicaUnit::Temperature,
            "Frequency" => ModelicaUnit::Frequency,
            _ => ModelicaUnit::Dimensionless,
        }
    }

    /// Parameter bounds used for generated primitives.
    pub fn range(&self) -> (f32, f32) {
        match self {
            ModelicaUnit::Resistance => (1e-3, 1e6),
            ModelicaUnit::Conductance => (1e-6, 1e3),
            ModelicaUnit::Capacitance => (1e-12, 1e-3),
            ModelicaUnit::Inductance => (1e-9, 1.0),
            ModelicaUnit::Temperature => (200.0, 500.0),
            _ => (-1.0, 1.0),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            ModelicaUnit::Resistance => "Resistance",
            ModelicaUnit::Conductance => "Conductance",
            ModelicaUnit::Capacitance => "Capacitance",
            ModelicaUnit::Inductance => "Inductance",
            ModelicaUnit::Voltage => "Voltage",
            ModelicaUnit::Current => "Current",
            ModelicaUnit::Temperature => "Temperature",
            ModelicaUnit::Frequency => "Frequency",
            ModelicaUnit::Dimensionless => "Dimensionless",
        }
    }
}

/// `parameter <Type> <name>[(start=v)] [= v] ["description"];`
#[derive(Debug, Clone, PartialEq)]
pub struct ModelicaParameter {
    pub name: String,
    pub unit: ModelicaUnit,
    pub default_value: f32,
    pub start_value: f32,
    pub description: String,
    pub is_temperature_dependent: bool,
}

/// Equation classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EquationType {
    /// `v = R*i`
    Algebraic,
    /// `i = C*der(v)`
    Differential,
    /// `y = if c then a else b`
    Conditional,
    /// `assert(cond, "message")`; `lhs` holds the condition, `rhs` the message
    Assert,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ModelicaEquation {
    pub kind: EquationType,
    pub lhs: String,
    pub rhs: String,
    /// Guard of a conditional equation.
    pub condition: Option<String>,
}

/// One parsed model.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ModelicaComponent {
    pub name: String,
    /// Package from the `within` clause.
    pub path: String,
    pub description: String,
    pub parameters: Vec<ModelicaParameter>,
    pub equations: Vec<ModelicaEquation>,
    pub extends: Vec<String>,
    /// Variable name -> declared type.
    pub variables: HashMap<String, String>,
    pub has_heat_port: bool,
    pub is_one_port: bool,
}

impl ModelicaComponent {
    pub fn parameter(&self, name: &str) -> Option<&ModelicaParameter> {
        self.parameters.iter().find(|p| p.name == name)
    }
}
