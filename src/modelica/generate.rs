//! Parsed model → data-described primitive.

use tracing::{debug, info};

use super::ast::{ModelicaComponent, ModelicaParameter};
use crate::error::{BridgetError, Result};
use crate::primitives::{ElementKind, ParameterSpec, PrimitiveDefinition};

/// Build a [`PrimitiveDefinition`] from a parsed model.
///
/// The element kind is chosen from the model name; every parameter becomes a
/// parameter spec whose range comes from its unit. Temperature-dependent parameters
/// are exposed as knobs.
pub fn generate_circuit_primitive(component: &ModelicaComponent) -> Result<PrimitiveDefinition> {
    if component.name.is_empty() {
        return Err(BridgetError::MissingModelName);
    }

    let kind = ElementKind::from_model_name(&component.name);
    let mut definition = PrimitiveDefinition::new(&component.name, kind);
    definition.path = component.path.clone();
    definition.description = component.description.clone();
    definition.parameters = component.parameters.iter().map(parameter_spec).collect();

    if let Some(value) = kind.value_parameter() {
        if component.parameter(value).is_none() {
            debug!(model = %component.name, parameter = value, "element value parameter missing, defaults to 0");
        }
    }

    info!(
        model = %definition.name,
        key = %definition.key,
        kind = ?definition.kind,
        parameters = definition.parameters.len(),
        "generated primitive"
    );
    Ok(definition)
}

fn parameter_spec(param: &ModelicaParameter) -> ParameterSpec {
    let (min, max) = param.unit.range();
    if param.default_value < min || param.default_value > max {
        debug!(
            parameter = %param.name,
            default = param.default_value,
            min,
            max,
            "default outside unit range, will be clamped"
        );
    }
    ParameterSpec {
        name: param.name.clone(),
        default: param.default_value,
        min,
        max,
        is_knob: param.is_temperature_dependent,
        unit: param.unit.name().to_string(),
        description: param.description.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analog::AnalogDomain;
    use crate::modelica::parse_component;
    use crate::primitives::{CircuitPrimitive, TransferFunction};
    use approx::assert_relative_eq;

    const RESISTOR: &str = r#"
        within Modelica.Electrical.Analog.Basic;
        model Resistor "Ideal linear electrical resistor"
          parameter SI.Resistance R(start=1) "Resistance at temperature T_ref";
          parameter SI.Temperature T_ref=300.15 "Reference temperature";
          parameter SI.LinearTemperatureCoefficient alpha=0 "Temperature coefficient of resistance";
        equation
          v = R*i;
        end Resistor;
    "#;

    #[test]
    fn test_generate_resistor() {
        let definition = generate_circuit_primitive(&parse_component(RESISTOR)).unwrap();
        assert_eq!(definition.name, "Resistor");
        assert_eq!(definition.key, "resistor");
        assert_eq!(definition.path, "Modelica.Electrical.Analog.Basic");
        assert_eq!(definition.kind, ElementKind::Resistor);
        assert_eq!(definition.parameters.len(), 3);

        let r = &definition.parameters[0];
        assert_eq!(r.name, "R");
        assert_eq!((r.min, r.max), (1e-3, 1e6));
        assert_eq!(r.unit, "Resistance");
        assert!(r.is_knob);

        let alpha = &definition.parameters[2];
        assert_eq!((alpha.min, alpha.max), (-1.0, 1.0));
        assert_eq!(alpha.unit, "Dimensionless");
    }

    #[test]
    fn test_instantiated_resistor_is_flat() {
        let definition = generate_circuit_primitive(&parse_component(RESISTOR)).unwrap();
        let d = AnalogDomain::default();
        let mut resistor = definition.instantiate(d);
        assert_eq!(resistor.name(), "Resistor");

        assert!(resistor.set_parameter("R", 4700.0));
        let h = resistor.transfer_function(1234.0);
        assert_relative_eq!(h.re, 4700.0);
        assert_eq!(h.im, 0.0);
    }

    #[test]
    fn test_out_of_range_default_is_clamped() {
        let source = r#"
            model Capacitor
              parameter SI.Capacitance C(start=1) "Capacitance";
            end Capacitor;
        "#;
        let definition = generate_circuit_primitive(&parse_component(source)).unwrap();
        assert_eq!(definition.parameters[0].default, 1.0);

        let capacitor = definition.instantiate(AnalogDomain::default());
        assert_eq!(capacitor.capacitance(), 1e-3);
    }

    #[test]
    fn test_unknown_model_is_identity() {
        let source = "model Follower\n  parameter Real gain = 0.2;\nend Follower;";
        let definition = generate_circuit_primitive(&parse_component(source)).unwrap();
        assert_eq!(definition.kind, ElementKind::Identity);
        assert_eq!(definition.key, "follower");
        assert!(!definition.parameters[0].is_knob);
    }

    #[test]
    fn test_missing_name_is_rejected() {
        let err = generate_circuit_primitive(&parse_component("parameter Real x = 1;"));
        assert!(matches!(err, Err(BridgetError::MissingModelName)));
    }
}
