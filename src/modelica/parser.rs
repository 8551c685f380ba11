//! Line-oriented model parser.
//!
//! Each trimmed line is matched against a handful of clause parsers built
//! with `nom`. Lines that match nothing are skipped, never rejected.

use nom::branch::alt;
use nom::bytes::complete::{tag, take_till, take_until, take_while1};
use nom::character::complete::{char, space0, space1};
use nom::combinator::{opt, recognize};
use nom::number::complete::float;
use nom::sequence::{delimited, preceded, separated_pair, terminated};
use nom::{IResult, Parser};
use tracing::trace;

use super::ast::{EquationType, ModelicaComponent, ModelicaEquation, ModelicaParameter, ModelicaUnit};

/// Parse the first model in `source`.
pub fn parse_component(source: &str) -> ModelicaComponent {
    let mut component = ModelicaComponent::default();
    let mut in_equations = false;

    for raw_line in source.lines() {
        let line = raw_line.trim();

        // Skip blank lines and comments
        if line.is_empty() || line.starts_with("//") {
            continue;
        }

        if let Some(closed) = line.strip_prefix("end ") {
            let closed = closed.trim_end_matches(';').trim();
            if component.name.is_empty() || closed == component.name {
                break;
            }
            // `end if;`, `end for;` inside a body
            continue;
        }

        if let Ok((_, path)) = within_clause(line) {
            component.path = path.to_string();
        } else if let Ok((_, (name, description))) = model_header(line) {
            component.name = name.to_string();
            component.description = description.unwrap_or_default().to_string();
        } else if let Ok((_, base)) = extends_clause(line) {
            if base.contains("OnePort") {
                component.is_one_port = true;
            }
            if base.contains("ConditionalHeatPort") {
                component.has_heat_port = true;
            }
            component.extends.push(base.to_string());
        } else if let Ok((_, decl)) = parameter_decl(line) {
            component.parameters.push(decl.into_parameter());
        } else if let Some((name, type_name)) = variable_decl(line) {
            component.variables.insert(name.to_string(), type_name.to_string());
        } else if line == "equation" {
            in_equations = true;
        } else if in_equations && !line.starts_with("annotation") {
            match parse_equation(line) {
                Some(equation) => component.equations.push(equation),
                None => trace!(line, "skipping unrecognized equation"),
            }
        } else {
            trace!(line, "skipping unrecognized line");
        }
    }

    component
}

// ---------------------------------------------------------------------------
// Tokens
// ---------------------------------------------------------------------------

fn identifier(input: &str) -> IResult<&str, &str> {
    take_while1(|c: char| c.is_alphanumeric() || c == '_').parse(input)
}

/// `Modelica.Electrical.Analog.Basic`
fn qualified_name(input: &str) -> IResult<&str, &str> {
    take_while1(|c: char| c.is_alphanumeric() || c == '_' || c == '.').parse(input)
}

fn quoted(input: &str) -> IResult<&str, &str> {
    delimited(char('"'), take_till(|c: char| c == '"'), char('"')).parse(input)
}

fn number(input: &str) -> IResult<&str, f32> {
    float(input)
}

fn sp0(input: &str) -> IResult<&str, &str> {
    space0(input)
}

fn sp1(input: &str) -> IResult<&str, &str> {
    space1(input)
}

/// `SI.Voltage`, `Modelica.SIunits.Voltage`, `Modelica.Units.SI.Voltage`
fn si_type(input: &str) -> IResult<&str, &str> {
    recognize(preceded(
        alt((tag("Modelica.Units.SI."), tag("Modelica.SIunits."), tag("SI."))),
        identifier,
    ))
    .parse(input)
}

// ---------------------------------------------------------------------------
// Clauses
// ---------------------------------------------------------------------------

fn within_clause(line: &str) -> IResult<&str, &str> {
    preceded((tag("within"), sp1), qualified_name).parse(line)
}

fn model_header(line: &str) -> IResult<&str, (&str, Option<&str>)> {
    let (rest, _) = opt(terminated(tag("partial"), sp1)).parse(line)?;
    let (rest, _) = (tag("model"), sp1).parse(rest)?;
    let (rest, name) = identifier(rest)?;
    let (rest, description) = opt(preceded(sp0, quoted)).parse(rest)?;
    Ok((rest, (name, description)))
}

fn extends_clause(line: &str) -> IResult<&str, &str> {
    preceded((tag("extends"), sp1), qualified_name).parse(line)
}

struct ParameterDecl<'a> {
    type_name: &'a str,
    name: &'a str,
    start: Option<f32>,
    binding: Option<f32>,
    description: &'a str,
}

impl ParameterDecl<'_> {
    fn into_parameter(self) -> ModelicaParameter {
        let is_temperature_dependent =
            self.name.contains("alpha") || self.description.contains("temperature");
        ModelicaParameter {
            name: self.name.to_string(),
            unit: ModelicaUnit::from_type_name(self.type_name),
            default_value: self.start.or(self.binding).unwrap_or(0.0),
            start_value: self.start.unwrap_or(0.0),
            description: self.description.to_string(),
            is_temperature_dependent,
        }
    }
}

/// `parameter SI.Resistance R(start=1) "Resistance at temperature T_ref";`
fn parameter_decl(line: &str) -> IResult<&str, ParameterDecl<'_>> {
    let (rest, _) = (tag("parameter"), sp1).parse(line)?;
    let (rest, type_name) = qualified_name(rest)?;
    let (rest, _) = sp1(rest)?;
    let (rest, name) = identifier(rest)?;
    let (rest, modifiers) = opt(preceded(
        sp0,
        delimited(char('('), take_till(|c: char| c == ')'), char(')')),
    ))
    .parse(rest)?;
    let (rest, binding) = opt(preceded((sp0, char('='), sp0), number)).parse(rest)?;
    let (rest, description) = opt(preceded(sp0, quoted)).parse(rest)?;

    Ok((
        rest,
        ParameterDecl {
            type_name,
            name,
            start: modifiers.and_then(start_modifier),
            binding,
            description: description.unwrap_or_default(),
        },
    ))
}

/// Value of `start=...` inside a modifier list such as `start=1, fixed=true`.
fn start_modifier(modifiers: &str) -> Option<f32> {
    modifiers
        .split(',')
        .find_map(|item| start_value(item.trim()).ok().map(|(_, value)| value))
}

fn start_value(input: &str) -> IResult<&str, f32> {
    preceded((tag("start"), sp0, char('='), sp0), number).parse(input)
}

/// `SI.Resistance R_actual "Actual resistance";` as `(name, type)`.
fn variable_decl(line: &str) -> Option<(&str, &str)> {
    if line.starts_with("parameter") {
        return None;
    }
    typed_variable(line).ok().map(|(_, decl)| decl)
}

fn typed_variable(input: &str) -> IResult<&str, (&str, &str)> {
    let (rest, _) = opt(terminated(
        alt((tag("input"), tag("output"), tag("flow"), tag("discrete"))),
        sp1,
    ))
    .parse(input)?;
    let (rest, type_name) = si_type(rest)?;
    let (rest, _) = sp1(rest)?;
    let (rest, name) = identifier(rest)?;
    Ok((rest, (name, type_name)))
}

// ---------------------------------------------------------------------------
// Equations
// ---------------------------------------------------------------------------

fn parse_equation(line: &str) -> Option<ModelicaEquation> {
    if line.contains("assert") {
        let (_, (condition, message)) = assert_call(line).ok()?;
        return Some(ModelicaEquation {
            kind: EquationType::Assert,
            lhs: condition.trim().to_string(),
            rhs: message.to_string(),
            condition: None,
        });
    }

    let (_, (lhs, rhs)) = equation_sides(line).ok()?;
    let lhs = lhs.trim();
    let rhs = rhs.trim().trim_end_matches(';').trim_end();
    if lhs.is_empty() {
        return None;
    }

    let (kind, condition) = if line.contains("der(") {
        (EquationType::Differential, None)
    } else if let Ok((_, guard)) = if_guard(rhs) {
        (EquationType::Conditional, Some(guard.trim().to_string()))
    } else {
        (EquationType::Algebraic, None)
    };

    Some(ModelicaEquation {
        kind,
        lhs: lhs.to_string(),
        rhs: rhs.to_string(),
        condition,
    })
}

/// `assert(R_actual >= 0, "Resistance must be positive")`
fn assert_call(line: &str) -> IResult<&str, (&str, &str)> {
    preceded(
        (tag("assert"), sp0, char('('), sp0),
        separated_pair(take_till(|c: char| c == ','), (char(','), sp0), quoted),
    )
    .parse(line)
}

fn equation_sides(line: &str) -> IResult<&str, (&str, &str)> {
    separated_pair(take_until("="), char('='), nom::combinator::rest).parse(line)
}

/// Guard of `if <cond> then ...`.
fn if_guard(rhs: &str) -> IResult<&str, &str> {
    preceded((tag("if"), sp1), take_until(" then")).parse(rhs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const RESISTOR: &str = r#"
        within Modelica.Electrical.Analog.Basic;
        model Resistor "Ideal linear electrical resistor"
          parameter SI.Resistance R(start=1) "Resistance at temperature T_ref";
          parameter SI.Temperature T_ref=300.15 "Reference temperature";
          parameter SI.LinearTemperatureCoefficient alpha=0
            "Temperature coefficient of resistance (R_actual = R*(1 + alpha*(T_heatPort - T_ref))";
          extends Modelica.Electrical.Analog.Interfaces.OnePort;
          extends Modelica.Electrical.Analog.Interfaces.ConditionalHeatPort(T=T_ref);
          SI.Resistance R_actual "Actual resistance = R*(1 + alpha*(T_heatPort - T_ref))";
        equation
          assert((1 + alpha*(T_heatPort - T_ref)) >= Modelica.Constants.eps, "Temperature outside scope of model!");
          R_actual = R*(1 + alpha*(T_heatPort - T_ref));
          v = R_actual*i;
          LossPower = v*i;
          annotation (Documentation(info="<html>resistor</html>"));
        end Resistor;
    "#;

    #[test]
    fn test_parse_resistor_header() {
        let c = parse_component(RESISTOR);
        assert_eq!(c.name, "Resistor");
        assert_eq!(c.path, "Modelica.Electrical.Analog.Basic");
        assert_eq!(c.description, "Ideal linear electrical resistor");
        assert!(c.is_one_port);
        assert!(c.has_heat_port);
        assert_eq!(c.extends.len(), 2);
    }

    #[test]
    fn test_parse_resistor_parameters() {
        let c = parse_component(RESISTOR);
        assert_eq!(c.parameters.len(), 3);

        let r = c.parameter("R").unwrap();
        assert_eq!(r.unit, ModelicaUnit::Resistance);
        assert_eq!(r.default_value, 1.0);
        assert_eq!(r.start_value, 1.0);
        assert!(r.is_temperature_dependent);

        // "Reference temperature"
        let t_ref = c.parameter("T_ref").unwrap();
        assert_eq!(t_ref.unit, ModelicaUnit::Temperature);
        assert_relative_eq!(t_ref.default_value, 300.15);
        assert!(t_ref.is_temperature_dependent);

        let alpha = c.parameter("alpha").unwrap();
        assert_eq!(alpha.unit, ModelicaUnit::Dimensionless);
        assert_eq!(alpha.default_value, 0.0);
        assert!(alpha.is_temperature_dependent);
    }

    #[test]
    fn test_parse_resistor_variables_and_equations() {
        let c = parse_component(RESISTOR);
        assert_eq!(c.variables.get("R_actual").map(String::as_str), Some("SI.Resistance"));

        let kinds: Vec<EquationType> = c.equations.iter().map(|e| e.kind).collect();
        assert_eq!(
            kinds,
            vec![
                EquationType::Assert,
                EquationType::Algebraic,
                EquationType::Algebraic,
                EquationType::Algebraic
            ]
        );
        assert_eq!(c.equations[0].rhs, "Temperature outside scope of model!");
        assert_eq!(c.equations[1].lhs, "R_actual");
        assert_eq!(c.equations[1].rhs, "R*(1 + alpha*(T_heatPort - T_ref))");
        assert_eq!(c.equations[2].rhs, "R_actual*i");
    }

    #[test]
    fn test_parse_capacitor_differential() {
        let source = r#"
            model Capacitor "Ideal linear electrical capacitor"
              extends Interfaces.OnePort(v(start=0));
              parameter SI.Capacitance C(start=1e-6) "Capacitance";
            equation
              i = C*der(v);
            end Capacitor;
        "#;
        let c = parse_component(source);
        assert_eq!(c.name, "Capacitor");
        assert!(c.is_one_port);
        assert_relative_eq!(c.parameter("C").unwrap().default_value, 1e-6);
        assert_eq!(c.equations.len(), 1);
        assert_eq!(c.equations[0].kind, EquationType::Differential);
        assert_eq!(c.equations[0].rhs, "C*der(v)");
    }

    #[test]
    fn test_conditional_equation_and_nested_end() {
        let source = r#"
            model Clip
              parameter Real limit = 0.5;
            equation
              y = if u > limit then limit else u;
              for k in 1:2 loop
              end for;
              z = y;
            end Clip;
        "#;
        let c = parse_component(source);
        assert_eq!(c.parameter("limit").unwrap().default_value, 0.5);
        assert_eq!(c.equations.len(), 2);
        assert_eq!(c.equations[0].kind, EquationType::Conditional);
        assert_eq!(c.equations[0].condition.as_deref(), Some("u > limit"));
        assert_eq!(c.equations[1].lhs, "z");
    }

    #[test]
    fn test_unrecognized_lines_are_ignored() {
        let source = "// header\nimport Foo;\nmodel Bare\nprotected\nend Bare;\nmodel Ignored\n";
        let c = parse_component(source);
        assert_eq!(c.name, "Bare");
        assert!(c.parameters.is_empty());
        assert!(c.equations.is_empty());
    }

    #[test]
    fn test_empty_source() {
        let c = parse_component("");
        assert!(c.name.is_empty());
    }
}
