//! End-to-end: model source → factory → chain → analyzers.

use approx::assert_relative_eq;
use bridget_core::analog::AnalogDomain;
use bridget_core::analysis::FrequencyResponseAnalyzer;
use bridget_core::compose::{BatchAnalyzer, CircuitChain, CircuitFactory};
use bridget_core::modelica;
use bridget_core::primitives::{CircuitPrimitive, Primitive, TransferFunction};
use bridget_core::session::{AnalogSession, CommandOutcome};

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
end Resistor;
"#;

#[test]
fn transpiled_model_is_available_from_the_factory() {
    let d = AnalogDomain::default();
    let mut factory = CircuitFactory::new(d);
    let key = factory.register_definition(modelica::transpile(RESISTOR).unwrap());
    assert_eq!(key, "resistor");
    assert_eq!(
        factory.available_primitives(),
        vec![
            "bridged_t_filter",
            "bridged_t_resonator",
            "resistor",
            "variable_resistance"
        ]
    );

    let mut resistor = factory.create("resistor").unwrap();
    assert!(matches!(resistor, Primitive::Model(_)));
    assert_eq!(resistor.name(), "Resistor");
    assert!(resistor.set_parameter("R", 2.0));
    assert_relative_eq!(resistor.transfer_function(440.0).re, 2.0);
    assert!(factory.create("inductor").is_none());
}

#[test]
fn chain_of_filter_and_gain_scales_the_filter() {
    let d = AnalogDomain::default();
    let mut factory = CircuitFactory::new(d);
    factory.register_definition(modelica::transpile(RESISTOR).unwrap());

    let filter = factory.create("bridged_t_filter").unwrap();
    let mut gain = factory.create("resistor").unwrap();
    gain.set_parameter("R", 10.0);

    let mut chain = CircuitChain::new("filter_then_gain", d);
    chain.add_stage(filter.clone());
    chain.add_stage(gain);

    let mut alone = FrequencyResponseAnalyzer::new();
    alone.analyze(&filter, 10.0, 10_000.0, 50);
    let mut scaled = FrequencyResponseAnalyzer::new();
    scaled.analyze_simd(&chain, 10.0, 10_000.0, 50);

    // +20 dB everywhere, phase untouched
    let (a, s) = (alone.bode_data(), scaled.bode_data());
    for i in 0..50 {
        assert_relative_eq!(s.magnitude_db[i], a.magnitude_db[i] + 20.0, epsilon = 1e-3);
        assert_relative_eq!(s.phase_deg[i], a.phase_deg[i], epsilon = 1e-3);
    }
}

#[test]
fn batch_and_single_sweeps_agree_on_the_notch() {
    let d = AnalogDomain::default();
    let factory = CircuitFactory::new(d);
    let filter = factory.create("bridged_t_filter").unwrap();
    let f0 = filter.center_frequency();

    let mut batch = BatchAnalyzer::new(d);
    batch.add_circuit(filter);
    let result = batch.analyze_batch(10.0, 10_000.0, 400);

    let magnitudes = &result.magnitudes_db[0];
    let (deepest, _) = magnitudes
        .iter()
        .enumerate()
        .fold((0, f32::MAX), |(best, min), (i, &db)| {
            if db < min {
                (i, db)
            } else {
                (best, min)
            }
        });
    let ratio = result.frequencies[deepest] / f0;
    assert!(ratio > 0.8 && ratio < 1.25, "notch at {} Hz, f0 {}", result.frequencies[deepest], f0);
}

#[test]
fn session_drives_the_whole_stack() {
    let mut session = AnalogSession::default();
    session.register_definition(modelica::transpile(RESISTOR).unwrap());

    let mut run = |line: &str| match session.execute(line).unwrap() {
        CommandOutcome::Continue(text) => text,
        CommandOutcome::Exit => String::from("<exit>"),
    };

    assert!(run("primitives").contains("resistor"));
    assert!(run("tom 0.25").starts_with("Tom position set to 0.25"));
    assert!(run("analyze").contains("Sample points:"));
    assert_eq!(run("analog_mode float_unit"), "Analog mode updated.");
    assert_eq!(run("analog_clamp 3"), "Clamped Value: 1");
    assert_eq!(run("quit"), "<exit>");
}
