//! Rust source emission for generated primitives.
//!
//! The output is a standalone module against the `bridget_core` API: a
//! struct owning a [`ParameterSet`](crate::primitives::ParameterSet), with
//! `TransferFunction` and `CircuitPrimitive` impls. The eight-lane method is
//! always written out as eight scalar calls.

use std::fmt::{self, Write};

use crate::primitives::{ElementKind, PrimitiveDefinition};

/// Render `definition` as Rust source.
pub fn emit_rust_source(definition: &PrimitiveDefinition) -> String {
    let mut out = String::new();
    write_source(definition, &mut out)
        .map(|()| out)
        .unwrap_or_default()
}

fn write_source(def: &PrimitiveDefinition, out: &mut String) -> fmt::Result {
    let name = &def.name;

    if def.path.is_empty() {
        writeln!(out, "// Generated from {}", def.name)?;
    } else {
        writeln!(out, "// Generated from {}.{}", def.path, def.name)?;
    }
    writeln!(out, "use bridget_core::analog::{{AnalogComplex, AnalogDomain, LANES}};")?;
    writeln!(
        out,
        "use bridget_core::primitives::{{CircuitPrimitive, ParameterSet, TransferFunction}};"
    )?;
    writeln!(out, "use wide::f32x8;")?;
    writeln!(out)?;

    if !def.description.is_empty() {
        writeln!(out, "/// {}", def.description)?;
    }
    writeln!(out, "#[derive(Debug, Clone)]")?;
    writeln!(out, "pub struct {name} {{")?;
    writeln!(out, "    params: ParameterSet,")?;
    writeln!(out, "}}")?;
    writeln!(out)?;

    // Constructor
    writeln!(out, "impl {name} {{")?;
    writeln!(out, "    pub fn new(domain: AnalogDomain) -> Self {{")?;
    writeln!(out, "        let mut params = ParameterSet::new(domain);")?;
    for spec in &def.parameters {
        writeln!(
            out,
            "        params.add({:?}, {:?}, {:?}, {:?}, {});",
            spec.name, spec.default, spec.min, spec.max, spec.is_knob
        )?;
    }
    writeln!(out, "        Self {{ params }}")?;
    writeln!(out, "    }}")?;
    writeln!(out, "}}")?;
    writeln!(out)?;

    writeln!(out, "impl TransferFunction for {name} {{")?;
    writeln!(out, "    fn domain(&self) -> AnalogDomain {{")?;
    writeln!(out, "        self.params.domain()")?;
    writeln!(out, "    }}")?;
    writeln!(out)?;
    writeln!(out, "    fn transfer_function(&self, frequency: f32) -> AnalogComplex {{")?;
    writeln!(out, "        let d = self.domain();")?;
    write_response(def.kind, out)?;
    writeln!(out, "    }}")?;
    writeln!(out)?;
    writeln!(
        out,
        "    fn transfer_function_x8(&self, frequencies: f32x8) -> (f32x8, f32x8) {{"
    )?;
    writeln!(out, "        let d = self.domain();")?;
    writeln!(out, "        let freqs = frequencies.to_array();")?;
    writeln!(out, "        let mut magnitude = [0.0f32; LANES];")?;
    writeln!(out, "        let mut phase = [0.0f32; LANES];")?;
    writeln!(out, "        for i in 0..LANES {{")?;
    writeln!(out, "            let h = self.transfer_function(freqs[i]);")?;
    writeln!(out, "            magnitude[i] = h.magnitude(&d);")?;
    writeln!(out, "            phase[i] = h.phase(&d);")?;
    writeln!(out, "        }}")?;
    writeln!(out, "        (f32x8::from(magnitude), f32x8::from(phase))")?;
    writeln!(out, "    }}")?;
    writeln!(out, "}}")?;
    writeln!(out)?;

    writeln!(out, "impl CircuitPrimitive for {name} {{")?;
    writeln!(out, "    fn name(&self) -> &str {{")?;
    writeln!(out, "        {name:?}")?;
    writeln!(out, "    }}")?;
    writeln!(out)?;
    writeln!(out, "    fn parameters(&self) -> &ParameterSet {{")?;
    writeln!(out, "        &self.params")?;
    writeln!(out, "    }}")?;
    writeln!(out)?;
    writeln!(out, "    fn parameters_mut(&mut self) -> &mut ParameterSet {{")?;
    writeln!(out, "        &mut self.params")?;
    writeln!(out, "    }}")?;
    writeln!(out, "}}")
}

fn write_response(kind: ElementKind, out: &mut String) -> fmt::Result {
    match kind {
        ElementKind::Resistor => writeln!(
            out,
            "        AnalogComplex::new(self.params.value_or_zero(\"R\"), 0.0, &d)"
        ),
        ElementKind::Capacitor => {
            writeln!(
                out,
                "        let omega_c = d.mul(d.mul(std::f32::consts::TAU, frequency), self.params.value_or_zero(\"C\"));"
            )?;
            writeln!(
                out,
                "        AnalogComplex::one(&d).div(AnalogComplex::new(0.0, omega_c, &d), &d)"
            )
        }
        ElementKind::Conductor => writeln!(
            out,
            "        AnalogComplex::new(d.div(1.0, self.params.value_or_zero(\"G\")), 0.0, &d)"
        ),
        ElementKind::Identity => {
            writeln!(out, "        let _ = frequency;")?;
            writeln!(out, "        AnalogComplex::one(&d)")
        }
    }
}
