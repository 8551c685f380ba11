//! Bridged-T filter and resonator.
//!
//! Both circuits share the same four elements: the tom network `R1`, the
//! conga network `R2` and two capacitors `C1`, `C2`. With `s = jω`:
//!
//! ```text
//! filter     N(s) = R1R2C1C2·s² + R1(C1+C2)·s + 1
//!            D(s) = R1R2C1C2·s² + [R1(1+R2/RL)(C1+C2) + R2C2]·s + (1 + R2/RL)
//!
//! resonator  N(s) = R1R2C1C2·s² + [R1(C1+C2) + R2C1]·s + 1
//!            D(s) = R1R2C1C2·s² + R1(C1+C2)·s + 1
//! ```
//!
//! The resonator models an ideal (nullor) output stage, so the load
//! resistor does not appear in its response.

use std::f32::consts::TAU;

use wide::f32x8;

use super::{CircuitPrimitive, KnobNetwork, ParameterSet, TransferFunction};
use crate::analog::{from_fn_x8, AnalogComplex, AnalogDomain, LANES};

pub const DEFAULT_POSITION: f32 = 0.5;
pub const DEFAULT_CAPACITANCE: f32 = 1e-6;
pub const DEFAULT_LOAD: f32 = 1e4;

const CAPACITANCE_RANGE: (f32, f32) = (1e-9, 1e-3);
const LOAD_RANGE: (f32, f32) = (1.0, 1e6);

fn bridged_t_parameters(
    domain: AnalogDomain,
    tom: f32,
    conga: f32,
    c1: f32,
    c2: f32,
    r_load: f32,
) -> ParameterSet {
    let mut params = ParameterSet::new(domain);
    params.add("tom_position", tom, 0.0, 1.0, true);
    params.add("conga_position", conga, 0.0, 1.0, true);
    params.add("c1", c1, CAPACITANCE_RANGE.0, CAPACITANCE_RANGE.1, false);
    params.add("c2", c2, CAPACITANCE_RANGE.0, CAPACITANCE_RANGE.1, false);
    params.add("r_load", r_load, LOAD_RANGE.0, LOAD_RANGE.1, false);
    params
}

/// Resolved element values.
#[derive(Debug, Clone, Copy)]
struct Elements {
    r1: f32,
    r2: f32,
    c1: f32,
    c2: f32,
    r_load: f32,
}

impl Elements {
    fn from_params(params: &ParameterSet) -> Self {
        let domain = params.domain();
        let knob = |name: &str| KnobNetwork::new(params.value_or_zero(name), domain).resistance();
        Self {
            r1: knob("tom_position"),
            r2: knob("conga_position"),
            c1: params.value_or_zero("c1"),
            c2: params.value_or_zero("c2"),
            r_load: params.value_or_zero("r_load"),
        }
    }

    fn time_constant_product(&self, d: &AnalogDomain) -> f32 {
        d.mul(d.mul(self.r1, self.r2), d.mul(self.c1, self.c2))
    }

    fn r1_c_sum(&self, d: &AnalogDomain) -> f32 {
        d.mul(self.r1, d.add(self.c1, self.c2))
    }

    fn center_frequency(&self, d: &AnalogDomain) -> f32 {
        d.div(1.0, d.mul(TAU, d.sqrt(self.time_constant_product(d))))
    }

    fn quality_factor(&self, d: &AnalogDomain) -> f32 {
        let resistor_ratio = d.sqrt(d.div(self.r2, self.r1));
        let cap_terms = d.add(
            d.sqrt(d.div(self.c1, self.c2)),
            d.sqrt(d.div(self.c2, self.c1)),
        );
        d.div(resistor_ratio, cap_terms)
    }

    fn peak_gain(&self, d: &AnalogDomain) -> f32 {
        let r1_c_sum = self.r1_c_sum(d);
        d.div(d.add(r1_c_sum, d.mul(self.r2, self.c1)), r1_c_sum)
    }

    fn filter(&self, d: &AnalogDomain) -> Biquadratic {
        let s2 = self.time_constant_product(d);
        let r1_c_sum = self.r1_c_sum(d);
        let load = d.add(1.0, d.div(self.r2, self.r_load));
        let den1 = d.add(d.mul(r1_c_sum, load), d.mul(self.r2, self.c2));
        Biquadratic {
            num: [1.0, r1_c_sum, s2],
            den: [load, den1, s2],
        }
    }

    fn resonator(&self, d: &AnalogDomain) -> Biquadratic {
        let s2 = self.time_constant_product(d);
        let r1_c_sum = self.r1_c_sum(d);
        Biquadratic {
            num: [1.0, d.add(r1_c_sum, d.mul(self.r2, self.c1)), s2],
            den: [1.0, r1_c_sum, s2],
        }
    }
}

/// `N(s) / D(s)` with quadratic numerator and denominator, coefficients
/// in ascending powers of `s`.
#[derive(Debug, Clone, Copy)]
struct Biquadratic {
    num: [f32; 3],
    den: [f32; 3],
}

impl Biquadratic {
    fn response(&self, d: &AnalogDomain, frequency: f32) -> AnalogComplex {
        let omega = d.mul(TAU, frequency);
        let s = AnalogComplex::new(0.0, omega, d);
        let s2 = s.mul(s, d);
        let eval = |c: &[f32; 3]| {
            AnalogComplex::new(c[0], 0.0, d)
                .add(s.scale(c[1], d), d)
                .add(s2.scale(c[2], d), d)
        };
        eval(&self.num).div(eval(&self.den), d)
    }

    /// Eight frequencies, one rational function.
    fn response_x8(&self, d: &AnalogDomain, frequencies: f32x8) -> (f32x8, f32x8) {
        let freqs = frequencies.to_array();
        let h: [AnalogComplex; LANES] = std::array::from_fn(|i| self.response(d, freqs[i]));
        (
            from_fn_x8(|i| h[i].magnitude(d)),
            from_fn_x8(|i| h[i].phase(d)),
        )
    }
}

/// Bridged-T notch: passes near DC and far above `f0`, dips around it.
#[derive(Debug, Clone)]
pub struct BridgedTFilter {
    params: ParameterSet,
}

impl BridgedTFilter {
    /// Both knobs centred, 1 µF capacitors, 10 kΩ load.
    pub fn new(domain: AnalogDomain) -> Self {
        Self::with_components(
            domain,
            DEFAULT_POSITION,
            DEFAULT_POSITION,
            DEFAULT_CAPACITANCE,
            DEFAULT_CAPACITANCE,
            DEFAULT_LOAD,
        )
    }

    pub fn with_components(
        domain: AnalogDomain,
        tom: f32,
        conga: f32,
        c1: f32,
        c2: f32,
        r_load: f32,
    ) -> Self {
        Self {
            params: bridged_t_parameters(domain, tom, conga, c1, c2, r_load),
        }
    }

    pub fn tom(&self) -> KnobNetwork {
        KnobNetwork::new(self.params.value_or_zero("tom_position"), self.params.domain())
    }

    pub fn conga(&self) -> KnobNetwork {
        KnobNetwork::new(self.params.value_or_zero("conga_position"), self.params.domain())
    }

    pub fn set_tom_position(&mut self, position: f32) {
        self.params.set("tom_position", position);
    }

    pub fn set_conga_position(&mut self, position: f32) {
        self.params.set("conga_position", position);
    }

    /// Evaluate eight independent filters at once: lane `i` is a filter
    /// with knobs `toms[i]`, `congas[i]` evaluated at `frequencies[i]`.
    ///
    /// Returns magnitude and phase per lane.
    pub fn transfer_function_configs_x8(
        domain: &AnalogDomain,
        toms: f32x8,
        congas: f32x8,
        frequencies: f32x8,
        c1: f32,
        c2: f32,
        r_load: f32,
    ) -> (f32x8, f32x8) {
        let r1 = KnobNetwork::resistance_x8(domain, toms).to_array();
        let r2 = KnobNetwork::resistance_x8(domain, congas).to_array();
        let freqs = frequencies.to_array();

        let h: [AnalogComplex; LANES] = std::array::from_fn(|i| {
            let elements = Elements {
                r1: r1[i],
                r2: r2[i],
                c1,
                c2,
                r_load,
            };
            elements.filter(domain).response(domain, freqs[i])
        });
        (
            from_fn_x8(|i| h[i].magnitude(domain)),
            from_fn_x8(|i| h[i].phase(domain)),
        )
    }

    fn elements(&self) -> Elements {
        Elements::from_params(&self.params)
    }
}

impl TransferFunction for BridgedTFilter {
    fn domain(&self) -> AnalogDomain {
        self.params.domain()
    }

    fn transfer_function(&self, frequency: f32) -> AnalogComplex {
        let d = self.domain();
        self.elements().filter(&d).response(&d, frequency)
    }

    fn transfer_function_x8(&self, frequencies: f32x8) -> (f32x8, f32x8) {
        let d = self.domain();
        self.elements().filter(&d).response_x8(&d, frequencies)
    }
}

impl CircuitPrimitive for BridgedTFilter {
    fn name(&self) -> &str {
        "BridgedTFilter"
    }

    fn parameters(&self) -> &ParameterSet {
        &self.params
    }

    fn parameters_mut(&mut self) -> &mut ParameterSet {
        &mut self.params
    }

    fn center_frequency(&self) -> f32 {
        self.elements().center_frequency(&self.domain())
    }

    fn quality_factor(&self) -> f32 {
        self.elements().quality_factor(&self.domain())
    }

    fn peak_gain(&self) -> f32 {
        self.elements().peak_gain(&self.domain())
    }
}

/// Bridged-T resonator: unity at DC and far above `f0`, peaking at
/// [`peak_gain`](CircuitPrimitive::peak_gain) on `f0`.
#[derive(Debug, Clone)]
pub struct BridgedTResonator {
    params: ParameterSet,
}

impl BridgedTResonator {
    pub fn new(domain: AnalogDomain) -> Self {
        Self::with_components(
            domain,
            DEFAULT_POSITION,
            DEFAULT_POSITION,
            DEFAULT_CAPACITANCE,
            DEFAULT_CAPACITANCE,
            DEFAULT_LOAD,
        )
    }

    pub fn with_components(
        domain: AnalogDomain,
        tom: f32,
        conga: f32,
        c1: f32,
        c2: f32,
        r_load: f32,
    ) -> Self {
        Self {
            params: bridged_t_parameters(domain, tom, conga, c1, c2, r_load),
        }
    }

    pub fn set_tom_position(&mut self, position: f32) {
        self.params.set("tom_position", position);
    }

    pub fn set_conga_position(&mut self, position: f32) {
        self.params.set("conga_position", position);
    }

    fn elements(&self) -> Elements {
        Elements::from_params(&self.params)
    }
}

impl TransferFunction for BridgedTResonator {
    fn domain(&self) -> AnalogDomain {
        self.params.domain()
    }

    fn transfer_function(&self, frequency: f32) -> AnalogComplex {
        let d = self.domain();
        self.elements().resonator(&d).response(&d, frequency)
    }

    fn transfer_function_x8(&self, frequencies: f32x8) -> (f32x8, f32x8) {
        let d = self.domain();
        self.elements().resonator(&d).response_x8(&d, frequencies)
    }
}

impl CircuitPrimitive for BridgedTResonator {
    fn name(&self) -> &str {
        "BridgedTResonator"
    }

    fn parameters(&self) -> &ParameterSet {
        &self.params
    }

    fn parameters_mut(&mut self) -> &mut ParameterSet {
        &mut self.params
    }

    fn center_frequency(&self) -> f32 {
        self.elements().center_frequency(&self.domain())
    }

    fn quality_factor(&self) -> f32 {
        self.elements().quality_factor(&self.domain())
    }

    fn peak_gain(&self) -> f32 {
        self.elements().peak_gain(&self.domain())
    }
}
