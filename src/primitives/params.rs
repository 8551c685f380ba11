//! Named, bounded circuit parameters.

use std::collections::HashMap;

use crate::analog::AnalogDomain;

/// A single parameter with hard bounds.
///
/// `min <= value <= max` holds after every setter: the value is first
/// saturated into the domain, then into the parameter's own bounds.
///
/// The bounded request is kept apart from the domain-clamped value so a
/// narrow domain never overwrites it; [`rehome`](Self::rehome) recomputes
/// the value when the domain changes.
#[derive(Debug, Clone, PartialEq)]
pub struct CircuitParameter {
    pub name: String,
    value: f32,
    requested: f32,
    pub min: f32,
    pub max: f32,
    /// Intended for real-time adjustment (a front-panel knob).
    pub is_knob: bool,
}

impl CircuitParameter {
    /// Create a parameter; the initial value is clamped like any other set.
    pub fn new(
        name: impl Into<String>,
        value: f32,
        min: f32,
        max: f32,
        is_knob: bool,
        domain: &AnalogDomain,
    ) -> Self {
        let mut param = Self {
            name: name.into(),
            value: min,
            requested: min,
            min,
            max,
            is_knob,
        };
        param.set_value(value, domain);
        param
    }

    pub fn value(&self) -> f32 {
        self.value
    }

    pub fn set_value(&mut self, value: f32, domain: &AnalogDomain) {
        self.requested = value.max(self.min).min(self.max);
        self.rehome(domain);
    }

    /// Re-clamp the last requested value into `domain`.
    pub fn rehome(&mut self, domain: &AnalogDomain) {
        self.value = domain.clamp(self.requested).max(self.min).min(self.max);
    }

    /// Position of the value inside `[min, max]`, in `[0, 1]`.
    pub fn normalized(&self) -> f32 {
        let span = self.max - self.min;
        if span == 0.0 {
            return 0.0;
        }
        (self.value - self.min) / span
    }

    /// Set from a `[0, 1]` position; out-of-range input is clamped first.
    pub fn set_normalized(&mut self, normalized: f32, domain: &AnalogDomain) {
        let t = normalized.clamp(0.0, 1.0);
        self.set_value(self.min + t * (self.max - self.min), domain);
    }
}

/// Unique-keyed parameter collection plus the domain it clamps into.
#[derive(Debug, Clone, Default)]
pub struct ParameterSet {
    params: HashMap<String, CircuitParameter>,
    domain: AnalogDomain,
}

impl ParameterSet {
    pub fn new(domain: AnalogDomain) -> Self {
        Self {
            params: HashMap::new(),
            domain,
        }
    }

    pub fn domain(&self) -> AnalogDomain {
        self.domain
    }

    /// Switch domains and re-clamp every parameter from its requested value.
    ///
    /// Switching to a narrow domain and back restores the original values.
    pub fn set_domain(&mut self, domain: AnalogDomain) {
        self.domain = domain;
        for param in self.params.values_mut() {
            param.rehome(&domain);
        }
    }

    /// Add or replace a parameter.
    pub fn add(&mut self, name: &str, value: f32, min: f32, max: f32, is_knob: bool) {
        let param = CircuitParameter::new(name, value, min, max, is_knob, &self.domain);
        self.params.insert(name.to_string(), param);
    }

    /// Set a value. Returns `false` when `name` is unknown.
    pub fn set(&mut self, name: &str, value: f32) -> bool {
        match self.params.get_mut(name) {
            Some(param) => {
                param.set_value(value, &self.domain);
                true
            }
            None => false,
        }
    }

    pub fn value(&self, name: &str) -> Option<f32> {
        self.params.get(name).map(CircuitParameter::value)
    }

    /// Value of `name`, or `0.0` if it does not exist.
    pub fn value_or_zero(&self, name: &str) -> f32 {
        self.value(name).unwrap_or(0.0)
    }

    pub fn set_normalized(&mut self, name: &str, normalized: f32) -> bool {
        match self.params.get_mut(name) {
            Some(param) => {
                param.set_normalized(normalized, &self.domain);
                true
            }
            None => false,
        }
    }

    pub fn normalized(&self, name: &str) -> Option<f32> {
        self.params.get(name).map(CircuitParameter::normalized)
    }

    pub fn get(&self, name: &str) -> Option<&CircuitParameter> {
        self.params.get(name)
    }

    /// Names of knob parameters, sorted.
    pub fn knob_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self
            .params
            .values()
            .filter(|p| p.is_knob)
            .map(|p| p.name.as_str())
            .collect();
        names.sort_unstable();
        names
    }

    /// All parameters, sorted by name.
    pub fn iter_sorted(&self) -> Vec<&CircuitParameter> {
        let mut params: Vec<&CircuitParameter> = self.params.values().collect();
        params.sort_by(|a, b| a.name.cmp(&b.name));
        params
    }

    pub fn len(&self) -> usize {
        self.params.len()
    }

    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_parameter_bounds_hold() {
        let d = AnalogDomain::default();
        let mut p = CircuitParameter::new("c1", 5.0, 1e-9, 1e-3, false, &d);
        assert_eq!(p.value(), 1e-3);

        p.set_value(-1.0, &d);
        assert_eq!(p.value(), 1e-9);

        p.set_value(1e-6, &d);
        assert_eq!(p.value(), 1e-6);
    }

    #[test]
    fn test_parameter_bounds_win_over_domain() {
        // domain [-1, 1] would allow 0, the parameter does not
        let d = AnalogDomain::unit_float();
        let p = CircuitParameter::new("r_load", 0.0, 1.0, 1e6, false, &d);
        assert_eq!(p.value(), 1.0);
    }

    #[test]
    fn test_normalized_round_trip() {
        let d = AnalogDomain::default();
        let mut p = CircuitParameter::new("gain", 0.0, -10.0, 30.0, true, &d);
        p.set_normalized(0.25, &d);
        assert_relative_eq!(p.value(), 0.0);
        assert_relative_eq!(p.normalized(), 0.25);

        p.set_normalized(3.0, &d);
        assert_eq!(p.value(), 30.0);
        p.set_normalized(-3.0, &d);
        assert_eq!(p.value(), -10.0);
    }

    #[test]
    fn test_degenerate_range_normalizes_to_zero() {
        let d = AnalogDomain::default();
        let p = CircuitParameter::new("fixed", 2.0, 2.0, 2.0, false, &d);
        assert_eq!(p.normalized(), 0.0);
    }

    #[test]
    fn test_parameter_set() {
        let mut set = ParameterSet::new(AnalogDomain::default());
        set.add("tom_position", 0.5, 0.0, 1.0, true);
        set.add("c1", 1e-6, 1e-9, 1e-3, false);

        assert!(set.set("tom_position", 2.0));
        assert_eq!(set.value("tom_position"), Some(1.0));
        assert!(!set.set("missing", 1.0));
        assert_eq!(set.value("missing"), None);
        assert_eq!(set.value_or_zero("missing"), 0.0);
        assert_eq!(set.knob_names(), vec!["tom_position"]);
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn test_set_domain_reclamps() {
        let mut set = ParameterSet::new(AnalogDomain::default());
        set.add("offset", 50.0, -100.0, 100.0, false);
        set.set_domain(AnalogDomain::unit_float());
        assert_eq!(set.value("offset"), Some(1.0));
    }

    #[test]
    fn test_narrow_domain_round_trip_restores_values() {
        let mut set = ParameterSet::new(AnalogDomain::default());
        set.add("r_load", 1e4, 1.0, 1e6, false);
        set.add("offset", -50.0, -100.0, 100.0, false);

        set.set_domain(AnalogDomain::unit_float());
        assert_eq!(set.value("r_load"), Some(1.0));
        assert_eq!(set.value("offset"), Some(-1.0));

        set.set_domain(AnalogDomain::default());
        assert_eq!(set.value("r_load"), Some(1e4));
        assert_eq!(set.value("offset"), Some(-50.0));
    }

    #[test]
    fn test_set_in_narrow_domain_is_remembered() {
        let mut set = ParameterSet::new(AnalogDomain::unit_float());
        set.add("gain", 0.0, -10.0, 10.0, false);
        assert!(set.set("gain", 5.0));
        assert_eq!(set.value("gain"), Some(1.0));

        set.set_domain(AnalogDomain::default());
        assert_eq!(set.value("gain"), Some(5.0));
    }
}
