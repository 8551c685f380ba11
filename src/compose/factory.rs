//! Name-keyed primitive construction.

use std::collections::HashMap;
use std::fmt;

use tracing::debug;

use crate::analog::AnalogDomain;
use crate::primitives::{
    BridgedTFilter, BridgedTResonator, Primitive, PrimitiveDefinition, VariableResistanceNetwork,
};

/// Builds a fresh primitive in the given domain.
pub type Constructor = Box<dyn Fn(AnalogDomain) -> Primitive + Send + Sync>;

/// Registry of primitive constructors.
///
/// Every constructor receives the factory's domain, so everything a factory
/// builds computes in the same range.
pub struct CircuitFactory {
    creators: HashMap<String, Constructor>,
    domain: AnalogDomain,
}

impl CircuitFactory {
    /// Factory with the built-in primitives registered.
    pub fn new(domain: AnalogDomain) -> Self {
        let mut factory = Self::empty(domain);
        factory.register_primitive("bridged_t_filter", |d| BridgedTFilter::new(d).into());
        factory.register_primitive("bridged_t_resonator", |d| BridgedTResonator::new(d).into());
        factory.register_primitive("variable_resistance", |d| {
            VariableResistanceNetwork::new(0.5, d).into()
        });
        factory
    }

    /// Factory with nothing registered.
    pub fn empty(domain: AnalogDomain) -> Self {
        Self {
            creators: HashMap::new(),
            domain,
        }
    }

    pub fn domain(&self) -> AnalogDomain {
        self.domain
    }

    /// Domain passed to constructors from now on.
    pub fn set_domain(&mut self, domain: AnalogDomain) {
        self.domain = domain;
    }

    /// Register `constructor` under `name`, replacing any previous entry.
    pub fn register_primitive<F>(&mut self, name: &str, constructor: F)
    where
        F: Fn(AnalogDomain) -> Primitive + Send + Sync + 'static,
    {
        if self.creators.contains_key(name) {
            debug!(name, "replacing registered primitive");
        } else {
            debug!(name, "registering primitive");
        }
        self.creators.insert(name.to_string(), Box::new(constructor));
    }

    /// Register a transpiled model under its key. Returns the key.
    pub fn register_definition(&mut self, definition: PrimitiveDefinition) -> String {
        let key = definition.key.clone();
        self.register_primitive(&key, move |d| definition.instantiate(d).into());
        key
    }

    /// Build a primitive, or `None` if `name` is not registered.
    pub fn create(&self, name: &str) -> Option<Primitive> {
        match self.creators.get(name) {
            Some(constructor) => Some(constructor(self.domain)),
            None => {
                debug!(name, "no primitive registered");
                None
            }
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.creators.contains_key(name)
    }

    /// Registered names, sorted.
    pub fn available_primitives(&self) -> Vec<String> {
        let mut names: Vec<String> = self.creators.keys().cloned().collect();
        names.sort();
        names
    }
}

impl Default for CircuitFactory {
    fn default() -> Self {
        Self::new(AnalogDomain::default())
    }
}

impl fmt::Debug for CircuitFactory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CircuitFactory")
            .field("primitives", &self.available_primitives())
            .field("domain", &self.domain)
            .finish()
    }
}
