//! WASM bindings for Bridget Core.
//!
//! Exposes the text command session to JavaScript.
//!
//! ## Usage (JavaScript)
//!
//! ```javascript
//! import init, { WasmAnalogSession } from 'bridget_core';
//!
//! await init();
//!
//! const session = new WasmAnalogSession();
//! session.execute("tom 0.25");
//! const report = session.execute("analyze");
//! ```

use wasm_bindgen::prelude::*;

use crate::analog::AnalogDomain;
use crate::error::BridgetError;
use crate::modelica;
use crate::session::{AnalogSession, CommandOutcome, SessionConfig};

/// Initialize panic hook for better error messages in browser console.
#[wasm_bindgen(start)]
pub fn init_panic_hook() {
    console_error_panic_hook::set_once();
}

fn to_js(error: BridgetError) -> JsValue {
    JsValue::from_str(&error.to_string())
}

/// Browser-side analog session.
#[wasm_bindgen]
pub struct WasmAnalogSession {
    session: AnalogSession,
    closed: bool,
}

#[wasm_bindgen]
impl WasmAnalogSession {
    /// Create a session in the default wide domain.
    #[wasm_bindgen(constructor)]
    pub fn new() -> WasmAnalogSession {
        Self {
            session: AnalogSession::default(),
            closed: false,
        }
    }

    /// Create a session in a specific analog mode.
    ///
    /// # Arguments
    /// * `mode` - `int201`, `int2001`, `float_unit` or `float_custom`
    /// * `min`, `max` - bounds for `float_custom`
    #[wasm_bindgen]
    pub fn with_mode(mode: &str, min: f32, max: f32) -> Result<WasmAnalogSession, JsValue> {
        let domain = AnalogDomain::from_mode_str(mode, min, max).map_err(to_js)?;
        Ok(Self {
            session: AnalogSession::new(SessionConfig::new().with_domain(domain)),
            closed: false,
        })
    }

    /// Run one command line and return its report.
    ///
    /// After `exit` the session stays usable; [`closed`](Self::closed)
    /// turns true so the page can tear down its console.
    #[wasm_bindgen]
    pub fn execute(&mut self, line: &str) -> Result<String, JsValue> {
        match self.session.execute(line).map_err(to_js)? {
            CommandOutcome::Continue(text) => Ok(text),
            CommandOutcome::Exit => {
                self.closed = true;
                Ok(String::new())
            }
        }
    }

    /// Transpile model source and register it; returns the factory key.
    #[wasm_bindgen]
    pub fn register_model(&mut self, source: &str) -> Result<String, JsValue> {
        let definition = modelica::transpile(source).map_err(to_js)?;
        Ok(self.session.register_definition(definition))
    }

    /// Rust source generated for a model.
    #[wasm_bindgen]
    pub fn emit_model(source: &str) -> Result<String, JsValue> {
        let definition = modelica::transpile(source).map_err(to_js)?;
        Ok(modelica::emit_rust_source(&definition))
    }

    /// Whether `exit` or `quit` has been executed.
    #[wasm_bindgen(getter)]
    pub fn closed(&self) -> bool {
        self.closed
    }

    /// Greeting with the command list.
    #[wasm_bindgen]
    pub fn banner(&self) -> String {
        self.session.banner()
    }
}

impl Default for WasmAnalogSession {
    fn default() -> Self {
        Self::new()
    }
}

/// Get the library version.
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
