//! Bridget - analog circuit computing console
//!
//! Interactive frequency-response explorer for a bridged-T drum voice.
//!
//! # Usage
//!
//! ```bash
//! bridget --mode float_custom --min -1e6 --max 1e6 --model Resistor.mo
//! bridget --model Capacitor.mo --emit > capacitor.rs
//! RUST_LOG=bridget_core=debug bridget
//! ```

use std::io;
use std::path::PathBuf;

use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use bridget_core::{
    analog::{AnalogDomain, CIRCUIT_LIMIT},
    error::Result,
    modelica, repl,
    session::{AnalogSession, SessionConfig},
};

/// Analog circuit computing console
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Analog mode: int201, int2001, float_unit or float_custom
    #[arg(long, default_value = "float_custom")]
    mode: String,

    /// Lower bound for float_custom
    #[arg(long, default_value_t = -CIRCUIT_LIMIT, allow_negative_numbers = true)]
    min: f32,

    /// Upper bound for float_custom
    #[arg(long, default_value_t = CIRCUIT_LIMIT, allow_negative_numbers = true)]
    max: f32,

    /// Model file to transpile and register (repeatable)
    #[arg(long = "model", value_name = "FILE")]
    models: Vec<PathBuf>,

    /// Print the generated Rust source for every --model and exit
    #[arg(long)]
    emit: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();

    let domain = AnalogDomain::from_mode_str(&args.mode, args.min, args.max)?;
    let mut session = AnalogSession::new(SessionConfig::new().with_domain(domain));

    for path in &args.models {
        let component = modelica::parse_file(path)?;
        let definition = modelica::generate_circuit_primitive(&component)?;
        if args.emit {
            print!("{}", modelica::emit_rust_source(&definition));
            continue;
        }
        let key = session.register_definition(definition);
        info!(path = %path.display(), key = %key, "registered model");
    }
    if args.emit {
        return Ok(());
    }

    let stdin = io::stdin();
    repl::run(&mut session, stdin.lock(), io::stdout())
}
