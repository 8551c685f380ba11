//! Many primitives over one shared frequency grid.

use tracing::info_span;

use crate::analog::{from_fn_x8, AnalogDomain, LANES};
use crate::analysis::{log_sweep, to_bode};
use crate::primitives::{CircuitPrimitive, Primitive, TransferFunction};

/// Result of [`BatchAnalyzer::analyze_batch`]. Row `k` of
/// `magnitudes_db`/`phases_deg` belongs to the `k`-th added circuit and is
/// index-aligned with `frequencies`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BatchResult {
    pub frequencies: Vec<f32>,
    pub magnitudes_db: Vec<Vec<f32>>,
    pub phases_deg: Vec<Vec<f32>>,
}

/// Owns a heterogeneous set of primitives and sweeps them together.
#[derive(Debug, Clone)]
pub struct BatchAnalyzer {
    circuits: Vec<Primitive>,
    domain: AnalogDomain,
}

impl BatchAnalyzer {
    pub fn new(domain: AnalogDomain) -> Self {
        Self {
            circuits: Vec::new(),
            domain,
        }
    }

    /// Add a circuit, moving it into the batch's domain.
    pub fn add_circuit(&mut self, circuit: impl Into<Primitive>) {
        let mut circuit = circuit.into();
        circuit.set_domain(self.domain);
        self.circuits.push(circuit);
    }

    pub fn circuits(&self) -> &[Primitive] {
        &self.circuits
    }

    pub fn len(&self) -> usize {
        self.circuits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.circuits.is_empty()
    }

    /// Sweep every circuit over the same logarithmic grid.
    ///
    /// Whole blocks of eight frequencies use the vector path; the tail is
    /// evaluated one frequency at a time.
    pub fn analyze_batch(&self, start: f32, end: f32, n_points: usize) -> BatchResult {
        let _span = info_span!("batch_analysis", circuits = self.circuits.len(), n_points).entered();
        let d = &self.domain;
        let frequencies = log_sweep(d, start, end, n_points);

        let mut magnitudes_db = Vec::with_capacity(self.circuits.len());
        let mut phases_deg = Vec::with_capacity(self.circuits.len());

        for circuit in &self.circuits {
            let mut magnitude = Vec::with_capacity(n_points);
            let mut phase = Vec::with_capacity(n_points);

            let mut blocks = frequencies.chunks_exact(LANES);
            for block in &mut blocks {
                let (m, p) = circuit.transfer_function_x8(from_fn_x8(|i| block[i]));
                let (m, p) = (m.to_array(), p.to_array());
                for i in 0..LANES {
                    let (db, deg) = to_bode(d, m[i], p[i]);
                    magnitude.push(db);
                    phase.push(deg);
                }
            }
            for &f in blocks.remainder() {
                let h = circuit.transfer_function(f);
                let (db, deg) = to_bode(d, h.magnitude(d), h.phase(d));
                magnitude.push(db);
                phase.push(deg);
            }

            magnitudes_db.push(magnitude);
            phases_deg.push(phase);
        }

        BatchResult {
            frequencies,
            magnitudes_db,
            phases_deg,
        }
    }
}
