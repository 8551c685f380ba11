//! Frequency response of a single transfer function.

use tracing::info_span;

use super::{log_sweep, to_bode, BodeData};
use crate::analog::{from_fn_x8, AnalogComplex, AnalogDomain, LANES};
use crate::primitives::TransferFunction;

/// Sweeps a transfer function and keeps the last result.
///
/// `frequencies` and `response` are index-aligned and replaced wholesale by
/// every call to [`analyze`](Self::analyze) or
/// [`analyze_simd`](Self::analyze_simd). Each run adopts the domain of the
/// object it analyzes.
#[derive(Debug, Clone, Default)]
pub struct FrequencyResponseAnalyzer {
    frequencies: Vec<f32>,
    response: Vec<AnalogComplex>,
    domain: AnalogDomain,
}

impl FrequencyResponseAnalyzer {
    pub fn new() -> Self {
        Self::default()
    }

    /// One scalar evaluation per sweep point.
    pub fn analyze<T: TransferFunction + ?Sized>(
        &mut self,
        tf: &T,
        start: f32,
        end: f32,
        n_points: usize,
    ) {
        let _span = info_span!("frequency_response", n_points, simd = false).entered();
        self.domain = tf.domain();
        self.frequencies = log_sweep(&self.domain, start, end, n_points);
        self.response = self
            .frequencies
            .iter()
            .map(|&f| tf.transfer_function(f))
            .collect();
    }

    /// Full blocks of eight go through the vector path, the remainder
    /// through the scalar path.
    pub fn analyze_simd<T: TransferFunction + ?Sized>(
        &mut self,
        tf: &T,
        start: f32,
        end: f32,
        n_points: usize,
    ) {
        let _span = info_span!("frequency_response", n_points, simd = true).entered();
        let d = tf.domain();
        self.domain = d;
        self.frequencies = log_sweep(&d, start, end, n_points);
        self.response = Vec::with_capacity(n_points);

        let mut blocks = self.frequencies.chunks_exact(LANES);
        for block in &mut blocks {
            let (magnitude, phase) = tf.transfer_function_x8(from_fn_x8(|i| block[i]));
            let (magnitude, phase) = (magnitude.to_array(), phase.to_array());
            self.response.extend(
                (0..LANES).map(|i| AnalogComplex::from_polar(magnitude[i], phase[i], &d)),
            );
        }
        for &f in blocks.remainder() {
            self.response.push(tf.transfer_function(f));
        }
    }

    pub fn frequencies(&self) -> &[f32] {
        &self.frequencies
    }

    pub fn response(&self) -> &[AnalogComplex] {
        &self.response
    }

    /// Magnitude in dB and phase in degrees for the last run.
    pub fn bode_data(&self) -> BodeData {
        let d = &self.domain;
        let (magnitude_db, phase_deg) = self
            .response
            .iter()
            .map(|h| to_bode(d, h.magnitude(d), h.phase(d)))
            .unzip();
        BodeData {
            frequencies: self.frequencies.clone(),
            magnitude_db,
            phase_deg,
        }
    }
}
