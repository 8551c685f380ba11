//! Frequency sweeps and Bode post-processing.
//!
//! Sweep points are logarithmically spaced and computed entirely through
//! the saturating kernel:
//!
//! ```text
//! f_i = exp(ln f_start + i/(n−1) · (ln f_end − ln f_start))
//! ```

mod response;

pub use response::FrequencyResponseAnalyzer;

use std::f32::consts::PI;

use tracing::warn;

use crate::analog::AnalogDomain;

/// Default sweep start, Hz.
pub const DEFAULT_START_FREQUENCY: f32 = 10.0;
/// Default sweep end, Hz.
pub const DEFAULT_END_FREQUENCY: f32 = 10_000.0;
/// Default number of sweep points.
pub const DEFAULT_POINTS: usize = 1000;

/// Logarithmically spaced frequencies from `start` to `end`.
///
/// `n == 0` gives an empty sweep. `n == 1` saturates the `0/0` step to
/// zero, so the single point is `start`.
pub fn log_sweep(domain: &AnalogDomain, start: f32, end: f32, n: usize) -> Vec<f32> {
    let d = domain;
    if n == 1 {
        warn!(start, end, "single-point sweep collapses to the start frequency");
    }
    let log_start = d.log(start);
    let log_span = d.sub(d.log(end), log_start);
    let last = n.saturating_sub(1) as f32;
    (0..n)
        .map(|i| {
            let t = d.div(i as f32, last);
            d.exp(d.add(log_start, d.mul(t, log_span)))
        })
        .collect()
}

/// `20·log10(|H|)` dB and `phase·180/π` degrees, both saturated.
#[inline]
pub fn to_bode(domain: &AnalogDomain, magnitude: f32, phase: f32) -> (f32, f32) {
    let d = domain;
    (
        d.mul(20.0, d.log10(magnitude)),
        d.mul(phase, 180.0 / PI),
    )
}

/// Bode plot series, index-aligned with `frequencies`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BodeData {
    pub frequencies: Vec<f32>,
    pub magnitude_db: Vec<f32>,
    pub phase_deg: Vec<f32>,
}

impl BodeData {
    pub fn len(&self) -> usize {
        self.frequencies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frequencies.is_empty()
    }

    /// `(frequency, dB, degrees)` rows.
    pub fn points(&self) -> impl Iterator<Item = (f32, f32, f32)> + '_ {
        self.frequencies
            .iter()
            .zip(&self.magnitude_db)
            .zip(&self.phase_deg)
            .map(|((&f, &m), &p)| (f, m, p))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_sweep_endpoints() {
        let d = AnalogDomain::default();
        for n in [2, 3, 10, 1000] {
            let f = log_sweep(&d, 10.0, 10_000.0, n);
            assert_eq!(f.len(), n);
            assert_relative_eq!(f[0], 10.0, max_relative = 1e-5);
            assert_relative_eq!(f[n - 1], 10_000.0, max_relative = 1e-5);
        }
    }

    #[test]
    fn test_sweep_is_logarithmic() {
        let d = AnalogDomain::default();
        let f = log_sweep(&d, 10.0, 10_000.0, 4);
        assert_relative_eq!(f[1], 100.0, max_relative = 1e-4);
        assert_relative_eq!(f[2], 1000.0, max_relative = 1e-4);
        assert!(f.windows(2).all(|w| w[1] > w[0]));
    }

    #[test]
    fn test_degenerate_sweeps() {
        let d = AnalogDomain::default();
        assert!(log_sweep(&d, 10.0, 10_000.0, 0).is_empty());

        let single = log_sweep(&d, 20.0, 20_000.0, 1);
        assert_eq!(single.len(), 1);
        assert_relative_eq!(single[0], 20.0, max_relative = 1e-5);
    }

    #[test]
    fn test_to_bode() {
        let d = AnalogDomain::default();
        let (db, deg) = to_bode(&d, 10.0, PI / 2.0);
        assert_relative_eq!(db, 20.0, max_relative = 1e-5);
        assert_relative_eq!(deg, 90.0, max_relative = 1e-5);

        let (db, _) = to_bode(&AnalogDomain::narrow_int(), 0.0, 0.0);
        assert_eq!(db, -100.0);
    }
}
