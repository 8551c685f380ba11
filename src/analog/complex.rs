//! Complex numbers over the saturating domain.
//!
//! [`AnalogComplex`] holds one value; [`AnalogComplex8`] holds eight in
//! struct-of-arrays form. Both run every intermediate step through the math
//! kernel, in the same order, so a lane of the vector type reproduces the
//! scalar computation exactly.

use wide::{f32x8, CmpEq};

use super::simd::from_fn_x8;
use super::{AnalogDomain, LANES};

/// A complex value with both parts inside the active domain.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct AnalogComplex {
    pub re: f32,
    pub im: f32,
}

impl AnalogComplex {
    /// Clamp both parts into `domain`.
    pub fn new(re: f32, im: f32, domain: &AnalogDomain) -> Self {
        Self {
            re: domain.clamp(re),
            im: domain.clamp(im),
        }
    }

    /// `1 + 0j`.
    pub fn one(domain: &AnalogDomain) -> Self {
        Self::new(1.0, 0.0, domain)
    }

    /// `0 + 0j`.
    pub fn zero(domain: &AnalogDomain) -> Self {
        Self::new(0.0, 0.0, domain)
    }

    /// `magnitude · (cos φ + j sin φ)`.
    pub fn from_polar(magnitude: f32, phase: f32, domain: &AnalogDomain) -> Self {
        Self {
            re: domain.mul(magnitude, domain.cos(phase)),
            im: domain.mul(magnitude, domain.sin(phase)),
        }
    }

    pub fn add(self, rhs: Self, domain: &AnalogDomain) -> Self {
        Self {
            re: domain.add(self.re, rhs.re),
            im: domain.add(self.im, rhs.im),
        }
    }

    pub fn sub(self, rhs: Self, domain: &AnalogDomain) -> Self {
        Self {
            re: domain.sub(self.re, rhs.re),
            im: domain.sub(self.im, rhs.im),
        }
    }

    pub fn mul(self, rhs: Self, domain: &AnalogDomain) -> Self {
        let d = domain;
        Self {
            re: d.sub(d.mul(self.re, rhs.re), d.mul(self.im, rhs.im)),
            im: d.add(d.mul(self.re, rhs.im), d.mul(self.im, rhs.re)),
        }
    }

    /// Complex division. A zero-magnitude denominator yields zero.
    pub fn div(self, rhs: Self, domain: &AnalogDomain) -> Self {
        let d = domain;
        let denom = d.add(d.mul(rhs.re, rhs.re), d.mul(rhs.im, rhs.im));
        if denom == 0.0 {
            return Self::zero(d);
        }
        let re = d.add(d.mul(self.re, rhs.re), d.mul(self.im, rhs.im));
        let im = d.sub(d.mul(self.im, rhs.re), d.mul(self.re, rhs.im));
        Self {
            re: d.div(re, denom),
            im: d.div(im, denom),
        }
    }

    /// Multiply both parts by a real factor.
    pub fn scale(self, factor: f32, domain: &AnalogDomain) -> Self {
        Self {
            re: domain.mul(self.re, factor),
            im: domain.mul(self.im, factor),
        }
    }

    pub fn magnitude(&self, domain: &AnalogDomain) -> f32 {
        domain.hypot(self.re, self.im)
    }

    /// Argument in radians, `(-π, π]`.
    pub fn phase(&self, domain: &AnalogDomain) -> f32 {
        domain.atan2(self.im, self.re)
    }
}

/// Eight complex values, one per lane.
#[derive(Debug, Clone, Copy)]
pub struct AnalogComplex8 {
    pub re: f32x8,
    pub im: f32x8,
}

impl AnalogComplex8 {
    pub fn new(re: f32x8, im: f32x8, domain: &AnalogDomain) -> Self {
        Self {
            re: domain.clamp_x8(re),
            im: domain.clamp_x8(im),
        }
    }

    /// The same value in every lane.
    pub fn splat(z: AnalogComplex) -> Self {
        Self {
            re: f32x8::splat(z.re),
            im: f32x8::splat(z.im),
        }
    }

    pub fn from_lanes(values: [AnalogComplex; LANES]) -> Self {
        Self {
            re: from_fn_x8(|i| values[i].re),
            im: from_fn_x8(|i| values[i].im),
        }
    }

    /// Extract lane `index`. Panics if `index >= LANES`.
    pub fn lane(&self, index: usize) -> AnalogComplex {
        AnalogComplex {
            re: self.re.to_array()[index],
            im: self.im.to_array()[index],
        }
    }

    pub fn add(self, rhs: Self, domain: &AnalogDomain) -> Self {
        Self {
            re: domain.add_x8(self.re, rhs.re),
            im: domain.add_x8(self.im, rhs.im),
        }
    }

    pub fn sub(self, rhs: Self, domain: &AnalogDomain) -> Self {
        Self {
            re: domain.sub_x8(self.re, rhs.re),
            im: domain.sub_x8(self.im, rhs.im),
        }
    }

    pub fn mul(self, rhs: Self, domain: &AnalogDomain) -> Self {
        let d = domain;
        Self {
            re: d.sub_x8(d.mul_x8(self.re, rhs.re), d.mul_x8(self.im, rhs.im)),
            im: d.add_x8(d.mul_x8(self.re, rhs.im), d.mul_x8(self.im, rhs.re)),
        }
    }

    /// Lane-wise complex division; lanes with a zero-magnitude
    /// denominator yield zero.
    pub fn div(self, rhs: Self, domain: &AnalogDomain) -> Self {
        let d = domain;
        let denom = d.add_x8(d.mul_x8(rhs.re, rhs.re), d.mul_x8(rhs.im, rhs.im));
        let re = d.add_x8(d.mul_x8(self.re, rhs.re), d.mul_x8(self.im, rhs.im));
        let im = d.sub_x8(d.mul_x8(self.im, rhs.re), d.mul_x8(self.re, rhs.im));

        let zero_lanes = denom.cmp_eq(f32x8::ZERO);
        let zero = f32x8::splat(d.clamp(0.0));
        Self {
            re: zero_lanes.blend(zero, d.div_x8(re, denom)),
            im: zero_lanes.blend(zero, d.div_x8(im, denom)),
        }
    }

    pub fn magnitude(&self, domain: &AnalogDomain) -> f32x8 {
        domain.hypot_x8(self.re, self.im)
    }

    pub fn phase(&self, domain: &AnalogDomain) -> f32x8 {
        domain.atan2_x8(self.im, self.re)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f32::consts::FRAC_PI_2;

    fn c(re: f32, im: f32) -> AnalogComplex {
        AnalogComplex { re, im }
    }

    #[test]
    fn test_complex_arithmetic() {
        let d = AnalogDomain::default();
        let a = c(1.0, 2.0);
        let b = c(3.0, -1.0);

        assert_eq!(a.add(b, &d), c(4.0, 1.0));
        assert_eq!(a.sub(b, &d), c(-2.0, 3.0));
        assert_eq!(a.mul(b, &d), c(5.0, 5.0));

        let q = a.mul(b, &d).div(b, &d);
        assert_relative_eq!(q.re, 1.0, epsilon = 1e-6);
        assert_relative_eq!(q.im, 2.0, epsilon = 1e-6);
    }

    #[test]
    fn test_division_by_zero_is_zero() {
        let d = AnalogDomain::default();
        let q = c(3.0, 4.0).div(c(0.0, 0.0), &d);
        assert_eq!(q, c(0.0, 0.0));
    }

    #[test]
    fn test_magnitude_and_phase() {
        let d = AnalogDomain::default();
        let z = c(0.0, 2.0);
        assert_relative_eq!(z.magnitude(&d), 2.0);
        assert_relative_eq!(z.phase(&d), FRAC_PI_2);

        let p = AnalogComplex::from_polar(2.0, FRAC_PI_2, &d);
        assert_relative_eq!(p.re, 0.0, epsilon = 1e-6);
        assert_relative_eq!(p.im, 2.0, epsilon = 1e-6);
    }

    #[test]
    fn test_clamped_magnitude_is_bounded() {
        let d = AnalogDomain::narrow_int();
        let z = AnalogComplex::new(500.0, -500.0, &d);
        assert_eq!(z, c(100.0, -100.0));
        assert_eq!(z.magnitude(&d), 100.0);
        assert!(z.mul(z, &d).magnitude(&d) <= 100.0);
    }

    #[test]
    fn test_lanes_match_scalar() {
        let d = AnalogDomain::default();
        let a: [AnalogComplex; LANES] =
            std::array::from_fn(|i| c(i as f32 - 3.0, 0.5 * i as f32));
        let b: [AnalogComplex; LANES] =
            std::array::from_fn(|i| if i == 2 { c(0.0, 0.0) } else { c(1.5, i as f32 - 4.0) });

        let a8 = AnalogComplex8::from_lanes(a);
        let b8 = AnalogComplex8::from_lanes(b);
        let product = a8.mul(b8, &d);
        let quotient = a8.div(b8, &d);
        let magnitude = quotient.magnitude(&d).to_array();
        let phase = product.phase(&d).to_array();

        for i in 0..LANES {
            assert_eq!(product.lane(i), a[i].mul(b[i], &d));
            assert_eq!(quotient.lane(i), a[i].div(b[i], &d));
            assert_eq!(magnitude[i], a[i].div(b[i], &d).magnitude(&d));
            assert_eq!(phase[i], a[i].mul(b[i], &d).phase(&d));
        }
        assert_eq!(quotient.lane(2), c(0.0, 0.0));
    }
}
