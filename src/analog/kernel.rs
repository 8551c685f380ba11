//! Scalar saturating math kernel.
//!
//! Each operation computes the IEEE result and clamps it into the domain.
//! Nothing here panics: division by zero yields `clamp(0)`, out-of-range
//! inverse-trig arguments are clamped to `[-1, 1]`, and negative square
//! roots yield `clamp(0)`.

use super::AnalogDomain;

impl AnalogDomain {
    #[inline]
    pub fn add(&self, a: f32, b: f32) -> f32 {
        self.clamp(a + b)
    }

    #[inline]
    pub fn sub(&self, a: f32, b: f32) -> f32 {
        self.clamp(a - b)
    }

    #[inline]
    pub fn mul(&self, a: f32, b: f32) -> f32 {
        self.clamp(a * b)
    }

    /// `a / b`, or `clamp(0)` when `b == 0`.
    #[inline]
    pub fn div(&self, a: f32, b: f32) -> f32 {
        if b == 0.0 {
            return self.clamp(0.0);
        }
        self.clamp(a / b)
    }

    /// Square root; negative inputs give `clamp(0)`.
    #[inline]
    pub fn sqrt(&self, a: f32) -> f32 {
        if a < 0.0 {
            return self.clamp(0.0);
        }
        self.clamp(a.sqrt())
    }

    #[inline]
    pub fn pow(&self, base: f32, exponent: f32) -> f32 {
        self.clamp(base.powf(exponent))
    }

    #[inline]
    pub fn sin(&self, a: f32) -> f32 {
        self.clamp(a.sin())
    }

    #[inline]
    pub fn cos(&self, a: f32) -> f32 {
        self.clamp(a.cos())
    }

    #[inline]
    pub fn tan(&self, a: f32) -> f32 {
        self.clamp(a.tan())
    }

    #[inline]
    pub fn asin(&self, a: f32) -> f32 {
        self.clamp(a.clamp(-1.0, 1.0).asin())
    }

    #[inline]
    pub fn acos(&self, a: f32) -> f32 {
        self.clamp(a.clamp(-1.0, 1.0).acos())
    }

    #[inline]
    pub fn atan(&self, a: f32) -> f32 {
        self.clamp(a.atan())
    }

    /// Four-quadrant arctangent of `y / x`.
    #[inline]
    pub fn atan2(&self, y: f32, x: f32) -> f32 {
        self.clamp(y.atan2(x))
    }

    #[inline]
    pub fn hypot(&self, a: f32, b: f32) -> f32 {
        self.clamp(a.hypot(b))
    }

    #[inline]
    pub fn exp(&self, a: f32) -> f32 {
        self.clamp(a.exp())
    }

    /// Natural logarithm. `log(0)` saturates to the domain minimum.
    #[inline]
    pub fn log(&self, a: f32) -> f32 {
        self.clamp(a.ln())
    }

    #[inline]
    pub fn log10(&self, a: f32) -> f32 {
        self.clamp(a.log10())
    }

    #[inline]
    pub fn negate(&self, a: f32) -> f32 {
        self.clamp(-a)
    }

    #[inline]
    pub fn abs(&self, a: f32) -> f32 {
        self.clamp(a.abs())
    }
}

#[cfg(test)]
mod tests {
    use crate::analog::AnalogDomain;
    use approx::assert_relative_eq;
    use std::f32::consts::PI;

    #[test]
    fn test_saturating_arithmetic() {
        let d = AnalogDomain::narrow_int();
        assert_eq!(d.add(80.0, 50.0), 100.0);
        assert_eq!(d.sub(-80.0, 50.0), -100.0);
        assert_eq!(d.mul(20.0, 20.0), 100.0);
        assert_eq!(d.mul(3.0, 4.0), 12.0);
        assert_eq!(d.negate(-120.0), 100.0);
        assert_eq!(d.abs(-7.5), 7.5);
    }

    #[test]
    fn test_division_by_zero() {
        let d = AnalogDomain::unit_float();
        assert_eq!(d.div(1.0, 0.0), 0.0);
        assert_eq!(d.div(-1.0, 0.0), 0.0);
        assert_eq!(d.div(1.0, 4.0), 0.25);
        assert_eq!(d.div(1.0, 1e-9), 1.0);

        // zero outside the range saturates to the nearest bound
        let shifted = AnalogDomain::custom(5.0, 10.0).unwrap();
        assert_eq!(shifted.div(1.0, 0.0), 5.0);
    }

    #[test]
    fn test_sqrt_negative() {
        let d = AnalogDomain::default();
        assert_eq!(d.sqrt(-4.0), 0.0);
        assert_eq!(d.sqrt(16.0), 4.0);
    }

    #[test]
    fn test_inverse_trig_domain() {
        let d = AnalogDomain::default();
        assert_relative_eq!(d.asin(2.0), PI / 2.0);
        assert_relative_eq!(d.asin(-3.0), -PI / 2.0);
        assert_relative_eq!(d.acos(5.0), 0.0);
        assert_relative_eq!(d.acos(-5.0), PI);
        assert!(!d.asin(f32::MAX).is_nan());
    }

    #[test]
    fn test_transcendental_saturation() {
        let d = AnalogDomain::narrow_int();
        assert_eq!(d.exp(50.0), 100.0);
        assert_eq!(d.log(0.0), -100.0);
        assert_eq!(d.log10(0.0), -100.0);
        assert_eq!(d.pow(10.0, 3.0), 100.0);
        assert_relative_eq!(d.log10(1000.0), 3.0, epsilon = 1e-5);
        assert_relative_eq!(d.hypot(3.0, 4.0), 5.0);
        assert_relative_eq!(d.atan2(1.0, 1.0), PI / 4.0, epsilon = 1e-6);
    }

    #[test]
    fn test_results_stay_in_unit_domain() {
        let d = AnalogDomain::unit_float();
        let inputs = [-1e9_f32, -2.0, -0.5, 0.0, 0.3, 1.0, 7.0, 1e9];
        for &a in &inputs {
            for &b in &inputs {
                for v in [
                    d.add(a, b),
                    d.sub(a, b),
                    d.mul(a, b),
                    d.div(a, b),
                    d.pow(a, b),
                    d.atan2(a, b),
                    d.hypot(a, b),
                    d.sqrt(a),
                    d.tan(a),
                    d.exp(a),
                    d.log(a),
                ] {
                    assert!((-1.0..=1.0).contains(&v), "{v} escaped the domain");
                }
            }
        }
    }
}
