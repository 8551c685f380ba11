//! 8-lane saturating math kernel.
//!
//! Arithmetic, `sqrt`, `abs` and negation use native [`f32x8`] lane ops.
//! Transcendentals, `pow`, `hypot` and `atan2` unpack the lanes, run the
//! scalar kernel on each and repack, so lane `i` always equals the scalar
//! result for the same inputs.

use wide::{f32x8, CmpEq, CmpLt};

use super::AnalogDomain;

/// Number of lanes processed per vector call.
pub const LANES: usize = 8;

/// Build a vector lane by lane.
#[inline]
pub fn from_fn_x8(f: impl FnMut(usize) -> f32) -> f32x8 {
    f32x8::from(std::array::from_fn::<f32, LANES, _>(f))
}

#[inline]
fn map_lanes(a: f32x8, f: impl Fn(f32) -> f32) -> f32x8 {
    let a = a.to_array();
    from_fn_x8(|i| f(a[i]))
}

#[inline]
fn zip_lanes(a: f32x8, b: f32x8, f: impl Fn(f32, f32) -> f32) -> f32x8 {
    let (a, b) = (a.to_array(), b.to_array());
    from_fn_x8(|i| f(a[i], b[i]))
}

impl AnalogDomain {
    /// Clamp every lane into `[min, max]`.
    #[inline]
    pub fn clamp_x8(&self, v: f32x8) -> f32x8 {
        v.min(f32x8::splat(self.max())).max(f32x8::splat(self.min()))
    }

    #[inline]
    pub fn add_x8(&self, a: f32x8, b: f32x8) -> f32x8 {
        self.clamp_x8(a + b)
    }

    #[inline]
    pub fn sub_x8(&self, a: f32x8, b: f32x8) -> f32x8 {
        self.clamp_x8(a - b)
    }

    #[inline]
    pub fn mul_x8(&self, a: f32x8, b: f32x8) -> f32x8 {
        self.clamp_x8(a * b)
    }

    /// Lane-wise division; lanes with a zero divisor give `clamp(0)`.
    #[inline]
    pub fn div_x8(&self, a: f32x8, b: f32x8) -> f32x8 {
        let zero_lanes = b.cmp_eq(f32x8::ZERO);
        let safe_b = zero_lanes.blend(f32x8::ONE, b);
        let quotient = self.clamp_x8(a / safe_b);
        zero_lanes.blend(f32x8::splat(self.clamp(0.0)), quotient)
    }

    /// Lane-wise square root; negative lanes give `clamp(0)`.
    #[inline]
    pub fn sqrt_x8(&self, a: f32x8) -> f32x8 {
        let negative = a.cmp_lt(f32x8::ZERO);
        let root = self.clamp_x8(a.max(f32x8::ZERO).sqrt());
        negative.blend(f32x8::splat(self.clamp(0.0)), root)
    }

    #[inline]
    pub fn negate_x8(&self, a: f32x8) -> f32x8 {
        self.clamp_x8(-a)
    }

    #[inline]
    pub fn abs_x8(&self, a: f32x8) -> f32x8 {
        self.clamp_x8(a.abs())
    }

    pub fn pow_x8(&self, base: f32x8, exponent: f32x8) -> f32x8 {
        zip_lanes(base, exponent, |b, e| self.pow(b, e))
    }

    pub fn sin_x8(&self, a: f32x8) -> f32x8 {
        map_lanes(a, |x| self.sin(x))
    }

    pub fn cos_x8(&self, a: f32x8) -> f32x8 {
        map_lanes(a, |x| self.cos(x))
    }

    pub fn tan_x8(&self, a: f32x8) -> f32x8 {
        map_lanes(a, |x| self.tan(x))
    }

    pub fn asin_x8(&self, a: f32x8) -> f32x8 {
        map_lanes(a, |x| self.asin(x))
    }

    pub fn acos_x8(&self, a: f32x8) -> f32x8 {
        map_lanes(a, |x| self.acos(x))
    }

    pub fn atan_x8(&self, a: f32x8) -> f32x8 {
        map_lanes(a, |x| self.atan(x))
    }

    pub fn atan2_x8(&self, y: f32x8, x: f32x8) -> f32x8 {
        zip_lanes(y, x, |y, x| self.atan2(y, x))
    }

    pub fn hypot_x8(&self, a: f32x8, b: f32x8) -> f32x8 {
        zip_lanes(a, b, |a, b| self.hypot(a, b))
    }

    pub fn exp_x8(&self, a: f32x8) -> f32x8 {
        map_lanes(a, |x| self.exp(x))
    }

    pub fn log_x8(&self, a: f32x8) -> f32x8 {
        map_lanes(a, |x| self.log(x))
    }

    pub fn log10_x8(&self, a: f32x8) -> f32x8 {
        map_lanes(a, |x| self.log10(x))
    }
}
