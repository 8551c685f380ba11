//! Saturating analog value domain.
//!
//! Every arithmetic result in this crate is clamped into a bounded numeric
//! range. The range is selected by an [`AnalogMode`]:
//!
//! | Mode | Keyword | Range |
//! |------|---------|-------|
//! | [`AnalogMode::NarrowInt`] | `int201` | `[-100, 100]` |
//! | [`AnalogMode::WideInt`] | `int2001` | `[-1000, 1000]` |
//! | [`AnalogMode::UnitFloat`] | `float_unit` | `[-1, 1]` |
//! | [`AnalogMode::CustomFloat`] | `float_custom` | `[min, max]` |
//!
//! Integer modes bound the range only; values are never rounded.
//!
//! The domain is a small `Copy` value. Primitives, analyzers and the factory
//! each carry the domain they compute in, so two analyses with different
//! domains never interfere.

mod complex;
mod kernel;
mod simd;

pub use complex::{AnalogComplex, AnalogComplex8};
pub use simd::{from_fn_x8, LANES};

use std::fmt;
use std::str::FromStr;

use tracing::debug;

use crate::error::{BridgetError, Result};

/// Default symmetric bound of the circuit-analysis domain.
///
/// Large enough that ω² stays unsaturated well past the audio band.
pub const CIRCUIT_LIMIT: f32 = 1.0e15;

/// Numeric range selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AnalogMode {
    /// `[-100, 100]`
    NarrowInt,
    /// `[-1000, 1000]`
    WideInt,
    /// `[-1, 1]`
    UnitFloat,
    /// User supplied `[min, max]`
    CustomFloat,
}

impl AnalogMode {
    /// Keyword used on the command line.
    pub fn keyword(&self) -> &'static str {
        match self {
            AnalogMode::NarrowInt => "int201",
            AnalogMode::WideInt => "int2001",
            AnalogMode::UnitFloat => "float_unit",
            AnalogMode::CustomFloat => "float_custom",
        }
    }

    /// Whether the mode models an integer range.
    pub fn is_integer(&self) -> bool {
        matches!(self, AnalogMode::NarrowInt | AnalogMode::WideInt)
    }
}

impl fmt::Display for AnalogMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

impl FromStr for AnalogMode {
    type Err = BridgetError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "int201" => Ok(AnalogMode::NarrowInt),
            "int2001" => Ok(AnalogMode::WideInt),
            "float_unit" => Ok(AnalogMode::UnitFloat),
            "float_custom" => Ok(AnalogMode::CustomFloat),
            other => Err(BridgetError::unknown_mode(other)),
        }
    }
}

/// The active saturation range.
///
/// `custom_min < custom_max` always holds; constructors and
/// [`set_mode`](Self::set_mode) reject anything else and leave the domain
/// untouched.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnalogDomain {
    mode: AnalogMode,
    custom_min: f32,
    custom_max: f32,
}

impl Default for AnalogDomain {
    fn default() -> Self {
        Self {
            mode: AnalogMode::CustomFloat,
            custom_min: -CIRCUIT_LIMIT,
            custom_max: CIRCUIT_LIMIT,
        }
    }
}

impl AnalogDomain {
    /// `[-100, 100]` domain.
    pub fn narrow_int() -> Self {
        Self::fixed(AnalogMode::NarrowInt)
    }

    /// `[-1000, 1000]` domain.
    pub fn wide_int() -> Self {
        Self::fixed(AnalogMode::WideInt)
    }

    /// `[-1, 1]` domain.
    pub fn unit_float() -> Self {
        Self::fixed(AnalogMode::UnitFloat)
    }

    /// Custom float domain. Fails unless `min < max`.
    pub fn custom(min: f32, max: f32) -> Result<Self> {
        let mut domain = Self::default();
        domain.set_mode(AnalogMode::CustomFloat, min, max)?;
        Ok(domain)
    }

    /// Build a domain from a mode keyword; `min`/`max` only matter for
    /// `float_custom`.
    pub fn from_mode_str(mode: &str, min: f32, max: f32) -> Result<Self> {
        let mode: AnalogMode = mode.parse()?;
        let mut domain = Self::default();
        domain.set_mode(mode, min, max)?;
        Ok(domain)
    }

    fn fixed(mode: AnalogMode) -> Self {
        Self {
            mode,
            ..Self::default()
        }
    }

    /// Switch modes. The custom range is validated and stored only for
    /// [`AnalogMode::CustomFloat`].
    pub fn set_mode(&mut self, mode: AnalogMode, min: f32, max: f32) -> Result<()> {
        if mode == AnalogMode::CustomFloat {
            // NaN bounds fail this comparison as well
            if !(min < max) {
                return Err(BridgetError::InvalidRange { min, max });
            }
            self.custom_min = min;
            self.custom_max = max;
        }
        self.mode = mode;
        debug!(mode = %mode, min = self.min(), max = self.max(), "analog mode set");
        Ok(())
    }

    /// Current mode.
    pub fn mode(&self) -> AnalogMode {
        self.mode
    }

    /// Lower bound of the active range.
    pub fn min(&self) -> f32 {
        match self.mode {
            AnalogMode::NarrowInt => -100.0,
            AnalogMode::WideInt => -1000.0,
            AnalogMode::UnitFloat => -1.0,
            AnalogMode::CustomFloat => self.custom_min,
        }
    }

    /// Upper bound of the active range.
    pub fn max(&self) -> f32 {
        match self.mode {
            AnalogMode::NarrowInt => 100.0,
            AnalogMode::WideInt => 1000.0,
            AnalogMode::UnitFloat => 1.0,
            AnalogMode::CustomFloat => self.custom_max,
        }
    }

    /// `max - min`.
    pub fn span(&self) -> f32 {
        self.max() - self.min()
    }

    /// Whether the active mode is one of the integer ranges.
    pub fn is_integer_mode(&self) -> bool {
        self.mode.is_integer()
    }

    /// Saturate `value` into `[min, max]`. NaN saturates to `max`.
    #[inline]
    pub fn clamp(&self, value: f32) -> f32 {
        value.min(self.max()).max(self.min())
    }

    /// Clamp, then zero anything whose magnitude is below `threshold`.
    /// Negative thresholds count as zero.
    pub fn deadzone(&self, value: f32, threshold: f32) -> f32 {
        let threshold = threshold.max(0.0);
        let clamped = self.clamp(value);
        if clamped.abs() < threshold {
            0.0
        } else {
            clamped
        }
    }

    /// Affinely map `value` from `[from_min, from_max]` onto
    /// `[to_min, to_max]`, then clamp. An empty source range is rejected.
    pub fn remap(
        &self,
        value: f32,
        from_min: f32,
        from_max: f32,
        to_min: f32,
        to_max: f32,
    ) -> Result<f32> {
        let from_span = from_max - from_min;
        if from_span == 0.0 {
            return Err(BridgetError::InvalidRange {
                min: from_min,
                max: from_max,
            });
        }
        let t = (value - from_min) / from_span;
        Ok(self.clamp(to_min + t * (to_max - to_min)))
    }

    /// Multi-line status report.
    pub fn status(&self) -> String {
        let mode = match self.mode {
            AnalogMode::CustomFloat => {
                format!("float_custom ({} to {})", self.custom_min, self.custom_max)
            }
            other => other.keyword().to_string(),
        };
        format!("Analog Mode: {}\nMin: {}\nMax: {}", mode, self.min(), self.max())
    }
}
