//! Command vocabulary of the analog session.

use std::time::Instant;

use super::value::argument;
use super::{AnalogSession, CommandOutcome};
use crate::analog::AnalogMode;
use crate::error::{BridgetError, Result};
use crate::primitives::{CircuitPrimitive, KnobNetwork};

/// One session command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// `tom <pos>`
    Tom,
    /// `conga <pos>`
    Conga,
    /// Scalar sweep with a short preview.
    Analyze,
    /// Timed eight-lane sweep.
    SimdTest,
    /// Closed-form filter figures.
    Params,
    /// List factory keys.
    Primitives,
    AnalogStatus,
    /// `analog_mode <mode> [min max]`
    AnalogMode,
    AnalogRange,
    /// `analog_clamp <v>`
    AnalogClamp,
    AnalogIsInt,
    AnalogScaleQuery,
    /// `analog_deadzone <v> <threshold>`
    AnalogDeadzone,
    /// `analog_remap <v> <from_min> <from_max> <to_min> <to_max>`
    AnalogRemap,
    /// `exit` or `quit`
    Exit,
}

impl Command {
    /// Every command, in help order.
    pub const ALL: [Command; 15] = [
        Command::Tom,
        Command::Conga,
        Command::Analyze,
        Command::Params,
        Command::SimdTest,
        Command::Primitives,
        Command::AnalogStatus,
        Command::AnalogMode,
        Command::AnalogRange,
        Command::AnalogClamp,
        Command::AnalogIsInt,
        Command::AnalogScaleQuery,
        Command::AnalogDeadzone,
        Command::AnalogRemap,
        Command::Exit,
    ];

    /// Parse a command from its keyword.
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        match keyword {
            "tom" => Some(Self::Tom),
            "conga" => Some(Self::Conga),
            "analyze" => Some(Self::Analyze),
            "simd_test" => Some(Self::SimdTest),
            "params" => Some(Self::Params),
            "primitives" => Some(Self::Primitives),
            "analog_status" => Some(Self::AnalogStatus),
            "analog_mode" => Some(Self::AnalogMode),
            "analog_range" => Some(Self::AnalogRange),
            "analog_clamp" => Some(Self::AnalogClamp),
            "analog_isint" => Some(Self::AnalogIsInt),
            "analog_scalequery" => Some(Self::AnalogScaleQuery),
            "analog_deadzone" => Some(Self::AnalogDeadzone),
            "analog_remap" => Some(Self::AnalogRemap),
            "exit" | "quit" => Some(Self::Exit),
            _ => None,
        }
    }

    pub fn keyword(&self) -> &'static str {
        match self {
            Self::Tom => "tom",
            Self::Conga => "conga",
            Self::Analyze => "analyze",
            Self::SimdTest => "simd_test",
            Self::Params => "params",
            Self::Primitives => "primitives",
            Self::AnalogStatus => "analog_status",
            Self::AnalogMode => "analog_mode",
            Self::AnalogRange => "analog_range",
            Self::AnalogClamp => "analog_clamp",
            Self::AnalogIsInt => "analog_isint",
            Self::AnalogScaleQuery => "analog_scalequery",
            Self::AnalogDeadzone => "analog_deadzone",
            Self::AnalogRemap => "analog_remap",
            Self::Exit => "exit",
        }
    }

    /// Keyword with its argument placeholders.
    pub fn usage(&self) -> &'static str {
        match self {
            Self::Tom => "tom <pos>",
            Self::Conga => "conga <pos>",
            Self::AnalogMode => "analog_mode <mode> [min max]",
            Self::AnalogClamp => "analog_clamp <v>",
            Self::AnalogDeadzone => "analog_deadzone <v> <threshold>",
            Self::AnalogRemap => "analog_remap <v> <from_min> <from_max> <to_min> <to_max>",
            other => other.keyword(),
        }
    }

    pub(super) fn run(self, session: &mut AnalogSession, args: &[&str]) -> Result<CommandOutcome> {
        let name = self.keyword();
        let d = session.domain;

        let text = match self {
            Self::Exit => return Ok(CommandOutcome::Exit),

            Self::Tom => {
                let position = argument(name, args, 0, "position")?;
                session.filter.set_tom_position(position);
                knob_report("Tom", session.filter.tom())
            }
            Self::Conga => {
                let position = argument(name, args, 0, "position")?;
                session.filter.set_conga_position(position);
                knob_report("Conga", session.filter.conga())
            }

            Self::Analyze => analyze(session),
            Self::SimdTest => {
                let config = session.config;
                let started = Instant::now();
                session.analyzer.analyze_simd(
                    &session.filter,
                    config.start_frequency,
                    config.end_frequency,
                    config.simd_points,
                );
                format!(
                    "SIMD analysis of {} points completed in {}µs",
                    config.simd_points,
                    started.elapsed().as_micros()
                )
            }
            Self::Params => {
                let filter = &session.filter;
                format!(
                    "Filter Parameters:\n  Center Frequency: {:.2} Hz\n  Quality Factor: {:.2}\n  Peak Gain: {:.2}\n  Tom Position: {}\n  Conga Position: {}",
                    filter.center_frequency(),
                    filter.quality_factor(),
                    filter.peak_gain(),
                    filter.tom().position(),
                    filter.conga().position()
                )
            }
            Self::Primitives => format!(
                "Available primitives: {}",
                session.factory.available_primitives().join(", ")
            ),

            Self::AnalogStatus => d.status(),
            Self::AnalogMode => {
                let mode: AnalogMode = args
                    .first()
                    .ok_or_else(|| BridgetError::missing_argument(name, "mode"))?
                    .parse()?;
                // float_custom without bounds falls back to [-1, 1]
                let (min, max) = if mode == AnalogMode::CustomFloat && args.len() > 1 {
                    (argument(name, args, 1, "min")?, argument(name, args, 2, "max")?)
                } else {
                    (-1.0, 1.0)
                };
                let mut domain = d;
                domain.set_mode(mode, min, max)?;
                session.set_domain(domain);
                "Analog mode updated.".to_string()
            }
            Self::AnalogRange => format!("Min: {}\nMax: {}", d.min(), d.max()),
            Self::AnalogClamp => {
                let value = argument(name, args, 0, "value")?;
                format!("Clamped Value: {}", d.clamp(value))
            }
            Self::AnalogIsInt => format!(
                "Integer Mode: {}",
                if d.is_integer_mode() { "Yes" } else { "No" }
            ),
            Self::AnalogScaleQuery => format!("Analog Range Span: {}", d.span()),
            Self::AnalogDeadzone => {
                let value = argument(name, args, 0, "value")?;
                let threshold = argument(name, args, 1, "threshold")?;
                format!("Deadzone Applied: {}", d.deadzone(value, threshold))
            }
            Self::AnalogRemap => {
                let value = argument(name, args, 0, "value")?;
                let from_min = argument(name, args, 1, "from_min")?;
                let from_max = argument(name, args, 2, "from_max")?;
                let to_min = argument(name, args, 3, "to_min")?;
                let to_max = argument(name, args, 4, "to_max")?;
                let remapped = d.remap(value, from_min, from_max, to_min, to_max)?;
                format!("Remapped Value: {}", remapped)
            }
        };

        Ok(CommandOutcome::Continue(text))
    }
}

fn knob_report(label: &str, knob: KnobNetwork) -> String {
    format!(
        "{} position set to {} (R={:.2}Ω)",
        label,
        knob.position(),
        knob.resistance()
    )
}

fn analyze(session: &mut AnalogSession) -> String {
    let config = session.config;
    session.analyzer.analyze(
        &session.filter,
        config.start_frequency,
        config.end_frequency,
        config.analyze_points,
    );
    let bode = session.analyzer.bode_data();

    let mut text = format!(
        "Frequency analysis complete ({} points, {}Hz-{}Hz)\nSample points:",
        config.analyze_points, config.start_frequency, config.end_frequency
    );
    for (f, db, deg) in bode.points().take(config.preview_points) {
        text.push_str(&format!("\n  f={:.2}Hz: {:.2}dB, {:.2}°", f, db, deg));
    }
    text
}
