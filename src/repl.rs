//! Line-based console frontend for [`AnalogSession`].

use std::io::{BufRead, Write};

use tracing::warn;

use crate::error::{BridgetError, Result};
use crate::session::{AnalogSession, CommandOutcome};

/// Prompt printed before every line.
pub const PROMPT: &str = "analog> ";

/// Read commands from `input` until `exit`, `quit` or end of input.
///
/// Command errors are reported on `output` as `Error: ...` and the loop
/// carries on; only console I/O failures end it early.
pub fn run<R: BufRead, W: Write>(session: &mut AnalogSession, input: R, mut output: W) -> Result<()> {
    writeln!(output, "{}", session.banner()).map_err(BridgetError::console)?;

    let mut lines = input.lines();
    loop {
        write!(output, "{}", PROMPT).map_err(BridgetError::console)?;
        output.flush().map_err(BridgetError::console)?;

        let Some(line) = lines.next() else {
            break;
        };
        let line = line.map_err(BridgetError::console)?;

        match session.execute(&line) {
            Ok(CommandOutcome::Exit) => break,
            Ok(CommandOutcome::Continue(text)) => {
                if !text.is_empty() {
                    writeln!(output, "{}", text).map_err(BridgetError::console)?;
                }
            }
            Err(e) => {
                warn!(line = %line, error = %e, "command failed");
                writeln!(output, "Error: {}", e).map_err(BridgetError::console)?;
            }
        }
    }

    writeln!(output).map_err(BridgetError::console)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn transcript(script: &str) -> String {
        let mut session = AnalogSession::default();
        let mut output = Vec::new();
        run(&mut session, Cursor::new(script), &mut output).unwrap();
        String::from_utf8(output).unwrap()
    }

    #[test]
    fn test_runs_until_exit() {
        let text = transcript("tom 0\nexit\ntom 1\n");
        assert!(text.starts_with("Bridget analog circuit session\n"));
        assert!(text.contains("analog> Tom position set to 0 (R=500.00Ω)\n"));
        assert!(!text.contains("Tom position set to 1"));
    }

    #[test]
    fn test_errors_are_reported_and_loop_continues() {
        let text = transcript("conga x\nanalog_clamp 5\n");
        assert!(text.contains("Error: Invalid argument for 'conga': 'x' is not a number\n"));
        assert!(text.contains("Clamped Value: 5\n"));
    }

    #[test]
    fn test_end_of_input_ends_loop() {
        let text = transcript("");
        assert!(text.ends_with("analog> \n"));
    }
}
