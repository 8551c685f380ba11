//! Numeric command arguments.

use crate::error::{BridgetError, Result};

/// Parse a number with an optional engineering suffix (`10k`, `4.7u`).
pub fn parse_value(text: &str) -> Option<f32> {
    let text = text.trim();
    let last = text.chars().last()?;

    let multiplier = match last {
        'p' => 1e-12,
        'n' => 1e-9,
        'u' | 'µ' => 1e-6,
        'm' => 1e-3,
        'k' | 'K' => 1e3,
        'M' => 1e6,
        'G' => 1e9,
        _ => 1.0,
    };
    let number = if multiplier != 1.0 {
        &text[..text.len() - last.len_utf8()]
    } else {
        text
    };

    number.parse::<f32>().ok().map(|v| v * multiplier)
}

/// Parse the `index`-th argument of `command`.
pub fn argument(command: &str, args: &[&str], index: usize, name: &str) -> Result<f32> {
    let text = args
        .get(index)
        .ok_or_else(|| BridgetError::missing_argument(command, name))?;
    parse_value(text).ok_or_else(|| {
        BridgetError::invalid_argument(command, format!("'{}' is not a number", text))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_parse_value() {
        assert_relative_eq!(parse_value("10k").unwrap(), 10_000.0);
        assert_relative_eq!(parse_value("4.7u").unwrap(), 4.7e-6);
        assert_relative_eq!(parse_value("100n").unwrap(), 100e-9);
        assert_relative_eq!(parse_value("2.2µ").unwrap(), 2.2e-6);
        assert_relative_eq!(parse_value(" 0.25 ").unwrap(), 0.25);
        assert_relative_eq!(parse_value("-3").unwrap(), -3.0);
        assert_relative_eq!(parse_value("1e3").unwrap(), 1000.0);
    }

    #[test]
    fn test_parse_value_invalid() {
        assert_eq!(parse_value(""), None);
        assert_eq!(parse_value("abc"), None);
        assert_eq!(parse_value("k"), None);
    }

    #[test]
    fn test_argument_errors() {
        assert!(matches!(
            argument("tom", &[], 0, "position"),
            Err(BridgetError::MissingArgument { .. })
        ));
        assert!(matches!(
            argument("tom", &["half"], 0, "position"),
            Err(BridgetError::InvalidArgument { .. })
        ));
        assert_eq!(argument("tom", &["0.5"], 0, "position").unwrap(), 0.5);
    }
}
