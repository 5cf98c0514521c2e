use serde::Serialize;
use std::fmt;

/// How precisely a time was recorded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Precision {
    /// Manually timed, trusted to one decimal.
    Hand,
    /// Electronically timed, trusted to centiseconds.
    Auto,
}

impl fmt::Display for Precision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Precision::Hand => write!(f, "hand"),
            Precision::Auto => write!(f, "auto"),
        }
    }
}

/// A canonical numeric performance (seconds, metres or centimetres).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Measurement {
    pub value: f64,
    /// Canonical decimal text, e.g. "11.0", "11.5", "12.00", "309.01"
    pub text: String,
    pub precision: Precision,
}

impl Measurement {
    pub fn is_hand(&self) -> bool {
        self.precision == Precision::Hand
    }
}

impl fmt::Display for Measurement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_hand() {
            write!(f, "{}h", self.text)
        } else {
            write!(f, "{}", self.text)
        }
    }
}

/// Outcome of converting one raw result string.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ParsedResult {
    Numeric(Measurement),
    /// Status code such as "dnf", "dns", "dq", "nm" or "", passed through verbatim
    NonNumeric { code: String },
}

impl ParsedResult {
    pub fn measurement(&self) -> Option<&Measurement> {
        match self {
            ParsedResult::Numeric(m) => Some(m),
            ParsedResult::NonNumeric { .. } => None,
        }
    }
}

impl fmt::Display for ParsedResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParsedResult::Numeric(m) => m.fmt(f),
            ParsedResult::NonNumeric { code } => write!(f, "{}", code),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_marks_hand_times() {
        let hand = Measurement {
            value: 11.5,
            text: "11.5".to_string(),
            precision: Precision::Hand,
        };
        let auto = Measurement {
            value: 11.36,
            text: "11.36".to_string(),
            precision: Precision::Auto,
        };
        assert!(hand.is_hand());
        assert!(!auto.is_hand());
        assert_eq!(hand.to_string(), "11.5h");
        assert_eq!(auto.to_string(), "11.36");
    }

    #[test]
    fn test_non_numeric_displays_code_verbatim() {
        let parsed = ParsedResult::NonNumeric {
            code: "DNF".to_string(),
        };
        assert_eq!(parsed.to_string(), "DNF");
        assert!(parsed.measurement().is_none());
    }

    #[test]
    fn test_json_shape() {
        let parsed = ParsedResult::NonNumeric {
            code: "dq".to_string(),
        };
        let json = serde_json::to_string(&parsed).unwrap();
        assert_eq!(json, r#"{"type":"non_numeric","code":"dq"}"#);
    }
}
