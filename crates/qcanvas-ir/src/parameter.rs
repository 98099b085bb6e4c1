//! Gate parameters.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A gate parameter: either a concrete real number or a symbolic expression kept as text.
///
/// Serializes untagged, so JSON sees a plain number or a plain string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Parameter {
    /// A concrete real value.
    Numeric(f64),
    /// A symbolic expression such as `theta` or `pi/2`.
    Symbolic(String),
}

impl Parameter {
    /// Create a numeric parameter.
    pub fn numeric(value: f64) -> Self {
        Parameter::Numeric(value)
    }

    /// Create a symbolic parameter.
    pub fn symbolic(text: impl Into<String>) -> Self {
        Parameter::Symbolic(text.into())
    }

    /// The numeric value, if this parameter is numeric.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Parameter::Numeric(v) => Some(*v),
            Parameter::Symbolic(_) => None,
        }
    }

    /// The expression text, if this parameter is symbolic.
    pub fn as_symbol(&self) -> Option<&str> {
        match self {
            Parameter::Numeric(_) => None,
            Parameter::Symbolic(s) => Some(s),
        }
    }

    /// Check whether this parameter is symbolic.
    pub fn is_symbolic(&self) -> bool {
        matches!(self, Parameter::Symbolic(_))
    }

    /// Numeric parameters must be finite; symbolic ones always pass.
    pub fn is_finite(&self) -> bool {
        match self {
            Parameter::Numeric(v) => v.is_finite(),
            Parameter::Symbolic(_) => true,
        }
    }
}

impl fmt::Display for Parameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Parameter::Numeric(v) => write!(f, "{v}"),
            Parameter::Symbolic(s) => write!(f, "{s}"),
        }
    }
}

impl From<f64> for Parameter {
    fn from(value: f64) -> Self {
        Parameter::Numeric(value)
    }
}

impl From<&str> for Parameter {
    fn from(text: &str) -> Self {
        Parameter::Symbolic(text.to_string())
    }
}

impl From<String> for Parameter {
    fn from(text: String) -> Self {
        Parameter::Symbolic(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_untagged_json() {
        let params: Vec<Parameter> = serde_json::from_str(r#"[0.5, "theta", 2]"#).unwrap();
        assert_eq!(params[0], Parameter::Numeric(0.5));
        assert_eq!(params[1], Parameter::Symbolic("theta".into()));
        assert_eq!(params[2], Parameter::Numeric(2.0));

        let json = serde_json::to_string(&params).unwrap();
        assert_eq!(json, r#"[0.5,"theta",2.0]"#);
    }

    #[test]
    fn test_display() {
        assert_eq!(Parameter::Numeric(0.785).to_string(), "0.785");
        assert_eq!(Parameter::symbolic("pi/2").to_string(), "pi/2");
    }

    #[test]
    fn test_finiteness() {
        assert!(Parameter::Numeric(1.0).is_finite());
        assert!(!Parameter::Numeric(f64::NAN).is_finite());
        assert!(Parameter::symbolic("phi").is_finite());
    }
}
