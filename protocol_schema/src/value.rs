// Copyright (c) 2025 uatrack contributors. Licensed under Apache License, Version 2.0.

use std::fmt::{Display, Formatter, Result};

use serde::{Deserialize, Serialize};

use crate::InlineText;

/// One typed parameter value as it will appear on the wire.
///
/// The wire format is text; `Display` performs the canonical rendering the
/// collection endpoint expects (booleans as `1`/`0`, numbers in plain decimal
/// notation).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum ParameterValue {
    Text(InlineText),
    Integer(i64),
    Double(f64),
    Currency(f64),
    Boolean(bool),
}

impl ParameterValue {
    #[must_use]
    pub fn text(value: &str) -> ParameterValue {
        ParameterValue::Text(InlineText::from(value))
    }

    /// The stored text, when this value is text.
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            ParameterValue::Text(text) => Some(text.as_str()),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            ParameterValue::Integer(value) => Some(*value),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_double(&self) -> Option<f64> {
        match self {
            ParameterValue::Double(value) | ParameterValue::Currency(value) => {
                Some(*value)
            }
            _ => None,
        }
    }

    #[must_use]
    pub fn as_boolean(&self) -> Option<bool> {
        match self {
            ParameterValue::Boolean(value) => Some(*value),
            _ => None,
        }
    }

    /// Whether this value is a number below zero. The protocol declares its
    /// numeric parameters non-negative; the validator uses this under strict
    /// mode.
    #[must_use]
    pub fn is_negative(&self) -> bool {
        match self {
            ParameterValue::Integer(value) => *value < 0,
            ParameterValue::Double(value) | ParameterValue::Currency(value) => {
                *value < 0.0
            }
            ParameterValue::Text(_) | ParameterValue::Boolean(_) => false,
        }
    }
}

impl Display for ParameterValue {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        match self {
            ParameterValue::Text(text) => write!(f, "{text}"),
            ParameterValue::Integer(value) => write!(f, "{value}"),
            ParameterValue::Double(value) | ParameterValue::Currency(value) => {
                write!(f, "{value}")
            }
            ParameterValue::Boolean(true) => write!(f, "1"),
            ParameterValue::Boolean(false) => write!(f, "0"),
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn wire_rendering() {
        assert_eq!(ParameterValue::text("Category").to_string(), "Category");
        assert_eq!(ParameterValue::Integer(55).to_string(), "55");
        assert_eq!(ParameterValue::Currency(12.5).to_string(), "12.5");
        assert_eq!(ParameterValue::Double(0.25).to_string(), "0.25");
        assert_eq!(ParameterValue::Boolean(true).to_string(), "1");
        assert_eq!(ParameterValue::Boolean(false).to_string(), "0");
    }

    #[test]
    fn typed_accessors() {
        assert_eq!(ParameterValue::text("x").as_text(), Some("x"));
        assert_eq!(ParameterValue::Integer(7).as_integer(), Some(7));
        assert_eq!(ParameterValue::Currency(1.5).as_double(), Some(1.5));
        assert_eq!(ParameterValue::Boolean(true).as_boolean(), Some(true));
        assert_eq!(ParameterValue::text("x").as_integer(), None);
    }

    #[test]
    fn negativity_is_only_about_numbers() {
        assert!(ParameterValue::Integer(-5).is_negative());
        assert!(ParameterValue::Currency(-0.01).is_negative());
        assert!(!ParameterValue::Integer(0).is_negative());
        assert!(!ParameterValue::text("-5").is_negative());
        assert!(!ParameterValue::Boolean(false).is_negative());
    }
}
