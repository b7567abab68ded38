//! Scalar cell values.

use serde::{Deserialize, Serialize};
use std::fmt;

/// One cell of a table: empty, numeric, or free text.
///
/// A token is only classified as [`Value::Number`] when rendering the parsed
/// number reproduces the exact input token. Anything else (leading zeros,
/// `"1e3"`, `"-0.0"`, trailing whitespace) stays [`Value::Text`], so every
/// cell token survives a load/serialize cycle unchanged. The guarantee is
/// per cell: row formatting (quoting, line endings) is normalized by the
/// CSV writer on the way out.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Value {
    Empty,
    Number(f64),
    Text(String),
}

impl Value {
    /// Classify a raw CSV token.
    #[must_use]
    pub fn parse(token: &str) -> Self {
        if token.is_empty() {
            return Self::Empty;
        }
        if let Ok(n) = token.parse::<f64>() {
            // Non-finite values are kept as text so table equality stays
            // well-defined (NaN != NaN would poison comparisons).
            if n.is_finite() && render_number(n) == token {
                return Self::Number(n);
            }
        }
        Self::Text(token.to_string())
    }

    /// Render back to the CSV token this value came from (or will become).
    #[must_use]
    pub fn render(&self) -> String {
        match self {
            Self::Empty => String::new(),
            Self::Number(n) => render_number(*n),
            Self::Text(s) => s.clone(),
        }
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }

    /// The value as an integral code, if it is a whole number in `u8` range.
    ///
    /// Numeric text qualifies too: tools that write floats render codes as
    /// `"1.0"`, which classifies as [`Value::Text`] to keep the token intact
    /// but must still read back as a code.
    #[must_use]
    pub fn as_code(&self) -> Option<u8> {
        let n = match self {
            Self::Empty => return None,
            Self::Number(n) => *n,
            Self::Text(s) => s.trim().parse::<f64>().ok()?,
        };
        if n.fract() == 0.0 && (0.0..=255.0).contains(&n) {
            Some(n as u8)
        } else {
            None
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

/// Canonical rendering of a numeric cell: integers without a fractional
/// part, everything else via the shortest `f64` display form.
fn render_number(n: f64) -> String {
    if n.fract() == 0.0 && n.abs() < 9_007_199_254_740_992.0 {
        format!("{}", n as i64)
    } else {
        format!("{n}")
    }
}
