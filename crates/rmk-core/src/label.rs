//! The closed label enumeration and its numeric wire codes.

use serde::{Deserialize, Serialize};
use std::fmt;

/// One reviewer judgement on a record.
///
/// The numeric codes (`0`, `1`, `9`) are the values written into the label
/// column of the dataset itself, so they are part of the persisted format
/// and must never change. Absence of a label is represented as
/// `Option::<LabelValue>::None` everywhere — there is no "unlabeled" variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LabelValue {
    Reject,
    Accept,
    Unsure,
}

impl LabelValue {
    /// Every valid label, in presentation order.
    pub const ALL: [Self; 3] = [Self::Reject, Self::Accept, Self::Unsure];

    /// Numeric code stored in the label column.
    #[must_use]
    pub const fn code(self) -> u8 {
        match self {
            Self::Reject => 0,
            Self::Accept => 1,
            Self::Unsure => 9,
        }
    }

    /// Parse a stored numeric code. Any code outside `{0, 1, 9}` is not a
    /// label (callers treat such cells as unlabeled).
    #[must_use]
    pub const fn from_code(code: u8) -> Option<Self> {
        match code {
            0 => Some(Self::Reject),
            1 => Some(Self::Accept),
            9 => Some(Self::Unsure),
            _ => None,
        }
    }

    /// String representation used in CLI output.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Reject => "reject",
            Self::Accept => "accept",
            Self::Unsure => "unsure",
        }
    }
}

impl fmt::Display for LabelValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
