//! Threshold method selection

use crate::error::ThresholdError;
use std::fmt;
use std::str::FromStr;

/// Global threshold algorithm
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ThresholdMethod {
    /// Iterative minimum cross entropy
    Li,
    /// Maximum between-class variance
    Otsu,
    /// Maximum distance below the peak-to-tail line
    Triangle,
    /// Maximum correlation criterion
    #[default]
    Yen,
}

impl ThresholdMethod {
    /// Every supported method.
    pub const ALL: [ThresholdMethod; 4] = [
        ThresholdMethod::Li,
        ThresholdMethod::Otsu,
        ThresholdMethod::Triangle,
        ThresholdMethod::Yen,
    ];

    /// Lowercase name as accepted by [`FromStr`].
    pub fn name(self) -> &'static str {
        match self {
            ThresholdMethod::Li => "li",
            ThresholdMethod::Otsu => "otsu",
            ThresholdMethod::Triangle => "triangle",
            ThresholdMethod::Yen => "yen",
        }
    }
}

impl fmt::Display for ThresholdMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ThresholdMethod {
    type Err = ThresholdError;

    /// Parse a method name, ignoring ASCII case.
    ///
    /// Unknown names are an error, never a fallback to a default method.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        Self::ALL
            .into_iter()
            .find(|m| m.name().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| ThresholdError::UnsupportedMethod(s.to_string()))
    }
}
