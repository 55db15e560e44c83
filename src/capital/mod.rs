//! Conversion of decimal RMB amounts into the capital form (大写金额) used on
//! cheques, invoices and contracts, e.g. "1024.50" -> "壹仟零贰拾肆元伍角".

pub mod normalizer;
pub mod parse;
mod render;

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::errors::{ConversionError, ErrorReason};

pub use parse::{ParsedAmount, is_valid_amount};

/// A rendered capital amount. Empty only when there was no input to convert.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ChineseAmount(String);

impl ChineseAmount {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for ChineseAmount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for ChineseAmount {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Wire form of a conversion result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Outcome {
    Ok { text: String },
    Error { reason: ErrorReason },
}

impl Outcome {
    pub fn is_ok(&self) -> bool {
        matches!(self, Outcome::Ok { .. })
    }
}

impl From<Result<ChineseAmount, ConversionError>> for Outcome {
    fn from(result: Result<ChineseAmount, ConversionError>) -> Self {
        match result {
            Ok(amount) => Outcome::Ok {
                text: amount.into_string(),
            },
            Err(err) => Outcome::Error {
                reason: err.reason(),
            },
        }
    }
}

/// Converts a raw amount string. Characters other than ASCII digits and '.'
/// are ignored; blank input yields an empty amount rather than an error.
pub fn convert(raw: &str) -> Result<ChineseAmount, ConversionError> {
    if raw.trim().is_empty() {
        return Ok(ChineseAmount::default());
    }

    let amount = ParsedAmount::parse(raw)?;
    let integer = render::render_integer(&amount.integer_digits);
    let fraction = render::render_fraction(&amount.fraction_digits);

    let composed = if amount.is_whole_zero() && !fraction.is_empty() {
        fraction
    } else {
        let mut text = integer;
        text.push('元');
        if fraction.is_empty() {
            text.push('整');
        } else {
            text.push_str(&fraction);
        }
        text
    };

    let text = normalizer::normalize_amount(&composed);
    debug!(input = raw, output = %text, "converted amount");
    Ok(ChineseAmount(text))
}
