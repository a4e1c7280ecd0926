//! Parsed enable-info expression, ready to evaluate against snapshots

use std::fmt;

use crate::ast::Expression;
use crate::context::EvalContext;
use crate::error::{EnableInfoError, Result};
use crate::eval::evaluate;
use crate::parser::parse_with;
use crate::variables::EnableInfoVariables;

/// A plugin's enable-info expression, parsed once.
///
/// The tree is immutable, so one `EnableInfo` can be evaluated any number
/// of times, from any number of threads, against different snapshots.
///
/// # Example
///
/// ```
/// use enableinfo::{EnableInfo, EnableInfoVariables, ImageMode};
///
/// let info = EnableInfo::parse(r#"in(PSHOP_ImageMode, "RGBMode", "CMYKMode")"#).unwrap();
///
/// let rgb = EnableInfoVariables::new(640, 480, ImageMode::RGB, false, 3, 3, false, false);
/// let lab = EnableInfoVariables::new(640, 480, ImageMode::Lab, false, 3, 3, false, false);
///
/// assert!(info.evaluate(&rgb).unwrap());
/// assert!(!info.evaluate(&lab).unwrap());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnableInfo {
    source: String,
    expression: Expression,
}

impl EnableInfo {
    /// Parse with the default context.
    pub fn parse(source: &str) -> Result<Self> {
        Self::parse_with(source, &EvalContext::default())
    }

    /// Parse with an explicit context.
    pub fn parse_with(source: &str, ctx: &EvalContext) -> Result<Self> {
        let expression = parse_with(source, ctx)?;
        Ok(Self {
            source: source.to_string(),
            expression,
        })
    }

    /// Parse UTF-16 text, stopping at the first NUL unit.
    pub fn from_utf16(units: &[u16]) -> Result<Self> {
        Self::parse(&decode_utf16(units)?)
    }

    /// Parse a NUL-terminated single-byte string as stored in plugin
    /// resources. Bytes are read as Latin-1.
    pub fn from_c_bytes(bytes: &[u8]) -> Result<Self> {
        let source: String = bytes
            .iter()
            .take_while(|&&b| b != 0)
            .map(|&b| char::from(b))
            .collect();
        Self::parse(&source)
    }

    /// Evaluate against a snapshot.
    pub fn evaluate(&self, vars: &EnableInfoVariables) -> Result<bool> {
        evaluate(&self.expression, vars)
    }

    /// Source text as given.
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Parsed tree.
    pub fn expression(&self) -> &Expression {
        &self.expression
    }
}

impl fmt::Display for EnableInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

fn decode_utf16(units: &[u16]) -> Result<String> {
    let end = units.iter().position(|&u| u == 0).unwrap_or(units.len());
    let mut text = String::with_capacity(end);
    let mut index = 0;
    for decoded in char::decode_utf16(units[..end].iter().copied()) {
        match decoded {
            Ok(c) => {
                index += c.len_utf16();
                text.push(c);
            }
            Err(_) => return Err(EnableInfoError::InvalidEncoding { index }),
        }
    }
    Ok(text)
}
