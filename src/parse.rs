use alloc::string::String;
use alloc::string::ToString;
use core::str::FromStr;

use crate::Error;
use crate::Export;

/// Parse export definition.
///
/// - Empty `value` exports the symbol `name` under its own name.
/// - `value` that starts with a decimal digit is an integer literal: hexadecimal with `0x` or
///   `0X` prefix, octal with `0` prefix, decimal otherwise. The whole string has to be a valid
///   literal that fits in 32 bits.
/// - Any other `value` is a symbol that is exported under `name`.
pub fn parse_export(name: &str, value: &str) -> Result<Export, Error> {
    if value.is_empty() {
        return Ok(Export::itself(name));
    }
    if !value.starts_with(|ch: char| ch.is_ascii_digit()) {
        return Ok(Export::symbol(name, value));
    }
    let number = parse_literal(value).ok_or_else(|| Error::invalid_literal(name, value))?;
    Ok(Export::value(name, number))
}

/// Parse C-style unsigned integer literal.
///
/// Returns `None` if the literal is malformed or doesn't fit in 32 bits.
pub fn parse_literal(text: &str) -> Option<u32> {
    let (digits, radix) = match text.as_bytes() {
        [b'0', b'x' | b'X', _, ..] => (&text[2..], 16),
        [b'0', ..] => (text, 8),
        _ => (text, 10),
    };
    // `from_str_radix` accepts leading sign.
    if !digits.chars().all(|ch| ch.is_digit(radix)) {
        return None;
    }
    u32::from_str_radix(digits, radix).ok()
}

impl FromStr for Export {
    type Err = Error;

    /// Parse `NAME` or `NAME=VALUE`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (name, value) = s.split_once('=').unwrap_or((s, ""));
        if name.contains('\0') {
            return Err(Error::InvalidName(String::from(name)));
        }
        parse_export(name, value)
    }
}

impl Error {
    /// Construct literal error from the export name and the text.
    pub fn invalid_literal(name: &str, value: &str) -> Self {
        Self::InvalidLiteral {
            name: name.to_string(),
            value: value.to_string(),
        }
    }
}
