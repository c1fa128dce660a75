use alloc::string::String;
use thiserror::Error;

/// Export table error.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum Error {
    /// The value of an export is not a well-formed integer literal.
    #[error("Illegal numeric value for export {name}: {value}")]
    InvalidLiteral {
        /// Export name.
        name: String,
        /// Offending text.
        value: String,
    },
    /// Export name contains NUL byte or is not valid UTF-8.
    #[error("Invalid export name: {0:?}")]
    InvalidName(String),
    /// Table size or offset doesn't fit in 32 bits.
    #[error("Overflow: {0}")]
    TooBig(&'static str),
    /// Read past the end of the fragment.
    #[error("Unexpected end of fragment")]
    UnexpectedEof,
    /// RVA points outside the fragment.
    #[error("Invalid fragment offset: {0:#x}")]
    InvalidOffset(i64),
}
