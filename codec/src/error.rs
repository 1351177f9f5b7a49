//! Error types for codec operations.

use crate::record::Kind;
use thiserror::Error;

/// Error type for codec operations.
///
/// Every failure is reported to the caller; no component substitutes a
/// default value. Encoders validate before writing, so a failed encode
/// leaves the caller's accumulator untouched.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// Fewer bits remain than a field requires. Input is truncated or
    /// corrupt; never retried.
    #[error("unexpected end of bits")]
    EndOfBits,
    /// A size header is zero or exceeds its width class's bound.
    #[error("invalid size header: {0}")]
    InvalidHeader(u32),
    /// A numeric magnitude does not fit the declared field width.
    #[error("value out of range for {bits}-bit field")]
    ValueOutOfRange { bits: u32 },
    /// NaN and infinities have no representation in the format.
    #[error("double is NaN or infinite")]
    NotFinite,
    /// String byte length exceeds the 16-bit length field's cap.
    #[error("string length exceeded: {0} > 65534")]
    StringTooLong(usize),
    /// A string payload violates the format's byte constraints.
    #[error("malformed string: {0}")]
    InvalidString(&'static str),
    /// The format string contains an unknown token.
    #[error("invalid format token at byte {0}")]
    InvalidFormat(usize),
    /// A value's kind does not match the format token at its position.
    #[error("kind mismatch: expected {expected:?}, found {found:?}")]
    KindMismatch { expected: Kind, found: Kind },
    /// The format string and value list disagree in length.
    #[error("arity mismatch: format names {expected} values, got {found}")]
    ArityMismatch { expected: usize, found: usize },
    /// Nothing to serialize (empty record list or bit accumulator).
    #[error("nothing to serialize")]
    Empty,
}
