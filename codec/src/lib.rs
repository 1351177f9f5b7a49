//! Serialize structured data into self-describing, variable-width bit
//! streams.
//!
//! Fixed-width serialization spends eight bits on the value `5`; this format
//! spends six. Each field is prefixed by a small size header declaring how
//! many magnitude bits follow, so narrow values cost few bits while the full
//! declared range stays representable. Signed integers travel as
//! sign-magnitude, doubles as a mantissa bit string plus a signed exponent,
//! strings as a length and one signed byte per character, and booleans as a
//! single bare bit. A final packing step rounds the stream up to whole bytes
//! behind a one-byte padding header.
//!
//! The stream is self-describing in *width*, not in *kind*: decoding
//! requires the same sequence of field kinds the encoder used, supplied
//! either as a [Kind] slice or as a compact format string.
//!
//! # Example
//!
//! ```rust
//! use dbits::{deserialize_values, serialize_values, Value};
//!
//! // A lamp status report: brightness, temperature, name, power.
//! let values = vec![
//!     Value::U8(190),
//!     Value::Double(21.5),
//!     Value::Str("bedroom".into()),
//!     Value::Bool(true),
//! ];
//! let bytes = serialize_values("u8dsb", &values).unwrap();
//! let decoded = deserialize_values(&bytes, "u8dsb").unwrap();
//! assert_eq!(decoded, values);
//! ```
//!
//! Lower layers are exposed for callers that compose their own streams:
//!
//! ```rust
//! use dbits::{pack, unpack, BitQueue, BitReader, Width};
//! use dbits::scalar::int::{read_uint, write_uint};
//!
//! let mut bits = BitQueue::new();
//! write_uint(&mut bits, 5, Width::W8, true).unwrap();
//! let bytes = pack(bits).unwrap();
//! assert_eq!(bytes.as_ref(), &[0x03, 0x2A]);
//!
//! let bits = unpack(&bytes).unwrap();
//! let mut reader = BitReader::new(&bits);
//! assert_eq!(read_uint(&mut reader, Width::W8, true).unwrap(), 5);
//! ```

pub mod bits;
pub use bits::{BitQueue, BitReader};
mod error;
pub use error::Error;
pub mod format;
pub use format::{deserialize_values, parse_format, serialize_values};
pub mod header;
pub use header::Width;
pub mod pack;
pub use pack::{pack, unpack};
pub mod record;
pub use record::{deserialize, deserialize_into, serialize, Kind, Records, Value};
pub mod scalar;
