//! Schema-driven encoding and decoding of little-endian binary records.
//!
//! A record is described by a [`Schema`](schema::Schema): an ordered list of fields, each laid
//! out as an unsigned scalar, a fixed byte array, a trailing variable byte buffer, or a nested
//! record. The [`encode`] and [`decode`] modules walk a schema depth-first and produce or consume
//! bytes in declared order, with no separators, length prefixes or alignment unless a field
//! [`Directive`](directive::Directive) asks for padding.
//!
//! Plain Rust structs take part through the [`Record`](record::Record) trait, usually implemented
//! with the `record!` macro (enable the `macros` feature, or depend on `record_codec_macros`).

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]

pub mod directive;
pub mod schema;
pub mod value;
pub mod stream;
pub mod encode;
pub mod decode;
pub mod record;
pub mod utf16;

pub use record::{from_bytes, marshal, marshal_into, unmarshal, unmarshal_exact, Record, Slot};
pub use stream::{DecodeError, EncodeError};

#[cfg(feature = "macros")]
pub use record_codec_macros::record;
