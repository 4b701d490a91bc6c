//! Typed records on top of the schema-driven engine.
//!
//! A Rust struct takes part in encoding and decoding by implementing [`Record`], which exposes
//! its [`Schema`] and converts the struct to and from an array of slots. Every field type
//! implements [`Slot`], which classifies it into a [`FieldKind`]. The `record!` macro writes both
//! implementations:
//! ```
//! # use record_codec::record::{marshal, unmarshal};
//! record_codec_macros::record! {
//!     #[derive(Debug, Default, PartialEq)]
//!     pub struct Header {
//!         pub signature: [u8; 8],
//!         pub message_type: u32,
//!     }
//! }
//!
//! let header = Header { signature: *b"NTLMSSP\0", message_type: 2 };
//! let bytes = marshal(&header).unwrap();
//! assert_eq!(bytes, b"NTLMSSP\0\x02\0\0\0");
//!
//! let mut decoded = Header::default();
//! assert_eq!(unmarshal(&bytes, &mut decoded).unwrap(), 12);
//! assert_eq!(decoded, header);
//! ```
//!
//! Types outside the supported set (signed integers, floating point, strings, maps, sequences of
//! anything but bytes) still implement [`Slot`], but classify as [`FieldKind::Unsupported`]:
//! records using them compile, and fail at runtime with `UnsupportedKind` naming the type.

use std::collections::{BTreeMap, HashMap};
use std::io::Write;
use std::sync::Arc;
use crate::decode;
use crate::encode;
use crate::schema::{FieldKind, Schema};
use crate::stream::{DecodeError, EncodeError};
use crate::value::{PlainData, Value};

/// A field type: something that occupies one slot of a record.
pub trait Slot: Sized {
    /// Wire layout of this type.
    fn kind() -> FieldKind;
    /// Read the slot (getter).
    fn to_value(&self) -> Result<Value, EncodeError>;
    /// Build from a decoded slot (setter).
    fn from_value(value: Value) -> Result<Self, DecodeError>;
}

/// A composite type described by a [`Schema`].
pub trait Record: Sized {
    /// The schema, identical for every instance.
    fn schema() -> Arc<Schema>;
    /// Slots of `self`, in wire order.
    fn to_slots(&self) -> Result<Vec<Value>, EncodeError>;
    /// Rebuild from slots in wire order.
    fn from_slots(slots: Vec<Value>) -> Result<Self, DecodeError>;
}

/// Encode a record into a fresh byte vector.
pub fn marshal<R: Record>(record: &R) -> Result<Vec<u8>, EncodeError> {
    let value = Value::Record(record.to_slots()?);
    encode::encode_record(&value, &R::schema())
}

/// Encode a record to the output stream.
pub fn marshal_into<R: Record, W: Write + ?Sized>(writer: &mut W, record: &R) -> Result<(), EncodeError> {
    let value = Value::Record(record.to_slots()?);
    let kind = FieldKind::Record(R::schema());
    encode::encode_into(writer, &value, &kind, Default::default())
}

/// Decode a record from the front of `input`, returning it with the number of bytes consumed.
pub fn from_bytes<R: Record>(input: &[u8]) -> Result<(R, usize), DecodeError> {
    let (value, consumed) = decode::decode_record(input, &R::schema())?;
    Ok((record_from_value(value)?, consumed))
}

/// Decode a record from the front of `input` into `dest`, returning the number of bytes consumed.
///
/// `dest` is only overwritten when decoding succeeds.
pub fn unmarshal<R: Record>(input: &[u8], dest: &mut R) -> Result<usize, DecodeError> {
    let (record, consumed) = from_bytes(input)?;
    *dest = record;
    Ok(consumed)
}

/// Like [`unmarshal`], but the record must cover the whole input.
pub fn unmarshal_exact<R: Record>(input: &[u8], dest: &mut R) -> Result<(), DecodeError> {
    let (record, consumed) = from_bytes(input)?;
    if consumed < input.len() {
        return Err(DecodeError::SuperfluousBytes(input[consumed..].into()));
    }
    *dest = record;
    Ok(())
}

/// [`Slot::kind`] for a record type. Used by generated code.
pub fn record_kind<R: Record>() -> FieldKind { FieldKind::Record(R::schema()) }

/// [`Slot::to_value`] for a record type. Used by generated code.
pub fn record_to_value<R: Record>(record: &R) -> Result<Value, EncodeError> {
    record.to_slots().map(Value::Record)
}

/// [`Slot::from_value`] for a record type. Used by generated code.
pub fn record_from_value<R: Record>(value: Value) -> Result<R, DecodeError> {
    match value {
        Value::Record(slots) => R::from_slots(slots),
        other => Err(DecodeError::ValueMismatch { expected: "record", found: other.describe() }),
    }
}

/// Hands out decoded slots one field at a time. Used by generated code.
#[derive(Debug)]
pub struct Slots {
    record: String,
    expected: usize,
    slots: std::vec::IntoIter<Value>,
}

impl Slots {
    /// Check that `slots` has exactly one entry per field of `schema`.
    pub fn new(schema: &Schema, slots: Vec<Value>) -> Result<Slots, DecodeError> {
        if slots.len() != schema.len() {
            return Err(DecodeError::SlotCountMismatch {
                record: schema.name().to_owned(),
                expected: schema.len(),
                found: slots.len(),
            });
        }
        Ok(Slots { record: schema.name().to_owned(), expected: schema.len(), slots: slots.into_iter() })
    }

    /// Take the next slot as a `T`.
    #[allow(clippy::should_implement_trait)]
    pub fn next<T: Slot>(&mut self) -> Result<T, DecodeError> {
        let found = self.expected - self.slots.len();
        let slot = self.slots.next().ok_or_else(|| DecodeError::SlotCountMismatch {
            record: self.record.clone(),
            expected: self.expected,
            found,
        })?;
        T::from_value(slot)
    }
}

macro_rules! impl_plain_data_slot {
    ($($t:ty),+ $(,)?) => {
        $(
            impl Slot for $t {
                fn kind() -> FieldKind { FieldKind::Scalar(<$t as PlainData>::WIDTH) }
                fn to_value(&self) -> Result<Value, EncodeError> { Ok(self.into_value()) }
                fn from_value(value: Value) -> Result<Self, DecodeError> {
                    <$t as PlainData>::from_value(&value).ok_or(DecodeError::ValueMismatch {
                        expected: stringify!($t),
                        found: value.describe(),
                    })
                }
            }
        )+
    }
}

impl_plain_data_slot!(u8, u16, u32, u64);

fn into_bytes(value: Value, expected: &'static str) -> Result<Vec<u8>, DecodeError> {
    match value {
        Value::Bytes(bytes) => Ok(bytes),
        other => Err(DecodeError::ValueMismatch { expected, found: other.describe() }),
    }
}

impl<const N: usize> Slot for [u8; N] {
    fn kind() -> FieldKind { FieldKind::FixedBytes(N) }
    fn to_value(&self) -> Result<Value, EncodeError> { Ok(Value::Bytes(self.to_vec())) }
    fn from_value(value: Value) -> Result<Self, DecodeError> {
        let bytes = into_bytes(value, "fixed byte array")?;
        bytes.try_into().map_err(|_| DecodeError::ValueMismatch {
            expected: "fixed byte array",
            found: "bytes of another length",
        })
    }
}

impl Slot for Vec<u8> {
    fn kind() -> FieldKind { FieldKind::VarBytes }
    fn to_value(&self) -> Result<Value, EncodeError> { Ok(Value::Bytes(self.clone())) }
    fn from_value(value: Value) -> Result<Self, DecodeError> { into_bytes(value, "byte buffer") }
}

impl Slot for Box<[u8]> {
    fn kind() -> FieldKind { FieldKind::VarBytes }
    fn to_value(&self) -> Result<Value, EncodeError> { Ok(Value::Bytes(self.to_vec())) }
    fn from_value(value: Value) -> Result<Self, DecodeError> {
        into_bytes(value, "byte buffer").map(Vec::into_boxed_slice)
    }
}

macro_rules! unsupported_slot_body {
    ($name:expr) => {
        fn kind() -> FieldKind { FieldKind::Unsupported($name) }
        fn to_value(&self) -> Result<Value, EncodeError> { Err(EncodeError::UnsupportedKind($name)) }
        fn from_value(_: Value) -> Result<Self, DecodeError> { Err(DecodeError::UnsupportedKind($name)) }
    }
}

macro_rules! impl_unsupported_slot {
    ($($t:ty),+ $(,)?) => {
        $(impl Slot for $t { unsupported_slot_body!(stringify!($t)); })+
    }
}

// these compile as fields so that the failure names the offending type
impl_unsupported_slot! {
    u128, i8, i16, i32, i64, i128,
    f32, f64, bool, char, String,
    Vec<u16>, Vec<u32>, Vec<u64>,
}

impl<const N: usize> Slot for [u16; N] { unsupported_slot_body!(std::any::type_name::<Self>()); }
impl<const N: usize> Slot for [u32; N] { unsupported_slot_body!(std::any::type_name::<Self>()); }
impl<const N: usize> Slot for [u64; N] { unsupported_slot_body!(std::any::type_name::<Self>()); }
impl<K, V> Slot for HashMap<K, V> { unsupported_slot_body!("map"); }
impl<K, V> Slot for BTreeMap<K, V> { unsupported_slot_body!("map"); }
