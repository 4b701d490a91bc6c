//! In-memory values conforming to a [`Schema`](crate::schema::Schema).

use crate::schema::{Schema, Width};

/// A record instance, or one of its leaves.
///
/// Records are stored as an array of slots, one per declared field, in wire order.
#[derive(Debug, Clone, Eq, PartialEq, Hash)]
pub enum Value {
    /// One-byte scalar.
    U8(u8),
    /// Two-byte scalar.
    U16(u16),
    /// Four-byte scalar.
    U32(u32),
    /// Eight-byte scalar.
    U64(u64),
    /// Contents of a fixed byte array or a variable byte buffer.
    Bytes(Vec<u8>),
    /// Slots of a nested record.
    Record(Vec<Value>),
}

impl Value {
    /// Short description of the variant, used in error messages.
    pub fn describe(&self) -> &'static str {
        match self {
            Value::U8(_) => "u8",
            Value::U16(_) => "u16",
            Value::U32(_) => "u32",
            Value::U64(_) => "u64",
            Value::Bytes(_) => "bytes",
            Value::Record(_) => "record",
        }
    }

    /// Widen any scalar to `u64`.
    pub fn as_u64(&self) -> Option<u64> {
        match *self {
            Value::U8(x) => Some(x.into()),
            Value::U16(x) => Some(x.into()),
            Value::U32(x) => Some(x.into()),
            Value::U64(x) => Some(x),
            Value::Bytes(_) | Value::Record(_) => None,
        }
    }

    /// Byte content, for [`Value::Bytes`].
    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            Value::Bytes(bytes) => Some(bytes),
            _ => None,
        }
    }

    /// Slots, for [`Value::Record`].
    pub fn as_slots(&self) -> Option<&[Value]> {
        match self {
            Value::Record(slots) => Some(slots),
            _ => None,
        }
    }

    /// Look up the slot of the field called `name`, with `schema` describing this record.
    pub fn field(&self, schema: &Schema, name: &str) -> Option<&Value> {
        self.as_slots()?.get(schema.index_of(name)?)
    }

    /// Mutable counterpart of [`Value::field`].
    pub fn field_mut(&mut self, schema: &Schema, name: &str) -> Option<&mut Value> {
        let index = schema.index_of(name)?;
        match self {
            Value::Record(slots) => slots.get_mut(index),
            _ => None,
        }
    }
}

/// Unsigned scalars with a little-endian byte representation.
pub trait PlainData: Sized + Copy {
    /// Storage type for the raw bytes, typically a `[u8; N]`.
    type RawBytes: Default + AsMut<[u8]> + AsRef<[u8]>;
    /// Wire width.
    const WIDTH: Width;
    /// Convert from little-endian raw bytes.
    fn from_bytes(bytes: Self::RawBytes) -> Self;
    /// Convert to little-endian raw bytes.
    fn to_bytes(self) -> Self::RawBytes;
    /// Wrap into a [`Value`].
    fn into_value(self) -> Value;
    /// Unwrap from a [`Value`] of the same width.
    fn from_value(value: &Value) -> Option<Self>;
}

macro_rules! impl_plain_data {
    ($($t:ty => $width:ident),+ $(,)?) => {
        $(
            impl PlainData for $t {
                type RawBytes = [u8; std::mem::size_of::<Self>()];
                const WIDTH: Width = Width::$width;
                fn from_bytes(bytes: Self::RawBytes) -> Self { Self::from_le_bytes(bytes) }
                fn to_bytes(self) -> Self::RawBytes { self.to_le_bytes() }
                fn into_value(self) -> Value { Value::$width(self) }
                fn from_value(value: &Value) -> Option<Self> {
                    match *value {
                        Value::$width(x) => Some(x),
                        _ => None,
                    }
                }
            }

            impl From<$t> for Value {
                fn from(x: $t) -> Value { Value::$width(x) }
            }
        )+
    }
}

impl_plain_data! {
    u8 => U8,
    u16 => U16,
    u32 => U32,
    u64 => U64,
}

impl From<Vec<u8>> for Value {
    fn from(bytes: Vec<u8>) -> Value { Value::Bytes(bytes) }
}

impl From<&[u8]> for Value {
    fn from(bytes: &[u8]) -> Value { Value::Bytes(bytes.to_vec()) }
}

impl<const N: usize> From<[u8; N]> for Value {
    fn from(bytes: [u8; N]) -> Value { Value::Bytes(bytes.to_vec()) }
}

#[cfg(test)]
mod tests {
    use crate::schema::{FieldKind, Schema, Width};
    use super::{PlainData, Value};

    #[test]
    fn scalars_are_little_endian() {
        assert_eq!(0xe2898235_u32.to_bytes(), [0x35, 0x82, 0x89, 0xe2]);
        assert_eq!(u16::from_bytes([0x34, 0x12]), 0x1234);
        assert_eq!(<u64 as PlainData>::from_bytes([1, 0, 0, 0, 0, 0, 0, 0x80]), 0x8000_0000_0000_0001);
        assert_eq!(<u64 as PlainData>::WIDTH.bytes(), 8);
    }

    #[test]
    fn field_lookup_by_name() {
        let schema = Schema::builder("Pair")
            .field("a", FieldKind::Scalar(Width::U8))
            .field("b", FieldKind::VarBytes)
            .build();
        let mut value = Value::Record(vec![Value::U8(7), Value::from(&b"xy"[..])]);
        assert_eq!(value.field(&schema, "a").and_then(Value::as_u64), Some(7));
        assert_eq!(value.field(&schema, "b").and_then(Value::as_bytes), Some(&b"xy"[..]));
        assert_eq!(value.field(&schema, "c"), None);
        *value.field_mut(&schema, "a").unwrap() = Value::U8(9);
        assert_eq!(value.as_slots().unwrap()[0], Value::U8(9));
    }
}
