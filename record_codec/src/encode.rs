//! Schema-driven encoder.

use std::io::Write;
use crate::directive::Directive;
use crate::schema::{FieldKind, Schema, Width};
use crate::stream::{EncodeError, Stream};
use crate::value::{PlainData, Value};

/// Encode `value`, laid out as `kind`, into a fresh byte vector.
///
/// ```
/// # use record_codec::{directive::Directive, encode::encode, schema::{FieldKind, Width}, value::Value};
/// let bytes = encode(&Value::U32(0xe2898235), &FieldKind::Scalar(Width::U32), Directive::None).unwrap();
/// assert_eq!(bytes, [0x35, 0x82, 0x89, 0xe2]);
/// ```
pub fn encode(value: &Value, kind: &FieldKind, directive: Directive) -> Result<Vec<u8>, EncodeError> {
    let mut output = Vec::new();
    encode_into(&mut output, value, kind, directive)?;
    Ok(output)
}

/// Encode `value`, laid out as `kind`, to the output stream.
///
/// Nothing is written for a record whose shape does not match the schema: the whole value is
/// checked before the first byte goes out. Errors from the stream itself may still leave a prefix
/// of the output written.
pub fn encode_into<W: Write + ?Sized>(
    writer: &mut W, value: &Value, kind: &FieldKind, directive: Directive,
) -> Result<(), EncodeError> {
    check(value, kind)?;
    write_checked(writer, value, kind, directive)
}

/// Encode a record value against its schema.
pub fn encode_record(value: &Value, schema: &Schema) -> Result<Vec<u8>, EncodeError> {
    let mut output = Vec::new();
    check_record(value, schema)?;
    write_record(&mut output, value, schema)?;
    Ok(output)
}

fn check(value: &Value, kind: &FieldKind) -> Result<(), EncodeError> {
    let mismatch = || EncodeError::ValueMismatch { expected: kind.describe(), found: value.describe() };
    match (kind, value) {
        (FieldKind::Unsupported(name), _) => Err(EncodeError::UnsupportedKind(*name)),
        (FieldKind::Record(schema), _) => check_record(value, schema),
        (FieldKind::FixedBytes(n), Value::Bytes(bytes)) if bytes.len() != *n =>
            Err(EncodeError::LengthMismatch { expected: *n, found: bytes.len() }),
        (FieldKind::FixedBytes(_) | FieldKind::VarBytes, Value::Bytes(_)) => Ok(()),
        (FieldKind::Scalar(width), _) if scalar_width(value) == Some(*width) => Ok(()),
        _ => Err(mismatch()),
    }
}

fn check_record(value: &Value, schema: &Schema) -> Result<(), EncodeError> {
    let Value::Record(slots) = value else {
        return Err(EncodeError::ValueMismatch { expected: "record", found: value.describe() });
    };
    if slots.len() != schema.len() {
        return Err(EncodeError::SlotCountMismatch {
            record: schema.name().to_owned(),
            expected: schema.len(),
            found: slots.len(),
        });
    }
    std::iter::zip(slots, schema.fields()).try_for_each(|(slot, field)| check(slot, &field.kind))
}

fn scalar_width(value: &Value) -> Option<Width> {
    match value {
        Value::U8(_) => Some(Width::U8),
        Value::U16(_) => Some(Width::U16),
        Value::U32(_) => Some(Width::U32),
        Value::U64(_) => Some(Width::U64),
        Value::Bytes(_) | Value::Record(_) => None,
    }
}

fn write_checked<W: Write + ?Sized>(
    writer: &mut W, value: &Value, kind: &FieldKind, directive: Directive,
) -> Result<(), EncodeError> {
    match (kind, value) {
        (FieldKind::Record(schema), _) => write_record(writer, value, schema),
        (FieldKind::FixedBytes(_) | FieldKind::VarBytes, Value::Bytes(bytes)) => {
            writer.write_all(bytes)?;
            writer.pad(directive.padding_len(bytes.len()))
        }
        (_, &Value::U8(x)) => write_plain(writer, x),
        (_, &Value::U16(x)) => write_plain(writer, x),
        (_, &Value::U32(x)) => write_plain(writer, x),
        (_, &Value::U64(x)) => write_plain(writer, x),
        _ => Err(EncodeError::ValueMismatch { expected: kind.describe(), found: value.describe() }),
    }
}

fn write_record<W: Write + ?Sized>(writer: &mut W, value: &Value, schema: &Schema) -> Result<(), EncodeError> {
    let slots = value.as_slots().unwrap_or_default();
    std::iter::zip(slots, schema.fields())
        .try_for_each(|(slot, field)| write_checked(writer, slot, &field.kind, field.directive))
}

fn write_plain<T: PlainData, W: Write + ?Sized>(writer: &mut W, value: T) -> Result<(), EncodeError> {
    writer.write_all(value.to_bytes().as_ref()).map_err(EncodeError::from)
}
