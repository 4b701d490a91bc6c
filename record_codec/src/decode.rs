//! Schema-driven decoder.
//!
//! Every decoding function returns the decoded [`Value`] together with the number of bytes it
//! consumed, so that sibling fields can be decoded at the correct offsets.

use crate::directive::Directive;
use crate::schema::{FieldKind, Schema, Width};
use crate::stream::{take, DecodeError};
use crate::value::{PlainData, Value};

/// Decode a value laid out as `kind` from the front of `input`.
///
/// Fields carrying a [`Directive`] other than [`Directive::None`] cannot be decoded: padding is
/// written but never skipped, so the call fails with
/// [`PaddingUnsupportedOnDecode`](DecodeError::PaddingUnsupportedOnDecode) before looking at the
/// input at all.
///
/// ```
/// # use record_codec::{decode::decode, directive::Directive, schema::{FieldKind, Width}, value::Value};
/// let (value, consumed) = decode(&[0x35, 0x82, 0x89, 0xe2, 0xff], &FieldKind::Scalar(Width::U32), Directive::None).unwrap();
/// assert_eq!((value, consumed), (Value::U32(0xe2898235), 4));
/// ```
pub fn decode(input: &[u8], kind: &FieldKind, directive: Directive) -> Result<(Value, usize), DecodeError> {
    if !directive.is_none() {
        return Err(DecodeError::PaddingUnsupportedOnDecode(directive));
    }
    match kind {
        FieldKind::Record(schema) => decode_record(input, schema),
        FieldKind::FixedBytes(n) => {
            let bytes = take(input, *n)?;
            Ok((Value::Bytes(bytes.to_vec()), *n))
        }
        FieldKind::VarBytes => Ok((Value::Bytes(input.to_vec()), input.len())),
        FieldKind::Scalar(Width::U8) => decode_plain::<u8>(input),
        FieldKind::Scalar(Width::U16) => decode_plain::<u16>(input),
        FieldKind::Scalar(Width::U32) => decode_plain::<u32>(input),
        FieldKind::Scalar(Width::U64) => decode_plain::<u64>(input),
        FieldKind::Unsupported(name) => Err(DecodeError::UnsupportedKind(*name)),
    }
}

/// Decode a record described by `schema` from the front of `input`.
pub fn decode_record(input: &[u8], schema: &Schema) -> Result<(Value, usize), DecodeError> {
    let mut offset = 0;
    let mut slots = Vec::with_capacity(schema.len());
    for field in schema.fields() {
        let (slot, consumed) = decode(&input[offset..], &field.kind, field.directive)?;
        slots.push(slot);
        offset += consumed;
    }
    Ok((Value::Record(slots), offset))
}

fn decode_plain<T: PlainData>(input: &[u8]) -> Result<(Value, usize), DecodeError> {
    let mut buffer = T::RawBytes::default();
    let width = buffer.as_ref().len();
    buffer.as_mut().copy_from_slice(take(input, width)?);
    Ok((T::from_bytes(buffer).into_value(), width))
}
