//! Errors and stream helpers shared by the encoder and the decoder.

use std::io::Write;
use thiserror::Error;
use crate::directive::Directive;

/// Decoding errors.
#[derive(Debug, Clone, Eq, PartialEq, Error)]
pub enum DecodeError {
    /// The field type cannot be laid out by this codec.
    #[error("unsupported kind '{0}'")]
    UnsupportedKind(&'static str),
    /// Not enough bytes left for a fixed-size read.
    #[error("buffer underrun: {needed} bytes needed, {remaining} remaining")]
    BufferUnderrun {
        /// Number of bytes the field occupies.
        needed: usize,
        /// Number of bytes left in the input.
        remaining: usize,
    },
    /// Padding is only ever written, never skipped on read.
    #[error("'{0}' is not supported when decoding")]
    PaddingUnsupportedOnDecode(Directive),
    /// A decoded slot does not fit the field it is assigned to.
    #[error("invalid slot: expecting '{expected}', found '{found}'")]
    ValueMismatch {
        /// What the receiving field accepts.
        expected: &'static str,
        /// What the slot contained.
        found: &'static str,
    },
    /// A decoded record has a different number of slots than the receiving type has fields.
    #[error("record '{record}' expects {expected} slots, found {found}")]
    SlotCountMismatch {
        /// Record name.
        record: String,
        /// Number of declared fields.
        expected: usize,
        /// Number of slots supplied.
        found: usize,
    },
    /// Superfluous bytes after decoding finished. EOF expected.
    #[error("input not exhausted, remaining bytes: {0:?}")]
    SuperfluousBytes(Box<[u8]>),
}

/// Encoding errors.
#[derive(Debug, Error)]
pub enum EncodeError {
    /// The field type cannot be laid out by this codec.
    #[error("unsupported kind '{0}'")]
    UnsupportedKind(&'static str),
    /// The value does not have the shape the schema declares.
    #[error("invalid value: expecting '{expected}', found '{found}'")]
    ValueMismatch {
        /// Kind declared by the schema.
        expected: &'static str,
        /// Kind of the actual value.
        found: &'static str,
    },
    /// A fixed byte array holds the wrong number of bytes.
    #[error("invalid fixed byte array: expecting {expected} bytes, found {found}")]
    LengthMismatch {
        /// Length declared by the schema.
        expected: usize,
        /// Length of the actual value.
        found: usize,
    },
    /// A record value has a different number of slots than its schema has fields.
    #[error("record '{record}' expects {expected} slots, found {found}")]
    SlotCountMismatch {
        /// Record name.
        record: String,
        /// Number of declared fields.
        expected: usize,
        /// Number of slots supplied.
        found: usize,
    },
    /// I/O error in the output stream.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Extensions for output streams.
pub trait Stream {
    /// Write `n` zero bytes.
    fn pad(&mut self, n: usize) -> Result<(), EncodeError>;
}

impl<W: Write + ?Sized> Stream for W {
    fn pad(&mut self, n: usize) -> Result<(), EncodeError> {
        if n == 0 { return Ok(()); }
        self.write_all(&vec![0_u8; n]).map_err(EncodeError::from)
    }
}

/// Split `n` bytes off the front of `input`.
pub fn take(input: &[u8], n: usize) -> Result<&[u8], DecodeError> {
    input.get(..n).ok_or(DecodeError::BufferUnderrun { needed: n, remaining: input.len() })
}
