//! Schema descriptors for records.
//!
//! The types can be roughly grouped into two categories:
//! - [`FieldKind`]: how a single field is laid out on the wire.
//!     - [`Width`]: byte width of an unsigned little-endian scalar.
//!     - [`FieldKind::FixedBytes`] and [`FieldKind::VarBytes`]: byte arrays and trailing buffers.
//!     - [`FieldKind::Record`]: a nested record, described by its own [`Schema`].
//! - [`Schema`]: the ordered list of [`FieldDesc`]s of a record, built with [`SchemaBuilder`].
//!
//! A schema is built once per record type and shared afterwards, hence [`SchemaBuilder::build`]
//! returns an [`Arc`]. Field order is wire order.
//! ```
//! # use record_codec::schema::{FieldKind, Schema, Width};
//! let header = Schema::builder("Header")
//!     .field("signature", FieldKind::FixedBytes(8))
//!     .field("message_type", FieldKind::Scalar(Width::U32))
//!     .build();
//! let message = Schema::builder("Message")
//!     .field("header", FieldKind::Record(header))
//!     .field_tagged("payload", FieldKind::VarBytes, "padding32")
//!     .build();
//! assert_eq!(message.offset_of("payload"), Some(12));
//! assert_eq!(message.fixed_len(), None);
//! ```
//!
//! Types that cannot be classified into one of the supported kinds are represented by
//! [`FieldKind::Unsupported`]. Such a schema can be built, but encoding or decoding it fails with
//! an `UnsupportedKind` error naming the type.

use std::fmt::{Display, Formatter};
use std::sync::Arc;
use crate::directive::Directive;

/// Width of an unsigned little-endian scalar.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Width {
    /// One byte, `u8`.
    U8,
    /// Two bytes, `u16`.
    U16,
    /// Four bytes, `u32`.
    U32,
    /// Eight bytes, `u64`.
    U64,
}

impl Width {
    /// Number of bytes occupied on the wire.
    pub fn bytes(self) -> usize {
        match self {
            Width::U8 => 1,
            Width::U16 => 2,
            Width::U32 => 4,
            Width::U64 => 8,
        }
    }

    /// Name of the corresponding Rust type.
    pub fn type_name(self) -> &'static str {
        match self {
            Width::U8 => "u8",
            Width::U16 => "u16",
            Width::U32 => "u32",
            Width::U64 => "u64",
        }
    }
}

/// Wire layout of a single field.
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum FieldKind {
    /// Unsigned integer, little-endian.
    Scalar(Width),
    /// Exactly `N` bytes, copied verbatim.
    FixedBytes(usize),
    /// All remaining bytes. Only meaningful as the last field of a record.
    VarBytes,
    /// Nested record, laid out inline.
    Record(Arc<Schema>),
    /// A type the codec cannot lay out. Carries the type name for error reporting.
    Unsupported(&'static str),
}

impl FieldKind {
    /// Short description, used in error messages.
    pub fn describe(&self) -> &'static str {
        match self {
            FieldKind::Scalar(width) => width.type_name(),
            FieldKind::FixedBytes(_) => "fixed byte array",
            FieldKind::VarBytes => "byte buffer",
            FieldKind::Record(_) => "record",
            FieldKind::Unsupported(name) => name,
        }
    }

    /// Encoded length, if it does not depend on the value.
    ///
    /// Padding directives are not taken into account.
    pub fn fixed_len(&self) -> Option<usize> {
        match self {
            FieldKind::Scalar(width) => Some(width.bytes()),
            FieldKind::FixedBytes(n) => Some(*n),
            FieldKind::Record(schema) => schema.fixed_len(),
            FieldKind::VarBytes | FieldKind::Unsupported(_) => None,
        }
    }
}

impl Display for FieldKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            FieldKind::FixedBytes(n) => write!(f, "[u8; {n}]"),
            FieldKind::Record(schema) => f.write_str(schema.name()),
            kind => f.write_str(kind.describe()),
        }
    }
}

/// One field of a [`Schema`].
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct FieldDesc {
    /// Field name, for diagnostics and lookup.
    pub name: String,
    /// Wire layout.
    pub kind: FieldKind,
    /// Encoding hint.
    pub directive: Directive,
}

/// Ordered description of the fields of a record.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Schema {
    name: String,
    fields: Vec<FieldDesc>,
}

impl Schema {
    /// Start building a schema for a record named `name`.
    pub fn builder(name: impl Into<String>) -> SchemaBuilder {
        SchemaBuilder { name: name.into(), fields: Vec::new() }
    }

    /// Name of the record.
    pub fn name(&self) -> &str { &self.name }

    /// Fields in wire order.
    pub fn fields(&self) -> &[FieldDesc] { &self.fields }

    /// Number of fields.
    pub fn len(&self) -> usize { self.fields.len() }

    /// Whether the record has no fields at all.
    pub fn is_empty(&self) -> bool { self.fields.is_empty() }

    /// Position of the field called `name`.
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.fields.iter().position(|field| field.name == name)
    }

    /// Byte offset of the field called `name`, provided every field before it has a fixed length
    /// and no padding.
    pub fn offset_of(&self, name: &str) -> Option<usize> {
        let index = self.index_of(name)?;
        self.fields[..index].iter()
            .map(|field| if field.directive.is_none() { field.kind.fixed_len() } else { None })
            .sum()
    }

    /// Total encoded length, if it does not depend on the value.
    pub fn fixed_len(&self) -> Option<usize> {
        self.fields.iter().map(|field| field.kind.fixed_len()).sum()
    }
}

/// Builder for [`Schema`]. Fields are appended in wire order.
#[derive(Debug, Clone)]
pub struct SchemaBuilder {
    name: String,
    fields: Vec<FieldDesc>,
}

impl SchemaBuilder {
    /// Append a field without directive.
    pub fn field(self, name: impl Into<String>, kind: FieldKind) -> Self {
        self.field_with(name, kind, Directive::None)
    }

    /// Append a field with an explicit directive.
    pub fn field_with(mut self, name: impl Into<String>, kind: FieldKind, directive: Directive) -> Self {
        self.fields.push(FieldDesc { name: name.into(), kind, directive });
        self
    }

    /// Append a field whose directive is given as a comma-separated tag string.
    /// See [`Directive::parse`].
    pub fn field_tagged(self, name: impl Into<String>, kind: FieldKind, tags: &str) -> Self {
        self.field_with(name, kind, Directive::parse(tags))
    }

    /// Finish building.
    pub fn build(self) -> Arc<Schema> {
        Arc::new(Schema { name: self.name, fields: self.fields })
    }
}
