//! Per-field encoding directives.
//!
//! A directive is written as a comma-separated keyword list, for instance in the `record!` macro:
//! ```
//! # record_codec_macros::record! {
//! #     struct Test {
//! #[record(tags = "padding32")]
//! payload: Vec<u8>,
//! #     }
//! # }
//! ```
//! Recognised keywords are `padding32` and `padding64`, matched exactly with no surrounding
//! whitespace. Everything else is ignored, so parsing never fails. When both keywords appear,
//! the last one wins.

use std::fmt::{Display, Formatter};

/// Encoding hint attached to a single field.
#[derive(Default, Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Directive {
    /// No special treatment.
    #[default]
    None,
    /// Append `len % 4` zero bytes after a byte array or buffer.
    Padding32,
    /// Append `len % 8` zero bytes after a byte array or buffer.
    Padding64,
}

impl Directive {
    /// Parse a comma-separated directive string.
    ///
    /// ```
    /// # use record_codec::directive::Directive;
    /// assert_eq!(Directive::parse(""), Directive::None);
    /// assert_eq!(Directive::parse("padding32"), Directive::Padding32);
    /// assert_eq!(Directive::parse("padding32,padding64"), Directive::Padding64);
    /// assert_eq!(Directive::parse("len:8,padding64,whatever"), Directive::Padding64);
    /// ```
    pub fn parse(raw: &str) -> Directive {
        raw.split(',')
            .fold(Directive::None, |current, token| match token {
                "padding32" => Directive::Padding32,
                "padding64" => Directive::Padding64,
                _ => current,
            })
    }

    /// Whether this is [`Directive::None`].
    pub fn is_none(self) -> bool { self == Directive::None }

    /// Number of zero bytes to append after `len` bytes of content.
    ///
    /// This is the remainder `len % alignment`, not the distance to the next aligned length.
    /// Existing wire data depends on this exact byte count.
    pub fn padding_len(self, len: usize) -> usize {
        match self {
            Directive::None => 0,
            Directive::Padding32 => len % 4,
            Directive::Padding64 => len % 8,
        }
    }
}

impl Display for Directive {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Directive::None => "none",
            Directive::Padding32 => "padding32",
            Directive::Padding64 => "padding64",
        })
    }
}

#[cfg(test)]
mod tests {
    use super::Directive;

    #[test]
    fn unknown_and_malformed_tokens_are_ignored() {
        for raw in ["", ",", "padding", "Padding32", "padding32x", "len:8", ",,,"] {
            assert_eq!(Directive::parse(raw), Directive::None, "{raw:?}");
        }
    }

    #[test]
    fn last_keyword_wins() {
        assert_eq!(Directive::parse("padding64,padding32"), Directive::Padding32);
        assert_eq!(Directive::parse("padding32,bogus"), Directive::Padding32);
    }

    #[test]
    fn tokens_match_exactly() {
        assert_eq!(Directive::parse(" padding32"), Directive::None);
        assert_eq!(Directive::parse("padding64 "), Directive::None);
        assert_eq!(Directive::parse("padding32, padding64"), Directive::Padding32);
    }

    #[test]
    fn padding_is_a_plain_remainder() {
        assert_eq!(Directive::Padding32.padding_len(5), 1);
        assert_eq!(Directive::Padding32.padding_len(7), 3);
        assert_eq!(Directive::Padding32.padding_len(8), 0);
        assert_eq!(Directive::Padding64.padding_len(5), 5);
        assert_eq!(Directive::Padding64.padding_len(16), 0);
        assert_eq!(Directive::None.padding_len(5), 0);
    }
}
