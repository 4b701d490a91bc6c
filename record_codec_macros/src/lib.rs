//! Supporting macros for `record_codec`.

#![warn(missing_docs)]

mod input;
mod code_gen;

use proc_macro2::TokenStream;
use syn::parse_macro_input;
use crate::code_gen::{extract_args, extract_struct, impl_record};
use crate::input::Input;

/// Declare a record: a struct whose fields are laid out in declaration order.
///
/// ```
/// record_codec_macros::record! {
///     #[derive(Debug, Default)]
///     #[record(name = "AV_PAIR")]
///     pub struct AvPair {
///         pub id: u16,
///         pub len: u16,
///         #[record(tags = "padding32")]
///         pub value: Vec<u8>,
///     }
/// }
/// # use record_codec::record::Record;
/// assert_eq!(AvPair::schema().name(), "AV_PAIR");
/// ```
///
/// Field types must implement `record_codec::record::Slot`. Options:
/// - `#[record(name = "...")]` on the struct overrides the schema name.
/// - `#[record(tags = "...")]` on a field gives comma-separated directives, e.g. `padding32`.
#[proc_macro]
pub fn record(input: proc_macro::TokenStream) -> proc_macro::TokenStream {
    let input = parse_macro_input!(input as Input);
    let mut result = TokenStream::new();
    extract_struct(&input, &mut result);
    let args = extract_args(&input.known_attrs);
    let field_args = input.fields.iter()
        .map(|field| extract_args(&field.known_attrs))
        .collect::<Vec<_>>();
    impl_record(&input, &args, &field_args, &mut result);
    result.into()
}
