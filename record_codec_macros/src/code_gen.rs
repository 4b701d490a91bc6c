use itertools::Itertools;
use proc_macro2::TokenStream;
use quote::{quote, quote_spanned};
use syn::{LitStr, ext::IdentExt, spanned::Spanned};
use crate::input::{Input, KnownAttribute};

pub fn extract_struct(input: &Input, result: &mut TokenStream) {
    let Input {
        known_attrs: _,
        attrs,
        vis,
        struct_token,
        name,
        generics,
        brace_token,
        fields,
    } = input;
    result.extend(quote! { #(#attrs)* #vis #struct_token #name #generics });
    brace_token.surround(result, |tokens| {
        tokens.extend(quote! { #fields })
    });
}

#[derive(Default)]
pub struct ExtractedArgs<'a> {
    name: Option<&'a LitStr>,
    tags: Option<&'a LitStr>,
    pub errors: TokenStream,
}

pub fn extract_args(known_attrs: &[KnownAttribute]) -> ExtractedArgs<'_> {
    let mut args = ExtractedArgs::default();
    for attr in known_attrs {
        macro_rules! set {
            ($errors:expr, $tag:literal, $field:expr, $value:expr) => {
                if $field.is_none() {
                    $field = Some($value);
                } else {
                    let msg = concat!("duplicated option `", $tag, "`");
                    $errors.extend(quote_spanned!($value.span() => compile_error!(#msg);));
                }
            }
        }
        match attr {
            KnownAttribute::Name(name) => set!(args.errors, "name", args.name, name),
            KnownAttribute::Tags(tags) => set!(args.errors, "tags", args.tags, tags),
        }
    }
    args
}

pub fn impl_record(
    input: &Input,
    args: &ExtractedArgs,
    field_args: &[ExtractedArgs],
    result: &mut TokenStream,
) {
    result.extend(args.errors.clone());
    field_args.iter().for_each(|arg| result.extend(arg.errors.clone()));
    if !input.generics.params.is_empty() {
        result.extend(quote_spanned! { input.generics.span() =>
            compile_error!("generic records are not supported: the schema is shared by every instance");
        });
        return;
    }

    let name = &input.name;
    let schema_name = match args.name {
        Some(lit) => lit.value(),
        None => name.unraw().to_string(),
    };
    let fields = input.fields.iter().map(|field| &field.name).collect::<Vec<_>>();
    let schema_fields = input.fields.iter().zip_eq(field_args)
        .map(|(field, arg)| {
            let field_name = field.name.unraw().to_string();
            let r#type = &field.r#type;
            let tags = arg.tags.map_or_else(String::new, LitStr::value);
            quote_spanned! { r#type.span() =>
                .field_tagged(#field_name, <#r#type as ::record_codec::record::Slot>::kind(), #tags)
            }
        });

    result.extend(quote! {
        impl ::record_codec::record::Record for #name {
            fn schema() -> ::std::sync::Arc<::record_codec::schema::Schema> {
                static SCHEMA: ::std::sync::OnceLock<::std::sync::Arc<::record_codec::schema::Schema>>
                    = ::std::sync::OnceLock::new();
                ::std::sync::Arc::clone(SCHEMA.get_or_init(|| {
                    ::record_codec::schema::Schema::builder(#schema_name)
                        #(#schema_fields)*
                        .build()
                }))
            }
            #[allow(unused_variables)]
            fn to_slots(&self)
                -> Result<::std::vec::Vec<::record_codec::value::Value>, ::record_codec::stream::EncodeError> {
                let Self { #(#fields),* } = self;
                Ok(::std::vec![#(::record_codec::record::Slot::to_value(#fields)?),*])
            }
            #[allow(unused_mut, unused_variables)]
            fn from_slots(slots: ::std::vec::Vec<::record_codec::value::Value>)
                -> Result<Self, ::record_codec::stream::DecodeError> {
                let schema = <Self as ::record_codec::record::Record>::schema();
                let mut slots = ::record_codec::record::Slots::new(&schema, slots)?;
                Ok(Self { #(#fields: slots.next()?),* })
            }
        }
        impl ::record_codec::record::Slot for #name {
            fn kind() -> ::record_codec::schema::FieldKind {
                ::record_codec::record::record_kind::<Self>()
            }
            fn to_value(&self) -> Result<::record_codec::value::Value, ::record_codec::stream::EncodeError> {
                ::record_codec::record::record_to_value(self)
            }
            fn from_value(value: ::record_codec::value::Value) -> Result<Self, ::record_codec::stream::DecodeError> {
                ::record_codec::record::record_from_value(value)
            }
        }
    });
}
