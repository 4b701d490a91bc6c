use itertools::Itertools;
use proc_macro2::{Ident, TokenStream};
use quote::ToTokens;
use syn::punctuated::Punctuated;
use syn::{Token, braced, Attribute, Visibility, Type, Generics, Meta, LitStr, Error};
use syn::parse::{Parse, ParseStream};
use syn::token::Brace;

/// Input for the macro. Looks like a `struct` definition.
pub struct Input {
    pub known_attrs: Vec<KnownAttribute>,
    pub attrs: Vec<Attribute>,
    pub vis: Visibility,
    pub struct_token: Token![struct],
    pub name: Ident,
    pub generics: Generics,
    pub brace_token: Brace,
    pub fields: Punctuated<Field, Token![,]>,
}

impl Parse for Input {
    fn parse(input: ParseStream) -> syn::Result<Self> {
        let attrs = Attribute::parse_outer(input)?;
        let (ResultVec(known_attrs), attrs) = attrs.into_iter()
            .map(|attr| KnownAttribute::new(attr, false))
            .partition_result();
        let contents;
        Ok(Input {
            known_attrs: known_attrs?,
            attrs,
            vis: input.parse()?,
            struct_token: input.parse()?,
            name: input.parse()?,
            generics: input.parse()?,
            brace_token: braced!(contents in input),
            fields: Punctuated::parse_terminated(&contents)?,
        })
    }
}

/// Field: `pub field: Type`
pub struct Field {
    pub known_attrs: Vec<KnownAttribute>,
    pub attrs: Vec<Attribute>,
    pub vis: Visibility,
    pub name: Ident,
    pub colon_token: Token![:],
    pub r#type: Type,
}

struct ResultVec<T, E>(Result<Vec<T>, E>);

impl<T, E> Default for ResultVec<T, E> {
    fn default() -> Self { ResultVec(Ok(Vec::new())) }
}

impl<T, E> Extend<Result<T, E>> for ResultVec<T, E> {
    fn extend<I: IntoIterator<Item = Result<T, E>>>(&mut self, iter: I) {
        let Ok(target) = &mut self.0 else { return; };
        for item in iter {
            match item {
                Ok(value) => target.push(value),
                Err(err) => return self.0 = Err(err),
            }
        }
    }
}

impl Parse for Field {
    fn parse(input: ParseStream) -> syn::Result<Self> {
        let attrs = Attribute::parse_outer(input)?;
        let (ResultVec(known_attrs), attrs) = attrs.into_iter()
            .map(|attr| KnownAttribute::new(attr, true))
            .partition_result();
        Ok(Field {
            known_attrs: known_attrs?,
            attrs,
            vis: input.parse()?,
            name: input.parse()?,
            colon_token: input.parse()?,
            r#type: input.parse()?,
        })
    }
}

impl ToTokens for Field {
    fn to_tokens(&self, tokens: &mut TokenStream) {
        self.attrs.iter().for_each(|attr| attr.to_tokens(tokens));
        self.vis.to_tokens(tokens);
        self.name.to_tokens(tokens);
        self.colon_token.to_tokens(tokens);
        self.r#type.to_tokens(tokens);
    }
}

/// Options given as `#[record(...)]`.
pub enum KnownAttribute {
    /// `#[record(name = "...")]` on the struct: the schema name.
    Name(LitStr),
    /// `#[record(tags = "...")]` on a field: comma-separated directives.
    Tags(LitStr),
}

impl KnownAttribute {
    fn new(attr: Attribute, field: bool) -> Result<syn::Result<KnownAttribute>, Attribute> {
        if !attr.path().is_ident("record") { return Err(attr); }
        let Meta::List(list) = attr.meta else { return Err(attr); };
        Ok(list.parse_args_with(|input: ParseStream| {
            let cmd: Ident = input.parse()?;
            let _: Token![=] = input.parse()?;
            match cmd.to_string().as_str() {
                "tags" if field => input.parse().map(KnownAttribute::Tags),
                "name" if !field => input.parse().map(KnownAttribute::Name),
                _ => Err(Error::new(cmd.span(), "unknown attribute for `record`")),
            }
        }))
    }
}
