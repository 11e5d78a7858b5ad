// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

extern crate proc_macro;

use proc_macro::TokenStream;
use quote::{format_ident, quote};
use syn::{parse_macro_input, parse_quote, Data, DeriveInput, Fields, Ident};

/// How the derived impl obtains its decode procedure.
enum Procedure {
    /// Field-by-field in declaration order.
    Structural,
    /// `Self::read_<snake_case_name>(cursor)`.
    CustomByConvention,
    /// A user-named function with the same signature.
    CustomPath(syn::Path),
}

/// One struct field as seen by the generator.
struct FieldInfo {
    /// `None` for tuple fields.
    ident: Option<Ident>,
    /// Name reported in field descriptors (`"0"`, `"1"`, ... for tuple fields).
    label: String,
    ty: syn::Type,
    skip: bool,
}

/// `#[derive(Decode)]` macro: generates a `wirebuf::Decode` impl
///
/// Without attributes the impl is structural: every field is read through
/// `Cursor::read` in declaration order and the value is built in one step.
///
/// Attributes:
/// - `#[wire(custom)]` on the struct: decode with `Self::read_<snake_case_name>`
/// - `#[wire(custom = "path::to::fn")]` on the struct: decode with that function
/// - `#[wire(skip)]` on a field: not read, filled with `Default::default()`
///
/// Type parameters get a `wirebuf::Decode` bound. Lifetime parameters are
/// rejected because decoded values own their data.
///
/// Example:
/// ```ignore
/// use wirebuf::Decode;
///
/// #[derive(Decode)]
/// struct PlayerState {
///     id: u32,
///     name: String,
///     position: wirebuf::Vector3,
///     #[wire(skip)]
///     cached_score: u64,
/// }
///
/// #[derive(Decode)]
/// #[wire(custom)]
/// struct Heading(f32);
///
/// impl Heading {
///     fn read_heading(cursor: &mut wirebuf::Cursor<'_>) -> wirebuf::Result<Self> {
///         Ok(Heading(f32::from(cursor.read_u16()?) / 100.0))
///     }
/// }
/// ```
#[proc_macro_derive(Decode, attributes(wire))]
pub fn derive_decode(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    match expand(&input) {
        Ok(tokens) => tokens.into(),
        Err(err) => err.to_compile_error().into(),
    }
}

fn expand(input: &DeriveInput) -> syn::Result<proc_macro2::TokenStream> {
    let name = &input.ident;
    let procedure = parse_struct_attrs(input)?;

    let data = match &input.data {
        Data::Struct(data) => data,
        _ => {
            return Err(syn::Error::new_spanned(
                input,
                "Only structs are supported",
            ))
        }
    };

    if let Some(lifetime) = input.generics.lifetimes().next() {
        return Err(syn::Error::new_spanned(
            lifetime,
            "Lifetime parameters are not supported: decoded values own their data",
        ));
    }

    let mut generics = input.generics.clone();
    for param in generics.type_params_mut() {
        param.bounds.push(parse_quote!(::wirebuf::Decode));
    }
    let (impl_generics, ty_generics, where_clause) = generics.split_for_impl();

    let body = match procedure {
        Procedure::CustomByConvention => {
            let reader = format_ident!("read_{}", to_snake_case(&name.to_string()));
            quote! {
                const SOURCE: ::wirebuf::HandlerSource = ::wirebuf::HandlerSource::Custom;

                fn decode(cursor: &mut ::wirebuf::Cursor<'_>) -> ::wirebuf::Result<Self> {
                    Self::#reader(cursor)
                }
            }
        }
        Procedure::CustomPath(path) => quote! {
            const SOURCE: ::wirebuf::HandlerSource = ::wirebuf::HandlerSource::Custom;

            fn decode(cursor: &mut ::wirebuf::Cursor<'_>) -> ::wirebuf::Result<Self> {
                #path(cursor)
            }
        },
        Procedure::Structural => structural_body(&data.fields)?,
    };

    Ok(quote! {
        impl #impl_generics ::wirebuf::Decode for #name #ty_generics #where_clause {
            #body
        }
    })
}

/// SOURCE, MIN_WIRE_SIZE, fields() and the builder for structural types.
fn structural_body(fields: &Fields) -> syn::Result<proc_macro2::TokenStream> {
    let infos = collect_fields(fields)?;
    let decoded: Vec<&FieldInfo> = infos.iter().filter(|f| !f.skip).collect();

    let min_sizes = decoded.iter().map(|f| {
        let ty = &f.ty;
        quote! { + <#ty as ::wirebuf::Decode>::MIN_WIRE_SIZE }
    });

    let descriptors = decoded.iter().map(|f| {
        let ty = &f.ty;
        let label = &f.label;
        quote! { ::wirebuf::FieldDescriptor::of::<#ty>(#label) }
    });

    let bindings: Vec<Ident> = (0..infos.len())
        .map(|i| format_ident!("__field{}", i))
        .collect();

    let reads = infos.iter().zip(&bindings).map(|(f, binding)| {
        let ty = &f.ty;
        if f.skip {
            quote! { let #binding: #ty = ::core::default::Default::default(); }
        } else {
            quote! { let #binding = cursor.read::<#ty>()?; }
        }
    });

    let construct = match fields {
        Fields::Named(_) => {
            let assigns = infos.iter().zip(&bindings).map(|(f, binding)| {
                let ident = &f.ident;
                quote! { #ident: #binding }
            });
            quote! { Self { #(#assigns),* } }
        }
        Fields::Unnamed(_) => quote! { Self( #(#bindings),* ) },
        Fields::Unit => quote! { Self },
    };

    Ok(quote! {
        const SOURCE: ::wirebuf::HandlerSource = ::wirebuf::HandlerSource::Structural;
        const MIN_WIRE_SIZE: usize = 0 #(#min_sizes)*;

        fn fields() -> ::std::vec::Vec<::wirebuf::FieldDescriptor> {
            ::std::vec![ #(#descriptors),* ]
        }

        #[allow(unused_variables)]
        fn decode(cursor: &mut ::wirebuf::Cursor<'_>) -> ::wirebuf::Result<Self> {
            #(#reads)*
            ::core::result::Result::Ok(#construct)
        }
    })
}

fn collect_fields(fields: &Fields) -> syn::Result<Vec<FieldInfo>> {
    let mut infos = Vec::new();
    for (index, field) in fields.iter().enumerate() {
        let mut skip = false;
        for attr in &field.attrs {
            if !attr.path().is_ident("wire") {
                continue;
            }
            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("skip") {
                    skip = true;
                    Ok(())
                } else {
                    Err(meta.error("Unsupported field attribute, expected `skip`"))
                }
            })?;
        }

        let label = field
            .ident
            .as_ref()
            .map_or_else(|| index.to_string(), ToString::to_string);

        infos.push(FieldInfo {
            ident: field.ident.clone(),
            label,
            ty: field.ty.clone(),
            skip,
        });
    }
    Ok(infos)
}

fn parse_struct_attrs(input: &DeriveInput) -> syn::Result<Procedure> {
    let mut procedure = Procedure::Structural;
    for attr in &input.attrs {
        if !attr.path().is_ident("wire") {
            continue;
        }
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("custom") {
                procedure = if meta.input.peek(syn::Token![=]) {
                    let lit: syn::LitStr = meta.value()?.parse()?;
                    Procedure::CustomPath(lit.parse()?)
                } else {
                    Procedure::CustomByConvention
                };
                Ok(())
            } else {
                Err(meta.error("Unsupported struct attribute, expected `custom`"))
            }
        })?;
    }
    Ok(procedure)
}

/// `PlayerState` -> `player_state`, `HTTPHeader` -> `http_header`
fn to_snake_case(name: &str) -> String {
    let chars: Vec<char> = name.chars().collect();
    let mut out = String::with_capacity(name.len() + 4);
    for (i, &c) in chars.iter().enumerate() {
        if c.is_uppercase() {
            let prev_lower = i > 0 && (chars[i - 1].is_lowercase() || chars[i - 1].is_ascii_digit());
            let acronym_end = i > 0
                && chars[i - 1].is_uppercase()
                && chars.get(i + 1).is_some_and(|n| n.is_lowercase());
            if prev_lower || acronym_end {
                out.push('_');
            }
            out.extend(c.to_lowercase());
        } else {
            out.push(c);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snake_case() {
        assert_eq!(to_snake_case("Heading"), "heading");
        assert_eq!(to_snake_case("PlayerState"), "player_state");
        assert_eq!(to_snake_case("HTTPHeader"), "http_header");
        assert_eq!(to_snake_case("Vec3Packed"), "vec3_packed");
    }

    #[test]
    fn test_structural_expansion_reads_fields_in_order() {
        let input: DeriveInput = parse_quote! {
            struct Pair { a: i32, #[wire(skip)] cache: u8, b: String }
        };
        let out = expand(&input).expect("expand should succeed").to_string();
        let a = out.find("let __field0 = cursor . read :: < i32 >").expect("a read");
        let b = out.find("let __field2 = cursor . read :: < String >").expect("b read");
        assert!(a < b);
        assert!(out.contains("HandlerSource :: Structural"));
        assert!(!out.contains("FieldDescriptor :: of :: < u8 >"));
    }

    #[test]
    fn test_custom_by_convention() {
        let input: DeriveInput = parse_quote! {
            #[wire(custom)]
            struct PlayerState(u8);
        };
        let out = expand(&input).expect("expand should succeed").to_string();
        assert!(out.contains("Self :: read_player_state (cursor)"));
        assert!(out.contains("HandlerSource :: Custom"));
    }

    #[test]
    fn test_custom_path() {
        let input: DeriveInput = parse_quote! {
            #[wire(custom = "codecs::packed_heading")]
            struct Heading(f32);
        };
        let out = expand(&input).expect("expand should succeed").to_string();
        assert!(out.contains("codecs :: packed_heading (cursor)"));
    }

    #[test]
    fn test_rejects_enums_and_lifetimes() {
        let input: DeriveInput = parse_quote! { enum Mode { A, B } };
        assert!(expand(&input).is_err());

        let input: DeriveInput = parse_quote! { struct View<'a> { bytes: &'a [u8] } };
        assert!(expand(&input).is_err());
    }

    #[test]
    fn test_rejects_unknown_attribute() {
        let input: DeriveInput = parse_quote! {
            #[wire(packed)]
            struct Heading(f32);
        };
        assert!(expand(&input).is_err());
    }
}
