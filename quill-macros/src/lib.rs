mod decode_field;
mod decode_table;
mod decode_target;
mod util;

use decode_field::FieldMetadata;
use decode_table::{TableMetadata, decode_table};
use proc_macro::TokenStream;
use proc_macro2::Span;
use quote::quote;
use syn::{Ident, ItemStruct, Result, parse_macro_input};

/// Implements `quill::Entity` describing the struct fields annotated with `#[quill(..)]`.
#[proc_macro_derive(Entity, attributes(quill))]
pub fn derive_entity(input: TokenStream) -> TokenStream {
    let item: ItemStruct = parse_macro_input!(input as ItemStruct);
    decode_table(item)
        .and_then(|table| encode_entity(&table))
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}

fn encode_entity(table: &TableMetadata) -> Result<proc_macro2::TokenStream> {
    let ident = &table.item.ident;
    let type_name = ident.to_string();
    let table_name = table.name.as_ref().map(|v| quote!(.table(#v)));
    let properties = table
        .fields
        .iter()
        .map(|field| encode_property(table, field))
        .collect::<Result<Vec<_>>>()?;
    Ok(quote! {
        impl ::quill::Entity for #ident {
            fn describe() -> ::quill::Result<&'static ::quill::EntityDescriptor> {
                static DESCRIPTOR: ::std::sync::LazyLock<
                    ::std::result::Result<::quill::EntityDescriptor, ::quill::MappingError>,
                > = ::std::sync::LazyLock::new(|| {
                    ::quill::EntityDescriptor::builder::<#ident>(#type_name)
                        #table_name
                        #(#properties)*
                        .build()
                });
                ::quill::EntityDescriptor::memoized(&DESCRIPTOR)
            }
        }
    })
}

fn encode_property(
    table: &TableMetadata,
    field: &FieldMetadata,
) -> Result<proc_macro2::TokenStream> {
    let entity = &table.item.ident;
    let ident = &field.ident;
    let ty = &field.ty;
    let name = &field.name;
    if field.extends {
        return Ok(quote! {
            .extends::<#ty>(
                {
                    fn project(entity: &#entity) -> &#ty {
                        &entity.#ident
                    }
                    project
                },
                {
                    fn project_mut(entity: &mut #entity) -> &mut #ty {
                        &mut entity.#ident
                    }
                    project_mut
                },
            )
        });
    }
    let meta = field.meta()?;
    if table.accessors {
        let getter = Ident::new(name, Span::call_site());
        let setter = Ident::new(&format!("set_{}", name), Span::call_site());
        return Ok(quote! {
            .accessors::<#ty>(#name, #entity::#getter, #entity::#setter, #meta)
        });
    }
    Ok(quote! {
        .field::<#ty>(
            #name,
            {
                fn get(entity: &#entity) -> &#ty {
                    &entity.#ident
                }
                get
            },
            {
                fn get_mut(entity: &mut #entity) -> &mut #ty {
                    &mut entity.#ident
                }
                get_mut
            },
            #meta,
        )
    })
}
