use crate::decode_field::{FieldMetadata, decode_field};
use quote::ToTokens;
use syn::{Error, Fields, ItemStruct, LitStr, Result, parse::ParseBuffer};

pub(crate) struct TableMetadata {
    pub(crate) item: ItemStruct,
    /// Table name override.
    pub(crate) name: Option<LitStr>,
    pub(crate) fields: Vec<FieldMetadata>,
    /// Properties are read through getters and setters.
    pub(crate) accessors: bool,
}

pub(crate) fn decode_table(item: ItemStruct) -> Result<TableMetadata> {
    if !item.generics.params.is_empty() {
        return Err(Error::new_spanned(
            &item.generics,
            "Entity cannot be derived for generic structs",
        ));
    }
    if !matches!(item.fields, Fields::Named(..)) {
        return Err(Error::new_spanned(
            &item.ident,
            "Entity can only be derived for structs with named fields",
        ));
    }
    let mut name = None;
    for attr in &item.attrs {
        if !attr.path().is_ident("quill") {
            continue;
        }
        attr.parse_nested_meta(|arg| {
            if arg.path.is_ident("table") {
                let Ok(value) = arg.value().and_then(ParseBuffer::parse::<LitStr>) else {
                    return Err(arg.error(
                        "Error while parsing `table`, use it like: `#[quill(table = \"my_table\")]`",
                    ));
                };
                name = Some(value);
            } else {
                return Err(arg.error(format!(
                    "Unknown attribute `{}` inside quill macro",
                    arg.path.to_token_stream()
                )));
            }
            Ok(())
        })?;
    }
    let fields = item
        .fields
        .iter()
        .map(decode_field)
        .collect::<Result<Vec<_>>>()?;
    let accessors = fields.iter().any(|f| f.accessors);
    Ok(TableMetadata {
        item,
        name,
        fields,
        accessors,
    })
}
