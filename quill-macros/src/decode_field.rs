use crate::decode_target::{decode_element, decode_target};
use proc_macro2::TokenStream;
use quote::{ToTokens, quote};
use syn::{
    Error, Field, Ident, LitBool, LitStr, Result, Type, meta::ParseNestedMeta, parse::ParseBuffer,
};

#[derive(Clone, Copy, PartialEq, Eq)]
pub(crate) enum RelationKind {
    OneToOne,
    ManyToOne,
    OneToMany,
    ManyToMany,
}

impl RelationKind {
    fn from_ident(ident: &Ident) -> Option<Self> {
        Some(if ident == "one_to_one" {
            RelationKind::OneToOne
        } else if ident == "many_to_one" {
            RelationKind::ManyToOne
        } else if ident == "one_to_many" {
            RelationKind::OneToMany
        } else if ident == "many_to_many" {
            RelationKind::ManyToMany
        } else {
            return None;
        })
    }
    fn is_collection(&self) -> bool {
        matches!(self, RelationKind::OneToMany | RelationKind::ManyToMany)
    }
    fn constructor(&self) -> Ident {
        let name = match self {
            RelationKind::OneToOne => "one_to_one",
            RelationKind::ManyToOne => "many_to_one",
            RelationKind::OneToMany => "one_to_many",
            RelationKind::ManyToMany => "many_to_many",
        };
        Ident::new(name, proc_macro2::Span::call_site())
    }
}

pub(crate) struct RelationMetadata {
    pub(crate) kind: RelationKind,
    pub(crate) mapped_by: Option<LitStr>,
    /// Explicit target, the field holds the key of the related row.
    pub(crate) target: Option<Type>,
}

#[derive(Default)]
pub(crate) struct JoinTableMetadata {
    pub(crate) name: Option<LitStr>,
    pub(crate) join_column: Option<LitStr>,
    pub(crate) inverse_join_column: Option<LitStr>,
}

pub(crate) struct FieldMetadata {
    pub(crate) ident: Ident,
    pub(crate) ty: Type,
    /// Property name, the identifier without a leading underscore.
    pub(crate) name: String,
    pub(crate) identity: bool,
    pub(crate) accessors: bool,
    pub(crate) extends: bool,
    pub(crate) column: Option<LitStr>,
    pub(crate) generated: bool,
    pub(crate) transient: bool,
    pub(crate) static_member: bool,
    pub(crate) insertable: bool,
    pub(crate) updatable: bool,
    pub(crate) relation: Option<RelationMetadata>,
    pub(crate) join_column: Option<LitStr>,
    pub(crate) join_table: Option<JoinTableMetadata>,
}

fn flag(arg: &ParseNestedMeta) -> Result<bool> {
    if arg.input.peek(syn::Token![=]) {
        let name = arg.path.to_token_stream().to_string();
        return Err(arg.error(format!(
            "Error while parsing `{name}`, use it like: `#[quill({name})]`"
        )));
    }
    Ok(true)
}

fn string(arg: &ParseNestedMeta, example: &str) -> Result<LitStr> {
    arg.value()
        .and_then(ParseBuffer::parse::<LitStr>)
        .map_err(|e| {
            let name = arg.path.to_token_stream().to_string();
            Error::new(
                e.span(),
                format!("Error while parsing `{name}`, use it like: `#[quill({name} = \"{example}\")]`"),
            )
        })
}

fn boolean(arg: &ParseNestedMeta) -> Result<bool> {
    let name = arg.path.to_token_stream().to_string();
    arg.value()
        .and_then(ParseBuffer::parse::<LitBool>)
        .map(|v| v.value)
        .map_err(|e| {
            Error::new(
                e.span(),
                format!("Error while parsing `{name}`, use it like: `#[quill({name} = false)]`"),
            )
        })
}

fn decode_relation(arg: &ParseNestedMeta, kind: RelationKind) -> Result<RelationMetadata> {
    let mut relation = RelationMetadata {
        kind,
        mapped_by: None,
        target: None,
    };
    if arg.input.is_empty() || arg.input.peek(syn::Token![,]) {
        return Ok(relation);
    }
    arg.parse_nested_meta(|inner| {
        if inner.path.is_ident("mapped_by") {
            relation.mapped_by = Some(string(&inner, "property")?);
        } else if inner.path.is_ident("target") {
            relation.target = Some(inner.value()?.parse::<Type>()?);
        } else {
            return Err(inner.error(format!(
                "Unknown relation argument `{}`, expected `mapped_by` or `target`",
                inner.path.to_token_stream()
            )));
        }
        Ok(())
    })?;
    Ok(relation)
}

fn decode_join_table(arg: &ParseNestedMeta) -> Result<JoinTableMetadata> {
    let mut join_table = JoinTableMetadata::default();
    if arg.input.is_empty() || arg.input.peek(syn::Token![,]) {
        return Ok(join_table);
    }
    arg.parse_nested_meta(|inner| {
        if inner.path.is_ident("name") {
            join_table.name = Some(string(&inner, "join_table_name")?);
        } else if inner.path.is_ident("join_column") {
            join_table.join_column = Some(string(&inner, "owner_id")?);
        } else if inner.path.is_ident("inverse_join_column") {
            join_table.inverse_join_column = Some(string(&inner, "other_id")?);
        } else {
            return Err(inner.error(format!(
                "Unknown join_table argument `{}`, expected `name`, `join_column` or `inverse_join_column`",
                inner.path.to_token_stream()
            )));
        }
        Ok(())
    })?;
    Ok(join_table)
}

pub(crate) fn decode_field(field: &Field) -> Result<FieldMetadata> {
    let Some(ident) = field.ident.clone() else {
        return Err(Error::new_spanned(
            field,
            "Entity can only be derived for structs with named fields",
        ));
    };
    let mut name = ident.to_string();
    if name.starts_with('_') {
        name.remove(0);
    }
    let mut metadata = FieldMetadata {
        ident,
        ty: field.ty.clone(),
        name,
        identity: false,
        accessors: false,
        extends: false,
        column: None,
        generated: false,
        transient: false,
        static_member: false,
        insertable: true,
        updatable: true,
        relation: None,
        join_column: None,
        join_table: None,
    };
    for attr in &field.attrs {
        if !attr.path().is_ident("quill") {
            continue;
        }
        attr.parse_nested_meta(|arg| {
            if arg.path.is_ident("id") {
                metadata.identity = flag(&arg)?;
            } else if arg.path.is_ident("accessors") {
                metadata.accessors = flag(&arg)?;
            } else if arg.path.is_ident("extends") {
                metadata.extends = flag(&arg)?;
            } else if arg.path.is_ident("column") {
                metadata.column = Some(string(&arg, "my_column")?);
            } else if arg.path.is_ident("generated") {
                metadata.generated = flag(&arg)?;
            } else if arg.path.is_ident("transient") {
                metadata.transient = flag(&arg)?;
            } else if arg.path.is_ident("static_member") {
                metadata.static_member = flag(&arg)?;
            } else if arg.path.is_ident("insertable") {
                metadata.insertable = boolean(&arg)?;
            } else if arg.path.is_ident("updatable") {
                metadata.updatable = boolean(&arg)?;
            } else if arg.path.is_ident("join_column") {
                metadata.join_column = Some(string(&arg, "other_id")?);
            } else if arg.path.is_ident("join_table") {
                metadata.join_table = Some(decode_join_table(&arg)?);
            } else if let Some(kind) = arg.path.get_ident().and_then(RelationKind::from_ident) {
                if metadata.relation.is_some() {
                    return Err(arg.error("A property can declare only one relationship"));
                }
                metadata.relation = Some(decode_relation(&arg, kind)?);
            } else {
                return Err(arg.error(format!(
                    "Unknown attribute `{}` inside quill macro",
                    arg.path.to_token_stream()
                )));
            }
            Ok(())
        })?;
    }
    if metadata.accessors && !metadata.identity {
        return Err(Error::new_spanned(
            &metadata.ident,
            "`accessors` is only allowed on the identity: `#[quill(id, accessors)]`",
        ));
    }
    if metadata.extends && (metadata.identity || metadata.relation.is_some()) {
        return Err(Error::new_spanned(
            &metadata.ident,
            "`extends` cannot be combined with `id` or a relationship",
        ));
    }
    Ok(metadata)
}

impl FieldMetadata {
    /// `::quill::PropertyMeta` expression.
    pub(crate) fn meta(&self) -> Result<TokenStream> {
        let mut meta = quote!(::quill::PropertyMeta::new());
        if let Some(column) = &self.column {
            meta.extend(quote!(.column(#column)));
        }
        if self.identity {
            meta.extend(quote!(.identity()));
        }
        if self.generated {
            meta.extend(quote!(.generated()));
        }
        if self.transient {
            meta.extend(quote!(.transient()));
        }
        if self.static_member {
            meta.extend(quote!(.static_member()));
        }
        if !self.insertable {
            meta.extend(quote!(.insertable(false)));
        }
        if !self.updatable {
            meta.extend(quote!(.updatable(false)));
        }
        if let Some(relation) = &self.relation {
            let relation = self.relation(relation)?;
            meta.extend(quote!(.relation(#relation)));
        }
        if let Some(join_column) = &self.join_column {
            meta.extend(quote!(.join_column(#join_column)));
        }
        if let Some(join_table) = &self.join_table {
            let option = |v: &Option<LitStr>| match v {
                Some(v) => quote!(::std::option::Option::Some(#v)),
                None => quote!(::std::option::Option::None),
            };
            let name = option(&join_table.name);
            let join_column = option(&join_table.join_column);
            let inverse_join_column = option(&join_table.inverse_join_column);
            meta.extend(quote! {
                .join_table(::quill::JoinTableDef {
                    name: #name,
                    join_column: #join_column,
                    inverse_join_column: #inverse_join_column,
                })
            });
        }
        Ok(meta)
    }

    fn relation(&self, relation: &RelationMetadata) -> Result<TokenStream> {
        let target = match &relation.target {
            Some(target) => target,
            None if relation.kind.is_collection() => {
                decode_element(&self.ty).ok_or_else(|| {
                    Error::new_spanned(
                        &self.ty,
                        "Cannot extract the related entity, use a collection (`Vec<Entity>`, ..) or declare it: `target = Entity`",
                    )
                })?
            }
            None => decode_target(&self.ty),
        };
        let constructor = relation.kind.constructor();
        let mut result = quote!(::quill::Relation::#constructor::<#target>());
        if let Some(mapped_by) = &relation.mapped_by {
            result.extend(quote!(.mapped_by(#mapped_by)));
        }
        if relation.target.is_some() && !relation.kind.is_collection() {
            result.extend(quote!(.holds_key()));
        }
        Ok(result)
    }
}
