use std::cmp::min;
use syn::{GenericArgument, Path, PathArguments, Type, TypePath};

/// True when the trailing segments of `path` match `expect`: `std::vec::Vec` matches `["Vec"]`.
pub(crate) fn matches_path(path: &Path, expect: &[&str]) -> bool {
    let len = min(path.segments.len(), expect.len());
    path.segments
        .iter()
        .rev()
        .take(len)
        .map(|v| &v.ident)
        .eq(expect.iter().rev().take(len))
}

/// First generic type argument of the last path segment.
pub(crate) fn first_generic(path: &Path) -> Option<&Type> {
    let PathArguments::AngleBracketed(args) = &path.segments.last()?.arguments else {
        return None;
    };
    args.args.iter().find_map(|v| match v {
        GenericArgument::Type(ty) => Some(ty),
        _ => None,
    })
}

pub(crate) fn type_path(ty: &Type) -> Option<&Path> {
    match ty {
        Type::Path(TypePath { path, qself: None }) => Some(path),
        Type::Group(group) => type_path(&group.elem),
        Type::Paren(paren) => type_path(&paren.elem),
        _ => None,
    }
}
