use crate::util::{first_generic, matches_path, type_path};
use syn::Type;

const WRAPPERS: [&[&str]; 4] = [
    &["std", "option", "Option"],
    &["std", "boxed", "Box"],
    &["std", "rc", "Rc"],
    &["std", "sync", "Arc"],
];

const COLLECTIONS: [&[&str]; 5] = [
    &["std", "vec", "Vec"],
    &["std", "collections", "VecDeque"],
    &["std", "collections", "HashSet"],
    &["std", "collections", "BTreeSet"],
    &["std", "collections", "LinkedList"],
];

fn is_one_of(ty: &Type, candidates: &[&[&str]]) -> bool {
    type_path(ty).is_some_and(|path| candidates.iter().any(|v| matches_path(path, v)))
}

/// Related entity of a to-one property: `Option<Box<Customer>>` => `Customer`.
pub(crate) fn decode_target(ty: &Type) -> &Type {
    let mut ty = ty;
    while is_one_of(ty, &WRAPPERS) {
        match type_path(ty).and_then(first_generic) {
            Some(inner) => ty = inner,
            None => break,
        }
    }
    ty
}

/// Element entity of a to-many property: `Option<Vec<Order>>` => `Order`.
pub(crate) fn decode_element(ty: &Type) -> Option<&Type> {
    let mut ty = ty;
    while is_one_of(ty, &WRAPPERS[..1]) {
        ty = type_path(ty).and_then(first_generic)?;
    }
    if !is_one_of(ty, &COLLECTIONS) {
        return None;
    }
    type_path(ty).and_then(first_generic).map(decode_target)
}
