use crate::{
    Accessor, MappingError, NamingPolicy, PropertyDescriptor, PropertyMeta, Result, TypeRef,
};
use log::debug;
use std::{any::Any, borrow::Cow, collections::HashSet, marker::PhantomData, sync::LazyLock};

/// A type mapped to a table.
///
/// Usually implemented with `#[derive(Entity)]`, the implementation returns a descriptor built
/// once per type and shared afterwards.
pub trait Entity: Any + Sized {
    /// Metadata of the type, the same reference on every call.
    fn describe() -> Result<&'static EntityDescriptor>;
}

/// Describe the entity `E`.
pub fn describe<E: Entity>() -> Result<&'static EntityDescriptor> {
    E::describe()
}

/// Describe the property `name` of `E`, [`MappingError::NotFound`] when there is none.
pub fn describe_property<E: Entity>(name: &str) -> Result<&'static PropertyDescriptor> {
    Ok(E::describe()?.property(name)?)
}

/// Every mapped property of `E` in declaration order.
pub fn describe_all<E: Entity>() -> Result<&'static [PropertyDescriptor]> {
    Ok(E::describe()?.properties())
}

/// Metadata of one entity type.
#[derive(Debug)]
pub struct EntityDescriptor {
    pub entity: TypeRef,
    /// Type identifier.
    pub name: &'static str,
    table: String,
    table_override: Option<&'static str>,
    properties: Vec<PropertyDescriptor>,
    identity: usize,
}

impl EntityDescriptor {
    pub fn builder<E: Any>(name: &'static str) -> EntityBuilder<E> {
        EntityBuilder {
            name,
            table: None,
            naming: NamingPolicy::default(),
            properties: Vec::new(),
            error: None,
            _entity: PhantomData,
        }
    }

    /// Reference into a lazily built descriptor, failures are memoized as well.
    pub fn memoized(
        cell: &'static LazyLock<std::result::Result<EntityDescriptor, MappingError>>,
    ) -> Result<&'static EntityDescriptor> {
        LazyLock::force(cell).as_ref().map_err(|e| e.clone().into())
    }

    /// Table name resolved with the default naming policy.
    pub fn table(&self) -> &str {
        &self.table
    }

    /// Table name resolved with `naming`, an explicit table name always wins.
    pub fn table_with(&'static self, naming: &NamingPolicy) -> Cow<'static, str> {
        if let Some(table) = self.table_override {
            Cow::Borrowed(table)
        } else if *naming == NamingPolicy::default() {
            Cow::Borrowed(&self.table)
        } else {
            Cow::Owned(naming.table_name(self.name))
        }
    }

    pub fn properties(&self) -> &[PropertyDescriptor] {
        &self.properties
    }

    pub fn identity(&self) -> &PropertyDescriptor {
        &self.properties[self.identity]
    }

    pub fn find(&self, name: &str) -> Option<&PropertyDescriptor> {
        self.properties.iter().find(|p| p.name == name)
    }

    pub fn property(&self, name: &str) -> std::result::Result<&PropertyDescriptor, MappingError> {
        self.find(name).ok_or_else(|| MappingError::NotFound {
            entity: self.name,
            property: name.to_string(),
        })
    }

    /// Properties written by INSERT statements, in declaration order.
    pub fn insertable_properties(&self) -> impl Iterator<Item = &PropertyDescriptor> {
        self.properties
            .iter()
            .filter(|p| p.written_by(self) && p.is_insertable())
    }

    /// Properties written by UPDATE statements, in declaration order.
    pub fn updatable_properties(&self) -> impl Iterator<Item = &PropertyDescriptor> {
        self.properties
            .iter()
            .filter(|p| p.written_by(self) && p.is_updatable())
    }

    /// True when properties are read through getters and setters.
    pub fn uses_accessors(&self) -> bool {
        !self.identity().accessor.is_direct_field()
    }
}

/// Explicit registration of an entity, the expansion target of `#[derive(Entity)]`.
pub struct EntityBuilder<E> {
    name: &'static str,
    table: Option<&'static str>,
    naming: NamingPolicy,
    properties: Vec<PropertyDescriptor>,
    error: Option<MappingError>,
    _entity: PhantomData<fn() -> E>,
}

impl<E: Any> EntityBuilder<E> {
    pub fn table(mut self, table: &'static str) -> Self {
        self.table = Some(table);
        self
    }

    /// Property stored in a field of `E`.
    pub fn field<T: Any>(
        mut self,
        name: &'static str,
        get: fn(&E) -> &T,
        get_mut: fn(&mut E) -> &mut T,
        meta: PropertyMeta,
    ) -> Self {
        self.properties.push(PropertyDescriptor::new::<T>(
            TypeRef::of::<E>(),
            name,
            Accessor::field(get, get_mut),
            meta,
            &self.naming,
        ));
        self
    }

    /// Property reached through a getter and a setter.
    pub fn accessors<T: Any>(
        mut self,
        name: &'static str,
        get: fn(&E) -> T,
        set: fn(&mut E, T),
        meta: PropertyMeta,
    ) -> Self {
        self.properties.push(PropertyDescriptor::new::<T>(
            TypeRef::of::<E>(),
            name,
            Accessor::pair(get, set),
            meta,
            &self.naming,
        ));
        self
    }

    /// Inherit the properties of the entity `P` embedded in `E`.
    pub fn extends<P: crate::Entity>(
        mut self,
        project: fn(&E) -> &P,
        project_mut: fn(&mut E) -> &mut P,
    ) -> Self {
        match P::describe() {
            Ok(parent) => self.properties.extend(
                parent
                    .properties()
                    .iter()
                    .map(|p| p.inherited(project, project_mut)),
            ),
            Err(e) => {
                self.error.get_or_insert(MappingError::AmbiguousMapping {
                    entity: self.name,
                    reason: format!("cannot extend `{}`: {:#}", parent_name::<P>(), e),
                });
            }
        }
        self
    }

    pub fn build(self) -> std::result::Result<EntityDescriptor, MappingError> {
        if let Some(error) = self.error {
            return Err(error);
        }
        let ambiguous = |reason: String| MappingError::AmbiguousMapping {
            entity: self.name,
            reason,
        };
        let mut names = HashSet::new();
        if let Some(p) = self.properties.iter().find(|p| !names.insert(p.name)) {
            return Err(ambiguous(format!(
                "the property `{}` is declared twice",
                p.name
            )));
        }
        let mut identities = self
            .properties
            .iter()
            .enumerate()
            .filter(|(_, p)| p.is_identity());
        let identity = match (identities.next(), identities.next()) {
            (Some((i, _)), None) => i,
            (None, _) => return Err(ambiguous("no identity property".into())),
            (Some((_, a)), Some((_, b))) => {
                return Err(ambiguous(format!(
                    "more than one identity property (`{}`, `{}`)",
                    a.name, b.name
                )));
            }
        };
        let style = &self.properties[identity].accessor;
        if let Some(p) = self
            .properties
            .iter()
            .find(|p| p.accessor.is_direct_field() != style.is_direct_field())
        {
            return Err(ambiguous(format!(
                "the identity uses {} access while `{}` uses {} access",
                style.style(),
                p.name,
                p.accessor.style()
            )));
        }
        let table = match self.table {
            Some(table) => table.to_string(),
            None => self.naming.table_name(self.name),
        };
        debug!(
            "Described entity `{}` as table `{}` with {} properties",
            self.name,
            table,
            self.properties.len()
        );
        Ok(EntityDescriptor {
            entity: TypeRef::of::<E>(),
            name: self.name,
            table,
            table_override: self.table,
            properties: self.properties,
            identity,
        })
    }
}

fn parent_name<P: Any>() -> &'static str {
    crate::short_type_name(std::any::type_name::<P>())
}
