use crate::{
    Accessor, EntityDescriptor, ErrorContext, JoinTableDef, MappingError, NamingPolicy, Relation,
    RelationKind, Result, TypeRef,
};
use std::{any::Any, borrow::Cow};

/// Declarative metadata of one property, as written in `#[quill(..)]` or passed to
/// [`EntityBuilder`](crate::EntityBuilder).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PropertyMeta {
    /// Column override.
    pub column: Option<&'static str>,
    pub identity: bool,
    /// Identity or sequence generated, never written.
    pub generated: bool,
    /// Not persistent.
    pub transient: bool,
    /// Type level member, not stored per instance.
    pub is_static: bool,
    pub insertable: bool,
    pub updatable: bool,
    pub relation: Relation,
    /// Join column override of a relationship.
    pub join_column: Option<&'static str>,
    pub join_table: Option<JoinTableDef>,
}

impl PropertyMeta {
    pub const fn new() -> Self {
        Self {
            column: None,
            identity: false,
            generated: false,
            transient: false,
            is_static: false,
            insertable: true,
            updatable: true,
            relation: Relation::NONE,
            join_column: None,
            join_table: None,
        }
    }
    pub const fn column(mut self, column: &'static str) -> Self {
        self.column = Some(column);
        self
    }
    pub const fn identity(mut self) -> Self {
        self.identity = true;
        self
    }
    pub const fn generated(mut self) -> Self {
        self.generated = true;
        self
    }
    pub const fn transient(mut self) -> Self {
        self.transient = true;
        self
    }
    pub const fn static_member(mut self) -> Self {
        self.is_static = true;
        self
    }
    pub const fn insertable(mut self, insertable: bool) -> Self {
        self.insertable = insertable;
        self
    }
    pub const fn updatable(mut self, updatable: bool) -> Self {
        self.updatable = updatable;
        self
    }
    pub const fn relation(mut self, relation: Relation) -> Self {
        self.relation = relation;
        self
    }
    pub const fn join_column(mut self, join_column: &'static str) -> Self {
        self.join_column = Some(join_column);
        self
    }
    pub const fn join_table(mut self, join_table: JoinTableDef) -> Self {
        self.join_table = Some(join_table);
        self
    }
}

impl Default for PropertyMeta {
    fn default() -> Self {
        Self::new()
    }
}

/// One mapped property of an entity.
#[derive(Debug, Clone)]
pub struct PropertyDescriptor {
    pub name: &'static str,
    /// Declared type of the property.
    pub value_type: TypeRef,
    /// Entity declaring the property, differs from the described entity when inherited.
    pub declared_by: TypeRef,
    /// Resolved column name.
    pub column: Cow<'static, str>,
    pub accessor: Accessor,
    pub meta: PropertyMeta,
}

impl PropertyDescriptor {
    pub(crate) fn new<T: Any>(
        declared_by: TypeRef,
        name: &'static str,
        accessor: Accessor,
        meta: PropertyMeta,
        naming: &NamingPolicy,
    ) -> Self {
        let column = match meta.column {
            Some(column) => Cow::Borrowed(column),
            None => Cow::Borrowed(naming.column_name(name)),
        };
        Self {
            name,
            value_type: TypeRef::of::<T>(),
            declared_by,
            column,
            accessor,
            meta,
        }
    }

    pub fn relation_kind(&self) -> RelationKind {
        self.meta.relation.kind
    }
    pub fn relation(&self) -> &Relation {
        &self.meta.relation
    }
    /// True on the inverse (mapped-by) side of a bidirectional relationship.
    pub fn is_inverse(&self) -> bool {
        self.meta.relation.is_inverse()
    }
    pub fn target(&self) -> Option<&TypeRef> {
        self.meta.relation.target.as_ref().map(|t| &t.ty)
    }
    pub fn is_identity(&self) -> bool {
        self.meta.identity
    }
    pub fn is_generated(&self) -> bool {
        self.meta.generated
    }
    pub fn is_transient(&self) -> bool {
        self.meta.transient
    }
    pub fn is_static(&self) -> bool {
        self.meta.is_static
    }
    pub fn is_insertable(&self) -> bool {
        self.meta.insertable
    }
    pub fn is_updatable(&self) -> bool {
        self.meta.updatable
    }

    /// Column of this property.
    ///
    /// A to-one relationship uses its join column override verbatim, otherwise it appends
    /// `foreign_key_suffix` when one is requested and the property holds the related entity.
    /// Every other property uses its own column.
    pub fn column_name(&self, foreign_key_suffix: &str) -> Cow<'_, str> {
        if self.meta.relation.kind.is_to_one() {
            if let Some(join_column) = self.meta.join_column {
                return Cow::Borrowed(join_column);
            }
            if !foreign_key_suffix.is_empty() && !self.meta.relation.holds_key {
                return Cow::Owned(format!("{}{}", self.column, foreign_key_suffix));
            }
        }
        Cow::Borrowed(&self.column)
    }

    /// Join column explicitly declared by this relationship, if any.
    pub fn declared_join_column(&self) -> Option<&str> {
        if let Some(join_column) = self.meta.join_column {
            return Some(join_column);
        }
        let relation = &self.meta.relation;
        if relation.kind.is_to_one() && (relation.holds_key || self.meta.column.is_some()) {
            return Some(&self.column);
        }
        None
    }

    /// Physical column stored on the declaring table.
    ///
    /// For a to-one relationship without a declared join column it is derived from the related
    /// table and its identity column.
    pub fn physical_column(&self, naming: &NamingPolicy) -> Result<Cow<'_, str>> {
        if !self.meta.relation.kind.is_to_one() {
            return Ok(self.column_name(""));
        }
        if let Some(column) = self.declared_join_column() {
            return Ok(Cow::Borrowed(column));
        }
        let Some(target) = self.meta.relation.target else {
            return Ok(self.column_name(""));
        };
        let target = target.describe()?;
        Ok(Cow::Owned(naming.foreign_key(
            &target.table_with(naming),
            &target.identity().physical_column(naming)?,
        )))
    }

    /// Read the property from an entity instance.
    pub fn get<T: Any + Clone>(&self, instance: &dyn Any) -> Result<T> {
        self.accessor
            .read(instance)
            .with_context(|| self.access_error())
    }

    /// Write the property of an entity instance.
    pub fn set<T: Any>(&self, instance: &mut dyn Any, value: T) -> Result<()> {
        self.accessor
            .write(instance, value)
            .with_context(|| self.access_error())
    }

    fn access_error(&self) -> MappingError {
        MappingError::Access {
            entity: self.declared_by.short_name(),
            property: self.name,
        }
    }

    /// Copy of this property as seen from an entity embedding the declaring one.
    pub(crate) fn inherited<E: Any, P: Any>(
        &self,
        project: fn(&E) -> &P,
        project_mut: fn(&mut E) -> &mut P,
    ) -> Self {
        Self {
            accessor: self.accessor.project(project, project_mut),
            ..self.clone()
        }
    }

    pub(crate) fn written_by(&self, entity: &EntityDescriptor) -> bool {
        !(self.is_transient()
            || self.is_static()
            || self.is_generated()
            || self.declared_by != entity.entity
            || self.meta.relation.kind.is_collection())
    }
}
