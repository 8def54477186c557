use crate::{
    DeleteBuilder, Dialect, Entity, InsertBuilder, NamingPolicy, Result, SelectBuilder,
    StandardDialect, TableInfo, UpdateBuilder,
};

/// Entry point creating statement builders for a dialect and a naming policy.
///
/// ```
/// use quill_core::{PostgresDialect, Queries};
/// static POSTGRES: Queries<PostgresDialect> = Queries::new(PostgresDialect);
/// ```
#[derive(Default, Debug, Clone, Copy)]
pub struct Queries<D: Dialect = StandardDialect> {
    dialect: D,
    naming: NamingPolicy,
}

/// Standard SQL with the default naming policy.
pub static STANDARD: Queries = Queries::new(StandardDialect);

impl<D: Dialect> Queries<D> {
    pub const fn new(dialect: D) -> Self {
        Self {
            dialect,
            naming: NamingPolicy::new(),
        }
    }

    pub fn with_naming(mut self, naming: NamingPolicy) -> Self {
        self.naming = naming;
        self
    }

    pub fn dialect(&self) -> &D {
        &self.dialect
    }

    pub fn naming(&self) -> &NamingPolicy {
        &self.naming
    }

    pub fn table<E: Entity>(&self) -> Result<TableInfo> {
        TableInfo::for_entity_with::<E>(self.naming)
    }

    pub fn select<E: Entity>(&self) -> Result<SelectBuilder<'_>> {
        Ok(SelectBuilder::new(&self.dialect, self.table::<E>()?))
    }

    pub fn insert<E: Entity>(&self) -> Result<InsertBuilder<'_>> {
        InsertBuilder::new(&self.dialect, self.table::<E>()?)
    }

    pub fn update<E: Entity>(&self) -> Result<UpdateBuilder<'_>> {
        UpdateBuilder::new(&self.dialect, self.table::<E>()?)
    }

    pub fn delete<E: Entity>(&self) -> Result<DeleteBuilder<'_>> {
        Ok(DeleteBuilder::new(&self.dialect, self.table::<E>()?))
    }
}

pub fn select<E: Entity>() -> Result<SelectBuilder<'static>> {
    STANDARD.select::<E>()
}

pub fn insert<E: Entity>() -> Result<InsertBuilder<'static>> {
    STANDARD.insert::<E>()
}

pub fn update<E: Entity>() -> Result<UpdateBuilder<'static>> {
    STANDARD.update::<E>()
}

pub fn delete<E: Entity>() -> Result<DeleteBuilder<'static>> {
    STANDARD.delete::<E>()
}
