use crate::{
    ColumnInfo, Dialect, IntoColumn, MappingError, Qualifier, Result, TableInfo, WhereBuilder,
    truncate_long,
};
use log::debug;
use std::fmt::{self, Display};

/// UPDATE setting every updatable column.
#[derive(Clone)]
pub struct UpdateBuilder<'q> {
    dialect: &'q dyn Dialect,
    table: TableInfo,
    columns: Vec<ColumnInfo>,
    filter: Option<WhereBuilder>,
    qualifier: Qualifier,
}

impl<'q> UpdateBuilder<'q> {
    /// Fails when the table has no updatable column, there would be nothing to SET.
    pub fn new(dialect: &'q dyn Dialect, table: TableInfo) -> Result<Self> {
        let columns = table.updatable_columns()?;
        if columns.is_empty() {
            return Err(MappingError::NothingToUpdate {
                entity: table.entity.map_or("<synthetic>", |e| e.name),
            }
            .into());
        }
        Ok(Self {
            dialect,
            table,
            columns,
            filter: None,
            qualifier: Qualifier::default(),
        })
    }

    /// Columns in the order their values must be bound, before the WHERE values.
    pub fn columns(&self) -> &[ColumnInfo] {
        &self.columns
    }

    pub fn filter(mut self, build: impl FnOnce(WhereBuilder) -> WhereBuilder) -> Self {
        let added = build(WhereBuilder::new(self.table.scope()));
        self.filter = Some(match self.filter.take() {
            Some(current) => current.merge(added),
            None => added,
        });
        self
    }

    /// Restrict to the row with a given identity.
    pub fn by_id(self) -> Result<Self> {
        let id = self.table.id_column()?;
        Ok(self.filter(|w| w.eq(id)))
    }

    pub fn asc(mut self, column: impl IntoColumn) -> Self {
        let column = column.into_column(&self.table);
        self.qualifier.asc(column);
        self
    }

    pub fn desc(mut self, column: impl IntoColumn) -> Self {
        let column = column.into_column(&self.table);
        self.qualifier.desc(column);
        self
    }

    pub fn limit(mut self, limit: u64) -> Self {
        self.qualifier.limit(limit);
        self
    }

    pub fn to_sql(&self) -> String {
        let sql = self.dialect.update(
            &self.table,
            &self.columns,
            self.filter.as_ref(),
            &self.qualifier,
        );
        debug!("{}: {}", self.dialect.name(), truncate_long!(sql));
        sql
    }
}

impl Display for UpdateBuilder<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_sql())
    }
}
