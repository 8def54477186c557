use crate::{
    ColumnInfo, Dialect, Entity, IntoColumn, Qualifier, Result, TableInfo, WhereBuilder,
    truncate_long,
};
use log::debug;
use std::{
    borrow::Cow,
    fmt::{self, Display},
};

/// SELECT statement over one table and the tables joined into it.
#[derive(Clone)]
pub struct SelectBuilder<'q> {
    dialect: &'q dyn Dialect,
    table: TableInfo,
    filter: Option<WhereBuilder>,
    qualifier: Qualifier,
}

impl<'q> SelectBuilder<'q> {
    pub fn new(dialect: &'q dyn Dialect, table: TableInfo) -> Self {
        Self {
            dialect,
            table,
            filter: None,
            qualifier: Qualifier::default(),
        }
    }

    pub fn table(&self) -> &TableInfo {
        &self.table
    }

    /// Select the property (or the literal column) `name`.
    pub fn column(mut self, name: &str) -> Self {
        let column = self.table.column(name);
        self.table.add_column(column);
        self
    }

    pub fn column_as(mut self, name: &str, alias: impl Into<Cow<'static, str>>) -> Self {
        let column = self.table.column_as(name, alias);
        self.table.add_column(column);
        self
    }

    /// Select a column of another table, usually a joined one.
    pub fn column_of(mut self, column: ColumnInfo) -> Self {
        self.table.add_column(column);
        self
    }

    /// Select an aggregate: `function("COUNT", "*", Some("total"))`.
    pub fn function(
        mut self,
        function: impl Into<Cow<'static, str>>,
        name: &str,
        alias: Option<&'static str>,
    ) -> Self {
        self.table
            .add_function(function, name, alias.map(Cow::Borrowed));
        self
    }

    /// Inner join `F` into the query, `T` must already be part of it.
    pub fn join<F: Entity, T: Entity>(mut self) -> Result<Self> {
        self.table = self.table.inner_join::<F, T>()?;
        Ok(self)
    }

    pub fn left_join<F: Entity, T: Entity>(mut self) -> Result<Self> {
        self.table = self.table.left_join::<F, T>()?;
        Ok(self)
    }

    pub fn right_join<F: Entity, T: Entity>(mut self) -> Result<Self> {
        self.table = self.table.right_join::<F, T>()?;
        Ok(self)
    }

    /// Add conditions, joined with AND to the ones added before.
    pub fn filter(mut self, build: impl FnOnce(WhereBuilder) -> WhereBuilder) -> Self {
        let added = build(WhereBuilder::new(self.table.scope()));
        self.filter = Some(match self.filter.take() {
            Some(current) => current.merge(added),
            None => added,
        });
        self
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

    pub fn offset(mut self, offset: u64) -> Self {
        self.qualifier.offset(offset);
        self
    }

    pub fn to_sql(&self) -> String {
        let sql = self
            .dialect
            .select(&self.table, self.filter.as_ref(), &self.qualifier);
        debug!("{}: {}", self.dialect.name(), truncate_long!(sql));
        sql
    }
}

impl Display for SelectBuilder<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_sql())
    }
}
