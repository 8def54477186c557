use crate::{Dialect, IntoColumn, Qualifier, Result, TableInfo, WhereBuilder, truncate_long};
use log::debug;
use std::fmt::{self, Display};

#[derive(Clone)]
pub struct DeleteBuilder<'q> {
    dialect: &'q dyn Dialect,
    table: TableInfo,
    filter: Option<WhereBuilder>,
    qualifier: Qualifier,
}

impl<'q> DeleteBuilder<'q> {
    pub fn new(dialect: &'q dyn Dialect, table: TableInfo) -> Self {
        Self {
            dialect,
            table,
            filter: None,
            qualifier: Qualifier::default(),
        }
    }

    pub fn filter(mut self, build: impl FnOnce(WhereBuilder) -> WhereBuilder) -> Self {
        let added = build(WhereBuilder::new(self.table.scope()));
        self.filter = Some(match self.filter.take() {
            Some(current) => current.merge(added),
            None => added,
        });
        self
    }

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
        let sql = self
            .dialect
            .delete(&self.table, self.filter.as_ref(), &self.qualifier);
        debug!("{}: {}", self.dialect.name(), truncate_long!(sql));
        sql
    }
}

impl Display for DeleteBuilder<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_sql())
    }
}
