use crate::{ColumnInfo, Dialect, Result, TableInfo, truncate_long};
use log::debug;
use std::fmt::{self, Display};

/// INSERT of one row with a placeholder for every insertable column.
#[derive(Clone)]
pub struct InsertBuilder<'q> {
    dialect: &'q dyn Dialect,
    table: TableInfo,
    columns: Vec<ColumnInfo>,
}

impl<'q> InsertBuilder<'q> {
    pub fn new(dialect: &'q dyn Dialect, table: TableInfo) -> Result<Self> {
        let columns = table.insertable_columns()?;
        Ok(Self {
            dialect,
            table,
            columns,
        })
    }

    /// Columns in the order their values must be bound.
    pub fn columns(&self) -> &[ColumnInfo] {
        &self.columns
    }

    pub fn to_sql(&self) -> String {
        let sql = self.dialect.insert(&self.table, &self.columns);
        debug!("{}: {}", self.dialect.name(), truncate_long!(sql));
        sql
    }
}

impl Display for InsertBuilder<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_sql())
    }
}
