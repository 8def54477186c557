use crate::{
    ColumnInfo, Comparison, Connective, Context, Fragment, JoinInfo, JoinKind, Order, Predicate,
    Qualifier, TableInfo, WhereBuilder, separated_by,
};
use std::fmt::Write;

/// Renders tables, joins and statements into SQL text.
///
/// Every method is a pure function of its arguments, implementations are expected to be stateless
/// so one instance can be shared by any number of callers. Vendor dialects override the few
/// methods where their syntax differs.
pub trait Dialect: Send + Sync {
    fn name(&self) -> &'static str;

    /// Escape occurrences of `search` char with `replace` while copying into buffer.
    fn write_escaped(
        &self,
        _context: &mut Context,
        out: &mut String,
        value: &str,
        search: char,
        replace: &str,
    ) {
        let mut position = 0;
        for (i, c) in value.char_indices() {
            if c == search {
                out.push_str(&value[position..i]);
                out.push_str(replace);
                position = i + c.len_utf8();
            }
        }
        out.push_str(&value[position..]);
    }

    /// Quote identifiers ("name") doubling inner quotes.
    fn write_identifier_quoted(&self, context: &mut Context, out: &mut String, value: &str) {
        out.push('"');
        self.write_escaped(context, out, value, '"', "\"\"");
        out.push('"');
    }

    fn write_table_name(&self, context: &mut Context, out: &mut String, name: &str) {
        self.write_identifier_quoted(context, out, name);
    }

    /// Render a column, qualified with its table when the context asks for it.
    fn write_column(&self, context: &mut Context, out: &mut String, column: &ColumnInfo) {
        if let Some(function) = &column.function {
            out.push_str(function);
            out.push('(');
        }
        let count_all = column.is_function() && column.name == "*";
        if context.qualify_columns && column.qualified && !column.table.is_empty() && !count_all {
            self.write_table_name(context, out, &column.table);
            out.push('.');
        }
        if column.name == "*" {
            out.push('*');
        } else {
            self.write_identifier_quoted(context, out, &column.name);
        }
        if column.is_function() {
            out.push(')');
        }
        if let Some(alias) = &column.alias
            && context.fragment == Fragment::SqlSelect
        {
            out.push_str(" AS ");
            self.write_identifier_quoted(context, out, alias);
        }
    }

    /// Value marker, the actual value is bound by the caller.
    fn write_placeholder(&self, context: &mut Context, out: &mut String) {
        context.counter += 1;
        out.push('?');
    }

    fn write_join_kind(&self, _context: &mut Context, out: &mut String, kind: &JoinKind) {
        out.push_str(match kind {
            JoinKind::Inner => "INNER JOIN",
            JoinKind::Left => "LEFT JOIN",
            JoinKind::Right => "RIGHT JOIN",
        });
    }

    fn write_join(&self, context: &mut Context, out: &mut String, join: &JoinInfo) {
        let mut context = context.switch_fragment(Fragment::SqlJoin);
        context.current.qualify_columns = true;
        self.write_join_kind(&mut context.current, out, &join.kind);
        out.push(' ');
        self.write_table_name(&mut context.current, out, &join.table);
        out.push_str(" ON ");
        self.write_column(&mut context.current, out, &join.left);
        out.push_str(" = ");
        self.write_column(&mut context.current, out, &join.right);
    }

    /// Render the table followed by its joins, one per line.
    fn write_table(&self, context: &mut Context, out: &mut String, table: &TableInfo) {
        self.write_table_name(context, out, &table.name);
        for join in &table.joins {
            out.push('\n');
            self.write_join(context, out, join);
        }
    }

    /// Selected columns, every column of the root table when none was chosen.
    fn write_select_list(&self, context: &mut Context, out: &mut String, table: &TableInfo) {
        if table.columns.is_empty() {
            self.write_table_name(context, out, &table.name);
            out.push_str(".*");
            return;
        }
        separated_by(
            out,
            &table.columns,
            |out, column| self.write_column(context, out, column),
            ", ",
        );
    }

    fn write_comparison(&self, _context: &mut Context, out: &mut String, comparison: &Comparison) {
        out.push_str(match comparison {
            Comparison::Equal => " = ",
            Comparison::NotEqual => " <> ",
            Comparison::Less => " < ",
            Comparison::LessEqual => " <= ",
            Comparison::Greater => " > ",
            Comparison::GreaterEqual => " >= ",
            Comparison::Like => " LIKE ",
        });
    }

    fn write_predicate(&self, context: &mut Context, out: &mut String, predicate: &Predicate) {
        match predicate {
            Predicate::Compare(column, comparison) => {
                self.write_column(context, out, column);
                self.write_comparison(context, out, comparison);
                self.write_placeholder(context, out);
            }
            Predicate::IsNull(column) => {
                self.write_column(context, out, column);
                out.push_str(" IS NULL");
            }
            Predicate::IsNotNull(column) => {
                self.write_column(context, out, column);
                out.push_str(" IS NOT NULL");
            }
            Predicate::In(.., 0) => out.push_str("1 = 0"),
            Predicate::In(column, values) => {
                self.write_column(context, out, column);
                out.push_str(" IN (");
                for i in 0..*values {
                    if i > 0 {
                        out.push_str(", ");
                    }
                    self.write_placeholder(context, out);
                }
                out.push(')');
            }
            Predicate::Group(group) => {
                out.push('(');
                self.write_where(context, out, group);
                out.push(')');
            }
        }
    }

    /// Conditions of a WHERE clause, without the keyword.
    fn write_where(&self, context: &mut Context, out: &mut String, filter: &WhereBuilder) {
        for (i, (connective, predicate)) in filter.terms().iter().enumerate() {
            if i > 0 {
                out.push_str(match connective {
                    Connective::And => " AND ",
                    Connective::Or => " OR ",
                });
            }
            self.write_predicate(context, out, predicate);
        }
    }

    fn write_order_by(
        &self,
        context: &mut Context,
        out: &mut String,
        order_by: &[(ColumnInfo, Order)],
    ) {
        if order_by.is_empty() {
            return;
        }
        out.push_str("\nORDER BY ");
        separated_by(
            out,
            order_by,
            |out, (column, order)| {
                self.write_column(context, out, column);
                out.push_str(match order {
                    Order::Asc => " ASC",
                    Order::Desc => " DESC",
                });
            },
            ", ",
        );
    }

    fn write_limit(&self, _context: &mut Context, out: &mut String, limit: u64) {
        let _ = write!(out, "\nLIMIT {}", limit);
    }

    fn write_offset(&self, _context: &mut Context, out: &mut String, offset: u64) {
        let _ = write!(out, "\nOFFSET {}", offset);
    }

    fn write_qualifier(&self, context: &mut Context, out: &mut String, qualifier: &Qualifier) {
        self.write_order_by(context, out, &qualifier.order_by);
        if let Some(limit) = qualifier.limit {
            self.write_limit(context, out, limit);
        }
        if let Some(offset) = qualifier.offset {
            self.write_offset(context, out, offset);
        }
    }

    fn write_select(
        &self,
        out: &mut String,
        table: &TableInfo,
        filter: Option<&WhereBuilder>,
        qualifier: &Qualifier,
    ) {
        out.reserve(128 + table.columns.len() * 32 + table.joins.len() * 64);
        if !out.is_empty() {
            out.push('\n');
        }
        out.push_str("SELECT ");
        let mut context = Context::new(Fragment::SqlSelect, true);
        self.write_select_list(&mut context, out, table);
        out.push_str("\nFROM ");
        self.write_table(
            &mut context.switch_fragment(Fragment::SqlSelectFrom).current,
            out,
            table,
        );
        if let Some(filter) = filter.filter(|f| !f.is_empty()) {
            out.push_str("\nWHERE ");
            self.write_where(
                &mut context.switch_fragment(Fragment::SqlSelectWhere).current,
                out,
                filter,
            );
        }
        self.write_qualifier(
            &mut context.switch_fragment(Fragment::SqlSelectOrderBy).current,
            out,
            qualifier,
        );
        out.push(';');
    }

    fn write_insert(&self, out: &mut String, table: &TableInfo, columns: &[ColumnInfo]) {
        out.reserve(128 + columns.len() * 32);
        if !out.is_empty() {
            out.push('\n');
        }
        out.push_str("INSERT INTO ");
        let mut context = Context::new(Fragment::SqlInsertInto, false);
        self.write_table_name(&mut context, out, &table.name);
        if columns.is_empty() {
            out.push_str(" DEFAULT VALUES;");
            return;
        }
        out.push_str(" (");
        separated_by(
            out,
            columns,
            |out, column| self.write_column(&mut context, out, column),
            ", ",
        );
        out.push_str(") VALUES\n(");
        let mut context = context.switch_fragment(Fragment::SqlInsertIntoValues);
        for i in 0..columns.len() {
            if i > 0 {
                out.push_str(", ");
            }
            self.write_placeholder(&mut context.current, out);
        }
        out.push_str(");");
    }

    fn write_update(
        &self,
        out: &mut String,
        table: &TableInfo,
        columns: &[ColumnInfo],
        filter: Option<&WhereBuilder>,
        qualifier: &Qualifier,
    ) {
        out.reserve(128 + columns.len() * 32);
        if !out.is_empty() {
            out.push('\n');
        }
        out.push_str("UPDATE ");
        let mut context = Context::new(Fragment::SqlUpdate, true);
        self.write_table_name(&mut context, out, &table.name);
        out.push_str(" SET ");
        {
            let mut context = context.switch_fragment(Fragment::SqlUpdateSet);
            context.current.qualify_columns = false;
            separated_by(
                out,
                columns,
                |out, column| {
                    self.write_column(&mut context.current, out, column);
                    out.push_str(" = ");
                    self.write_placeholder(&mut context.current, out);
                },
                ", ",
            );
        }
        let mut context = context.switch_fragment(Fragment::SqlUpdateWhere);
        if let Some(filter) = filter.filter(|f| !f.is_empty()) {
            out.push_str("\nWHERE ");
            self.write_where(&mut context.current, out, filter);
        }
        self.write_qualifier(&mut context.current, out, qualifier);
        out.push(';');
    }

    fn write_delete(
        &self,
        out: &mut String,
        table: &TableInfo,
        filter: Option<&WhereBuilder>,
        qualifier: &Qualifier,
    ) {
        out.reserve(128 + table.name.len());
        if !out.is_empty() {
            out.push('\n');
        }
        out.push_str("DELETE FROM ");
        let mut context = Context::new(Fragment::SqlDeleteFrom, true);
        self.write_table_name(&mut context, out, &table.name);
        let mut context = context.switch_fragment(Fragment::SqlDeleteFromWhere);
        if let Some(filter) = filter.filter(|f| !f.is_empty()) {
            out.push_str("\nWHERE ");
            self.write_where(&mut context.current, out, filter);
        }
        self.write_qualifier(&mut context.current, out, qualifier);
        out.push(';');
    }

    /// The table with its joins.
    fn table(&self, table: &TableInfo) -> String {
        let mut out = String::new();
        self.write_table(
            &mut Context::new(Fragment::SqlSelectFrom, true),
            &mut out,
            table,
        );
        out
    }

    fn select(
        &self,
        table: &TableInfo,
        filter: Option<&WhereBuilder>,
        qualifier: &Qualifier,
    ) -> String {
        let mut out = String::new();
        self.write_select(&mut out, table, filter, qualifier);
        out
    }

    fn insert(&self, table: &TableInfo, columns: &[ColumnInfo]) -> String {
        let mut out = String::new();
        self.write_insert(&mut out, table, columns);
        out
    }

    fn update(
        &self,
        table: &TableInfo,
        columns: &[ColumnInfo],
        filter: Option<&WhereBuilder>,
        qualifier: &Qualifier,
    ) -> String {
        let mut out = String::new();
        self.write_update(&mut out, table, columns, filter, qualifier);
        out
    }

    fn delete(
        &self,
        table: &TableInfo,
        filter: Option<&WhereBuilder>,
        qualifier: &Qualifier,
    ) -> String {
        let mut out = String::new();
        self.write_delete(&mut out, table, filter, qualifier);
        out
    }
}

/// ANSI SQL: double quoted identifiers and `?` placeholders.
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq)]
pub struct StandardDialect;

impl Dialect for StandardDialect {
    fn name(&self) -> &'static str {
        "standard"
    }
}
