use crate::{ColumnInfo, TableInfo};

#[derive(Default, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Connective {
    #[default]
    And,
    Or,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Comparison {
    Equal,
    NotEqual,
    Less,
    LessEqual,
    Greater,
    GreaterEqual,
    Like,
}

/// A condition, values are always rendered as placeholders.
#[derive(Debug, Clone)]
pub enum Predicate {
    Compare(ColumnInfo, Comparison),
    IsNull(ColumnInfo),
    IsNotNull(ColumnInfo),
    /// Column matching one of `n` values.
    In(ColumnInfo, usize),
    /// Parenthesized conditions.
    Group(WhereBuilder),
}

/// Something that resolves to a column of a table.
pub trait IntoColumn {
    fn into_column(self, table: &TableInfo) -> ColumnInfo;
}

impl IntoColumn for &str {
    fn into_column(self, table: &TableInfo) -> ColumnInfo {
        table.column(self)
    }
}

impl IntoColumn for String {
    fn into_column(self, table: &TableInfo) -> ColumnInfo {
        table.column(&self)
    }
}

impl IntoColumn for ColumnInfo {
    fn into_column(self, _table: &TableInfo) -> ColumnInfo {
        self
    }
}

/// Conditions of a WHERE clause.
///
/// Property names resolve against the table the builder was created for, conditions are joined
/// with AND unless `or()` precedes them.
#[derive(Debug, Clone)]
pub struct WhereBuilder {
    scope: TableInfo,
    terms: Vec<(Connective, Predicate)>,
    next: Connective,
}

impl WhereBuilder {
    pub fn new(scope: TableInfo) -> Self {
        Self {
            scope,
            terms: Vec::new(),
            next: Connective::And,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    pub fn terms(&self) -> &[(Connective, Predicate)] {
        &self.terms
    }

    pub fn predicate(mut self, predicate: Predicate) -> Self {
        let connective = std::mem::take(&mut self.next);
        self.terms.push((connective, predicate));
        self
    }

    fn compare(self, column: impl IntoColumn, comparison: Comparison) -> Self {
        let column = column.into_column(&self.scope);
        self.predicate(Predicate::Compare(column, comparison))
    }

    pub fn eq(self, column: impl IntoColumn) -> Self {
        self.compare(column, Comparison::Equal)
    }
    pub fn ne(self, column: impl IntoColumn) -> Self {
        self.compare(column, Comparison::NotEqual)
    }
    pub fn lt(self, column: impl IntoColumn) -> Self {
        self.compare(column, Comparison::Less)
    }
    pub fn le(self, column: impl IntoColumn) -> Self {
        self.compare(column, Comparison::LessEqual)
    }
    pub fn gt(self, column: impl IntoColumn) -> Self {
        self.compare(column, Comparison::Greater)
    }
    pub fn ge(self, column: impl IntoColumn) -> Self {
        self.compare(column, Comparison::GreaterEqual)
    }
    pub fn like(self, column: impl IntoColumn) -> Self {
        self.compare(column, Comparison::Like)
    }
    pub fn is_null(self, column: impl IntoColumn) -> Self {
        let column = column.into_column(&self.scope);
        self.predicate(Predicate::IsNull(column))
    }
    pub fn is_not_null(self, column: impl IntoColumn) -> Self {
        let column = column.into_column(&self.scope);
        self.predicate(Predicate::IsNotNull(column))
    }
    /// `column IN (?, ?, ..)` with `values` placeholders.
    pub fn is_in(self, column: impl IntoColumn, values: usize) -> Self {
        let column = column.into_column(&self.scope);
        self.predicate(Predicate::In(column, values))
    }

    pub fn and(mut self) -> Self {
        self.next = Connective::And;
        self
    }
    pub fn or(mut self) -> Self {
        self.next = Connective::Or;
        self
    }

    /// Conditions of both builders joined with AND, a side containing OR is parenthesized.
    pub fn merge(self, other: WhereBuilder) -> Self {
        if other.is_empty() {
            return self;
        }
        if self.is_empty() {
            return other;
        }
        let mut result = if self.has_or() {
            WhereBuilder::new(self.scope.clone()).predicate(Predicate::Group(self))
        } else {
            self
        };
        if other.has_or() {
            return result.and().predicate(Predicate::Group(other));
        }
        for (i, (connective, predicate)) in other.terms.into_iter().enumerate() {
            result.next = if i == 0 { Connective::And } else { connective };
            result = result.predicate(predicate);
        }
        result
    }

    /// True when a condition other than the first one is joined with OR.
    fn has_or(&self) -> bool {
        self.terms.iter().skip(1).any(|(c, _)| *c == Connective::Or)
    }

    /// Parenthesized conditions, nothing is added when `build` adds no condition.
    pub fn group(self, build: impl FnOnce(WhereBuilder) -> WhereBuilder) -> Self {
        let group = build(WhereBuilder::new(self.scope.clone()));
        if group.is_empty() {
            return self;
        }
        self.predicate(Predicate::Group(group))
    }
}
