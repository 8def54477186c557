use convert_case::{Case, Casing};
use std::borrow::Cow;

/// Case of the default table names.
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableCase {
    #[default]
    Snake,
    Pascal,
    Camel,
    /// Type identifier used as is.
    Preserve,
}

/// Naming conventions used when an entity does not declare explicit names.
///
/// All the methods are pure, the policy is a small `Copy` value carried by
/// [`Queries`](crate::Queries) and by every [`TableInfo`](crate::TableInfo) it creates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NamingPolicy {
    /// Case applied to the type identifier to obtain the default table name.
    pub table_case: TableCase,
    /// Joins the parts of a derived column or join table name.
    pub separator: &'static str,
}

impl NamingPolicy {
    pub const fn new() -> Self {
        Self {
            table_case: TableCase::Snake,
            separator: "_",
        }
    }

    pub const fn with_separator(mut self, separator: &'static str) -> Self {
        self.separator = separator;
        self
    }

    pub const fn with_table_case(mut self, table_case: TableCase) -> Self {
        self.table_case = table_case;
        self
    }

    /// Default table name for a type identifier.
    pub fn table_name(&self, type_name: &str) -> String {
        let mut name = match self.table_case {
            TableCase::Snake => type_name.to_case(Case::Snake),
            TableCase::Pascal => type_name.to_case(Case::Pascal),
            TableCase::Camel => type_name.to_case(Case::Camel),
            TableCase::Preserve => type_name.to_string(),
        };
        if name.starts_with('_') {
            name.remove(0);
        }
        name
    }

    /// Default column name for a property.
    pub fn column_name<'a>(&self, property: &'a str) -> &'a str {
        property.strip_prefix('_').unwrap_or(property)
    }

    /// Suffix appended to a to-one property column when it does not declare a join column.
    pub fn foreign_key_suffix(&self, id_column: &str) -> String {
        format!("{}{}", self.separator, id_column)
    }

    /// Join column derived from a table and its identity column: `customer` + `id` => `customer_id`.
    pub fn foreign_key(&self, table: &str, id_column: &str) -> String {
        let column = format!("{}{}", table, self.foreign_key_suffix(id_column));
        columnize(&column).into_owned()
    }

    /// Join table for a many-to-many relationship, the declaring side goes first.
    pub fn join_table(&self, owner_table: &str, other_table: &str) -> String {
        format!("{}{}{}", owner_table, self.separator, other_table)
    }
}

impl Default for NamingPolicy {
    fn default() -> Self {
        Self::new()
    }
}

/// Lower-cases the first character.
pub fn columnize(value: &str) -> Cow<'_, str> {
    let mut chars = value.chars();
    match chars.next() {
        Some(first) if first.is_uppercase() => {
            let mut result = String::with_capacity(value.len());
            result.extend(first.to_lowercase());
            result.push_str(chars.as_str());
            Cow::Owned(result)
        }
        _ => Cow::Borrowed(value),
    }
}
