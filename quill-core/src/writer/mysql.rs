use crate::{Context, Dialect};
use log::warn;

/// MySQL and MariaDB: backtick quoted identifiers.
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq)]
pub struct MySqlDialect;

impl Dialect for MySqlDialect {
    fn name(&self) -> &'static str {
        "mysql"
    }

    fn write_identifier_quoted(&self, context: &mut Context, out: &mut String, value: &str) {
        out.push('`');
        self.write_escaped(context, out, value, '`', "``");
        out.push('`');
    }

    fn write_offset(&self, context: &mut Context, out: &mut String, offset: u64) {
        if context.fragment.is_modification() {
            warn!("MySQL does not support OFFSET in UPDATE and DELETE, it will be ignored");
            return;
        }
        out.push_str("\nOFFSET ");
        let mut buffer = itoa::Buffer::new();
        out.push_str(buffer.format(offset));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Qualifier, TableInfo};

    #[test]
    fn backticks() {
        let table = TableInfo::synthetic("odd`name");
        let mut qualifier = Qualifier::default();
        qualifier.asc(table.column("id")).limit(5).offset(10);
        assert_eq!(
            MySqlDialect.delete(&table, None, &qualifier),
            "DELETE FROM `odd``name`\n\
             ORDER BY `odd``name`.`id` ASC\n\
             LIMIT 5;"
        );
        assert_eq!(
            MySqlDialect.select(&table, None, &qualifier),
            "SELECT `odd``name`.*\n\
             FROM `odd``name`\n\
             ORDER BY `odd``name`.`id` ASC\n\
             LIMIT 5\n\
             OFFSET 10;"
        );
    }
}
