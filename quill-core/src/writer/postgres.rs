use crate::{Context, Dialect, Qualifier};
use log::warn;

/// PostgreSQL: numbered `$1, $2, ..` placeholders.
///
/// UPDATE and DELETE do not accept ORDER BY, LIMIT or OFFSET, those are dropped.
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq)]
pub struct PostgresDialect;

impl Dialect for PostgresDialect {
    fn name(&self) -> &'static str {
        "postgres"
    }

    fn write_placeholder(&self, context: &mut Context, out: &mut String) {
        context.counter += 1;
        let mut buffer = itoa::Buffer::new();
        out.push('$');
        out.push_str(buffer.format(context.counter));
    }

    fn write_qualifier(&self, context: &mut Context, out: &mut String, qualifier: &Qualifier) {
        if context.fragment.is_modification() {
            if !qualifier.is_empty() {
                warn!("Postgres does not support ORDER BY, LIMIT or OFFSET in UPDATE and DELETE, they will be ignored");
            }
            return;
        }
        self.write_order_by(context, out, &qualifier.order_by);
        if let Some(limit) = qualifier.limit {
            self.write_limit(context, out, limit);
        }
        if let Some(offset) = qualifier.offset {
            self.write_offset(context, out, offset);
        }
    }
}
