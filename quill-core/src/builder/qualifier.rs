use crate::ColumnInfo;

#[derive(Default, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Order {
    #[default]
    Asc,
    Desc,
}

/// ORDER BY, LIMIT and OFFSET of a statement.
#[derive(Default, Debug, Clone, PartialEq, Eq)]
pub struct Qualifier {
    pub order_by: Vec<(ColumnInfo, Order)>,
    pub limit: Option<u64>,
    pub offset: Option<u64>,
}

impl Qualifier {
    pub fn is_empty(&self) -> bool {
        self.order_by.is_empty() && self.limit.is_none() && self.offset.is_none()
    }
    pub fn asc(&mut self, column: ColumnInfo) -> &mut Self {
        self.order_by.push((column, Order::Asc));
        self
    }
    pub fn desc(&mut self, column: ColumnInfo) -> &mut Self {
        self.order_by.push((column, Order::Desc));
        self
    }
    pub fn limit(&mut self, limit: u64) -> &mut Self {
        self.limit = Some(limit);
        self
    }
    pub fn offset(&mut self, offset: u64) -> &mut Self {
        self.offset = Some(offset);
        self
    }
}
