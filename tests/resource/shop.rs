use quill::Entity;
use rust_decimal::Decimal;
use time::PrimitiveDateTime;
use uuid::Uuid;

#[derive(Entity)]
pub struct Customer {
    #[quill(id, generated)]
    pub id: i64,
    pub name: String,
    pub email: Option<String>,
    #[quill(one_to_many(mapped_by = "customer"))]
    pub orders: Vec<Order>,
}

#[derive(Entity)]
#[quill(table = "orders")]
pub struct Order {
    #[quill(id)]
    pub id: Uuid,
    #[quill(many_to_one)]
    pub customer: Option<Box<Customer>>,
    pub placed_at: PrimitiveDateTime,
    pub total: Decimal,
    #[quill(one_to_many(mapped_by = "order"))]
    pub lines: Vec<OrderLine>,
    #[quill(transient)]
    pub dirty: bool,
}

#[derive(Entity)]
pub struct OrderLine {
    #[quill(id, generated)]
    pub id: i64,
    #[quill(many_to_one, join_column = "order_ref")]
    pub order: Option<Box<Order>>,
    /// Key of the product, not the product itself
    #[quill(many_to_one(target = Product))]
    pub product_id: String,
    pub quantity: u32,
    pub unit_price: Decimal,
}

#[derive(Entity)]
pub struct Product {
    #[quill(id, column = "sku")]
    pub code: String,
    pub description: String,
    #[quill(insertable = false, updatable = false)]
    pub created_at: Option<PrimitiveDateTime>,
}
