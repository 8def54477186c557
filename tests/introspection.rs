mod resource {
    pub mod logs;
    pub mod shop;
}

#[cfg(test)]
mod tests {
    use crate::resource::{
        logs::init_logs,
        shop::{Customer, Order, OrderLine, Product},
    };
    use quill::{
        Entity, MappingError, RelationKind, TableInfo, describe, describe_all, describe_property,
    };
    use rust_decimal::Decimal;
    use std::ptr;
    use time::macros::datetime;
    use uuid::Uuid;

    #[derive(Entity)]
    #[quill(table = "ledger_accounts")]
    struct Account {
        #[quill(id, accessors)]
        number: u64,
        owner: String,
        #[quill(transient)]
        cached: Option<String>,
    }

    impl Account {
        fn number(&self) -> u64 {
            self.number
        }
        fn set_number(&mut self, value: u64) {
            self.number = value;
        }
        fn owner(&self) -> String {
            self.owner.to_uppercase()
        }
        fn set_owner(&mut self, value: String) {
            self.owner = value.to_lowercase();
        }
        fn cached(&self) -> Option<String> {
            self.cached.clone()
        }
        fn set_cached(&mut self, value: Option<String>) {
            self.cached = value;
        }
    }

    #[derive(Entity)]
    struct Person {
        #[quill(id, column = "person_id")]
        id: u64,
        first_name: String,
        last_name: String,
    }

    #[derive(Entity)]
    #[quill(table = "staff")]
    struct Employee {
        #[quill(extends)]
        person: Person,
        salary: Decimal,
        #[quill(static_member)]
        headcount: u32,
        _hired: time::Date,
    }

    #[derive(Entity)]
    struct Anonymous {
        _value: i32,
    }

    #[derive(Entity)]
    struct TwoHeads {
        #[quill(id)]
        _left: i32,
        #[quill(id)]
        _right: i32,
    }

    #[test]
    fn describe_direct_fields() {
        init_logs();
        let order = describe::<Order>().expect("Order should be described");
        assert_eq!(order.name, "Order");
        assert_eq!(order.table(), "orders");
        assert_eq!(order.identity().name, "id");
        assert!(!order.uses_accessors());
        assert!(ptr::eq(order, Order::describe().expect("Should be memoized")));

        let names: Vec<_> = describe_all::<Order>()
            .expect("Order should be described")
            .iter()
            .map(|p| p.name)
            .collect();
        assert_eq!(
            names,
            ["id", "customer", "placed_at", "total", "lines", "dirty"]
        );

        let customer = describe_property::<Order>("customer").expect("Property should exist");
        assert_eq!(customer.relation_kind(), RelationKind::ManyToOne);
        assert!(customer.target().is_some_and(|t| t.is::<Customer>()));
        assert!(!customer.is_inverse());

        let lines = describe_property::<Order>("lines").expect("Property should exist");
        assert_eq!(lines.relation_kind(), RelationKind::OneToMany);
        assert!(lines.target().is_some_and(|t| t.is::<OrderLine>()));
        assert!(lines.is_inverse());

        let dirty = describe_property::<Order>("dirty").expect("Property should exist");
        assert!(dirty.is_transient());
        assert!(dirty.value_type.is::<bool>());
    }

    #[test]
    fn property_not_found() {
        init_logs();
        let error = describe_property::<Order>("discount").unwrap_err();
        let error = error
            .downcast_ref::<MappingError>()
            .expect("Should be a mapping error");
        assert_eq!(
            *error,
            MappingError::NotFound {
                entity: "Order",
                property: "discount".into(),
            }
        );
        // Unknown names fall back to a literal column
        let table = TableInfo::for_entity::<Order>().expect("Order should be described");
        let column = table.column("discount");
        assert_eq!(column.table, "orders");
        assert_eq!(column.name, "discount");
    }

    #[test]
    fn column_names() {
        init_logs();
        let customer = describe_property::<Order>("customer").expect("Property should exist");
        assert_eq!(customer.column_name(""), "customer");
        assert_eq!(customer.column_name("_id"), "customer_id");
        let order = describe_property::<OrderLine>("order").expect("Property should exist");
        assert_eq!(order.column_name(""), "order_ref");
        assert_eq!(order.column_name("_id"), "order_ref");
        let product = describe_property::<OrderLine>("product_id").expect("Property should exist");
        assert!(product.relation().holds_key);
        assert_eq!(product.column_name("_id"), "product_id");
        let code = describe_property::<Product>("code").expect("Property should exist");
        assert_eq!(code.column_name("_id"), "sku");
        let hired = describe_property::<Employee>("hired").expect("Property should exist");
        assert_eq!(hired.column, "hired");
    }

    #[test]
    fn read_and_write_direct_fields() {
        init_logs();
        let mut order = Order {
            id: Uuid::nil(),
            customer: None,
            placed_at: datetime!(2025-03-01 10:30),
            total: Decimal::new(1999, 2),
            lines: Vec::new(),
            dirty: false,
        };
        let total = describe_property::<Order>("total").expect("Property should exist");
        assert_eq!(
            total.get::<Decimal>(&order).expect("Should read"),
            Decimal::new(1999, 2)
        );
        total
            .set(&mut order, Decimal::new(2500, 2))
            .expect("Should write");
        assert_eq!(order.total, Decimal::new(2500, 2));

        let error = total.get::<f64>(&order).unwrap_err();
        assert!(matches!(
            error.downcast_ref::<MappingError>(),
            Some(MappingError::Access {
                entity: "Order",
                property: "total"
            })
        ));
        let mut product = Product {
            code: "A-1".into(),
            description: "Anvil".into(),
            created_at: None,
        };
        assert!(total.set(&mut product, Decimal::ONE).is_err());
        assert_eq!(product.code, "A-1");
    }

    #[test]
    fn describe_accessor_pairs() {
        init_logs();
        let account = describe::<Account>().expect("Account should be described");
        assert!(account.uses_accessors());
        assert_eq!(account.table(), "ledger_accounts");
        assert_eq!(account.identity().name, "number");
        assert!(account.properties().iter().all(|p| !p.accessor.is_direct_field()));

        let mut value = Account {
            number: 7,
            owner: "ada".into(),
            cached: None,
        };
        let owner = account.property("owner").expect("Property should exist");
        assert_eq!(owner.get::<String>(&value).expect("Should read"), "ADA");
        owner
            .set(&mut value, "GRACE".to_string())
            .expect("Should write");
        assert_eq!(value.owner, "grace");
        account
            .identity()
            .set(&mut value, 8_u64)
            .expect("Should write");
        assert_eq!(value.number(), 8);
        let cached = account.property("cached").expect("Property should exist");
        cached
            .set(&mut value, Some("x".to_string()))
            .expect("Should write");
        assert_eq!(value.cached.as_deref(), Some("x"));

        let columns: Vec<_> = TableInfo::for_entity::<Account>()
            .expect("Account should be described")
            .insertable_columns()
            .expect("Columns should resolve")
            .into_iter()
            .map(|c| c.name)
            .collect();
        assert_eq!(columns, ["number", "owner"]);
    }

    #[test]
    fn inherited_properties() {
        init_logs();
        let employee = describe::<Employee>().expect("Employee should be described");
        assert_eq!(employee.table(), "staff");
        assert_eq!(employee.identity().name, "id");
        assert!(employee.identity().declared_by.is::<Person>());
        let names: Vec<_> = employee.properties().iter().map(|p| p.name).collect();
        assert_eq!(
            names,
            ["id", "first_name", "last_name", "salary", "headcount", "hired"]
        );

        let mut value = Employee {
            person: Person {
                id: 1,
                first_name: "Ada".into(),
                last_name: "Lovelace".into(),
            },
            salary: Decimal::new(5000, 0),
            headcount: 0,
            _hired: time::macros::date!(2024-01-15),
        };
        let first_name = employee.property("first_name").expect("Property should exist");
        assert_eq!(
            first_name.get::<String>(&value).expect("Should read"),
            "Ada"
        );
        first_name
            .set(&mut value, "Augusta".to_string())
            .expect("Should write");
        assert_eq!(value.person.first_name, "Augusta");

        let table = TableInfo::for_entity::<Employee>().expect("Employee should be described");
        let id = table.id_column().expect("Employee has an identity");
        assert_eq!((&*id.table, &*id.name), ("staff", "person_id"));
        let columns: Vec<_> = table
            .insertable_columns()
            .expect("Columns should resolve")
            .into_iter()
            .map(|c| c.name)
            .collect();
        assert_eq!(columns, ["salary", "hired"]);
    }

    #[test]
    fn ambiguous_mappings() {
        init_logs();
        let error = describe::<Anonymous>().unwrap_err();
        assert!(matches!(
            error.downcast_ref::<MappingError>(),
            Some(MappingError::AmbiguousMapping {
                entity: "Anonymous",
                ..
            })
        ));
        assert_eq!(
            error.to_string(),
            "Entity `Anonymous` cannot be mapped: no identity property"
        );
        // The failure is memoized as well
        assert_eq!(
            describe::<Anonymous>().unwrap_err().to_string(),
            error.to_string()
        );
        assert!(TableInfo::for_entity::<Anonymous>().is_err());
        assert!(quill::select::<Anonymous>().is_err());

        let error = describe::<TwoHeads>().unwrap_err();
        assert!(error.to_string().contains("more than one identity"));
    }
}
