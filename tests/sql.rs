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
    use indoc::indoc;
    use quill::{
        ColumnInfo, Entity, MappingError, MySqlDialect, NamingPolicy, PostgresDialect, Queries,
        SelectBuilder, TableCase, TableInfo,
    };

    static POSTGRES: Queries<PostgresDialect> = Queries::new(PostgresDialect);
    static MYSQL: Queries<MySqlDialect> = Queries::new(MySqlDialect);

    #[derive(Entity)]
    #[quill(table = "customer")]
    struct PlainCustomer {
        #[quill(id)]
        id: i64,
        name: String,
    }

    #[derive(Entity)]
    #[quill(table = "customer")]
    struct GeneratedCustomer {
        #[quill(id, generated)]
        id: i64,
        name: String,
    }

    #[derive(Entity)]
    struct Tag {
        #[quill(id, generated)]
        id: i64,
    }

    #[derive(Entity)]
    struct Unidentified {
        _value: i32,
    }

    #[derive(Entity)]
    struct Holder {
        #[quill(id)]
        id: i64,
        #[quill(many_to_one)]
        unidentified: Box<Unidentified>,
    }

    fn names(table: TableInfo, insert: bool) -> Vec<String> {
        let columns = if insert {
            table.insertable_columns()
        } else {
            table.updatable_columns()
        };
        columns
            .expect("Columns should resolve")
            .into_iter()
            .map(|c| c.name.into_owned())
            .collect()
    }

    #[test]
    fn writable_columns() {
        init_logs();
        let table = || TableInfo::for_entity::<PlainCustomer>().expect("Should be described");
        assert_eq!(names(table(), true), ["id", "name"]);
        assert_eq!(names(table(), false), ["id", "name"]);
        let table = || TableInfo::for_entity::<GeneratedCustomer>().expect("Should be described");
        assert_eq!(names(table(), true), ["name"]);
        assert_eq!(names(table(), false), ["name"]);

        let table = || TableInfo::for_entity::<Order>().expect("Should be described");
        assert_eq!(
            names(table(), true),
            ["id", "customer_id", "placed_at", "total"]
        );
        let table = || TableInfo::for_entity::<Product>().expect("Should be described");
        assert_eq!(names(table(), true), ["sku", "description"]);
        assert_eq!(names(table(), false), ["sku", "description"]);
    }

    #[test]
    fn select_all() {
        init_logs();
        let select = quill::select::<Customer>().expect("Should build");
        assert_eq!(
            select.to_sql(),
            indoc! {r#"
                SELECT "customer".*
                FROM "customer";
            "#}
            .trim()
        );
        assert_eq!(select.to_string(), select.to_sql());
    }

    #[test]
    fn select_with_join_and_filter() {
        init_logs();
        let customer_name = TableInfo::for_entity::<Customer>()
            .expect("Customer should be described")
            .column("name");
        let build = |select: SelectBuilder<'static>| {
            select
                .column("id")
                .column_as("total", "amount")
                .column_of(customer_name.clone())
                .join::<Customer, Order>()
                .expect("Customer should join into Order")
                .filter(|w| {
                    w.ge("total").group(|g| {
                        g.like(ColumnInfo::new("customer", "name"))
                            .or()
                            .is_null("customer")
                    })
                })
                .desc("placed_at")
                .limit(20)
                .offset(40)
                .to_sql()
        };
        assert_eq!(
            build(quill::select::<Order>().expect("Should build")),
            indoc! {r#"
                SELECT "orders"."id", "orders"."total" AS "amount", "customer"."name"
                FROM "orders"
                INNER JOIN "customer" ON "customer"."id" = "orders"."customer_id"
                WHERE "orders"."total" >= ? AND ("customer"."name" LIKE ? OR "orders"."customer_id" IS NULL)
                ORDER BY "orders"."placed_at" DESC
                LIMIT 20
                OFFSET 40;
            "#}
            .trim()
        );
        assert_eq!(
            build(POSTGRES.select::<Order>().expect("Should build")),
            indoc! {r#"
                SELECT "orders"."id", "orders"."total" AS "amount", "customer"."name"
                FROM "orders"
                INNER JOIN "customer" ON "customer"."id" = "orders"."customer_id"
                WHERE "orders"."total" >= $1 AND ("customer"."name" LIKE $2 OR "orders"."customer_id" IS NULL)
                ORDER BY "orders"."placed_at" DESC
                LIMIT 20
                OFFSET 40;
            "#}
            .trim()
        );
        assert_eq!(
            build(MYSQL.select::<Order>().expect("Should build")),
            indoc! {r#"
                SELECT `orders`.`id`, `orders`.`total` AS `amount`, `customer`.`name`
                FROM `orders`
                INNER JOIN `customer` ON `customer`.`id` = `orders`.`customer_id`
                WHERE `orders`.`total` >= ? AND (`customer`.`name` LIKE ? OR `orders`.`customer_id` IS NULL)
                ORDER BY `orders`.`placed_at` DESC
                LIMIT 20
                OFFSET 40;
            "#}
            .trim()
        );
    }

    #[test]
    fn select_aggregates() {
        init_logs();
        let select = quill::select::<OrderLine>()
            .expect("Should build")
            .function("COUNT", "*", Some("lines"))
            .function("SUM", "quantity", None)
            .filter(|w| w.eq("order"))
            .filter(|w| w.gt("unit_price"));
        assert_eq!(
            select.to_sql(),
            indoc! {r#"
                SELECT COUNT(*) AS "lines", SUM("order_line"."quantity")
                FROM "order_line"
                WHERE "order_line"."order_ref" = ? AND "order_line"."unit_price" > ?;
            "#}
            .trim()
        );
    }

    #[test]
    fn insert() {
        init_logs();
        let insert = quill::insert::<Order>().expect("Should build");
        assert_eq!(insert.columns().len(), 4);
        assert_eq!(
            insert.to_sql(),
            indoc! {r#"
                INSERT INTO "orders" ("id", "customer_id", "placed_at", "total") VALUES
                (?, ?, ?, ?);
            "#}
            .trim()
        );
        assert_eq!(
            POSTGRES
                .insert::<OrderLine>()
                .expect("Should build")
                .to_sql(),
            indoc! {r#"
                INSERT INTO "order_line" ("order_ref", "product_id", "quantity", "unit_price") VALUES
                ($1, $2, $3, $4);
            "#}
            .trim()
        );
        assert_eq!(
            MYSQL.insert::<Product>().expect("Should build").to_sql(),
            indoc! {r#"
                INSERT INTO `product` (`sku`, `description`) VALUES
                (?, ?);
            "#}
            .trim()
        );
    }

    #[test]
    fn update() {
        init_logs();
        assert_eq!(
            quill::update::<Customer>()
                .and_then(|v| v.by_id())
                .expect("Should build")
                .to_sql(),
            indoc! {r#"
                UPDATE "customer" SET "name" = ?, "email" = ?
                WHERE "customer"."id" = ?;
            "#}
            .trim()
        );
        let update = POSTGRES
            .update::<Customer>()
            .and_then(|v| v.by_id())
            .expect("Should build")
            .filter(|w| w.is_not_null("email"))
            .asc("name")
            .limit(1);
        // Postgres cannot order or limit an update
        assert_eq!(
            update.to_sql(),
            indoc! {r#"
                UPDATE "customer" SET "name" = $1, "email" = $2
                WHERE "customer"."id" = $3 AND "customer"."email" IS NOT NULL;
            "#}
            .trim()
        );
        let update = MYSQL
            .update::<Product>()
            .expect("Should build")
            .filter(|w| w.like("description"))
            .asc("code")
            .limit(10);
        assert_eq!(
            update.to_sql(),
            indoc! {r#"
                UPDATE `product` SET `sku` = ?, `description` = ?
                WHERE `product`.`description` LIKE ?
                ORDER BY `product`.`sku` ASC
                LIMIT 10;
            "#}
            .trim()
        );
    }

    #[test]
    fn delete() {
        init_logs();
        let delete = quill::delete::<Order>()
            .expect("Should build")
            .filter(|w| w.lt("placed_at").or().is_in("id", 3));
        assert_eq!(
            delete.to_sql(),
            indoc! {r#"
                DELETE FROM "orders"
                WHERE "orders"."placed_at" < ? OR "orders"."id" IN (?, ?, ?);
            "#}
            .trim()
        );
        assert_eq!(
            POSTGRES
                .delete::<Order>()
                .and_then(|v| v.by_id())
                .expect("Should build")
                .desc("placed_at")
                .limit(5)
                .to_sql(),
            indoc! {r#"
                DELETE FROM "orders"
                WHERE "orders"."id" = $1;
            "#}
            .trim()
        );
        assert_eq!(
            MYSQL
                .delete::<Customer>()
                .expect("Should build")
                .filter(|w| w.is_in("id", 0))
                .to_sql(),
            indoc! {r#"
                DELETE FROM `customer`
                WHERE 1 = 0;
            "#}
            .trim()
        );
        assert_eq!(
            quill::delete::<Product>().expect("Should build").to_sql(),
            r#"DELETE FROM "product";"#
        );
    }

    #[test]
    fn queries_with_naming() {
        init_logs();
        let queries = Queries::new(MySqlDialect).with_naming(
            NamingPolicy::new()
                .with_table_case(TableCase::Pascal)
                .with_separator("__"),
        );
        assert_eq!(queries.naming().separator, "__");
        let select = queries
            .select::<OrderLine>()
            .and_then(|v| v.join::<Product, OrderLine>())
            .expect("Should build");
        assert_eq!(
            select.to_sql(),
            indoc! {r#"
                SELECT `OrderLine`.*
                FROM `OrderLine`
                INNER JOIN `Product` ON `Product`.`sku` = `OrderLine`.`product_id`;
            "#}
            .trim()
        );
        assert_eq!(
            queries.insert::<Order>().expect("Should build").to_sql(),
            indoc! {r#"
                INSERT INTO `orders` (`id`, `customer__id`, `placed_at`, `total`) VALUES
                (?, ?, ?, ?);
            "#}
            .trim()
        );
    }

    #[test]
    fn update_without_columns() {
        init_logs();
        let error = quill::update::<Tag>().map(|v| v.to_sql()).unwrap_err();
        assert_eq!(
            error.downcast_ref::<MappingError>(),
            Some(&MappingError::NothingToUpdate { entity: "Tag" })
        );
        assert!(POSTGRES.update::<Tag>().is_err());
        assert_eq!(
            quill::insert::<Tag>().expect("Should build").to_sql(),
            r#"INSERT INTO "tag" DEFAULT VALUES;"#
        );
    }

    #[test]
    fn unresolvable_relationship() {
        init_logs();
        let error = quill::insert::<Holder>().map(|v| v.to_sql()).unwrap_err();
        assert!(matches!(
            error.downcast_ref::<MappingError>(),
            Some(MappingError::AmbiguousMapping {
                entity: "Unidentified",
                ..
            })
        ));
        assert_eq!(
            format!("{:#}", error),
            "Cannot resolve the columns of `Holder`: \
             Entity `Unidentified` cannot be mapped: no identity property"
        );
        assert!(quill::update::<Holder>().is_err());
        assert!(quill::select::<Holder>().is_err());
        assert!(MYSQL.delete::<Holder>().is_err());
        assert!(TableInfo::for_entity::<Holder>().is_err());
    }

    #[test]
    fn filters_are_grouped() {
        init_logs();
        let select = quill::select::<Customer>()
            .expect("Should build")
            .filter(|w| w.eq("name").or().eq("email"))
            .filter(|w| w.eq("id"));
        assert_eq!(
            select.to_sql(),
            indoc! {r#"
                SELECT "customer".*
                FROM "customer"
                WHERE ("customer"."name" = ? OR "customer"."email" = ?) AND "customer"."id" = ?;
            "#}
            .trim()
        );
        let delete = quill::delete::<Customer>()
            .expect("Should build")
            .filter(|w| w.eq("id"))
            .filter(|w| w.is_null("email").or().like("name"))
            .filter(|w| w.ne("name"));
        assert_eq!(
            delete.to_sql(),
            indoc! {r#"
                DELETE FROM "customer"
                WHERE "customer"."id" = ? AND ("customer"."email" IS NULL OR "customer"."name" LIKE ?) AND "customer"."name" <> ?;
            "#}
            .trim()
        );
        let update = POSTGRES
            .update::<Customer>()
            .and_then(|v| v.by_id())
            .expect("Should build")
            .filter(|w| w.eq("name").or().is_null("email"));
        assert_eq!(
            update.to_sql(),
            indoc! {r#"
                UPDATE "customer" SET "name" = $1, "email" = $2
                WHERE "customer"."id" = $3 AND ("customer"."name" = $4 OR "customer"."email" IS NULL);
            "#}
            .trim()
        );
    }
}
