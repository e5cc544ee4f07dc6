use sea_orm_migration::prelude::*;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20240601_000001_create_categories_table::Migration),
            Box::new(m20240601_000002_create_products_table::Migration),
            Box::new(m20240601_000003_create_transactions_table::Migration),
            Box::new(m20240601_000004_create_transaction_details_table::Migration),
        ]
    }
}

// Migration implementations

mod m20240601_000001_create_categories_table {
    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20240601_000001_create_categories_table"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(Categories::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(Categories::Id)
                                .integer()
                                .not_null()
                                .auto_increment()
                                .primary_key(),
                        )
                        .col(ColumnDef::new(Categories::Name).string().not_null())
                        .col(ColumnDef::new(Categories::Description).string())
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(Categories::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden)]
    pub(crate) enum Categories {
        Table,
        Id,
        Name,
        Description,
    }
}

mod m20240601_000002_create_products_table {
    use sea_orm_migration::prelude::*;

    use super::m20240601_000001_create_categories_table::Categories;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20240601_000002_create_products_table"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(Products::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(Products::Id)
                                .integer()
                                .not_null()
                                .auto_increment()
                                .primary_key(),
                        )
                        .col(ColumnDef::new(Products::Name).string().not_null())
                        .col(ColumnDef::new(Products::Price).big_integer().not_null())
                        .col(ColumnDef::new(Products::Stock).integer().not_null())
                        .col(ColumnDef::new(Products::CategoryId).integer())
                        .col(
                            ColumnDef::new(Products::CreatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_products_category_id")
                                .from(Products::Table, Products::CategoryId)
                                .to(Categories::Table, Categories::Id)
                                // Weak reference: deleting a category detaches
                                // its products instead of deleting them.
                                .on_delete(ForeignKeyAction::SetNull),
                        )
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(Products::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden)]
    pub(crate) enum Products {
        Table,
        Id,
        Name,
        Price,
        Stock,
        CategoryId,
        CreatedAt,
    }
}

mod m20240601_000003_create_transactions_table {
    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20240601_000003_create_transactions_table"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(Transactions::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(Transactions::Id)
                                .integer()
                                .not_null()
                                .auto_increment()
                                .primary_key(),
                        )
                        .col(
                            ColumnDef::new(Transactions::TotalAmount)
                                .big_integer()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(Transactions::CreatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .to_owned(),
                )
                .await?;

            // The report endpoint filters on created_at ranges.
            manager
                .create_index(
                    Index::create()
                        .name("idx_transactions_created_at")
                        .table(Transactions::Table)
                        .col(Transactions::CreatedAt)
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(Transactions::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden)]
    pub(crate) enum Transactions {
        Table,
        Id,
        TotalAmount,
        CreatedAt,
    }
}

mod m20240601_000004_create_transaction_details_table {
    use sea_orm_migration::prelude::*;

    use super::m20240601_000002_create_products_table::Products;
    use super::m20240601_000003_create_transactions_table::Transactions;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20240601_000004_create_transaction_details_table"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(TransactionDetails::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(TransactionDetails::Id)
                                .integer()
                                .not_null()
                                .auto_increment()
                                .primary_key(),
                        )
                        .col(
                            ColumnDef::new(TransactionDetails::TransactionId)
                                .integer()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(TransactionDetails::ProductId)
                                .integer()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(TransactionDetails::ProductName)
                                .string()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(TransactionDetails::Quantity)
                                .integer()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(TransactionDetails::Subtotal)
                                .big_integer()
                                .not_null(),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_transaction_details_transaction_id")
                                .from(
                                    TransactionDetails::Table,
                                    TransactionDetails::TransactionId,
                                )
                                .to(Transactions::Table, Transactions::Id)
                                .on_delete(ForeignKeyAction::Cascade),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_transaction_details_product_id")
                                .from(TransactionDetails::Table, TransactionDetails::ProductId)
                                .to(Products::Table, Products::Id),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .name("idx_transaction_details_transaction_id")
                        .table(TransactionDetails::Table)
                        .col(TransactionDetails::TransactionId)
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(TransactionDetails::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden)]
    enum TransactionDetails {
        Table,
        Id,
        TransactionId,
        ProductId,
        ProductName,
        Quantity,
        Subtotal,
    }
}
