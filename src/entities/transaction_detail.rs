use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// One line of a committed sale. Owned by its transaction (cascade-deleted
/// with it). `product_name` and `subtotal` are snapshots captured at commit
/// time so the record stays correct if the product is renamed or repriced.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "transaction_details")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    pub transaction_id: i32,
    pub product_id: i32,
    pub product_name: String,
    pub quantity: i32,
    pub subtotal: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::sales_transaction::Entity",
        from = "Column::TransactionId",
        to = "super::sales_transaction::Column::Id"
    )]
    Transaction,

    #[sea_orm(
        belongs_to = "super::product::Entity",
        from = "Column::ProductId",
        to = "super::product::Column::Id"
    )]
    Product,
}

impl Related<super::sales_transaction::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Transaction.def()
    }
}

impl Related<super::product::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Product.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
