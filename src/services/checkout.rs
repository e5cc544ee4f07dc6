use crate::{
    db::DbPool,
    entities::{product, sales_transaction, transaction_detail},
    errors::ServiceError,
};
use chrono::{DateTime, Utc};
use sea_orm::{
    sea_query::Expr, ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, Set,
    TransactionTrait,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{info, instrument};
use utoipa::ToSchema;

/// One requested basket line. Transient input: it exists only for the
/// duration of a checkout call and is never persisted.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
pub struct CheckoutItem {
    pub product_id: i32,
    pub quantity: i32,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct TransactionDetailResponse {
    pub product_id: i32,
    pub product_name: String,
    pub quantity: i32,
    pub subtotal: i64,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct TransactionResponse {
    pub id: i32,
    pub total_amount: i64,
    pub created_at: DateTime<Utc>,
    pub details: Vec<TransactionDetailResponse>,
}

/// Converts a basket of requested items into a committed sales transaction
/// while adjusting inventory, all inside one database transaction.
#[derive(Clone)]
pub struct CheckoutService {
    db_pool: Arc<DbPool>,
}

impl CheckoutService {
    /// Creates a new checkout service instance
    pub fn new(db_pool: Arc<DbPool>) -> Self {
        Self { db_pool }
    }

    /// Runs a checkout as a single atomic unit of work.
    ///
    /// For each item, in the order provided: re-read the product inside the
    /// transaction, validate stock, accumulate the subtotal, and decrement
    /// stock with a conditional update. Only then are the transaction row and
    /// its detail rows inserted. Any failure rolls the whole unit back.
    #[instrument(skip(self, items), fields(item_count = items.len()))]
    pub async fn checkout(
        &self,
        items: Vec<CheckoutItem>,
    ) -> Result<TransactionResponse, ServiceError> {
        if items.is_empty() {
            return Err(ServiceError::ValidationError(
                "checkout items cannot be empty".to_string(),
            ));
        }

        for item in &items {
            if item.quantity <= 0 {
                return Err(ServiceError::ValidationError(format!(
                    "quantity must be a positive integer for product {}",
                    item.product_id
                )));
            }
        }

        let db = &*self.db_pool;

        // Dropping the transaction without committing rolls everything back,
        // so every early `?` / `return Err` below aborts the unit of work.
        let txn = db.begin().await?;

        let mut total_amount: i64 = 0;
        let mut pending_details: Vec<(i32, String, i32, i64)> = Vec::with_capacity(items.len());

        for item in &items {
            // Re-read price and stock inside the transaction; a point-in-time
            // snapshot from before `begin` must not be trusted.
            let product = product::Entity::find_by_id(item.product_id)
                .one(&txn)
                .await?
                .ok_or_else(|| {
                    ServiceError::NotFound(format!("Product {} not found", item.product_id))
                })?;

            if product.stock < item.quantity {
                return Err(ServiceError::InsufficientStock(format!(
                    "stock not enough for product {}",
                    product.name
                )));
            }

            let subtotal = product.price * i64::from(item.quantity);
            total_amount += subtotal;

            // Conditional decrement: the `stock >= quantity` guard makes the
            // update a no-op when a concurrent checkout got there first, in
            // which case we abort instead of overcommitting.
            let update = product::Entity::update_many()
                .col_expr(
                    product::Column::Stock,
                    Expr::col(product::Column::Stock).sub(item.quantity),
                )
                .filter(product::Column::Id.eq(item.product_id))
                .filter(product::Column::Stock.gte(item.quantity))
                .exec(&txn)
                .await?;

            if update.rows_affected == 0 {
                return Err(ServiceError::InsufficientStock(format!(
                    "stock not enough for product {}",
                    product.name
                )));
            }

            pending_details.push((product.id, product.name, item.quantity, subtotal));
        }

        let now = Utc::now();

        let transaction = sales_transaction::ActiveModel {
            total_amount: Set(total_amount),
            created_at: Set(now),
            ..Default::default()
        }
        .insert(&txn)
        .await?;

        let mut details = Vec::with_capacity(pending_details.len());
        for (product_id, product_name, quantity, subtotal) in pending_details {
            let detail = transaction_detail::ActiveModel {
                transaction_id: Set(transaction.id),
                product_id: Set(product_id),
                product_name: Set(product_name),
                quantity: Set(quantity),
                subtotal: Set(subtotal),
                ..Default::default()
            }
            .insert(&txn)
            .await?;

            details.push(TransactionDetailResponse {
                product_id: detail.product_id,
                product_name: detail.product_name,
                quantity: detail.quantity,
                subtotal: detail.subtotal,
            });
        }

        txn.commit().await?;

        info!(
            transaction_id = transaction.id,
            total_amount, "Checkout committed"
        );

        Ok(TransactionResponse {
            id: transaction.id,
            total_amount: transaction.total_amount,
            created_at: transaction.created_at,
            details,
        })
    }
}
