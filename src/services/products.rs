use crate::{
    db::DbPool,
    entities::{category, product},
    errors::ServiceError,
    services::categories::CategoryResponse,
};
use chrono::{DateTime, Utc};
use sea_orm::{ActiveModelTrait, EntityTrait, QuerySelect, Set};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{info, instrument};
use utoipa::ToSchema;
use validator::Validate;

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateProductRequest {
    #[validate(length(min = 1, message = "name cannot be empty"))]
    pub name: String,
    /// Unit price in the smallest currency unit (e.g., cents)
    #[validate(range(min = 0, message = "price cannot be negative"))]
    pub price: i64,
    #[validate(range(min = 0, message = "stock cannot be negative"))]
    pub stock: i32,
    pub category_id: Option<i32>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateProductRequest {
    #[validate(length(min = 1, message = "name cannot be empty"))]
    pub name: String,
    #[validate(range(min = 0, message = "price cannot be negative"))]
    pub price: i64,
    #[validate(range(min = 0, message = "stock cannot be negative"))]
    pub stock: i32,
    pub category_id: Option<i32>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ProductResponse {
    pub id: i32,
    pub name: String,
    pub price: i64,
    pub stock: i32,
    pub category_id: Option<i32>,
    pub created_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<CategoryResponse>,
}

impl ProductResponse {
    fn from_joined(model: product::Model, cat: Option<category::Model>) -> Self {
        Self {
            id: model.id,
            name: model.name,
            price: model.price,
            stock: model.stock,
            category_id: model.category_id,
            created_at: model.created_at,
            category: cat.map(CategoryResponse::from),
        }
    }
}

/// CRUD over the product catalog. Stock adjustments from sales do not go
/// through here; that is the checkout service's job.
#[derive(Clone)]
pub struct ProductService {
    db_pool: Arc<DbPool>,
}

impl ProductService {
    pub fn new(db_pool: Arc<DbPool>) -> Self {
        Self { db_pool }
    }

    #[instrument(skip(self))]
    pub async fn list(&self) -> Result<Vec<ProductResponse>, ServiceError> {
        let rows = product::Entity::find()
            .find_also_related(category::Entity)
            .all(&*self.db_pool)
            .await?;

        Ok(rows
            .into_iter()
            .map(|(p, c)| ProductResponse::from_joined(p, c))
            .collect())
    }

    #[instrument(skip(self))]
    pub async fn get(&self, id: i32) -> Result<ProductResponse, ServiceError> {
        let (model, cat) = product::Entity::find_by_id(id)
            .find_also_related(category::Entity)
            .one(&*self.db_pool)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("Product {} not found", id)))?;

        Ok(ProductResponse::from_joined(model, cat))
    }

    #[instrument(skip(self, req), fields(name = %req.name))]
    pub async fn create(&self, req: CreateProductRequest) -> Result<ProductResponse, ServiceError> {
        req.validate()?;
        self.ensure_category_exists(req.category_id).await?;

        let model = product::ActiveModel {
            name: Set(req.name),
            price: Set(req.price),
            stock: Set(req.stock),
            category_id: Set(req.category_id),
            created_at: Set(Utc::now()),
            ..Default::default()
        }
        .insert(&*self.db_pool)
        .await?;

        info!(product_id = model.id, "Product created");
        self.get(model.id).await
    }

    #[instrument(skip(self, req))]
    pub async fn update(
        &self,
        id: i32,
        req: UpdateProductRequest,
    ) -> Result<ProductResponse, ServiceError> {
        req.validate()?;
        self.ensure_category_exists(req.category_id).await?;

        let existing = product::Entity::find_by_id(id)
            .one(&*self.db_pool)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("Product {} not found", id)))?;

        let mut active: product::ActiveModel = existing.into();
        active.name = Set(req.name);
        active.price = Set(req.price);
        active.stock = Set(req.stock);
        active.category_id = Set(req.category_id);

        let model = active.update(&*self.db_pool).await?;
        info!(product_id = model.id, "Product updated");
        self.get(model.id).await
    }

    #[instrument(skip(self))]
    pub async fn delete(&self, id: i32) -> Result<(), ServiceError> {
        let result = product::Entity::delete_by_id(id)
            .exec(&*self.db_pool)
            .await?;

        if result.rows_affected == 0 {
            return Err(ServiceError::NotFound(format!("Product {} not found", id)));
        }

        info!(product_id = id, "Product deleted");
        Ok(())
    }

    async fn ensure_category_exists(&self, category_id: Option<i32>) -> Result<(), ServiceError> {
        let Some(id) = category_id else {
            return Ok(());
        };

        let exists = category::Entity::find_by_id(id)
            .select_only()
            .column(category::Column::Id)
            .into_tuple::<i32>()
            .one(&*self.db_pool)
            .await?
            .is_some();

        if exists {
            Ok(())
        } else {
            Err(ServiceError::InvalidInput(format!(
                "Category {} does not exist",
                id
            )))
        }
    }
}
