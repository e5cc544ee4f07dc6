use crate::{db::DbPool, entities::category, errors::ServiceError};
use sea_orm::{ActiveModelTrait, EntityTrait, Set};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{info, instrument};
use utoipa::ToSchema;
use validator::Validate;

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateCategoryRequest {
    #[validate(length(min = 1, message = "name cannot be empty"))]
    pub name: String,
    pub description: Option<String>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateCategoryRequest {
    #[validate(length(min = 1, message = "name cannot be empty"))]
    pub name: String,
    pub description: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CategoryResponse {
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
}

impl From<category::Model> for CategoryResponse {
    fn from(model: category::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            description: model.description,
        }
    }
}

/// CRUD over product categories.
#[derive(Clone)]
pub struct CategoryService {
    db_pool: Arc<DbPool>,
}

impl CategoryService {
    pub fn new(db_pool: Arc<DbPool>) -> Self {
        Self { db_pool }
    }

    #[instrument(skip(self))]
    pub async fn list(&self) -> Result<Vec<CategoryResponse>, ServiceError> {
        let categories = category::Entity::find().all(&*self.db_pool).await?;
        Ok(categories.into_iter().map(CategoryResponse::from).collect())
    }

    #[instrument(skip(self))]
    pub async fn get(&self, id: i32) -> Result<CategoryResponse, ServiceError> {
        let model = category::Entity::find_by_id(id)
            .one(&*self.db_pool)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("Category {} not found", id)))?;
        Ok(model.into())
    }

    #[instrument(skip(self, req), fields(name = %req.name))]
    pub async fn create(
        &self,
        req: CreateCategoryRequest,
    ) -> Result<CategoryResponse, ServiceError> {
        req.validate()?;

        let model = category::ActiveModel {
            name: Set(req.name),
            description: Set(req.description),
            ..Default::default()
        }
        .insert(&*self.db_pool)
        .await?;

        info!(category_id = model.id, "Category created");
        Ok(model.into())
    }

    #[instrument(skip(self, req))]
    pub async fn update(
        &self,
        id: i32,
        req: UpdateCategoryRequest,
    ) -> Result<CategoryResponse, ServiceError> {
        req.validate()?;

        let existing = category::Entity::find_by_id(id)
            .one(&*self.db_pool)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("Category {} not found", id)))?;

        let mut active: category::ActiveModel = existing.into();
        active.name = Set(req.name);
        active.description = Set(req.description);

        let model = active.update(&*self.db_pool).await?;
        info!(category_id = model.id, "Category updated");
        Ok(model.into())
    }

    #[instrument(skip(self))]
    pub async fn delete(&self, id: i32) -> Result<(), ServiceError> {
        let result = category::Entity::delete_by_id(id)
            .exec(&*self.db_pool)
            .await?;

        if result.rows_affected == 0 {
            return Err(ServiceError::NotFound(format!("Category {} not found", id)));
        }

        info!(category_id = id, "Category deleted");
        Ok(())
    }
}
