use crate::db::DbPool;
use crate::services::{
    categories::CategoryService, checkout::CheckoutService, products::ProductService,
    reports::ReportService,
};
use std::sync::Arc;

pub mod categories;
pub mod checkout;
pub mod common;
pub mod products;
pub mod reports;

/// Service container shared by all handlers through [`crate::AppState`].
#[derive(Clone)]
pub struct AppServices {
    pub categories: CategoryService,
    pub products: ProductService,
    pub checkout: CheckoutService,
    pub reports: ReportService,
}

impl AppServices {
    pub fn new(db_pool: Arc<DbPool>) -> Self {
        Self {
            categories: CategoryService::new(db_pool.clone()),
            products: ProductService::new(db_pool.clone()),
            checkout: CheckoutService::new(db_pool.clone()),
            reports: ReportService::new(db_pool),
        }
    }
}
