use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Storefront API",
        version = "1.0.0",
        description = r#"
# Storefront API

Inventory-backed point-of-sale API: catalog CRUD for categories and
products, an atomic checkout that validates stock and records sales
transactions, and date-ranged sales summary reporting.

## Error Handling

Failing endpoints return a consistent JSON body with an appropriate
HTTP status code:

```json
{
  "error": "Conflict",
  "message": "Insufficient stock: stock not enough for product Widget",
  "timestamp": "2026-01-01T00:00:00Z"
}
```
        "#,
        license(
            name = "MIT",
            url = "https://opensource.org/licenses/MIT"
        )
    ),
    servers(
        (url = "http://localhost:8080", description = "Local development")
    ),
    paths(
        crate::handlers::categories::list_categories,
        crate::handlers::categories::get_category,
        crate::handlers::categories::create_category,
        crate::handlers::categories::update_category,
        crate::handlers::categories::delete_category,
        crate::handlers::products::list_products,
        crate::handlers::products::get_product,
        crate::handlers::products::create_product,
        crate::handlers::products::update_product,
        crate::handlers::products::delete_product,
        crate::handlers::checkout::checkout,
        crate::handlers::reports::sales_summary,
    ),
    components(schemas(
        crate::errors::ErrorResponse,
        crate::handlers::checkout::CheckoutRequest,
        crate::services::categories::CategoryResponse,
        crate::services::categories::CreateCategoryRequest,
        crate::services::categories::UpdateCategoryRequest,
        crate::services::products::ProductResponse,
        crate::services::products::CreateProductRequest,
        crate::services::products::UpdateProductRequest,
        crate::services::checkout::CheckoutItem,
        crate::services::checkout::TransactionResponse,
        crate::services::checkout::TransactionDetailResponse,
        crate::services::reports::ReportSummary,
        crate::services::reports::BestSellingProduct,
    )),
    tags(
        (name = "Categories", description = "Category management endpoints"),
        (name = "Products", description = "Product catalog endpoints"),
        (name = "Checkout", description = "Atomic checkout endpoint"),
        (name = "Reports", description = "Sales reporting endpoints")
    )
)]
pub struct ApiDoc;

pub fn swagger_ui() -> SwaggerUi {
    SwaggerUi::new("/swagger-ui")
        .url("/api-docs/openapi.json", ApiDoc::openapi())
        .config(utoipa_swagger_ui::Config::from("/api-docs/openapi.json").try_it_out_enabled(true))
}
