pub mod category;
pub mod product;
pub mod sales_transaction;
pub mod transaction_detail;

pub use category::Entity as Category;
pub use product::Entity as Product;
pub use sales_transaction::Entity as SalesTransaction;
pub use transaction_detail::Entity as TransactionDetail;
