pub mod categories;
pub mod checkout;
pub mod products;
pub mod reports;
