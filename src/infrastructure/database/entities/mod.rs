pub mod payment;
pub mod payment_method;
pub mod price_table;
pub mod vehicle;
