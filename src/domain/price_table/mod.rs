pub mod fee;
pub mod model;
pub mod repository;

pub use fee::calculate_fee;
pub use model::{parse_amount, ChargeCap, FlatRate, IncrementalRate, PriceTable, RateItem};
pub use repository::PriceTableRepository;
