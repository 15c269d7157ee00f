//! Vehicle session entity

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "vehicles")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,

    pub plate: String,
    pub model: String,
    pub color: String,

    /// Price table chosen at check-in
    pub price_table_id: i64,

    pub entry_at: DateTime<Utc>,

    /// Null until checkout
    pub exit_at: Option<DateTime<Utc>>,

    /// Frozen at checkout
    pub amount_due: Option<Decimal>,

    pub payment_method_id: Option<i64>,

    pub in_lot: bool,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
