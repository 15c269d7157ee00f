//! Price table entity, the canonical persisted form
//!
//! Only the reduced rule set survives normalization; raw rate items from
//! the sync payload are never stored.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "price_tables")]
pub struct Model {
    /// Upstream table id (or a synthetic one when upstream has none)
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: i64,

    /// Display name, e.g. "Carro", "Moto"
    pub name: String,

    /// Grace period in minutes; no charge accrues inside it
    pub tolerance_minutes: i64,

    /// Flat tier: fixed value for stays up to this many minutes
    pub flat_until_minutes: Option<i64>,
    pub flat_until_value: Option<Decimal>,

    /// Incremental tier: add `incremental_add_value` per started block of
    /// `incremental_every_minutes`, rule selected by smallest "since"
    pub incremental_from_minutes: Option<i64>,
    pub incremental_every_minutes: Option<i64>,
    pub incremental_add_value: Option<Decimal>,

    /// Cap: clamp the total while the stay is within this period
    pub cap_period_minutes: Option<i64>,
    pub cap_max_value: Option<Decimal>,

    /// When this row was last written by a sync
    pub synced_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
