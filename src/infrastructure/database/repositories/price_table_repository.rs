//! SeaORM implementation of PriceTableRepository

use async_trait::async_trait;
use chrono::Utc;
use log::info;
use sea_orm::{
    ActiveModelTrait, DatabaseConnection, EntityTrait, QueryOrder, Set, TransactionTrait,
};

use crate::domain::price_table::{ChargeCap, FlatRate, IncrementalRate, PriceTable, PriceTableRepository};
use crate::domain::{DomainError, DomainResult};
use crate::infrastructure::database::entities::price_table;

pub(super) fn db_err(e: sea_orm::DbErr) -> DomainError {
    DomainError::Validation(format!("Database error: {}", e))
}

fn entity_to_domain(m: price_table::Model) -> PriceTable {
    let flat_until = match (m.flat_until_minutes, m.flat_until_value) {
        (Some(period_minutes), Some(value)) => Some(FlatRate {
            period_minutes,
            value,
        }),
        _ => None,
    };
    let incremental = match (
        m.incremental_from_minutes,
        m.incremental_every_minutes,
        m.incremental_add_value,
    ) {
        (Some(from_minutes), Some(every_minutes), Some(add_value)) => Some(IncrementalRate {
            from_minutes,
            every_minutes,
            add_value,
        }),
        _ => None,
    };
    let cap = match (m.cap_period_minutes, m.cap_max_value) {
        (Some(period_minutes), Some(max_value)) => Some(ChargeCap {
            period_minutes,
            max_value,
        }),
        _ => None,
    };

    PriceTable {
        id: m.id,
        name: m.name,
        tolerance_minutes: m.tolerance_minutes,
        flat_until,
        incremental,
        cap,
    }
}

fn domain_to_active(t: &PriceTable) -> price_table::ActiveModel {
    price_table::ActiveModel {
        id: Set(t.id),
        name: Set(t.name.clone()),
        tolerance_minutes: Set(t.tolerance_minutes),
        flat_until_minutes: Set(t.flat_until.as_ref().map(|f| f.period_minutes)),
        flat_until_value: Set(t.flat_until.as_ref().map(|f| f.value)),
        incremental_from_minutes: Set(t.incremental.as_ref().map(|i| i.from_minutes)),
        incremental_every_minutes: Set(t.incremental.as_ref().map(|i| i.every_minutes)),
        incremental_add_value: Set(t.incremental.as_ref().map(|i| i.add_value)),
        cap_period_minutes: Set(t.cap.as_ref().map(|c| c.period_minutes)),
        cap_max_value: Set(t.cap.as_ref().map(|c| c.max_value)),
        synced_at: Set(Utc::now()),
    }
}

pub struct SeaOrmPriceTableRepository {
    db: DatabaseConnection,
}

impl SeaOrmPriceTableRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl PriceTableRepository for SeaOrmPriceTableRepository {
    async fn find_by_id(&self, id: i64) -> DomainResult<Option<PriceTable>> {
        let model = price_table::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?;
        Ok(model.map(entity_to_domain))
    }

    async fn find_all(&self) -> DomainResult<Vec<PriceTable>> {
        let models = price_table::Entity::find()
            .order_by_asc(price_table::Column::Name)
            .all(&self.db)
            .await
            .map_err(db_err)?;
        Ok(models.into_iter().map(entity_to_domain).collect())
    }

    async fn replace_all(&self, tables: Vec<PriceTable>) -> DomainResult<()> {
        let txn = self.db.begin().await.map_err(db_err)?;

        price_table::Entity::delete_many()
            .exec(&txn)
            .await
            .map_err(db_err)?;

        let count = tables.len();
        for table in &tables {
            domain_to_active(table).insert(&txn).await.map_err(db_err)?;
        }

        txn.commit().await.map_err(db_err)?;
        info!("Price tables replaced: {} rows", count);
        Ok(())
    }

    async fn delete_all(&self) -> DomainResult<()> {
        price_table::Entity::delete_many()
            .exec(&self.db)
            .await
            .map_err(db_err)?;
        Ok(())
    }
}
