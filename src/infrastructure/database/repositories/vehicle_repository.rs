//! SeaORM implementation of VehicleRepository

use std::collections::HashMap;

use async_trait::async_trait;
use log::info;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, NotSet, PaginatorTrait,
    QueryFilter, QueryOrder, Set,
};

use crate::domain::vehicle::{NewVehicle, Vehicle, VehicleRepository};
use crate::domain::{DomainError, DomainResult};
use crate::infrastructure::database::entities::{price_table, vehicle};

use super::price_table_repository::db_err;

fn entity_to_domain(v: vehicle::Model, price_table_name: Option<String>) -> Vehicle {
    Vehicle {
        id: v.id,
        plate: v.plate,
        model: v.model,
        color: v.color,
        price_table_id: v.price_table_id,
        price_table_name,
        entry_at: v.entry_at,
        exit_at: v.exit_at,
        amount_due: v.amount_due,
        payment_method_id: v.payment_method_id,
        in_lot: v.in_lot,
    }
}

pub struct SeaOrmVehicleRepository {
    db: DatabaseConnection,
}

impl SeaOrmVehicleRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    async fn table_names(&self) -> DomainResult<HashMap<i64, String>> {
        let tables = price_table::Entity::find()
            .all(&self.db)
            .await
            .map_err(db_err)?;
        Ok(tables.into_iter().map(|t| (t.id, t.name)).collect())
    }
}

#[async_trait]
impl VehicleRepository for SeaOrmVehicleRepository {
    async fn find_by_id(&self, id: i64) -> DomainResult<Option<Vehicle>> {
        let Some(model) = vehicle::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?
        else {
            return Ok(None);
        };

        let name = price_table::Entity::find_by_id(model.price_table_id)
            .one(&self.db)
            .await
            .map_err(db_err)?
            .map(|t| t.name);

        Ok(Some(entity_to_domain(model, name)))
    }

    async fn find_in_lot(&self) -> DomainResult<Vec<Vehicle>> {
        let models = vehicle::Entity::find()
            .filter(vehicle::Column::InLot.eq(true))
            .order_by_desc(vehicle::Column::EntryAt)
            .all(&self.db)
            .await
            .map_err(db_err)?;

        let names = self.table_names().await?;
        Ok(models
            .into_iter()
            .map(|m| {
                let name = names.get(&m.price_table_id).cloned();
                entity_to_domain(m, name)
            })
            .collect())
    }

    async fn count_in_lot(&self) -> DomainResult<u64> {
        vehicle::Entity::find()
            .filter(vehicle::Column::InLot.eq(true))
            .count(&self.db)
            .await
            .map_err(db_err)
    }

    async fn insert(&self, new: NewVehicle) -> DomainResult<Vehicle> {
        let model = vehicle::ActiveModel {
            id: NotSet,
            plate: Set(new.plate),
            model: Set(new.model),
            color: Set(new.color),
            price_table_id: Set(new.price_table_id),
            entry_at: Set(new.entry_at),
            exit_at: Set(None),
            amount_due: Set(None),
            payment_method_id: Set(None),
            in_lot: Set(true),
        };
        let result = model.insert(&self.db).await.map_err(db_err)?;
        info!("Vehicle checked in: {} ({})", result.plate, result.id);
        Ok(entity_to_domain(result, None))
    }

    async fn update(&self, v: Vehicle) -> DomainResult<()> {
        let existing = vehicle::Entity::find_by_id(v.id)
            .one(&self.db)
            .await
            .map_err(db_err)?;

        let Some(_) = existing else {
            return Err(DomainError::NotFound {
                entity: "Vehicle",
                field: "id",
                value: v.id.to_string(),
            });
        };

        let model = vehicle::ActiveModel {
            id: Set(v.id),
            plate: Set(v.plate),
            model: Set(v.model),
            color: Set(v.color),
            price_table_id: Set(v.price_table_id),
            entry_at: Set(v.entry_at),
            exit_at: Set(v.exit_at),
            amount_due: Set(v.amount_due),
            payment_method_id: Set(v.payment_method_id),
            in_lot: Set(v.in_lot),
        };
        model.update(&self.db).await.map_err(db_err)?;
        Ok(())
    }

    async fn delete_all(&self) -> DomainResult<()> {
        vehicle::Entity::delete_many()
            .exec(&self.db)
            .await
            .map_err(db_err)?;
        Ok(())
    }
}
