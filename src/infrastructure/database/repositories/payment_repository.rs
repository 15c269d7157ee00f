//! SeaORM implementations of the payment repositories

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use log::info;
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, DatabaseConnection, EntityTrait, NotSet, QueryOrder, Set, TransactionTrait,
};

use crate::domain::payment::{
    Payment, PaymentMethod, PaymentMethodRepository, PaymentMethodTotal, PaymentRepository,
};
use crate::domain::DomainResult;
use crate::infrastructure::database::entities::{payment, payment_method};

use super::price_table_repository::db_err;

fn method_to_domain(m: payment_method::Model) -> PaymentMethod {
    PaymentMethod {
        id: m.id,
        name: m.name,
        receiving_days: m.receiving_days,
        receiving_fee: m.receiving_fee,
    }
}

pub struct SeaOrmPaymentMethodRepository {
    db: DatabaseConnection,
}

impl SeaOrmPaymentMethodRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl PaymentMethodRepository for SeaOrmPaymentMethodRepository {
    async fn find_by_id(&self, id: i64) -> DomainResult<Option<PaymentMethod>> {
        let model = payment_method::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?;
        Ok(model.map(method_to_domain))
    }

    async fn find_all(&self) -> DomainResult<Vec<PaymentMethod>> {
        let models = payment_method::Entity::find()
            .order_by_asc(payment_method::Column::Name)
            .all(&self.db)
            .await
            .map_err(db_err)?;
        Ok(models.into_iter().map(method_to_domain).collect())
    }

    async fn replace_all(&self, methods: Vec<PaymentMethod>) -> DomainResult<()> {
        let txn = self.db.begin().await.map_err(db_err)?;

        payment_method::Entity::delete_many()
            .exec(&txn)
            .await
            .map_err(db_err)?;

        let count = methods.len();
        for method in methods {
            let model = payment_method::ActiveModel {
                id: Set(method.id),
                name: Set(method.name),
                receiving_days: Set(method.receiving_days),
                receiving_fee: Set(method.receiving_fee),
            };
            model.insert(&txn).await.map_err(db_err)?;
        }

        txn.commit().await.map_err(db_err)?;
        info!("Payment methods replaced: {} rows", count);
        Ok(())
    }

    async fn delete_all(&self) -> DomainResult<()> {
        payment_method::Entity::delete_many()
            .exec(&self.db)
            .await
            .map_err(db_err)?;
        Ok(())
    }
}

pub struct SeaOrmPaymentRepository {
    db: DatabaseConnection,
}

impl SeaOrmPaymentRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl PaymentRepository for SeaOrmPaymentRepository {
    async fn insert(
        &self,
        vehicle_id: i64,
        payment_method_id: i64,
        amount: Decimal,
        paid_at: DateTime<Utc>,
    ) -> DomainResult<Payment> {
        let model = payment::ActiveModel {
            id: NotSet,
            vehicle_id: Set(vehicle_id),
            payment_method_id: Set(payment_method_id),
            amount: Set(amount),
            paid_at: Set(paid_at),
        };
        let result = model.insert(&self.db).await.map_err(db_err)?;
        info!("Payment recorded: vehicle {} amount {}", vehicle_id, amount);
        Ok(Payment {
            id: result.id,
            vehicle_id: result.vehicle_id,
            payment_method_id: result.payment_method_id,
            amount: result.amount,
            paid_at: result.paid_at,
        })
    }

    async fn totals_by_method(&self) -> DomainResult<Vec<PaymentMethodTotal>> {
        let payments = payment::Entity::find()
            .all(&self.db)
            .await
            .map_err(db_err)?;
        let methods = payment_method::Entity::find()
            .all(&self.db)
            .await
            .map_err(db_err)?;

        let names: HashMap<i64, String> = methods.into_iter().map(|m| (m.id, m.name)).collect();

        let mut totals: HashMap<i64, Decimal> = HashMap::new();
        for p in payments {
            *totals.entry(p.payment_method_id).or_insert(Decimal::ZERO) += p.amount;
        }

        let mut result: Vec<PaymentMethodTotal> = totals
            .into_iter()
            .map(|(id, total)| PaymentMethodTotal {
                payment_method_id: id,
                payment_method_name: names.get(&id).cloned().unwrap_or_default(),
                total,
            })
            .collect();
        result.sort_by(|a, b| a.payment_method_name.cmp(&b.payment_method_name));
        Ok(result)
    }

    async fn total(&self) -> DomainResult<Decimal> {
        let payments = payment::Entity::find()
            .all(&self.db)
            .await
            .map_err(db_err)?;
        Ok(payments.into_iter().map(|p| p.amount).sum())
    }

    async fn delete_all(&self) -> DomainResult<()> {
        payment::Entity::delete_many()
            .exec(&self.db)
            .await
            .map_err(db_err)?;
        Ok(())
    }
}
