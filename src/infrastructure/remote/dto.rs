//! Wire types for the upstream establishment API
//!
//! The payload is loosely typed: almost every field is optional, prices
//! travel as strings, and older deployments use legacy field names. Each
//! DTO normalizes itself into the domain form here, so nothing loose leaks
//! past this module.

use rust_decimal::Decimal;
use serde::Deserialize;

use crate::domain::price_table::{parse_amount, PriceTable, RateItem};
use crate::domain::PaymentMethod;

#[derive(Debug, Deserialize)]
pub struct LoginResponse {
    pub response: Option<String>,
    pub data: Option<LoginData>,
    pub message: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct LoginData {
    pub user: Option<UserDto>,
    pub session: Option<SessionDto>,
    pub establishments: Option<Vec<EstablishmentDto>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserDto {
    pub user_id: Option<i64>,
    pub email: Option<String>,
    pub name: Option<String>,
    pub access_token: Option<String>,
    pub establishments: Option<Vec<i64>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionDto {
    pub session_id: Option<i64>,
    pub establishment_id: Option<i64>,
    pub user_id: Option<i64>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EstablishmentDto {
    pub establishment_id: Option<i64>,
    pub establishment_name: Option<String>,
}

impl LoginResponse {
    /// The establishment the operator works at, checked in payload order:
    /// the user's establishment list, the establishment list, the session.
    pub fn establishment_id(&self) -> Option<i64> {
        let data = self.data.as_ref()?;
        data.user
            .as_ref()
            .and_then(|u| u.establishments.as_ref())
            .and_then(|ids| ids.first().copied())
            .or_else(|| {
                data.establishments
                    .as_ref()
                    .and_then(|es| es.iter().find_map(|e| e.establishment_id))
            })
            .or_else(|| data.session.as_ref().and_then(|s| s.establishment_id))
    }
}

#[derive(Debug, Deserialize)]
pub struct ManualLoadResponse {
    pub response: Option<String>,
    pub data: Option<ManualLoadData>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ManualLoadData {
    pub prices: Option<Vec<PriceTableDto>>,
    pub payment_methods: Option<Vec<PaymentMethodDto>>,
    pub session_id: Option<i64>,
}

/// One price table as the upstream API sends it.
///
/// Current deployments use `establishmentId` + `typePrice`; older ones used
/// `id`/`priceTableId` and `name`/`priceTableName`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceTableDto {
    pub establishment_id: Option<i64>,
    pub type_price: Option<String>,
    /// Grace period in minutes.
    pub tolerance: Option<i64>,
    pub maximum_period: Option<i64>,
    pub maximum_value: Option<String>,
    pub items: Option<Vec<PriceTableItemDto>>,
    pub id: Option<i64>,
    pub price_table_id: Option<i64>,
    pub name: Option<String>,
    pub price_table_name: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceTableItemDto {
    pub item_id: Option<i64>,
    pub price: Option<String>,
    pub period: Option<i64>,
    pub since: Option<i64>,
}

impl PriceTableDto {
    /// Stable id: derived from `establishmentId` + `typePrice` when both are
    /// present, falling back to the legacy explicit ids.
    pub fn normalized_id(&self) -> i64 {
        if let (Some(est), Some(tp)) = (self.establishment_id, &self.type_price) {
            return synthetic_id(est, tp);
        }
        self.id.or(self.price_table_id).unwrap_or(0)
    }

    pub fn normalized_name(&self) -> String {
        self.type_price
            .clone()
            .or_else(|| self.name.clone())
            .or_else(|| self.price_table_name.clone())
            .unwrap_or_default()
    }

    fn rate_items(&self) -> Vec<RateItem> {
        self.items
            .as_deref()
            .unwrap_or_default()
            .iter()
            .map(|i| RateItem {
                period_minutes: i.period.unwrap_or(0),
                price: i.price.as_deref().map(parse_amount).unwrap_or(Decimal::ZERO),
                since_minutes: i.since.unwrap_or(0),
            })
            .collect()
    }

    /// Reduce this payload entry into the canonical table.
    pub fn into_price_table(self) -> PriceTable {
        let items = self.rate_items();
        // Item prices degrade to zero, but a cap value that does not parse
        // drops the cap entirely; a zero-valued cap would clamp every stay
        // inside its window to a free charge.
        let max_value = self
            .maximum_value
            .as_deref()
            .and_then(|s| s.trim().parse::<Decimal>().ok());
        PriceTable::normalize(
            self.normalized_id(),
            self.normalized_name(),
            &items,
            self.tolerance.unwrap_or(0),
            self.maximum_period,
            max_value,
        )
    }
}

/// Java-compatible string hash over UTF-16 units, kept for id stability
/// with the upstream clients that derive table ids the same way.
fn synthetic_id(establishment_id: i64, type_price: &str) -> i64 {
    let combined = format!("{}{}", establishment_id, type_price);
    let mut hash: i32 = 0;
    for unit in combined.encode_utf16() {
        hash = hash.wrapping_mul(31).wrapping_add(unit as i32);
    }
    hash as i64
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentMethodDto {
    pub establishment_payment_method_id: i64,
    pub payment_method_name: String,
    #[serde(default)]
    pub receiving_days: i32,
    #[serde(default)]
    pub receiving_fee: Option<String>,
}

impl PaymentMethodDto {
    pub fn into_payment_method(self) -> PaymentMethod {
        PaymentMethod {
            id: self.establishment_payment_method_id,
            name: self.payment_method_name,
            receiving_days: self.receiving_days,
            receiving_fee: self
                .receiving_fee
                .as_deref()
                .map(parse_amount)
                .unwrap_or(Decimal::ZERO),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct CloseSessionResponse {
    pub response: Option<String>,
    pub message: Option<String>,
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn price_table_dto_prefers_synthetic_id() {
        let dto: PriceTableDto = serde_json::from_str(
            r#"{"establishmentId": 42, "typePrice": "Carro", "id": 7}"#,
        )
        .unwrap();
        assert_eq!(dto.normalized_id(), synthetic_id(42, "Carro"));
        assert_eq!(dto.normalized_name(), "Carro");
    }

    #[test]
    fn price_table_dto_falls_back_to_legacy_fields() {
        let dto: PriceTableDto =
            serde_json::from_str(r#"{"priceTableId": 7, "priceTableName": "Moto"}"#).unwrap();
        assert_eq!(dto.normalized_id(), 7);
        assert_eq!(dto.normalized_name(), "Moto");

        let dto: PriceTableDto = serde_json::from_str(r#"{}"#).unwrap();
        assert_eq!(dto.normalized_id(), 0);
        assert_eq!(dto.normalized_name(), "");
    }

    #[test]
    fn synthetic_id_is_stable() {
        assert_eq!(synthetic_id(42, "Carro"), synthetic_id(42, "Carro"));
        assert_ne!(synthetic_id(42, "Carro"), synthetic_id(42, "Moto"));
    }

    #[test]
    fn manual_load_payload_normalizes_into_domain() {
        let payload = r#"{
            "response": "success",
            "data": {
                "sessionId": 555,
                "prices": [{
                    "establishmentId": 42,
                    "typePrice": "Carro",
                    "tolerance": 10,
                    "maximumPeriod": 720,
                    "maximumValue": "30.00",
                    "items": [
                        {"itemId": 1, "price": "10.00", "period": 60, "since": 0},
                        {"itemId": 2, "price": "5.00", "period": 30, "since": 60}
                    ]
                }],
                "paymentMethods": [{
                    "establishmentPaymentMethodId": 3,
                    "paymentMethodName": "Pix",
                    "receivingDays": 0,
                    "receivingFee": "0.00",
                    "primitivePaymentMethodId": 1,
                    "accountId": 9
                }]
            }
        }"#;

        let parsed: ManualLoadResponse = serde_json::from_str(payload).unwrap();
        let data = parsed.data.unwrap();
        assert_eq!(data.session_id, Some(555));

        let table = data
            .prices
            .unwrap()
            .into_iter()
            .next()
            .unwrap()
            .into_price_table();
        assert_eq!(table.name, "Carro");
        assert_eq!(table.tolerance_minutes, 10);
        let flat = table.flat_until.unwrap();
        assert_eq!(flat.period_minutes, 60);
        assert_eq!(flat.value, "10.00".parse().unwrap());
        let inc = table.incremental.unwrap();
        assert_eq!(inc.from_minutes, 60);
        assert_eq!(inc.every_minutes, 30);
        let cap = table.cap.unwrap();
        assert_eq!(cap.period_minutes, 720);
        assert_eq!(cap.max_value, "30.00".parse().unwrap());

        let method = data
            .payment_methods
            .unwrap()
            .into_iter()
            .next()
            .unwrap()
            .into_payment_method();
        assert_eq!(method.id, 3);
        assert_eq!(method.name, "Pix");
    }

    #[test]
    fn malformed_prices_degrade_to_zero() {
        let dto: PriceTableDto = serde_json::from_str(
            r#"{
                "typePrice": "Carro",
                "establishmentId": 1,
                "maximumValue": "n/a",
                "items": [{"price": "abc", "period": 60, "since": 0}]
            }"#,
        )
        .unwrap();
        let table = dto.into_price_table();
        assert_eq!(table.flat_until.unwrap().value, Decimal::ZERO);
        assert!(table.cap.is_none());
    }

    #[test]
    fn malformed_cap_value_drops_the_cap_and_keeps_the_fee() {
        use chrono::{Duration, TimeZone, Utc};

        use crate::domain::price_table::calculate_fee;

        let dto: PriceTableDto = serde_json::from_str(
            r#"{
                "typePrice": "Carro",
                "establishmentId": 1,
                "maximumPeriod": 720,
                "maximumValue": "n/a",
                "items": [{"price": "10.00", "period": 60, "since": 0}]
            }"#,
        )
        .unwrap();
        let table = dto.into_price_table();
        assert!(table.cap.is_none());

        // a zero-valued cap would have made this stay free
        let entry = Utc.with_ymd_and_hms(2024, 5, 10, 8, 0, 0).unwrap();
        let exit = entry + Duration::minutes(30);
        assert_eq!(
            calculate_fee(&table, entry, exit).unwrap(),
            "10.00".parse::<Decimal>().unwrap()
        );
    }

    #[test]
    fn login_response_resolves_establishment_in_order() {
        let payload = r#"{
            "response": "success",
            "data": {
                "user": {"userId": 11, "accessToken": "tok", "establishments": [42]},
                "session": {"sessionId": 5, "establishmentId": 99},
                "establishments": [{"establishmentId": 77}]
            }
        }"#;
        let parsed: LoginResponse = serde_json::from_str(payload).unwrap();
        assert_eq!(parsed.establishment_id(), Some(42));

        let payload = r#"{
            "data": {
                "user": {"userId": 11, "accessToken": "tok"},
                "session": {"sessionId": 5, "establishmentId": 99}
            }
        }"#;
        let parsed: LoginResponse = serde_json::from_str(payload).unwrap();
        assert_eq!(parsed.establishment_id(), Some(99));
    }
}
