//! Canonical price table and its normalization from raw rate rules

use rust_decimal::Decimal;

/// Raw rate rule as delivered by the remote sync payload.
///
/// `since_minutes == 0` marks a flat "until" rule: one fixed charge covering
/// stays up to `period_minutes`. `since_minutes > 0` marks a repeating
/// incremental rule that starts applying `since_minutes` after entry.
#[derive(Debug, Clone, PartialEq)]
pub struct RateItem {
    pub period_minutes: i64,
    pub price: Decimal,
    pub since_minutes: i64,
}

/// Flat fee covering stays up to `period_minutes` (after tolerance).
#[derive(Debug, Clone, PartialEq)]
pub struct FlatRate {
    pub period_minutes: i64,
    pub value: Decimal,
}

/// Repeating charge of `add_value` per started block of `every_minutes`.
///
/// `from_minutes` records which raw rule was selected; it does not delay
/// the charge a second time.
#[derive(Debug, Clone, PartialEq)]
pub struct IncrementalRate {
    pub from_minutes: i64,
    pub every_minutes: i64,
    pub add_value: Decimal,
}

/// Clamp applied while the stay is still within `period_minutes`.
#[derive(Debug, Clone, PartialEq)]
pub struct ChargeCap {
    pub period_minutes: i64,
    pub max_value: Decimal,
}

/// Canonical price table, the persisted form.
///
/// Derived once from the raw rate-rule list at sync time; the raw list is
/// not retained.
#[derive(Debug, Clone, PartialEq)]
pub struct PriceTable {
    pub id: i64,
    pub name: String,
    /// Grace period from entry during which no charge accrues.
    pub tolerance_minutes: i64,
    pub flat_until: Option<FlatRate>,
    pub incremental: Option<IncrementalRate>,
    pub cap: Option<ChargeCap>,
}

impl PriceTable {
    /// Reduce a raw rate-rule list into the canonical table.
    ///
    /// - `flat_until` is the since==0 rule with the largest period,
    /// - `incremental` is the since>0 rule with the smallest since,
    ///
    /// ties broken by first position in the input. The cap is present only
    /// when both `max_period` and `max_value` are supplied.
    pub fn normalize(
        id: i64,
        name: impl Into<String>,
        items: &[RateItem],
        tolerance_minutes: i64,
        max_period: Option<i64>,
        max_value: Option<Decimal>,
    ) -> Self {
        let mut flat: Option<&RateItem> = None;
        let mut inc: Option<&RateItem> = None;

        for item in items {
            if item.since_minutes == 0 {
                // strict comparison keeps the first item on ties
                if flat.map_or(true, |best| item.period_minutes > best.period_minutes) {
                    flat = Some(item);
                }
            } else if item.since_minutes > 0
                && inc.map_or(true, |best| item.since_minutes < best.since_minutes)
            {
                inc = Some(item);
            }
        }

        let cap = match (max_period, max_value) {
            (Some(period_minutes), Some(max_value)) => Some(ChargeCap {
                period_minutes,
                max_value,
            }),
            _ => None,
        };

        Self {
            id,
            name: name.into(),
            tolerance_minutes: tolerance_minutes.max(0),
            flat_until: flat.map(|i| FlatRate {
                period_minutes: i.period_minutes,
                value: i.price,
            }),
            incremental: inc.map(|i| IncrementalRate {
                from_minutes: i.since_minutes,
                every_minutes: i.period_minutes,
                add_value: i.price,
            }),
            cap: cap.filter(|c| c.period_minutes >= 0),
        }
    }

    /// A table with neither a flat nor an incremental rule charges nothing.
    /// Callers should surface this as a configuration warning.
    pub fn has_pricing_rules(&self) -> bool {
        self.flat_until.is_some() || self.incremental.is_some()
    }

    /// Re-express the canonical rules as raw rate items (the inverse of the
    /// since==0 / since>0 split used by [`PriceTable::normalize`]).
    pub fn to_rate_items(&self) -> Vec<RateItem> {
        let mut items = Vec::new();
        if let Some(flat) = &self.flat_until {
            items.push(RateItem {
                period_minutes: flat.period_minutes,
                price: flat.value,
                since_minutes: 0,
            });
        }
        if let Some(inc) = &self.incremental {
            items.push(RateItem {
                period_minutes: inc.every_minutes,
                price: inc.add_value,
                since_minutes: inc.from_minutes,
            });
        }
        items
    }
}

/// Parse a currency amount from the remote payload.
///
/// The payload is not under our control; malformed or missing values
/// degrade to zero instead of failing the whole sync.
pub fn parse_amount(raw: &str) -> Decimal {
    raw.trim().parse::<Decimal>().unwrap_or(Decimal::ZERO)
}

// ── Tests ──────────────────────────────────────────────────────
