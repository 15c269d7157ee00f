//! Parking fee calculation
//!
//! Pure function over `(PriceTable, entry, exit)`. The current instant is
//! always supplied by the caller, so the same code serves both the final
//! checkout and the periodic on-screen refresh of an open session.

use chrono::{DateTime, Duration, Utc};
use rust_decimal::Decimal;
use tracing::warn;

use super::model::PriceTable;
use crate::domain::{DomainError, DomainResult};

/// Compute the amount due for a stay from `entry` to `exit`.
///
/// Integer-minute arithmetic: the stay length is floored to whole minutes,
/// incremental blocks are charged by ceiling (a started block is a full
/// block). The cap clamps downward only while the stay is within the cap's
/// qualifying period; longer stays are charged uncapped.
pub fn calculate_fee(
    table: &PriceTable,
    entry: DateTime<Utc>,
    exit: DateTime<Utc>,
) -> DomainResult<Decimal> {
    if exit < entry {
        return Err(DomainError::InvalidInterval { entry, exit });
    }

    let effective_entry = entry + Duration::minutes(table.tolerance_minutes);
    if exit <= effective_entry {
        return Ok(Decimal::ZERO);
    }

    let stay_minutes = (exit - effective_entry).num_minutes();

    let mut amount = Decimal::ZERO;

    if let Some(flat) = &table.flat_until {
        amount = flat.value;
        if stay_minutes > flat.period_minutes {
            // Overage beyond the flat period; a table without an incremental
            // rule keeps the flat value as its ceiling price.
            if let Some(inc) = &table.incremental {
                let overage = stay_minutes - flat.period_minutes;
                amount += Decimal::from(blocks(overage, inc.every_minutes)) * inc.add_value;
            }
        }
    } else if let Some(inc) = &table.incremental {
        // No flat tier: incremental applies from minute 0 of the
        // post-tolerance stay, `from_minutes` only selected the rule.
        amount = Decimal::from(blocks(stay_minutes, inc.every_minutes)) * inc.add_value;
    } else {
        warn!(
            table_id = table.id,
            table_name = %table.name,
            "price table has no pricing rules, charging nothing"
        );
    }

    if let Some(cap) = &table.cap {
        if stay_minutes <= cap.period_minutes {
            amount = amount.min(cap.max_value);
        }
    }

    Ok(amount.max(Decimal::ZERO))
}

/// Number of started `every`-minute blocks in `minutes` (ceiling division).
fn blocks(minutes: i64, every: i64) -> i64 {
    if every <= 0 {
        // a zero-length block interval cannot accrue charges
        warn!(every_minutes = every, "incremental rule has non-positive block length");
        return 0;
    }
    (minutes + every - 1) / every
}

// ── Tests ──────────────────────────────────────────────────────
