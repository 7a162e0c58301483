use std::collections::BTreeMap;

use bigdecimal::{BigDecimal, Zero};
use chrono::NaiveDate;

use crate::{
    error::Error,
    helpers::{decode_transfer_calldata, parse_uint, scale_amount, week_start},
    model::{PaymentTransaction, WeeklyPayments},
};

// Transfer-like events carry the amount as their third decoded
// parameter (from, to, value).
const AMOUNT_PARAM_INDEX: usize = 2;

struct WeekBucket {
    total: BigDecimal,
    count: i64,
}

/// Totals payment transactions per ISO week (Monday start, UTC).
///
/// Transactions qualify when their call data starts with `method_id`
/// (`0x` + 8 hex chars; anything else is rejected up front). A matching
/// transaction whose amount cannot be decoded still increments the
/// week's `payment_count` with amount 0, mirroring the historical
/// behavior of the dashboard this feeds.
pub fn aggregate_weekly_payments(
    transactions: &[PaymentTransaction],
    method_id: &str,
    decimals: u32,
) -> Result<Vec<WeeklyPayments>, Error> {
    validate_method_selector(method_id)?;

    let mut weekly: BTreeMap<NaiveDate, WeekBucket> = BTreeMap::new();

    for tx in transactions {
        if !tx.input.starts_with(method_id) {
            continue;
        }

        let amount = payment_amount(tx, decimals);
        let bucket = weekly
            .entry(week_start(tx.timestamp.date_naive()))
            .or_insert_with(|| WeekBucket {
                total: BigDecimal::zero(),
                count: 0,
            });
        bucket.total += amount;
        bucket.count += 1;
    }

    Ok(weekly
        .into_iter()
        .map(|(week_start_date, bucket)| {
            let average_payment = if bucket.count > 0 {
                &bucket.total / BigDecimal::from(bucket.count)
            } else {
                BigDecimal::zero()
            };

            WeeklyPayments {
                week_start_date,
                total_payments_amount: bucket.total,
                payment_count: bucket.count,
                average_payment,
            }
        })
        .collect())
}

fn validate_method_selector(method_id: &str) -> Result<(), Error> {
    let digits = method_id
        .strip_prefix("0x")
        .ok_or_else(|| Error::InvalidMethodSelector(method_id.to_owned()))?;

    if digits.len() != 8 || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(Error::InvalidMethodSelector(method_id.to_owned()));
    }

    Ok(())
}

/// Sums the amount parameter over the transaction's decoded logs, or
/// falls back to decoding the raw call data when no logs are present.
/// Undecodable pieces contribute 0.
fn payment_amount(tx: &PaymentTransaction, decimals: u32) -> BigDecimal {
    if tx.logs.is_empty() {
        return decode_transfer_calldata(&tx.input, decimals)
            .unwrap_or_else(BigDecimal::zero);
    }

    let mut total = BigDecimal::zero();

    for log in &tx.logs {
        let Some(event) = &log.decoded_event else {
            continue;
        };
        let Some(param) = event.params.get(AMOUNT_PARAM_INDEX) else {
            continue;
        };
        let Some(value) = parse_uint(&param.value) else {
            continue;
        };
        if let Ok(scaled) = scale_amount(&value, decimals) {
            total += scaled;
        }
    }

    total
}
