use std::collections::BTreeMap;

use bigdecimal::{BigDecimal, Zero};
use chrono::NaiveDate;

use crate::{
    helpers::ZERO_ADDRESS,
    model::{DailyCumulativeMetrics, TransferEvent},
};

struct DailyBucket {
    tx_count: i64,
    tx_amount: BigDecimal,
}

/// Buckets transfers by UTC calendar day and emits one row per day with
/// the daily totals and the running totals through that day.
///
/// `exclude_mint_burn` additionally drops transfers where either side is
/// the zero address; callers wanting the historical majority behavior
/// pass `false`.
pub fn aggregate_cumulative_growth(
    transfers: &[TransferEvent],
    exclude_mint_burn: bool,
) -> Vec<DailyCumulativeMetrics> {
    let mut daily: BTreeMap<NaiveDate, DailyBucket> = BTreeMap::new();

    for transfer in transfers {
        if exclude_mint_burn
            && (transfer.from_address == ZERO_ADDRESS
                || transfer.to_address == ZERO_ADDRESS)
        {
            continue;
        }

        let bucket = daily
            .entry(transfer.timestamp.date_naive())
            .or_insert_with(|| DailyBucket {
                tx_count: 0,
                tx_amount: BigDecimal::zero(),
            });
        bucket.tx_count += 1;
        bucket.tx_amount += transfer.value_decimal.clone();
    }

    let mut cumulative_tx_count = 0;
    let mut cumulative_tx_amount = BigDecimal::zero();

    daily
        .into_iter()
        .map(|(date, bucket)| {
            cumulative_tx_count += bucket.tx_count;
            cumulative_tx_amount += bucket.tx_amount.clone();

            DailyCumulativeMetrics {
                date,
                daily_tx_count: bucket.tx_count,
                daily_tx_amount: bucket.tx_amount,
                cumulative_tx_count,
                cumulative_tx_amount: cumulative_tx_amount.clone(),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};

    use super::*;

    fn transfer(
        day: u32,
        hour: u32,
        from: &str,
        to: &str,
        amount: i64,
    ) -> TransferEvent {
        TransferEvent {
            timestamp: Utc
                .with_ymd_and_hms(2024, 1, day, hour, 0, 0)
                .unwrap(),
            from_address: from.to_owned(),
            to_address: to.to_owned(),
            value_decimal: BigDecimal::from(amount),
        }
    }

    #[test]
    fn test_daily_and_cumulative_totals() {
        // Unsorted on purpose; the output must still be chronological.
        let transfers = vec![
            transfer(2, 9, "0xa", "0xb", 3),
            transfer(1, 10, "0xa", "0xb", 10),
            transfer(1, 18, "0xb", "0xc", 5),
        ];

        let rows = aggregate_cumulative_growth(&transfers, false);

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].daily_tx_count, 2);
        assert_eq!(rows[0].daily_tx_amount, BigDecimal::from(15));
        assert_eq!(rows[0].cumulative_tx_count, 2);
        assert_eq!(rows[0].cumulative_tx_amount, BigDecimal::from(15));
        assert_eq!(rows[1].daily_tx_count, 1);
        assert_eq!(rows[1].daily_tx_amount, BigDecimal::from(3));
        assert_eq!(rows[1].cumulative_tx_count, 3);
        assert_eq!(rows[1].cumulative_tx_amount, BigDecimal::from(18));
    }

    #[test]
    fn test_cumulative_fields_are_monotonic() {
        let transfers: Vec<TransferEvent> = (1..=9)
            .map(|day| transfer(day, 12, "0xa", "0xb", i64::from(day)))
            .collect();

        let rows = aggregate_cumulative_growth(&transfers, false);

        for pair in rows.windows(2) {
            assert!(pair[1].cumulative_tx_count >= pair[0].cumulative_tx_count);
            assert!(
                pair[1].cumulative_tx_amount >= pair[0].cumulative_tx_amount
            );
        }
    }

    #[test]
    fn test_exclude_mint_burn_flag() {
        let transfers = vec![
            transfer(1, 8, ZERO_ADDRESS, "0xb", 100),
            transfer(1, 9, "0xa", "0xb", 10),
            transfer(1, 10, "0xb", ZERO_ADDRESS, 50),
        ];

        let all = aggregate_cumulative_growth(&transfers, false);
        assert_eq!(all[0].daily_tx_count, 3);
        assert_eq!(all[0].daily_tx_amount, BigDecimal::from(160));

        let filtered = aggregate_cumulative_growth(&transfers, true);
        assert_eq!(filtered[0].daily_tx_count, 1);
        assert_eq!(filtered[0].daily_tx_amount, BigDecimal::from(10));
    }

    #[test]
    fn test_empty_input() {
        assert!(aggregate_cumulative_growth(&[], false).is_empty());
    }

    #[test]
    fn test_idempotence() {
        let transfers = vec![
            transfer(1, 10, "0xa", "0xb", 10),
            transfer(2, 9, "0xa", "0xb", 3),
        ];
        assert_eq!(
            aggregate_cumulative_growth(&transfers, false),
            aggregate_cumulative_growth(&transfers, false)
        );
    }
}
