use std::str::FromStr;

use bigdecimal::{BigDecimal, Zero};
use tracing::warn;

use crate::{
    helpers::{parse_uint, scale_amount},
    model::{
        DistributionTiers, HolderBubble, HolderDistribution, TierSummary,
        TierThresholds, TokenHolder,
    },
    types::TokenOwnerRecord,
};

const BUBBLE_MIN_SIZE: f64 = 10.0;
const BUBBLE_MAX_SIZE: f64 = 50.0;

/// Classifies a holder snapshot into four supply-share tiers.
///
/// Records without an address or a parsable balance are skipped with a
/// warning. The tier test runs from the highest threshold down, so every
/// valid holder lands in exactly one tier and the tier counts always sum
/// to `total_holders`.
pub fn classify_holders(
    records: &[TokenOwnerRecord],
    decimals: u32,
    thresholds: &TierThresholds,
) -> HolderDistribution {
    let mut holders: Vec<TokenHolder> = Vec::with_capacity(records.len());
    let mut total_supply = BigDecimal::zero();

    for record in records {
        let Some(address) = record
            .owner_address
            .as_deref()
            .filter(|address| !address.is_empty())
        else {
            warn!("skipping holder record without owner address");
            continue;
        };

        let Some((balance, balance_formatted)) =
            holder_balance(record, decimals)
        else {
            warn!(address, "skipping holder with invalid balance");
            continue;
        };

        let percentage =
            record.percentage_relative_to_total_supply.unwrap_or(0.0);

        total_supply += balance.clone();
        holders.push(TokenHolder {
            address: address.to_owned(),
            balance,
            balance_formatted,
            percentage,
        });
    }

    holders.sort_by(|a, b| b.balance.cmp(&a.balance));

    let mut distribution = DistributionTiers::default();
    for holder in &holders {
        if holder.percentage > thresholds.whale {
            distribution.whales += 1;
        } else if holder.percentage > thresholds.large {
            distribution.large += 1;
        } else if holder.percentage > thresholds.medium {
            distribution.medium += 1;
        } else {
            distribution.small += 1;
        }
    }

    HolderDistribution {
        total_holders: holders.len() as i64,
        total_supply,
        holders,
        distribution,
    }
}

/// Prefers the provider's pre-formatted balance; falls back to scaling
/// the raw integer balance by the token's decimals.
fn holder_balance(
    record: &TokenOwnerRecord,
    decimals: u32,
) -> Option<(BigDecimal, String)> {
    if let Some(formatted) = record.balance_formatted.as_deref() {
        if let Ok(balance) = BigDecimal::from_str(formatted) {
            return Some((balance, formatted.to_owned()));
        }
        return None;
    }

    let raw = record.balance.as_deref()?;
    let value = parse_uint(raw)?;
    let balance = scale_amount(&value, decimals).ok()?;
    let formatted = balance.to_string();

    Some((balance, formatted))
}

fn tier_fill(percentage: f64, thresholds: &TierThresholds) -> &'static str {
    if percentage > thresholds.whale {
        "var(--chart-1)"
    } else if percentage > thresholds.large {
        "var(--chart-2)"
    } else if percentage > thresholds.medium {
        "var(--chart-3)"
    } else {
        "var(--chart-4)"
    }
}

/// Pie-chart projection: tier counts with their share of all holders,
/// empty tiers dropped.
pub fn tier_summary(
    distribution: &HolderDistribution,
    thresholds: &TierThresholds,
) -> Vec<TierSummary> {
    let tiers = &distribution.distribution;
    let rows = [
        (
            format!("Whales (>{}%)", thresholds.whale),
            tiers.whales,
            "var(--chart-1)",
        ),
        (
            format!("Large ({}-{}%)", thresholds.large, thresholds.whale),
            tiers.large,
            "var(--chart-2)",
        ),
        (
            format!("Medium ({}-{}%)", thresholds.medium, thresholds.large),
            tiers.medium,
            "var(--chart-3)",
        ),
        (
            format!("Small (<{}%)", thresholds.medium),
            tiers.small,
            "var(--chart-4)",
        ),
    ];

    rows.into_iter()
        .filter(|(_, count, _)| *count > 0)
        .map(|(category, count, fill)| TierSummary {
            category,
            count,
            percentage: if distribution.total_holders > 0 {
                count as f64 / distribution.total_holders as f64 * 100.0
            } else {
                0.0
            },
            fill: fill.to_owned(),
        })
        .collect()
}

/// Bubble-chart projection: one point per holder, sized by supply share.
pub fn bubble_points(
    distribution: &HolderDistribution,
    thresholds: &TierThresholds,
) -> Vec<HolderBubble> {
    distribution
        .holders
        .iter()
        .enumerate()
        .map(|(index, holder)| HolderBubble {
            address: holder.address.to_owned(),
            balance: holder.balance.clone(),
            balance_formatted: holder.balance_formatted.to_owned(),
            percentage: holder.percentage,
            size: (holder.percentage * 10.0)
                .clamp(BUBBLE_MIN_SIZE, BUBBLE_MAX_SIZE),
            fill: tier_fill(holder.percentage, thresholds).to_owned(),
            x: index as i64,
            y: holder.percentage,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn owner(address: &str, balance: &str, percentage: f64) -> TokenOwnerRecord {
        TokenOwnerRecord {
            owner_address: Some(address.to_owned()),
            balance: None,
            balance_formatted: Some(balance.to_owned()),
            percentage_relative_to_total_supply: Some(percentage),
        }
    }

    #[test]
    fn test_one_holder_per_tier() {
        let records = vec![
            owner("0xa", "2500000", 2.5),
            owner("0xb", "500000", 0.5),
            owner("0xc", "50000", 0.05),
            owner("0xd", "5000", 0.005),
        ];

        let result =
            classify_holders(&records, 18, &TierThresholds::default());

        assert_eq!(result.total_holders, 4);
        assert_eq!(result.distribution.whales, 1);
        assert_eq!(result.distribution.large, 1);
        assert_eq!(result.distribution.medium, 1);
        assert_eq!(result.distribution.small, 1);
    }

    #[test]
    fn test_tier_counts_partition_holders() {
        let records: Vec<TokenOwnerRecord> = (0..25)
            .map(|i| {
                owner(
                    &format!("0x{:02}", i),
                    &format!("{}", (i + 1) * 100),
                    f64::from(i) * 0.09,
                )
            })
            .collect();

        let result =
            classify_holders(&records, 18, &TierThresholds::default());

        let tiers = &result.distribution;
        assert_eq!(
            tiers.whales + tiers.large + tiers.medium + tiers.small,
            result.total_holders
        );
    }

    #[test]
    fn test_boundary_percentages_fall_into_lower_tier() {
        // The partition is right-open: exactly 1% is "large", not "whale".
        let records = vec![
            owner("0xa", "100", 1.0),
            owner("0xb", "90", 0.1),
            owner("0xc", "80", 0.01),
        ];

        let result =
            classify_holders(&records, 18, &TierThresholds::default());

        assert_eq!(result.distribution.whales, 0);
        assert_eq!(result.distribution.large, 1);
        assert_eq!(result.distribution.medium, 1);
        assert_eq!(result.distribution.small, 1);
    }

    #[test]
    fn test_skips_invalid_records() {
        let records = vec![
            owner("0xa", "100", 0.5),
            TokenOwnerRecord {
                owner_address: None,
                balance: None,
                balance_formatted: Some(String::from("50")),
                percentage_relative_to_total_supply: Some(0.2),
            },
            owner("0xb", "not-a-balance", 0.2),
        ];

        let result =
            classify_holders(&records, 18, &TierThresholds::default());

        assert_eq!(result.total_holders, 1);
        assert_eq!(result.holders[0].address, "0xa");
        assert_eq!(result.total_supply, BigDecimal::from(100));
    }

    #[test]
    fn test_raw_balance_fallback() {
        let records = vec![TokenOwnerRecord {
            owner_address: Some(String::from("0xa")),
            balance: Some(String::from("1500000000000000000")),
            balance_formatted: None,
            percentage_relative_to_total_supply: Some(0.5),
        }];

        let result =
            classify_holders(&records, 18, &TierThresholds::default());

        assert_eq!(result.total_holders, 1);
        assert_eq!(
            result.holders[0].balance,
            BigDecimal::from_str("1.5").unwrap()
        );
        assert_eq!(result.holders[0].balance_formatted, "1.5");
    }

    #[test]
    fn test_holders_sorted_by_balance_descending() {
        let records = vec![
            owner("0xa", "10", 0.001),
            owner("0xb", "1000", 0.1),
            owner("0xc", "100", 0.01),
        ];

        let result =
            classify_holders(&records, 18, &TierThresholds::default());

        let addresses: Vec<&str> = result
            .holders
            .iter()
            .map(|holder| holder.address.as_str())
            .collect();
        assert_eq!(addresses, vec!["0xb", "0xc", "0xa"]);
    }

    #[test]
    fn test_empty_snapshot() {
        let result = classify_holders(&[], 18, &TierThresholds::default());

        assert_eq!(result.total_holders, 0);
        assert_eq!(result.total_supply, BigDecimal::zero());
        assert_eq!(result.distribution, DistributionTiers::default());
        assert!(tier_summary(&result, &TierThresholds::default()).is_empty());
    }

    #[test]
    fn test_tier_summary_filters_empty_tiers() {
        let records = vec![
            owner("0xa", "100", 2.0),
            owner("0xb", "90", 1.5),
            owner("0xc", "10", 0.001),
            owner("0xd", "5", 0.002),
        ];

        let result =
            classify_holders(&records, 18, &TierThresholds::default());
        let summary = tier_summary(&result, &TierThresholds::default());

        assert_eq!(summary.len(), 2);
        assert_eq!(summary[0].count, 2);
        assert_eq!(summary[0].percentage, 50.0);
        assert_eq!(summary[1].count, 2);
        assert_eq!(summary[1].percentage, 50.0);
    }

    #[test]
    fn test_bubble_size_is_clamped() {
        let records = vec![
            owner("0xa", "1000", 12.0),
            owner("0xb", "100", 2.0),
            owner("0xc", "1", 0.0001),
        ];

        let result =
            classify_holders(&records, 18, &TierThresholds::default());
        let points = bubble_points(&result, &TierThresholds::default());

        assert_eq!(points[0].size, 50.0);
        assert_eq!(points[1].size, 20.0);
        assert_eq!(points[2].size, 10.0);
        assert_eq!(points[0].x, 0);
        assert_eq!(points[2].y, 0.0001);
    }
}
