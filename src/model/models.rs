//! Consolidated domain models
//!
//! Input records as parsed from the provider and the aggregate rows
//! produced by the aggregators, organized by domain sections.

use bigdecimal::BigDecimal;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

// =============================================================================
// TRANSFER DOMAIN
// =============================================================================

/// One on-chain token transfer, already validated at the wire boundary.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TransferEvent {
    pub timestamp: DateTime<Utc>,
    pub from_address: String,
    pub to_address: String,
    pub value_decimal: BigDecimal,
}

/// One row per calendar day with at least one qualifying transfer.
/// Cumulative fields are monotonically non-decreasing across a sorted series.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct DailyCumulativeMetrics {
    pub date: NaiveDate,
    pub daily_tx_count: i64,
    pub daily_tx_amount: BigDecimal,
    pub cumulative_tx_count: i64,
    pub cumulative_tx_amount: BigDecimal,
}

/// Daily wallet reach: cumulative distinct addresses, first-seen addresses
/// and addresses active on the day itself.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct DailyWalletActivity {
    pub date: NaiveDate,
    pub unique_wallet_count: i64,
    pub new_wallets: i64,
    pub active_wallets: i64,
}

// =============================================================================
// PAYMENT DOMAIN
// =============================================================================

/// A raw transaction with its call data and, when the provider decoded
/// them, the event logs it emitted.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PaymentTransaction {
    pub timestamp: DateTime<Utc>,
    pub input: String,
    pub logs: Vec<TransactionLog>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TransactionLog {
    pub decoded_event: Option<DecodedEvent>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DecodedEvent {
    pub params: Vec<EventParam>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct EventParam {
    pub name: String,
    pub value: String,
    pub param_type: Option<String>,
}

/// Weekly payment totals bucketed by the Monday (UTC) of each week.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct WeeklyPayments {
    pub week_start_date: NaiveDate,
    pub total_payments_amount: BigDecimal,
    pub payment_count: i64,
    pub average_payment: BigDecimal,
}

// =============================================================================
// HOLDER DOMAIN
// =============================================================================

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TokenHolder {
    pub address: String,
    pub balance: BigDecimal,
    pub balance_formatted: String,
    pub percentage: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct DistributionTiers {
    pub whales: i64,
    pub large: i64,
    pub medium: i64,
    pub small: i64,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct HolderDistribution {
    pub total_holders: i64,
    pub total_supply: BigDecimal,
    pub holders: Vec<TokenHolder>,
    pub distribution: DistributionTiers,
}

/// Supply-share cutoffs (in percent) separating the four holder tiers.
/// The partition is right-open: `> whale` / `> large` / `> medium` / rest.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
pub struct TierThresholds {
    pub whale: f64,
    pub large: f64,
    pub medium: f64,
}

impl Default for TierThresholds {
    fn default() -> Self {
        TierThresholds {
            whale: 1.0,
            large: 0.1,
            medium: 0.01,
        }
    }
}

// =============================================================================
// CHART PROJECTIONS
// =============================================================================

/// Pie-chart row: one tier with its share of all holders.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TierSummary {
    pub category: String,
    pub count: i64,
    pub percentage: f64,
    pub fill: String,
}

/// Bubble-chart point for a single holder.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct HolderBubble {
    pub address: String,
    pub balance: BigDecimal,
    pub balance_formatted: String,
    pub percentage: f64,
    pub size: f64,
    pub fill: String,
    pub x: i64,
    pub y: f64,
}
