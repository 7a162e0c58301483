pub use self::{
    cumulative_growth::aggregate_cumulative_growth,
    holder_distribution::{bubble_points, classify_holders, tier_summary},
    wallet_activity::aggregate_wallet_activity,
    weekly_payments::aggregate_weekly_payments,
};

mod cumulative_growth;
mod holder_distribution;
mod wallet_activity;
mod weekly_payments;
