use serde::Serialize;
use tracing::{error, info, Level};

use token_metrics_etl::{
    aggregator::{
        aggregate_cumulative_growth, aggregate_wallet_activity,
        aggregate_weekly_payments, classify_holders, tier_summary,
    },
    configuration::{get_configuration, set_configuration, Config, TokenConfig},
    error::Error,
    model::{
        DailyCumulativeMetrics, DailyWalletActivity, HolderDistribution,
        TierSummary, WeeklyPayments,
    },
    provider::HTTP,
};

#[derive(Debug, Serialize)]
struct TokenReport {
    symbol: String,
    contract_address: String,
    cumulative_growth: Vec<DailyCumulativeMetrics>,
    wallet_activity: Vec<DailyWalletActivity>,
    weekly_payments: Vec<WeeklyPayments>,
    holder_distribution: HolderDistribution,
    holder_tiers: Vec<TierSummary>,
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    let result = app_main().await;

    if let Err(err) = &result {
        error!("{}", err);
    }

    result
}

async fn app_main() -> Result<(), Error> {
    let subscriber = tracing_subscriber::fmt()
        .compact()
        .with_level(true)
        .with_max_level(Level::INFO)
        .with_file(true)
        .with_line_number(true)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    let config = match init() {
        Ok(config) => config,
        Err(e) => return Err(Error::ConfigurationError(e.to_string())),
    };

    let http = HTTP::new(config.clone())?;

    for token in &config.tokens {
        let report = build_report(&http, &config, token).await?;
        println!("{}", serde_json::to_string_pretty(&report)?);
    }

    Ok(())
}

fn init() -> Result<Config, Error> {
    set_configuration()?;
    get_configuration()
}

async fn build_report(
    http: &HTTP,
    config: &Config,
    token: &TokenConfig,
) -> Result<TokenReport, Error> {
    info!(symbol = token.symbol.as_str(), "aggregating token metrics");

    let transfers = http.get_token_transfers(&token.contract_address).await?;
    let transactions = http
        .get_verbose_transactions(&token.contract_address)
        .await?;
    let owners = http.get_token_owners(&token.contract_address).await?;

    let cumulative_growth =
        aggregate_cumulative_growth(&transfers, config.exclude_mint_burn);
    let wallet_activity = aggregate_wallet_activity(&transfers);
    let weekly_payments = aggregate_weekly_payments(
        &transactions,
        &config.payment_method_id,
        token.decimals,
    )?;
    let holder_distribution =
        classify_holders(&owners, token.decimals, &config.tier_thresholds);
    let holder_tiers =
        tier_summary(&holder_distribution, &config.tier_thresholds);

    Ok(TokenReport {
        symbol: token.symbol.to_owned(),
        contract_address: token.contract_address.to_owned(),
        cumulative_growth,
        wallet_activity,
        weekly_payments,
        holder_distribution,
        holder_tiers,
    })
}
