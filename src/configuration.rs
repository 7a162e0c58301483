use std::{env, fs};

use url::Url;

use crate::{error::Error, model::TierThresholds};

const DEFAULT_PAGE_LIMIT: u16 = 100;
const DEFAULT_TIMEOUT: u64 = 30;
// Selector of the payment method observed on chain for the dashboard
// tokens.
const DEFAULT_PAYMENT_METHOD_ID: &str = "0x0b7e4c94";

#[derive(Debug, Clone)]
pub struct TokenConfig {
    pub symbol: String,
    pub contract_address: String,
    pub decimals: u32,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub moralis_host: String,
    pub moralis_api_key: String,
    pub chain_id: String,
    pub page_limit: u16,
    pub timeout: u64,
    pub payment_method_id: String,
    pub exclude_mint_burn: bool,
    pub tier_thresholds: TierThresholds,
    pub tokens: Vec<TokenConfig>,
}

impl Config {
    pub fn token_transfers_url(
        &self,
        contract_address: &str,
        cursor: Option<&str>,
    ) -> Result<Url, Error> {
        self.provider_url(
            &format!("erc20/{}/transfers", contract_address),
            cursor,
        )
    }

    pub fn token_owners_url(
        &self,
        contract_address: &str,
        cursor: Option<&str>,
    ) -> Result<Url, Error> {
        self.provider_url(&format!("erc20/{}/owners", contract_address), cursor)
    }

    pub fn verbose_transactions_url(
        &self,
        contract_address: &str,
        cursor: Option<&str>,
    ) -> Result<Url, Error> {
        self.provider_url(&format!("{}/verbose", contract_address), cursor)
    }

    fn provider_url(
        &self,
        path: &str,
        cursor: Option<&str>,
    ) -> Result<Url, Error> {
        let mut url =
            Url::parse(&format!("{}/{}", self.moralis_host, path))?;

        url.query_pairs_mut()
            .append_pair("chain", &self.chain_id)
            .append_pair("order", "DESC")
            .append_pair("limit", &self.page_limit.to_string());
        if let Some(cursor) = cursor {
            url.query_pairs_mut().append_pair("cursor", cursor);
        }

        Ok(url)
    }
}

/// Loads the `.env` file next to the manifest into the process
/// environment so `get_configuration` can read everything uniformly.
pub fn set_configuration() -> Result<(), Error> {
    let config_file: &str = ".env";

    let directory = env!("CARGO_MANIFEST_DIR");
    let path = format!("{}/{}", directory, config_file);

    let config_string = fs::read_to_string(path)?;
    parse_config_string(config_string)?;

    Ok(())
}

fn parse_config_string(config: String) -> Result<(), Error> {
    let params: Vec<Option<(&str, &str)>> = config
        .split('\n')
        .map(|s| {
            let element = s.find('=');
            if let Some(e) = element {
                return Some(s.split_at(e));
            }
            None
        })
        .map(|value| {
            if let Some((k, v)) = value {
                return Some((k, &v[1..]));
            }
            None
        })
        .collect();

    for (key, value) in params.into_iter().flatten() {
        env::set_var(key, value);
    }

    Ok(())
}

pub fn get_configuration() -> Result<Config, Error> {
    let moralis_host = env::var("MORALIS_HOST")?;
    let moralis_api_key = env::var("MORALIS_API_KEY")?;
    let chain_id = env::var("CHAIN_ID")?;

    let page_limit = match env::var("PAGE_LIMIT") {
        Ok(value) => value.parse()?,
        Err(_) => DEFAULT_PAGE_LIMIT,
    };
    let timeout = match env::var("TIMEOUT") {
        Ok(value) => value.parse()?,
        Err(_) => DEFAULT_TIMEOUT,
    };
    let payment_method_id = env::var("PAYMENT_METHOD_ID")
        .unwrap_or_else(|_| DEFAULT_PAYMENT_METHOD_ID.to_owned());
    let exclude_mint_burn = match env::var("EXCLUDE_MINT_BURN") {
        Ok(value) => value.parse()?,
        Err(_) => false,
    };

    let defaults = TierThresholds::default();
    let tier_thresholds = TierThresholds {
        whale: match env::var("WHALE_THRESHOLD") {
            Ok(value) => value.parse()?,
            Err(_) => defaults.whale,
        },
        large: match env::var("LARGE_THRESHOLD") {
            Ok(value) => value.parse()?,
            Err(_) => defaults.large,
        },
        medium: match env::var("MEDIUM_THRESHOLD") {
            Ok(value) => value.parse()?,
            Err(_) => defaults.medium,
        },
    };

    let tokens = get_tokens()?;

    Ok(Config {
        moralis_host,
        moralis_api_key,
        chain_id,
        page_limit,
        timeout,
        payment_method_id,
        exclude_mint_burn,
        tier_thresholds,
        tokens,
    })
}

/// Parses the `TOKENS` list, `SYMBOL:contract_address:decimals` entries
/// separated by commas.
fn get_tokens() -> Result<Vec<TokenConfig>, Error> {
    let raw = env::var("TOKENS")?;
    let mut tokens = Vec::new();

    for entry in raw.split(',').filter(|entry| !entry.is_empty()) {
        let parts: Vec<&str> = entry.split(':').collect();
        let [symbol, contract_address, decimals] = parts.as_slice() else {
            return Err(Error::ConfigurationError(format!(
                "Invalid token entry: {}",
                entry
            )));
        };

        tokens.push(TokenConfig {
            symbol: (*symbol).to_owned(),
            contract_address: contract_address.to_lowercase(),
            decimals: decimals.parse()?,
        });
    }

    if tokens.is_empty() {
        return Err(Error::ConfigurationError(String::from(
            "TOKENS must list at least one token",
        )));
    }

    Ok(tokens)
}
