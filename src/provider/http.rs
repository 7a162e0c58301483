use std::time::Duration;

use reqwest::Client;
use serde::de::DeserializeOwned;
use tracing::{info, warn};
use url::Url;

use crate::{
    configuration::Config,
    error::Error,
    model::{PaymentTransaction, TransferEvent},
    types::{
        OwnersResponse, TokenOwnerRecord, TransactionsResponse,
        TransfersResponse,
    },
};

/// Blockchain-data provider client. Every endpoint is cursor-paginated;
/// the fetchers walk pages until the provider stops returning a cursor
/// and map wire records into domain values, skipping malformed entries.
#[derive(Debug)]
pub struct HTTP {
    pub config: Config,
    client: Client,
}

impl HTTP {
    pub fn new(config: Config) -> Result<Self, Error> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout))
            .build()?;

        Ok(HTTP { config, client })
    }

    pub async fn get_token_transfers(
        &self,
        contract_address: &str,
    ) -> Result<Vec<TransferEvent>, Error> {
        let mut events = Vec::new();
        let mut cursor: Option<String> = None;

        loop {
            let url = self
                .config
                .token_transfers_url(contract_address, cursor.as_deref())?;
            let page: TransfersResponse = self.fetch(url).await?;

            for record in &page.result {
                match record.to_event() {
                    Ok(event) => events.push(event),
                    Err(error) => {
                        warn!("skipping transfer record: {}", error);
                    },
                }
            }

            cursor = page.cursor.filter(|cursor| !cursor.is_empty());
            if cursor.is_none() {
                break;
            }
        }

        info!(
            contract_address,
            count = events.len(),
            "fetched token transfers"
        );

        Ok(events)
    }

    pub async fn get_verbose_transactions(
        &self,
        contract_address: &str,
    ) -> Result<Vec<PaymentTransaction>, Error> {
        let mut transactions = Vec::new();
        let mut cursor: Option<String> = None;

        loop {
            let url = self.config.verbose_transactions_url(
                contract_address,
                cursor.as_deref(),
            )?;
            let page: TransactionsResponse = self.fetch(url).await?;

            for record in &page.result {
                match record.to_payment() {
                    Ok(transaction) => transactions.push(transaction),
                    Err(error) => {
                        warn!("skipping transaction record: {}", error);
                    },
                }
            }

            cursor = page.cursor.filter(|cursor| !cursor.is_empty());
            if cursor.is_none() {
                break;
            }
        }

        info!(
            contract_address,
            count = transactions.len(),
            "fetched verbose transactions"
        );

        Ok(transactions)
    }

    pub async fn get_token_owners(
        &self,
        contract_address: &str,
    ) -> Result<Vec<TokenOwnerRecord>, Error> {
        let mut owners = Vec::new();
        let mut cursor: Option<String> = None;

        loop {
            let url = self
                .config
                .token_owners_url(contract_address, cursor.as_deref())?;
            let mut page: OwnersResponse = self.fetch(url).await?;

            owners.append(&mut page.result);

            cursor = page.cursor.filter(|cursor| !cursor.is_empty());
            if cursor.is_none() {
                break;
            }
        }

        info!(contract_address, count = owners.len(), "fetched token owners");

        Ok(owners)
    }

    async fn fetch<T: DeserializeOwned>(&self, url: Url) -> Result<T, Error> {
        let response = self
            .client
            .get(url.clone())
            .header("X-API-Key", &self.config.moralis_api_key)
            .header("accept", "application/json")
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::ProviderError(format!(
                "{} {}",
                status,
                url.path()
            )));
        }

        Ok(response.json::<T>().await?)
    }
}
