use std::str::FromStr;

use bigdecimal::BigDecimal;
use serde::Deserialize;

use crate::{error::Error, helpers::parse_timestamp, model::TransferEvent};

/// One page of the provider's `/erc20/{address}/transfers` endpoint.
#[derive(Debug, Deserialize)]
pub struct TransfersResponse {
    #[serde(default)]
    pub result: Vec<TransferRecord>,
    pub cursor: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct TransferRecord {
    pub block_timestamp: String,
    pub from_address: String,
    pub to_address: String,
    pub value: Option<String>,
    pub value_decimal: Option<String>,
}

impl TransferRecord {
    /// Converts a wire record into a domain event. Records with an
    /// unparseable timestamp or amount are rejected here so the
    /// aggregators only ever see valid events.
    pub fn to_event(&self) -> Result<TransferEvent, Error> {
        let timestamp = parse_timestamp(&self.block_timestamp)?;
        let raw_value = self
            .value_decimal
            .as_deref()
            .ok_or(Error::FieldNotExist(String::from("value_decimal")))?;
        let value_decimal = BigDecimal::from_str(raw_value)?;

        Ok(TransferEvent {
            timestamp,
            from_address: self.from_address.to_owned(),
            to_address: self.to_address.to_owned(),
            value_decimal,
        })
    }
}
