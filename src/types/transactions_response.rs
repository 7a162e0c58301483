use serde::Deserialize;
use serde_json::Value;

use crate::{
    error::Error,
    helpers::parse_timestamp,
    model::{DecodedEvent, EventParam, PaymentTransaction, TransactionLog},
};

/// One page of the provider's `/{address}/verbose` endpoint.
#[derive(Debug, Deserialize)]
pub struct TransactionsResponse {
    #[serde(default)]
    pub result: Vec<TransactionRecord>,
    pub cursor: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct TransactionRecord {
    pub block_timestamp: String,
    pub input: Option<String>,
    pub logs: Option<Vec<LogRecord>>,
}

#[derive(Debug, Deserialize)]
pub struct LogRecord {
    pub decoded_event: Option<DecodedEventRecord>,
}

#[derive(Debug, Deserialize)]
pub struct DecodedEventRecord {
    pub label: Option<String>,
    pub params: Option<Vec<DecodedParamRecord>>,
}

#[derive(Debug, Deserialize)]
pub struct DecodedParamRecord {
    pub name: Option<String>,
    // The provider serializes uint256 params as strings but smaller
    // integers as JSON numbers, so both must be accepted.
    pub value: Option<Value>,
    #[serde(rename = "type")]
    pub param_type: Option<String>,
}

impl TransactionRecord {
    pub fn to_payment(&self) -> Result<PaymentTransaction, Error> {
        let timestamp = parse_timestamp(&self.block_timestamp)?;
        let logs = self
            .logs
            .as_deref()
            .unwrap_or_default()
            .iter()
            .map(LogRecord::to_log)
            .collect();

        Ok(PaymentTransaction {
            timestamp,
            input: self.input.clone().unwrap_or_default(),
            logs,
        })
    }
}

impl LogRecord {
    fn to_log(&self) -> TransactionLog {
        let decoded_event =
            self.decoded_event.as_ref().map(|event| DecodedEvent {
                params: event
                    .params
                    .as_deref()
                    .unwrap_or_default()
                    .iter()
                    .map(DecodedParamRecord::to_param)
                    .collect(),
            });
        TransactionLog { decoded_event }
    }
}

impl DecodedParamRecord {
    fn to_param(&self) -> EventParam {
        let value = match &self.value {
            Some(Value::String(s)) => s.to_owned(),
            Some(Value::Number(n)) => n.to_string(),
            Some(other) => other.to_string(),
            None => String::new(),
        };

        EventParam {
            name: self.name.clone().unwrap_or_default(),
            value,
            param_type: self.param_type.clone(),
        }
    }
}
