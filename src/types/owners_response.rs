use serde::Deserialize;

/// One page of the provider's `/erc20/{address}/owners` endpoint.
///
/// Owner records stay in wire shape all the way into the holder
/// classifier, which owns validation and skips incomplete entries.
#[derive(Debug, Deserialize)]
pub struct OwnersResponse {
    #[serde(default)]
    pub result: Vec<TokenOwnerRecord>,
    pub cursor: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TokenOwnerRecord {
    pub owner_address: Option<String>,
    pub balance: Option<String>,
    pub balance_formatted: Option<String>,
    pub percentage_relative_to_total_supply: Option<f64>,
}
