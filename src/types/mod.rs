pub use self::{
    owners_response::{OwnersResponse, TokenOwnerRecord},
    transactions_response::{
        DecodedEventRecord, DecodedParamRecord, LogRecord,
        TransactionRecord, TransactionsResponse,
    },
    transfers_response::{TransferRecord, TransfersResponse},
};

mod owners_response;
mod transactions_response;
mod transfers_response;
