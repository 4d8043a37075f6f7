use cosmwasm_std::{OverflowError, StdError};
use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum ContractError {
    #[error("{0}")]
    Std(#[from] StdError),

    #[error("Overflow")]
    Overflow {},

    #[error("Unknown product: {product}")]
    UnknownProduct { product: String },

    #[error("{address} is not the owner of product {product}")]
    NotOwner { address: String, product: String },

    #[error("Wrong denom: expected {expected}, received {received}")]
    WrongDenom { expected: String, received: String },

    #[error("Insufficient funds: {msg}")]
    InsufficientFunds { msg: String },

    #[error("Failed to unlock {requested} for {address}, coins locked <{locked}>")]
    Overdraft {
        address: String,
        requested: String,
        locked: String,
    },

    #[error("Not found: {msg}")]
    NotFound { msg: String },

    #[error("Encoding failure: {msg}")]
    EncodingFailure { msg: String },

    #[error("Invalid params: {msg}")]
    InvalidParams { msg: String },

    #[error("Invalid asset: {asset}")]
    InvalidAsset { asset: String },

    #[error("Token {symbol} already exists")]
    TokenExists { symbol: String },
}

impl ContractError {
    /// Wraps a serialization error raised while writing a record.
    pub fn encoding(err: StdError) -> Self {
        ContractError::EncodingFailure {
            msg: err.to_string(),
        }
    }
}

impl From<OverflowError> for ContractError {
    fn from(_err: OverflowError) -> Self {
        ContractError::Overflow {}
    }
}
