use cosmwasm_std::{DivideByZeroError, OverflowError, StdError, Uint128, Uint256};
use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum ContractError {
    #[error("{0}")]
    Std(#[from] StdError),

    #[error("{0}")]
    Overflow(#[from] OverflowError),

    #[error("{0}")]
    DivideByZero(#[from] DivideByZeroError),

    #[error("You need to spend more: {usd_value} is below the minimum of {minimum_usd}")]
    InsufficientContribution {
        usd_value: Uint256,
        minimum_usd: Uint128,
    },

    #[error("Only the owner can withdraw")]
    NotOwner {},

    #[error("Transfer to owner failed: {reason}")]
    TransferFailed { reason: String },

    #[error("Price feed unavailable: {reason}")]
    OracleUnavailable { reason: String },

    #[error("Only {denom} is accepted")]
    InvalidFunds { denom: String },

    #[error("This message does not accept funds")]
    NonPayable {},

    #[error("Funder index {index} out of range (count {count})")]
    FunderIndexOutOfRange { index: u64, count: u64 },

    #[error("Unknown reply id {id}")]
    UnknownReplyId { id: u64 },
}
