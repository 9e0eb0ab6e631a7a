pub mod contract;
mod error;
pub mod msg;
pub mod price_feed;
pub mod state;

#[cfg(test)]
mod mock_price_feed;

pub use crate::error::ContractError;
