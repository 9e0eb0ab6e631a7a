//! Read-only adapter over an aggregator-style price feed contract.
//!
//! The feed reports the price of one native unit in USD as an integer
//! `answer` with `decimals` places of precision. Everything here is
//! converted to 18-decimal fixed point with integer arithmetic.

use cosmwasm_schema::{cw_serde, QueryResponses};
use cosmwasm_std::{Addr, Int128, OverflowError, QuerierWrapper, StdError, Uint128, Uint256};

use crate::error::ContractError;

/// Fixed-point precision of normalized prices and of the native denom.
pub const PRECISION_DECIMALS: u32 = 18;

/// Query interface every price feed must answer.
#[cw_serde]
#[derive(QueryResponses)]
pub enum FeedQueryMsg {
    #[returns(RoundDataResponse)]
    LatestRoundData {},
    #[returns(DecimalsResponse)]
    Decimals {},
    #[returns(VersionResponse)]
    Version {},
}

#[cw_serde]
pub struct RoundDataResponse {
    pub round_id: u64,
    pub answer: Int128,
    pub started_at: u64,
    pub updated_at: u64,
    pub answered_in_round: u64,
}

#[cw_serde]
pub struct DecimalsResponse {
    pub decimals: u8,
}

#[cw_serde]
pub struct VersionResponse {
    pub version: u64,
}

/// Handle to the feed contract, fixed at instantiation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PriceFeed(pub Addr);

impl PriceFeed {
    pub fn latest_round_data(
        &self,
        querier: &QuerierWrapper,
    ) -> Result<RoundDataResponse, ContractError> {
        self.query(querier, &FeedQueryMsg::LatestRoundData {})
    }

    pub fn decimals(&self, querier: &QuerierWrapper) -> Result<u8, ContractError> {
        let res: DecimalsResponse = self.query(querier, &FeedQueryMsg::Decimals {})?;
        Ok(res.decimals)
    }

    pub fn version(&self, querier: &QuerierWrapper) -> Result<u64, ContractError> {
        let res: VersionResponse = self.query(querier, &FeedQueryMsg::Version {})?;
        Ok(res.version)
    }

    /// Current price of one native unit, in USD with 18 decimals.
    pub fn price(&self, querier: &QuerierWrapper) -> Result<Uint256, ContractError> {
        let round = self.latest_round_data(querier)?;
        if round.updated_at == 0 {
            return Err(unavailable(format!("round {} is not complete", round.round_id)));
        }
        if round.answered_in_round < round.round_id {
            return Err(unavailable(format!(
                "stale answer from round {} (latest {})",
                round.answered_in_round, round.round_id
            )));
        }
        let decimals = self.decimals(querier)?;
        normalize_price(round.answer, decimals)
    }

    /// USD value (18 decimals) of `amount` minimal native units at the current price.
    pub fn conversion_rate(
        &self,
        querier: &QuerierWrapper,
        amount: Uint128,
    ) -> Result<Uint256, ContractError> {
        let price = self.price(querier)?;
        conversion_rate(amount, price)
    }

    fn query<T: serde::de::DeserializeOwned>(
        &self,
        querier: &QuerierWrapper,
        msg: &FeedQueryMsg,
    ) -> Result<T, ContractError> {
        querier
            .query_wasm_smart(&self.0, msg)
            .map_err(|err: StdError| unavailable(err.to_string()))
    }
}

fn unavailable(reason: String) -> ContractError {
    ContractError::OracleUnavailable { reason }
}

/// Scales a raw feed answer with `decimals` places to 18 decimals.
pub fn normalize_price(answer: Int128, decimals: u8) -> Result<Uint256, ContractError> {
    let raw = u128::try_from(answer.i128())
        .ok()
        .filter(|raw| *raw > 0)
        .ok_or_else(|| unavailable(format!("non-positive answer {answer}")))?;
    let raw = Uint256::from(raw);
    let unsupported = |_: OverflowError| unavailable(format!("unsupported decimals {decimals}"));
    let decimals = u32::from(decimals);

    if decimals <= PRECISION_DECIMALS {
        let scale = Uint256::from(10u128)
            .checked_pow(PRECISION_DECIMALS - decimals)
            .map_err(unsupported)?;
        Ok(raw.checked_mul(scale)?)
    } else {
        let scale = Uint256::from(10u128)
            .checked_pow(decimals - PRECISION_DECIMALS)
            .map_err(unsupported)?;
        Ok(raw.checked_div(scale)?)
    }
}

/// `(price * amount) / 10^18`, both sides in 18-decimal fixed point.
pub fn conversion_rate(amount: Uint128, price: Uint256) -> Result<Uint256, ContractError> {
    let one = Uint256::from(10u128).checked_pow(PRECISION_DECIMALS)?;
    Ok(price.checked_mul(Uint256::from(amount))?.checked_div(one)?)
}
