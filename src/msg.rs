use cosmwasm_schema::{cw_serde, QueryResponses};
use cosmwasm_std::{Addr, Uint128, Uint256};

#[cw_serde]
pub struct InstantiateMsg {
    /// Address of the native/USD price feed contract.
    pub price_feed: String,
    pub denom: Option<String>, // DEFAULT_DENOM if None
}

#[cw_serde]
pub enum ExecuteMsg {
    /// Contribute the attached funds. Must be worth at least `MINIMUM_USD`.
    Fund {},
    /// Plain deposit entry point, handled exactly like `Fund`.
    Receive {},
    /// Owner only. Resets every contribution and sends the whole balance to the owner.
    Withdraw {},
    /// Same as `Withdraw`, reading the funder list from storage only once.
    CheaperWithdraw {},
}

#[cw_serde]
#[derive(QueryResponses)]
pub enum QueryMsg {
    #[returns(AmountFundedResponse)]
    AddressToAmountFunded { address: String },
    #[returns(FunderResponse)]
    Funder { index: u64 },
    #[returns(FunderCountResponse)]
    FunderCount {},
    #[returns(OwnerResponse)]
    Owner {},
    #[returns(PriceFeedResponse)]
    PriceFeed {},
    #[returns(MinimumUsdResponse)]
    MinimumUsd {},
    #[returns(DenomResponse)]
    Denom {},
    /// Version reported by the price feed.
    #[returns(crate::price_feed::VersionResponse)]
    Version {},
    /// USD value (18 decimals) of `amount` at the current feed price.
    #[returns(ConversionRateResponse)]
    ConversionRate { amount: Uint128 },
}

#[cw_serde]
pub struct AmountFundedResponse {
    pub amount: Uint128,
}

#[cw_serde]
pub struct FunderResponse {
    pub funder: Addr,
}

#[cw_serde]
pub struct FunderCountResponse {
    pub count: u64,
}

#[cw_serde]
pub struct OwnerResponse {
    pub owner: Addr,
}

#[cw_serde]
pub struct PriceFeedResponse {
    pub price_feed: Addr,
}

#[cw_serde]
pub struct MinimumUsdResponse {
    pub minimum_usd: Uint128,
}

#[cw_serde]
pub struct DenomResponse {
    pub denom: String,
}

#[cw_serde]
pub struct ConversionRateResponse {
    pub usd_value: Uint256,
}
