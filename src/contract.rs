#[cfg(not(feature = "library"))]
use cosmwasm_std::entry_point;
use cosmwasm_std::{
    to_json_binary, Addr, BankMsg, Binary, Deps, DepsMut, Env, MessageInfo, Reply, Response,
    SubMsg, SubMsgResult, Uint128, Uint256,
};
use cw2::set_contract_version;

use crate::error::ContractError;
use crate::msg::{ExecuteMsg, InstantiateMsg, QueryMsg};
use crate::price_feed::PriceFeed;
use crate::state::{
    clear_funders, funder_count, load_funders, push_funder, ADDRESS_TO_AMOUNT_FUNDED, DENOM,
    FUNDERS, OWNER, PRICE_FEED,
};

// version info for migration info
const CONTRACT_NAME: &str = "crates.io:fund-me";
const CONTRACT_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Smallest accepted contribution: 50 USD with 18 decimals.
pub const MINIMUM_USD: Uint128 = Uint128::new(50_000_000_000_000_000_000);
pub const DEFAULT_DENOM: &str = "inj";

pub const TRANSFER_REPLY_ID: u64 = 1;

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn instantiate(
    deps: DepsMut,
    _env: Env,
    info: MessageInfo,
    msg: InstantiateMsg,
) -> Result<Response, ContractError> {
    set_contract_version(deps.storage, CONTRACT_NAME, CONTRACT_VERSION)?;

    let price_feed = deps.api.addr_validate(&msg.price_feed)?;
    let denom = msg.denom.unwrap_or_else(|| DEFAULT_DENOM.to_string());

    OWNER.save(deps.storage, &info.sender)?;
    PRICE_FEED.save(deps.storage, &price_feed)?;
    DENOM.save(deps.storage, &denom)?;

    Ok(Response::new()
        .add_attribute("method", "instantiate")
        .add_attribute("owner", info.sender)
        .add_attribute("price_feed", price_feed)
        .add_attribute("denom", denom))
}

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn execute(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    msg: ExecuteMsg,
) -> Result<Response, ContractError> {
    match msg {
        ExecuteMsg::Fund {} => execute::fund(deps, info, "fund"),
        ExecuteMsg::Receive {} => execute::fund(deps, info, "receive"),
        ExecuteMsg::Withdraw {} => execute::withdraw(deps, env, info),
        ExecuteMsg::CheaperWithdraw {} => execute::cheaper_withdraw(deps, env, info),
    }
}

pub mod execute {
    use super::*;

    /// Shared by both deposit entry points. Credits the attached funds to the
    /// sender if they are worth at least `MINIMUM_USD` at the current price.
    pub fn fund(deps: DepsMut, info: MessageInfo, method: &str) -> Result<Response, ContractError> {
        let denom = DENOM.load(deps.storage)?;
        let price_feed = PriceFeed(PRICE_FEED.load(deps.storage)?);

        let mut amount = Uint128::zero();
        for coin in &info.funds {
            if coin.denom != denom {
                return Err(ContractError::InvalidFunds { denom });
            }
            amount = amount.checked_add(coin.amount)?;
        }

        let usd_value = price_feed.conversion_rate(&deps.querier, amount)?;
        if usd_value < Uint256::from(MINIMUM_USD) {
            return Err(ContractError::InsufficientContribution {
                usd_value,
                minimum_usd: MINIMUM_USD,
            });
        }

        ADDRESS_TO_AMOUNT_FUNDED.update(
            deps.storage,
            &info.sender,
            |old| -> Result<Uint128, ContractError> {
                Ok(old.unwrap_or_default().checked_add(amount)?)
            },
        )?;
        push_funder(deps.storage, &info.sender)?;

        Ok(Response::new()
            .add_attribute("method", method)
            .add_attribute("funder", info.sender)
            .add_attribute("amount", amount.to_string())
            .add_attribute("usd_value", usd_value.to_string()))
    }

    /// Resets every funder's record, walking the list in storage.
    pub fn withdraw(deps: DepsMut, env: Env, info: MessageInfo) -> Result<Response, ContractError> {
        let owner = only_owner(deps.as_ref(), &info)?;

        let mut index = 0;
        while index < funder_count(deps.storage)? {
            let funder = FUNDERS.load(deps.storage, index)?;
            ADDRESS_TO_AMOUNT_FUNDED.remove(deps.storage, &funder);
            index += 1;
        }
        clear_funders(deps.storage, index)?;

        send_balance(deps.as_ref(), env, owner, "withdraw", index)
    }

    /// Same effects as `withdraw`, iterating an in-memory copy of the funder list.
    pub fn cheaper_withdraw(
        deps: DepsMut,
        env: Env,
        info: MessageInfo,
    ) -> Result<Response, ContractError> {
        let owner = only_owner(deps.as_ref(), &info)?;

        let funders = load_funders(deps.storage)?;
        let count = funders.len() as u64;
        for funder in &funders {
            ADDRESS_TO_AMOUNT_FUNDED.remove(deps.storage, funder);
        }
        clear_funders(deps.storage, count)?;

        send_balance(deps.as_ref(), env, owner, "cheaper_withdraw", count)
    }

    fn only_owner(deps: Deps, info: &MessageInfo) -> Result<Addr, ContractError> {
        let owner = OWNER.load(deps.storage)?;
        if info.sender != owner {
            return Err(ContractError::NotOwner {});
        }
        if !info.funds.is_empty() {
            return Err(ContractError::NonPayable {});
        }
        Ok(owner)
    }

    // must run after all ledger writes, the bank send is the last thing dispatched
    fn send_balance(
        deps: Deps,
        env: Env,
        owner: Addr,
        method: &str,
        funders_cleared: u64,
    ) -> Result<Response, ContractError> {
        let denom = DENOM.load(deps.storage)?;
        let balance = deps.querier.query_balance(env.contract.address, denom)?;

        let res = Response::new()
            .add_attribute("method", method)
            .add_attribute("owner", owner.as_str())
            .add_attribute("amount", balance.amount.to_string())
            .add_attribute("funders_cleared", funders_cleared.to_string());

        // the bank module rejects empty sends
        if balance.amount.is_zero() {
            return Ok(res);
        }

        Ok(res.add_submessage(SubMsg::reply_on_error(
            BankMsg::Send {
                to_address: owner.into_string(),
                amount: vec![balance],
            },
            TRANSFER_REPLY_ID,
        )))
    }
}

/// A failed payout fails the whole transaction, which reverts the resets
/// written by the withdraw that dispatched it.
#[cfg_attr(not(feature = "library"), entry_point)]
pub fn reply(_deps: DepsMut, _env: Env, msg: Reply) -> Result<Response, ContractError> {
    match (msg.id, msg.result) {
        (TRANSFER_REPLY_ID, SubMsgResult::Err(reason)) => {
            Err(ContractError::TransferFailed { reason })
        }
        (TRANSFER_REPLY_ID, SubMsgResult::Ok(_)) => Ok(Response::new()),
        (id, _) => Err(ContractError::UnknownReplyId { id }),
    }
}

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn query(deps: Deps, _env: Env, msg: QueryMsg) -> Result<Binary, ContractError> {
    match msg {
        QueryMsg::AddressToAmountFunded { address } => {
            Ok(to_json_binary(&query::amount_funded(deps, address)?)?)
        }
        QueryMsg::Funder { index } => Ok(to_json_binary(&query::funder(deps, index)?)?),
        QueryMsg::FunderCount {} => Ok(to_json_binary(&query::funder_count(deps)?)?),
        QueryMsg::Owner {} => Ok(to_json_binary(&query::owner(deps)?)?),
        QueryMsg::PriceFeed {} => Ok(to_json_binary(&query::price_feed(deps)?)?),
        QueryMsg::MinimumUsd {} => Ok(to_json_binary(&query::minimum_usd())?),
        QueryMsg::Denom {} => Ok(to_json_binary(&query::denom(deps)?)?),
        QueryMsg::Version {} => Ok(to_json_binary(&query::version(deps)?)?),
        QueryMsg::ConversionRate { amount } => {
            Ok(to_json_binary(&query::conversion_rate(deps, amount)?)?)
        }
    }
}

pub mod query {
    use super::*;
    use crate::msg::{
        AmountFundedResponse, ConversionRateResponse, DenomResponse, FunderCountResponse,
        FunderResponse, MinimumUsdResponse, OwnerResponse, PriceFeedResponse,
    };
    use crate::price_feed::VersionResponse;

    // addresses that never funded, or were reset by a withdrawal, read as zero
    pub fn amount_funded(deps: Deps, address: String) -> Result<AmountFundedResponse, ContractError> {
        let address = deps.api.addr_validate(&address)?;
        let amount = ADDRESS_TO_AMOUNT_FUNDED
            .may_load(deps.storage, &address)?
            .unwrap_or_default();
        Ok(AmountFundedResponse { amount })
    }

    pub fn funder(deps: Deps, index: u64) -> Result<FunderResponse, ContractError> {
        let count = crate::state::funder_count(deps.storage)?;
        if index >= count {
            return Err(ContractError::FunderIndexOutOfRange { index, count });
        }
        let funder = FUNDERS.load(deps.storage, index)?;
        Ok(FunderResponse { funder })
    }

    pub fn funder_count(deps: Deps) -> Result<FunderCountResponse, ContractError> {
        Ok(FunderCountResponse {
            count: crate::state::funder_count(deps.storage)?,
        })
    }

    pub fn owner(deps: Deps) -> Result<OwnerResponse, ContractError> {
        Ok(OwnerResponse {
            owner: OWNER.load(deps.storage)?,
        })
    }

    pub fn price_feed(deps: Deps) -> Result<PriceFeedResponse, ContractError> {
        Ok(PriceFeedResponse {
            price_feed: PRICE_FEED.load(deps.storage)?,
        })
    }

    pub fn minimum_usd() -> MinimumUsdResponse {
        MinimumUsdResponse {
            minimum_usd: MINIMUM_USD,
        }
    }

    pub fn denom(deps: Deps) -> Result<DenomResponse, ContractError> {
        Ok(DenomResponse {
            denom: DENOM.load(deps.storage)?,
        })
    }

    pub fn version(deps: Deps) -> Result<VersionResponse, ContractError> {
        let price_feed = PriceFeed(PRICE_FEED.load(deps.storage)?);
        Ok(VersionResponse {
            version: price_feed.version(&deps.querier)?,
        })
    }

    pub fn conversion_rate(
        deps: Deps,
        amount: Uint128,
    ) -> Result<ConversionRateResponse, ContractError> {
        let price_feed = PriceFeed(PRICE_FEED.load(deps.storage)?);
        Ok(ConversionRateResponse {
            usd_value: price_feed.conversion_rate(&deps.querier, amount)?,
        })
    }
}
