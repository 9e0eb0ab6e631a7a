//! Aggregator stand-in for multi-test: answers the feed queries and lets the
//! test move the price.

use cosmwasm_schema::cw_serde;
use cosmwasm_std::{
    to_json_binary, Binary, Deps, DepsMut, Env, Int128, MessageInfo, Response, StdResult,
};
use cw_storage_plus::Item;

use crate::price_feed::{DecimalsResponse, FeedQueryMsg, RoundDataResponse, VersionResponse};

const DECIMALS: Item<u8> = Item::new("decimals");
const LATEST_ROUND: Item<RoundDataResponse> = Item::new("latest-round");

pub const FEED_VERSION: u64 = 4;

#[cw_serde]
pub struct InstantiateMsg {
    pub decimals: u8,
    pub initial_answer: Int128,
}

#[cw_serde]
pub enum ExecuteMsg {
    UpdateAnswer { answer: Int128 },
}

pub fn instantiate(
    deps: DepsMut,
    env: Env,
    _info: MessageInfo,
    msg: InstantiateMsg,
) -> StdResult<Response> {
    DECIMALS.save(deps.storage, &msg.decimals)?;
    LATEST_ROUND.save(deps.storage, &new_round(1, msg.initial_answer, &env))?;
    Ok(Response::new())
}

pub fn execute(deps: DepsMut, env: Env, _info: MessageInfo, msg: ExecuteMsg) -> StdResult<Response> {
    match msg {
        ExecuteMsg::UpdateAnswer { answer } => {
            let round_id = LATEST_ROUND.load(deps.storage)?.round_id + 1;
            LATEST_ROUND.save(deps.storage, &new_round(round_id, answer, &env))?;
            Ok(Response::new().add_attribute("round_id", round_id.to_string()))
        }
    }
}

pub fn query(deps: Deps, _env: Env, msg: FeedQueryMsg) -> StdResult<Binary> {
    match msg {
        FeedQueryMsg::LatestRoundData {} => to_json_binary(&LATEST_ROUND.load(deps.storage)?),
        FeedQueryMsg::Decimals {} => to_json_binary(&DecimalsResponse {
            decimals: DECIMALS.load(deps.storage)?,
        }),
        FeedQueryMsg::Version {} => to_json_binary(&VersionResponse {
            version: FEED_VERSION,
        }),
    }
}

fn new_round(round_id: u64, answer: Int128, env: &Env) -> RoundDataResponse {
    let now = env.block.time.seconds();
    RoundDataResponse {
        round_id,
        answer,
        started_at: now,
        updated_at: now,
        answered_in_round: round_id,
    }
}
