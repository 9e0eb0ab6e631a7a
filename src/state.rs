use cosmwasm_std::{Addr, Order, StdResult, Storage, Uint128};
use cw_storage_plus::{Item, Map};

/// Registry of addresses and the cumulative amount they funded since the last withdrawal.
pub const ADDRESS_TO_AMOUNT_FUNDED: Map<&Addr, Uint128> = Map::new("address-to-amount-funded");

/// One entry per successful fund call, in call order. Duplicates are kept.
pub const FUNDERS: Map<u64, Addr> = Map::new("funders");
pub const FUNDER_COUNT: Item<u64> = Item::new("funder-count");

/// Receiver of withdrawals, the instantiating address.
pub const OWNER: Item<Addr> = Item::new("owner");
/// Aggregator contract queried for the native/USD price.
pub const PRICE_FEED: Item<Addr> = Item::new("price-feed");
/// The only native denom the ledger accepts.
pub const DENOM: Item<String> = Item::new("denom");

pub fn funder_count(storage: &dyn Storage) -> StdResult<u64> {
    Ok(FUNDER_COUNT.may_load(storage)?.unwrap_or_default())
}

pub fn push_funder(storage: &mut dyn Storage, funder: &Addr) -> StdResult<()> {
    let count = funder_count(storage)?;
    FUNDERS.save(storage, count, funder)?;
    FUNDER_COUNT.save(storage, &(count + 1))
}

/// Loads the whole funder list into memory.
pub fn load_funders(storage: &dyn Storage) -> StdResult<Vec<Addr>> {
    FUNDERS
        .range(storage, None, None, Order::Ascending)
        .map(|item| item.map(|(_, funder)| funder))
        .collect()
}

pub fn clear_funders(storage: &mut dyn Storage, count: u64) -> StdResult<()> {
    for index in 0..count {
        FUNDERS.remove(storage, index);
    }
    FUNDER_COUNT.save(storage, &0)
}
