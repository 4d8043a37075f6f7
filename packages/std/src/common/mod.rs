pub mod denom;
pub mod milliseconds;
pub mod transaction;

pub use milliseconds::*;

use crate::error::ContractError;
use cosmwasm_std::{ensure, Coin, Uint128};
use std::collections::BTreeMap;

/// Adds `coins_to_add` to `coins`, merging entries of the same denom.
///
/// The result is sorted by denom and never contains a zero amount, which is the
/// canonical form of every coin list written to storage.
pub fn merge_coins(coins: &[Coin], coins_to_add: &[Coin]) -> Result<Vec<Coin>, ContractError> {
    let mut merged = to_denom_map(coins)?;
    for coin in coins_to_add {
        let amount = merged.entry(coin.denom.clone()).or_default();
        *amount = amount.checked_add(coin.amount)?;
    }
    Ok(from_denom_map(merged))
}

/// Subtracts `coins_to_sub` from `coins`.
///
/// Returns `None` if any denom would go negative, leaving the caller free to decide
/// how to report it. A denom missing from `coins` counts as zero.
pub fn safe_sub_coins(coins: &[Coin], coins_to_sub: &[Coin]) -> Option<Vec<Coin>> {
    let mut remaining = to_denom_map(coins).ok()?;
    for coin in coins_to_sub {
        let amount = remaining.entry(coin.denom.clone()).or_default();
        *amount = amount.checked_sub(coin.amount).ok()?;
    }
    Some(from_denom_map(remaining))
}

/// Sum of two coins of the same denom.
pub fn add_coin(coin: &Coin, to_add: &Coin) -> Result<Coin, ContractError> {
    ensure_same_denom(coin, to_add)?;
    Ok(Coin {
        denom: coin.denom.clone(),
        amount: coin.amount.checked_add(to_add.amount)?,
    })
}

/// `coin` minus `to_sub`. Both must carry the same denom.
pub fn sub_coin(coin: &Coin, to_sub: &Coin) -> Result<Coin, ContractError> {
    ensure_same_denom(coin, to_sub)?;
    Ok(Coin {
        denom: coin.denom.clone(),
        amount: coin.amount.checked_sub(to_sub.amount)?,
    })
}

fn ensure_same_denom(coin: &Coin, other: &Coin) -> Result<(), ContractError> {
    ensure!(
        coin.denom == other.denom,
        ContractError::WrongDenom {
            expected: coin.denom.clone(),
            received: other.denom.clone(),
        }
    );
    Ok(())
}

/// True if the list is empty or every amount is zero.
pub fn coins_are_zero(coins: &[Coin]) -> bool {
    coins.iter().all(|coin| coin.amount.is_zero())
}

/// Formats a coin list the way the SDK does: `100uokb,20ubtc`.
pub fn coins_to_string(coins: &[Coin]) -> String {
    coins
        .iter()
        .map(|coin| coin.to_string())
        .collect::<Vec<String>>()
        .join(",")
}

fn to_denom_map(coins: &[Coin]) -> Result<BTreeMap<String, Uint128>, ContractError> {
    let mut map: BTreeMap<String, Uint128> = BTreeMap::new();
    for coin in coins {
        let amount = map.entry(coin.denom.clone()).or_default();
        *amount = amount.checked_add(coin.amount)?;
    }
    Ok(map)
}

fn from_denom_map(map: BTreeMap<String, Uint128>) -> Vec<Coin> {
    map.into_iter()
        .filter(|(_, amount)| !amount.is_zero())
        .map(|(denom, amount)| Coin { denom, amount })
        .collect()
}
