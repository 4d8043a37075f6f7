mod registry;

use std::collections::BTreeMap;

use cosmwasm_std::{Addr, Coin, Order, Storage};
use dex_std::{
    bank::{BankKeeper, SupplyKeeper},
    common::{
        coins_are_zero, coins_to_string, merge_coins, safe_sub_coins,
        transaction::transactional,
    },
    error::ContractError,
};
use tracing::debug;

use crate::state::{AccCoins, CoinInfo, LockCoinsType, LOCKED_COINS};

/// Custody account holding locked coins.
pub const TOKEN_MODULE_NAME: &str = "token";

/// Token registry plus the per-address reservations backing open orders.
pub struct TokenKeeper<B> {
    bank: B,
}

impl<B: SupplyKeeper + BankKeeper> TokenKeeper<B> {
    pub fn new(bank: B) -> Self {
        TokenKeeper { bank }
    }

    pub fn bank(&self) -> &B {
        &self.bank
    }

    /// Moves `coins` from `addr` into custody. Quantity locks are also recorded
    /// against `addr`.
    pub fn lock_coins(
        &self,
        storage: &mut dyn Storage,
        addr: &Addr,
        coins: &[Coin],
        lock_type: LockCoinsType,
    ) -> Result<(), ContractError> {
        let locked = match lock_type {
            LockCoinsType::Quantity => {
                Some(merge_coins(&self.get_lock_coins(storage, addr)?, coins)?)
            }
            LockCoinsType::Fee => None,
        };

        self.bank
            .send_coins_from_account_to_module(storage, addr, TOKEN_MODULE_NAME, coins)?;
        if let Some(locked) = locked {
            self.save_lock_coins(storage, addr, &locked)?;
        }

        debug!(address = %addr, coins = %coins_to_string(coins), ?lock_type, "coins locked");
        Ok(())
    }

    /// Returns `coins` from custody to `addr`.
    ///
    /// A quantity unlock larger than what `addr` has locked fails with
    /// [`ContractError::Overdraft`] before anything moves.
    pub fn unlock_coins(
        &self,
        storage: &mut dyn Storage,
        addr: &Addr,
        coins: &[Coin],
        lock_type: LockCoinsType,
    ) -> Result<(), ContractError> {
        let remaining = match lock_type {
            LockCoinsType::Quantity => Some(self.deduct_lock_coins(storage, addr, coins)?),
            LockCoinsType::Fee => None,
        };

        self.bank
            .send_coins_from_module_to_account(storage, TOKEN_MODULE_NAME, addr, coins)?;
        if let Some(remaining) = remaining {
            self.save_lock_coins(storage, addr, &remaining)?;
        }

        debug!(address = %addr, coins = %coins_to_string(coins), ?lock_type, "coins unlocked");
        Ok(())
    }

    /// Settles a fill: `output` leaves the locked set of `addr` and `input` is paid to
    /// `addr` out of custody. Either both happen or neither does.
    pub fn balance_account(
        &self,
        storage: &mut dyn Storage,
        addr: &Addr,
        output: &[Coin],
        input: &[Coin],
    ) -> Result<(), ContractError> {
        transactional(storage, |storage| {
            if !coins_are_zero(output) {
                let remaining = self.deduct_lock_coins(storage, addr, output)?;
                self.save_lock_coins(storage, addr, &remaining)?;
            }
            if !coins_are_zero(input) {
                self.bank.send_coins_from_module_to_account(
                    storage,
                    TOKEN_MODULE_NAME,
                    addr,
                    input,
                )?;
            }
            Ok(())
        })?;

        debug!(
            address = %addr,
            output = %coins_to_string(output),
            input = %coins_to_string(input),
            "account balanced"
        );
        Ok(())
    }

    /// Locked coins of `addr`, empty when nothing is locked.
    pub fn get_lock_coins(
        &self,
        storage: &dyn Storage,
        addr: &Addr,
    ) -> Result<Vec<Coin>, ContractError> {
        Ok(LOCKED_COINS.may_load(storage, addr)?.unwrap_or_default())
    }

    pub fn get_all_lock_coins(
        &self,
        storage: &dyn Storage,
    ) -> Result<Vec<AccCoins>, ContractError> {
        LOCKED_COINS
            .range(storage, None, None, Order::Ascending)
            .map(|item| {
                let (acc, coins) = item?;
                Ok(AccCoins { acc, coins })
            })
            .collect()
    }

    /// Spendable and locked amounts of `addr`, one entry per denom.
    pub fn get_coins_info(
        &self,
        storage: &dyn Storage,
        addr: &Addr,
    ) -> Result<Vec<CoinInfo>, ContractError> {
        let mut coins_info: BTreeMap<String, CoinInfo> = BTreeMap::new();
        for coin in self.bank.get_coins(storage, addr)? {
            coin_info_entry(&mut coins_info, &coin.denom).available = coin.amount;
        }
        for coin in self.get_lock_coins(storage, addr)? {
            coin_info_entry(&mut coins_info, &coin.denom).locked = coin.amount;
        }
        Ok(coins_info.into_values().collect())
    }

    pub fn send_coins_from_account_to_account(
        &self,
        storage: &mut dyn Storage,
        from: &Addr,
        to: &Addr,
        coins: &[Coin],
    ) -> Result<(), ContractError> {
        self.bank.send_coins(storage, from, to, coins)
    }

    fn deduct_lock_coins(
        &self,
        storage: &dyn Storage,
        addr: &Addr,
        coins: &[Coin],
    ) -> Result<Vec<Coin>, ContractError> {
        let locked = self.get_lock_coins(storage, addr)?;
        safe_sub_coins(&locked, coins).ok_or_else(|| ContractError::Overdraft {
            address: addr.to_string(),
            requested: coins_to_string(coins),
            locked: coins_to_string(&locked),
        })
    }

    fn save_lock_coins(
        &self,
        storage: &mut dyn Storage,
        addr: &Addr,
        coins: &[Coin],
    ) -> Result<(), ContractError> {
        if coins.is_empty() {
            LOCKED_COINS.remove(storage, addr);
            return Ok(());
        }
        LOCKED_COINS
            .save(storage, addr, &coins.to_vec())
            .map_err(ContractError::encoding)
    }
}

fn coin_info_entry<'a>(
    coins_info: &'a mut BTreeMap<String, CoinInfo>,
    denom: &str,
) -> &'a mut CoinInfo {
    coins_info
        .entry(denom.to_string())
        .or_insert_with(|| CoinInfo {
            denom: denom.to_string(),
            available: Default::default(),
            locked: Default::default(),
        })
}
