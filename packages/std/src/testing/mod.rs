use cosmwasm_std::{ensure, Addr, Coin, Order, StdResult, Storage, Uint128};
use cw_storage_plus::Map;

use crate::{
    bank::{BankKeeper, SupplyKeeper},
    common::{coins_to_string, merge_coins},
    error::ContractError,
};

/// Mock bond denom
pub const MOCK_BOND_DENOM: &str = "okt";
/// Mock pair owner
pub const MOCK_OWNER: &str = "owner";
/// Mock receiver of an ownership transfer
pub const MOCK_NEW_OWNER: &str = "new_owner";
/// Mock trader
pub const MOCK_TRADER: &str = "trader";

const BALANCES: Map<(&str, &str), Uint128> = Map::new("mock_bank_balances");
const SUPPLY: Map<&str, Uint128> = Map::new("mock_bank_supply");

/// Bank keeping every balance in the storage it is handed, so it shares the caller's
/// transaction. Module accounts live next to user accounts under `module:<name>`.
#[derive(Debug, Default, Clone, Copy)]
pub struct MockBank;

impl MockBank {
    pub fn module_account(module: &str) -> String {
        format!("module:{module}")
    }

    /// Mints `coins` into `addr`, replacing what it held of those denoms.
    pub fn set_balance(
        &self,
        storage: &mut dyn Storage,
        addr: &Addr,
        coins: &[Coin],
    ) -> Result<(), ContractError> {
        for coin in coins {
            let previous = BALANCES
                .may_load(storage, (addr.as_str(), coin.denom.as_str()))?
                .unwrap_or_default();
            let supply = SUPPLY.may_load(storage, &coin.denom)?.unwrap_or_default();
            let supply = supply.checked_sub(previous)?.checked_add(coin.amount)?;
            SUPPLY.save(storage, &coin.denom, &supply)?;
            BALANCES.save(storage, (addr.as_str(), coin.denom.as_str()), &coin.amount)?;
        }
        Ok(())
    }

    pub fn balance(&self, storage: &dyn Storage, account: &str, denom: &str) -> Uint128 {
        BALANCES
            .may_load(storage, (account, denom))
            .ok()
            .flatten()
            .unwrap_or_default()
    }

    pub fn module_balance(&self, storage: &dyn Storage, module: &str, denom: &str) -> Uint128 {
        self.balance(storage, &Self::module_account(module), denom)
    }

    fn transfer(
        &self,
        storage: &mut dyn Storage,
        from: &str,
        to: &str,
        amount: &[Coin],
    ) -> Result<(), ContractError> {
        let amount = merge_coins(&[], amount)?;
        // All debits are checked up front so a failed transfer moves nothing.
        for coin in &amount {
            let available = self.balance(storage, from, &coin.denom);
            ensure!(
                available >= coin.amount,
                ContractError::InsufficientFunds {
                    msg: format!(
                        "{from} holds {available}{}, needs {}",
                        coin.denom,
                        coins_to_string(&amount)
                    ),
                }
            );
        }
        for coin in &amount {
            let remaining = self.balance(storage, from, &coin.denom).checked_sub(coin.amount)?;
            BALANCES.save(storage, (from, coin.denom.as_str()), &remaining)?;
            let received = self.balance(storage, to, &coin.denom).checked_add(coin.amount)?;
            BALANCES.save(storage, (to, coin.denom.as_str()), &received)?;
        }
        Ok(())
    }
}

impl SupplyKeeper for MockBank {
    fn send_coins_from_account_to_module(
        &self,
        storage: &mut dyn Storage,
        sender: &Addr,
        recipient_module: &str,
        amount: &[Coin],
    ) -> Result<(), ContractError> {
        self.transfer(
            storage,
            sender.as_str(),
            &Self::module_account(recipient_module),
            amount,
        )
    }

    fn send_coins_from_module_to_account(
        &self,
        storage: &mut dyn Storage,
        sender_module: &str,
        recipient: &Addr,
        amount: &[Coin],
    ) -> Result<(), ContractError> {
        self.transfer(
            storage,
            &Self::module_account(sender_module),
            recipient.as_str(),
            amount,
        )
    }

    fn get_supply(&self, storage: &dyn Storage, denom: &str) -> Result<Uint128, ContractError> {
        Ok(SUPPLY.may_load(storage, denom)?.unwrap_or_default())
    }
}

impl BankKeeper for MockBank {
    fn get_coins(&self, storage: &dyn Storage, addr: &Addr) -> Result<Vec<Coin>, ContractError> {
        let coins = BALANCES
            .prefix(addr.as_str())
            .range(storage, None, None, Order::Ascending)
            .filter(|item| !matches!(item, Ok((_, amount)) if amount.is_zero()))
            .map(|item| item.map(|(denom, amount)| Coin { denom, amount }))
            .collect::<StdResult<Vec<Coin>>>()?;
        Ok(coins)
    }

    fn send_coins(
        &self,
        storage: &mut dyn Storage,
        from: &Addr,
        to: &Addr,
        amount: &[Coin],
    ) -> Result<(), ContractError> {
        self.transfer(storage, from.as_str(), to.as_str(), amount)
    }
}
