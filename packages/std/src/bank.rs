//! Capabilities the ledger consumes from the surrounding chain.
//!
//! Every method receives the storage of the running transaction. An implementation that
//! keeps balances in that storage takes part in the transaction, so a write discarded by
//! [`crate::common::transaction::transactional`] also discards its transfers.

use cosmwasm_std::{Addr, Coin, Storage, Uint128};

use crate::error::ContractError;

/// Custody transfers between accounts and module accounts, plus supply queries.
pub trait SupplyKeeper {
    fn send_coins_from_account_to_module(
        &self,
        storage: &mut dyn Storage,
        sender: &Addr,
        recipient_module: &str,
        amount: &[Coin],
    ) -> Result<(), ContractError>;

    fn send_coins_from_module_to_account(
        &self,
        storage: &mut dyn Storage,
        sender_module: &str,
        recipient: &Addr,
        amount: &[Coin],
    ) -> Result<(), ContractError>;

    /// Total supply of `denom`.
    fn get_supply(&self, storage: &dyn Storage, denom: &str) -> Result<Uint128, ContractError>;
}

/// Spendable balances and plain account-to-account transfers.
pub trait BankKeeper {
    fn get_coins(&self, storage: &dyn Storage, addr: &Addr) -> Result<Vec<Coin>, ContractError>;

    fn send_coins(
        &self,
        storage: &mut dyn Storage,
        from: &Addr,
        to: &Addr,
        amount: &[Coin],
    ) -> Result<(), ContractError>;
}
