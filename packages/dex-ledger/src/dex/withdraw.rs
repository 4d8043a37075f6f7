use cosmwasm_std::{ensure, Addr, Coin, Storage, Timestamp};
use dex_std::{
    bank::SupplyKeeper,
    common::{add_coin, sub_coin},
    error::ContractError,
};
use tracing::info;

use super::{DexKeeper, MODULE_NAME};
use crate::{
    context::LedgerContext,
    state::{TokenPair, WithdrawInfo},
    withdraw_queue::WithdrawQueue,
};

impl<S: SupplyKeeper> DexKeeper<S> {
    /// Moves `amount` from the owner into custody and adds it to the pair's deposit.
    pub fn deposit(
        &self,
        ctx: &mut LedgerContext,
        product: &str,
        from: &Addr,
        amount: Coin,
    ) -> Result<(), ContractError> {
        let mut token_pair = self.owned_token_pair(ctx, product, from, &amount)?;

        self.supply_keeper
            .send_coins_from_account_to_module(
                ctx.storage,
                from,
                MODULE_NAME,
                std::slice::from_ref(&amount),
            )
            .map_err(|err| ContractError::InsufficientFunds {
                msg: format!("failed to deposit {amount} for {product}: {err}"),
            })?;

        token_pair.deposits = add_coin(&token_pair.deposits, &amount)?;
        self.update_token_pair(ctx, product, &token_pair)?;

        info!(product, owner = %from, amount = %amount, "deposit received");
        Ok(())
    }

    /// Queues `amount` of the pair's deposit for return to the owner after the
    /// withdraw period. The funds stay in custody until [`Self::complete_withdraw`].
    pub fn withdraw(
        &self,
        ctx: &mut LedgerContext,
        product: &str,
        to: &Addr,
        amount: Coin,
    ) -> Result<(), ContractError> {
        let mut token_pair = self.owned_token_pair(ctx, product, to, &amount)?;
        ensure!(
            token_pair.deposits.amount >= amount.amount,
            ContractError::InsufficientFunds {
                msg: format!(
                    "withdrawal of {amount} exceeds the {} deposited for {product}",
                    token_pair.deposits
                ),
            }
        );

        let withdraw_period = self.get_params(ctx.storage)?.withdraw_period;
        let complete_time = withdraw_period.after(&ctx.block.time)?;
        let withdraw_info =
            WithdrawQueue.schedule(ctx.storage, to, amount.clone(), complete_time)?;

        token_pair.deposits = sub_coin(&token_pair.deposits, &amount)?;
        self.update_token_pair(ctx, product, &token_pair)?;

        info!(
            product,
            owner = %to,
            amount = %amount,
            pending = %withdraw_info.deposits,
            complete_time = %withdraw_info.complete_time,
            "withdrawal scheduled"
        );
        Ok(())
    }

    /// Releases the pending withdrawal of `addr` from custody.
    pub fn complete_withdraw(
        &self,
        storage: &mut dyn Storage,
        addr: &Addr,
    ) -> Result<WithdrawInfo, ContractError> {
        let withdraw_info = WithdrawQueue
            .get(storage, addr)?
            .ok_or_else(|| ContractError::NotFound {
                msg: format!("no pending withdrawal for {addr}"),
            })?;

        self.supply_keeper.send_coins_from_module_to_account(
            storage,
            MODULE_NAME,
            &withdraw_info.owner,
            std::slice::from_ref(&withdraw_info.deposits),
        )?;
        WithdrawQueue.remove(storage, &withdraw_info);

        info!(owner = %addr, amount = %withdraw_info.deposits, "withdrawal completed");
        Ok(withdraw_info)
    }

    pub fn get_withdraw_info(
        &self,
        storage: &dyn Storage,
        addr: &Addr,
    ) -> Result<Option<WithdrawInfo>, ContractError> {
        Ok(WithdrawQueue.get(storage, addr)?)
    }

    /// Every pending withdrawal, ordered by address.
    pub fn iterate_withdraw_info(
        &self,
        storage: &dyn Storage,
    ) -> Result<Vec<WithdrawInfo>, ContractError> {
        Ok(WithdrawQueue.all(storage)?)
    }

    /// `(complete_time, owner)` of every withdrawal due at `now`, oldest first.
    pub fn matured_withdrawals(
        &self,
        storage: &dyn Storage,
        now: Timestamp,
    ) -> Result<Vec<(Timestamp, Addr)>, ContractError> {
        Ok(WithdrawQueue.matured(storage, now)?)
    }

    fn owned_token_pair(
        &self,
        ctx: &mut LedgerContext,
        product: &str,
        owner: &Addr,
        amount: &Coin,
    ) -> Result<TokenPair, ContractError> {
        let token_pair = self
            .get_token_pair(ctx, product)
            .ok_or_else(|| ContractError::UnknownProduct {
                product: product.to_string(),
            })?;
        ensure!(
            token_pair.owner == *owner,
            ContractError::NotOwner {
                address: owner.to_string(),
                product: product.to_string(),
            }
        );
        let bond_denom = self.get_params(ctx.storage)?.bond_denom;
        // Stored pairs may predate the bond denom check in `save_token_pair`.
        for expected in [&bond_denom, &token_pair.deposits.denom] {
            ensure!(
                amount.denom == *expected,
                ContractError::WrongDenom {
                    expected: expected.clone(),
                    received: amount.denom.clone(),
                }
            );
        }
        Ok(token_pair)
    }
}
