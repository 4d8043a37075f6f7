use cosmwasm_std::{ensure, Addr, Coin, Empty, Order, Storage};
use dex_std::{
    bank::{BankKeeper, SupplyKeeper},
    common::coins_to_string,
    error::ContractError,
};
use tracing::{debug, info};

use super::TokenKeeper;
use crate::{
    cache::Cache,
    context::LedgerContext,
    state::{Currency, FeeDetail, Token, TOKENS, TOKEN_NUM, USER_TOKENS},
};

impl<B: SupplyKeeper + BankKeeper> TokenKeeper<B> {
    /// Registers `token` under its symbol and indexes it by owner.
    pub fn new_token(&self, storage: &mut dyn Storage, token: &Token) -> Result<(), ContractError> {
        ensure!(
            !token.symbol.is_empty(),
            ContractError::InvalidAsset {
                asset: token.symbol.clone(),
            }
        );
        ensure!(
            !self.token_exist(storage, &token.symbol),
            ContractError::TokenExists {
                symbol: token.symbol.clone(),
            }
        );

        let token_num = self
            .get_token_num(storage)?
            .checked_add(1)
            .ok_or(ContractError::Overflow {})?;
        TOKENS
            .save(storage, &token.symbol, token)
            .map_err(ContractError::encoding)?;
        USER_TOKENS
            .save(storage, (&token.owner, token.symbol.as_str()), &Empty {})
            .map_err(ContractError::encoding)?;
        TOKEN_NUM
            .save(storage, &token_num)
            .map_err(ContractError::encoding)?;

        info!(symbol = %token.symbol, owner = %token.owner, "token issued");
        Ok(())
    }

    /// The token registered under `symbol`, with its live total supply.
    pub fn get_token_info(
        &self,
        storage: &dyn Storage,
        symbol: &str,
    ) -> Result<Option<Token>, ContractError> {
        TOKENS
            .may_load(storage, symbol)?
            .map(|token| self.with_supply(storage, token))
            .transpose()
    }

    pub fn token_exist(&self, storage: &dyn Storage, symbol: &str) -> bool {
        TOKENS.has(storage, symbol)
    }

    /// Every token in symbol order, with live total supplies.
    pub fn get_tokens_info(&self, storage: &dyn Storage) -> Result<Vec<Token>, ContractError> {
        TOKENS
            .range(storage, None, None, Order::Ascending)
            .map(|item| {
                let (_, token) = item?;
                self.with_supply(storage, token)
            })
            .collect()
    }

    /// Every token as a currency, reporting the supply it was issued with.
    pub fn get_currencies_info(
        &self,
        storage: &dyn Storage,
    ) -> Result<Vec<Currency>, ContractError> {
        TOKENS
            .range(storage, None, None, Order::Ascending)
            .map(|item| {
                let (_, token) = item?;
                Ok(Currency {
                    description: token.description,
                    symbol: token.symbol,
                    total_supply: token.original_total_supply,
                })
            })
            .collect()
    }

    /// Tokens owned by `owner`, found through the owner index.
    pub fn get_user_tokens_info(
        &self,
        storage: &dyn Storage,
        owner: &Addr,
    ) -> Result<Vec<Token>, ContractError> {
        let symbols = USER_TOKENS
            .prefix(owner)
            .keys(storage, None, None, Order::Ascending)
            .collect::<Result<Vec<String>, _>>()?;

        let mut tokens = Vec::with_capacity(symbols.len());
        for symbol in symbols {
            if let Some(token) = self.get_token_info(storage, &symbol)? {
                tokens.push(token);
            }
        }
        Ok(tokens)
    }

    /// Drops the owner-index entry only. The token record stays.
    pub fn delete_user_token(&self, storage: &mut dyn Storage, owner: &Addr, symbol: &str) {
        USER_TOKENS.remove(storage, (owner, symbol));
    }

    pub fn get_token_num(&self, storage: &dyn Storage) -> Result<u64, ContractError> {
        Ok(TOKEN_NUM.may_load(storage)?.unwrap_or_default())
    }

    /// Records a fee charged to `from` in the current block.
    pub fn add_fee_detail(
        &self,
        ctx: &mut LedgerContext,
        from: &Addr,
        fee: &[Coin],
        fee_type: &str,
    ) {
        debug!(address = %from, fee = %coins_to_string(fee), fee_type, "fee recorded");
        ctx.cache.add_fee_detail(FeeDetail {
            address: from.clone(),
            fee: fee.to_vec(),
            fee_type: fee_type.to_string(),
            timestamp: ctx.block.time,
        });
    }

    /// Fees recorded since the last [`Self::reset_cache`], oldest first.
    pub fn get_fee_detail_list(&self, cache: &Cache) -> Vec<FeeDetail> {
        cache.fee_details().to_vec()
    }

    /// Block-boundary hook for the token side of the cache.
    pub fn reset_cache(&self, cache: &mut Cache) {
        cache.reset_fee_details();
    }

    fn with_supply(&self, storage: &dyn Storage, mut token: Token) -> Result<Token, ContractError> {
        token.total_supply = self.bank.get_supply(storage, &token.symbol)?;
        Ok(token)
    }
}
