use cosmwasm_std::{ensure, Addr, Empty, Order, Storage};
use dex_std::{bank::SupplyKeeper, error::ContractError};
use tracing::{debug, info};

use super::DexKeeper;
use crate::{
    cache::Cache,
    context::LedgerContext,
    state::{sort_token_pairs, TokenPair, TOKEN_PAIRS, TOKEN_PAIR_NUM, USER_TOKEN_PAIRS},
};

impl<S: SupplyKeeper> DexKeeper<S> {
    /// Persists a pair, assigning the next id when it has none yet.
    ///
    /// The deposit must be held in the bond denom.
    pub fn save_token_pair(
        &self,
        ctx: &mut LedgerContext,
        token_pair: &mut TokenPair,
    ) -> Result<(), ContractError> {
        let bond_denom = self.get_params(ctx.storage)?.bond_denom;
        ensure!(
            token_pair.deposits.denom == bond_denom,
            ContractError::WrongDenom {
                expected: bond_denom,
                received: token_pair.deposits.denom.clone(),
            }
        );

        let token_pair_num = self.get_token_pair_num(ctx.storage)?;
        if token_pair.id == 0 {
            token_pair.id = token_pair_num.checked_add(1).ok_or(ContractError::Overflow {})?;
        }
        // Pairs imported with an id keep it; the counter only ever moves forward.
        TOKEN_PAIR_NUM
            .save(ctx.storage, &token_pair_num.max(token_pair.id))
            .map_err(ContractError::encoding)?;

        let product = token_pair.name();
        TOKEN_PAIRS
            .save(ctx.storage, &product, token_pair)
            .map_err(ContractError::encoding)?;
        USER_TOKEN_PAIRS
            .save(
                ctx.storage,
                (&token_pair.owner, product.as_str()),
                &Empty {},
            )
            .map_err(ContractError::encoding)?;

        ctx.cache.add_new_token_pair(token_pair.clone());
        ctx.cache.add_token_pair(token_pair.clone());
        Ok(())
    }

    /// Looks the pair up in the cache first, then in the store.
    pub fn get_token_pair(&self, ctx: &mut LedgerContext, product: &str) -> Option<TokenPair> {
        if let Some(token_pair) = ctx.cache.get_token_pair(product) {
            return Some(token_pair.clone());
        }

        let token_pair = self.get_token_pair_from_store(ctx.storage, product)?;
        ctx.cache.add_token_pair(token_pair.clone());
        Some(token_pair)
    }

    /// Reads the pair straight from the store. Undecodable records count as absent.
    pub fn get_token_pair_from_store(
        &self,
        storage: &dyn Storage,
        product: &str,
    ) -> Option<TokenPair> {
        match TOKEN_PAIRS.may_load(storage, product) {
            Ok(token_pair) => token_pair,
            Err(err) => {
                info!(product, error = %err, "decoding of token pair failed");
                None
            }
        }
    }

    /// All pairs, served from the cache when it holds any.
    pub fn get_token_pairs(&self, ctx: &LedgerContext) -> Vec<TokenPair> {
        if ctx.cache.token_pair_count() > 0 {
            return ctx.cache.get_all_token_pairs();
        }
        self.get_token_pairs_from_store(ctx.storage)
    }

    pub fn get_token_pairs_from_store(&self, storage: &dyn Storage) -> Vec<TokenPair> {
        TOKEN_PAIRS
            .range(storage, None, None, Order::Ascending)
            .filter_map(|item| match item {
                Ok((_, token_pair)) => Some(token_pair),
                Err(err) => {
                    info!(error = %err, "skipping undecodable token pair");
                    None
                }
            })
            .collect()
    }

    /// Pairs owned by `owner`, found through the owner index.
    pub fn get_user_token_pairs(
        &self,
        storage: &dyn Storage,
        owner: &Addr,
    ) -> Result<Vec<TokenPair>, ContractError> {
        let products = USER_TOKEN_PAIRS
            .prefix(owner)
            .keys(storage, None, None, Order::Ascending)
            .collect::<Result<Vec<String>, _>>()?;

        Ok(products
            .iter()
            .filter_map(|product| self.get_token_pair_from_store(storage, product))
            .collect())
    }

    /// Overwrites the stored pair. The owner index is left alone.
    pub fn update_token_pair(
        &self,
        ctx: &mut LedgerContext,
        product: &str,
        token_pair: &TokenPair,
    ) -> Result<(), ContractError> {
        TOKEN_PAIRS
            .save(ctx.storage, product, token_pair)
            .map_err(ContractError::encoding)?;
        ctx.cache.add_token_pair(token_pair.clone());
        Ok(())
    }

    pub fn delete_token_pair_by_name(&self, ctx: &mut LedgerContext, owner: &Addr, product: &str) {
        TOKEN_PAIRS.remove(ctx.storage, product);
        ctx.cache.delete_token_pair_by_name(product);
        self.delete_user_token_pair(ctx.storage, owner, product);
    }

    pub fn delete_user_token_pair(&self, storage: &mut dyn Storage, owner: &Addr, product: &str) {
        USER_TOKEN_PAIRS.remove(storage, (owner, product));
    }

    /// Moves the owner-index entry of `product` from `from` to `to`.
    pub fn update_user_token_pair(
        &self,
        storage: &mut dyn Storage,
        product: &str,
        from: &Addr,
        to: &Addr,
    ) -> Result<(), ContractError> {
        USER_TOKEN_PAIRS.remove(storage, (from, product));
        USER_TOKEN_PAIRS
            .save(storage, (to, product), &Empty {})
            .map_err(ContractError::encoding)
    }

    /// Hands `product` over to `to`.
    ///
    /// Any deposit is first queued for return to `from`; the pair then carries the
    /// configured default deposit.
    pub fn transfer_ownership(
        &self,
        ctx: &mut LedgerContext,
        product: &str,
        from: &Addr,
        to: &Addr,
    ) -> Result<(), ContractError> {
        let token_pair = self
            .get_token_pair(ctx, product)
            .ok_or_else(|| ContractError::UnknownProduct {
                product: product.to_string(),
            })?;
        ensure!(
            token_pair.owner == *from,
            ContractError::NotOwner {
                address: from.to_string(),
                product: product.to_string(),
            }
        );

        if !token_pair.deposits.amount.is_zero() {
            self.withdraw(ctx, product, from, token_pair.deposits.clone())?;
        }

        let mut token_pair = self
            .get_token_pair(ctx, product)
            .ok_or_else(|| ContractError::UnknownProduct {
                product: product.to_string(),
            })?;
        token_pair.owner = to.clone();
        token_pair.deposits = self.get_params(ctx.storage)?.token_pair_deposit;
        self.update_token_pair(ctx, product, &token_pair)?;
        self.update_user_token_pair(ctx.storage, product, from, to)?;

        info!(product, from = %from, to = %to, "token pair ownership transferred");
        Ok(())
    }

    /// Whether `product` is being delisted. Unknown products are an error.
    pub fn check_token_pair_under_dex_delist(
        &self,
        ctx: &mut LedgerContext,
        product: &str,
    ) -> Result<bool, ContractError> {
        self.get_token_pair(ctx, product)
            .map(|token_pair| token_pair.delisting)
            .ok_or_else(|| ContractError::UnknownProduct {
                product: product.to_string(),
            })
    }

    /// Pairs saved since the last cache reset.
    pub fn get_new_token_pairs(&self, cache: &Cache) -> Vec<TokenPair> {
        cache.get_new_token_pairs().to_vec()
    }

    /// Block-boundary hook. Clears the pair cache and refills it from the store.
    pub fn reset_cache(&self, ctx: &mut LedgerContext) -> Result<(), ContractError> {
        ctx.cache.reset();

        if ctx.cache.product_locks().is_empty() {
            let product_locks = self.load_product_locks(ctx.storage)?;
            ctx.cache.set_product_locks(product_locks);
        }
        if ctx.cache.token_pair_count() == 0 {
            let token_pairs = self.get_token_pairs(ctx);
            ctx.cache.prepare_token_pairs(token_pairs);
        }

        debug!(
            height = ctx.block.height,
            token_pairs = ctx.cache.token_pair_count(),
            product_locks = ctx.cache.product_locks().len(),
            "cache reset"
        );
        Ok(())
    }

    /// All pairs, ascending by name bytes.
    pub fn get_token_pairs_ordered(&self, ctx: &LedgerContext) -> Vec<TokenPair> {
        let mut token_pairs = self.get_token_pairs(ctx);
        sort_token_pairs(&mut token_pairs);
        token_pairs
    }

    /// Sorts `products` ascending by name bytes.
    ///
    /// Products with no registered pair are dropped, so the vector may shrink.
    pub fn sort_products(&self, ctx: &mut LedgerContext, products: &mut Vec<String>) {
        let mut token_pairs: Vec<TokenPair> = products
            .iter()
            .filter_map(|product| self.get_token_pair(ctx, product))
            .collect();
        sort_token_pairs(&mut token_pairs);

        *products = token_pairs.iter().map(TokenPair::name).collect();
    }

    /// True once a pair was added since the last cache reset.
    pub fn is_token_pair_changed(&self, cache: &Cache) -> bool {
        cache.token_pair_changed()
    }

    pub fn get_token_pair_num(&self, storage: &dyn Storage) -> Result<u64, ContractError> {
        Ok(TOKEN_PAIR_NUM.may_load(storage)?.unwrap_or_default())
    }
}
