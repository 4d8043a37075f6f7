use std::collections::BTreeMap;

use cosmwasm_std::{Order, Storage};
use dex_std::{bank::SupplyKeeper, error::ContractError};
use tracing::debug;

use super::DexKeeper;
use crate::{
    cache::Cache,
    context::LedgerContext,
    state::{ProductLock, PRODUCT_LOCKS},
};

impl<S: SupplyKeeper> DexKeeper<S> {
    pub fn lock_product(
        &self,
        ctx: &mut LedgerContext,
        product: &str,
        lock: ProductLock,
    ) -> Result<(), ContractError> {
        PRODUCT_LOCKS
            .save(ctx.storage, product, &lock)
            .map_err(ContractError::encoding)?;
        debug!(product, height = lock.block_height, "product locked");
        ctx.cache.insert_product_lock(product, lock);
        Ok(())
    }

    pub fn unlock_product(&self, ctx: &mut LedgerContext, product: &str) {
        PRODUCT_LOCKS.remove(ctx.storage, product);
        ctx.cache.remove_product_lock(product);
        debug!(product, "product unlocked");
    }

    pub fn is_product_locked(&self, cache: &Cache, product: &str) -> bool {
        cache.product_locks().contains_key(product)
    }

    pub fn get_product_lock(&self, cache: &Cache, product: &str) -> Option<ProductLock> {
        cache.product_locks().get(product).cloned()
    }

    /// Reads every product lock from the store.
    pub fn load_product_locks(
        &self,
        storage: &dyn Storage,
    ) -> Result<BTreeMap<String, ProductLock>, ContractError> {
        Ok(PRODUCT_LOCKS
            .range(storage, None, None, Order::Ascending)
            .collect::<Result<BTreeMap<String, ProductLock>, _>>()?)
    }
}
