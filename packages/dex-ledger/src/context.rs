use cosmwasm_std::{BlockInfo, Storage};

use crate::cache::Cache;

/// Everything a registry or withdrawal operation touches during one state transition.
pub struct LedgerContext<'a> {
    pub storage: &'a mut dyn Storage,
    pub block: BlockInfo,
    pub cache: &'a mut Cache,
}

impl<'a> LedgerContext<'a> {
    #[inline]
    pub fn new(storage: &'a mut dyn Storage, block: BlockInfo, cache: &'a mut Cache) -> Self {
        LedgerContext {
            storage,
            block,
            cache,
        }
    }
}
