use std::collections::BTreeMap;

use crate::state::{FeeDetail, ProductLock, TokenPair};

/// Block-scoped mirror of the registry.
///
/// Owned by the block driver and handed to every operation through
/// [`crate::context::LedgerContext`]. [`crate::dex::DexKeeper::reset_cache`] must run at
/// the start of each block.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Cache {
    token_pair_map: BTreeMap<String, TokenPair>,
    new_token_pairs: Vec<TokenPair>,
    token_pair_changed: bool,
    product_locks: BTreeMap<String, ProductLock>,
    fee_details: Vec<FeeDetail>,
}

impl Cache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drops every cached pair and the per-block change tracking. Product locks and fee
    /// details survive; the token keeper clears the latter.
    pub fn reset(&mut self) {
        self.token_pair_map.clear();
        self.new_token_pairs.clear();
        self.token_pair_changed = false;
    }

    pub fn get_token_pair(&self, product: &str) -> Option<&TokenPair> {
        self.token_pair_map.get(product)
    }

    pub fn get_all_token_pairs(&self) -> Vec<TokenPair> {
        self.token_pair_map.values().cloned().collect()
    }

    pub fn add_token_pair(&mut self, token_pair: TokenPair) {
        self.token_pair_map.insert(token_pair.name(), token_pair);
    }

    pub fn add_new_token_pair(&mut self, token_pair: TokenPair) {
        self.new_token_pairs.push(token_pair);
        self.token_pair_changed = true;
    }

    pub fn delete_token_pair_by_name(&mut self, product: &str) {
        self.token_pair_map.remove(product);
    }

    /// Replaces the pair mirror with `token_pairs`.
    pub fn prepare_token_pairs(&mut self, token_pairs: Vec<TokenPair>) {
        self.token_pair_map = token_pairs
            .into_iter()
            .map(|token_pair| (token_pair.name(), token_pair))
            .collect();
    }

    pub fn token_pair_count(&self) -> usize {
        self.token_pair_map.len()
    }

    pub fn get_new_token_pairs(&self) -> &[TokenPair] {
        &self.new_token_pairs
    }

    pub fn token_pair_changed(&self) -> bool {
        self.token_pair_changed
    }

    pub fn product_locks(&self) -> &BTreeMap<String, ProductLock> {
        &self.product_locks
    }

    pub fn set_product_locks(&mut self, product_locks: BTreeMap<String, ProductLock>) {
        self.product_locks = product_locks;
    }

    pub fn insert_product_lock(&mut self, product: &str, lock: ProductLock) {
        self.product_locks.insert(product.to_string(), lock);
    }

    pub fn remove_product_lock(&mut self, product: &str) {
        self.product_locks.remove(product);
    }

    pub fn add_fee_detail(&mut self, fee_detail: FeeDetail) {
        self.fee_details.push(fee_detail);
    }

    pub fn fee_details(&self) -> &[FeeDetail] {
        &self.fee_details
    }

    pub fn reset_fee_details(&mut self) {
        self.fee_details.clear();
    }
}
