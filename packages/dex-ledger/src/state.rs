use cosmwasm_schema::cw_serde;
use cosmwasm_std::{Addr, Coin, Decimal, Empty, Timestamp, Uint128};
use cw_storage_plus::{Item, Map};

/// Pair records keyed by `"base_quote"`.
pub const TOKEN_PAIRS: Map<&str, TokenPair> = Map::new("pair");
/// Owner index: `owner ‖ "base_quote"` -> sentinel.
pub const USER_TOKEN_PAIRS: Map<(&Addr, &str), Empty> = Map::new("upair");
/// Highest id handed out to a pair so far.
pub const TOKEN_PAIR_NUM: Item<u64> = Item::new("pair_num");

/// Pending deposit returns keyed by owner.
pub const WITHDRAW_INFOS: Map<&Addr, WithdrawInfo> = Map::new("waddr");
/// Maturity index: `complete_time (ns, big-endian) ‖ owner` -> sentinel.
pub const WITHDRAW_TIMES: Map<(u64, &Addr), Empty> = Map::new("wtime");

/// Issued tokens keyed by symbol.
pub const TOKENS: Map<&str, Token> = Map::new("token");
/// Owner index: `owner ‖ symbol` -> sentinel.
pub const USER_TOKENS: Map<(&Addr, &str), Empty> = Map::new("utoken");
/// Number of tokens issued so far.
pub const TOKEN_NUM: Item<u64> = Item::new("token_num");

/// Locked coins per address, sorted by denom with no zero amounts.
pub const LOCKED_COINS: Map<&Addr, Vec<Coin>> = Map::new("lock");

/// Freeze markers placed on products by the matching engine.
pub const PRODUCT_LOCKS: Map<&str, ProductLock> = Map::new("product_lock");

/// Builds the registry key of a pair.
pub fn token_pair_name(base_asset_symbol: &str, quote_asset_symbol: &str) -> String {
    format!("{base_asset_symbol}_{quote_asset_symbol}")
}

#[cw_serde]
pub struct TokenPair {
    pub base_asset_symbol: String,
    pub quote_asset_symbol: String,
    pub init_price: Decimal,
    pub max_price_digit: i64,
    pub max_quantity_digit: i64,
    pub min_quantity: Decimal,
    /// Assigned on first save and never changed afterwards. Zero means unassigned.
    pub id: u64,
    pub delisting: bool,
    pub owner: Addr,
    /// Refundable collateral, always in the bond denom.
    pub deposits: Coin,
    pub block_height: u64,
}

impl TokenPair {
    pub fn name(&self) -> String {
        token_pair_name(&self.base_asset_symbol, &self.quote_asset_symbol)
    }
}

/// Sorts pairs ascending by the bytes of their `"base_quote"` name.
pub fn sort_token_pairs(token_pairs: &mut [TokenPair]) {
    token_pairs.sort_by_cached_key(|token_pair| token_pair.name().into_bytes());
}

#[cw_serde]
pub struct WithdrawInfo {
    pub owner: Addr,
    pub deposits: Coin,
    pub complete_time: Timestamp,
}

#[cw_serde]
pub struct ProductLock {
    pub block_height: u64,
    pub price: Decimal,
    pub quantity: Decimal,
    pub buy_executed: Decimal,
    pub sell_executed: Decimal,
}

#[cw_serde]
#[derive(Copy, Eq)]
pub enum LockCoinsType {
    /// The locked amount is tracked in the ledger.
    Quantity,
    /// Funds move to custody but the reservation is tracked by the caller, e.g. fees.
    Fee,
}

#[cw_serde]
pub struct AccCoins {
    pub acc: Addr,
    pub coins: Vec<Coin>,
}

#[cw_serde]
pub struct CoinInfo {
    pub denom: String,
    pub available: Uint128,
    pub locked: Uint128,
}

#[cw_serde]
pub struct Token {
    pub description: String,
    /// Registry key, the denom the token circulates under.
    pub symbol: String,
    pub original_symbol: String,
    pub whole_name: String,
    pub original_total_supply: Uint128,
    /// Filled from the live supply on every read. Whatever is stored here is ignored.
    pub total_supply: Uint128,
    pub owner: Addr,
    pub mintable: bool,
}

#[cw_serde]
pub struct Currency {
    pub description: String,
    pub symbol: String,
    pub total_supply: Uint128,
}

/// A fee charged during the current block, kept for off-chain consumers.
#[cw_serde]
pub struct FeeDetail {
    pub address: Addr,
    pub fee: Vec<Coin>,
    pub fee_type: String,
    pub timestamp: Timestamp,
}
