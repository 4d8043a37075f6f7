use cosmwasm_std::{
    coin,
    testing::{mock_env, MockStorage},
    Addr, BlockInfo, Decimal, Storage, Uint128,
};
use dex_std::testing::{MockBank, MOCK_BOND_DENOM, MOCK_NEW_OWNER, MOCK_OWNER, MOCK_TRADER};

use crate::{
    cache::Cache,
    context::LedgerContext,
    dex::DexKeeper,
    params::Params,
    state::{Token, TokenPair},
    token::TokenKeeper,
};

pub const MOCK_BALANCE: u128 = 1_000;

pub struct MockLedger {
    pub storage: MockStorage,
    pub cache: Cache,
    pub block: BlockInfo,
}

impl MockLedger {
    pub fn ctx(&mut self) -> LedgerContext<'_> {
        LedgerContext::new(&mut self.storage, self.block.clone(), &mut self.cache)
    }
}

/// Ledger with default params and `MOCK_BALANCE` of the bond denom minted to the owner,
/// the new owner and the trader.
pub fn proper_initialization() -> (MockLedger, DexKeeper<MockBank>) {
    let mut storage = MockStorage::new();
    for addr in [MOCK_OWNER, MOCK_NEW_OWNER, MOCK_TRADER] {
        MockBank
            .set_balance(
                &mut storage,
                &Addr::unchecked(addr),
                &[coin(MOCK_BALANCE, MOCK_BOND_DENOM)],
            )
            .unwrap();
    }

    let keeper = DexKeeper::new(MockBank);
    keeper.set_params(&mut storage, &Params::default()).unwrap();

    let ledger = MockLedger {
        storage,
        cache: Cache::new(),
        block: mock_env().block,
    };
    (ledger, keeper)
}

pub fn token_keeper() -> (MockStorage, TokenKeeper<MockBank>) {
    (MockStorage::new(), TokenKeeper::new(MockBank))
}

pub fn mock_token(symbol: &str, owner: &str) -> Token {
    Token {
        description: format!("{symbol} token"),
        symbol: symbol.to_string(),
        original_symbol: symbol.to_string(),
        whole_name: symbol.to_uppercase(),
        original_total_supply: Uint128::new(MOCK_BALANCE),
        total_supply: Uint128::zero(),
        owner: Addr::unchecked(owner),
        mintable: false,
    }
}

pub fn mock_token_pair(base: &str, quote: &str, owner: &str) -> TokenPair {
    TokenPair {
        base_asset_symbol: base.to_string(),
        quote_asset_symbol: quote.to_string(),
        init_price: Decimal::percent(1_000),
        max_price_digit: 8,
        max_quantity_digit: 8,
        min_quantity: Decimal::permille(1),
        id: 0,
        delisting: false,
        owner: Addr::unchecked(owner),
        deposits: coin(0, MOCK_BOND_DENOM),
        block_height: 0,
    }
}

/// Saves a fresh pair owned by `owner` and returns it with its assigned id.
pub fn add_token_pair(
    ledger: &mut MockLedger,
    keeper: &DexKeeper<MockBank>,
    base: &str,
    quote: &str,
    owner: &str,
) -> TokenPair {
    let mut token_pair = mock_token_pair(base, quote, owner);
    token_pair.block_height = ledger.block.height;
    keeper
        .save_token_pair(&mut ledger.ctx(), &mut token_pair)
        .unwrap();
    token_pair
}

pub fn bond_balance(storage: &dyn Storage, addr: &str) -> u128 {
    MockBank.balance(storage, addr, MOCK_BOND_DENOM).u128()
}
