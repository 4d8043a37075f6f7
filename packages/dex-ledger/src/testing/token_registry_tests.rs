use cosmwasm_std::{
    coin, coins,
    testing::{mock_env, MockStorage},
    Addr, Uint128,
};
use dex_std::{
    error::ContractError,
    testing::{MockBank, MOCK_NEW_OWNER, MOCK_OWNER, MOCK_TRADER},
};

use super::mock::{mock_token, token_keeper, MockLedger, MOCK_BALANCE};
use crate::{
    cache::Cache,
    state::{Currency, FeeDetail},
};

#[test]
fn test_new_token_indexes_owner_and_counts() {
    let (mut storage, keeper) = token_keeper();
    let owner = Addr::unchecked(MOCK_OWNER);
    for symbol in ["xyz", "abc"] {
        keeper
            .new_token(&mut storage, &mock_token(symbol, MOCK_OWNER))
            .unwrap();
    }
    keeper
        .new_token(&mut storage, &mock_token("ltc", MOCK_NEW_OWNER))
        .unwrap();

    assert_eq!(3, keeper.get_token_num(&storage).unwrap());
    assert!(keeper.token_exist(&storage, "xyz"));
    assert!(!keeper.token_exist(&storage, "btc"));

    let symbols: Vec<String> = keeper
        .get_user_tokens_info(&storage, &owner)
        .unwrap()
        .into_iter()
        .map(|token| token.symbol)
        .collect();
    assert_eq!(vec!["abc", "xyz"], symbols);

    keeper.delete_user_token(&mut storage, &owner, "abc");
    assert_eq!(
        1,
        keeper.get_user_tokens_info(&storage, &owner).unwrap().len()
    );
    // Only the index entry goes away.
    assert!(keeper.token_exist(&storage, "abc"));
    assert_eq!(3, keeper.get_tokens_info(&storage).unwrap().len());
}

#[test]
fn test_new_token_rejects_duplicates() {
    let (mut storage, keeper) = token_keeper();
    keeper
        .new_token(&mut storage, &mock_token("xyz", MOCK_OWNER))
        .unwrap();

    assert_eq!(
        ContractError::TokenExists {
            symbol: "xyz".to_string()
        },
        keeper
            .new_token(&mut storage, &mock_token("xyz", MOCK_TRADER))
            .unwrap_err()
    );
    assert_eq!(
        ContractError::InvalidAsset {
            asset: "".to_string()
        },
        keeper
            .new_token(&mut storage, &mock_token("", MOCK_OWNER))
            .unwrap_err()
    );
    assert_eq!(1, keeper.get_token_num(&storage).unwrap());
    assert!(keeper
        .get_user_tokens_info(&storage, &Addr::unchecked(MOCK_TRADER))
        .unwrap()
        .is_empty());
}

#[test]
fn test_token_info_reports_live_supply() {
    let (mut storage, keeper) = token_keeper();
    keeper
        .new_token(&mut storage, &mock_token("xyz", MOCK_OWNER))
        .unwrap();
    MockBank
        .set_balance(
            &mut storage,
            &Addr::unchecked(MOCK_OWNER),
            &coins(700, "xyz"),
        )
        .unwrap();
    MockBank
        .set_balance(
            &mut storage,
            &Addr::unchecked(MOCK_TRADER),
            &coins(50, "xyz"),
        )
        .unwrap();

    let xyz = keeper.get_token_info(&storage, "xyz").unwrap().unwrap();
    assert_eq!(Uint128::new(750), xyz.total_supply);
    assert_eq!(Uint128::new(MOCK_BALANCE), xyz.original_total_supply);
    assert_eq!(vec![xyz], keeper.get_tokens_info(&storage).unwrap());
    assert_eq!(None, keeper.get_token_info(&storage, "btc").unwrap());

    assert_eq!(
        vec![Currency {
            description: "xyz token".to_string(),
            symbol: "xyz".to_string(),
            total_supply: Uint128::new(MOCK_BALANCE),
        }],
        keeper.get_currencies_info(&storage).unwrap()
    );
}

#[test]
fn test_fee_details_are_block_scoped() {
    let (_, keeper) = token_keeper();
    let mut ledger = MockLedger {
        storage: MockStorage::new(),
        cache: Cache::new(),
        block: mock_env().block,
    };
    let trader = Addr::unchecked(MOCK_TRADER);

    keeper.add_fee_detail(
        &mut ledger.ctx(),
        &trader,
        &coins(2, "okt"),
        "order_new",
    );
    keeper.add_fee_detail(
        &mut ledger.ctx(),
        &trader,
        &[coin(1, "btc"), coin(3, "okt")],
        "deal",
    );
    let fee_details = keeper.get_fee_detail_list(&ledger.cache);
    assert_eq!(2, fee_details.len());
    assert_eq!(
        FeeDetail {
            address: trader.clone(),
            fee: coins(2, "okt"),
            fee_type: "order_new".to_string(),
            timestamp: ledger.block.time,
        },
        fee_details[0]
    );

    // The pair cache reset leaves them alone, the token reset clears them.
    ledger.cache.reset();
    assert_eq!(2, keeper.get_fee_detail_list(&ledger.cache).len());
    keeper.reset_cache(&mut ledger.cache);
    assert!(keeper.get_fee_detail_list(&ledger.cache).is_empty());
}
