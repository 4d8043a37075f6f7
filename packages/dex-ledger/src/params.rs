use cosmwasm_schema::cw_serde;
use cosmwasm_std::{ensure, Coin, Uint128};
use cw_storage_plus::Item;
use dex_std::{common::Milliseconds, error::ContractError};

pub const PARAMS: Item<Params> = Item::new("dex_params");

pub const DEFAULT_BOND_DENOM: &str = "okt";
/// Three days.
pub const DEFAULT_WITHDRAW_PERIOD: Milliseconds = Milliseconds(259_200_000);

#[cw_serde]
pub struct Params {
    /// Delay between a withdrawal request and the release of the funds.
    pub withdraw_period: Milliseconds,
    /// Deposit a pair carries after its ownership is transferred.
    pub token_pair_deposit: Coin,
    /// The only denom accepted for deposits.
    pub bond_denom: String,
}

impl Default for Params {
    fn default() -> Self {
        Params {
            withdraw_period: DEFAULT_WITHDRAW_PERIOD,
            token_pair_deposit: Coin {
                denom: DEFAULT_BOND_DENOM.to_string(),
                amount: Uint128::zero(),
            },
            bond_denom: DEFAULT_BOND_DENOM.to_string(),
        }
    }
}

impl Params {
    pub fn validate(&self) -> Result<(), ContractError> {
        ensure!(
            !self.bond_denom.is_empty(),
            ContractError::InvalidParams {
                msg: "bond denom cannot be empty".to_string()
            }
        );
        ensure!(
            self.token_pair_deposit.denom == self.bond_denom,
            ContractError::InvalidParams {
                msg: format!(
                    "token pair deposit must be in {}, got {}",
                    self.bond_denom, self.token_pair_deposit.denom
                )
            }
        );
        ensure!(
            !self.withdraw_period.is_zero(),
            ContractError::InvalidParams {
                msg: "withdraw period must be positive".to_string()
            }
        );
        Ok(())
    }
}
