mod product_lock;
mod registry;
mod withdraw;

use cosmwasm_std::{ensure, Storage};
use dex_std::{bank::SupplyKeeper, common::denom::validate_denom, error::ContractError};

use crate::{
    params::{Params, PARAMS},
    state::{TOKEN_PAIRS, WITHDRAW_INFOS},
};

/// Custody account holding pair deposits.
pub const MODULE_NAME: &str = "dex";

/// Token-pair registry and deposit withdrawal queue.
pub struct DexKeeper<S> {
    supply_keeper: S,
}

impl<S: SupplyKeeper> DexKeeper<S> {
    pub fn new(supply_keeper: S) -> Self {
        DexKeeper { supply_keeper }
    }

    pub fn supply_keeper(&self) -> &S {
        &self.supply_keeper
    }

    /// Stored params, or the defaults before any were set.
    pub fn get_params(&self, storage: &dyn Storage) -> Result<Params, ContractError> {
        Ok(PARAMS.may_load(storage)?.unwrap_or_default())
    }

    /// Validates and stores `params`.
    ///
    /// Deposits are kept in the bond denom, so it cannot change while any pair or
    /// pending withdrawal exists.
    pub fn set_params(
        &self,
        storage: &mut dyn Storage,
        params: &Params,
    ) -> Result<(), ContractError> {
        params.validate()?;
        validate_denom(storage, &self.supply_keeper, &params.bond_denom)?;

        let bond_denom = self.get_params(storage)?.bond_denom;
        if bond_denom != params.bond_denom {
            ensure!(
                TOKEN_PAIRS.is_empty(storage) && WITHDRAW_INFOS.is_empty(storage),
                ContractError::InvalidParams {
                    msg: format!(
                        "bond denom cannot change from {bond_denom} to {} while deposits exist",
                        params.bond_denom
                    ),
                }
            );
        }

        PARAMS
            .save(storage, params)
            .map_err(ContractError::encoding)
    }
}
