use crate::{bank::SupplyKeeper, error::ContractError};
use cosmwasm_std::{ensure, Storage};

/// A denom is usable once it is non-empty and has a circulating supply.
pub fn validate_denom(
    storage: &dyn Storage,
    supply: &dyn SupplyKeeper,
    denom: &str,
) -> Result<(), ContractError> {
    let non_empty_denom = !denom.is_empty();
    ensure!(
        non_empty_denom,
        ContractError::InvalidAsset {
            asset: denom.to_string()
        }
    );
    let potential_supply = supply.get_supply(storage, denom)?;
    ensure!(
        !potential_supply.is_zero(),
        ContractError::InvalidAsset {
            asset: denom.to_string()
        }
    );

    Ok(())
}
