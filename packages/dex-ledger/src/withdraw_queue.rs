use cosmwasm_std::{Addr, Coin, Empty, Order, StdResult, Storage, Timestamp};
use cw_storage_plus::PrefixBound;
use dex_std::{common::add_coin, error::ContractError};

use crate::state::{WithdrawInfo, WITHDRAW_INFOS, WITHDRAW_TIMES};

/// Pending deposit returns, reachable by owner and by maturity.
///
/// Each record has exactly one entry in the maturity index, keyed by its current
/// completion time. Because the index key starts with the big-endian nanosecond
/// timestamp, ascending iteration is chronological, ties broken by owner bytes.
#[derive(Debug, Default, Clone, Copy)]
pub struct WithdrawQueue;

impl WithdrawQueue {
    pub fn get(&self, storage: &dyn Storage, owner: &Addr) -> StdResult<Option<WithdrawInfo>> {
        WITHDRAW_INFOS.may_load(storage, owner)
    }

    /// Adds `amount` to the owner's pending record, creating it if needed, and moves
    /// its maturity to `complete_time`.
    pub fn schedule(
        &self,
        storage: &mut dyn Storage,
        owner: &Addr,
        amount: Coin,
        complete_time: Timestamp,
    ) -> Result<WithdrawInfo, ContractError> {
        let withdraw_info = match self.get(storage, owner)? {
            Some(mut pending) => {
                WITHDRAW_TIMES.remove(storage, (pending.complete_time.nanos(), owner));
                pending.deposits = add_coin(&pending.deposits, &amount)?;
                pending.complete_time = complete_time;
                pending
            }
            None => WithdrawInfo {
                owner: owner.clone(),
                deposits: amount,
                complete_time,
            },
        };

        WITHDRAW_INFOS
            .save(storage, owner, &withdraw_info)
            .map_err(ContractError::encoding)?;
        WITHDRAW_TIMES
            .save(storage, (complete_time.nanos(), owner), &Empty {})
            .map_err(ContractError::encoding)?;
        Ok(withdraw_info)
    }

    /// Deletes the owner's record together with its maturity entry.
    pub fn remove(&self, storage: &mut dyn Storage, withdraw_info: &WithdrawInfo) {
        WITHDRAW_INFOS.remove(storage, &withdraw_info.owner);
        WITHDRAW_TIMES.remove(
            storage,
            (withdraw_info.complete_time.nanos(), &withdraw_info.owner),
        );
    }

    /// Every `(complete_time, owner)` with `complete_time <= now`, oldest first.
    pub fn matured(
        &self,
        storage: &dyn Storage,
        now: Timestamp,
    ) -> StdResult<Vec<(Timestamp, Addr)>> {
        WITHDRAW_TIMES
            .prefix_range(
                storage,
                None,
                Some(PrefixBound::inclusive(now.nanos())),
                Order::Ascending,
            )
            .map(|item| {
                let ((nanos, owner), _) = item?;
                Ok((Timestamp::from_nanos(nanos), owner))
            })
            .collect()
    }

    /// All pending records in owner order.
    pub fn all(&self, storage: &dyn Storage) -> StdResult<Vec<WithdrawInfo>> {
        WITHDRAW_INFOS
            .range(storage, None, None, Order::Ascending)
            .map(|item| item.map(|(_, withdraw_info)| withdraw_info))
            .collect()
    }
}
