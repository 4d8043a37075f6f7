//! Write-buffered view over a [`Storage`], committed only when the wrapped action succeeds.

use std::collections::BTreeMap;
use std::ops::Bound;

use cosmwasm_std::{Order, Record, Storage};

use crate::error::ContractError;

/// Runs `action` against a buffered view of `base`.
///
/// Every write performed by `action` lands in `base` if and only if it returns `Ok`.
pub fn transactional<F, T>(base: &mut dyn Storage, action: F) -> Result<T, ContractError>
where
    F: FnOnce(&mut dyn Storage) -> Result<T, ContractError>,
{
    let (res, ops) = {
        let mut cache = StorageTransaction::new(&*base);
        let res = action(&mut cache)?;
        (res, cache.prepare())
    };
    ops.commit(base);
    Ok(res)
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Delta {
    Set { value: Vec<u8> },
    Delete,
}

pub struct StorageTransaction<'a> {
    storage: &'a dyn Storage,
    local_state: BTreeMap<Vec<u8>, Delta>,
}

impl<'a> StorageTransaction<'a> {
    pub fn new(storage: &'a dyn Storage) -> Self {
        StorageTransaction {
            storage,
            local_state: BTreeMap::new(),
        }
    }

    /// Detaches the pending writes from the borrowed base store.
    pub fn prepare(self) -> RepLog {
        RepLog {
            ops: self.local_state.into_iter().collect(),
        }
    }
}

impl<'a> Storage for StorageTransaction<'a> {
    fn get(&self, key: &[u8]) -> Option<Vec<u8>> {
        match self.local_state.get(key) {
            Some(Delta::Set { value }) => Some(value.clone()),
            Some(Delta::Delete) => None,
            None => self.storage.get(key),
        }
    }

    fn range<'b>(
        &'b self,
        start: Option<&[u8]>,
        end: Option<&[u8]>,
        order: Order,
    ) -> Box<dyn Iterator<Item = Record> + 'b> {
        if let (Some(start), Some(end)) = (start, end) {
            if start >= end {
                return Box::new(std::iter::empty());
            }
        }

        let mut merged: BTreeMap<Vec<u8>, Vec<u8>> =
            self.storage.range(start, end, Order::Ascending).collect();
        let bounds = (
            start.map_or(Bound::Unbounded, |s| Bound::Included(s.to_vec())),
            end.map_or(Bound::Unbounded, |e| Bound::Excluded(e.to_vec())),
        );
        for (key, delta) in self.local_state.range(bounds) {
            match delta {
                Delta::Set { value } => {
                    merged.insert(key.clone(), value.clone());
                }
                Delta::Delete => {
                    merged.remove(key);
                }
            }
        }

        let records: Vec<Record> = merged.into_iter().collect();
        match order {
            Order::Ascending => Box::new(records.into_iter()),
            Order::Descending => Box::new(records.into_iter().rev()),
        }
    }

    fn set(&mut self, key: &[u8], value: &[u8]) {
        self.local_state.insert(
            key.to_vec(),
            Delta::Set {
                value: value.to_vec(),
            },
        );
    }

    fn remove(&mut self, key: &[u8]) {
        self.local_state.insert(key.to_vec(), Delta::Delete);
    }
}

/// Pending writes of a finished transaction.
pub struct RepLog {
    ops: Vec<(Vec<u8>, Delta)>,
}

impl RepLog {
    pub fn commit(self, storage: &mut dyn Storage) {
        for (key, delta) in self.ops {
            match delta {
                Delta::Set { value } => storage.set(&key, &value),
                Delta::Delete => storage.remove(&key),
            }
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use cosmwasm_std::testing::MockStorage;

    fn seeded() -> MockStorage {
        let mut storage = MockStorage::new();
        storage.set(b"a", b"1");
        storage.set(b"b", b"2");
        storage.set(b"c", b"3");
        storage
    }

    #[test]
    fn test_commit_on_success() {
        let mut storage = seeded();
        transactional(&mut storage, |tx| {
            tx.set(b"d", b"4");
            tx.remove(b"a");
            Ok(())
        })
        .unwrap();

        assert_eq!(None, storage.get(b"a"));
        assert_eq!(Some(b"4".to_vec()), storage.get(b"d"));
    }

    #[test]
    fn test_discard_on_error() {
        let mut storage = seeded();
        let err = transactional(&mut storage, |tx| -> Result<(), ContractError> {
            tx.set(b"d", b"4");
            tx.remove(b"a");
            Err(ContractError::NotFound {
                msg: "boom".to_string(),
            })
        })
        .unwrap_err();

        assert_eq!(
            ContractError::NotFound {
                msg: "boom".to_string()
            },
            err
        );
        assert_eq!(Some(b"1".to_vec()), storage.get(b"a"));
        assert_eq!(None, storage.get(b"d"));
    }

    #[test]
    fn test_range_merges_pending_writes() {
        let storage = seeded();
        let mut tx = StorageTransaction::new(&storage);
        tx.set(b"bb", b"x");
        tx.remove(b"c");
        tx.set(b"a", b"9");

        let keys: Vec<Vec<u8>> = tx
            .range(None, None, Order::Ascending)
            .map(|(k, _)| k)
            .collect();
        assert_eq!(vec![b"a".to_vec(), b"b".to_vec(), b"bb".to_vec()], keys);

        let bounded: Vec<Record> = tx
            .range(
                Some(b"b".as_slice()),
                Some(b"c".as_slice()),
                Order::Descending,
            )
            .collect();
        assert_eq!(
            vec![
                (b"bb".to_vec(), b"x".to_vec()),
                (b"b".to_vec(), b"2".to_vec())
            ],
            bounded
        );
        assert_eq!(Some(b"9".to_vec()), tx.get(b"a"));
        let inverted = tx.range(Some(b"c".as_slice()), Some(b"a".as_slice()), Order::Ascending);
        assert_eq!(0, inverted.count());
    }
}
