use cosmwasm_schema::cw_serde;
use cosmwasm_std::{OverflowError, OverflowOperation, Timestamp};

#[cw_serde]
#[derive(Copy, Default, Eq, PartialOrd, Ord)]
/// Represents time in milliseconds.
pub struct Milliseconds(pub u64);

impl Milliseconds {
    #[inline]
    pub fn zero() -> Milliseconds {
        Milliseconds(0)
    }

    #[inline]
    pub fn is_zero(&self) -> bool {
        self.0 == 0
    }

    #[inline]
    pub fn from_seconds(seconds: u64) -> Milliseconds {
        Milliseconds(seconds.saturating_mul(1000))
    }

    pub fn nanos(&self) -> Result<u64, OverflowError> {
        self.0
            .checked_mul(1000000)
            .ok_or(OverflowError::new(OverflowOperation::Mul))
    }

    /// The timestamp lying `self` after `time`.
    pub fn after(&self, time: &Timestamp) -> Result<Timestamp, OverflowError> {
        let nanos = time
            .nanos()
            .checked_add(self.nanos()?)
            .ok_or(OverflowError::new(OverflowOperation::Add))?;
        Ok(Timestamp::from_nanos(nanos))
    }
}

impl std::fmt::Display for Milliseconds {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}ms", self.0)
    }
}
