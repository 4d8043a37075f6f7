pub mod cache;
pub mod context;
pub mod dex;
pub mod params;
pub mod state;
pub mod token;
pub mod withdraw_queue;

#[cfg(test)]
mod testing;

pub use cache::Cache;
pub use context::LedgerContext;
pub use dex::{DexKeeper, MODULE_NAME};
pub use params::Params;
pub use token::{TokenKeeper, TOKEN_MODULE_NAME};
