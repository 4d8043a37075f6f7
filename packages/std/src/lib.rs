pub mod bank;
pub mod common;
pub mod error;

#[cfg(not(target_arch = "wasm32"))]
pub mod testing;
