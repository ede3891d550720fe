#[cfg(not(target_arch = "wasm32"))]
pub mod batch;
pub mod registry;
pub mod traits;

// Quote provider implementations
pub mod coincap;
#[cfg(not(target_arch = "wasm32"))]
pub mod yahoo_finance;
