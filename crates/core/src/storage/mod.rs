// File-backed store needs a real filesystem
#[cfg(not(target_arch = "wasm32"))]
pub mod json_file;
pub mod memory;
pub mod store;
