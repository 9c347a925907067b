mod auth;
pub mod client;
mod patients;
mod predictions;
pub mod types;

pub use client::*;
pub use patients::is_csv_file;
pub use types::*;

#[cfg(all(test, not(target_arch = "wasm32")))]
mod tests;
