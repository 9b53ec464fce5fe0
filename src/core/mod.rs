pub mod config;
pub mod error;

pub use config::NutriqConfig;
pub use error::{NutriqError, Result};
