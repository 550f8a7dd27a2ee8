mod category;
mod config;
mod error;
mod helpers;
pub mod provider;
mod sentinel;
mod types;

pub use config::{ChainConfig, ProviderConfig, ProviderRegistry};
pub use error::{Error, Result};
pub use provider::{Chain, Provider};
pub use types::*;
