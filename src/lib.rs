//! League of Legends player lookups over the Riot Games API.

pub mod config;
pub mod error;
pub mod logging;
pub mod riot;

pub use config::Config;
pub use error::AppError;
pub use riot::RiotClient;
