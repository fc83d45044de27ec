use thiserror::Error;

use crate::riot::{CatalogError, LookupError, RiotApiError};

#[derive(Debug, Error)]
pub enum AppError {
    #[error(
        "No Riot API key found. Get a key at https://developer.riotgames.com, then either set the \
         {var} environment variable or add a line `{var}=<your key>` to a .env file in one of: {searched}"
    )]
    MissingCredential { var: &'static str, searched: String },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),

    #[error(transparent)]
    Catalog(#[from] CatalogError),

    #[error(transparent)]
    Lookup(#[from] LookupError),

    #[error("Riot API error: {0}")]
    Api(#[from] RiotApiError),
}
