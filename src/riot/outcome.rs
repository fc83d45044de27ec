use thiserror::Error;

use super::catalog::CatalogError;

/// Failures a call to the Riot API can end with.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RiotApiError {
    #[error("Rate limit exceeded, retry after {retry_after} seconds")]
    RateLimited { retry_after: u64 },

    #[error("Invalid or expired API key")]
    InvalidCredential,

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Riot API service is currently unavailable (HTTP {status})")]
    ServiceUnavailable { status: u16 },

    #[error("Network error while contacting the Riot API: {0}")]
    NetworkFailure(String),

    #[error("Request timed out")]
    Timeout,

    #[error("Failed to parse API response: {0}")]
    ParseFailure(String),

    #[error("Unexpected HTTP status {status}: {body}")]
    UnexpectedStatus { status: u16, body: String },

    #[error(transparent)]
    Catalog(#[from] CatalogError),
}

impl RiotApiError {
    /// Whether the request engine retries this failure on its own.
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            Self::RateLimited { .. }
                | Self::ServiceUnavailable { .. }
                | Self::NetworkFailure(_)
                | Self::Timeout
        )
    }
}

/// Result of one logical API call once retries are exhausted.
///
/// A missing resource is a regular outcome, not an error.
#[derive(Debug, Clone, PartialEq)]
pub enum ApiOutcome<T> {
    Success(T),
    NotFound,
    Failed(RiotApiError),
}

/// What the user should be told about an outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutcomeKind {
    Found,
    NothingFound,
    TooManyRequests,
    RequestFailed,
}

impl<T> ApiOutcome<T> {
    /// The payload if the call succeeded, `None` otherwise.
    pub fn ok(self) -> Option<T> {
        match self {
            Self::Success(value) => Some(value),
            Self::NotFound | Self::Failed(_) => None,
        }
    }

    /// `Ok(None)` for a missing resource, `Err` only for real failures.
    pub fn into_result(self) -> Result<Option<T>, RiotApiError> {
        match self {
            Self::Success(value) => Ok(Some(value)),
            Self::NotFound => Ok(None),
            Self::Failed(err) => Err(err),
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> ApiOutcome<U> {
        match self {
            Self::Success(value) => ApiOutcome::Success(f(value)),
            Self::NotFound => ApiOutcome::NotFound,
            Self::Failed(err) => ApiOutcome::Failed(err),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    pub fn error(&self) -> Option<&RiotApiError> {
        match self {
            Self::Failed(err) => Some(err),
            _ => None,
        }
    }

    pub fn kind(&self) -> OutcomeKind {
        match self {
            Self::Success(_) => OutcomeKind::Found,
            Self::NotFound => OutcomeKind::NothingFound,
            Self::Failed(RiotApiError::RateLimited { .. }) => OutcomeKind::TooManyRequests,
            Self::Failed(_) => OutcomeKind::RequestFailed,
        }
    }
}

impl<T> From<CatalogError> for ApiOutcome<T> {
    fn from(value: CatalogError) -> Self {
        Self::Failed(value.into())
    }
}
