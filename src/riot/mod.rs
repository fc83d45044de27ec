//! Riot Games API access: endpoint catalog, quotas, request engine and endpoints.

pub mod batch;
pub mod catalog;
pub mod client;
pub mod endpoints;
pub mod metrics;
pub mod outcome;
pub mod rate_limit;
pub mod region;
pub mod types;

pub use batch::{LookupError, LookupStep, MatchPager, PlayerProfile, StepFailure};
pub use catalog::{CatalogError, DEFAULT_LIMIT, Family};
pub use client::{ApiRequest, RiotClient};
pub use endpoints::MatchIdsQuery;
pub use metrics::{MetricsSnapshot, RequestMetrics};
pub use outcome::{ApiOutcome, OutcomeKind, RiotApiError};
pub use rate_limit::EndpointLimiter;
pub use region::{HostTarget, Platform, Region, resolve_host};
