use std::sync::Arc;
use std::time::Duration;

use governor::{
    Quota, RateLimiter,
    clock::DefaultClock,
    state::{InMemoryState, NotKeyed},
};
use reqwest::{
    Method, StatusCode,
    header::{ACCEPT_CHARSET, ACCEPT_LANGUAGE, HeaderMap, HeaderValue, RETRY_AFTER},
};
use serde::de::DeserializeOwned;
use tokio::{task::JoinHandle, time::sleep};
use tracing::{debug, warn};

use crate::config::{API_KEY_VAR, Config};
use crate::error::AppError;

use super::catalog::{CatalogError, DEFAULT_LIMIT, Family, build_path, rate_limit_rule};
use super::metrics::RequestMetrics;
use super::outcome::{ApiOutcome, RiotApiError};
use super::rate_limit::EndpointLimiter;
use super::region::HostTarget;

const CHARSET: &str = "application/x-www-form-urlencoded; charset=UTF-8";

/// One logical call to the Riot API.
#[derive(Debug, Clone)]
pub struct ApiRequest {
    pub method: Method,
    pub url: String,
    pub family: Family,
    pub limit_type: &'static str,
    pub query: Vec<(String, String)>,
    pub body: Option<serde_json::Value>,
}

impl ApiRequest {
    pub fn new(method: Method, url: impl Into<String>, family: Family) -> Self {
        Self {
            method,
            url: url.into(),
            family,
            limit_type: DEFAULT_LIMIT,
            query: Vec::new(),
            body: None,
        }
    }

    pub fn limit_type(mut self, limit_type: &'static str) -> Self {
        self.limit_type = limit_type;
        self
    }

    pub fn query(mut self, key: &str, value: impl ToString) -> Self {
        self.query.push((key.to_string(), value.to_string()));
        self
    }

    pub fn with_query(mut self, pairs: impl IntoIterator<Item = (String, String)>) -> Self {
        self.query.extend(pairs);
        self
    }

    pub fn body(mut self, body: serde_json::Value) -> Self {
        self.body = Some(body);
        self
    }
}

/// Result of a single HTTP attempt.
enum Attempt<T> {
    Done(ApiOutcome<T>),
    Retry(RiotApiError),
}

/// Rate limited and retrying Riot API client.
pub struct RiotClient {
    http: reqwest::Client,
    /// Application-wide quota shared by every family.
    app_limiter: RateLimiter<NotKeyed, InMemoryState, DefaultClock>,
    limiter: EndpointLimiter,
    metrics: Arc<RequestMetrics>,
    retry_count: u32,
    rate_limit_retries: u32,
    backoff_unit: Duration,
    max_workers: usize,
    base_url: Option<String>,
}

impl RiotClient {
    pub fn new(config: &Config) -> Result<Self, AppError> {
        if config.riot_api_key.trim().is_empty() {
            return Err(AppError::MissingCredential {
                var: API_KEY_VAR,
                searched: "Config::riot_api_key".into(),
            });
        }

        let mut token = HeaderValue::from_str(&config.riot_api_key).map_err(|_| {
            AppError::Config("the Riot API key contains invalid header characters".into())
        })?;
        token.set_sensitive(true);

        let language = HeaderValue::from_str(&config.language)
            .map_err(|_| AppError::Config(format!("invalid language `{}`", config.language)))?;

        let mut headers = HeaderMap::new();
        headers.insert("X-Riot-Token", token);
        headers.insert(ACCEPT_LANGUAGE, language);
        headers.insert(ACCEPT_CHARSET, HeaderValue::from_static(CHARSET));

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(config.request_timeout)
            .build()?;

        let quota = Quota::per_minute(config.app_requests_per_minute).allow_burst(config.app_burst);

        Ok(Self {
            http,
            app_limiter: RateLimiter::direct(quota),
            limiter: EndpointLimiter::new(),
            metrics: RequestMetrics::new(),
            retry_count: config.retry_count,
            rate_limit_retries: config.rate_limit_retries,
            backoff_unit: config.backoff_unit,
            max_workers: config.max_workers.max(1),
            base_url: config
                .base_url
                .as_ref()
                .map(|url| url.trim_end_matches('/').to_string()),
        })
    }

    pub fn metrics(&self) -> &Arc<RequestMetrics> {
        &self.metrics
    }

    pub fn limiter(&self) -> &EndpointLimiter {
        &self.limiter
    }

    pub fn max_workers(&self) -> usize {
        self.max_workers
    }

    /// Spawn the task logging request counters once a minute.
    pub fn start_metrics_logging(&self) -> JoinHandle<()> {
        let metrics = self.metrics.clone();
        tokio::spawn(async move {
            metrics.log_loop().await;
        })
    }

    pub fn backoff_delay(&self, attempt: u32) -> Duration {
        backoff_delay(self.backoff_unit, attempt)
    }

    /// Full URL of `endpoint` on `host`, or on the overriding base URL when one is configured.
    pub fn url_for(
        &self,
        host: impl Into<HostTarget>,
        family: Family,
        endpoint: &str,
        params: &[(&str, &str)],
    ) -> Result<String, CatalogError> {
        let path = build_path(family, endpoint, params)?;
        let base = match &self.base_url {
            Some(base) => base.clone(),
            None => host.into().base_url(),
        };

        Ok(format!("{base}{path}"))
    }

    pub fn get(
        &self,
        host: impl Into<HostTarget>,
        family: Family,
        endpoint: &str,
        params: &[(&str, &str)],
    ) -> Result<ApiRequest, CatalogError> {
        let url = self.url_for(host, family, endpoint, params)?;
        Ok(ApiRequest::new(Method::GET, url, family))
    }

    pub fn post(
        &self,
        host: impl Into<HostTarget>,
        family: Family,
        endpoint: &str,
        params: &[(&str, &str)],
        body: serde_json::Value,
    ) -> Result<ApiRequest, CatalogError> {
        let url = self.url_for(host, family, endpoint, params)?;
        Ok(ApiRequest::new(Method::POST, url, family).body(body))
    }

    /// Execute a request whose URL may have failed to build.
    pub async fn fetch<T: DeserializeOwned>(
        &self,
        request: Result<ApiRequest, CatalogError>,
    ) -> ApiOutcome<T> {
        match request {
            Ok(request) => self.execute(request).await,
            Err(err) => err.into(),
        }
    }

    /// Run `request` through the quotas, retrying transient failures.
    ///
    /// Network errors, timeouts and 5xx responses share `retry_count`
    /// retries with exponential backoff. 429 responses are retried after
    /// their `Retry-After` delay on a separate `rate_limit_retries` budget.
    pub async fn execute<T: DeserializeOwned>(&self, request: ApiRequest) -> ApiOutcome<T> {
        if let Err(err) = rate_limit_rule(request.family, request.limit_type) {
            return err.into();
        }

        let mut retries = 0;
        let mut rate_limited = 0;

        loop {
            // The method slot is taken last so its timestamp is the send time.
            self.app_limiter.until_ready().await;
            match self.limiter.acquire(request.family, request.limit_type).await {
                Ok(waited) if !waited.is_zero() => self.metrics.inc_throttled(),
                Ok(_) => {}
                Err(err) => return err.into(),
            }
            self.metrics.inc();

            let failure = match self.attempt(&request).await {
                Attempt::Done(outcome) => return outcome,
                Attempt::Retry(err) => err,
            };

            match failure {
                RiotApiError::RateLimited { retry_after } => {
                    if rate_limited >= self.rate_limit_retries {
                        warn!(url = %request.url, "🚫 still rate limited, giving up");
                        return ApiOutcome::Failed(failure);
                    }
                    rate_limited += 1;
                    self.metrics.inc_throttled();

                    warn!(
                        url = %request.url,
                        retry_after,
                        "⏳ rate limited by the Riot API, waiting before retrying"
                    );
                    sleep(Duration::from_secs(retry_after)).await;
                }
                err => {
                    if retries >= self.retry_count {
                        warn!(url = %request.url, error = %err, "❌ request failed, no retries left");
                        return ApiOutcome::Failed(err);
                    }
                    let delay = self.backoff_delay(retries);
                    retries += 1;
                    self.metrics.inc_retry();

                    warn!(
                        url = %request.url,
                        error = %err,
                        attempt = retries,
                        delay_ms = delay.as_millis() as u64,
                        "🔄 retrying request"
                    );
                    sleep(delay).await;
                }
            }
        }
    }

    async fn attempt<T: DeserializeOwned>(&self, request: &ApiRequest) -> Attempt<T> {
        let mut builder = self.http.request(request.method.clone(), &request.url);
        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        debug!(
            method = %request.method,
            url = %request.url,
            family = %request.family,
            query = ?request.query,
            "➡️ sending request"
        );

        let response = match builder.send().await {
            Ok(response) => response,
            Err(err) => return transport_failure(err),
        };

        let status = response.status();
        debug!(url = %request.url, status = status.as_u16(), "⬅️ response received");

        match status {
            StatusCode::OK => match response.bytes().await {
                Ok(bytes) => match serde_json::from_slice(&bytes) {
                    Ok(value) => Attempt::Done(ApiOutcome::Success(value)),
                    Err(err) => {
                        Attempt::Done(ApiOutcome::Failed(RiotApiError::ParseFailure(err.to_string())))
                    }
                },
                Err(err) => transport_failure(err),
            },
            StatusCode::NOT_FOUND => Attempt::Done(ApiOutcome::NotFound),
            StatusCode::TOO_MANY_REQUESTS => {
                let retry_after = response
                    .headers()
                    .get(RETRY_AFTER)
                    .and_then(|value| value.to_str().ok())
                    .and_then(|value| value.trim().parse().ok())
                    .unwrap_or(0);
                Attempt::Retry(RiotApiError::RateLimited { retry_after })
            }
            StatusCode::FORBIDDEN => {
                Attempt::Done(ApiOutcome::Failed(RiotApiError::InvalidCredential))
            }
            StatusCode::BAD_REQUEST => {
                let body = response.text().await.unwrap_or_default();
                Attempt::Done(ApiOutcome::Failed(RiotApiError::InvalidRequest(body)))
            }
            status if status.is_server_error() => Attempt::Retry(RiotApiError::ServiceUnavailable {
                status: status.as_u16(),
            }),
            status => {
                let body = response.text().await.unwrap_or_default();
                Attempt::Done(ApiOutcome::Failed(RiotApiError::UnexpectedStatus {
                    status: status.as_u16(),
                    body,
                }))
            }
        }
    }
}

/// Delay before retry number `attempt` (starting at 0): `2^attempt` units.
pub fn backoff_delay(unit: Duration, attempt: u32) -> Duration {
    2u32.checked_pow(attempt)
        .and_then(|factor| unit.checked_mul(factor))
        .unwrap_or(Duration::MAX)
}

fn transport_failure<T>(err: reqwest::Error) -> Attempt<T> {
    if err.is_builder() {
        Attempt::Done(ApiOutcome::Failed(RiotApiError::InvalidRequest(
            err.to_string(),
        )))
    } else if err.is_timeout() {
        Attempt::Retry(RiotApiError::Timeout)
    } else {
        Attempt::Retry(RiotApiError::NetworkFailure(err.to_string()))
    }
}
