//! Authenticated request dispatch.
//!
//! Every public operation funnels into one private `execute` step which:
//!
//! 1. refuses to touch the network when no token is set,
//! 2. joins the resolved base URL and the endpoint path,
//! 3. attaches the raw token as the `authorization` header,
//! 4. performs exactly one exchange through the injected [`HttpClient`],
//! 5. decodes the body on 2xx (empty or `null` body → empty object) or hands
//!    the status and body to [`classify`] otherwise.
//!
//! No retries happen here; a rate-limit or transient failure ends the call.

use std::sync::Arc;

use serde_json::{Map, Value};
use tracing::{debug, warn};

use crate::classify::classify;
use crate::config::ClientConfig;
use crate::error::{ApiError, ConfigError};
use crate::http_client::{HttpClient, HttpMethod, HttpRequest};
use crate::request::RequestOptions;
use crate::routing::ServiceRouter;
use crate::service::{Environment, ServiceName};

const DEFAULT_TIMEOUT_MS: u64 = 30_000;

/// Owns the token and base URL table and performs single HTTP exchanges.
#[derive(Clone)]
pub struct RequestDispatcher {
    token: Option<String>,
    router: ServiceRouter,
    http_client: Arc<dyn HttpClient>,
    timeout_ms: u64,
}

impl std::fmt::Debug for RequestDispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RequestDispatcher")
            .field("token", &self.token.as_ref().map(|_| "<redacted>"))
            .field("router", &self.router)
            .field("timeout_ms", &self.timeout_ms)
            .finish_non_exhaustive()
    }
}

impl RequestDispatcher {
    pub fn new(environment: Environment, http_client: Arc<dyn HttpClient>) -> Self {
        Self {
            token: None,
            router: ServiceRouter::new(environment),
            http_client,
            timeout_ms: DEFAULT_TIMEOUT_MS,
        }
    }

    /// Builds a dispatcher for the configured environment, applying that
    /// environment's base URL overrides, token and timeout.
    pub fn from_config(
        config: &ClientConfig,
        http_client: Arc<dyn HttpClient>,
    ) -> Result<Self, ConfigError> {
        config.validate()?;

        let mut dispatcher = Self::new(config.environment(), http_client);
        dispatcher.set_base_urls(config.base_url_overrides()?);
        dispatcher.timeout_ms = config.timeout_ms();
        if let Some(token) = &config.token {
            dispatcher.set_token(token.clone());
        }

        debug!(
            environment = %dispatcher.environment(),
            has_token = dispatcher.token.is_some(),
            "request dispatcher configured"
        );
        Ok(dispatcher)
    }

    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    pub fn set_token(&mut self, token: impl Into<String>) -> &mut Self {
        self.token = Some(token.into());
        self
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub fn environment(&self) -> Environment {
        self.router.environment()
    }

    pub fn router(&self) -> &ServiceRouter {
        &self.router
    }

    pub fn base_url(&self, service: ServiceName) -> &str {
        self.router.resolve(service)
    }

    /// Base URL for a raw service identifier; unknown names resolve to `common`.
    pub fn base_url_for_name(&self, service: &str) -> &str {
        self.router.resolve_name(service)
    }

    /// Key-wise merge over the active base URL table.
    pub fn set_base_urls<I, S>(&mut self, overrides: I) -> &mut Self
    where
        I: IntoIterator<Item = (ServiceName, S)>,
        S: Into<String>,
    {
        self.router.set_base_urls(overrides);
        self
    }

    pub const fn timeout_ms(&self) -> u64 {
        self.timeout_ms
    }

    pub fn set_timeout_ms(&mut self, timeout_ms: u64) -> &mut Self {
        self.timeout_ms = timeout_ms;
        self
    }

    /// `GET` against the `common` service with `query` appended to the URL.
    pub fn get(&self, endpoint: &str, query: &[(&str, &str)]) -> Result<Value, ApiError> {
        self.execute(
            HttpMethod::Get,
            endpoint,
            &RequestOptions::with_query(query.iter().copied()),
            None,
        )
    }

    pub fn post(&self, endpoint: &str, body: Value) -> Result<Value, ApiError> {
        self.execute(HttpMethod::Post, endpoint, &RequestOptions::with_body(body), None)
    }

    pub fn put(&self, endpoint: &str, body: Value) -> Result<Value, ApiError> {
        self.execute(HttpMethod::Put, endpoint, &RequestOptions::with_body(body), None)
    }

    pub fn delete(&self, endpoint: &str, body: Value) -> Result<Value, ApiError> {
        self.execute(HttpMethod::Delete, endpoint, &RequestOptions::with_body(body), None)
    }

    pub fn request_to_service(
        &self,
        service: ServiceName,
        method: HttpMethod,
        endpoint: &str,
        options: &RequestOptions,
    ) -> Result<Value, ApiError> {
        self.execute(method, endpoint, options, Some(self.base_url(service)))
    }

    /// Like [`request_to_service`](Self::request_to_service) for an untyped
    /// service identifier, falling back to `common` when it is unknown.
    pub fn request_to_named_service(
        &self,
        service: &str,
        method: HttpMethod,
        endpoint: &str,
        options: &RequestOptions,
    ) -> Result<Value, ApiError> {
        self.execute(method, endpoint, options, Some(self.base_url_for_name(service)))
    }

    pub fn ping(&self, service: ServiceName) -> Result<Value, ApiError> {
        self.request_to_service(service, HttpMethod::Get, "/ping", &RequestOptions::new())
    }

    fn execute(
        &self,
        method: HttpMethod,
        endpoint: &str,
        options: &RequestOptions,
        base_url: Option<&str>,
    ) -> Result<Value, ApiError> {
        let Some(token) = self.token.as_deref() else {
            return Err(ApiError::missing_token());
        };

        let base_url = base_url.unwrap_or_else(|| self.base_url(ServiceName::Common));
        let mut url = format!("{base_url}{endpoint}");
        options.apply_query(&mut url);

        let mut request = HttpRequest::new(method, url)
            .with_timeout_ms(self.timeout_ms)
            .with_header("accept", "application/json");

        if let Some(json) = &options.json {
            let body = serde_json::to_string(json).map_err(|error| {
                ApiError::transport(format!("failed to encode request body: {error}"))
            })?;
            request = request
                .with_header("content-type", "application/json")
                .with_body(body);
        }

        for (name, value) in &options.headers {
            request = request.with_header(name.as_str(), value.as_str());
        }
        // Applied last so caller headers cannot replace it.
        request = request.with_authorization(token);

        debug!(%method, base_url, endpoint, "dispatching request");

        let response = self.http_client.execute(request).map_err(|error| {
            warn!(%method, base_url, endpoint, error = error.message(), "transport failure");
            ApiError::transport(error.message())
        })?;

        if response.is_success() {
            return decode_success_body(&response.body);
        }

        let error = classify(response.status, &decode_error_body(&response.body));
        warn!(
            %method,
            base_url,
            endpoint,
            status = response.status,
            code = error.code(),
            "request failed"
        );
        Err(error)
    }
}

fn decode_success_body(body: &str) -> Result<Value, ApiError> {
    if body.trim().is_empty() {
        return Ok(Value::Object(Map::new()));
    }

    match serde_json::from_str(body) {
        Ok(Value::Null) => Ok(Value::Object(Map::new())),
        Ok(value) => Ok(value),
        Err(error) => Err(ApiError::transport(format!(
            "failed to decode response body: {error}"
        ))),
    }
}

fn decode_error_body(body: &str) -> Value {
    serde_json::from_str(body).unwrap_or_else(|_| Value::Object(Map::new()))
}
