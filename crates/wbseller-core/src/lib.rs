//! # wbseller Core
//!
//! Blocking client core for the Wildberries seller REST APIs.
//!
//! ## Overview
//!
//! - **Service routing**: logical service name + environment → base URL
//! - **Request dispatch**: token guard, raw-token `authorization` header, one
//!   HTTP exchange per call through an injected transport
//! - **Error taxonomy**: every failure surfaces as one [`ApiError`]
//! - **Cursor pagination**: the card listing folded into a single result
//!
//! ## Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`api`] | Per-endpoint convenience facade |
//! | [`classify`](mod@classify) | Status/body → [`ApiError`] mapping |
//! | [`config`] | TOML/environment configuration |
//! | [`dispatcher`] | Authenticated request dispatch |
//! | [`error`] | API and configuration error types |
//! | [`http_client`] | Transport contract and implementations |
//! | [`pagination`] | Card-listing cursor pagination |
//! | [`request`] | Per-call request options |
//! | [`routing`] | Base URL tables |
//! | [`service`] | Service and environment identifiers |
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//!
//! use wbseller_core::{
//!     ClientConfig, PageMode, ReqwestHttpClient, RequestDispatcher, SellerApi,
//! };
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = ClientConfig::from_env()?;
//!     let dispatcher = RequestDispatcher::from_config(&config, Arc::new(ReqwestHttpClient::new()))?;
//!     let api = SellerApi::new(dispatcher);
//!
//!     let cards = api.cards(serde_json::json!({}), PageMode::AllPages)?;
//!     println!("{}", cards.into_value());
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────┐
//! │  SellerApi      │
//! └────────┬────────┘
//!          │            ┌──────────────────┐
//!          ├───────────▶│ CardPaginator    │
//!          ▼            └────────┬─────────┘
//! ┌─────────────────┐            │
//! │RequestDispatcher│◀───────────┘
//! └────────┬────────┘     ┌──────────────────┐
//!          ├─────────────▶│ ServiceRouter    │
//!          ▼              └──────────────────┘
//! ┌─────────────────┐     ┌──────────────────┐
//! │ HttpClient      │────▶│ classify         │
//! │ (reqwest/script)│     └──────────────────┘
//! └─────────────────┘
//! ```
//!
//! ## Error Handling
//!
//! ```rust
//! use wbseller_core::{ApiError, ApiErrorKind};
//!
//! fn handle_error(error: ApiError) {
//!     match error.kind() {
//!         ApiErrorKind::Authentication => { /* refresh the token */ }
//!         ApiErrorKind::RateLimit => { /* caller decides whether to wait */ }
//!         ApiErrorKind::Generic => eprintln!("{} {:?}", error.message(), error.errors()),
//!         ApiErrorKind::Transport => { /* network problem, status is 0 */ }
//!     }
//! }
//! ```
//!
//! ## Security
//!
//! - The token is never logged and is redacted from `Debug` output
//! - No retries: a 401 or 429 ends the call immediately

pub mod api;
pub mod classify;
pub mod config;
pub mod dispatcher;
pub mod error;
pub mod http_client;
pub mod pagination;
pub mod request;
pub mod routing;
pub mod service;

pub use api::SellerApi;

pub use classify::classify;

pub use config::{BaseUrlOverrides, ClientConfig, HttpConfig, LoggingConfig};

pub use dispatcher::RequestDispatcher;

pub use error::{ApiError, ApiErrorKind, ConfigError};

pub use http_client::{
    HttpClient, HttpError, HttpMethod, HttpRequest, HttpResponse, ReqwestHttpClient,
    ScriptedHttpClient,
};

pub use pagination::{
    default_card_settings, merge_settings, AggregatedResult, CardListing,
    CardPaginator, Cursor, PageMode, CARDS_LIST_ENDPOINT, DEFAULT_PAGE_LIMIT,
};

pub use request::RequestOptions;

pub use routing::{BaseUrlTable, ServiceRouter};

pub use service::{Environment, ServiceName};
