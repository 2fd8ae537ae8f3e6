//! Cursor-paginated card listing.
//!
//! The card-listing endpoint returns at most `settings.cursor.limit` items
//! per call together with a `cursor` (`updatedAt`, `nmID`) to continue from.
//! [`CardPaginator`] either returns the first page untouched or walks every
//! page and folds them into one [`AggregatedResult`].
//!
//! Wire shapes:
//!
//! ```text
//! request:  {"settings": {"cursor": {"limit": 100, "updatedAt"?, "nmID"?}, "filter": {...}}}
//! response: {"data": [...], "cursor": {"updatedAt": ..., "nmID": ...}, "total": N}
//! ```

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::debug;

use crate::dispatcher::RequestDispatcher;
use crate::error::ApiError;
use crate::http_client::HttpMethod;
use crate::request::RequestOptions;
use crate::service::ServiceName;

pub const CARDS_LIST_ENDPOINT: &str = "/content/v2/get/cards/list";
pub const DEFAULT_PAGE_LIMIT: u64 = 100;

/// Whether to return only the first page or every page merged.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PageMode {
    #[default]
    SinglePage,
    AllPages,
}

/// Continuation bookmark echoed back to the server on the next call.
///
/// `updatedAt` and `nmID` are opaque and copied through as received.
#[derive(Debug, Clone, PartialEq)]
pub struct Cursor {
    pub updated_at: Value,
    pub nm_id: Value,
}

impl Cursor {
    /// Continuation fields of a response, present only when both are set.
    pub fn continuation(response: &Value) -> Option<Self> {
        let cursor = response.get("cursor")?;
        let updated_at = cursor.get("updatedAt").filter(|value| !value.is_null())?;
        let nm_id = cursor.get("nmID").filter(|value| !value.is_null())?;

        Some(Self {
            updated_at: updated_at.clone(),
            nm_id: nm_id.clone(),
        })
    }

    /// Writes `updatedAt` and `nmID` into `payload.settings.cursor`, keeping
    /// any other cursor fields.
    fn write_into(&self, payload: &mut Value) {
        let Some(cursor) = payload
            .pointer_mut("/settings/cursor")
            .and_then(Value::as_object_mut)
        else {
            return;
        };

        cursor.insert(String::from("updatedAt"), self.updated_at.clone());
        cursor.insert(String::from("nmID"), self.nm_id.clone());
    }
}

/// All pages of a listing folded into one response-shaped value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AggregatedResult {
    pub data: Vec<Value>,
    pub total: usize,
    pub error: bool,
    pub error_text: String,
    pub additional_errors: Option<Value>,
}

impl AggregatedResult {
    pub fn success(data: Vec<Value>) -> Self {
        Self {
            total: data.len(),
            data,
            error: false,
            error_text: String::new(),
            additional_errors: None,
        }
    }

    pub fn into_value(self) -> Value {
        json!({
            "data": self.data,
            "total": self.total,
            "error": self.error,
            "errorText": self.error_text,
            "additionalErrors": self.additional_errors,
        })
    }
}

/// Outcome of [`CardPaginator::fetch`].
#[derive(Debug, Clone, PartialEq)]
pub enum CardListing {
    /// The raw first-page response.
    Page(Value),
    Aggregated(AggregatedResult),
}

impl CardListing {
    pub fn into_value(self) -> Value {
        match self {
            Self::Page(value) => value,
            Self::Aggregated(result) => result.into_value(),
        }
    }
}

/// Defaults applied under caller settings: `cursor.limit = 100`, `filter.withPhoto = -1`.
pub fn default_card_settings() -> Value {
    json!({
        "cursor": { "limit": DEFAULT_PAGE_LIMIT },
        "filter": { "withPhoto": -1 },
    })
}

/// Recursively merges `overrides` over `defaults`.
///
/// Precedence:
/// - object + object: merged key by key, recursing on shared keys;
/// - array + array: `defaults` elements followed by `overrides` elements;
/// - `null` override: keeps `defaults` (the caller supplied nothing);
/// - anything else: the override replaces the default.
pub fn merge_settings(defaults: Value, overrides: Value) -> Value {
    match (defaults, overrides) {
        (Value::Object(mut base), Value::Object(overrides)) => {
            for (key, value) in overrides {
                let merged = match base.remove(&key) {
                    Some(existing) => merge_settings(existing, value),
                    None => value,
                };
                base.insert(key, merged);
            }
            Value::Object(base)
        }
        (Value::Array(mut base), Value::Array(overrides)) => {
            base.extend(overrides);
            Value::Array(base)
        }
        (base, Value::Null) => base,
        (_, overrides) => overrides,
    }
}

/// Drives the card-listing endpoint through the dispatcher.
#[derive(Debug, Clone, Copy)]
pub struct CardPaginator<'a> {
    dispatcher: &'a RequestDispatcher,
}

impl<'a> CardPaginator<'a> {
    pub fn new(dispatcher: &'a RequestDispatcher) -> Self {
        Self { dispatcher }
    }

    /// Fetches card listings with `settings` merged over [`default_card_settings`].
    ///
    /// [`PageMode::SinglePage`] sends the merged payload as is. In
    /// [`PageMode::AllPages`] `cursor.limit` must be a positive integer, and
    /// the loop stops when a response lacks either continuation field or
    /// reports a `total` below that limit.
    pub fn fetch(&self, settings: Value, mode: PageMode) -> Result<CardListing, ApiError> {
        let settings = merge_settings(default_card_settings(), settings);
        let mut payload = json!({ "settings": settings });

        if mode == PageMode::SinglePage {
            return self.fetch_page(&payload).map(CardListing::Page);
        }

        let limit = page_limit(&payload["settings"])?;

        let mut data = Vec::new();
        let mut page = 0_u32;

        loop {
            page += 1;
            let response = self.fetch_page(&payload)?;

            let received = match response.get("data") {
                Some(Value::Array(items)) => {
                    data.extend(items.iter().cloned());
                    items.len()
                }
                _ => 0,
            };
            debug!(page, received, total_received = data.len(), "card page received");

            let Some(cursor) = Cursor::continuation(&response) else {
                break;
            };
            cursor.write_into(&mut payload);

            let page_total = response.get("total").and_then(Value::as_u64).unwrap_or(0);
            if page_total < limit {
                break;
            }
        }

        Ok(CardListing::Aggregated(AggregatedResult::success(data)))
    }

    fn fetch_page(&self, payload: &Value) -> Result<Value, ApiError> {
        self.dispatcher.request_to_service(
            ServiceName::Content,
            HttpMethod::Post,
            CARDS_LIST_ENDPOINT,
            &RequestOptions::with_body(payload.clone()),
        )
    }
}

fn page_limit(settings: &Value) -> Result<u64, ApiError> {
    match settings.pointer("/cursor/limit").and_then(Value::as_u64) {
        Some(limit) if limit > 0 => Ok(limit),
        _ => Err(ApiError::generic(
            0,
            "settings.cursor.limit must be a positive integer",
            Vec::new(),
        )),
    }
}
