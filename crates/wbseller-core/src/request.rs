use std::collections::BTreeMap;

use serde_json::Value;

/// Per-call options: query parameters, JSON body and extra headers.
///
/// The dispatcher layers its own `authorization` header on top; a caller-supplied
/// one is ignored.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RequestOptions {
    pub query: Vec<(String, String)>,
    pub json: Option<Value>,
    pub headers: BTreeMap<String, String>,
}

impl RequestOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_query<I, K, V>(params: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: ToString,
    {
        params
            .into_iter()
            .fold(Self::default(), |options, (key, value)| {
                options.with_query_param(key, value)
            })
    }

    pub fn with_body(json: Value) -> Self {
        Self::default().with_json(json)
    }

    pub fn with_query_param(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.query.push((key.into(), value.to_string()));
        self
    }

    pub fn with_json(mut self, json: Value) -> Self {
        self.json = Some(json);
        self
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers
            .insert(name.into().to_ascii_lowercase(), value.into());
        self
    }

    /// Appends the URL-encoded query string to `url`.
    pub(crate) fn apply_query(&self, url: &mut String) {
        if self.query.is_empty() {
            return;
        }

        let encoded = self
            .query
            .iter()
            .map(|(key, value)| {
                format!(
                    "{}={}",
                    urlencoding::encode(key),
                    urlencoding::encode(value)
                )
            })
            .collect::<Vec<_>>()
            .join("&");

        url.push(if url.contains('?') { '&' } else { '?' });
        url.push_str(&encoded);
    }
}
