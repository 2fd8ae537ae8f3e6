//! Per-endpoint convenience methods over one owned [`RequestDispatcher`].

use serde_json::{json, Value};

use crate::dispatcher::RequestDispatcher;
use crate::error::ApiError;
use crate::http_client::HttpMethod;
use crate::pagination::{CardListing, CardPaginator, PageMode};
use crate::request::RequestOptions;
use crate::service::ServiceName;

/// Seller API facade. Construct one at the composition root and pass it
/// (or a reference) to whatever needs it.
#[derive(Debug, Clone)]
pub struct SellerApi {
    dispatcher: RequestDispatcher,
}

impl SellerApi {
    pub fn new(dispatcher: RequestDispatcher) -> Self {
        Self { dispatcher }
    }

    pub fn dispatcher(&self) -> &RequestDispatcher {
        &self.dispatcher
    }

    pub fn dispatcher_mut(&mut self) -> &mut RequestDispatcher {
        &mut self.dispatcher
    }

    pub fn into_dispatcher(self) -> RequestDispatcher {
        self.dispatcher
    }

    pub fn set_token(&mut self, token: impl Into<String>) -> &mut Self {
        self.dispatcher.set_token(token);
        self
    }

    pub fn token(&self) -> Option<&str> {
        self.dispatcher.token()
    }

    pub fn get(&self, endpoint: &str, query: &[(&str, &str)]) -> Result<Value, ApiError> {
        self.dispatcher.get(endpoint, query)
    }

    pub fn post(&self, endpoint: &str, body: Value) -> Result<Value, ApiError> {
        self.dispatcher.post(endpoint, body)
    }

    pub fn put(&self, endpoint: &str, body: Value) -> Result<Value, ApiError> {
        self.dispatcher.put(endpoint, body)
    }

    pub fn delete(&self, endpoint: &str, body: Value) -> Result<Value, ApiError> {
        self.dispatcher.delete(endpoint, body)
    }

    pub fn request_to_service(
        &self,
        service: ServiceName,
        method: HttpMethod,
        endpoint: &str,
        options: &RequestOptions,
    ) -> Result<Value, ApiError> {
        self.dispatcher
            .request_to_service(service, method, endpoint, options)
    }

    pub fn ping(&self, service: ServiceName) -> Result<Value, ApiError> {
        self.dispatcher.ping(service)
    }

    pub fn seller_info(&self) -> Result<Value, ApiError> {
        self.dispatcher.get("/api/v1/seller-info", &[])
    }

    pub fn news(&self, query: &[(&str, &str)]) -> Result<Value, ApiError> {
        self.dispatcher.get("/api/communications/v2/news", query)
    }

    // Content

    /// Card listing; see [`CardPaginator::fetch`] for how `mode` behaves.
    pub fn cards(&self, settings: Value, mode: PageMode) -> Result<CardListing, ApiError> {
        CardPaginator::new(&self.dispatcher).fetch(settings, mode)
    }

    pub fn update_cards(&self, cards: Value) -> Result<Value, ApiError> {
        self.send(
            ServiceName::Content,
            HttpMethod::Post,
            "/content/v2/cards/update",
            RequestOptions::with_body(cards),
        )
    }

    pub fn media_files(&self, nm_id: u64) -> Result<Value, ApiError> {
        self.send(
            ServiceName::Content,
            HttpMethod::Get,
            &format!("/content/v2/media/{nm_id}"),
            RequestOptions::new(),
        )
    }

    // Marketplace

    pub fn warehouses(&self) -> Result<Value, ApiError> {
        self.send(
            ServiceName::Marketplace,
            HttpMethod::Get,
            "/api/v3/warehouses",
            RequestOptions::new(),
        )
    }

    pub fn orders(&self, query: &[(&str, &str)]) -> Result<Value, ApiError> {
        self.query(ServiceName::Marketplace, "/api/v3/orders", query)
    }

    pub fn stocks(&self, query: &[(&str, &str)]) -> Result<Value, ApiError> {
        self.query(ServiceName::Marketplace, "/api/v3/stocks", query)
    }

    pub fn update_stocks(&self, stocks: Vec<Value>) -> Result<Value, ApiError> {
        self.send(
            ServiceName::Marketplace,
            HttpMethod::Put,
            "/api/v3/stocks",
            RequestOptions::with_body(json!({ "stocks": stocks })),
        )
    }

    // Statistics

    pub fn incomes(&self, query: &[(&str, &str)]) -> Result<Value, ApiError> {
        self.query(ServiceName::Statistics, "/api/v1/supplier/incomes", query)
    }

    pub fn sales(&self, query: &[(&str, &str)]) -> Result<Value, ApiError> {
        self.query(ServiceName::Statistics, "/api/v1/supplier/sales", query)
    }

    pub fn stock_statistics(&self, query: &[(&str, &str)]) -> Result<Value, ApiError> {
        self.query(ServiceName::Statistics, "/api/v1/supplier/stocks", query)
    }

    // Advert, feedbacks, finance

    pub fn advert_campaigns(&self) -> Result<Value, ApiError> {
        self.send(
            ServiceName::Advert,
            HttpMethod::Get,
            "/adv/v1/promotion/count",
            RequestOptions::new(),
        )
    }

    pub fn feedbacks(&self, query: &[(&str, &str)]) -> Result<Value, ApiError> {
        self.query(ServiceName::Feedbacks, "/api/v1/feedbacks", query)
    }

    pub fn finance_reports(&self, query: &[(&str, &str)]) -> Result<Value, ApiError> {
        self.query(
            ServiceName::Finance,
            "/api/v1/supplier/reportDetailByPeriod",
            query,
        )
    }

    fn query(
        &self,
        service: ServiceName,
        endpoint: &str,
        query: &[(&str, &str)],
    ) -> Result<Value, ApiError> {
        self.send(
            service,
            HttpMethod::Get,
            endpoint,
            RequestOptions::with_query(query.iter().copied()),
        )
    }

    fn send(
        &self,
        service: ServiceName,
        method: HttpMethod,
        endpoint: &str,
        options: RequestOptions,
    ) -> Result<Value, ApiError> {
        self.dispatcher
            .request_to_service(service, method, endpoint, &options)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::http_client::ScriptedHttpClient;
    use crate::Environment;

    fn api_with(client: &Arc<ScriptedHttpClient>) -> SellerApi {
        SellerApi::new(
            RequestDispatcher::new(Environment::Production, client.clone()).with_token("t"),
        )
    }

    #[test]
    fn endpoints_hit_their_service_hosts() {
        let mut client = ScriptedHttpClient::new();
        for _ in 0..6 {
            client = client.with_json(200, "[]");
        }
        let client = Arc::new(client);
        let api = api_with(&client);

        api.seller_info().expect("seller info");
        api.media_files(12345).expect("media");
        api.warehouses().expect("warehouses");
        api.sales(&[("dateFrom", "2024-01-01")]).expect("sales");
        api.advert_campaigns().expect("adverts");
        api.finance_reports(&[("limit", "10")]).expect("finance");

        let urls = client
            .requests()
            .into_iter()
            .map(|request| request.url)
            .collect::<Vec<_>>();
        assert_eq!(
            urls,
            vec![
                "https://common-api.wildberries.ru/api/v1/seller-info",
                "https://content-api.wildberries.ru/content/v2/media/12345",
                "https://marketplace-api.wildberries.ru/api/v3/warehouses",
                "https://statistics-api.wildberries.ru/api/v1/supplier/sales?dateFrom=2024-01-01",
                "https://advert-api.wildberries.ru/adv/v1/promotion/count",
                "https://finance-api.wildberries.ru/api/v1/supplier/reportDetailByPeriod?limit=10",
            ]
        );
    }

    #[test]
    fn update_stocks_wraps_payload() {
        let client = Arc::new(ScriptedHttpClient::new().with_json(204, ""));
        let api = api_with(&client);

        let response = api
            .update_stocks(vec![json!({"sku": "A1", "amount": 3})])
            .expect("empty 204 decodes");

        assert_eq!(response, json!({}));
        let request = &client.requests()[0];
        assert_eq!(request.method, HttpMethod::Put);
        assert_eq!(
            request.body.as_deref(),
            Some(r#"{"stocks":[{"amount":3,"sku":"A1"}]}"#)
        );
    }

    #[test]
    fn token_setter_is_forwarded() {
        let client = Arc::new(ScriptedHttpClient::new());
        let mut api = SellerApi::new(RequestDispatcher::new(Environment::Sandbox, client));

        assert_eq!(api.token(), None);
        api.set_token("fresh");
        assert_eq!(api.token(), Some("fresh"));
        assert_eq!(api.dispatcher().token(), Some("fresh"));
    }
}
