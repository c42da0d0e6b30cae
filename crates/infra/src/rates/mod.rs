//! Exchange-rate provider backed by the National Bank of Poland API
//!
//! Rates come from table A of the public endpoint:
//! `GET {base}/exchangerates/rates/A/{code}?format=json`. PLN is the
//! settlement currency, so its rate is 1.0 and never hits the network.

use async_trait::async_trait;
use orderdesk_core::dashboard::RatesProvider;
use orderdesk_domain::{Currency, OrderDeskError, RatesConfig, Result};
use serde::Deserialize;
use tracing::debug;

use crate::http::HttpClient;

#[derive(Deserialize)]
struct RatesResponse {
    rates: Vec<RateEntry>,
}

#[derive(Deserialize)]
struct RateEntry {
    mid: f64,
}

/// NBP table-A mid-rate provider.
pub struct NbpRatesProvider {
    http: HttpClient,
    config: RatesConfig,
}

impl NbpRatesProvider {
    pub fn new(http: HttpClient, config: RatesConfig) -> Self {
        Self { http, config }
    }

    fn rate_url(&self, currency: Currency) -> String {
        format!(
            "{}/exchangerates/rates/A/{}?format=json",
            self.config.base_url.trim_end_matches('/'),
            currency.code()
        )
    }
}

#[async_trait]
impl RatesProvider for NbpRatesProvider {
    async fn mid_rate(&self, currency: Currency) -> Result<f64> {
        if currency == Currency::Pln {
            return Ok(1.0);
        }

        let url = self.rate_url(currency);
        debug!(%currency, %url, "fetching exchange rate");
        let body = self.http.get_text(&url).await?;

        let response: RatesResponse = serde_json::from_str(&body).map_err(|err| {
            let infra: crate::errors::InfraError = err.into();
            OrderDeskError::from(infra)
        })?;

        response.rates.first().map(|entry| entry.mid).ok_or_else(|| {
            OrderDeskError::Parse(format!("No rate entries returned for {currency}"))
        })
    }
}

#[cfg(test)]
mod tests {
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    fn provider_for(server: &MockServer) -> NbpRatesProvider {
        let http = HttpClient::builder().max_attempts(1).build().expect("http client");
        NbpRatesProvider::new(http, RatesConfig { base_url: server.uri() })
    }

    #[tokio::test]
    async fn returns_mid_rate_from_table_a() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/exchangerates/rates/A/EUR"))
            .and(query_param("format", "json"))
            .respond_with(ResponseTemplate::new(200).set_body_string(
                r#"{"table":"A","currency":"euro","code":"EUR","rates":[{"no":"093/A/NBP/2024","effectiveDate":"2024-05-14","mid":4.2653}]}"#,
            ))
            .mount(&server)
            .await;

        let provider = provider_for(&server);
        let rate = provider.mid_rate(Currency::Eur).await.expect("rate");
        assert!((rate - 4.2653).abs() < f64::EPSILON);
    }

    #[tokio::test]
    async fn pln_is_unity_without_a_request() {
        let server = MockServer::start().await;
        // no mock mounted: any request would 404 and fail the call

        let provider = provider_for(&server);
        let rate = provider.mid_rate(Currency::Pln).await.expect("rate");
        assert_eq!(rate, 1.0);
        let requests = server.received_requests().await.expect("requests");
        assert!(requests.is_empty());
    }

    #[tokio::test]
    async fn unknown_currency_code_is_not_found() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(404).set_body_string("404 NotFound"))
            .mount(&server)
            .await;

        let provider = provider_for(&server);
        let err = provider.mid_rate(Currency::Usd).await.expect_err("missing rate");
        assert!(matches!(err, OrderDeskError::NotFound(_)));
    }

    #[tokio::test]
    async fn empty_rate_list_is_a_parse_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string(
                r#"{"table":"A","currency":"dolar","code":"USD","rates":[]}"#,
            ))
            .mount(&server)
            .await;

        let provider = provider_for(&server);
        let err = provider.mid_rate(Currency::Usd).await.expect_err("empty rates");
        assert!(matches!(err, OrderDeskError::Parse(_)));
    }
}
