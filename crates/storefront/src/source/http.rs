//! HTTP catalog source over the DummyJSON and FakeStore REST APIs.

use rand::Rng;
use serde::de::DeserializeOwned;
use tracing::{debug, instrument, warn};
use url::Url;

use mini_shop_core::Product;

use super::conversions::{
    DummyJsonResponse, FakeStoreProduct, convert_dummyjson_product, convert_fakestore_product,
    finalize,
};
use super::{ProductSource, SourceError};
use crate::config::CatalogSourceConfig;

/// FakeStore carries no stock, so a stock level in this range is generated.
const GENERATED_STOCK: std::ops::RangeInclusive<i64> = 1..=50;

/// Catalog source that reads DummyJSON and falls back to FakeStore.
#[derive(Debug, Clone)]
pub struct HttpProductSource {
    client: reqwest::Client,
    primary_url: Url,
    fallback_url: Url,
    limit: usize,
}

impl HttpProductSource {
    /// Create a new source.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(config: &CatalogSourceConfig) -> Result<Self, SourceError> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent(concat!("mini-shop/", env!("CARGO_PKG_VERSION")))
            .build()?;

        let mut primary_url = config.primary_url.clone();
        primary_url
            .query_pairs_mut()
            .append_pair("limit", &config.limit.to_string());

        Ok(Self {
            client,
            primary_url,
            fallback_url: config.fallback_url.clone(),
            limit: config.limit,
        })
    }

    /// GET `url` and decode the JSON body.
    async fn get_json<T: DeserializeOwned>(&self, url: &Url) -> Result<T, SourceError> {
        let response = self.client.get(url.clone()).send().await?;
        let status = response.status();

        if !status.is_success() {
            return Err(SourceError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        // Get response body as text first for better error diagnostics
        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| {
            warn!(
                error = %e,
                url = %url,
                body = %body.chars().take(500).collect::<String>(),
                "Failed to parse catalog response"
            );
            SourceError::Parse(e)
        })
    }

    #[instrument(skip(self), fields(url = %self.primary_url))]
    async fn fetch_dummyjson(&self) -> Result<Vec<Product>, SourceError> {
        let response: DummyJsonResponse = self.get_json(&self.primary_url).await?;
        debug!(records = response.products.len(), "DummyJSON catalog received");

        Ok(finalize(
            response
                .products
                .into_iter()
                .take(self.limit)
                .map(convert_dummyjson_product),
        ))
    }

    #[instrument(skip(self), fields(url = %self.fallback_url))]
    async fn fetch_fakestore(&self) -> Result<Vec<Product>, SourceError> {
        let records: Vec<FakeStoreProduct> = self.get_json(&self.fallback_url).await?;
        debug!(records = records.len(), "FakeStore catalog received");

        let drafts: Vec<_> = {
            let mut rng = rand::rng();
            records
                .into_iter()
                .take(self.limit)
                .map(|record| convert_fakestore_product(record, rng.random_range(GENERATED_STOCK)))
                .collect()
        };

        Ok(finalize(drafts))
    }
}

impl ProductSource for HttpProductSource {
    async fn fetch_products(&self) -> Result<Vec<Product>, SourceError> {
        match self.fetch_dummyjson().await {
            Ok(products) => return Ok(products),
            Err(e) => warn!(error = %e, "Primary catalog source failed, trying fallback"),
        }

        match self.fetch_fakestore().await {
            Ok(products) => Ok(products),
            Err(e) => {
                warn!(error = %e, "Fallback catalog source failed");
                Err(SourceError::AllSourcesFailed)
            }
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_primary_url_carries_limit() {
        let config = CatalogSourceConfig {
            primary_url: Url::parse("https://dummyjson.com/products").unwrap(),
            fallback_url: Url::parse("https://fakestoreapi.com/products").unwrap(),
            limit: 7,
            timeout: std::time::Duration::from_secs(10),
        };
        let source = HttpProductSource::new(&config).unwrap();
        assert_eq!(
            source.primary_url.as_str(),
            "https://dummyjson.com/products?limit=7"
        );
        assert_eq!(source.fallback_url.as_str(), "https://fakestoreapi.com/products");
    }

    #[tokio::test]
    async fn test_unreachable_upstreams_fail_with_all_sources_failed() {
        let config = CatalogSourceConfig {
            primary_url: Url::parse("http://127.0.0.1:9/products").unwrap(),
            fallback_url: Url::parse("http://127.0.0.1:9/fallback").unwrap(),
            limit: 20,
            timeout: std::time::Duration::from_secs(2),
        };
        let source = HttpProductSource::new(&config).unwrap();
        let err = source.fetch_products().await.unwrap_err();
        assert!(matches!(err, SourceError::AllSourcesFailed));
    }
}
