//! Listing endpoint client.

use async_trait::async_trait;
use coursegrid_sdk::NONCE_HEADER;
use coursegrid_sdk::types::{FilterParams, ListingResponse, PageCursor};
use reqwest::header::ACCEPT;
use tracing::{debug, instrument, trace};
use url::Url;

use crate::config::WidgetConfig;
use crate::error::ClientError;

/// Anything that can answer listing queries.
#[async_trait]
pub trait ListingSource: Send + Sync {
    /// Fetch one page of results for the given filters.
    async fn fetch(
        &self,
        params: &FilterParams,
        cursor: PageCursor,
    ) -> Result<ListingResponse, ClientError>;
}

/// HTTP client for the listing endpoint.
#[derive(Debug, Clone)]
pub struct QueryClient {
    client: reqwest::Client,
    endpoint: Url,
    nonce: String,
}

impl QueryClient {
    /// Create a client from widget configuration.
    pub fn new(config: &WidgetConfig) -> Result<Self, ClientError> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("coursegrid-widget/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            endpoint: config.endpoint.clone(),
            nonce: config.nonce.clone(),
        })
    }

    /// The endpoint this client queries.
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// Build the request URL. Empty parameter values are never sent.
    pub fn request_url(&self, params: &FilterParams, cursor: PageCursor) -> Url {
        let mut url = self.endpoint.clone();
        {
            let mut query = url.query_pairs_mut();
            for (key, value) in params.iter() {
                if !value.trim().is_empty() {
                    query.append_pair(key, value);
                }
            }
            query.append_pair("page", &cursor.page.to_string());
            query.append_pair("per_page", &cursor.per_page.to_string());
        }
        url
    }
}

#[async_trait]
impl ListingSource for QueryClient {
    #[instrument(skip(self), fields(endpoint = %self.endpoint))]
    async fn fetch(
        &self,
        params: &FilterParams,
        cursor: PageCursor,
    ) -> Result<ListingResponse, ClientError> {
        let url = self.request_url(params, cursor);
        debug!(%url, "listing query");

        let response = self
            .client
            .get(url)
            .header(NONCE_HEADER, &self.nonce)
            .header(ACCEPT, "application/json")
            .send()
            .await?;

        let status = response.status();
        trace!(status = %status, "listing response");
        if !status.is_success() {
            return Err(ClientError::Network(format!("HTTP {status}")));
        }

        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| ClientError::Parse(e.to_string()))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use coursegrid_sdk::types::facet;

    fn client(endpoint: &str) -> QueryClient {
        QueryClient::new(&WidgetConfig::new(Url::parse(endpoint).unwrap(), "n")).unwrap()
    }

    #[test]
    fn url_carries_filters_and_cursor() {
        let params = FilterParams::new()
            .with(facet::CATEGORY, "a,b")
            .with(facet::PRICE, "free");
        let url = client("http://h/courses").request_url(&params, PageCursor::new(2, 9));
        assert_eq!(
            url.as_str(),
            "http://h/courses?category=a%2Cb&price=free&page=2&per_page=9"
        );
    }

    #[test]
    fn blank_values_are_skipped() {
        let params = FilterParams::new().with(facet::TAG, "  ");
        let url = client("http://h/courses").request_url(&params, PageCursor::default());
        assert_eq!(url.query(), Some("page=1&per_page=12"));
    }

    #[test]
    fn existing_endpoint_query_is_kept() {
        let url = client("http://h/index.php?route=courses")
            .request_url(&FilterParams::new(), PageCursor::default());
        assert_eq!(url.query(), Some("route=courses&page=1&per_page=12"));
    }
}
