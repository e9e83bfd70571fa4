//! HTTP client for the government record service

use axum::http::HeaderMap;
use reqwest::Client;

use crate::application::config::GatewayConfig;
use crate::domain::client::{DownstreamResponse, RecordClient, TransportError};
use crate::domain::record::RecordQuery;

/// `reqwest`-backed [`RecordClient`]
#[derive(Debug, Clone)]
pub struct HttpRecordClient {
    client: Client,
    base_url: String,
}

impl HttpRecordClient {
    pub fn new(config: &GatewayConfig) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(config.timeout).build()?;

        Ok(Self {
            client,
            base_url: config.record_service_url.clone(),
        })
    }

    fn endpoint(&self) -> String {
        format!("{}/api/customer", self.base_url)
    }
}

impl RecordClient for HttpRecordClient {
    fn lookup_url(&self, query: &RecordQuery) -> String {
        match reqwest::Url::parse_with_params(
            &self.endpoint(),
            &[
                ("first_name", query.first_name()),
                ("last_name", query.last_name()),
            ],
        ) {
            Ok(url) => url.to_string(),
            Err(_) => self.endpoint(),
        }
    }

    async fn fetch(
        &self,
        query: &RecordQuery,
        headers: HeaderMap,
    ) -> Result<DownstreamResponse, TransportError> {
        let response = self
            .client
            .get(self.endpoint())
            .query(&[
                ("first_name", query.first_name()),
                ("last_name", query.last_name()),
            ])
            .headers(headers)
            .send()
            .await
            .map_err(classify)?;

        let status = response.status().as_u16();

        let body = response
            .bytes()
            .await
            .map_err(|e| TransportError::Body(e.to_string()))?;

        Ok(DownstreamResponse { status, body })
    }
}

fn classify(err: reqwest::Error) -> TransportError {
    if err.is_timeout() {
        TransportError::Timeout
    } else {
        TransportError::Request(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;

    #[test]
    fn test_lookup_url_encodes_names() {
        let client = HttpRecordClient::new(&GatewayConfig::new(
            "http://gov:8081",
            Duration::from_secs(1),
        ))
        .unwrap();
        let query = RecordQuery::from_session("Mary Ann", "O'Brien&Co").unwrap();

        assert_eq!(
            client.lookup_url(&query),
            "http://gov:8081/api/customer?first_name=Mary+Ann&last_name=O%27Brien%26Co"
        );
    }
}
