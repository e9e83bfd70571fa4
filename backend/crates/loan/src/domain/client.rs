//! Record Service Client Trait
//!
//! The gateway's only downstream dependency. The trait reports raw HTTP
//! outcomes; classifying them is the use case's job.

use axum::http::HeaderMap;
use bytes::Bytes;
use thiserror::Error;

use crate::domain::record::RecordQuery;

/// Raw downstream response
#[derive(Debug, Clone)]
pub struct DownstreamResponse {
    pub status: u16,
    pub body: Bytes,
}

/// The request never produced a complete response
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("request timed out")]
    Timeout,

    #[error("request failed: {0}")]
    Request(String),

    #[error("failed to read body: {0}")]
    Body(String),
}

#[trait_variant::make(RecordClient: Send)]
pub trait LocalRecordClient {
    /// URL the lookup for `query` is sent to
    fn lookup_url(&self, query: &RecordQuery) -> String;

    /// `GET` the customer record; `headers` are added to the request
    async fn fetch(
        &self,
        query: &RecordQuery,
        headers: HeaderMap,
    ) -> Result<DownstreamResponse, TransportError>;
}
