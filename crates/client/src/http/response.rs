//! Response parsing utilities for the HTTP client

use {crate::CouchResult, ::tracing::trace, serde::de::DeserializeOwned};

/// Response parsing methods for the CouchDB client
impl super::client::CouchCandy {
    pub(crate) fn parse_response<T: DeserializeOwned>(&self, page: &[u8]) -> CouchResult<T> {
        trace!("[CouchCandy] response: {}", String::from_utf8_lossy(page));

        Ok(serde_json::from_slice(page)?)
    }
}
