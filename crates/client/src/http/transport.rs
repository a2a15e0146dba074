//! The seam between the facade and the network.

use {
    crate::CouchResult,
    ::tracing::{debug, error},
    async_trait::async_trait,
    reqwest::{Client, RequestBuilder},
    std::{fmt::Debug, time::Duration},
    tap::TapFallible,
};

pub const JSON_CONTENT_TYPE: &str = "application/json";

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Executes one HTTP request and hands back the complete response body.
///
/// Implementations must not retry and must drain the body before returning,
/// whether the exchange succeeded or not. JSON verbs send
/// `Content-Type: application/json`.
#[async_trait]
pub trait Transport: Debug + Send + Sync {
    async fn get(&self, url: &str) -> CouchResult<Vec<u8>>;

    /// GET that also reports the HTTP status, for bodies that are not JSON
    /// envelopes (attachments).
    async fn get_raw(&self, url: &str) -> CouchResult<RawResponse>;

    async fn post(&self, url: &str, body: String) -> CouchResult<Vec<u8>>;

    async fn put(&self, url: &str, body: String) -> CouchResult<Vec<u8>>;

    async fn delete(&self, url: &str) -> CouchResult<Vec<u8>>;

    /// Binary upload with an explicit content type (attachments).
    async fn put_bytes(&self, url: &str, content_type: &str, body: Vec<u8>) -> CouchResult<Vec<u8>>;
}

/// Status and drained body of one exchange.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RawResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

impl RawResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// [`Transport`] backed by a `reqwest::Client`.
///
/// Credentials embedded in the URL are sent as basic auth by reqwest. HTTP
/// error statuses are not failures here: CouchDB explains them in the body,
/// which is returned for the caller to decode.
#[derive(Clone, Debug)]
pub struct ReqwestTransport {
    http: Client,
}

impl ReqwestTransport {
    pub fn new() -> CouchResult<Self> {
        Self::with_timeout(DEFAULT_TIMEOUT)
    }

    pub fn with_timeout(timeout: Duration) -> CouchResult<Self> {
        Ok(Self {
            http: Client::builder().timeout(timeout).build()?,
        })
    }

    pub fn with_client(http: Client) -> Self {
        Self { http }
    }

    async fn execute(&self, request: RequestBuilder) -> CouchResult<Vec<u8>> {
        Ok(self.execute_raw(request).await?.body)
    }

    async fn execute_raw(&self, request: RequestBuilder) -> CouchResult<RawResponse> {
        let res = request
            .send()
            .await
            .tap_err(|e| error!("couchdb request failed: {}", e))?;

        let status = res.status().as_u16();
        debug!(status, "couchdb responded");

        // reads to the end, which releases the connection
        let body = res
            .bytes()
            .await
            .tap_err(|e| error!("failed to read couchdb response body: {}", e))?;

        Ok(RawResponse {
            status,
            body: body.to_vec(),
        })
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn get(&self, url: &str) -> CouchResult<Vec<u8>> {
        self.execute(self.http.get(url)).await
    }

    async fn get_raw(&self, url: &str) -> CouchResult<RawResponse> {
        self.execute_raw(self.http.get(url)).await
    }

    async fn post(&self, url: &str, body: String) -> CouchResult<Vec<u8>> {
        self.execute(
            self.http
                .post(url)
                .header(reqwest::header::CONTENT_TYPE, JSON_CONTENT_TYPE)
                .body(body),
        )
        .await
    }

    async fn put(&self, url: &str, body: String) -> CouchResult<Vec<u8>> {
        self.execute(
            self.http
                .put(url)
                .header(reqwest::header::CONTENT_TYPE, JSON_CONTENT_TYPE)
                .body(body),
        )
        .await
    }

    async fn delete(&self, url: &str) -> CouchResult<Vec<u8>> {
        self.execute(self.http.delete(url)).await
    }

    async fn put_bytes(&self, url: &str, content_type: &str, body: Vec<u8>) -> CouchResult<Vec<u8>> {
        self.execute(
            self.http
                .put(url)
                .header(reqwest::header::CONTENT_TYPE, content_type)
                .body(body),
        )
        .await
    }
}
