//! Core client struct and constructors

use {
    super::{
        helpers::redact_url,
        transport::{RawResponse, ReqwestTransport, Transport},
        url_builder::UrlBuilder,
    },
    crate::{CouchResult, Session},
    ::tracing::debug,
    std::sync::Arc,
};

/// Typed access to one CouchDB server.
///
/// The client is cheap to clone: clones share the transport and carry their
/// own copy of the [`Session`]. Operations that switch the active database
/// take `&mut self`.
#[derive(Clone, Debug)]
pub struct CouchCandy {
    pub(crate) session: Session,
    pub(crate) transport: Arc<dyn Transport>,
}

impl CouchCandy {
    /// Client talking to CouchDB over HTTP with the default 30 second timeout.
    ///
    /// # Example
    /// ```rust,no_run
    /// use couchcandy_client::{CouchCandy, Session};
    ///
    /// let client = CouchCandy::new(Session::new(
    ///     "http://127.0.0.1", 5984, "users", "admin", "password",
    /// ))?;
    /// # Ok::<(), couchcandy_client::CouchError>(())
    /// ```
    pub fn new(session: Session) -> CouchResult<Self> {
        Ok(Self::with_transport(session, ReqwestTransport::new()?))
    }

    /// Client configured from `dbhost`, `dbname`, `dbusername`, `dbpassword`
    /// and `dbport`.
    pub fn from_env() -> CouchResult<Self> {
        Self::new(Session::from_env()?)
    }

    pub fn with_transport(session: Session, transport: impl Transport + 'static) -> Self {
        Self::with_shared_transport(session, Arc::new(transport))
    }

    pub fn with_shared_transport(session: Session, transport: Arc<dyn Transport>) -> Self {
        Self { session, transport }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Point subsequent calls at another database. No request is made.
    pub fn use_database(&mut self, name: &str) {
        debug!("switching active database to {}", name);
        self.session.database = name.to_string();
    }

    pub(crate) fn build_url(&self) -> UrlBuilder<'_> {
        UrlBuilder::new(&self.session)
    }

    pub(crate) async fn read_from_get(&self, url: &str) -> CouchResult<Vec<u8>> {
        debug!("GET {}", redact_url(url));
        self.transport.get(url).await
    }

    pub(crate) async fn read_raw_from_get(&self, url: &str) -> CouchResult<RawResponse> {
        debug!("GET {}", redact_url(url));
        self.transport.get_raw(url).await
    }

    pub(crate) async fn read_from_post(&self, url: &str, body: String) -> CouchResult<Vec<u8>> {
        debug!("POST {}", redact_url(url));
        self.transport.post(url, body).await
    }

    pub(crate) async fn read_from_put(&self, url: &str, body: String) -> CouchResult<Vec<u8>> {
        debug!("PUT {}", redact_url(url));
        self.transport.put(url, body).await
    }

    pub(crate) async fn read_from_delete(&self, url: &str) -> CouchResult<Vec<u8>> {
        debug!("DELETE {}", redact_url(url));
        self.transport.delete(url).await
    }

    pub(crate) async fn read_from_put_bytes(
        &self,
        url: &str,
        content_type: &str,
        body: Vec<u8>,
    ) -> CouchResult<Vec<u8>> {
        debug!("PUT {} ({}, {} bytes)", redact_url(url), content_type, body.len());
        self.transport.put_bytes(url, content_type, body).await
    }
}
