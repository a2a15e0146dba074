//! Document CRUD operations

use {
    super::url_builder::{database_url, document_url, document_url_from_body},
    crate::{encode_document, CouchResult, OperationResponse, Options},
    ::tracing::{debug, instrument},
    serde::{de::DeserializeOwned, Serialize},
};

/// Document methods for the CouchDB client
impl super::client::CouchCandy {
    /// Fetches a document and decodes it into `T`.
    ///
    /// If `T` flattens a [`CouchDocument`](crate::CouchDocument), a missing
    /// document shows up as its `error`/`reason`; call
    /// [`CouchDocument::check`](crate::CouchDocument::check) to turn that into
    /// an error.
    #[instrument(
        name = "couch.document.get",
        skip(self),
        fields(db = %self.session.database, id = %id),
        err
    )]
    pub async fn get_document<T: DeserializeOwned>(&self, id: &str) -> CouchResult<T> {
        self.get_document_with_options(id, &Options::default()).await
    }

    /// Like [`get_document`](Self::get_document), honouring `revisions`
    /// (`?revs=true`) and `revision` (`?rev=`).
    #[instrument(
        name = "couch.document.get_with_options",
        skip(self, opts),
        fields(db = %self.session.database, id = %id, revs = opts.revisions),
        err
    )]
    pub async fn get_document_with_options<T: DeserializeOwned>(
        &self,
        id: &str,
        opts: &Options,
    ) -> CouchResult<T> {
        let url = format!(
            "{}{}",
            document_url(&self.session, id),
            opts.document_query_string()
        );
        let page = self.read_from_get(&url).await?;
        self.parse_response(&page)
    }

    /// Creates a document, letting CouchDB pick the id unless `_id` is set.
    #[instrument(
        name = "couch.document.post",
        skip(self, doc),
        fields(db = %self.session.database),
        err
    )]
    pub async fn post_document<T: Serialize + ?Sized>(&self, doc: &T) -> CouchResult<OperationResponse> {
        let body = encode_document(doc)?;
        let url = database_url(&self.session);

        let page = self.read_from_post(&url, body).await?;
        let response: OperationResponse = self.parse_response(&page)?;

        debug!(id = %response.id, rev = %response.rev, "posted document");
        Ok(response)
    }

    /// Creates or updates the document addressed by its own `_id`.
    ///
    /// Fails with [`CouchError::InvalidDocument`](crate::CouchError::InvalidDocument)
    /// before any request is made when the document has no `_id`.
    #[instrument(
        name = "couch.document.put",
        skip(self, doc),
        fields(db = %self.session.database),
        err
    )]
    pub async fn put_document<T: Serialize + ?Sized>(&self, doc: &T) -> CouchResult<OperationResponse> {
        let body = encode_document(doc)?;
        let url = document_url_from_body(&self.session, &body)?;

        let page = self.read_from_put(&url, body).await?;
        self.parse_response(&page)
    }

    /// Creates or updates the document stored under `id`.
    #[instrument(
        name = "couch.document.put_with_id",
        skip(self, doc),
        fields(db = %self.session.database, id = %id),
        err
    )]
    pub async fn put_document_with_id<T: Serialize + ?Sized>(
        &self,
        id: &str,
        doc: &T,
    ) -> CouchResult<OperationResponse> {
        let body = encode_document(doc)?;
        let url = document_url(&self.session, id);

        let page = self.read_from_put(&url, body).await?;
        self.parse_response(&page)
    }

    /// Deletes revision `rev` of a document.
    #[instrument(
        name = "couch.document.delete",
        skip(self),
        fields(db = %self.session.database, id = %id),
        err
    )]
    pub async fn delete_document(&self, id: &str, rev: &str) -> CouchResult<OperationResponse> {
        let url = format!("{}?rev={}", document_url(&self.session, id), rev);

        let page = self.read_from_delete(&url).await?;
        let response: OperationResponse = self.parse_response(&page)?;

        debug!(ok = response.ok, "deleted document {}", id);
        Ok(response)
    }
}
