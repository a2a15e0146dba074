//! Standalone attachment operations

use {
    super::url_builder::attachment_url,
    crate::{CouchError, CouchResult, OperationResponse},
    ::tracing::{debug, instrument},
};

/// Attachment methods for the CouchDB client
impl super::client::CouchCandy {
    /// Uploads `bytes` as attachment `name` of revision `rev` of document `id`.
    /// The response carries the document's new revision.
    #[instrument(
        name = "couch.attachment.put",
        skip(self, bytes),
        fields(db = %self.session.database, id = %id, name = %name, size = bytes.len()),
        err
    )]
    pub async fn put_attachment(
        &self,
        id: &str,
        rev: &str,
        name: &str,
        content_type: &str,
        bytes: Vec<u8>,
    ) -> CouchResult<OperationResponse> {
        let url = attachment_url(&self.session, id, name, rev);

        let page = self.read_from_put_bytes(&url, content_type, bytes).await?;
        let response: OperationResponse = self.parse_response(&page)?;

        debug!(rev = %response.rev, "attached {} to {}", name, id);
        Ok(response)
    }

    /// Raw attachment content.
    ///
    /// A non-2xx answer is turned into [`CouchError::Couch`] from the
    /// `error`/`reason` body, since the bytes cannot carry it themselves.
    #[instrument(
        name = "couch.attachment.get",
        skip(self),
        fields(db = %self.session.database, id = %id, name = %name),
        err
    )]
    pub async fn get_attachment(&self, id: &str, name: &str, rev: &str) -> CouchResult<Vec<u8>> {
        let url = attachment_url(&self.session, id, name, rev);
        let res = self.read_raw_from_get(&url).await?;
        if res.is_success() {
            return Ok(res.body);
        }

        let envelope: OperationResponse = serde_json::from_slice(&res.body).unwrap_or_default();
        Err(CouchError::couch(
            envelope
                .error
                .unwrap_or_else(|| format!("http_{}", res.status)),
            envelope
                .reason
                .unwrap_or_else(|| String::from_utf8_lossy(&res.body).into_owned()),
        ))
    }

    #[instrument(
        name = "couch.attachment.delete",
        skip(self),
        fields(db = %self.session.database, id = %id, name = %name),
        err
    )]
    pub async fn delete_attachment(&self, id: &str, rev: &str, name: &str) -> CouchResult<OperationResponse> {
        let url = attachment_url(&self.session, id, name, rev);

        let page = self.read_from_delete(&url).await?;
        self.parse_response(&page)
    }
}
