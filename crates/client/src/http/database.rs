//! Database administration operations

use {
    super::url_builder::{all_databases_url, database_url},
    crate::{CouchResult, DatabaseInfo, OperationResponse},
    ::tracing::{debug, instrument},
};

/// Database administration methods for the CouchDB client
impl super::client::CouchCandy {
    /// Basic information about the active database.
    ///
    /// A missing database is reported through `error`/`reason` on the
    /// returned value rather than as an `Err`.
    #[instrument(
        name = "couch.database.info",
        skip(self),
        fields(db = %self.session.database),
        err
    )]
    pub async fn get_database_info(&self) -> CouchResult<DatabaseInfo> {
        let url = database_url(&self.session);
        let page = self.read_from_get(&url).await?;
        self.parse_response(&page)
    }

    /// Creates a database and makes it the active one.
    ///
    /// # Example
    /// ```rust,no_run
    /// # async fn run(mut client: couchcandy_client::CouchCandy) -> couchcandy_client::CouchResult<()> {
    /// let res = client.put_database("users").await?.into_result()?;
    /// assert!(res.ok);
    /// # Ok(())
    /// # }
    /// ```
    #[instrument(name = "couch.database.put", skip(self), fields(db = %name), err)]
    pub async fn put_database(&mut self, name: &str) -> CouchResult<OperationResponse> {
        self.use_database(name);
        let url = database_url(&self.session);

        let page = self.read_from_put(&url, String::new()).await?;
        let response: OperationResponse = self.parse_response(&page)?;

        debug!(ok = response.ok, "put database {}", name);
        Ok(response)
    }

    /// Deletes a database permanently. The deleted database becomes the
    /// active one, so follow up with [`use_database`](Self::use_database).
    #[instrument(name = "couch.database.delete", skip(self), fields(db = %name), err)]
    pub async fn delete_database(&mut self, name: &str) -> CouchResult<OperationResponse> {
        self.use_database(name);
        let url = database_url(&self.session);

        let page = self.read_from_delete(&url).await?;
        let response: OperationResponse = self.parse_response(&page)?;

        debug!(ok = response.ok, "deleted database {}", name);
        Ok(response)
    }

    /// Names of every database on the server.
    #[instrument(name = "couch.database.list", skip(self), err)]
    pub async fn get_all_databases(&self) -> CouchResult<Vec<String>> {
        let url = all_databases_url(&self.session);
        let page = self.read_from_get(&url).await?;
        self.parse_response(&page)
    }
}
