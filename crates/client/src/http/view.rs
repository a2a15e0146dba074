//! Listings, views, list functions and design documents

use {
    crate::{AllDocuments, AllDocumentsKeys, CouchError, CouchResult, DesignDocs, Options, ViewResponse},
    ::tracing::{debug, instrument},
    serde::de::DeserializeOwned,
};

const ALL_DOCS: &str = "_all_docs";
const DESIGN_START_KEY: &str = "\"_design/\"";
const DESIGN_END_KEY: &str = "\"_design0\"";

/// View and listing methods for the CouchDB client
impl super::client::CouchCandy {
    /// Pages through `_all_docs`. A zero `limit` becomes
    /// [`DEFAULT_ALL_DOCS_LIMIT`](crate::DEFAULT_ALL_DOCS_LIMIT).
    #[instrument(
        name = "couch.view.all_docs",
        skip(self, opts),
        fields(db = %self.session.database, limit = opts.limit),
        err
    )]
    pub async fn get_all_documents(&self, opts: &Options) -> CouchResult<AllDocuments> {
        let opts = opts.clone().normalized_for_all_docs();
        let url = self.build_url().segment(ALL_DOCS).options(&opts).build();

        let page = self.read_from_get(&url).await?;
        let all: AllDocuments = self.parse_response(&page)?;

        debug!(rows = all.rows.len(), total = all.total_rows, "listed documents");
        Ok(all)
    }

    /// Fetches the given document ids in one `POST _all_docs`.
    #[instrument(
        name = "couch.view.by_keys",
        skip(self, keys, opts),
        fields(db = %self.session.database, keys = keys.len()),
        err
    )]
    pub async fn get_documents_by_keys(
        &self,
        keys: &[String],
        opts: &Options,
    ) -> CouchResult<AllDocuments> {
        let body = serde_json::to_string(&AllDocumentsKeys {
            keys: keys.to_vec(),
        })
        .map_err(|e| CouchError::Encode(e.to_string()))?;
        let url = self.build_url().segment(ALL_DOCS).options(opts).build();

        let page = self.read_from_post(&url, body).await?;
        self.parse_response(&page)
    }

    /// `GET /{db}/_design/{ddoc}/_view/{view}`
    #[instrument(
        name = "couch.view.call",
        skip(self, opts),
        fields(db = %self.session.database, ddoc = %ddoc, view = %view),
        err
    )]
    pub async fn call_view(&self, ddoc: &str, view: &str, opts: &Options) -> CouchResult<ViewResponse> {
        let url = self
            .build_url()
            .design(ddoc)
            .segment("_view")
            .segment(view)
            .options(opts)
            .build();

        let page = self.read_from_get(&url).await?;
        self.parse_response(&page)
    }

    /// `GET /{db}/_design/{ddoc}/_list/{list}/{ddoc}/{view}`
    ///
    /// List functions emit whatever they like, so the body is decoded into
    /// the caller's `R`. Use [`ViewResponse`] for lists that pass the view
    /// through unchanged.
    #[instrument(
        name = "couch.view.list",
        skip(self, opts),
        fields(db = %self.session.database, ddoc = %ddoc, list = %list, view = %view),
        err
    )]
    pub async fn call_list<R: DeserializeOwned>(
        &self,
        ddoc: &str,
        list: &str,
        view: &str,
        opts: &Options,
    ) -> CouchResult<R> {
        let url = self
            .build_url()
            .design(ddoc)
            .segment("_list")
            .segment(list)
            .segment(ddoc)
            .segment(view)
            .options(opts)
            .build();

        let page = self.read_from_get(&url).await?;
        self.parse_response(&page)
    }

    /// Every design document in the active database, bucketed by language.
    #[instrument(
        name = "couch.view.design_docs",
        skip(self),
        fields(db = %self.session.database),
        err
    )]
    pub async fn get_design_documents(&self) -> CouchResult<DesignDocs> {
        let opts = Options::new()
            .with_include_docs(true)
            .with_start_key(DESIGN_START_KEY)
            .with_end_key(DESIGN_END_KEY);
        let url = self.build_url().segment(ALL_DOCS).options(&opts).build();

        let page = self.read_from_get(&url).await?;
        let all: AllDocuments = self.parse_response(&page)?;

        let docs = DesignDocs::partition(all.rows.into_iter().filter_map(|row| row.doc))?;
        debug!(
            map_reduce = docs.map_reduce.len(),
            indexes = docs.indexes.len(),
            unrecognized = docs.unrecognized,
            "partitioned design documents"
        );
        Ok(docs)
    }
}
