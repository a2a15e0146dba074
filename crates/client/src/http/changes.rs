//! Change feed

use {
    crate::{Changes, CouchResult, Options},
    ::tracing::{debug, instrument},
};

impl super::client::CouchCandy {
    /// One-shot read of `_changes`, in the style set by
    /// `opts.notification_style`, starting after `opts.since` when given.
    #[instrument(
        name = "couch.changes.get",
        skip(self, opts),
        fields(
            db = %self.session.database,
            style = opts.notification_style.as_str(),
            since = ?opts.since
        ),
        err
    )]
    pub async fn get_changes(&self, opts: &Options) -> CouchResult<Changes> {
        let url = self.build_url().segment("_changes").changes_options(opts).build();

        let page = self.read_from_get(&url).await?;
        let changes: Changes = self.parse_response(&page)?;

        debug!(results = changes.results.len(), last_seq = %changes.last_seq, "read change feed");
        Ok(changes)
    }
}
