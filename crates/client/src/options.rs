//! Query options and their translation into CouchDB query strings.

use {
    crate::http::url_builder::join_query,
    serde::{Deserialize, Serialize},
};

/// `limit` imposed on `_all_docs` listings when the caller leaves it unset.
pub const DEFAULT_ALL_DOCS_LIMIT: u32 = 10;

/// Which revisions the change feed reports per document.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationStyle {
    /// Only the winning revision.
    #[default]
    MainOnly,
    /// Every leaf revision, conflicts included.
    AllDocs,
}

impl NotificationStyle {
    pub fn as_str(&self) -> &'static str {
        match self {
            NotificationStyle::MainOnly => "main_only",
            NotificationStyle::AllDocs => "all_docs",
        }
    }
}

/// Options available when querying the database.
///
/// Integer fields use `0` for "unset" and string fields `None`; unset values
/// are left out of the query string. Key-like strings are passed through
/// as-is apart from percent-escaping, so a JSON string key has to be quoted
/// by the caller (`"\"serge\""`).
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Options {
    /// `revs=true` on document reads.
    pub revisions: bool,
    /// `rev=` on document reads.
    pub revision: Option<String>,
    pub descending: bool,
    pub limit: u32,
    pub include_docs: bool,
    pub notification_style: NotificationStyle,
    pub key: Option<String>,
    pub keys: Option<String>,
    pub start_key: Option<String>,
    pub end_key: Option<String>,
    pub reduce: bool,
    pub group_level: u32,
    pub skip: u32,
    /// Change-feed start sequence.
    pub since: Option<String>,
}

impl Options {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_revisions(mut self, revisions: bool) -> Self {
        self.revisions = revisions;
        self
    }

    pub fn with_revision(mut self, rev: impl Into<String>) -> Self {
        self.revision = Some(rev.into());
        self
    }

    pub fn with_descending(mut self, descending: bool) -> Self {
        self.descending = descending;
        self
    }

    pub fn with_limit(mut self, limit: u32) -> Self {
        self.limit = limit;
        self
    }

    pub fn with_include_docs(mut self, include_docs: bool) -> Self {
        self.include_docs = include_docs;
        self
    }

    pub fn with_notification_style(mut self, style: NotificationStyle) -> Self {
        self.notification_style = style;
        self
    }

    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = Some(key.into());
        self
    }

    pub fn with_keys(mut self, keys: impl Into<String>) -> Self {
        self.keys = Some(keys.into());
        self
    }

    pub fn with_start_key(mut self, start_key: impl Into<String>) -> Self {
        self.start_key = Some(start_key.into());
        self
    }

    pub fn with_end_key(mut self, end_key: impl Into<String>) -> Self {
        self.end_key = Some(end_key.into());
        self
    }

    pub fn with_reduce(mut self, reduce: bool) -> Self {
        self.reduce = reduce;
        self
    }

    pub fn with_group_level(mut self, group_level: u32) -> Self {
        self.group_level = group_level;
        self
    }

    pub fn with_skip(mut self, skip: u32) -> Self {
        self.skip = skip;
        self
    }

    pub fn with_since(mut self, since: impl Into<String>) -> Self {
        self.since = Some(since.into());
        self
    }

    /// Applies the `_all_docs` default limit. Idempotent.
    pub fn normalized_for_all_docs(mut self) -> Self {
        if self.limit == 0 {
            self.limit = DEFAULT_ALL_DOCS_LIMIT;
        }
        self
    }

    /// Parameters for `_all_docs`, views and lists, in emission order.
    ///
    /// `include_docs` is dropped when `reduce` is set since CouchDB rejects
    /// the combination.
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = vec![("descending", self.descending.to_string())];

        if !self.reduce {
            pairs.push(("include_docs", self.include_docs.to_string()));
        }
        pairs.push(("reduce", self.reduce.to_string()));

        if self.limit > 0 {
            pairs.push(("limit", self.limit.to_string()));
        }
        push_escaped(&mut pairs, "key", &self.key);
        push_escaped(&mut pairs, "start_key", &self.start_key);
        push_escaped(&mut pairs, "end_key", &self.end_key);
        if self.group_level > 0 {
            pairs.push(("group_level", self.group_level.to_string()));
        }
        push_escaped(&mut pairs, "keys", &self.keys);
        if self.skip > 0 {
            pairs.push(("skip", self.skip.to_string()));
        }

        pairs
    }

    /// `?descending=..&include_docs=..&reduce=..[&...]`
    pub fn to_query_string(&self) -> String {
        join_query(&self.query_pairs())
    }

    /// Query for a single document read: `revs` and `rev`. Empty when
    /// neither is set.
    pub fn document_query_string(&self) -> String {
        let mut pairs = Vec::new();
        if self.revisions {
            pairs.push(("revs", "true".to_string()));
        }
        push_escaped(&mut pairs, "rev", &self.revision);
        join_query(&pairs)
    }

    /// Query for the change feed. `style` is always present.
    pub fn changes_query_string(&self) -> String {
        let mut pairs = vec![("style", self.notification_style.as_str().to_string())];
        if self.include_docs {
            pairs.push(("include_docs", "true".to_string()));
        }
        if self.descending {
            pairs.push(("descending", "true".to_string()));
        }
        if self.limit > 0 {
            pairs.push(("limit", self.limit.to_string()));
        }
        push_escaped(&mut pairs, "since", &self.since);
        join_query(&pairs)
    }
}

fn push_escaped(pairs: &mut Vec<(&'static str, String)>, name: &'static str, value: &Option<String>) {
    if let Some(value) = value.as_deref().filter(|v| !v.is_empty()) {
        pairs.push((name, urlencoding::encode(value).into_owned()));
    }
}
