use {
    crate::{CouchError, CouchResult},
    serde::{de::DeserializeOwned, Deserialize, Serialize},
    serde_json::Value,
    std::fmt::{Display, Formatter},
};

/// Answer to a write that does not return a document: database and document
/// creation, update, deletion, attachment upload.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OperationResponse {
    pub id: String,
    pub rev: String,
    pub ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

impl OperationResponse {
    pub fn is_ok(&self) -> bool {
        self.ok && self.error.is_none()
    }

    /// The response itself, or [`CouchError::Couch`] when CouchDB reported a
    /// failure inside a successful HTTP exchange.
    pub fn into_result(self) -> CouchResult<Self> {
        if self.is_ok() {
            return Ok(self);
        }
        Err(CouchError::couch(
            self.error.unwrap_or_else(|| "unknown_error".to_string()),
            self.reason.unwrap_or_default(),
        ))
    }
}

/// Update sequence. CouchDB 1.x reports integers, 2.x and later opaque
/// strings.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Sequence {
    Number(u64),
    Text(String),
}

impl Default for Sequence {
    fn default() -> Self {
        Sequence::Number(0)
    }
}

impl Display for Sequence {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Sequence::Number(n) => write!(f, "{}", n),
            Sequence::Text(s) => f.write_str(s),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseSizes {
    pub file: u64,
    pub external: u64,
    pub active: u64,
}

/// `GET /{db}`
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseInfo {
    pub db_name: String,
    pub doc_count: u64,
    pub doc_del_count: u64,
    pub update_seq: Sequence,
    pub purge_seq: Sequence,
    pub compact_running: bool,
    pub disk_size: Option<u64>,
    pub data_size: Option<u64>,
    pub sizes: Option<DatabaseSizes>,
    pub instance_start_time: String,
    pub disk_format_version: u64,
    pub committed_update_seq: Option<Sequence>,
    pub error: Option<String>,
    pub reason: Option<String>,
}

/// `_all_docs` listing.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AllDocuments {
    pub total_rows: u64,
    pub offset: u64,
    pub rows: Vec<Row>,
    pub error: Option<String>,
    pub reason: Option<String>,
}

impl AllDocuments {
    /// Embedded documents decoded against the caller's schema, skipping rows
    /// without one.
    pub fn docs_as<T: DeserializeOwned>(&self) -> CouchResult<Vec<T>> {
        self.rows
            .iter()
            .filter_map(|row| row.doc_as::<T>().transpose())
            .collect()
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Row {
    pub id: String,
    pub key: String,
    pub value: RowValue,
    /// Raw document, present with `include_docs=true`.
    pub doc: Option<Value>,
    /// Set for keys that were asked for but do not exist.
    pub error: Option<String>,
}

impl Row {
    pub fn doc_as<T: DeserializeOwned>(&self) -> CouchResult<Option<T>> {
        match &self.doc {
            Some(doc) => Ok(Some(serde_json::from_value(doc.clone())?)),
            None => Ok(None),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RowValue {
    pub rev: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deleted: Option<bool>,
}

/// Body posted to `_all_docs` when fetching by keys.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AllDocumentsKeys {
    pub keys: Vec<String>,
}

/// Result of a view or list call. Keys and values are whatever the map and
/// reduce functions emitted, so they stay undecoded.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewResponse {
    pub total_rows: u64,
    pub offset: u64,
    pub rows: Vec<ViewRow>,
    pub error: Option<String>,
    pub reason: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewRow {
    /// Absent on reduced rows.
    pub id: Option<String>,
    pub key: Value,
    pub value: Value,
    pub doc: Option<Value>,
}

impl ViewRow {
    pub fn key_as<T: DeserializeOwned>(&self) -> CouchResult<T> {
        Ok(serde_json::from_value(self.key.clone())?)
    }

    pub fn value_as<T: DeserializeOwned>(&self) -> CouchResult<T> {
        Ok(serde_json::from_value(self.value.clone())?)
    }
}

/// `_changes` feed.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Changes {
    pub results: Vec<ChangeResult>,
    pub last_seq: Sequence,
    pub pending: Option<u64>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChangeResult {
    pub seq: Sequence,
    pub id: String,
    pub changes: Vec<Change>,
    pub deleted: bool,
    pub doc: Option<Value>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Change {
    pub rev: String,
}
