//! The base record every CouchDB document shares, and the outgoing encoder.

use {
    crate::{CouchError, CouchResult},
    base64::Engine,
    serde::{Deserialize, Serialize},
    serde_json::Value,
    std::collections::BTreeMap,
};

pub(crate) const REVISIONS_FIELD: &str = "_revisions";

/// `_id`, `_rev` and the optional bookkeeping fields CouchDB attaches to a
/// document.
///
/// Embed it in your own types with `#[serde(flatten)]`:
///
/// ```rust
/// use couchcandy_client::CouchDocument;
/// use serde::{Deserialize, Serialize};
///
/// #[derive(Serialize, Deserialize)]
/// struct User {
///     #[serde(flatten)]
///     base: CouchDocument,
///     name: String,
/// }
/// ```
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct CouchDocument {
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    #[serde(rename = "_rev", default, skip_serializing_if = "Option::is_none")]
    pub rev: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,

    #[serde(
        rename = "_attachments",
        default,
        skip_serializing_if = "BTreeMap::is_empty"
    )]
    pub attachments: BTreeMap<String, Attachment>,

    // a zero history on a new document makes CouchDB reject the write
    #[serde(
        rename = "_revisions",
        default,
        skip_serializing_if = "Revisions::is_zero"
    )]
    pub revisions: Revisions,
}

impl CouchDocument {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: Some(id.into()),
            ..Default::default()
        }
    }

    pub fn with_rev(mut self, rev: impl Into<String>) -> Self {
        self.rev = Some(rev.into());
        self
    }

    pub fn with_attachment(mut self, name: impl Into<String>, attachment: Attachment) -> Self {
        self.attachments.insert(name.into(), attachment);
        self
    }

    /// Turns an embedded `error`/`reason` pair into a [`CouchError::Couch`].
    pub fn check(&self) -> CouchResult<()> {
        match &self.error {
            Some(error) => Err(CouchError::couch(
                error.clone(),
                self.reason.clone().unwrap_or_default(),
            )),
            None => Ok(()),
        }
    }
}

/// Revision history returned for `?revs=true`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Revisions {
    #[serde(default)]
    pub start: u64,
    #[serde(default)]
    pub ids: Option<Vec<String>>,
}

impl Revisions {
    pub fn is_zero(&self) -> bool {
        self.start == 0 && self.ids.is_none()
    }
}

/// Attachment metadata as found in `_attachments`, or an inline attachment
/// carrying base64 `data` for upload.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attachment {
    pub content_type: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub revpos: Option<u64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub digest: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub length: Option<u64>,

    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub stub: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<String>,
}

impl Attachment {
    /// Inline attachment, sent with the document body.
    pub fn inline(content_type: impl Into<String>, bytes: &[u8]) -> Self {
        Self {
            content_type: content_type.into(),
            data: Some(base64::engine::general_purpose::STANDARD.encode(bytes)),
            ..Default::default()
        }
    }

    /// Decoded inline data, if the attachment carries any.
    pub fn decoded_data(&self) -> CouchResult<Option<Vec<u8>>> {
        self.data
            .as_deref()
            .map(|data| {
                base64::engine::general_purpose::STANDARD
                    .decode(data)
                    .map_err(|e| CouchError::InvalidDocument(format!("attachment data is not base64: {}", e)))
            })
            .transpose()
    }
}

/// Serializes a document for POST/PUT.
///
/// A top-level `_revisions` object of exactly `{"start":0,"ids":null}` is
/// dropped so that types which carry the history unconditionally still
/// create cleanly. Anything else is sent as serialized.
pub fn encode_document<T: Serialize + ?Sized>(doc: &T) -> CouchResult<String> {
    let mut value = serde_json::to_value(doc).map_err(|e| CouchError::Encode(e.to_string()))?;

    if let Value::Object(map) = &mut value {
        if map.get(REVISIONS_FIELD).map_or(false, is_zero_revisions) {
            map.remove(REVISIONS_FIELD);
        }
    }

    serde_json::to_string(&value).map_err(|e| CouchError::Encode(e.to_string()))
}

fn is_zero_revisions(value: &Value) -> bool {
    let Some(map) = value.as_object() else {
        return false;
    };

    map.len() == 2
        && map.get("start").and_then(Value::as_u64) == Some(0)
        && map.get("ids").map_or(false, Value::is_null)
}

/// Compact JSON for logging and debugging; empty when `value` cannot be
/// serialized.
pub fn to_json_string<T: Serialize + ?Sized>(value: &T) -> String {
    serde_json::to_string(value).unwrap_or_default()
}
