//! Design documents, told apart by their `language` field.

use {
    crate::{CouchDocument, CouchResult},
    serde::{Deserialize, Serialize},
    serde_json::Value,
    std::collections::BTreeMap,
    tracing::debug,
};

pub const LANGUAGE_JAVASCRIPT: &str = "javascript";
pub const LANGUAGE_QUERY: &str = "query";

/// `language: "javascript"` design document with map/reduce views.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct MapReduceDesign {
    #[serde(flatten)]
    pub document: CouchDocument,
    #[serde(default)]
    pub views: BTreeMap<String, MapReduceView>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MapReduceView {
    pub map: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reduce: Option<String>,
}

/// `language: "query"` design document holding Mango indexes.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct IndexDesign {
    #[serde(flatten)]
    pub document: CouchDocument,
    #[serde(default)]
    pub views: BTreeMap<String, IndexView>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct IndexView {
    pub map: IndexMap,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reduce: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<Value>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct IndexMap {
    /// Field name to sort direction.
    #[serde(default)]
    pub fields: BTreeMap<String, String>,
    #[serde(default, skip_serializing_if = "Value::is_null")]
    pub partial_filter_selector: Value,
}

/// One design document, decoded according to its `language`.
#[derive(Clone, Debug, PartialEq)]
pub enum DesignDocument {
    MapReduce(MapReduceDesign),
    Index(IndexDesign),
    Unrecognized { language: Option<String> },
}

#[derive(Deserialize)]
struct LanguageTag {
    #[serde(default)]
    language: Option<String>,
}

impl DesignDocument {
    pub fn from_value(value: Value) -> CouchResult<Self> {
        let tag: LanguageTag = serde_json::from_value(value.clone())?;

        Ok(match tag.language.as_deref() {
            Some(LANGUAGE_JAVASCRIPT) => DesignDocument::MapReduce(serde_json::from_value(value)?),
            Some(LANGUAGE_QUERY) => DesignDocument::Index(serde_json::from_value(value)?),
            _ => DesignDocument::Unrecognized {
                language: tag.language,
            },
        })
    }
}

/// Design documents of a database, bucketed by kind.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DesignDocs {
    pub map_reduce: Vec<MapReduceDesign>,
    pub indexes: Vec<IndexDesign>,
    /// Documents whose `language` was neither `javascript` nor `query`.
    pub unrecognized: usize,
}

impl DesignDocs {
    /// Decodes every document; the first failure aborts the whole batch.
    pub fn partition(docs: impl IntoIterator<Item = Value>) -> CouchResult<Self> {
        let mut out = DesignDocs::default();

        for doc in docs {
            match DesignDocument::from_value(doc)? {
                DesignDocument::MapReduce(design) => out.map_reduce.push(design),
                DesignDocument::Index(design) => out.indexes.push(design),
                DesignDocument::Unrecognized { language } => {
                    debug!(?language, "skipping design document with unrecognized language");
                    out.unrecognized += 1;
                }
            }
        }

        Ok(out)
    }

    pub fn len(&self) -> usize {
        self.map_reduce.len() + self.indexes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::CouchError;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn javascript_doc() -> Value {
        json!({
            "_id": "_design/users",
            "_rev": "1-a",
            "language": "javascript",
            "views": {
                "by_name": {"map": "function(doc) { emit(doc.name, 1); }", "reduce": "_count"},
                "all": {"map": "function(doc) { emit(doc._id, null); }"}
            }
        })
    }

    fn query_doc() -> Value {
        json!({
            "_id": "_design/idx",
            "_rev": "1-b",
            "language": "query",
            "views": {
                "name-index": {
                    "map": {"fields": {"name": "asc"}, "partial_filter_selector": {}},
                    "reduce": "_count",
                    "options": {"def": {"fields": ["name"]}}
                }
            }
        })
    }

    #[test]
    fn partitions_by_language() {
        let docs = DesignDocs::partition(vec![query_doc(), javascript_doc()]).unwrap();

        assert_eq!(docs.map_reduce.len(), 1);
        assert_eq!(docs.indexes.len(), 1);
        assert_eq!(docs.unrecognized, 0);

        let users = &docs.map_reduce[0];
        assert_eq!(users.document.id.as_deref(), Some("_design/users"));
        assert_eq!(users.views["by_name"].reduce.as_deref(), Some("_count"));
        assert_eq!(users.views["all"].reduce, None);

        let idx = &docs.indexes[0].views["name-index"];
        assert_eq!(idx.map.fields["name"], "asc");
        assert_eq!(idx.map.partial_filter_selector, json!({}));
    }

    #[test]
    fn unknown_and_missing_languages_are_counted() {
        let docs = DesignDocs::partition(vec![
            json!({"_id": "_design/a", "language": "erlang"}),
            json!({"_id": "_design/b"}),
            javascript_doc(),
        ])
        .unwrap();

        assert_eq!(docs.len(), 1);
        assert_eq!(docs.unrecognized, 2);
    }

    #[test]
    fn one_bad_document_aborts_the_batch() {
        let broken = json!({"_id": "_design/x", "language": "javascript", "views": {"v": {"map": 7}}});
        let err = DesignDocs::partition(vec![javascript_doc(), broken]).unwrap_err();
        assert!(matches!(err, CouchError::Decode(_)));
    }

    #[test]
    fn non_object_documents_fail() {
        assert!(DesignDocument::from_value(json!("nope")).is_err());
    }
}
