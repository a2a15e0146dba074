//! CouchDB HTTP client module
//!
//! ## Module Organization
//!
//! - `client`: Core client struct and constructors
//! - `transport`: The `Transport` trait and its reqwest implementation
//! - `url_builder`: URL construction utilities
//! - `response`: Response parsing utilities
//! - `database`: Database administration operations
//! - `document`: Document CRUD operations
//! - `view`: `_all_docs`, views, list functions and design documents
//! - `attachment`: Attachment upload, download and removal
//! - `changes`: Change feed
//! - `helpers`: Helper functions

mod attachment;
mod changes;
pub mod client;
mod database;
mod document;
pub mod helpers;
mod response;
pub mod transport;
pub mod url_builder;
mod view;

pub use client::CouchCandy;
pub use helpers::redact_url;
pub use transport::{RawResponse, ReqwestTransport, Transport, JSON_CONTENT_TYPE};
pub use url_builder::UrlBuilder;
