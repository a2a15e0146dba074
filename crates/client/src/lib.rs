//! Typed client for CouchDB's REST interface.
//!
//! [`CouchCandy`] turns method calls into HTTP requests against a
//! [`Session`]'s server and decodes the JSON bodies into typed envelopes. All
//! network I/O goes through a [`Transport`], so tests can swap in canned
//! responses without a running server.

pub use {design::*, document::*, err::*, options::*, result::*, session::*};

pub use http::{
    redact_url, url_builder, CouchCandy, RawResponse, ReqwestTransport, Transport, UrlBuilder,
    JSON_CONTENT_TYPE,
};

pub mod design;
mod document;
pub mod err;
mod http;
pub mod options;
pub mod result;
mod session;
