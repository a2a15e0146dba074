mod adapter;

pub use adapter::*;

pub type CouchResult<T> = Result<T, CouchError>;
