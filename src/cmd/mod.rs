pub mod ingest;
pub mod search;
pub mod validate;
