//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async methods
//! that accept `&PgPool` as the first argument.

pub mod search_request_repo;

pub use search_request_repo::SearchRequestRepo;
