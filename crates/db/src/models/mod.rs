//! Row models and DTOs.

pub mod search_request;
