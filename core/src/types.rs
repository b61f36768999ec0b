//! Domain DTOs for the posts resource.
//!
//! # Design
//! `Record` mirrors one element of the JSON array served at
//! `{base_url}/?id={id}`. It is defined independently from the mock-server's
//! fixture type; integration tests catch any schema drift between the two.
//! Unknown fields are ignored, missing fields fail deserialization.

use serde::{Deserialize, Serialize};

/// A single record returned by the remote resource.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Record {
    pub user_id: i64,
    pub id: i64,
    pub title: String,
    /// Free-form text, may contain embedded line breaks.
    pub body: String,
}
