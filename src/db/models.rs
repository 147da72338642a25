//! Database models
//!
//! Data structures representing database tables

use serde::{Deserialize, Serialize};

/// Login account. Provisioned out-of-band; the panel only ever reads these.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Account {
    pub id: i64,
    pub username: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub created_at: String,
}

/// Managed record exposed through the CRUD API.
///
/// `id` is store-assigned and stable for the record's lifetime; `name` and
/// `email` are never null once created. Email is stored as given, without
/// format validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    pub id: i64,
    pub name: String,
    pub email: String,
}
