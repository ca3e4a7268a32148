//! Domain entities persisted as table rows
//!
//! Serde field names are the persisted schema; the same shape ends up in
//! the snapshot file.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Registered chat user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    /// Identifier assigned by the repository on insert
    pub id: u64,
    /// Unique across the user table
    pub email: String,
    /// Unique across the user table; messages reference it
    pub username: String,
    /// Password hash produced by the service layer
    pub hashed_password: String,
    /// Stamped on insert, immutable afterwards
    pub created_at: DateTime<Utc>,
    /// Restamped on every update
    pub updated_at: DateTime<Utc>,
}

/// Message visible to every user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PublicMessage {
    /// Identifier assigned by the repository on insert
    pub id: u64,
    /// Sender's username
    pub from_username: String,
    /// Message body
    pub content: String,
    /// Stamped on insert, immutable afterwards
    pub sent_at: DateTime<Utc>,
    /// Restamped on every update
    pub edited_at: DateTime<Utc>,
}

/// Message addressed to a single user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PrivateMessage {
    /// Identifier assigned by the repository on insert
    pub id: u64,
    /// Sender's username
    pub from_username: String,
    /// Addressee's username
    pub to_username: String,
    /// Message body
    pub content: String,
    /// Stamped on insert, immutable afterwards
    pub sent_at: DateTime<Utc>,
    /// Restamped on every update
    pub edited_at: DateTime<Utc>,
}
