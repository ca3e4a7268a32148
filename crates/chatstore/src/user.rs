//! User repository over the table store

use std::sync::Arc;

use chrono::Utc;
use parking_lot::RwLock;
use tabledb::TableStore;

use crate::entity::User;
use crate::error::{Error, Result};
use crate::{NO_LIMIT, USER_TABLE};

/// Typed repository for [`User`] rows
///
/// The store's lock only covers single calls; the repository's own lock
/// makes compound sequences (counter read + insert, fetch + conditional
/// write) atomic so two writers never compute the same next identifier.
pub struct UserRepo {
    db: Arc<TableStore>,
    lock: RwLock<()>,
}

impl UserRepo {
    /// Create the repository, ensuring the backing table exists
    pub fn new(db: Arc<TableStore>) -> Self {
        if db.table(USER_TABLE).is_err() {
            db.create_table(USER_TABLE);
        }

        Self {
            db,
            lock: RwLock::new(()),
        }
    }

    fn fetch(&self, id: u64) -> Result<User> {
        let row = self
            .db
            .row(USER_TABLE, &id.to_string())
            .map_err(|_| Error::NoSuchUser)?;

        serde_json::from_value(row).map_err(|_| Error::NoSuchUser)
    }

    fn all(&self, offset: usize, limit: usize) -> Vec<User> {
        let rows = match self.db.rows(USER_TABLE, offset, limit) {
            Ok(rows) => rows,
            Err(_) => return Vec::new(),
        };

        // Rows that fail to decode are skipped
        rows.into_iter()
            .filter_map(|row| serde_json::from_value(row).ok())
            .collect()
    }

    fn by_email(&self, email: &str) -> Result<User> {
        self.all(0, NO_LIMIT)
            .into_iter()
            .find(|u| u.email == email)
            .ok_or(Error::NoSuchUser)
    }

    fn by_username(&self, username: &str) -> Result<User> {
        self.all(0, NO_LIMIT)
            .into_iter()
            .find(|u| u.username == username)
            .ok_or(Error::NoSuchUser)
    }

    /// Insert a user, assigning its id and stamping both timestamps
    ///
    /// Returns the stored entity.
    pub fn add(&self, mut user: User) -> Result<User> {
        let _guard = self.lock.write();

        let next = self.db.counter(USER_TABLE)? + 1;
        let now = Utc::now();

        user.id = next;
        user.created_at = now;
        user.updated_at = now;

        self.db
            .add_row(USER_TABLE, &next.to_string(), serde_json::to_value(&user)?)?;

        Ok(user)
    }

    /// Get a user by id
    pub fn get(&self, id: u64) -> Result<User> {
        let _guard = self.lock.read();

        self.fetch(id)
    }

    /// Find the user registered under `email` (full-table scan)
    pub fn get_by_email(&self, email: &str) -> Result<User> {
        let _guard = self.lock.read();

        self.by_email(email)
    }

    /// Find the user registered under `username` (full-table scan)
    pub fn get_by_username(&self, username: &str) -> Result<User> {
        let _guard = self.lock.read();

        self.by_username(username)
    }

    /// List users in insertion order with offset/limit pagination
    pub fn get_all(&self, offset: usize, limit: usize) -> Vec<User> {
        let _guard = self.lock.read();

        self.all(offset, limit)
    }

    /// Replace a user's mutable fields
    ///
    /// The id and `created_at` are preserved from the stored row;
    /// `updated_at` is restamped. Returns the stored (updated) entity.
    pub fn update(&self, id: u64, mut updated: User) -> Result<User> {
        let _guard = self.lock.write();

        let prior = self.fetch(id)?;

        updated.id = id;
        updated.created_at = prior.created_at;
        updated.updated_at = Utc::now();

        self.db
            .alter_row(USER_TABLE, &id.to_string(), serde_json::to_value(&updated)?)
            .map_err(|_| Error::NoSuchUser)?;

        Ok(updated)
    }

    /// Remove a user, returning the removed entity
    pub fn delete(&self, id: u64) -> Result<User> {
        let _guard = self.lock.write();

        let user = self.fetch(id)?;

        self.db
            .drop_row(USER_TABLE, &id.to_string())
            .map_err(|_| Error::NoSuchUser)?;

        Ok(user)
    }

    /// Enforce email/username uniqueness ahead of a create or update
    ///
    /// Two full-table scans standing in for relational unique constraints.
    pub fn check_unique(&self, email: &str, username: &str) -> Result<()> {
        let _guard = self.lock.read();

        if self.by_email(email).is_ok() {
            return Err(Error::EmailExists);
        }

        if self.by_username(username).is_ok() {
            return Err(Error::UsernameExists);
        }

        Ok(())
    }
}
