//! Private message repository over the table store

use std::sync::Arc;

use chrono::Utc;
use parking_lot::RwLock;
use tabledb::TableStore;

use crate::entity::PrivateMessage;
use crate::error::{Error, Result};
use crate::PRIVATE_MESSAGE_TABLE;

/// Typed repository for [`PrivateMessage`] rows
///
/// Same contract as the public message repository, with an extra addressee
/// field on the entity.
pub struct PrivateMessageRepo {
    db: Arc<TableStore>,
    lock: RwLock<()>,
}

impl PrivateMessageRepo {
    /// Create the repository, ensuring the backing table exists
    pub fn new(db: Arc<TableStore>) -> Self {
        if db.table(PRIVATE_MESSAGE_TABLE).is_err() {
            db.create_table(PRIVATE_MESSAGE_TABLE);
        }

        Self {
            db,
            lock: RwLock::new(()),
        }
    }

    fn fetch(&self, id: u64) -> Result<PrivateMessage> {
        let row = self
            .db
            .row(PRIVATE_MESSAGE_TABLE, &id.to_string())
            .map_err(|_| Error::NoSuchPrivateMessage)?;

        serde_json::from_value(row).map_err(|_| Error::NoSuchPrivateMessage)
    }

    fn all(&self, offset: usize, limit: usize) -> Vec<PrivateMessage> {
        let rows = match self.db.rows(PRIVATE_MESSAGE_TABLE, offset, limit) {
            Ok(rows) => rows,
            Err(_) => return Vec::new(),
        };

        let mut res: Vec<PrivateMessage> = rows
            .into_iter()
            .filter_map(|row| serde_json::from_value(row).ok())
            .collect();

        res.sort_by(|a, b| a.sent_at.cmp(&b.sent_at));

        res
    }

    /// Insert a message, assigning its id and stamping both timestamps
    pub fn add(&self, mut msg: PrivateMessage) -> Result<PrivateMessage> {
        let _guard = self.lock.write();

        let next = self.db.counter(PRIVATE_MESSAGE_TABLE)? + 1;
        let now = Utc::now();

        msg.id = next;
        msg.sent_at = now;
        msg.edited_at = now;

        self.db.add_row(
            PRIVATE_MESSAGE_TABLE,
            &next.to_string(),
            serde_json::to_value(&msg)?,
        )?;

        Ok(msg)
    }

    /// Get a message by id
    pub fn get(&self, id: u64) -> Result<PrivateMessage> {
        let _guard = self.lock.read();

        self.fetch(id)
    }

    /// List messages in chronological order with offset/limit pagination
    pub fn get_all(&self, offset: usize, limit: usize) -> Vec<PrivateMessage> {
        let _guard = self.lock.read();

        self.all(offset, limit)
    }

    /// Replace a message's content, restamping `edited_at`
    ///
    /// The id and `sent_at` are preserved from the stored row.
    pub fn update(&self, id: u64, mut updated: PrivateMessage) -> Result<PrivateMessage> {
        let _guard = self.lock.write();

        let prior = self.fetch(id)?;

        updated.id = id;
        updated.sent_at = prior.sent_at;
        updated.edited_at = Utc::now();

        self.db
            .alter_row(
                PRIVATE_MESSAGE_TABLE,
                &id.to_string(),
                serde_json::to_value(&updated)?,
            )
            .map_err(|_| Error::NoSuchPrivateMessage)?;

        Ok(updated)
    }

    /// Remove a message, returning the removed entity
    pub fn delete(&self, id: u64) -> Result<PrivateMessage> {
        let _guard = self.lock.write();

        let msg = self.fetch(id)?;

        self.db
            .drop_row(PRIVATE_MESSAGE_TABLE, &id.to_string())
            .map_err(|_| Error::NoSuchPrivateMessage)?;

        Ok(msg)
    }
}
