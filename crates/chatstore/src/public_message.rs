//! Public message repository over the table store

use std::sync::Arc;

use chrono::Utc;
use parking_lot::RwLock;
use tabledb::TableStore;

use crate::entity::PublicMessage;
use crate::error::{Error, Result};
use crate::PUBLIC_MESSAGE_TABLE;

/// Typed repository for [`PublicMessage`] rows
///
/// Listings are re-sorted by send time after retrieval: physical table
/// order is insertion order, which can drift from chronological order once
/// concurrent writers interleave.
pub struct PublicMessageRepo {
    db: Arc<TableStore>,
    lock: RwLock<()>,
}

impl PublicMessageRepo {
    /// Create the repository, ensuring the backing table exists
    pub fn new(db: Arc<TableStore>) -> Self {
        if db.table(PUBLIC_MESSAGE_TABLE).is_err() {
            db.create_table(PUBLIC_MESSAGE_TABLE);
        }

        Self {
            db,
            lock: RwLock::new(()),
        }
    }

    fn fetch(&self, id: u64) -> Result<PublicMessage> {
        let row = self
            .db
            .row(PUBLIC_MESSAGE_TABLE, &id.to_string())
            .map_err(|_| Error::NoSuchPublicMessage)?;

        serde_json::from_value(row).map_err(|_| Error::NoSuchPublicMessage)
    }

    fn all(&self, offset: usize, limit: usize) -> Vec<PublicMessage> {
        let rows = match self.db.rows(PUBLIC_MESSAGE_TABLE, offset, limit) {
            Ok(rows) => rows,
            Err(_) => return Vec::new(),
        };

        let mut res: Vec<PublicMessage> = rows
            .into_iter()
            .filter_map(|row| serde_json::from_value(row).ok())
            .collect();

        res.sort_by(|a, b| a.sent_at.cmp(&b.sent_at));

        res
    }

    /// Insert a message, assigning its id and stamping both timestamps
    pub fn add(&self, mut msg: PublicMessage) -> Result<PublicMessage> {
        let _guard = self.lock.write();

        let next = self.db.counter(PUBLIC_MESSAGE_TABLE)? + 1;
        let now = Utc::now();

        msg.id = next;
        msg.sent_at = now;
        msg.edited_at = now;

        self.db.add_row(
            PUBLIC_MESSAGE_TABLE,
            &next.to_string(),
            serde_json::to_value(&msg)?,
        )?;

        Ok(msg)
    }

    /// Get a message by id
    pub fn get(&self, id: u64) -> Result<PublicMessage> {
        let _guard = self.lock.read();

        self.fetch(id)
    }

    /// List messages in chronological order with offset/limit pagination
    pub fn get_all(&self, offset: usize, limit: usize) -> Vec<PublicMessage> {
        let _guard = self.lock.read();

        self.all(offset, limit)
    }

    /// Replace a message's content, restamping `edited_at`
    ///
    /// The id and `sent_at` are preserved from the stored row.
    pub fn update(&self, id: u64, mut updated: PublicMessage) -> Result<PublicMessage> {
        let _guard = self.lock.write();

        let prior = self.fetch(id)?;

        updated.id = id;
        updated.sent_at = prior.sent_at;
        updated.edited_at = Utc::now();

        self.db
            .alter_row(
                PUBLIC_MESSAGE_TABLE,
                &id.to_string(),
                serde_json::to_value(&updated)?,
            )
            .map_err(|_| Error::NoSuchPublicMessage)?;

        Ok(updated)
    }

    /// Remove a message, returning the removed entity
    pub fn delete(&self, id: u64) -> Result<PublicMessage> {
        let _guard = self.lock.write();

        let msg = self.fetch(id)?;

        self.db
            .drop_row(PUBLIC_MESSAGE_TABLE, &id.to_string())
            .map_err(|_| Error::NoSuchPublicMessage)?;

        Ok(msg)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use crate::NO_LIMIT;

    fn test_message(from: &str, content: &str) -> PublicMessage {
        PublicMessage {
            id: 0,
            from_username: from.to_string(),
            content: content.to_string(),
            sent_at: Utc::now(),
            edited_at: Utc::now(),
        }
    }

    fn init_repo() -> PublicMessageRepo {
        PublicMessageRepo::new(Arc::new(TableStore::new()))
    }

    #[test]
    fn test_add_and_get() {
        let repo = init_repo();

        let created = repo.add(test_message("alice", "hello")).unwrap();
        assert_eq!(created.id, 1);
        assert_eq!(created.sent_at, created.edited_at);

        assert_eq!(repo.get(created.id).unwrap(), created);
        assert!(matches!(repo.get(99), Err(Error::NoSuchPublicMessage)));
    }

    #[test]
    fn test_get_all_sorted_by_sent_at() {
        let db = Arc::new(TableStore::new());
        db.create_table(PUBLIC_MESSAGE_TABLE);

        // Physical order deliberately disagrees with chronological order
        for (id, minute) in [(1u64, 30u32), (2, 10), (3, 20)] {
            let msg = PublicMessage {
                id,
                from_username: "alice".to_string(),
                content: format!("msg {}", id),
                sent_at: Utc.with_ymd_and_hms(2024, 1, 1, 12, minute, 0).unwrap(),
                edited_at: Utc.with_ymd_and_hms(2024, 1, 1, 12, minute, 0).unwrap(),
            };
            db.add_row(
                PUBLIC_MESSAGE_TABLE,
                &id.to_string(),
                serde_json::to_value(&msg).unwrap(),
            )
            .unwrap();
        }

        let repo = PublicMessageRepo::new(db);
        let got = repo.get_all(0, NO_LIMIT);

        let ids: Vec<u64> = got.iter().map(|m| m.id).collect();
        assert_eq!(ids, vec![2, 3, 1]);
    }

    #[test]
    fn test_update_preserves_sent_at() {
        let repo = init_repo();
        let created = repo.add(test_message("alice", "hello")).unwrap();

        let updated = repo
            .update(created.id, test_message("alice", "hello, edited"))
            .unwrap();

        assert_eq!(updated.id, created.id);
        assert_eq!(updated.content, "hello, edited");
        assert_eq!(updated.sent_at, created.sent_at);
        assert!(updated.edited_at >= created.edited_at);

        assert!(matches!(
            repo.update(99, test_message("alice", "x")),
            Err(Error::NoSuchPublicMessage)
        ));
    }

    #[test]
    fn test_delete() {
        let repo = init_repo();
        let created = repo.add(test_message("alice", "hello")).unwrap();

        let removed = repo.delete(created.id).unwrap();
        assert_eq!(removed, created);
        assert!(matches!(
            repo.delete(created.id),
            Err(Error::NoSuchPublicMessage)
        ));
    }
}
