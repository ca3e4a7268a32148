//! Point-in-time JSON snapshot persistence
//!
//! The store is serialized exactly once, when the owning process shuts
//! down. A snapshot is a JSON object keyed by table name, each table an
//! ordered array of `{id, value}` pairs, pretty-printed with tab
//! indentation for human inspection. There is no append log; anything
//! written after the last successful snapshot is lost on crash.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use tokio::sync::oneshot;
use tokio_util::sync::CancellationToken;
use tracing::{error, info, warn};

use crate::error::Result;
use crate::store::TableStore;
use crate::table::Table;

/// File mode for the snapshot file on unix
#[cfg(unix)]
const SNAPSHOT_FILE_MODE: u32 = 0o600;

/// Saves and restores a [`TableStore`] at a fixed filesystem path
pub struct SnapshotManager {
    path: PathBuf,
}

impl SnapshotManager {
    /// Create a manager for the given snapshot path
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Path the snapshot is read from and written to
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Rehydrate a store from the snapshot file
    ///
    /// Counters are re-derived from the loaded tables; see
    /// [`TableStore::from_tables`].
    pub fn load(&self) -> Result<TableStore> {
        let text = fs::read_to_string(&self.path)?;
        let tables: HashMap<String, Table> = serde_json::from_str(&text)?;

        Ok(TableStore::from_tables(tables))
    }

    /// Rehydrate a store, falling back to an empty one
    ///
    /// A missing file or malformed JSON is not fatal: the caller gets a
    /// fresh store backed by the same path for the next save.
    pub fn load_or_empty(&self) -> TableStore {
        match self.load() {
            Ok(store) => {
                info!("Restored store state from {:?}", self.path);
                store
            }
            Err(e) => {
                warn!(
                    "Cannot restore store state from {:?} ({}), starting empty",
                    self.path, e
                );
                TableStore::new()
            }
        }
    }

    /// Serialize the full store to the snapshot path
    ///
    /// Operates on a point-in-time copy of the tables; no store lock is
    /// held during serialization or file I/O.
    pub fn save(&self, store: &TableStore) -> Result<()> {
        let tables = store.snapshot_tables();

        let mut buf = Vec::new();
        let formatter = PrettyFormatter::with_indent(b"\t");
        let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
        tables.serialize(&mut ser)?;

        fs::write(&self.path, &buf)?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            fs::set_permissions(&self.path, fs::Permissions::from_mode(SNAPSHOT_FILE_MODE))?;
        }

        Ok(())
    }
}

/// Spawn the shutdown waiter: block until `shutdown` fires, save once,
/// publish the outcome
///
/// The returned receiver is the completion channel. The owning process
/// must await it before exiting, or the final snapshot write may be lost.
/// A failed save is reported on the channel and not retried.
pub fn save_on_shutdown(
    store: Arc<TableStore>,
    manager: SnapshotManager,
    shutdown: CancellationToken,
) -> oneshot::Receiver<Result<()>> {
    let (tx, rx) = oneshot::channel();

    tokio::spawn(async move {
        shutdown.cancelled().await;

        let outcome = manager.save(&store);
        match &outcome {
            Ok(()) => info!("Store state saved to {:?}", manager.path()),
            Err(e) => error!("Saving store state to {:?} failed: {}", manager.path(), e),
        }

        let _ = tx.send(outcome);
    });

    rx
}
