//! # tabledb
//!
//! In-process, ordered, table-oriented data store with best-effort
//! persistence via a single JSON snapshot taken on shutdown.
//!
//! ## Architecture
//! - **Table**: insertion-ordered, string-keyed rows (opaque JSON values)
//! - **TableStore**: named tables + per-table id counters behind one
//!   store-wide reader/writer lock
//! - **SnapshotManager**: save/restore the whole store as pretty-printed
//!   JSON, triggered once by an external cancellation signal

#![warn(missing_docs)]

mod error;
mod snapshot;
mod store;
mod table;

pub use error::{Error, Result};
pub use snapshot::{save_on_shutdown, SnapshotManager};
pub use store::TableStore;
pub use table::Table;

#[cfg(test)]
mod tests {
    #[test]
    fn it_works() {
        assert_eq!(2 + 2, 4);
    }
}
