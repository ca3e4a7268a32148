//! # chatstore
//!
//! Typed chat repositories over the [`tabledb`] store.
//!
//! Each repository binds one entity type to one table: rows go in and out
//! as JSON values at the store boundary, while callers only ever see the
//! concrete entity structs. Compound operations (id assignment + insert,
//! fetch + conditional write) are serialized by a per-repository lock on
//! top of the store's own per-call locking.

#![warn(missing_docs)]

mod entity;
mod error;
pub mod fixtures;
mod private_message;
mod public_message;
mod user;

pub use entity::{PrivateMessage, PublicMessage, User};
pub use error::{Error, Result};
pub use private_message::PrivateMessageRepo;
pub use public_message::PublicMessageRepo;
pub use user::UserRepo;

/// Backing table for [`User`] rows
pub const USER_TABLE: &str = "users";

/// Backing table for [`PublicMessage`] rows
pub const PUBLIC_MESSAGE_TABLE: &str = "public_messages";

/// Backing table for [`PrivateMessage`] rows
pub const PRIVATE_MESSAGE_TABLE: &str = "private_messages";

/// Limit sentinel meaning "no limit" for paginated reads
pub const NO_LIMIT: usize = usize::MAX;

#[cfg(test)]
mod tests {
    #[test]
    fn it_works() {
        assert_eq!(2 + 2, 4);
    }
}
