//! Seed dataset for development runs
//!
//! Populates the chat tables through the same `create_table`/`add_row`
//! primitives the repositories use. Only invoked when explicitly enabled.

use chrono::Utc;
use tabledb::TableStore;

use crate::entity::{PrivateMessage, PublicMessage, User};
use crate::error::Result;
use crate::{PRIVATE_MESSAGE_TABLE, PUBLIC_MESSAGE_TABLE, USER_TABLE};

/// Load the fixed seed dataset into the store
///
/// Recreates the three chat tables, so any existing rows in them are
/// discarded. Passwords are pre-hashed; the plaintext for all three
/// accounts is known to the development team only.
pub fn load_fixtures(db: &TableStore) -> Result<()> {
    let now = Utc::now();

    let users = [
        User {
            id: 1,
            username: "test".to_string(),
            email: "test@mail.ru".to_string(),
            hashed_password: "$2a$10$n1ZupQQL9NBnIDHShSIfwut3wf2cUMtsmzBo/7r29oRo4tYRrmoLS"
                .to_string(),
            created_at: now,
            updated_at: now,
        },
        User {
            id: 2,
            username: "test2".to_string(),
            email: "test2@mail.ru".to_string(),
            hashed_password: "$2a$10$O3bRPhNaWgVibnpkUFL.K.xXwmYnDKKMJ1Ak4iavFrSnn8wAsgYPW"
                .to_string(),
            created_at: now,
            updated_at: now,
        },
        User {
            id: 3,
            username: "test3".to_string(),
            email: "test3@mail.ru".to_string(),
            hashed_password: "$2a$10$lgQ9a71CwJQkAF1yUcKKl..RGDT4OaGRjyBAVFgGupkdMclmS7wMS"
                .to_string(),
            created_at: now,
            updated_at: now,
        },
    ];

    db.create_table(USER_TABLE);
    for user in &users {
        db.add_row(USER_TABLE, &user.id.to_string(), serde_json::to_value(user)?)?;
    }

    let public_messages = [
        PublicMessage {
            id: 1,
            from_username: "test".to_string(),
            content: "Hello everyone, I'm Test!".to_string(),
            sent_at: now,
            edited_at: now,
        },
        PublicMessage {
            id: 2,
            from_username: "test2".to_string(),
            content: "Hello everyone, I'm Test2 ;)".to_string(),
            sent_at: now,
            edited_at: now,
        },
        PublicMessage {
            id: 3,
            from_username: "test3".to_string(),
            content: "What's up! I'm Test3".to_string(),
            sent_at: now,
            edited_at: now,
        },
    ];

    db.create_table(PUBLIC_MESSAGE_TABLE);
    for msg in &public_messages {
        db.add_row(
            PUBLIC_MESSAGE_TABLE,
            &msg.id.to_string(),
            serde_json::to_value(msg)?,
        )?;
    }

    let private_messages = [
        PrivateMessage {
            id: 1,
            from_username: "test".to_string(),
            to_username: "test2".to_string(),
            content: "Excuse me, where am I?".to_string(),
            sent_at: now,
            edited_at: now,
        },
        PrivateMessage {
            id: 2,
            from_username: "test2".to_string(),
            to_username: "test".to_string(),
            content: "Ohh.. You are being tested too!".to_string(),
            sent_at: now,
            edited_at: now,
        },
        PrivateMessage {
            id: 3,
            from_username: "test3".to_string(),
            to_username: "test2".to_string(),
            content: "Have something?".to_string(),
            sent_at: now,
            edited_at: now,
        },
        PrivateMessage {
            id: 4,
            from_username: "test2".to_string(),
            to_username: "test3".to_string(),
            content: "What??.. Get off me!".to_string(),
            sent_at: now,
            edited_at: now,
        },
    ];

    db.create_table(PRIVATE_MESSAGE_TABLE);
    for msg in &private_messages {
        db.add_row(
            PRIVATE_MESSAGE_TABLE,
            &msg.id.to_string(),
            serde_json::to_value(msg)?,
        )?;
    }

    Ok(())
}
