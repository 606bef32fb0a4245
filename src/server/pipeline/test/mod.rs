use chrono::{TimeZone, Utc};

use crate::server::model::{
    message::Message,
    user::{Role, User},
};

mod projector;

fn user() -> User {
    let at = Utc.with_ymd_and_hms(2026, 1, 5, 12, 0, 0).unwrap();
    User {
        id: 7,
        name: "Ada".to_string(),
        username: "ada".to_string(),
        email: "ada@example.com".to_string(),
        password: "$argon2id$stored".to_string(),
        role: Role::Guest,
        verified: true,
        keywords: None,
        summary: None,
        info: None,
        about: None,
        profile_pic: None,
        tokens: vec!["token-a".to_string()],
        created_at: at,
        updated_at: at,
    }
}

fn message() -> Message {
    let at = Utc.with_ymd_and_hms(2026, 1, 5, 12, 0, 0).unwrap();
    Message {
        id: 3,
        name: "Visitor".to_string(),
        subject: "Hello".to_string(),
        email: "visitor@example.com".to_string(),
        message: "Nice site".to_string(),
        read: false,
        reply: Vec::new(),
        created_at: at,
        updated_at: at,
    }
}
