use crate::server::{
    data::user::UserRepository,
    model::{
        page::Page,
        user::{CreateUserParams, Role, UserFilter},
    },
};
use sea_orm::DbErr;
use test_utils::{builder::TestBuilder, factory};

mod create;
mod delete;
mod find;
mod find_by_token;
mod save;
mod set_role_by_email;

fn params(username: &str) -> CreateUserParams {
    CreateUserParams {
        name: "Test User".to_string(),
        username: username.to_string(),
        email: format!("{}@example.com", username),
        password_hash: "hash".to_string(),
        role: Role::Guest,
    }
}
