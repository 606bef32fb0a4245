use crate::server::{
    data::message::MessageRepository,
    model::{
        message::{CreateMessageParams, MessageFilter},
        page::Page,
    },
};
use chrono::{Duration, Utc};
use sea_orm::DbErr;
use test_utils::{builder::TestBuilder, factory};

mod create;
mod find;
mod save;
