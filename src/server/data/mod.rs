//! Database repository layer for all domain entities.
//!
//! Each repository wraps a `&DatabaseConnection`, converts entity models to domain models
//! at the boundary, and commits an aggregate (main row plus child rows) inside one
//! transaction. Saves write the changed columns and per-item child row edits only. Repositories of pipeline records also implement `Repository`, which is
//! how the update pipeline loads and saves them.

pub mod article;
pub mod category;
pub mod comment;
pub mod message;
pub mod project;
pub mod user;

#[cfg(test)]
mod test;

use sea_orm::ActiveValue;
use std::collections::HashMap;

use crate::server::pipeline::mutator::Mutation;

/// Groups child rows by their parent id.
pub(crate) fn group_by<T>(rows: Vec<T>, key: impl Fn(&T) -> i32) -> HashMap<i32, Vec<T>> {
    let mut groups: HashMap<i32, Vec<T>> = HashMap::new();
    for row in rows {
        groups.entry(key(&row)).or_default().push(row);
    }
    groups
}

/// `Set(value)` when the mutation changed `field`, `NotSet` otherwise.
pub(crate) fn set_if<R, V>(mutation: &Mutation<R>, field: &str, value: V) -> ActiveValue<V>
where
    V: Into<sea_orm::Value>,
{
    if mutation.touches(field) {
        ActiveValue::Set(value)
    } else {
        ActiveValue::NotSet
    }
}
