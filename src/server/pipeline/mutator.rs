use serde_json::{Map, Value};
use std::collections::BTreeSet;

use crate::server::{
    error::{internal::InternalError, AppError},
    pipeline::{
        patch::{Patch, PatchValue},
        record::{MergePolicy, Record},
    },
};

/// One edit to a single item of a collection field.
///
/// Repositories commit these as child row inserts and deletes, so concurrent edits to
/// the same collection from different snapshots do not overwrite each other.
#[derive(Debug, Clone, PartialEq)]
pub enum ItemChange {
    Added(Value),
    Removed(Value),
    /// Appended to the end of an ordered thread.
    Pushed(Value),
    /// The whole collection was replaced.
    Replaced(Vec<Value>),
}

/// Result of applying a patch; nothing has been persisted yet.
#[derive(Debug, Clone)]
pub struct Mutation<R> {
    pub record: R,
    pub changed: BTreeSet<String>,
    /// Item edits in patch order, keyed by collection field.
    pub items: Vec<(String, ItemChange)>,
}

impl<R> Mutation<R> {
    pub fn is_unchanged(&self) -> bool {
        self.changed.is_empty()
    }

    pub fn touches(&self, field: &str) -> bool {
        self.changed.contains(field)
    }

    /// Item edits recorded for `field`.
    pub fn items_of<'m>(&'m self, field: &'m str) -> impl Iterator<Item = &'m ItemChange> + 'm {
        self.items
            .iter()
            .filter(move |(name, _)| name == field)
            .map(|(_, change)| change)
    }
}

/// Applies patches under each record's merge policy table.
pub struct FieldMutator;

impl FieldMutator {
    /// Applies `patch` to a copy of `record`.
    ///
    /// Entries for undeclared, immutable or computed fields are dropped, as are `Null`
    /// entries and entries whose shape does not fit the field's policy. The identity is
    /// never touched.
    ///
    /// # Returns
    /// - `Ok(Mutation)` - Patched copy, the names of fields whose value changed, and the
    ///   item edits made to collection fields
    /// - `Err(AppError::Internal)` - A raw asset was not uploaded first, or the patched
    ///   value does not fit the record type
    pub fn apply<R: Record>(record: &R, patch: Patch) -> Result<Mutation<R>, AppError> {
        let mut fields = match to_value::<R>(record)? {
            Value::Object(fields) => fields,
            _ => Map::new(),
        };
        let mut changed = BTreeSet::new();
        let mut changes = Vec::new();

        for (field, value) in patch {
            let Some(policy) = R::policy(&field).filter(|_| field != "id") else {
                tracing::debug!("Ignoring undeclared field '{}' on {}", field, R::LABEL);
                continue;
            };

            let modified = match (policy, value) {
                (_, PatchValue::Null) => false,
                (MergePolicy::Immutable | MergePolicy::Computed, _) => {
                    tracing::debug!("Ignoring patch to read-only field '{}' on {}", field, R::LABEL);
                    false
                }
                (MergePolicy::Upload { .. }, PatchValue::Asset(_)) => {
                    return Err(InternalError::UnresolvedAsset(field).into());
                }
                (MergePolicy::Replace | MergePolicy::Upload { .. }, PatchValue::Set(value)) => {
                    replace(&mut fields, &field, value)
                }
                (MergePolicy::AppendSet, PatchValue::Set(Value::Array(items))) => {
                    let mut unique = Vec::with_capacity(items.len());
                    for item in items {
                        if !unique.contains(&item) {
                            unique.push(item);
                        }
                    }
                    let replaced = replace(&mut fields, &field, Value::Array(unique.clone()));
                    if replaced {
                        changes.push((field.clone(), ItemChange::Replaced(unique)));
                    }
                    replaced
                }
                (MergePolicy::AppendSet, PatchValue::Add(value)) => {
                    let mut items = take_array(&mut fields, &field);
                    let added = !items.contains(&value);
                    if added {
                        items.push(value.clone());
                        changes.push((field.clone(), ItemChange::Added(value)));
                    }
                    fields.insert(field.clone(), Value::Array(items));
                    added
                }
                (MergePolicy::AppendSet, PatchValue::Remove(value)) => {
                    let mut items = take_array(&mut fields, &field);
                    let before = items.len();
                    items.retain(|item| *item != value);
                    let removed = items.len() != before;
                    if removed {
                        changes.push((field.clone(), ItemChange::Removed(value)));
                    }
                    fields.insert(field.clone(), Value::Array(items));
                    removed
                }
                (MergePolicy::Notify, PatchValue::Push(value)) => {
                    let mut items = take_array(&mut fields, &field);
                    items.push(value.clone());
                    fields.insert(field.clone(), Value::Array(items));
                    changes.push((field.clone(), ItemChange::Pushed(value)));
                    true
                }
                (policy, value) => {
                    tracing::debug!(
                        "Ignoring {:?} for field '{}' with policy {:?} on {}",
                        value,
                        field,
                        policy,
                        R::LABEL
                    );
                    false
                }
            };

            if modified {
                changed.insert(field);
            }
        }

        let record = serde_json::from_value(Value::Object(fields)).map_err(|source| {
            InternalError::RecordConversion {
                record: R::LABEL,
                source,
            }
        })?;

        Ok(Mutation {
            record,
            changed,
            items: changes,
        })
    }
}

fn to_value<R: Record>(record: &R) -> Result<Value, InternalError> {
    serde_json::to_value(record).map_err(|source| InternalError::RecordConversion {
        record: R::LABEL,
        source,
    })
}

fn replace(fields: &mut Map<String, Value>, field: &str, value: Value) -> bool {
    if fields.get(field) == Some(&value) {
        return false;
    }
    fields.insert(field.to_string(), value);
    true
}

/// Removes and returns the array stored under `field`, empty if missing or not an array.
fn take_array(fields: &mut Map<String, Value>, field: &str) -> Vec<Value> {
    match fields.remove(field) {
        Some(Value::Array(items)) => items,
        _ => Vec::new(),
    }
}
