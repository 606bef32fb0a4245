use serde_json::Value;
use std::collections::BTreeMap;

use crate::server::collaborator::storage::Asset;

/// One requested change to one field.
#[derive(Debug, Clone, PartialEq)]
pub enum PatchValue {
    /// Explicit `null`; the field keeps its value.
    Null,
    Set(Value),
    Add(Value),
    Remove(Value),
    /// Appends to an ordered thread.
    Push(Value),
    /// Raw upload awaiting the dispatcher.
    Asset(Asset),
}

/// Sparse set of field changes keyed by field name.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Patch(BTreeMap<String, PatchValue>);

impl Patch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, field: impl Into<String>, value: PatchValue) {
        self.0.insert(field.into(), value);
    }

    /// Chaining form of `insert(field, PatchValue::Set(value))`.
    pub fn set(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(field, PatchValue::Set(value.into()));
        self
    }

    pub fn add(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(field, PatchValue::Add(value.into()));
        self
    }

    pub fn remove(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(field, PatchValue::Remove(value.into()));
        self
    }

    pub fn null(mut self, field: impl Into<String>) -> Self {
        self.insert(field, PatchValue::Null);
        self
    }

    pub fn asset(mut self, field: impl Into<String>, asset: Asset) -> Self {
        self.insert(field, PatchValue::Asset(asset));
        self
    }

    pub fn get(&self, field: &str) -> Option<&PatchValue> {
        self.0.get(field)
    }

    pub fn take(&mut self, field: &str) -> Option<PatchValue> {
        self.0.remove(field)
    }

    pub fn contains(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &PatchValue)> {
        self.0.iter()
    }
}

impl IntoIterator for Patch {
    type Item = (String, PatchValue);
    type IntoIter = std::collections::btree_map::IntoIter<String, PatchValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl FromIterator<(String, PatchValue)> for Patch {
    fn from_iter<I: IntoIterator<Item = (String, PatchValue)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}
