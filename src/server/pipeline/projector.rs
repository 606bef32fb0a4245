use serde::Serialize;
use serde_json::{Map, Value};

use crate::server::{
    error::{internal::InternalError, AppError},
    pipeline::record::Record,
};

/// Outward representation of a record with every sensitive field removed.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct PublicView(Map<String, Value>);

impl PublicView {
    /// Removes `fields` from the view. Removing absent fields is a no-op, so stripping
    /// an already projected view returns it unchanged.
    pub fn strip(mut self, fields: &[&str]) -> Self {
        for field in fields {
            self.0.remove(*field);
        }
        self
    }

    pub fn get(&self, field: &str) -> Option<&Value> {
        self.0.get(field)
    }

    pub fn contains(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }
}

impl From<PublicView> for Value {
    fn from(view: PublicView) -> Self {
        Value::Object(view.0)
    }
}

/// Projects one record.
pub fn project<R: Record>(record: &R) -> Result<PublicView, AppError> {
    let value = serde_json::to_value(record).map_err(|source| InternalError::RecordConversion {
        record: R::LABEL,
        source,
    })?;

    let fields = match value {
        Value::Object(fields) => fields,
        _ => Map::new(),
    };

    Ok(PublicView(fields).strip(R::SENSITIVE))
}

/// Projects every record of a list, keeping order.
pub fn project_all<R: Record>(records: &[R]) -> Result<Vec<PublicView>, AppError> {
    records.iter().map(project).collect()
}
