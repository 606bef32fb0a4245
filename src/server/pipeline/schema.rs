//! Declarative request validation.
//!
//! A `Schema` is a list of `FieldRule`s built once at startup. `Schema::validate` checks
//! a `FormInput` against every rule, coerces form strings into their declared types and
//! returns either the normalized values or the complete list of violations. Validation
//! never short-circuits and never touches a collaborator.

use serde_json::{Number, Value};
use std::collections::BTreeSet;
use url::Url;

use crate::server::{
    collaborator::storage::Asset,
    error::{
        schema::SchemaError,
        validation::{FieldError, ValidationErrors},
    },
    pipeline::patch::{Patch, PatchValue},
    util::form::FormInput,
};

/// Element type of a set action value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemKind {
    String,
    Integer,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    String,
    Number,
    /// Whole number within the `i32` range.
    Integer,
    Boolean,
    /// Array of strings, or a comma separated string.
    StringList,
    /// Array of integers, or a comma separated string.
    IntegerList,
    /// `{action: "add" | "remove", value}` producing `Add` / `Remove` patch entries.
    SetAction(ItemKind),
    /// Multipart file upload.
    Asset,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Email,
    Url,
}

/// Validation rule for one field.
#[derive(Debug, Clone)]
pub struct FieldRule {
    name: &'static str,
    kind: FieldKind,
    required: bool,
    allow_empty: bool,
    format: Option<Format>,
    min: Option<i64>,
    max: Option<i64>,
    default: Option<Value>,
    equals: Option<&'static str>,
    with: Vec<&'static str>,
    strip: bool,
}

impl FieldRule {
    fn new(name: &'static str, kind: FieldKind) -> Self {
        Self {
            name,
            kind,
            required: false,
            allow_empty: false,
            format: None,
            min: None,
            max: None,
            default: None,
            equals: None,
            with: Vec::new(),
            strip: false,
        }
    }

    pub fn string(name: &'static str) -> Self {
        Self::new(name, FieldKind::String)
    }

    pub fn number(name: &'static str) -> Self {
        Self::new(name, FieldKind::Number)
    }

    pub fn integer(name: &'static str) -> Self {
        Self::new(name, FieldKind::Integer)
    }

    pub fn boolean(name: &'static str) -> Self {
        Self::new(name, FieldKind::Boolean)
    }

    pub fn string_list(name: &'static str) -> Self {
        Self::new(name, FieldKind::StringList)
    }

    pub fn integer_list(name: &'static str) -> Self {
        Self::new(name, FieldKind::IntegerList)
    }

    pub fn set_action(name: &'static str, item: ItemKind) -> Self {
        Self::new(name, FieldKind::SetAction(item))
    }

    pub fn asset(name: &'static str) -> Self {
        Self::new(name, FieldKind::Asset)
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Accepts `""` for string fields.
    pub fn allow_empty(mut self) -> Self {
        self.allow_empty = true;
        self
    }

    pub fn email(mut self) -> Self {
        self.format = Some(Format::Email);
        self
    }

    pub fn url(mut self) -> Self {
        self.format = Some(Format::Url);
        self
    }

    /// Lower bound: characters for strings, items for lists, value for numbers.
    pub fn min(mut self, min: i64) -> Self {
        self.min = Some(min);
        self
    }

    /// Upper bound: characters for strings, items for lists, value for numbers.
    pub fn max(mut self, max: i64) -> Self {
        self.max = Some(max);
        self
    }

    /// Value substituted when the field is absent.
    pub fn default(mut self, value: impl Into<Value>) -> Self {
        self.default = Some(value.into());
        self
    }

    /// The field must equal `other` whenever it is supplied.
    pub fn equals(mut self, other: &'static str) -> Self {
        self.equals = Some(other);
        self
    }

    /// Whenever this field is supplied, `peer` must be supplied too.
    pub fn with(mut self, peer: &'static str) -> Self {
        self.with.push(peer);
        self
    }

    /// Validated, then dropped from the output.
    pub fn strip(mut self) -> Self {
        self.strip = true;
        self
    }

    fn fail(&self, message: &str) -> FieldError {
        FieldError::new(self.name, format!("\"{}\" {}", self.name, message))
    }

    fn accepts_default(&self, value: &Value) -> bool {
        match self.kind {
            FieldKind::String => value.is_string(),
            FieldKind::Number => value.is_number(),
            FieldKind::Integer => value.as_i64().is_some_and(fits_i32),
            FieldKind::Boolean => value.is_boolean(),
            FieldKind::StringList => value
                .as_array()
                .is_some_and(|items| items.iter().all(Value::is_string)),
            FieldKind::IntegerList => value
                .as_array()
                .is_some_and(|items| items.iter().all(|i| i.as_i64().is_some_and(fits_i32))),
            FieldKind::SetAction(_) | FieldKind::Asset => false,
        }
    }

    fn type_message(&self) -> &'static str {
        match self.kind {
            FieldKind::String => "must be a string",
            FieldKind::Number | FieldKind::Integer => "must be a number",
            FieldKind::Boolean => "must be a boolean",
            FieldKind::StringList | FieldKind::IntegerList => "must be an array",
            FieldKind::SetAction(_) => "must be an object",
            FieldKind::Asset => "must be a file",
        }
    }

    /// Coerces a non-null raw value into a patch entry, checking formats and bounds.
    fn coerce(&self, raw: &Value) -> Result<PatchValue, FieldError> {
        match self.kind {
            FieldKind::String => match raw {
                Value::String(s) => {
                    self.check_string(s)?;
                    Ok(PatchValue::Set(raw.clone()))
                }
                _ => Err(self.fail(self.type_message())),
            },
            FieldKind::Number => {
                let n = match raw {
                    Value::Number(n) => n.as_f64(),
                    Value::String(s) => s.trim().parse::<f64>().ok().filter(|n| n.is_finite()),
                    _ => None,
                }
                .ok_or_else(|| self.fail(self.type_message()))?;
                self.check_bounds(n)?;
                Number::from_f64(n)
                    .map(|n| PatchValue::Set(Value::Number(n)))
                    .ok_or_else(|| self.fail(self.type_message()))
            }
            FieldKind::Integer => {
                let n = parse_integer(raw).map_err(|m| self.fail(m))?;
                self.check_bounds(n as f64)?;
                Ok(PatchValue::Set(Value::from(n)))
            }
            FieldKind::Boolean => {
                let b = match raw {
                    Value::Bool(b) => Some(*b),
                    Value::String(s) => match s.trim().to_ascii_lowercase().as_str() {
                        "true" => Some(true),
                        "false" => Some(false),
                        _ => None,
                    },
                    _ => None,
                }
                .ok_or_else(|| self.fail(self.type_message()))?;
                Ok(PatchValue::Set(Value::Bool(b)))
            }
            FieldKind::StringList => {
                let items: Vec<Value> = match raw {
                    Value::Array(items) => items.clone(),
                    Value::String(s) => split_list(s).map(Value::from).collect(),
                    _ => return Err(self.fail(self.type_message())),
                };
                for (index, item) in items.iter().enumerate() {
                    if !item.is_string() {
                        return Err(self.item_error(index, "must be a string"));
                    }
                }
                self.check_len(items.len())?;
                Ok(PatchValue::Set(Value::Array(items)))
            }
            FieldKind::IntegerList => {
                let raw_items: Vec<Value> = match raw {
                    Value::Array(items) => items.clone(),
                    Value::String(s) => split_list(s).map(Value::from).collect(),
                    _ => return Err(self.fail(self.type_message())),
                };
                let mut items = Vec::with_capacity(raw_items.len());
                for (index, item) in raw_items.iter().enumerate() {
                    let n = parse_integer(item).map_err(|m| self.item_error(index, m))?;
                    items.push(Value::from(n));
                }
                self.check_len(items.len())?;
                Ok(PatchValue::Set(Value::Array(items)))
            }
            FieldKind::SetAction(item) => self.coerce_action(raw, item),
            FieldKind::Asset => Err(self.fail(self.type_message())),
        }
    }

    fn coerce_action(&self, raw: &Value, item: ItemKind) -> Result<PatchValue, FieldError> {
        let parsed;
        let object = match raw {
            Value::Object(object) => object,
            Value::String(s) => {
                parsed = serde_json::from_str::<Value>(s)
                    .map_err(|_| self.fail(self.type_message()))?;
                parsed
                    .as_object()
                    .ok_or_else(|| self.fail(self.type_message()))?
            }
            _ => return Err(self.fail(self.type_message())),
        };

        let value = match object.get("value") {
            None | Some(Value::Null) => {
                return Err(FieldError::nested(
                    &[self.name, "value"],
                    format!("\"{}.value\" is required", self.name),
                ))
            }
            Some(value) => match item {
                ItemKind::String => match value {
                    Value::String(s) if !s.is_empty() => value.clone(),
                    _ => {
                        return Err(FieldError::nested(
                            &[self.name, "value"],
                            format!("\"{}.value\" must be a string", self.name),
                        ))
                    }
                },
                ItemKind::Integer => Value::from(parse_integer(value).map_err(|m| {
                    FieldError::nested(
                        &[self.name, "value"],
                        format!("\"{}.value\" {}", self.name, m),
                    )
                })?),
            },
        };

        match object.get("action").and_then(Value::as_str) {
            Some("add") => Ok(PatchValue::Add(value)),
            Some("remove") => Ok(PatchValue::Remove(value)),
            _ => Err(FieldError::nested(
                &[self.name, "action"],
                format!("\"{}.action\" must be one of [add, remove]", self.name),
            )),
        }
    }

    fn item_error(&self, index: usize, message: &str) -> FieldError {
        let index = index.to_string();
        FieldError::nested(
            &[self.name, index.as_str()],
            format!("\"{}[{}]\" {}", self.name, index, message),
        )
    }

    fn check_string(&self, s: &str) -> Result<(), FieldError> {
        if s.is_empty() {
            return if self.allow_empty {
                Ok(())
            } else {
                Err(self.fail("is not allowed to be empty"))
            };
        }

        match self.format {
            Some(Format::Email) if !is_email(s) => return Err(self.fail("must be a valid email")),
            Some(Format::Url) if !is_url(s) => return Err(self.fail("must be a valid uri")),
            _ => {}
        }

        let len = s.chars().count() as i64;
        if let Some(min) = self.min.filter(|min| len < *min) {
            return Err(self.fail(&format!(
                "length must be at least {} characters long",
                min
            )));
        }
        if let Some(max) = self.max.filter(|max| len > *max) {
            return Err(self.fail(&format!(
                "length must be less than or equal to {} characters long",
                max
            )));
        }
        Ok(())
    }

    fn check_bounds(&self, n: f64) -> Result<(), FieldError> {
        if let Some(min) = self.min.filter(|min| n < *min as f64) {
            return Err(self.fail(&format!("must be greater than or equal to {}", min)));
        }
        if let Some(max) = self.max.filter(|max| n > *max as f64) {
            return Err(self.fail(&format!("must be less than or equal to {}", max)));
        }
        Ok(())
    }

    fn check_len(&self, len: usize) -> Result<(), FieldError> {
        let len = len as i64;
        if let Some(min) = self.min.filter(|min| len < *min) {
            return Err(self.fail(&format!("must contain at least {} items", min)));
        }
        if let Some(max) = self.max.filter(|max| len > *max) {
            return Err(self.fail(&format!(
                "must contain less than or equal to {} items",
                max
            )));
        }
        Ok(())
    }
}

fn fits_i32(n: i64) -> bool {
    i32::try_from(n).is_ok()
}

fn parse_integer(raw: &Value) -> Result<i64, &'static str> {
    let n = match raw {
        Value::Number(n) => match n.as_i64() {
            Some(n) => n,
            None if n.as_f64().is_some_and(|f| f.fract() != 0.0) => {
                return Err("must be an integer")
            }
            None => return Err("must be a safe number"),
        },
        Value::String(s) => {
            let s = s.trim();
            match s.parse::<i64>() {
                Ok(n) => n,
                Err(_) if s.parse::<f64>().is_ok() => return Err("must be an integer"),
                Err(_) => return Err("must be a number"),
            }
        }
        _ => return Err("must be a number"),
    };

    if fits_i32(n) {
        Ok(n)
    } else {
        Err("must be a safe number")
    }
}

fn split_list(s: &str) -> impl Iterator<Item = &str> {
    s.split(',').map(str::trim).filter(|item| !item.is_empty())
}

fn is_email(s: &str) -> bool {
    let Some((local, domain)) = s.split_once('@') else {
        return false;
    };

    !local.is_empty()
        && !domain.contains('@')
        && !s.chars().any(char::is_whitespace)
        && domain.split('.').count() >= 2
        && domain.split('.').all(|label| !label.is_empty())
}

fn is_url(s: &str) -> bool {
    Url::parse(s)
        .map(|url| matches!(url.scheme(), "http" | "https") && url.host().is_some())
        .unwrap_or(false)
}

/// A validated set of field rules.
#[derive(Debug, Clone)]
pub struct Schema {
    name: &'static str,
    rules: Vec<FieldRule>,
}

pub struct SchemaBuilder {
    name: &'static str,
    rules: Vec<FieldRule>,
}

impl SchemaBuilder {
    pub fn field(mut self, rule: FieldRule) -> Self {
        self.rules.push(rule);
        self
    }

    /// Checks the definition itself.
    ///
    /// # Returns
    /// - `Ok(Schema)` - Definition is consistent
    /// - `Err(SchemaError)` - Duplicate field, dangling `equals` / `with` reference,
    ///   mistyped default, or a required field with a default
    pub fn build(self) -> Result<Schema, SchemaError> {
        let mut names = BTreeSet::new();
        for rule in &self.rules {
            if !names.insert(rule.name) {
                return Err(SchemaError::DuplicateField {
                    schema: self.name.to_string(),
                    field: rule.name.to_string(),
                });
            }
        }

        for rule in &self.rules {
            for reference in rule.equals.iter().chain(rule.with.iter()) {
                if !names.contains(reference) {
                    return Err(SchemaError::UnknownReference {
                        schema: self.name.to_string(),
                        field: rule.name.to_string(),
                        reference: reference.to_string(),
                    });
                }
            }

            if let Some(default) = &rule.default {
                if rule.required {
                    return Err(SchemaError::RequiredWithDefault {
                        schema: self.name.to_string(),
                        field: rule.name.to_string(),
                    });
                }
                if !rule.accepts_default(default) {
                    return Err(SchemaError::DefaultTypeMismatch {
                        schema: self.name.to_string(),
                        field: rule.name.to_string(),
                    });
                }
            }
        }

        Ok(Schema {
            name: self.name,
            rules: self.rules,
        })
    }
}

impl Schema {
    pub fn builder(name: &'static str) -> SchemaBuilder {
        SchemaBuilder {
            name,
            rules: Vec::new(),
        }
    }

    /// Validates `input` against every rule.
    ///
    /// # Returns
    /// - `Ok(Normalized)` - Coerced values, defaults applied, stripped fields removed;
    ///   explicit `null` on an optional field is kept as a no-op entry
    /// - `Err(ValidationErrors)` - Every violation found, in rule order after unknown keys
    pub fn validate(&self, input: &FormInput) -> Result<Normalized, ValidationErrors> {
        let mut errors = Vec::new();
        let mut patch = Patch::new();

        let known: BTreeSet<&str> = self.rules.iter().map(|r| r.name).collect();
        for key in input.fields.keys().chain(input.assets.keys()) {
            if !known.contains(key.as_str()) {
                errors.push(FieldError::new(key, format!("\"{}\" is not allowed", key)));
            }
        }

        for rule in &self.rules {
            let entry = match rule.kind {
                FieldKind::Asset => match (input.assets.get(rule.name), input.fields.get(rule.name)) {
                    (Some(asset), _) => Some(Ok(PatchValue::Asset(asset.clone()))),
                    (None, Some(Value::Null)) => Some(Ok(PatchValue::Null)),
                    (None, Some(_)) => Some(Err(rule.fail(rule.type_message()))),
                    (None, None) => None,
                },
                _ if input.assets.contains_key(rule.name) => {
                    Some(Err(rule.fail(rule.type_message())))
                }
                _ => match input.fields.get(rule.name) {
                    None => None,
                    Some(Value::Null) => Some(Ok(PatchValue::Null)),
                    Some(raw) => Some(rule.coerce(raw)),
                },
            };

            match entry {
                None if rule.required => errors.push(rule.fail("is required")),
                None => {
                    if let Some(default) = &rule.default {
                        patch.insert(rule.name, PatchValue::Set(default.clone()));
                    }
                }
                Some(Ok(PatchValue::Null)) if rule.required => {
                    errors.push(rule.fail("is required"))
                }
                Some(Ok(value)) => patch.insert(rule.name, value),
                Some(Err(error)) => errors.push(error),
            }
        }

        let supplied = |name: &str| matches!(patch.get(name), Some(v) if *v != PatchValue::Null);
        let failed: BTreeSet<String> = errors.iter().map(|e| e.field().to_string()).collect();

        for rule in &self.rules {
            if !supplied(rule.name) {
                continue;
            }

            if let Some(other) = rule.equals {
                if patch.get(rule.name) != patch.get(other) {
                    errors.push(rule.fail(&format!("must be [ref:{}]", other)));
                }
            }

            for peer in &rule.with {
                if !supplied(peer) && !failed.contains(*peer) {
                    errors.push(rule.fail(&format!("missing required peer \"{}\"", peer)));
                }
            }
        }

        if !errors.is_empty() {
            tracing::debug!("Schema '{}' rejected {} field(s)", self.name, errors.len());
            return Err(ValidationErrors(errors));
        }

        for rule in self.rules.iter().filter(|r| r.strip) {
            patch.take(rule.name);
        }

        Ok(Normalized(patch))
    }
}

/// Output of a successful validation.
///
/// Services take the fields they handle specially (passwords, ids, titles) and turn the
/// rest into a patch.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Normalized(Patch);

impl Normalized {
    pub fn get(&self, field: &str) -> Option<&PatchValue> {
        self.0.get(field)
    }

    pub fn get_str(&self, field: &str) -> Option<&str> {
        match self.0.get(field) {
            Some(PatchValue::Set(Value::String(s))) => Some(s),
            _ => None,
        }
    }

    pub fn take(&mut self, field: &str) -> Option<PatchValue> {
        self.0.take(field)
    }

    pub fn take_string(&mut self, field: &str) -> Option<String> {
        match self.0.take(field) {
            Some(PatchValue::Set(Value::String(s))) => Some(s),
            _ => None,
        }
    }

    pub fn take_bool(&mut self, field: &str) -> Option<bool> {
        match self.0.take(field) {
            Some(PatchValue::Set(Value::Bool(b))) => Some(b),
            _ => None,
        }
    }

    pub fn take_i32(&mut self, field: &str) -> Option<i32> {
        match self.0.take(field) {
            Some(PatchValue::Set(value)) => value.as_i64().and_then(|n| i32::try_from(n).ok()),
            _ => None,
        }
    }

    pub fn take_i32_list(&mut self, field: &str) -> Option<Vec<i32>> {
        match self.0.take(field) {
            Some(PatchValue::Set(Value::Array(items))) => Some(
                items
                    .iter()
                    .filter_map(|v| v.as_i64().and_then(|n| i32::try_from(n).ok()))
                    .collect(),
            ),
            _ => None,
        }
    }

    pub fn take_string_list(&mut self, field: &str) -> Option<Vec<String>> {
        match self.0.take(field) {
            Some(PatchValue::Set(Value::Array(items))) => Some(
                items
                    .into_iter()
                    .filter_map(|v| match v {
                        Value::String(s) => Some(s),
                        _ => None,
                    })
                    .collect(),
            ),
            _ => None,
        }
    }

    pub fn take_asset(&mut self, field: &str) -> Option<Asset> {
        match self.0.take(field) {
            Some(PatchValue::Asset(asset)) => Some(asset),
            _ => None,
        }
    }

    pub fn into_patch(self) -> Patch {
        self.0
    }
}
