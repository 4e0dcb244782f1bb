//! # Records and Kinds
//!
//! Every record carries the same identity triple (`id`, `created_at`,
//! `updated_at`) and an open bag of named attributes. What differs between
//! a `User` and a `Place` is only its [`Kind`], which doubles as the closed
//! lookup table used by the console (to validate class names) and by the
//! store (to rebuild records from the JSON document).
//!
//! Kinds also declare typed default attributes (`Place.number_rooms = 0`,
//! `User.email = ""`). Those defaults belong to the kind, not to the
//! instance: they are readable through [`Record::get`] but only enter the
//! instance bag once they are explicitly set. They also drive how
//! `update` coerces the text a user typed, see [`Kind::coerce`].

use crate::error::{CommandError, HbnbError, Result};
use chrono::{DateTime, NaiveDateTime, SubsecRound, Utc};
use serde_json::{Map, Value};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Field tag naming the kind inside a persisted field mapping.
pub const CLASS_TAG: &str = "__class__";

/// Names that `update` must never overwrite.
pub const PROTECTED_FIELDS: [&str; 4] = ["id", "created_at", "updated_at", CLASS_TAG];

const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.6f";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Kind {
    BaseModel,
    User,
    State,
    City,
    Amenity,
    Place,
    Review,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldType {
    Str,
    Int,
    Float,
    List,
}

impl FieldType {
    pub fn default_value(&self) -> Value {
        match self {
            FieldType::Str => Value::String(String::new()),
            FieldType::Int => Value::from(0),
            FieldType::Float => Value::from(0.0),
            FieldType::List => Value::Array(Vec::new()),
        }
    }

    /// Parses `raw` as this type, or `None` if the text does not fit.
    fn parse(&self, raw: &str) -> Option<Value> {
        match self {
            FieldType::Str => Some(Value::String(raw.to_string())),
            FieldType::Int => raw.trim().parse::<i64>().ok().map(Value::from),
            FieldType::Float => raw
                .trim()
                .parse::<f64>()
                .ok()
                .filter(|f| f.is_finite())
                .map(Value::from),
            FieldType::List => match serde_json::from_str::<Value>(raw) {
                Ok(v @ Value::Array(_)) => Some(v),
                _ => None,
            },
        }
    }
}

use FieldType::{Float, Int, List, Str};

const USER_FIELDS: &[(&str, FieldType)] = &[
    ("email", Str),
    ("password", Str),
    ("first_name", Str),
    ("last_name", Str),
];
const STATE_FIELDS: &[(&str, FieldType)] = &[("name", Str)];
const CITY_FIELDS: &[(&str, FieldType)] = &[("state_id", Str), ("name", Str)];
const AMENITY_FIELDS: &[(&str, FieldType)] = &[("name", Str)];
const PLACE_FIELDS: &[(&str, FieldType)] = &[
    ("city_id", Str),
    ("user_id", Str),
    ("name", Str),
    ("description", Str),
    ("number_rooms", Int),
    ("number_bathrooms", Int),
    ("max_guest", Int),
    ("price_by_night", Int),
    ("latitude", Float),
    ("longitude", Float),
    ("amenity_ids", List),
];
const REVIEW_FIELDS: &[(&str, FieldType)] =
    &[("place_id", Str), ("user_id", Str), ("text", Str)];

impl Kind {
    pub const ALL: [Kind; 7] = [
        Kind::BaseModel,
        Kind::User,
        Kind::State,
        Kind::City,
        Kind::Amenity,
        Kind::Place,
        Kind::Review,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Kind::BaseModel => "BaseModel",
            Kind::User => "User",
            Kind::State => "State",
            Kind::City => "City",
            Kind::Amenity => "Amenity",
            Kind::Place => "Place",
            Kind::Review => "Review",
        }
    }

    /// Declared attributes with their types.
    pub fn fields(&self) -> &'static [(&'static str, FieldType)] {
        match self {
            Kind::BaseModel => &[],
            Kind::User => USER_FIELDS,
            Kind::State => STATE_FIELDS,
            Kind::City => CITY_FIELDS,
            Kind::Amenity => AMENITY_FIELDS,
            Kind::Place => PLACE_FIELDS,
            Kind::Review => REVIEW_FIELDS,
        }
    }

    pub fn field_type(&self, name: &str) -> Option<FieldType> {
        self.fields()
            .iter()
            .find(|(field, _)| *field == name)
            .map(|(_, ty)| *ty)
    }

    /// Turns user-typed text into the value stored under `name`.
    ///
    /// Declared fields are parsed as their declared type; text that does
    /// not parse, and every undeclared field, is kept as the raw string.
    pub fn coerce(&self, name: &str, raw: &str) -> Value {
        self.field_type(name)
            .and_then(|ty| ty.parse(raw))
            .unwrap_or_else(|| Value::String(raw.to_string()))
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Kind {
    type Err = CommandError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Kind::ALL
            .into_iter()
            .find(|kind| kind.name() == s)
            .ok_or(CommandError::UnknownClass)
    }
}

pub fn is_protected(name: &str) -> bool {
    PROTECTED_FIELDS.contains(&name)
}

/// Current time, truncated to the precision the document stores.
pub fn now() -> NaiveDateTime {
    Utc::now().naive_utc().trunc_subsecs(6)
}

pub fn format_timestamp(ts: &NaiveDateTime) -> String {
    ts.format(TIMESTAMP_FORMAT).to_string()
}

/// Accepts `2024-05-01T10:00:00.123456`, the same without the fraction,
/// and RFC 3339 strings carrying an offset.
pub fn parse_timestamp(s: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f")
        .or_else(|_| NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S"))
        .ok()
        .or_else(|| {
            DateTime::parse_from_rfc3339(s)
                .ok()
                .map(|dt| dt.naive_utc())
        })
}

#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    kind: Kind,
    id: String,
    created_at: NaiveDateTime,
    updated_at: NaiveDateTime,
    attributes: Map<String, Value>,
}

impl Record {
    pub fn new(kind: Kind) -> Self {
        let now = now();
        Self {
            kind,
            id: Uuid::new_v4().to_string(),
            created_at: now,
            updated_at: now,
            attributes: Map::new(),
        }
    }

    /// Rebuilds a record from a stored field mapping.
    ///
    /// `__class__` is ignored here; the caller has already resolved it to
    /// `kind`. Any key other than the identity triple becomes an attribute.
    pub fn from_fields(kind: Kind, fields: &Map<String, Value>) -> Result<Self> {
        let id = fields
            .get("id")
            .and_then(Value::as_str)
            .ok_or_else(|| HbnbError::MalformedRecord(format!("{} without an id", kind)))?
            .to_string();
        let created_at = timestamp_field(fields, "created_at", kind, &id)?;
        let updated_at = timestamp_field(fields, "updated_at", kind, &id)?;

        let attributes = fields
            .iter()
            .filter(|(name, _)| !is_protected(name))
            .map(|(name, value)| (name.clone(), value.clone()))
            .collect();

        Ok(Self {
            kind,
            id,
            created_at,
            updated_at: updated_at.max(created_at),
            attributes,
        })
    }

    pub fn kind(&self) -> Kind {
        self.kind
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn created_at(&self) -> NaiveDateTime {
        self.created_at
    }

    pub fn updated_at(&self) -> NaiveDateTime {
        self.updated_at
    }

    pub fn attributes(&self) -> &Map<String, Value> {
        &self.attributes
    }

    /// Composite registry key, `"<Kind>.<id>"`.
    pub fn key(&self) -> String {
        composite_key(self.kind, &self.id)
    }

    /// Instance value, falling back to the kind's declared default.
    pub fn get(&self, name: &str) -> Option<Value> {
        match name {
            "id" => Some(Value::String(self.id.clone())),
            "created_at" => Some(Value::String(format_timestamp(&self.created_at))),
            "updated_at" => Some(Value::String(format_timestamp(&self.updated_at))),
            _ => self.attributes.get(name).cloned().or_else(|| {
                self.kind
                    .field_type(name)
                    .map(|ty| ty.default_value())
            }),
        }
    }

    /// Sets an attribute. Returns `false`, leaving the record untouched,
    /// when `name` is protected.
    pub fn set(&mut self, name: &str, value: Value) -> bool {
        if is_protected(name) {
            return false;
        }
        self.attributes.insert(name.to_string(), value);
        true
    }

    /// Refreshes `updated_at`, never moving it backwards.
    pub fn touch(&mut self) {
        self.updated_at = now().max(self.updated_at);
    }

    /// The instance field mapping as shown by `show`.
    fn instance_fields(&self) -> Map<String, Value> {
        let mut fields = Map::new();
        fields.insert("id".to_string(), Value::String(self.id.clone()));
        fields.insert(
            "created_at".to_string(),
            Value::String(format_timestamp(&self.created_at)),
        );
        fields.insert(
            "updated_at".to_string(),
            Value::String(format_timestamp(&self.updated_at)),
        );
        for (name, value) in &self.attributes {
            fields.insert(name.clone(), value.clone());
        }
        fields
    }

    /// The persisted field mapping, stamped with `__class__`.
    pub fn to_fields(&self) -> Map<String, Value> {
        let mut fields = self.instance_fields();
        fields.insert(
            CLASS_TAG.to_string(),
            Value::String(self.kind.name().to_string()),
        );
        fields
    }
}

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] ({}) {{", self.kind, self.id)?;
        for (i, (name, value)) in self.instance_fields().iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            let name = serde_json::to_string(name).map_err(|_| fmt::Error)?;
            let value = serde_json::to_string(value).map_err(|_| fmt::Error)?;
            write!(f, "{}: {}", name, value)?;
        }
        f.write_str("}")
    }
}

pub fn composite_key(kind: Kind, id: &str) -> String {
    format!("{}.{}", kind, id)
}

fn timestamp_field(
    fields: &Map<String, Value>,
    name: &str,
    kind: Kind,
    id: &str,
) -> Result<NaiveDateTime> {
    fields
        .get(name)
        .and_then(Value::as_str)
        .and_then(parse_timestamp)
        .ok_or_else(|| {
            HbnbError::MalformedRecord(format!("{}.{} has no valid {}", kind, id, name))
        })
}
