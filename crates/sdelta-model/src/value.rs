//! Type references, enumerated facets, and annotation values.

use std::fmt;

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveTime, TimeDelta};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::kind::Named;
use crate::schema::ElementId;

/// Reference to a type definition plus the facets applied at the use site.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeRef {
    /// The referenced type definition.
    pub definition: ElementId,
    pub is_collection: bool,
    pub nullable: bool,
    pub max_length: Option<i32>,
    pub unicode: Option<bool>,
    pub precision: Option<i32>,
    pub scale: Option<i32>,
    pub srid: Option<i32>,
}

impl TypeRef {
    /// A nullable, single-valued reference without facets.
    pub fn new(definition: ElementId) -> Self {
        Self {
            definition,
            is_collection: false,
            nullable: true,
            max_length: None,
            unicode: None,
            precision: None,
            scale: None,
            srid: None,
        }
    }

    pub fn collection(definition: ElementId) -> Self {
        Self {
            is_collection: true,
            ..Self::new(definition)
        }
    }

    pub fn not_null(mut self) -> Self {
        self.nullable = false;
        self
    }
}

/// Built-in primitive types.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PrimitiveKind {
    Binary,
    Boolean,
    Byte,
    Date,
    DateTimeOffset,
    Decimal,
    Double,
    Duration,
    Guid,
    Int16,
    Int32,
    Int64,
    SByte,
    Single,
    Stream,
    String,
    TimeOfDay,
    Geography,
    Geometry,
}

impl fmt::Display for PrimitiveKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{self:?}")
    }
}

/// Built-in path types.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PathKind {
    AnnotationPath,
    PropertyPath,
    NavigationPropertyPath,
}

impl fmt::Display for PathKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{self:?}")
    }
}

/// Action taken on dependents when a principal entity is deleted.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OnDeleteAction {
    #[default]
    None,
    Cascade,
    SetNull,
    SetDefault,
}

impl fmt::Display for OnDeleteAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{self:?}")
    }
}

/// The value expression of a vocabulary annotation.
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    Null,
    Binary(Vec<u8>),
    Boolean(bool),
    Date(NaiveDate),
    DateTimeOffset(DateTime<FixedOffset>),
    Decimal(Decimal),
    Duration(TimeDelta),
    Float(f64),
    Guid(Uuid),
    Int(i64),
    String(String),
    TimeOfDay(NaiveTime),
    /// Enum member value, e.g. `Org.Color/Red`.
    EnumMember(String),
    /// A path expression, e.g. `Address/City`.
    Path(String),
    Collection(Vec<Value>),
    Record(Vec<PropertyValue>),
}

impl Value {
    /// Short tag naming which expression form this is.
    pub fn form(&self) -> &'static str {
        match self {
            Self::Null => "Null",
            Self::Binary(_) => "Binary",
            Self::Boolean(_) => "Boolean",
            Self::Date(_) => "Date",
            Self::DateTimeOffset(_) => "DateTimeOffset",
            Self::Decimal(_) => "Decimal",
            Self::Duration(_) => "Duration",
            Self::Float(_) => "Float",
            Self::Guid(_) => "Guid",
            Self::Int(_) => "Int",
            Self::String(_) => "String",
            Self::TimeOfDay(_) => "TimeOfDay",
            Self::EnumMember(_) => "EnumMember",
            Self::Path(_) => "Path",
            Self::Collection(_) => "Collection",
            Self::Record(_) => "Record",
        }
    }
}

/// A named property of a record expression.
#[derive(Clone, Debug, PartialEq)]
pub struct PropertyValue {
    pub name: String,
    pub value: Value,
}

impl PropertyValue {
    pub fn new(name: impl Into<String>, value: Value) -> Self {
        Self {
            name: name.into(),
            value,
        }
    }
}

impl Named for PropertyValue {
    fn name(&self) -> &str {
        &self.name
    }
}
