use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::de::{self, Deserializer};
use serde::ser::Serializer;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Heterogeneous record fields, keyed by column/attribute name.
///
/// Requirement rows and offering attribute maps vary by service category, so
/// they are carried as JSON values. A BTreeMap keeps iteration order fixed,
/// which the text normalizer relies on for reproducible output.
pub type FieldMap = BTreeMap<String, Value>;

/// One event's stated need for one service category.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Requirement {
    pub category: String,
    pub fields: FieldMap,
}

impl Requirement {
    pub fn new(category: impl Into<String>, fields: FieldMap) -> Self {
        Self {
            category: category.into(),
            fields,
        }
    }
}

/// A vendor's sellable service instance.
///
/// Only rows in the `Approved` state reach this type; the storage layer
/// applies that filter.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Offering {
    pub id: i64,
    pub name: String,
    pub category: String,
    #[serde(default)]
    pub description: Option<String>,
    pub price: f64,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default)]
    pub attributes: FieldMap,
}

impl Offering {
    /// Field map fed to the text normalizer: the free-text description plus
    /// the attribute mapping, shaped like a requirement row.
    pub fn text_fields(&self) -> FieldMap {
        let mut fields = FieldMap::new();
        if let Some(description) = &self.description {
            fields.insert("description".to_string(), Value::String(description.clone()));
        }
        if !self.attributes.is_empty() {
            let attrs: serde_json::Map<String, Value> = self
                .attributes
                .iter()
                .map(|(k, v)| (k.clone(), v.clone()))
                .collect();
            fields.insert("attributes".to_string(), Value::Object(attrs));
        }
        fields
    }

    /// Display location, `"city, address"` when both parts are known.
    pub fn location(&self) -> String {
        match (&self.city, &self.address) {
            (Some(city), Some(address)) => format!("{}, {}", city, address),
            _ => "Location not specified".to_string(),
        }
    }
}

/// One service line attached to an event.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceLine {
    pub id: i64,
    pub category: String,
}

/// An event's date and its ordered service lines.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventServices {
    pub event_date: NaiveDate,
    pub lines: Vec<ServiceLine>,
}

/// Resolved vendor capacity for a category.
///
/// Serialized as the seat count, or the string `"N/A"` for categories with
/// no capacity notion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Capacity {
    Seats(u32),
    NotApplicable,
}

impl Capacity {
    pub fn seats(&self) -> Option<u32> {
        match self {
            Capacity::Seats(n) => Some(*n),
            Capacity::NotApplicable => None,
        }
    }
}

impl Serialize for Capacity {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Capacity::Seats(n) => serializer.serialize_u32(*n),
            Capacity::NotApplicable => serializer.serialize_str("N/A"),
        }
    }
}

impl<'de> Deserialize<'de> for Capacity {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        match value {
            Value::Number(n) => {
                let seats = n
                    .as_u64()
                    .ok_or_else(|| de::Error::custom("capacity out of range"))?;
                Ok(Capacity::Seats(seats as u32))
            }
            Value::String(s) if s == "N/A" => Ok(Capacity::NotApplicable),
            other => Err(de::Error::custom(format!(
                "expected seat count or \"N/A\", got {}",
                other
            ))),
        }
    }
}

/// An offering enriched with its similarity score, the output unit of the
/// recommendation engine. Never mutated after construction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Recommendation {
    pub vendor_id: i64,
    pub name: String,
    pub price: f64,
    pub capacity: Capacity,
    pub location: String,
    pub images: Vec<String>,
    pub attributes: FieldMap,
    pub similarity_score: f64,
}
