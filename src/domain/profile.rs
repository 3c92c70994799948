//! CDP query results and the profiles they sample

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// A single customer profile as returned by the customers endpoint
///
/// Only the CRM identifier is interpreted; every other attribute is kept as
/// raw JSON. Decoding never fails on profile content: an `attributes` or
/// `crmId` of the wrong type reads as absent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProfileRecord {
    #[serde(default, deserialize_with = "lenient_attributes")]
    pub attributes: ProfileAttributes,

    #[serde(flatten)]
    pub other: Map<String, Value>,
}

/// Attribute bag of a profile
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProfileAttributes {
    /// CRM identifiers; the CDP stores a single id wrapped in an array
    #[serde(rename = "crmId", default, deserialize_with = "lenient_crm_id")]
    pub crm_id: Vec<Option<String>>,

    #[serde(flatten)]
    pub other: Map<String, Value>,
}

impl ProfileRecord {
    /// Reads a profile from raw JSON; anything but an object is an empty profile
    pub fn from_value(value: Value) -> Self {
        serde_json::from_value(value).unwrap_or_default()
    }

    /// Builds a profile carrying only a CRM identifier
    pub fn with_crm_id(crm_id: impl Into<String>) -> Self {
        Self {
            attributes: ProfileAttributes {
                crm_id: vec![Some(crm_id.into())],
                ..Default::default()
            },
            ..Default::default()
        }
    }

    /// The profile's CRM identifier, if present and non-empty
    pub fn crm_id(&self) -> Option<&str> {
        self.attributes
            .crm_id
            .first()
            .and_then(|id| id.as_deref())
            .filter(|id| !id.is_empty())
    }
}

fn lenient_attributes<'de, D>(deserializer: D) -> Result<ProfileAttributes, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).unwrap_or_default())
}

/// Non-string entries become `None`; a `crmId` that is not an array is empty
fn lenient_crm_id<'de, D>(deserializer: D) -> Result<Vec<Option<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    let ids = match Value::deserialize(deserializer)? {
        Value::Array(entries) => entries
            .into_iter()
            .map(|entry| match entry {
                Value::String(id) => Some(id),
                _ => None,
            })
            .collect(),
        _ => Vec::new(),
    };
    Ok(ids)
}

fn lenient_profiles<'de, D>(deserializer: D) -> Result<Vec<ProfileRecord>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Vec::<Value>::deserialize(deserializer)?;
    Ok(raw.into_iter().map(ProfileRecord::from_value).collect())
}

/// Parsed body of a customers query
///
/// `profiles` is a prefix sample of the matching population, not the whole
/// of it; `total_count` carries the population size. `totalCount` is passed
/// through without validation, so it is held as raw JSON.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QueryResult {
    #[serde(rename = "totalCount", default)]
    pub total_count: Value,

    #[serde(deserialize_with = "lenient_profiles")]
    pub profiles: Vec<ProfileRecord>,

    #[serde(flatten)]
    pub other: Map<String, Value>,
}

impl QueryResult {
    pub fn new(total_count: u64, profiles: Vec<ProfileRecord>) -> Self {
        Self {
            total_count: Value::from(total_count),
            profiles,
            other: Map::new(),
        }
    }

    /// Population size when the CDP reported a non-negative integer
    pub fn total_count(&self) -> Option<u64> {
        self.total_count.as_u64()
    }

    /// `totalCount` as printed in a report line
    ///
    /// Integers print as-is, strings unquoted, and a missing count as `n/a`.
    pub fn total_count_display(&self) -> String {
        match &self.total_count {
            Value::Null => "n/a".to_string(),
            Value::String(s) => s.clone(),
            other => other.to_string(),
        }
    }
}
