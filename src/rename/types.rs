//! Shared data types for examples, rename maps and analysis results.

use chrono::{DateTime, Local, NaiveDateTime, TimeZone, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize};
use tracing::warn;

/// Current file name to proposed new name, in input file order.
pub type RenameMap = IndexMap<String, String>;

/// A user-authored rename example.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Example {
    /// Name the file has today
    pub original_name: String,
    /// Name the user wants it to have
    pub new_name: String,
}

impl Example {
    /// Build an example from any pair of strings
    pub fn new(original_name: impl Into<String>, new_name: impl Into<String>) -> Self {
        Self {
            original_name: original_name.into(),
            new_name: new_name.into(),
        }
    }
}

/// One accepted inference outcome.
///
/// Serialized as `{rename_map, timestamp, raw_response}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    rename_map: RenameMap,
    #[serde(
        rename = "timestamp",
        default = "Utc::now",
        deserialize_with = "deserialize_timestamp"
    )]
    created_at: DateTime<Utc>,
    #[serde(default)]
    raw_response: String,
}

impl AnalysisResult {
    /// Create a result stamped with the current time
    pub fn new(rename_map: RenameMap, raw_response: impl Into<String>) -> Self {
        Self::with_timestamp(rename_map, raw_response, Utc::now())
    }

    /// Create a result with an explicit creation time
    pub fn with_timestamp(
        rename_map: RenameMap,
        raw_response: impl Into<String>,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            rename_map,
            created_at,
            raw_response: raw_response.into(),
        }
    }

    /// The complete rename map
    pub fn rename_map(&self) -> &RenameMap {
        &self.rename_map
    }

    /// Proposed name for one file
    pub fn new_name_for(&self, original_name: &str) -> Option<&str> {
        self.rename_map.get(original_name).map(String::as_str)
    }

    /// The service reply this result was parsed from
    pub fn raw_response(&self) -> &str {
        &self.raw_response
    }

    /// When the result was created
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Number of entries whose proposed name differs from the current one
    pub fn changed_count(&self) -> usize {
        self.rename_map
            .iter()
            .filter(|(original, new)| original != new)
            .count()
    }

    /// Copy of this result with one entry replaced, stamped now.
    pub(crate) fn with_override(&self, original_name: &str, new_name: &str) -> Self {
        let mut rename_map = self.rename_map.clone();
        if let Some(slot) = rename_map.get_mut(original_name) {
            *slot = new_name.to_string();
        }
        Self::new(rename_map, self.raw_response.clone())
    }
}

/// Accepts RFC 3339 timestamps and offset-less ISO-8601 timestamps (read as
/// local time). Anything else falls back to "now" instead of failing the load.
fn deserialize_timestamp<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    Ok(parse_timestamp(&raw).unwrap_or_else(|| {
        warn!("unreadable history timestamp '{raw}', using current time");
        Utc::now()
    }))
}

pub(crate) fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return Some(parsed.with_timezone(&Utc));
    }
    let naive = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f").ok()?;
    Local
        .from_local_datetime(&naive)
        .earliest()
        .map(|local| local.with_timezone(&Utc))
}
