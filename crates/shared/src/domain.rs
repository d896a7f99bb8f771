use std::fmt;

use serde::{
    de::{MapAccess, Visitor},
    ser::SerializeMap,
    Deserialize, Deserializer, Serialize, Serializer,
};
use serde_json::Value;

/// One activity as delivered by the server.
///
/// Every field defaults independently: a record with a missing or wrongly
/// typed field still renders, with that field left empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ActivityRecord {
    pub description: String,
    pub schedule: String,
    pub participants: Vec<String>,
}

impl ActivityRecord {
    pub fn new(
        description: impl Into<String>,
        schedule: impl Into<String>,
        participants: Vec<String>,
    ) -> Self {
        Self {
            description: description.into(),
            schedule: schedule.into(),
            participants,
        }
    }

    pub fn from_json(value: &Value) -> Self {
        let text = |key: &str| {
            value
                .get(key)
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string()
        };
        let participants = value
            .get("participants")
            .and_then(Value::as_array)
            .map(|entries| {
                entries
                    .iter()
                    .map(|entry| entry.as_str().unwrap_or_default().to_string())
                    .collect::<Vec<_>>()
            })
            .unwrap_or_default();

        Self {
            description: text("description"),
            schedule: text("schedule"),
            participants,
        }
    }
}

/// Immutable snapshot of every activity, in server response order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActivityCatalog {
    entries: Vec<(String, ActivityRecord)>,
}

impl ActivityCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a catalog from ordered entries. A repeated name keeps its first
    /// position and takes the later record.
    pub fn from_entries<I, N>(entries: I) -> Self
    where
        I: IntoIterator<Item = (N, ActivityRecord)>,
        N: Into<String>,
    {
        let mut catalog = Self::new();
        for (name, record) in entries {
            catalog.insert(name.into(), record);
        }
        catalog
    }

    fn insert(&mut self, name: String, record: ActivityRecord) {
        match self.entries.iter_mut().find(|(existing, _)| *existing == name) {
            Some((_, slot)) => *slot = record,
            None => self.entries.push((name, record)),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, name: &str) -> Option<&ActivityRecord> {
        self.entries
            .iter()
            .find(|(existing, _)| existing == name)
            .map(|(_, record)| record)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(name, _)| name.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ActivityRecord)> {
        self.entries
            .iter()
            .map(|(name, record)| (name.as_str(), record))
    }
}

impl Serialize for ActivityCatalog {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (name, record) in &self.entries {
            map.serialize_entry(name, record)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for ActivityCatalog {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct CatalogVisitor;

        impl<'de> Visitor<'de> for CatalogVisitor {
            type Value = ActivityCatalog;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("an object mapping activity names to records")
            }

            fn visit_map<A>(self, mut access: A) -> Result<Self::Value, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut catalog = ActivityCatalog::new();
                while let Some((name, value)) = access.next_entry::<String, Value>()? {
                    catalog.insert(name, ActivityRecord::from_json(&value));
                }
                Ok(catalog)
            }
        }

        deserializer.deserialize_map(CatalogVisitor)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusKind {
    Info,
    Success,
    Error,
}

impl StatusKind {
    pub fn as_str(self) -> &'static str {
        match self {
            StatusKind::Info => "info",
            StatusKind::Success => "success",
            StatusKind::Error => "error",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusMessage {
    pub text: String,
    pub kind: StatusKind,
}

impl StatusMessage {
    pub fn new(kind: StatusKind, text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            kind,
        }
    }

    pub fn info(text: impl Into<String>) -> Self {
        Self::new(StatusKind::Info, text)
    }

    pub fn success(text: impl Into<String>) -> Self {
        Self::new(StatusKind::Success, text)
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self::new(StatusKind::Error, text)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignupRequest {
    pub email: String,
    pub activity: String,
}

impl SignupRequest {
    /// Returns `None` when either field is blank after trimming.
    pub fn from_form(email: &str, activity: &str) -> Option<Self> {
        let email = email.trim();
        if email.is_empty() || activity.trim().is_empty() {
            return None;
        }
        Some(Self {
            email: email.to_string(),
            activity: activity.to_string(),
        })
    }
}

/// Display form of a participant: the local part before `@`, or the whole
/// address when there is none.
pub fn participant_short_name(email: &str) -> &str {
    email.split_once('@').map_or(email, |(local, _)| local)
}

#[cfg(test)]
#[path = "tests/domain_tests.rs"]
mod tests;
