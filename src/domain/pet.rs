//! Pet record model.
//!
//! A [`Pet`] is the single entity type managed by the console. Its identifier is
//! assigned by the remote service and is opaque to the client: the service may
//! hand out numbers or strings, and [`PetId`] preserves whichever form it got so
//! that update and delete URLs echo it back unchanged.

use crate::domain::field::PetField;
use serde::{Deserialize, Deserializer, Serialize};
use std::borrow::Cow;
use std::fmt;

/// Server-assigned record identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PetId {
    /// Numeric identifier (the common case for the reference service).
    Number(i64),
    /// Any other identifier representation.
    Text(String),
}

impl PetId {
    /// Parses user-supplied text into an identifier.
    ///
    /// Text that parses as an integer becomes [`PetId::Number`] so that it
    /// compares equal to ids decoded from the service.
    ///
    /// ```
    /// use petdesk::domain::PetId;
    ///
    /// assert_eq!(PetId::parse("7"), PetId::Number(7));
    /// assert_eq!(PetId::parse("a-7"), PetId::Text("a-7".to_string()));
    /// ```
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        let raw = raw.trim();
        raw.parse::<i64>()
            .map_or_else(|_| Self::Text(raw.to_string()), Self::Number)
    }
}

impl fmt::Display for PetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::Text(s) => f.write_str(s),
        }
    }
}

impl From<i64> for PetId {
    fn from(value: i64) -> Self {
        Self::Number(value)
    }
}

impl From<i32> for PetId {
    fn from(value: i32) -> Self {
        Self::Number(i64::from(value))
    }
}

impl From<&str> for PetId {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

/// One pet record.
///
/// # Fields
///
/// - `id`: Remote identifier, `None` until the service has created the record
/// - `name`: Display label, must be non-empty for the record to be saveable
/// - `description`: Optional free text (stored as empty when absent)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pet {
    #[serde(default)]
    pub id: Option<PetId>,
    #[serde(default, deserialize_with = "nullable_string")]
    pub name: String,
    #[serde(default, deserialize_with = "nullable_string")]
    pub description: String,
}

impl Pet {
    /// Creates an unsaved record with no identifier.
    #[must_use]
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            id: None,
            name: name.into(),
            description: description.into(),
        }
    }

    /// Returns a copy of this record carrying the given identifier.
    #[must_use]
    pub fn with_id(mut self, id: impl Into<PetId>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Returns the textual value of a field, as used by filtering, sorting
    /// and export. A missing id reads as the empty string.
    #[must_use]
    pub fn field(&self, field: PetField) -> Cow<'_, str> {
        match field {
            PetField::Id => self
                .id
                .as_ref()
                .map_or(Cow::Borrowed(""), |id| Cow::Owned(id.to_string())),
            PetField::Name => Cow::Borrowed(&self.name),
            PetField::Description => Cow::Borrowed(&self.description),
        }
    }

    /// Returns `true` if this record has the given identifier.
    #[must_use]
    pub fn has_id(&self, id: &PetId) -> bool {
        self.id.as_ref() == Some(id)
    }
}

/// Accepts `null` wherever a string is expected and reads it as empty.
fn nullable_string<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_numeric_and_text_ids() {
        let pets: Vec<Pet> = serde_json::from_str(
            r#"[{"id":1,"name":"Fido","description":"dog"},{"id":"x9","name":"Rex","description":null}]"#,
        )
        .unwrap();

        assert_eq!(pets[0].id, Some(PetId::Number(1)));
        assert_eq!(pets[1].id, Some(PetId::Text("x9".to_string())));
        assert_eq!(pets[1].description, "");
    }

    #[test]
    fn field_reads_id_as_text() {
        let pet = Pet::new("Fido", "dog").with_id(12);
        assert_eq!(pet.field(PetField::Id), "12");
        assert_eq!(Pet::default().field(PetField::Id), "");
    }

    #[test]
    fn serializes_full_record_for_updates() {
        let pet = Pet::new("Fido", "dog").with_id(3);
        let json = serde_json::to_value(&pet).unwrap();
        assert_eq!(json, serde_json::json!({"id": 3, "name": "Fido", "description": "dog"}));
    }
}
