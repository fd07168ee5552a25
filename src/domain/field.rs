//! Typed field names for pet records.
//!
//! Every place that used to address a record field by a free-form string
//! (field edits, filter keys, column specs) goes through [`PetField`]. Unknown
//! names are rejected once, when text is parsed into this enum.

use crate::domain::error::PetdeskError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A field of a [`Pet`](crate::domain::Pet) record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PetField {
    Id,
    Name,
    Description,
}

impl PetField {
    /// All fields in column order.
    pub const ALL: [Self; 3] = [Self::Id, Self::Name, Self::Description];

    /// Wire and command name of the field.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Id => "id",
            Self::Name => "name",
            Self::Description => "description",
        }
    }

    /// Column header shown in tables and exports.
    #[must_use]
    pub const fn header(self) -> &'static str {
        match self {
            Self::Id => "Id",
            Self::Name => "Name",
            Self::Description => "Description",
        }
    }

    /// Whether the field may be changed in an editing session.
    ///
    /// The identifier is assigned by the remote service and never edited.
    #[must_use]
    pub const fn is_editable(self) -> bool {
        !matches!(self, Self::Id)
    }
}

impl fmt::Display for PetField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PetField {
    type Err = PetdeskError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "id" => Ok(Self::Id),
            "name" => Ok(Self::Name),
            "description" => Ok(Self::Description),
            other => Err(PetdeskError::UnknownField(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_known_names_case_insensitively() {
        assert_eq!("Name".parse::<PetField>().unwrap(), PetField::Name);
        assert_eq!(" description ".parse::<PetField>().unwrap(), PetField::Description);
    }

    #[test]
    fn rejects_unknown_names() {
        let err = "owner".parse::<PetField>().unwrap_err();
        assert!(matches!(err, PetdeskError::UnknownField(name) if name == "owner"));
    }

    #[test]
    fn id_is_not_editable() {
        assert!(!PetField::Id.is_editable());
        assert!(PetField::Name.is_editable());
    }
}
