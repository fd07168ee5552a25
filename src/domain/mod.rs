//! Domain layer for the petdesk console.
//!
//! This module contains the core domain types, independent of the remote
//! service, the presentation layer, or any runtime concerns.
//!
//! # Organization
//!
//! - [`error`]: Error types and result aliases
//! - [`field`]: Typed field names
//! - [`pet`]: Pet record and identifier
//! - [`validation`]: Field validation rules
//!
//! # Examples
//!
//! ```
//! use petdesk::domain::{Pet, PetField};
//!
//! let pet = Pet::new("Fido", "dog").with_id(1);
//! assert_eq!(pet.field(PetField::Name), "Fido");
//! ```

pub mod error;
pub mod field;
pub mod pet;
pub mod validation;

pub use error::{PetdeskError, Result};
pub use field::PetField;
pub use pet::{Pet, PetId};
pub use validation::{ValidationRule, Violation};
