//! Editing session: the one record being created or edited.
//!
//! The session owns a working copy that is independent of the store until the
//! service confirms a save. Validation runs on demand; its messages are only
//! meant to be shown once the user has attempted a save (`submitted`).

use crate::domain::error::{PetdeskError, Result};
use crate::domain::validation::{self, ValidationRule};
use crate::domain::{Pet, PetField, Violation};
use crate::gateway::{GatewayRequest, SessionTicket};

/// Working state of the "Pet Details" dialog.
#[derive(Debug, Clone)]
pub struct EditingSession {
    /// Working copy of the record.
    pub record: Pet,
    /// `true` when saving creates a record, `false` when it updates one.
    pub is_new: bool,
    /// Set once a save has been attempted.
    pub submitted: bool,
    ticket: SessionTicket,
    rules: Vec<ValidationRule>,
}

impl EditingSession {
    /// Opens a session for a brand-new record with no id.
    #[must_use]
    pub fn new_record(ticket: SessionTicket, rules: Vec<ValidationRule>) -> Self {
        Self {
            record: Pet::default(),
            is_new: true,
            submitted: false,
            ticket,
            rules,
        }
    }

    /// Opens a session over a field-by-field copy of `source`.
    #[must_use]
    pub fn edit_record(source: &Pet, ticket: SessionTicket, rules: Vec<ValidationRule>) -> Self {
        Self {
            record: source.clone(),
            is_new: false,
            submitted: false,
            ticket,
            rules,
        }
    }

    #[must_use]
    pub const fn ticket(&self) -> SessionTicket {
        self.ticket
    }

    /// Updates one field of the working copy.
    ///
    /// # Errors
    ///
    /// Returns [`PetdeskError::ReadOnlyField`] for the service-assigned id.
    pub fn set_field(&mut self, field: PetField, value: &str) -> Result<()> {
        if !field.is_editable() {
            return Err(PetdeskError::ReadOnlyField(field));
        }
        match field {
            PetField::Name => value.clone_into(&mut self.record.name),
            PetField::Description => value.clone_into(&mut self.record.description),
            PetField::Id => {}
        }
        tracing::trace!(field = %field, "working copy updated");
        Ok(())
    }

    /// Runs the session's rules against the working copy.
    #[must_use]
    pub fn validate(&self) -> Vec<Violation> {
        validation::validate(&self.rules, &self.record)
    }

    /// Violations to display inline; empty until a save was attempted.
    #[must_use]
    pub fn visible_violations(&self) -> Vec<Violation> {
        if self.submitted {
            self.validate()
        } else {
            Vec::new()
        }
    }

    /// Fails with every violation if the working copy is not saveable.
    ///
    /// # Errors
    ///
    /// Returns [`PetdeskError::Validation`] listing the failed rules.
    pub fn ensure_valid(&self) -> Result<()> {
        let violations = self.validate();
        if violations.is_empty() {
            Ok(())
        } else {
            Err(PetdeskError::Validation(violations))
        }
    }

    /// Marks the session submitted and builds the request that saves it.
    ///
    /// Saving never blocks on validation: the request is issued regardless
    /// and any violations become visible inline.
    pub fn commit(&mut self) -> GatewayRequest {
        self.submitted = true;
        if self.is_new {
            GatewayRequest::Create {
                candidate: self.record.clone(),
                ticket: self.ticket,
            }
        } else {
            GatewayRequest::Update {
                pet: self.record.clone(),
                ticket: self.ticket,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::validation::default_rules;

    #[test]
    fn new_session_starts_empty_and_unsubmitted() {
        let session = EditingSession::new_record(1, default_rules());

        assert!(session.is_new);
        assert!(!session.submitted);
        assert_eq!(session.record, Pet::default());
    }

    #[test]
    fn edit_session_copies_source_independently() {
        let source = Pet::new("Fido", "dog").with_id(1);
        let mut session = EditingSession::edit_record(&source, 2, default_rules());

        session.set_field(PetField::Name, "Fido II").unwrap();

        assert_eq!(source.name, "Fido");
        assert_eq!(session.record.name, "Fido II");
        assert_eq!(session.record.id, source.id);
    }

    #[test]
    fn id_cannot_be_edited() {
        let mut session = EditingSession::new_record(1, default_rules());
        let err = session.set_field(PetField::Id, "5").unwrap_err();
        assert!(matches!(err, PetdeskError::ReadOnlyField(PetField::Id)));
    }

    #[test]
    fn violations_are_hidden_until_submitted() {
        let mut session = EditingSession::new_record(1, default_rules());
        assert_eq!(session.validate().len(), 1);
        assert!(session.visible_violations().is_empty());
        assert!(matches!(session.ensure_valid(), Err(PetdeskError::Validation(v)) if v.len() == 1));

        let request = session.commit();

        assert!(session.submitted);
        assert_eq!(session.visible_violations()[0].message, "Name is required.");
        assert!(matches!(request, GatewayRequest::Create { ticket: 1, .. }));
    }

    #[test]
    fn commit_of_existing_record_is_an_update() {
        let mut session = EditingSession::edit_record(&Pet::new("Rex", "cat").with_id(2), 4, default_rules());
        session.set_field(PetField::Description, "big cat").unwrap();

        match session.commit() {
            GatewayRequest::Update { pet, ticket } => {
                assert_eq!(ticket, 4);
                assert_eq!(pet.description, "big cat");
            }
            other => panic!("unexpected request: {other:?}"),
        }
    }
}
