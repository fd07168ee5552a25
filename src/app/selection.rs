//! Row selection and delete confirmation.

use crate::domain::{Pet, PetId};
use crate::store::RecordStore;

/// Zero or one selected record, held by id.
///
/// An id that is no longer in the store reads as "no selection", so removing
/// or reloading records never leaves a dangling selection behind.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    selected: Option<PetId>,
}

impl Selection {
    pub fn select(&mut self, id: Option<PetId>) {
        self.selected = id;
    }

    pub fn clear(&mut self) {
        self.selected = None;
    }

    /// The selected record, if it is still in the store.
    #[must_use]
    pub fn current<'a>(&self, store: &'a RecordStore) -> Option<&'a Pet> {
        self.selected.as_ref().and_then(|id| store.get(id))
    }

    /// Returns `true` if `id` is the current, still-present selection.
    #[must_use]
    pub fn is_selected(&self, id: &PetId, store: &RecordStore) -> bool {
        self.current(store).is_some_and(|pet| pet.has_id(id))
    }
}

/// An open "Confirm" dialog for deleting one record.
///
/// The target is captured when the dialog opens; confirming deletes that
/// record even if the selection changed in between.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeleteConfirmation {
    pub target: Pet,
}

impl DeleteConfirmation {
    /// Question shown in the dialog.
    #[must_use]
    pub fn prompt(&self) -> String {
        format!("Are you sure you want to delete {}?", self.target.name)
    }
}
