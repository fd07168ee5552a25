//! Record store: the authoritative in-memory list of pets.
//!
//! The store is the only place where mutations are durably reflected on the
//! client. It knows nothing about the remote service: the application layer
//! decides *when* each mutation runs relative to the gateway call.
//!
//! # Synchronization Rules
//!
//! | Operation | Local mutation | Relative to the gateway |
//! |-----------|----------------|-------------------------|
//! | load      | [`RecordStore::replace_all`] | after the list arrives |
//! | create    | [`RecordStore::prepend`]     | after the service confirms |
//! | update    | [`RecordStore::replace`]     | after the service confirms |
//! | remove    | [`RecordStore::remove`]      | before the request is sent |
//!
//! Remove is optimistic and never rolled back.
//!
//! # Invariants
//!
//! - No two records share the same non-null id.
//! - A newly created record is always the first element.
//! - `replace` never changes the length or the position of any record.

use crate::domain::{Pet, PetId};
use std::collections::HashSet;

/// Ordered collection of pet records, most recently created first.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordStore {
    pets: Vec<Pet>,
}

impl RecordStore {
    /// Creates an empty store.
    #[must_use]
    pub const fn new() -> Self {
        Self { pets: Vec::new() }
    }

    /// Read-only view of all records in store order.
    #[must_use]
    pub fn pets(&self) -> &[Pet] {
        &self.pets
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.pets.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pets.is_empty()
    }

    /// Position of the first record with the given id (linear scan).
    #[must_use]
    pub fn position(&self, id: &PetId) -> Option<usize> {
        self.pets.iter().position(|pet| pet.has_id(id))
    }

    #[must_use]
    pub fn get(&self, id: &PetId) -> Option<&Pet> {
        self.pets.iter().find(|pet| pet.has_id(id))
    }

    #[must_use]
    pub fn contains(&self, id: &PetId) -> bool {
        self.position(id).is_some()
    }

    /// Replaces the whole collection with a freshly loaded list.
    ///
    /// Later duplicates of an id already seen are dropped so the uniqueness
    /// invariant holds even if the service misbehaves.
    pub fn replace_all(&mut self, pets: Vec<Pet>) {
        let mut seen = HashSet::new();
        let incoming = pets.len();

        self.pets = pets
            .into_iter()
            .filter(|pet| pet.id.as_ref().map_or(true, |id| seen.insert(id.clone())))
            .collect();

        if self.pets.len() != incoming {
            tracing::debug!(
                incoming,
                kept = self.pets.len(),
                "dropped records with duplicate ids"
            );
        }
    }

    /// Inserts a confirmed record at the front.
    ///
    /// Any existing record with the same id is removed first.
    pub fn prepend(&mut self, pet: Pet) {
        if let Some(id) = &pet.id {
            if let Some(index) = self.position(id) {
                tracing::debug!(pet_id = %id, index, "replacing stale copy of created record");
                self.pets.remove(index);
            }
        }
        self.pets.insert(0, pet);
    }

    /// Replaces the record whose id equals `pet.id`, keeping its position.
    ///
    /// Returns `false` (and leaves the store untouched) if `pet` has no id or
    /// no record matches.
    pub fn replace(&mut self, pet: Pet) -> bool {
        let Some(index) = pet.id.as_ref().and_then(|id| self.position(id)) else {
            tracing::debug!(pet_id = ?pet.id, "update target not in store, ignoring");
            return false;
        };
        self.pets[index] = pet;
        true
    }

    /// Removes the record with the given id, returning it if present.
    pub fn remove(&mut self, id: &PetId) -> Option<Pet> {
        let index = self.position(id)?;
        Some(self.pets.remove(index))
    }
}

impl From<Vec<Pet>> for RecordStore {
    fn from(pets: Vec<Pet>) -> Self {
        let mut store = Self::new();
        store.replace_all(pets);
        store
    }
}
