//! In-process gateway backend.
//!
//! Keeps the remote collection in memory behind a shared handle. Used for the
//! offline mode of the console and as the stand-in service in tests, where it
//! can be told to fail specific operations or to hold responses until
//! released.

use crate::domain::error::{PetdeskError, Result};
use crate::domain::{Pet, PetId};
use crate::gateway::backend::Gateway;
use crate::gateway::messages::GatewayOp;
use futures_util::future::BoxFuture;
use std::collections::HashSet;
use std::sync::{Arc, Mutex, MutexGuard};
use tokio::sync::watch;

#[derive(Debug, Default)]
struct Collection {
    pets: Vec<Pet>,
    next_id: i64,
    failing: HashSet<GatewayOp>,
}

/// Gateway over an in-memory collection.
///
/// Clones share the same collection, so a test can keep a handle to inspect
/// what the "service" holds while the console owns another.
#[derive(Debug, Clone)]
pub struct MemoryGateway {
    collection: Arc<Mutex<Collection>>,
    held: watch::Sender<bool>,
}

impl Default for MemoryGateway {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryGateway {
    /// Creates an empty collection.
    #[must_use]
    pub fn new() -> Self {
        let (held, _) = watch::channel(false);
        Self {
            collection: Arc::new(Mutex::new(Collection {
                next_id: 1,
                ..Collection::default()
            })),
            held,
        }
    }

    /// Creates a collection pre-populated with records.
    ///
    /// Records without an id receive one; new ids continue after the highest
    /// numeric id present.
    #[must_use]
    pub fn with_pets(pets: Vec<Pet>) -> Self {
        let gateway = Self::new();
        {
            let mut collection = gateway.lock();
            let highest = pets
                .iter()
                .filter_map(|pet| match pet.id {
                    Some(PetId::Number(n)) => Some(n),
                    _ => None,
                })
                .max()
                .unwrap_or(0);
            collection.next_id = highest + 1;
            for mut pet in pets {
                if pet.id.is_none() {
                    pet.id = Some(PetId::Number(collection.next_id));
                    collection.next_id += 1;
                }
                collection.pets.push(pet);
            }
        }
        gateway
    }

    /// A small demo collection for offline use.
    #[must_use]
    pub fn sample() -> Self {
        Self::with_pets(vec![
            Pet::new("Fido", "dog").with_id(1),
            Pet::new("Rex", "cat").with_id(2),
            Pet::new("Nemo", "clownfish").with_id(3),
            Pet::new("Polly", "parrot").with_id(4),
        ])
    }

    /// Makes every subsequent call of `op` fail until [`recover`](Self::recover).
    pub fn fail(&self, op: GatewayOp) {
        self.lock().failing.insert(op);
    }

    /// Stops failing `op`.
    pub fn recover(&self, op: GatewayOp) {
        self.lock().failing.remove(&op);
    }

    /// Holds every call (started or future) until [`release`](Self::release).
    pub fn hold(&self) {
        self.held.send_replace(true);
    }

    /// Lets held calls proceed.
    pub fn release(&self) {
        self.held.send_replace(false);
    }

    /// Current contents of the collection.
    #[must_use]
    pub fn pets(&self) -> Vec<Pet> {
        self.lock().pets.clone()
    }

    fn lock(&self) -> MutexGuard<'_, Collection> {
        self.collection
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }

    /// Runs `apply` against the collection once the gateway is not held.
    fn call<T, F>(&self, op: GatewayOp, apply: F) -> BoxFuture<'static, Result<T>>
    where
        T: Send + 'static,
        F: FnOnce(&mut Collection) -> Result<T> + Send + 'static,
    {
        let collection = Arc::clone(&self.collection);
        let mut held = self.held.subscribe();

        Box::pin(async move {
            if held.wait_for(|is_held| !*is_held).await.is_err() {
                return Err(PetdeskError::Transport("gateway shut down".to_string()));
            }

            let mut collection = collection
                .lock()
                .unwrap_or_else(std::sync::PoisonError::into_inner);
            if collection.failing.contains(&op) {
                tracing::debug!(op = %op, "injected gateway failure");
                return Err(PetdeskError::Transport(format!("{op} rejected by service")));
            }
            apply(&mut collection)
        })
    }
}

impl Gateway for MemoryGateway {
    fn list(&self) -> BoxFuture<'static, Result<Vec<Pet>>> {
        self.call(GatewayOp::List, |collection| Ok(collection.pets.clone()))
    }

    fn create(&self, candidate: &Pet) -> BoxFuture<'static, Result<Pet>> {
        let candidate = Pet::new(candidate.name.clone(), candidate.description.clone());
        self.call(GatewayOp::Create, move |collection| {
            let created = candidate.with_id(collection.next_id);
            collection.next_id += 1;
            collection.pets.push(created.clone());
            Ok(created)
        })
    }

    fn update(&self, pet: &Pet) -> BoxFuture<'static, Result<()>> {
        let pet = pet.clone();
        self.call(GatewayOp::Update, move |collection| {
            let slot = pet
                .id
                .as_ref()
                .and_then(|id| collection.pets.iter_mut().find(|p| p.has_id(id)))
                .ok_or_else(|| PetdeskError::Transport(format!("no record with id {:?}", pet.id)))?;
            *slot = pet;
            Ok(())
        })
    }

    fn delete(&self, id: &PetId) -> BoxFuture<'static, Result<()>> {
        let id = id.clone();
        self.call(GatewayOp::Delete, move |collection| {
            let index = collection
                .pets
                .iter()
                .position(|p| p.has_id(&id))
                .ok_or_else(|| PetdeskError::Transport(format!("no record with id {id}")))?;
            collection.pets.remove(index);
            Ok(())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn create_assigns_sequential_ids() {
        let gateway = MemoryGateway::with_pets(vec![Pet::new("Fido", "dog").with_id(7)]);

        let created = gateway.create(&Pet::new("Rex", "cat")).await.unwrap();
        assert_eq!(created.id, Some(PetId::Number(8)));
        assert_eq!(gateway.pets().len(), 2);
    }

    #[tokio::test]
    async fn update_and_delete_unknown_ids_fail() {
        let gateway = MemoryGateway::new();

        assert!(gateway.update(&Pet::new("Ghost", "").with_id(1)).await.is_err());
        assert!(gateway.delete(&PetId::Number(1)).await.is_err());
    }

    #[tokio::test]
    async fn injected_failures_apply_until_recovered() {
        let gateway = MemoryGateway::sample();
        gateway.fail(GatewayOp::List);

        assert!(gateway.list().await.is_err());

        gateway.recover(GatewayOp::List);
        assert_eq!(gateway.list().await.unwrap().len(), 4);
    }

    #[tokio::test]
    async fn held_calls_complete_after_release() {
        let gateway = MemoryGateway::sample();
        gateway.hold();

        let pending = gateway.delete(&PetId::Number(1));
        tokio::task::yield_now().await;
        assert_eq!(gateway.pets().len(), 4);

        gateway.release();
        pending.await.unwrap();
        assert_eq!(gateway.pets().len(), 3);
    }
}
