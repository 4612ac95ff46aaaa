use std::collections::{BTreeMap, BTreeSet};
use std::sync::{Mutex, MutexGuard};

use super::domain::EntityId;
use super::repository::{Entity, EntityRepository, RepositoryError};

/// Mutex guarded map standing in for the relational store.
pub struct InMemoryStore<E> {
    state: Mutex<StoreState<E>>,
}

struct StoreState<E> {
    records: BTreeMap<EntityId, E>,
    last_id: u64,
}

impl<E> Default for InMemoryStore<E> {
    fn default() -> Self {
        Self {
            state: Mutex::new(StoreState {
                records: BTreeMap::new(),
                last_id: 0,
            }),
        }
    }
}

impl<E: Entity> InMemoryStore<E> {
    /// Builds a store pre-populated with `records`, keeping identifiers that are present.
    pub fn with_records<I>(records: I) -> Result<Self, RepositoryError>
    where
        I: IntoIterator<Item = E>,
    {
        let store = Self::default();
        store.insert_all(records.into_iter().collect())?;
        Ok(store)
    }

    fn lock(&self) -> Result<MutexGuard<'_, StoreState<E>>, RepositoryError> {
        self.state.lock().map_err(|_| {
            RepositoryError::Unavailable(format!("{} store poisoned", E::ENTITY_NAME))
        })
    }
}

impl<E: Entity> EntityRepository<E> for InMemoryStore<E> {
    fn insert(&self, mut entity: E) -> Result<E, RepositoryError> {
        let mut guard = self.lock()?;
        let id = match entity.id() {
            Some(id) if guard.records.contains_key(&id) => return Err(RepositoryError::Conflict),
            Some(id) => id,
            None => EntityId(guard.last_id + 1),
        };
        guard.last_id = guard.last_id.max(id.0);
        entity.set_id(id);
        guard.records.insert(id, entity.clone());
        Ok(entity)
    }

    fn insert_all(&self, entities: Vec<E>) -> Result<Vec<E>, RepositoryError> {
        let mut guard = self.lock()?;
        let mut claimed = BTreeSet::new();
        for id in entities.iter().filter_map(|entity| entity.id()) {
            if guard.records.contains_key(&id) || !claimed.insert(id) {
                return Err(RepositoryError::Conflict);
            }
        }

        let mut stored = Vec::with_capacity(entities.len());
        for mut entity in entities {
            let id = match entity.id() {
                Some(id) => id,
                None => {
                    let mut next = guard.last_id + 1;
                    while claimed.contains(&EntityId(next)) {
                        next += 1;
                    }
                    EntityId(next)
                }
            };
            guard.last_id = guard.last_id.max(id.0);
            entity.set_id(id);
            guard.records.insert(id, entity.clone());
            stored.push(entity);
        }
        Ok(stored)
    }

    fn update(&self, entity: E) -> Result<E, RepositoryError> {
        let id = entity.id().ok_or(RepositoryError::MissingId)?;
        let mut guard = self.lock()?;
        match guard.records.get_mut(&id) {
            Some(slot) => {
                *slot = entity.clone();
                Ok(entity)
            }
            None => Err(RepositoryError::NotFound),
        }
    }

    fn fetch(&self, id: EntityId) -> Result<Option<E>, RepositoryError> {
        let guard = self.lock()?;
        Ok(guard.records.get(&id).cloned())
    }

    fn list(&self) -> Result<Vec<E>, RepositoryError> {
        let guard = self.lock()?;
        Ok(guard.records.values().cloned().collect())
    }

    fn delete(&self, id: EntityId) -> Result<(), RepositoryError> {
        let mut guard = self.lock()?;
        guard
            .records
            .remove(&id)
            .map(|_| ())
            .ok_or(RepositoryError::NotFound)
    }
}
