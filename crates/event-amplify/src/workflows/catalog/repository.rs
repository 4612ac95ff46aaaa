use std::fmt::Debug;

use serde::de::DeserializeOwned;
use serde::Serialize;

use super::domain::{ChannelGroup, EntityId};

/// Anything the generic repositories and routers can store.
pub trait Entity: Clone + Debug + Serialize + DeserializeOwned + Send + Sync + 'static {
    /// Singular name used in header alerts, e.g. `brandkey`.
    const ENTITY_NAME: &'static str;
    /// Path segment under `/api`, e.g. `brandkeys`.
    const COLLECTION: &'static str;

    fn id(&self) -> Option<EntityId>;
    fn set_id(&mut self, id: EntityId);
}

/// Storage abstraction so services can be exercised in isolation.
///
/// `insert` assigns the next identifier when the entity has none and keeps a caller
/// supplied identifier otherwise (used when seeding reference data). `update` only
/// replaces existing records.
pub trait EntityRepository<E: Entity>: Send + Sync {
    fn insert(&self, entity: E) -> Result<E, RepositoryError>;
    /// Inserts every entity or none of them; any id clash fails the whole batch.
    fn insert_all(&self, entities: Vec<E>) -> Result<Vec<E>, RepositoryError>;
    fn update(&self, entity: E) -> Result<E, RepositoryError>;
    fn fetch(&self, id: EntityId) -> Result<Option<E>, RepositoryError>;
    /// All records ordered by identifier.
    fn list(&self) -> Result<Vec<E>, RepositoryError>;
    fn delete(&self, id: EntityId) -> Result<(), RepositoryError>;
}

/// Error enumeration for repository failures.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("record already exists")]
    Conflict,
    #[error("record not found")]
    NotFound,
    #[error("record has no identifier")]
    MissingId,
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}

/// Read-only point lookup consumed by event classification.
pub trait ChannelGroupLookup: Send + Sync {
    fn get(&self, id: EntityId) -> Result<ChannelGroup, LookupError>;
}

impl<R> ChannelGroupLookup for R
where
    R: EntityRepository<ChannelGroup>,
{
    fn get(&self, id: EntityId) -> Result<ChannelGroup, LookupError> {
        self.fetch(id)?.ok_or(LookupError::NotFound(id))
    }
}

#[derive(Debug, thiserror::Error)]
pub enum LookupError {
    #[error("channel group {0} not found")]
    NotFound(EntityId),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}
