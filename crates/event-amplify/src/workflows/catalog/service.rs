use std::marker::PhantomData;
use std::sync::Arc;

use tracing::debug;

use super::domain::EntityId;
use super::repository::{Entity, EntityRepository, RepositoryError};

/// Create/read/update/delete facade shared by every reference entity.
pub struct CatalogService<E, R> {
    repository: Arc<R>,
    _entity: PhantomData<fn() -> E>,
}

impl<E, R> CatalogService<E, R>
where
    E: Entity,
    R: EntityRepository<E> + 'static,
{
    pub fn new(repository: Arc<R>) -> Self {
        Self {
            repository,
            _entity: PhantomData,
        }
    }

    pub fn repository(&self) -> &Arc<R> {
        &self.repository
    }

    /// Store a new entity; entities that already carry an id are rejected.
    pub fn create(&self, entity: E) -> Result<E, CatalogError> {
        debug!(entity = E::ENTITY_NAME, ?entity, "request to create");
        if entity.id().is_some() {
            return Err(CatalogError::IdExists);
        }
        Ok(self.repository.insert(entity)?)
    }

    /// Replace an existing entity, creating it when no id is supplied.
    pub fn update(&self, entity: E) -> Result<E, CatalogError> {
        debug!(entity = E::ENTITY_NAME, ?entity, "request to update");
        let Some(id) = entity.id() else {
            return self.create(entity);
        };
        self.repository.update(entity).map_err(|err| match err {
            RepositoryError::NotFound => CatalogError::NotFound(id),
            other => CatalogError::Repository(other),
        })
    }

    pub fn get(&self, id: EntityId) -> Result<E, CatalogError> {
        debug!(entity = E::ENTITY_NAME, %id, "request to get");
        self.repository.fetch(id)?.ok_or(CatalogError::NotFound(id))
    }

    pub fn list(&self) -> Result<Vec<E>, CatalogError> {
        debug!(entity = E::ENTITY_NAME, "request to list");
        Ok(self.repository.list()?)
    }

    pub fn delete(&self, id: EntityId) -> Result<(), CatalogError> {
        debug!(entity = E::ENTITY_NAME, %id, "request to delete");
        self.repository.delete(id).map_err(|err| match err {
            RepositoryError::NotFound => CatalogError::NotFound(id),
            other => CatalogError::Repository(other),
        })
    }
}

/// Error raised by the catalog service.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("a new entity cannot already have an id")]
    IdExists,
    #[error("entity {0} not found")]
    NotFound(EntityId),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

impl CatalogError {
    /// Key reported in the failure alert header.
    pub fn error_key(&self) -> &'static str {
        match self {
            CatalogError::IdExists => "idexists",
            CatalogError::NotFound(_) => "notfound",
            CatalogError::Repository(RepositoryError::Conflict) => "conflict",
            CatalogError::Repository(_) => "internal",
        }
    }
}
