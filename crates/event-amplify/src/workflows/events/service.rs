use std::sync::Arc;

use tracing::{debug, info, warn};

use super::classification::{ClassificationError, EventClassifier};
use super::domain::{Event, EventStatus};
use crate::workflows::catalog::domain::{AmplifyType, EntityId};
use crate::workflows::catalog::repository::{ChannelGroupLookup, EntityRepository, RepositoryError};

/// Service composing the event repository with the classifier.
///
/// Classification output is recomputed whenever an event is read, so the stored level and
/// status are only a snapshot of the last explicit classification.
pub struct EventService<R, L> {
    repository: Arc<R>,
    classifier: EventClassifier<L>,
}

impl<R, L> EventService<R, L>
where
    R: EntityRepository<Event> + 'static,
    L: ChannelGroupLookup + 'static,
{
    pub fn new(repository: Arc<R>, lookup: Arc<L>) -> Self {
        Self {
            repository,
            classifier: EventClassifier::new(lookup),
        }
    }

    pub fn classifier(&self) -> &EventClassifier<L> {
        &self.classifier
    }

    /// Store a new event as submitted.
    pub fn create(&self, event: Event) -> Result<Event, EventServiceError> {
        debug!(?event, "request to save event");
        if event.id.is_some() {
            return Err(EventServiceError::IdExists);
        }
        Ok(self.repository.insert(event)?)
    }

    /// Replace a stored event, creating it when no id is supplied.
    pub fn update(&self, event: Event) -> Result<Event, EventServiceError> {
        debug!(?event, "request to update event");
        let Some(id) = event.id else {
            return self.create(event);
        };
        self.repository
            .update(event)
            .map_err(|err| not_found_or(id, err))
    }

    /// Fetch an event with its classification recomputed from current channel groups.
    pub fn get(&self, id: EntityId) -> Result<Event, EventServiceError> {
        debug!(%id, "request to get event");
        let event = self.fetch(id)?;
        self.refresh(event)
    }

    /// All events, recomputed like [`get`](Self::get). An event whose channel groups no
    /// longer resolve is listed as stored.
    pub fn list(&self) -> Result<Vec<Event>, EventServiceError> {
        debug!("request to list events");
        let mut events = Vec::new();
        for stored in self.repository.list()? {
            let event_id = stored.id;
            match self.refresh(stored.clone()) {
                Ok(event) => events.push(event),
                Err(EventServiceError::Classification(
                    ClassificationError::ChannelGroupNotFound { slot, id },
                )) => {
                    warn!(
                        event = ?event_id,
                        %slot,
                        group = %id,
                        "channel group missing, listing stored event"
                    );
                    events.push(stored);
                }
                Err(err) => return Err(err),
            }
        }
        Ok(events)
    }

    /// Classify a stored event and persist the result. Cancelled events come back untouched.
    pub fn classify(&self, id: EntityId) -> Result<Event, EventServiceError> {
        let mut event = self.fetch(id)?;
        if event.is_cancelled() {
            debug!(%id, "skipping classification of cancelled event");
            return Ok(event);
        }
        self.classifier.classify(&mut event)?;
        let stored = self
            .repository
            .update(event)
            .map_err(|err| not_found_or(id, err))?;
        info!(
            %id,
            level = ?stored.event_level,
            status = ?stored.event_status,
            "event classified"
        );
        Ok(stored)
    }

    /// Classify an unsaved event without touching the repository.
    pub fn preview(&self, mut event: Event) -> Result<Event, EventServiceError> {
        self.classifier.classify(&mut event)?;
        Ok(event)
    }

    pub fn update_status(
        &self,
        id: EntityId,
        status: EventStatus,
    ) -> Result<Event, EventServiceError> {
        debug!(%id, status = status.label(), "request to update event status");
        let mut event = self.fetch(id)?;
        event.event_status = Some(status);
        self.repository
            .update(event)
            .map_err(|err| not_found_or(id, err))
    }

    /// Events are never removed; deleting one cancels it.
    pub fn cancel(&self, id: EntityId) -> Result<Event, EventServiceError> {
        self.update_status(id, EventStatus::Cancel)
    }

    /// Lowest-id event linked to a product with `product_code` whose recomputed
    /// classification is an injection cleared for coordination.
    ///
    /// Product links are matched on the stored record; amplify type and status are read
    /// after recomputing, the same view [`get`](Self::get) returns. Events whose channel
    /// groups no longer resolve are skipped.
    pub fn find_inject_by_product_code(
        &self,
        product_code: &str,
    ) -> Result<Option<Event>, EventServiceError> {
        debug!(product_code, "request to find inject event by product code");
        let candidates = self
            .repository
            .list()?
            .into_iter()
            .filter(|event| event.has_product_code(product_code));

        for stored in candidates {
            let event_id = stored.id;
            let event = match self.refresh(stored) {
                Ok(event) => event,
                Err(EventServiceError::Classification(
                    ClassificationError::ChannelGroupNotFound { slot, id },
                )) => {
                    warn!(
                        event = ?event_id,
                        %slot,
                        group = %id,
                        "channel group missing, skipping inject candidate"
                    );
                    continue;
                }
                Err(err) => return Err(err),
            };
            if event.amplify_type == Some(AmplifyType::Inject)
                && event.event_status == Some(EventStatus::Coordinate)
            {
                return Ok(Some(event));
            }
        }
        Ok(None)
    }

    fn fetch(&self, id: EntityId) -> Result<Event, EventServiceError> {
        self.repository
            .fetch(id)?
            .ok_or(EventServiceError::NotFound(id))
    }

    fn refresh(&self, mut event: Event) -> Result<Event, EventServiceError> {
        if event.is_cancelled() || event.question.is_none() {
            return Ok(event);
        }
        self.classifier.classify(&mut event)?;
        Ok(event)
    }
}

fn not_found_or(id: EntityId, err: RepositoryError) -> EventServiceError {
    match err {
        RepositoryError::NotFound => EventServiceError::NotFound(id),
        other => EventServiceError::Repository(other),
    }
}

/// Error raised by the event service.
#[derive(Debug, thiserror::Error)]
pub enum EventServiceError {
    #[error("a new event cannot already have an id")]
    IdExists,
    #[error("event {0} not found")]
    NotFound(EntityId),
    #[error(transparent)]
    Classification(#[from] ClassificationError),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}
