use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use axum::response::Response;
use serde_json::Value;

use crate::workflows::catalog::domain::{
    AmplifyType, ChannelGroup, ChannelGroupType, EntityId, Question,
};
use crate::workflows::catalog::repository::{ChannelGroupLookup, LookupError, RepositoryError};
use crate::workflows::catalog::store::InMemoryStore;
use crate::workflows::events::{Event, EventClassifier, EventService};

pub(super) const ROLE_ID: EntityId = EntityId(1);
pub(super) const INVITEE_ID: EntityId = EntityId(2);
pub(super) const SCALE_ID: EntityId = EntityId(3);

pub(super) type ChannelGroupStore = InMemoryStore<ChannelGroup>;
pub(super) type EventStore = InMemoryStore<Event>;
pub(super) type MemoryEventService = EventService<EventStore, ChannelGroupStore>;

pub(super) fn channel_group(
    id: EntityId,
    name: &str,
    point: i64,
    group_type: ChannelGroupType,
) -> ChannelGroup {
    ChannelGroup {
        id: Some(id),
        name: name.to_string(),
        point,
        group_type,
    }
}

/// Role, invitee and scale groups stored under ids 1, 2 and 3.
pub(super) fn channel_groups(role: i64, invitee: i64, scale: i64) -> Arc<ChannelGroupStore> {
    let store = InMemoryStore::with_records([
        channel_group(ROLE_ID, "Keynote speaker", role, ChannelGroupType::Role),
        channel_group(INVITEE_ID, "Ministry guests", invitee, ChannelGroupType::Invitee),
        channel_group(SCALE_ID, "National", scale, ChannelGroupType::Scale),
    ])
    .expect("seed channel groups");
    Arc::new(store)
}

pub(super) fn question(amplify_type: AmplifyType) -> Question {
    Question {
        id: None,
        role_id: ROLE_ID,
        invitee_id: INVITEE_ID,
        scale_id: SCALE_ID,
        amplify_type,
        content: None,
    }
}

pub(super) fn event() -> Event {
    Event::new("Topica graduation day", question(AmplifyType::Share))
}

pub(super) fn classifier(role: i64, invitee: i64, scale: i64) -> EventClassifier<ChannelGroupStore> {
    EventClassifier::new(channel_groups(role, invitee, scale))
}

pub(super) fn build_service(
    role: i64,
    invitee: i64,
    scale: i64,
) -> (MemoryEventService, Arc<EventStore>, Arc<ChannelGroupStore>) {
    let events = Arc::new(EventStore::default());
    let groups = channel_groups(role, invitee, scale);
    let service = EventService::new(events.clone(), groups.clone());
    (service, events, groups)
}

/// Lookup whose backing store is offline.
pub(super) struct UnavailableLookup;

impl ChannelGroupLookup for UnavailableLookup {
    fn get(&self, _id: EntityId) -> Result<ChannelGroup, LookupError> {
        Err(LookupError::Repository(RepositoryError::Unavailable(
            "database offline".to_string(),
        )))
    }
}

/// Lookup that counts how many channel groups it resolved.
pub(super) struct CountingLookup {
    pub(super) inner: Arc<ChannelGroupStore>,
    pub(super) calls: AtomicUsize,
}

impl ChannelGroupLookup for CountingLookup {
    fn get(&self, id: EntityId) -> Result<ChannelGroup, LookupError> {
        self.calls.fetch_add(1, Ordering::Relaxed);
        self.inner.get(id)
    }
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
