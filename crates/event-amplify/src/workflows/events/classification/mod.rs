mod policy;
mod rules;

pub use rules::ChannelGroupPoints;

use std::fmt;
use std::sync::Arc;

use tracing::debug;

use super::domain::{Event, EventLevel};
use crate::workflows::catalog::domain::{EntityId, Question};
use crate::workflows::catalog::repository::{ChannelGroupLookup, RepositoryError};

/// Applies the point-scoring rules to events, reading channel groups through `lookup`.
pub struct EventClassifier<L> {
    lookup: Arc<L>,
}

impl<L> EventClassifier<L>
where
    L: ChannelGroupLookup,
{
    pub fn new(lookup: Arc<L>) -> Self {
        Self { lookup }
    }

    /// Resolve the role, invitee and scale points referenced by `question`, in that order.
    pub fn score(&self, question: &Question) -> Result<ChannelGroupPoints, ClassificationError> {
        rules::resolve_points(question, self.lookup.as_ref())
    }

    /// Classify `event` in place and hand it back.
    ///
    /// The amplify type is copied before any lookup runs, so a failed lookup leaves it set
    /// while every other computed field keeps its previous value.
    pub fn classify<'e>(
        &self,
        event: &'e mut Event,
    ) -> Result<&'e mut Event, ClassificationError> {
        self.classify_with_points(event)?;
        Ok(event)
    }

    /// [`classify`](Self::classify), returning the resolved points alongside.
    pub fn classify_with_points(
        &self,
        event: &mut Event,
    ) -> Result<ChannelGroupPoints, ClassificationError> {
        debug!(event = ?event.id, "request to classify event");
        let question = event
            .question
            .clone()
            .ok_or(ClassificationError::MissingQuestion)?;
        event.amplify_type = Some(question.amplify_type);

        let points = self.score(&question)?;
        let level = EventLevel::from_points(points.total());
        debug!(total = points.total(), level = level.label(), "calculated event points");
        event.event_level = Some(level);

        event.products = rules::products_for(event);
        event.priority_group = rules::priority_groups_for(event);

        let schedules = rules::schedules_for(event);
        debug!(schedules = schedules.len(), "calculated event schedule");

        event.event_status = Some(policy::status_for(level));
        Ok(points)
    }
}

/// Which question reference a channel group was resolved for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuestionSlot {
    Role,
    Invitee,
    Scale,
}

impl fmt::Display for QuestionSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            QuestionSlot::Role => "role",
            QuestionSlot::Invitee => "invitee",
            QuestionSlot::Scale => "scale",
        };
        f.write_str(label)
    }
}

/// Error raised while classifying an event.
#[derive(Debug, thiserror::Error)]
pub enum ClassificationError {
    #[error("event has no question to classify")]
    MissingQuestion,
    #[error("{slot} channel group {id} not found")]
    ChannelGroupNotFound { slot: QuestionSlot, id: EntityId },
    #[error("channel group lookup failed: {0}")]
    Lookup(#[source] RepositoryError),
}
