use std::collections::BTreeSet;

use super::super::domain::{Event, PriorityGroup};
use super::{ClassificationError, QuestionSlot};
use crate::workflows::catalog::domain::{EntityId, Product, Question, Schedule};
use crate::workflows::catalog::repository::{ChannelGroupLookup, LookupError};

/// Point values resolved for the three question references.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChannelGroupPoints {
    pub role: i64,
    pub invitee: i64,
    pub scale: i64,
}

impl ChannelGroupPoints {
    pub fn total(&self) -> i64 {
        self.role
            .saturating_add(self.invitee)
            .saturating_add(self.scale)
    }
}

pub(crate) fn resolve_points<L>(
    question: &Question,
    lookup: &L,
) -> Result<ChannelGroupPoints, ClassificationError>
where
    L: ChannelGroupLookup + ?Sized,
{
    let role = point_for(lookup, QuestionSlot::Role, question.role_id)?;
    let invitee = point_for(lookup, QuestionSlot::Invitee, question.invitee_id)?;
    let scale = point_for(lookup, QuestionSlot::Scale, question.scale_id)?;

    Ok(ChannelGroupPoints {
        role,
        invitee,
        scale,
    })
}

fn point_for<L>(lookup: &L, slot: QuestionSlot, id: EntityId) -> Result<i64, ClassificationError>
where
    L: ChannelGroupLookup + ?Sized,
{
    lookup
        .get(id)
        .map(|group| group.point)
        .map_err(|err| match err {
            LookupError::NotFound(id) => ClassificationError::ChannelGroupNotFound { slot, id },
            LookupError::Repository(source) => ClassificationError::Lookup(source),
        })
}

/// Product matching has no rule yet; classification always yields an empty set.
pub(crate) fn products_for(_event: &Event) -> BTreeSet<Product> {
    BTreeSet::new()
}

/// Placeholder until real priority rules exist: every event gets K0A and K0B.
pub(crate) fn priority_groups_for(_event: &Event) -> BTreeSet<PriorityGroup> {
    BTreeSet::from([PriorityGroup::K0a, PriorityGroup::K0b])
}

/// Schedule planning has no rule yet; no slots are produced.
pub(crate) fn schedules_for(_event: &Event) -> Vec<Schedule> {
    Vec::new()
}
