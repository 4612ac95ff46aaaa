use super::super::domain::{EventLevel, EventStatus};

/// E4 events are not amplified; every other tier goes on to coordination.
pub(crate) fn status_for(level: EventLevel) -> EventStatus {
    if level == EventLevel::E4 {
        EventStatus::Invalid
    } else {
        EventStatus::Coordinate
    }
}
