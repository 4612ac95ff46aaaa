//! Event intake and the point-scoring classification that decides whether an event is
//! amplified.

pub mod classification;
pub mod domain;
pub mod router;
pub mod service;

#[cfg(test)]
mod tests;

pub use classification::{ChannelGroupPoints, ClassificationError, EventClassifier, QuestionSlot};
pub use domain::{Event, EventLevel, EventStatus, PriorityGroup};
pub use router::event_router;
pub use service::{EventService, EventServiceError};
