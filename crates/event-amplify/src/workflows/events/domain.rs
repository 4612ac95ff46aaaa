use std::collections::BTreeSet;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::workflows::catalog::domain::{AmplifyType, EntityId, Product, Question};
use crate::workflows::catalog::repository::Entity;

/// Coarse priority tier derived from summed channel-group points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum EventLevel {
    E1,
    E2,
    E3,
    E4,
}

impl EventLevel {
    /// Tier for a point total. Ranges are checked top down and the first match wins:
    /// `>= 100` is E1, `(60, 100)` is E2, `(30, 60]` is E3 and everything else is E4.
    pub const fn from_points(sum: i64) -> Self {
        if sum >= 100 {
            EventLevel::E1
        } else if sum > 60 && sum < 100 {
            EventLevel::E2
        } else if sum > 30 && sum <= 60 {
            EventLevel::E3
        } else {
            EventLevel::E4
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            EventLevel::E1 => "E1",
            EventLevel::E2 => "E2",
            EventLevel::E3 => "E3",
            EventLevel::E4 => "E4",
        }
    }
}

/// Finer grained channel priority classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum PriorityGroup {
    #[serde(rename = "K0A")]
    K0a,
    #[serde(rename = "K0B")]
    K0b,
    K1,
    K2,
    K3,
    K4,
}

/// Final disposition of an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EventStatus {
    /// Cleared for amplification.
    Coordinate,
    /// Scored too low to amplify.
    Invalid,
    /// Withdrawn by an operator; never overwritten by reclassification.
    Cancel,
}

impl EventStatus {
    pub const fn label(self) -> &'static str {
        match self {
            EventStatus::Coordinate => "COORDINATE",
            EventStatus::Invalid => "INVALID",
            EventStatus::Cancel => "CANCEL",
        }
    }
}

/// An occurrence to amplify, together with its computed classification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub id: Option<EntityId>,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<NaiveDate>,
    pub question: Option<Question>,
    pub amplify_type: Option<AmplifyType>,
    pub event_level: Option<EventLevel>,
    #[serde(default)]
    pub priority_group: BTreeSet<PriorityGroup>,
    pub event_status: Option<EventStatus>,
    #[serde(default)]
    pub products: BTreeSet<Product>,
}

impl Event {
    /// Unclassified event carrying only its name and question.
    pub fn new(name: impl Into<String>, question: Question) -> Self {
        Self {
            id: None,
            name: name.into(),
            description: None,
            start_date: None,
            question: Some(question),
            amplify_type: None,
            event_level: None,
            priority_group: BTreeSet::new(),
            event_status: None,
            products: BTreeSet::new(),
        }
    }

    pub fn is_cancelled(&self) -> bool {
        self.event_status == Some(EventStatus::Cancel)
    }

    pub fn has_product_code(&self, code: &str) -> bool {
        self.products.iter().any(|product| product.code == code)
    }
}

impl Entity for Event {
    const ENTITY_NAME: &'static str = "event";
    const COLLECTION: &'static str = "events";

    fn id(&self) -> Option<EntityId> {
        self.id
    }

    fn set_id(&mut self, id: EntityId) {
        self.id = Some(id);
    }
}
