use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::repository::Entity;

/// Identifier shared by every stored entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntityId(pub u64);

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Category a channel group scores for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ChannelGroupType {
    Role,
    Invitee,
    Scale,
}

/// Reference data carrying the point value used by event classification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChannelGroup {
    pub id: Option<EntityId>,
    pub name: String,
    pub point: i64,
    #[serde(rename = "type")]
    pub group_type: ChannelGroupType,
}

/// How an event is amplified once it clears classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AmplifyType {
    Share,
    Sponsor,
    Inject,
}

/// Intake answers referencing the channel groups an event is scored against.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    pub id: Option<EntityId>,
    pub role_id: EntityId,
    pub invitee_id: EntityId,
    pub scale_id: EntityId,
    pub amplify_type: AmplifyType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: Option<EntityId>,
    pub code: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Brandkey {
    pub id: Option<EntityId>,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Association between a brandkey and one of its products.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BrandkeyProduct {
    pub id: Option<EntityId>,
    pub brandkey_id: EntityId,
    pub product_id: EntityId,
}

/// Publication slot for an event on a channel group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Schedule {
    pub id: Option<EntityId>,
    pub event_id: EntityId,
    pub channel_group_id: EntityId,
    pub publish_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Article {
    pub id: Option<EntityId>,
    pub title: String,
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub event_id: Option<EntityId>,
}

macro_rules! impl_entity {
    ($ty:ty, $name:literal, $collection:literal) => {
        impl Entity for $ty {
            const ENTITY_NAME: &'static str = $name;
            const COLLECTION: &'static str = $collection;

            fn id(&self) -> Option<EntityId> {
                self.id
            }

            fn set_id(&mut self, id: EntityId) {
                self.id = Some(id);
            }
        }
    };
}

impl_entity!(ChannelGroup, "channelGroup", "channel-groups");
impl_entity!(Question, "question", "questions");
impl_entity!(Product, "product", "products");
impl_entity!(Brandkey, "brandkey", "brandkeys");
impl_entity!(BrandkeyProduct, "brandkeyProduct", "brandkey-products");
impl_entity!(Schedule, "schedule", "schedules");
impl_entity!(Article, "article", "articles");
