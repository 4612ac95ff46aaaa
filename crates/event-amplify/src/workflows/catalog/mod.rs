//! Reference entities (brandkeys, products, channel groups, ...) and the generic
//! storage, service and REST plumbing shared by every resource.

pub mod domain;
pub mod headers;
pub mod repository;
pub mod router;
pub mod service;
pub mod store;

pub use domain::{
    AmplifyType, Article, Brandkey, BrandkeyProduct, ChannelGroup, ChannelGroupType, EntityId,
    Product, Question, Schedule,
};
pub use repository::{
    ChannelGroupLookup, Entity, EntityRepository, LookupError, RepositoryError,
};
pub use router::catalog_router;
pub use service::{CatalogError, CatalogService};
pub use store::InMemoryStore;
