pub mod catalog;
pub mod events;
pub mod seed;
