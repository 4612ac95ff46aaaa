//! Event amplify backend: reference data catalog, event intake and the point-scoring
//! classifier that decides whether an event is amplified.

pub mod config;
pub mod error;
pub mod telemetry;
pub mod workflows;
