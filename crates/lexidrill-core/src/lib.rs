//! lexidrill-core: adaptive sampling, scoring and profile storage.
//!
//! This crate holds the drill engine: weighted selection of distinct words,
//! the difficulty update rule, and the write-back of new weights into a
//! profile's lexicon. Nothing here reads a terminal; interactive input goes
//! through the [`session::Responder`] trait.

pub mod config;
pub mod engine;
pub mod error;
pub mod merge;
pub mod model;
pub mod report;
pub mod sampler;
pub mod scorer;
pub mod seed;
pub mod session;
pub mod statistics;
pub mod store;
pub mod view;

pub use engine::{run_drill, DrillConfig, DrillEngine};
pub use error::DrillError;
