//! Oil spill weathering and dispersal estimation.
//!
//! The entry point is [`DispersalModel`], usually constructed through
//! [`DispersalModelBuilder`] so that inputs are validated once
//! at the boundary. The calculators in [`weathering`] and [`spreading`] are
//! pure and never fail.

pub mod error;
pub mod export;
pub mod geo;
pub mod impact;
pub mod logger;
pub mod model;
pub mod samples;
pub mod spreading;
pub mod sweep;
pub mod weathering;

pub use error::SpillSimError;
pub use model::{builder::DispersalModelBuilder, engine::DispersalModel};
