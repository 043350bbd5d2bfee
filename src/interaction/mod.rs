//! Bookkeeping produced alongside painting: clickable entities for tooltips
//! and crosshair candidate tracking.

mod crosshair;
mod entity;

pub use crosshair::CategoryCrosshairState;
pub use entity::{ChartEntity, EntityArea, EntityCollection, EntityKind};
