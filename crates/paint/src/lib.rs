//! Patina painting core - fading vertex paint over mesh surfaces
//!
//! This crate provides the core types and algorithms for the paint system:
//! - [`types`] - Contributions, channels, and per-vertex colors
//! - [`store`] - Sparse surface/vertex contribution store with eager pruning
//! - [`brush`] - Distance-falloff paint application
//! - [`fade`] - Timed decay and color writeback
//! - [`surface`] - Collaborator traits for host-owned surfaces
//! - [`log`] - Append-only brush gesture recording
//! - [`pipeline`] - Complete paint/fade pipeline for hosts
//! - [`fixtures`] - In-memory trait implementations for tests

pub mod brush;
pub mod constants;
pub mod fade;
pub mod fixtures;
pub mod log;
pub mod pipeline;
pub mod store;
pub mod surface;
pub mod types;

pub use brush::*;
pub use constants::*;
pub use fade::*;
pub use log::*;
pub use pipeline::*;
pub use store::*;
pub use surface::*;
pub use types::*;
