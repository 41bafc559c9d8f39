//! # Core Module
//!
//! Fundamental building blocks for structure-based property prediction:
//! immutable data models for periodic crystals, the element lookup table,
//! periodic geometry utilities, the structural representation builders, and
//! the similarity kernels that compare their outputs.
//!
//! Everything in this layer is stateless and side-effect free; the stateful
//! training logic lives in [`crate::engine`].

pub mod elements;
pub mod geometry;
pub mod kernel;
pub mod models;
pub mod representation;
