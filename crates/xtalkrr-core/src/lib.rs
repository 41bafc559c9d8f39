//! # xtalkrr
//!
//! A kernel ridge regression (KRR) library for predicting continuous physical
//! properties of crystalline materials from their periodic atomic structures.
//!
//! ## Architectural Philosophy
//!
//! The library is split into two layers with a strict separation of concerns:
//!
//! - **[`core`]: The Foundation.** Contains stateless data models
//!   (`Lattice`, `Structure`), the element lookup table, periodic geometry
//!   utilities, the structural representation builders (sine-transformed
//!   Coulomb matrix, Ewald-summation Coulomb matrix, partial radial
//!   distribution function), and the similarity kernels paired with them.
//!
//! - **[`engine`]: The Logic Core.** The stateful [`engine::krr::KrrModel`]
//!   that trains a regularized kernel model over a labelled set of structures,
//!   predicts values for new structures, and retrieves the most similar
//!   training examples. The engine is generic over a representation builder
//!   and a kernel, so the same training/prediction logic serves every
//!   representation type.
//!
//! Training solves the regularized linear system `K·α = y` with a Cholesky
//! factorization; prediction evaluates the kernel against every stored
//! training representation and returns the α-weighted sum.

pub mod core;
pub mod engine;
