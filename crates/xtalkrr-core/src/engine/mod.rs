//! # Engine Module
//!
//! The stateful layer of the library: the generic kernel ridge regression
//! model ([`krr::KrrModel`]), its configuration types, the bounded top-k
//! collector backing nearest-neighbor retrieval, and the engine error
//! taxonomy.
//!
//! All heavy numerical work here is CPU bound and synchronous; `train` is an
//! O(N^2) kernel-matrix build plus an O(N^3) Cholesky solve, while `predict`
//! and `find_closest` are O(N) per query in the number of training examples.

pub mod config;
pub mod error;
pub mod krr;
pub mod topk;
