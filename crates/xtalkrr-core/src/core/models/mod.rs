//! Immutable data models for periodic crystal structures.
//!
//! A [`structure::Structure`] couples a [`lattice::Lattice`] (the periodic
//! cell) with an ordered list of [`atom::Atom`]s and a per-type element-symbol
//! table. Structures are consumed read-only by the representation builders.

pub mod atom;
pub mod lattice;
pub mod structure;

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum StructureError {
    #[error("Lattice basis is singular (volume {volume:.3e} A^3); the cell is degenerate")]
    DegenerateCell { volume: f64 },

    #[error("Structure contains no atoms")]
    Empty,

    #[error(
        "Atom {atom_index} references element type {type_index}, but only {n_types} types are defined"
    )]
    TypeIndexOutOfRange {
        atom_index: usize,
        type_index: usize,
        n_types: usize,
    },
}
