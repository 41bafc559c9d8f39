//! Structural representation builders.
//!
//! Each builder maps a [`Structure`] to a fixed-form numeric
//! [`Representation`] that the kernels in [`crate::core::kernel`] can
//! compare. Three interchangeable strategies are provided:
//!
//! - [`sine_matrix::SineMatrixRepresenter`] — sine-transformed periodic
//!   Coulomb matrix eigenvalues,
//! - [`ewald::EwaldMatrixRepresenter`] — Ewald-summation Coulomb matrix
//!   eigenvalues,
//! - [`prdf::PrdfRepresenter`] — partial radial distribution function
//!   histograms.

pub mod ewald;
pub mod prdf;
pub mod sine_matrix;

use crate::core::elements::ElementTable;
use crate::core::models::structure::Structure;
use nalgebra::DMatrix;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use thiserror::Error;

/// A fixed-form numeric representation of a periodic structure.
///
/// Produced once per structure and immutable thereafter. The variant is
/// paired 1:1 with a kernel: eigenvalue vectors are compared by the
/// Laplacian L1 kernel, pair histograms by the squared-difference kernel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Representation {
    /// Eigenvalues of an N x N symmetric Coulomb-type matrix, N = atom count.
    Eigenvalues(Vec<f64>),
    /// Histograms of periodic pair distances, keyed by the canonical
    /// (min Z, max Z) pair of atomic numbers. Missing pairs are implicitly
    /// the zero vector.
    PairHistograms(BTreeMap<(u32, u32), Vec<f64>>),
}

#[derive(Debug, Error, Clone, PartialEq)]
pub enum RepresentationError {
    #[error("Unknown element '{symbol}' at type index {type_index}")]
    UnknownElement { symbol: String, type_index: usize },

    #[error(
        "Lattice enumeration produced no vectors within cutoff {cutoff:.4} for the {space} sum; the cell is degenerate"
    )]
    EmptyLatticeSum { cutoff: f64, space: &'static str },
}

/// A strategy that turns a structure into its numeric representation.
pub trait Representer {
    fn represent(&self, structure: &Structure) -> Result<Representation, RepresentationError>;
}

/// Resolves the atomic number of every atom in the structure through the
/// injected element table. Lookup failures are fatal configuration errors.
pub(crate) fn atomic_numbers_per_atom(
    structure: &Structure,
    elements: &ElementTable,
) -> Result<Vec<f64>, RepresentationError> {
    let mut type_z = Vec::with_capacity(structure.n_types());
    for type_index in 0..structure.n_types() {
        let symbol = structure.type_name(type_index);
        let z = elements
            .atomic_number(symbol)
            .ok_or_else(|| RepresentationError::UnknownElement {
                symbol: symbol.to_string(),
                type_index,
            })?;
        type_z.push(z as f64);
    }
    Ok(structure
        .atoms()
        .iter()
        .map(|atom| type_z[atom.type_index])
        .collect())
}

/// Eigenvalues of a real symmetric matrix, in nalgebra's iteration order.
/// The paired kernel treats them as an unordered numeric vector.
pub(crate) fn symmetric_eigenvalues(matrix: DMatrix<f64>) -> Vec<f64> {
    matrix.symmetric_eigen().eigenvalues.iter().copied().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::lattice::Lattice;
    use nalgebra::Vector3;

    fn structure_with_types(type_names: &[&str]) -> Structure {
        let lattice = Lattice::cubic(5.0).unwrap();
        let sites = (0..type_names.len())
            .map(|i| (Vector3::new(0.2 * i as f64, 0.0, 0.0), i))
            .collect();
        Structure::from_fractional(
            lattice,
            sites,
            type_names.iter().map(|s| s.to_string()).collect(),
        )
        .unwrap()
    }

    #[test]
    fn atomic_numbers_resolve_per_atom() {
        let structure = structure_with_types(&["Na", "Cl"]);
        let z = atomic_numbers_per_atom(&structure, &ElementTable::standard()).unwrap();
        assert_eq!(z, vec![11.0, 17.0]);
    }

    #[test]
    fn unknown_element_is_a_fatal_error() {
        let structure = structure_with_types(&["Na", "Zz"]);
        let err = atomic_numbers_per_atom(&structure, &ElementTable::standard()).unwrap_err();
        assert_eq!(
            err,
            RepresentationError::UnknownElement {
                symbol: "Zz".to_string(),
                type_index: 1,
            }
        );
    }

    #[test]
    fn symmetric_eigenvalues_match_a_known_matrix() {
        // Eigenvalues of [[2, 1], [1, 2]] are 1 and 3.
        let matrix = DMatrix::from_row_slice(2, 2, &[2.0, 1.0, 1.0, 2.0]);
        let mut eigenvalues = symmetric_eigenvalues(matrix);
        eigenvalues.sort_by(f64::total_cmp);
        assert!((eigenvalues[0] - 1.0).abs() < 1e-10);
        assert!((eigenvalues[1] - 3.0).abs() < 1e-10);
    }
}
