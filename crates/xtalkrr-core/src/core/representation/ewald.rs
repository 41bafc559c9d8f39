use super::{
    Representation, RepresentationError, Representer, atomic_numbers_per_atom,
    symmetric_eigenvalues,
};
use crate::core::elements::ElementTable;
use crate::core::geometry::lattice_points_within;
use crate::core::models::structure::Structure;
use nalgebra::DMatrix;
use std::f64::consts::PI;

/// Error tolerance of the Ewald sum; the real- and reciprocal-space cutoffs
/// are derived from it.
const EWALD_TOLERANCE: f64 = 1e-12;

/// Builds the Coulomb matrix of a structure with true periodic
/// electrostatics via Ewald summation and represents it by its eigenvalues.
///
/// The 1/r lattice sum is split into a short-ranged real-space series, a
/// reciprocal-space series, and a closed-form self/neutralizing-background
/// correction. The splitting parameter follows
/// `alpha = sqrt(pi) * (0.01 * n_atoms / V)^(1/6)`, with cutoffs
/// `Lmax = sqrt(-ln eps)/alpha` and `Gmax = 2*alpha*sqrt(-ln eps)`.
#[derive(Debug, Clone)]
pub struct EwaldMatrixRepresenter {
    elements: ElementTable,
}

impl EwaldMatrixRepresenter {
    pub fn new(elements: &ElementTable) -> Self {
        Self {
            elements: elements.clone(),
        }
    }

    /// Computes the full N x N Ewald Coulomb matrix.
    fn coulomb_matrix(&self, structure: &Structure) -> Result<DMatrix<f64>, RepresentationError> {
        let z = atomic_numbers_per_atom(structure, &self.elements)?;
        let lattice = structure.lattice();
        let n = structure.n_atoms();
        let volume = lattice.volume();

        let alpha = PI.sqrt() * (0.01 * n as f64 / volume).powf(1.0 / 6.0);
        let log_tolerance = -EWALD_TOLERANCE.ln();
        let l_max = log_tolerance.sqrt() / alpha;
        let g_max = 2.0 * alpha * log_tolerance.sqrt();

        let real_vectors = lattice_points_within(&lattice.vectors(), l_max, false);
        if real_vectors.is_empty() {
            return Err(RepresentationError::EmptyLatticeSum {
                cutoff: l_max,
                space: "real-space",
            });
        }

        let reciprocal_basis = lattice.reciprocal_vectors().map(|v| v * (2.0 * PI));
        let reciprocal_vectors = lattice_points_within(&reciprocal_basis, g_max, false);
        if reciprocal_vectors.is_empty() {
            return Err(RepresentationError::EmptyLatticeSum {
                cutoff: g_max,
                space: "reciprocal-space",
            });
        }

        let reciprocal_prefactors: Vec<f64> = reciprocal_vectors
            .iter()
            .map(|g| (-g.norm_squared() / (4.0 * alpha * alpha)).exp() / (PI * volume))
            .collect();

        let sqrt_pi = PI.sqrt();
        let mut matrix = DMatrix::zeros(n, n);
        for i in 0..n {
            for j in i..n {
                // Shortest displacement between the two atoms.
                let displacement = structure.atom(i).position - structure.closest_image(i, j);

                // Real-space series over the enumerated lattice vectors; the
                // L = 0 term only exists for distinct atoms.
                let mut real_sum = 0.0;
                for l in &real_vectors {
                    let dist = (displacement + l).norm();
                    if dist > 0.0 {
                        real_sum += libm::erfc(alpha * dist) / dist;
                    }
                }
                if i != j {
                    let dist = displacement.norm();
                    real_sum += libm::erfc(alpha * dist) / dist;
                }
                real_sum *= z[i] * z[j];

                // Reciprocal-space series.
                let mut reciprocal_sum = 0.0;
                for (g, prefactor) in reciprocal_vectors.iter().zip(&reciprocal_prefactors) {
                    reciprocal_sum += prefactor * g.dot(&displacement).cos();
                }
                reciprocal_sum *= z[i] * z[j];

                // Self-interaction and uniform-background correction.
                let correction = if i != j {
                    -((z[i] * z[i] + z[j] * z[j]) * alpha / sqrt_pi
                        + (z[i] + z[j]) * (z[i] + z[j]) * PI / (2.0 * volume * alpha * alpha))
                } else {
                    -z[i] * z[i] * (alpha / sqrt_pi + PI / (2.0 * volume * alpha * alpha))
                };

                let total = real_sum + reciprocal_sum + correction;
                if i == j {
                    // Halved to avoid double counting the self pair.
                    matrix[(i, i)] = total / 2.0;
                } else {
                    matrix[(i, j)] = total;
                    matrix[(j, i)] = total;
                }
            }
        }
        Ok(matrix)
    }
}

impl Representer for EwaldMatrixRepresenter {
    fn represent(&self, structure: &Structure) -> Result<Representation, RepresentationError> {
        let matrix = self.coulomb_matrix(structure)?;
        Ok(Representation::Eigenvalues(symmetric_eigenvalues(matrix)))
    }
}
