use super::StructureError;
use nalgebra::{Matrix3, Vector3};

/// The periodic cell of a crystal: a 3x3 basis whose columns are the lattice
/// vectors, with the inverse basis and cell volume cached at construction.
///
/// The inverse basis converts cartesian displacements to fractional
/// coordinates; its rows are the (unscaled) reciprocal lattice vectors used
/// by the Ewald reciprocal-space sum.
#[derive(Debug, Clone, PartialEq)]
pub struct Lattice {
    basis: Matrix3<f64>,
    inverse: Matrix3<f64>,
    volume: f64,
}

const MIN_CELL_VOLUME: f64 = 1e-9; // A^3

impl Lattice {
    /// Creates a lattice from a basis matrix whose columns are the lattice
    /// vectors, in Angstroms.
    ///
    /// # Errors
    ///
    /// Returns [`StructureError::DegenerateCell`] if the basis is singular or
    /// the cell volume is vanishingly small.
    pub fn new(basis: Matrix3<f64>) -> Result<Self, StructureError> {
        let volume = basis.determinant().abs();
        let inverse = basis
            .try_inverse()
            .filter(|_| volume > MIN_CELL_VOLUME)
            .ok_or(StructureError::DegenerateCell { volume })?;
        Ok(Self {
            basis,
            inverse,
            volume,
        })
    }

    /// Creates a cubic lattice with edge length `a` Angstroms.
    pub fn cubic(a: f64) -> Result<Self, StructureError> {
        Self::new(Matrix3::from_diagonal_element(a))
    }

    pub fn basis(&self) -> &Matrix3<f64> {
        &self.basis
    }

    /// The three lattice vectors (columns of the basis).
    pub fn vectors(&self) -> [Vector3<f64>; 3] {
        [
            self.basis.column(0).into_owned(),
            self.basis.column(1).into_owned(),
            self.basis.column(2).into_owned(),
        ]
    }

    /// The reciprocal lattice vectors (rows of the inverse basis), without
    /// the 2π factor.
    pub fn reciprocal_vectors(&self) -> [Vector3<f64>; 3] {
        [
            self.inverse.row(0).transpose(),
            self.inverse.row(1).transpose(),
            self.inverse.row(2).transpose(),
        ]
    }

    pub fn volume(&self) -> f64 {
        self.volume
    }

    /// Converts a cartesian displacement to fractional coordinates.
    pub fn to_fractional(&self, cartesian: &Vector3<f64>) -> Vector3<f64> {
        self.inverse * cartesian
    }

    /// Converts a fractional displacement to cartesian coordinates.
    pub fn to_cartesian(&self, fractional: &Vector3<f64>) -> Vector3<f64> {
        self.basis * fractional
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOLERANCE: f64 = 1e-12;

    #[test]
    fn cubic_lattice_has_expected_volume_and_vectors() {
        let lattice = Lattice::cubic(4.0).unwrap();
        assert!((lattice.volume() - 64.0).abs() < TOLERANCE);
        let [a, b, c] = lattice.vectors();
        assert_eq!(a, Vector3::new(4.0, 0.0, 0.0));
        assert_eq!(b, Vector3::new(0.0, 4.0, 0.0));
        assert_eq!(c, Vector3::new(0.0, 0.0, 4.0));
    }

    #[test]
    fn fractional_and_cartesian_conversions_round_trip() {
        let basis = Matrix3::new(3.0, 0.5, 0.0, 0.0, 2.5, 0.3, 0.0, 0.0, 4.0);
        let lattice = Lattice::new(basis).unwrap();
        let v = Vector3::new(1.2, -0.7, 2.9);
        let round_tripped = lattice.to_cartesian(&lattice.to_fractional(&v));
        assert!((round_tripped - v).norm() < TOLERANCE);
    }

    #[test]
    fn reciprocal_vectors_are_dual_to_lattice_vectors() {
        let basis = Matrix3::new(3.0, 0.5, 0.1, 0.2, 2.5, 0.3, 0.0, 0.1, 4.0);
        let lattice = Lattice::new(basis).unwrap();
        let real = lattice.vectors();
        let recip = lattice.reciprocal_vectors();
        for (i, g) in recip.iter().enumerate() {
            for (j, a) in real.iter().enumerate() {
                let expected = if i == j { 1.0 } else { 0.0 };
                assert!((g.dot(a) - expected).abs() < 1e-10);
            }
        }
    }

    #[test]
    fn singular_basis_is_rejected_as_degenerate() {
        let basis = Matrix3::new(1.0, 2.0, 3.0, 2.0, 4.0, 6.0, 0.0, 0.0, 1.0);
        let result = Lattice::new(basis);
        assert!(matches!(
            result,
            Err(StructureError::DegenerateCell { .. })
        ));
    }

    #[test]
    fn zero_volume_cell_is_rejected() {
        assert!(matches!(
            Lattice::cubic(0.0),
            Err(StructureError::DegenerateCell { .. })
        ));
    }
}
