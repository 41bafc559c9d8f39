use super::StructureError;
use super::atom::Atom;
use super::lattice::Lattice;
use nalgebra::{Point3, Vector3};

/// An immutable periodic crystal structure: a lattice, an ordered list of
/// atoms, and the element symbol for each atom type.
///
/// Structures are consumed read-only by the representation builders and the
/// KRR engine; all derived quantities (fractional coordinates, minimum-image
/// displacements) are computed on demand from the cached lattice inverse.
#[derive(Debug, Clone, PartialEq)]
pub struct Structure {
    lattice: Lattice,
    atoms: Vec<Atom>,
    type_names: Vec<String>,
}

impl Structure {
    /// Creates a structure from atoms with cartesian positions (Angstroms).
    ///
    /// # Errors
    ///
    /// Returns [`StructureError::Empty`] for an empty atom list and
    /// [`StructureError::TypeIndexOutOfRange`] if any atom references a type
    /// not covered by `type_names`.
    pub fn from_cartesian(
        lattice: Lattice,
        atoms: Vec<Atom>,
        type_names: Vec<String>,
    ) -> Result<Self, StructureError> {
        if atoms.is_empty() {
            return Err(StructureError::Empty);
        }
        for (atom_index, atom) in atoms.iter().enumerate() {
            if atom.type_index >= type_names.len() {
                return Err(StructureError::TypeIndexOutOfRange {
                    atom_index,
                    type_index: atom.type_index,
                    n_types: type_names.len(),
                });
            }
        }
        Ok(Self {
            lattice,
            atoms,
            type_names,
        })
    }

    /// Creates a structure from (fractional position, type index) sites.
    pub fn from_fractional(
        lattice: Lattice,
        sites: Vec<(Vector3<f64>, usize)>,
        type_names: Vec<String>,
    ) -> Result<Self, StructureError> {
        let atoms = sites
            .into_iter()
            .map(|(frac, type_index)| {
                Atom::new(Point3::from(lattice.to_cartesian(&frac)), type_index)
            })
            .collect();
        Self::from_cartesian(lattice, atoms, type_names)
    }

    pub fn lattice(&self) -> &Lattice {
        &self.lattice
    }

    pub fn n_atoms(&self) -> usize {
        self.atoms.len()
    }

    pub fn n_types(&self) -> usize {
        self.type_names.len()
    }

    pub fn atoms(&self) -> &[Atom] {
        &self.atoms
    }

    pub fn atom(&self, index: usize) -> &Atom {
        &self.atoms[index]
    }

    /// The element symbol for a type index.
    pub fn type_name(&self, type_index: usize) -> &str {
        &self.type_names[type_index]
    }

    pub fn volume(&self) -> f64 {
        self.lattice.volume()
    }

    /// Fractional coordinates of atom `index`.
    pub fn fractional_position(&self, index: usize) -> Vector3<f64> {
        self.lattice
            .to_fractional(&self.atoms[index].position.coords)
    }

    /// The position of the periodic image of atom `to` closest to atom
    /// `from` (the minimum-image convention).
    pub fn closest_image(&self, from: usize, to: usize) -> Point3<f64> {
        let frac_from = self.fractional_position(from);
        let frac_to = self.fractional_position(to);
        let delta = (frac_to - frac_from).map(|d| d - d.round());
        let image_frac = frac_from + delta;
        Point3::from(self.lattice.to_cartesian(&image_frac))
    }
}
