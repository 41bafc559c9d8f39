use nalgebra::Point3;

/// A single atomic site in a periodic structure.
///
/// The element identity is stored as an index into the parent structure's
/// type table rather than as a symbol, so that per-type work (atomic-number
/// lookup, pair bookkeeping) is done once per type instead of once per atom.
#[derive(Debug, Clone, PartialEq)]
pub struct Atom {
    /// Cartesian position in Angstroms.
    pub position: Point3<f64>,
    /// Index into the structure's element-type table.
    pub type_index: usize,
}

impl Atom {
    pub fn new(position: Point3<f64>, type_index: usize) -> Self {
        Self {
            position,
            type_index,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn atom_stores_position_and_type() {
        let atom = Atom::new(Point3::new(0.5, 1.0, -0.25), 2);
        assert_eq!(atom.position, Point3::new(0.5, 1.0, -0.25));
        assert_eq!(atom.type_index, 2);
    }
}
