use nalgebra::Vector3;

/// Enumerates every integer combination `n1*v1 + n2*v2 + n3*v3` of the given
/// basis vectors whose norm does not exceed `cutoff`.
///
/// Used for both the real-space and reciprocal-space Ewald sums and for the
/// periodic-image search of the PRDF. The search range along each direction
/// is derived from the projection of that vector onto the unit normal of the
/// plane spanned by the other two, so skewed cells are covered without
/// over-enumeration.
///
/// Returns an empty list when the basis is degenerate (callers treat that as
/// a fatal configuration error) or when `cutoff` is non-positive.
pub fn lattice_points_within(
    vectors: &[Vector3<f64>; 3],
    cutoff: f64,
    include_origin: bool,
) -> Vec<Vector3<f64>> {
    if cutoff <= 0.0 {
        return Vec::new();
    }

    // Steps needed along direction i to cover a sphere of radius `cutoff`.
    let mut steps = [0i64; 3];
    for i in 0..3 {
        let normal = vectors[(i + 1) % 3].cross(&vectors[(i + 2) % 3]);
        let norm = normal.norm();
        if norm < 1e-12 {
            return Vec::new();
        }
        let extent = vectors[i].dot(&normal).abs() / norm;
        if extent < 1e-12 {
            return Vec::new();
        }
        steps[i] = (cutoff / extent).ceil() as i64;
    }

    let mut points = Vec::new();
    for n1 in -steps[0]..=steps[0] {
        for n2 in -steps[1]..=steps[1] {
            for n3 in -steps[2]..=steps[2] {
                if !include_origin && n1 == 0 && n2 == 0 && n3 == 0 {
                    continue;
                }
                let point =
                    vectors[0] * n1 as f64 + vectors[1] * n2 as f64 + vectors[2] * n3 as f64;
                if point.norm() <= cutoff {
                    points.push(point);
                }
            }
        }
    }
    points
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_cubic() -> [Vector3<f64>; 3] {
        [Vector3::x(), Vector3::y(), Vector3::z()]
    }

    #[test]
    fn cubic_cell_at_unit_cutoff_yields_six_neighbors() {
        let points = lattice_points_within(&unit_cubic(), 1.0, false);
        assert_eq!(points.len(), 6);
        for p in &points {
            assert!((p.norm() - 1.0).abs() < 1e-12);
        }
    }

    #[test]
    fn cubic_cell_at_larger_cutoff_includes_face_diagonals() {
        // 6 axis neighbors plus 12 face diagonals of length sqrt(2).
        let points = lattice_points_within(&unit_cubic(), 1.5, false);
        assert_eq!(points.len(), 18);
    }

    #[test]
    fn origin_is_included_only_on_request() {
        let with = lattice_points_within(&unit_cubic(), 1.0, true);
        let without = lattice_points_within(&unit_cubic(), 1.0, false);
        assert_eq!(with.len(), without.len() + 1);
        assert!(with.iter().any(|p| p.norm() < 1e-12));
        assert!(without.iter().all(|p| p.norm() > 1e-12));
    }

    #[test]
    fn degenerate_basis_yields_no_points() {
        let vectors = [Vector3::x(), Vector3::x(), Vector3::z()];
        assert!(lattice_points_within(&vectors, 2.0, false).is_empty());
    }

    #[test]
    fn non_positive_cutoff_yields_no_points() {
        assert!(lattice_points_within(&unit_cubic(), 0.0, true).is_empty());
        assert!(lattice_points_within(&unit_cubic(), -1.0, true).is_empty());
    }

    #[test]
    fn skewed_cell_points_all_respect_the_cutoff() {
        let vectors = [
            Vector3::new(1.0, 0.0, 0.0),
            Vector3::new(0.7, 0.9, 0.0),
            Vector3::new(0.1, 0.2, 1.1),
        ];
        let cutoff = 3.0;
        let points = lattice_points_within(&vectors, cutoff, false);
        assert!(!points.is_empty());
        for p in &points {
            assert!(p.norm() <= cutoff + 1e-12);
        }
    }
}
