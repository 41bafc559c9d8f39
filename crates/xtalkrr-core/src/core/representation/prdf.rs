use super::{Representation, RepresentationError, Representer};
use crate::core::elements::ElementTable;
use crate::core::geometry::lattice_points_within;
use crate::core::models::structure::Structure;
use std::collections::BTreeMap;

/// Builds the partial radial distribution function (PRDF) of a structure:
/// one histogram of periodic-image pair distances per element pair, binned
/// into `n_bins` equal-width bins over `(0, cutoff]` Angstroms.
///
/// Histograms are keyed by the canonical `(min Z, max Z)` atomic-number pair;
/// every element pair present in the structure gets a key, even when no
/// distance falls inside the cutoff, so two structures with the same
/// composition always share a key set.
#[derive(Debug, Clone)]
pub struct PrdfRepresenter {
    elements: ElementTable,
    cutoff: f64,
    n_bins: usize,
}

impl PrdfRepresenter {
    /// `cutoff` is the interaction distance cutoff in Angstroms, `n_bins`
    /// the histogram resolution. Both are validated by the engine
    /// configuration before a model is constructed.
    pub fn new(elements: &ElementTable, cutoff: f64, n_bins: usize) -> Self {
        Self {
            elements: elements.clone(),
            cutoff,
            n_bins,
        }
    }

    fn canonical_pair(z_a: u32, z_b: u32) -> (u32, u32) {
        (z_a.min(z_b), z_a.max(z_b))
    }
}

impl Representer for PrdfRepresenter {
    fn represent(&self, structure: &Structure) -> Result<Representation, RepresentationError> {
        let mut type_z = Vec::with_capacity(structure.n_types());
        for type_index in 0..structure.n_types() {
            let symbol = structure.type_name(type_index);
            let z = self.elements.atomic_number(symbol).ok_or_else(|| {
                RepresentationError::UnknownElement {
                    symbol: symbol.to_string(),
                    type_index,
                }
            })?;
            type_z.push(z);
        }

        // Seed a histogram for every element pair present in the structure.
        let mut histograms: BTreeMap<(u32, u32), Vec<f64>> = BTreeMap::new();
        for &z_a in &type_z {
            for &z_b in &type_z {
                histograms
                    .entry(Self::canonical_pair(z_a, z_b))
                    .or_insert_with(|| vec![0.0; self.n_bins]);
            }
        }

        // The minimum-image displacement is at most half the sum of the cell
        // edge norms away from any image within the cutoff sphere.
        let lattice = structure.lattice();
        let half_diameter = lattice.vectors().iter().map(|v| v.norm()).sum::<f64>() / 2.0;
        let images = lattice_points_within(
            &lattice.vectors(),
            self.cutoff + half_diameter,
            true,
        );
        if images.is_empty() {
            return Err(RepresentationError::EmptyLatticeSum {
                cutoff: self.cutoff + half_diameter,
                space: "periodic-image",
            });
        }

        let bin_width = self.cutoff / self.n_bins as f64;
        for i in 0..structure.n_atoms() {
            let z_i = type_z[structure.atom(i).type_index];
            for j in 0..structure.n_atoms() {
                let z_j = type_z[structure.atom(j).type_index];
                let displacement = structure.closest_image(i, j) - structure.atom(i).position;
                let histogram = histograms
                    .entry(Self::canonical_pair(z_i, z_j))
                    .or_insert_with(|| vec![0.0; self.n_bins]);
                for image in &images {
                    let dist = (displacement + image).norm();
                    if dist <= 0.0 || dist > self.cutoff {
                        continue;
                    }
                    let bin = ((dist / bin_width) as usize).min(self.n_bins - 1);
                    histogram[bin] += 1.0;
                }
            }
        }

        Ok(Representation::PairHistograms(histograms))
    }
}
