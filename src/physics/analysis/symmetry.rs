use crate::model::space_group;
use crate::model::Crystal;
use crate::utils::linalg;
use moyo::base::{AngleTolerance, Cell, Lattice};
use moyo::data::Setting;
use moyo::MoyoDataset;
use nalgebra::Vector3;

/// Position tolerance handed to the symmetry search, in Å.
const SYMPREC: f64 = 1e-4;

// --- Structs for Analysis Results ---
#[derive(Debug, Clone)]
pub struct SymmetryInfo {
    pub number: i32,
    pub symbol: String,
    pub system: String,
}

impl SymmetryInfo {
    /// Whether the detected group is the one the file declared.
    pub fn agrees_with(&self, crystal: &Crystal) -> bool {
        self.number == i32::from(crystal.space_group().index)
    }
}

// =========================================================================
// Read-only detection of the space group from the expanded sites
// =========================================================================
pub fn analyze(crystal: &Crystal) -> Result<SymmetryInfo, String> {
    if crystal.sites().is_empty() {
        return Err("No atom sites to analyse".to_string());
    }

    // Moyo takes row lattice vectors
    let lattice = Lattice::new(linalg::lattice_matrix(crystal.unit_cell().lattice()));

    let mut positions = Vec::with_capacity(crystal.sites().len());
    let mut numbers = Vec::with_capacity(crystal.sites().len());
    for site in crystal.sites() {
        positions.push(Vector3::from(site.position()));
        numbers.push(i32::from(site.atomic_number()));
    }

    let cell = Cell::new(lattice, positions, numbers);
    let dataset = MoyoDataset::new(&cell, SYMPREC, AngleTolerance::Default, Setting::Spglib, true)
        .map_err(|e| format!("Symmetry search failed: {:?}", e))?;

    let (symbol, system) = match space_group::lookup(i64::from(dataset.number)) {
        Some(info) => (info.symbol.to_string(), info.crystal_system.to_string()),
        None => ("Unknown".to_string(), "Unknown".to_string()),
    };

    Ok(SymmetryInfo {
        number: dataset.number,
        symbol,
        system,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::known;

    #[test]
    fn detects_diamond_and_fcc() {
        let si = known::load("silicon").unwrap();
        let info = analyze(&si).unwrap();
        assert_eq!(info.number, 227);
        assert_eq!(info.system, "Cubic");
        assert!(info.agrees_with(&si));

        let ni = known::load("nickel").unwrap();
        let info = analyze(&ni).unwrap();
        assert_eq!(info.number, 225);
        assert_eq!(info.symbol, "Fm-3m");
    }
}
