// src/model/crystal.rs

use std::f64::consts::PI;

use serde::Serialize;

use crate::model::elements;
use crate::model::space_group::SpaceGroupInfo;
use crate::utils::linalg;

/// Two fractional positions closer than this on every axis are the same site.
pub const SITE_TOLERANCE: f64 = 1e-6;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct UnitCell {
    pub a: f64,
    pub b: f64,
    pub c: f64,
    /// Radians.
    pub alpha: f64,
    /// Radians.
    pub beta: f64,
    /// Radians.
    pub gamma: f64,
}

impl UnitCell {
    /// Builds a cell from lengths and angles in radians.
    pub fn new(a: f64, b: f64, c: f64, alpha: f64, beta: f64, gamma: f64) -> Result<Self, String> {
        for (name, len) in [("a", a), ("b", b), ("c", c)] {
            if !(len.is_finite() && len > 0.0) {
                return Err(format!("length {} = {} is not positive", name, len));
            }
        }
        for (name, angle) in [("alpha", alpha), ("beta", beta), ("gamma", gamma)] {
            if !(angle > 0.0 && angle < PI) {
                return Err(format!(
                    "angle {} = {:.3} deg is outside (0, 180)",
                    name,
                    angle.to_degrees()
                ));
            }
        }
        let cell = Self {
            a,
            b,
            c,
            alpha,
            beta,
            gamma,
        };
        if cell.volume_factor() <= 0.0 {
            return Err("angles do not describe a three-dimensional cell".to_string());
        }
        Ok(cell)
    }

    pub fn from_degrees(a: f64, b: f64, c: f64, alpha: f64, beta: f64, gamma: f64) -> Result<Self, String> {
        Self::new(a, b, c, alpha.to_radians(), beta.to_radians(), gamma.to_radians())
    }

    // 1 - cos²α - cos²β - cos²γ + 2 cosα cosβ cosγ
    fn volume_factor(&self) -> f64 {
        let (ca, cb, cg) = (self.alpha.cos(), self.beta.cos(), self.gamma.cos());
        1.0 - ca * ca - cb * cb - cg * cg + 2.0 * ca * cb * cg
    }

    pub fn volume(&self) -> f64 {
        self.a * self.b * self.c * self.volume_factor().sqrt()
    }

    /// Lattice vectors as rows: a along x, b in the xy-plane.
    pub fn lattice(&self) -> [[f64; 3]; 3] {
        let (ca, cb, cg) = (self.alpha.cos(), self.beta.cos(), self.gamma.cos());
        let sg = self.gamma.sin();
        let v = self.volume_factor().sqrt();
        [
            [self.a, 0.0, 0.0],
            [self.b * cg, self.b * sg, 0.0],
            [self.c * cb, self.c * (ca - cb * cg) / sg, self.c * v / sg],
        ]
    }

    pub fn to_cartesian(&self, frac: [f64; 3]) -> [f64; 3] {
        linalg::frac_to_cart(frac, self.lattice())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum InvalidSite {
    AtomicNumber(u8),
    Position([f64; 3]),
    Occupancy(f64),
}

/// One atom position in the cell.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AtomSite {
    atomic_number: u8,
    position: [f64; 3],
    occupancy: f64,
}

impl AtomSite {
    /// Wraps every coordinate into `[0, 1)`.
    pub fn new(atomic_number: u8, position: [f64; 3], occupancy: f64) -> Result<Self, InvalidSite> {
        if atomic_number == 0 {
            return Err(InvalidSite::AtomicNumber(atomic_number));
        }
        if !(0.0..=1.0).contains(&occupancy) {
            return Err(InvalidSite::Occupancy(occupancy));
        }
        if position.iter().any(|c| !c.is_finite()) {
            return Err(InvalidSite::Position(position));
        }
        Ok(Self {
            atomic_number,
            position: position.map(wrap_unit),
            occupancy,
        })
    }

    pub fn atomic_number(&self) -> u8 {
        self.atomic_number
    }

    pub fn element(&self) -> &'static str {
        elements::symbol(self.atomic_number).unwrap_or("X")
    }

    pub fn position(&self) -> [f64; 3] {
        self.position
    }

    pub fn occupancy(&self) -> f64 {
        self.occupancy
    }

    /// Periodic positional equality within [`SITE_TOLERANCE`].
    pub fn same_position(&self, other: &AtomSite) -> bool {
        self.position
            .iter()
            .zip(other.position.iter())
            .all(|(p, q)| {
                let d = (p - q).abs();
                d.min(1.0 - d) < SITE_TOLERANCE
            })
    }
}

fn wrap_unit(c: f64) -> f64 {
    // `+ 0.0` turns -0.0 into 0.0
    let w = c.rem_euclid(1.0) + 0.0;
    if w >= 1.0 - SITE_TOLERANCE * 1e-3 {
        0.0
    } else {
        w
    }
}

/// Insertion-ordered atom sites with at most one site per position.
#[derive(Debug, Clone, Default, Serialize)]
pub struct AtomSiteSet {
    sites: Vec<AtomSite>,
}

impl AtomSiteSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds the site unless one already sits at the same position.
    /// Returns whether the site was added.
    pub fn insert(&mut self, site: AtomSite) -> bool {
        if self.sites.iter().any(|s| s.same_position(&site)) {
            return false;
        }
        self.sites.push(site);
        true
    }

    pub fn len(&self) -> usize {
        self.sites.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sites.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, AtomSite> {
        self.sites.iter()
    }

    pub fn into_vec(self) -> Vec<AtomSite> {
        self.sites
    }
}

/// A fully assembled crystal structure.
#[derive(Debug, Clone, Serialize)]
pub struct Crystal {
    name: String,
    unit_cell: UnitCell,
    space_group: SpaceGroupInfo,
    sites: Vec<AtomSite>,
}

impl Crystal {
    pub fn new(name: String, unit_cell: UnitCell, space_group: SpaceGroupInfo, sites: AtomSiteSet) -> Self {
        Self {
            name,
            unit_cell,
            space_group,
            sites: sites.into_vec(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn unit_cell(&self) -> &UnitCell {
        &self.unit_cell
    }

    pub fn space_group(&self) -> &SpaceGroupInfo {
        &self.space_group
    }

    pub fn sites(&self) -> &[AtomSite] {
        &self.sites
    }

    pub fn count_of(&self, atomic_number: u8) -> usize {
        self.sites
            .iter()
            .filter(|s| s.atomic_number == atomic_number)
            .count()
    }

    /// Element counts ordered by atomic number, e.g. `[("O", 24), ("Mg", 9), ("Si", 8)]`.
    pub fn composition(&self) -> Vec<(&'static str, usize)> {
        let mut numbers: Vec<u8> = self.sites.iter().map(|s| s.atomic_number).collect();
        numbers.sort_unstable();
        numbers.dedup();
        numbers
            .into_iter()
            .map(|z| (elements::symbol(z).unwrap_or("X"), self.count_of(z)))
            .collect()
    }
}
