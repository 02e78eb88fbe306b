// src/model/known.rs

//! Crystals shipped with the crate, loaded by name through the regular CIF pipeline.

use crate::error::CifError;
use crate::io::read_crystal;
use crate::model::Crystal;

struct KnownCrystal {
    name: &'static str,
    source: &'static str,
}

static KNOWN: [KnownCrystal; 4] = [
    KnownCrystal {
        name: "forsterite",
        source: include_str!("../../data/forsterite.cif"),
    },
    KnownCrystal {
        name: "nickel",
        source: include_str!("../../data/nickel.cif"),
    },
    KnownCrystal {
        name: "rutile",
        source: include_str!("../../data/rutile.cif"),
    },
    KnownCrystal {
        name: "silicon",
        source: include_str!("../../data/silicon.cif"),
    },
];

/// Registered names in alphabetical order.
pub fn names() -> impl Iterator<Item = &'static str> {
    KNOWN.iter().map(|k| k.name)
}

/// Loads a registered crystal. Names match case-insensitively.
pub fn load(name: &str) -> Result<Crystal, CifError> {
    let known = KNOWN
        .iter()
        .find(|k| k.name.eq_ignore_ascii_case(name.trim()))
        .ok_or_else(|| CifError::UnknownCrystal(name.to_string()))?;
    read_crystal(known.source.as_bytes())
}
