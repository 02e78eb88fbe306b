//src/model/mod.rs
pub mod crystal;
pub mod elements;
pub mod known;
pub mod space_group;
pub mod symmetry;

// Re-exports for cleaner imports
pub use crystal::{AtomSite, AtomSiteSet, Crystal, UnitCell, SITE_TOLERANCE};
pub use space_group::{CrystalSystem, LaueGroup, SpaceGroupInfo};
pub use symmetry::{ExpressionError, SymmetryOperation};
