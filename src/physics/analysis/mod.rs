// src/physics/analysis/mod.rs
pub mod symmetry;
