// src/physics/mod.rs
pub mod analysis;
