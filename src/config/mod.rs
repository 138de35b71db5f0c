// src/config/mod.rs
//! Runtime configuration for the scoring engine (TOML + env overrides).

pub mod scoring;

pub use scoring::{CategorySection, EngineConfig};
