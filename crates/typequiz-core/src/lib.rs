//! typequiz-core: quiz model, normalization, generation, and scoring.
//!
//! This crate defines the canonical quiz schema and the batch and on-demand
//! logic around it: synthetic generation, migration of raw documents,
//! corpus statistics, and the answer scoring engine.

pub mod axis;
pub mod catalog;
pub mod config;
pub mod error;
pub mod generator;
pub mod model;
pub mod normalizer;
pub mod scoring;
pub mod statistics;
pub mod store;
pub mod typology;
pub mod validate;
