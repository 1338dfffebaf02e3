//! # Rated Server Library
//!
//! Composition root and startup utilities for the Rated server binary.

pub mod di;
pub mod startup;
