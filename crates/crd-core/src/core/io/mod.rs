//! Provides input/output functionality for CHARMM coordinate files.
//!
//! The [`crd`] module implements the fixed-column CRD format in both its
//! standard and extended layouts, and [`traits`] defines the common file
//! interface with path-based convenience methods.

pub mod crd;
pub mod traits;
