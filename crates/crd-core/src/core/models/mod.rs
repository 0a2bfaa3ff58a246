//! # Core Models Module
//!
//! Data structures exchanged with the CRD reader and writer.
//!
//! - [`atom`] - Per-atom attributes consumed by the writer
//! - [`frame`] - The single coordinate frame produced by the reader
//! - [`units`] - Length units and conversion factors

pub mod atom;
pub mod frame;
pub mod units;
