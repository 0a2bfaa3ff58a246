//! # Workflows Module
//!
//! High-level entry points built on the CRD reader and writer.
//!
//! - **Export Workflow** ([`export`]) - Writes one frame of an external atom/trajectory
//!   model to a CRD file, selecting the frame and composing the default title.
//! - **Inspect Workflow** ([`inspect`]) - Loads a CRD file and summarizes its layout,
//!   atom counts, title and coordinate extent.

pub mod export;
pub mod inspect;
