//! # Core Module
//!
//! Stateless building blocks of the CRD codec.
//!
//! - **Data models** ([`models`]) - Atom attributes, parsed coordinate frames and length units
//! - **File I/O** ([`io`]) - The CHARMM CRD wire format, its reader and its writer
//! - **Utilities** ([`utils`]) - File name normalization helpers

pub mod io;
pub mod models;
pub mod utils;
