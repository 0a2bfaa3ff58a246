//! # charmm-crd
//!
//! Reader and writer for the CHARMM CRD coordinate format, covering both the
//! standard layout (up to 99,999 atoms) and the extended `EXT` layout.
//!
//! ## Architecture
//!
//! The crate follows a three-layer split:
//!
//! - **[`core`]: The Foundation.** Plain data models (`CrdAtom`, `CoordinateFrame`,
//!   `LengthUnit`), the CRD wire format with its reader and writer, and small
//!   file-system helpers.
//!
//! - **[`engine`]: Shared Machinery.** Explicit reader/writer configuration values and the
//!   progress reporting hook used while writing large files.
//!
//! - **[`workflows`]: The Public API.** End-to-end operations such as exporting a frame of an
//!   external trajectory model to a `.crd` file, or summarizing an existing file.
//!
//! ## Example
//!
//! ```ignore
//! use charmm_crd::core::io::crd::CrdFile;
//! use charmm_crd::core::io::traits::CoordinateFile;
//!
//! let frame = CrdFile::read_from_path("protein.crd")?;
//! println!("{} atoms ({:?} layout)", frame.atom_count(), frame.variant());
//! ```

pub mod core;
pub mod engine;
pub mod workflows;
