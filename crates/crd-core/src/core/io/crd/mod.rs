//! CHARMM CRD coordinate files.
//!
//! Two layouts exist: the standard one, limited to 99,999 atoms, and the
//! extended `EXT` layout with wider columns. The reader detects the layout from
//! the count line; the writer picks it from the number of atoms.

pub mod error;
pub mod format;
pub mod reader;
pub mod record;
pub mod writer;

use self::error::CrdError;
use self::reader::CrdReader;
use self::writer::CrdWriter;
use super::traits::CoordinateFile;
use crate::core::models::atom::CrdAtom;
use crate::core::models::frame::CoordinateFrame;
use crate::engine::config::{ReaderConfig, WriterConfig};
use std::io::{BufRead, Write};

/// [`CoordinateFile`] implementation for CRD using default configuration.
///
/// For unit conversion, strict atom-count checks or a forced layout use
/// [`CrdReader`] and [`CrdWriter`] directly.
pub struct CrdFile;

impl CoordinateFile for CrdFile {
    type Frame = CoordinateFrame;
    type Atom = CrdAtom;
    type Error = CrdError;

    const EXTENSION: &'static str = "crd";

    fn read_from(reader: &mut impl BufRead) -> Result<Self::Frame, Self::Error> {
        CrdReader::new(ReaderConfig::default()).parse(reader)
    }

    fn write_to(
        atoms: &[Self::Atom],
        title: &str,
        writer: &mut impl Write,
    ) -> Result<(), Self::Error> {
        CrdWriter::new(WriterConfig::default()).write_to(atoms, title, writer)?;
        Ok(())
    }
}
