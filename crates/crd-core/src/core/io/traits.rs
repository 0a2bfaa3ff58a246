use crate::core::utils::path::with_default_extension;
use std::error::Error;
use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

/// Defines the interface for reading and writing coordinate file formats.
///
/// Implementors handle format-specific parsing and serialization of a single
/// frame; the provided methods add file handling on top.
pub trait CoordinateFile {
    /// The parse result of a whole file.
    type Frame;

    /// The per-atom data consumed when writing.
    type Atom;

    /// The error type for I/O operations.
    type Error: Error + From<io::Error>;

    /// File extension used when an output path has none.
    const EXTENSION: &'static str;

    /// Reads a frame from a buffered reader.
    ///
    /// # Errors
    ///
    /// Returns an error if parsing fails or I/O operations encounter issues.
    fn read_from(reader: &mut impl BufRead) -> Result<Self::Frame, Self::Error>;

    /// Writes `atoms` with a title to a writer.
    ///
    /// # Arguments
    ///
    /// * `atoms` - The atoms to write, in output order.
    /// * `title` - The title text of the file.
    /// * `writer` - The writer to output to.
    ///
    /// # Errors
    ///
    /// Returns an error if writing fails.
    fn write_to(
        atoms: &[Self::Atom],
        title: &str,
        writer: &mut impl Write,
    ) -> Result<(), Self::Error>;

    /// Reads a frame from a file path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened or parsing fails.
    fn read_from_path<P: AsRef<Path>>(path: P) -> Result<Self::Frame, Self::Error> {
        let file = File::open(path)?;
        let mut reader = BufReader::new(file);
        Self::read_from(&mut reader)
    }

    /// Writes `atoms` to a file path, adding [`Self::EXTENSION`] when the path
    /// has no extension.
    ///
    /// # Return
    ///
    /// Returns the path that was written.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be created or writing fails. The
    /// file is closed in either case.
    fn write_to_path<P: AsRef<Path>>(
        atoms: &[Self::Atom],
        title: &str,
        path: P,
    ) -> Result<PathBuf, Self::Error> {
        let path = with_default_extension(path.as_ref(), Self::EXTENSION);
        let file = File::create(&path)?;
        let mut writer = BufWriter::new(file);
        Self::write_to(atoms, title, &mut writer)?;
        writer.flush()?;
        Ok(path)
    }
}
