use super::error::CrdError;
use super::format::{EXTENDED_X_VISIBLE_CHARS, FormatVariant, extended_x_fits, render_title};
use super::record::AtomLine;
use crate::core::models::atom::CrdAtom;
use crate::core::utils::path::with_default_extension;
use crate::engine::config::WriterConfig;
use crate::engine::progress::{Progress, ProgressReporter};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Computes the `TotRes` column for a sequence of atoms.
///
/// The counter starts at 1 on the first atom and increases by one each time an
/// atom's residue id differs from the preceding atom's, giving a contiguous
/// per-file residue index regardless of gaps in the original numbering.
pub fn total_residue_indices(atoms: &[CrdAtom]) -> Vec<usize> {
    let mut indices = Vec::with_capacity(atoms.len());
    let mut current = 0;
    let mut previous_residue = None;
    for atom in atoms {
        if previous_residue != Some(atom.residue_id) {
            current += 1;
            previous_residue = Some(atom.residue_id);
        }
        indices.push(current);
    }
    indices
}

/// Writer for CRD files.
///
/// The layout is chosen from the atom count (extended above 99,999 atoms, or
/// when forced by [`WriterConfig::force_extended`]). Fields too wide for the
/// chosen layout are wrapped or cut, never rejected.
pub struct CrdWriter<'a> {
    config: WriterConfig,
    reporter: Option<&'a ProgressReporter<'a>>,
}

impl<'a> CrdWriter<'a> {
    pub fn new(config: WriterConfig) -> Self {
        Self {
            config,
            reporter: None,
        }
    }

    pub fn with_reporter(mut self, reporter: &'a ProgressReporter<'a>) -> Self {
        self.reporter = Some(reporter);
        self
    }

    pub fn variant_for(&self, atom_count: usize) -> FormatVariant {
        if self.config.force_extended {
            FormatVariant::Extended
        } else {
            FormatVariant::for_atom_count(atom_count)
        }
    }

    /// Warns once when some x values are too wide to be read back intact from
    /// the extended layout.
    fn check_extended_x(&self, atoms: &[CrdAtom]) {
        let clipped = atoms
            .iter()
            .filter(|atom| !extended_x_fits(atom.position.x))
            .count();
        if clipped == 0 {
            return;
        }
        warn!(
            clipped,
            visible_chars = EXTENDED_X_VISIBLE_CHARS,
            "Some x coordinates are wider than the extended reader window and will lose leading characters on read."
        );
        self.report(Progress::Message(format!(
            "{} x coordinate(s) at or below -1000 or at or above 10000 will not read back intact",
            clipped
        )));
    }

    fn report(&self, event: Progress) {
        if let Some(reporter) = self.reporter {
            reporter.report(event);
        }
    }

    /// Writes `atoms` as a complete CRD file: the title line, an empty second
    /// title line, the count line and one atom line per atom in input order.
    ///
    /// Returns the layout that was used.
    ///
    /// # Errors
    ///
    /// Returns [`CrdError::Io`] if writing to `writer` fails.
    pub fn write_to(
        &self,
        atoms: &[CrdAtom],
        title: &str,
        writer: &mut impl Write,
    ) -> Result<FormatVariant, CrdError> {
        let variant = self.variant_for(atoms.len());
        debug!(atoms = atoms.len(), ?variant, "Writing CRD file.");
        if variant == FormatVariant::Extended {
            self.check_extended_x(atoms);
        }

        writer.write_all(render_title(title).as_bytes())?;
        writer.write_all(render_title("").as_bytes())?;
        writer.write_all(variant.render_count(atoms.len()).as_bytes())?;

        let lines = render_atom_lines(atoms, variant);

        self.report(Progress::TaskStart {
            total_steps: atoms.len() as u64,
        });
        for line in &lines {
            writer.write_all(line.as_bytes())?;
            self.report(Progress::TaskIncrement);
        }
        self.report(Progress::TaskFinish);

        Ok(variant)
    }

    /// Writes `atoms` to `path`, adding the `.crd` extension when `path` has
    /// none.
    ///
    /// The file handle is owned by this call and closed on every exit path.
    /// Returns the path actually written.
    pub fn write_to_path<P: AsRef<Path>>(
        &self,
        atoms: &[CrdAtom],
        title: &str,
        path: P,
    ) -> Result<PathBuf, CrdError> {
        let path = with_default_extension(path.as_ref(), "crd");
        let file = File::create(&path)?;
        let mut writer = BufWriter::new(file);
        self.write_to(atoms, title, &mut writer)?;
        writer.flush()?;
        Ok(path)
    }
}

/// Renders all atom lines in input order.
fn render_atom_lines(atoms: &[CrdAtom], variant: FormatVariant) -> Vec<String> {
    let total_residues = total_residue_indices(atoms);

    #[cfg(not(feature = "parallel"))]
    let iterator = atoms.iter().zip(total_residues.iter()).enumerate();

    #[cfg(feature = "parallel")]
    let iterator = atoms.par_iter().zip(total_residues.par_iter()).enumerate();

    iterator
        .map(|(i, (atom, &tot_res))| AtomLine::from_atom(i + 1, tot_res, atom).render(variant))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::io::crd::reader::CrdReader;
    use nalgebra::Point3;
    use std::io::Cursor;
    use std::sync::atomic::{AtomicU64, Ordering};
    use std::sync::Arc;

    fn atoms_with_residues(residue_ids: &[isize]) -> Vec<CrdAtom> {
        residue_ids
            .iter()
            .enumerate()
            .map(|(i, &res_id)| {
                CrdAtom::new("CA", "ALA", res_id, Point3::new(i as f64, -(i as f64), 0.5))
                    .with_segment_id("PROA")
            })
            .collect()
    }

    fn write_string(writer: &CrdWriter, atoms: &[CrdAtom], title: &str) -> String {
        let mut buffer = Vec::new();
        writer.write_to(atoms, title, &mut buffer).unwrap();
        String::from_utf8(buffer).unwrap()
    }

    #[test]
    fn total_residue_counter_increments_on_residue_change_only() {
        let atoms = atoms_with_residues(&[10, 10, 11, 11, 13]);
        assert_eq!(total_residue_indices(&atoms), vec![1, 1, 2, 2, 3]);
    }

    #[test]
    fn total_residue_counter_does_not_compare_first_atom_with_last() {
        let atoms = atoms_with_residues(&[5, 6, 5]);
        assert_eq!(total_residue_indices(&atoms), vec![1, 2, 3]);
        let atoms = atoms_with_residues(&[5]);
        assert_eq!(total_residue_indices(&atoms), vec![1]);
        assert!(total_residue_indices(&[]).is_empty());
    }

    #[test]
    fn standard_output_has_titles_count_and_atoms() {
        let atoms = atoms_with_residues(&[10, 10, 11]);
        let output = write_string(&CrdWriter::new(WriterConfig::default()), &atoms, " my title ");
        let lines: Vec<&str> = output.lines().collect();

        assert_eq!(lines.len(), 6);
        assert_eq!(lines[0], "* my title");
        assert_eq!(lines[1], "*");
        assert_eq!(lines[2], "    3");
        assert!(lines[3].starts_with("    1    1 ALA  CA  "));
        assert!(lines[5].starts_with("    3    2 ALA  CA  "));
        assert!(output.ends_with('\n'));
    }

    #[test]
    fn empty_title_still_writes_two_title_lines() {
        let output = write_string(&CrdWriter::new(WriterConfig::default()), &[], "");
        assert_eq!(output, "*\n*\n    0\n");
    }

    #[test]
    fn forced_extended_layout_is_used_for_small_systems() {
        let atoms = atoms_with_residues(&[1]);
        let config = WriterConfig {
            force_extended: true,
            ..Default::default()
        };
        let writer = CrdWriter::new(config);
        assert_eq!(writer.variant_for(1), FormatVariant::Extended);

        let output = write_string(&writer, &atoms, "ext");
        assert_eq!(output.lines().nth(2), Some("         1  EXT"));
    }

    #[test]
    fn long_names_are_cut_in_standard_layout() {
        let atoms = vec![CrdAtom::new("CA", "PROTEINX", 1, Point3::origin())];
        let output = write_string(&CrdWriter::new(WriterConfig::default()), &atoms, "");
        let atom_line = output.lines().nth(3).unwrap();
        assert!(atom_line.contains(" PROT CA  "));
        assert!(!atom_line.contains("PROTEINX"));
    }

    #[test]
    fn output_reads_back_with_same_coordinates() {
        let atoms = atoms_with_residues(&[1, 1, 2, 3]);
        let output = write_string(&CrdWriter::new(WriterConfig::default()), &atoms, "round trip");
        let frame = CrdReader::default().parse(&mut Cursor::new(output)).unwrap();

        assert_eq!(frame.variant(), FormatVariant::Standard);
        assert_eq!(frame.atom_count(), atoms.len());
        for (parsed, atom) in frame.coordinates().iter().zip(&atoms) {
            assert!((parsed - atom.position).norm() < 1e-5);
        }
    }

    #[test]
    fn progress_is_reported_per_atom() {
        let increments = Arc::new(AtomicU64::new(0));
        let total = Arc::new(AtomicU64::new(0));
        let (inc, tot) = (increments.clone(), total.clone());
        let reporter = ProgressReporter::with_callback(Box::new(move |event| match event {
            Progress::TaskStart { total_steps } => tot.store(total_steps, Ordering::SeqCst),
            Progress::TaskIncrement => {
                inc.fetch_add(1, Ordering::SeqCst);
            }
            _ => {}
        }));

        let atoms = atoms_with_residues(&[1, 2, 3, 4]);
        let writer = CrdWriter::new(WriterConfig::default()).with_reporter(&reporter);
        write_string(&writer, &atoms, "");

        assert_eq!(total.load(Ordering::SeqCst), 4);
        assert_eq!(increments.load(Ordering::SeqCst), 4);
    }

    /// Accepts whole writes until `limit` bytes would be exceeded, then fails.
    struct FailingSink {
        written: Vec<u8>,
        limit: usize,
    }

    impl Write for FailingSink {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            if self.written.len() + buf.len() > self.limit {
                return Err(std::io::Error::other("device full"));
            }
            self.written.extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn failing_destination_returns_io_error_after_complete_lines() {
        let atoms = atoms_with_residues(&[1, 2, 3]);
        let writer = CrdWriter::new(WriterConfig::default());
        let full = write_string(&writer, &atoms, "t");
        let lines: Vec<&str> = full.split_inclusive('\n').collect();
        let kept: String = lines[..4].concat();

        let mut sink = FailingSink {
            written: Vec::new(),
            limit: kept.len() + 10,
        };
        let result = writer.write_to(&atoms, "t", &mut sink);

        assert!(matches!(result, Err(CrdError::Io(_))));
        assert_eq!(String::from_utf8(sink.written).unwrap(), kept);
    }

    #[test]
    fn failing_count_line_stops_before_any_atom() {
        let atoms = atoms_with_residues(&[1]);
        let mut sink = FailingSink {
            written: Vec::new(),
            limit: "* t\n*\n".len(),
        };
        let result = CrdWriter::new(WriterConfig::default()).write_to(&atoms, "t", &mut sink);

        assert!(matches!(result, Err(CrdError::Io(_))));
        assert_eq!(sink.written, b"* t\n*\n");
    }

    #[test]
    fn unwritable_path_is_an_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = CrdWriter::new(WriterConfig::default()).write_to_path(
            &atoms_with_residues(&[1]),
            "",
            dir.path().join("missing").join("out"),
        );
        assert!(matches!(result, Err(CrdError::Io(_))));
    }

    #[test]
    fn multi_line_title_reads_back_as_title_records() {
        let atoms = atoms_with_residues(&[1, 2]);
        let output = write_string(
            &CrdWriter::new(WriterConfig::default()),
            &atoms,
            "line one\nline two",
        );
        assert!(output.starts_with("* line one\n* line two\n*\n    2\n"));

        let frame = CrdReader::default().parse(&mut Cursor::new(output)).unwrap();
        assert_eq!(frame.atom_count(), 2);
        assert_eq!(frame.title()[..2], ["line one", "line two"]);
    }

    #[test]
    fn wide_extended_x_is_reported_and_loses_its_sign_on_read() {
        let messages = Arc::new(AtomicU64::new(0));
        let seen = messages.clone();
        let reporter = ProgressReporter::with_callback(Box::new(move |event| {
            if let Progress::Message(_) = event {
                seen.fetch_add(1, Ordering::SeqCst);
            }
        }));
        let atoms = vec![
            CrdAtom::new("CA", "ALA", 1, Point3::new(-1234.5, 2.0, 3.0)),
            CrdAtom::new("CB", "ALA", 1, Point3::new(-999.5, 2.0, 3.0)),
        ];
        let config = WriterConfig {
            force_extended: true,
            ..Default::default()
        };
        let writer = CrdWriter::new(config).with_reporter(&reporter);
        let output = write_string(&writer, &atoms, "wide");
        assert_eq!(messages.load(Ordering::SeqCst), 1);

        let frame = CrdReader::default().parse(&mut Cursor::new(output)).unwrap();
        assert_eq!(frame.coordinates()[0].x, 1234.5);
        assert_eq!(frame.coordinates()[1].x, -999.5);
        assert_eq!(frame.coordinates()[0].y, 2.0);
    }

    #[test]
    fn write_to_path_adds_crd_extension() {
        let dir = tempfile::tempdir().unwrap();
        let atoms = atoms_with_residues(&[1, 2]);
        let written = CrdWriter::new(WriterConfig::default())
            .write_to_path(&atoms, "file", dir.path().join("out"))
            .unwrap();

        assert_eq!(written, dir.path().join("out.crd"));
        let content = std::fs::read_to_string(&written).unwrap();
        assert!(content.starts_with("* file\n*\n    2\n"));
    }
}
