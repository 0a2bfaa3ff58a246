use crate::core::io::crd::error::CrdError;
use crate::core::io::crd::format::FormatVariant;
use crate::core::io::crd::record::CrdRecord;
use crate::core::io::crd::writer::CrdWriter;
use crate::core::models::atom::CrdAtom;
use crate::engine::config::WriterConfig;
use crate::engine::progress::{Progress, ProgressReporter};
use std::path::{Path, PathBuf};
use tracing::{debug, info, instrument};

/// The atom/trajectory model a CRD file is exported from.
///
/// Implementations expose the atoms of their current frame and a way to move
/// to another frame.
pub trait FrameSource {
    /// Atoms of the current frame, in output order.
    fn atoms(&self) -> Vec<CrdAtom>;

    /// Number of the frame the source is positioned on, if it tracks one.
    fn current_frame(&self) -> Option<usize>;

    /// Positions the source on `frame`.
    fn seek_frame(&mut self, frame: usize) -> Result<(), CrdError>;

    /// Name of the underlying data, used in the default title.
    fn source_name(&self) -> String;
}

/// A [`FrameSource`] holding one fixed set of atoms.
#[derive(Debug, Clone, PartialEq)]
pub struct StaticFrame {
    name: String,
    atoms: Vec<CrdAtom>,
}

impl StaticFrame {
    pub fn new(name: impl Into<String>, atoms: Vec<CrdAtom>) -> Self {
        Self {
            name: name.into(),
            atoms,
        }
    }

    /// Builds a source from parsed CRD records, dropping their serial and
    /// `TotRes` columns (the writer recomputes both).
    pub fn from_records(name: impl Into<String>, records: Vec<CrdRecord>) -> Self {
        Self::new(name, records.into_iter().map(|r| r.atom).collect())
    }
}

impl FrameSource for StaticFrame {
    fn atoms(&self) -> Vec<CrdAtom> {
        self.atoms.clone()
    }

    fn current_frame(&self) -> Option<usize> {
        None
    }

    fn seek_frame(&mut self, frame: usize) -> Result<(), CrdError> {
        if frame != 0 {
            return Err(CrdError::FrameIndex { index: frame });
        }
        Ok(())
    }

    fn source_name(&self) -> String {
        self.name.clone()
    }
}

/// Outcome of a successful export.
#[derive(Debug, Clone, PartialEq)]
pub struct ExportSummary {
    pub path: PathBuf,
    pub variant: FormatVariant,
    pub atom_count: usize,
    pub title: String,
}

pub fn default_title(frame: usize, source_name: &str) -> String {
    format!("FRAME {} FROM {}", frame, source_name)
}

/// Writes one frame of `source` to a CRD file at `path`.
///
/// With `frame` set, the source is moved to that frame first; otherwise its
/// current frame is used, or frame 1 when the source does not track one. The
/// title is `config.title` when given, else `FRAME <n> FROM <source name>`.
/// A `.crd` extension is added to `path` when it has none.
#[instrument(skip_all, name = "export_workflow")]
pub fn run<S: FrameSource>(
    source: &mut S,
    frame: Option<usize>,
    path: &Path,
    config: &WriterConfig,
    reporter: &ProgressReporter,
) -> Result<ExportSummary, CrdError> {
    reporter.report(Progress::PhaseStart {
        name: "Selecting frame",
    });
    let frame_number = match frame {
        Some(n) => {
            debug!(frame = n, "Advancing frame source.");
            source.seek_frame(n)?;
            n
        }
        None => source.current_frame().unwrap_or(1),
    };
    let atoms = source.atoms();
    let title = config
        .title
        .clone()
        .unwrap_or_else(|| default_title(frame_number, &source.source_name()));
    reporter.report(Progress::PhaseFinish);

    reporter.report(Progress::PhaseStart {
        name: "Writing CRD",
    });
    let writer = CrdWriter::new(config.clone()).with_reporter(reporter);
    let variant = writer.variant_for(atoms.len());
    let written = writer.write_to_path(&atoms, &title, path)?;
    reporter.report(Progress::PhaseFinish);

    info!(
        path = %written.display(),
        atoms = atoms.len(),
        ?variant,
        "CRD export finished."
    );
    Ok(ExportSummary {
        path: written,
        variant,
        atom_count: atoms.len(),
        title,
    })
}
