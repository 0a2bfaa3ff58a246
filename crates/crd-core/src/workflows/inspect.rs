use crate::core::io::crd::error::CrdError;
use crate::core::io::crd::format::FormatVariant;
use crate::core::io::crd::reader::CrdReader;
use crate::core::models::units::LengthUnit;
use crate::engine::config::ReaderConfig;
use nalgebra::Point3;
use std::fmt;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use tracing::{info, instrument};

/// Overview of a CRD file.
#[derive(Debug, Clone, PartialEq)]
pub struct CrdSummary {
    pub path: PathBuf,
    pub variant: FormatVariant,
    pub declared_atom_count: Option<usize>,
    pub atom_count: usize,
    pub title: Vec<String>,
    pub unit: LengthUnit,
    pub bounds: Option<(Point3<f64>, Point3<f64>)>,
}

impl fmt::Display for CrdSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "file: {}", self.path.display())?;
        let layout = match self.variant {
            FormatVariant::Standard => "standard",
            FormatVariant::Extended => "extended (EXT)",
        };
        writeln!(f, "layout: {}", layout)?;
        match self.declared_atom_count {
            Some(n) => writeln!(f, "declared_atoms: {}", n)?,
            None => writeln!(f, "declared_atoms: unknown")?,
        }
        writeln!(f, "atoms: {}", self.atom_count)?;
        for line in self.title.iter().filter(|l| !l.is_empty()) {
            writeln!(f, "title: {}", line)?;
        }
        if let Some((min, max)) = &self.bounds {
            writeln!(
                f,
                "min: {:.5} {:.5} {:.5} {}",
                min.x, min.y, min.z, self.unit
            )?;
            writeln!(
                f,
                "max: {:.5} {:.5} {:.5} {}",
                max.x, max.y, max.z, self.unit
            )?;
        }
        Ok(())
    }
}

/// Reads the CRD file at `path` and summarizes it.
#[instrument(skip_all, name = "inspect_workflow")]
pub fn run(path: &Path, config: &ReaderConfig) -> Result<CrdSummary, CrdError> {
    info!("Reading CRD file {:?}", path);
    let mut reader = BufReader::new(File::open(path)?);
    let frame = CrdReader::new(*config).parse(&mut reader)?;

    Ok(CrdSummary {
        path: path.to_path_buf(),
        variant: frame.variant(),
        declared_atom_count: frame.declared_atom_count(),
        atom_count: frame.atom_count(),
        title: frame.title().to_vec(),
        unit: frame.unit(),
        bounds: frame.bounds(),
    })
}
