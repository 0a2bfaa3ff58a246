use super::error::CrdError;
use super::format::{FormatVariant, truncate_chars, wrap_digits};
use crate::core::models::atom::CrdAtom;
use nalgebra::Point3;

/// Layout-independent content of one `ATOM` line, before truncation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AtomLine<'a> {
    pub serial: usize,
    pub total_residues: usize,
    pub residue_name: &'a str,
    pub name: &'a str,
    pub position: Point3<f64>,
    pub segment_id: &'a str,
    pub residue_id: isize,
    pub temp_factor: f64,
}

impl<'a> AtomLine<'a> {
    /// Builds the line for `atom` written at 1-based `serial` with residue
    /// counter `total_residues`.
    pub fn from_atom(serial: usize, total_residues: usize, atom: &'a CrdAtom) -> Self {
        Self {
            serial,
            total_residues,
            residue_name: &atom.residue_name,
            name: &atom.name,
            position: atom.position,
            segment_id: &atom.segment_id,
            residue_id: atom.residue_id,
            temp_factor: atom.temp_factor,
        }
    }

    pub fn render(&self, variant: FormatVariant) -> String {
        variant.render_atom(self)
    }
}

/// Field-by-field assembly of an [`AtomLine`] for callers whose atom data may
/// be incomplete.
///
/// `build` checks the required fields (serial, name, resName, resSeq, x, y, z
/// and TotRes) and fails on the first one missing, so nothing is rendered for
/// an incomplete atom. The segment id defaults to empty and the weighting to
/// 0.0.
#[derive(Debug, Clone, Default)]
pub struct AtomLineBuilder<'a> {
    serial: Option<usize>,
    total_residues: Option<usize>,
    name: Option<&'a str>,
    residue_name: Option<&'a str>,
    residue_id: Option<isize>,
    x: Option<f64>,
    y: Option<f64>,
    z: Option<f64>,
    segment_id: Option<&'a str>,
    temp_factor: Option<f64>,
}

impl<'a> AtomLineBuilder<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn serial(mut self, serial: usize) -> Self {
        self.serial = Some(serial);
        self
    }
    pub fn total_residues(mut self, total_residues: usize) -> Self {
        self.total_residues = Some(total_residues);
        self
    }
    pub fn name(mut self, name: &'a str) -> Self {
        self.name = Some(name);
        self
    }
    pub fn residue_name(mut self, residue_name: &'a str) -> Self {
        self.residue_name = Some(residue_name);
        self
    }
    pub fn residue_id(mut self, residue_id: isize) -> Self {
        self.residue_id = Some(residue_id);
        self
    }
    pub fn x(mut self, x: f64) -> Self {
        self.x = Some(x);
        self
    }
    pub fn y(mut self, y: f64) -> Self {
        self.y = Some(y);
        self
    }
    pub fn z(mut self, z: f64) -> Self {
        self.z = Some(z);
        self
    }
    pub fn position(self, position: Point3<f64>) -> Self {
        self.x(position.x).y(position.y).z(position.z)
    }
    pub fn segment_id(mut self, segment_id: &'a str) -> Self {
        self.segment_id = Some(segment_id);
        self
    }
    pub fn temp_factor(mut self, temp_factor: f64) -> Self {
        self.temp_factor = Some(temp_factor);
        self
    }

    pub fn build(self) -> Result<AtomLine<'a>, CrdError> {
        let serial = self.serial.ok_or(CrdError::MissingField { field: "serial" })?;
        let name = self.name.ok_or(CrdError::MissingField { field: "name" })?;
        let residue_name = self
            .residue_name
            .ok_or(CrdError::MissingField { field: "resName" })?;
        let residue_id = self
            .residue_id
            .ok_or(CrdError::MissingField { field: "resSeq" })?;
        let x = self.x.ok_or(CrdError::MissingField { field: "x" })?;
        let y = self.y.ok_or(CrdError::MissingField { field: "y" })?;
        let z = self.z.ok_or(CrdError::MissingField { field: "z" })?;
        let total_residues = self
            .total_residues
            .ok_or(CrdError::MissingField { field: "TotRes" })?;

        Ok(AtomLine {
            serial,
            total_residues,
            residue_name,
            name,
            position: Point3::new(x, y, z),
            segment_id: self.segment_id.unwrap_or(""),
            residue_id,
            temp_factor: self.temp_factor.unwrap_or(0.0),
        })
    }

    /// Validates the fields and renders the line in `variant`.
    pub fn render(self, variant: FormatVariant) -> Result<String, CrdError> {
        Ok(self.build()?.render(variant))
    }
}

/// Standard-layout values of an atom line, already wrapped and cut to
/// 5/5/4 digits and 4 characters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StandardAtomFields<'a> {
    pub serial: i64,
    pub total_residues: i64,
    pub residue_name: &'a str,
    pub name: &'a str,
    pub x: f64,
    pub y: f64,
    pub z: f64,
    pub chain_id: &'a str,
    pub residue_id: i64,
    pub temp_factor: f64,
}

impl<'a> StandardAtomFields<'a> {
    pub fn from_line(line: &AtomLine<'a>) -> Self {
        let limits = FormatVariant::Standard.limits();
        Self {
            serial: wrap_digits(line.serial as i64, limits.serial_digits),
            total_residues: wrap_digits(line.total_residues as i64, limits.total_residue_digits),
            residue_name: truncate_chars(line.residue_name, limits.text_chars),
            name: truncate_chars(line.name, limits.text_chars),
            x: line.position.x,
            y: line.position.y,
            z: line.position.z,
            chain_id: truncate_chars(line.segment_id, limits.text_chars),
            residue_id: wrap_digits(line.residue_id as i64, limits.residue_id_digits),
            temp_factor: line.temp_factor,
        }
    }

    pub fn render(&self) -> String {
        format!(
            "{:>5}{:>5} {:<4} {:<4}{:>10.5}{:>10.5}{:>10.5} {:<4} {:<4}{:>10.5}\n",
            self.serial,
            self.total_residues,
            self.residue_name,
            self.name,
            self.x,
            self.y,
            self.z,
            self.chain_id,
            self.residue_id,
            self.temp_factor
        )
    }
}

/// Extended-layout values of an atom line, already wrapped and cut to
/// 10/10/8 digits and 8 characters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExtendedAtomFields<'a> {
    pub serial: i64,
    pub total_residues: i64,
    pub residue_name: &'a str,
    pub name: &'a str,
    pub x: f64,
    pub y: f64,
    pub z: f64,
    pub chain_id: &'a str,
    pub residue_id: i64,
    pub temp_factor: f64,
}

impl<'a> ExtendedAtomFields<'a> {
    pub fn from_line(line: &AtomLine<'a>) -> Self {
        let limits = FormatVariant::Extended.limits();
        Self {
            serial: wrap_digits(line.serial as i64, limits.serial_digits),
            total_residues: wrap_digits(line.total_residues as i64, limits.total_residue_digits),
            residue_name: truncate_chars(line.residue_name, limits.text_chars),
            name: truncate_chars(line.name, limits.text_chars),
            x: line.position.x,
            y: line.position.y,
            z: line.position.z,
            chain_id: truncate_chars(line.segment_id, limits.text_chars),
            residue_id: wrap_digits(line.residue_id as i64, limits.residue_id_digits),
            temp_factor: line.temp_factor,
        }
    }

    pub fn render(&self) -> String {
        format!(
            "{:>10}{:>10}  {:<8}  {:<8}{:>20.10}{:>20.10}{:>20.10}  {:<8}  {:<8}{:>20.10}\n",
            self.serial,
            self.total_residues,
            self.residue_name,
            self.name,
            self.x,
            self.y,
            self.z,
            self.chain_id,
            self.residue_id,
            self.temp_factor
        )
    }
}

/// A fully parsed atom line of an existing CRD file.
#[derive(Debug, Clone, PartialEq)]
pub struct CrdRecord {
    pub serial: usize,
    /// The per-file residue counter (`TotRes`) column.
    pub total_residues: usize,
    pub atom: CrdAtom,
}
