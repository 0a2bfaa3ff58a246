use super::error::CrdError;
use super::format::{EXT_MARKER, FormatVariant};
use super::record::CrdRecord;
use crate::core::models::atom::CrdAtom;
use crate::core::models::frame::CoordinateFrame;
use crate::core::models::units::LengthUnit;
use crate::engine::config::ReaderConfig;
use nalgebra::Point3;
use std::io::BufRead;
use std::ops::Range;
use tracing::{debug, warn};

/// How a single input line is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LineKind<'a> {
    Blank,
    /// A `*` title line; holds the text after the marker.
    Title(&'a str),
    /// A count line selecting the layout for the lines that follow.
    Header {
        variant: FormatVariant,
        declared: Option<usize>,
    },
    Atom,
}

fn classify(line: &str) -> LineKind<'_> {
    let mut tokens = line.split_whitespace();
    let Some(first) = tokens.next() else {
        return LineKind::Blank;
    };
    if first.starts_with('*') {
        let text = line.trim_start().trim_start_matches('*').trim();
        return LineKind::Title(text);
    }
    let last = tokens.last().unwrap_or(first);

    if last == EXT_MARKER {
        match first.parse::<i64>() {
            Ok(count) if count != 0 => {
                return LineKind::Header {
                    variant: FormatVariant::Extended,
                    declared: usize::try_from(count).ok(),
                };
            }
            _ => {}
        }
    }
    if first == last {
        return LineKind::Header {
            variant: FormatVariant::Standard,
            declared: first.parse().ok(),
        };
    }
    LineKind::Atom
}

fn column(line: &str, range: Range<usize>) -> &str {
    let end = range.end.min(line.len());
    let start = range.start.min(end);
    line.get(start..end).unwrap_or("").trim()
}

fn format_error(line_num: usize, line: &str) -> CrdError {
    CrdError::Format {
        line: line_num,
        content: line.trim_end().to_string(),
    }
}

/// Extracts x, y and z from the coordinate columns of `variant`.
fn parse_coordinates(
    line: &str,
    line_num: usize,
    variant: FormatVariant,
) -> Result<Point3<f64>, CrdError> {
    let mut tokens = column(line, variant.coordinate_columns()).split_whitespace();
    let mut values = [0.0f64; 3];
    for (value, axis) in values.iter_mut().zip(["x", "y", "z"]) {
        let token = tokens.next().ok_or_else(|| format_error(line_num, line))?;
        *value = token.parse().map_err(|_| CrdError::InvalidField {
            line: line_num,
            field: axis,
            value: token.to_string(),
        })?;
    }
    Ok(Point3::new(values[0], values[1], values[2]))
}

fn parse_field<T: std::str::FromStr>(
    line: &str,
    line_num: usize,
    range: Range<usize>,
    field: &'static str,
) -> Result<T, CrdError> {
    let value = column(line, range);
    value.parse().map_err(|_| CrdError::InvalidField {
        line: line_num,
        field,
        value: value.to_string(),
    })
}

fn parse_record(line: &str, line_num: usize, variant: FormatVariant) -> Result<CrdRecord, CrdError> {
    let cols = variant.record_columns();
    let position = parse_coordinates(line, line_num, variant)?;
    let serial = parse_field(line, line_num, cols.serial, "serial")?;
    let total_residues = parse_field(line, line_num, cols.total_residues, "TotRes")?;
    let residue_id = parse_field(line, line_num, cols.residue_id, "resSeq")?;
    let temp_factor = if column(line, cols.temp_factor.clone()).is_empty() {
        0.0
    } else {
        parse_field(line, line_num, cols.temp_factor, "tempFactor")?
    };

    let atom = CrdAtom::new(
        column(line, cols.name),
        column(line, cols.residue_name),
        residue_id,
        position,
    )
    .with_segment_id(column(line, cols.segment_id))
    .with_temp_factor(temp_factor);

    Ok(CrdRecord {
        serial,
        total_residues,
        atom,
    })
}

/// Everything collected in one pass over a CRD file.
struct Scan<T> {
    variant: FormatVariant,
    declared: Option<usize>,
    title: Vec<String>,
    items: Vec<T>,
}

/// Parser for CRD files in either layout.
///
/// The layout is detected from the count line: `<n>  EXT` with a non-zero
/// `<n>` selects the extended layout, a line whose first and last tokens are
/// equal selects the standard one. Every later non-title line is an atom
/// record.
#[derive(Debug, Clone, Default)]
pub struct CrdReader {
    config: ReaderConfig,
}

impl CrdReader {
    pub fn new(config: ReaderConfig) -> Self {
        Self { config }
    }

    /// Reads the coordinates of a CRD file.
    ///
    /// # Errors
    ///
    /// - [`CrdError::Format`] if an atom line precedes the count line, or an
    ///   atom line has fewer than three coordinate tokens.
    /// - [`CrdError::InvalidField`] if a coordinate is not a number.
    /// - [`CrdError::EmptyFile`] if no count line was found.
    /// - [`CrdError::AtomCountMismatch`] in strict mode when the header count
    ///   differs from the number of atom lines.
    pub fn parse(&self, reader: &mut impl BufRead) -> Result<CoordinateFrame, CrdError> {
        let scan = self.scan(reader, parse_coordinates)?;
        Ok(self.finish(scan.variant, scan.declared, scan.title, scan.items))
    }

    /// Reads every field of every atom line, not just the coordinates.
    ///
    /// Returns the coordinate frame together with the full records, both with
    /// coordinates in the configured output unit.
    pub fn parse_records(
        &self,
        reader: &mut impl BufRead,
    ) -> Result<(CoordinateFrame, Vec<CrdRecord>), CrdError> {
        let scan = self.scan(reader, parse_record)?;
        let factor = LengthUnit::conversion_factor(LengthUnit::Angstrom, self.config.output_unit());
        let mut records = scan.items;
        if factor != 1.0 {
            for record in &mut records {
                record.atom.position = Point3::from(record.atom.position.coords * factor);
            }
        }
        let coordinates = records.iter().map(|r| r.atom.position).collect();
        let frame = CoordinateFrame::new(
            coordinates,
            scan.variant,
            scan.declared,
            scan.title,
            self.config.output_unit(),
        );
        Ok((frame, records))
    }

    fn scan<T>(
        &self,
        reader: &mut impl BufRead,
        parse_atom: impl Fn(&str, usize, FormatVariant) -> Result<T, CrdError>,
    ) -> Result<Scan<T>, CrdError> {
        let mut mode: Option<FormatVariant> = None;
        let mut declared = None;
        let mut title = Vec::new();
        let mut items = Vec::new();

        for (line_num, line_res) in reader.lines().enumerate() {
            let line = line_res?;
            match classify(&line) {
                LineKind::Blank => continue,
                LineKind::Title(text) => title.push(text.to_string()),
                LineKind::Header {
                    variant,
                    declared: count,
                } => {
                    debug!(line = line_num, ?variant, declared = ?count, "CRD count line detected.");
                    mode = Some(variant);
                    declared = count;
                }
                LineKind::Atom => {
                    let variant = mode.ok_or_else(|| format_error(line_num, &line))?;
                    items.push(parse_atom(&line, line_num, variant)?);
                }
            }
        }

        let variant = mode.ok_or(CrdError::EmptyFile)?;
        if let Some(declared) = declared {
            if declared != items.len() {
                if self.config.strict_atom_count {
                    return Err(CrdError::AtomCountMismatch {
                        declared,
                        parsed: items.len(),
                    });
                }
                warn!(
                    declared,
                    parsed = items.len(),
                    "CRD header atom count does not match the number of atom lines."
                );
            }
        }
        debug!(atoms = items.len(), ?variant, "Finished reading CRD records.");

        Ok(Scan {
            variant,
            declared,
            title,
            items,
        })
    }

    fn finish(
        &self,
        variant: FormatVariant,
        declared: Option<usize>,
        title: Vec<String>,
        coordinates: Vec<Point3<f64>>,
    ) -> CoordinateFrame {
        let frame = CoordinateFrame::new(coordinates, variant, declared, title, LengthUnit::Angstrom);
        if self.config.convert_units {
            frame.to_unit(self.config.base_unit)
        } else {
            frame
        }
    }
}
