use super::units::LengthUnit;
use crate::core::io::crd::error::CrdError;
use crate::core::io::crd::format::FormatVariant;
use nalgebra::Point3;

/// The single coordinate frame read from a CRD file.
///
/// A CRD file holds exactly one snapshot, so a `CoordinateFrame` is both the
/// parse result and the whole "trajectory". It is built once by the reader and
/// is immutable afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct CoordinateFrame {
    coordinates: Vec<Point3<f64>>,
    variant: FormatVariant,
    declared_atom_count: Option<usize>,
    title: Vec<String>,
    unit: LengthUnit,
}

impl CoordinateFrame {
    pub(crate) fn new(
        coordinates: Vec<Point3<f64>>,
        variant: FormatVariant,
        declared_atom_count: Option<usize>,
        title: Vec<String>,
        unit: LengthUnit,
    ) -> Self {
        Self {
            coordinates,
            variant,
            declared_atom_count,
            title,
            unit,
        }
    }

    /// Number of atoms, i.e. the number of parsed coordinate records.
    pub fn atom_count(&self) -> usize {
        self.coordinates.len()
    }

    /// Atom count announced by the header line, if it was numeric.
    pub fn declared_atom_count(&self) -> Option<usize> {
        self.declared_atom_count
    }

    /// Layout detected from the header line.
    pub fn variant(&self) -> FormatVariant {
        self.variant
    }

    /// Title lines with the leading `*` marker removed.
    pub fn title(&self) -> &[String] {
        &self.title
    }

    /// Unit of the stored coordinates.
    pub fn unit(&self) -> LengthUnit {
        self.unit
    }

    pub fn coordinates(&self) -> &[Point3<f64>] {
        &self.coordinates
    }

    /// Number of frames; always 1 for CRD.
    pub fn frame_count(&self) -> usize {
        1
    }

    /// Returns the coordinates of frame `index`.
    ///
    /// # Errors
    ///
    /// Returns [`CrdError::FrameIndex`] for any index other than 0.
    pub fn frame(&self, index: usize) -> Result<&[Point3<f64>], CrdError> {
        if index != 0 {
            return Err(CrdError::FrameIndex { index });
        }
        Ok(&self.coordinates)
    }

    /// Iterates over the frames of the file, which yields exactly one item.
    pub fn frames(&self) -> impl Iterator<Item = &[Point3<f64>]> {
        std::iter::once(self.coordinates.as_slice())
    }

    /// Axis-aligned bounding box of all coordinates as `(min, max)`.
    ///
    /// Returns `None` for a frame without atoms.
    pub fn bounds(&self) -> Option<(Point3<f64>, Point3<f64>)> {
        let first = *self.coordinates.first()?;
        Some(
            self.coordinates
                .iter()
                .fold((first, first), |(min, max), p| (min.inf(p), max.sup(p))),
        )
    }

    /// Returns a copy of this frame with coordinates expressed in `unit`.
    pub fn to_unit(&self, unit: LengthUnit) -> Self {
        let factor = LengthUnit::conversion_factor(self.unit, unit);
        Self {
            coordinates: self
                .coordinates
                .iter()
                .map(|p| Point3::from(p.coords * factor))
                .collect(),
            unit,
            ..self.clone()
        }
    }
}
