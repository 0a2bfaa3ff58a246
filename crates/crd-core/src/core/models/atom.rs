use nalgebra::Point3;

/// Per-atom attributes written to a CRD `ATOM` line.
///
/// This is the view of an atom that the writer pulls from an external
/// topology/trajectory model. The serial number and the per-file residue
/// counter (`TotRes`) are not stored here; the writer derives both from the
/// atom's position in the output sequence.
#[derive(Debug, Clone, PartialEq)]
pub struct CrdAtom {
    /// The atom name (e.g., "CA", "OH2").
    pub name: String,
    /// The residue name (e.g., "ALA", "TIP3").
    pub residue_name: String,
    /// The residue sequence number as found in the source model.
    pub residue_id: isize,
    /// The segment identifier; may be empty.
    pub segment_id: String,
    /// The 3D coordinates of the atom in Angstroms.
    pub position: Point3<f64>,
    /// Temperature factor / weighting column, 0.0 unless set.
    pub temp_factor: f64,
}

impl CrdAtom {
    /// Creates a new `CrdAtom` with an empty segment id and a zero weighting.
    ///
    /// # Arguments
    ///
    /// * `name` - The atom name.
    /// * `residue_name` - The name of the residue this atom belongs to.
    /// * `residue_id` - The residue sequence number.
    /// * `position` - The 3D coordinates of the atom in Angstroms.
    pub fn new(name: &str, residue_name: &str, residue_id: isize, position: Point3<f64>) -> Self {
        Self {
            name: name.to_string(),
            residue_name: residue_name.to_string(),
            residue_id,
            segment_id: String::new(),
            position,
            temp_factor: 0.0,
        }
    }

    pub fn with_segment_id(mut self, segment_id: &str) -> Self {
        self.segment_id = segment_id.to_string();
        self
    }

    pub fn with_temp_factor(mut self, temp_factor: f64) -> Self {
        self.temp_factor = temp_factor;
        self
    }
}
