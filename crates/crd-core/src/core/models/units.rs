use serde::Deserialize;
use std::fmt;
use std::str::FromStr;

/// Length units understood by the CRD reader.
///
/// CRD files always store coordinates in Angstroms; the reader can optionally
/// convert them into another base unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LengthUnit {
    /// Angstrom (1e-10 m), the native unit of CRD files.
    #[default]
    #[serde(alias = "A")]
    Angstrom,
    /// Nanometer (1e-9 m).
    #[serde(alias = "nm")]
    Nanometer,
}

impl LengthUnit {
    /// Number of Angstroms in one unit of `self`.
    pub fn in_angstroms(self) -> f64 {
        match self {
            LengthUnit::Angstrom => 1.0,
            LengthUnit::Nanometer => 10.0,
        }
    }

    /// Factor that converts a length expressed in `from` into `to`.
    pub fn conversion_factor(from: LengthUnit, to: LengthUnit) -> f64 {
        from.in_angstroms() / to.in_angstroms()
    }

    pub fn symbol(self) -> &'static str {
        match self {
            LengthUnit::Angstrom => "Å",
            LengthUnit::Nanometer => "nm",
        }
    }
}

impl fmt::Display for LengthUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

impl FromStr for LengthUnit {
    type Err = ();

    /// Parses a unit name, case-insensitively.
    ///
    /// Accepts the full names as well as the usual abbreviations
    /// (`"A"`, `"Å"`, `"nm"`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "angstrom" | "angstroms" | "a" | "å" => Ok(LengthUnit::Angstrom),
            "nanometer" | "nanometers" | "nm" => Ok(LengthUnit::Nanometer),
            _ => Err(()),
        }
    }
}
