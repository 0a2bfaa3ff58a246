use crate::core::models::units::LengthUnit;

/// Settings for [`CrdReader`](crate::core::io::crd::reader::CrdReader).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReaderConfig {
    /// Convert coordinates from the file's Angstroms into `base_unit`.
    pub convert_units: bool,
    /// Target unit used when `convert_units` is set.
    pub base_unit: LengthUnit,
    /// Treat a header count that differs from the number of parsed atoms as an error.
    pub strict_atom_count: bool,
}

impl Default for ReaderConfig {
    fn default() -> Self {
        Self {
            convert_units: false,
            base_unit: LengthUnit::Nanometer,
            strict_atom_count: false,
        }
    }
}

impl ReaderConfig {
    /// Unit the reader will report coordinates in.
    pub fn output_unit(&self) -> LengthUnit {
        if self.convert_units {
            self.base_unit
        } else {
            LengthUnit::Angstrom
        }
    }
}

/// Settings for [`CrdWriter`](crate::core::io::crd::writer::CrdWriter).
#[derive(Debug, Clone, PartialEq, Default)]
pub struct WriterConfig {
    /// Title used instead of the one composed by the calling workflow.
    pub title: Option<String>,
    /// Use the extended layout even when the atom count fits the standard one.
    pub force_extended: bool,
}

#[derive(Default)]
pub struct ReaderConfigBuilder {
    convert_units: Option<bool>,
    base_unit: Option<LengthUnit>,
    strict_atom_count: Option<bool>,
}

impl ReaderConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn convert_units(mut self, convert: bool) -> Self {
        self.convert_units = Some(convert);
        self
    }
    pub fn base_unit(mut self, unit: LengthUnit) -> Self {
        self.base_unit = Some(unit);
        self
    }
    pub fn strict_atom_count(mut self, strict: bool) -> Self {
        self.strict_atom_count = Some(strict);
        self
    }

    pub fn build(self) -> ReaderConfig {
        let defaults = ReaderConfig::default();
        ReaderConfig {
            convert_units: self.convert_units.unwrap_or(defaults.convert_units),
            base_unit: self.base_unit.unwrap_or(defaults.base_unit),
            strict_atom_count: self.strict_atom_count.unwrap_or(defaults.strict_atom_count),
        }
    }
}

#[derive(Default)]
pub struct WriterConfigBuilder {
    title: Option<String>,
    force_extended: Option<bool>,
}

impl WriterConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }
    pub fn force_extended(mut self, force: bool) -> Self {
        self.force_extended = Some(force);
        self
    }

    pub fn build(self) -> WriterConfig {
        WriterConfig {
            title: self.title,
            force_extended: self.force_extended.unwrap_or(false),
        }
    }
}
