use charmm_crd::core::models::units::LengthUnit;

pub struct DefaultsConfig {
    pub convert_units: bool,
    pub base_unit: LengthUnit,
    pub strict_atom_count: bool,
    pub force_extended: bool,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            convert_units: false,
            base_unit: LengthUnit::Nanometer,
            strict_atom_count: false,
            force_extended: false,
        }
    }
}
