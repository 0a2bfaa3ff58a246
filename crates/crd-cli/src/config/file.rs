use crate::error::{CliError, Result};
use charmm_crd::core::models::units::LengthUnit;
use serde::Deserialize;
use std::path::Path;
use tracing::debug;

#[derive(Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
pub struct FileReadConfig {
    pub convert_units: Option<bool>,
    pub base_unit: Option<LengthUnit>,
    pub strict_atom_count: Option<bool>,
}

#[derive(Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
pub struct FileWriteConfig {
    pub title: Option<String>,
    pub force_extended: Option<bool>,
}

/// Contents of a `crdtool` TOML configuration file. Every key is optional.
#[derive(Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    pub read: Option<FileReadConfig>,
    pub write: Option<FileWriteConfig>,
}

impl FileConfig {
    pub fn from_file(path: &Path) -> Result<Self> {
        debug!("Loading configuration from file: {:?}", path);
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content).map_err(|e| CliError::FileParsing {
            path: path.to_path_buf(),
            source: e.into(),
        })
    }

    pub fn from_toml(content: &str) -> std::result::Result<Self, toml::de::Error> {
        toml::from_str(content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn full_file_is_parsed() {
        let config = FileConfig::from_toml(
            r#"
            [read]
            convert-units = true
            base-unit = "nm"
            strict-atom-count = true

            [write]
            title = "relaxed system"
            force-extended = true
            "#,
        )
        .unwrap();

        let read = config.read.unwrap();
        assert_eq!(read.convert_units, Some(true));
        assert_eq!(read.base_unit, Some(LengthUnit::Nanometer));
        assert_eq!(read.strict_atom_count, Some(true));
        let write = config.write.unwrap();
        assert_eq!(write.title.as_deref(), Some("relaxed system"));
        assert_eq!(write.force_extended, Some(true));
    }

    #[test]
    fn empty_file_gives_empty_config() {
        assert_eq!(FileConfig::from_toml("").unwrap(), FileConfig::default());
    }

    #[test]
    fn unknown_keys_are_rejected() {
        assert!(FileConfig::from_toml("[read]\nconvert_units = true\n").is_err());
        assert!(FileConfig::from_toml("[output]\ntitle = \"x\"\n").is_err());
    }

    #[test]
    fn from_file_reports_the_path_on_syntax_errors() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.toml");
        fs::write(&path, "[read\nconvert-units = true").unwrap();

        match FileConfig::from_file(&path) {
            Err(CliError::FileParsing { path: reported, .. }) => assert_eq!(reported, path),
            other => panic!("expected FileParsing error, got {:?}", other),
        }
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = FileConfig::from_file(&dir.path().join("absent.toml"));
        assert!(matches!(result, Err(CliError::Io(_))));
    }
}
