use super::defaults::DefaultsConfig;
use super::file::FileConfig;
use super::models::AppConfig;
use crate::cli::ReadArgs;
use crate::error::{CliError, Result};
use crate::utils::parser::{self, ParseError};
use charmm_crd::engine::config::{ReaderConfigBuilder, WriterConfigBuilder};
use std::path::Path;

/// Command-line values that take precedence over every other source.
#[derive(Debug, Default, Clone)]
pub struct CliOverrides<'a> {
    pub read: Option<&'a ReadArgs>,
    pub title: Option<&'a str>,
    pub force_extended: bool,
}

/// Resolves the final configuration.
///
/// Precedence, highest first: explicit command-line flags, `--set` values,
/// the configuration file, built-in defaults.
pub fn build_config(
    config_path: Option<&Path>,
    set_values: &[String],
    overrides: &CliOverrides,
) -> Result<AppConfig> {
    let defaults = DefaultsConfig::default();

    let file_config = match config_path {
        Some(path) => FileConfig::from_file(path)?,
        None => FileConfig::default(),
    };
    let file_config = apply_set_values(file_config, set_values)?;

    let read_file = file_config.read.unwrap_or_default();
    let write_file = file_config.write.unwrap_or_default();

    let convert_units = match overrides.read.map(|r| r.convert_units) {
        Some(flags) if flags.convert_units => true,
        Some(flags) if flags.no_convert_units => false,
        _ => read_file.convert_units.unwrap_or(defaults.convert_units),
    };

    let base_unit = match overrides.read.and_then(|r| r.base_unit.as_deref()) {
        Some(unit) => parser::parse_unit(unit)?,
        None => read_file.base_unit.unwrap_or(defaults.base_unit),
    };

    let strict_cli = overrides.read.is_some_and(|r| r.strict);
    let strict_atom_count = strict_cli
        || read_file
            .strict_atom_count
            .unwrap_or(defaults.strict_atom_count);

    let reader = ReaderConfigBuilder::new()
        .convert_units(convert_units)
        .base_unit(base_unit)
        .strict_atom_count(strict_atom_count)
        .build();

    let mut writer = WriterConfigBuilder::new().force_extended(
        overrides.force_extended || write_file.force_extended.unwrap_or(defaults.force_extended),
    );
    if let Some(title) = overrides.title.map(str::to_string).or(write_file.title) {
        writer = writer.title(title);
    }

    Ok(AppConfig {
        reader,
        writer: writer.build(),
    })
}

/// Applies `KEY=VALUE` overrides on top of a loaded configuration file.
pub fn apply_set_values(mut config: FileConfig, set_values: &[String]) -> Result<FileConfig> {
    for pair in set_values {
        let (key, value) = parser::parse_key_value(pair)?;
        match key {
            "read.convert-units" => {
                config.read.get_or_insert_with(Default::default).convert_units =
                    Some(parser::parse_bool(key, value)?);
            }
            "read.base-unit" => {
                config.read.get_or_insert_with(Default::default).base_unit =
                    Some(parser::parse_unit(value)?);
            }
            "read.strict-atom-count" => {
                config
                    .read
                    .get_or_insert_with(Default::default)
                    .strict_atom_count = Some(parser::parse_bool(key, value)?);
            }
            "write.title" => {
                config.write.get_or_insert_with(Default::default).title = Some(value.to_string());
            }
            "write.force-extended" => {
                config
                    .write
                    .get_or_insert_with(Default::default)
                    .force_extended = Some(parser::parse_bool(key, value)?);
            }
            _ => {
                return Err(CliError::Config(
                    ParseError::UnknownKey(key.to_string()).to_string(),
                ));
            }
        }
    }
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::{Cli, Commands};
    use charmm_crd::core::models::units::LengthUnit;
    use clap::Parser;
    use std::fs;
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn write_config_file(dir: &TempDir, content: &str) -> PathBuf {
        let path = dir.path().join("crdtool.toml");
        fs::write(&path, content).unwrap();
        path
    }

    fn info_read_args(extra: &[&str]) -> ReadArgs {
        let mut args = vec!["crdtool", "info", "in.crd"];
        args.extend_from_slice(extra);
        match Cli::parse_from(args).command {
            Commands::Info(info) => info.read,
            other => panic!("expected 'info' subcommand, got {:?}", other),
        }
    }

    #[test]
    fn defaults_apply_without_any_source() {
        let config = build_config(None, &[], &CliOverrides::default()).unwrap();

        assert!(!config.reader.convert_units);
        assert_eq!(config.reader.base_unit, LengthUnit::Nanometer);
        assert!(!config.reader.strict_atom_count);
        assert_eq!(config.writer.title, None);
        assert!(!config.writer.force_extended);
    }

    #[test]
    fn file_values_override_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_config_file(
            &dir,
            r#"
            [read]
            convert-units = true
            base-unit = "angstrom"

            [write]
            title = "from file"
            "#,
        );

        let config = build_config(Some(&path), &[], &CliOverrides::default()).unwrap();
        assert!(config.reader.convert_units);
        assert_eq!(config.reader.base_unit, LengthUnit::Angstrom);
        assert_eq!(config.writer.title.as_deref(), Some("from file"));
    }

    #[test]
    fn set_values_override_file_values() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_config_file(&dir, "[read]\nbase-unit = \"angstrom\"\n");
        let set_values = vec![
            "read.base-unit=nm".to_string(),
            "write.force-extended=yes".to_string(),
            "write.title=from set".to_string(),
        ];

        let config = build_config(Some(&path), &set_values, &CliOverrides::default()).unwrap();
        assert_eq!(config.reader.base_unit, LengthUnit::Nanometer);
        assert!(config.writer.force_extended);
        assert_eq!(config.writer.title.as_deref(), Some("from set"));
    }

    #[test]
    fn cli_flags_override_set_values_and_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_config_file(&dir, "[read]\nconvert-units = true\n");
        let set_values = vec!["read.base-unit=angstrom".to_string(), "write.title=set".to_string()];
        let read = info_read_args(&["--no-convert-units", "--base-unit", "nm", "--strict"]);
        let overrides = CliOverrides {
            read: Some(&read),
            title: Some("from flag"),
            force_extended: false,
        };

        let config = build_config(Some(&path), &set_values, &overrides).unwrap();
        assert!(!config.reader.convert_units);
        assert_eq!(config.reader.base_unit, LengthUnit::Nanometer);
        assert!(config.reader.strict_atom_count);
        assert_eq!(config.writer.title.as_deref(), Some("from flag"));
    }

    #[test]
    fn unknown_set_key_is_a_config_error() {
        let result = apply_set_values(FileConfig::default(), &["write.width=8".to_string()]);
        match result {
            Err(CliError::Config(msg)) => assert!(msg.contains("write.width")),
            other => panic!("expected config error, got {:?}", other),
        }
    }

    #[test]
    fn malformed_set_values_are_rejected() {
        assert!(matches!(
            apply_set_values(FileConfig::default(), &["read.convert-units".to_string()]),
            Err(CliError::Parse(ParseError::InvalidKeyValue(_)))
        ));
        assert!(matches!(
            apply_set_values(
                FileConfig::default(),
                &["read.convert-units=perhaps".to_string()]
            ),
            Err(CliError::Parse(ParseError::InvalidBool { .. }))
        ));
        assert!(matches!(
            build_config(
                None,
                &[],
                &CliOverrides {
                    read: Some(&info_read_args(&["--base-unit", "parsec"])),
                    ..Default::default()
                }
            ),
            Err(CliError::Parse(ParseError::UnknownUnit(_)))
        ));
    }
}
