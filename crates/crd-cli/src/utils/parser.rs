use charmm_crd::core::models::units::LengthUnit;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("Invalid --set format: '{0}'. Expected KEY=VALUE.")]
    InvalidKeyValue(String),

    #[error("Invalid boolean value for {key}: '{value}'. Expected true/false, yes/no or 1/0.")]
    InvalidBool { key: String, value: String },

    #[error("Unknown length unit '{0}'. Expected 'angstrom' or 'nm'.")]
    UnknownUnit(String),

    #[error("Unknown configuration key '{0}'.")]
    UnknownKey(String),
}

/// Splits a `KEY=VALUE` pair at the first `=`.
pub fn parse_key_value(pair: &str) -> Result<(&str, &str), ParseError> {
    match pair.split_once('=') {
        Some((key, value)) if !key.trim().is_empty() => Ok((key.trim(), value.trim())),
        _ => Err(ParseError::InvalidKeyValue(pair.to_string())),
    }
}

pub fn parse_bool(key: &str, value: &str) -> Result<bool, ParseError> {
    match value.to_ascii_lowercase().as_str() {
        "true" | "yes" | "on" | "1" => Ok(true),
        "false" | "no" | "off" | "0" => Ok(false),
        _ => Err(ParseError::InvalidBool {
            key: key.to_string(),
            value: value.to_string(),
        }),
    }
}

pub fn parse_unit(value: &str) -> Result<LengthUnit, ParseError> {
    value
        .parse()
        .map_err(|_| ParseError::UnknownUnit(value.to_string()))
}
