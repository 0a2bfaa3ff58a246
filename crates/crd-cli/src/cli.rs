use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

const HELP_TEMPLATE: &str = "\
{before-help}{name} {version}
{author-with-newline}{about-with-newline}
{usage-heading} {usage}

{all-args}{after-help}
";

#[derive(Parser, Debug)]
#[command(
    author = "Tony Kan, Ted Yu, William A. Goddard III, Victor Wai Tak Kam",
    version,
    about = "crdtool - inspect and rewrite CHARMM CRD coordinate files in the standard and extended (EXT) layouts.",
    help_template = HELP_TEMPLATE,
)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity level (-v for INFO, -vv for DEBUG, -vvv for TRACE)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all log output except for errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Write logs to a specified file in addition to the console output
    #[arg(long, global = true, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Set the number of threads used to format atom lines.
    /// Defaults to the number of available logical cores.
    #[arg(short = 'j', long, global = true, value_name = "NUM")]
    pub threads: Option<usize>,

    /// Path to a configuration file in TOML format.
    #[arg(short, long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Set a specific configuration value, overriding the config file.
    /// Can be used multiple times. Example: -S read.base-unit=nm
    #[arg(short = 'S', long = "set", global = true, value_name = "KEY=VALUE")]
    pub set_values: Vec<String>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show the layout, atom counts, title and coordinate extent of a CRD file.
    Info(InfoArgs),
    /// Read a CRD file and write it again, re-selecting the layout by atom count.
    Convert(ConvertArgs),
}

/// Reader overrides shared by all subcommands.
#[derive(Args, Debug, Clone, Default)]
pub struct ReadArgs {
    /// Convert coordinates from Angstroms into the base unit.
    #[command(flatten)]
    pub convert_units: ConvertUnits,

    /// Base length unit used when converting ('angstrom' or 'nm').
    #[arg(long, value_name = "UNIT")]
    pub base_unit: Option<String>,

    /// Fail when the header atom count differs from the number of atom lines.
    #[arg(long)]
    pub strict: bool,
}

/// A group to handle mutually exclusive flags for unit conversion.
#[derive(Args, Debug, Clone, Copy, Default)]
#[group(required = false, multiple = false)]
pub struct ConvertUnits {
    /// Force conversion of coordinates into the base unit.
    #[arg(long)]
    pub convert_units: bool,
    /// Keep coordinates in the file's Angstroms.
    #[arg(long)]
    pub no_convert_units: bool,
}

/// Arguments for the `info` subcommand.
#[derive(Args, Debug)]
pub struct InfoArgs {
    /// Path to the CRD file to inspect.
    #[arg(required = true, value_name = "PATH")]
    pub input: PathBuf,

    #[command(flatten)]
    pub read: ReadArgs,
}

/// Arguments for the `convert` subcommand.
#[derive(Args, Debug)]
pub struct ConvertArgs {
    /// Path to the input CRD file.
    #[arg(required = true, value_name = "PATH")]
    pub input: PathBuf,

    /// Path for the output file; '.crd' is appended when it has no extension.
    #[arg(short, long, required = true, value_name = "PATH")]
    pub output: PathBuf,

    /// Title written to the first title line.
    /// Defaults to 'FRAME 1 FROM <input>'.
    #[arg(short, long, value_name = "TEXT")]
    pub title: Option<String>,

    /// Write the extended (EXT) layout even for small systems.
    #[arg(long)]
    pub extended: bool,

    #[command(flatten)]
    pub read: ReadArgs,
}
