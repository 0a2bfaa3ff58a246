use super::GlobalOptions;
use crate::cli::ConvertArgs;
use crate::config::builder::{CliOverrides, build_config};
use crate::error::{CliError, Result};
use crate::utils::progress::CliProgressHandler;
use charmm_crd::core::io::crd::error::CrdError;
use charmm_crd::core::io::crd::format::FormatVariant;
use charmm_crd::core::io::crd::reader::CrdReader;
use charmm_crd::engine::config::ReaderConfig;
use charmm_crd::engine::progress::ProgressReporter;
use charmm_crd::workflows::export::{self, StaticFrame};
use std::fs::File;
use std::io::BufReader;
use tracing::{info, warn};

pub fn run(args: ConvertArgs, global: &GlobalOptions) -> Result<()> {
    let config = build_config(
        global.config.as_deref(),
        &global.set_values,
        &CliOverrides {
            read: Some(&args.read),
            title: args.title.as_deref(),
            force_extended: args.extended,
        },
    )?;

    // Output coordinates are always Angstroms, so the input is read unconverted.
    if config.reader.convert_units {
        warn!("Unit conversion is ignored by 'convert'; coordinates are copied in Angstroms.");
    }
    let reader_config = ReaderConfig {
        convert_units: false,
        ..config.reader
    };

    info!("Loading input CRD file from {:?}", &args.input);
    let (frame, records) = File::open(&args.input)
        .map_err(CrdError::from)
        .and_then(|file| CrdReader::new(reader_config).parse_records(&mut BufReader::new(file)))
        .map_err(|e| CliError::FileParsing {
            path: args.input.clone(),
            source: e.into(),
        })?;
    info!(
        atoms = frame.atom_count(),
        variant = ?frame.variant(),
        "Input parsed."
    );

    let name = args
        .input
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| args.input.display().to_string());
    let mut source = StaticFrame::from_records(name, records);

    let progress_handler = if global.quiet {
        CliProgressHandler::hidden()
    } else {
        CliProgressHandler::new()
    };
    let reporter = ProgressReporter::with_callback(progress_handler.get_callback());

    let summary = export::run(&mut source, None, &args.output, &config.writer, &reporter)?;

    let layout = match summary.variant {
        FormatVariant::Standard => "standard",
        FormatVariant::Extended => "extended (EXT)",
    };
    println!(
        "✓ Wrote {} atoms ({} layout) to {}",
        summary.atom_count,
        layout,
        summary.path.display()
    );
    Ok(())
}
