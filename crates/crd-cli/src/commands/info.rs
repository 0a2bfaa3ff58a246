use super::GlobalOptions;
use crate::cli::InfoArgs;
use crate::config::builder::{CliOverrides, build_config};
use crate::error::{CliError, Result};
use charmm_crd::workflows::inspect;
use tracing::info;

pub fn run(args: InfoArgs, global: &GlobalOptions) -> Result<()> {
    let config = build_config(
        global.config.as_deref(),
        &global.set_values,
        &CliOverrides {
            read: Some(&args.read),
            ..Default::default()
        },
    )?;

    info!("Inspecting {:?}", &args.input);
    let summary =
        inspect::run(&args.input, &config.reader).map_err(|e| CliError::FileParsing {
            path: args.input.clone(),
            source: e.into(),
        })?;

    print!("{}", summary);
    Ok(())
}
