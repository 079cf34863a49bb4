//! CLI command implementations

pub mod command_traits;
pub mod extract_command;
pub mod inspect_command;
pub mod bands_command;

pub use command_traits::{Command, CommandFactory};
pub use extract_command::ExtractCommand;
pub use inspect_command::InspectCommand;
pub use bands_command::BandsCommand;

use clap::ArgMatches;
use std::path::PathBuf;

use crate::config::SurveyConfig;
use crate::coordinate::BoundingBox;
use crate::errors::{SurveyError, SurveyResult};

/// Picks the command from the subcommand name
pub struct GroundsatCommandFactory;

impl GroundsatCommandFactory {
    pub fn new() -> Self {
        GroundsatCommandFactory
    }
}

impl Default for GroundsatCommandFactory {
    fn default() -> Self {
        Self::new()
    }
}

impl CommandFactory for GroundsatCommandFactory {
    fn create_command(&self, args: &ArgMatches) -> SurveyResult<Box<dyn Command>> {
        match args.subcommand() {
            Some(("extract", sub)) => Ok(Box::new(ExtractCommand::new(sub)?)),
            Some(("inspect", sub)) => Ok(Box::new(InspectCommand::new(sub)?)),
            Some(("bands", sub)) => Ok(Box::new(BandsCommand::new(sub)?)),
            Some((other, _)) => Err(SurveyError::Config(format!("Unknown command '{}'", other))),
            None => Err(SurveyError::Config("No command given, try --help".to_string())),
        }
    }
}

/// Builds the run configuration from `--config`/`--preset` and path overrides
pub(crate) fn config_from_args(args: &ArgMatches) -> SurveyResult<SurveyConfig> {
    let mut config = match args.get_one::<String>("config") {
        Some(path) => SurveyConfig::from_file(&PathBuf::from(path))?,
        None => {
            let preset = args.get_one::<String>("preset").map(String::as_str).unwrap_or("features");
            SurveyConfig::preset(preset)?
        }
    };

    if let Some(dir) = args.try_get_one::<String>("base-dir").ok().flatten() {
        config.base_dir = PathBuf::from(dir);
    }
    if let Some(file) = args.try_get_one::<String>("wells").ok().flatten() {
        config.wells_file = PathBuf::from(file);
    }
    if let Some(dir) = args.try_get_one::<String>("rasters").ok().flatten() {
        config.raster_dir = PathBuf::from(dir);
    }
    if let Some(file) = args.try_get_one::<String>("output").ok().flatten() {
        config.output_file = PathBuf::from(file);
    }

    if let Some(region) = args.try_get_one::<String>("region").ok().flatten() {
        let bbox = BoundingBox::from_string(region).map_err(SurveyError::Config)?;
        config.region.set_bounding_box(&bbox);
    }

    config.validate()?;
    Ok(config)
}
