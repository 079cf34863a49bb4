//! Feature extraction command

use clap::ArgMatches;
use log::info;

use crate::commands::command_traits::Command;
use crate::commands::config_from_args;
use crate::config::SurveyConfig;
use crate::errors::SurveyResult;
use crate::pipeline;
use crate::utils::progress::ProgressTracker;

/// Runs the full survey and writes the feature table
pub struct ExtractCommand {
    config: SurveyConfig,
    show_progress: bool,
}

impl ExtractCommand {
    pub fn new(args: &ArgMatches) -> SurveyResult<Self> {
        let config = config_from_args(args)?;
        info!("Wells: {}", config.wells_path().display());
        info!("Rasters: {}", config.raster_path().display());
        info!("Output: {}", config.output_path().display());

        Ok(ExtractCommand {
            config,
            show_progress: !args.get_flag("no-progress"),
        })
    }
}

impl Command for ExtractCommand {
    fn execute(&self) -> SurveyResult<()> {
        let progress = if self.show_progress {
            ProgressTracker::new(self.config.bands.len() as u64, "Sampling bands")
        } else {
            ProgressTracker::hidden()
        };

        let summary = pipeline::run(&self.config, &progress)?;
        println!("{}", summary);
        Ok(())
    }
}
