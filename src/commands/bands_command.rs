//! Band resolution report
//!
//! Shows which raster each configured band resolves to, without sampling.

use clap::ArgMatches;

use crate::commands::command_traits::Command;
use crate::commands::config_from_args;
use crate::config::SurveyConfig;
use crate::errors::SurveyResult;
use crate::features::find_raster_files;

pub struct BandsCommand {
    config: SurveyConfig,
}

impl BandsCommand {
    pub fn new(args: &ArgMatches) -> SurveyResult<Self> {
        Ok(BandsCommand { config: config_from_args(args)? })
    }
}

impl Command for BandsCommand {
    fn execute(&self) -> SurveyResult<()> {
        let raster_dir = self.config.raster_path();
        let candidates = find_raster_files(&raster_dir)?;
        let extractor = self.config.feature_extractor()?;

        println!("{} raster files under {}", candidates.len(), raster_dir.display());
        for (band, path) in extractor.resolve_bands(&candidates) {
            match path {
                Some(path) => println!("  {} ({}): {}", band, band.description(), path.display()),
                None => println!("  {} ({}): not found", band, band.description()),
            }
        }

        for index in &self.config.indices {
            let (first, second) = index.inputs();
            println!("  {} needs {} and {}", index, first, second);
        }

        Ok(())
    }
}
