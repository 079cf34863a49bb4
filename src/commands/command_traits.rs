//! Command pattern interfaces

use clap::ArgMatches;

use crate::errors::SurveyResult;

/// An executable CLI operation
pub trait Command {
    fn execute(&self) -> SurveyResult<()>;
}

/// Creates the command selected by the parsed arguments
pub trait CommandFactory {
    fn create_command(&self, args: &ArgMatches) -> SurveyResult<Box<dyn Command>>;
}
