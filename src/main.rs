use clap::{Arg, ArgAction, Command as ClapCommand};
use log::{error, LevelFilter};
use std::path::PathBuf;
use std::process;

use groundsat::commands::{CommandFactory, GroundsatCommandFactory};
use groundsat::config::PRESET_NAMES;
use groundsat::utils::logger::Logger;

/// Arguments shared by the commands that read a run configuration
fn config_args() -> Vec<Arg> {
    vec![
        Arg::new("config")
            .short('c')
            .long("config")
            .help("TOML run configuration")
            .value_name("FILE")
            .conflicts_with("preset"),
        Arg::new("preset")
            .short('p')
            .long("preset")
            .help("Built-in configuration")
            .value_name("NAME")
            .value_parser(PRESET_NAMES),
        Arg::new("base-dir")
            .long("base-dir")
            .help("Directory the input and output paths are relative to")
            .value_name("DIR"),
        Arg::new("wells")
            .long("wells")
            .help("Groundwater well CSV")
            .value_name("FILE"),
        Arg::new("rasters")
            .long("rasters")
            .help("Directory searched for band rasters")
            .value_name("DIR"),
        Arg::new("region")
            .long("region")
            .help("Well region as min_lon,min_lat,max_lon,max_lat")
            .value_name("BBOX"),
    ]
}

fn main() {
    let matches = ClapCommand::new("groundsat")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Join groundwater well readings with Sentinel-2 band rasters")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .help("Enable debug logging")
                .global(true)
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("log-file")
                .long("log-file")
                .help("Log file path")
                .value_name("FILE")
                .global(true)
                .default_value("groundsat.log"),
        )
        .subcommand(
            ClapCommand::new("extract")
                .about("Sample band rasters at the wells and write the feature table")
                .args(config_args())
                .arg(
                    Arg::new("output")
                        .short('o')
                        .long("output")
                        .help("Output CSV")
                        .value_name("FILE"),
                )
                .arg(
                    Arg::new("no-progress")
                        .long("no-progress")
                        .help("Do not draw a progress bar")
                        .action(ArgAction::SetTrue),
                ),
        )
        .subcommand(
            ClapCommand::new("inspect")
                .about("Show the structure and georeferencing of a raster")
                .arg(
                    Arg::new("input")
                        .help("Input GeoTIFF")
                        .required(true)
                        .index(1),
                )
                .arg(
                    Arg::new("point")
                        .long("point")
                        .help("Sample the raster at x,y (repeatable)")
                        .value_name("X,Y")
                        .action(ArgAction::Append),
                )
                .arg(
                    Arg::new("point-crs")
                        .long("point-crs")
                        .help("CRS of the --point coordinates")
                        .value_name("EPSG")
                        .default_value("EPSG:4326"),
                )
                .arg(
                    Arg::new("tags")
                        .long("tags")
                        .help("List the tags of the first image")
                        .action(ArgAction::SetTrue),
                ),
        )
        .subcommand(
            ClapCommand::new("bands")
                .about("Show which raster each band resolves to")
                .args(config_args()),
        )
        .get_matches();

    let level = if matches.get_flag("verbose") { LevelFilter::Debug } else { LevelFilter::Info };
    let log_file = matches.get_one::<String>("log-file")
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("groundsat.log"));

    if let Err(e) = Logger::init_global_logger(&log_file, level) {
        eprintln!("Error setting up global logger: {}", e);
        process::exit(1);
    }

    let factory = GroundsatCommandFactory::new();

    match factory.create_command(&matches) {
        Ok(command) => {
            if let Err(e) = command.execute() {
                error!("Command execution error: {}", e);
                process::exit(1);
            }
        }
        Err(e) => {
            error!("Failed to create command: {}", e);
            process::exit(1);
        }
    }
}
