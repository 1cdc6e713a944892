//! mcu-pool-import: import microcontroller pin tables into a component pool
//!
//! Reads a vendor pin table and a package record, then writes a unit, an
//! entity and a part into the pool.

use std::io::IsTerminal;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use thiserror::Error;
use tracing::{error, info, Level};
use tracing_subscriber::EnvFilter;

use mcu_pool_import::config::{self, Config, InteractivePrompter, NoPrompt, Prompter, RunOptions};
use mcu_pool_import::error::ConfigError;
use mcu_pool_import::import::{self, ImportError, ImportedRecords};
use mcu_pool_import::pool;

/// Import a microcontroller pin table into a component pool.
///
/// Creates a unit, an entity and a part linked to an existing package.
/// Options not given as flags are read from `MCU_IMPORT_*` environment
/// variables, then the settings file, then prompted for.
#[derive(Parser, Debug)]
#[command(name = "mcu-pool-import")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to configuration file
    #[arg(short, long, value_name = "CONFIG_FILE")]
    config: Option<PathBuf>,

    /// Pool root directory
    #[arg(long = "pool", value_name = "DIR", env = "MCU_IMPORT_POOL_PATH")]
    pool_path: Option<PathBuf>,

    /// Package record the part maps its pads to
    #[arg(long = "package", value_name = "FILE", env = "MCU_IMPORT_PACKAGE")]
    package_path: Option<PathBuf>,

    /// Vendor pin table (STM32CubeMX MCU XML)
    #[arg(long = "xml", value_name = "FILE", env = "MCU_IMPORT_XML")]
    xml_path: Option<PathBuf>,

    /// Part number, also used as unit and entity name
    #[arg(long, env = "MCU_IMPORT_PART_NAME")]
    part_name: Option<String>,

    /// Datasheet URL
    #[arg(long = "datasheet", value_name = "URL", env = "MCU_IMPORT_DATASHEET")]
    datasheet_url: Option<String>,

    /// Part description
    #[arg(long, env = "MCU_IMPORT_DESCRIPTION")]
    description: Option<String>,

    /// Never prompt; fail if a required option is missing
    #[arg(long)]
    no_prompt: bool,

    /// Print the records to stdout instead of writing them to the pool
    #[arg(long)]
    dry_run: bool,

    /// Increase logging verbosity (-v for info, -vv for debug, -vvv for trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Decrease logging verbosity (only show errors)
    #[arg(short, long)]
    quiet: bool,
}

impl Args {
    fn run_options(&self) -> RunOptions {
        RunOptions {
            pool_path: self.pool_path.clone(),
            package_path: self.package_path.clone(),
            xml_path: self.xml_path.clone(),
            part_name: self.part_name.clone(),
            datasheet_url: self.datasheet_url.clone(),
            description: self.description.clone(),
        }
    }
}

#[derive(Debug, Error)]
enum RunError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Import(#[from] ImportError),

    #[error("failed to print records")]
    Print(#[source] serde_json::Error),
}

/// Determines the log level from CLI arguments.
#[allow(clippy::match_same_arms)] // Explicit "warn" arm for clarity
fn get_log_level(verbose: u8, quiet: bool, config_level: &str) -> Level {
    if quiet {
        return Level::ERROR;
    }

    match verbose {
        0 => match config_level.to_lowercase().as_str() {
            "trace" => Level::TRACE,
            "debug" => Level::DEBUG,
            "info" => Level::INFO,
            "warn" => Level::WARN,
            "error" => Level::ERROR,
            _ => Level::WARN, // Default to warn for unknown levels
        },
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    }
}

/// Initialises the tracing subscriber for logging.
fn init_tracing(level: Level) {
    let filter = EnvFilter::from_default_env().add_directive(level.into());

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn run(args: &Args, cfg: &Config) -> Result<(), RunError> {
    let interactive = !args.no_prompt && std::io::stdin().is_terminal();
    let mut prompter: Box<dyn Prompter> = if interactive {
        Box::new(InteractivePrompter)
    } else {
        Box::new(NoPrompt)
    };
    let resolved = config::resolve(args.run_options(), cfg, prompter.as_mut())?;

    let package = import::read_package(&resolved.package_path)?;
    if let Some(name) = &package.name {
        info!(package = %name, pads = package.pads.len(), "Read package");
    }
    let table = import::read_pin_table(&resolved.xml_path)?;
    if let Some(device) = &table.ref_name {
        info!(device = %device, pins = table.pins.len(), "Read pin table");
    }

    let options = resolved.import_options(&cfg.records);
    let records = import::import(&package, &table, &options)?;

    if args.dry_run {
        print_records(&records)?;
        return Ok(());
    }

    let written = pool::write_records(&resolved.pool_path, &records)?;
    info!(
        unit = %written.unit.display(),
        entity = %written.entity.display(),
        part = %written.part.display(),
        "Import complete"
    );
    Ok(())
}

fn print_records(records: &ImportedRecords) -> Result<(), RunError> {
    let json = serde_json::to_string_pretty(records).map_err(RunError::Print)?;
    println!("{json}");
    Ok(())
}

/// Entry point for mcu-pool-import.
fn main() -> ExitCode {
    let args = Args::parse();

    // Load configuration
    let cfg = match config::load_config(args.config.as_deref()) {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("Configuration error: {e}");
            return ExitCode::FAILURE;
        }
    };

    // Initialise logging
    let log_level = get_log_level(args.verbose, args.quiet, &cfg.logging.level);
    init_tracing(log_level);

    info!(version = env!("CARGO_PKG_VERSION"), "Starting mcu-pool-import");

    match run(&args, &cfg) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "Import failed");
            let mut source = std::error::Error::source(&e);
            while let Some(cause) = source {
                error!(cause = %cause, "Caused by");
                source = cause.source();
            }
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verify_cli() {
        use clap::CommandFactory;
        Args::command().debug_assert();
    }

    #[test]
    fn log_level_from_flags() {
        assert_eq!(get_log_level(0, true, "trace"), Level::ERROR);
        assert_eq!(get_log_level(0, false, "debug"), Level::DEBUG);
        assert_eq!(get_log_level(0, false, "nonsense"), Level::WARN);
        assert_eq!(get_log_level(2, false, "warn"), Level::DEBUG);
        assert_eq!(get_log_level(5, false, "warn"), Level::TRACE);
    }

    #[test]
    fn flags_become_run_options() {
        let args = Args::parse_from([
            "mcu-pool-import",
            "--pool",
            "/pool",
            "--package",
            "pkg.json",
            "--xml",
            "mcu.xml",
            "--part-name",
            "STM32F030F4P6",
            "--no-prompt",
        ]);
        let options = args.run_options();
        assert_eq!(options.pool_path, Some(PathBuf::from("/pool")));
        assert_eq!(options.package_path, Some(PathBuf::from("pkg.json")));
        assert_eq!(options.xml_path, Some(PathBuf::from("mcu.xml")));
        assert_eq!(options.part_name.as_deref(), Some("STM32F030F4P6"));
        assert!(args.no_prompt);
    }
}
