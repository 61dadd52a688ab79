use anyhow::Result;
use log::{debug, info};
use std::process;

use spectacle_cli::actions::ActionRegistry;
use spectacle_cli::cli::{self, suggestion, Args};
use spectacle_cli::config::ConfigManager;
use spectacle_cli::display::ColourManager;
use spectacle_cli::validation::ValidationError;
use spectacle_cli::{app, logging};

fn main() {
    // Help, version and usage errors exit inside the parser, before any file I/O.
    let args = cli::parse_args();

    let config_manager = match app::load_configuration() {
        Ok(manager) => manager,
        Err(e) => {
            report_error(&e, &ColourManager::default());
            process::exit(1);
        }
    };
    let colours = app::create_colour_manager(&config_manager);

    if let Err(e) = run(args, &config_manager) {
        report_error(&e, &colours);
        process::exit(1);
    }
}

fn run(args: Args, config_manager: &ConfigManager) -> Result<()> {
    let log_config = app::configure_logging(config_manager)?;
    logging::init_logger(log_config)?;

    if let Some(path) = config_manager.config_file_path() {
        info!("Loaded configuration from: {}", path.display());
    }
    debug!("Parsed CLI arguments: {:?}", args);

    let registry = ActionRegistry::with_builtin_actions();

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;

    runtime.block_on(app::run_action(args, &registry))
}

fn report_error(e: &anyhow::Error, colours: &ColourManager) {
    debug!("Exiting after error: {:#}", e);
    eprintln!("{} {:#}", colours.error("Error:"), e);

    if let Some(ValidationError::UnknownAction { action, available }) = e.downcast_ref::<ValidationError>() {
        if let Some(candidate) = suggestion::suggest(action, available) {
            eprintln!("{} '{}'?", colours.hint("Did you mean"), colours.highlight(&candidate));
        }
        eprintln!("Available actions: {}", available.join(", "));
    }
}
