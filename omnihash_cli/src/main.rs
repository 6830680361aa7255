use clap::Parser;
use omnihash_cli::app;
use omnihash_cli::cli::Cli;
use omnihash_cli::config::{AppConfig, ConfigManager};
use omnihash_cli::error::{CliError, CliResult};

fn main() {
    let cli = Cli::parse();
    let debug = cli.debug;

    // Initialize logging based on debug flag
    if debug {
        env_logger::Builder::from_env(env_logger::Env::default())
            .filter_level(log::LevelFilter::Debug)
            .filter_module("omnihash_core", log::LevelFilter::Debug)
            .filter_module("omnihash_cli", log::LevelFilter::Debug)
            .format_timestamp_millis()
            .init();
        eprintln!("Debug logging enabled");
    } else {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    }

    let result = load_config(&cli).and_then(|config| app::run(cli, config));

    if let Err(error) = result {
        eprint!("{}", error.format_for_user(debug));
        std::process::exit(error.exit_code() as i32);
    }
}

fn load_config(cli: &Cli) -> CliResult<AppConfig> {
    let manager = match &cli.config {
        Some(path) if !path.exists() => {
            return Err(CliError::misuse(&format!(
                "Configuration file '{}' does not exist",
                path.display()
            )));
        }
        Some(path) => ConfigManager::with_path(path.clone()),
        None => ConfigManager::new(),
    };

    log::debug!("Configuration path: {}", manager.config_path().display());
    manager
        .load()
        .map_err(|e| CliError::misuse(&format!("{e:#}")))
}
