mod cli;
mod commands;
pub mod core;
pub mod models;

use clap::Parser;
use cli::{Cli, Commands};
use crate::core::AppConfig;

fn execute(config: &AppConfig, command: Commands) -> Result<String, String> {
    let desktop = crate::core::desktop::platform();
    match command {
        Commands::List => commands::windows::list_windows(config, &desktop),
        Commands::Save { name } => commands::layouts::save_layout(config, &desktop, name),
        Commands::Layouts => commands::layouts::list_layouts(config),
        Commands::Show { layout } => commands::layouts::show_layout(config, &layout),
        Commands::Restore { layout } => commands::layouts::restore_layout(config, &desktop, &layout),
        Commands::Logs { clear: true, .. } => commands::logs::clear_logs(config),
        Commands::Logs { limit, query, .. } => commands::logs::read_logs(config, limit, query),
    }
}

pub fn run() {
    let cli = Cli::parse();

    let config = match AppConfig::from_env(cli.dir) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("error: {:#}", e);
            std::process::exit(1);
        }
    };
    if config.settings.log_enabled {
        crate::core::app_log::install_panic_hook(config.log.clone());
    }

    match execute(&config, cli.command) {
        Ok(output) => {
            if !output.is_empty() {
                println!("{}", output);
            }
        }
        Err(e) => {
            eprintln!("error: {}", e);
            std::process::exit(1);
        }
    }
}
