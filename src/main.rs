use anyhow::{Context, Result};
use beats2bars::app::run_label_command;
use beats2bars::cli::{Cli, Commands, ConfigAction};
use beats2bars::config::Config;
use beats2bars::output::{render_banner, render_summary};
use clap::{CommandFactory, Parser};
use std::io::IsTerminal;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(&cli);
    tracing::debug!("beats2bars {}", beats2bars::version_string());

    match &cli.command {
        None => {
            let config = cli.apply_overrides(load_config(cli.config.as_deref())?);
            config.validate()?;

            let color = std::io::stderr().is_terminal();
            if !cli.quiet {
                eprintln!("{}", render_banner("beats2bars", &config.labels, color));
            }

            let stats = run_label_command(&config, &cli.input)?;

            if !cli.quiet {
                eprintln!("{}", render_summary(&stats, color));
            }
        }
        Some(Commands::Config { action }) => {
            handle_config_command(action, cli.config.as_deref())?;
        }
        Some(Commands::Completions { shell }) => {
            clap_complete::generate(
                *shell,
                &mut Cli::command(),
                "beats2bars",
                &mut std::io::stdout(),
            );
        }
    }

    Ok(())
}

/// Log to stderr; stdout carries label data.
fn init_logging(cli: &Cli) {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(cli.log_filter())),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

/// Config file edited by the `config` subcommands: --config, else the default path.
fn config_path(custom_path: Option<&Path>) -> Option<PathBuf> {
    custom_path
        .map(Path::to_path_buf)
        .or_else(Config::default_path)
}

/// Load configuration from file or use defaults, then apply environment overrides.
///
/// Priority order:
/// 1. Custom config path from CLI (--config), which must exist
/// 2. Default config path (~/.config/beats2bars/config.toml), if present
/// 3. Built-in defaults
fn load_config(custom_path: Option<&Path>) -> Result<Config> {
    let config = match custom_path {
        Some(path) => Config::load(path)?,
        None => match Config::default_path() {
            Some(default_path) => Config::load_or_default(&default_path)?,
            None => Config::default(),
        },
    };
    Ok(config.with_env_overrides())
}

/// Handle configuration commands.
fn handle_config_command(action: &ConfigAction, custom_path: Option<&Path>) -> Result<()> {
    let path = config_path(custom_path).context("Could not determine config directory")?;

    match action {
        ConfigAction::Get { key } => {
            let config = Config::load_or_default(&path)?.with_env_overrides();
            println!("{}", config.get_value_by_path(key)?);
        }
        ConfigAction::Set { key, value } => {
            Config::set_value_by_path(&path, key, value)?;
            println!("Set {} = {}", key, value);
        }
        ConfigAction::Dump => {
            print!("{}", Config::dump_template());
        }
    }
    Ok(())
}
