use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;

mod app;
mod ui;

use app::App;
use order_tracker::config::Config;
use order_tracker::logging;
use order_tracker::notifications::LogNotifier;
use order_tracker::simulate::{self, Action, StepOutcome};
use order_tracker::Tracker;

#[derive(Parser)]
#[command(name = "order-tracker")]
#[command(about = "Interactive order lifecycle step tracker")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Config file path
    #[arg(short, long)]
    config: Option<String>,

    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// List the configured stages
    Stages,

    /// Print the effective configuration as TOML
    Config,

    /// Run a scripted sequence without the TUI
    Simulate {
        /// Actions in order: next, jump:<index> (0-based), cancel
        #[arg(required = true)]
        actions: Vec<Action>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load configuration first (needed for logging setup)
    let config = Config::load(cli.config.as_deref())?;

    // Determine if we're running in TUI mode (no subcommand)
    let is_tui_mode = cli.command.is_none();

    // Initialize logging (file-based for TUI, stderr for CLI)
    let logging_handle = logging::init_logging(&config, is_tui_mode, cli.debug)?;

    match cli.command {
        Some(Commands::Stages) => cmd_stages(&config)?,
        Some(Commands::Config) => cmd_config(&config)?,
        Some(Commands::Simulate { actions }) => cmd_simulate(&config, &actions)?,
        None => {
            // No subcommand = launch the interactive tracker
            run_tui(config, logging_handle.log_file_path)?;
        }
    }

    Ok(())
}

fn run_tui(config: Config, log_file_path: Option<PathBuf>) -> Result<()> {
    let mut app = App::new(config)?;
    let result = app.run();

    // Print log file path on exit if logs were written
    if let Some(log_path) = log_file_path {
        if let Ok(metadata) = log_path.metadata() {
            if metadata.len() > 0 {
                eprintln!("Session log: {}", log_path.display());
            }
        }
    }

    result
}

fn cmd_stages(config: &Config) -> Result<()> {
    let stages = config.stage_list()?;

    println!("Stages ({})", stages.len());
    println!("{}", "─".repeat(60));

    for (index, stage) in stages.iter().enumerate() {
        println!(
            "{:>2}. [{}] {} - {}",
            index, stage.id, stage.title, stage.description
        );
    }

    Ok(())
}

fn cmd_config(config: &Config) -> Result<()> {
    print!("{}", config.to_toml()?);
    Ok(())
}

fn cmd_simulate(config: &Config, actions: &[Action]) -> Result<()> {
    let mut tracker = Tracker::new(config.stage_list()?, Arc::new(LogNotifier));

    for (action, outcome) in simulate::run(&mut tracker, actions) {
        match outcome {
            StepOutcome::Applied => {}
            StepOutcome::Ignored => println!("{action}: ignored"),
            StepOutcome::Rejected(e) => println!("{action}: rejected ({e})"),
        }
    }

    println!(
        "Current stage: {} ({}){}",
        tracker.current_index(),
        tracker.current_stage().title,
        if tracker.is_cancelled() {
            " [cancelled]"
        } else {
            ""
        }
    );
    for view in tracker.stages_view() {
        println!("{:>2}. {:<16} {}", view.index, view.title, view.status);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_simulate_parses_actions() {
        let cli = Cli::try_parse_from(["order-tracker", "simulate", "next", "jump:3", "cancel"])
            .unwrap();
        match cli.command {
            Some(Commands::Simulate { actions }) => {
                assert_eq!(actions, vec![Action::Next, Action::Jump(3), Action::Cancel]);
            }
            _ => panic!("expected simulate command"),
        }
    }

    #[test]
    fn test_simulate_rejects_bad_action() {
        assert!(Cli::try_parse_from(["order-tracker", "simulate", "teleport"]).is_err());
    }

    #[test]
    fn test_no_subcommand_means_tui() {
        let cli = Cli::try_parse_from(["order-tracker", "--debug"]).unwrap();
        assert!(cli.command.is_none());
        assert!(cli.debug);
    }
}
