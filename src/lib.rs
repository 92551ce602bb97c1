pub mod api;
pub mod auth;
pub mod cli;
pub mod config;
pub mod error;
pub mod logging;
pub mod models;
pub mod registry;
pub mod resolve;

use cli::output::print_error;
use config::{OutputMode, RuntimeConfig};
use error::AppError;
use models::command::Operation;
use resolve::Resolution;

pub async fn run(cli_args: cli::Cli) -> i32 {
    let config = RuntimeConfig {
        output_mode: if cli_args.table {
            OutputMode::Table
        } else {
            OutputMode::Json
        },
        verbose: cli_args.verbose,
        api_key: cli_args.api_key,
        api_url: cli_args.api_url,
        registry_path: cli_args.registry,
        resolution: if cli_args.strict {
            Resolution::Strict
        } else {
            Resolution::Lenient
        },
    };

    logging::init(config.verbose);

    let result = dispatch(cli_args.command, &config).await;

    match result {
        Ok(()) => 0,
        Err(err) => {
            print_error(&err);
            err.exit_code()
        }
    }
}

async fn dispatch(command: cli::Commands, config: &RuntimeConfig) -> Result<(), AppError> {
    match command {
        cli::Commands::Login => cli::auth::handle_login(config).await,
        cli::Commands::Logout => cli::auth::handle_logout(config).await,
        cli::Commands::Status => cli::auth::handle_status(config).await,
        cli::Commands::Devices(cmd) => cli::devices::handle(&cmd, config).await,
        cli::Commands::State { target } => cli::state::handle(&target, config).await,
        cli::Commands::Turn {
            state,
            target,
            keep_going,
        } => cli::control::handle(Operation::Turn(state), &target, keep_going, config).await,
        cli::Commands::Brightness {
            value,
            target,
            keep_going,
        } => {
            let op = Operation::from_args("brightness", &value)?;
            cli::control::handle(op, &target, keep_going, config).await
        }
        cli::Commands::Color {
            value,
            target,
            keep_going,
        } => {
            let op = Operation::from_args("color", &value)?;
            cli::control::handle(op, &target, keep_going, config).await
        }
        cli::Commands::ColorTemp {
            value,
            target,
            keep_going,
        } => {
            let op = Operation::from_args("color_temp", &value)?;
            cli::control::handle(op, &target, keep_going, config).await
        }
    }
}
