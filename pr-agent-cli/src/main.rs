use std::process;
mod cli;
mod commands;
mod error;
mod exit_codes;
mod logging;
mod serve;

use clap::CommandFactory;
use cli::{Cli, Commands};
use commands::Settings;
use error::handle_cli_result;
use exit_codes::EXIT_SUCCESS;

#[tokio::main]
async fn main() {
    let cli = Cli::parse_args();

    // Fast path for help
    let Some(command) = cli.command.as_ref() else {
        let _ = Cli::command().print_help();
        process::exit(EXIT_SUCCESS);
    };

    use is_terminal::IsTerminal;
    let is_mcp_mode = matches!(command, Commands::Serve) && !std::io::stdin().is_terminal();
    logging::init(
        logging::level_for(is_mcp_mode, cli.quiet, cli.debug, cli.verbose),
        is_mcp_mode,
    );

    let settings = match Settings::from_cli(&cli) {
        Ok(settings) => settings,
        Err(e) => process::exit(handle_cli_result(Err(e))),
    };

    let exit_code = match command {
        Commands::Serve => {
            tracing::info!("Starting MCP server");
            serve::run_server(settings).await
        }
        Commands::Config { subcommand } => {
            handle_cli_result(commands::run_config(subcommand, &settings))
        }
        other => match commands::tool_call_for(other) {
            Some((name, arguments)) => {
                tracing::debug!("Running {} directly", name);
                handle_cli_result(commands::run_tool(settings, name, arguments).await)
            }
            None => EXIT_SUCCESS,
        },
    };

    process::exit(exit_code);
}
