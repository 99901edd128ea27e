use std::process;

mod cli;
mod completions;
mod error;
mod exit_codes;
mod init;
mod list;
mod report;

use clap::CommandFactory;
use cli::{Cli, Commands, OutputsSubcommand, TemplatesSubcommand};
use exit_codes::{EXIT_SUCCESS, EXIT_WARNING};

#[tokio::main]
async fn main() {
    let cli = Cli::parse_args();

    // Fast path for help - avoid initializing anything else
    if cli.command.is_none() {
        Cli::command().print_help().expect("Failed to print help");
        process::exit(EXIT_SUCCESS);
    }

    use tracing::Level;

    // Configure logging based on verbosity flags; logs go to stderr so the
    // report stream on stdout stays clean
    let log_level = if cli.quiet {
        Level::ERROR
    } else if cli.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(log_level)
        .init();

    let exit_code = match cli.command {
        Some(Commands::Init { force }) => {
            tracing::debug!("Running init command");
            run_init(force)
        }
        Some(Commands::Report(args)) => {
            tracing::debug!("Running report command");
            run_report(args).await
        }
        Some(Commands::Templates { subcommand }) => {
            let TemplatesSubcommand::List { format } = subcommand;
            run_templates_list(format)
        }
        Some(Commands::Outputs { subcommand }) => {
            let OutputsSubcommand::List { format } = subcommand;
            run_outputs_list(format)
        }
        Some(Commands::Completion { shell }) => {
            tracing::debug!("Generating completion for {:?}", shell);
            run_completions(shell)
        }
        None => {
            // This case is handled early above for performance
            unreachable!()
        }
    };

    process::exit(exit_code);
}

fn run_init(force: bool) -> i32 {
    match init::run_init_command(force) {
        Ok(_) => EXIT_SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            EXIT_WARNING
        }
    }
}

async fn run_report(args: cli::ReportArgs) -> i32 {
    use error::handle_cli_result;

    handle_cli_result(report::run_report_command(args).await)
}

fn run_templates_list(format: cli::OutputFormat) -> i32 {
    match list::run_templates_list(format) {
        Ok(_) => EXIT_SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            EXIT_WARNING
        }
    }
}

fn run_outputs_list(format: cli::OutputFormat) -> i32 {
    match list::run_outputs_list(format) {
        Ok(_) => EXIT_SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            EXIT_WARNING
        }
    }
}

fn run_completions(shell: clap_complete::Shell) -> i32 {
    match completions::print_completion(shell) {
        Ok(_) => EXIT_SUCCESS,
        Err(e) => {
            tracing::error!("Completion error: {}", e);
            EXIT_WARNING
        }
    }
}
