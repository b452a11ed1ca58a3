use clap::Parser;
use docket::cli::commands;
use docket::cli::{Cli, Commands};
use docket::config;
use docket::logging::init_logging;
use docket::{DocketError, StructuredError};
use std::io::{self, IsTerminal};

fn main() {
    let cli = Cli::parse();

    if let Err(e) = init_logging(cli.verbose, cli.quiet, None) {
        eprintln!("Failed to initialize logging: {e}");
        // Continue without logging rather than abort
    }

    let overrides = build_cli_overrides(&cli);

    let result = match cli.command {
        Commands::Init { force } => commands::init::execute(force, None),
        Commands::Create(args) => commands::create::execute(args, &overrides),
        Commands::List(args) => commands::list::execute(&args, cli.json, &overrides),
        Commands::Show { id } => commands::show::execute(id, cli.json, &overrides),
        Commands::Update(args) => commands::update::execute(&args, &overrides),
        Commands::Comment(args) => commands::comment::execute(&args, cli.json, &overrides),
        Commands::Label { command } => commands::label::execute(&command, cli.json, &overrides),
        Commands::BulkStatus(args) => {
            commands::bulk_status::execute(&args, cli.json, &overrides)
        }
        Commands::User { command } => commands::user::execute(&command, cli.json, &overrides),
        Commands::Config { command } => {
            commands::config::execute(&command, cli.json, &overrides)
        }
    };

    if let Err(e) = result {
        handle_error(&e, cli.json, cli.no_color);
    }
}

/// Handle errors with structured output support.
///
/// When --json is set or stdout is not a TTY, outputs structured JSON to
/// stderr. Otherwise, outputs human-readable error with optional color.
fn handle_error(err: &DocketError, json_mode: bool, no_color: bool) -> ! {
    let structured = StructuredError::from_error(err);
    let exit_code = structured.code.exit_code();

    let use_json = json_mode || !io::stdout().is_terminal();

    if use_json {
        let json = structured.to_json();
        eprintln!(
            "{}",
            serde_json::to_string_pretty(&json).unwrap_or_else(|_| json.to_string())
        );
    } else {
        let use_color = io::stderr().is_terminal() && !no_color;
        eprintln!("{}", structured.to_human(use_color));
    }

    std::process::exit(exit_code);
}

fn build_cli_overrides(cli: &Cli) -> config::CliOverrides {
    config::CliOverrides {
        db: cli.db.clone(),
        json: Some(cli.json),
        lock_timeout: cli.lock_timeout,
    }
}
