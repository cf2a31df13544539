use crate::inspect::{run_form_check, run_form_default, run_form_validate, ValidateArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use formdesk::error::AppError;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "formdesk",
    about = "Serve the application-form back office or inspect form documents offline",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Work with form schema and answer documents on disk
    Form {
        #[command(subcommand)]
        command: FormCommand,
    },
}

#[derive(Subcommand, Debug)]
enum FormCommand {
    /// Report structural issues in a form schema JSON file
    Check {
        /// Path to the schema document
        schema: PathBuf,
    },
    /// Validate an answers JSON file against a schema
    Validate(ValidateArgs),
    /// Print the built-in eligibility form as JSON
    Default,
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Form { command } => match command {
            FormCommand::Check { schema } => run_form_check(&schema),
            FormCommand::Validate(args) => run_form_validate(args),
            FormCommand::Default => run_form_default(),
        },
    }
}
