use crate::demo::{run_demo, run_transition_check, run_transition_table, CheckArgs, DemoArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use gensanworks::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "GensanWorks Application Lifecycle",
    about = "Run and inspect the GensanWorks application lifecycle controller",
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
    /// Inspect the application status transition rules
    Transitions {
        #[command(subcommand)]
        command: TransitionsCommand,
    },
    /// Walk an in-memory application through a status path and print each commit
    Demo(DemoArgs),
}

#[derive(Subcommand, Debug)]
enum TransitionsCommand {
    /// Print the full transition table with derived referral statuses
    Table,
    /// Check whether a single status change is allowed
    Check(CheckArgs),
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
        Command::Transitions {
            command: TransitionsCommand::Table,
        } => run_transition_table(),
        Command::Transitions {
            command: TransitionsCommand::Check(args),
        } => run_transition_check(args),
        Command::Demo(args) => run_demo(args),
    }
}
