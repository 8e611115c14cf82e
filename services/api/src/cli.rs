use crate::report::{run_report, run_view, ReportArgs, ViewArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use job_insights::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Job Posting Insights",
    about = "Serve and print the job posting insight views from the command line",
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
    /// Print every dashboard view
    Report(ReportArgs),
    /// Print a single view as JSON
    View(ViewArgs),
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
        Command::Report(args) => run_report(args),
        Command::View(args) => run_view(args),
    }
}
