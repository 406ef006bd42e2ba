use crate::demo::{run_demo, run_questions, run_score, DemoArgs, QuestionsArgs, ScoreArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use lifestyle_checkin::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Lifestyle Check-in",
    about = "Run the daily lifestyle check-in service or score answers from the command line",
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
    /// Print the check-in question catalog
    Questions(QuestionsArgs),
    /// Score an answer set and print the assessment with its summary
    Score(ScoreArgs),
    /// Walk through a scripted evening check-in end to end
    Demo(DemoArgs),
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
        Command::Questions(args) => run_questions(args),
        Command::Score(args) => run_score(args),
        Command::Demo(args) => run_demo(args),
    }
}
